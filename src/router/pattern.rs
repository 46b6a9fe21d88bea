//! Route pattern parsing and normalization.

use crate::router::error::Error;

/// One insertion step of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    /// Literal text, separators included.
    Static(String),
    /// A `:name` segment.
    Param,
    /// A trailing `*name` segment.
    Wildcard,
}

/// A normalized route pattern split into tree insertion pieces.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    pub(crate) path: String,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) param_names: Vec<String>,
}

/// Ensures a path starts with `/`; the empty path becomes `/`.
pub(crate) fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

impl Pattern {
    /// Parses a route pattern.
    ///
    /// Segments starting with `:` are named parameters, a segment starting with `*`
    /// is a wildcard and must be the last one. A bare `*` is named `*`.
    pub(crate) fn parse(raw: &str) -> Result<Self, Error> {
        let path = normalize(raw);
        let mut pieces = Vec::new();
        let mut param_names = Vec::new();
        let mut text = String::new();

        let mut segments = path[1..].split('/').peekable();
        text.push('/');
        while let Some(segment) = segments.next() {
            if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(Error::EmptyParamName(path));
                }
                pieces.push(Piece::Static(std::mem::take(&mut text)));
                pieces.push(Piece::Param);
                param_names.push(name.to_string());
            } else if let Some(name) = segment.strip_prefix('*') {
                if segments.peek().is_some() {
                    return Err(Error::WildcardNotLast(path));
                }
                pieces.push(Piece::Static(std::mem::take(&mut text)));
                pieces.push(Piece::Wildcard);
                param_names.push(if name.is_empty() { "*" } else { name }.to_string());
            } else {
                text.push_str(segment);
            }
            if segments.peek().is_some() {
                text.push('/');
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Static(text));
        }

        Ok(Self {
            path,
            pieces,
            param_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Piece {
        Piece::Static(text.to_string())
    }

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("users"), "/users");
        assert_eq!(normalize("/users"), "/users");
    }

    #[test]
    fn test_parse_static_pattern() {
        let pattern = Pattern::parse("/users/list").unwrap();
        assert_eq!(pattern.pieces, vec![s("/users/list")]);
        assert!(pattern.param_names.is_empty());
    }

    #[test]
    fn test_parse_root() {
        let pattern = Pattern::parse("").unwrap();
        assert_eq!(pattern.path, "/");
        assert_eq!(pattern.pieces, vec![s("/")]);
    }

    #[test]
    fn test_parse_params_and_wildcard() {
        let pattern = Pattern::parse("/users/:id/files/*rest").unwrap();
        assert_eq!(
            pattern.pieces,
            vec![s("/users/"), Piece::Param, s("/files/"), Piece::Wildcard]
        );
        assert_eq!(pattern.param_names, vec!["id", "rest"]);
    }

    #[test]
    fn test_parse_trailing_slash_after_param() {
        let pattern = Pattern::parse("/:id/").unwrap();
        assert_eq!(pattern.pieces, vec![s("/"), Piece::Param, s("/")]);
    }

    #[test]
    fn test_parse_unnamed_wildcard() {
        let pattern = Pattern::parse("/static/*").unwrap();
        assert_eq!(pattern.param_names, vec!["*"]);
    }

    #[test]
    fn test_wildcard_must_be_last() {
        let result = Pattern::parse("/files/*rest/meta");
        assert_eq!(result.unwrap_err(), Error::WildcardNotLast("/files/*rest/meta".to_string()));
    }

    #[test]
    fn test_empty_param_name() {
        assert!(matches!(Pattern::parse("/users/:"), Err(Error::EmptyParamName(_))));
    }
}
