//! OSM client error types.

use std::fmt;

/// Kind of map element, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Way => write!(f, "way"),
            ElementKind::Relation => write!(f, "relation"),
        }
    }
}

/// Errors from the OSM HTTP client.
#[derive(Debug)]
pub enum OsmError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed or the response was missing the element
    Json {
        message: String,
        body: Option<String>,
    },

    /// The map database has no such element
    NotFound { kind: ElementKind, id: i64 },

    /// API returned an error status code
    Api { status: u16, message: String },
}

impl fmt::Display for OsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsmError::Http(e) => write!(f, "HTTP error: {e}"),
            OsmError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            OsmError::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
            OsmError::Api { status, message } => write!(f, "API error {status}: {message}"),
        }
    }
}

impl std::error::Error for OsmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OsmError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OsmError {
    fn from(err: reqwest::Error) -> Self {
        OsmError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OsmError::NotFound {
            kind: ElementKind::Node,
            id: 42,
        };
        assert_eq!(err.to_string(), "node 42 not found");

        let err = OsmError::Api {
            status: 509,
            message: "Bandwidth Limit Exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error 509: Bandwidth Limit Exceeded");

        let err = OsmError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("expected value"));
        assert!(err.to_string().contains("<html>"));
    }
}
