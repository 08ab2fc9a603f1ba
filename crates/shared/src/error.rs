use thiserror::Error;

/// Every way a single query attempt can fail.
///
/// None of these leave the submission controller; the rest of the client only
/// ever sees a failed request state plus a human-readable notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query text must not be empty")]
    Validation,
    #[error("{0}")]
    Transport(String),
    #[error("HTTP error status: {status}{}", detail_suffix(.detail))]
    Protocol { status: u16, detail: Option<String> },
    #[error("the answering service returned a malformed response")]
    Shape { reason: String },
}

impl QueryError {
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport(cause.into())
    }

    pub fn shape(reason: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(detail) if !detail.is_empty() => format!(" ({detail})"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_mentions_status_and_detail() {
        let err = QueryError::Protocol {
            status: 400,
            detail: Some("Query is required".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error status: 400 (Query is required)");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn protocol_error_without_detail_only_mentions_status() {
        let err = QueryError::Protocol {
            status: 500,
            detail: Some("   ".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error status: 500");
    }

    #[test]
    fn shape_error_display_is_generic() {
        let err = QueryError::shape("missing field `citations` at line 1 column 40");
        assert!(!err.to_string().contains("citations"));
        assert_eq!(err.status(), None);
    }
}
