use thiserror::Error;

/// Main error type for DSL builder operations
#[derive(Error, Debug)]
pub enum DslError {
    #[error("{construct}: `{field}` is required")]
    MissingRequiredField {
        construct: String,
        field: &'static str,
    },

    #[error("{construct}: `{field}` expects a {expected} node, got {actual}")]
    InvalidNodeType {
        construct: String,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{construct}: `{operation}` is not supported")]
    UnsupportedOperation {
        construct: String,
        operation: &'static str,
    },

    #[error("{construct}: invalid value {value:?} for `{param}`, expected one of {expected:?}")]
    InvalidParameter {
        construct: String,
        param: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    #[error("{construct}: `{key}` is used both as the field and as an option")]
    KeyConflict { construct: String, key: String },

    #[error("{construct}: {reason}")]
    MalformedNode {
        construct: String,
        reason: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for DSL builder operations
pub type Result<T> = std::result::Result<T, DslError>;

impl DslError {
    /// Whether the error was raised by a setter rather than by serialization
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            DslError::InvalidNodeType { .. }
                | DslError::UnsupportedOperation { .. }
                | DslError::InvalidParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DslError::MissingRequiredField {
            construct: "term".to_string(),
            field: "value",
        };
        assert_eq!(err.to_string(), "term: `value` is required");

        let err = DslError::UnsupportedOperation {
            construct: "moving_fn".to_string(),
            operation: "format",
        };
        assert_eq!(err.to_string(), "moving_fn: `format` is not supported");
    }

    #[test]
    fn test_invalid_node_type_names_field() {
        let err = DslError::InvalidNodeType {
            construct: "constant_score".to_string(),
            field: "filter",
            expected: "query",
            actual: "aggregation",
        };
        let msg = err.to_string();
        assert!(msg.contains("constant_score"));
        assert!(msg.contains("filter"));
        assert!(msg.contains("aggregation"));
    }

    #[test]
    fn test_key_conflict_display() {
        let err = DslError::KeyConflict {
            construct: "terms".to_string(),
            key: "boost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "terms: `boost` is used both as the field and as an option"
        );
    }

    #[test]
    fn test_misuse_errors() {
        assert!(DslError::UnsupportedOperation {
            construct: "moving_fn".to_string(),
            operation: "format",
        }
        .is_misuse());
        assert!(!DslError::MissingRequiredField {
            construct: "max".to_string(),
            field: "name",
        }
        .is_misuse());
    }
}
