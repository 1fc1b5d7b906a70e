//! Error types for the cadgraph library

use thiserror::Error;

/// Main error type for document-model operations
#[derive(Debug, Error)]
pub enum CadError {
    /// A collection rejected a member of the wrong entity subtype
    #[error("Invalid member type: expected {expected}, found {found}")]
    InvalidMemberType {
        expected: &'static str,
        found: &'static str,
    },

    /// The object already belongs to another document
    #[error("Object {0:#X} is already attached to a document")]
    AlreadyAttached(u64),

    /// The object does not belong to any document
    #[error("Object {0:#X} is not attached to a document")]
    NotAttached(u64),

    /// A table already contains a record with this name
    #[error("Duplicate table entry: '{0}'")]
    DuplicateName(String),

    /// Capability not implemented for this entity subtype
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// A required argument or reference was missing or unresolvable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Object not found in document
    #[error("Object not found: handle {0:#X}")]
    ObjectNotFound(u64),

    /// Handle registry bookkeeping fault
    #[error("Registry error: {0}")]
    Registry(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for document-model operations
pub type Result<T> = std::result::Result<T, CadError>;

impl From<String> for CadError {
    fn from(s: String) -> Self {
        CadError::Custom(s)
    }
}

impl From<&str> for CadError {
    fn from(s: &str) -> Self {
        CadError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CadError::AlreadyAttached(0x1F);
        assert_eq!(
            err.to_string(),
            "Object 0x1F is already attached to a document"
        );
    }

    #[test]
    fn test_member_type_error() {
        let err = CadError::InvalidMemberType {
            expected: "AcDbPolyFaceMeshVertex",
            found: "AcDbCircle",
        };
        assert!(err.to_string().contains("AcDbPolyFaceMeshVertex"));
        assert!(err.to_string().contains("AcDbCircle"));
    }

    #[test]
    fn test_string_conversion() {
        let err: CadError = "something went wrong".into();
        assert!(matches!(err, CadError::Custom(_)));
        assert_eq!(err.to_string(), "something went wrong");
    }
}
