//! Access-policy error model.

use thiserror::Error;

/// Result type used across the access-policy crates.
pub type AclResult<T> = Result<T, AclError>;

/// Access-policy error.
///
/// These are only produced by validating entry points (catalog lookups, schema
/// validation, strict decoding). The lenient codec never returns them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AclError {
    /// A permission token is not a member of its category's vocabulary.
    #[error("invalid {category} permission: '{token}'")]
    InvalidPermissionToken {
        category: &'static str,
        token: String,
    },

    /// A mandatory raw field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A raw identifier field did not hold a well-formed UUID.
    #[error("invalid uuid in {field}: '{value}'")]
    InvalidUuid { field: &'static str, value: String },
}

impl AclError {
    pub fn invalid_permission(category: &'static str, token: impl Into<String>) -> Self {
        Self::InvalidPermissionToken {
            category,
            token: token.into(),
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_uuid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidUuid {
            field,
            value: value.into(),
        }
    }

    /// Raw field name the error refers to, when it refers to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPermissionToken { .. } => None,
            Self::MissingField(field) | Self::InvalidUuid { field, .. } => Some(field),
        }
    }
}
