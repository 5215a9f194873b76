use super::kind::AttributeType;
use thiserror::Error;

/// Failure of an accessor on an [`AttributeValue`](super::AttributeValue).
///
/// `cast` and `parse` never produce these; only reads can.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeError {
    /// The value is unassigned, or its payload is null.
    #[error("attribute of type {kind} is not initialized")]
    NotInitialized { kind: AttributeType },

    /// The payload cannot be reinterpreted as the requested shape.
    #[error("cannot read attribute of type {found} as {requested}")]
    InvalidType {
        found: AttributeType,
        requested: AttributeType,
    },
}

impl AttributeError {
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, AttributeError::NotInitialized { .. })
    }

    pub fn is_invalid_type(&self) -> bool {
        matches!(self, AttributeError::InvalidType { .. })
    }
}

pub type AttrResult<T> = std::result::Result<T, AttributeError>;
