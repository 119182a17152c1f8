use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server error code raised when a document fails a collection's
/// `$jsonSchema` validator.
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The requested entity, or one matching the given conditions, does not
    /// exist. The message is surfaced to callers verbatim.
    #[error("{0}")]
    NotFound(String),

    /// Input rejected by a store-side constraint or by input validation.
    #[error("{0}")]
    Validation(String),

    /// Any other store or downstream failure.
    #[error("{0}")]
    Database(String),
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;

impl From<mongodb::error::Error> for WarehouseError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write))
                if write.code == DOCUMENT_VALIDATION_FAILURE =>
            {
                WarehouseError::Validation(write.message.clone())
            }
            _ => WarehouseError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::ser::Error> for WarehouseError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        WarehouseError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_verbatim() {
        let err = WarehouseError::NotFound("Manufacturer with id 42 wasn't found.".to_string());
        assert_eq!(err.to_string(), "Manufacturer with id 42 wasn't found.");
    }

    #[test]
    fn validation_message_is_verbatim() {
        let err = WarehouseError::Validation("Document failed validation".to_string());
        assert_eq!(err.to_string(), "Document failed validation");
    }
}
