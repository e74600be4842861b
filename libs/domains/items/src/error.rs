use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::Display;
use thiserror::Error;

/// Store-backed operation an error happened in; drives the 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ItemOperation {
    #[strum(to_string = "retrieve items")]
    List,
    #[strum(to_string = "retrieve item")]
    Get,
    #[strum(to_string = "create item")]
    Create,
    #[strum(to_string = "update item")]
    Update,
    #[strum(to_string = "delete item")]
    Delete,
}

#[derive(Debug, Error)]
pub enum ItemError {
    /// No item for this identifier (malformed identifiers included)
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Name and price are required")]
    MissingFields,

    #[error("Item with name '{0}' already exists")]
    DuplicateName(String),

    /// Raw store failure, before an operation has been attached
    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to {operation}: {detail}")]
    OperationFailed {
        operation: ItemOperation,
        detail: String,
    },
}

impl ItemError {
    /// Attribute a store failure to `operation`; other errors pass through
    pub fn during(self, operation: ItemOperation) -> Self {
        match self {
            ItemError::Database(detail) => ItemError::OperationFailed { operation, detail },
            other => other,
        }
    }
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Store details are logged here and never reach the client
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            ItemError::MissingFields => {
                AppError::BadRequest("Name and price are required".to_string())
            }
            ItemError::DuplicateName(_) => AppError::BadRequest("Item already exists".to_string()),
            ItemError::Database(detail) => {
                tracing::error!(%detail, "Item store failure");
                AppError::InternalServerError("An internal server error occurred".to_string())
            }
            ItemError::OperationFailed { operation, detail } => {
                tracing::error!(%operation, %detail, "Item store operation failed");
                AppError::InternalServerError(format!("Failed to {}", operation))
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}
