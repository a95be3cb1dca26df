use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Event {event_type} requires a product_id")]
    MissingProductId { event_type: String },

    #[error("Subscription record not found for user {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    InvalidPayload,
    Unauthorized,
    ClassificationFailed,
    NotFound,
    PersistenceError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ClassificationFailed => "CLASSIFICATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::PersistenceError => "PERSISTENCE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidPayload(_) => ErrorCode::InvalidPayload,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::MissingProductId { .. } => ErrorCode::ClassificationFailed,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Persistence(_) => ErrorCode::PersistenceError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Persistence(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
