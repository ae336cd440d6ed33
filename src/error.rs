use thiserror::Error;

/// Errors surfaced by tracker operations. All of these are recoverable:
/// every mutating command validates fully before writing, so a returned
/// error means stored state is unchanged.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("sprint name '{0}' is already in use")]
    DuplicateName(String),

    #[error("start date cannot be after the end date")]
    DateRange,

    #[error("completion date must be within the sprint start and end dates")]
    OutOfRange,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid time format: {0}")]
    TimeFormat(#[from] TimeFormatError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A duration token that does not match the `w d h m` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time format '{token}', use format like: 2w 4d 6h 45m")]
pub struct TimeFormatError {
    pub token: String,
}

/// Failures in the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn not_found(what: impl Into<String>) -> Self {
        TrackerError::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }
}
