use thiserror::Error;
use vibebeat_client::ClientError;
use vibebeat_core::ErrorKind;

/// Errors that can occur while syncing with the backend
///
/// `Clone` so one failed refresh can be reported to every caller that
/// joined it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),
}

impl SyncError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Client(e) => e.kind(),
            SyncError::NotFound { .. } => ErrorKind::NotFound,
            SyncError::Validation(_) => ErrorKind::ValidationFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
