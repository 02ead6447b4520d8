use thiserror::Error;

/// Errors the service layer reports to the HTTP boundary. The service is the
/// only place storage failures are translated into these.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("integrity violation: {0}")]
    Database(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
