use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    client::{Client, NewClient},
    page::{Page, PageRequest},
};

pub mod in_memory_client_repository;
pub mod postgres_client_repository;

/// The closed set of failures a storage backend can signal. The service layer
/// maps these into `DomainError`; nothing else inspects them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record not found")]
    NotFound,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage failure: {0}")]
    Other(String),
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Absent rows are `Ok(None)`, not an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, StorageError>;

    /// Fails with `NotFound` when the id does not exist and with
    /// `ConstraintViolation` when dependent data blocks the delete.
    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;

    /// Assigns the next monotonically increasing id.
    async fn insert(&self, client: NewClient) -> Result<Client, StorageError>;

    /// Rewrites the row with `client.id`; `NotFound` when the row is gone.
    async fn update(&self, client: Client) -> Result<Client, StorageError>;

    async fn find_all(&self) -> Result<Vec<Client>, StorageError>;

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Client>, StorageError>;

    async fn find_by_income_at_least(
        &self,
        income: f64,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError>;

    /// Case-insensitive substring match; the empty substring matches every
    /// record.
    async fn find_by_name_containing(
        &self,
        substring: &str,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError>;

    /// Records whose birth date is strictly after `instant`.
    async fn find_by_birth_date_after(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Client>, StorageError>;
}
