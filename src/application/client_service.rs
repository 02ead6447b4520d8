use std::sync::Arc;

use crate::{
    application::dto::ClientDto,
    domain::{errors::DomainError, page::{Page, PageRequest}},
    infrastructure::{ClientRepository, StorageError},
};

/// Orchestrates repository calls, translating entities to DTOs and storage
/// failures into `DomainError`.
#[derive(Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all_paged(
        &self,
        request: PageRequest,
    ) -> Result<Page<ClientDto>, DomainError> {
        let page = self
            .repository
            .find_all_paged(request)
            .await
            .map_err(translate)?;
        Ok(page.map(ClientDto::from))
    }

    pub async fn find_by_income(
        &self,
        income: f64,
        request: PageRequest,
    ) -> Result<Page<ClientDto>, DomainError> {
        let page = self
            .repository
            .find_by_income_at_least(income, request)
            .await
            .map_err(translate)?;
        Ok(page.map(ClientDto::from))
    }

    pub async fn find_all(&self) -> Result<Vec<ClientDto>, DomainError> {
        let clients = self.repository.find_all().await.map_err(translate)?;
        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ClientDto, DomainError> {
        let Some(client) = self.repository.find_by_id(id).await.map_err(translate)? else {
            return Err(DomainError::resource_not_found(format!(
                "client {id} does not exist"
            )));
        };
        Ok(ClientDto::from(client))
    }

    /// Any id carried by the DTO is ignored; storage assigns a fresh one.
    pub async fn insert(&self, dto: ClientDto) -> Result<ClientDto, DomainError> {
        let created = self
            .repository
            .insert(dto.to_new_client())
            .await
            .map_err(translate)?;
        Ok(ClientDto::from(created))
    }

    /// The returned DTO's id always equals `id`; an update never changes
    /// which row a client is.
    pub async fn update(&self, id: i64, dto: ClientDto) -> Result<ClientDto, DomainError> {
        let Some(existing) = self.repository.find_by_id(id).await.map_err(translate)? else {
            return Err(DomainError::resource_not_found(format!(
                "client {id} does not exist"
            )));
        };

        let updated = self
            .repository
            .update(existing.apply_update(dto.to_update()))
            .await
            .map_err(translate)?;
        Ok(ClientDto::from(updated))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repository.delete_by_id(id).await.map_err(translate)
    }
}

fn translate(error: StorageError) -> DomainError {
    match error {
        StorageError::NotFound => DomainError::resource_not_found("client does not exist"),
        StorageError::ConstraintViolation(detail) => DomainError::database(detail),
        StorageError::Other(detail) => DomainError::storage(detail),
    }
}
