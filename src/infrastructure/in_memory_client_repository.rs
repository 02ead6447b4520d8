use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    domain::{
        client::{Client, NewClient},
        page::{Page, PageRequest, SortDirection, SortField},
    },
    infrastructure::{ClientRepository, StorageError},
};

/// Repository over process memory, used by the tests and for local runs
/// without a database. Ids are assigned from an in-lock counter so they stay
/// monotonic even across deletes.
#[derive(Default)]
pub struct InMemoryClientRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    clients: BTreeMap<i64, Client>,
    next_id: i64,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, StorageError> {
        Ok(self.inner.read().await.clients.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        match inner.clients.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound),
        }
    }

    async fn insert(&self, client: NewClient) -> Result<Client, StorageError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let created = client.with_id(inner.next_id);
        inner.clients.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, client: Client) -> Result<Client, StorageError> {
        let mut inner = self.inner.write().await;
        if !inner.clients.contains_key(&client.id) {
            return Err(StorageError::NotFound);
        }
        inner.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_all(&self) -> Result<Vec<Client>, StorageError> {
        Ok(self.inner.read().await.clients.values().cloned().collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Client>, StorageError> {
        let items = self.inner.read().await.clients.values().cloned().collect();
        Ok(paginate(items, request))
    }

    async fn find_by_income_at_least(
        &self,
        income: f64,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError> {
        let items = self
            .inner
            .read()
            .await
            .clients
            .values()
            .filter(|client| client.income >= income)
            .cloned()
            .collect();
        Ok(paginate(items, request))
    }

    async fn find_by_name_containing(
        &self,
        substring: &str,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError> {
        let needle = substring.to_lowercase();
        let items = self
            .inner
            .read()
            .await
            .clients
            .values()
            .filter(|client| client.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(paginate(items, request))
    }

    async fn find_by_birth_date_after(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Client>, StorageError> {
        Ok(self
            .inner
            .read()
            .await
            .clients
            .values()
            .filter(|client| client.birth_date > instant)
            .cloned()
            .collect())
    }
}

fn paginate(mut items: Vec<Client>, request: PageRequest) -> Page<Client> {
    items.sort_by(|left, right| {
        let ordering = match request.sort.field {
            SortField::Id => left.id.cmp(&right.id),
            SortField::Name => left.name.cmp(&right.name),
            SortField::Income => left
                .income
                .partial_cmp(&right.income)
                .unwrap_or(Ordering::Equal),
            SortField::BirthDate => left.birth_date.cmp(&right.birth_date),
        };
        // ties fall back to id so the order is stable within a session
        let ordering = ordering.then_with(|| left.id.cmp(&right.id));
        match request.sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let total_elements = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size).unwrap_or(usize::MAX);
    let items = items.into_iter().skip(offset).take(size).collect();

    Page {
        items,
        total_elements,
        page_number: request.page,
        page_size: request.size,
    }
}
