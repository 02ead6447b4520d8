use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::{
    domain::{
        client::{Client, NewClient},
        page::{Page, PageRequest, SortDirection, SortField},
    },
    infrastructure::{ClientRepository, StorageError},
};

#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        filter: Option<Filter<'_>>,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError> {
        let offset = i64::try_from(request.offset())
            .map_err(|_| StorageError::Other("page offset is too large".to_string()))?;
        let size = i64::from(request.size);

        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*)::BIGINT AS count FROM clients");
        push_filter(&mut count_builder, filter.as_ref());

        let (total_raw,): (i64,) = count_builder
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut select_builder = QueryBuilder::<Postgres>::new(
            "SELECT id, name, cpf, income, birth_date, children FROM clients",
        );
        push_filter(&mut select_builder, filter.as_ref());

        select_builder.push(" ORDER BY ");
        select_builder.push(sort_column(request.sort.field));
        select_builder.push(" ");
        select_builder.push(sort_order(request.sort.direction));
        select_builder.push(", id ASC");

        select_builder
            .push(" LIMIT ")
            .push_bind(size)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = select_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Page {
            items: rows.iter().map(row_to_client).collect(),
            total_elements: u64::try_from(total_raw).unwrap_or(0),
            page_number: request.page,
            page_size: request.size,
        })
    }
}

enum Filter<'a> {
    IncomeAtLeast(f64),
    NameContains(&'a str),
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, StorageError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, name, cpf, income, birth_date, children
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(maybe_row.as_ref().map(row_to_client))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn insert(&self, client: NewClient) -> Result<Client, StorageError> {
        let row = sqlx::query(
            r#"
            INSERT INTO clients (name, cpf, income, birth_date, children)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, cpf, income, birth_date, children
            "#,
        )
        .bind(client.name)
        .bind(client.cpf)
        .bind(client.income)
        .bind(client.birth_date)
        .bind(client.children)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row_to_client(&row))
    }

    async fn update(&self, client: Client) -> Result<Client, StorageError> {
        let maybe_row = sqlx::query(
            r#"
            UPDATE clients
            SET name = $2, cpf = $3, income = $4, birth_date = $5, children = $6
            WHERE id = $1
            RETURNING id, name, cpf, income, birth_date, children
            "#,
        )
        .bind(client.id)
        .bind(client.name)
        .bind(client.cpf)
        .bind(client.income)
        .bind(client.birth_date)
        .bind(client.children)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match maybe_row {
            Some(row) => Ok(row_to_client(&row)),
            None => Err(StorageError::NotFound),
        }
    }

    async fn find_all(&self) -> Result<Vec<Client>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, cpf, income, birth_date, children
            FROM clients
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(row_to_client).collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> Result<Page<Client>, StorageError> {
        self.fetch_page(None, request).await
    }

    async fn find_by_income_at_least(
        &self,
        income: f64,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError> {
        self.fetch_page(Some(Filter::IncomeAtLeast(income)), request)
            .await
    }

    async fn find_by_name_containing(
        &self,
        substring: &str,
        request: PageRequest,
    ) -> Result<Page<Client>, StorageError> {
        self.fetch_page(Some(Filter::NameContains(substring)), request)
            .await
    }

    async fn find_by_birth_date_after(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Client>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, cpf, income, birth_date, children
            FROM clients
            WHERE birth_date > $1
            ORDER BY id ASC
            "#,
        )
        .bind(instant)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(row_to_client).collect())
    }
}

fn push_filter(builder: &mut QueryBuilder<Postgres>, filter: Option<&Filter<'_>>) {
    match filter {
        Some(Filter::IncomeAtLeast(income)) => {
            builder.push(" WHERE income >= ").push_bind(*income);
        }
        Some(Filter::NameContains(substring)) => {
            builder
                .push(" WHERE name ILIKE ")
                .push_bind(format!("%{}%", substring));
        }
        None => {}
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Name => "name",
        SortField::Income => "income",
        SortField::BirthDate => "birth_date",
    }
}

fn sort_order(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

fn row_to_client(row: &sqlx::postgres::PgRow) -> Client {
    Client {
        id: row.get::<i64, _>("id"),
        name: row.get::<String, _>("name"),
        cpf: row.get::<String, _>("cpf"),
        income: row.get::<f64, _>("income"),
        birth_date: row.get::<DateTime<Utc>, _>("birth_date"),
        children: row.get::<i32, _>("children"),
    }
}

fn map_sqlx_error(error: sqlx::Error) -> StorageError {
    match error {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::Database(db_error) => {
            // 23503 foreign key, 23505 unique
            if matches!(db_error.code().as_deref(), Some("23503") | Some("23505")) {
                StorageError::ConstraintViolation(db_error.to_string())
            } else {
                StorageError::Other(db_error.to_string())
            }
        }
        other => StorageError::Other(other.to_string()),
    }
}
