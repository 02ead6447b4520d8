use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    client::{Client, ClientUpdate, NewClient},
    page::{Page, PageRequest, Sort, SortDirection, SortField},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    /// Absent on inbound create bodies; always present on responses.
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl ClientDto {
    pub fn to_new_client(&self) -> NewClient {
        NewClient {
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            income: self.income,
            birth_date: self.birth_date,
            children: self.children,
        }
    }

    pub fn to_update(&self) -> ClientUpdate {
        ClientUpdate {
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            income: self.income,
            birth_date: self.birth_date,
            children: self.children,
        }
    }
}

impl From<Client> for ClientDto {
    fn from(value: Client) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
            cpf: value.cpf,
            income: value.income,
            birth_date: value.birth_date,
            children: value.children,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListClientsQueryRequest {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub sort: SortFieldRequest,
    #[serde(default)]
    pub direction: SortDirectionRequest,
}

impl ListClientsQueryRequest {
    pub fn into_page_request(self) -> PageRequest {
        PageRequest {
            page: self.page,
            size: self.size,
            sort: Sort {
                field: self.sort.into_domain(),
                direction: self.direction.into_domain(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortFieldRequest {
    #[default]
    Id,
    Name,
    Income,
    BirthDate,
}

impl SortFieldRequest {
    fn into_domain(self) -> SortField {
        match self {
            Self::Id => SortField::Id,
            Self::Name => SortField::Name,
            Self::Income => SortField::Income,
            Self::BirthDate => SortField::BirthDate,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirectionRequest {
    #[default]
    Asc,
    Desc,
}

impl SortDirectionRequest {
    fn into_domain(self) -> SortDirection {
        match self {
            Self::Asc => SortDirection::Asc,
            Self::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(value: Page<T>) -> Self {
        let total_pages = if value.total_elements == 0 || value.page_size == 0 {
            0
        } else {
            value.total_elements.div_ceil(u64::from(value.page_size)) as u32
        };

        Self {
            content: value.items,
            total_elements: value.total_elements,
            page: value.page_number,
            size: value.page_size,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

const fn default_size() -> u32 {
    12
}
