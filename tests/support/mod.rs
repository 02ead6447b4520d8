#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use client_api::{
    application::client_service::ClientService,
    domain::client::NewClient,
    infrastructure::{
        ClientRepository, in_memory_client_repository::InMemoryClientRepository,
    },
    state::AppState,
};

pub const SEEDED_CLIENTS: u64 = 12;
pub const SEEDED_CLIENTS_WITH_INCOME_4000: u64 = 5;
pub const EXISTING_ID: i64 = 1;
pub const NON_EXISTING_ID: i64 = 1000;
pub const EXISTING_NAME: &str = "Conceição Evaristo";
pub const EXISTING_CPF: &str = "10619244881";

/// Twelve clients, inserted in order so ids run 1..=12. Exactly five have
/// income >= 4000 and every birth date is before 2000.
pub fn seed_clients() -> Vec<NewClient> {
    vec![
        client("Conceição Evaristo", "10619244881", 1500.0, "1946-11-29T10:30:00Z", 2),
        client("Lázaro Ramos", "10419244771", 2500.0, "1978-11-01T07:00:00Z", 2),
        client("Clarice Lispector", "10919444522", 3800.0, "1920-12-10T07:00:00Z", 0),
        client("Carolina Maria de Jesus", "10419344882", 7500.0, "1914-03-14T07:50:00Z", 3),
        client("Gilberto Gil", "10563112233", 2500.0, "1942-06-26T11:00:00Z", 4),
        client("Djamila Ribeiro", "10619555281", 4500.0, "1980-08-01T10:30:00Z", 1),
        client("Jose Saramago", "10239254871", 5000.0, "1922-11-16T07:00:00Z", 0),
        client("Toni Morrison", "10219344681", 10000.0, "1931-02-18T07:00:00Z", 0),
        client("Yuval Noah Harari", "10619856881", 9500.0, "1976-02-24T07:00:00Z", 0),
        client("Chimamanda Adichie", "10114274861", 2400.0, "1977-09-15T07:00:00Z", 0),
        client("Silvio Almeida", "10164334861", 3500.0, "1976-12-01T07:00:00Z", 2),
        client("Jorge Amado", "10204374161", 2900.0, "1912-08-10T07:00:00Z", 1),
    ]
}

pub async fn seeded_repository() -> Arc<InMemoryClientRepository> {
    let repository = Arc::new(InMemoryClientRepository::new());
    for new_client in seed_clients() {
        repository
            .insert(new_client)
            .await
            .expect("seed insert must succeed");
    }
    repository
}

pub async fn seeded_service() -> ClientService {
    ClientService::new(seeded_repository().await)
}

pub async fn seeded_state() -> AppState {
    AppState::new(Arc::new(seeded_service().await))
}

pub fn instant(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid RFC 3339 instant")
}

fn client(name: &str, cpf: &str, income: f64, birth_date: &str, children: i32) -> NewClient {
    NewClient {
        name: name.to_string(),
        cpf: cpf.to_string(),
        income,
        birth_date: instant(birth_date),
        children,
    }
}
