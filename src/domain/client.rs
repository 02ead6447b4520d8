use chrono::{DateTime, Utc};

/// A persisted client row. `id` is assigned by storage on insert and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

/// A client that has not been persisted yet; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

/// The mutable fields of a client, everything except the identity.
#[derive(Debug, Clone)]
pub struct ClientUpdate {
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl Client {
    /// Returns a new record carrying this record's id and the update's
    /// fields. Updates never change which row a client is.
    pub fn apply_update(&self, update: ClientUpdate) -> Client {
        Client {
            id: self.id,
            name: update.name,
            cpf: update.cpf,
            income: update.income,
            birth_date: update.birth_date,
            children: update.children,
        }
    }
}

impl NewClient {
    pub fn with_id(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            cpf: self.cpf,
            income: self.income,
            birth_date: self.birth_date,
            children: self.children,
        }
    }
}
