use std::sync::Arc;

use crate::application::client_service::ClientService;

#[derive(Clone)]
pub struct AppState {
    pub client_service: Arc<ClientService>,
}

impl AppState {
    pub fn new(client_service: Arc<ClientService>) -> Self {
        Self { client_service }
    }
}
