pub mod client_service;
pub mod dto;
