pub mod clients_handler;
pub mod problem;
