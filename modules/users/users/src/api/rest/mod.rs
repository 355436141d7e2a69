pub mod dto;
pub mod envelope;
pub mod form;
pub mod handlers;
pub mod routes;
