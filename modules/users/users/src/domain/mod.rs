pub mod error;
pub mod ports;
pub mod request;
pub mod service;
pub mod uploader;
pub mod validator;
