pub mod error;
pub mod events;
pub mod fields;
pub mod password;
pub mod ports;
pub mod repos;
pub mod service;
