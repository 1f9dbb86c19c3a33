pub mod error;
pub mod form;
pub mod notices;
pub mod ports;
pub mod service;
pub mod store;
pub mod table;
