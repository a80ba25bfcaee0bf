pub mod application;
pub mod domain;
pub mod error;
pub mod filter;
pub mod parser;
pub mod ports;
pub mod utils;
