pub mod api;
pub mod client;
pub mod connection;
pub mod models;
