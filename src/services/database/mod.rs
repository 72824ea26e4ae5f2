// Database service module
// SQLite connection and schema management for the local event store

mod connection;
pub mod migrations;
mod schema;

pub use connection::Database;
