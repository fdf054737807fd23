//! # bustrack-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `BusRepository` port defined in `bustrack-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `bustrack-app` (for port traits) and `bustrack-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod bus_repo;
mod error;
mod pool;

pub use bus_repo::SqliteBusRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
