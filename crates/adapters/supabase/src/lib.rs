//! # bustrack-adapter-supabase
//!
//! Persistence adapter for the hosted Supabase database, talking to its
//! REST layer (`PostgREST`) with [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `BusRepository` port defined in `bustrack-app::ports::storage`
//! - Authenticate every request with the service-role credential
//! - Translate `PostgREST` responses and error codes into domain errors
//!
//! ## Dependency rule
//! Depends on `bustrack-app` (for port traits) and `bustrack-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod bus_repo;
mod config;
mod error;

pub use bus_repo::SupabaseBusRepository;
pub use config::SupabaseConfig;
pub use error::SupabaseError;
