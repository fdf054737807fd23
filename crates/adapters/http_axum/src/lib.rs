//! # bustrack-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve `POST /bus-update`, the location update endpoint
//! - Serve a small read API (`/api/buses/{id}`, `/api/buses/{id}/updates`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `bustrack-app` (for port traits and services) and `bustrack-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
pub mod update;

#[cfg(test)]
mod testing;
