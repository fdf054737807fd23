//! # bustrack-domain
//!
//! Pure domain model for the bustrack location service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Buses** (tracked vehicles with a current stop)
//! - Define **Update events** (append-only records of a bus reaching a stop)
//! - Contain all invariant enforcement that does not need storage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod bus;
pub mod update_event;
