//! Domain layer shared by the db and api crates.
//!
//! Zero internal dependencies so it can be used from repositories,
//! handlers, and any future CLI tooling alike.

pub mod error;
pub mod pagination;
pub mod types;
