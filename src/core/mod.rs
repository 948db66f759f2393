//! Core module: records, persistence and the operations over them

pub mod analytics;
pub mod audit;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod search;
pub mod store;
pub mod transcript;

pub use error::RegistrarError;
pub use store::RecordStore;

/// Returns the current version of the registrar crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
