//! Shared library for the campus registrar
//! Contains the record store, persistence and command operations used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
