//! core
//!
//! Core domain types, open-root enumeration, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ProjectRoot, LocationHint
//! - [`workspace`] - Enumerating the open workspace folders
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
pub mod workspace;
