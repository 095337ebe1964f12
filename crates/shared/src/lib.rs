//! Shared types, errors, and configuration for Kanjo.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management (database settings and the
//!   chart-of-accounts role mapping)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ChartRolesConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
