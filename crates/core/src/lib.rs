//! Core business logic for Kanjo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts and the role mapping for auto-posting
//! - `ledger` - Double-entry journal domain and the auto-posting planner
//! - `reports` - Trial balance, profit & loss, and balance sheet computation
//! - `documents` - Sales document lifecycle and totals
//! - `purchasing` - Purchase order lifecycle
//! - `inventory` - Stock movements, status, and reorder alerts

pub mod chart;
pub mod documents;
pub mod inventory;
pub mod ledger;
pub mod purchasing;
pub mod reports;
