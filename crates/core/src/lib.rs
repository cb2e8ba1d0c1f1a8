//! Core business logic for Cashflow.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Cash launches, validation, daily balances and the ledger service

pub mod ledger;
