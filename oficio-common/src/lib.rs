//! # Ofício Common Library
//!
//! Shared core for the Gerador de Ofício services including:
//! - Payment data model (supplier records, account groups, signatories)
//! - Debit-account canonicalization
//! - Accounting-treatment classification
//! - Upload confirmation state machine
//! - Account-grouped aggregation of confirmed uploads
//! - Signatory registry with durable persistence
//! - Generation request assembly
//! - Configuration loading

pub mod account;
pub mod aggregation;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod flow;
pub mod model;
pub mod request;
pub mod signatories;

pub use error::{Error, Result};
