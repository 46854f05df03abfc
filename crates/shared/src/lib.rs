//! Shared types, errors, and configuration for the GST invoice toolkit.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for invoices and opaque user identities
//! - Currency codes used on export and RCM invoices
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, InvoiceDefaults};
pub use error::AppError;
