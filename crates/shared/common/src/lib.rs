//! Common utilities shared across the registry services.
//!
//! This crate provides:
//! - Unified error handling for use cases
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ErrorBody};
