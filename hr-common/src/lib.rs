//! # HR Common Library
//!
//! Shared code for the HR analytics service and its tooling:
//! - Database bootstrap and entity models
//! - API authentication primitives
//! - Configuration loading
//! - Fixed-point money helpers

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod money;

pub use error::{Error, Result};
