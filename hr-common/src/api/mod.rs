//! API module for shared HTTP API functionality
//!
//! Contains only pure functions, database operations and shared types.
//! The service crate wraps these with axum-specific middleware.

pub mod auth;
pub mod types;

pub use auth::{
    calculate_hash, initialize_shared_secret, load_shared_secret, query_hash,
    store_shared_secret, validate_hash, validate_query_auth, validate_timestamp, ApiAuthError,
};
pub use types::{AuthQuery, ErrorResponse};
