//! API authentication via timestamp and hash validation
//!
//! # Scheme
//!
//! - Every protected request carries `timestamp` (i64 Unix epoch ms) and
//!   `hash` (SHA-256, 64 hex chars)
//! - Timestamp must be within ≤1000ms past and ≤1ms future
//! - Hash is calculated from canonical JSON + shared secret
//! - Shared secret is stored in the database settings table
//! - Setting the shared secret to 0 disables auth checking
//!
//! This module contains only pure functions and database operations; the
//! axum layer lives in the service crate.

use chrono::Utc;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use thiserror::Error;

/// Settings key holding the shared secret
pub const SHARED_SECRET_KEY: &str = "api_shared_secret";

/// Placeholder substituted for the hash field before hashing
const DUMMY_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Maximum age of a request timestamp
pub const MAX_PAST_MS: i64 = 1000;

/// Maximum clock drift into the future
pub const MAX_FUTURE_MS: i64 = 1;

// ========================================
// Error Types
// ========================================

/// Authentication error types
#[derive(Debug, Clone, Error)]
pub enum ApiAuthError {
    /// Timestamp outside acceptable window
    #[error("Invalid timestamp: {reason}")]
    InvalidTimestamp {
        timestamp: i64,
        now: i64,
        reason: String,
    },

    /// Hash does not match calculated value
    #[error("Invalid hash")]
    InvalidHash { provided: String, calculated: String },

    /// Timestamp field missing from request
    #[error("Missing timestamp field")]
    MissingTimestamp,

    /// Hash field missing from request
    #[error("Missing hash field")]
    MissingHash,

    /// Database error loading shared secret
    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ========================================
// Shared Secret Management
// ========================================

/// Load shared secret from database settings
///
/// Generates and stores a new secret if none exists yet. A stored value of
/// 0 disables auth checking.
pub async fn load_shared_secret(db: &SqlitePool) -> Result<i64, ApiAuthError> {
    let result: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(SHARED_SECRET_KEY)
        .fetch_optional(db)
        .await
        .map_err(|e| ApiAuthError::DatabaseError(e.to_string()))?;

    match result {
        Some((value,)) => value
            .parse::<i64>()
            .map_err(|e| ApiAuthError::DatabaseError(format!("Invalid i64: {}", e))),
        None => initialize_shared_secret(db).await,
    }
}

/// Generate a random non-zero secret and store it
pub async fn initialize_shared_secret(db: &SqlitePool) -> Result<i64, ApiAuthError> {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let secret: i64 = loop {
        let val = rng.gen::<i64>();
        if val != 0 {
            break val;
        }
    };

    store_shared_secret(db, secret).await?;
    Ok(secret)
}

/// Overwrite the shared secret (0 disables auth)
pub async fn store_shared_secret(db: &SqlitePool, secret: i64) -> Result<(), ApiAuthError> {
    sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
        .bind(SHARED_SECRET_KEY)
        .bind(secret.to_string())
        .execute(db)
        .await
        .map_err(|e| ApiAuthError::DatabaseError(e.to_string()))?;

    Ok(())
}

// ========================================
// Timestamp Validation
// ========================================

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Validate a request timestamp
///
/// The window is asymmetric: requests may be up to [`MAX_PAST_MS`] old
/// but only [`MAX_FUTURE_MS`] ahead.
///
/// # Examples
///
/// ```
/// use hr_common::api::auth::{now_millis, validate_timestamp};
///
/// let now = now_millis();
/// assert!(validate_timestamp(now).is_ok());
/// assert!(validate_timestamp(now - 500).is_ok());
/// assert!(validate_timestamp(now - 5000).is_err());
/// ```
pub fn validate_timestamp(timestamp: i64) -> Result<(), ApiAuthError> {
    validate_timestamp_at(timestamp, now_millis())
}

/// Validate a timestamp against an explicit clock reading
pub fn validate_timestamp_at(timestamp: i64, now: i64) -> Result<(), ApiAuthError> {
    let diff = now - timestamp;

    if diff > MAX_PAST_MS {
        return Err(ApiAuthError::InvalidTimestamp {
            timestamp,
            now,
            reason: format!("Timestamp {}ms too old (max {}ms past)", diff, MAX_PAST_MS),
        });
    }

    if diff < -MAX_FUTURE_MS {
        return Err(ApiAuthError::InvalidTimestamp {
            timestamp,
            now,
            reason: format!(
                "Timestamp {}ms in future (max {}ms future)",
                diff.abs(),
                MAX_FUTURE_MS
            ),
        });
    }

    Ok(())
}

// ========================================
// Hash Calculation and Validation
// ========================================

/// Calculate the request hash
///
/// 1. Replace hash field with dummy hash (64 zeros)
/// 2. Convert to canonical JSON (sorted keys, no whitespace)
/// 3. Append shared secret as decimal i64 string
/// 4. SHA-256, rendered as 64 hex characters
pub fn calculate_hash(json_value: &Value, shared_secret: i64) -> String {
    let mut value = json_value.clone();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("hash".to_string(), Value::String(DUMMY_HASH.to_string()));
    }

    let canonical = to_canonical_json(&value);
    let to_hash = format!("{}{}", canonical, shared_secret);

    let mut hasher = Sha256::new();
    hasher.update(to_hash.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash for a query-string authenticated request (`?timestamp=..&hash=..`)
///
/// # Examples
///
/// ```
/// use hr_common::api::auth::{query_hash, validate_query_auth};
///
/// let secret = 123456789i64;
/// let hash = query_hash(1730000000000, secret);
/// assert!(validate_query_auth(1730000000000, &hash, secret).is_ok());
/// ```
pub fn query_hash(timestamp: i64, shared_secret: i64) -> String {
    calculate_hash(&json!({ "timestamp": timestamp }), shared_secret)
}

/// Validate hash of a query-string authenticated request
pub fn validate_query_auth(
    timestamp: i64,
    provided_hash: &str,
    shared_secret: i64,
) -> Result<(), ApiAuthError> {
    let json_value = json!({
        "timestamp": timestamp,
        "hash": provided_hash,
    });
    validate_hash(provided_hash, &json_value, shared_secret)
}

/// Convert JSON to canonical form (sorted keys, no whitespace)
///
/// # Examples
///
/// ```
/// use hr_common::api::auth::to_canonical_json;
/// use serde_json::json;
///
/// let canonical = to_canonical_json(&json!({"z": 3, "a": 1, "m": 2}));
/// assert_eq!(canonical, "{\"a\":1,\"m\":2,\"z\":3}");
/// ```
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by_key(|(k, _)| *k);
            let items: Vec<String> = pairs
                .into_iter()
                .map(|(k, v)| format!("\"{}\":{}", k, to_canonical_json(v)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Validate hash matches calculated value
pub fn validate_hash(
    provided_hash: &str,
    json_value: &Value,
    shared_secret: i64,
) -> Result<(), ApiAuthError> {
    let calculated = calculate_hash(json_value, shared_secret);

    if provided_hash != calculated {
        return Err(ApiAuthError::InvalidHash {
            provided: provided_hash.to_string(),
            calculated,
        });
    }

    Ok(())
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_730_000_000_000;

    #[test]
    fn test_valid_timestamp_accepted() {
        assert!(validate_timestamp_at(NOW, NOW).is_ok());
        assert!(validate_timestamp_at(NOW - 500, NOW).is_ok());
        // Boundary
        assert!(validate_timestamp_at(NOW - 1000, NOW).is_ok());
        assert!(validate_timestamp_at(NOW + 1, NOW).is_ok());
    }

    #[test]
    fn test_timestamp_too_old_rejected() {
        assert!(validate_timestamp_at(NOW - 1001, NOW).is_err());
        assert!(validate_timestamp_at(NOW - 2000, NOW).is_err());
    }

    #[test]
    fn test_timestamp_future_rejected() {
        assert!(validate_timestamp_at(NOW + 2, NOW).is_err());
        assert!(validate_timestamp_at(NOW + 100, NOW).is_err());
    }

    #[test]
    fn test_hash_calculation_algorithm() {
        let json = json!({
            "timestamp": NOW,
            "hash": DUMMY_HASH,
        });

        let hash = calculate_hash(&json, 123456789);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(hash, calculate_hash(&json, 123456789));
        assert_ne!(hash, calculate_hash(&json, 987654321));
    }

    #[test]
    fn test_hash_ignores_provided_hash_value() {
        let with_dummy = json!({"timestamp": NOW, "hash": "anything"});
        let without = json!({"timestamp": NOW});
        assert_eq!(calculate_hash(&with_dummy, 42), calculate_hash(&without, 42));
    }

    #[test]
    fn test_query_auth_round_trip() {
        let hash = query_hash(NOW, 42);
        assert!(validate_query_auth(NOW, &hash, 42).is_ok());
        assert!(validate_query_auth(NOW, &hash, 43).is_err());
        assert!(validate_query_auth(NOW + 1, &hash, 42).is_err());
    }

    #[test]
    fn test_canonical_json_sorting_and_whitespace() {
        let json = json!({
            "z_field": "last",
            "a_field": "first",
            "m_field": [1, 2]
        });

        let canonical = to_canonical_json(&json);
        assert_eq!(
            canonical,
            "{\"a_field\":\"first\",\"m_field\":[1,2],\"z_field\":\"last\"}"
        );
    }
}
