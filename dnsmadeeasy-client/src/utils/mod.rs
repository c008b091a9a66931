//! Utility modules.

/// Timestamp serde helpers for domain payloads.
pub mod datetime;

/// Keeps bodies and keys out of logs.
pub mod log_sanitizer;
