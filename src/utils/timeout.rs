//! Timeout validation utilities for element operations

use std::time::Duration;

use crate::browser::{SnapshotError, SnapshotResult};

/// Maximum timeout for element interaction operations (30 seconds)
/// Covers dynamic element loading and animations
pub const MAX_INTERACTION_TIMEOUT_MS: u64 = 30_000; // 30 seconds

/// Validate timeout for element interaction operations (locate, scroll into view)
///
/// # Arguments
/// * `timeout_ms` - Optional timeout in milliseconds
/// * `default_ms` - Default timeout if None provided
///
/// # Returns
/// * `Ok(Duration)` - Validated Duration object
/// * `Err(SnapshotError::InvalidArguments)` - If timeout exceeds MAX_INTERACTION_TIMEOUT_MS
///
/// # Example
/// ```rust
/// # use kodegen_test_helpers::validate_interaction_timeout;
/// let timeout = validate_interaction_timeout(Some(2_000), 5_000).unwrap();
/// assert_eq!(timeout.as_millis(), 2_000);
/// ```
pub fn validate_interaction_timeout(
    timeout_ms: Option<u64>,
    default_ms: u64,
) -> SnapshotResult<Duration> {
    let ms = timeout_ms.unwrap_or(default_ms);

    if ms > MAX_INTERACTION_TIMEOUT_MS {
        return Err(SnapshotError::invalid_arguments(format!(
            "Timeout cannot exceed {}ms ({} seconds). Received: {}ms ({} seconds)",
            MAX_INTERACTION_TIMEOUT_MS,
            MAX_INTERACTION_TIMEOUT_MS / 1000,
            ms,
            ms / 1000
        )));
    }

    Ok(Duration::from_millis(ms))
}

/// Same bound as [`validate_interaction_timeout`], for callers holding a `Duration`
pub fn validate_timeout(timeout: Duration) -> SnapshotResult<Duration> {
    let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    validate_interaction_timeout(Some(ms), ms)
}
