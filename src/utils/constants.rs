//! Shared configuration constants for snapshot helpers
//!
//! Default values used by `SnapshotConfig` and the chromiumoxide adapter.

use std::time::Duration;

/// Directory captures are written to, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "./screenshots";

/// Config file looked up in the working directory by `load_yaml_config`
pub const CONFIG_FILE_NAME: &str = "snapshot.yaml";

/// Default bound on waiting for an element to scroll into view
pub const DEFAULT_SCROLL_TIMEOUT_MS: u64 = 5_000;

/// Default bound on polling for a selector to appear
pub const DEFAULT_LOCATE_TIMEOUT_MS: u64 = 5_000;

/// First polling interval, doubled on each retry
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polling interval cap
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Alphabet for generated test-data strings
pub const RANDOM_STRING_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
