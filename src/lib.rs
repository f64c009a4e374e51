//! Helpers for browser end-to-end tests
//!
//! Captures single page elements to deterministic file paths through an
//! injected page capability, plus a few test-data helpers.
//!
//! ```rust,no_run
//! use kodegen_test_helpers::{ChromePage, ElementSnapshotter, SnapshotConfig};
//!
//! # async fn run(page: chromiumoxide::Page) -> anyhow::Result<()> {
//! let config = SnapshotConfig::default();
//! let page = ChromePage::with_config(page, &config)?;
//! let snapshotter = ElementSnapshotter::new(config);
//!
//! // Writes ./screenshots/login-button.png
//! snapshotter.capture(&page, "#login", "login-button").await?;
//! # Ok(())
//! # }
//! ```

mod browser;
mod snapshot;
mod utils;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use utils::constants::{
    CONFIG_FILE_NAME, DEFAULT_LOCATE_TIMEOUT_MS, DEFAULT_OUTPUT_DIR, DEFAULT_SCROLL_TIMEOUT_MS,
};

/// Snapshot output and timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Directory captures are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Image format, which also fixes the file extension
    #[serde(default)]
    pub format: CaptureFormat,

    /// Bound on waiting for the element to scroll into view
    #[serde(default = "default_scroll_timeout_ms")]
    pub scroll_timeout_ms: u64,

    /// Bound on polling for a selector (chromiumoxide adapter only)
    #[serde(default = "default_locate_timeout_ms")]
    pub locate_timeout_ms: u64,

    #[serde(default)]
    pub name_policy: NamePolicy,

    /// Create the output directory when missing
    /// Off by default: a missing directory surfaces as a write error
    #[serde(default)]
    pub create_output_dir: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_scroll_timeout_ms() -> u64 {
    DEFAULT_SCROLL_TIMEOUT_MS
}

fn default_locate_timeout_ms() -> u64 {
    DEFAULT_LOCATE_TIMEOUT_MS
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: CaptureFormat::default(),
            scroll_timeout_ms: default_scroll_timeout_ms(),
            locate_timeout_ms: default_locate_timeout_ms(),
            name_policy: NamePolicy::default(),
            create_output_dir: false,
        }
    }
}

impl SnapshotConfig {
    pub fn scroll_timeout(&self) -> Duration {
        Duration::from_millis(self.scroll_timeout_ms)
    }

    pub fn locate_timeout(&self) -> Duration {
        Duration::from_millis(self.locate_timeout_ms)
    }

    /// Check both timeouts against the interaction maximum
    pub fn validate(&self) -> SnapshotResult<()> {
        validate_interaction_timeout(Some(self.scroll_timeout_ms), DEFAULT_SCROLL_TIMEOUT_MS)?;
        validate_interaction_timeout(Some(self.locate_timeout_ms), DEFAULT_LOCATE_TIMEOUT_MS)?;
        Ok(())
    }
}

/// Load config from snapshot.yaml in the working directory
pub fn load_yaml_config() -> anyhow::Result<SnapshotConfig> {
    load_yaml_config_from(CONFIG_FILE_NAME)
}

/// Load config from `path`, falling back to defaults when it does not exist
pub fn load_yaml_config_from(path: impl AsRef<Path>) -> anyhow::Result<SnapshotConfig> {
    let config_path = path.as_ref();

    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        let config: SnapshotConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    } else {
        Ok(SnapshotConfig::default())
    }
}

pub use browser::{
    CaptureFormat, ChromeElement, ChromePage, ElementHandle, PageCapability, SnapshotError,
    SnapshotResult,
};
pub use snapshot::{ElementSnapshotter, NamePolicy};
pub use utils::{
    MAX_INTERACTION_TIMEOUT_MS, current_date, format_date, generate_random_string,
    generate_random_string_with, init_logging, validate_interaction_timeout, wait,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = SnapshotConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./screenshots"));
        assert_eq!(config.format, CaptureFormat::Png);
        assert_eq!(config.scroll_timeout(), Duration::from_secs(5));
        assert_eq!(config.name_policy, NamePolicy::Verbatim);
        assert!(!config.create_output_dir);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: SnapshotConfig =
            serde_yaml::from_str("format: jpeg\nname_policy: strict\n").unwrap();
        assert_eq!(config.format, CaptureFormat::Jpeg);
        assert_eq!(config.name_policy, NamePolicy::Strict);
        assert_eq!(config.output_dir, PathBuf::from("./screenshots"));
        assert_eq!(config.locate_timeout_ms, 5_000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_yaml_config_from(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, SnapshotConfig::default());
    }

    #[test]
    fn file_with_excessive_timeout_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scroll_timeout_ms: 60000").unwrap();
        assert!(load_yaml_config_from(file.path()).is_err());
    }

    #[test]
    fn excessive_locate_timeout_fails_validation() {
        let config = SnapshotConfig {
            locate_timeout_ms: MAX_INTERACTION_TIMEOUT_MS + 1,
            ..SnapshotConfig::default()
        };
        assert!(matches!(config.validate(), Err(SnapshotError::InvalidArguments(_))));
        assert!(utils::validate_timeout(config.locate_timeout()).is_err());
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir: out/shots\ncreate_output_dir: true").unwrap();
        let config = load_yaml_config_from(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/shots"));
        assert!(config.create_output_dir);
    }
}
