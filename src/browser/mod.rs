//! Page capability seam for element snapshots
//!
//! The snapshotter never talks to a browser directly. It is handed a
//! [`PageCapability`] per call, which resolves selectors into
//! [`ElementHandle`]s that know how to scroll themselves into view and
//! render their own bounds. `chrome` provides the chromiumoxide-backed
//! implementation; tests inject fakes.

mod chrome;

pub use chrome::{ChromeElement, ChromePage};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::utils::generate_random_string;

/// Image encoding of a visual capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl CaptureFormat {
    /// File extension written for this format (no leading dot)
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            CaptureFormat::Png => "png",
            CaptureFormat::Jpeg => "jpg",
        }
    }
}

/// A page that can resolve selectors into element handles.
///
/// The page is a mutable resource owned by a single test case. Running two
/// captures against the same page at once is unsupported; captures against
/// distinct pages are independent.
#[async_trait]
pub trait PageCapability: Send + Sync {
    type Element: ElementHandle;

    /// Resolve `selector` to one logical element.
    ///
    /// Zero matches must fail with [`SnapshotError::ElementNotFound`]. What
    /// happens when several elements match is up to the implementation.
    async fn locate(&self, selector: &str) -> SnapshotResult<Self::Element>;
}

/// A resolved element that can be brought into view and captured.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Scroll the element into the visible viewport if it is not already.
    ///
    /// May wait for the element to become scrollable. Callers bound this with
    /// their own timeout, so implementations are free to never resolve.
    async fn scroll_into_view_if_needed(&self) -> SnapshotResult<()>;

    /// Render the element's bounds in the given format.
    async fn capture(&self, format: CaptureFormat) -> SnapshotResult<Vec<u8>>;

    /// Render the element and write it to `path`, returning the bytes written.
    ///
    /// The parent directory must already exist. The image is written to a
    /// sibling temp file and renamed into place, so a failed write never
    /// leaves a truncated file at `path`.
    async fn capture_to_file(&self, path: &Path, format: CaptureFormat) -> SnapshotResult<usize> {
        let image_data = self.capture(format).await?;
        write_atomically(path, &image_data)
            .await
            .map_err(|source| SnapshotError::CaptureWriteError {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(image_data.len())
    }
}

/// Write `data` next to `path` under a temp name, then rename over `path`.
///
/// The temp file is removed on any failure.
async fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(format!(".{}.tmp", generate_random_string(8)));
    let temp_path = path.with_file_name(temp_name);

    let result = async {
        tokio::fs::write(&temp_path, data).await?;
        tokio::fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Element not found for selector '{selector}': {reason}")]
    ElementNotFound { selector: String, reason: String },

    #[error(
        "Element '{selector}' could not be scrolled into view within {}ms",
        .timeout.as_millis()
    )]
    ScrollTimeout { selector: String, timeout: Duration },

    #[error("Failed to write capture to {}: {source}", .path.display())]
    CaptureWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Element capture failed for selector '{selector}': {reason}")]
    CaptureFailed { selector: String, reason: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl SnapshotError {
    pub(crate) fn invalid_arguments(message: impl Into<String>) -> Self {
        SnapshotError::InvalidArguments(message.into())
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
