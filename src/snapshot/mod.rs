//! Element snapshotter
//!
//! Resolves a selector, scrolls the element into view and writes a capture
//! of its bounds to `<output_dir>/<name>.<ext>`.
//!
//! # Flow
//!
//! 1. Validate arguments (before the page is touched)
//! 2. `locate` the selector on the injected page
//! 3. `scroll_into_view_if_needed`, bounded by the scroll timeout
//! 4. `capture_to_file` at the artifact path
//!
//! Every failure is returned as-is. Nothing is retried and nothing is
//! written unless all steps succeed. Two captures with the same name
//! overwrite each other (last writer wins).

mod name_policy;

pub use name_policy::NamePolicy;

use name_policy::relative_name;

use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::SnapshotConfig;
use crate::browser::{ElementHandle, PageCapability, SnapshotError, SnapshotResult};
use crate::utils::validate_timeout;

/// Captures single elements to deterministic file paths
///
/// Holds configuration only. The page is borrowed per call, so one
/// snapshotter can serve many test cases, each with its own page.
#[derive(Debug, Clone, Default)]
pub struct ElementSnapshotter {
    config: SnapshotConfig,
}

impl ElementSnapshotter {
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Where a capture named `name` is written
    ///
    /// Pure function of `name` and the configured directory and format.
    /// A leading root on `name` is dropped so the result is always under
    /// `output_dir`. The name policy is not applied here.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}.{}",
            relative_name(name),
            self.config.format.extension()
        ))
    }

    /// Capture `selector` on `page` to `<output_dir>/<name>.<ext>`
    ///
    /// Uses the configured scroll timeout.
    ///
    /// # Errors
    /// * `ElementNotFound` - selector resolved to nothing
    /// * `ScrollTimeout` - element not in view before the timeout
    /// * `CaptureFailed` - backend could not render the element
    /// * `CaptureWriteError` - output path not writable
    /// * `InvalidArguments` - empty selector or name, or a rejected name
    pub async fn capture<P: PageCapability>(
        &self,
        page: &P,
        selector: &str,
        name: &str,
    ) -> SnapshotResult<()> {
        self.capture_with_timeout(page, selector, name, self.config.scroll_timeout())
            .await
    }

    /// [`capture`](Self::capture) with an explicit scroll timeout
    pub async fn capture_with_timeout<P: PageCapability>(
        &self,
        page: &P,
        selector: &str,
        name: &str,
        scroll_timeout: Duration,
    ) -> SnapshotResult<()> {
        if selector.trim().is_empty() {
            return Err(SnapshotError::invalid_arguments("Selector cannot be empty"));
        }
        self.config.name_policy.check(name)?;
        let scroll_timeout = validate_timeout(scroll_timeout)?;

        let path = self.artifact_path(name);

        debug!("Locating element '{}'", selector);
        let element = page.locate(selector).await.inspect_err(|e| {
            warn!("Snapshot '{}' aborted: {}", name, e);
        })?;

        debug!(
            "Scrolling '{}' into view (timeout {}ms)",
            selector,
            scroll_timeout.as_millis()
        );
        match tokio::time::timeout(scroll_timeout, element.scroll_into_view_if_needed()).await {
            Ok(result) => result.inspect_err(|e| {
                warn!("Snapshot '{}' aborted: {}", name, e);
            })?,
            Err(_) => {
                let err = SnapshotError::ScrollTimeout {
                    selector: selector.to_string(),
                    timeout: scroll_timeout,
                };
                warn!("Snapshot '{}' aborted: {}", name, err);
                return Err(err);
            }
        }

        if self.config.create_output_dir
            && let Some(parent) = path.parent()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SnapshotError::CaptureWriteError {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let size_bytes = element
            .capture_to_file(&path, self.config.format)
            .await
            .inspect_err(|e| {
                warn!("Snapshot '{}' aborted: {}", name, e);
            })?;

        info!(
            "Captured '{}' to {} ({} bytes, {})",
            selector,
            path.display(),
            size_bytes,
            self.config.format.extension().to_uppercase()
        );

        Ok(())
    }
}
