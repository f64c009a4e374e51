//! chromiumoxide-backed page capability
//!
//! Wraps a caller-owned [`Page`]. Launching and supervising the browser is
//! the caller's business; this adapter only resolves, scrolls and renders.

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::element::Element;
use chromiumoxide_cdp::cdp::browser_protocol::page::CaptureScreenshotFormat;
use std::fmt;
use std::time::Duration;
use tracing::trace;

use super::{CaptureFormat, ElementHandle, PageCapability, SnapshotError, SnapshotResult};
use crate::SnapshotConfig;
use crate::utils::constants::{DEFAULT_LOCATE_TIMEOUT_MS, MAX_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::utils::{validate_timeout, wait_for_element};

impl From<CaptureFormat> for CaptureScreenshotFormat {
    fn from(format: CaptureFormat) -> Self {
        match format {
            CaptureFormat::Png => CaptureScreenshotFormat::Png,
            CaptureFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        }
    }
}

/// A chromiumoxide page exposed as a [`PageCapability`]
#[derive(Clone)]
pub struct ChromePage {
    page: Page,
    locate_timeout: Duration,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            locate_timeout: Duration::from_millis(DEFAULT_LOCATE_TIMEOUT_MS),
        }
    }

    /// Build with the locate timeout taken from `config`
    ///
    /// Fails with `InvalidArguments` when the timeout exceeds
    /// `MAX_INTERACTION_TIMEOUT_MS`.
    pub fn with_config(page: Page, config: &SnapshotConfig) -> SnapshotResult<Self> {
        Self::new(page).with_locate_timeout(config.locate_timeout())
    }

    /// How long `locate` polls for a selector before giving up
    ///
    /// Bounded like every interaction timeout.
    pub fn with_locate_timeout(mut self, timeout: Duration) -> SnapshotResult<Self> {
        self.locate_timeout = validate_timeout(timeout)?;
        Ok(self)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_inner(self) -> Page {
        self.page
    }
}

#[async_trait]
impl PageCapability for ChromePage {
    type Element = ChromeElement;

    async fn locate(&self, selector: &str) -> SnapshotResult<ChromeElement> {
        let element = wait_for_element(&self.page, selector, self.locate_timeout).await?;
        Ok(ChromeElement {
            element,
            selector: selector.to_string(),
        })
    }
}

impl fmt::Debug for ChromePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromePage")
            .field("locate_timeout", &self.locate_timeout)
            .finish_non_exhaustive()
    }
}

/// An element resolved by [`ChromePage::locate`]
pub struct ChromeElement {
    element: Element,
    selector: String,
}

impl fmt::Debug for ChromeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromeElement")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

impl ChromeElement {
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

#[async_trait]
impl ElementHandle for ChromeElement {
    /// Retries chromiumoxide's scroll until the element has a layout box.
    ///
    /// Elements that are still animating in or hidden behind `display: none`
    /// fail the CDP call; the caller's timeout decides when to stop.
    async fn scroll_into_view_if_needed(&self) -> SnapshotResult<()> {
        let mut poll_interval = MIN_POLL_INTERVAL;

        loop {
            match self.element.scroll_into_view().await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    trace!(
                        "Scroll into view for '{}' not possible yet: {}",
                        self.selector, e
                    );
                }
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
        }
    }

    async fn capture(&self, format: CaptureFormat) -> SnapshotResult<Vec<u8>> {
        self.element
            .screenshot(format.into())
            .await
            .map_err(|e| SnapshotError::CaptureFailed {
                selector: self.selector.clone(),
                reason: format!(
                    "{}. Possible causes: (1) element has no dimensions, \
                     (2) element is obscured, (3) page is still loading",
                    e
                ),
            })
    }
}
