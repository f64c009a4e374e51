//! Element polling utility for SPA support
//!
//! Provides wait_for_element() which polls for DOM elements with exponential backoff.
//! Single Page Applications often render the target after the load event, so a
//! single `find_element` would report a miss for an element that is seconds away.

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::element::Element;

use super::constants::{MAX_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::browser::{SnapshotError, SnapshotResult};

/// Wait for an element to appear in the DOM using exponential backoff polling
///
/// # Arguments
/// * `page` - The chromiumoxide Page to search in
/// * `selector` - CSS selector for the element
/// * `timeout` - Maximum time to wait for the element
///
/// # Returns
/// * `Ok(Element)` - The element was found
/// * `Err(SnapshotError::ElementNotFound)` - Timeout exceeded
///
/// # Polling Strategy
/// - Starts at 100ms intervals
/// - Doubles each retry (exponential backoff)
/// - Caps at 1 second maximum interval
/// - Total duration limited by timeout parameter
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> SnapshotResult<Element> {
    let start = std::time::Instant::now();
    let mut poll_interval = MIN_POLL_INTERVAL;

    loop {
        let last_error = match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(e) => e,
        };

        if start.elapsed() >= timeout {
            return Err(SnapshotError::ElementNotFound {
                selector: selector.to_string(),
                reason: format!(
                    "timeout after {}ms ({}). \
                     Try: (1) Verify selector is correct using browser dev tools, \
                     (2) Ensure element is rendered, \
                     (3) Increase locate_timeout_ms.",
                    timeout.as_millis(),
                    last_error
                ),
            });
        }

        tokio::time::sleep(poll_interval).await;

        // Double the interval, but cap at max
        poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
    }
}
