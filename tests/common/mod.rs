//! In-memory page capability for snapshot tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kodegen_test_helpers::{
    CaptureFormat, ElementHandle, PageCapability, SnapshotError, SnapshotResult,
};

/// When a fake element reports itself as in view
#[derive(Debug, Clone, Copy)]
pub enum Visibility {
    Immediate,
    After(Duration),
    Never,
}

#[derive(Debug, Clone)]
struct ElementSpec {
    visibility: Visibility,
    image: Vec<u8>,
}

/// Selector-keyed fake page. Unknown selectors fail with `ElementNotFound`.
#[derive(Debug, Default)]
pub struct FakePage {
    elements: HashMap<String, ElementSpec>,
    locate_calls: Arc<AtomicUsize>,
    capture_calls: Arc<AtomicUsize>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, selector: &str, image: &[u8]) -> Self {
        self.with_visibility(selector, Visibility::Immediate, image)
    }

    pub fn with_visibility(mut self, selector: &str, visibility: Visibility, image: &[u8]) -> Self {
        self.elements.insert(
            selector.to_string(),
            ElementSpec {
                visibility,
                image: image.to_vec(),
            },
        );
        self
    }

    /// Replace the rendered image of an already registered element
    pub fn set_image(&mut self, selector: &str, image: &[u8]) {
        if let Some(spec) = self.elements.get_mut(selector) {
            spec.image = image.to_vec();
        }
    }

    pub fn locate_calls(&self) -> usize {
        self.locate_calls.load(Ordering::SeqCst)
    }

    pub fn capture_calls(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }
}

pub struct FakeElement {
    selector: String,
    spec: ElementSpec,
    capture_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PageCapability for FakePage {
    type Element = FakeElement;

    async fn locate(&self, selector: &str) -> SnapshotResult<FakeElement> {
        self.locate_calls.fetch_add(1, Ordering::SeqCst);
        let spec = self
            .elements
            .get(selector)
            .cloned()
            .ok_or_else(|| SnapshotError::ElementNotFound {
                selector: selector.to_string(),
                reason: "no element matches".to_string(),
            })?;
        Ok(FakeElement {
            selector: selector.to_string(),
            spec,
            capture_calls: self.capture_calls.clone(),
        })
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn scroll_into_view_if_needed(&self) -> SnapshotResult<()> {
        match self.spec.visibility {
            Visibility::Immediate => Ok(()),
            Visibility::After(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Visibility::Never => std::future::pending().await,
        }
    }

    async fn capture(&self, format: CaptureFormat) -> SnapshotResult<Vec<u8>> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        if self.spec.image.is_empty() {
            return Err(SnapshotError::CaptureFailed {
                selector: self.selector.clone(),
                reason: "element has no dimensions".to_string(),
            });
        }
        let mut image = format.extension().as_bytes().to_vec();
        image.push(b':');
        image.extend_from_slice(&self.spec.image);
        Ok(image)
    }
}
