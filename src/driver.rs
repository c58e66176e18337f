//! Browser capabilities the scrapers depend on.
//!
//! Collection code is written against these traits rather than a concrete
//! browser, so the same state machine runs on a live Chromium session
//! ([`crate::browser::ChromiumDriver`]) or on captured HTML
//! ([`crate::snapshot::SnapshotDriver`]).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A single exclusively-owned page session.
///
/// Every call blocks the caller until the navigation, script or wait has
/// finished (or timed out). There is no cancellation.
#[async_trait]
pub trait PageDriver: Send + Sync {
    type Element: PageElement;

    /// Load `url` and wait for navigation to finish.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    async fn current_title(&self) -> Result<String>;

    /// Evaluate a JavaScript expression in the page and return its value
    /// (`Value::Null` for `undefined`).
    async fn run_script(&mut self, snippet: &str) -> Result<Value>;

    /// Wait up to `timeout` for `selector` to match; fails with
    /// [`crate::error::ScrapeError::ElementNotFound`] otherwise.
    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> Result<Self::Element>;

    async fn click(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Clear the input matched by `selector` and type `text` into it.
    async fn fill(&mut self, selector: &str, text: &str, timeout: Duration) -> Result<()>;
}

/// An element handle returned by a [`PageDriver`].
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    /// Rendered text of the element and its descendants.
    async fn text(&self) -> Result<String>;

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>>;
}
