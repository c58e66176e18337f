//! A [`PageDriver`] that replays captured HTML instead of driving a browser.
//!
//! The driver holds an ordered list of documents. `navigate` rewinds to the
//! first one; scrolling to the end of the page or clicking moves on to the
//! next (staying on the last). The reported page height is the one recorded
//! with each document, so the stagnation probe sees growth exactly when the
//! captured pages say it should.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::collector::{PAGE_HEIGHT, SCROLL_TO_END};
use crate::driver::{PageDriver, PageElement};
use crate::error::{Result, ScrapeError};

#[derive(Debug, Clone)]
pub struct Snapshot {
    html: Arc<str>,
    height: i64,
}

impl Snapshot {
    pub fn new(html: impl Into<String>, height: i64) -> Self {
        Self {
            html: Arc::from(html.into()),
            height,
        }
    }
}

#[derive(Debug, Default)]
pub struct SnapshotDriver {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    visited: Vec<String>,
    scripts: Vec<String>,
    typed: Vec<(String, String)>,
}

impl SnapshotDriver {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots,
            ..Self::default()
        }
    }

    /// URLs passed to `navigate`, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Scripts passed to `run_script`, in order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// `(selector, text)` pairs passed to `fill`.
    pub fn typed(&self) -> &[(String, String)] {
        &self.typed
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    fn current(&self) -> Result<&Snapshot> {
        self.snapshots
            .get(self.cursor)
            .ok_or_else(|| ScrapeError::Script("no snapshot loaded".to_string()))
    }

    fn advance(&mut self) {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            debug!(position = self.cursor, "advanced to next snapshot");
        }
    }

    fn locate(&self, selector: &str, timeout: Duration) -> Result<SnapshotElement> {
        let snapshot = self.current()?;
        let document = Html::parse_document(&snapshot.html);
        let parsed = parse_selector(selector)?;
        let found = document.select(&parsed).next().ok_or_else(|| ScrapeError::ElementNotFound {
            selector: selector.to_string(),
            timeout,
        })?;
        let ordinal = ordinal_of(&document, found)?;
        Ok(SnapshotElement {
            html: Arc::clone(&snapshot.html),
            ordinal,
        })
    }
}

#[async_trait]
impl PageDriver for SnapshotDriver {
    type Element = SnapshotElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.visited.push(url.to_string());
        self.cursor = 0;
        Ok(())
    }

    async fn current_title(&self) -> Result<String> {
        let document = Html::parse_document(&self.current()?.html);
        let title = parse_selector("title")?;
        Ok(document
            .select(&title)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }

    async fn run_script(&mut self, snippet: &str) -> Result<Value> {
        self.scripts.push(snippet.to_string());
        if snippet == PAGE_HEIGHT {
            return Ok(Value::from(self.current()?.height));
        }
        if snippet == SCROLL_TO_END {
            self.advance();
        }
        Ok(Value::Null)
    }

    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> Result<SnapshotElement> {
        self.locate(selector, timeout)
    }

    async fn click(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.locate(selector, timeout)?;
        self.advance();
        Ok(())
    }

    async fn fill(&mut self, selector: &str, text: &str, timeout: Duration) -> Result<()> {
        self.locate(selector, timeout)?;
        self.typed.push((selector.to_string(), text.to_string()));
        Ok(())
    }
}

/// An element inside a captured document, addressed by its position in
/// document order.
#[derive(Debug, Clone)]
pub struct SnapshotElement {
    html: Arc<str>,
    ordinal: usize,
}

impl SnapshotElement {
    fn with_element<T>(&self, f: impl FnOnce(&Html, scraper::ElementRef<'_>) -> Result<T>) -> Result<T> {
        let document = Html::parse_document(&self.html);
        let all = parse_selector("*")?;
        let element = document
            .select(&all)
            .nth(self.ordinal)
            .ok_or_else(|| ScrapeError::Script(format!("stale element #{}", self.ordinal)))?;
        f(&document, element)
    }
}

#[async_trait]
impl PageElement for SnapshotElement {
    async fn text(&self) -> Result<String> {
        self.with_element(|_, element| Ok(element.text().collect::<String>()))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<SnapshotElement>> {
        let parsed = parse_selector(selector)?;
        self.with_element(|document, element| {
            element
                .select(&parsed)
                .map(|child| -> Result<SnapshotElement> {
                    Ok(SnapshotElement {
                        html: Arc::clone(&self.html),
                        ordinal: ordinal_of(document, child)?,
                    })
                })
                .collect()
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Script(format!("invalid selector '{}': {}", selector, e)))
}

fn ordinal_of(document: &Html, target: scraper::ElementRef<'_>) -> Result<usize> {
    let all = parse_selector("*")?;
    document
        .select(&all)
        .position(|el| el.id() == target.id())
        .ok_or_else(|| ScrapeError::Script("element not found in its own document".to_string()))
}
