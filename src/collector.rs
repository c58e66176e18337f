//! Incremental collection of lazily-loaded table rows.
//!
//! A pass navigates to the target page, checks the title, waits for first
//! paint and then polls: extract the rows that appeared since the last poll,
//! scroll through the page in thirds to wake the lazy loader, and ask a
//! [`ContentProbe`] whether more content is coming. It stops when the quota
//! is met or the probe reports the page is exhausted.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::driver::{PageDriver, PageElement};
use crate::error::{Result, ScrapeError};
use crate::extract::{extract_row, read_cells};
use crate::models::{Record, ScrollState};
use crate::targets::TargetPage;

pub const PAGE_HEIGHT: &str = "document.body.scrollHeight";

/// The lazy loader only fires reliably when the page is walked in thirds.
pub const SCROLL_STAGES: [&str; 3] = [
    "window.scrollTo(0, document.body.scrollHeight / 3)",
    "window.scrollTo(0, document.body.scrollHeight / 1.5)",
    SCROLL_TO_END,
];

pub const SCROLL_TO_END: &str = "window.scrollTo(0, document.body.scrollHeight)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QuotaReached,
    /// The probe saw no new content after a scroll cycle.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub records: Vec<Record>,
    pub stop: StopReason,
}

/// Decides whether a scroll cycle revealed anything new.
#[async_trait]
pub trait ContentProbe: Send {
    /// Called once after the initial settle delay.
    async fn baseline<D: PageDriver>(&mut self, driver: &mut D, state: &mut ScrollState) -> Result<()>;

    /// Called after every scroll cycle.
    async fn has_more<D: PageDriver>(&mut self, driver: &mut D, state: &mut ScrollState) -> Result<bool>;
}

/// Treats an unchanged `document.body.scrollHeight` as the end of the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollHeightStagnation;

#[async_trait]
impl ContentProbe for ScrollHeightStagnation {
    async fn baseline<D: PageDriver>(&mut self, driver: &mut D, state: &mut ScrollState) -> Result<()> {
        state.last_known_page_height = page_height(driver).await?;
        Ok(())
    }

    async fn has_more<D: PageDriver>(&mut self, driver: &mut D, state: &mut ScrollState) -> Result<bool> {
        let height = page_height(driver).await?;
        if height == state.last_known_page_height {
            return Ok(false);
        }
        state.last_known_page_height = height;
        Ok(true)
    }
}

pub async fn page_height<D: PageDriver>(driver: &mut D) -> Result<i64> {
    let value = driver.run_script(PAGE_HEIGHT).await?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| ScrapeError::Script(format!("page height out of range: {}", n))),
        other => Err(ScrapeError::Script(format!("page height is not a number: {}", other))),
    }
}

/// Runs one collection pass and reports why it stopped.
///
/// A missing table aborts the whole pass with an error even if some rows were
/// already collected. Running out of content is not an error: the records
/// gathered so far are returned.
pub async fn try_collect<D, P>(driver: &mut D, page: &TargetPage, probe: &mut P) -> Result<Collection>
where
    D: PageDriver,
    P: ContentProbe,
{
    let quota = page.target.row_quota;

    info!("Navigating to {}", page.url);
    driver.navigate(&page.url).await?;
    let title = driver.current_title().await?;
    if !title.contains(&page.title_fragment) {
        return Err(ScrapeError::NavigationMismatch {
            expected: page.title_fragment.clone(),
            actual: title,
        });
    }

    tokio::time::sleep(page.initial_settle).await;

    let mut state = ScrollState::default();
    probe.baseline(driver, &mut state).await?;

    let mut records: Vec<Record> = Vec::new();

    let stop = loop {
        if records.len() >= quota {
            break StopReason::QuotaReached;
        }

        let table = driver
            .wait_for_presence(&page.table_selector, page.element_timeout)
            .await?;
        let rows = table.find_all(&page.row_selector).await?;
        info!("Rows currently loaded: {}", rows.len());

        for row in rows.iter().skip(state.rows_collected) {
            let cells = read_cells(row, &page.cell_selector).await?;
            state.rows_collected += 1;
            match extract_row(&cells, &page.target) {
                Some(record) => records.push(record),
                None => debug!(cells = cells.len(), "skipping incomplete row"),
            }
            if records.len() >= quota {
                break;
            }
        }

        if records.len() >= quota {
            break StopReason::QuotaReached;
        }

        for stage in SCROLL_STAGES {
            driver.run_script(stage).await?;
            tokio::time::sleep(page.scroll_settle).await;
        }

        if !probe.has_more(driver, &mut state).await? {
            info!("No more content to load.");
            break StopReason::Exhausted;
        }
    };

    info!(
        "Collected {} of {} {} rows ({:?})",
        records.len(),
        quota,
        page.name,
        stop
    );
    Ok(Collection { records, stop })
}

/// Collects `page` using scroll-height stagnation as the end-of-content signal.
///
/// Errors stop at this boundary: they are logged and an empty sequence is
/// returned.
pub async fn collect<D: PageDriver>(driver: &mut D, page: &TargetPage) -> Vec<Record> {
    collect_with(driver, page, &mut ScrollHeightStagnation).await
}

pub async fn collect_with<D, P>(driver: &mut D, page: &TargetPage, probe: &mut P) -> Vec<Record>
where
    D: PageDriver,
    P: ContentProbe,
{
    match try_collect(driver, page, probe).await {
        Ok(collection) => collection.records,
        Err(e) => {
            error!("Error during scraping {}: {}", page.name, e);
            Vec::new()
        }
    }
}
