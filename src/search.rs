use std::time::Duration;

use tracing::{error, info};

use crate::driver::{PageDriver, PageElement};
use crate::error::{Result, ScrapeError};
use crate::models::Record;
use crate::targets::HOME_URL;

/// Where the search widget and the coin detail fields live.
///
/// The all-time low/high selectors are positional; they are the first thing
/// to break when the site layout changes.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub url: String,
    pub search_icon: String,
    pub search_input: String,
    pub first_suggestion: String,
    pub stats_header: String,
    pub name: String,
    pub price: String,
    pub all_time_low: String,
    pub all_time_high: String,
    pub typing_settle: Duration,
    pub element_timeout: Duration,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            url: HOME_URL.to_string(),
            search_icon: ".Search_mobile-icon-wrapper__u0cEq".to_string(),
            search_input: "input.gNFMEo".to_string(),
            first_suggestion: "div.SearchCryptoRow_container__QIZ8T".to_string(),
            stats_header: "div.coin-stats-header".to_string(),
            name: "span".to_string(),
            price: "div.czwNaM span.WXGwg".to_string(),
            all_time_low: stat_cell(4),
            all_time_high: stat_cell(3),
            typing_settle: Duration::from_secs(5),
            element_timeout: Duration::from_secs(10),
        }
    }
}

/// Path to the value span of the `row`-th entry in the price statistics block.
fn stat_cell(row: usize) -> String {
    format!(
        "html > body > div:nth-of-type(1) > div:nth-of-type(2) > div > div:nth-of-type(2) > div > div \
         > div:nth-of-type(1) > div > div:nth-of-type(2) > section > div > div:nth-of-type(4) \
         > div:nth-of-type(2) > div > div:nth-of-type({}) > div > div:nth-of-type(2) > span",
        row
    )
}

/// Searches for `query` and scrapes the headline figures of the first match.
///
/// Returns a single record, or an empty sequence if anything along the way
/// fails.
pub async fn lookup<D: PageDriver>(driver: &mut D, page: &SearchPage, query: &str) -> Vec<Record> {
    match try_lookup(driver, page, query).await {
        Ok(record) => vec![record],
        Err(e @ ScrapeError::ElementNotFound { .. }) => {
            error!("Timeout error: {}. The website structure may have changed.", e);
            Vec::new()
        }
        Err(e) => {
            error!("Search for '{}' failed: {}", query, e);
            Vec::new()
        }
    }
}

pub async fn try_lookup<D: PageDriver>(driver: &mut D, page: &SearchPage, query: &str) -> Result<Record> {
    let timeout = page.element_timeout;

    info!("Searching for '{}'", query);
    driver.navigate(&page.url).await?;
    driver.click(&page.search_icon, timeout).await?;
    driver.fill(&page.search_input, query, timeout).await?;
    tokio::time::sleep(page.typing_settle).await;
    driver.click(&page.first_suggestion, timeout).await?;

    let header = driver.wait_for_presence(&page.stats_header, timeout).await?;
    let name = first_text(&header, &page.name).await?;
    let price = first_text(&header, &page.price).await?;

    let all_time_low = driver.wait_for_presence(&page.all_time_low, timeout).await?.text().await?;
    let all_time_high = driver.wait_for_presence(&page.all_time_high, timeout).await?.text().await?;

    let record: Record = [
        ("Name", name),
        ("Price", price),
        ("All Time Low", all_time_low.trim().to_string()),
        ("All Time High", all_time_high.trim().to_string()),
    ]
    .into_iter()
    .collect();

    info!("Found {}", record.get("Name").unwrap_or_default());
    Ok(record)
}

async fn first_text<E: PageElement>(root: &E, selector: &str) -> Result<String> {
    let found = root.find_all(selector).await?;
    let first = found.first().ok_or_else(|| ScrapeError::ElementNotFound {
        selector: selector.to_string(),
        timeout: Duration::ZERO,
    })?;
    Ok(first.text().await?.trim().to_string())
}

/// CSV file name for a search result, safe to join onto the output directory.
pub fn details_file_name(query: &str) -> String {
    let stem: String = query
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        return "search_details.csv".to_string();
    }
    format!("{}_details.csv", stem)
}
