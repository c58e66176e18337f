use std::time::Duration;

use cmc_scraper::search::{lookup, try_lookup, SearchPage};
use cmc_scraper::snapshot::{Snapshot, SnapshotDriver};
use cmc_scraper::ScrapeError;

const HOME: &str = r#"<html><head><title>CoinMarketCap</title></head><body>
    <div class="search-icon">search</div>
</body></html>"#;

const SEARCH_OPEN: &str = r#"<html><head><title>CoinMarketCap</title></head><body>
    <input class="search-input" />
    <div class="suggestion">Bitcoin BTC</div>
    <div class="suggestion">Bitcoin Cash BCH</div>
</body></html>"#;

const DETAIL: &str = r#"<html><head><title>Bitcoin price today | CoinMarketCap</title></head><body>
    <div class="coin-stats-header">
        <span> Bitcoin </span><span>BTC</span>
        <div class="price"><span class="value">$67,012.55</span></div>
    </div>
    <div id="atl"><span>$0.04865</span></div>
    <div id="ath"><span> $73,750.07 </span></div>
</body></html>"#;

fn search_page() -> SearchPage {
    SearchPage {
        url: "https://coinmarketcap.test/".to_string(),
        search_icon: ".search-icon".to_string(),
        search_input: "input.search-input".to_string(),
        first_suggestion: "div.suggestion".to_string(),
        stats_header: "div.coin-stats-header".to_string(),
        name: "span".to_string(),
        price: "div.price span.value".to_string(),
        all_time_low: "#atl span".to_string(),
        all_time_high: "#ath span".to_string(),
        typing_settle: Duration::ZERO,
        element_timeout: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn scrapes_the_first_suggestion() {
    let mut driver = SnapshotDriver::new(vec![
        Snapshot::new(HOME, 800),
        Snapshot::new(SEARCH_OPEN, 800),
        Snapshot::new(DETAIL, 2400),
    ]);

    let records = lookup(&mut driver, &search_page(), "bitcoin").await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(
        record.field_names().collect::<Vec<_>>(),
        ["Name", "Price", "All Time Low", "All Time High"]
    );
    assert_eq!(record.get("Name"), Some("Bitcoin"));
    assert_eq!(record.get("Price"), Some("$67,012.55"));
    assert_eq!(record.get("All Time Low"), Some("$0.04865"));
    assert_eq!(record.get("All Time High"), Some("$73,750.07"));

    assert_eq!(
        driver.typed(),
        [("input.search-input".to_string(), "bitcoin".to_string())]
    );
    assert_eq!(driver.visited(), ["https://coinmarketcap.test/"]);
}

#[tokio::test]
async fn no_suggestions_yields_nothing() {
    let empty_results = r#"<html><head><title>CoinMarketCap</title></head><body>
        <input class="search-input" /><p>No results</p></body></html>"#;
    let mut driver = SnapshotDriver::new(vec![
        Snapshot::new(HOME, 800),
        Snapshot::new(empty_results, 800),
    ]);

    let err = try_lookup(&mut driver, &search_page(), "notacoin").await.unwrap_err();
    assert!(matches!(err, ScrapeError::ElementNotFound { ref selector, .. } if selector == "div.suggestion"));

    assert!(lookup(&mut driver, &search_page(), "notacoin").await.is_empty());
}

#[test]
fn default_positional_selectors_are_valid_css() {
    let page = SearchPage::default();

    assert!(scraper::Selector::parse(&page.all_time_low).is_ok());
    assert!(scraper::Selector::parse(&page.all_time_high).is_ok());
    assert_ne!(page.all_time_low, page.all_time_high);
    assert!(page.all_time_low.contains("div:nth-of-type(4) > div > div:nth-of-type(2) > span"));
}
