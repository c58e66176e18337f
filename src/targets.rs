use std::time::Duration;

use crate::models::CollectionTarget;

pub const HOME_URL: &str = "https://coinmarketcap.com/";

const TABLE_SELECTOR: &str = ".cmc-table";
const ROW_SELECTOR: &str = "tbody tr";
const CELL_SELECTOR: &str = "td";
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// A lazily-loaded ranking table and how to collect it.
#[derive(Debug, Clone)]
pub struct TargetPage {
    pub name: &'static str,
    pub url: String,
    /// Substring the page title must contain after navigation.
    pub title_fragment: String,
    pub table_selector: String,
    pub row_selector: String,
    pub cell_selector: String,
    pub target: CollectionTarget,
    pub initial_settle: Duration,
    pub scroll_settle: Duration,
    pub element_timeout: Duration,
    /// File name the CLI exports this table to.
    pub output_file: &'static str,
}

impl TargetPage {
    fn cmc_table(
        name: &'static str,
        url: &str,
        title_fragment: &str,
        target: CollectionTarget,
        settle: Duration,
        output_file: &'static str,
    ) -> Self {
        Self {
            name,
            url: url.to_string(),
            title_fragment: title_fragment.to_string(),
            table_selector: TABLE_SELECTOR.to_string(),
            row_selector: ROW_SELECTOR.to_string(),
            cell_selector: CELL_SELECTOR.to_string(),
            target,
            initial_settle: settle,
            scroll_settle: settle,
            element_timeout: ELEMENT_TIMEOUT,
            output_file,
        }
    }

    /// The main cryptocurrency listing.
    pub fn listing() -> Self {
        Self::cmc_table(
            "listing",
            HOME_URL,
            "CoinMarketCap",
            CollectionTarget::new(
                80,
                9,
                &[(2, "Name"), (3, "Price"), (7, "Market Cap"), (8, "Volume")],
            ),
            Duration::from_secs(5),
            "top_cryptocurrencies.csv",
        )
    }

    pub fn exchanges() -> Self {
        Self::cmc_table(
            "exchanges",
            "https://coinmarketcap.com/rankings/exchanges/",
            "Top Cryptocurrency Exchanges Ranked By Volume | CoinMarketCap",
            CollectionTarget::new(
                50,
                6,
                &[
                    (1, "Name"),
                    (2, "Volume"),
                    (3, "Average Liquidity"),
                    (4, "Weekly Visit"),
                    (5, "Market"),
                ],
            ),
            Duration::from_secs(10),
            "top_exchanges.csv",
        )
    }

    pub fn derivatives() -> Self {
        Self::cmc_table(
            "derivatives",
            "https://coinmarketcap.com/rankings/exchanges/derivatives/",
            "Top Cryptocurrency Derivatives Exchanges Ranked | CoinMarketCap",
            CollectionTarget::new(
                80,
                7,
                &[
                    (1, "Exchange"),
                    (2, "Volume"),
                    (3, "Maker Fees"),
                    (4, "Taker Fees"),
                    (5, "Open Interest"),
                    (6, "Market No."),
                ],
            ),
            Duration::from_secs(5),
            "top_derivatives.csv",
        )
    }

    pub fn with_quota(mut self, row_quota: usize) -> Self {
        self.target = self.target.with_quota(row_quota);
        self
    }

    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Zero both settle delays. Useful when replaying captured pages.
    pub fn without_settle(mut self) -> Self {
        self.initial_settle = Duration::ZERO;
        self.scroll_settle = Duration::ZERO;
        self
    }
}
