use std::time::Duration;

use crate::browser::ChromiumDriver;
use crate::collector::collect;
use crate::driver::PageDriver;
use crate::error::Result;
use crate::models::Record;
use crate::search::{lookup, SearchPage};
use crate::targets::TargetPage;

/// Owns the page driver and the page definitions for every menu action.
///
/// Each scrape is a single pass; errors are logged inside and show up as an
/// empty (or, for an exhausted page, short) result.
pub struct CoinMarketCapScraper<D: PageDriver = ChromiumDriver> {
    driver: D,
    pub listing: TargetPage,
    pub exchanges: TargetPage,
    pub derivatives: TargetPage,
    pub search: SearchPage,
}

impl<D: PageDriver> CoinMarketCapScraper<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            listing: TargetPage::listing(),
            exchanges: TargetPage::exchanges(),
            derivatives: TargetPage::derivatives(),
            search: SearchPage::default(),
        }
    }

    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.listing = self.listing.with_element_timeout(timeout);
        self.exchanges = self.exchanges.with_element_timeout(timeout);
        self.derivatives = self.derivatives.with_element_timeout(timeout);
        self.search.element_timeout = timeout;
        self
    }

    pub fn with_quota(mut self, rows: usize) -> Self {
        self.listing = self.listing.with_quota(rows);
        self.exchanges = self.exchanges.with_quota(rows);
        self.derivatives = self.derivatives.with_quota(rows);
        self
    }

    pub async fn scrape_main_page(&mut self) -> Vec<Record> {
        collect(&mut self.driver, &self.listing).await
    }

    pub async fn scrape_exchanges(&mut self) -> Vec<Record> {
        collect(&mut self.driver, &self.exchanges).await
    }

    pub async fn scrape_derivatives(&mut self) -> Vec<Record> {
        collect(&mut self.driver, &self.derivatives).await
    }

    pub async fn scrape_specific_crypto(&mut self, query: &str) -> Vec<Record> {
        lookup(&mut self.driver, &self.search, query).await
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}

impl CoinMarketCapScraper<ChromiumDriver> {
    pub async fn launch(headless: bool) -> anyhow::Result<Self> {
        Ok(Self::new(ChromiumDriver::launch(headless).await?))
    }

    pub async fn close(self) -> Result<()> {
        self.driver.close().await
    }
}
