//! Scrapes CoinMarketCap ranking tables through a browser and converts
//! crypto amounts to fiat through the CoinGecko pricing API.

pub mod browser;
pub mod collector;
pub mod config;
pub mod converter;
pub mod csv_writer;
pub mod driver;
pub mod error;
pub mod excel_writer;
pub mod extract;
pub mod models;
pub mod prompt;
pub mod scraper;
pub mod search;
pub mod snapshot;
pub mod targets;

pub use collector::{collect, try_collect, Collection, ContentProbe, ScrollHeightStagnation, StopReason};
pub use driver::{PageDriver, PageElement};
pub use error::{Result, ScrapeError};
pub use models::{CollectionTarget, Conversion, Record, ScrollState};
pub use crate::scraper::CoinMarketCapScraper;
