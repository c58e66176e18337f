use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::converter::DEFAULT_API_BASE;

#[derive(Debug, Clone, Parser)]
#[command(name = "cmc-scraper", version, about = "Scrape CoinMarketCap rankings and convert crypto to fiat")]
pub struct Config {
    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Directory exported files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write an .xlsx workbook next to each CSV
    #[arg(long)]
    pub xlsx: bool,

    /// Base URL of the CoinGecko-compatible pricing API
    #[arg(long, env = "COINGECKO_API_BASE", default_value = DEFAULT_API_BASE)]
    pub pricing_api: String,

    /// How long to wait for page elements to appear
    #[arg(long, default_value_t = 10)]
    pub element_timeout_secs: u64,

    /// Override the row quota of every table scrape
    #[arg(long)]
    pub rows: Option<usize>,
}

impl Config {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }
}
