use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cmc_scraper::config::Config;
use cmc_scraper::converter::PriceClient;
use cmc_scraper::csv_writer::write_to_csv;
use cmc_scraper::excel_writer::write_to_xlsx;
use cmc_scraper::prompt::{read_choice, read_line, read_positive_f64};
use cmc_scraper::search::details_file_name;
use cmc_scraper::{CoinMarketCapScraper, Record};

const MENU_OPTIONS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];
const CONVERTIBLE: [&str; 6] = ["bitcoin", "solana", "ethereum", "tether", "doge", "cardano"];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!("Starting CoinMarketCap scraper");

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    if config.headed {
        info!("Running in headed mode (browser visible)");
    }

    let mut scraper = CoinMarketCapScraper::launch(!config.headed)
        .await?
        .with_element_timeout(config.element_timeout());
    if let Some(rows) = config.rows {
        scraper = scraper.with_quota(rows);
    }
    let prices = PriceClient::new(config.pricing_api.as_str()).context("Failed to build HTTP client")?;

    let outcome = run_menu(&mut scraper, &prices, &config).await;

    info!("Closing browser");
    if let Err(e) = scraper.close().await {
        error!("Error closing browser: {}", e);
    }
    outcome
}

async fn run_menu(scraper: &mut CoinMarketCapScraper, prices: &PriceClient, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        writeln!(out, "\nCoinMarketCap Scraper")?;
        writeln!(out, "1. Scrape Main Page")?;
        writeln!(out, "2. Scrape Exchanges")?;
        writeln!(out, "3. Scrape Derivatives")?;
        writeln!(out, "4. Convert Cryptocurrency to Fiat")?;
        writeln!(out, "5. Search and Scrape Cryptocurrency")?;
        writeln!(out, "6. Exit")?;

        let Some(choice) = read_choice(&mut input, &mut out, "Enter your choice (1-6): ", &MENU_OPTIONS)? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let records = scraper.scrape_main_page().await;
                export(config, &records, scraper.listing.output_file);
            }
            "2" => {
                let records = scraper.scrape_exchanges().await;
                export(config, &records, scraper.exchanges.output_file);
            }
            "3" => {
                let records = scraper.scrape_derivatives().await;
                export(config, &records, scraper.derivatives.output_file);
            }
            "4" => {
                if !convert_interactively(prices, &mut input, &mut out).await? {
                    break;
                }
            }
            "5" => {
                let Some(query) = read_line(&mut input, &mut out, "Enter the cryptocurrency name to search: ")? else {
                    break;
                };
                let records = scraper.scrape_specific_crypto(&query).await;
                export(config, &records, &details_file_name(&query));
            }
            _ => {
                writeln!(out, "Exiting the program...")?;
                break;
            }
        }
    }
    Ok(())
}

fn export(config: &Config, records: &[Record], file_name: &str) {
    if records.is_empty() {
        warn!("No data collected, nothing written");
        return;
    }

    let path = config.output_dir.join(file_name);
    if let Err(e) = write_to_csv(records, &path) {
        error!("Error writing to CSV: {}", e);
    }
    if config.xlsx {
        let workbook = path.with_extension("xlsx");
        if let Err(e) = write_to_xlsx(records, &workbook) {
            error!("Error writing workbook: {}", e);
        }
    }
}

/// Runs the conversion prompts. Returns `false` if input ran out.
async fn convert_interactively<R: BufRead, W: Write>(
    prices: &PriceClient,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let prompt = format!(
        "Enter the cryptocurrency you want to convert (Choose from {}): ",
        CONVERTIBLE.join(", ")
    );
    let Some(crypto) = read_line(input, out, &prompt)? else {
        return Ok(false);
    };
    let crypto = crypto.to_lowercase();
    if !CONVERTIBLE.contains(&crypto.as_str()) {
        writeln!(out, "Invalid cryptocurrency. Please choose from the available options.")?;
        return Ok(true);
    }

    let Some(quantity) = read_positive_f64(input, out, &format!("Enter the quantity of {}: ", crypto))? else {
        return Ok(false);
    };

    let Some(mut fiat) = read_line(input, out, "Enter the fiat currency (e.g., USD, EUR, GBP): ")? else {
        return Ok(false);
    };
    while !prices.validate_fiat(&fiat).await {
        writeln!(out, "The fiat currency '{}' is not valid.", fiat)?;
        match read_line(input, out, "Please enter a valid fiat currency: ")? {
            Some(next) => fiat = next,
            None => return Ok(false),
        }
    }

    match prices.convert(&crypto, quantity, &fiat).await {
        Some(conversion) => {
            writeln!(
                out,
                "1 {} = {} {}",
                capitalize(&crypto),
                conversion.unit_price,
                conversion.currency
            )?;
            writeln!(out, "Total Value: {} {}", conversion.total, conversion.currency)?;
        }
        None => writeln!(out, "Invalid cryptocurrency or fiat currency. Please try again.")?,
    }
    Ok(true)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
