use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{Result, ScrapeError};
use crate::models::Conversion;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Read-only client for the CoinGecko simple-price endpoints.
///
/// Nothing is cached: every call goes to the network.
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Lower-case fiat and crypto codes prices can be quoted in.
    pub async fn supported_currencies(&self) -> Result<Vec<String>> {
        let url = format!("{}/simple/supported_vs_currencies", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Vec<String>>().await?)
    }

    /// Whether `code` is a supported quote currency. Any failure to fetch the
    /// list counts as "not supported".
    pub async fn validate_fiat(&self, code: &str) -> bool {
        match self.supported_currencies().await {
            Ok(supported) => {
                let code = code.trim();
                supported.iter().any(|c| c.eq_ignore_ascii_case(code))
            }
            Err(e) => {
                warn!("Error checking fiat currency '{}': {}", code, e);
                false
            }
        }
    }

    /// Prices `quantity` units of `crypto_id` in `fiat_code`.
    ///
    /// `None` covers both "the API does not know this pairing" and any
    /// transport or decoding failure; the caller cannot tell them apart.
    pub async fn convert(&self, crypto_id: &str, quantity: f64, fiat_code: &str) -> Option<Conversion> {
        if quantity.is_nan() || quantity <= 0.0 {
            warn!("Refusing to convert non-positive quantity {}", quantity);
            return None;
        }
        match self.try_convert(crypto_id, quantity, fiat_code).await {
            Ok(conversion) => conversion,
            Err(e) => {
                error!("An error occurred during conversion: {}", e);
                None
            }
        }
    }

    pub async fn try_convert(
        &self,
        crypto_id: &str,
        quantity: f64,
        fiat_code: &str,
    ) -> Result<Option<Conversion>> {
        let id = crypto_id.trim().to_lowercase();
        let fiat = fiat_code.trim().to_lowercase();

        let url = format!("{}/simple/price", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("ids", id.as_str()), ("vs_currencies", fiat.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let prices: HashMap<String, HashMap<String, Value>> = response.json().await?;
        let Some(unit_price) = prices
            .get(&id)
            .and_then(|quotes| quotes.get(&fiat))
            .and_then(Value::as_f64)
        else {
            info!("No {} price for '{}'", fiat, id);
            return Ok(None);
        };

        Ok(Some(Conversion {
            unit_price,
            total: unit_price * quantity,
            currency: fiat,
        }))
    }
}
