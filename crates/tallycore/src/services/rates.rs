//! USD/EUR → RUB exchange rates from exchangerate-api.com

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Rubles per one unit of foreign currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub usd_rub: f64,
    pub eur_rub: f64,
}

/// Source of the current rate quote.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest(&self) -> AppResult<RateQuote>;
}

/// USD-based rate table as returned by the `latest/USD` endpoint
#[derive(Debug, Deserialize)]
struct RateTable {
    conversion_rates: HashMap<String, f64>,
}

impl RateTable {
    fn rate(&self, currency: &str) -> AppResult<f64> {
        match self.conversion_rates.get(currency) {
            Some(&rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            Some(rate) => Err(AppError::MalformedRates(format!("{} rate is {}", currency, rate))),
            None => Err(AppError::MalformedRates(format!("{} rate is missing", currency))),
        }
    }

    fn quote(&self) -> AppResult<RateQuote> {
        let usd_rub = self.rate("RUB")?;
        // The table is per USD, so EUR→RUB is RUB-per-USD over EUR-per-USD
        let usd_eur = self.rate("EUR")?;
        Ok(RateQuote {
            usd_rub,
            eur_rub: usd_rub / usd_eur,
        })
    }
}

/// HTTP client for the exchangerate-api v6 endpoint
pub struct ExchangeRateApi {
    client: reqwest::Client,
    url: Option<String>,
}

impl ExchangeRateApi {
    /// `url` of `None` makes every lookup fail with `AppError::Config`.
    pub fn new(url: Option<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self { client, url })
    }

    /// Endpoint taken from `EXCHANGE_RATE_URL` / `EXCHANGE_RATE_API_KEY`
    pub fn from_config() -> AppResult<Self> {
        if config::EXCHANGE_RATE_URL.is_none() {
            log::warn!("Exchange rates disabled: set EXCHANGE_RATE_API_KEY or EXCHANGE_RATE_URL");
        }
        Self::new(config::EXCHANGE_RATE_URL.clone())
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn latest(&self) -> AppResult<RateQuote> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::Config("exchange rate endpoint is not configured".to_string()))?;

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::HttpStatus(resp.status()));
        }

        let table: RateTable = resp.json().await?;
        table.quote()
    }
}
