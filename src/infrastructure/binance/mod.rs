//! Binance public REST API as a price source

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::application::errors::PriceError;
use crate::domain::entities::{Price, TickerPrice};
use crate::domain::traits::PriceSource;
use crate::infrastructure::config::BinanceConfig;

/// Binance error code for an unknown symbol
const INVALID_SYMBOL: i64 = -1121;

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

#[derive(Debug, Deserialize)]
struct AveragePrice {
    price: String,
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
}

/// Blocking client for the Binance spot market endpoints
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(config: &BinanceConfig) -> Result<Self, PriceError> {
        let client = Client::builder()
            .user_agent(concat!("ticker-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PriceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get<D: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<D, PriceError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| PriceError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response.text()
            .map_err(|e| PriceError::Network(e.to_string()))?;

        decode(status, &body, query.first().map(|(_, v)| *v))
    }
}

/// Turn a raw response into `D` or the matching `PriceError`
fn decode<D: DeserializeOwned>(status: StatusCode, body: &str, symbol: Option<&str>) -> Result<D, PriceError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ApiError>(body) {
            Ok(err) if err.code == INVALID_SYMBOL => {
                PriceError::NotFound(symbol.unwrap_or_default().to_string())
            }
            Ok(err) => PriceError::Unavailable(err.msg),
            Err(_) => PriceError::Unavailable(format!("HTTP error: {}", status)),
        });
    }

    serde_json::from_str(body).map_err(|e| PriceError::Malformed(e.to_string()))
}

impl PriceSource for BinanceClient {
    fn price(&self, symbol: &str) -> Result<Price, PriceError> {
        let ticker: TickerPrice = self.get("/api/v3/ticker/price", &[("symbol", symbol)])?;
        Ok(Price(ticker.price))
    }

    fn average_price(&self, symbol: &str) -> Result<String, PriceError> {
        let avg: AveragePrice = self.get("/api/v3/avgPrice", &[("symbol", symbol)])?;
        Ok(avg.price)
    }

    fn all_tokens(&self) -> Result<Vec<String>, PriceError> {
        let info: ExchangeInfo = self.get("/api/v3/exchangeInfo", &[])?;
        Ok(info.symbols.into_iter().map(|s| s.symbol).collect())
    }

    fn all_prices(&self) -> Result<Vec<TickerPrice>, PriceError> {
        self.get("/api/v3/ticker/price", &[])
    }
}
