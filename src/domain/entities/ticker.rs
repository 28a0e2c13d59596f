use serde::{Deserialize, Serialize};
use std::fmt;

/// Price returned for a single symbol lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(pub String);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the all-prices listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

impl TickerPrice {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }
}

impl fmt::Display for TickerPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.symbol, self.price)
    }
}
