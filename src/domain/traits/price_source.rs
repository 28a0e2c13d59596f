use crate::application::errors::PriceError;
use crate::domain::entities::{Price, TickerPrice};

/// Synchronous view of a price-ticker service
pub trait PriceSource: Send + Sync {
    /// Latest price of one symbol
    fn price(&self, symbol: &str) -> Result<Price, PriceError>;

    /// Rolling average price of one symbol
    fn average_price(&self, symbol: &str) -> Result<String, PriceError>;

    /// Every tradable symbol, in the order the service lists them
    fn all_tokens(&self) -> Result<Vec<String>, PriceError>;

    /// Latest price of every symbol
    fn all_prices(&self) -> Result<Vec<TickerPrice>, PriceError>;
}
