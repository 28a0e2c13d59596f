//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Binance: Price source over the Binance REST API
//! - Adapters: Platform integrations (console)

pub mod adapters;
pub mod binance;
pub mod config;
