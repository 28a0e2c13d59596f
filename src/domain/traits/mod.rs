//! Domain traits - Abstractions for responders, price data and transports

pub mod bot;
pub mod price_source;
pub mod responder;

pub use bot::{Bot, BotInfo};
pub use price_source::PriceSource;
pub use responder::Responder;
