//! Domain entities - Core value objects

pub mod command;
pub mod fragment;
pub mod message;
pub mod ticker;

pub use command::{CommandPattern, CommandTable};
pub use fragment::TextResponse;
pub use message::InboundMessage;
pub use ticker::{Price, TickerPrice};
