//! Chat command responders

pub mod help;
pub mod ticker;

pub use help::HelpResponder;
pub use ticker::TickerResponder;
