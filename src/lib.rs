//! ticker-bot - chat command responder for exchange price lookups

pub mod domain;
pub mod application;
pub mod infrastructure;
