//! Message handling - Routing inbound text to responders

pub mod chunker;
pub mod dispatcher;

pub use chunker::split_into_chunks;
pub use dispatcher::{Delivery, DispatchReport, ResponderRegistry};
