//! Application layer - Command matching and response dispatch
//! 
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Messaging: Fragment chunking and the responder registry
//! - Responders: The concrete chat commands

pub mod errors;
pub mod messaging;
pub mod responders;
