//! Domain layer - Core types and the abstractions infrastructure plugs into
//! 
//! This layer contains:
//! - Entities: Fragments, inbound messages, command patterns, ticker prices
//! - Traits: Responder, PriceSource and the Bot transport

pub mod entities;
pub mod traits;
