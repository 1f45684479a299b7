//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports, used by tests and
//! simulations.

pub mod exchange;
pub mod settlement_asset;

pub use exchange::ConstantProductExchange;
pub use settlement_asset::InMemorySettlementAsset;
