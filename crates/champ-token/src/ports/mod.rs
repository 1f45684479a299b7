//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `ChampTokenApi`
//! - **Driven Ports (Outbound)**: `Exchange`, `SettlementAsset`
//!
//! No concrete implementations in this module.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
