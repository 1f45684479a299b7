//! # Integration Tests
//!
//! Whole-ledger behaviour through the public entry points, with the
//! in-memory exchange and settlement asset.

pub mod pause;
pub mod properties;
pub mod reflections;
pub mod scenarios;
