//! # Shared Types
//!
//! Value objects used across the CHAMP ledger workspace.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `value_objects` | `Address`, `Hash`, `Timestamp`, `U256` |
//! | `hashing` | Keccak-256 helpers |
//! | `abi` | 32-byte word codec for signed messages |
//! | `errors` | `AbiError` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod errors;
pub mod hashing;
pub mod value_objects;

pub use errors::AbiError;
pub use hashing::{keccak256, keccak256_concat};
pub use value_objects::{Address, Hash, Timestamp, U256};
