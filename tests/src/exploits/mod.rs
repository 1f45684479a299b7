//! # Exploit Simulations
//!
//! Attacks against voucher redemption and settlement custody.
//!
//! | Attack | Module | Defence |
//! |--------|--------|---------|
//! | Voucher replay | `voucher_attacks` | per-recipient nonce |
//! | Field tampering / recipient swap | `voucher_attacks` | signature over every field |
//! | Signature malleability (high-S) | `voucher_attacks` | low-S enforcement |
//! | Raw-hash signature (no message prefix) | `voucher_attacks` | prefixed digest |
//! | Voucher draining reflection funds | `custody` | free-reserve accounting |
//! | Custody hijack | `custody` | holder ownership checks |

pub mod custody;
