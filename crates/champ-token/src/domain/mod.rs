//! # Domain Layer
//!
//! Pure ledger logic: no collaborators, no logging.

pub mod entities;
pub mod invariants;
pub mod pause;
pub mod reflection;
pub mod tax;
pub mod voucher;

pub use entities::*;
pub use invariants::{check_conservation, check_reflectable_supply, InvariantViolation};
pub use pause::{PauseConfig, PauseGate, PauseState};
pub use reflection::{Accrual, ReflectionPool, REWARD_SCALE};
pub use tax::{
    classify, compute_tax, NonVenuePolicy, TaxBreakdown, TaxSchedule, TransferDirection,
    MAX_TAX_PERCENT,
};
pub use voucher::Voucher;
