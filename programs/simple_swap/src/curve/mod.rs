//! # Constant-Product Curve
//!
//! Pure pricing and share-accounting math for the two-asset pool.
//!
//! Everything in here is deterministic integer arithmetic over a reserve
//! snapshot. The instruction handlers own the accounts and the token CPIs;
//! this module owns the invariants:
//!
//! ```text
//!            reserve_a × reserve_b = k
//!
//!   Swaps keep k non-decreasing (the fee accrues to reserves).
//!   Deposits and withdrawals scale k proportionally.
//! ```
//!
//! Every division rounds down, so rounding error always favors the pool.

pub mod constant_product;

pub use constant_product::*;
