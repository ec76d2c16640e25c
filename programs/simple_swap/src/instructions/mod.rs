//! Instruction handlers for the swap program
//!
//! Each instruction is one externally triggered pool operation:
//! - `initialize_pool` - Bind a new pool to a token pair (once per pair)
//! - `add_liquidity` - Deposit both assets, mint pool shares
//! - `remove_liquidity` - Burn pool shares, withdraw both assets
//! - `swap` - Trade one asset for the other at the constant-product price
//! - `quote` - Read-only spot price and swap-output estimation

pub mod add_liquidity;
pub mod initialize_pool;
pub mod quote;
pub mod remove_liquidity;
pub mod swap;

pub use add_liquidity::*;
pub use initialize_pool::*;
pub use quote::*;
pub use remove_liquidity::*;
pub use swap::*;

use anchor_lang::prelude::*;

/// Errors shared by the pool operations
///
/// Every failure is terminal to its own call; the transaction rolls back
/// and no partial ledger update survives.
#[error_code]
pub enum PoolError {
    #[msg("Deadline has passed")]
    Expired,
    #[msg("Token accounts do not match the pool's configured pair")]
    InvalidPair,
    #[msg("Swap path must be the configured pair in either direction")]
    InvalidPath,
    #[msg("Amounts must be positive and reserves non-empty")]
    InvalidInput,
    #[msg("Output below caller-supplied minimum")]
    SlippageExceeded,
    #[msg("Withdrawal exceeds caller's share balance")]
    InsufficientShares,
    #[msg("Fee exceeds the allowed maximum")]
    InvalidFee,
}

/// Deadline pre-check shared by every mutating operation
///
/// Deadlines are absolute unix timestamps; execution past the deadline
/// fails before any state is read for the computation.
pub fn check_deadline(now: i64, deadline: i64) -> Result<()> {
    require!(now <= deadline, PoolError::Expired);
    Ok(())
}

/// Share-balance pre-check for withdrawals
///
/// A withdrawal must be positive and covered by the caller's share
/// balance; both are rejected before any ledger state is touched.
pub fn check_share_balance(requested: u64, held: u64) -> Result<()> {
    require!(requested > 0, PoolError::InvalidInput);
    require!(requested <= held, PoolError::InsufficientShares);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_in_future_passes() {
        assert!(check_deadline(1_700_000_000, 1_700_000_600).is_ok());
        assert!(check_deadline(1_700_000_000, 1_700_000_000).is_ok());
    }

    #[test]
    fn deadline_in_past_expires() {
        // 10 seconds late
        assert!(check_deadline(1_700_000_010, 1_700_000_000).is_err());
    }

    #[test]
    fn withdrawal_within_balance_passes() {
        assert!(check_share_balance(1, 1000).is_ok());
        assert!(check_share_balance(1000, 1000).is_ok());
    }

    #[test]
    fn withdrawal_beyond_balance_is_insufficient_shares() {
        let err = check_share_balance(1001, 1000).unwrap_err();
        assert_eq!(err, PoolError::InsufficientShares.into());
        let err = check_share_balance(1, 0).unwrap_err();
        assert_eq!(err, PoolError::InsufficientShares.into());
    }

    #[test]
    fn zero_share_withdrawal_is_invalid_input() {
        let err = check_share_balance(0, 1000).unwrap_err();
        assert_eq!(err, PoolError::InvalidInput.into());
    }
}
