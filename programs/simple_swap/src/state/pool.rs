//! Pool Ledger
//!
//! One account per asset pair. The pool is bound permanently to its two
//! token mints at creation and is the single writer of its reserve and
//! share-supply figures; all mutation flows through the instruction
//! handlers within one transaction each.

use anchor_lang::prelude::*;

use crate::instructions::PoolError;

/// Liquidity pool account
///
/// Seeds: ["pool", mint_a, mint_b]
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// First configured asset mint (creation order, immutable)
    pub mint_a: Pubkey,

    /// Second configured asset mint (creation order, immutable)
    pub mint_b: Pubkey,

    /// Pool share (LP) mint, authority = this pool PDA
    pub lp_mint: Pubkey,

    /// Vault token account holding the A-side reserves
    pub vault_a: Pubkey,

    /// Vault token account holding the B-side reserves
    pub vault_b: Pubkey,

    /// Current A-side reserve quantity
    pub reserve_a: u64,

    /// Current B-side reserve quantity
    pub reserve_b: u64,

    /// Outstanding pool-share supply, kept in lockstep with the LP mint
    pub lp_supply: u64,

    /// Swap fee in basis points (30 = 0.3%)
    pub fee_bps: u16,

    /// PDA bump seed
    pub bump: u8,

    /// LP mint PDA bump seed
    pub lp_mint_bump: u8,
}

impl Pool {
    pub const SEED: &'static [u8] = b"pool";
    pub const LP_MINT_SEED: &'static [u8] = b"lp_mint";

    /// Whether `(x, y)` is the configured pair, in either order
    pub fn is_pair(&self, x: &Pubkey, y: &Pubkey) -> bool {
        (*x == self.mint_a && *y == self.mint_b) || (*x == self.mint_b && *y == self.mint_a)
    }

    /// Validate a pricing pair and resolve its direction
    ///
    /// `(x, y)` must be the configured pair in either order. Returns
    /// `true` when `x` is the A side.
    pub fn price_direction(&self, x: &Pubkey, y: &Pubkey) -> Result<bool> {
        require!(self.is_pair(x, y), PoolError::InvalidPair);
        Ok(*x == self.mint_a)
    }

    /// Validate a swap path and resolve its direction
    ///
    /// The path must be exactly two distinct entries drawn from the
    /// configured pair. Returns `true` for A→B, `false` for B→A.
    pub fn swap_direction(&self, path: &[Pubkey]) -> Result<bool> {
        require!(path.len() == 2, PoolError::InvalidPath);
        require!(self.is_pair(&path[0], &path[1]), PoolError::InvalidPath);
        Ok(path[0] == self.mint_a)
    }

    /// Reserves of the input and output side for a swap direction
    pub fn reserves_for(&self, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pool() -> Pool {
        Pool {
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            vault_a: Pubkey::new_unique(),
            vault_b: Pubkey::new_unique(),
            reserve_a: 1000,
            reserve_b: 500,
            lp_supply: 700,
            fee_bps: 30,
            bump: 255,
            lp_mint_bump: 254,
        }
    }

    #[test]
    fn pair_check_is_order_insensitive() {
        let pool = test_pool();
        assert!(pool.is_pair(&pool.mint_a, &pool.mint_b));
        assert!(pool.is_pair(&pool.mint_b, &pool.mint_a));
        assert!(!pool.is_pair(&pool.mint_a, &pool.mint_a));
        assert!(!pool.is_pair(&pool.mint_a, &Pubkey::new_unique()));
    }

    #[test]
    fn price_direction_resolves_both_ways() {
        let pool = test_pool();
        assert!(pool.price_direction(&pool.mint_a, &pool.mint_b).unwrap());
        assert!(!pool.price_direction(&pool.mint_b, &pool.mint_a).unwrap());
    }

    #[test]
    fn price_direction_rejects_foreign_pair_as_invalid_pair() {
        let pool = test_pool();
        let stranger = Pubkey::new_unique();
        let err = pool
            .price_direction(&pool.mint_a, &stranger)
            .unwrap_err();
        assert_eq!(err, PoolError::InvalidPair.into());
        let err = pool
            .price_direction(&pool.mint_a, &pool.mint_a)
            .unwrap_err();
        assert_eq!(err, PoolError::InvalidPair.into());
    }

    #[test]
    fn swap_direction_resolves_both_ways() {
        let pool = test_pool();
        assert!(pool.swap_direction(&[pool.mint_a, pool.mint_b]).unwrap());
        assert!(!pool.swap_direction(&[pool.mint_b, pool.mint_a]).unwrap());
    }

    #[test]
    fn swap_direction_rejects_short_and_long_paths() {
        let pool = test_pool();
        assert!(pool.swap_direction(&[pool.mint_a]).is_err());
        assert!(pool
            .swap_direction(&[pool.mint_a, pool.mint_b, pool.mint_a])
            .is_err());
        assert!(pool.swap_direction(&[]).is_err());
    }

    #[test]
    fn swap_direction_rejects_foreign_and_degenerate_paths() {
        let pool = test_pool();
        let stranger = Pubkey::new_unique();
        let err = pool.swap_direction(&[stranger, pool.mint_b]).unwrap_err();
        assert_eq!(err, PoolError::InvalidPath.into());
        assert!(pool.swap_direction(&[pool.mint_a, stranger]).is_err());
        assert!(pool.swap_direction(&[pool.mint_a, pool.mint_a]).is_err());
    }

    #[test]
    fn reserves_follow_direction() {
        let pool = test_pool();
        assert_eq!(pool.reserves_for(true), (1000, 500));
        assert_eq!(pool.reserves_for(false), (500, 1000));
    }
}
