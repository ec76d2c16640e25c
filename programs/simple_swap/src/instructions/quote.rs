//! Quoting
//!
//! Read-only pricing entry points over the pool ledger. Neither mutates
//! state and neither takes a deadline. `quote_output` runs the exact
//! formula `swap_exact_in` executes, against the live reserves and fee,
//! so a pre-trade estimate and the trade itself can never disagree.

use anchor_lang::prelude::*;

use crate::curve;
use crate::state::Pool;

/// Accounts for the read-only quote instructions
#[derive(Accounts)]
pub struct Quote<'info> {
    /// Pool being quoted
    #[account(
        seeds = [Pool::SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> Quote<'info> {
    /// Marginal price of `asset_x` in units of `asset_y`, fixed-point
    /// with [`curve::PRICE_SCALE`]
    ///
    /// The two assets must be the configured pair, in either order.
    pub fn spot_price(&self, asset_x: Pubkey, asset_y: Pubkey) -> Result<u128> {
        let x_is_a = self.pool.price_direction(&asset_x, &asset_y)?;
        let (reserve_in, reserve_out) = self.pool.reserves_for(x_is_a);
        curve::spot_price(reserve_in, reserve_out)
    }

    /// Output amount an exact-input swap along `path` would produce now
    pub fn quote_output(&self, amount_in: u64, path: Vec<Pubkey>) -> Result<u64> {
        let a_to_b = self.pool.swap_direction(&path)?;
        let (reserve_in, reserve_out) = self.pool.reserves_for(a_to_b);
        curve::quote_output(amount_in, reserve_in, reserve_out, self.pool.fee_bps)
    }
}
