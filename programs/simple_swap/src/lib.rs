//! # Simple Swap: Two-Asset Constant-Product Pool
//!
//! A self-contained automated liquidity pool on Solana.
//!
//! ## Overview
//!
//! Each pool pairs two SPL token mints and lets anyone:
//! - deposit both assets for a proportional claim token (the pool share),
//! - redeem pool shares for the proportional underlying amounts,
//! - swap one asset for the other at a price set by the pool's own
//!   reserves under the constant-product rule.
//!
//! ## How it works
//! - The `Pool` PDA owns the two reserve vaults and the share mint, and
//!   is the only writer of its reserve/supply figures.
//! - Pricing and share accounting live in the pure `curve` module; the
//!   instruction handlers only move tokens and commit the ledger delta.
//! - A 0.3% default fee stays in the reserves, so the reserve product
//!   never decreases across a swap.

use anchor_lang::prelude::*;

pub mod curve;
pub mod instructions;
pub mod state;

pub use curve::*;
pub use instructions::*;

// Replace with your deployed program ID
declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Main swap program
#[program]
pub mod simple_swap {
    use super::*;

    /// Create a pool bound to a token pair (once per pair)
    pub fn initialize_pool(ctx: Context<InitializePool>, fee_bps: u16) -> Result<()> {
        ctx.accounts.initialize_pool(fee_bps, ctx.bumps)
    }

    /// Deposit both assets and mint pool shares to the recipient
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<LiquidityReceipt> {
        ctx.accounts.add_liquidity(
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            deadline,
        )
    }

    /// Burn pool shares and withdraw the proportional underlying assets
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        shares: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<()> {
        ctx.accounts
            .remove_liquidity(shares, amount_a_min, amount_b_min, deadline)
    }

    /// Swap an exact input of one pool asset for the other
    pub fn swap_exact_in(
        ctx: Context<Swap>,
        amount_in: u64,
        amount_out_min: u64,
        path: Vec<Pubkey>,
        deadline: i64,
    ) -> Result<u64> {
        ctx.accounts
            .swap_exact_in(amount_in, amount_out_min, path, deadline)
    }

    /// Spot price of `asset_x` in `asset_y`, fixed-point 1e18 (read-only)
    pub fn spot_price(ctx: Context<Quote>, asset_x: Pubkey, asset_y: Pubkey) -> Result<u128> {
        ctx.accounts.spot_price(asset_x, asset_y)
    }

    /// Output a swap of `amount_in` along `path` would produce (read-only)
    pub fn quote_output(ctx: Context<Quote>, amount_in: u64, path: Vec<Pubkey>) -> Result<u64> {
        ctx.accounts.quote_output(amount_in, path)
    }
}
