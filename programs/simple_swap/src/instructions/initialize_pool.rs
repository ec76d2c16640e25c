//! Pool Construction
//!
//! Creates the pool account for a token pair, the LP share mint, and the
//! two reserve vaults. A pool is bound permanently to its pair; the PDA
//! derivation makes one pool per ordered pair.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::instructions::PoolError;
use crate::state::Pool;

/// Highest fee a pool may be created with (10%)
pub const MAX_FEE_BPS: u16 = 1_000;

/// Event emitted when a pool is created
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub fee_bps: u16,
}

/// Accounts for creating a new pool
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pool creator (pays for the accounts)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// First asset of the pair
    pub mint_a: InterfaceAccount<'info, Mint>,

    /// Second asset of the pair (must differ from the first)
    #[account(
        constraint = mint_b.key() != mint_a.key() @ PoolError::InvalidPair,
    )]
    pub mint_b: InterfaceAccount<'info, Mint>,

    /// The new pool account
    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Pool share mint (created, authority = pool)
    #[account(
        init,
        payer = creator,
        mint::decimals = 6,
        mint::authority = pool,
        seeds = [Pool::LP_MINT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// A-side reserve vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = mint_a,
        associated_token::authority = pool,
    )]
    pub vault_a: InterfaceAccount<'info, TokenAccount>,

    /// B-side reserve vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = mint_b,
        associated_token::authority = pool,
    )]
    pub vault_b: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializePool<'info> {
    pub fn initialize_pool(&mut self, fee_bps: u16, bumps: InitializePoolBumps) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, PoolError::InvalidFee);

        self.pool.set_inner(Pool {
            mint_a: self.mint_a.key(),
            mint_b: self.mint_b.key(),
            lp_mint: self.lp_mint.key(),
            vault_a: self.vault_a.key(),
            vault_b: self.vault_b.key(),
            reserve_a: 0,
            reserve_b: 0,
            lp_supply: 0,
            fee_bps,
            bump: bumps.pool,
            lp_mint_bump: bumps.lp_mint,
        });

        msg!("Pool created for pair {} / {}", self.mint_a.key(), self.mint_b.key());
        msg!("Fee: {} bps", fee_bps);

        emit!(PoolCreated {
            pool: self.pool.key(),
            creator: self.creator.key(),
            mint_a: self.mint_a.key(),
            mint_b: self.mint_b.key(),
            fee_bps,
        });

        Ok(())
    }
}
