//! Withdrawal
//!
//! Burns pool shares and pays out the proportional underlying amounts.
//! Shares are burned before the vaults pay out, so an in-flight
//! withdrawal can never be redeemed twice against a stale supply.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::curve;
use crate::instructions::{check_deadline, check_share_balance, PoolError};
use crate::state::Pool;

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub recipient: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares_burned: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Accounts for removing liquidity
#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    /// Share holder withdrawing
    #[account(mut)]
    pub provider: Signer<'info>,

    /// CHECK: receives the underlying assets; only used as the authority
    /// of the destination token accounts below
    pub recipient: UncheckedAccount<'info>,

    /// Pool being withdrawn from
    #[account(
        mut,
        seeds = [Pool::SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// A-side asset mint
    #[account(
        constraint = mint_a.key() == pool.mint_a @ PoolError::InvalidPair,
    )]
    pub mint_a: InterfaceAccount<'info, Mint>,

    /// B-side asset mint
    #[account(
        constraint = mint_b.key() == pool.mint_b @ PoolError::InvalidPair,
    )]
    pub mint_b: InterfaceAccount<'info, Mint>,

    /// Pool share mint
    #[account(
        mut,
        constraint = lp_mint.key() == pool.lp_mint @ PoolError::InvalidPair,
    )]
    pub lp_mint: InterfaceAccount<'info, Mint>,

    /// Provider's pool share account (burn source)
    #[account(
        mut,
        associated_token::mint = lp_mint,
        associated_token::authority = provider,
    )]
    pub provider_lp: InterfaceAccount<'info, TokenAccount>,

    /// Recipient's A-side token account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = mint_a,
        associated_token::authority = recipient,
    )]
    pub recipient_token_a: InterfaceAccount<'info, TokenAccount>,

    /// Recipient's B-side token account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = mint_b,
        associated_token::authority = recipient,
    )]
    pub recipient_token_b: InterfaceAccount<'info, TokenAccount>,

    /// A-side reserve vault
    #[account(
        mut,
        constraint = vault_a.key() == pool.vault_a @ PoolError::InvalidPair,
    )]
    pub vault_a: InterfaceAccount<'info, TokenAccount>,

    /// B-side reserve vault
    #[account(
        mut,
        constraint = vault_b.key() == pool.vault_b @ PoolError::InvalidPair,
    )]
    pub vault_b: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> RemoveLiquidity<'info> {
    pub fn remove_liquidity(
        &mut self,
        shares: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<()> {
        let clock = Clock::get()?;
        check_deadline(clock.unix_timestamp, deadline)?;

        check_share_balance(shares, self.provider_lp.amount)?;

        let (amount_a, amount_b) = curve::withdrawal_amounts(
            shares,
            self.pool.reserve_a,
            self.pool.reserve_b,
            self.pool.lp_supply,
        )?;

        require!(
            amount_a >= amount_a_min && amount_b >= amount_b_min,
            PoolError::SlippageExceeded
        );

        // Burn first: the supply figure the payout was computed from is
        // gone before any asset leaves the vaults
        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.provider_lp.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            shares,
        )?;
        self.pool.lp_supply = self.pool.lp_supply.checked_sub(shares).unwrap();

        // Pay out both sides from the vaults
        let pool_seeds = &[
            Pool::SEED,
            self.pool.mint_a.as_ref(),
            self.pool.mint_b.as_ref(),
            &[self.pool.bump],
        ];
        let signer_seeds = &[&pool_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault_a.to_account_info(),
                    mint: self.mint_a.to_account_info(),
                    to: self.recipient_token_a.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount_a,
            self.mint_a.decimals,
        )?;
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault_b.to_account_info(),
                    mint: self.mint_b.to_account_info(),
                    to: self.recipient_token_b.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount_b,
            self.mint_b.decimals,
        )?;

        self.pool.reserve_a = self.pool.reserve_a.checked_sub(amount_a).unwrap();
        self.pool.reserve_b = self.pool.reserve_b.checked_sub(amount_b).unwrap();

        emit!(LiquidityRemoved {
            pool: self.pool.key(),
            provider: self.provider.key(),
            recipient: self.recipient.key(),
            amount_a,
            amount_b,
            shares_burned: shares,
            reserve_a: self.pool.reserve_a,
            reserve_b: self.pool.reserve_b,
            lp_supply: self.pool.lp_supply,
        });

        Ok(())
    }
}
