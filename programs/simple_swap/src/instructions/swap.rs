//! Exchange
//!
//! Trades an exact input of one pool asset for the other at the
//! constant-product price. The fee stays in the input-side reserve, so
//! every successful swap leaves `reserve_a × reserve_b` at least as
//! large as before.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::curve;
use crate::instructions::{check_deadline, PoolError};
use crate::state::Pool;

/// Event emitted when a swap executes
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub recipient: Pubkey,
    pub mint_in: Pubkey,
    pub mint_out: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Accounts for a swap
#[derive(Accounts)]
pub struct Swap<'info> {
    /// Trader supplying the input asset
    #[account(mut)]
    pub trader: Signer<'info>,

    /// CHECK: receives the output asset; only used as the authority of
    /// the destination token account below
    pub recipient: UncheckedAccount<'info>,

    /// Pool being traded against
    #[account(
        mut,
        seeds = [Pool::SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Input asset mint (must be one side of the pair)
    #[account(
        constraint = mint_in.key() == pool.mint_a || mint_in.key() == pool.mint_b
            @ PoolError::InvalidPath,
    )]
    pub mint_in: InterfaceAccount<'info, Mint>,

    /// Output asset mint (the other side of the pair)
    #[account(
        constraint = mint_out.key() == pool.mint_a || mint_out.key() == pool.mint_b
            @ PoolError::InvalidPath,
        constraint = mint_out.key() != mint_in.key() @ PoolError::InvalidPath,
    )]
    pub mint_out: InterfaceAccount<'info, Mint>,

    /// Trader's input token account
    #[account(
        mut,
        associated_token::mint = mint_in,
        associated_token::authority = trader,
    )]
    pub trader_token_in: InterfaceAccount<'info, TokenAccount>,

    /// Recipient's output token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint_out,
        associated_token::authority = recipient,
    )]
    pub recipient_token_out: InterfaceAccount<'info, TokenAccount>,

    /// Vault on the input side
    #[account(
        mut,
        constraint = vault_in.key() == pool.vault_a || vault_in.key() == pool.vault_b
            @ PoolError::InvalidPair,
        constraint = vault_in.mint == mint_in.key() @ PoolError::InvalidPair,
    )]
    pub vault_in: InterfaceAccount<'info, TokenAccount>,

    /// Vault on the output side
    #[account(
        mut,
        constraint = vault_out.key() == pool.vault_a || vault_out.key() == pool.vault_b
            @ PoolError::InvalidPair,
        constraint = vault_out.mint == mint_out.key() @ PoolError::InvalidPair,
    )]
    pub vault_out: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Swap<'info> {
    pub fn swap_exact_in(
        &mut self,
        amount_in: u64,
        amount_out_min: u64,
        path: Vec<Pubkey>,
        deadline: i64,
    ) -> Result<u64> {
        let clock = Clock::get()?;
        check_deadline(clock.unix_timestamp, deadline)?;

        let a_to_b = self.pool.swap_direction(&path)?;
        // The bound accounts must agree with the requested direction
        require!(self.mint_in.key() == path[0], PoolError::InvalidPath);
        require!(self.mint_out.key() == path[1], PoolError::InvalidPath);

        let (reserve_in, reserve_out) = self.pool.reserves_for(a_to_b);
        require!(amount_in > 0, PoolError::InvalidInput);
        require!(reserve_in > 0 && reserve_out > 0, PoolError::InvalidInput);

        let amount_out =
            curve::quote_output(amount_in, reserve_in, reserve_out, self.pool.fee_bps)?;

        require!(amount_out >= amount_out_min, PoolError::SlippageExceeded);

        // Pull the input into the pool
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_token_in.to_account_info(),
                    mint: self.mint_in.to_account_info(),
                    to: self.vault_in.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount_in,
            self.mint_in.decimals,
        )?;

        // Pay the output to the recipient
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
                    from: self.vault_out.to_account_info(),
                    mint: self.mint_out.to_account_info(),
                    to: self.recipient_token_out.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount_out,
            self.mint_out.decimals,
        )?;

        // Commit the reserve delta for the executed direction
        if a_to_b {
            self.pool.reserve_a = self.pool.reserve_a.checked_add(amount_in).unwrap();
            self.pool.reserve_b = self.pool.reserve_b.checked_sub(amount_out).unwrap();
        } else {
            self.pool.reserve_b = self.pool.reserve_b.checked_add(amount_in).unwrap();
            self.pool.reserve_a = self.pool.reserve_a.checked_sub(amount_out).unwrap();
        }

        emit!(SwapExecuted {
            pool: self.pool.key(),
            trader: self.trader.key(),
            recipient: self.recipient.key(),
            mint_in: self.mint_in.key(),
            mint_out: self.mint_out.key(),
            amount_in,
            amount_out,
            reserve_a: self.pool.reserve_a,
            reserve_b: self.pool.reserve_b,
            lp_supply: self.pool.lp_supply,
        });

        Ok(amount_out)
    }
}
