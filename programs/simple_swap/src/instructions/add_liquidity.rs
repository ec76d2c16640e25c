//! Provisioning
//!
//! Deposits a pair of assets and mints pool shares. The deposit amounts
//! are selected to preserve the current reserve ratio; the first deposit
//! sets the ratio and mints the geometric mean of the two amounts.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::curve;
use crate::instructions::{check_deadline, PoolError};
use crate::state::Pool;

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub recipient: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares_minted: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Amounts actually taken and shares minted, returned to the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
}

/// Accounts for adding liquidity
#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Liquidity provider (pays both deposits)
    #[account(mut)]
    pub provider: Signer<'info>,

    /// CHECK: receives the minted pool shares; only used as the authority
    /// of the share token account below
    pub recipient: UncheckedAccount<'info>,

    /// Pool being provisioned
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

    /// Provider's A-side token account
    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = provider,
    )]
    pub provider_token_a: InterfaceAccount<'info, TokenAccount>,

    /// Provider's B-side token account
    #[account(
        mut,
        associated_token::mint = mint_b,
        associated_token::authority = provider,
    )]
    pub provider_token_b: InterfaceAccount<'info, TokenAccount>,

    /// Recipient's pool share account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = lp_mint,
        associated_token::authority = recipient,
    )]
    pub recipient_lp: InterfaceAccount<'info, TokenAccount>,

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

impl<'info> AddLiquidity<'info> {
    pub fn add_liquidity(
        &mut self,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<LiquidityReceipt> {
        let clock = Clock::get()?;
        check_deadline(clock.unix_timestamp, deadline)?;

        require!(
            amount_a_desired > 0 && amount_b_desired > 0,
            PoolError::InvalidInput
        );

        // Select the accepted amounts and the shares they mint from the
        // current ledger snapshot
        let (amount_a, amount_b, shares) = if self.pool.lp_supply == 0 {
            // First deposit sets the pool price; amounts are taken as given
            let shares = curve::initial_shares(amount_a_desired, amount_b_desired)?;
            (amount_a_desired, amount_b_desired, shares)
        } else {
            let (amount_a, amount_b) = curve::optimal_deposit(
                amount_a_desired,
                amount_b_desired,
                self.pool.reserve_a,
                self.pool.reserve_b,
            )?;
            let shares = curve::shares_for_deposit(
                amount_a,
                amount_b,
                self.pool.reserve_a,
                self.pool.reserve_b,
                self.pool.lp_supply,
            )?;
            (amount_a, amount_b, shares)
        };

        require!(
            amount_a >= amount_a_min && amount_b >= amount_b_min,
            PoolError::SlippageExceeded
        );
        require!(shares > 0, PoolError::InvalidInput);

        // Pull both deposits into the vaults
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.provider_token_a.to_account_info(),
                    mint: self.mint_a.to_account_info(),
                    to: self.vault_a.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount_a,
            self.mint_a.decimals,
        )?;
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.provider_token_b.to_account_info(),
                    mint: self.mint_b.to_account_info(),
                    to: self.vault_b.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount_b,
            self.mint_b.decimals,
        )?;

        // Mint the shares to the recipient
        let pool_seeds = &[
            Pool::SEED,
            self.pool.mint_a.as_ref(),
            self.pool.mint_b.as_ref(),
            &[self.pool.bump],
        ];
        let signer_seeds = &[&pool_seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.recipient_lp.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            shares,
        )?;

        // Commit the ledger delta
        self.pool.reserve_a = self.pool.reserve_a.checked_add(amount_a).unwrap();
        self.pool.reserve_b = self.pool.reserve_b.checked_add(amount_b).unwrap();
        self.pool.lp_supply = self.pool.lp_supply.checked_add(shares).unwrap();

        emit!(LiquidityAdded {
            pool: self.pool.key(),
            provider: self.provider.key(),
            recipient: self.recipient.key(),
            amount_a,
            amount_b,
            shares_minted: shares,
            reserve_a: self.pool.reserve_a,
            reserve_b: self.pool.reserve_b,
            lp_supply: self.pool.lp_supply,
        });

        Ok(LiquidityReceipt {
            amount_a,
            amount_b,
            shares,
        })
    }
}
