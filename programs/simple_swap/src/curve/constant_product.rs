//! Constant-product pricing and proportional share accounting.
//!
//! ## Share minting
//!
//! ```text
//! first deposit:  shares = ⌊√(amount_a × amount_b)⌋
//! later deposits: shares = min(amount_a × supply / reserve_a,
//!                              amount_b × supply / reserve_b)
//! ```
//!
//! ## Swap output
//!
//! ```text
//! in_with_fee = amount_in × (10000 − fee_bps)
//! amount_out  = reserve_out × in_with_fee
//!               ─────────────────────────────────
//!               reserve_in × 10000 + in_with_fee
//! ```
//!
//! All intermediates are u128 so u64 reserve/amount pairs cannot overflow
//! a multiplication.

use anchor_lang::prelude::*;

/// Errors produced by the pure curve math
#[error_code]
pub enum CurveError {
    #[msg("Amounts must be positive")]
    InvalidInput,
    #[msg("Pool has no reserves")]
    EmptyPool,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Fee denominator: fees are expressed in basis points
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Fixed-point scale for spot prices (1e18, matching 18-decimal pricing)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Integer square root by Newton's method
///
/// Computes floor(√x); converges quadratically.
pub fn integer_sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }
    let mut z = (x + 1) / 2;
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }
    y
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(CurveError::Overflow))
}

/// Shares minted by the very first deposit: ⌊√(a × b)⌋
///
/// The first depositor sets the pool price; both amounts must be positive
/// or the pool would open with a zero reserve on one side.
pub fn initial_shares(amount_a: u64, amount_b: u64) -> Result<u64> {
    require!(amount_a > 0 && amount_b > 0, CurveError::InvalidInput);
    let product = (amount_a as u128)
        .checked_mul(amount_b as u128)
        .ok_or(CurveError::Overflow)?;
    let shares = integer_sqrt(product);
    require!(shares > 0, CurveError::InvalidInput);
    to_u64(shares)
}

/// Ratio-preserving amount selection for a non-first deposit
///
/// Given what the caller is willing to supply, picks the largest pair at
/// the current reserve ratio that stays within both desired amounts:
/// try `b_optimal = a_desired × reserve_b / reserve_a` first, fall back to
/// scaling down the A side. The unused remainder of a desired amount is
/// never pulled from the caller.
pub fn optimal_deposit(
    amount_a_desired: u64,
    amount_b_desired: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<(u64, u64)> {
    require!(
        amount_a_desired > 0 && amount_b_desired > 0,
        CurveError::InvalidInput
    );
    require!(reserve_a > 0 && reserve_b > 0, CurveError::EmptyPool);

    let b_optimal = (amount_a_desired as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(CurveError::Overflow)?
        / reserve_a as u128;

    if b_optimal <= amount_b_desired as u128 {
        return Ok((amount_a_desired, to_u64(b_optimal)?));
    }

    let a_optimal = (amount_b_desired as u128)
        .checked_mul(reserve_a as u128)
        .ok_or(CurveError::Overflow)?
        / reserve_b as u128;
    // b_optimal > b_desired implies a_optimal <= a_desired at the same ratio
    Ok((to_u64(a_optimal)?, amount_b_desired))
}

/// Shares minted for a deposit into a seeded pool
///
/// `min(amount_a × supply / reserve_a, amount_b × supply / reserve_b)`,
/// floor-rounded so a depositor can never mint more than their
/// proportional claim.
pub fn shares_for_deposit(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    supply: u64,
) -> Result<u64> {
    require!(reserve_a > 0 && reserve_b > 0, CurveError::EmptyPool);
    require!(supply > 0, CurveError::EmptyPool);

    let by_a = (amount_a as u128)
        .checked_mul(supply as u128)
        .ok_or(CurveError::Overflow)?
        / reserve_a as u128;
    let by_b = (amount_b as u128)
        .checked_mul(supply as u128)
        .ok_or(CurveError::Overflow)?
        / reserve_b as u128;

    to_u64(by_a.min(by_b))
}

/// Underlying amounts owed for burning `shares` pool shares
///
/// Proportional floor payout: `shares × reserve / supply` per side.
/// Burning the entire supply returns both reserves exactly, so the pool
/// can only return to the empty state with supply and reserves at zero
/// together.
pub fn withdrawal_amounts(
    shares: u64,
    reserve_a: u64,
    reserve_b: u64,
    supply: u64,
) -> Result<(u64, u64)> {
    require!(shares > 0, CurveError::InvalidInput);
    require!(supply > 0, CurveError::EmptyPool);

    let amount_a = (shares as u128)
        .checked_mul(reserve_a as u128)
        .ok_or(CurveError::Overflow)?
        / supply as u128;
    let amount_b = (shares as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(CurveError::Overflow)?
        / supply as u128;

    Ok((to_u64(amount_a)?, to_u64(amount_b)?))
}

/// Swap output for an exact input under the constant-product rule
///
/// The fee is taken from the input side, so the full `amount_in` lands in
/// reserves while only the fee-reduced portion prices the trade. This is
/// what keeps `reserve_in × reserve_out` non-decreasing.
pub fn quote_output(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
) -> Result<u64> {
    require!(amount_in > 0, CurveError::InvalidInput);
    require!(reserve_in > 0 && reserve_out > 0, CurveError::EmptyPool);

    let in_with_fee = (amount_in as u128)
        .checked_mul(BPS_DENOMINATOR - fee_bps as u128)
        .ok_or(CurveError::Overflow)?;
    let numerator = (reserve_out as u128)
        .checked_mul(in_with_fee)
        .ok_or(CurveError::Overflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(BPS_DENOMINATOR)
        .ok_or(CurveError::Overflow)?
        .checked_add(in_with_fee)
        .ok_or(CurveError::Overflow)?;

    to_u64(numerator / denominator)
}

/// Marginal price of the input asset in units of the output asset,
/// fixed-point with [`PRICE_SCALE`]
pub fn spot_price(reserve_in: u64, reserve_out: u64) -> Result<u128> {
    require!(reserve_in > 0, CurveError::EmptyPool);
    (reserve_out as u128)
        .checked_mul(PRICE_SCALE)
        .ok_or(CurveError::Overflow)?
        .checked_div(reserve_in as u128)
        .ok_or(error!(CurveError::EmptyPool))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FEE_BPS: u16 = 30;

    #[test]
    fn sqrt_floors() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(10), 3);
        assert_eq!(integer_sqrt(999_999), 999);
        assert_eq!(integer_sqrt(1_000_000), 1000);
        assert_eq!(integer_sqrt(u128::from(u64::MAX)), 4_294_967_295);
    }

    #[test]
    fn first_deposit_mints_geometric_mean() {
        // Seeding (1000, 1000) mints exactly 1000 shares
        assert_eq!(initial_shares(1000, 1000).unwrap(), 1000);
        assert_eq!(initial_shares(4000, 1000).unwrap(), 2000);
        // Unbalanced seeds floor
        assert_eq!(initial_shares(10, 3).unwrap(), 5);
    }

    #[test]
    fn first_deposit_rejects_zero_amounts() {
        assert!(initial_shares(0, 0).is_err());
        assert!(initial_shares(0, 1000).is_err());
        assert!(initial_shares(1000, 0).is_err());
    }

    #[test]
    fn optimal_deposit_trims_b_side() {
        // Pool at 2:1, caller offers 100 A and plenty of B
        let (a, b) = optimal_deposit(100, 1000, 2000, 1000).unwrap();
        assert_eq!((a, b), (100, 50));
    }

    #[test]
    fn optimal_deposit_trims_a_side() {
        // Pool at 2:1, caller's B is the binding side
        let (a, b) = optimal_deposit(100, 20, 2000, 1000).unwrap();
        assert_eq!((a, b), (40, 20));
        // The trimmed side never exceeds what was offered
        assert!(a <= 100 && b <= 20);
    }

    #[test]
    fn optimal_deposit_exact_ratio_takes_both() {
        let (a, b) = optimal_deposit(200, 100, 2000, 1000).unwrap();
        assert_eq!((a, b), (200, 100));
    }

    #[test]
    fn deposit_shares_are_proportional() {
        // Doubling a (1000, 1000, supply 1000) pool mints 1000 shares
        assert_eq!(
            shares_for_deposit(1000, 1000, 1000, 1000, 1000).unwrap(),
            1000
        );
        // A 10% deposit mints 10% of supply
        assert_eq!(
            shares_for_deposit(100, 100, 1000, 1000, 1000).unwrap(),
            100
        );
    }

    #[test]
    fn deposit_shares_take_worse_side() {
        // Excess on one side mints only against the proportional pair
        assert_eq!(
            shares_for_deposit(100, 500, 1000, 1000, 1000).unwrap(),
            100
        );
    }

    #[test]
    fn withdrawal_is_proportional_and_floors() {
        let (a, b) = withdrawal_amounts(100, 1000, 2000, 1000).unwrap();
        assert_eq!((a, b), (100, 200));
        // 1 share of a 3-share pool floors
        let (a, b) = withdrawal_amounts(1, 10, 10, 3).unwrap();
        assert_eq!((a, b), (3, 3));
    }

    #[test]
    fn full_withdrawal_drains_reserves_exactly() {
        let (a, b) = withdrawal_amounts(1000, 1234, 5678, 1000).unwrap();
        assert_eq!((a, b), (1234, 5678));
    }

    #[test]
    fn withdrawal_rejects_zero_shares_and_empty_pool() {
        assert!(withdrawal_amounts(0, 1000, 1000, 1000).is_err());
        assert!(withdrawal_amounts(1, 0, 0, 0).is_err());
    }

    #[test]
    fn swap_output_matches_reference_scenario() {
        // (1000, 1000) pool, 10 in at 0.3% fee:
        // in_with_fee = 99_700, out = 1000 × 99_700 / 10_099_700 = 9.87… → 9
        let out = quote_output(10, 1000, 1000, FEE_BPS).unwrap();
        assert_eq!(out, 9);
        assert!(out > 0 && out < 10);
    }

    #[test]
    fn swap_never_decreases_reserve_product() {
        let cases = [
            (10u64, 1000u64, 1000u64),
            (1, 1000, 1000),
            (500, 1000, 1000),
            (1_000_000, 1000, 1000),
            (7, 1_000_000_000, 3),
            (123_456, 987_654_321, 123_456_789),
        ];
        for (amount_in, reserve_in, reserve_out) in cases {
            let out = quote_output(amount_in, reserve_in, reserve_out, FEE_BPS).unwrap();
            let k_before = reserve_in as u128 * reserve_out as u128;
            let k_after =
                (reserve_in as u128 + amount_in as u128) * (reserve_out as u128 - out as u128);
            assert!(k_after >= k_before, "k decreased for input {amount_in}");
        }
    }

    #[test]
    fn fee_free_swap_also_preserves_product() {
        let out = quote_output(10, 1000, 1000, 0).unwrap();
        // 1000 × 10 / 1010 = 9.90… → 9; floor keeps k non-decreasing even at zero fee
        assert_eq!(out, 9);
        let k_before = 1000u128 * 1000;
        let k_after = 1010u128 * (1000 - out as u128);
        assert!(k_after >= k_before);
    }

    #[test]
    fn swap_output_never_exhausts_reserve() {
        // Even an enormous input cannot pull the full output reserve
        let out = quote_output(u64::MAX / 2, 1000, 1000, FEE_BPS).unwrap();
        assert!(out < 1000);
    }

    #[test]
    fn quote_is_deterministic() {
        let first = quote_output(12_345, 999_999, 777_777, FEE_BPS).unwrap();
        let second = quote_output(12_345, 999_999, 777_777, FEE_BPS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn quote_rejects_zero_input_and_empty_reserves() {
        assert!(quote_output(0, 1000, 1000, FEE_BPS).is_err());
        assert!(quote_output(10, 0, 1000, FEE_BPS).is_err());
        assert!(quote_output(10, 1000, 0, FEE_BPS).is_err());
        assert!(quote_output(0, 0, 0, FEE_BPS).is_err());
    }

    #[test]
    fn quote_guards_u64_extremes() {
        // Full-range reserves on both sides trip the overflow guard
        // instead of wrapping
        assert!(quote_output(u64::MAX, u64::MAX, u64::MAX, FEE_BPS).is_err());
        // A full-range input against a small output reserve stays in range
        assert!(quote_output(u64::MAX, u64::MAX, 1000, FEE_BPS).is_ok());
    }

    #[test]
    fn round_trip_never_profits() {
        // Deposit into a seeded pool, withdraw the fresh shares: the floor
        // rounding bounds the return by the deposit on both sides.
        let (reserve_a, reserve_b, supply) = (10_000u64, 30_000u64, 10_000u64);
        let (a_in, b_in) = optimal_deposit(997, 3500, reserve_a, reserve_b).unwrap();
        let minted = shares_for_deposit(a_in, b_in, reserve_a, reserve_b, supply).unwrap();
        let (a_out, b_out) = withdrawal_amounts(
            minted,
            reserve_a + a_in,
            reserve_b + b_in,
            supply + minted,
        )
        .unwrap();
        assert!(a_out <= a_in);
        assert!(b_out <= b_in);
    }

    #[test]
    fn balanced_round_trip_is_exact() {
        // Deposit at the exact ratio into a clean pool and withdraw all of
        // it: with no fee activity the amounts come back whole.
        let (reserve_a, reserve_b, supply) = (1000u64, 1000u64, 1000u64);
        let minted = shares_for_deposit(500, 500, reserve_a, reserve_b, supply).unwrap();
        assert_eq!(minted, 500);
        let (a_out, b_out) =
            withdrawal_amounts(minted, reserve_a + 500, reserve_b + 500, supply + 500).unwrap();
        assert_eq!((a_out, b_out), (500, 500));
    }

    #[test]
    fn spot_price_is_fixed_point_ratio() {
        // (100 in, 50 out) → 0.5 × 1e18
        assert_eq!(spot_price(100, 50).unwrap(), PRICE_SCALE / 2);
        assert_eq!(spot_price(1000, 1000).unwrap(), PRICE_SCALE);
        assert_eq!(spot_price(50, 100).unwrap(), 2 * PRICE_SCALE);
    }

    #[test]
    fn spot_price_rejects_empty_input_reserve() {
        assert!(spot_price(0, 1000).is_err());
    }
}
