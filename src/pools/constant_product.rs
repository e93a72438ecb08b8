//! Constant-product pricing for native-quoted pools.
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the base and
//! quote reserves.  The fee is deducted from the sold amount **before**
//! the pricing formula is applied and stays in the pool.
//!
//! # Swap Algorithm
//!
//! 1. `effective_in = sold × (1 − fee_rate)` (truncated)
//! 2. `bought = reserve_out × effective_in / (reserve_in + effective_in)`
//!    (product first, one truncation)
//! 3. `reserve_in += sold`
//! 4. `reserve_out −= bought`
//!
//! # Invariant
//!
//! After every swap `k_after ≥ k_before`: truncation only ever shrinks
//! `bought`, and the fee adds to `reserve_in` without any output.
//!
//! Every function here is pure.  Nothing is mutated; the caller decides
//! whether to commit.

use tracing::debug;

use crate::domain::{Decimal, Pool};
use crate::error::SwapError;
use crate::math::CheckedArithmetic;

/// Amounts for one add-liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    /// Base tokens the depositor must supply.
    pub base_required: Decimal,
    /// Shares the depositor receives.
    pub liquidity_minted: Decimal,
}

/// Amounts paid out for burning shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    /// Base tokens returned.
    pub base: Decimal,
    /// Native tokens returned.
    pub quote: Decimal,
}

/// Pure constant-product pricing functions.
///
/// # Example
///
/// ```rust
/// use ammswap::domain::{Decimal, Denom, Pool};
/// use ammswap::pools::PricingEngine;
///
/// let pool = Pool::new(
///     Denom::new("btc").expect("valid"),
///     Denom::new("okt").expect("valid"),
///     Denom::new("ammswap_btc").expect("valid"),
/// )
/// .with_deposit(&Decimal::from_int(1_000), &Decimal::from_int(1_000))
/// .expect("deposit");
///
/// let fee: Decimal = "0.003".parse().expect("valid");
/// let bought = PricingEngine::buy_amount(&pool, &Decimal::from_int(100), true, &fee)
///     .expect("priced");
/// assert_eq!(bought.to_string(), "90.66108938");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    /// Output of selling `sold` into `pool`.
    ///
    /// `sold_is_quote` is `true` when the native token is sold for the
    /// base token.  Returns zero when the input reserve is empty or the
    /// fee consumes the whole input; the caller decides whether zero is
    /// an error.
    ///
    /// # Errors
    ///
    /// [`SwapError::Overflow`] if `fee_rate > 1` or an intermediate value
    /// is not representable.
    pub fn buy_amount(
        pool: &Pool,
        sold: &Decimal,
        sold_is_quote: bool,
        fee_rate: &Decimal,
    ) -> Result<Decimal, SwapError> {
        let (reserve_in, reserve_out) = if sold_is_quote {
            (&pool.quote_reserve().amount, &pool.base_reserve().amount)
        } else {
            (&pool.base_reserve().amount, &pool.quote_reserve().amount)
        };
        if reserve_in.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let fee_factor = Decimal::ONE.safe_sub(fee_rate)?;
        let effective_in = sold.safe_mul(&fee_factor)?;
        if effective_in.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let denominator = reserve_in.safe_add(&effective_in)?;
        let bought = reserve_out.safe_mul_and_quo(&effective_in, &denominator)?;
        debug!(
            pair = %pool.pair_id(),
            %sold,
            %effective_in,
            %bought,
            sold_is_quote,
            "priced swap"
        );
        Ok(bought)
    }

    /// Base tokens required and shares minted for depositing
    /// `quote_amount` native tokens.
    ///
    /// On an uninitialized pool the depositor sets the price: the whole
    /// `explicit_base` is taken and exactly one share is minted.  On an
    /// active pool both amounts are proportional to the reserves.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Invariant`] if the pool is half-zero, or active with
    ///   zero share supply.
    /// - [`SwapError::Overflow`] on unrepresentable intermediates.
    pub fn liquidity_for_deposit(
        pool: &Pool,
        share_supply: &Decimal,
        quote_amount: &Decimal,
        explicit_base: &Decimal,
    ) -> Result<Deposit, SwapError> {
        if pool.is_uninitialized() {
            return Ok(Deposit {
                base_required: *explicit_base,
                liquidity_minted: Decimal::ONE,
            });
        }
        if !pool.is_active() {
            return Err(SwapError::Invariant(format!(
                "pool {} is half-empty",
                pool.pair_id()
            )));
        }
        if share_supply.is_zero() {
            return Err(SwapError::Invariant(format!(
                "pool {} is active but {} has zero supply",
                pool.pair_id(),
                pool.share_token_id()
            )));
        }

        let base_reserve = &pool.base_reserve().amount;
        let quote_reserve = &pool.quote_reserve().amount;
        let base_required = quote_amount.safe_mul_and_quo(base_reserve, quote_reserve)?;
        let liquidity_minted = quote_amount.safe_mul_and_quo(share_supply, quote_reserve)?;
        Ok(Deposit {
            base_required,
            liquidity_minted,
        })
    }

    /// Reserves returned for burning `liquidity` of `share_supply` shares.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Invariant`] if `share_supply` is zero.
    /// - [`SwapError::Overflow`] on unrepresentable intermediates.
    pub fn redeem_amounts(
        pool: &Pool,
        share_supply: &Decimal,
        liquidity: &Decimal,
    ) -> Result<Redemption, SwapError> {
        if share_supply.is_zero() {
            return Err(SwapError::Invariant(format!(
                "{} has zero supply",
                pool.share_token_id()
            )));
        }
        let base = pool
            .base_reserve()
            .amount
            .safe_mul_and_quo(liquidity, share_supply)?;
        let quote = pool
            .quote_reserve()
            .amount
            .safe_mul_and_quo(liquidity, share_supply)?;
        Ok(Redemption { base, quote })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Denom;

    fn dec(s: &str) -> Decimal {
        let Ok(d) = s.parse::<Decimal>() else {
            panic!("valid decimal literal: {s}");
        };
        d
    }

    fn empty_pool() -> Pool {
        let (Ok(base), Ok(native), Ok(share)) =
            (Denom::new("btc"), Denom::new("okt"), Denom::new("ammswap_btc"))
        else {
            panic!("valid denoms");
        };
        Pool::new(base, native, share)
    }

    fn pool(base: &str, quote: &str) -> Pool {
        let Ok(p) = empty_pool().with_deposit(&dec(base), &dec(quote)) else {
            panic!("deposit");
        };
        p
    }

    // -- buy_amount -----------------------------------------------------

    #[test]
    fn buy_amount_with_fee() {
        let Ok(out) =
            PricingEngine::buy_amount(&pool("1000", "1000"), &dec("100"), true, &dec("0.003"))
        else {
            panic!("expected Ok");
        };
        assert_eq!(out, dec("90.66108938"));
    }

    #[test]
    fn buy_amount_without_fee() {
        // 1000 * 100 / 1100 = 90.90909090
        let Ok(out) =
            PricingEngine::buy_amount(&pool("1000", "1000"), &dec("100"), false, &Decimal::ZERO)
        else {
            panic!("expected Ok");
        };
        assert_eq!(out, dec("90.90909090"));
    }

    #[test]
    fn buy_amount_uses_correct_direction() {
        let p = pool("2000", "1000");
        let Ok(quote_in) = PricingEngine::buy_amount(&p, &dec("10"), true, &Decimal::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(base_in) = PricingEngine::buy_amount(&p, &dec("10"), false, &Decimal::ZERO) else {
            panic!("expected Ok");
        };
        // selling okt into the deep btc side yields more
        assert!(quote_in > base_in);
    }

    #[test]
    fn buy_amount_empty_pool_is_zero() {
        let Ok(out) = PricingEngine::buy_amount(&empty_pool(), &dec("5"), true, &dec("0.003"))
        else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
    }

    #[test]
    fn buy_amount_dust_is_zero() {
        // 0.00000001 * 0.997 truncates to zero
        let Ok(out) = PricingEngine::buy_amount(
            &pool("1000", "1000"),
            &Decimal::SMALLEST,
            true,
            &dec("0.003"),
        ) else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
    }

    #[test]
    fn buy_amount_never_drains() {
        let Ok(out) = PricingEngine::buy_amount(
            &pool("10", "10"),
            &Decimal::from_int(u64::MAX),
            true,
            &Decimal::ZERO,
        ) else {
            panic!("expected Ok");
        };
        assert!(out < dec("10"));
    }

    #[test]
    fn buy_amount_fee_above_one_overflows() {
        let Err(SwapError::Overflow(_)) =
            PricingEngine::buy_amount(&pool("10", "10"), &dec("1"), true, &dec("1.5"))
        else {
            panic!("expected Overflow");
        };
    }

    // -- liquidity_for_deposit ------------------------------------------

    #[test]
    fn first_deposit_mints_one() {
        let Ok(d) = PricingEngine::liquidity_for_deposit(
            &empty_pool(),
            &Decimal::ZERO,
            &dec("500"),
            &dec("500"),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(d.base_required, dec("500"));
        assert_eq!(d.liquidity_minted, Decimal::ONE);
    }

    #[test]
    fn proportional_deposit() {
        let Ok(d) = PricingEngine::liquidity_for_deposit(
            &pool("500", "500"),
            &Decimal::ONE,
            &dec("100"),
            &dec("1000"),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(d.base_required, dec("100"));
        assert_eq!(d.liquidity_minted, dec("0.2"));
    }

    #[test]
    fn proportional_deposit_truncates() {
        // base = 1 * 2 / 3, liquidity = 1 * 1 / 3
        let Ok(d) = PricingEngine::liquidity_for_deposit(
            &pool("2", "3"),
            &Decimal::ONE,
            &dec("1"),
            &dec("10"),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(d.base_required, dec("0.66666666"));
        assert_eq!(d.liquidity_minted, dec("0.33333333"));
    }

    #[test]
    fn active_pool_zero_supply_is_invariant_error() {
        let Err(SwapError::Invariant(_)) = PricingEngine::liquidity_for_deposit(
            &pool("1", "1"),
            &Decimal::ZERO,
            &dec("1"),
            &dec("1"),
        ) else {
            panic!("expected Invariant");
        };
    }

    // -- redeem_amounts -------------------------------------------------

    #[test]
    fn redeem_proportional() {
        let Ok(r) = PricingEngine::redeem_amounts(&pool("600", "600"), &dec("1.2"), &dec("0.2"))
        else {
            panic!("expected Ok");
        };
        assert_eq!(r.base, dec("100"));
        assert_eq!(r.quote, dec("100"));
    }

    #[test]
    fn redeem_full_supply_returns_everything() {
        let Ok(r) = PricingEngine::redeem_amounts(&pool("7", "3"), &dec("1"), &dec("1")) else {
            panic!("expected Ok");
        };
        assert_eq!(r.base, dec("7"));
        assert_eq!(r.quote, dec("3"));
    }

    #[test]
    fn redeem_zero_supply_is_invariant_error() {
        let Err(SwapError::Invariant(_)) =
            PricingEngine::redeem_amounts(&pool("1", "1"), &Decimal::ZERO, &dec("1"))
        else {
            panic!("expected Invariant");
        };
    }
}
