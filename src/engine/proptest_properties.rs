//! Property-based tests using `proptest` for engine invariants.
//!
//! 1. **Invariant preservation** — `k` never decreases across a swap.
//! 2. **Output monotonicity** — selling more never buys less.
//! 3. **No free liquidity** — add then remove never returns more than
//!    was deposited.
//! 4. **Reserve invariant** — after any committed request every pool is
//!    either uninitialized or active.
//! 5. **Route composition** — a routed quote equals its two direct legs.
//! 6. **Canonical coins** — sorted by denom, strictly positive.

use proptest::prelude::*;

use super::{ExecContext, Route, SwapEngine};
use crate::config::EngineConfig;
use crate::domain::{
    AccountId, AddLiquidity, Coin, CreatePool, Decimal, Denom, Pool, Swap, Timestamp,
    canonicalize_coins,
};
use crate::host::MemoryHost;
use crate::math::widening_mul;
use crate::pools::PricingEngine;
use crate::traits::TokenKind;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn denom(s: &str) -> Denom {
    let Ok(d) = Denom::new(s) else {
        panic!("valid denom");
    };
    d
}

fn fee() -> Decimal {
    Decimal::from_raw(300_000)
}

fn pool(base_raw: u128, quote_raw: u128) -> Pool {
    let empty = Pool::new(denom("btc"), denom("okt"), denom("ammswap_btc"));
    let Ok(p) = empty.with_deposit(&Decimal::from_raw(base_raw), &Decimal::from_raw(quote_raw))
    else {
        panic!("deposit");
    };
    p
}

fn k(p: &Pool) -> crate::math::U256 {
    widening_mul(p.base_reserve().amount.raw(), p.quote_reserve().amount.raw())
}

/// Reserves between 0.00001 and 10^12 tokens.
fn reserve() -> impl Strategy<Value = u128> {
    1_000u128..=100_000_000_000_000_000_000u128
}

/// Sold amounts between one raw unit and 10^9 tokens.
fn sold() -> impl Strategy<Value = u128> {
    1u128..=100_000_000_000_000_000u128
}

fn engine_with_pools(host: &mut MemoryHost, tokens: &[&str]) -> SwapEngine {
    let mut engine = SwapEngine::new(EngineConfig::default());
    let alice = AccountId::new("alice");
    let Ok(()) = host
        .ledger
        .fund(&alice, &Coin::new(denom("okt"), Decimal::from_int(u64::MAX)))
    else {
        panic!("fund");
    };
    for token in tokens {
        host.tokens.register(denom(token), TokenKind::Fungible);
        let Ok(()) = host
            .ledger
            .fund(&alice, &Coin::new(denom(token), Decimal::from_int(u64::MAX)))
        else {
            panic!("fund");
        };
        let Ok(_) = engine.create_pool(&mut host.context(), &CreatePool { token: denom(token) })
        else {
            panic!("create");
        };
    }
    engine
}

fn add(engine: &mut SwapEngine, ctx: &mut ExecContext<'_>, token: &str, base: u128, quote: u128) {
    let req = AddLiquidity {
        sender: AccountId::new("alice"),
        quote_amount: Coin::new(denom("okt"), Decimal::from_raw(quote)),
        max_base_amount: Coin::new(denom(token), Decimal::from_raw(base)),
        min_liquidity: Decimal::ZERO,
        deadline: Timestamp::from_unix_secs(0),
    };
    let Ok(_) = engine.add_liquidity(ctx, &req) else {
        panic!("add");
    };
}

// ---------------------------------------------------------------------------
// 1. Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn k_never_decreases(base in reserve(), quote in reserve(), amount in sold(), quote_in in any::<bool>()) {
        let p = pool(base, quote);
        let sold = Decimal::from_raw(amount);
        let Ok(bought) = PricingEngine::buy_amount(&p, &sold, quote_in, &fee()) else {
            panic!("priced");
        };
        prop_assume!(bought.is_positive());
        let Ok(next) = p.with_swap(quote_in, &sold, &bought) else {
            panic!("swap keeps both reserves positive");
        };
        prop_assert!(k(&next) >= k(&p));
    }
}

// ---------------------------------------------------------------------------
// 2. Output monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn larger_input_buys_at_least_as_much(
        base in reserve(),
        quote in reserve(),
        a in sold(),
        b in sold(),
    ) {
        let p = pool(base, quote);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (Ok(out_lo), Ok(out_hi)) = (
            PricingEngine::buy_amount(&p, &Decimal::from_raw(lo), true, &fee()),
            PricingEngine::buy_amount(&p, &Decimal::from_raw(hi), true, &fee()),
        ) else {
            panic!("priced");
        };
        prop_assert!(out_lo <= out_hi);
        prop_assert!(out_hi < p.base_reserve().amount);
    }
}

// ---------------------------------------------------------------------------
// 3. No free liquidity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn add_then_remove_never_gains(
        base in reserve(),
        quote in reserve(),
        deposit in sold(),
    ) {
        let p = pool(base, quote);
        let supply = Decimal::ONE;
        let q = Decimal::from_raw(deposit);
        let Ok(d) = PricingEngine::liquidity_for_deposit(&p, &supply, &q, &Decimal::MAX) else {
            panic!("priced deposit");
        };
        prop_assume!(d.liquidity_minted.is_positive());
        let Ok(after) = p.with_deposit(&d.base_required, &q) else {
            panic!("deposit");
        };
        let Some(new_supply) = supply.checked_add(&d.liquidity_minted) else {
            panic!("supply");
        };
        let Ok(r) = PricingEngine::redeem_amounts(&after, &new_supply, &d.liquidity_minted) else {
            panic!("redeem");
        };
        prop_assert!(r.base <= d.base_required);
        prop_assert!(r.quote <= q);
    }
}

// ---------------------------------------------------------------------------
// 4. Reserve invariant across a request sequence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pools_stay_consistent(
        seed_base in 1_000u128..=1_000_000_000_000u128,
        seed_quote in 1_000u128..=1_000_000_000_000u128,
        swaps in prop::collection::vec((sold(), any::<bool>()), 1..8),
    ) {
        let mut host = MemoryHost::new();
        let mut engine = engine_with_pools(&mut host, &["btc"]);
        add(&mut engine, &mut host.context(), "btc", seed_base, seed_quote);

        for (amount, sell_native) in swaps {
            let (sold_denom, bought_denom) = if sell_native { ("okt", "btc") } else { ("btc", "okt") };
            let req = Swap {
                sender: AccountId::new("alice"),
                recipient: AccountId::new("alice"),
                sold_amount: Coin::new(denom(sold_denom), Decimal::from_raw(amount)),
                min_bought_amount: Decimal::ZERO,
                bought_denom: denom(bought_denom),
                deadline: Timestamp::from_unix_secs(0),
            };
            // dust swaps are rejected; the pool must be consistent either way
            let _ = engine.swap(&mut host.context(), &req);
            for p in engine.list_pools() {
                prop_assert!(p.check_invariant().is_ok());
                prop_assert!(p.is_active());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Route composition
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn routed_quote_composes_direct_quotes(
        btc_base in 1_000u128..=1_000_000_000_000u128,
        btc_quote in 1_000u128..=1_000_000_000_000u128,
        eth_base in 1_000u128..=1_000_000_000_000u128,
        eth_quote in 1_000u128..=1_000_000_000_000u128,
        amount in 1u128..=1_000_000_000_000u128,
    ) {
        let mut host = MemoryHost::new();
        let mut engine = engine_with_pools(&mut host, &["btc", "eth"]);
        add(&mut engine, &mut host.context(), "btc", btc_base, btc_quote);
        add(&mut engine, &mut host.context(), "eth", eth_base, eth_quote);

        let sold = Coin::new(denom("btc"), Decimal::from_raw(amount));
        let Ok(route) = engine.quote(&host.params, &sold, &denom("eth")) else {
            panic!("quote");
        };
        let Route::Routed { first, second } = &route else {
            panic!("expected routed");
        };
        let Ok(leg1) = engine.quote_buy_amount(&host.params, &sold, &denom("okt")) else {
            panic!("leg 1");
        };
        prop_assert_eq!(first.bought.amount, leg1);
        let native = Coin::new(denom("okt"), leg1);
        let Ok(leg2) = engine.quote_buy_amount(&host.params, &native, &denom("eth")) else {
            panic!("leg 2");
        };
        prop_assert_eq!(second.bought.amount, leg2);
        prop_assert_eq!(route.bought().amount, leg2);
    }
}

// ---------------------------------------------------------------------------
// 6. Canonical coins
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn canonical_coins_sorted_and_positive(
        entries in prop::collection::btree_map("[a-z]{1,6}", 0u128..=1_000u128, 0..6),
    ) {
        // reverse so input order differs from the expected order
        let coins: Vec<Coin> = entries
            .into_iter()
            .rev()
            .map(|(d, a)| Coin::new(denom(&d), Decimal::from_raw(a)))
            .collect();
        let out = canonicalize_coins(coins.clone());
        prop_assert!(out.iter().all(Coin::is_positive));
        prop_assert!(out.windows(2).all(|w| w[0].denom < w[1].denom));
        prop_assert_eq!(out.len(), coins.iter().filter(|c| c.is_positive()).count());
    }
}
