//! Two pools quoted against the native token and a swap routed between
//! them.
//!
//! Creates `btc_okt` and `eth_okt`, seeds both, quotes a btc→eth swap,
//! executes it, and prints the resulting reserves and events.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=ammswap=debug cargo run --example routed_swap
//! ```

use ammswap::config::EngineConfig;
use ammswap::domain::{AccountId, AddLiquidity, Coin, CreatePool, Decimal, Denom, Swap, Timestamp};
use ammswap::engine::{Route, SwapEngine};
use ammswap::host::MemoryHost;
use ammswap::traits::{Ledger, TokenKind};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ammswap=info")),
        )
        .init();

    println!("=== Routed swap through the native token ===\n");

    // ── 1. Host and tokens ─────────────────────────────────────────────
    let okt = Denom::new("okt")?;
    let btc = Denom::new("btc")?;
    let eth = Denom::new("eth")?;
    let lp = AccountId::new("lp");
    let trader = AccountId::new("trader");

    let mut host = MemoryHost::new();
    host.clock.set(Timestamp::from_unix_secs(1_700_000_000));
    let deadline = Timestamp::from_unix_secs(1_700_000_060);
    for token in [&btc, &eth] {
        host.tokens.register(token.clone(), TokenKind::Fungible);
    }
    host.ledger.fund(&lp, &Coin::new(okt.clone(), Decimal::from_int(5_000)))?;
    host.ledger.fund(&lp, &Coin::new(btc.clone(), Decimal::from_int(50)))?;
    host.ledger.fund(&lp, &Coin::new(eth.clone(), Decimal::from_int(1_000)))?;
    host.ledger.fund(&trader, &Coin::new(btc.clone(), Decimal::from_int(1)))?;

    // ── 2. Pools ───────────────────────────────────────────────────────
    //    btc is priced at 50 okt, eth at 2.5 okt.
    let mut engine = SwapEngine::new(EngineConfig::default());
    for (token, base, quote) in [(&btc, 50, 2_500), (&eth, 1_000, 2_500)] {
        engine.create_pool(&mut host.context(), &CreatePool { token: token.clone() })?;
        let added = engine.add_liquidity(
            &mut host.context(),
            &AddLiquidity {
                sender: lp.clone(),
                quote_amount: Coin::new(okt.clone(), Decimal::from_int(quote)),
                max_base_amount: Coin::new(token.clone(), Decimal::from_int(base)),
                min_liquidity: Decimal::ZERO,
                deadline,
            },
        )?;
        println!(
            "Seeded {}_{okt}: {} + {quote}{okt} → {} shares",
            token, added.base_used, added.liquidity_minted
        );
    }

    // ── 3. Quote ───────────────────────────────────────────────────────
    let sold = Coin::new(btc.clone(), Decimal::from_int(1));
    let route = engine.quote(&host.params, &sold, &eth)?;
    if let Route::Routed { first, second } = &route {
        println!("\nQuote for {sold}:");
        println!("  leg 1 on {}: {} → {}", first.pair_id, first.sold, first.bought);
        println!("  leg 2 on {}: {} → {}", second.pair_id, second.sold, second.bought);
    }

    // ── 4. Execute with 1% slippage tolerance ──────────────────────────
    let expected = route.bought().amount;
    let min_bought = expected.mul_truncate(&"0.99".parse()?).unwrap_or(Decimal::ZERO);
    let out = engine.swap(
        &mut host.context(),
        &Swap {
            sender: trader.clone(),
            recipient: trader.clone(),
            sold_amount: sold,
            min_bought_amount: min_bought,
            bought_denom: eth.clone(),
            deadline,
        },
    )?;
    println!("\nBought {} (via {:?})", out.bought, out.intermediate);
    println!(
        "Trader now holds {}{eth}",
        host.ledger.balance_of(&trader, &eth)
    );

    // ── 5. Final state ─────────────────────────────────────────────────
    println!("\nPools:");
    for pool in engine.list_pools() {
        println!(
            "  {}: {} / {}",
            pool.pair_id(),
            pool.base_reserve(),
            pool.quote_reserve()
        );
    }
    println!("\nEvents:");
    for event in host.events.events() {
        println!("  {} {:?}", event.name, event.attributes);
    }

    Ok(())
}
