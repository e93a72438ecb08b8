//! # ammswap
//!
//! Deterministic swap engine for liquidity pools quoted against a single
//! native reserve token.
//!
//! Every pool pairs one token with the native token and prices trades
//! with the constant-product formula `x × y = k`, less a governance fee.
//! The engine handles pool creation, liquidity deposit and withdrawal,
//! and direct or two-hop swaps with slippage and deadline protection.
//! All arithmetic is fixed-point with eight fractional digits and
//! truncating division, so every replica computes the same result.
//!
//! The engine owns only pool state.  Balances, token metadata, block
//! time, parameters and events belong to the host and are passed in per
//! request through an [`ExecContext`](engine::ExecContext).
//!
//! # Quick Start
//!
//! ```rust
//! use ammswap::config::EngineConfig;
//! use ammswap::domain::{
//!     AccountId, AddLiquidity, Coin, CreatePool, Decimal, Denom, Swap, Timestamp,
//! };
//! use ammswap::engine::SwapEngine;
//! use ammswap::host::MemoryHost;
//! use ammswap::traits::TokenKind;
//!
//! let okt = Denom::new("okt").expect("valid");
//! let btc = Denom::new("btc").expect("valid");
//! let alice = AccountId::new("alice");
//!
//! // 1. A host with one registered token and a funded account
//! let mut host = MemoryHost::new();
//! host.tokens.register(btc.clone(), TokenKind::Fungible);
//! host.ledger.fund(&alice, &Coin::new(okt.clone(), Decimal::from_int(2_000))).expect("fund");
//! host.ledger.fund(&alice, &Coin::new(btc.clone(), Decimal::from_int(1_000))).expect("fund");
//!
//! // 2. Create the btc_okt pool and seed it at 1:1
//! let mut engine = SwapEngine::new(EngineConfig::default());
//! engine.create_pool(&mut host.context(), &CreatePool { token: btc.clone() }).expect("created");
//! engine
//!     .add_liquidity(
//!         &mut host.context(),
//!         &AddLiquidity {
//!             sender: alice.clone(),
//!             quote_amount: Coin::new(okt.clone(), Decimal::from_int(1_000)),
//!             max_base_amount: Coin::new(btc.clone(), Decimal::from_int(1_000)),
//!             min_liquidity: Decimal::ZERO,
//!             deadline: Timestamp::from_unix_secs(60),
//!         },
//!     )
//!     .expect("seeded");
//!
//! // 3. Sell 100 okt for btc
//! let out = engine
//!     .swap(
//!         &mut host.context(),
//!         &Swap {
//!             sender: alice.clone(),
//!             recipient: alice,
//!             sold_amount: Coin::new(okt, Decimal::from_int(100)),
//!             min_bought_amount: Decimal::from_int(90),
//!             bought_denom: btc,
//!             deadline: Timestamp::from_unix_secs(60),
//!         },
//!     )
//!     .expect("swapped");
//! assert_eq!(out.bought.amount.to_string(), "90.66108938");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Host      │  Ledger, TokenRegistry, Clock, ParamStore, EventSink
//! └──────┬───────┘
//!        │ ExecContext (per request)
//!        ▼
//! ┌──────────────┐
//! │  SwapEngine  │  validation, classification, queries
//! └──────┬───────┘
//!        │ LiquidityManager / SwapRouter
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  PairRegistry, PoolShareLedger, PricingEngine
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Domain     │  Decimal, Denom, Coin, Pool, Request, Outcome, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Decimal`](domain::Decimal), [`Denom`](domain::Denom), [`Pool`](domain::Pool), requests and outcomes |
//! | [`traits`] | Host collaborator interfaces: [`Ledger`](traits::Ledger), [`TokenRegistry`](traits::TokenRegistry), [`Clock`](traits::Clock), [`ParamStore`](traits::ParamStore), [`EventSink`](traits::EventSink) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) (TOML) and governance [`Params`](config::Params) |
//! | [`pools`]  | Pool storage and [`PricingEngine`](pools::PricingEngine) |
//! | [`engine`] | [`SwapEngine`](engine::SwapEngine), liquidity and swap execution |
//! | [`host`]   | In-memory collaborators for tests and embedding |
//! | [`math`]   | Checked arithmetic and 256-bit mul-div |
//! | [`error`]  | [`SwapError`](error::SwapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod host;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
