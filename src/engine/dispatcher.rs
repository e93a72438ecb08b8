//! Request entry point and read-only queries.

use tracing::{debug, info, info_span};

use super::router::{Route, plan_route};
use super::{ExecContext, LiquidityManager, SwapRouter};
use crate::config::{EngineConfig, Params};
use crate::domain::{
    AccountId, AddLiquidity, AddLiquidityOutcome, Coin, CreatePool, Decimal, Denom, Outcome, PairId, Pool,
    RemoveLiquidity, RemoveLiquidityOutcome, Request, Swap, SwapOutcome,
};
use crate::error::SwapError;
use crate::pools::{PairRegistry, PoolShareLedger, PricingEngine};
use crate::traits::{Event, ParamStore, TokenKind};

/// The swap engine: owns pool state, borrows everything else per request.
///
/// Requests run one at a time (`&mut self`).  Each operation validates
/// its request, checks every bound against a snapshot, and mutates only
/// after all checks pass.
///
/// # Example
///
/// ```rust
/// use ammswap::config::EngineConfig;
/// use ammswap::domain::{CreatePool, Denom, Request};
/// use ammswap::engine::SwapEngine;
/// use ammswap::host::MemoryHost;
/// use ammswap::traits::TokenKind;
///
/// let mut host = MemoryHost::new();
/// let btc = Denom::new("btc").expect("valid");
/// host.tokens.register(btc.clone(), TokenKind::Fungible);
///
/// let mut engine = SwapEngine::new(EngineConfig::default());
/// let outcome = engine
///     .dispatch(&mut host.context(), Request::CreatePool(CreatePool { token: btc }))
///     .expect("created");
/// assert_eq!(engine.list_pools().count(), 1);
/// # let _ = outcome;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwapEngine {
    config: EngineConfig,
    pairs: PairRegistry,
    shares: PoolShareLedger,
}

impl SwapEngine {
    /// An engine with no pools.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            pairs: PairRegistry::new(),
            shares: PoolShareLedger::new(),
        }
    }

    /// The static configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Routes `request` to its operation.
    ///
    /// # Errors
    ///
    /// Whatever the selected operation returns.
    pub fn dispatch(
        &mut self,
        ctx: &mut ExecContext<'_>,
        request: Request,
    ) -> Result<Outcome, SwapError> {
        let span = info_span!("dispatch", request = request.name());
        let _guard = span.enter();
        let result = match request {
            Request::CreatePool(req) => self.create_pool(ctx, &req).map(|pool| {
                Outcome::PoolCreated {
                    pair_id: pool.pair_id().clone(),
                    share_token_id: pool.share_token_id().clone(),
                }
            }),
            Request::AddLiquidity(req) => {
                self.add_liquidity(ctx, &req).map(Outcome::LiquidityAdded)
            }
            Request::RemoveLiquidity(req) => self
                .remove_liquidity(ctx, &req)
                .map(Outcome::LiquidityRemoved),
            Request::Swap(req) => self.swap(ctx, &req).map(Outcome::Swapped),
        };
        if let Err(err) = &result {
            debug!(kind = ?err.kind(), %err, "request rejected");
        }
        result
    }

    // -- operations ---------------------------------------------------------

    /// Creates an empty pool for `req.token` and its share token.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`] if the token is native, non-fungible,
    ///   or a pool share token.
    /// - [`SwapError::NotFound`] if the token is not registered.
    /// - [`SwapError::AlreadyExists`] if the pool or share token exists.
    pub fn create_pool(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &CreatePool,
    ) -> Result<Pool, SwapError> {
        let native = self.config.native_denom();
        req.validate_basic(native)?;
        let token = &req.token;

        let Some(meta) = ctx.tokens.metadata(token) else {
            return Err(SwapError::NotFound(format!("token {token}")));
        };
        match meta.kind {
            TokenKind::Fungible => {}
            TokenKind::NonFungible => {
                return Err(SwapError::Validation(format!(
                    "token {token} is not fungible"
                )));
            }
            TokenKind::PoolShare => {
                return Err(SwapError::Validation(format!(
                    "token {token} is a pool share token"
                )));
            }
        }
        if self.config.is_share_token(token) || self.shares.contains(token) {
            return Err(SwapError::Validation(format!(
                "token {token} is a pool share token"
            )));
        }

        let pair_id = self.config.pair_id(token);
        if self.pairs.exists(&pair_id) {
            return Err(SwapError::AlreadyExists(format!("pool {pair_id}")));
        }
        let share_id = self.config.share_token_id(token)?;
        if self.shares.contains(&share_id) {
            return Err(SwapError::AlreadyExists(format!("share token {share_id}")));
        }

        let pool = Pool::new(token.clone(), native.clone(), share_id.clone());
        self.pairs.insert_new(pool.clone())?;
        self.shares.create(share_id.clone())?;

        ctx.emit(
            Event::new("create_pool")
                .attr("pair_id", &pair_id)
                .attr("share_token", &share_id),
        );
        info!(pair = %pair_id, share_token = %share_id, "pool created");
        Ok(pool)
    }

    /// See [`LiquidityManager::add_liquidity`].
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] from request checks or a module-account
    /// sender, then as
    /// [`LiquidityManager::add_liquidity`].
    pub fn add_liquidity(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &AddLiquidity,
    ) -> Result<AddLiquidityOutcome, SwapError> {
        req.validate_basic(self.config.native_denom())?;
        self.require_external(&req.sender)?;
        LiquidityManager::new(&self.config, &mut self.pairs, &mut self.shares)
            .add_liquidity(ctx, req)
    }

    /// See [`LiquidityManager::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] from request checks or a module-account
    /// sender, then as
    /// [`LiquidityManager::remove_liquidity`].
    pub fn remove_liquidity(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &RemoveLiquidity,
    ) -> Result<RemoveLiquidityOutcome, SwapError> {
        req.validate_basic(self.config.native_denom())?;
        self.require_external(&req.sender)?;
        LiquidityManager::new(&self.config, &mut self.pairs, &mut self.shares)
            .remove_liquidity(ctx, req)
    }

    /// Sells `req.sold_amount` for `req.bought_denom`.
    ///
    /// Direct if either side is the native token, routed through it
    /// otherwise.  The deadline and the sender's balance are checked once,
    /// before any leg.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`] on a bad request, a passed deadline, an
    ///   invalid fee rate, or a zero output, or if the sender or recipient
    ///   is the module account.
    /// - [`SwapError::InsufficientFunds`] if the sender lacks the sold coins.
    /// - [`SwapError::NotFound`] if a pool on the route does not exist.
    /// - [`SwapError::Slippage`] if the output is below the minimum.
    pub fn swap(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &Swap,
    ) -> Result<SwapOutcome, SwapError> {
        req.validate_basic()?;
        self.require_external(&req.sender)?;
        self.require_external(&req.recipient)?;
        ctx.check_deadline(req.deadline)?;

        let held = ctx.ledger.balance_of(&req.sender, &req.sold_amount.denom);
        if held < req.sold_amount.amount {
            return Err(SwapError::InsufficientFunds(format!(
                "{} holds {held}{}, needs {}",
                req.sender, req.sold_amount.denom, req.sold_amount
            )));
        }
        let fee_rate = ctx.fee_rate()?;

        let native = self.config.native_denom();
        let direct = &req.sold_amount.denom == native || &req.bought_denom == native;
        let mut router = SwapRouter::new(&self.config, &mut self.pairs);
        if direct {
            router.direct_swap(ctx, req, &fee_rate)
        } else {
            router.routed_swap(ctx, req, &fee_rate)
        }
    }

    /// The module account holds pool reserves and cannot trade against
    /// them.
    fn require_external(&self, account: &AccountId) -> Result<(), SwapError> {
        if account == self.config.module_account() {
            return Err(SwapError::Validation(format!(
                "module account {account} cannot take part in a request"
            )));
        }
        Ok(())
    }

    // -- queries ------------------------------------------------------------

    /// Prices a swap against current state without executing it.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`] on an invalid fee rate or equal denoms.
    /// - [`SwapError::NotFound`] if a pool on the route does not exist.
    pub fn quote(
        &self,
        params: &dyn ParamStore,
        sold: &Coin,
        bought_denom: &Denom,
    ) -> Result<Route, SwapError> {
        let fee_rate = self.params(params)?.fee_rate;
        plan_route(&self.config, &self.pairs, sold, bought_denom, &fee_rate)
    }

    /// Amount of `bought_denom` that selling `sold` would yield now.
    ///
    /// Zero if the sold amount is too small to buy anything.
    ///
    /// # Errors
    ///
    /// As [`quote`](Self::quote).
    pub fn quote_buy_amount(
        &self,
        params: &dyn ParamStore,
        sold: &Coin,
        bought_denom: &Denom,
    ) -> Result<Decimal, SwapError> {
        self.quote(params, sold, bought_denom)
            .map(|route| route.bought().amount)
    }

    /// The pool stored under `pair_id`.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if there is none.
    pub fn get_pool(&self, pair_id: &PairId) -> Result<&Pool, SwapError> {
        self.pairs.get(pair_id)
    }

    /// The pool pairing `token` with the native token.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if there is none.
    pub fn pool_for_token(&self, token: &Denom) -> Result<&Pool, SwapError> {
        self.pairs.get(&self.config.pair_id(token))
    }

    /// Every pool, in creation order.
    pub fn list_pools(&self) -> impl Iterator<Item = &Pool> {
        self.pairs.list()
    }

    /// Outstanding share supply of the pool `pair_id`.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if the pool does not exist.
    pub fn share_supply(&self, pair_id: &PairId) -> Result<Decimal, SwapError> {
        let pool = self.pairs.get(pair_id)?;
        self.shares.total_supply(pool.share_token_id())
    }

    /// Base and native coins that burning `liquidity` shares of the pool
    /// for `token` would return now.
    ///
    /// # Errors
    ///
    /// - [`SwapError::NotFound`] if the pool does not exist.
    /// - [`SwapError::InsufficientFunds`] if `liquidity` exceeds the supply.
    /// - [`SwapError::Invariant`] if the supply is zero.
    pub fn redeemable_assets(
        &self,
        token: &Denom,
        liquidity: &Decimal,
    ) -> Result<(Coin, Coin), SwapError> {
        let pool = self.pool_for_token(token)?;
        let supply = self.shares.total_supply(pool.share_token_id())?;
        if liquidity > &supply {
            return Err(SwapError::InsufficientFunds(format!(
                "liquidity {liquidity} exceeds {} supply {supply}",
                pool.share_token_id()
            )));
        }
        let redemption = PricingEngine::redeem_amounts(pool, &supply, liquidity)?;
        Ok((
            Coin::new(pool.base_denom().clone(), redemption.base),
            Coin::new(pool.quote_denom().clone(), redemption.quote),
        ))
    }

    /// Current governance parameters, validated.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] if the stored set is invalid.
    pub fn params(&self, params: &dyn ParamStore) -> Result<Params, SwapError> {
        let current = params.params();
        current.validate()?;
        Ok(current)
    }
}
