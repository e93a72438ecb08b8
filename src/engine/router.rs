//! Direct and two-hop swaps through the native token.
//!
//! A swap where either side is the native token touches one pool.  Any
//! other swap is routed: leg 1 sells into the native token on the sold
//! token's pool, leg 2 sells that native amount on the bought token's
//! pool.  Both legs are priced from the pre-request state before either
//! executes, and only the final output is checked against the caller's
//! minimum.
//!
//! Leg 1 has no minimum of its own.  If leg 2 fails after leg 1 has
//! executed, leg 1 stays committed.

use tracing::{debug, info, warn};

use super::ExecContext;
use crate::config::EngineConfig;
use crate::domain::{AccountId, Coin, Decimal, Denom, PairId, Swap, SwapOutcome};
use crate::error::SwapError;
use crate::pools::{PairRegistry, PricingEngine};
use crate::traits::Event;

/// One priced single-pool trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapLeg {
    /// Pool the leg trades against.
    pub pair_id: PairId,
    /// Coins paid into the pool.
    pub sold: Coin,
    /// Coins paid out of the pool.
    pub bought: Coin,
    /// `true` if the native token is sold.
    pub sold_is_quote: bool,
}

/// A priced swap: one leg, or two legs through the native token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Either side is the native token.
    Direct(SwapLeg),
    /// Neither side is the native token.
    Routed {
        /// Sold token into the native token.
        first: SwapLeg,
        /// Native token into the bought token.
        second: SwapLeg,
    },
}

impl Route {
    /// Final output of the route.
    #[must_use]
    pub const fn bought(&self) -> &Coin {
        match self {
            Self::Direct(leg) | Self::Routed { second: leg, .. } => &leg.bought,
        }
    }

    /// Native amount passed between the legs, if routed.
    #[must_use]
    pub const fn intermediate(&self) -> Option<&Coin> {
        match self {
            Self::Direct(_) => None,
            Self::Routed { first, .. } => Some(&first.bought),
        }
    }
}

/// Prices selling `sold` for `bought_denom` without touching any state.
///
/// A zero output is returned as is; executing callers reject it.
///
/// # Errors
///
/// - [`SwapError::Validation`] if both denominations are equal.
/// - [`SwapError::NotFound`] if a pool on the route does not exist.
/// - [`SwapError::Overflow`] on unrepresentable intermediates.
pub fn plan_route(
    config: &EngineConfig,
    pairs: &PairRegistry,
    sold: &Coin,
    bought_denom: &Denom,
    fee_rate: &Decimal,
) -> Result<Route, SwapError> {
    if &sold.denom == bought_denom {
        return Err(SwapError::Validation(format!(
            "cannot swap {bought_denom} for itself"
        )));
    }
    let native = config.native_denom();
    if &sold.denom == native || bought_denom == native {
        return price_leg(config, pairs, sold.clone(), bought_denom, fee_rate).map(Route::Direct);
    }

    let first = price_leg(config, pairs, sold.clone(), native, fee_rate)?;
    let second = price_leg(config, pairs, first.bought.clone(), bought_denom, fee_rate)?;
    Ok(Route::Routed { first, second })
}

fn price_leg(
    config: &EngineConfig,
    pairs: &PairRegistry,
    sold: Coin,
    bought_denom: &Denom,
    fee_rate: &Decimal,
) -> Result<SwapLeg, SwapError> {
    let sold_is_quote = &sold.denom == config.native_denom();
    let token = if sold_is_quote {
        bought_denom
    } else {
        &sold.denom
    };
    let pair_id = config.pair_id(token);
    let pool = pairs.get(&pair_id)?;
    let amount = PricingEngine::buy_amount(pool, &sold.amount, sold_is_quote, fee_rate)?;
    Ok(SwapLeg {
        pair_id,
        sold,
        bought: Coin::new(bought_denom.clone(), amount),
        sold_is_quote,
    })
}

/// Executes swaps against borrowed engine state.
#[derive(Debug)]
pub struct SwapRouter<'e> {
    config: &'e EngineConfig,
    pairs: &'e mut PairRegistry,
}

impl<'e> SwapRouter<'e> {
    /// Borrows the state one request needs.
    pub fn new(config: &'e EngineConfig, pairs: &'e mut PairRegistry) -> Self {
        Self { config, pairs }
    }

    /// Prices a swap without executing it.
    ///
    /// # Errors
    ///
    /// See [`plan_route`].
    pub fn quote(
        &self,
        sold: &Coin,
        bought_denom: &Denom,
        fee_rate: &Decimal,
    ) -> Result<Route, SwapError> {
        plan_route(self.config, &*self.pairs, sold, bought_denom, fee_rate)
    }

    /// Swaps on a single pool; one side of `req` is the native token.
    ///
    /// # Errors
    ///
    /// - [`SwapError::NotFound`] if the pool does not exist.
    /// - [`SwapError::Validation`] if nothing would be bought.
    /// - [`SwapError::Slippage`] if the output is below the minimum.
    /// - [`SwapError::InsufficientFunds`] if the sender cannot pay.
    pub fn direct_swap(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &Swap,
        fee_rate: &Decimal,
    ) -> Result<SwapOutcome, SwapError> {
        let leg = price_leg(
            self.config,
            &*self.pairs,
            req.sold_amount.clone(),
            &req.bought_denom,
            fee_rate,
        )?;
        require_output(&leg.bought)?;
        require_minimum(&leg.bought, &req.min_bought_amount)?;

        self.execute_leg(ctx, &leg, &req.sender, &req.recipient)?;
        emit_swap(ctx, req, &leg.bought);
        info!(
            pair = %leg.pair_id,
            sender = %req.sender,
            recipient = %req.recipient,
            sold = %leg.sold,
            bought = %leg.bought,
            "direct swap"
        );
        Ok(SwapOutcome {
            bought: leg.bought,
            intermediate: None,
        })
    }

    /// Swaps through the native token across two pools.
    ///
    /// Leg 1 pays the native amount to the sender, leg 2 sells it from the
    /// sender to the recipient.
    ///
    /// # Errors
    ///
    /// As [`direct_swap`](Self::direct_swap).  An error from leg 2 leaves
    /// leg 1 committed.
    pub fn routed_swap(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &Swap,
        fee_rate: &Decimal,
    ) -> Result<SwapOutcome, SwapError> {
        let route = self.quote(&req.sold_amount, &req.bought_denom, fee_rate)?;
        let Route::Routed { first, second } = route else {
            return Err(SwapError::Validation(format!(
                "{} to {} does not route through {}",
                req.sold_amount.denom,
                req.bought_denom,
                self.config.native_denom()
            )));
        };
        require_output(&first.bought)?;
        require_output(&second.bought)?;
        require_minimum(&second.bought, &req.min_bought_amount)?;
        debug!(
            first = %first.pair_id,
            second = %second.pair_id,
            intermediate = %first.bought,
            bought = %second.bought,
            "priced routed swap"
        );

        self.execute_leg(ctx, &first, &req.sender, &req.sender)?;
        if let Err(err) = self.execute_leg(ctx, &second, &req.sender, &req.recipient) {
            warn!(
                first = %first.pair_id,
                second = %second.pair_id,
                %err,
                "second leg failed after first leg was committed"
            );
            return Err(err);
        }

        emit_swap(ctx, req, &second.bought);
        info!(
            sender = %req.sender,
            recipient = %req.recipient,
            sold = %first.sold,
            intermediate = %first.bought,
            bought = %second.bought,
            "routed swap"
        );
        Ok(SwapOutcome {
            bought: second.bought,
            intermediate: Some(first.bought),
        })
    }

    fn execute_leg(
        &mut self,
        ctx: &mut ExecContext<'_>,
        leg: &SwapLeg,
        payer: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), SwapError> {
        let pool = self.pairs.get(&leg.pair_id)?;
        let next = pool.with_swap(leg.sold_is_quote, &leg.sold.amount, &leg.bought.amount)?;
        let module = self.config.module_account();

        ctx.ledger
            .transfer(payer, module, core::slice::from_ref(&leg.sold))?;
        if let Err(err) = ctx
            .ledger
            .transfer(module, recipient, core::slice::from_ref(&leg.bought))
        {
            warn!(
                pair = %leg.pair_id,
                %err,
                "payout failed after sold coins reached the pool"
            );
            return Err(err.into());
        }
        self.pairs.set(next);
        Ok(())
    }
}

fn require_output(bought: &Coin) -> Result<(), SwapError> {
    if bought.is_zero() {
        return Err(SwapError::validation(
            "sold amount is too small to buy any token",
        ));
    }
    Ok(())
}

fn require_minimum(bought: &Coin, min: &Decimal) -> Result<(), SwapError> {
    if &bought.amount < min {
        return Err(SwapError::Slippage(format!(
            "expected at least {min}{} but got {bought}",
            bought.denom
        )));
    }
    Ok(())
}

fn emit_swap(ctx: &mut ExecContext<'_>, req: &Swap, bought: &Coin) {
    ctx.emit(
        Event::new("swap")
            .attr("sold_token_amount", &req.sold_amount)
            .attr("bought_token_amount", bought)
            .attr("recipient", &req.recipient),
    );
}
