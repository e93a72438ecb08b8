//! Add and remove liquidity.
//!
//! Both operations follow the same shape: check the deadline, read a
//! snapshot of the pool and share supply, price it with
//! [`PricingEngine`], check the caller's bounds, compute the next pool
//! state, and only then touch the ledger.  Any failure before the first
//! ledger transfer leaves everything unchanged.
//!
//! The share mint (or burn) runs after reserves are committed.  If the
//! ledger rejects it the request fails but the reserve change stays.

use tracing::{debug, info, warn};

use super::ExecContext;
use crate::config::EngineConfig;
use crate::domain::{
    AddLiquidity, AddLiquidityOutcome, Coin, RemoveLiquidity, RemoveLiquidityOutcome,
    canonicalize_coins,
};
use crate::error::SwapError;
use crate::pools::{PairRegistry, PoolShareLedger, PricingEngine};
use crate::traits::Event;

/// Executes liquidity requests against borrowed engine state.
#[derive(Debug)]
pub struct LiquidityManager<'e> {
    config: &'e EngineConfig,
    pairs: &'e mut PairRegistry,
    shares: &'e mut PoolShareLedger,
}

impl<'e> LiquidityManager<'e> {
    /// Borrows the state one request needs.
    pub fn new(
        config: &'e EngineConfig,
        pairs: &'e mut PairRegistry,
        shares: &'e mut PoolShareLedger,
    ) -> Self {
        Self {
            config,
            pairs,
            shares,
        }
    }

    /// Deposits native and base tokens and mints shares to the sender.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`] if the deadline passed or no shares
    ///   would be minted.
    /// - [`SwapError::NotFound`] if the pool does not exist.
    /// - [`SwapError::Slippage`] if more than `max_base_amount` is needed or
    ///   fewer than `min_liquidity` shares result.
    /// - [`SwapError::InsufficientFunds`] if the sender cannot pay.
    /// - [`SwapError::Ledger`] if the share mint is rejected; reserves
    ///   have already moved in that case.
    pub fn add_liquidity(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &AddLiquidity,
    ) -> Result<AddLiquidityOutcome, SwapError> {
        ctx.check_deadline(req.deadline)?;

        let pair_id = req.pair_id(self.config.native_denom());
        let pool = self.pairs.get(&pair_id)?;
        let share_id = pool.share_token_id().clone();
        let supply = self.shares.total_supply(&share_id)?;

        let deposit = PricingEngine::liquidity_for_deposit(
            pool,
            &supply,
            &req.quote_amount.amount,
            &req.max_base_amount.amount,
        )?;
        debug!(
            pair = %pair_id,
            base_required = %deposit.base_required,
            liquidity = %deposit.liquidity_minted,
            "priced deposit"
        );

        if deposit.base_required > req.max_base_amount.amount {
            return Err(SwapError::Slippage(format!(
                "required base {} exceeds max base amount {}",
                deposit.base_required, req.max_base_amount.amount
            )));
        }
        if deposit.liquidity_minted < req.min_liquidity {
            return Err(SwapError::Slippage(format!(
                "liquidity {} is below min liquidity {}",
                deposit.liquidity_minted, req.min_liquidity
            )));
        }
        if deposit.liquidity_minted.is_zero() {
            return Err(SwapError::validation("deposit too small to mint liquidity"));
        }

        let next = pool.with_deposit(&deposit.base_required, &req.quote_amount.amount)?;
        let base_used = Coin::new(req.max_base_amount.denom.clone(), deposit.base_required);
        let coins = canonicalize_coins([req.quote_amount.clone(), base_used.clone()]);

        ctx.ledger
            .transfer(&req.sender, self.config.module_account(), &coins)?;
        self.pairs.set(next);

        let minted = Coin::new(share_id.clone(), deposit.liquidity_minted);
        if let Err(err) = ctx.ledger.mint(&req.sender, core::slice::from_ref(&minted)) {
            warn!(
                pair = %pair_id,
                %err,
                "share mint failed after reserves were committed"
            );
            return Err(err.into());
        }
        let supply = self
            .shares
            .record_mint(&share_id, &deposit.liquidity_minted)?;

        ctx.emit(
            Event::new("add_liquidity")
                .attr("pair_id", &pair_id)
                .attr("liquidity", deposit.liquidity_minted)
                .attr("base_amount", &base_used),
        );
        info!(
            pair = %pair_id,
            sender = %req.sender,
            liquidity = %deposit.liquidity_minted,
            base = %base_used,
            quote = %req.quote_amount,
            %supply,
            "liquidity added"
        );

        Ok(AddLiquidityOutcome {
            liquidity_minted: deposit.liquidity_minted,
            base_used,
        })
    }

    /// Burns the sender's shares and pays out a proportional part of both
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`] if the deadline passed or both payouts
    ///   truncate to zero.
    /// - [`SwapError::NotFound`] if the pool does not exist.
    /// - [`SwapError::InsufficientFunds`] if `liquidity_amount` exceeds the
    ///   share supply or the sender's share balance.
    /// - [`SwapError::Slippage`] if either payout is below its minimum.
    /// - [`SwapError::Ledger`] if the share burn is rejected; reserves have
    ///   already moved in that case.
    pub fn remove_liquidity(
        &mut self,
        ctx: &mut ExecContext<'_>,
        req: &RemoveLiquidity,
    ) -> Result<RemoveLiquidityOutcome, SwapError> {
        ctx.check_deadline(req.deadline)?;

        let pool = self.pairs.get(&req.pool_id)?;
        let share_id = pool.share_token_id().clone();
        let supply = self.shares.total_supply(&share_id)?;

        if req.liquidity_amount > supply {
            return Err(SwapError::InsufficientFunds(format!(
                "liquidity {} exceeds {share_id} supply {supply}",
                req.liquidity_amount
            )));
        }
        let held = ctx.ledger.balance_of(&req.sender, &share_id);
        if held < req.liquidity_amount {
            return Err(SwapError::InsufficientFunds(format!(
                "{} holds {held}{share_id}, needs {}",
                req.sender, req.liquidity_amount
            )));
        }

        let redemption = PricingEngine::redeem_amounts(pool, &supply, &req.liquidity_amount)?;
        let base_out = Coin::new(pool.base_denom().clone(), redemption.base);
        let quote_out = Coin::new(pool.quote_denom().clone(), redemption.quote);
        debug!(pair = %req.pool_id, base = %base_out, quote = %quote_out, "priced redemption");

        if base_out.amount < req.min_base_amount.amount {
            return Err(SwapError::Slippage(format!(
                "base out {base_out} is below min base amount {}",
                req.min_base_amount
            )));
        }
        if quote_out.amount < req.min_quote_amount.amount {
            return Err(SwapError::Slippage(format!(
                "quote out {quote_out} is below min quote amount {}",
                req.min_quote_amount
            )));
        }
        if base_out.is_zero() && quote_out.is_zero() {
            return Err(SwapError::validation(
                "liquidity too small to redeem any tokens",
            ));
        }

        let next = pool.with_withdrawal(&redemption.base, &redemption.quote)?;
        let coins = canonicalize_coins([base_out.clone(), quote_out.clone()]);

        ctx.ledger
            .transfer(self.config.module_account(), &req.sender, &coins)?;
        self.pairs.set(next);

        let burned = Coin::new(share_id.clone(), req.liquidity_amount);
        if let Err(err) = ctx.ledger.burn(&req.sender, core::slice::from_ref(&burned)) {
            warn!(
                pair = %req.pool_id,
                %err,
                "share burn failed after reserves were committed"
            );
            return Err(err.into());
        }
        let supply = self.shares.record_burn(&share_id, &req.liquidity_amount)?;

        ctx.emit(
            Event::new("remove_liquidity")
                .attr("pair_id", &req.pool_id)
                .attr("quote_amount", &quote_out)
                .attr("base_amount", &base_out),
        );
        info!(
            pair = %req.pool_id,
            sender = %req.sender,
            liquidity = %req.liquidity_amount,
            base = %base_out,
            quote = %quote_out,
            %supply,
            "liquidity removed"
        );

        Ok(RemoveLiquidityOutcome {
            base_out,
            quote_out,
        })
    }
}
