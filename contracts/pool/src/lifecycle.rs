use crate::access::AccessRegistry;
use crate::error::Error;
use crate::events::{
    self, ClosedEvent, AdminPoolFeeSetEvent, MaxAllocationChangedEvent, WalletSetEvent,
    ADMIN_PAYOUT_WALLET_SET, ADMIN_POOL_FEE_SET, CLOSED, MAX_ALLOCATION_CHANGED, PAUSE,
    REFUNDS_ENABLED, STATE_RESTORED, UNPAUSE,
};
use crate::fees;
use crate::ledger::ContributionLedger;
use crate::storage::Storage;
use crate::types::{FeeRatio, PoolState, Role};
use soroban_sdk::{log, token, vec, Address, Env, IntoVal, Symbol};

pub struct PoolLifecycle;

impl PoolLifecycle {
    fn require_state(env: &Env, expected: PoolState) -> Result<(), Error> {
        if Storage::get_state(env) != expected {
            return Err(Error::InvalidState);
        }
        Ok(())
    }

    pub fn enable_refunds(env: &Env, admin: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;
        Self::require_state(env, PoolState::Active)?;

        Storage::set_state(env, PoolState::Refunding);

        events::pool_event(env, REFUNDS_ENABLED, admin);
        Ok(())
    }

    /// Bouncer-side refund switch; reversible with `emergency_set_state_to_active`
    pub fn emergency_set_state_to_refunding(env: &Env, bouncer: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;
        Self::require_state(env, PoolState::Active)?;

        Storage::set_state(env, PoolState::Refunding);
        Storage::set_emergency_refunding(env, true);

        log!(env, "emergency refunding enabled");
        events::pool_event(env, REFUNDS_ENABLED, bouncer);
        Ok(())
    }

    /// Undo an emergency refunding switch
    ///
    /// Only refunding entered through the emergency path can be undone.
    pub fn emergency_set_state_to_active(env: &Env, bouncer: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;
        Self::require_state(env, PoolState::Refunding)?;

        if !Storage::is_emergency_refunding(env) {
            return Err(Error::InvalidState);
        }

        Storage::set_state(env, PoolState::Active);
        Storage::set_emergency_refunding(env, false);

        events::pool_event(env, STATE_RESTORED, bouncer);
        Ok(())
    }

    pub fn pause(env: &Env, bouncer: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;

        if Storage::is_paused(env) {
            return Err(Error::InvalidPauseState);
        }
        Storage::set_paused(env, true);

        events::pool_event(env, PAUSE, bouncer);
        Ok(())
    }

    pub fn unpause(env: &Env, bouncer: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;

        if !Storage::is_paused(env) {
            return Err(Error::InvalidPauseState);
        }
        Storage::set_paused(env, false);

        events::pool_event(env, UNPAUSE, bouncer);
        Ok(())
    }

    /// Close the pool and pay out its currency balance
    ///
    /// Order of transfers: platform fee, admin fee (when paid in currency),
    /// then the remainder to the payout target. With a selector, the target
    /// is invoked as `selector(pool, amount)` after receiving the funds; a
    /// rejection aborts the whole close.
    pub fn admin_closes_pool(
        env: &Env,
        admin: &Address,
        payout_target: &Option<Address>,
        payout_selector: &Option<Symbol>,
    ) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;

        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Self::require_state(env, PoolState::Active)?;

        let config = Storage::get_config(env)?;
        let target = payout_target
            .clone()
            .or(config.payout_wallet.clone())
            .ok_or(Error::PayoutWalletNotSet)?;

        let pool = env.current_contract_address();
        let currency = token::Client::new(env, &config.currency);
        let balance = currency.balance(&pool);

        let split = fees::split(
            balance,
            &config.poolbase_fee,
            &config.admin_pool_fee,
            config.is_admin_fee_in_wei,
        )?;

        // State first; every transfer below happens after the pool is closed.
        if !config.is_admin_fee_in_wei {
            ContributionLedger::credit(env, &config.admin_payout_wallet, split.admin_fee)?;
        }
        Storage::set_state(env, PoolState::Closed);

        if split.poolbase_fee > 0 {
            currency.transfer(&pool, &config.poolbase_payout_wallet, &split.poolbase_fee);
        }
        if config.is_admin_fee_in_wei && split.admin_fee > 0 {
            currency.transfer(&pool, &config.admin_payout_wallet, &split.admin_fee);
        }
        if split.payout > 0 {
            currency.transfer(&pool, &target, &split.payout);
        }

        if let Some(selector) = payout_selector {
            let outcome = env.try_invoke_contract::<(), Error>(
                &target,
                selector,
                vec![env, pool.into_val(env), split.payout.into_val(env)],
            );
            if !matches!(outcome, Ok(Ok(()))) {
                return Err(Error::PayoutFailed);
            }
        }

        log!(env, "pool closed, payout {}", split.payout);
        events::publish(
            env,
            CLOSED,
            admin,
            ClosedEvent {
                pool,
                payout_target: target,
                payout_amount: split.payout,
                poolbase_fee: split.poolbase_fee,
                admin_fee: split.admin_fee,
                admin_fee_in_wei: config.is_admin_fee_in_wei,
            },
        );
        Ok(())
    }

    pub fn set_admin_pool_fee(env: &Env, admin: &Address, fee: &FeeRatio) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;
        Self::require_state(env, PoolState::Active)?;

        let mut config = Storage::get_config(env)?;
        fees::validate_ratios(&config.poolbase_fee, fee)?;
        config.admin_pool_fee = *fee;
        Storage::set_config(env, &config);

        events::publish(
            env,
            ADMIN_POOL_FEE_SET,
            admin,
            AdminPoolFeeSetEvent {
                pool: env.current_contract_address(),
                fee: *fee,
            },
        );
        Ok(())
    }

    pub fn set_admin_payout_wallet(env: &Env, admin: &Address, wallet: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;
        Self::require_state(env, PoolState::Active)?;

        let pool = env.current_contract_address();
        if *wallet == pool {
            return Err(Error::InvalidParams);
        }

        let mut config = Storage::get_config(env)?;
        config.admin_payout_wallet = wallet.clone();
        Storage::set_config(env, &config);

        events::publish(
            env,
            ADMIN_PAYOUT_WALLET_SET,
            admin,
            WalletSetEvent {
                pool,
                wallet: wallet.clone(),
            },
        );
        Ok(())
    }

    /// Change the pool cap; 0 removes it
    pub fn set_max_allocation(env: &Env, admin: &Address, max_allocation: i128) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;
        Self::require_state(env, PoolState::Active)?;

        if max_allocation < 0
            || (max_allocation > 0 && max_allocation < Storage::get_total_raised(env))
        {
            return Err(Error::InvalidParams);
        }

        let mut config = Storage::get_config(env)?;
        config.max_allocation = max_allocation;
        Storage::set_config(env, &config);

        events::publish(
            env,
            MAX_ALLOCATION_CHANGED,
            admin,
            MaxAllocationChangedEvent {
                pool: env.current_contract_address(),
                max_allocation,
            },
        );
        Ok(())
    }
}
