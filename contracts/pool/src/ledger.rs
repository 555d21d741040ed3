use crate::admission;
use crate::error::Error;
use crate::events::{self, CONTRIBUTION_MADE, REFUNDED};
use crate::storage::Storage;
use crate::types::{Admission, PoolState};
use soroban_sdk::{log, token, Address, Env};

pub struct ContributionLedger;

impl ContributionLedger {
    /// Record a deposit of `amount` currency from `contributor`
    pub fn deposit(
        env: &Env,
        contributor: &Address,
        amount: i128,
        admission: &Option<Admission>,
    ) -> Result<(), Error> {
        contributor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidParams);
        }

        let config = Storage::get_config(env)?;

        if Storage::get_state(env) != PoolState::Active {
            return Err(Error::InvalidState);
        }
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }

        let total = Storage::get_total_raised(env);
        let new_total = total.checked_add(amount).ok_or(Error::Overflow)?;
        if config.max_allocation > 0 && new_total > config.max_allocation {
            return Err(Error::CapExceeded);
        }

        admission::check(env, config.admission_required, contributor, admission)?;

        let new_contribution = Storage::get_contribution(env, contributor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        let currency = token::Client::new(env, &config.currency);
        currency.transfer(contributor, &env.current_contract_address(), &amount);

        Storage::set_contribution(env, contributor, new_contribution);
        Storage::set_total_raised(env, new_total);

        events::contribution_event(env, CONTRIBUTION_MADE, contributor, amount);
        Ok(())
    }

    /// Return the caller's whole contribution while the pool is refunding
    ///
    /// The record is cleared before the currency leaves the pool, so a
    /// reentrant call sees nothing left to refund.
    pub fn refund(
        env: &Env,
        contributor: &Address,
        admission: &Option<Admission>,
    ) -> Result<i128, Error> {
        contributor.require_auth();

        let config = Storage::get_config(env)?;

        if Storage::get_state(env) != PoolState::Refunding {
            return Err(Error::InvalidState);
        }

        admission::check(env, config.admission_required, contributor, admission)?;

        let amount = Storage::get_contribution(env, contributor);
        if amount == 0 {
            return Err(Error::NothingToRefund);
        }

        let new_total = Storage::get_total_raised(env)
            .checked_sub(amount)
            .ok_or(Error::Overflow)?;
        Storage::set_contribution(env, contributor, 0);
        Storage::set_total_raised(env, new_total);

        let currency = token::Client::new(env, &config.currency);
        currency.transfer(&env.current_contract_address(), contributor, &amount);

        log!(env, "refunded {} to contributor", amount);
        events::contribution_event(env, REFUNDED, contributor, amount);
        Ok(amount)
    }

    /// Credit `amount` to `beneficiary` without moving currency
    ///
    /// Used for the admin fee when it is paid as a token share.
    pub fn credit(env: &Env, beneficiary: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }

        let new_contribution = Storage::get_contribution(env, beneficiary)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let new_total = Storage::get_total_raised(env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        Storage::set_contribution(env, beneficiary, new_contribution);
        Storage::set_total_raised(env, new_total);
        Ok(())
    }

    pub fn contribution_of(env: &Env, contributor: &Address) -> i128 {
        Storage::get_contribution(env, contributor)
    }

    pub fn total_raised(env: &Env) -> i128 {
        Storage::get_total_raised(env)
    }
}
