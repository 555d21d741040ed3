use crate::access::AccessRegistry;
use crate::admission;
use crate::error::Error;
use crate::events::{self, TokenConfirmedEvent, TOKENS_CLAIMED, TOKEN_CONFIRMED};
use crate::storage::Storage;
use crate::types::{Admission, PoolState, Role, TokenBatch};
use soroban_sdk::{log, token, Address, Env};

pub struct TokenClaimEngine;

impl TokenClaimEngine {
    /// Record the tokens that arrived since the previous batch
    ///
    /// Inflow is observed as `balance + total_claimed`, so tokens may be
    /// sent to the pool at any time before this call. The first batch moves
    /// the pool from Closed to TokenPayout and fixes the payout token.
    pub fn admin_sets_batch(env: &Env, admin: &Address, token: &Address) -> Result<u32, Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;

        let state = Storage::get_state(env);
        if state != PoolState::Closed && state != PoolState::TokenPayout {
            return Err(Error::InvalidState);
        }

        if let Some(payout_token) = Storage::get_payout_token(env) {
            if payout_token != *token {
                return Err(Error::InvalidParams);
            }
        }

        let pool = env.current_contract_address();
        let balance = token::Client::new(env, token).balance(&pool);
        let observed = balance
            .checked_add(Storage::get_total_claimed(env))
            .ok_or(Error::Overflow)?;

        if observed <= Storage::get_cumulative_tokens(env) {
            return Err(Error::NoNewTokens);
        }

        let batch = TokenBatch {
            index: Storage::get_batch_count(env),
            cumulative_tokens_added: observed,
            timestamp: env.ledger().timestamp(),
        };
        Storage::push_batch(env, &batch);
        Storage::set_payout_token(env, token);
        Storage::set_state(env, PoolState::TokenPayout);

        log!(env, "token batch {} cumulative {}", batch.index, observed);
        events::publish(
            env,
            TOKEN_CONFIRMED,
            admin,
            TokenConfirmedEvent {
                pool,
                token: token.clone(),
                batch_index: batch.index,
                cumulative_tokens_added: observed,
            },
        );
        Ok(batch.index)
    }

    /// Tokens the contributor may claim right now
    pub fn claimable(env: &Env, contributor: &Address) -> Result<i128, Error> {
        let entitled = Self::entitlement(env, contributor)?;
        Ok(entitled - Storage::get_claimed(env, contributor))
    }

    /// Proportional share of every token observed so far
    ///
    /// Formula: contribution × cumulative_tokens / total_raised (floor)
    fn entitlement(env: &Env, contributor: &Address) -> Result<i128, Error> {
        let contribution = Storage::get_contribution(env, contributor);
        let total_raised = Storage::get_total_raised(env);
        if contribution == 0 || total_raised == 0 {
            return Ok(0);
        }

        contribution
            .checked_mul(Storage::get_cumulative_tokens(env))
            .ok_or(Error::Overflow)?
            .checked_div(total_raised)
            .ok_or(Error::Overflow)
    }

    /// Transfer the contributor's not-yet-claimed entitlement
    ///
    /// The high-water mark is raised before the transfer, so a second claim
    /// without a new batch finds nothing.
    pub fn claim_token(
        env: &Env,
        contributor: &Address,
        admission: &Option<Admission>,
    ) -> Result<i128, Error> {
        contributor.require_auth();

        let config = Storage::get_config(env)?;
        if Storage::get_state(env) != PoolState::TokenPayout {
            return Err(Error::InvalidState);
        }

        admission::check(env, config.admission_required, contributor, admission)?;

        let amount = Self::claimable(env, contributor)?;
        if amount <= 0 {
            return Err(Error::NothingToClaim);
        }

        let token = Storage::get_payout_token(env).ok_or(Error::InvalidState)?;

        let claimed = Storage::get_claimed(env, contributor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let total_claimed = Storage::get_total_claimed(env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        Storage::set_claimed(env, contributor, claimed);
        Storage::set_total_claimed(env, total_claimed);

        token::Client::new(env, &token).transfer(&env.current_contract_address(), contributor, &amount);

        events::contribution_event(env, TOKENS_CLAIMED, contributor, amount);
        Ok(amount)
    }
}
