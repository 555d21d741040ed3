//! Fixed-rate token sale with a funding threshold.
//!
//! Contributors deposit during `[start_time, end_time]` and are owed
//! `amount * rate` tokens. Once the window closes the sale either
//! succeeds (threshold met: funds go to the wallet and tokens become
//! claimable in percentage tranches) or fails (contributors take their
//! currency back).
//!
//! The window is checked against the ledger timestamp, which validators
//! can move by a few seconds.

#![no_std]

mod error;
mod events;
mod storage;

#[cfg(test)]
mod test;

pub use error::Error;
pub use storage::{SaleConfig, SaleState};

use events::*;
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};

#[contract]
pub struct FelixPool;

#[contractimpl]
impl FelixPool {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the sale
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Sale already initialized
    /// - `InvalidParams`: Window reversed, non-positive rate or cap, or
    ///   threshold outside `[0, cap]`
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        env: Env,
        admin: Address,
        currency: Address,
        wallet: Address,
        threshold: i128,
        cap: i128,
        start_time: u64,
        end_time: u64,
        rate: i128,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if start_time > end_time || rate <= 0 || cap <= 0 || threshold < 0 || threshold > cap {
            return Err(Error::InvalidParams);
        }

        storage::set_config(
            &env,
            &SaleConfig {
                admin,
                currency,
                wallet,
                threshold,
                cap,
                start_time,
                end_time,
                rate,
            },
        );
        storage::set_state(&env, SaleState::Funding);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Set the share of the remaining entitlement each claim releases
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the admin
    /// - `InvalidParams`: Percentage above 100
    pub fn set_claim_percentage(env: Env, admin: Address, percentage: u32) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;

        if percentage > 100 {
            return Err(Error::InvalidParams);
        }
        storage::set_claim_percentage(&env, percentage);

        env.events().publish(
            (Symbol::new(&env, "claim_percentage_set"), admin),
            ClaimPercentageSetEvent { percentage },
        );
        Ok(())
    }

    // ============================================
    // FUNDING
    // ============================================

    /// Contribute `amount` of the sale currency
    ///
    /// # Errors
    /// - `InvalidParams`: Amount not positive
    /// - `InvalidState`: Sale already finalized
    /// - `OutsideWindow`: Ledger time outside `[start_time, end_time]`
    /// - `CapExceeded`: Deposit would exceed the cap
    pub fn deposit(env: Env, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidParams);
        }

        let config = storage::get_config(&env)?;
        if storage::get_state(&env) != SaleState::Funding {
            return Err(Error::InvalidState);
        }

        let now = env.ledger().timestamp();
        if now < config.start_time || now > config.end_time {
            return Err(Error::OutsideWindow);
        }

        let total = storage::get_i128(&env, &DataKey::TotalContributions)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if total > config.cap {
            return Err(Error::CapExceeded);
        }

        let tokens = amount.checked_mul(config.rate).ok_or(Error::Overflow)?;
        let total_tokens = storage::get_i128(&env, &DataKey::TotalTokens)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;
        let contribution = storage::get_contribution(&env, &contributor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let entitlement = storage::get_entitlement(&env, &contributor)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;

        token::Client::new(&env, &config.currency).transfer(
            &contributor,
            &env.current_contract_address(),
            &amount,
        );

        storage::set_contribution(&env, &contributor, contribution);
        storage::set_entitlement(&env, &contributor, entitlement);
        storage::set_i128(&env, &DataKey::TotalContributions, total);
        storage::set_i128(&env, &DataKey::TotalTokens, total_tokens);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "contribution_made"), contributor.clone()),
            ContributionMadeEvent {
                contributor,
                amount,
                tokens,
            },
        );
        Ok(())
    }

    /// Return a contribution after a sale that missed its threshold
    ///
    /// The entitlement is dropped together with the contribution.
    ///
    /// # Errors
    /// - `InvalidState`: Window still open, or the threshold was met
    /// - `NothingToRefund`: No contribution recorded
    pub fn claim_refund(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();

        let config = storage::get_config(&env)?;
        let total = storage::get_i128(&env, &DataKey::TotalContributions);
        if env.ledger().timestamp() <= config.end_time
            || storage::get_state(&env) != SaleState::Funding
            || total >= config.threshold
        {
            return Err(Error::InvalidState);
        }

        let amount = storage::get_contribution(&env, &contributor);
        if amount == 0 {
            return Err(Error::NothingToRefund);
        }
        let tokens = storage::get_entitlement(&env, &contributor);

        storage::set_contribution(&env, &contributor, 0);
        storage::set_entitlement(&env, &contributor, 0);
        storage::set_i128(&env, &DataKey::TotalContributions, total - amount);
        storage::set_i128(
            &env,
            &DataKey::TotalTokens,
            storage::get_i128(&env, &DataKey::TotalTokens) - tokens,
        );

        token::Client::new(&env, &config.currency).transfer(
            &env.current_contract_address(),
            &contributor,
            &amount,
        );

        log!(&env, "refunded {}", amount);
        env.events().publish(
            (Symbol::new(&env, "refunded"), contributor.clone()),
            RefundedEvent {
                contributor,
                amount,
            },
        );
        Ok(amount)
    }

    /// Close a successful sale
    ///
    /// Forwards the raised currency to the wallet and opens token claims.
    /// `token` must already be held by the pool in the full owed amount.
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the admin
    /// - `InvalidState`: Already finalized, or window still open
    /// - `ThresholdNotMet`: Raise fell short of the threshold
    /// - `InsufficientTokens`: Pool holds fewer tokens than it owes
    pub fn finalize(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        let config = Self::require_admin(&env, &admin)?;

        if storage::get_state(&env) != SaleState::Funding
            || env.ledger().timestamp() <= config.end_time
        {
            return Err(Error::InvalidState);
        }

        let total_contributions = storage::get_i128(&env, &DataKey::TotalContributions);
        if total_contributions < config.threshold {
            return Err(Error::ThresholdNotMet);
        }

        let pool = env.current_contract_address();
        let total_tokens = storage::get_i128(&env, &DataKey::TotalTokens);
        if token::Client::new(&env, &token).balance(&pool) < total_tokens {
            return Err(Error::InsufficientTokens);
        }

        storage::set_state(&env, SaleState::TokenPayout);
        storage::set_payout_token(&env, &token);
        storage::bump_instance(&env);

        if total_contributions > 0 {
            token::Client::new(&env, &config.currency).transfer(
                &pool,
                &config.wallet,
                &total_contributions,
            );
        }

        log!(&env, "sale finalized with {}", total_contributions);
        env.events().publish(
            (Symbol::new(&env, "finalized"), admin),
            FinalizedEvent {
                wallet: config.wallet,
                token,
                total_contributions,
                total_tokens,
            },
        );
        Ok(())
    }

    // ============================================
    // TOKEN CLAIMS
    // ============================================

    /// Release the current percentage of the contributor's remaining tokens
    ///
    /// Formula: release = remaining × percentage / 100 (floor)
    ///
    /// # Errors
    /// - `InvalidState`: Sale not finalized
    /// - `NothingToClaim`: Release rounds to zero
    pub fn claim_tokens(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();

        if storage::get_state(&env) != SaleState::TokenPayout {
            return Err(Error::InvalidState);
        }
        let token = storage::get_payout_token(&env).ok_or(Error::InvalidState)?;

        let remaining = storage::get_entitlement(&env, &contributor);
        let release = remaining
            .checked_mul(storage::get_claim_percentage(&env) as i128)
            .ok_or(Error::Overflow)?
            / 100;
        if release <= 0 {
            return Err(Error::NothingToClaim);
        }

        let remaining = remaining - release;
        storage::set_entitlement(&env, &contributor, remaining);
        storage::set_i128(
            &env,
            &DataKey::TotalTokens,
            storage::get_i128(&env, &DataKey::TotalTokens) - release,
        );

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &contributor,
            &release,
        );

        env.events().publish(
            (Symbol::new(&env, "tokens_claimed"), contributor.clone()),
            TokensClaimedEvent {
                contributor,
                amount: release,
                remaining,
            },
        );
        Ok(release)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        storage::get_config(&env)
    }

    pub fn state(env: Env) -> SaleState {
        storage::get_state(&env)
    }

    pub fn total_contributions(env: Env) -> i128 {
        storage::get_i128(&env, &DataKey::TotalContributions)
    }

    /// Tokens still owed across all contributors
    pub fn total_tokens(env: Env) -> i128 {
        storage::get_i128(&env, &DataKey::TotalTokens)
    }

    pub fn contribution_of(env: Env, contributor: Address) -> i128 {
        storage::get_contribution(&env, &contributor)
    }

    pub fn entitlement_of(env: Env, contributor: Address) -> i128 {
        storage::get_entitlement(&env, &contributor)
    }

    pub fn claim_percentage(env: Env) -> u32 {
        storage::get_claim_percentage(&env)
    }

    pub fn payout_token(env: Env) -> Option<Address> {
        storage::get_payout_token(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_admin(env: &Env, caller: &Address) -> Result<SaleConfig, Error> {
        caller.require_auth();

        let config = storage::get_config(env)?;
        if *caller != config.admin {
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }
}
