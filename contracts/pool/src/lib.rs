//! Pooled fundraising escrow.
//!
//! Contributors deposit the pool currency while the pool is active. An
//! admin then closes the pool, which pays the platform fee, the admin fee
//! and the remainder to the payout target, after which tokens delivered to
//! the pool are claimable pro rata in one or more batches. Bouncers (the
//! platform role) gate admission, pause the pool and co-sign emergency
//! withdrawals together with an admin.
//!
//! Time-sensitive checks read the ledger timestamp, which validators can
//! skew by a few seconds; nothing here depends on finer resolution.

#![no_std]

mod access;
mod admission;
mod claims;
mod emergency;
mod error;
mod events;
mod fees;
mod ledger;
mod lifecycle;
mod storage;
mod types;


use access::AccessRegistry;
use claims::TokenClaimEngine;
use emergency::EmergencyVouchController;
use ledger::ContributionLedger;
use lifecycle::PoolLifecycle;
use storage::Storage;

pub use error::Error;
pub use types::{Admission, FeeRatio, PoolConfig, PoolState, Role, TokenBatch, VouchFlags};

use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, Symbol, Vec};

#[contract]
pub struct PoolContract;

#[contractimpl]
impl PoolContract {
    // ============================================
    // INITIALIZATION & ROLES
    // ============================================

    /// Initialize the pool
    ///
    /// `owner` is the platform side: it controls the role registry and is
    /// the default Bouncer. `creator` becomes Admin only. `admins` and
    /// `bouncers` are granted their roles.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Pool already initialized
    /// - `InvalidParams`: Negative cap, unusable fee ratios, owner acting
    ///   as creator, or a payout wallet pointing at the pool itself
    pub fn init(
        env: Env,
        owner: Address,
        creator: Address,
        config: PoolConfig,
        admins: Vec<Address>,
        bouncers: Vec<Address>,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();
        creator.require_auth();

        if owner == creator || config.max_allocation < 0 {
            return Err(Error::InvalidParams);
        }
        fees::validate_ratios(&config.poolbase_fee, &config.admin_pool_fee)?;

        let pool = env.current_contract_address();
        if config.admin_payout_wallet == pool
            || config.poolbase_payout_wallet == pool
            || config.payout_wallet.as_ref() == Some(&pool)
        {
            return Err(Error::InvalidParams);
        }

        Storage::set_config(&env, &config);
        Storage::set_state(&env, PoolState::Active);
        Storage::set_paused(&env, false);
        AccessRegistry::seed(&env, &owner, &creator, &admins, &bouncers);
        Storage::bump_instance(&env);

        log!(&env, "pool initialized by {}", creator);
        Ok(())
    }

    /// Grant `role` to `principal` (registry owner only)
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the registry owner
    pub fn grant_role(env: Env, caller: Address, principal: Address, role: Role) -> Result<(), Error> {
        AccessRegistry::grant_role(&env, &caller, &principal, role)
    }

    /// Revoke `role` from `principal` (registry owner only)
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the registry owner
    pub fn revoke_role(env: Env, caller: Address, principal: Address, role: Role) -> Result<(), Error> {
        AccessRegistry::revoke_role(&env, &caller, &principal, role)
    }

    pub fn has_role(env: Env, principal: Address, role: Role) -> bool {
        AccessRegistry::has_role(&env, &principal, role)
    }

    /// Register the ed25519 key a bouncer signs admissions with
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not a bouncer
    pub fn register_admission_key(env: Env, bouncer: Address, key: BytesN<32>) -> Result<(), Error> {
        AccessRegistry::register_admission_key(&env, &bouncer, &key)
    }

    // ============================================
    // CONTRIBUTIONS
    // ============================================

    /// Deposit `amount` of the pool currency
    ///
    /// # Errors
    /// - `InvalidParams`: Amount not positive
    /// - `InvalidState`: Pool not active
    /// - `ContractPaused`: Pool is paused
    /// - `CapExceeded`: Deposit would exceed max_allocation
    /// - `Unauthorized`: Admission missing or not signed by a bouncer key
    pub fn deposit(
        env: Env,
        contributor: Address,
        amount: i128,
        admission: Option<Admission>,
    ) -> Result<(), Error> {
        Storage::bump_instance(&env);
        ContributionLedger::deposit(&env, &contributor, amount, &admission)
    }

    /// Withdraw the whole contribution while refunding
    ///
    /// # Errors
    /// - `InvalidState`: Pool not refunding
    /// - `NothingToRefund`: No recorded contribution
    /// - `Unauthorized`: Admission missing or not signed by a bouncer key
    pub fn refund(env: Env, contributor: Address, admission: Option<Admission>) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        ContributionLedger::refund(&env, &contributor, &admission)
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidState`: Pool not active
    pub fn enable_refunds(env: Env, admin: Address) -> Result<(), Error> {
        PoolLifecycle::enable_refunds(&env, &admin)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not a bouncer
    /// - `InvalidState`: Pool not active
    pub fn emergency_set_state_to_refunding(env: Env, bouncer: Address) -> Result<(), Error> {
        PoolLifecycle::emergency_set_state_to_refunding(&env, &bouncer)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not a bouncer
    /// - `InvalidState`: Pool not in emergency refunding
    pub fn emergency_set_state_to_active(env: Env, bouncer: Address) -> Result<(), Error> {
        PoolLifecycle::emergency_set_state_to_active(&env, &bouncer)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not a bouncer
    /// - `InvalidPauseState`: Already paused
    pub fn pause(env: Env, bouncer: Address) -> Result<(), Error> {
        PoolLifecycle::pause(&env, &bouncer)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not a bouncer
    /// - `InvalidPauseState`: Not paused
    pub fn unpause(env: Env, bouncer: Address) -> Result<(), Error> {
        PoolLifecycle::unpause(&env, &bouncer)
    }

    /// Close the pool and distribute its currency balance
    ///
    /// `payout_target` defaults to the configured payout wallet. With a
    /// `payout_selector` the target contract is invoked as
    /// `selector(pool, amount)` after receiving the funds.
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `ContractPaused`: Pool is paused
    /// - `InvalidState`: Pool not active
    /// - `PayoutWalletNotSet`: No target given and none configured
    /// - `PayoutFailed`: Target rejected the payout call
    pub fn admin_closes_pool(
        env: Env,
        admin: Address,
        payout_target: Option<Address>,
        payout_selector: Option<Symbol>,
    ) -> Result<(), Error> {
        Storage::bump_instance(&env);
        PoolLifecycle::admin_closes_pool(&env, &admin, &payout_target, &payout_selector)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidState`: Pool not active
    /// - `InvalidParams`: Ratio unusable with the platform fee
    pub fn set_admin_pool_fee(env: Env, admin: Address, fee: FeeRatio) -> Result<(), Error> {
        PoolLifecycle::set_admin_pool_fee(&env, &admin, &fee)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidState`: Pool not active
    pub fn set_admin_payout_wallet(env: Env, admin: Address, wallet: Address) -> Result<(), Error> {
        PoolLifecycle::set_admin_payout_wallet(&env, &admin, &wallet)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidState`: Pool not active
    /// - `InvalidParams`: Negative, or below the amount already raised
    pub fn set_max_allocation(env: Env, admin: Address, max_allocation: i128) -> Result<(), Error> {
        PoolLifecycle::set_max_allocation(&env, &admin, max_allocation)
    }

    // ============================================
    // TOKEN PAYOUT
    // ============================================

    /// Record newly arrived payout tokens as a batch; returns its index
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidState`: Pool not closed
    /// - `InvalidParams`: Token differs from the first batch's token
    /// - `NoNewTokens`: Nothing arrived since the last batch
    pub fn admin_sets_batch(env: Env, admin: Address, token: Address) -> Result<u32, Error> {
        Storage::bump_instance(&env);
        TokenClaimEngine::admin_sets_batch(&env, &admin, &token)
    }

    /// Claim every token the contributor is entitled to so far
    ///
    /// # Errors
    /// - `InvalidState`: No batch recorded yet
    /// - `NothingToClaim`: Entitlement already claimed
    /// - `Unauthorized`: Admission missing or not signed by a bouncer key
    pub fn claim_token(env: Env, contributor: Address, admission: Option<Admission>) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        TokenClaimEngine::claim_token(&env, &contributor, &admission)
    }

    // ============================================
    // EMERGENCY
    // ============================================

    pub fn vouch_as_admin(env: Env, admin: Address) -> Result<(), Error> {
        EmergencyVouchController::vouch_as_admin(&env, &admin)
    }

    pub fn vouch_as_poolbase(env: Env, bouncer: Address) -> Result<(), Error> {
        EmergencyVouchController::vouch_as_poolbase(&env, &bouncer)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidParams`: Amount not positive or beneficiary is the pool
    /// - `VouchesNotSet`: Admin and poolbase vouches missing
    pub fn emergency_remove_wei(
        env: Env,
        admin: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), Error> {
        EmergencyVouchController::emergency_remove_wei(&env, &admin, &beneficiary, amount)
    }

    /// # Errors
    /// - `Unauthorized`: Caller is not an admin
    /// - `InvalidParams`: Amount not positive or beneficiary is the pool
    /// - `VouchesNotSet`: Admin and poolbase vouches missing
    pub fn emergency_remove_tokens(
        env: Env,
        admin: Address,
        token: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), Error> {
        EmergencyVouchController::emergency_remove_tokens(&env, &admin, &token, &beneficiary, amount)
    }

    pub fn emergency_accept_all_payments(env: Env, bouncer: Address, accept: bool) -> Result<(), Error> {
        EmergencyVouchController::emergency_accept_all_payments(&env, &bouncer, accept)
    }

    /// Send currency to the pool outside of a deposit
    ///
    /// # Errors
    /// - `PaymentsNotAccepted`: Direct payments are switched off
    pub fn receive_payment(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        EmergencyVouchController::receive_payment(&env, &from, amount)
    }

    /// # Errors
    /// - `Unauthorized`: Sender is not the configured payout wallet
    pub fn emergency_receive_from_payout(
        env: Env,
        from: Address,
        amount: i128,
    ) -> Result<(), Error> {
        EmergencyVouchController::emergency_receive_from_payout(&env, &from, amount)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        Storage::get_config(&env)
    }

    pub fn state(env: Env) -> PoolState {
        Storage::get_state(&env)
    }

    pub fn paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn contribution_of(env: Env, contributor: Address) -> i128 {
        ContributionLedger::contribution_of(&env, &contributor)
    }

    pub fn total_raised(env: Env) -> i128 {
        ContributionLedger::total_raised(&env)
    }

    pub fn claimable(env: Env, contributor: Address) -> Result<i128, Error> {
        TokenClaimEngine::claimable(&env, &contributor)
    }

    pub fn claimed_of(env: Env, contributor: Address) -> i128 {
        Storage::get_claimed(&env, &contributor)
    }

    pub fn total_claimed(env: Env) -> i128 {
        Storage::get_total_claimed(&env)
    }

    pub fn batch_count(env: Env) -> u32 {
        Storage::get_batch_count(&env)
    }

    pub fn get_batch(env: Env, index: u32) -> Option<TokenBatch> {
        Storage::get_batch(&env, index)
    }

    pub fn cumulative_tokens(env: Env) -> i128 {
        Storage::get_cumulative_tokens(&env)
    }

    pub fn payout_token(env: Env) -> Option<Address> {
        Storage::get_payout_token(&env)
    }

    pub fn vouches(env: Env) -> VouchFlags {
        EmergencyVouchController::vouches(&env)
    }

    pub fn accept_all_payments(env: Env) -> bool {
        EmergencyVouchController::accepts_all_payments(&env)
    }

    /// Digest a bouncer signs to admit `contributor` into this pool
    pub fn admission_digest(env: Env, contributor: Address) -> BytesN<32> {
        admission::admission_digest(&env, &env.current_contract_address(), &contributor)
    }
}
