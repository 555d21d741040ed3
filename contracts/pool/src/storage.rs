use crate::error::Error;
use crate::types::{
    DataKey, PoolConfig, PoolState, Role, TokenBatch, VouchFlags, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
};
use soroban_sdk::{Address, BytesN, Env};

pub struct Storage;

impl Storage {
    pub fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    fn bump_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Config)
    }

    pub fn get_config(env: &Env) -> Result<PoolConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_config(env: &Env, config: &PoolConfig) {
        env.storage().instance().set(&DataKey::Config, config);
    }

    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_owner(env: &Env, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
    }

    // Lifecycle
    pub fn get_state(env: &Env) -> PoolState {
        env.storage()
            .instance()
            .get(&DataKey::State)
            .unwrap_or(PoolState::Active)
    }

    pub fn set_state(env: &Env, state: PoolState) {
        env.storage().instance().set(&DataKey::State, &state);
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    pub fn is_emergency_refunding(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::EmergencyRefunding)
            .unwrap_or(false)
    }

    pub fn set_emergency_refunding(env: &Env, flag: bool) {
        env.storage()
            .instance()
            .set(&DataKey::EmergencyRefunding, &flag);
    }

    // Emergency
    pub fn accepts_all_payments(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::AcceptAllPayments)
            .unwrap_or(false)
    }

    pub fn set_accept_all_payments(env: &Env, accept: bool) {
        env.storage()
            .instance()
            .set(&DataKey::AcceptAllPayments, &accept);
    }

    pub fn get_vouches(env: &Env) -> VouchFlags {
        env.storage()
            .instance()
            .get(&DataKey::Vouches)
            .unwrap_or_default()
    }

    pub fn set_vouches(env: &Env, vouches: &VouchFlags) {
        env.storage().instance().set(&DataKey::Vouches, vouches);
    }

    // Roles
    pub fn has_role(env: &Env, role: Role, principal: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Role(role, principal.clone()))
    }

    pub fn add_role(env: &Env, role: Role, principal: &Address) {
        let key = DataKey::Role(role, principal.clone());
        env.storage().persistent().set(&key, &true);
        Self::bump_persistent(env, &key);
    }

    pub fn remove_role(env: &Env, role: Role, principal: &Address) {
        env.storage()
            .persistent()
            .remove(&DataKey::Role(role, principal.clone()));
    }

    pub fn get_admission_key(env: &Env, key: &BytesN<32>) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::AdmissionKey(key.clone()))
    }

    pub fn set_admission_key(env: &Env, key: &BytesN<32>, bouncer: &Address) {
        let key = DataKey::AdmissionKey(key.clone());
        env.storage().persistent().set(&key, bouncer);
        Self::bump_persistent(env, &key);
    }

    // Contributions
    pub fn get_total_raised(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalRaised)
            .unwrap_or(0)
    }

    pub fn set_total_raised(env: &Env, total: i128) {
        env.storage().instance().set(&DataKey::TotalRaised, &total);
    }

    pub fn get_contribution(env: &Env, contributor: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Contribution(contributor.clone()))
            .unwrap_or(0)
    }

    pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
        let key = DataKey::Contribution(contributor.clone());
        env.storage().persistent().set(&key, &amount);
        Self::bump_persistent(env, &key);
    }

    // Token payout
    pub fn get_payout_token(env: &Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::PayoutToken)
    }

    pub fn set_payout_token(env: &Env, token: &Address) {
        env.storage().instance().set(&DataKey::PayoutToken, token);
    }

    pub fn get_batch_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::BatchCount)
            .unwrap_or(0)
    }

    pub fn get_batch(env: &Env, index: u32) -> Option<TokenBatch> {
        env.storage().persistent().get(&DataKey::Batch(index))
    }

    /// Cumulative tokens recorded by the latest batch, 0 before the first
    pub fn get_cumulative_tokens(env: &Env) -> i128 {
        match Self::get_batch_count(env) {
            0 => 0,
            count => Self::get_batch(env, count - 1)
                .map(|batch| batch.cumulative_tokens_added)
                .unwrap_or(0),
        }
    }

    pub fn push_batch(env: &Env, batch: &TokenBatch) {
        let key = DataKey::Batch(batch.index);
        env.storage().persistent().set(&key, batch);
        Self::bump_persistent(env, &key);
        env.storage()
            .instance()
            .set(&DataKey::BatchCount, &(batch.index + 1));
    }

    pub fn get_total_claimed(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalClaimed)
            .unwrap_or(0)
    }

    pub fn set_total_claimed(env: &Env, total: i128) {
        env.storage().instance().set(&DataKey::TotalClaimed, &total);
    }

    pub fn get_claimed(env: &Env, contributor: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Claimed(contributor.clone()))
            .unwrap_or(0)
    }

    pub fn set_claimed(env: &Env, contributor: &Address, amount: i128) {
        let key = DataKey::Claimed(contributor.clone());
        env.storage().persistent().set(&key, &amount);
        Self::bump_persistent(env, &key);
    }
}
