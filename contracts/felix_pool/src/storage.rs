use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

/// Percentage released per `claim_tokens` until the admin changes it
pub const DEFAULT_CLAIM_PERCENTAGE: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub admin: Address,
    /// Asset contributors pay in
    pub currency: Address,
    /// Receives the raised currency on finalize
    pub wallet: Address,
    /// Minimum raise for the sale to succeed
    pub threshold: i128,
    /// Maximum raise
    pub cap: i128,
    /// Unix timestamp, inclusive
    pub start_time: u64,
    /// Unix timestamp, inclusive
    pub end_time: u64,
    /// Tokens owed per unit of currency
    pub rate: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SaleState {
    /// Deposits within the window, refunds once it failed
    Funding = 0,
    /// Funds forwarded to the wallet, tokens claimable
    TokenPayout = 1,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    State,
    TotalContributions,
    TotalTokens,
    ClaimPercentage,
    PayoutToken,
    Contribution(Address),
    Entitlement(Address),
}

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

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_state(env: &Env) -> SaleState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or(SaleState::Funding)
}

pub fn set_state(env: &Env, state: SaleState) {
    env.storage().instance().set(&DataKey::State, &state);
}

pub fn get_i128(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn set_i128(env: &Env, key: &DataKey, value: i128) {
    env.storage().instance().set(key, &value);
}

pub fn get_claim_percentage(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ClaimPercentage)
        .unwrap_or(DEFAULT_CLAIM_PERCENTAGE)
}

pub fn set_claim_percentage(env: &Env, percentage: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ClaimPercentage, &percentage);
}

pub fn get_payout_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PayoutToken)
}

pub fn set_payout_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PayoutToken, token);
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
    bump_persistent(env, &key);
}

pub fn get_entitlement(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Entitlement(contributor.clone()))
        .unwrap_or(0)
}

pub fn set_entitlement(env: &Env, contributor: &Address, amount: i128) {
    let key = DataKey::Entitlement(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
