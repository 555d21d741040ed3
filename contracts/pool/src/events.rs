use crate::storage::Storage;
use crate::types::{FeeRatio, Role};
use soroban_sdk::{contracttype, vec, Address, Env, IntoVal, Symbol, Val};

pub const CONTRIBUTION_MADE: &str = "contribution_made";
pub const REFUNDED: &str = "refunded";
pub const CLOSED: &str = "closed";
pub const REFUNDS_ENABLED: &str = "refunds_enabled";
pub const STATE_RESTORED: &str = "state_restored";
pub const TOKENS_CLAIMED: &str = "tokens_claimed";
pub const TOKEN_CONFIRMED: &str = "token_confirmed";
pub const PAUSE: &str = "pause";
pub const UNPAUSE: &str = "unpause";
pub const ADMIN_POOL_FEE_SET: &str = "admin_pool_fee_set";
pub const ADMIN_PAYOUT_WALLET_SET: &str = "admin_payout_wallet_set";
pub const MAX_ALLOCATION_CHANGED: &str = "max_allocation_changed";
pub const ROLE_GRANTED: &str = "role_granted";
pub const ROLE_REVOKED: &str = "role_revoked";
pub const VOUCHED: &str = "vouched";
pub const EMERGENCY_WITHDRAWAL: &str = "emergency_withdrawal";
pub const PAYMENT_RECEIVED: &str = "payment_received";

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolEvent {
    pub pool: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionEvent {
    pub pool: Address,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClosedEvent {
    pub pool: Address,
    pub payout_target: Address,
    pub payout_amount: i128,
    pub poolbase_fee: i128,
    pub admin_fee: i128,
    pub admin_fee_in_wei: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfirmedEvent {
    pub pool: Address,
    pub token: Address,
    pub batch_index: u32,
    pub cumulative_tokens_added: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminPoolFeeSetEvent {
    pub pool: Address,
    pub fee: FeeRatio,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletSetEvent {
    pub pool: Address,
    pub wallet: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxAllocationChangedEvent {
    pub pool: Address,
    pub max_allocation: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleEvent {
    pub pool: Address,
    pub principal: Address,
    pub role: Role,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawalEvent {
    pub pool: Address,
    pub asset: Address,
    pub beneficiary: Address,
    pub amount: i128,
}

/// Publish `data` under topics `(name, actor)` and mirror a compact
/// notification to the configured event emitter, if any.
pub fn publish<D>(env: &Env, name: &str, actor: &Address, data: D)
where
    D: IntoVal<Env, Val>,
{
    let topic = Symbol::new(env, name);
    env.events().publish((topic.clone(), actor.clone()), data);

    if let Ok(config) = Storage::get_config(env) {
        if let Some(emitter) = config.event_emitter {
            env.invoke_contract::<()>(
                &emitter,
                &Symbol::new(env, "emit"),
                vec![
                    env,
                    env.current_contract_address().into_val(env),
                    topic.into_val(env),
                    actor.into_val(env),
                ],
            );
        }
    }
}

pub fn pool_event(env: &Env, name: &str, actor: &Address) {
    publish(
        env,
        name,
        actor,
        PoolEvent {
            pool: env.current_contract_address(),
        },
    );
}

pub fn contribution_event(env: &Env, name: &str, contributor: &Address, amount: i128) {
    publish(
        env,
        name,
        contributor,
        ContributionEvent {
            pool: env.current_contract_address(),
            contributor: contributor.clone(),
            amount,
        },
    );
}

pub fn role_event(env: &Env, name: &str, actor: &Address, principal: &Address, role: Role) {
    publish(
        env,
        name,
        actor,
        RoleEvent {
            pool: env.current_contract_address(),
            principal: principal.clone(),
            role,
        },
    );
}
