use soroban_sdk::{contracttype, Address, BytesN};

/// Ledgers per day at ~5s close time
pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

/// Fraction `numerator / denominator` applied with floor rounding
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeRatio {
    pub numerator: u32,
    pub denominator: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolState {
    /// Accepting deposits
    Active = 0,
    /// Deposits closed, contributors may withdraw
    Refunding = 1,
    /// Funds paid out, waiting for the first token batch
    Closed = 2,
    /// At least one token batch recorded, claims open
    TokenPayout = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    /// Pool creator side: configures and closes the pool
    Admin = 0,
    /// Platform side: admission, pause and emergency authority
    Bouncer = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Pool-wide cap on total contributions, 0 for uncapped
    pub max_allocation: i128,
    pub admin_pool_fee: FeeRatio,
    pub poolbase_fee: FeeRatio,
    /// Pay the admin fee in currency at close instead of as a token share
    pub is_admin_fee_in_wei: bool,
    /// Default destination of the raised funds
    pub payout_wallet: Option<Address>,
    pub admin_payout_wallet: Address,
    pub poolbase_payout_wallet: Address,
    /// Asset the pool raises (native XLM SAC on mainnet)
    pub currency: Address,
    /// Optional contract mirroring pool events for indexers
    pub event_emitter: Option<Address>,
    /// Deposits, refunds and claims need a bouncer-signed admission
    pub admission_required: bool,
}

/// Bouncer-signed admission ticket for one (pool, contributor) pair
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Admission {
    /// Ed25519 public key registered by a bouncer
    pub signer: BytesN<32>,
    /// Signature over sha256(xdr(pool) || xdr(contributor))
    pub signature: BytesN<64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBatch {
    pub index: u32,
    /// Total tokens ever observed in the pool once this batch was set
    pub cumulative_tokens_added: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VouchFlags {
    pub admin_vouched: bool,
    pub poolbase_vouched: bool,
}

impl VouchFlags {
    pub fn both(&self) -> bool {
        self.admin_vouched && self.poolbase_vouched
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance
    Config,
    Owner,
    State,
    Paused,
    EmergencyRefunding,
    AcceptAllPayments,
    Vouches,
    TotalRaised,
    PayoutToken,
    BatchCount,
    TotalClaimed,
    // Persistent
    Role(Role, Address),
    AdmissionKey(BytesN<32>),
    Contribution(Address),
    Claimed(Address),
    Batch(u32),
}
