use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Pool already initialized
    AlreadyInitialized = 1,
    /// Pool not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller lacks the required role, or admission was refused
    Unauthorized = 10,

    // ============================================
    // LIFECYCLE ERRORS (20-29)
    // ============================================
    /// Operation not allowed in the current pool state
    InvalidState = 20,
    /// Pool is paused
    ContractPaused = 21,
    /// Pause requested while paused, or unpause while running
    InvalidPauseState = 22,

    // ============================================
    // CONTRIBUTION ERRORS (30-39)
    // ============================================
    /// Deposit would push the pool over max_allocation
    CapExceeded = 30,
    /// Caller has no recorded contribution
    NothingToRefund = 31,
    /// Caller has no new token entitlement
    NothingToClaim = 32,
    /// Token balance has not grown since the last batch
    NoNewTokens = 33,

    // ============================================
    // PARAMETER ERRORS (40-49)
    // ============================================
    /// Zero amount, invalid beneficiary or malformed fee ratio
    InvalidParams = 40,
    /// Checked arithmetic overflowed
    Overflow = 41,

    // ============================================
    // EMERGENCY ERRORS (50-59)
    // ============================================
    /// Admin and poolbase vouches are not both set
    VouchesNotSet = 50,
    /// Direct payments are not accepted right now
    PaymentsNotAccepted = 51,

    // ============================================
    // PAYOUT ERRORS (60-69)
    // ============================================
    /// Payout target rejected the payout call
    PayoutFailed = 60,
    /// No payout target given and none configured
    PayoutWalletNotSet = 61,
}
