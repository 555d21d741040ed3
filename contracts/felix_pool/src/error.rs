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
    /// Caller is not the pool admin
    Unauthorized = 10,

    // ============================================
    // LIFECYCLE ERRORS (20-29)
    // ============================================
    /// Operation not allowed in the current phase
    InvalidState = 20,
    /// Deposit outside [start_time, end_time]
    OutsideWindow = 21,
    /// Sale ended without reaching the threshold
    ThresholdNotMet = 22,

    // ============================================
    // ACCOUNTING ERRORS (30-39)
    // ============================================
    /// Deposit would exceed the cap
    CapExceeded = 30,
    /// No contribution to refund
    NothingToRefund = 31,
    /// No tokens left to release
    NothingToClaim = 32,
    /// Pool holds fewer tokens than it owes
    InsufficientTokens = 33,

    // ============================================
    // VALIDATION ERRORS (40-49)
    // ============================================
    /// Invalid parameters
    InvalidParams = 40,
    /// Arithmetic overflow
    Overflow = 41,
}
