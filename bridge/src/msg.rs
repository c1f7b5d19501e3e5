//! Message types for the Fury bridge ledger

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::ReentrancyLatch;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Relayer address; cannot be changed after instantiation
    pub relayer: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Lock CW20 tokens into bridge custody.
    ///
    /// Authorization: Anyone. The caller must have granted the bridge an
    /// allowance of at least `amount` on `token`.
    Lock {
        /// CW20 contract address
        token: String,
        /// Receiving account on the other chain, passed through untouched
        destination_address: String,
        amount: Uint128,
    },

    /// Release tokens from bridge custody.
    ///
    /// Authorization: Relayer only. `unlock_sequence` is recorded in the
    /// event as given; the ledger does not check it against prior locks.
    Unlock {
        token: String,
        recipient: String,
        amount: Uint128,
        unlock_sequence: u64,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// The configured relayer
    #[returns(RelayerResponse)]
    Relayer {},

    /// Sequence number of the latest lock (0 before any lock)
    #[returns(LockSequenceResponse)]
    LockSequence {},

    /// Current reentrancy latch state
    #[returns(LatchResponse)]
    ReentrancyLatch {},
}

#[cw_serde]
pub struct RelayerResponse {
    pub relayer: Addr,
}

#[cw_serde]
pub struct LockSequenceResponse {
    pub lock_sequence: u64,
}

#[cw_serde]
pub struct LatchResponse {
    pub latch: ReentrancyLatch,
}
