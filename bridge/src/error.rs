//! Error types for the Fury bridge ledger.
//!
//! Every variant aborts the whole transaction: the chain discards all storage
//! writes and events of a failed call, so no partial lock or unlock survives.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the relayer can unlock")]
    Unauthorized,

    // ========================================================================
    // Guard Errors
    // ========================================================================

    #[error("Reentrant call rejected: a lock or unlock is already in flight")]
    Reentrant,

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Insufficient custody: bridge holds {available}, unlock requested {requested}")]
    InsufficientCustody {
        available: Uint128,
        requested: Uint128,
    },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Reply Errors
    // ========================================================================

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    #[error("No pending transfer for reply")]
    NoPendingTransfer,
}
