//! State definitions for the Fury bridge ledger
//!
//! The ledger keeps no per-user balances. Custody is the bridge's own balance
//! on each token contract; the only bookkeeping is the lock counter, the fixed
//! relayer and the reentrancy latch.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration, fixed at instantiation
#[cw_serde]
pub struct Config {
    /// The only address allowed to unlock funds
    pub relayer: Addr,
}

/// Reentrancy latch guarding `lock` and `unlock`
#[cw_serde]
#[derive(Copy, Default, Eq)]
pub enum ReentrancyLatch {
    #[default]
    Unlocked,
    Locked,
}

/// Operation waiting for its token sub-message to reply.
///
/// Saved when the transfer is dispatched and consumed by the reply handler,
/// which emits the matching event.
#[cw_serde]
pub enum PendingTransfer {
    Lock {
        token: Addr,
        sender: Addr,
        destination_address: String,
        amount: Uint128,
    },
    Unlock {
        token: Addr,
        recipient: Addr,
        amount: Uint128,
        unlock_sequence: u64,
    },
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:fury-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sub-message id for the token pull of a `lock`
pub const LOCK_REPLY_ID: u64 = 1;

/// Sub-message id for the token release of an `unlock`
pub const UNLOCK_REPLY_ID: u64 = 2;

// ============================================================================
// State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Last emitted lock sequence (0 before the first lock)
pub const LOCK_SEQUENCE: Item<u64> = Item::new("lock_sequence");

/// Reentrancy latch
pub const LATCH: Item<ReentrancyLatch> = Item::new("reentrancy_latch");

/// In-flight operation, present only between dispatch and reply
pub const PENDING_TRANSFER: Item<PendingTransfer> = Item::new("pending_transfer");
