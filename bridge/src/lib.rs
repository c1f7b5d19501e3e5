//! Fury Bridge Ledger - CW20 escrow for cross-chain transfers
//!
//! Holders lock CW20 tokens into bridge custody; a single trusted relayer
//! watches the resulting `lock` events and releases funds on the counterpart
//! ledger with `unlock`.
//!
//! # Lock
//! 1. Holder grants the bridge an allowance and calls `Lock`
//! 2. Bridge pulls the tokens, bumps the lock sequence, emits `lock`
//!
//! # Unlock
//! 1. Relayer calls `Unlock` with the sequence of the originating lock
//! 2. Bridge releases custody to the recipient and emits `unlock`
//!
//! # Security
//! - Only the relayer fixed at instantiation can unlock
//! - Reentrancy latch held across every token call
//! - Tolerant transfer check for tokens returning nothing or a boolean
//! - Unlock sequences are not checked on-ledger; the relayer must never
//!   replay one

pub mod contract;
pub mod error;
pub mod events;
mod execute;
pub mod guard;
pub mod msg;
mod query;
pub mod state;
pub mod transfer;

pub use crate::error::ContractError;
pub use crate::events::{LockEvent, UnlockEvent};
pub use crate::transfer::{Cw20Token, TokenLedger};
