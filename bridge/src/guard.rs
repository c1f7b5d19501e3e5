//! Reentrancy latch for the guarded operations.
//!
//! `lock` and `unlock` hand control to a token contract while their transfer
//! sub-message runs. The latch stays `Locked` from dispatch until the reply
//! handler finishes, so any call back into a guarded handler from inside the
//! token fails before touching state.

use cosmwasm_std::Storage;

use crate::error::ContractError;
use crate::state::{ReentrancyLatch, LATCH};

/// Fail with `Reentrant` if a guarded operation is in flight. Does not mutate.
pub fn ensure_unlocked(storage: &dyn Storage) -> Result<(), ContractError> {
    match LATCH.may_load(storage)?.unwrap_or_default() {
        ReentrancyLatch::Unlocked => Ok(()),
        ReentrancyLatch::Locked => Err(ContractError::Reentrant),
    }
}

/// Check-and-set: `Unlocked` -> `Locked`.
pub fn acquire(storage: &mut dyn Storage) -> Result<(), ContractError> {
    ensure_unlocked(storage)?;
    LATCH.save(storage, &ReentrancyLatch::Locked)?;
    Ok(())
}

/// `Locked` -> `Unlocked`, called just before a guarded operation returns.
pub fn release(storage: &mut dyn Storage) -> Result<(), ContractError> {
    LATCH.save(storage, &ReentrancyLatch::Unlocked)?;
    Ok(())
}
