//! Query handlers for the Fury bridge ledger.

use cosmwasm_std::{Deps, StdResult};

use crate::msg::{LatchResponse, LockSequenceResponse, RelayerResponse};
use crate::state::{CONFIG, LATCH, LOCK_SEQUENCE};

/// Query the configured relayer.
pub fn query_relayer(deps: Deps) -> StdResult<RelayerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(RelayerResponse {
        relayer: config.relayer,
    })
}

/// Query the latest lock sequence.
pub fn query_lock_sequence(deps: Deps) -> StdResult<LockSequenceResponse> {
    let lock_sequence = LOCK_SEQUENCE.load(deps.storage)?;
    Ok(LockSequenceResponse { lock_sequence })
}

/// Query the reentrancy latch.
pub fn query_latch(deps: Deps) -> StdResult<LatchResponse> {
    let latch = LATCH.may_load(deps.storage)?.unwrap_or_default();
    Ok(LatchResponse { latch })
}
