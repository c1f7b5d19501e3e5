//! Fury Bridge Ledger - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers and their reply completions
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{complete_lock, complete_unlock, execute_lock, execute_unlock};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_latch, query_lock_sequence, query_relayer};
use crate::state::{
    Config, ReentrancyLatch, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LATCH, LOCK_REPLY_ID,
    LOCK_SEQUENCE, UNLOCK_REPLY_ID,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let relayer = deps.api.addr_validate(&msg.relayer)?;
    CONFIG.save(
        deps.storage,
        &Config {
            relayer: relayer.clone(),
        },
    )?;
    LOCK_SEQUENCE.save(deps.storage, &0u64)?;
    LATCH.save(deps.storage, &ReentrancyLatch::Unlocked)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("relayer", relayer))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Lock {
            token,
            destination_address,
            amount,
        } => execute_lock(deps, env, info, token, destination_address, amount),
        ExecuteMsg::Unlock {
            token,
            recipient,
            amount,
            unlock_sequence,
        } => execute_unlock(deps, env, info, token, recipient, amount, unlock_sequence),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Token sub-messages are dispatched reply-on-success, so a failed transfer
/// never reaches this point: it aborts the whole transaction instead.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    let data = msg
        .result
        .into_result()
        .map_err(|reason| ContractError::TransferFailed { reason })?
        .data;

    match msg.id {
        LOCK_REPLY_ID => complete_lock(deps, env, data),
        UNLOCK_REPLY_ID => complete_unlock(deps, env, data),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Relayer {} => to_json_binary(&query_relayer(deps)?),
        QueryMsg::LockSequence {} => to_json_binary(&query_lock_sequence(deps)?),
        QueryMsg::ReentrancyLatch {} => to_json_binary(&query_latch(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if LATCH.may_load(deps.storage)?.is_none() {
        LATCH.save(deps.storage, &ReentrancyLatch::Unlocked)?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
