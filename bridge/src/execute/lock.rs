//! Lock handlers.
//!
//! `Lock` pulls tokens with the caller's allowance and finishes in the reply.
//! It is the only way tokens enter custody.

use cosmwasm_std::{
    Addr, Binary, DepsMut, Env, Event, MessageInfo, Response, Storage, SubMsg, Uint128,
};

use crate::error::ContractError;
use crate::events::LockEvent;
use crate::guard;
use crate::state::{PendingTransfer, LOCK_REPLY_ID, LOCK_SEQUENCE, PENDING_TRANSFER};
use crate::transfer::{Cw20Token, TokenLedger};

// ============================================================================
// Lock
// ============================================================================

/// Start a lock: take the latch and dispatch the token pull.
pub fn execute_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    destination_address: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;

    let token = deps.api.addr_validate(&token)?;
    ensure_positive(amount)?;

    let ledger = Cw20Token::new(token.clone(), env.contract.address.clone());
    let pull = ledger.transfer(&info.sender, &env.contract.address, amount)?;

    PENDING_TRANSFER.save(
        deps.storage,
        &PendingTransfer::Lock {
            token: token.clone(),
            sender: info.sender.clone(),
            destination_address,
            amount,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(pull, LOCK_REPLY_ID))
        .add_attribute("action", "lock")
        .add_attribute("token", token)
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount))
}

/// Finish a lock once the token pull has succeeded.
pub fn complete_lock(
    deps: DepsMut,
    env: Env,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    let Some(PendingTransfer::Lock {
        token,
        sender,
        destination_address,
        amount,
    }) = PENDING_TRANSFER.may_load(deps.storage)?
    else {
        return Err(ContractError::NoPendingTransfer);
    };
    PENDING_TRANSFER.remove(deps.storage);

    Cw20Token::new(token.clone(), env.contract.address).check_return(data)?;

    let event = record_lock(deps.storage, token, sender, destination_address, amount)?;
    guard::release(deps.storage)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "lock_complete"))
}

// ============================================================================
// Helpers
// ============================================================================

/// Bump the lock counter and build the event carrying the new value.
fn record_lock(
    storage: &mut dyn Storage,
    token: Addr,
    sender: Addr,
    destination_address: String,
    amount: Uint128,
) -> Result<Event, ContractError> {
    let lock_sequence = LOCK_SEQUENCE.load(storage)? + 1;
    LOCK_SEQUENCE.save(storage, &lock_sequence)?;

    Ok(LockEvent {
        token,
        sender,
        destination_address,
        amount,
        lock_sequence,
    }
    .into_event())
}

pub(super) fn ensure_positive(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}
