//! Unlock handler (relayer only).
//!
//! The ledger keeps no record of which locks were already honoured. The
//! `unlock_sequence` is echoed into the event and nothing else, so replay
//! protection is entirely the relayer's responsibility.

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, SubMsg, Uint128};

use super::lock::ensure_positive;
use crate::error::ContractError;
use crate::events::UnlockEvent;
use crate::guard;
use crate::state::{PendingTransfer, CONFIG, PENDING_TRANSFER, UNLOCK_REPLY_ID};
use crate::transfer::{Cw20Token, TokenLedger};

/// Start an unlock: authorize, check custody, take the latch and dispatch
/// the release.
pub fn execute_unlock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    recipient: String,
    amount: Uint128,
    unlock_sequence: u64,
) -> Result<Response, ContractError> {
    // Latch first: a token hook calling back in is never the relayer
    guard::ensure_unlocked(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized);
    }

    let token = deps.api.addr_validate(&token)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    ensure_positive(amount)?;

    let ledger = Cw20Token::new(token.clone(), env.contract.address.clone());

    let available = ledger.balance_of(&deps.querier, &env.contract.address)?;
    if available < amount {
        return Err(ContractError::InsufficientCustody {
            available,
            requested: amount,
        });
    }

    guard::acquire(deps.storage)?;

    let release = ledger.transfer(&env.contract.address, &recipient, amount)?;
    PENDING_TRANSFER.save(
        deps.storage,
        &PendingTransfer::Unlock {
            token: token.clone(),
            recipient: recipient.clone(),
            amount,
            unlock_sequence,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(release, UNLOCK_REPLY_ID))
        .add_attribute("action", "unlock")
        .add_attribute("token", token)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount)
        .add_attribute("unlock_sequence", unlock_sequence.to_string()))
}

/// Finish an unlock once the release transfer has succeeded.
pub fn complete_unlock(
    deps: DepsMut,
    env: Env,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    let Some(PendingTransfer::Unlock {
        token,
        recipient,
        amount,
        unlock_sequence,
    }) = PENDING_TRANSFER.may_load(deps.storage)?
    else {
        return Err(ContractError::NoPendingTransfer);
    };
    PENDING_TRANSFER.remove(deps.storage);

    Cw20Token::new(token.clone(), env.contract.address).check_return(data)?;

    let event = UnlockEvent {
        token,
        recipient,
        amount,
        unlock_sequence,
    }
    .into_event();
    guard::release(deps.storage)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "unlock_complete"))
}
