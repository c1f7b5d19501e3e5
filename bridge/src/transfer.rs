//! Tolerant token transfers.
//!
//! Token contracts disagree on what a successful transfer returns. Standard
//! CW20 contracts return no data; others answer with a JSON boolean. The
//! bridge accepts both: a call that errors aborts the transaction, a call that
//! returns nothing is a success, and a call that returns data must decode to
//! `true`.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_utils::parse_execute_response_data;

use crate::error::ContractError;

/// A token ledger the bridge can move funds on.
pub trait TokenLedger {
    /// Build the call moving `amount` from `from` to `to`.
    fn transfer(&self, from: &Addr, to: &Addr, amount: Uint128) -> StdResult<WasmMsg>;

    /// Balance of `holder` on this ledger.
    fn balance_of(&self, querier: &QuerierWrapper, holder: &Addr) -> StdResult<Uint128>;

    /// Interpret the data returned by a successful `transfer` call.
    fn check_return(&self, data: Option<Binary>) -> Result<(), ContractError> {
        check_transfer_data(data)
    }
}

/// CW20 token contract, seen from the bridge that holds custody.
pub struct Cw20Token {
    contract: Addr,
    custodian: Addr,
}

impl Cw20Token {
    pub fn new(contract: Addr, custodian: Addr) -> Self {
        Self {
            contract,
            custodian,
        }
    }
}

impl TokenLedger for Cw20Token {
    fn transfer(&self, from: &Addr, to: &Addr, amount: Uint128) -> StdResult<WasmMsg> {
        // Funds held by the bridge move with a plain transfer, anything else
        // goes through the owner's allowance
        let msg = if *from == self.custodian {
            Cw20ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount,
            }
        } else {
            Cw20ExecuteMsg::TransferFrom {
                owner: from.to_string(),
                recipient: to.to_string(),
                amount,
            }
        };

        Ok(WasmMsg::Execute {
            contract_addr: self.contract.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        })
    }

    fn balance_of(&self, querier: &QuerierWrapper, holder: &Addr) -> StdResult<Uint128> {
        let res: BalanceResponse = querier.query_wasm_smart(
            &self.contract,
            &Cw20QueryMsg::Balance {
                address: holder.to_string(),
            },
        )?;
        Ok(res.balance)
    }
}

/// Check the reply data of a transfer sub-message.
///
/// The chain wraps contract data in a `MsgExecuteContractResponse`; the inner
/// payload, when present, must be JSON `true`.
pub fn check_transfer_data(data: Option<Binary>) -> Result<(), ContractError> {
    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(()),
    };

    let inner = parse_execute_response_data(data.as_slice())
        .map_err(|e| ContractError::TransferFailed {
            reason: format!("malformed response data: {}", e),
        })?
        .data;

    match inner {
        Some(payload) if !payload.is_empty() => match from_json::<bool>(&payload) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ContractError::TransferFailed {
                reason: "token returned false".to_string(),
            }),
            Err(e) => Err(ContractError::TransferFailed {
                reason: format!("return data is not a boolean: {}", e),
            }),
        },
        _ => Ok(()),
    }
}
