//! Token compatibility and reentrancy tests.
//!
//! Mock tokens wrap cw20-base and change only what a transfer returns or does
//! next: answer `true`, answer `false`, or call back into the bridge.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, DepsMut, Env, MessageInfo, Response, Uint128, WasmMsg};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw20_base::ContractError as Cw20Error;
use cw_multi_test::{App, ContractWrapper, Executor};
use cw_storage_plus::Item;

use fury_bridge::msg::{ExecuteMsg, InstantiateMsg, LatchResponse, LockSequenceResponse, QueryMsg};
use fury_bridge::state::ReentrancyLatch;
use fury_bridge::LockEvent;

// ============================================================================
// Mock Tokens
// ============================================================================

fn is_transfer(msg: &Cw20ExecuteMsg) -> bool {
    matches!(
        msg,
        Cw20ExecuteMsg::Transfer { .. } | Cw20ExecuteMsg::TransferFrom { .. }
    )
}

fn execute_returning(
    value: bool,
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, Cw20Error> {
    let res = cw20_base::contract::execute(deps, env, info, msg)?;
    Ok(res.set_data(to_json_binary(&value)?))
}

fn execute_returns_true(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, Cw20Error> {
    execute_returning(true, deps, env, info, msg)
}

fn execute_returns_false(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, Cw20Error> {
    execute_returning(false, deps, env, info, msg)
}

type ExecuteFn = fn(DepsMut, Env, MessageInfo, Cw20ExecuteMsg) -> Result<Response, Cw20Error>;

/// Where a reentrant token calls back to, and with what
const REENTRY: Item<(Addr, ExecuteMsg)> = Item::new("reentry");

#[cw_serde]
struct ReentrantInstantiateMsg {
    token: cw20_base::msg::InstantiateMsg,
    bridge: String,
    reentry: ExecuteMsg,
}

fn reentrant_instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ReentrantInstantiateMsg,
) -> Result<Response, Cw20Error> {
    let bridge = deps.api.addr_validate(&msg.bridge)?;
    REENTRY.save(deps.storage, &(bridge, msg.reentry))?;
    cw20_base::contract::instantiate(deps, env, info, msg.token)
}

fn reentrant_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, Cw20Error> {
    let hook = is_transfer(&msg);
    let (bridge, reentry) = REENTRY.load(deps.storage)?;

    let res = cw20_base::contract::execute(deps, env, info, msg)?;
    if !hook {
        return Ok(res);
    }

    Ok(res.add_message(WasmMsg::Execute {
        contract_addr: bridge.to_string(),
        msg: to_json_binary(&reentry)?,
        funds: vec![],
    }))
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        fury_bridge::contract::execute,
        fury_bridge::contract::instantiate,
        fury_bridge::contract::query,
    )
    .with_reply(fury_bridge::contract::reply);
    Box::new(contract)
}

fn token_init(holder: &Addr, amount: u128) -> cw20_base::msg::InstantiateMsg {
    cw20_base::msg::InstantiateMsg {
        name: "Mock Token".to_string(),
        symbol: "MCK".to_string(),
        decimals: 6,
        initial_balances: vec![Cw20Coin {
            address: holder.to_string(),
            amount: Uint128::from(amount),
        }],
        mint: None,
        marketing: None,
    }
}

fn setup() -> (App, Addr, Addr, Addr) {
    let mut app = App::default();

    let relayer = Addr::unchecked("terra1relayer");
    let user = Addr::unchecked("terra1user");

    let code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            code_id,
            relayer.clone(),
            &InstantiateMsg {
                relayer: relayer.to_string(),
            },
            &[],
            "fury-bridge",
            None,
        )
        .unwrap();

    (app, bridge, relayer, user)
}

fn instantiate_bool_token(app: &mut App, returns: bool, holder: &Addr) -> Addr {
    let execute_fn: ExecuteFn = if returns {
        execute_returns_true
    } else {
        execute_returns_false
    };
    let code_id = app.store_code(Box::new(ContractWrapper::new(
        execute_fn,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    )));

    app.instantiate_contract(
        code_id,
        holder.clone(),
        &token_init(holder, 1_000),
        &[],
        "bool-token",
        None,
    )
    .unwrap()
}

fn instantiate_reentrant_token(
    app: &mut App,
    bridge: &Addr,
    holder: &Addr,
    reentry: ExecuteMsg,
) -> Addr {
    let code_id = app.store_code(Box::new(ContractWrapper::new(
        reentrant_execute,
        reentrant_instantiate,
        cw20_base::contract::query,
    )));

    app.instantiate_contract(
        code_id,
        holder.clone(),
        &ReentrantInstantiateMsg {
            token: token_init(holder, 1_000),
            bridge: bridge.to_string(),
            reentry,
        },
        &[],
        "reentrant-token",
        None,
    )
    .unwrap()
}

fn approve(app: &mut App, token: &Addr, owner: &Addr, spender: &Addr, amount: u128) {
    app.execute_contract(
        owner.clone(),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: spender.to_string(),
            amount: Uint128::from(amount),
            expires: None,
        },
        &[],
    )
    .unwrap();
}

fn lock_msg(token: &Addr, amount: u128) -> ExecuteMsg {
    ExecuteMsg::Lock {
        token: token.to_string(),
        destination_address: "fury1dest".to_string(),
        amount: Uint128::from(amount),
    }
}

fn balance(app: &App, token: &Addr, holder: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: holder.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn lock_sequence(app: &App, bridge: &Addr) -> u64 {
    let res: LockSequenceResponse = app
        .wrap()
        .query_wasm_smart(bridge, &QueryMsg::LockSequence {})
        .unwrap();
    res.lock_sequence
}

fn latch(app: &App, bridge: &Addr) -> ReentrancyLatch {
    let res: LatchResponse = app
        .wrap()
        .query_wasm_smart(bridge, &QueryMsg::ReentrancyLatch {})
        .unwrap();
    res.latch
}

// ============================================================================
// Return Value Tests
// ============================================================================

#[test]
fn test_token_returning_true_locks() {
    let (mut app, bridge, _relayer, user) = setup();
    let token = instantiate_bool_token(&mut app, true, &user);
    approve(&mut app, &token, &user, &bridge, 100);

    let res = app
        .execute_contract(user.clone(), bridge.clone(), &lock_msg(&token, 100), &[])
        .unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-lock")
        .map(|e| LockEvent::try_from(e).unwrap())
        .expect("lock event not found");
    assert_eq!(event.lock_sequence, 1);
    assert_eq!(balance(&app, &token, &bridge), Uint128::from(100u128));
}

#[test]
fn test_token_returning_false_fails() {
    let (mut app, bridge, _relayer, user) = setup();
    let token = instantiate_bool_token(&mut app, false, &user);
    approve(&mut app, &token, &user, &bridge, 100);

    let res = app.execute_contract(user.clone(), bridge.clone(), &lock_msg(&token, 100), &[]);

    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Token transfer failed"),
        "Expected transfer failure, got: {}",
        err_str
    );

    // The token's own bookkeeping rolls back with the bridge
    assert_eq!(balance(&app, &token, &bridge), Uint128::zero());
    assert_eq!(balance(&app, &token, &user), Uint128::from(1_000u128));
    assert_eq!(lock_sequence(&app, &bridge), 0);
    assert_eq!(latch(&app, &bridge), ReentrancyLatch::Unlocked);
}

#[test]
fn test_unlock_token_returning_false_fails() {
    let (mut app, bridge, relayer, _user) = setup();
    // Bridge starts out holding the whole supply
    let token = instantiate_bool_token(&mut app, false, &bridge);
    let recipient = Addr::unchecked("terra1recipient");

    let res = app.execute_contract(
        relayer,
        bridge.clone(),
        &ExecuteMsg::Unlock {
            token: token.to_string(),
            recipient: recipient.to_string(),
            amount: Uint128::from(100u128),
            unlock_sequence: 1,
        },
        &[],
    );

    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("token returned false"), "got: {}", err_str);
    assert_eq!(balance(&app, &token, &bridge), Uint128::from(1_000u128));
    assert_eq!(balance(&app, &token, &recipient), Uint128::zero());
}

// ============================================================================
// Reentrancy Tests
// ============================================================================

#[test]
fn test_reentrant_lock_from_transfer_hook_fails() {
    let (mut app, bridge, _relayer, user) = setup();

    // Honest lock first so there is a sequence to preserve
    let honest = instantiate_bool_token(&mut app, true, &user);
    approve(&mut app, &honest, &user, &bridge, 10);
    app.execute_contract(user.clone(), bridge.clone(), &lock_msg(&honest, 10), &[])
        .unwrap();
    assert_eq!(lock_sequence(&app, &bridge), 1);

    let evil = instantiate_reentrant_token(
        &mut app,
        &bridge,
        &user,
        ExecuteMsg::Lock {
            token: honest.to_string(),
            destination_address: "fury1attacker".to_string(),
            amount: Uint128::from(1u128),
        },
    );
    approve(&mut app, &evil, &user, &bridge, 100);

    let res = app.execute_contract(user.clone(), bridge.clone(), &lock_msg(&evil, 100), &[]);

    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Reentrant"),
        "Expected reentrancy error, got: {}",
        err_str
    );
    assert_eq!(lock_sequence(&app, &bridge), 1);
    assert_eq!(latch(&app, &bridge), ReentrancyLatch::Unlocked);
    assert_eq!(balance(&app, &evil, &bridge), Uint128::zero());
    assert_eq!(balance(&app, &evil, &user), Uint128::from(1_000u128));

    // Ledger is fully usable afterwards
    approve(&mut app, &honest, &user, &bridge, 5);
    app.execute_contract(user, bridge.clone(), &lock_msg(&honest, 5), &[])
        .unwrap();
    assert_eq!(lock_sequence(&app, &bridge), 2);
}

#[test]
fn test_reentrant_unlock_from_transfer_hook_fails() {
    let (mut app, bridge, relayer, _user) = setup();
    let recipient = Addr::unchecked("terra1recipient");

    let evil = instantiate_reentrant_token(
        &mut app,
        &bridge,
        &bridge,
        ExecuteMsg::Unlock {
            token: "terra1anything".to_string(),
            recipient: "terra1attacker".to_string(),
            amount: Uint128::from(1u128),
            unlock_sequence: 666,
        },
    );

    let res = app.execute_contract(
        relayer,
        bridge.clone(),
        &ExecuteMsg::Unlock {
            token: evil.to_string(),
            recipient: recipient.to_string(),
            amount: Uint128::from(100u128),
            unlock_sequence: 1,
        },
        &[],
    );

    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Reentrant"),
        "Expected reentrancy error, got: {}",
        err_str
    );
    assert_eq!(balance(&app, &evil, &bridge), Uint128::from(1_000u128));
    assert_eq!(balance(&app, &evil, &recipient), Uint128::zero());
    assert_eq!(latch(&app, &bridge), ReentrancyLatch::Unlocked);
    assert_eq!(lock_sequence(&app, &bridge), 0);
}
