//! Typed audit events.
//!
//! The relayer reads `lock` events on the source ledger and answers with
//! `unlock` calls on the destination ledger. Both records round-trip through
//! the chain's `Event` so the relayer can decode what the contract emitted.

use std::str::FromStr;

use cosmwasm_std::{Addr, Event, StdError, StdResult, Uint128};

/// Emitted once per successful lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockEvent {
    pub token: Addr,
    pub sender: Addr,
    pub destination_address: String,
    pub amount: Uint128,
    /// Counter value after this lock's increment
    pub lock_sequence: u64,
}

/// Emitted once per successful unlock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockEvent {
    pub token: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    /// Relayer-supplied, never checked by the ledger
    pub unlock_sequence: u64,
}

impl LockEvent {
    pub const TYPE: &'static str = "lock";

    pub fn into_event(self) -> Event {
        Event::new(Self::TYPE)
            .add_attribute("token", self.token)
            .add_attribute("sender", self.sender)
            .add_attribute("destination_address", self.destination_address)
            .add_attribute("amount", self.amount)
            .add_attribute("lock_sequence", self.lock_sequence.to_string())
    }
}

impl UnlockEvent {
    pub const TYPE: &'static str = "unlock";

    pub fn into_event(self) -> Event {
        Event::new(Self::TYPE)
            .add_attribute("token", self.token)
            .add_attribute("recipient", self.recipient)
            .add_attribute("amount", self.amount)
            .add_attribute("unlock_sequence", self.unlock_sequence.to_string())
    }
}

impl TryFrom<&Event> for LockEvent {
    type Error = StdError;

    fn try_from(event: &Event) -> StdResult<Self> {
        expect_type(event, Self::TYPE)?;
        Ok(Self {
            token: Addr::unchecked(attribute(event, "token")?),
            sender: Addr::unchecked(attribute(event, "sender")?),
            destination_address: attribute(event, "destination_address")?.to_string(),
            amount: parse_attribute(event, "amount")?,
            lock_sequence: parse_attribute(event, "lock_sequence")?,
        })
    }
}

impl TryFrom<&Event> for UnlockEvent {
    type Error = StdError;

    fn try_from(event: &Event) -> StdResult<Self> {
        expect_type(event, Self::TYPE)?;
        Ok(Self {
            token: Addr::unchecked(attribute(event, "token")?),
            recipient: Addr::unchecked(attribute(event, "recipient")?),
            amount: parse_attribute(event, "amount")?,
            unlock_sequence: parse_attribute(event, "unlock_sequence")?,
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Accepts both the emitted type and the `wasm-` prefixed on-chain type.
fn expect_type(event: &Event, ty: &str) -> StdResult<()> {
    let bare = event.ty.strip_prefix("wasm-").unwrap_or(&event.ty);
    if bare != ty {
        return Err(StdError::parse_err(
            ty,
            format!("unexpected event type {}", event.ty),
        ));
    }
    Ok(())
}

fn attribute<'a>(event: &'a Event, key: &str) -> StdResult<&'a str> {
    event
        .attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
        .ok_or_else(|| StdError::not_found(format!("{} attribute {}", event.ty, key)))
}

fn parse_attribute<T>(event: &Event, key: &str) -> StdResult<T>
where
    T: FromStr,
    T::Err: ToString,
{
    let raw = attribute(event, key)?;
    raw.parse::<T>()
        .map_err(|e| StdError::parse_err(key, e.to_string()))
}
