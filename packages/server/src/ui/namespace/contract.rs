//! Contract namespace: negotiation updates fanned out to `contract:<id>`.
//!
//! Every change is broadcast to the contract room including the sender, so
//! both parties render the same server-relayed state.

use serde_json::Value;

use super::{EventContext, EventRouter, RouteError, encode, parse};
use crate::{
    domain::{Command, Delivery, EventKind, NamespaceKind, RoomId, Target},
    infrastructure::dto::websocket::contract::{
        ContractConfirmedPayload, ContractRef, ContractStatusChanged, TermAcceptedPayload,
        TermContentChanged, TermStatusChanged, TermUpdatedPayload,
    },
};

const TERM_ACCEPTED: &str = "accepted";
const CONTRACT_CONFIRMED: &str = "confirmed";

pub struct ContractRouter;

impl ContractRouter {
    fn broadcast(
        &self,
        room: RoomId,
        kind: EventKind,
        body: Value,
        ctx: &EventContext<'_>,
    ) -> Command {
        ctx.publish(Target::Room(room), Delivery::IncludeSender, kind, body)
    }
}

impl EventRouter for ContractRouter {
    fn namespace(&self) -> NamespaceKind {
        NamespaceKind::Contract
    }

    fn route(
        &self,
        event: &str,
        data: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        match event {
            "subscribe_contract" => {
                let contract: ContractRef = parse(event, data)?;
                Ok(Command::Join(RoomId::contract(&contract.into_string())?))
            }
            "unsubscribe_contract" => {
                let contract: ContractRef = parse(event, data)?;
                Ok(Command::Leave(RoomId::contract(&contract.into_string())?))
            }
            "term_accepted" => {
                let payload: TermAcceptedPayload = parse(event, data)?;
                let contract_id = payload.contract_id.into_string();
                let room = RoomId::contract(&contract_id)?;
                let body = encode(&TermStatusChanged {
                    contract_id,
                    term_id: payload.term_id.into_string(),
                    role: payload.role,
                    status: TERM_ACCEPTED.to_string(),
                    accepted_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(self.broadcast(room, EventKind::TermStatusChanged, body, ctx))
            }
            "term_updated" => {
                let payload: TermUpdatedPayload = parse(event, data)?;
                let contract_id = payload.contract_id.into_string();
                let room = RoomId::contract(&contract_id)?;
                let body = encode(&TermContentChanged {
                    contract_id,
                    term_id: payload.term_id.into_string(),
                    updates: payload.updates,
                    updated_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(self.broadcast(room, EventKind::TermContentChanged, body, ctx))
            }
            "contract_confirmed" => {
                let payload: ContractConfirmedPayload = parse(event, data)?;
                let contract_id = payload.contract_id.into_string();
                let room = RoomId::contract(&contract_id)?;
                let body = encode(&ContractStatusChanged {
                    contract_id,
                    status: CONTRACT_CONFIRMED.to_string(),
                    confirmed_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(self.broadcast(room, EventKind::ContractStatusChanged, body, ctx))
            }
            other => Err(RouteError::UnknownEvent(other.to_string())),
        }
    }
}
