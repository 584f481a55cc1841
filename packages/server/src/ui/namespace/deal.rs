//! Deal namespace: requests and answers addressed to a user, not a room.
//!
//! Delivery goes to every live connection of the addressed identity. When
//! that user is offline the event is dropped.

use serde_json::Value;

use super::{EventContext, EventRouter, RouteError, encode, parse};
use crate::{
    domain::{Command, Delivery, EventKind, NamespaceKind, RoomId, Target, UserId},
    infrastructure::dto::websocket::deal::{
        AcceptDealPayload, DealAccepted, DealRejected, NewDealRequest, RejectDealPayload,
        SendDealRequestPayload,
    },
};

pub struct DealRouter;

impl DealRouter {
    fn to_user(
        &self,
        user_id: String,
        kind: EventKind,
        body: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        let user_id = UserId::new(user_id)?;
        Ok(ctx.publish(Target::User(user_id), Delivery::IncludeSender, kind, body))
    }
}

impl EventRouter for DealRouter {
    fn namespace(&self) -> NamespaceKind {
        NamespaceKind::Deal
    }

    fn route(
        &self,
        event: &str,
        data: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        match event {
            // ペイロードの userId は無視し、自分の受信箱に参加する
            "join_deal_room" => Ok(Command::Join(RoomId::inbox(&ctx.sender.user_id))),
            "send_deal_request" => {
                let payload: SendDealRequestPayload = parse(event, data)?;
                let body = encode(&NewDealRequest {
                    deal_id: payload.deal_id.into_string(),
                    from_user_id: ctx.sender_id(),
                    from_username: ctx.sender_name(),
                    details: payload.details,
                    timestamp: ctx.timestamp(),
                })?;
                self.to_user(
                    payload.company_user_id.into_string(),
                    EventKind::NewDealRequest,
                    body,
                    ctx,
                )
            }
            "accept_deal" => {
                let payload: AcceptDealPayload = parse(event, data)?;
                let body = encode(&DealAccepted {
                    deal_id: payload.deal_id.into_string(),
                    accepted_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                self.to_user(
                    payload.creator_user_id.into_string(),
                    EventKind::DealAccepted,
                    body,
                    ctx,
                )
            }
            "reject_deal" => {
                let payload: RejectDealPayload = parse(event, data)?;
                let body = encode(&DealRejected {
                    deal_id: payload.deal_id.into_string(),
                    rejected_by: ctx.sender_id(),
                    reason: payload.reason,
                    timestamp: ctx.timestamp(),
                })?;
                self.to_user(
                    payload.creator_user_id.into_string(),
                    EventKind::DealRejected,
                    body,
                    ctx,
                )
            }
            other => Err(RouteError::UnknownEvent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::Timestamp;
    use serde_json::json;

    fn route(event: &str, data: Value) -> Result<Command, RouteError> {
        let c1 = conn("c1");
        let sender = identity("U1", "creator");
        let ctx = EventContext {
            connection_id: &c1,
            sender: &sender,
            now: Timestamp::new(0),
        };
        DealRouter.route(event, data, &ctx)
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_join_deal_room_uses_own_inbox() {
        // テスト項目: join_deal_room は送信者自身の受信箱ルームに参加する
        // when (操作):
        let command = route("join_deal_room", json!("C1")).unwrap();

        // then (期待する結果):
        assert_eq!(command, Command::Join(RoomId::new("U1".to_string()).unwrap()));
    }

    #[test]
    fn test_send_deal_request_targets_company_user() {
        // テスト項目: send_deal_request は companyUserId のユーザー宛てに new_deal_request を送る
        // when (操作):
        let event = published(
            route(
                "send_deal_request",
                json!({"dealId": 5, "companyUserId": "C1", "details": {"budget": 1000}}),
            )
            .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(event.kind, EventKind::NewDealRequest);
        assert_eq!(event.target, Target::User(user("C1")));
        assert_eq!(event.body["dealId"], "5");
        assert_eq!(event.body["fromUserId"], "U1");
        assert_eq!(event.body["fromUsername"], "creator");
        assert_eq!(event.body["details"]["budget"], 1000);
    }

    #[test]
    fn test_accept_and_reject_target_creator() {
        // テスト項目: accept_deal / reject_deal は creatorUserId のユーザー宛てに送る
        // when (操作):
        let accepted = published(
            route("accept_deal", json!({"dealId": "5", "creatorUserId": 9})).unwrap(),
        );
        let rejected = published(
            route(
                "reject_deal",
                json!({"dealId": "5", "creatorUserId": "9", "reason": "budget"}),
            )
            .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(accepted.kind, EventKind::DealAccepted);
        assert_eq!(accepted.target, Target::User(user("9")));
        assert_eq!(accepted.body["acceptedBy"], "U1");
        assert_eq!(rejected.kind, EventKind::DealRejected);
        assert_eq!(rejected.body["reason"], "budget");
        assert_eq!(rejected.body["rejectedBy"], "U1");
    }
}
