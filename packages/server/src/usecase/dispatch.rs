//! Fan-out Dispatcher
//!
//! Resolves a target (room, identity or connection) to a consistent snapshot
//! of live connections and pushes the event to each of them exactly once.
//! Delivery is fire-and-forget: per-connection failures are isolated and
//! logged, an empty target drops the event silently.

use std::sync::Arc;

use crate::domain::{DomainEvent, MessagePusher, PresenceRepository, Target};

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Connections resolved from the target, after exclusion
    pub targets: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct FanOutDispatcher {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl FanOutDispatcher {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Deliver `event` to every live connection behind its target, skipping
    /// the triggering connection when the event excludes the sender.
    pub async fn dispatch(&self, event: &DomainEvent) -> DispatchReport {
        let exclude = event.excluded_connection();
        let targets: Vec<_> = self
            .repository
            .resolve(&event.target)
            .await
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect();

        if targets.is_empty() {
            tracing::debug!(
                "No live connections for '{}' ({}), dropping",
                event.kind.as_str(),
                describe(&event.target)
            );
            return DispatchReport::default();
        }

        let report = self
            .message_pusher
            .broadcast(&targets, event.kind, &event.body)
            .await;

        tracing::debug!(
            "Dispatched '{}' to {} ({} delivered, {} failed)",
            event.kind.as_str(),
            describe(&event.target),
            report.delivered,
            report.failed
        );

        DispatchReport {
            targets: targets.len(),
            delivered: report.delivered,
            failed: report.failed,
        }
    }
}

fn describe(target: &Target) -> String {
    match target {
        Target::Room(room_id) => format!("room '{room_id}'"),
        Target::User(user_id) => format!("user '{user_id}'"),
        Target::Connection(connection_id) => format!("connection '{connection_id}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            BroadcastReport, ConnectionId, Delivery, EventKind, Identity, MockMessagePusher,
            Origin, RoomId, Timestamp, UserId, Username,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
        },
    };
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ルーム宛て・ユーザー宛て・接続宛ての解決と配信
    // - ExcludeSender は送信元の接続だけを除外し、同じアイデンティティの他の接続には届く
    // - 配信先が空の場合は黙って破棄される
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn identity(user_id: &str) -> Identity {
        Identity::new(
            UserId::new(user_id.to_string()).unwrap(),
            Username::new(user_id.to_lowercase()).unwrap(),
        )
    }

    struct Fixture {
        repository: Arc<InMemoryPresenceRepository>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repository: Arc::new(InMemoryPresenceRepository::default()),
                pusher: Arc::new(WebSocketMessagePusher::default()),
            }
        }

        fn dispatcher(&self) -> FanOutDispatcher {
            FanOutDispatcher::new(self.repository.clone(), self.pusher.clone())
        }

        async fn connect(
            &self,
            connection: &str,
            user_id: &str,
            rooms: &[&str],
        ) -> mpsc::UnboundedReceiver<String> {
            let (tx, rx) = mpsc::unbounded_channel();
            self.pusher.register_client(conn(connection), tx).await;
            self.repository.register(conn(connection), Timestamp::new(0)).await;
            self.repository
                .identify(&conn(connection), identity(user_id))
                .await
                .unwrap();
            for r in rooms {
                self.repository.join(&room(r), &conn(connection)).await.unwrap();
            }
            rx
        }
    }

    fn event(from: &str, connection: &str, target: Target, delivery: Delivery) -> DomainEvent {
        DomainEvent {
            origin: Origin::User {
                identity: identity(from),
                connection_id: conn(connection),
            },
            target,
            delivery,
            kind: EventKind::ReceiveMessage,
            body: json!({"content": "hi"}),
            timestamp: Timestamp::new(0),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    #[tokio::test]
    async fn test_room_broadcast_reaches_every_connection_once() {
        // テスト項目: 同じアイデンティティが N 接続でルームにいる場合、N 接続全てに 1 回ずつ届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut phone = fixture.connect("phone", "U2", &["room-42"]).await;
        let mut laptop = fixture.connect("laptop", "U2", &["room-42"]).await;
        let mut sender = fixture.connect("c1", "U1", &["room-42"]).await;

        // when (操作):
        let report = fixture
            .dispatcher()
            .dispatch(&event("U1", "c1", Target::Room(room("room-42")), Delivery::IncludeSender))
            .await;

        // then (期待する結果):
        assert_eq!(report.delivered, 3);
        assert_eq!(drain(&mut phone).len(), 1);
        assert_eq!(drain(&mut laptop).len(), 1);
        assert_eq!(drain(&mut sender).len(), 1);
    }

    #[tokio::test]
    async fn test_exclude_sender_skips_only_triggering_connection() {
        // テスト項目: 送信者除外は送信元の接続のみを除外し、同一ユーザーの別接続には届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut origin = fixture.connect("phone", "U1", &["room-42"]).await;
        let mut other_device = fixture.connect("laptop", "U1", &["room-42"]).await;
        let mut peer = fixture.connect("c2", "U2", &["room-42"]).await;

        // when (操作):
        let report = fixture
            .dispatcher()
            .dispatch(&event("U1", "phone", Target::Room(room("room-42")), Delivery::ExcludeSender))
            .await;

        // then (期待する結果):
        assert_eq!(report.targets, 2);
        assert!(drain(&mut origin).is_empty());
        assert_eq!(drain(&mut other_device).len(), 1);
        assert_eq!(drain(&mut peer).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_room_is_dropped_silently() {
        // テスト項目: 誰も参加していないルームへの送信は配信 0 件でエラーにならない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut sender = fixture.connect("c1", "U1", &["room-42"]).await;

        // when (操作):
        let report = fixture
            .dispatcher()
            .dispatch(&event("U1", "c1", Target::Room(room("room-99")), Delivery::IncludeSender))
            .await;

        // then (期待する結果):
        assert_eq!(report, DispatchReport::default());
        assert!(drain(&mut sender).is_empty());
    }

    #[tokio::test]
    async fn test_user_target_reaches_all_devices_without_rooms() {
        // テスト項目: ユーザー宛てのイベントはルーム参加なしで全端末に届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut phone = fixture.connect("phone", "C1", &[]).await;
        let mut laptop = fixture.connect("laptop", "C1", &[]).await;
        let _sender = fixture.connect("c1", "U1", &[]).await;

        // when (操作):
        let user_id = UserId::new("C1".to_string()).unwrap();
        let report = fixture
            .dispatcher()
            .dispatch(&event("U1", "c1", Target::User(user_id), Delivery::IncludeSender))
            .await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert_eq!(drain(&mut phone)[0]["event"], "receive_message");
        assert_eq!(drain(&mut laptop).len(), 1);
    }

    #[tokio::test]
    async fn test_push_failure_is_reported_not_raised() {
        // テスト項目: トランスポートの送信失敗は集計されるだけで例外にならない
        // given (前提条件):
        let repository = Arc::new(InMemoryPresenceRepository::default());
        repository.register(conn("c1"), Timestamp::new(0)).await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .times(1)
            .returning(|targets, _, _| BroadcastReport {
                delivered: 0,
                failed: targets.len(),
            });
        let dispatcher = FanOutDispatcher::new(repository, Arc::new(pusher));

        // when (操作):
        let report = dispatcher
            .dispatch(&DomainEvent {
                origin: Origin::System,
                target: Target::Connection(conn("c1")),
                delivery: Delivery::IncludeSender,
                kind: EventKind::InitSuccess,
                body: Value::Null,
                timestamp: Timestamp::new(0),
            })
            .await;

        // then (期待する結果):
        assert_eq!(report.targets, 1);
        assert_eq!(report.failed, 1);
    }
}
