//! The scoped pub-sub channel shared by every namespace.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::{EventContext, EventRouter, RouteError};
use crate::{
    domain::{
        Command, ConnectionId, ConnectionIdFactory, Delivery, DomainEvent, EventKind, Identity,
        MessagePusher, NamespaceKind, Origin, PresenceRepository, PusherChannel, RegistryError,
        RoomId, RoomSnapshot, Target, Timestamp, UserId, Username, ValueObjectError,
    },
    infrastructure::dto::websocket::{
        ActiveUser, INIT_USER_EVENT, InboundEnvelope, InitSuccessPayload, InitUserPayload,
        MembershipPayload, RoomJoinedPayload,
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, DispatchReport, FanOutDispatcher,
        GetRoomDetailError, GetRoomDetailUseCase, GetRoomsUseCase, IdentifyClientUseCase,
        IdentifyError, JoinRoomUseCase, LeaveRoomUseCase, LookupSenderUseCase,
    },
};
use sponsorlink_shared::time::Clock;

/// Errors of one inbound frame. All of them are logged and dropped by the
/// transport; none is reported to the client.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Malformed frame: {0}")]
    Malformed(String),

    #[error("Invalid init_user payload: {0}")]
    InvalidInit(String),

    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// One namespace: its own presence state, pusher and event vocabulary.
pub struct NamespaceChannel {
    router: Box<dyn EventRouter>,
    clock: Arc<dyn Clock>,
    message_pusher: Arc<dyn MessagePusher>,
    connect_client: ConnectClientUseCase,
    identify_client: IdentifyClientUseCase,
    lookup_sender: LookupSenderUseCase,
    join_room: JoinRoomUseCase,
    leave_room: LeaveRoomUseCase,
    disconnect_client: DisconnectClientUseCase,
    dispatcher: FanOutDispatcher,
    get_rooms: GetRoomsUseCase,
    get_room_detail: GetRoomDetailUseCase,
}

impl NamespaceChannel {
    /// Create a namespace channel
    ///
    /// # Arguments
    ///
    /// * `router` - Event vocabulary of the namespace
    /// * `repository` - Presence state, not shared with other namespaces
    /// * `message_pusher` - Outbound transport of this namespace's connections
    /// * `clock` - Source of server timestamps
    pub fn new(
        router: Box<dyn EventRouter>,
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            router,
            connect_client: ConnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            clock,
            identify_client: IdentifyClientUseCase::new(repository.clone()),
            lookup_sender: LookupSenderUseCase::new(repository.clone()),
            join_room: JoinRoomUseCase::new(repository.clone()),
            leave_room: LeaveRoomUseCase::new(repository.clone()),
            disconnect_client: DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            dispatcher: FanOutDispatcher::new(repository.clone(), message_pusher.clone()),
            message_pusher,
            get_rooms: GetRoomsUseCase::new(repository.clone()),
            get_room_detail: GetRoomDetailUseCase::new(repository),
        }
    }

    pub fn kind(&self) -> NamespaceKind {
        self.router.namespace()
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// Register a new anonymous connection whose frames go to `sender`.
    pub async fn connect(&self, sender: PusherChannel) -> Result<ConnectionId, ChannelError> {
        let connection_id = ConnectionIdFactory::generate()?;
        self.connect_client
            .execute(connection_id.clone(), sender)
            .await;
        tracing::info!("[{}] Connection '{}' opened", self.kind(), connection_id);
        Ok(connection_id)
    }

    /// Handle one inbound text frame to completion.
    pub async fn handle_frame(
        &self,
        connection_id: &ConnectionId,
        text: &str,
    ) -> Result<(), ChannelError> {
        let envelope: InboundEnvelope =
            serde_json::from_str(text).map_err(|e| ChannelError::Malformed(e.to_string()))?;

        if envelope.event == INIT_USER_EVENT {
            return self.identify(connection_id, envelope.data).await;
        }

        // 匿名の接続からのドメインイベントは破棄する
        let sender = self.lookup_sender.execute(connection_id).await?;
        let ctx = EventContext {
            connection_id,
            sender: &sender,
            now: self.now(),
        };

        match self.router.route(&envelope.event, envelope.data, &ctx)? {
            Command::Join(room_id) => self.join(connection_id, &room_id).await,
            Command::Leave(room_id) => self.leave(connection_id, &room_id).await,
            Command::Publish(event) => {
                self.publish(&event).await;
                Ok(())
            }
        }
    }

    /// Remove the connection and tell every room it occupied.
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        let Some(departure) = self.disconnect_client.execute(connection_id).await else {
            return;
        };
        tracing::info!(
            "[{}] Connection '{}' closed ({} rooms left)",
            self.kind(),
            connection_id,
            departure.rooms.len()
        );

        let Some(identity) = departure.connection.identity else {
            return;
        };
        for room_id in departure.rooms {
            self.announce(EventKind::UserLeft, &identity, connection_id, room_id)
                .await;
        }
    }

    /// Dispatch an event through this namespace's fan-out.
    pub async fn publish(&self, event: &DomainEvent) -> DispatchReport {
        self.dispatcher.dispatch(event).await
    }

    pub async fn connection_count(&self) -> usize {
        self.get_rooms.count_connections().await
    }

    pub async fn room_count(&self) -> usize {
        self.get_rooms.count_rooms().await
    }

    pub async fn rooms(&self) -> Vec<RoomSnapshot> {
        self.get_rooms.execute().await
    }

    pub async fn room(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        self.get_room_detail.execute(room_id).await
    }

    async fn identify(
        &self,
        connection_id: &ConnectionId,
        data: Value,
    ) -> Result<(), ChannelError> {
        let payload: InitUserPayload =
            serde_json::from_value(data).map_err(|e| ChannelError::InvalidInit(e.to_string()))?;
        let user_id = UserId::new(payload.id.into_string())?;
        let username = match payload.username {
            Some(name) if !name.trim().is_empty() => Username::new(name)?,
            _ => Username::new(user_id.as_str().to_string())?,
        };

        match self
            .identify_client
            .execute(connection_id, Identity::new(user_id, username))
            .await
        {
            Ok(identity) => {
                tracing::info!(
                    "[{}] Connection '{}' identified as '{}'",
                    self.kind(),
                    connection_id,
                    identity.user_id
                );
                let body = InitSuccessPayload {
                    socket_id: connection_id.as_str().to_string(),
                };
                self.reply(connection_id, EventKind::InitSuccess, encode(&body)?)
                    .await;
            }
            Err(IdentifyError::AlreadyIdentified(id)) => {
                tracing::debug!("[{}] Ignoring repeated init_user on '{}'", self.kind(), id);
            }
            Err(IdentifyError::UnknownConnection(id)) => {
                tracing::debug!("[{}] init_user from closed connection '{}'", self.kind(), id);
            }
        }
        Ok(())
    }

    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<(), ChannelError> {
        let outcome = self.join_room.execute(connection_id, room_id).await?;

        let snapshot = RoomJoinedPayload {
            room_id: outcome.room.as_str().to_string(),
            active_users: outcome.members.into_iter().map(ActiveUser::from).collect(),
        };
        self.reply(connection_id, EventKind::RoomJoined, encode(&snapshot)?)
            .await;

        if outcome.newly_joined {
            tracing::debug!(
                "[{}] '{}' joined room '{}'",
                self.kind(),
                outcome.identity.user_id,
                outcome.room
            );
            self.announce(EventKind::UserJoined, &outcome.identity, connection_id, outcome.room)
                .await;
        }
        Ok(())
    }

    async fn leave(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<(), ChannelError> {
        if let Some(identity) = self.leave_room.execute(connection_id, room_id).await? {
            tracing::debug!(
                "[{}] '{}' left room '{}'",
                self.kind(),
                identity.user_id,
                room_id
            );
            self.announce(EventKind::UserLeft, &identity, connection_id, room_id.clone())
                .await;
        }
        Ok(())
    }

    /// Direct reply to a single connection.
    async fn reply(&self, connection_id: &ConnectionId, kind: EventKind, body: Value) {
        if let Err(e) = self.message_pusher.push_to(connection_id, kind, &body).await {
            tracing::debug!(
                "[{}] Reply '{}' to '{}' dropped: {}",
                self.kind(),
                kind.as_str(),
                connection_id,
                e
            );
        }
    }

    /// `user_joined` / `user_left` to the room, never echoed to the triggering connection.
    async fn announce(
        &self,
        kind: EventKind,
        identity: &Identity,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) {
        let body = MembershipPayload {
            user_id: identity.user_id.as_str().to_string(),
            username: identity.username.as_str().to_string(),
            socket_id: connection_id.as_str().to_string(),
            room_id: room_id.as_str().to_string(),
        };
        let body = match encode(&body) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("[{}] {}", self.kind(), e);
                return;
            }
        };
        self.publish(&DomainEvent {
            origin: Origin::User {
                identity: identity.clone(),
                connection_id: connection_id.clone(),
            },
            target: Target::Room(room_id),
            delivery: Delivery::ExcludeSender,
            kind,
            body,
            timestamp: self.now(),
        })
        .await;
    }
}

fn encode<T: serde::Serialize>(body: &T) -> Result<Value, ChannelError> {
    Ok(super::encode(body)?)
}
