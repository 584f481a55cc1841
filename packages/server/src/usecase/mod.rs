//! UseCase 層
//!
//! プレゼンスとファンアウトのアプリケーションロジックを実装するレイヤー。
//! UI 層（名前空間チャンネル、HTTP ハンドラ）から呼び出され、Domain 層を操作します。
//! 各インスタンスは 1 つの名前空間の Repository と MessagePusher に束縛されます。

pub mod connect_client;
pub mod disconnect_client;
pub mod dispatch;
pub mod error;
pub mod get_rooms;
pub mod identify_client;
pub mod join_room;
pub mod leave_room;
pub mod lookup_sender;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use dispatch::{DispatchReport, FanOutDispatcher};
pub use error::{GetRoomDetailError, IdentifyError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use identify_client::IdentifyClientUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use lookup_sender::LookupSenderUseCase;
