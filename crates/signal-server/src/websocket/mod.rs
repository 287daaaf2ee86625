//! 시그널 배포를 위한 WebSocket 서버.
//!
//! 연결이 열리면 세션은 미인증 상태로 시작해 개인 채널
//! (`user_<connection_id>`)에 구독됩니다. 인증에 성공한 세션은 공유
//! 채널(`broadcast`)에 구독되고 현재 시그널 스냅샷을 받습니다. 관리자
//! 세션의 변경은 공유 채널의 모든 구독자에게 전달됩니다.
//!
//! # 메시지 형식
//!
//! 모든 메시지는 JSON 형식으로 교환됩니다.
//!
//! ## 클라이언트 → 서버
//!
//! ```json
//! {"command": "authorization", "username": "admin", "password": "12345678"}
//! {"command": "add", "tickerSymbol": "USD", "limits": "Full amount"}
//! {"command": "delete", "tickerSymbol": "USD"}
//! ```
//!
//! ## 서버 → 클라이언트
//!
//! ```json
//! {"authorization": "false"}
//! {"command": "active", "tickerSymbol": "USD", "limits": "Full amount"}
//! {"command": "success"}
//! {"command": "add", "tickerSymbol": "USD", "limits": "Full amount"}
//! ```

pub mod channels;
pub mod handler;
pub mod messages;

pub use channels::{ChannelRouter, SharedRouter};
pub use handler::websocket_handler;
pub use messages::{AuthFailure, ClientCommand, ServerEvent, WsError};
