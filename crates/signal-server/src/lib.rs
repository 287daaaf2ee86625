//! # Signal Server
//!
//! 인증된 구독자에게 트레이딩 시그널을 실시간 배포하는 WebSocket 서버.
//!
//! 익명 연결은 인증 명령을 통해 권한 범위가 정해진 세션이 되고,
//! 관리자 세션의 시그널 변경은 검증/저장 후 공유 채널의 모든 구독
//! 세션(변경을 일으킨 세션 포함)에 정확히 한 번씩 전달됩니다.

pub mod auth;
pub mod health;
pub mod registry;
pub mod session;
pub mod state;
pub mod websocket;
