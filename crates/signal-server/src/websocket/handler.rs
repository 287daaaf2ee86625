//! WebSocket 연결 handler.
//!
//! 연결 수명주기(수락 → 식별 → 인증 → 메시지 루프 → 종료)를 소유하고,
//! 인바운드 명령을 인증 서비스와 시그널 레지스트리로, 아웃바운드
//! 결과를 브로드캐스트 라우터로 보냅니다.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use super::messages::{AuthFailure, ClientCommand, ServerEvent};
use crate::session::Session;
use crate::state::AppState;

/// WebSocket 업그레이드 핸들러.
///
/// # 엔드포인트
///
/// `GET /ws`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// WebSocket 연결 처리.
///
/// 연결은 수명 동안 하나의 태스크에 고정되고 메시지는 순차 처리되므로
/// 세션 필드에 별도의 동기화가 필요 없습니다.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = state.ids.next_id();
    info!(
        connection_id = %connection_id,
        channel = %state.router.private_channel(&connection_id),
        "New connection, subscribed to the private channel"
    );

    // 개인 채널 등록
    let mut outbound = state.router.register(&connection_id).await;
    let mut session = Session::new(connection_id.clone());

    // WebSocket 스트림 분리
    let (mut sender, mut receiver) = socket.split();

    // 아웃바운드 메시지 전송 태스크 (연결별 FIFO 큐를 비움)
    let send_task = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if sender.send(Message::Text(message.into())).await.is_err() {
                break;
            }
        }
    });

    // 인바운드 메시지 수신 태스크 (연결당 순차 처리)
    let recv_state = state.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(frame) => {
                    if !handle_frame(&recv_state, &mut session, frame).await {
                        break;
                    }
                }
                Err(e) => {
                    warn!(connection_id = %session.connection_id(), error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // 하나의 태스크가 종료되면 연결을 정리
    tokio::select! {
        _ = send_task => {
            debug!(connection_id = %connection_id, "Send task ended");
        }
        _ = recv_task => {
            debug!(connection_id = %connection_id, "Receive task ended");
        }
    }

    state.router.unregister(&connection_id).await;
    info!(connection_id = %connection_id, "Connection closed");
}

/// 프레임 하나를 처리합니다.
///
/// # Returns
///
/// `true`면 연결 유지, `false`면 연결 종료
async fn handle_frame(state: &AppState, session: &mut Session, frame: Message) -> bool {
    match frame {
        Message::Text(text) => {
            process_message(state, session, &text).await;
            true
        }
        Message::Binary(_) => {
            warn!(connection_id = %session.connection_id(), "Binary messages not supported");
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            debug!(connection_id = %session.connection_id(), "Close message received");
            false
        }
    }
}

/// 텍스트 메시지 하나를 세션 상태에 따라 분기 처리합니다.
async fn process_message(state: &AppState, session: &mut Session, text: &str) {
    if !session.is_authenticated() {
        handle_authorization(state, session, text).await;
    } else if session.is_admin() {
        handle_signal_command(state, session, text).await;
    } else {
        // 비관리자 세션은 브로드캐스트 수신만 가능, 응답 없이 드롭
        info!(
            connection_id = %session.connection_id(),
            "The session does not have the right to publish signals"
        );
    }
}

/// 미인증 세션의 메시지 처리.
///
/// 인증 명령 외의 메시지는 상태 변경도 응답도 없이 무시됩니다.
async fn handle_authorization(state: &AppState, session: &mut Session, text: &str) {
    let connection_id = session.connection_id().to_string();

    let (username, password) = match ClientCommand::from_json(text) {
        Ok(ClientCommand::Authorization { username, password }) => (username, password),
        Ok(_) => {
            info!(connection_id = %connection_id, "The session is not authorized, command ignored");
            return;
        }
        Err(e) => {
            info!(connection_id = %connection_id, error = %e, "Unparseable message from unauthenticated session");
            return;
        }
    };

    let outcome = state
        .auth
        .authorize_session(session, &username, &password)
        .await;
    if !outcome.authenticated {
        // 실패 원인과 무관하게 균일한 거부 응답
        if let Ok(json) = AuthFailure::reply().to_json() {
            state.router.send_direct(&connection_id, json).await;
        }
        return;
    }

    state.router.join_broadcast(&connection_id).await;
    info!(
        connection_id = %connection_id,
        login = session.login().unwrap_or_default(),
        is_admin = session.is_admin(),
        channel = state.router.broadcast_channel(),
        "Session authorized and subscribed to the signal channel"
    );

    // 현재 전체 시그널을 이 연결에만 전송
    send_snapshot(state, &connection_id).await;
}

/// 활성 시그널 스냅샷을 한 연결로 전송합니다.
async fn send_snapshot(state: &AppState, connection_id: &str) {
    let signals = state.registry.list_signals().await;
    let count = signals.len();

    for signal in signals {
        let event = ServerEvent::Active {
            ticker_symbol: signal.ticker_symbol,
            limits: signal.limits,
        };
        if let Ok(json) = event.to_json() {
            state.router.send_direct(connection_id, json).await;
        }
    }

    info!(connection_id = %connection_id, count, "Active signals sent to the session");
}

/// 관리자 세션의 시그널 변경 명령 처리.
async fn handle_signal_command(state: &AppState, session: &Session, text: &str) {
    let connection_id = session.connection_id();

    match ClientCommand::from_json(text) {
        Ok(ClientCommand::Add { ticker_symbol, limits }) => {
            let ok = state.registry.set_signal(&ticker_symbol, &limits).await;
            reply(state, connection_id, if ok { ServerEvent::Success } else { ServerEvent::Fail }).await;

            if ok {
                publish_event(state, ServerEvent::Add { ticker_symbol, limits }).await;
            }
        }
        Ok(ClientCommand::Delete { ticker_symbol }) => {
            let ok = state.registry.del_signal(&ticker_symbol).await;
            reply(state, connection_id, if ok { ServerEvent::Success } else { ServerEvent::Fail }).await;

            if ok {
                publish_event(state, ServerEvent::Delete { ticker_symbol }).await;
            }
        }
        Ok(ClientCommand::Authorization { .. }) => {
            // 재인증 전이는 없음
            warn!(connection_id = %connection_id, "The session is already authorized");
            reply(state, connection_id, ServerEvent::UnknownCommand).await;
        }
        Err(e) => {
            warn!(connection_id = %connection_id, error = %e, "Unknown command from the session");
            reply(state, connection_id, ServerEvent::UnknownCommand).await;
        }
    }
}

/// 명령 결과를 보낸 세션에만 회신합니다.
async fn reply(state: &AppState, connection_id: &str, event: ServerEvent) {
    if let Ok(json) = event.to_json() {
        state.router.send_direct(connection_id, json).await;
    }
}

/// 성공한 변경을 공유 채널로 발행합니다.
async fn publish_event(state: &AppState, event: ServerEvent) {
    if let Ok(json) = event.to_json() {
        let delivered = state.router.publish(json).await;
        info!(
            subscribers = delivered,
            channel = state.router.broadcast_channel(),
            "A signal change is published"
        );
    }
}
