//! 브로드캐스트 라우터.
//!
//! 연결별 개인 채널과 인증된 세션 전체가 구독하는 공유 채널로
//! 아웃바운드 메시지를 전달합니다.

use std::collections::HashMap;
use std::sync::Arc;

use signal_core::ChannelConfig;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

/// 연결 하나의 아웃바운드 채널 상태.
struct SessionChannel {
    /// 연결의 writer 태스크가 비우는 큐 (연결별 FIFO)
    tx: mpsc::UnboundedSender<String>,
    /// 공유 브로드캐스트 채널 구독 여부
    in_broadcast: bool,
}

/// 연결별 개인 채널과 공유 채널을 관리하는 라우터.
///
/// 전달은 연결별 at-most-once, best-effort입니다: 이미 닫힌 수신자는
/// 건너뛰며 재시도하지 않습니다. 한 연결로 향하는 메시지들은 동일한
/// 큐를 거치므로 연결별 FIFO 순서가 보장됩니다.
pub struct ChannelRouter {
    channels: ChannelConfig,
    sessions: RwLock<HashMap<String, SessionChannel>>,
}

impl ChannelRouter {
    /// 새 라우터를 생성합니다.
    pub fn new(channels: ChannelConfig) -> Self {
        Self {
            channels,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// 연결의 개인 채널 이름 (로그용).
    pub fn private_channel(&self, connection_id: &str) -> String {
        self.channels.private_channel(connection_id)
    }

    /// 공유 채널 이름 (로그용).
    pub fn broadcast_channel(&self) -> &str {
        &self.channels.broadcast
    }

    /// 새 연결을 등록하고 개인 채널의 수신기를 반환합니다.
    ///
    /// 등록 시점에는 공유 채널을 구독하지 않습니다.
    pub async fn register(&self, connection_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            connection_id.to_string(),
            SessionChannel {
                tx,
                in_broadcast: false,
            },
        );

        rx
    }

    /// 연결을 제거합니다.
    pub async fn unregister(&self, connection_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(connection_id);
    }

    /// 연결을 공유 브로드캐스트 채널에 구독시킵니다.
    pub async fn join_broadcast(&self, connection_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(connection_id) {
            Some(session) => {
                session.in_broadcast = true;
                true
            }
            None => {
                warn!(connection_id, "Cannot subscribe unknown connection");
                false
            }
        }
    }

    /// 한 연결의 개인 채널로만 메시지를 전달합니다.
    pub async fn send_direct(&self, connection_id: &str, message: String) -> bool {
        let sessions = self.sessions.read().await;
        match sessions.get(connection_id) {
            Some(session) => session.tx.send(message).is_ok(),
            None => {
                debug!(connection_id, "Dropping message for unknown connection");
                false
            }
        }
    }

    /// 공유 채널을 구독 중인 모든 연결(발행자 포함)에 메시지를
    /// 전달하고 전달된 수를 반환합니다.
    pub async fn publish(&self, message: String) -> usize {
        let sessions = self.sessions.read().await;
        let mut delivered = 0;

        for session in sessions.values().filter(|s| s.in_broadcast) {
            if session.tx.send(message.clone()).is_ok() {
                delivered += 1;
            }
        }

        delivered
    }

    /// 등록된 연결 수.
    pub async fn client_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// 공유 채널 구독자 수.
    pub async fn broadcast_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.in_broadcast)
            .count()
    }
}

/// 공유 가능한 라우터 타입.
pub type SharedRouter = Arc<ChannelRouter>;

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ChannelRouter {
        ChannelRouter::new(ChannelConfig::default())
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        let router = router();

        let _rx = router.register("conn-1").await;
        assert_eq!(router.client_count().await, 1);

        router.unregister("conn-1").await;
        assert_eq!(router.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_send_direct() {
        let router = router();
        let mut rx = router.register("conn-1").await;

        assert!(router.send_direct("conn-1", "hello".to_string()).await);
        assert_eq!(rx.try_recv().unwrap(), "hello");

        // 등록되지 않은 연결로는 전달되지 않음
        assert!(!router.send_direct("ghost", "hello".to_string()).await);
    }

    #[tokio::test]
    async fn test_publish_reaches_only_subscribed() {
        let router = router();
        let mut subscribed = router.register("conn-1").await;
        let mut unsubscribed = router.register("conn-2").await;

        router.join_broadcast("conn-1").await;

        assert_eq!(router.publish("event".to_string()).await, 1);
        assert_eq!(subscribed.try_recv().unwrap(), "event");
        assert!(unsubscribed.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_includes_publisher() {
        let router = router();
        let mut a = router.register("a").await;
        let mut b = router.register("b").await;
        router.join_broadcast("a").await;
        router.join_broadcast("b").await;

        assert_eq!(router.publish("event".to_string()).await, 2);
        // 발행한 연결 자신도 정확히 한 번 수신
        assert_eq!(a.try_recv().unwrap(), "event");
        assert!(a.try_recv().is_err());
        assert_eq!(b.try_recv().unwrap(), "event");
        assert!(b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_skips_closed_receiver() {
        let router = router();
        let rx = router.register("gone").await;
        let mut alive = router.register("alive").await;
        router.join_broadcast("gone").await;
        router.join_broadcast("alive").await;

        drop(rx);

        // 닫힌 수신자는 건너뛰고 나머지는 정상 전달
        assert_eq!(router.publish("event".to_string()).await, 1);
        assert_eq!(alive.try_recv().unwrap(), "event");
    }

    #[tokio::test]
    async fn test_per_connection_fifo() {
        let router = router();
        let mut rx = router.register("conn-1").await;
        router.join_broadcast("conn-1").await;

        router.send_direct("conn-1", "1".to_string()).await;
        router.publish("2".to_string()).await;
        router.send_direct("conn-1", "3".to_string()).await;

        assert_eq!(rx.try_recv().unwrap(), "1");
        assert_eq!(rx.try_recv().unwrap(), "2");
        assert_eq!(rx.try_recv().unwrap(), "3");
    }

    #[tokio::test]
    async fn test_join_broadcast_unknown_connection() {
        let router = router();

        assert!(!router.join_broadcast("ghost").await);
        assert_eq!(router.broadcast_count().await, 0);
    }

    #[tokio::test]
    async fn test_channel_names() {
        let router = router();

        assert_eq!(router.private_channel("abc"), "user_abc");
        assert_eq!(router.broadcast_channel(), "broadcast");
    }
}
