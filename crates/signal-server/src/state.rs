//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use std::sync::Arc;

use signal_core::{ChannelConfig, ConnectionIdGenerator};
use signal_store::SharedStore;

use crate::auth::AuthService;
use crate::registry::SignalRegistry;
use crate::websocket::{ChannelRouter, SharedRouter};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다. 명시적으로
/// 구성되어 주입되며, 전역 싱글턴은 없습니다.
pub struct AppState {
    /// 인증 서비스
    pub auth: AuthService,
    /// 시그널 레지스트리
    pub registry: SignalRegistry,
    /// 브로드캐스트 라우터
    pub router: SharedRouter,
    /// 연결 ID 생성기
    pub ids: ConnectionIdGenerator,
    /// 저장소 핸들 (헬스 체크용)
    pub store: SharedStore,
}

impl AppState {
    /// 공유 저장소와 채널 설정으로 상태를 구성합니다.
    pub fn new(store: SharedStore, channels: ChannelConfig) -> Self {
        Self {
            auth: AuthService::new(store.clone()),
            registry: SignalRegistry::new(store.clone()),
            router: Arc::new(ChannelRouter::new(channels)),
            ids: ConnectionIdGenerator::new(),
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_store::MemoryStore;

    #[tokio::test]
    async fn test_state_construction() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let state = AppState::new(store, ChannelConfig::default());

        assert_eq!(state.router.client_count().await, 0);
        assert!(state.store.ping().await.is_ok());
    }
}
