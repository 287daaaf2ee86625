//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 사용하는 서버 상태 확인
//! 엔드포인트를 제공합니다.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,
    /// 서버 버전
    pub version: String,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
    /// 저장소 연결 상태 ("up" | "down")
    pub store: String,
    /// 현재 연결 수
    pub connections: usize,
}

/// 헬스 체크 핸들러.
///
/// 저장소가 도달 가능하면 200, 아니면 503을 반환합니다.
///
/// # 엔드포인트
///
/// `GET /health`
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let store_up = state.store.ping().await.is_ok();

    let response = HealthResponse {
        status: if store_up { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: if store_up { "up" } else { "down" }.to_string(),
        connections: state.router.client_count().await,
    };

    let code = if store_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::ChannelConfig;
    use signal_store::{FailingStore, MemoryStore};

    #[tokio::test]
    async fn test_healthy() {
        let state = Arc::new(AppState::new(
            Arc::new(MemoryStore::new()),
            ChannelConfig::default(),
        ));

        let (code, Json(body)) = health_handler(State(state)).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(body.store, "up");
        assert_eq!(body.connections, 0);
    }

    #[tokio::test]
    async fn test_degraded_when_store_down() {
        let state = Arc::new(AppState::new(
            Arc::new(FailingStore),
            ChannelConfig::default(),
        ));

        let (code, Json(body)) = health_handler(State(state)).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.store, "down");
    }
}
