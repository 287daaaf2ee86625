//! 시그널 배포 WebSocket 서버.
//!
//! Axum 기반 WebSocket 서버를 시작합니다. 인증된 구독자에게 트레이딩
//! 시그널을 배포하고, 관리자 세션의 시그널 변경을 브로드캐스트합니다.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use signal_core::{init_logging, AppConfig, LogConfig};
use signal_server::health::health_handler;
use signal_server::state::AppState;
use signal_server::websocket::websocket_handler;
use signal_store::{RedisStore, SharedStore};

/// 설정 로드.
///
/// `SIGNAL_CONFIG` 환경변수가 설정 파일 경로를 가리키면 파일과 환경
/// 변수를 함께 사용하고, 없으면 환경 변수와 기본값만 사용합니다.
fn load_config() -> Result<AppConfig, config::ConfigError> {
    match std::env::var("SIGNAL_CONFIG") {
        Ok(path) => AppConfig::load(path),
        Err(_) => AppConfig::from_env(),
    }
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드
    let config = load_config().context("failed to load configuration")?;

    // tracing 초기화
    let log_format = config
        .logging
        .format
        .parse()
        .unwrap_or_default();
    init_logging(LogConfig::new(&config.logging.level).with_format(log_format))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("Starting signal distribution server...");

    // 저장소 연결
    let store: SharedStore = Arc::new(
        RedisStore::connect(&config.redis.url)
            .await
            .with_context(|| format!("failed to connect to store at {}", config.redis.url))?,
    );

    // 애플리케이션 상태 구성
    let state = Arc::new(AppState::new(store, config.channels.clone()));
    info!(
        broadcast_channel = %config.channels.broadcast,
        private_prefix = %config.channels.private_prefix,
        "Application state initialized"
    );

    // 라우터 생성 및 서버 시작
    let app = create_router(state);
    let addr = config
        .server
        .socket_addr()
        .context("invalid SERVER_HOST/SERVER_PORT configuration")?;

    info!(%addr, "WebSocket server listening");
    info!("WebSocket available at ws://{}/ws", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
