//! WebSocket 메시지 타입.
//!
//! 클라이언트-서버 간 교환되는 JSON 메시지 정의.

use serde::{Deserialize, Serialize};

/// WebSocket 메시지 에러.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    #[error("잘못된 메시지 형식: {0}")]
    InvalidMessage(String),
    #[error("직렬화 실패: {0}")]
    SerializationError(#[from] serde_json::Error),
}

// ==================== 클라이언트 → 서버 메시지 ====================

/// 클라이언트에서 서버로 보내는 명령.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum ClientCommand {
    /// 세션 인증
    Authorization {
        /// 로그인
        username: String,
        /// 평문 비밀번호
        password: String,
    },
    /// 시그널 추가/교체 (관리자 전용)
    Add {
        /// 티커 심볼
        #[serde(rename = "tickerSymbol")]
        ticker_symbol: String,
        /// 시그널 한도
        limits: String,
    },
    /// 시그널 삭제 (관리자 전용)
    Delete {
        /// 티커 심볼
        #[serde(rename = "tickerSymbol")]
        ticker_symbol: String,
    },
}

impl ClientCommand {
    /// JSON 문자열에서 파싱.
    pub fn from_json(json: &str) -> Result<Self, WsError> {
        serde_json::from_str(json).map_err(|e| WsError::InvalidMessage(e.to_string()))
    }
}

// ==================== 서버 → 클라이언트 메시지 ====================

/// 서버에서 클라이언트로 보내는 `command` 태그 이벤트.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ServerEvent {
    /// 현재 활성 시그널 (인증 직후 스냅샷으로 전송)
    Active {
        #[serde(rename = "tickerSymbol")]
        ticker_symbol: String,
        limits: String,
    },
    /// 시그널 추가 브로드캐스트
    Add {
        #[serde(rename = "tickerSymbol")]
        ticker_symbol: String,
        limits: String,
    },
    /// 시그널 삭제 브로드캐스트 (limits 없음)
    Delete {
        #[serde(rename = "tickerSymbol")]
        ticker_symbol: String,
    },
    /// 명령 성공 응답
    Success,
    /// 명령 실패 응답
    Fail,
    /// 알 수 없는 명령 응답
    UnknownCommand,
}

impl ServerEvent {
    /// JSON 문자열로 직렬화.
    pub fn to_json(&self) -> Result<String, WsError> {
        serde_json::to_string(self).map_err(WsError::from)
    }
}

/// 인증 실패 응답: `{"authorization":"false"}`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthFailure {
    authorization: &'static str,
}

impl AuthFailure {
    /// 실패 응답을 생성합니다.
    pub fn reply() -> Self {
        Self {
            authorization: "false",
        }
    }

    /// JSON 문자열로 직렬화.
    pub fn to_json(&self) -> Result<String, WsError> {
        serde_json::to_string(self).map_err(WsError::from)
    }
}

impl Default for AuthFailure {
    fn default() -> Self {
        Self::reply()
    }
}
