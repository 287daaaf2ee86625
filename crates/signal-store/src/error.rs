//! 저장소 모듈 오류 타입.

use thiserror::Error;

/// 저장소 관련 오류.
///
/// 모든 저장소 호출은 이 타입으로 실패를 보고합니다. 서비스 계층
/// (인증, 시그널 레지스트리)은 이 오류를 경계에서 잡아 불리언 실패
/// 결과로 강등하며, 프로토콜 계층으로는 절대 전파하지 않습니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 저장소 연결 오류
    #[error("Store connection error: {0}")]
    Connection(String),

    /// 명령 실행 오류
    #[error("Store command error: {0}")]
    Command(String),

    /// 저장된 값이 기대한 형식이 아님
    #[error("Invalid stored value: {0}")]
    InvalidValue(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Command("HSET failed".to_string());
        assert_eq!(err.to_string(), "Store command error: HSET failed");

        let err = StoreError::Connection("refused".to_string());
        assert_eq!(err.to_string(), "Store connection error: refused");
    }
}
