//! 시그널 도메인 모델.

use serde::{Deserialize, Serialize};

/// 트레이딩 시그널 레코드.
///
/// 티커 심볼을 키로 하는 변경 가능한 레코드이며, 구독 중인 모든 세션에
/// 배포됩니다. 티커당 최대 하나의 시그널만 존재합니다 (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// 티커 심볼 (고유 키)
    pub ticker_symbol: String,
    /// 시그널 한도 (불투명 페이로드)
    pub limits: String,
}

impl Signal {
    /// 새 시그널을 생성합니다.
    pub fn new(ticker_symbol: impl Into<String>, limits: impl Into<String>) -> Self {
        Self {
            ticker_symbol: ticker_symbol.into(),
            limits: limits.into(),
        }
    }
}
