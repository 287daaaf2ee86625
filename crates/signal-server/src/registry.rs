//! 시그널 레지스트리.
//!
//! 시그널 레코드에 대한 CRUD를 저장소에 위임합니다. 저장소 오류는 이
//! 계층에서 잡아 불리언 실패 결과로 변환하며, 프로토콜 계층으로
//! 장애를 전파하지 않습니다.

use signal_core::Signal;
use signal_store::{collections, SharedStore};
use tracing::{error, info};

/// 시그널 레코드 CRUD 서비스.
pub struct SignalRegistry {
    store: SharedStore,
}

impl SignalRegistry {
    /// 새 레지스트리를 생성합니다.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 시그널을 만들거나 교체합니다.
    ///
    /// 저장소에 도달하면 생성/교체 여부와 무관하게 `true`, 저장소
    /// 오류 시에만 `false`를 반환합니다.
    pub async fn set_signal(&self, ticker_symbol: &str, limits: &str) -> bool {
        match self
            .store
            .hash_set(collections::SIGNALS, ticker_symbol, limits)
            .await
        {
            Ok(true) => {
                info!(ticker = ticker_symbol, "Created the new signal");
                true
            }
            Ok(false) => {
                info!(ticker = ticker_symbol, "Upgraded the existing signal");
                true
            }
            Err(e) => {
                error!(ticker = ticker_symbol, error = %e, "Store error while setting signal");
                false
            }
        }
    }

    /// 시그널을 제거합니다.
    ///
    /// 레코드가 존재해서 제거되었을 때만 `true`를 반환합니다.
    pub async fn del_signal(&self, ticker_symbol: &str) -> bool {
        match self.store.hash_del(collections::SIGNALS, ticker_symbol).await {
            Ok(true) => {
                info!(ticker = ticker_symbol, "The signal is removed");
                true
            }
            Ok(false) => {
                info!(ticker = ticker_symbol, "The signal is not removed");
                false
            }
            Err(e) => {
                error!(ticker = ticker_symbol, error = %e, "Store error while deleting signal");
                false
            }
        }
    }

    /// 시그널 하나를 조회합니다.
    ///
    /// 없거나 저장소 오류(로그됨)면 `None`을 반환합니다.
    pub async fn get_signal(&self, ticker_symbol: &str) -> Option<Signal> {
        match self.store.hash_get(collections::SIGNALS, ticker_symbol).await {
            Ok(Some(limits)) => Some(Signal::new(ticker_symbol, limits)),
            Ok(None) => {
                info!(ticker = ticker_symbol, "Invalid ticker symbol");
                None
            }
            Err(e) => {
                error!(ticker = ticker_symbol, error = %e, "Store error while getting signal");
                None
            }
        }
    }

    /// 모든 시그널을 한 번의 왕복으로 조회합니다.
    ///
    /// 순서는 저장소 고유의 매핑 순서입니다. 저장소 오류 시 빈 목록을
    /// 반환합니다 (로그됨).
    pub async fn list_signals(&self) -> Vec<Signal> {
        match self.store.hash_all(collections::SIGNALS).await {
            Ok(entries) => {
                info!(count = entries.len(), "Listed active signals");
                entries
                    .into_iter()
                    .map(|(ticker_symbol, limits)| Signal::new(ticker_symbol, limits))
                    .collect()
            }
            Err(e) => {
                error!(error = %e, "Store error while listing signals");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_store::{FailingStore, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_then_get() {
        let registry = SignalRegistry::new(Arc::new(MemoryStore::new()));

        assert!(registry.set_signal("BTC", "0-100").await);
        assert_eq!(registry.get_signal("BTC").await, Some(Signal::new("BTC", "0-100")));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let registry = SignalRegistry::new(Arc::new(MemoryStore::new()));

        assert!(registry.set_signal("BTC", "0-100").await);
        assert!(registry.set_signal("BTC", "0-200").await);

        assert_eq!(registry.get_signal("BTC").await, Some(Signal::new("BTC", "0-200")));
        // 중복 키 없음
        assert_eq!(registry.list_signals().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_existing_and_absent() {
        let registry = SignalRegistry::new(Arc::new(MemoryStore::new()));
        registry.set_signal("BTC", "0-100").await;

        assert!(registry.del_signal("BTC").await);
        assert_eq!(registry.get_signal("BTC").await, None);
        assert!(!registry.del_signal("BTC").await);
    }

    #[tokio::test]
    async fn test_list_signals() {
        let registry = SignalRegistry::new(Arc::new(MemoryStore::new()));
        registry.set_signal("BTC", "0-100").await;
        registry.set_signal("USD", "Full amount").await;

        let mut signals = registry.list_signals().await;
        signals.sort_by(|a, b| a.ticker_symbol.cmp(&b.ticker_symbol));

        assert_eq!(
            signals,
            vec![Signal::new("BTC", "0-100"), Signal::new("USD", "Full amount")]
        );
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_boolean() {
        let registry = SignalRegistry::new(Arc::new(FailingStore));

        assert!(!registry.set_signal("BTC", "0-100").await);
        assert!(!registry.del_signal("BTC").await);
        assert_eq!(registry.get_signal("BTC").await, None);
        assert!(registry.list_signals().await.is_empty());
    }
}
