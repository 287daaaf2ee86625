//! 인메모리 저장소 구현.
//!
//! 서비스 계층 테스트에서 Redis 대신 사용합니다.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::store::Store;

#[derive(Debug, Default)]
struct Inner {
    hashes: HashMap<String, HashMap<String, String>>,
    sets: HashMap<String, HashSet<String>>,
}

/// HashMap 기반 인메모리 저장소.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 집합 컬렉션에 멤버를 추가합니다 (테스트 데이터 준비용).
    pub async fn set_add(&self, collection: &str, member: &str) {
        let mut inner = self.inner.write().await;
        inner
            .sets
            .entry(collection.to_string())
            .or_default()
            .insert(member.to_string());
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn hash_get(&self, collection: &str, key: &str) -> Result<Option<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .hashes
            .get(collection)
            .and_then(|hash| hash.get(key))
            .cloned())
    }

    async fn hash_set(&self, collection: &str, key: &str, value: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let previous = inner
            .hashes
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());

        Ok(previous.is_none())
    }

    async fn hash_del(&self, collection: &str, key: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .hashes
            .get_mut(collection)
            .and_then(|hash| hash.remove(key))
            .is_some())
    }

    async fn hash_exists(&self, collection: &str, key: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .hashes
            .get(collection)
            .is_some_and(|hash| hash.contains_key(key)))
    }

    async fn hash_all(&self, collection: &str) -> Result<Vec<(String, String)>> {
        let inner = self.inner.read().await;
        Ok(inner
            .hashes
            .get(collection)
            .map(|hash| {
                hash.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn set_contains(&self, collection: &str, member: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .sets
            .get(collection)
            .is_some_and(|set| set.contains(member)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// 항상 연결 오류를 반환하는 저장소.
///
/// 저장소 장애 시 서비스 계층이 닫힌 쪽으로 실패하는지(fail closed)
/// 검증하는 테스트에 사용합니다.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn unreachable_error() -> StoreError {
        StoreError::Connection("store unreachable".to_string())
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn hash_get(&self, _collection: &str, _key: &str) -> Result<Option<String>> {
        Err(Self::unreachable_error())
    }

    async fn hash_set(&self, _collection: &str, _key: &str, _value: &str) -> Result<bool> {
        Err(Self::unreachable_error())
    }

    async fn hash_del(&self, _collection: &str, _key: &str) -> Result<bool> {
        Err(Self::unreachable_error())
    }

    async fn hash_exists(&self, _collection: &str, _key: &str) -> Result<bool> {
        Err(Self::unreachable_error())
    }

    async fn hash_all(&self, _collection: &str) -> Result<Vec<(String, String)>> {
        Err(Self::unreachable_error())
    }

    async fn set_contains(&self, _collection: &str, _member: &str) -> Result<bool> {
        Err(Self::unreachable_error())
    }

    async fn ping(&self) -> Result<()> {
        Err(Self::unreachable_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::collections;

    #[tokio::test]
    async fn test_hash_set_created_vs_updated() {
        let store = MemoryStore::new();

        // 새 필드 생성은 true, 기존 값 교체는 false
        assert!(store.hash_set(collections::SIGNALS, "BTC", "0-100").await.unwrap());
        assert!(!store.hash_set(collections::SIGNALS, "BTC", "0-200").await.unwrap());

        assert_eq!(
            store.hash_get(collections::SIGNALS, "BTC").await.unwrap(),
            Some("0-200".to_string())
        );
    }

    #[tokio::test]
    async fn test_hash_del() {
        let store = MemoryStore::new();
        store.hash_set(collections::SIGNALS, "USD", "Full amount").await.unwrap();

        assert!(store.hash_del(collections::SIGNALS, "USD").await.unwrap());
        assert!(!store.hash_del(collections::SIGNALS, "USD").await.unwrap());
        assert_eq!(store.hash_get(collections::SIGNALS, "USD").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_hash_exists_and_all() {
        let store = MemoryStore::new();
        store.hash_set(collections::SIGNALS, "BTC", "0-100").await.unwrap();
        store.hash_set(collections::SIGNALS, "ETH", "10-20").await.unwrap();

        assert!(store.hash_exists(collections::SIGNALS, "BTC").await.unwrap());
        assert!(!store.hash_exists(collections::SIGNALS, "XRP").await.unwrap());

        let mut all = store.hash_all(collections::SIGNALS).await.unwrap();
        all.sort();
        assert_eq!(
            all,
            vec![
                ("BTC".to_string(), "0-100".to_string()),
                ("ETH".to_string(), "10-20".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_hash_all_empty_collection() {
        let store = MemoryStore::new();
        assert!(store.hash_all(collections::SIGNALS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_contains() {
        let store = MemoryStore::new();
        store.set_add(collections::ADMINS, "admin").await;

        assert!(store.set_contains(collections::ADMINS, "admin").await.unwrap());
        assert!(!store.set_contains(collections::ADMINS, "user").await.unwrap());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store.hash_set(collections::USERS, "alice", "digest:salt").await.unwrap();

        assert!(!store.hash_exists(collections::SIGNALS, "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingStore;

        assert!(store.hash_get(collections::USERS, "alice").await.is_err());
        assert!(store.ping().await.is_err());
    }
}
