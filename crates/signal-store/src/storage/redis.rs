//! Redis 저장소 구현.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::Store;

/// Redis 연결 래퍼.
///
/// 해시 테이블 컬렉션은 Redis hash로, 집합 컬렉션은 Redis set으로
/// 매핑됩니다. 키 단위 원자성은 Redis의 명령 단위 보장에 의존합니다.
#[derive(Clone)]
pub struct RedisStore {
    connection: Arc<RwLock<MultiplexedConnection>>,
}

impl RedisStore {
    /// 새로운 Redis 저장소 연결을 생성합니다.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis...");

        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        info!("Redis connection established");

        Ok(Self {
            connection: Arc::new(RwLock::new(connection)),
        })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn hash_get(&self, collection: &str, key: &str) -> Result<Option<String>> {
        debug!(collection, key, "HGET");
        let mut conn = self.connection.write().await;
        let value: Option<String> = conn.hget(collection, key).await?;

        Ok(value)
    }

    async fn hash_set(&self, collection: &str, key: &str, value: &str) -> Result<bool> {
        debug!(collection, key, "HSET");
        let mut conn = self.connection.write().await;
        let created: i64 = conn.hset(collection, key, value).await?;

        Ok(created > 0)
    }

    async fn hash_del(&self, collection: &str, key: &str) -> Result<bool> {
        debug!(collection, key, "HDEL");
        let mut conn = self.connection.write().await;
        let removed: i64 = conn.hdel(collection, key).await?;

        Ok(removed > 0)
    }

    async fn hash_exists(&self, collection: &str, key: &str) -> Result<bool> {
        debug!(collection, key, "HEXISTS");
        let mut conn = self.connection.write().await;
        let exists: bool = conn.hexists(collection, key).await?;

        Ok(exists)
    }

    async fn hash_all(&self, collection: &str) -> Result<Vec<(String, String)>> {
        debug!(collection, "HGETALL");
        let mut conn = self.connection.write().await;
        let entries: HashMap<String, String> = conn.hgetall(collection).await?;

        Ok(entries.into_iter().collect())
    }

    async fn set_contains(&self, collection: &str, member: &str) -> Result<bool> {
        debug!(collection, member, "SISMEMBER");
        let mut conn = self.connection.write().await;
        let contained: bool = conn.sismember(collection, member).await?;

        Ok(contained)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.write().await;
        let reply: String = redis::cmd("PING").query_async(&mut *conn).await?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(crate::error::StoreError::Command(format!(
                "unexpected PING reply: {}",
                reply
            )))
        }
    }
}
