//! 저장소 인터페이스.
//!
//! 이름 있는 컬렉션(해시 테이블 및 집합)에 대한 최소한의
//! get/set/delete/exists/scan 계약입니다. 코어는 이 트레이트를 통해서만
//! 외부 저장소에 접근하며, 키 단위 원자성은 저장소 구현의 보장에
//! 의존합니다 (멀티 키 트랜잭션 없음).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// 서버가 사용하는 이름 있는 컬렉션.
pub mod collections {
    /// 로그인 → `digest:salt` 자격증명 해시 테이블
    pub const USERS: &str = "users";
    /// 관리자 로그인 집합
    pub const ADMINS: &str = "admins";
    /// 티커 심볼 → 한도 시그널 해시 테이블
    pub const SIGNALS: &str = "signals";
}

/// 이름 있는 컬렉션에 대한 key-value 저장소.
#[async_trait]
pub trait Store: Send + Sync {
    /// 해시 테이블에서 키의 값을 가져옵니다.
    async fn hash_get(&self, collection: &str, key: &str) -> Result<Option<String>>;

    /// 해시 테이블에 키-값 쌍을 만들거나 교체합니다.
    ///
    /// 필드가 새로 생성되었으면 `true`, 기존 값이 교체되었으면 `false`를
    /// 반환합니다.
    async fn hash_set(&self, collection: &str, key: &str, value: &str) -> Result<bool>;

    /// 해시 테이블에서 키를 삭제합니다.
    ///
    /// 키가 존재해서 제거되었으면 `true`를 반환합니다.
    async fn hash_del(&self, collection: &str, key: &str) -> Result<bool>;

    /// 해시 테이블에 키가 존재하는지 확인합니다.
    async fn hash_exists(&self, collection: &str, key: &str) -> Result<bool>;

    /// 해시 테이블의 모든 키-값 쌍을 한 번의 왕복으로 가져옵니다.
    ///
    /// 순서는 저장소 고유의 매핑 순서이며 보장되지 않습니다.
    async fn hash_all(&self, collection: &str) -> Result<Vec<(String, String)>>;

    /// 집합에 멤버가 포함되어 있는지 확인합니다.
    async fn set_contains(&self, collection: &str, member: &str) -> Result<bool>;

    /// 저장소 도달 가능 여부를 확인합니다.
    async fn ping(&self) -> Result<()>;
}

/// 공유 가능한 저장소 핸들.
pub type SharedStore = Arc<dyn Store>;
