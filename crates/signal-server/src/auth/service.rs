//! 인증 서비스.

use signal_store::{collections, SharedStore, StoreError};
use tracing::{info, warn};

use super::digest::{DigestError, PasswordDigest};
use crate::session::Session;

/// 인증 결과.
///
/// 세션은 완전히 미인증이거나, 관리자 플래그가 해석된 완전 인증
/// 상태 중 하나입니다. 부분 인증 상태는 존재하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOutcome {
    /// 인증 성공 여부
    pub authenticated: bool,
    /// 관리자 여부 (인증된 경우에만 의미 있음)
    pub is_admin: bool,
}

impl AuthOutcome {
    /// 인증 거부.
    pub fn denied() -> Self {
        Self {
            authenticated: false,
            is_admin: false,
        }
    }

    /// 인증 허용.
    pub fn granted(is_admin: bool) -> Self {
        Self {
            authenticated: true,
            is_admin,
        }
    }
}

/// 로그인/비밀번호 쌍을 검증하고 관리자 권한을 해석하는 서비스.
///
/// 저장소 오류는 모두 이 계층에서 잡아 인증 실패로 처리합니다
/// (fail closed). 호출자는 저장소 장애와 잘못된 비밀번호를 구분할 수
/// 없습니다.
pub struct AuthService {
    store: SharedStore,
}

impl AuthService {
    /// 새 인증 서비스를 생성합니다.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 세션을 인증하고, 성공 시 인증 상태로 전이시킵니다.
    ///
    /// 세션은 연결 코디네이터가 소유하며 이 호출을 통해서만 변경됩니다.
    /// 실패 시 세션은 그대로 미인증 상태로 남습니다.
    pub async fn authorize_session(
        &self,
        session: &mut Session,
        login: &str,
        password: &str,
    ) -> AuthOutcome {
        let outcome = self.authenticate(login, password).await;
        if outcome.authenticated {
            session.authorize(login, outcome.is_admin);
        }

        outcome
    }

    /// 로그인/비밀번호 쌍을 인증합니다.
    ///
    /// 관리자 집합 조회는 인증에 성공한 로그인에 대해서만 수행됩니다.
    pub async fn authenticate(&self, login: &str, password: &str) -> AuthOutcome {
        match self.verify_credential(login, password).await {
            Ok(true) => {
                info!(login, "User authenticated successfully");

                let is_admin = self.admin_status(login).await;
                AuthOutcome::granted(is_admin)
            }
            Ok(false) => {
                info!(login, "Failed user authentication");
                AuthOutcome::denied()
            }
            Err(e) => {
                warn!(login, error = %e, "Store error during authentication");
                AuthOutcome::denied()
            }
        }
    }

    /// 저장된 자격증명에 대해 비밀번호를 검증합니다.
    ///
    /// 손상된 레코드(구분자 없음, 잘못된 hex, 짧은 솔트)는 오류 없이
    /// `Ok(false)`로 처리합니다.
    async fn verify_credential(&self, login: &str, password: &str) -> Result<bool, StoreError> {
        let Some(stored) = self.store.hash_get(collections::USERS, login).await? else {
            info!(login, "Unknown username");
            return Ok(false);
        };

        // 저장 형식은 "digest:salt", 첫 번째 구분자 기준으로 분리
        let Some((digest_hex, salt)) = stored.split_once(':') else {
            warn!(login, "Invalid password hash and salt in store");
            return Ok(false);
        };

        let Some(expected) = PasswordDigest::from_hex(digest_hex) else {
            warn!(login, "Corrupted password digest in store");
            return Ok(false);
        };

        let supplied = match PasswordDigest::compute(password, salt) {
            Ok(digest) => digest,
            Err(DigestError::SaltTooShort(len)) => {
                warn!(login, salt_len = len, "Stored salt is shorter than the permissible value");
                return Ok(false);
            }
            Err(e) => {
                warn!(login, error = %e, "Failed to encode the password digest");
                return Ok(false);
            }
        };

        Ok(expected == supplied)
    }

    /// 로그인의 관리자 상태를 확인합니다.
    ///
    /// 저장소 오류는 비관리자로 강등됩니다.
    async fn admin_status(&self, login: &str) -> bool {
        match self.store.set_contains(collections::ADMINS, login).await {
            Ok(status) => {
                info!(login, is_admin = status, "Resolved admin status");
                status
            }
            Err(e) => {
                warn!(login, error = %e, "Store error during admin check");
                false
            }
        }
    }
}
