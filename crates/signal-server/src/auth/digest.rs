//! 비밀번호 다이제스트 값 타입.
//!
//! Argon2i raw 해시 기반. 저장된 자격증명은 이 다이제스트의 소문자
//! hex 인코딩과 솔트를 `digest:salt` 형태로 담습니다.

use argon2::{Algorithm, Argon2, Params, Version};

/// 다이제스트 길이 (바이트).
pub const HASH_LEN: usize = 32;

/// 허용되는 최소 솔트 길이 (바이트).
pub const MIN_SALT_LEN: usize = 8;

/// Argon2i 비용 파라미터: 2-pass, 1 MiB, 단일 레인.
const T_COST: u32 = 2;
const M_COST_KIB: u32 = 1 << 10;
const P_COST: u32 = 1;

/// 다이제스트 계산 오류.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("salt is {0} bytes, shorter than the permissible {MIN_SALT_LEN}")]
    SaltTooShort(usize),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// 고정 길이 비밀번호 다이제스트.
///
/// 비교는 상수 시간으로 수행되어 타이밍 부채널을 피합니다.
#[derive(Clone)]
pub struct PasswordDigest([u8; HASH_LEN]);

impl PasswordDigest {
    /// 비밀번호와 솔트로부터 다이제스트를 계산합니다.
    ///
    /// # 전제 조건
    ///
    /// 솔트는 [`MIN_SALT_LEN`] 바이트 이상이어야 합니다. 더 짧은 솔트로는
    /// 절대 해싱하지 않고 [`DigestError::SaltTooShort`]를 반환합니다.
    pub fn compute(password: &str, salt: &str) -> Result<Self, DigestError> {
        if salt.len() < MIN_SALT_LEN {
            return Err(DigestError::SaltTooShort(salt.len()));
        }

        let params = Params::new(M_COST_KIB, T_COST, P_COST, Some(HASH_LEN))
            .map_err(|e| DigestError::Hashing(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);

        let mut output = [0u8; HASH_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut output)
            .map_err(|e| DigestError::Hashing(e.to_string()))?;

        Ok(Self(output))
    }

    /// 저장된 hex 인코딩에서 다이제스트를 파싱합니다.
    ///
    /// 정확히 [`HASH_LEN`] 바이트로 디코딩되지 않으면 `None`을 반환합니다
    /// (손상된 자격증명 레코드).
    pub fn from_hex(encoded: &str) -> Option<Self> {
        let bytes = hex::decode(encoded).ok()?;
        let bytes: [u8; HASH_LEN] = bytes.try_into().ok()?;

        Some(Self(bytes))
    }

    /// 소문자 hex 인코딩을 반환합니다.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for PasswordDigest {
    /// 상수 시간 비교.
    fn eq(&self, other: &Self) -> bool {
        let mut diff = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

impl Eq for PasswordDigest {}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 다이제스트 내용은 로그에 노출하지 않음
        f.write_str("PasswordDigest(..)")
    }
}
