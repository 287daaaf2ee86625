//! 인증 및 권한 부여.
//!
//! 로그인/비밀번호 검증과 관리자 권한 해석을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`PasswordDigest`]: 고정 길이 비밀번호 다이제스트 값 타입
//! - [`AuthService`]: 저장된 자격증명에 대한 인증 서비스
//! - [`AuthOutcome`]: 인증 결과 (인증 여부 + 관리자 플래그)
//!
//! 모든 실패 경로(없는 로그인, 손상된 레코드, 짧은 솔트, 저장소 장애)는
//! 닫힌 쪽으로 실패합니다: 호출자에게는 균일한 거부만 보입니다.

mod digest;
mod service;

pub use digest::{DigestError, PasswordDigest, HASH_LEN, MIN_SALT_LEN};
pub use service::{AuthOutcome, AuthService};
