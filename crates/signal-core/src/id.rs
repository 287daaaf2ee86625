//! 연결 식별자 생성 서비스.
//!
//! 프로세스 수명 동안 전역적으로 고유한 연결 ID를 생성합니다.
//! 암호학적으로 시드된 난수 생성기 하나를 뮤텍스로 직렬화하여 공유하며,
//! 잠금은 ID를 뽑는 동안에만 유지됩니다.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Mutex;

/// 연결 ID 생성기.
///
/// 여러 연결 태스크에서 동시에 호출해도 안전합니다. 각 호출은 공유
/// 생성기에서 128비트 난수를 뽑아 UUID v4 형태의 문자열로 반환합니다.
#[derive(Debug)]
pub struct ConnectionIdGenerator {
    rng: Mutex<StdRng>,
}

impl ConnectionIdGenerator {
    /// 운영체제 엔트로피로 시드된 새 생성기를 만듭니다.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 새로운 고유 연결 ID를 반환합니다.
    pub fn next_id(&self) -> String {
        let mut bytes = [0u8; 16];
        {
            // 잠금은 난수를 뽑는 동안에만 유지
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.fill_bytes(&mut bytes);
        }

        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}

impl Default for ConnectionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_id_shape() {
        let ids = ConnectionIdGenerator::new();
        let id = ids.next_id();

        // UUID v4 문자열 형태 (8-4-4-4-12)
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_sequential_uniqueness() {
        let ids = ConnectionIdGenerator::new();
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_concurrent_uniqueness() {
        let ids = Arc::new(ConnectionIdGenerator::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let ids = ids.clone();
            handles.push(std::thread::spawn(move || {
                (0..250).map(|_| ids.next_id()).collect::<Vec<_>>()
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                // 동시에 생성된 ID는 서로 절대 충돌하지 않음
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 8 * 250);
    }
}
