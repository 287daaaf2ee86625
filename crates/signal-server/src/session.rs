//! 연결별 세션 상태.

/// 연결 하나의 인증/권한 상태.
///
/// 연결 코디네이터가 소유하고 해당 연결의 태스크만 접근하므로 내부
/// 동기화가 필요 없습니다. 상태 전이는
/// `Unidentified → Authenticated → (관리자면) AdminAuthenticated`
/// 한 방향뿐이며, 인증 단계에서 인증 서비스만 [`Session::authorize`]를
/// 통해 변경합니다. 한 번 인증된 연결은 수명 내에 미인증 상태로
/// 돌아갈 수 없습니다.
#[derive(Debug)]
pub struct Session {
    connection_id: String,
    login: Option<String>,
    authenticated: bool,
    is_admin: bool,
}

impl Session {
    /// 미인증 세션을 생성합니다.
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            login: None,
            authenticated: false,
            is_admin: false,
        }
    }

    /// 연결 ID.
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// 인증된 로그인 (미인증이면 `None`).
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// 인증 여부.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// 세션을 인증 상태로 전이시킵니다.
    ///
    /// 로그인, 인증 플래그, 관리자 플래그가 한 번에 설정되므로 다른
    /// 컴포넌트에서 부분 인증 상태를 관찰할 수 없습니다.
    pub fn authorize(&mut self, login: impl Into<String>, is_admin: bool) {
        self.login = Some(login.into());
        self.authenticated = true;
        self.is_admin = is_admin;
    }
}
