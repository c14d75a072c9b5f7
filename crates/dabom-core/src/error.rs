//! DABOM 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 실패를 `CoreError` 변형으로 매핑한다.
//! 취소(`Cancelled`)는 실패가 아닌 별도 종결 경로이며,
//! 오케스트레이터는 이를 에러 메시지로 기록하지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 분석 파이프라인 전반의 검증/캡처/모델 호출 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 알 수 없는 분석 관점 id
    #[error("유효하지 않은 관점: {0}")]
    InvalidPerspective(String),

    /// API 자격증명(키 또는 접근 키워드) 미설정
    #[error("API 자격증명 미설정")]
    MissingCredential,

    /// 프레임 소스 미연결
    #[error("프레임 소스 미연결")]
    MissingSource,

    /// 프레임 소스가 디코딩 가능 상태에 도달하지 못함
    #[error("프레임 소스 사용 불가: {0}")]
    SourceUnavailable(String),

    /// 인증 실패 (잘못된 키, 세션 만료 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 네트워크 에러 (연결 실패, 전송 중단)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 업스트림 모델 API 에러 (비정상 상태 코드)
    #[error("업스트림 에러 ({status}): {message}")]
    Upstream {
        /// HTTP 상태 코드
        status: u16,
        /// 업스트림이 반환한 메시지
        message: String,
    },

    /// 모델 호출 타임아웃 — 전송 에러와 동일한 실패 등급으로 취급
    #[error("모델 호출 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 사용자 취소 — 에러가 아닌 별도 종결 경로
    #[error("사용자 취소")]
    Cancelled,

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 취소 여부 — 오케스트레이터가 ERROR 전이와 IDLE 복귀를 구분할 때 사용
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}
