//! 분석 런 모델.
//!
//! 관점별 분석 결과, 유의미 이벤트, 런 상태/모드를 정의한다.

use serde::{Deserialize, Serialize};

use super::frame::{ChangeCategory, FrameRecord};

/// 분석 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// 프레임별 독립 분석 (컨텍스트 없음, 고정 간격)
    Isolated,
    /// 직전 프레임 설명을 컨텍스트로 전달, 간격은 변화량에 적응
    Continuous,
}

impl AnalysisMode {
    /// 소문자 라벨 — 요약 프롬프트 메타데이터 라인에 사용
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Isolated => "isolated",
            AnalysisMode::Continuous => "continuous",
        }
    }
}

/// 분석 런 상태 머신의 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Preparing,
    Capturing,
    Analyzing,
    Complete,
    Error,
}

/// 런 종결 결과 — 취소는 에러가 아닌 정상 종결
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 요약까지 완료
    Completed,
    /// 사용자 취소 (부분 결과는 유지)
    Cancelled,
}

/// 모델 응답으로 보강된 프레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedFrame {
    /// 원본 프레임 레코드
    pub frame: FrameRecord,
    /// 모델이 생성한 설명 텍스트 (트리밍됨)
    pub description: String,
    /// 이 설명을 생성한 관점 id
    pub perspective_id: String,
}

/// 유의미 이벤트 — 프레임당 최대 하나, 연속 중복은 억제
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificantEvent {
    /// 프레임 인덱스
    pub frame_index: u32,
    /// 타임스탬프 (MM:SS)
    pub timestamp: String,
    /// 이벤트 판정 사유
    pub reason: String,
    /// 설명 첫 문장 발췌
    pub snippet: String,
    /// 변화 점수
    pub change_score: f32,
    /// 변화 카테고리
    pub change_category: ChangeCategory,
}

/// 비디오 메타데이터 — 요약 프롬프트의 메타데이터 라인 소스
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// 전체 길이 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// 가로 해상도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// 세로 해상도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
