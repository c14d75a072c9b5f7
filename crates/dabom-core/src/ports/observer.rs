//! 분석 관찰자 포트.
//!
//! 오케스트레이터가 상태 전이, 진행률, 부분 결과를 보고하는 싱크.
//! 진행률 순서는 단계 밴드(캡처 0–30%, 분석 30–90%, 요약 90–100%)를 따른다.
//! 구조화 로그는 이 포트가 아닌 `tracing`으로 나간다.

use crate::models::analysis::{AnalysisStatus, AnalyzedFrame};

/// 캡처 단계 진행 보고 튜플
#[derive(Debug, Clone)]
pub struct CaptureProgress {
    /// 완료된 프레임 수
    pub completed: u32,
    /// 예상 총 프레임 수
    pub estimated_total: u32,
    /// 현재 프레임 타임스탬프 (MM:SS)
    pub timestamp: String,
    /// 현재 프레임 변화 점수
    pub change_score: f32,
    /// 캡처 단계 내 진행 비율 (0.0 ~ 1.0)
    pub fraction: f64,
}

/// 분석 관찰자 — 필요한 콜백만 오버라이드
pub trait AnalysisObserver: Send + Sync {
    /// 상태 전이 보고
    fn on_status(&self, _status: AnalysisStatus) {}

    /// 전체 런 진행률 (0.0 ~ 1.0)
    fn on_progress(&self, _fraction: f64) {}

    /// 캡처 단계 프레임별 보고
    fn on_capture_progress(&self, _progress: &CaptureProgress) {}

    /// 프레임 분석 결과 증분 보고
    fn on_partial_result(&self, _perspective_id: &str, _frame: &AnalyzedFrame) {}
}

/// 아무것도 하지 않는 관찰자
#[derive(Debug, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}
