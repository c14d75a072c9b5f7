//! 프레임 프롬프트 빌더.
//!
//! 관점 + 모드 + 롤링 컨텍스트에서 다음 모델 호출의 지시문을 만든다.
//! 연속 모드 후속 프레임은 **가장 최근 설명 하나만** 치환한다 — 전체
//! 윈도우가 아니다.

use dabom_core::models::analysis::AnalysisMode;

use crate::perspectives::perspective_or_default;

/// 이전 컨텍스트가 없을 때 치환되는 마커
pub const NO_PRIOR_CONTEXT: &str = "No prior context available.";

/// 프레임 분석 프롬프트 구성.
///
/// 알 수 없는 관점 id는 기본 관점으로 폴백한다 (관용 정책).
pub fn build_frame_prompt(
    perspective_id: &str,
    mode: AnalysisMode,
    frame_index: usize,
    previous_descriptions: &[String],
) -> String {
    let perspective = perspective_or_default(perspective_id);

    match mode {
        AnalysisMode::Isolated => perspective.prompts.isolated.to_string(),
        AnalysisMode::Continuous if frame_index == 0 => {
            perspective.prompts.continuous_initial.to_string()
        }
        AnalysisMode::Continuous => {
            let context = previous_descriptions
                .last()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(NO_PRIOR_CONTEXT);
            perspective
                .prompts
                .continuous_subsequent
                .replace("{{context}}", context)
        }
    }
}

/// 요약 지시문 조회
pub fn build_summary_instruction(perspective_id: &str) -> &'static str {
    perspective_or_default(perspective_id).summary_instruction
}
