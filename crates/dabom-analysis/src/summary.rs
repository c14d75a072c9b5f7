//! 요약 프롬프트 조립 (순수 함수).
//!
//! 관점 요약 지시문 + 비디오 메타데이터 + 선택적 모션 가이던스 +
//! 프레임 설명 목록 + 하이라이트 목록을 하나의 텍스트 프롬프트로 합친다.

use dabom_core::config::ScoreThresholds;
use dabom_core::models::analysis::{AnalysisMode, AnalyzedFrame, SignificantEvent, VideoMetadata};

use crate::prompt::build_summary_instruction;

/// 설명이 비어 있을 때의 자리표시 문구
const NO_DESCRIPTION: &str = "No description returned.";

/// 하이라이트가 없을 때의 마커 라인
const NO_HIGHLIGHTS: &str = "• None detected explicitly; infer based on frame analyses.";

/// 분석 프레임 한 장의 요약 입력 라인
pub fn format_frame_line(frame: &AnalyzedFrame) -> String {
    let category = frame.frame.change_category.as_str().to_uppercase();
    let description = frame.description.trim();
    let description = if description.is_empty() {
        NO_DESCRIPTION
    } else {
        description
    };
    format!(
        "- [{}] ({category} change) {description}",
        frame.frame.timestamp
    )
}

/// 하이라이트 한 건의 요약 입력 라인
pub fn format_highlight_line(event: &SignificantEvent) -> String {
    let snippet = if event.snippet.is_empty() {
        String::new()
    } else {
        format!(" — {}", event.snippet)
    };
    format!("• {}: {}{snippet}", event.timestamp, event.reason)
}

/// 요약 프롬프트 전체 구성
pub fn build_summary_prompt(
    perspective_id: &str,
    frames: &[AnalyzedFrame],
    events: &[SignificantEvent],
    metadata: &VideoMetadata,
    mode: AnalysisMode,
    max_change_score: f32,
    thresholds: &ScoreThresholds,
) -> String {
    let instruction = build_summary_instruction(perspective_id);

    let frame_summaries = frames
        .iter()
        .map(format_frame_line)
        .collect::<Vec<_>>()
        .join("\n");

    let highlights = if events.is_empty() {
        NO_HIGHLIGHTS.to_string()
    } else {
        events
            .iter()
            .map(format_highlight_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut metadata_lines: Vec<String> = Vec::new();
    if let Some(duration) = metadata.duration_secs {
        metadata_lines.push(format!("Video duration: {duration:.2} seconds."));
    }
    if let (Some(width), Some(height)) = (metadata.width, metadata.height) {
        metadata_lines.push(format!("Resolution: {width}×{height}."));
    }
    metadata_lines.push(format!("Analysis mode: {}.", mode.as_str()));
    let metadata_lines = metadata_lines.join("\n");

    // 모션 가이던스는 고립 모드에서만 — 연속 모드는 프롬프트 자체가 이미
    // 프레임 간 변화를 전달한다
    let motion_guidance = if mode == AnalysisMode::Isolated && max_change_score >= thresholds.moderate
    {
        format!(
            "Motion guidance: Frames show visible movement (change score up to {:.0}%). Mention the observed progression of people or vehicles when summarising.",
            max_change_score * 100.0
        )
    } else {
        String::new()
    };

    [
        instruction.to_string(),
        String::new(),
        metadata_lines,
        motion_guidance,
        String::new(),
        "Frame analyses:".to_string(),
        frame_summaries,
        String::new(),
        "Significant events detected (if any):".to_string(),
        highlights,
        String::new(),
        "Create a cohesive narrative (2-4 paragraphs) describing the full video, referencing the beginning, middle, and end.".to_string(),
        "After the narrative, include a short bulleted list of key takeaways or recommendations relevant to this perspective.".to_string(),
    ]
    .join("\n")
}
