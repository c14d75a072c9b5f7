//! 런 범위 분석 컨텍스트.
//!
//! 한 번의 `analyze()` 호출 동안만 존재하며 오케스트레이터가 배타적으로
//! 소유한다 — 런 간 공유·별칭 없음. 롤링 설명 윈도우(최근 3개),
//! 누적 내러티브, 유의미 이벤트(연속 중복 억제), 정적 장면 카운터를
//! 보관한다.

use dabom_core::config::ScoreThresholds;
use dabom_core::models::analysis::SignificantEvent;

/// 롤링 설명 윈도우 크기
const DESCRIPTION_WINDOW: usize = 3;

/// 런 범위 가변 컨텍스트
#[derive(Debug, Default)]
pub struct AnalysisContext {
    previous_descriptions: Vec<String>,
    cumulative_narrative: Vec<String>,
    significant_events: Vec<SignificantEvent>,
    static_scene_count: u32,
    max_change_score: f32,
}

impl AnalysisContext {
    /// 새 컨텍스트 — 런 시작 시 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 가장 최근 설명 (없으면 빈 문자열)
    pub fn last_description(&self) -> &str {
        self.previous_descriptions
            .last()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 롤링 설명 윈도우 (최근 것이 마지막)
    pub fn previous_descriptions(&self) -> &[String] {
        &self.previous_descriptions
    }

    /// 프레임 설명 기록 — 윈도우 갱신 + 비어 있지 않으면 내러티브 누적
    pub fn record_description(&mut self, timestamp: &str, description: &str) {
        self.previous_descriptions.push(description.to_string());
        if self.previous_descriptions.len() > DESCRIPTION_WINDOW {
            self.previous_descriptions.remove(0);
        }
        if !description.is_empty() {
            self.cumulative_narrative
                .push(format!("[{timestamp}] {description}"));
        }
    }

    /// 변화 점수 관찰 — 정적 장면 카운트와 최대 점수 갱신
    pub fn observe_score(&mut self, change_score: f32, thresholds: &ScoreThresholds) {
        if change_score < thresholds.static_scene {
            self.static_scene_count += 1;
        }
        if change_score > self.max_change_score {
            self.max_change_score = change_score;
        }
    }

    /// 유의미 이벤트 추가 — 직전 이벤트와 (frame_index, reason)이 같으면 억제
    pub fn push_event(&mut self, event: SignificantEvent) {
        let is_duplicate = self
            .significant_events
            .last()
            .map(|last| last.frame_index == event.frame_index && last.reason == event.reason)
            .unwrap_or(false);
        if !is_duplicate {
            self.significant_events.push(event);
        }
    }

    /// 유의미 이벤트 목록 (추가 순서)
    pub fn significant_events(&self) -> &[SignificantEvent] {
        &self.significant_events
    }

    /// 누적 내러티브 라인
    pub fn cumulative_narrative(&self) -> &[String] {
        &self.cumulative_narrative
    }

    /// 정적 장면 카운트
    pub fn static_scene_count(&self) -> u32 {
        self.static_scene_count
    }

    /// 런에서 관찰된 최대 변화 점수
    pub fn max_change_score(&self) -> f32 {
        self.max_change_score
    }
}
