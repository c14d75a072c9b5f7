//! 적응형 샘플링 간격.
//!
//! 변화 점수가 낮으면(정적 장면) 간격을 키우고, 높으면(활발한 장면)
//! 줄인다. 고립 모드에서는 비활성 — 고정 간격으로 전진.

use dabom_core::config::{AdaptiveConfig, ScoreThresholds};

/// 캡처 루프가 들고 다니는 적응형 간격 상태
#[derive(Debug)]
pub struct AdaptiveSampler {
    base_interval: f64,
    current_interval: f64,
    config: AdaptiveConfig,
}

impl AdaptiveSampler {
    /// 새 샘플러 생성 — 현재 간격은 기본 간격에서 시작
    pub fn new(base_interval: f64, config: AdaptiveConfig) -> Self {
        Self {
            base_interval,
            current_interval: base_interval,
            config,
        }
    }

    /// 프레임 점수 관찰 후 간격 조정 (비활성 설정이면 no-op)
    pub fn observe(&mut self, change_score: f32, thresholds: &ScoreThresholds) {
        if !self.config.enable {
            return;
        }
        let score = change_score as f64;
        if score < thresholds.grow_below as f64 {
            self.current_interval =
                (self.current_interval + self.config.step).min(self.config.max_interval);
        } else if score > thresholds.shrink_above as f64 {
            self.current_interval =
                (self.current_interval - self.config.step).max(self.config.min_interval);
        }
    }

    /// 다음 전진량 (초).
    ///
    /// 최초 프레임 직후에는 적응 결과와 무관하게 기본 간격으로 전진하여
    /// 0 길이 첫 스텝을 방지한다. 이후에는 현재 간격(최소 1초).
    pub fn next_step(&self, frames_captured: usize) -> f64 {
        if frames_captured == 1 {
            self.base_interval
        } else {
            self.current_interval.max(1.0)
        }
    }

    /// 현재 간격 (초)
    pub fn current_interval(&self) -> f64 {
        self.current_interval
    }
}
