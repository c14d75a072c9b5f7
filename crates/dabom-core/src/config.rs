//! 분석 파이프라인 설정 구조체.
//!
//! 점수 임계값, 적응형 샘플링 경계, 페이싱/타임아웃 등 정책 상수를 정의한다.
//! 기본값이 곧 운영 정책값이며, 호출부에 하드코딩하지 않는다.

use serde::{Deserialize, Serialize};

/// 변화 점수 임계값 — 카테고리 매핑과 샘플링/이벤트 정책의 경계값
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// HIGH 카테고리 하한 (score >= high)
    #[serde(default = "default_high")]
    pub high: f32,
    /// MODERATE 카테고리 하한 (moderate <= score < high)
    #[serde(default = "default_moderate")]
    pub moderate: f32,
    /// 정적 장면 판정 상한 (score < static_scene이면 정적 카운트 증가)
    #[serde(default = "default_static_scene")]
    pub static_scene: f32,
    /// 이 값 미만이면 샘플링 간격 증가 (장면이 정적)
    #[serde(default = "default_grow_below")]
    pub grow_below: f32,
    /// 이 값 초과면 샘플링 간격 감소 (장면이 활발)
    #[serde(default = "default_shrink_above")]
    pub shrink_above: f32,
}

fn default_high() -> f32 {
    0.45
}

fn default_moderate() -> f32 {
    0.18
}

fn default_static_scene() -> f32 {
    0.08
}

fn default_grow_below() -> f32 {
    0.10
}

fn default_shrink_above() -> f32 {
    0.30
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            high: default_high(),
            moderate: default_moderate(),
            static_scene: default_static_scene(),
            grow_below: default_grow_below(),
            shrink_above: default_shrink_above(),
        }
    }
}

/// 적응형 샘플링 설정 — 연속 모드에서만 활성화
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// 적응형 간격 조정 활성화 여부
    #[serde(default = "default_true")]
    pub enable: bool,
    /// 최소 샘플링 간격 (초)
    #[serde(default = "default_min_interval")]
    pub min_interval: f64,
    /// 최대 샘플링 간격 (초)
    #[serde(default = "default_max_interval")]
    pub max_interval: f64,
    /// 간격 조정 폭 (초)
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_true() -> bool {
    true
}

fn default_min_interval() -> f64 {
    1.0
}

fn default_max_interval() -> f64 {
    4.0
}

fn default_step() -> f64 {
    1.0
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            enable: default_true(),
            min_interval: default_min_interval(),
            max_interval: default_max_interval(),
            step: default_step(),
        }
    }
}

impl AdaptiveConfig {
    /// 비활성 설정 — 고립 모드에서 사용 (고정 간격)
    pub fn disabled() -> Self {
        Self {
            enable: false,
            ..Self::default()
        }
    }
}

/// 비전(캡처) 설정
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 메트릭(점수 계산) 버퍼 너비 (픽셀) — 인코딩 스냅샷과는 별도
    #[serde(default = "default_metrics_width")]
    pub metrics_width: u32,
    /// 메트릭 버퍼 최소 높이 (픽셀)
    #[serde(default = "default_metrics_min_height")]
    pub metrics_min_height: u32,
}

fn default_metrics_width() -> u32 {
    96
}

fn default_metrics_min_height() -> u32 {
    24
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            metrics_width: default_metrics_width(),
            metrics_min_height: default_metrics_min_height(),
        }
    }
}

/// 분석 런 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 기본 샘플링 간격 (초)
    #[serde(default = "default_base_interval")]
    pub base_interval_secs: f64,
    /// 모델 호출 사이 페이싱 딜레이 (밀리초) — 요청 버스트 방지용 정책값
    #[serde(default = "default_pacing_delay")]
    pub pacing_delay_ms: u64,
    /// 모델 호출별 타임아웃 (밀리초)
    #[serde(default = "default_model_timeout")]
    pub model_timeout_ms: u64,
    /// 요약 생성 temperature
    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,
    /// 점수 임계값
    #[serde(default)]
    pub thresholds: ScoreThresholds,
    /// 적응형 샘플링 (연속 모드)
    #[serde(default)]
    pub adaptive: AdaptiveConfig,
    /// 캡처 설정
    #[serde(default)]
    pub vision: VisionConfig,
}

fn default_base_interval() -> f64 {
    5.0
}

fn default_pacing_delay() -> u64 {
    350
}

fn default_model_timeout() -> u64 {
    60_000
}

fn default_summary_temperature() -> f32 {
    0.35
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: default_base_interval(),
            pacing_delay_ms: default_pacing_delay(),
            model_timeout_ms: default_model_timeout(),
            summary_temperature: default_summary_temperature(),
            thresholds: ScoreThresholds::default(),
            adaptive: AdaptiveConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}
