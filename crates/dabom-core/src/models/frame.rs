//! 프레임 모델.
//!
//! 캡처 패스가 생성하는 프레임 레코드와 원시 래스터 버퍼를 정의한다.
//! `FrameRecord`는 생성 후 불변이며, 관점 간 재사용 시에도 수정하지 않는다.

use serde::{Deserialize, Serialize};

use crate::config::ScoreThresholds;

/// 원시 RGBA 래스터 버퍼 (플랫 4채널 바이트 시퀀스)
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    /// 너비 (픽셀)
    pub width: u32,
    /// 높이 (픽셀)
    pub height: u32,
    /// RGBA 바이트 (`width * height * 4`)
    pub data: Vec<u8>,
}

impl RasterBuffer {
    /// 단색 버퍼 생성 — 테스트 및 합성 소스용
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }
}

/// 인코딩된 스냅샷 이미지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Base64 인코딩된 이미지 데이터
    pub data: String,
    /// 이미지 포맷 (예: "webp")
    pub format: String,
}

impl EncodedImage {
    /// MIME 타입 (예: "image/webp")
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.format)
    }
}

/// 변화 카테고리 — 변화 점수에서 결정적으로 유도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Low,
    Moderate,
    High,
}

impl ChangeCategory {
    /// 점수 → 카테고리 매핑 (전함수, 경계 포함)
    pub fn from_score(score: f32, thresholds: &ScoreThresholds) -> Self {
        if score >= thresholds.high {
            ChangeCategory::High
        } else if score >= thresholds.moderate {
            ChangeCategory::Moderate
        } else {
            ChangeCategory::Low
        }
    }

    /// 소문자 라벨
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Low => "low",
            ChangeCategory::Moderate => "moderate",
            ChangeCategory::High => "high",
        }
    }
}

/// 샘플링된 한 순간의 프레임 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// 캡처 순서 (0부터, 배치 내 공백 없이 증가)
    pub index: u32,
    /// 실제 캡처 시각 (duration으로 클램프된 초)
    pub seconds: f64,
    /// 사람이 읽는 타임스탬프 (MM:SS)
    pub timestamp: String,
    /// 인코딩된 스냅샷
    pub image: EncodedImage,
    /// 직전 캡처 프레임 대비 변화 점수 (0.0 ~ 1.0, 첫 프레임은 1.0)
    pub change_score: f32,
    /// 변화 카테고리
    pub change_category: ChangeCategory,
}

/// 초 → MM:SS 타임스탬프 (초 단위 내림)
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}
