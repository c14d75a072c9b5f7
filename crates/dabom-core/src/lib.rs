//! # dabom-core
//!
//! DABOM 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 영상 내러티브 분석 파이프라인의 모든 크레이트가 공유하는
//! 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 파이프라인 정책 설정 구조체
//! - [`cancel`] — 런 단위 취소 토큰 (watch 채널 기반)

pub mod cancel;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::config::ScoreThresholds;
    use crate::models::frame::{ChangeCategory, EncodedImage, FrameRecord};

    #[test]
    fn frame_record_is_immutable_value() {
        let thresholds = ScoreThresholds::default();
        let record = FrameRecord {
            index: 0,
            seconds: 0.0,
            timestamp: "00:00".to_string(),
            image: EncodedImage {
                data: "AA==".to_string(),
                format: "webp".to_string(),
            },
            change_score: 1.0,
            change_category: ChangeCategory::from_score(1.0, &thresholds),
        };
        // 재사용 소비자는 복제 후 보강한다 — 원본은 그대로
        let copy = record.clone();
        assert_eq!(copy.index, record.index);
        assert_eq!(copy.change_category, ChangeCategory::High);
    }
}
