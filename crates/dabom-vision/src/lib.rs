//! # dabom-vision
//!
//! 프레임 캡처 파이프라인 어댑터.
//! 변화 점수 계산, 적응형 샘플링, 캡처 루프, WebP 스냅샷 인코딩을 제공한다.
//!
//! ## 구조
//!
//! - [`scorer`] — 메트릭 버퍼 간 정규화 변화 점수
//! - [`sampler`] — 변화량 기반 적응형 샘플링 간격
//! - [`capture`] — 시킹→스냅샷→점수→기록 캡처 엔진
//! - [`encoder`] — WebP + Base64 스냅샷 인코딩

pub mod capture;
pub mod encoder;
pub mod sampler;
pub mod scorer;
