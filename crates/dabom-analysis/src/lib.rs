//! # dabom-analysis
//!
//! 분석 오케스트레이션 레이어.
//! 관점 프롬프트 조립, 유의미 이벤트 감지, 런 범위 컨텍스트,
//! 캡처→분석→요약 상태 머신을 제공한다.
//!
//! ## 구조
//!
//! - [`perspectives`] — 6개 분석 관점의 정적 템플릿 테이블
//! - [`prompt`] — 모드/컨텍스트별 프레임 프롬프트 빌더
//! - [`events`] — 점수 + 키워드 기반 유의미 이벤트 감지
//! - [`context`] — 런 범위 롤링 컨텍스트 (설명 윈도우, 이벤트, 통계)
//! - [`summary`] — 요약 프롬프트 조립
//! - [`orchestrator`] — 분석 런 상태 머신

pub mod context;
pub mod events;
pub mod orchestrator;
pub mod perspectives;
pub mod prompt;
pub mod summary;

pub use orchestrator::{AnalysisOrchestrator, AnalyzeRequest};
