//! # dabom-network
//!
//! 모델 클라이언트 HTTP 어댑터.
//! Gemini generative-language API 직접 호출과 백엔드 키워드 프록시를
//! 자격증명 형태에 따라 투명하게 전환한다.

pub mod model_client;

pub use model_client::{AuthKind, GeminiModelClient};
