//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate가 이 trait들을 구현하며, 오케스트레이터는
//! `Box<dyn FrameSource>` / `Arc<dyn ModelClient>`로만 협력자를 본다.
//!
//! 비동기 trait은 `async_trait` 매크로로 object safety를 보장한다.

pub mod frame_source;
pub mod model_client;
pub mod observer;
