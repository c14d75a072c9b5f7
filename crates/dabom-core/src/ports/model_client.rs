//! 모델 클라이언트 포트.
//!
//! 비전 지원 언어 모델 호출 인터페이스. 전송 방식(직접 키 vs 프록시 세션)은
//! 구현체가 결정하며, 코어는 아래 두 연산만 안다.

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::error::CoreError;
use crate::models::frame::EncodedImage;

/// 모델 클라이언트 — 프레임 분석 + 텍스트 생성
///
/// 두 연산 모두 취소 토큰을 관찰해야 하며, 취소 시
/// `CoreError::Cancelled`로 종결한다.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 프레임 이미지 + 프롬프트 → 설명 텍스트
    async fn analyze_frame(
        &self,
        image: &EncodedImage,
        prompt: &str,
        cancel: CancelToken,
    ) -> Result<String, CoreError>;

    /// 텍스트 프롬프트 → 생성 텍스트
    async fn generate_text(
        &self,
        prompt: &str,
        temperature: f32,
        cancel: CancelToken,
    ) -> Result<String, CoreError>;
}
