//! WebP 인코더.
//!
//! 원시 RGBA 버퍼를 품질 프리셋으로 WebP 인코딩 후 Base64로 반환한다.
//! 메트릭 버퍼는 인코딩하지 않는다 — 점수 계산은 항상 원시 버퍼 기준.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use tracing::debug;

use dabom_core::error::CoreError;
use dabom_core::models::frame::{EncodedImage, RasterBuffer};

/// WebP 품질 프리셋
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebPQuality {
    /// 낮은 품질 (60%)
    Low = 60,
    /// 중간 품질 (75%)
    Medium = 75,
    /// 높은 품질 (85%) — 스냅샷 기본값
    High = 85,
}

/// RGBA 버퍼 → WebP 바이트
pub fn encode_webp(buffer: &RasterBuffer, quality: WebPQuality) -> Result<Vec<u8>, CoreError> {
    let expected = (buffer.width * buffer.height * 4) as usize;
    if buffer.data.len() != expected {
        return Err(CoreError::Internal(format!(
            "RGBA 버퍼 크기 불일치: {}x{} 기대 {} 실제 {}",
            buffer.width,
            buffer.height,
            expected,
            buffer.data.len()
        )));
    }

    let encoder = webp::Encoder::from_rgba(&buffer.data, buffer.width, buffer.height);
    let encoded = encoder.encode(quality as u8 as f32).to_vec();

    debug!(
        "WebP 인코딩: {}x{} → {} bytes (품질 {})",
        buffer.width,
        buffer.height,
        encoded.len(),
        quality as u8
    );

    Ok(encoded)
}

/// RGBA 버퍼 → Base64 WebP 스냅샷
pub fn encode_snapshot(
    buffer: &RasterBuffer,
    quality: WebPQuality,
) -> Result<EncodedImage, CoreError> {
    let bytes = encode_webp(buffer, quality)?;
    Ok(EncodedImage {
        data: B64.encode(&bytes),
        format: "webp".to_string(),
    })
}
