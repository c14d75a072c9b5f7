//! 변화 점수 계산.
//!
//! 다운스케일 메트릭 버퍼 두 장의 RGB 채널별 절대 차이 합을
//! 이론 최대치(`샘플 수 * 255 * 3`)로 정규화한다. 알파 채널은 무시.

use dabom_core::models::frame::RasterBuffer;

/// 두 메트릭 버퍼 간 변화 점수 (0.0 ~ 1.0).
///
/// 이전 버퍼가 없으면 정확히 1.0 — 첫 프레임은 관례상 최대 변화로
/// 취급하여 항상 주목 대상이 되게 한다.
pub fn change_score(current: &RasterBuffer, previous: Option<&RasterBuffer>) -> f32 {
    let Some(previous) = previous else {
        return 1.0;
    };

    let len = current.data.len().min(previous.data.len());
    if len == 0 {
        return 0.0;
    }

    let mut diff: u64 = 0;
    for (c, p) in current.data[..len]
        .chunks_exact(4)
        .zip(previous.data[..len].chunks_exact(4))
    {
        diff += c[0].abs_diff(p[0]) as u64
            + c[1].abs_diff(p[1]) as u64
            + c[2].abs_diff(p[2]) as u64;
    }

    let sample_count = (len / 4) as u64;
    let max_diff = sample_count * 255 * 3;
    if max_diff == 0 {
        return 0.0;
    }

    (diff as f64 / max_diff as f64).min(1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_previous_is_exactly_one() {
        let current = RasterBuffer::solid(8, 8, [50, 100, 150, 255]);
        assert_eq!(change_score(&current, None), 1.0);
    }

    #[test]
    fn identical_buffers_score_zero() {
        let buffer = RasterBuffer::solid(8, 8, [50, 100, 150, 255]);
        assert_eq!(change_score(&buffer, Some(&buffer)), 0.0);
    }

    #[test]
    fn opposite_buffers_score_one() {
        let black = RasterBuffer::solid(8, 8, [0, 0, 0, 255]);
        let white = RasterBuffer::solid(8, 8, [255, 255, 255, 255]);
        assert_eq!(change_score(&white, Some(&black)), 1.0);
    }

    #[test]
    fn score_is_normalized_and_bounded() {
        let a = RasterBuffer::solid(8, 8, [0, 0, 0, 255]);
        let b = RasterBuffer::solid(8, 8, [128, 0, 0, 255]);
        let score = change_score(&b, Some(&a));
        // 한 채널만 절반 차이 → 128 / (255 * 3)
        let expected = 128.0 / (255.0 * 3.0);
        assert!((score - expected as f32).abs() < 1e-4);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let a = RasterBuffer::solid(8, 8, [10, 20, 30, 0]);
        let b = RasterBuffer::solid(8, 8, [10, 20, 30, 255]);
        assert_eq!(change_score(&b, Some(&a)), 0.0);
    }

    #[test]
    fn mismatched_lengths_use_shorter_buffer() {
        let small = RasterBuffer::solid(4, 4, [0, 0, 0, 255]);
        let large = RasterBuffer::solid(8, 8, [255, 255, 255, 255]);
        assert_eq!(change_score(&large, Some(&small)), 1.0);
    }

    #[test]
    fn empty_buffers_score_zero() {
        let empty = RasterBuffer {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        assert_eq!(change_score(&empty, Some(&empty)), 0.0);
    }
}
