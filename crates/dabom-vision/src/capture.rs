//! 프레임 캡처 엔진.
//!
//! 시킹 → 스냅샷 → 점수 → 기록 루프를 구동한다. 시킹은 엄격히 순차이며
//! 각 시킹을 완료까지 기다린 뒤에만 다음 시킹을 발행한다.
//!
//! 래스터 버퍼는 두 장을 유지한다: 원본 해상도 버퍼는 인코딩 스냅샷용,
//! 소형 메트릭 버퍼는 점수 계산 전용 — 인코딩 이미지는 점수의 근거가
//! 아니다.

use tracing::{debug, info};

use dabom_core::cancel::CancelToken;
use dabom_core::config::{AdaptiveConfig, ScoreThresholds, VisionConfig};
use dabom_core::error::CoreError;
use dabom_core::models::analysis::AnalysisMode;
use dabom_core::models::frame::{format_timestamp, ChangeCategory, FrameRecord, RasterBuffer};
use dabom_core::ports::frame_source::FrameSource;
use dabom_core::ports::observer::CaptureProgress;

use crate::encoder::{self, WebPQuality};
use crate::sampler::AdaptiveSampler;
use crate::scorer;

/// 캡처 파라미터
#[derive(Debug, Clone)]
pub struct CaptureParams {
    /// 기본 샘플링 간격 (초)
    pub base_interval_secs: f64,
    /// 분석 모드 — 연속 모드에서만 적응형 샘플링 활성화
    pub mode: AnalysisMode,
    /// 적응형 샘플링 경계
    pub adaptive: AdaptiveConfig,
    /// 점수 임계값
    pub thresholds: ScoreThresholds,
    /// 메트릭 버퍼 크기 정책
    pub vision: VisionConfig,
}

/// 프레임 캡처 엔진
pub struct FrameCaptureEngine {
    params: CaptureParams,
}

impl FrameCaptureEngine {
    /// 새 캡처 엔진 생성
    pub fn new(params: CaptureParams) -> Self {
        Self { params }
    }

    /// 한 번의 캡처 패스 실행.
    ///
    /// `[0, duration]`을 덮는 비어 있지 않은 순서 있는 프레임 배치를
    /// 반환하며, 마지막 순간은 duration으로 정확히 한 번 클램프되어
    /// 항상 포함된다. 프레임마다 `on_progress`를 호출한다.
    pub async fn capture(
        &self,
        source: &mut dyn FrameSource,
        cancel: &CancelToken,
        on_progress: &mut dyn FnMut(&CaptureProgress),
    ) -> Result<Vec<FrameRecord>, CoreError> {
        source
            .wait_until_ready()
            .await
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?;

        let duration = source.duration();
        let (full_width, full_height) = source.resolution();
        let metrics_width = self.params.vision.metrics_width;
        let aspect = full_height as f64 / full_width.max(1) as f64;
        let metrics_height = ((metrics_width as f64 * aspect).round() as u32)
            .max(self.params.vision.metrics_min_height);

        info!("프레임 캡처 시작: 길이 {duration:.2}s, 모드 {}", self.params.mode.as_str());

        let adaptive = match self.params.mode {
            AnalysisMode::Continuous => self.params.adaptive,
            AnalysisMode::Isolated => AdaptiveConfig::disabled(),
        };
        let mut sampler = AdaptiveSampler::new(self.params.base_interval_secs, adaptive);

        let mut frames: Vec<FrameRecord> = Vec::new();
        let mut previous_metrics: Option<RasterBuffer> = None;
        let mut time = 0.0f64;

        loop {
            cancel.check()?;

            let bounded = time.min(duration);
            source.seek_to(bounded).await?;

            let snapshot = source.capture_snapshot(full_width, full_height)?;
            let metrics = source.capture_snapshot(metrics_width, metrics_height)?;

            let change_score = scorer::change_score(&metrics, previous_metrics.as_ref());
            previous_metrics = Some(metrics);

            let image = encoder::encode_snapshot(&snapshot, WebPQuality::High)?;
            let timestamp = format_timestamp(bounded);

            frames.push(FrameRecord {
                index: frames.len() as u32,
                seconds: bounded,
                timestamp: timestamp.clone(),
                image,
                change_score,
                change_category: ChangeCategory::from_score(change_score, &self.params.thresholds),
            });

            let fraction = if duration > 0.0 {
                (bounded / duration).min(1.0)
            } else {
                1.0
            };
            let estimated_total = (frames.len() as u32)
                .max((duration / self.params.base_interval_secs).ceil() as u32);
            on_progress(&CaptureProgress {
                completed: frames.len() as u32,
                estimated_total,
                timestamp: timestamp.clone(),
                change_score,
                fraction,
            });
            debug!("프레임 캡처: {timestamp} (change={change_score:.2})");

            // duration에 도달한 샘플이 마지막 — 클램프는 정확히 한 번
            if bounded >= duration {
                break;
            }

            sampler.observe(change_score, &self.params.thresholds);
            time += sampler.next_step(frames.len());
        }

        info!("프레임 캡처 완료: {}프레임", frames.len());
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dabom_core::cancel::CancelHandle;

    /// 합성 프레임 소스 — 시각에 따라 색이 달라지는 단색 프레임
    struct SyntheticSource {
        duration: f64,
        width: u32,
        height: u32,
        ready: bool,
        position: f64,
        seeks: Vec<f64>,
        /// 시각(초) → 픽셀 밝기. 기본은 상수(변화 없음).
        brightness: fn(f64) -> u8,
    }

    impl SyntheticSource {
        fn new(duration: f64) -> Self {
            Self {
                duration,
                width: 640,
                height: 360,
                ready: true,
                position: 0.0,
                seeks: Vec::new(),
                brightness: |_| 100,
            }
        }
    }

    #[async_trait]
    impl FrameSource for SyntheticSource {
        async fn wait_until_ready(&mut self) -> Result<(), CoreError> {
            if self.ready {
                Ok(())
            } else {
                Err(CoreError::Internal("디코딩 불가 소스".to_string()))
            }
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn resolution(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        async fn seek_to(&mut self, seconds: f64) -> Result<(), CoreError> {
            self.seeks.push(seconds);
            self.position = seconds;
            Ok(())
        }

        fn capture_snapshot(
            &mut self,
            width: u32,
            height: u32,
        ) -> Result<RasterBuffer, CoreError> {
            let level = (self.brightness)(self.position);
            Ok(RasterBuffer::solid(width, height, [level, level, level, 255]))
        }

        fn playback_position(&self) -> f64 {
            self.position
        }

        fn is_playing(&self) -> bool {
            false
        }

        fn pause(&mut self) {}

        fn resume(&mut self) -> Result<(), CoreError> {
            Ok(())
        }
    }

    fn engine(base_interval: f64, mode: AnalysisMode) -> FrameCaptureEngine {
        FrameCaptureEngine::new(CaptureParams {
            base_interval_secs: base_interval,
            mode,
            adaptive: AdaptiveConfig::default(),
            thresholds: ScoreThresholds::default(),
            vision: VisionConfig::default(),
        })
    }

    fn token() -> CancelToken {
        CancelHandle::new().token()
    }

    #[tokio::test]
    async fn isolated_fixed_interval_covers_full_duration() {
        let mut source = SyntheticSource::new(10.0);
        let engine = engine(2.5, AnalysisMode::Isolated);
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();

        let seconds: Vec<f64> = frames.iter().map(|f| f.seconds).collect();
        assert_eq!(seconds, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        let indices: Vec<u32> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(frames.last().unwrap().seconds, 10.0);
    }

    #[tokio::test]
    async fn overshoot_sample_is_clamped_to_duration_once() {
        let mut source = SyntheticSource::new(9.0);
        let engine = engine(2.5, AnalysisMode::Isolated);
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();

        // 7.5 다음 샘플(10.0)은 9.0으로 클램프되고 루프 종료
        let seconds: Vec<f64> = frames.iter().map(|f| f.seconds).collect();
        assert_eq!(seconds, vec![0.0, 2.5, 5.0, 7.5, 9.0]);
        assert_eq!(source.seeks.last().copied(), Some(9.0));
    }

    #[tokio::test]
    async fn first_frame_scores_maximal_change() {
        let mut source = SyntheticSource::new(5.0);
        let engine = engine(5.0, AnalysisMode::Isolated);
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();

        assert_eq!(frames[0].change_score, 1.0);
        assert_eq!(frames[0].change_category, ChangeCategory::High);
        // 단색 소스 — 이후 프레임은 변화 없음
        assert_eq!(frames[1].change_score, 0.0);
        assert_eq!(frames[1].change_category, ChangeCategory::Low);
    }

    #[tokio::test]
    async fn continuous_static_scene_grows_interval() {
        let mut source = SyntheticSource::new(30.0);
        let engine = FrameCaptureEngine::new(CaptureParams {
            base_interval_secs: 2.0,
            mode: AnalysisMode::Continuous,
            adaptive: AdaptiveConfig {
                enable: true,
                min_interval: 1.0,
                max_interval: 4.0,
                step: 1.0,
            },
            thresholds: ScoreThresholds::default(),
            vision: VisionConfig::default(),
        });
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();

        // 정적 장면 — 간격이 기본 2s에서 최대 4s까지 증가 (마지막 갭은
        // duration 클램프로 짧을 수 있음)
        let gaps: Vec<f64> = frames.windows(2).map(|w| w[1].seconds - w[0].seconds).collect();
        assert_eq!(gaps[0], 2.0);
        assert!(gaps.iter().all(|g| *g <= 4.0 + 1e-9));
        assert!(gaps.iter().any(|g| (*g - 4.0).abs() < 1e-9));
    }

    #[tokio::test]
    async fn isolated_mode_ignores_adaptive_config() {
        let mut source = SyntheticSource::new(12.0);
        let engine = engine(3.0, AnalysisMode::Isolated);
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();
        let gaps: Vec<f64> = frames.windows(2).map(|w| w[1].seconds - w[0].seconds).collect();
        assert!(gaps.iter().all(|g| (*g - 3.0).abs() < 1e-9));
    }

    #[tokio::test]
    async fn progress_reported_after_every_frame() {
        let mut source = SyntheticSource::new(10.0);
        let engine = engine(2.5, AnalysisMode::Isolated);
        let mut reports: Vec<(u32, f64)> = Vec::new();
        let frames = engine
            .capture(&mut source, &token(), &mut |p| {
                reports.push((p.completed, p.fraction));
            })
            .await
            .unwrap();

        assert_eq!(reports.len(), frames.len());
        assert_eq!(reports.first().unwrap().0, 1);
        assert_eq!(reports.last().unwrap().1, 1.0);
        // 진행률 단조 증가
        assert!(reports.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[tokio::test]
    async fn unready_source_fails_with_source_unavailable() {
        let mut source = SyntheticSource::new(10.0);
        source.ready = false;
        let engine = engine(2.5, AnalysisMode::Isolated);
        let result = engine.capture(&mut source, &token(), &mut |_| {}).await;
        assert!(matches!(result, Err(CoreError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn cancel_before_seek_stops_capture() {
        let mut source = SyntheticSource::new(10.0);
        let handle = CancelHandle::new();
        handle.cancel();
        let engine = engine(2.5, AnalysisMode::Isolated);
        let result = engine
            .capture(&mut source, &handle.token(), &mut |_| {})
            .await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
        assert!(source.seeks.is_empty());
    }

    #[tokio::test]
    async fn zero_duration_source_yields_single_frame() {
        let mut source = SyntheticSource::new(0.0);
        let engine = engine(5.0, AnalysisMode::Isolated);
        let frames = engine
            .capture(&mut source, &token(), &mut |_| {})
            .await
            .unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].seconds, 0.0);
    }
}
