//! 분석 오케스트레이터.
//!
//! 캡처 → 프레임별 모델 호출 → 이벤트/컨텍스트 갱신 → 요약 요청 → 완료를
//! 조율하는 상태 머신. 런은 한 번에 하나만 진행되며, 모든 중단 지점이
//! 런 소유 취소 토큰을 관찰한다.
//!
//! 진행률 밴드: 캡처 0–30%, 프레임 분석 30–90%, 요약 90–100%.
//! 부분 결과는 도착 즉시 저장되어 실패/취소 후에도 유지된다 — 해당 런의
//! 요약과 하이라이트만 보류된다.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use dabom_core::cancel::{CancelHandle, CancelToken};
use dabom_core::config::AnalysisConfig;
use dabom_core::error::CoreError;
use dabom_core::models::analysis::{
    AnalysisMode, AnalysisStatus, AnalyzedFrame, RunOutcome, SignificantEvent, VideoMetadata,
};
use dabom_core::models::frame::FrameRecord;
use dabom_core::ports::frame_source::FrameSource;
use dabom_core::ports::model_client::ModelClient;
use dabom_core::ports::observer::AnalysisObserver;
use dabom_vision::capture::{CaptureParams, FrameCaptureEngine};

use crate::context::AnalysisContext;
use crate::events;
use crate::perspectives::{self, Perspective};
use crate::prompt;
use crate::summary;

/// 캡처 단계가 차지하는 진행률 밴드 상한
const CAPTURE_BAND_END: f64 = 0.3;

/// 프레임 분석 단계가 차지하는 진행률 밴드 상한 (요약 단계 진입점)
const ANALYZE_BAND_END: f64 = 0.9;

/// 분석 런 요청
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// 분석 관점 id — 엄격 검증 (알 수 없는 id는 `InvalidPerspective`)
    pub perspective_id: String,
    /// 분석 모드
    pub mode: AnalysisMode,
    /// API 자격증명 (키 또는 접근 키워드) — 빈 값이면 `MissingCredential`
    pub credential: String,
    /// 샘플링 간격 재정의 (초) — 없으면 설정 기본값
    pub interval_secs: Option<f64>,
    /// 캐시된 프레임 배치 재사용 (있을 때만 캡처 생략)
    pub reuse_captured_frames: bool,
    /// 요약 프롬프트용 비디오 메타데이터
    pub video_metadata: VideoMetadata,
}

/// 분석 오케스트레이터 — 런 상태 머신 + 관점별 결과 저장소
pub struct AnalysisOrchestrator {
    model_client: Arc<dyn ModelClient>,
    observer: Arc<dyn AnalysisObserver>,
    config: AnalysisConfig,
    source: Mutex<Option<Box<dyn FrameSource>>>,
    cancel: Mutex<Option<CancelHandle>>,
    status: RwLock<AnalysisStatus>,
    progress: RwLock<f64>,
    error_message: RwLock<Option<String>>,
    captured_frames: RwLock<Vec<FrameRecord>>,
    results: RwLock<HashMap<String, Vec<AnalyzedFrame>>>,
    summaries: RwLock<HashMap<String, String>>,
    highlights: RwLock<HashMap<String, Vec<SignificantEvent>>>,
}

impl AnalysisOrchestrator {
    /// 새 오케스트레이터 생성
    pub fn new(
        model_client: Arc<dyn ModelClient>,
        observer: Arc<dyn AnalysisObserver>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            model_client,
            observer,
            config,
            source: Mutex::new(None),
            cancel: Mutex::new(None),
            status: RwLock::new(AnalysisStatus::Idle),
            progress: RwLock::new(0.0),
            error_message: RwLock::new(None),
            captured_frames: RwLock::new(Vec::new()),
            results: RwLock::new(HashMap::new()),
            summaries: RwLock::new(HashMap::new()),
            highlights: RwLock::new(HashMap::new()),
        }
    }

    /// 프레임 소스 연결 — 런 엔트리 검증 대상
    pub fn attach_source(&self, source: Box<dyn FrameSource>) {
        *self.source.lock() = Some(source);
    }

    /// 진행 중인 런 취소 요청
    pub fn cancel_ongoing_analysis(&self) {
        if let Some(handle) = self.cancel.lock().as_ref() {
            handle.cancel();
            warn!("사용자 요청으로 분석 취소");
        }
    }

    /// 분석 런 실행.
    ///
    /// 엔트리 검증 실패는 상태 변이 없이 즉시 반환한다. 취소는
    /// `Ok(RunOutcome::Cancelled)`로 종결하며 에러 메시지를 남기지 않는다.
    /// 어떤 결과든 종료 시 소스의 재생 위치/상태를 복원한다 (실패는 로그만).
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<RunOutcome, CoreError> {
        let perspective = perspectives::find_perspective(&request.perspective_id)
            .ok_or_else(|| CoreError::InvalidPerspective(request.perspective_id.clone()))?;
        if request.credential.trim().is_empty() {
            return Err(CoreError::MissingCredential);
        }

        let handle = CancelHandle::new();
        let token = handle.token();
        let mut source = {
            let mut cancel_slot = self.cancel.lock();
            if cancel_slot.is_some() {
                return Err(CoreError::Internal("분석이 이미 진행 중".to_string()));
            }
            let source = self
                .source
                .lock()
                .take()
                .ok_or(CoreError::MissingSource)?;
            *cancel_slot = Some(handle);
            source
        };

        info!("분석 시작: {} ({} 모드)", perspective.label, request.mode.as_str());

        // 런 전 재생 상태 기억 — 종료 시 그대로 복원
        let original_position = source.playback_position();
        let was_playing = source.is_playing();
        source.pause();

        let outcome = self.run(source.as_mut(), perspective, &request, &token).await;

        if let Err(e) =
            Self::restore_playback(source.as_mut(), original_position, was_playing).await
        {
            warn!("재생 상태 복원 실패 (무시): {e}");
        }

        *self.source.lock() = Some(source);
        *self.cancel.lock() = None;

        match outcome {
            Ok(()) => {
                self.set_progress(1.0);
                self.set_status(AnalysisStatus::Complete);
                info!("분석 완료: {}", perspective.label);
                Ok(RunOutcome::Completed)
            }
            Err(e) if e.is_cancelled() => {
                self.set_status(AnalysisStatus::Idle);
                Ok(RunOutcome::Cancelled)
            }
            Err(e) => {
                *self.error_message.write() = Some(e.to_string());
                self.set_status(AnalysisStatus::Error);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        source: &mut dyn FrameSource,
        perspective: &'static Perspective,
        request: &AnalyzeRequest,
        token: &CancelToken,
    ) -> Result<(), CoreError> {
        self.set_status(AnalysisStatus::Preparing);
        *self.error_message.write() = None;
        // 대상 관점의 이전 결과만 비운다 — 다른 관점 캐시는 보존
        self.clear_perspective(perspective.id);
        self.set_progress(0.0);

        let reuse = request.reuse_captured_frames && !self.captured_frames.read().is_empty();
        let frames: Vec<FrameRecord> = if reuse {
            let cached = self.captured_frames.read().clone();
            debug!("캡처 생략 — 캐시된 {}프레임 재사용", cached.len());
            cached
        } else {
            self.set_status(AnalysisStatus::Capturing);
            let engine = FrameCaptureEngine::new(CaptureParams {
                base_interval_secs: request
                    .interval_secs
                    .unwrap_or(self.config.base_interval_secs),
                mode: request.mode,
                adaptive: self.config.adaptive,
                thresholds: self.config.thresholds,
                vision: self.config.vision,
            });
            let observer = Arc::clone(&self.observer);
            let frames = engine
                .capture(source, token, &mut |progress| {
                    observer.on_capture_progress(progress);
                    self.set_progress(progress.fraction * CAPTURE_BAND_END);
                })
                .await?;
            *self.captured_frames.write() = frames.clone();
            frames
        };

        self.set_status(AnalysisStatus::Analyzing);
        let mut context = AnalysisContext::new();
        let mut results: Vec<AnalyzedFrame> = Vec::new();
        let total = frames.len();

        for (index, frame) in frames.iter().enumerate() {
            token.check()?;

            let frame_prompt = prompt::build_frame_prompt(
                perspective.id,
                request.mode,
                index,
                context.previous_descriptions(),
            );
            let description = self
                .bounded_model_call(
                    self.model_client
                        .analyze_frame(&frame.image, &frame_prompt, token.clone()),
                    token,
                )
                .await?;
            let description = description.trim().to_string();

            let analyzed = AnalyzedFrame {
                frame: frame.clone(),
                description: description.clone(),
                perspective_id: perspective.id.to_string(),
            };
            results.push(analyzed.clone());
            // 증분 저장 — 호출자는 부분 결과를 도착 즉시 관찰한다
            self.results
                .write()
                .entry(perspective.id.to_string())
                .or_default()
                .push(analyzed.clone());
            self.observer.on_partial_result(perspective.id, &analyzed);

            let previous_description = context.last_description().to_string();
            context.record_description(&frame.timestamp, &description);
            context.observe_score(frame.change_score, &self.config.thresholds);
            if let Some(details) = events::detect_significant_event(
                frame,
                &description,
                &previous_description,
                &self.config.thresholds,
            ) {
                context.push_event(SignificantEvent {
                    frame_index: frame.index,
                    timestamp: frame.timestamp.clone(),
                    reason: details.reason,
                    snippet: details.snippet,
                    change_score: details.change_score,
                    change_category: frame.change_category,
                });
            }

            self.set_progress(
                (CAPTURE_BAND_END
                    + ((index + 1) as f64 / total as f64) * (ANALYZE_BAND_END - CAPTURE_BAND_END))
                    .min(ANALYZE_BAND_END),
            );
            debug!("프레임 분석 {} / {}", index + 1, total);

            // 모델 호출 사이 페이싱 — 요청 버스트 방지
            self.pacing_delay(token).await?;
        }

        // 요약 단계 진입 — 진행률 90% 고정
        self.set_progress(ANALYZE_BAND_END);
        let summary_text = self
            .generate_summary(perspective, &results, &context, request, token)
            .await?;

        self.summaries
            .write()
            .insert(perspective.id.to_string(), summary_text);
        self.highlights
            .write()
            .insert(perspective.id.to_string(), context.significant_events().to_vec());
        info!("내러티브 요약 생성 완료");
        Ok(())
    }

    async fn generate_summary(
        &self,
        perspective: &'static Perspective,
        results: &[AnalyzedFrame],
        context: &AnalysisContext,
        request: &AnalyzeRequest,
        token: &CancelToken,
    ) -> Result<String, CoreError> {
        if results.is_empty() {
            return Ok("No frames analysed.".to_string());
        }

        let prompt_text = summary::build_summary_prompt(
            perspective.id,
            results,
            context.significant_events(),
            &request.video_metadata,
            request.mode,
            context.max_change_score(),
            &self.config.thresholds,
        );

        info!("프레임 분석 결과로 내러티브 요약 생성");
        let text = self
            .bounded_model_call(
                self.model_client.generate_text(
                    &prompt_text,
                    self.config.summary_temperature,
                    token.clone(),
                ),
                token,
            )
            .await?;
        Ok(text.trim().to_string())
    }

    /// 모델 호출에 취소 + 타임아웃 적용.
    /// select에서 탈락한 호출 future는 드롭되어 전송이 중단된다.
    async fn bounded_model_call<T>(
        &self,
        call: impl Future<Output = Result<T, CoreError>>,
        token: &CancelToken,
    ) -> Result<T, CoreError> {
        let timeout_ms = self.config.model_timeout_ms;
        let mut cancel = token.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(CoreError::Cancelled),
            result = tokio::time::timeout(Duration::from_millis(timeout_ms), call) => {
                match result {
                    Ok(inner) => inner,
                    Err(_) => Err(CoreError::Timeout { timeout_ms }),
                }
            }
        }
    }

    async fn pacing_delay(&self, token: &CancelToken) -> Result<(), CoreError> {
        let mut cancel = token.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(CoreError::Cancelled),
            _ = tokio::time::sleep(Duration::from_millis(self.config.pacing_delay_ms)) => Ok(()),
        }
    }

    async fn restore_playback(
        source: &mut dyn FrameSource,
        position: f64,
        was_playing: bool,
    ) -> Result<(), CoreError> {
        source.seek_to(position).await?;
        if was_playing {
            source.resume()?;
        }
        Ok(())
    }

    fn clear_perspective(&self, perspective_id: &str) {
        self.results.write().remove(perspective_id);
        self.summaries.write().remove(perspective_id);
        self.highlights.write().remove(perspective_id);
    }

    fn set_status(&self, status: AnalysisStatus) {
        *self.status.write() = status;
        self.observer.on_status(status);
    }

    fn set_progress(&self, fraction: f64) {
        *self.progress.write() = fraction;
        self.observer.on_progress(fraction);
    }

    /// 현재 상태
    pub fn status(&self) -> AnalysisStatus {
        *self.status.read()
    }

    /// 현재 진행률 (0.0 ~ 1.0)
    pub fn progress(&self) -> f64 {
        *self.progress.read()
    }

    /// 마지막 실패의 사용자용 메시지 (취소는 기록하지 않음)
    pub fn error_message(&self) -> Option<String> {
        self.error_message.read().clone()
    }

    /// 캐시된 프레임 배치 (관점 간 재사용용)
    pub fn captured_frames(&self) -> Vec<FrameRecord> {
        self.captured_frames.read().clone()
    }

    /// 관점별 분석 결과 (부분 결과 포함)
    pub fn results_for(&self, perspective_id: &str) -> Vec<AnalyzedFrame> {
        self.results
            .read()
            .get(perspective_id)
            .cloned()
            .unwrap_or_default()
    }

    /// 관점별 요약 (완료된 런만)
    pub fn summary_for(&self, perspective_id: &str) -> Option<String> {
        self.summaries.read().get(perspective_id).cloned()
    }

    /// 관점별 하이라이트 (완료된 런만)
    pub fn highlights_for(&self, perspective_id: &str) -> Vec<SignificantEvent> {
        self.highlights
            .read()
            .get(perspective_id)
            .cloned()
            .unwrap_or_default()
    }
}
