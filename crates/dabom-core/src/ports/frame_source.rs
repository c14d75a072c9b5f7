//! 프레임 소스 포트.
//!
//! 디코딩 가능한 비디오 추상화. 캡처 중에는 캡처 엔진이 소스를 배타적으로
//! 구동하며, 시킹은 엄격히 순차적이어야 한다 — 이전 시킹이 완료되기 전에
//! 다음 시킹을 발행하면 프레임 내용이 비결정적이 된다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::RasterBuffer;

/// 프레임 소스 — 시킹 + 스냅샷 캡처 + 재생 상태 조회/복원
#[async_trait]
pub trait FrameSource: Send {
    /// 소스가 디코딩 가능 상태가 될 때까지 대기.
    /// 도달하지 못하면 에러 (캡처 엔진이 `SourceUnavailable`로 매핑).
    async fn wait_until_ready(&mut self) -> Result<(), CoreError>;

    /// 전체 길이 (초)
    fn duration(&self) -> f64;

    /// 원본 해상도 (width, height)
    fn resolution(&self) -> (u32, u32);

    /// 지정 시각으로 시킹 — 완료까지 대기
    async fn seek_to(&mut self, seconds: f64) -> Result<(), CoreError>;

    /// 현재 위치의 래스터 스냅샷 (지정 해상도로 다운스케일)
    fn capture_snapshot(&mut self, width: u32, height: u32) -> Result<RasterBuffer, CoreError>;

    /// 현재 재생 위치 (초) — 런 종료 시 복원용
    fn playback_position(&self) -> f64;

    /// 재생 중인지 — 런 종료 시 재개 여부 결정용
    fn is_playing(&self) -> bool;

    /// 일시정지
    fn pause(&mut self);

    /// 재생 재개
    fn resume(&mut self) -> Result<(), CoreError>;
}
