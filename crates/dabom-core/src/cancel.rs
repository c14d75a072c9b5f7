//! 런 단위 취소 토큰.
//!
//! 분석 런 하나당 핸들 하나를 소유하고, 모든 중단 지점(시킹, 모델 호출,
//! 페이싱 딜레이)이 동일한 토큰을 관찰한다. 런 종료 시 핸들을 폐기한다.

use tokio::sync::watch;

use crate::error::CoreError;

/// 취소 핸들 — 진행 중인 분석 런의 소유자가 보관
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
}

impl CancelHandle {
    /// 새 핸들 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, rx }
    }

    /// 이 핸들을 관찰하는 토큰 발급
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.rx.clone(),
        }
    }

    /// 취소 신호 발송
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// 취소 토큰 — 중단 지점마다 복제해서 관찰
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// 취소 여부 즉시 확인
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// 취소됐으면 `CoreError::Cancelled` 반환 — 호출 직전 체크용
    pub fn check(&self) -> Result<(), CoreError> {
        if self.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// 취소 신호까지 대기.
    ///
    /// 핸들이 이미 폐기됐으면 취소 신호가 올 수 없으므로 영원히 대기한다
    /// (`tokio::select!`의 다른 분기가 완료를 담당).
    pub async fn cancelled(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return;
            }
        }
        std::future::pending::<()>().await;
    }
}
