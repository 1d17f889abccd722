use anyhow::Result;
use tracing::{debug, info, warn};

use crate::mapper::CoordinateMapper;
use crate::render::{Canvas, FrameCompositor, FrameSummary};
use crate::sensor::{SensorSource, TrackingMode};

/// センサー未検出時のステータス
pub const NO_SENSOR_STATUS: &str = "No ready sensor found!";

/// センサーとフレーム描画をつなぐアプリケーション層
///
/// センサーのハンドルはここが所有し、開始・停止もここで行う。
pub struct SkeletonViewer<S: SensorSource, M> {
    sensor: Option<S>,
    compositor: FrameCompositor<M>,
    status: String,
    last_verdicts: Vec<bool>,
}

impl<S: SensorSource, M: CoordinateMapper> SkeletonViewer<S, M> {
    pub fn new(sensor: Option<S>, compositor: FrameCompositor<M>) -> Self {
        Self {
            sensor,
            compositor,
            status: String::new(),
            last_verdicts: Vec::new(),
        }
    }

    /// センサーを開始する。失敗時はセンサーなしの状態に落ちる
    pub fn start(&mut self) -> bool {
        let Some(sensor) = self.sensor.as_mut() else {
            self.status = NO_SENSOR_STATUS.to_string();
            warn!("{}", NO_SENSOR_STATUS);
            return false;
        };

        if !sensor.is_connected() {
            warn!("sensor '{}' is not connected", sensor.name());
            self.sensor = None;
            self.status = NO_SENSOR_STATUS.to_string();
            return false;
        }

        match sensor.start() {
            Ok(()) => {
                info!("sensor '{}' started ({:?})", sensor.name(), sensor.tracking_mode());
                self.status.clear();
                true
            }
            Err(e) => {
                // 他のアプリが使用中など
                warn!("failed to start sensor '{}': {:#}", sensor.name(), e);
                self.sensor = None;
                self.status = NO_SENSOR_STATUS.to_string();
                false
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(sensor) = self.sensor.as_mut() {
            sensor.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.sensor.as_ref().is_some_and(|s| s.is_running())
    }

    /// ステータス表示用の文字列（空なら正常）
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn compositor(&self) -> &FrameCompositor<M> {
        &self.compositor
    }

    pub fn tracking_mode(&self) -> Option<TrackingMode> {
        self.sensor.as_ref().map(|s| s.tracking_mode())
    }

    /// 着座モードの切り替えをそのままセンサーに渡す
    pub fn set_seated(&mut self, seated: bool) -> Result<()> {
        if let Some(sensor) = self.sensor.as_mut() {
            let mode = TrackingMode::from_seated(seated);
            sensor.set_tracking_mode(mode)?;
            info!("tracking mode: {:?}", mode);
        }
        Ok(())
    }

    /// 次のフレームを取得して描画する
    ///
    /// センサーがない、またはデータがなければ空のフレームとして描画する。
    /// フレームの取得失敗のみエラーとして返す。その場合も画面は空のフレームで塗り直す。
    pub fn render_next_frame<C>(&mut self, canvas: &mut C) -> Result<FrameSummary>
    where
        C: Canvas + ?Sized,
    {
        let frame = match self.sensor.as_mut() {
            Some(sensor) if sensor.is_running() => match sensor.open_skeleton_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    // 前フレームの姿勢表示を残さない
                    self.compositor.compose(canvas, &[]);
                    self.last_verdicts.clear();
                    return Err(e);
                }
            },
            _ => None,
        };

        let summary = match &frame {
            Some(frame) => self.compositor.compose(canvas, frame.skeletons()),
            None => self.compositor.compose(canvas, &[]),
        };
        drop(frame);

        if summary.posture_verdicts != self.last_verdicts {
            for (i, verdict) in summary.posture_verdicts.iter().enumerate() {
                if self.last_verdicts.get(i) != Some(verdict) {
                    if *verdict {
                        debug!("skeleton {}: posture ok", i);
                    } else {
                        debug!("skeleton {}: posture incorrect", i);
                    }
                }
            }
            self.last_verdicts.clone_from(&summary.posture_verdicts);
        }

        Ok(summary)
    }
}

impl<S: SensorSource, M> Drop for SkeletonViewer<S, M> {
    fn drop(&mut self) {
        if let Some(sensor) = self.sensor.as_mut() {
            sensor.stop();
        }
    }
}
