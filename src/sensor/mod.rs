pub mod synthetic;

pub use synthetic::SyntheticSensor;

use anyhow::Result;

use crate::skeleton::Skeleton;

/// 追跡モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// 全身20関節
    #[default]
    Default,
    /// 上半身10関節のみ
    Seated,
}

impl TrackingMode {
    pub fn from_seated(seated: bool) -> Self {
        if seated {
            Self::Seated
        } else {
            Self::Default
        }
    }
}

/// センサーから受け取った1フレーム分のスケルトン
///
/// フレームのスコープでのみ有効。drop で解放される。
#[derive(Debug, Clone, Default)]
pub struct SkeletonFrame {
    pub frame_number: u64,
    skeletons: Vec<Skeleton>,
}

impl SkeletonFrame {
    pub fn new(frame_number: u64, skeletons: Vec<Skeleton>) -> Self {
        Self {
            frame_number,
            skeletons,
        }
    }

    pub fn skeletons(&self) -> &[Skeleton] {
        &self.skeletons
    }
}

/// スケルトンを供給するセンサー
///
/// 接続・開始・停止のライフサイクルは呼び出し側（アプリケーション）が管理する。
pub trait SensorSource {
    fn name(&self) -> &str;

    /// デバイスが接続済みか
    fn is_connected(&self) -> bool;

    fn is_running(&self) -> bool;

    /// スケルトンストリームを開始
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self);

    fn tracking_mode(&self) -> TrackingMode;

    fn set_tracking_mode(&mut self, mode: TrackingMode) -> Result<()>;

    /// 次のフレームを開く。準備済みのデータがなければ None
    fn open_skeleton_frame(&mut self) -> Result<Option<SkeletonFrame>>;
}
