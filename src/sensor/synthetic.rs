use anyhow::{bail, Result};
use std::f64::consts::TAU;

use super::{SensorSource, SkeletonFrame, TrackingMode};
use crate::config::SensorConfig;
use crate::mapper::{CoordinateMapper, DepthImageMapper, Resolution};
use crate::skeleton::{
    ClippedEdges, JointTrackingState, JointType, Skeleton, SkeletonPoint, SkeletonTrackingState,
};

/// 完全追跡できる最大人数（それ以降は位置のみ）
pub const MAX_TRACKED_SKELETONS: usize = 2;

/// 人と人の横方向の間隔（メートル）
const SKELETON_SPACING: f32 = 0.8;

/// センサーからの基準距離（メートル）
const BASE_DEPTH: f32 = 2.5;

/// 肩の前後移動の振幅（メートル）
const LEAN_AMPLITUDE: f32 = 0.15;

/// 直立姿勢の関節配置 (関節, x, y, z)。z は腰からの相対値
const STANDING_POSE: [(JointType, f32, f32, f32); JointType::COUNT] = [
    (JointType::HipCenter, 0.0, 0.0, 0.0),
    (JointType::Spine, 0.0, 0.2, 0.0),
    (JointType::ShoulderCenter, 0.0, 0.5, 0.0),
    (JointType::Head, 0.0, 0.7, 0.0),
    (JointType::ShoulderLeft, -0.2, 0.45, 0.0),
    (JointType::ElbowLeft, -0.3, 0.2, 0.0),
    (JointType::WristLeft, -0.35, 0.0, -0.05),
    (JointType::HandLeft, -0.36, -0.07, -0.05),
    (JointType::ShoulderRight, 0.2, 0.45, 0.0),
    (JointType::ElbowRight, 0.3, 0.2, 0.0),
    (JointType::WristRight, 0.35, 0.0, -0.05),
    (JointType::HandRight, 0.36, -0.07, -0.05),
    (JointType::HipLeft, -0.1, -0.05, 0.0),
    (JointType::KneeLeft, -0.11, -0.45, -0.02),
    (JointType::AnkleLeft, -0.11, -0.85, 0.0),
    (JointType::FootLeft, -0.12, -0.9, -0.1),
    (JointType::HipRight, 0.1, -0.05, 0.0),
    (JointType::KneeRight, 0.11, -0.45, -0.02),
    (JointType::AnkleRight, 0.11, -0.85, 0.0),
    (JointType::FootRight, 0.12, -0.9, -0.1),
];

/// 周期 period 秒の正弦波。位相は周期で割った余りから求める
fn oscillate(t: f64, period: f64, phase: f64) -> f32 {
    (TAU * (t / period).fract() + phase).sin() as f32
}

/// ハードウェアなしで動く合成センサー
///
/// 立っている人が周期的に前傾・後傾するスケルトンを生成する。
/// 時刻はフレーム番号から決まるので出力は決定的。
pub struct SyntheticSensor {
    connected: bool,
    running: bool,
    mode: TrackingMode,
    frame_number: u64,
    frame_interval_secs: f64,
    skeleton_count: usize,
    lean_period_secs: f64,
    mapper: DepthImageMapper,
}

impl SyntheticSensor {
    pub fn from_config(config: &SensorConfig) -> Self {
        Self {
            connected: true,
            running: false,
            mode: TrackingMode::from_seated(config.seated),
            frame_number: 0,
            frame_interval_secs: config.frame_interval_ms as f64 / 1000.0,
            skeleton_count: config.skeleton_count,
            lean_period_secs: f64::from(config.lean_period_secs.max(f32::EPSILON)),
            mapper: DepthImageMapper::new(),
        }
    }

    /// 未接続のセンサー（start は失敗する）
    pub fn disconnected(config: &SensorConfig) -> Self {
        Self {
            connected: false,
            ..Self::from_config(config)
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// 経過時刻。長時間動かしても位相が崩れないよう f64 で持つ
    fn elapsed_secs(&self) -> f64 {
        self.frame_number as f64 * self.frame_interval_secs
    }

    /// 時刻 t の肩の前方移動量（正で前傾）
    fn lean_at(&self, t: f64) -> f32 {
        LEAN_AMPLITUDE * oscillate(t, self.lean_period_secs, 0.0)
    }

    fn build_skeleton(&self, index: usize, t: f64) -> Skeleton {
        let center = (self.skeleton_count.saturating_sub(1)) as f32 / 2.0;
        let offset_x = (index as f32 - center) * SKELETON_SPACING;
        // 左右にゆっくり揺れる
        let sway = 0.05 * oscillate(t, 3.0, index as f64);
        let base_x = offset_x + sway;

        if index >= MAX_TRACKED_SKELETONS {
            let mut skeleton = Skeleton::position_only(SkeletonPoint::new(base_x, 0.0, BASE_DEPTH));
            skeleton.clipped_edges = self.clipped_edges(&[skeleton.position]);
            return skeleton;
        }

        let lean = self.lean_at(t + index as f64 * 0.5);
        let swing = 0.1 * oscillate(t, 1.5, 0.0);
        let mut skeleton = Skeleton::new();
        skeleton.tracking_state = SkeletonTrackingState::Tracked;
        skeleton.position = SkeletonPoint::new(base_x, 0.0, BASE_DEPTH);

        for (joint_type, x, y, dz) in STANDING_POSE {
            let z = match joint_type {
                JointType::Spine => BASE_DEPTH - lean * 0.5,
                JointType::ShoulderCenter | JointType::Head => BASE_DEPTH - lean,
                JointType::ShoulderLeft | JointType::ShoulderRight => BASE_DEPTH - lean * 0.9,
                JointType::WristLeft | JointType::HandLeft => BASE_DEPTH + dz - swing,
                JointType::WristRight | JointType::HandRight => BASE_DEPTH + dz + swing,
                _ => BASE_DEPTH + dz,
            };
            let state = self.joint_state(joint_type, t);
            skeleton.set_joint(joint_type, SkeletonPoint::new(base_x + x, y, z), state);
        }

        let visible: Vec<SkeletonPoint> = skeleton
            .joints()
            .iter()
            .filter(|j| j.is_visible())
            .map(|j| j.position)
            .collect();
        skeleton.clipped_edges = self.clipped_edges(&visible);
        skeleton
    }

    fn joint_state(&self, joint_type: JointType, t: f64) -> JointTrackingState {
        if self.mode == TrackingMode::Seated && !joint_type.is_upper_body() {
            return JointTrackingState::NotTracked;
        }
        // 2秒ごとに0.5秒だけ左手を見失う
        let inferred_window = t.rem_euclid(2.0) >= 1.5;
        if inferred_window && joint_type == JointType::HandLeft {
            return JointTrackingState::Inferred;
        }
        JointTrackingState::Tracked
    }

    /// 投影した点が画面外に出ている方向
    fn clipped_edges(&self, points: &[SkeletonPoint]) -> ClippedEdges {
        let resolution = Resolution::VGA;
        let w = resolution.width as f32;
        let h = resolution.height as f32;
        let mut edges = ClippedEdges::NONE;
        for point in points {
            let p = self.mapper.map_to_screen(*point, resolution);
            edges.left |= p.x < 0.0;
            edges.right |= p.x >= w;
            edges.top |= p.y < 0.0;
            edges.bottom |= p.y >= h;
        }
        edges
    }
}

impl SensorSource for SyntheticSensor {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self) -> Result<()> {
        if !self.connected {
            bail!("Sensor is not connected");
        }
        self.running = true;
        tracing::debug!("synthetic sensor started ({:?})", self.mode);
        Ok(())
    }

    fn stop(&mut self) {
        if self.running {
            tracing::debug!("synthetic sensor stopped at frame {}", self.frame_number);
        }
        self.running = false;
    }

    fn tracking_mode(&self) -> TrackingMode {
        self.mode
    }

    fn set_tracking_mode(&mut self, mode: TrackingMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn open_skeleton_frame(&mut self) -> Result<Option<SkeletonFrame>> {
        if !self.running {
            return Ok(None);
        }
        let t = self.elapsed_secs();
        let skeletons = (0..self.skeleton_count)
            .map(|i| self.build_skeleton(i, t))
            .collect();
        let frame = SkeletonFrame::new(self.frame_number, skeletons);
        self.frame_number += 1;
        Ok(Some(frame))
    }
}
