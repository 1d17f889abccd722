use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub posture: PostureConfig,
    #[serde(default)]
    pub sensor: SensorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// 関節マーカーの半径（ピクセル）
    #[serde(default = "default_joint_thickness")]
    pub joint_thickness: f32,
    /// 位置のみ追跡時の中心マーカー半径
    #[serde(default = "default_body_center_thickness")]
    pub body_center_thickness: f32,
    /// 画面端はみ出し帯の幅
    #[serde(default = "default_clip_bounds_thickness")]
    pub clip_bounds_thickness: f32,
    /// 両端追跡済みの骨の太さ
    #[serde(default = "default_tracked_bone_thickness")]
    pub tracked_bone_thickness: f32,
    /// 推定を含む骨の太さ
    #[serde(default = "default_inferred_bone_thickness")]
    pub inferred_bone_thickness: f32,
}

fn default_joint_thickness() -> f32 { 3.0 }
fn default_body_center_thickness() -> f32 { 10.0 }
fn default_clip_bounds_thickness() -> f32 { 10.0 }
fn default_tracked_bone_thickness() -> f32 { 6.0 }
fn default_inferred_bone_thickness() -> f32 { 1.0 }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            joint_thickness: default_joint_thickness(),
            body_center_thickness: default_body_center_thickness(),
            clip_bounds_thickness: default_clip_bounds_thickness(),
            tracked_bone_thickness: default_tracked_bone_thickness(),
            inferred_bone_thickness: default_inferred_bone_thickness(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostureConfig {
    /// XZ平面の目標角度（度）。現在の判定では未使用
    #[serde(default = "default_target_angle_deg")]
    pub target_angle_deg: f32,
}

fn default_target_angle_deg() -> f32 { 90.0 }

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            target_angle_deg: default_target_angle_deg(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    /// 着座モード（上半身10関節のみ追跡）
    #[serde(default)]
    pub seated: bool,
    /// フレーム間隔（ミリ秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// 合成センサーが出す人数
    #[serde(default = "default_skeleton_count")]
    pub skeleton_count: usize,
    /// 前傾・後傾を一巡する周期（秒）
    #[serde(default = "default_lean_period_secs")]
    pub lean_period_secs: f32,
}

fn default_frame_interval_ms() -> u64 { 33 }
fn default_skeleton_count() -> usize { 1 }
fn default_lean_period_secs() -> f32 { 4.0 }

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            seated: false,
            frame_interval_ms: default_frame_interval_ms(),
            skeleton_count: default_skeleton_count(),
            lean_period_secs: default_lean_period_secs(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        Ok(config)
    }

    /// ファイルがなければデフォルト値
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("{} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }
}
