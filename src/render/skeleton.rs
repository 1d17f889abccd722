use crate::config::RenderConfig;
use crate::render::canvas::{Brush, Pen};
use crate::skeleton::JointType;

/// 骨の描画グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneGroup {
    /// 姿勢判定で色が変わる胴体
    Torso,
    /// 常に既定色の四肢
    Limb,
}

/// 骨（2関節を結ぶ線分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
    pub from: JointType,
    pub to: JointType,
    pub group: BoneGroup,
}

const fn torso(from: JointType, to: JointType) -> Bone {
    Bone {
        from,
        to,
        group: BoneGroup::Torso,
    }
}

const fn limb(from: JointType, to: JointType) -> Bone {
    Bone {
        from,
        to,
        group: BoneGroup::Limb,
    }
}

/// 骨格の接続定義（描画順）
pub const BONES: [Bone; 19] = [
    // 胴体
    torso(JointType::Head, JointType::ShoulderCenter),
    torso(JointType::ShoulderCenter, JointType::ShoulderLeft),
    torso(JointType::ShoulderCenter, JointType::ShoulderRight),
    torso(JointType::ShoulderCenter, JointType::Spine),
    torso(JointType::Spine, JointType::HipCenter),
    torso(JointType::HipCenter, JointType::HipLeft),
    torso(JointType::HipCenter, JointType::HipRight),
    // 左腕
    limb(JointType::ShoulderLeft, JointType::ElbowLeft),
    limb(JointType::ElbowLeft, JointType::WristLeft),
    limb(JointType::WristLeft, JointType::HandLeft),
    // 右腕
    limb(JointType::ShoulderRight, JointType::ElbowRight),
    limb(JointType::ElbowRight, JointType::WristRight),
    limb(JointType::WristRight, JointType::HandRight),
    // 左脚
    limb(JointType::HipLeft, JointType::KneeLeft),
    limb(JointType::KneeLeft, JointType::AnkleLeft),
    limb(JointType::AnkleLeft, JointType::FootLeft),
    // 右脚
    limb(JointType::HipRight, JointType::KneeRight),
    limb(JointType::KneeRight, JointType::AnkleRight),
    limb(JointType::AnkleRight, JointType::FootRight),
];

/// 背景色 (RGB)
pub const BACKGROUND_COLOR: u32 = 0x000000; // 黒

/// 画面端はみ出し表示の色 (RGB)
pub const CLIP_EDGE_COLOR: u32 = 0xFF0000; // 赤

/// 追跡済み関節の色 (RGB)
pub const TRACKED_JOINT_COLOR: u32 = 0x44C044; // 緑

/// 推定関節の色 (RGB)
pub const INFERRED_JOINT_COLOR: u32 = 0xFFFF00; // 黄色

/// 位置のみ追跡時の中心マーカー色 (RGB)
pub const CENTER_POINT_COLOR: u32 = 0x0000FF; // 青

/// 両端追跡済みの骨の色 (RGB)
pub const TRACKED_BONE_COLOR: u32 = 0x008000; // 緑

/// 姿勢が崩れているときの胴体の骨の色 (RGB)
pub const ALERT_BONE_COLOR: u32 = 0xFF0000; // 赤

/// 推定を含む骨の色 (RGB)
pub const INFERRED_BONE_COLOR: u32 = 0x808080; // 灰色

/// 骨の配色（両端追跡済み用, それ以外用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPolicy {
    pub tracked: Pen,
    pub fallback: Pen,
}

/// フレームを通して不変の描画スタイル
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Brush,
    pub clip_edge: Brush,
    pub clip_bounds_thickness: f32,
    pub tracked_joint: Brush,
    pub inferred_joint: Brush,
    pub joint_thickness: f32,
    pub center_point: Brush,
    pub body_center_thickness: f32,
    pub default_policy: ColorPolicy,
    pub alert_policy: ColorPolicy,
}

impl RenderStyle {
    pub fn from_config(config: &RenderConfig) -> Self {
        let fallback = Pen::new(INFERRED_BONE_COLOR, config.inferred_bone_thickness);
        Self {
            background: Brush::new(BACKGROUND_COLOR),
            clip_edge: Brush::new(CLIP_EDGE_COLOR),
            clip_bounds_thickness: config.clip_bounds_thickness,
            tracked_joint: Brush::new(TRACKED_JOINT_COLOR),
            inferred_joint: Brush::new(INFERRED_JOINT_COLOR),
            joint_thickness: config.joint_thickness,
            center_point: Brush::new(CENTER_POINT_COLOR),
            body_center_thickness: config.body_center_thickness,
            default_policy: ColorPolicy {
                tracked: Pen::new(TRACKED_BONE_COLOR, config.tracked_bone_thickness),
                fallback,
            },
            alert_policy: ColorPolicy {
                tracked: Pen::new(ALERT_BONE_COLOR, config.tracked_bone_thickness),
                fallback,
            },
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bone_groups() {
        let torso = BONES.iter().filter(|b| b.group == BoneGroup::Torso).count();
        let limbs = BONES.iter().filter(|b| b.group == BoneGroup::Limb).count();
        assert_eq!(torso, 7);
        assert_eq!(limbs, 12);
    }

    #[test]
    fn test_torso_bones_first() {
        assert!(BONES[..7].iter().all(|b| b.group == BoneGroup::Torso));
    }

    #[test]
    fn test_every_joint_is_connected() {
        for joint_type in JointType::ALL {
            assert!(
                BONES.iter().any(|b| b.from == joint_type || b.to == joint_type),
                "{:?} has no bone",
                joint_type
            );
        }
    }

    #[test]
    fn test_default_style() {
        let style = RenderStyle::default();
        assert_eq!(style.default_policy.tracked, Pen::new(TRACKED_BONE_COLOR, 6.0));
        assert_eq!(style.alert_policy.tracked, Pen::new(ALERT_BONE_COLOR, 6.0));
        assert_eq!(style.default_policy.fallback, Pen::new(INFERRED_BONE_COLOR, 1.0));
        assert_eq!(style.alert_policy.fallback, style.default_policy.fallback);
        assert_eq!(style.joint_thickness, 3.0);
        assert_eq!(style.body_center_thickness, 10.0);
        assert_eq!(style.clip_bounds_thickness, 10.0);
    }
}
