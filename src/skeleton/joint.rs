/// センサー空間の3D座標（メートル）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkeletonPoint {
    pub x: f32,
    pub y: f32,
    /// センサーからの奥行き（前方が正）
    pub z: f32,
}

impl SkeletonPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 20 関節のインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointType {
    HipCenter = 0,
    Spine = 1,
    ShoulderCenter = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
}

impl JointType {
    pub const COUNT: usize = 20;

    /// インデックス順の全関節
    pub const ALL: [JointType; JointType::COUNT] = [
        Self::HipCenter,
        Self::Spine,
        Self::ShoulderCenter,
        Self::Head,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
    ];

    /// 着座モードで追跡される上半身の関節か
    pub fn is_upper_body(self) -> bool {
        !matches!(
            self,
            Self::HipCenter
                | Self::Spine
                | Self::HipLeft
                | Self::KneeLeft
                | Self::AnkleLeft
                | Self::FootLeft
                | Self::HipRight
                | Self::KneeRight
                | Self::AnkleRight
                | Self::FootRight
        )
    }
}

/// 関節の追跡品質
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointTrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

impl JointTrackingState {
    /// センサーの生コードから変換
    /// 未知のコードは描画しない側（NotTracked）に倒す
    pub fn from_raw(code: i32) -> Self {
        match code {
            1 => Self::Inferred,
            2 => Self::Tracked,
            _ => Self::NotTracked,
        }
    }
}

/// 単一関節
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub joint_type: JointType,
    pub position: SkeletonPoint,
    pub tracking_state: JointTrackingState,
}

impl Joint {
    pub fn new(joint_type: JointType, position: SkeletonPoint, tracking_state: JointTrackingState) -> Self {
        Self {
            joint_type,
            position,
            tracking_state,
        }
    }

    /// 追跡済みまたは推定済みで描画対象になるか
    pub fn is_visible(&self) -> bool {
        self.tracking_state != JointTrackingState::NotTracked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_type_count() {
        assert_eq!(JointType::COUNT, 20);
        assert_eq!(JointType::ALL.len(), JointType::COUNT);
    }

    #[test]
    fn test_joint_type_all_matches_index() {
        for (i, joint_type) in JointType::ALL.iter().enumerate() {
            assert_eq!(*joint_type as usize, i);
        }
    }

    #[test]
    fn test_upper_body_joints() {
        let upper = JointType::ALL.iter().filter(|j| j.is_upper_body()).count();
        assert_eq!(upper, 10);
        assert!(JointType::Head.is_upper_body());
        assert!(!JointType::Spine.is_upper_body());
    }

    #[test]
    fn test_tracking_state_from_raw() {
        assert_eq!(JointTrackingState::from_raw(0), JointTrackingState::NotTracked);
        assert_eq!(JointTrackingState::from_raw(1), JointTrackingState::Inferred);
        assert_eq!(JointTrackingState::from_raw(2), JointTrackingState::Tracked);
        assert_eq!(JointTrackingState::from_raw(7), JointTrackingState::NotTracked);
        assert_eq!(JointTrackingState::from_raw(-1), JointTrackingState::NotTracked);
    }

    #[test]
    fn test_joint_is_visible() {
        let p = SkeletonPoint::new(0.0, 0.0, 2.0);
        assert!(Joint::new(JointType::Head, p, JointTrackingState::Tracked).is_visible());
        assert!(Joint::new(JointType::Head, p, JointTrackingState::Inferred).is_visible());
        assert!(!Joint::new(JointType::Head, p, JointTrackingState::NotTracked).is_visible());
    }
}
