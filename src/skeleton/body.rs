use super::joint::{Joint, JointTrackingState, JointType, SkeletonPoint};

/// スケルトン全体の追跡状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkeletonTrackingState {
    #[default]
    NotTracked,
    /// 位置のみ既知（関節なし）
    PositionOnly,
    Tracked,
}

impl SkeletonTrackingState {
    /// 未知のコードは NotTracked
    pub fn from_raw(code: i32) -> Self {
        match code {
            1 => Self::PositionOnly,
            2 => Self::Tracked,
            _ => Self::NotTracked,
        }
    }
}

/// 画面端からはみ出している方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClippedEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ClippedEdges {
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }
}

/// 1フレーム分の1人のスケルトン
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    joints: [Joint; JointType::COUNT],
    pub tracking_state: SkeletonTrackingState,
    /// 位置のみ追跡時に使う重心位置
    pub position: SkeletonPoint,
    pub clipped_edges: ClippedEdges,
}

impl Skeleton {
    /// 全関節 NotTracked、追跡状態 NotTracked のスケルトン
    pub fn new() -> Self {
        let joints = JointType::ALL
            .map(|joint_type| Joint::new(joint_type, SkeletonPoint::default(), JointTrackingState::NotTracked));
        Self {
            joints,
            tracking_state: SkeletonTrackingState::NotTracked,
            position: SkeletonPoint::default(),
            clipped_edges: ClippedEdges::NONE,
        }
    }

    /// 位置のみ追跡のスケルトン
    pub fn position_only(position: SkeletonPoint) -> Self {
        Self {
            tracking_state: SkeletonTrackingState::PositionOnly,
            position,
            ..Self::new()
        }
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type as usize]
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// 関節を上書き（識別子ごとに1つだけ保持される）
    pub fn set_joint(&mut self, joint_type: JointType, position: SkeletonPoint, tracking_state: JointTrackingState) {
        self.joints[joint_type as usize] = Joint::new(joint_type, position, tracking_state);
    }

    pub fn set_joint_state(&mut self, joint_type: JointType, tracking_state: JointTrackingState) {
        self.joints[joint_type as usize].tracking_state = tracking_state;
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}
