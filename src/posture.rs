use crate::skeleton::{JointType, Skeleton, SkeletonPoint};

/// 胴体の前後傾きを判定する
///
/// 腰中心 → 背骨 → 肩中心 の順に Z（奥行き）が厳密に減少していれば正しい姿勢とみなす。
/// XZ平面での傾きの代理指標で、角度そのものは計算していない。
/// `target_angle_deg` は受け取るだけで判定には使っていない。
pub fn evaluate(
    hip_center: SkeletonPoint,
    spine: SkeletonPoint,
    shoulder_center: SkeletonPoint,
    target_angle_deg: f32,
) -> bool {
    let _ = target_angle_deg;
    hip_center.z > spine.z && spine.z > shoulder_center.z
}

/// スケルトンの腰中心・背骨・肩中心で判定
pub fn evaluate_skeleton(skeleton: &Skeleton, target_angle_deg: f32) -> bool {
    evaluate(
        skeleton.joint(JointType::HipCenter).position,
        skeleton.joint(JointType::Spine).position,
        skeleton.joint(JointType::ShoulderCenter).position,
        target_angle_deg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::JointTrackingState;

    fn p(z: f32) -> SkeletonPoint {
        SkeletonPoint::new(0.0, 0.0, z)
    }

    #[test]
    fn test_decreasing_depth_is_correct() {
        assert!(evaluate(p(2.0), p(1.5), p(1.0), 90.0));
    }

    #[test]
    fn test_increasing_depth_is_incorrect() {
        assert!(!evaluate(p(1.0), p(1.5), p(2.0), 90.0));
    }

    #[test]
    fn test_equal_depth_breaks_chain() {
        assert!(!evaluate(p(1.0), p(1.0), p(0.5), 90.0));
        assert!(!evaluate(p(2.0), p(1.0), p(1.0), 90.0));
    }

    #[test]
    fn test_non_monotonic_is_incorrect() {
        assert!(!evaluate(p(2.0), p(1.0), p(1.5), 90.0));
        assert!(!evaluate(p(1.5), p(2.0), p(1.0), 90.0));
    }

    #[test]
    fn test_x_and_y_are_ignored() {
        let hip = SkeletonPoint::new(-3.0, 10.0, 2.0);
        let spine = SkeletonPoint::new(5.0, -1.0, 1.9);
        let shoulder = SkeletonPoint::new(0.0, 0.0, 1.8);
        assert!(evaluate(hip, spine, shoulder, 90.0));
    }

    #[test]
    fn test_target_angle_is_inert() {
        // 角度引数は現状判定に影響しない
        for angle in [0.0, 45.0, 90.0, 180.0, -30.0, f32::NAN] {
            assert!(evaluate(p(2.0), p(1.5), p(1.0), angle));
            assert!(!evaluate(p(1.0), p(1.5), p(2.0), angle));
        }
    }

    #[test]
    fn test_evaluate_skeleton_uses_torso_joints() {
        let mut skeleton = Skeleton::new();
        skeleton.set_joint(JointType::HipCenter, p(2.0), JointTrackingState::Tracked);
        skeleton.set_joint(JointType::Spine, p(1.9), JointTrackingState::Tracked);
        skeleton.set_joint(JointType::ShoulderCenter, p(1.8), JointTrackingState::Tracked);
        // 他の関節の奥行きは無関係
        skeleton.set_joint(JointType::Head, p(5.0), JointTrackingState::Tracked);
        assert!(evaluate_skeleton(&skeleton, 90.0));

        skeleton.set_joint(JointType::ShoulderCenter, p(2.1), JointTrackingState::Tracked);
        assert!(!evaluate_skeleton(&skeleton, 90.0));
    }
}
