use crate::mapper::{CoordinateMapper, Resolution};
use crate::render::canvas::{Canvas, Pen};
use crate::render::skeleton::ColorPolicy;
use crate::skeleton::{JointTrackingState, JointType, Skeleton};

/// 両端の追跡状態から骨のペンを選ぶ。描画しない場合は None
///
/// - どちらかが NotTracked: 描画しない
/// - 両方 Inferred: 描画しない（信頼度の低いノイズになる）
/// - 両方 Tracked: 配色の tracked ペン
/// - それ以外: 配色の fallback ペン
pub fn bone_pen(state0: JointTrackingState, state1: JointTrackingState, policy: &ColorPolicy) -> Option<Pen> {
    use JointTrackingState::*;
    match (state0, state1) {
        (NotTracked, _) | (_, NotTracked) => None,
        (Inferred, Inferred) => None,
        (Tracked, Tracked) => Some(policy.tracked),
        _ => Some(policy.fallback),
    }
}

/// 2関節間の骨を描画する。描画したら true
pub fn render_bone<C, M>(
    canvas: &mut C,
    mapper: &M,
    resolution: Resolution,
    skeleton: &Skeleton,
    joint_type0: JointType,
    joint_type1: JointType,
    policy: &ColorPolicy,
) -> bool
where
    C: Canvas + ?Sized,
    M: CoordinateMapper + ?Sized,
{
    let joint0 = skeleton.joint(joint_type0);
    let joint1 = skeleton.joint(joint_type1);

    let Some(pen) = bone_pen(joint0.tracking_state, joint1.tracking_state, policy) else {
        return false;
    };

    let from = mapper.map_to_screen(joint0.position, resolution);
    let to = mapper.map_to_screen(joint1.position, resolution);
    canvas.draw_line(pen, from, to);
    true
}
