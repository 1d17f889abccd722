use crate::config::Config;
use crate::mapper::{CoordinateMapper, Resolution};
use crate::posture;
use crate::render::bone::render_bone;
use crate::render::canvas::{Canvas, Rect};
use crate::render::skeleton::{BoneGroup, RenderStyle, BONES};
use crate::skeleton::{JointTrackingState, Skeleton, SkeletonTrackingState};

/// 1フレーム分の描画結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSummary {
    /// 完全追跡スケルトンごとの姿勢判定（入力順）
    pub posture_verdicts: Vec<bool>,
    pub bones_drawn: usize,
    pub joints_drawn: usize,
}

/// スケルトン群から1フレームを描画する
///
/// フレーム間で状態を持たない。出力は入力のスケルトン群だけで決まる。
pub struct FrameCompositor<M> {
    mapper: M,
    resolution: Resolution,
    style: RenderStyle,
    target_angle_deg: f32,
}

impl<M: CoordinateMapper> FrameCompositor<M> {
    pub fn new(mapper: M, style: RenderStyle, target_angle_deg: f32) -> Self {
        Self {
            mapper,
            resolution: Resolution::VGA,
            style,
            target_angle_deg,
        }
    }

    pub fn from_config(mapper: M, config: &Config) -> Self {
        Self::new(
            mapper,
            RenderStyle::from_config(&config.render),
            config.posture.target_angle_deg,
        )
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// 描画範囲
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.resolution.width as f32, self.resolution.height as f32)
    }

    /// 1フレームを描画
    ///
    /// スケルトンが空でも背景の塗りつぶしとクリップは必ず行う。
    /// ラスタ描画は即時反映なので、クリップは最初に設定する。
    pub fn compose<C>(&self, canvas: &mut C, skeletons: &[Skeleton]) -> FrameSummary
    where
        C: Canvas + ?Sized,
    {
        let mut summary = FrameSummary::default();

        canvas.set_clip(self.bounds());
        canvas.fill_rectangle(self.style.background, self.bounds());

        for skeleton in skeletons {
            self.render_clipped_edges(canvas, skeleton);

            match skeleton.tracking_state {
                SkeletonTrackingState::Tracked => {
                    let verdict = posture::evaluate_skeleton(skeleton, self.target_angle_deg);
                    summary.posture_verdicts.push(verdict);
                    let (bones, joints) = self.draw_bones_and_joints(canvas, skeleton, verdict);
                    summary.bones_drawn += bones;
                    summary.joints_drawn += joints;
                }
                SkeletonTrackingState::PositionOnly => {
                    let center = self.mapper.map_to_screen(skeleton.position, self.resolution);
                    let radius = self.style.body_center_thickness;
                    canvas.fill_ellipse(self.style.center_point, center, radius, radius);
                }
                SkeletonTrackingState::NotTracked => {}
            }
        }

        summary
    }

    /// 画面端からはみ出している方向に帯を描く
    fn render_clipped_edges<C>(&self, canvas: &mut C, skeleton: &Skeleton)
    where
        C: Canvas + ?Sized,
    {
        let edges = skeleton.clipped_edges;
        let w = self.resolution.width as f32;
        let h = self.resolution.height as f32;
        let t = self.style.clip_bounds_thickness;
        let brush = self.style.clip_edge;

        if edges.bottom {
            canvas.fill_rectangle(brush, Rect::new(0.0, h - t, w, t));
        }
        if edges.top {
            canvas.fill_rectangle(brush, Rect::new(0.0, 0.0, w, t));
        }
        if edges.left {
            canvas.fill_rectangle(brush, Rect::new(0.0, 0.0, t, h));
        }
        if edges.right {
            canvas.fill_rectangle(brush, Rect::new(w - t, 0.0, t, h));
        }
    }

    /// 骨と関節マーカーを描画。(骨の数, 関節の数) を返す
    fn draw_bones_and_joints<C>(&self, canvas: &mut C, skeleton: &Skeleton, posture_ok: bool) -> (usize, usize)
    where
        C: Canvas + ?Sized,
    {
        let torso_policy = if posture_ok {
            self.style.default_policy
        } else {
            self.style.alert_policy
        };

        let mut bones_drawn = 0;
        for bone in BONES.iter() {
            let policy = match bone.group {
                BoneGroup::Torso => &torso_policy,
                BoneGroup::Limb => &self.style.default_policy,
            };
            if render_bone(canvas, &self.mapper, self.resolution, skeleton, bone.from, bone.to, policy) {
                bones_drawn += 1;
            }
        }

        let radius = self.style.joint_thickness;
        let mut joints_drawn = 0;
        for joint in skeleton.joints() {
            let brush = match joint.tracking_state {
                JointTrackingState::Tracked => self.style.tracked_joint,
                JointTrackingState::Inferred => self.style.inferred_joint,
                JointTrackingState::NotTracked => continue,
            };
            let center = self.mapper.map_to_screen(joint.position, self.resolution);
            canvas.fill_ellipse(brush, center, radius, radius);
            joints_drawn += 1;
        }

        (bones_drawn, joints_drawn)
    }
}
