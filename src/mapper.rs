use crate::skeleton::SkeletonPoint;

/// 出力解像度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// 描画キャンバスの固定解像度
    pub const VGA: Self = Self {
        width: 640,
        height: 480,
    };
}

/// 画面座標（ピクセル、左上原点）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// センサー空間 → 画面座標の変換
/// 決定的で副作用なしであること
pub trait CoordinateMapper {
    fn map_to_screen(&self, point: SkeletonPoint, resolution: Resolution) -> ScreenPoint;
}

/// 320x240 深度画像でのピクセル換算焦点距離
pub const NOMINAL_FOCAL_LENGTH_320X240: f32 = 285.63;

/// 深度画像へのピンホール投影
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthImageMapper {
    focal_length_320x240: f32,
}

impl DepthImageMapper {
    pub fn new() -> Self {
        Self {
            focal_length_320x240: NOMINAL_FOCAL_LENGTH_320X240,
        }
    }

    pub fn with_focal_length(focal_length_320x240: f32) -> Self {
        Self { focal_length_320x240 }
    }
}

impl Default for DepthImageMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateMapper for DepthImageMapper {
    fn map_to_screen(&self, point: SkeletonPoint, resolution: Resolution) -> ScreenPoint {
        let cx = resolution.width as f32 / 2.0;
        let cy = resolution.height as f32 / 2.0;
        // センサー背面の点は投影できないので中心に寄せる
        if point.z <= 0.0 {
            return ScreenPoint::new(cx, cy);
        }
        let fx = self.focal_length_320x240 * resolution.width as f32 / 320.0;
        let fy = self.focal_length_320x240 * resolution.height as f32 / 240.0;
        // センサーY: 上が正、画面Y: 下が正
        ScreenPoint::new(cx + point.x * fx / point.z, cy - point.y * fy / point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_axis_maps_to_center() {
        let mapper = DepthImageMapper::new();
        let p = mapper.map_to_screen(SkeletonPoint::new(0.0, 0.0, 2.0), Resolution::VGA);
        assert_eq!(p, ScreenPoint::new(320.0, 240.0));
    }

    #[test]
    fn test_right_and_up() {
        let mapper = DepthImageMapper::new();
        let p = mapper.map_to_screen(SkeletonPoint::new(0.5, 0.5, 2.0), Resolution::VGA);
        assert!(p.x > 320.0);
        assert!(p.y < 240.0);
    }

    #[test]
    fn test_farther_is_closer_to_center() {
        let mapper = DepthImageMapper::new();
        let near = mapper.map_to_screen(SkeletonPoint::new(0.5, 0.0, 1.0), Resolution::VGA);
        let far = mapper.map_to_screen(SkeletonPoint::new(0.5, 0.0, 4.0), Resolution::VGA);
        assert!(near.x - 320.0 > far.x - 320.0);
    }

    #[test]
    fn test_projection_scale() {
        let mapper = DepthImageMapper::with_focal_length(320.0);
        // fx = 320 * 640 / 320 = 640
        let p = mapper.map_to_screen(SkeletonPoint::new(1.0, 0.0, 2.0), Resolution::VGA);
        assert!((p.x - 640.0).abs() < 1e-3);
    }

    #[test]
    fn test_behind_sensor_maps_to_center() {
        let mapper = DepthImageMapper::new();
        let p = mapper.map_to_screen(SkeletonPoint::new(1.0, 1.0, 0.0), Resolution::VGA);
        assert_eq!(p, ScreenPoint::new(320.0, 240.0));
        let p = mapper.map_to_screen(SkeletonPoint::new(1.0, 1.0, -1.0), Resolution::VGA);
        assert_eq!(p, ScreenPoint::new(320.0, 240.0));
    }

    #[test]
    fn test_deterministic() {
        let mapper = DepthImageMapper::new();
        let point = SkeletonPoint::new(0.3, -0.2, 2.5);
        assert_eq!(
            mapper.map_to_screen(point, Resolution::VGA),
            mapper.map_to_screen(point, Resolution::VGA)
        );
    }
}
