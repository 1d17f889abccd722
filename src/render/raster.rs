use crate::mapper::{Resolution, ScreenPoint};
use crate::render::canvas::{Brush, Canvas, Pen, Rect};

/// u32 (0xRRGGBB) バッファへのソフトウェア描画
pub struct RasterCanvas {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    /// クリップ範囲 (x0, y0, x1, y1) 半開区間
    clip: (i32, i32, i32, i32),
}

impl RasterCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![0u32; width * height],
            width,
            height,
            clip: (0, 0, width as i32, height as i32),
        }
    }

    pub fn with_resolution(resolution: Resolution) -> Self {
        Self::new(resolution.width as usize, resolution.height as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// ピクセル値（範囲外は None）
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// ピクセルをセット（クリップ・境界チェック付き）
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let (x0, y0, x1, y1) = self.clip;
        if x >= x0 && x < x1 && y >= y0 && y < y1 {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }

    /// 円を描画（塗りつぶし）
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenhamのアルゴリズムで線を描画。太さは丸ブラシで表現
    fn draw_thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            if radius == 0 {
                self.set_pixel(x, y, color);
            } else {
                self.draw_circle(x, y, radius, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Liang–Barsky で線分を矩形 (x0, y0, x1, y1) 内に切り詰める。範囲外なら None
///
/// 投影で極端に大きな座標が来るので f64 で計算する。
fn clip_segment(
    from: ScreenPoint,
    to: ScreenPoint,
    (x_min, y_min, x_max, y_max): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (fx, fy) = (from.x as f64, from.y as f64);
    let dx = to.x as f64 - fx;
    let dy = to.y as f64 - fy;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [(-dx, fx - x_min), (dx, x_max - fx), (-dy, fy - y_min), (dy, y_max - fy)] {
        if p == 0.0 {
            // 境界と平行で外側
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(((fx + t0 * dx, fy + t0 * dy), (fx + t1 * dx, fy + t1 * dy)))
}

impl Canvas for RasterCanvas {
    fn fill_rectangle(&mut self, brush: Brush, rect: Rect) {
        if !(rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite()) {
            return;
        }
        // 整数化の前にクリップ範囲へ収める
        let (cx0, cy0, cx1, cy1) = self.clip;
        let x0 = rect.x.round().max(cx0 as f32) as i32;
        let y0 = rect.y.round().max(cy0 as f32) as i32;
        let x1 = (rect.x + rect.width).round().min(cx1 as f32) as i32;
        let y1 = (rect.y + rect.height).round().min(cy1 as f32) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, brush.color);
            }
        }
    }

    fn fill_ellipse(&mut self, brush: Brush, center: ScreenPoint, radius_x: f32, radius_y: f32) {
        if !(radius_x > 0.0 && radius_y > 0.0 && radius_x.is_finite() && radius_y.is_finite()) {
            return;
        }
        if !(center.x.is_finite() && center.y.is_finite()) {
            return;
        }
        // クリップ範囲と重ならない楕円は描かない
        let (x0, y0, x1, y1) = self.clip;
        if center.x + radius_x < x0 as f32
            || center.x - radius_x >= x1 as f32
            || center.y + radius_y < y0 as f32
            || center.y - radius_y >= y1 as f32
        {
            return;
        }
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        let rx = radius_x.ceil() as i32;
        let ry = radius_y.ceil() as i32;
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                let nx = dx as f32 / radius_x;
                let ny = dy as f32 / radius_y;
                if nx * nx + ny * ny <= 1.0 {
                    self.set_pixel(cx + dx, cy + dy, brush.color);
                }
            }
        }
    }

    fn draw_line(&mut self, pen: Pen, from: ScreenPoint, to: ScreenPoint) {
        // 非有限の座標は描けない
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let radius = ((pen.thickness - 1.0) / 2.0).round().max(0.0) as i32;

        // ブラシ半径ぶん広げたクリップ範囲に切り詰めてから整数化する
        let (x0, y0, x1, y1) = self.clip;
        let r = radius as f64;
        let bounds = (x0 as f64 - r, y0 as f64 - r, (x1 - 1) as f64 + r, (y1 - 1) as f64 + r);
        let Some(((ax, ay), (bx, by))) = clip_segment(from, to, bounds) else {
            return;
        };

        self.draw_thick_line(
            ax.round() as i32,
            ay.round() as i32,
            bx.round() as i32,
            by.round() as i32,
            radius,
            pen.color,
        );
    }

    fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.round() as i32).max(0);
        let y0 = (rect.y.round() as i32).max(0);
        let x1 = ((rect.x + rect.width).round() as i32).min(self.width as i32);
        let y1 = ((rect.y + rect.height).round() as i32).min(self.height as i32);
        self.clip = (x0, y0, x1, y1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rectangle() {
        let mut canvas = RasterCanvas::new(20, 10);
        canvas.fill_rectangle(Brush::new(0xFF0000), Rect::new(2.0, 3.0, 4.0, 2.0));
        assert_eq!(canvas.pixel(2, 3), Some(0xFF0000));
        assert_eq!(canvas.pixel(5, 4), Some(0xFF0000));
        assert_eq!(canvas.pixel(6, 4), Some(0));
        assert_eq!(canvas.pixel(2, 5), Some(0));
    }

    #[test]
    fn test_rectangle_outside_buffer_is_clipped() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.fill_rectangle(Brush::new(0x00FF00), Rect::new(-5.0, -5.0, 100.0, 100.0));
        assert!(canvas.buffer().iter().all(|&p| p == 0x00FF00));
    }

    #[test]
    fn test_clip_restricts_drawing() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.set_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        canvas.fill_rectangle(Brush::new(0xFFFFFF), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(canvas.pixel(4, 4), Some(0xFFFFFF));
        assert_eq!(canvas.pixel(5, 5), Some(0));
        assert_eq!(canvas.pixel(9, 0), Some(0));
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.draw_line(
            Pen::new(0x808080, 1.0),
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(8.0, 6.0),
        );
        assert_eq!(canvas.pixel(1, 1), Some(0x808080));
        assert_eq!(canvas.pixel(8, 6), Some(0x808080));
        assert_eq!(canvas.pixel(8, 1), Some(0));
    }

    #[test]
    fn test_thick_line_is_wider() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.draw_line(
            Pen::new(0x008000, 6.0),
            ScreenPoint::new(2.0, 10.0),
            ScreenPoint::new(17.0, 10.0),
        );
        assert_eq!(canvas.pixel(10, 10), Some(0x008000));
        assert_eq!(canvas.pixel(10, 12), Some(0x008000));
        assert_eq!(canvas.pixel(10, 8), Some(0x008000));
        assert_eq!(canvas.pixel(10, 15), Some(0));
    }

    #[test]
    fn test_non_finite_line_is_skipped() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.draw_line(
            Pen::new(0xFFFFFF, 1.0),
            ScreenPoint::new(f32::NAN, 1.0),
            ScreenPoint::new(5.0, 5.0),
        );
        assert!(canvas.buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_extreme_line_is_clipped_to_canvas() {
        let mut canvas = RasterCanvas::new(64, 48);
        canvas.draw_line(
            Pen::new(0x008000, 6.0),
            ScreenPoint::new(-1.0e11, 20.0),
            ScreenPoint::new(1.0e11, 20.0),
        );
        assert_eq!(canvas.pixel(0, 20), Some(0x008000));
        assert_eq!(canvas.pixel(63, 20), Some(0x008000));
        assert_eq!(canvas.pixel(32, 22), Some(0x008000));
        assert_eq!(canvas.pixel(32, 30), Some(0));
    }

    #[test]
    fn test_line_with_one_far_endpoint() {
        let mut canvas = RasterCanvas::new(64, 48);
        canvas.draw_line(
            Pen::new(0xFFFFFF, 1.0),
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(-3.0e10, -3.0e10),
        );
        assert_eq!(canvas.pixel(10, 10), Some(0xFFFFFF));
        assert_eq!(canvas.pixel(0, 0), Some(0xFFFFFF));
        assert_eq!(canvas.pixel(20, 20), Some(0));
    }

    #[test]
    fn test_line_outside_canvas_draws_nothing() {
        let mut canvas = RasterCanvas::new(64, 48);
        canvas.draw_line(
            Pen::new(0xFFFFFF, 6.0),
            ScreenPoint::new(-1.0e11, -50.0),
            ScreenPoint::new(1.0e11, -50.0),
        );
        canvas.draw_line(
            Pen::new(0xFFFFFF, 1.0),
            ScreenPoint::new(100.0, 5.0),
            ScreenPoint::new(2.0e9, 40.0),
        );
        assert!(canvas.buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_line_respects_clip() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.set_clip(Rect::new(0.0, 0.0, 10.0, 20.0));
        canvas.draw_line(
            Pen::new(0xFF0000, 1.0),
            ScreenPoint::new(0.0, 5.0),
            ScreenPoint::new(19.0, 5.0),
        );
        assert_eq!(canvas.pixel(9, 5), Some(0xFF0000));
        assert_eq!(canvas.pixel(10, 5), Some(0));
    }

    #[test]
    fn test_far_ellipse_and_rectangle_are_skipped() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.fill_ellipse(Brush::new(0x0000FF), ScreenPoint::new(4.0e10, -4.0e10), 3.0, 3.0);
        canvas.fill_rectangle(Brush::new(0x0000FF), Rect::new(-1.0e12, 30.0, 2.0e12, 1.0e12));
        assert!(canvas.buffer().iter().all(|&p| p == 0));

        canvas.fill_rectangle(Brush::new(0x00FF00), Rect::new(-1.0e12, 15.0, 2.0e12, 1.0e12));
        assert_eq!(canvas.pixel(0, 15), Some(0x00FF00));
        assert_eq!(canvas.pixel(19, 19), Some(0x00FF00));
        assert_eq!(canvas.pixel(19, 14), Some(0));
    }

    #[test]
    fn test_fill_ellipse() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.fill_ellipse(Brush::new(0x0000FF), ScreenPoint::new(10.0, 10.0), 3.0, 3.0);
        assert_eq!(canvas.pixel(10, 10), Some(0x0000FF));
        assert_eq!(canvas.pixel(13, 10), Some(0x0000FF));
        assert_eq!(canvas.pixel(10, 7), Some(0x0000FF));
        assert_eq!(canvas.pixel(13, 13), Some(0));
        assert_eq!(canvas.pixel(14, 10), Some(0));
    }

    #[test]
    fn test_pixel_out_of_range() {
        let canvas = RasterCanvas::new(4, 4);
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.pixel(0, 4), None);
    }
}
