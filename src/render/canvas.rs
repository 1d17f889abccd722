use crate::mapper::ScreenPoint;

/// 塗りつぶし色 (RGB, 0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub color: u32,
}

impl Brush {
    pub const fn new(color: u32) -> Self {
        Self { color }
    }
}

/// 線の色と太さ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: u32,
    pub thickness: f32,
}

impl Pen {
    pub const fn new(color: u32, thickness: f32) -> Self {
        Self { color, thickness }
    }
}

/// 軸平行矩形（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// 描画先。矩形・楕円・線の3種類のプリミティブのみ
pub trait Canvas {
    fn fill_rectangle(&mut self, brush: Brush, rect: Rect);
    fn fill_ellipse(&mut self, brush: Brush, center: ScreenPoint, radius_x: f32, radius_y: f32);
    fn draw_line(&mut self, pen: Pen, from: ScreenPoint, to: ScreenPoint);
    /// 以降の描画をこの矩形内に制限する
    fn set_clip(&mut self, rect: Rect);
}

/// 記録された描画命令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rectangle {
        brush: Brush,
        rect: Rect,
    },
    Ellipse {
        brush: Brush,
        center: ScreenPoint,
        radius_x: f32,
        radius_y: f32,
    },
    Line {
        pen: Pen,
        from: ScreenPoint,
        to: ScreenPoint,
    },
    Clip {
        rect: Rect,
    },
}

/// 描画命令をそのまま記録するキャンバス
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Pen, ScreenPoint, ScreenPoint)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { pen, from, to } => Some((*pen, *from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn ellipses(&self) -> Vec<(Brush, ScreenPoint, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Ellipse {
                    brush,
                    center,
                    radius_x,
                    ..
                } => Some((*brush, *center, *radius_x)),
                _ => None,
            })
            .collect()
    }

    pub fn rectangles(&self) -> Vec<(Brush, Rect)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rectangle { brush, rect } => Some((*brush, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandRecorder {
    fn fill_rectangle(&mut self, brush: Brush, rect: Rect) {
        self.commands.push(DrawCommand::Rectangle { brush, rect });
    }

    fn fill_ellipse(&mut self, brush: Brush, center: ScreenPoint, radius_x: f32, radius_y: f32) {
        self.commands.push(DrawCommand::Ellipse {
            brush,
            center,
            radius_x,
            radius_y,
        });
    }

    fn draw_line(&mut self, pen: Pen, from: ScreenPoint, to: ScreenPoint) {
        self.commands.push(DrawCommand::Line { pen, from, to });
    }

    fn set_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip { rect });
    }
}
