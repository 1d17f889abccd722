use anyhow::{Context, Result};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::mapper::Resolution;
use crate::render::raster::RasterCanvas;

/// minifbを使用したレンダラー
pub struct MinifbRenderer {
    window: Window,
    canvas: RasterCanvas,
}

impl MinifbRenderer {
    /// ウィンドウを作成
    pub fn new(title: &str, resolution: Resolution) -> Result<Self> {
        let width = resolution.width as usize;
        let height = resolution.height as usize;
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .context("Failed to create window")?;

        Ok(Self {
            window,
            canvas: RasterCanvas::with_resolution(resolution),
        })
    }

    /// ウィンドウが開いているか
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// キーが押された瞬間か（リピートなし）
    pub fn key_pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// フレームの描画先
    pub fn canvas(&mut self) -> &mut RasterCanvas {
        &mut self.canvas
    }

    /// バッファをウィンドウに表示
    pub fn update(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(self.canvas.buffer(), self.canvas.width(), self.canvas.height())?;
        Ok(())
    }
}
