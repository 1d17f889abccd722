pub mod bone;
pub mod canvas;
pub mod compositor;
pub mod raster;
pub mod skeleton;
#[cfg(feature = "desktop")]
pub mod window;

pub use bone::{bone_pen, render_bone};
pub use canvas::{Brush, Canvas, CommandRecorder, DrawCommand, Pen, Rect};
pub use compositor::{FrameCompositor, FrameSummary};
#[cfg(feature = "desktop")]
pub use minifb::Key;
pub use raster::RasterCanvas;
pub use skeleton::{Bone, BoneGroup, ColorPolicy, RenderStyle, BONES};
#[cfg(feature = "desktop")]
pub use window::MinifbRenderer;
