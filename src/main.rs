use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use posture_view::config::Config;
use posture_view::mapper::DepthImageMapper;
use posture_view::render::{FrameCompositor, Key, MinifbRenderer};
use posture_view::sensor::SyntheticSensor;
use posture_view::viewer::SkeletonViewer;

const CONFIG_PATH: &str = "config.toml";

const WINDOW_TITLE: &str = "Skeleton Posture Viewer";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Posture View ({}) ===", env!("GIT_VERSION"));
    println!("  S   - 着座モード切り替え");
    println!("  ESC - 終了");
    println!();

    let config = Config::load_or_default(CONFIG_PATH);

    let compositor = FrameCompositor::from_config(DepthImageMapper::new(), &config);
    let sensor = SyntheticSensor::from_config(&config.sensor);
    let mut viewer = SkeletonViewer::new(Some(sensor), compositor);
    let mut renderer = MinifbRenderer::new(WINDOW_TITLE, viewer.compositor().resolution())?;

    if !viewer.start() {
        renderer.set_title(&format!("{} - {}", WINDOW_TITLE, viewer.status()));
    }
    let mut seated = config.sensor.seated;

    let frame_interval = Duration::from_millis(config.sensor.frame_interval_ms);

    // FPS計測用
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    // メインループ
    while renderer.is_open() {
        let frame_start = Instant::now();

        if renderer.key_pressed(Key::S) {
            seated = !seated;
            if let Err(e) = viewer.set_seated(seated) {
                warn!("failed to switch tracking mode: {:#}", e);
                seated = !seated;
            }
        }

        // フレーム取得の失敗は次のフレームで再試行
        if let Err(e) = viewer.render_next_frame(renderer.canvas()) {
            warn!("frame error: {:#}", e);
        }
        renderer.update()?;

        // FPS計算
        frame_count += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            info!("FPS: {:.1}", frame_count as f32 / elapsed);
            frame_count = 0;
            fps_timer = Instant::now();
        }

        if let Some(remaining) = frame_interval.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    viewer.stop();
    println!("Shutting down...");
    Ok(())
}
