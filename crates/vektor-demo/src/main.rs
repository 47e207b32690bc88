use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use vektor_engine::coords::Vec2;
use vektor_engine::logging::{LoggingConfig, init_logging};
use vektor_engine::paint::Color;
use vektor_engine::render::SoftwareTarget;
use vektor_engine::scene::{Polygon, Scene, Triangle};
use vektor_engine::{Engine, EngineConfig};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

const BACKGROUND_HEX: &str = "#0b0d14";
const DECOY_HEX: &str = "#40a0ffc8";

#[derive(Debug, Copy, Clone)]
struct Palette {
    background: Color,
    decoy: Color,
}

impl Palette {
    fn parse() -> Result<Self> {
        let parse = |hex: &str| Color::from_hex(hex).with_context(|| format!("invalid color {hex}"));
        Ok(Self { background: parse(BACKGROUND_HEX)?, decoy: parse(DECOY_HEX)? })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let out: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("vektor-frame.ppm"));

    let palette = Palette::parse()?;
    let config = EngineConfig::default()
        .fps(60)
        .rotation_step(15.0)
        .thread_name("vektor-demo-loop");

    let target = Arc::new(SoftwareTarget::new(WIDTH, HEIGHT));
    let engine = Engine::new(config, target.clone(), move |w, h| build_scene(w, h, palette));

    engine.start().context("failed to start engine")?;
    thread::sleep(Duration::from_millis(750));

    engine.pause();
    let frame = target.front_snapshot().context("render target disposed early")?;
    thread::sleep(Duration::from_millis(250));
    engine.resume();

    thread::sleep(Duration::from_millis(750));
    engine.stop();
    let report = engine.join().context("frame loop failed")?;
    anyhow::ensure!(target.is_disposed(), "render target still alive after join");
    log::info!(
        "{} frames presented, {} skipped, {} buffer swaps",
        report.frames_presented,
        report.frames_skipped,
        target.present_count()
    );

    let file = File::create(&out).with_context(|| format!("failed to create {}", out.display()))?;
    frame
        .write_ppm(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("paused frame written to {}", out.display());

    Ok(())
}

/// The ship at the left edge above a row of translucent polygons.
fn build_scene(width: u32, height: u32, palette: Palette) -> Scene {
    let mid = height as f32 / 2.0;
    let mut scene = Scene::new().with_background(palette.background);

    scene.add(Triangle::new(
        Vec2::new(50.0, mid - 5.0),
        Vec2::new(50.0, mid + 5.0),
        Vec2::new(60.0, mid),
        Color::LIGHT_GRAY,
    ));

    let spacing = width as f32 / 6.0;
    for i in 1..6 {
        let center = Vec2::new(spacing * i as f32, mid + 120.0);
        if let Some(decoy) = Polygon::regular(center, 24.0, 3 + i, palette.decoy) {
            scene.add(decoy);
        }
    }

    scene
}
