use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use vektor_engine::coords::Vec2;
use vektor_engine::core::{FrameLoop, FrameOutcome};
use vektor_engine::paint::Color;
use vektor_engine::render::{DrawContext, FrameError, RenderTarget};
use vektor_engine::scene::{Drawable, Scene, Triangle};
use vektor_engine::{Engine, EngineConfig, EngineError, Lifecycle};

const MS: Duration = Duration::from_millis(1);

// ── mock target ───────────────────────────────────────────────────────────

/// Failures to inject, keyed by 1-based call number.
#[derive(Debug, Default)]
struct Faults {
    unavailable_on: Vec<u64>,
    present_fails_on: Vec<u64>,
    sync_fails_on: Vec<u64>,
    fatal_from: Option<u64>,
}

#[derive(Debug, Default)]
struct MockTarget {
    faults: Faults,
    acquires: AtomicU64,
    releases: AtomicU64,
    present_calls: AtomicU64,
    /// Present count observed by each `sync` call.
    synced_after: Mutex<Vec<u64>>,
    disposals: AtomicU64,
    /// Acquire numbers whose context was actually painted.
    rendered: Mutex<Vec<u64>>,
}

impl MockTarget {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_faults(faults: Faults) -> Arc<Self> {
        Arc::new(Self { faults, ..Self::default() })
    }

    fn renders(&self) -> usize {
        self.rendered.lock().len()
    }

    fn rendered(&self) -> Vec<u64> {
        self.rendered.lock().clone()
    }

    fn acquires(&self) -> u64 {
        self.acquires.load(Ordering::SeqCst)
    }

    fn releases(&self) -> u64 {
        self.releases.load(Ordering::SeqCst)
    }

    fn synced_after(&self) -> Vec<u64> {
        self.synced_after.lock().clone()
    }

    fn disposals(&self) -> u64 {
        self.disposals.load(Ordering::SeqCst)
    }
}

struct MockContext<'a> {
    target: &'a MockTarget,
    frame: u64,
}

impl DrawContext for MockContext<'_> {
    fn clear(&mut self, _color: Color) -> Result<(), FrameError> {
        self.target.rendered.lock().push(self.frame);
        Ok(())
    }

    fn fill_polygon(&mut self, vertices: &[Vec2], _color: Color) -> Result<(), FrameError> {
        assert_eq!(vertices.len(), 3);
        Ok(())
    }

    fn release(&mut self) {
        self.target.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl RenderTarget for MockTarget {
    fn width(&self) -> u32 {
        640
    }

    fn height(&self) -> u32 {
        480
    }

    fn acquire_context(&self) -> Result<Box<dyn DrawContext + '_>, FrameError> {
        let n = self.acquires.fetch_add(1, Ordering::SeqCst) + 1;
        if self.faults.fatal_from.is_some_and(|from| n >= from) {
            return Err(FrameError::fatal("surface destroyed"));
        }
        if self.faults.unavailable_on.contains(&n) {
            return Err(FrameError::unavailable("buffer busy"));
        }
        Ok(Box::new(MockContext { target: self, frame: n }))
    }

    fn present(&self) -> Result<(), FrameError> {
        let n = self.present_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.faults.present_fails_on.contains(&n) {
            return Err(FrameError::present_failed("swap rejected"));
        }
        Ok(())
    }

    fn sync(&self) -> Result<(), FrameError> {
        let presents = self.present_calls.load(Ordering::SeqCst);
        let mut synced = self.synced_after.lock();
        synced.push(presents);
        if self.faults.sync_fails_on.contains(&(synced.len() as u64)) {
            return Err(FrameError::present_failed("vsync lost"));
        }
        Ok(())
    }

    fn dispose(&self) -> anyhow::Result<()> {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

fn ship_scene(_width: u32, height: u32) -> Scene {
    let mid = height as f32 / 2.0;
    let mut scene = Scene::new();
    scene.add(Triangle::new(
        Vec2::new(50.0, mid - 5.0),
        Vec2::new(50.0, mid + 5.0),
        Vec2::new(60.0, mid),
        Color::LIGHT_GRAY,
    ));
    scene
}

fn engine_with(target: &Arc<MockTarget>, interval: Duration) -> Engine {
    Engine::new(
        EngineConfig::default().tick_interval(interval),
        Arc::clone(target) as Arc<dyn RenderTarget>,
        ship_scene,
    )
}

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let give_up = Instant::now() + timeout;
    while Instant::now() < give_up {
        if done() {
            return true;
        }
        thread::sleep(MS);
    }
    done()
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn sixteen_ms_engine_renders_and_disposes_once() {
    let target = MockTarget::new();
    let engine = engine_with(&target, 16 * MS);

    engine.start().unwrap();
    assert!(engine.is_running());
    thread::sleep(100 * MS);
    engine.stop();
    let report = engine.join().unwrap();

    assert!(target.renders() >= 2, "rendered {}", target.renders());
    assert_eq!(target.disposals(), 1);
    assert_eq!(target.acquires(), target.releases());
    assert_eq!(report.frames_presented as usize, target.renders());
    assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
}

#[test]
fn pause_right_after_start_halts_rendering_until_resume() {
    let target = MockTarget::new();
    let engine = engine_with(&target, 10 * MS);

    engine.start().unwrap();
    engine.pause();
    assert!(engine.is_paused());

    // Let a frame that was already in flight finish.
    thread::sleep(30 * MS);
    let frozen = target.renders();
    thread::sleep(120 * MS);
    assert_eq!(target.renders(), frozen, "rendered while paused");

    engine.resume();
    assert!(
        wait_until(Duration::from_secs(2), || target.renders() > frozen),
        "rendering did not resume"
    );

    engine.stop();
    engine.join().unwrap();
    assert_eq!(target.disposals(), 1);
}

#[test]
fn resume_waits_a_full_fresh_interval() {
    let target = MockTarget::new();
    let interval = 60 * MS;
    let engine = engine_with(&target, interval);

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(2), || target.renders() >= 1));
    engine.pause();
    // Stay paused for several intervals so any overdue ticks would pile up.
    thread::sleep(4 * interval);
    let before = target.renders();

    let resumed_at = Instant::now();
    engine.resume();
    assert!(wait_until(Duration::from_secs(2), || target.renders() > before));
    let waited = resumed_at.elapsed();

    assert!(waited >= interval - 5 * MS, "next frame came after only {waited:?}");
    // No burst: exactly one frame shortly after the first post-resume frame.
    thread::sleep(interval / 3);
    assert_eq!(target.renders(), before + 1);

    engine.stop();
    engine.join().unwrap();
}

#[test]
fn resource_unavailable_on_frame_three_only_skips_that_frame() {
    let target = MockTarget::with_faults(Faults { unavailable_on: vec![3], ..Faults::default() });
    let mut frames = FrameLoop::new(ship_scene(640, 480), target.as_ref(), 15.0);

    let outcomes: Vec<FrameOutcome> = (0..5).map(|_| frames.run_frame().unwrap()).collect();

    use FrameOutcome::{Presented, Skipped};
    assert_eq!(outcomes, vec![Presented, Presented, Skipped, Presented, Presented]);
    assert_eq!(target.rendered(), vec![1, 2, 4, 5]);
    assert_eq!(frames.report().frames_skipped, 1);
    assert_eq!(target.acquires() - 1, target.releases());
}

#[test]
fn engine_keeps_running_past_an_unavailable_frame() {
    let target = MockTarget::with_faults(Faults { unavailable_on: vec![3], ..Faults::default() });
    let engine = engine_with(&target, 2 * MS);

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(2), || target.acquires() >= 6));
    assert!(engine.is_running());
    engine.stop();
    let report = engine.join().unwrap();

    let rendered = target.rendered();
    assert_eq!(&rendered[..4], &[1, 2, 4, 5]);
    assert_eq!(report.frames_skipped, 1);
    assert_eq!(target.disposals(), 1);
}

#[test]
fn present_failure_is_skipped_not_fatal() {
    let target = MockTarget::with_faults(Faults { present_fails_on: vec![2], ..Faults::default() });
    let mut frames = FrameLoop::new(ship_scene(640, 480), target.as_ref(), 15.0);

    assert_eq!(frames.run_frame().unwrap(), FrameOutcome::Presented);
    assert_eq!(frames.run_frame().unwrap(), FrameOutcome::Skipped);
    assert_eq!(frames.run_frame().unwrap(), FrameOutcome::Presented);
    assert_eq!(target.acquires(), target.releases());
    // A failed present never reaches sync.
    assert_eq!(target.synced_after(), vec![1, 3]);
}

#[test]
fn every_frame_syncs_once_after_presenting() {
    let target = MockTarget::new();
    let mut frames = FrameLoop::new(ship_scene(640, 480), target.as_ref(), 15.0);

    for _ in 0..4 {
        assert_eq!(frames.run_frame().unwrap(), FrameOutcome::Presented);
    }
    assert_eq!(target.synced_after(), vec![1, 2, 3, 4]);
}

#[test]
fn sync_failure_is_skipped_not_fatal() {
    let target = MockTarget::with_faults(Faults { sync_fails_on: vec![2], ..Faults::default() });
    let mut frames = FrameLoop::new(ship_scene(640, 480), target.as_ref(), 15.0);

    let outcomes: Vec<FrameOutcome> = (0..3).map(|_| frames.run_frame().unwrap()).collect();

    use FrameOutcome::{Presented, Skipped};
    assert_eq!(outcomes, vec![Presented, Skipped, Presented]);
    assert_eq!(target.synced_after(), vec![1, 2, 3]);
    assert_eq!(frames.report().frames_skipped, 1);
    assert_eq!(target.acquires(), target.releases());
}

#[test]
fn fatal_loss_stops_the_engine_and_reports_to_join() {
    let target = MockTarget::with_faults(Faults { fatal_from: Some(3), ..Faults::default() });
    let engine = engine_with(&target, 2 * MS);

    engine.start().unwrap();
    let result = engine.join();

    assert!(
        matches!(result, Err(EngineError::Fatal(FrameError::FatalResourceLoss(_)))),
        "{result:?}"
    );
    assert_eq!(target.rendered(), vec![1, 2]);
    assert_eq!(target.disposals(), 1);
    assert!(!engine.is_running());

    engine.stop();
    assert_eq!(target.disposals(), 1);
}

// ── stop ──────────────────────────────────────────────────────────────────

#[test]
fn double_stop_disposes_once() {
    let target = MockTarget::new();
    let engine = engine_with(&target, 5 * MS);

    engine.start().unwrap();
    thread::sleep(20 * MS);
    engine.stop();
    engine.stop();
    engine.join().unwrap();
    engine.stop();

    assert_eq!(target.disposals(), 1);
}

#[test]
fn concurrent_stops_dispose_once() {
    let target = MockTarget::new();
    let engine = Arc::new(engine_with(&target, 5 * MS));
    engine.start().unwrap();
    thread::sleep(10 * MS);

    let stoppers: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.stop())
        })
        .collect();
    for s in stoppers {
        s.join().unwrap();
    }
    engine.join().unwrap();

    assert_eq!(target.disposals(), 1);
}

#[test]
fn stop_wakes_a_paused_engine() {
    let target = MockTarget::new();
    let engine = engine_with(&target, 5 * MS);

    engine.start().unwrap();
    engine.pause();
    thread::sleep(20 * MS);

    let stopped_at = Instant::now();
    engine.stop();
    engine.join().unwrap();
    assert!(stopped_at.elapsed() < Duration::from_secs(1));
    assert_eq!(target.disposals(), 1);
}

#[test]
fn stop_before_start_disposes_and_blocks_start() {
    let target = MockTarget::new();
    let engine = engine_with(&target, 5 * MS);

    engine.stop();
    assert_eq!(target.disposals(), 1);
    assert!(matches!(engine.start(), Err(EngineError::Stopped)));
    assert_eq!(target.acquires(), 0);
}

#[test]
fn concurrent_pause_resume_settles_on_last_call() {
    let target = MockTarget::new();
    let engine = Arc::new(engine_with(&target, 2 * MS));
    engine.start().unwrap();

    let togglers: Vec<_> = (0..6)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for n in 0..200 {
                    if (i + n) % 2 == 0 {
                        engine.pause();
                    } else {
                        engine.resume();
                    }
                }
            })
        })
        .collect();
    for t in togglers {
        t.join().unwrap();
    }

    engine.pause();
    assert_eq!(engine.lifecycle(), Lifecycle::Paused);
    engine.resume();
    assert_eq!(engine.lifecycle(), Lifecycle::Running);

    let before = target.renders();
    assert!(wait_until(Duration::from_secs(2), || target.renders() > before));

    engine.stop();
    engine.join().unwrap();
}

// ── panics ────────────────────────────────────────────────────────────────

/// Panics on its second paint.
struct Fuse {
    paints: Cell<u32>,
}

impl Drawable for Fuse {
    fn update(&mut self, _delta_degrees: f32) {}

    fn render(&self, _ctx: &mut dyn DrawContext) -> Result<(), FrameError> {
        self.paints.set(self.paints.get() + 1);
        if self.paints.get() == 2 {
            panic!("fuse blown");
        }
        Ok(())
    }

    fn centroid(&self) -> Vec2 {
        Vec2::zero()
    }
}

#[test]
fn panicking_drawable_still_releases_and_disposes() {
    let target = MockTarget::new();
    let engine = Engine::new(
        EngineConfig::default().tick_interval(2 * MS),
        Arc::clone(&target) as Arc<dyn RenderTarget>,
        |_, _| {
            let mut scene = Scene::new();
            scene.add(Fuse { paints: Cell::new(0) });
            scene
        },
    );

    engine.start().unwrap();
    assert!(matches!(engine.join(), Err(EngineError::LoopPanicked)));
    assert_eq!(target.acquires(), 2);
    assert_eq!(target.releases(), 2);
    assert_eq!(target.disposals(), 1);
    assert!(!engine.is_running());
}
