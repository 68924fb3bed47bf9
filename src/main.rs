//! Headless demo driver: scripted head tracking, file-probe loaders, and a
//! logging render surface in place of a real GPU renderer.

use std::time::Duration;

use parawin::camera::CameraUniform;
use parawin::engine::{RenderSurface, ViewerEngine};
use parawin::loader::{AssetSource, FileProbeLoader};
use parawin::options::Options;
use parawin::scene::{NodeKind, Scene, SceneNode};
use parawin::tracking::ScriptedTrackingSource;

/// Logs the camera pose instead of drawing.
struct LogSurface {
    frame: u64,
}

impl RenderSurface for LogSurface {
    fn draw(&mut self, scene: &Scene, camera: &CameraUniform) {
        if self.frame % 30 == 0 {
            log::info!(
                "frame {}: {} nodes, eye [{:.2}, {:.2}, {:.2}], fovy {:.1}",
                self.frame,
                scene.node_count(),
                camera.eye[0],
                camera.eye[1],
                camera.eye[2],
                camera.fovy,
            );
        }
        self.frame += 1;
    }
}

fn main() {
    env_logger::init();

    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    if let Some(primary) = args.next() {
        options.assets.primary = primary;
    }
    if let Some(fallback) = args.next() {
        options.assets.fallback = fallback;
    }

    let mut engine = ViewerEngine::new(options.clone(), 16.0 / 9.0);
    let _ = engine.add_node(SceneNode::new("grid", NodeKind::Placeholder));

    let primary = AssetSource::new(
        Box::new(FileProbeLoader::splat()),
        options.assets.primary.clone(),
    );
    let fallback = AssetSource::new(
        Box::new(FileProbeLoader::mesh()),
        options.assets.fallback.clone(),
    );
    if let Err(e) = engine.begin_loading(primary, fallback) {
        log::error!("could not start asset loading: {e}");
        std::process::exit(1);
    }

    let mut tracker = ScriptedTrackingSource {
        jitter: 0.02,
        ..ScriptedTrackingSource::default()
    };
    engine.start_tracking(&mut tracker);

    let mut surface = LogSurface { frame: 0 };
    for _ in 0..300 {
        engine.tick();
        engine.render(&mut surface);
        std::thread::sleep(Duration::from_millis(16));
    }

    log::info!(
        "demo finished: load state {:?}, {} fit(s) applied",
        engine.load_state(),
        engine.fits_applied(),
    );
    engine.teardown();
}
