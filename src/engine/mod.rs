//! The host application context: one owned struct instead of the global
//! scene/camera singletons a quick demo would reach for.
//!
//! [`ViewerEngine`] owns the scene, the camera and its neutral baseline,
//! the load sequencer, and the tracking feed. The render loop calls
//! [`ViewerEngine::tick`] once per display tick and then
//! [`ViewerEngine::render`]; each tick finishes all camera/scene writes
//! before the uniform snapshot is rebuilt, so the surface never observes a
//! half-applied update. Everything runs on the host's single logical
//! thread — background loader/tracker threads only ever hand results over
//! channels drained here.

use glam::Vec3;
use web_time::Instant;

use crate::camera::{
    fit_camera, map_sample, Camera, CameraUniform, FitOutcome, LookAtPolicy,
    NeutralPose,
};
use crate::error::ParawinError;
use crate::loader::{AssetSource, LoadSequencer, LoadState, SequencerEvent};
use crate::options::Options;
use crate::scene::{Scene, SceneNode};
use crate::tracking::{TrackingFeed, TrackingSource};

/// Consumes the scene and camera snapshot once per tick and produces a
/// drawn frame. The actual GPU/WebGL renderer lives behind this seam.
pub trait RenderSurface {
    /// Draw one frame.
    fn draw(&mut self, scene: &Scene, camera: &CameraUniform);
}

/// The viewer host context.
pub struct ViewerEngine {
    scene: Scene,
    camera: Camera,
    uniform: CameraUniform,
    neutral: NeutralPose,
    options: Options,
    sequencer: Option<LoadSequencer>,
    tracking: Option<TrackingFeed>,
    /// Subject center from the last successful fit.
    fitted_center: Option<Vec3>,
    /// Pending best-effort fit for a streaming subject.
    settle_deadline: Option<Instant>,
    fits_applied: u32,
    placeholders_removed: usize,
    torn_down: bool,
}

impl ViewerEngine {
    /// Engine with an empty scene and the camera at the neutral pose.
    #[must_use]
    pub fn new(options: Options, aspect: f32) -> Self {
        let neutral = options.camera.neutral_pose();
        let camera = Camera {
            eye: neutral.position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: neutral.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
        };
        let mut uniform = CameraUniform::new();
        uniform.update(&camera);

        Self {
            scene: Scene::new(),
            camera,
            uniform,
            neutral,
            options,
            sequencer: None,
            tracking: None,
            fitted_center: None,
            settle_deadline: None,
            fits_applied: 0,
            placeholders_removed: 0,
            torn_down: false,
        }
    }

    // -- Startup wiring --

    /// Kick off the primary/fallback subject load.
    ///
    /// # Errors
    ///
    /// Returns [`ParawinError::ThreadSpawn`] if the loader thread cannot
    /// be created.
    pub fn begin_loading(
        &mut self,
        primary: AssetSource,
        fallback: AssetSource,
    ) -> Result<(), ParawinError> {
        let mut sequencer = LoadSequencer::new(primary, fallback);
        sequencer.begin()?;
        self.sequencer = Some(sequencer);
        Ok(())
    }

    /// Start the tracking source. Failure is non-fatal: a warning is
    /// logged and the camera keeps the neutral pose.
    pub fn start_tracking(&mut self, source: &mut dyn TrackingSource) {
        match source.start() {
            Ok(feed) => self.tracking = Some(feed),
            Err(e) => {
                log::warn!("tracking unavailable ({e}); keeping neutral pose");
            }
        }
    }

    // -- Per-tick update --

    /// One cooperative update: drain tracking samples, poll the loader,
    /// run any due settle-delayed fit, and rebuild the camera snapshot.
    /// After [`ViewerEngine::teardown`] this is a no-op.
    pub fn tick(&mut self) {
        if self.torn_down {
            return;
        }
        self.drain_tracking();
        self.poll_sequencer();
        self.check_settle();
        self.uniform.update(&self.camera);
    }

    /// Hand the current scene and camera snapshot to the surface.
    pub fn render(&mut self, surface: &mut impl RenderSurface) {
        surface.draw(&self.scene, &self.uniform);
        self.scene.mark_rendered();
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.torn_down || height == 0 {
            return;
        }
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Tear the host down. Pending loads and an armed settle timer may
    /// still resolve afterwards; their results are discarded without
    /// touching the scene or camera.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.tracking = None;
        self.sequencer = None;
        self.settle_deadline = None;
        log::debug!("engine torn down");
    }

    fn drain_tracking(&mut self) {
        let Some(feed) = self.tracking.as_mut() else {
            return;
        };
        let params = self.options.parallax.params();
        let target = match self.options.parallax.look_at {
            LookAtPolicy::Origin => Vec3::ZERO,
            LookAtPolicy::FittedCenter => {
                self.fitted_center.unwrap_or(Vec3::ZERO)
            }
        };
        // Every delivered sample is mapped in order; each fully replaces
        // the previous offset, so the last one wins for this frame.
        for sample in feed.drain() {
            let pose = map_sample(sample, &self.neutral, &params);
            self.camera.eye = pose.eye;
            self.camera.fovy = pose.fovy;
            self.camera.target = target;
        }
    }

    fn poll_sequencer(&mut self) {
        let Some(sequencer) = self.sequencer.as_mut() else {
            return;
        };
        let mut events = Vec::new();
        while let Some(event) = sequencer.poll() {
            events.push(event);
        }
        for event in events {
            self.apply_sequencer_event(event);
        }
    }

    fn apply_sequencer_event(&mut self, event: SequencerEvent) {
        match event {
            SequencerEvent::SubjectLoaded(mut node) => {
                self.options.assets.place_subject(&mut node);
                self.placeholders_removed += self.scene.remove_placeholders();
                let streaming = node.streaming;
                let _ = self.scene.set_subject(node);
                if streaming {
                    // No completion signal from a streaming decoder; fit
                    // after a fixed settling delay, best-effort.
                    self.settle_deadline = Some(
                        Instant::now() + self.options.fit.settle_delay(),
                    );
                } else {
                    self.fit_now();
                }
            }
            SequencerEvent::PrimaryFailed(e) => {
                log::info!("falling back to mesh subject: {e}");
            }
            SequencerEvent::Exhausted(e) => {
                log::info!("no subject asset available: {e}");
            }
        }
    }

    fn check_settle(&mut self) {
        if let Some(deadline) = self.settle_deadline {
            if Instant::now() >= deadline {
                self.settle_deadline = None;
                self.fit_now();
            }
        }
    }

    fn fit_now(&mut self) {
        let bounds = self.scene.world_bounds();
        match fit_camera(&bounds, &self.options.fit.params(), &mut self.camera)
        {
            FitOutcome::Fitted { center, distance } => {
                self.fitted_center = Some(center);
                self.fits_applied += 1;
                log::info!(
                    "auto-fit camera: center {center}, distance {distance:.2}"
                );
            }
            FitOutcome::NothingToFit => {
                log::debug!("fit skipped: no usable geometry bounds");
            }
        }
    }

    // -- Accessors --

    /// Current camera state.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Latest per-tick camera snapshot.
    #[must_use]
    pub const fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    /// Read access to the scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Insert a placeholder (or any other) node before loading finishes.
    pub fn add_node(&mut self, node: SceneNode) -> u32 {
        self.scene.add_node(node)
    }

    /// Sequencer state, or `Idle` when loading was never started.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.sequencer
            .as_ref()
            .map_or(LoadState::Idle, LoadSequencer::state)
    }

    /// Subject center from the last successful fit.
    #[must_use]
    pub const fn fitted_center(&self) -> Option<Vec3> {
        self.fitted_center
    }

    /// How many camera fits have been applied.
    #[must_use]
    pub const fn fits_applied(&self) -> u32 {
        self.fits_applied
    }

    /// How many placeholder nodes have been removed.
    #[must_use]
    pub const fn placeholders_removed(&self) -> usize {
        self.placeholders_removed
    }

    /// Whether tracking samples are being consumed.
    #[must_use]
    pub const fn tracking_active(&self) -> bool {
        self.tracking.is_some()
    }

    /// Whether the host has been torn down.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }
}
