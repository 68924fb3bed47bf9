//! Head-tracking source seam.
//!
//! The real estimator (webcam face tracking) is an external collaborator;
//! hosts implement [`TrackingSource`] around it. Samples arrive over a
//! channel and are drained once per tick — the mapper is applied to every
//! delivered sample in order, and the last one wins for that frame.
//! Failure to start is non-fatal: the host keeps the neutral pose.

use std::sync::mpsc;
use std::time::Duration;

use rand::Rng;
use web_time::Instant;

use crate::camera::TrackingSample;
use crate::error::ParawinError;

/// Receiving end of a tracking sample stream.
pub struct TrackingFeed {
    rx: mpsc::Receiver<TrackingSample>,
}

impl TrackingFeed {
    /// Wrap an existing receiver (for hosts that run their own estimator
    /// thread).
    #[must_use]
    pub const fn new(rx: mpsc::Receiver<TrackingSample>) -> Self {
        Self { rx }
    }

    /// A connected sender/feed pair.
    #[must_use]
    pub fn channel() -> (mpsc::Sender<TrackingSample>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }

    /// All samples delivered since the last drain, in arrival order.
    /// Never blocks.
    pub fn drain(&mut self) -> impl Iterator<Item = TrackingSample> + '_ {
        self.rx.try_iter()
    }
}

/// Something that can start producing tracking samples.
pub trait TrackingSource {
    /// Start the source. Rejects with [`ParawinError::Tracking`] when no
    /// capture device is available or permission is denied; the host must
    /// treat that as camera-tracking disabled, not a failure.
    fn start(&mut self) -> Result<TrackingFeed, ParawinError>;
}

/// Synthetic head path for the demo driver and tests: a slow lateral
/// figure-sweep with optional per-sample jitter, standing in for a real
/// face-tracking estimator.
#[derive(Debug, Clone)]
pub struct ScriptedTrackingSource {
    /// Duration of one full sweep.
    pub period: Duration,
    /// Peak normalized excursion (kept within the nominal [-1, 1]).
    pub amplitude: f32,
    /// Uniform per-sample noise amplitude (0 disables).
    pub jitter: f32,
    /// Delay between emitted samples.
    pub interval: Duration,
}

impl Default for ScriptedTrackingSource {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(4),
            amplitude: 0.8,
            jitter: 0.0,
            interval: Duration::from_millis(16),
        }
    }
}

impl ScriptedTrackingSource {
    fn jittered(&self, value: f32, rng: &mut impl Rng) -> f32 {
        if self.jitter > 0.0 {
            value + rng.random_range(-1.0f32..1.0) * self.jitter
        } else {
            value
        }
    }

    fn sample_at(&self, elapsed: f32, rng: &mut impl Rng) -> TrackingSample {
        let phase =
            elapsed / self.period.as_secs_f32() * std::f32::consts::TAU;
        TrackingSample {
            x: self.jittered(phase.sin() * self.amplitude, rng),
            y: self.jittered((phase * 0.5).cos() * self.amplitude * 0.5, rng),
            z: self
                .jittered((phase * 0.25).sin() * self.amplitude * 0.25, rng),
        }
    }
}

impl TrackingSource for ScriptedTrackingSource {
    fn start(&mut self) -> Result<TrackingFeed, ParawinError> {
        let (tx, feed) = TrackingFeed::channel();
        let script = self.clone();
        let builder =
            std::thread::Builder::new().name("tracking-source".into());
        let _handle = builder
            .spawn(move || {
                let start = Instant::now();
                let mut rng = rand::rng();
                loop {
                    let sample = script
                        .sample_at(start.elapsed().as_secs_f32(), &mut rng);
                    // Stops once the host drops the feed
                    if tx.send(sample).is_err() {
                        break;
                    }
                    std::thread::sleep(script.interval);
                }
            })
            .map_err(ParawinError::ThreadSpawn)?;
        Ok(feed)
    }
}
