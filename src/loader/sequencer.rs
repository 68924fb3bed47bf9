//! Load-and-fallback sequencing.
//!
//! Tries the preferred subject representation first (a splat point cloud),
//! falls back to a mesh on any failure, and gives up after that. The state
//! machine is explicit so the host applies side effects (placeholder
//! removal, camera fit) exactly once per outcome instead of burying them
//! in nested callbacks.

use super::{AssetSource, AssetTask, LoadError};
use crate::error::ParawinError;
use crate::scene::SceneNode;

/// Sequencer states. `PrimaryLoaded`, `FallbackLoaded`, and
/// `NoAssetAvailable` are terminal — no transitions leave them, and the
/// primary is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Not started yet.
    Idle,
    /// Primary (splat) load in flight.
    LoadingPrimary,
    /// Primary failed; fallback (mesh) load in flight.
    LoadingFallback,
    /// Primary resolved.
    PrimaryLoaded,
    /// Fallback resolved.
    FallbackLoaded,
    /// Both loads failed; the scene keeps whatever it already shows.
    NoAssetAvailable,
}

impl LoadState {
    /// Whether the sequencer has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::PrimaryLoaded | Self::FallbackLoaded | Self::NoAssetAvailable
        )
    }
}

/// What the host must react to after a [`LoadSequencer::poll`].
#[derive(Debug)]
pub enum SequencerEvent {
    /// A subject node arrived (from either stage; check
    /// [`LoadSequencer::state`] for which). Remove placeholders and
    /// schedule the camera fit — once.
    SubjectLoaded(SceneNode),
    /// Primary failed; the fallback load is already in flight.
    /// Informational, not an error.
    PrimaryFailed(LoadError),
    /// Fallback failed too. Terminal; the placeholder (if any) stays.
    Exhausted(LoadError),
}

/// Drives one primary load and at most one fallback load to completion.
pub struct LoadSequencer {
    state: LoadState,
    pending_source: Option<AssetSource>,
    pending: Option<AssetTask>,
    fallback: Option<AssetSource>,
}

impl LoadSequencer {
    /// Sequencer holding both sources, not yet started.
    #[must_use]
    pub fn new(primary: AssetSource, fallback: AssetSource) -> Self {
        Self {
            state: LoadState::Idle,
            pending_source: Some(primary),
            pending: None,
            fallback: Some(fallback),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Kick off the primary load. Call once at application start.
    ///
    /// # Errors
    ///
    /// Returns [`ParawinError::ThreadSpawn`] if the loader thread cannot be
    /// created.
    pub fn begin(&mut self) -> Result<(), ParawinError> {
        debug_assert_eq!(self.state, LoadState::Idle);
        if let Some(source) = self.pending_source.take() {
            log::info!(
                "loading primary subject from {}",
                source.path.display()
            );
            self.pending = Some(
                AssetTask::spawn(source).map_err(ParawinError::ThreadSpawn)?,
            );
            self.state = LoadState::LoadingPrimary;
        }
        Ok(())
    }

    /// Non-blocking progress check. Returns at most one event per call;
    /// returns `None` while a load is still in flight or after a terminal
    /// state is reached.
    pub fn poll(&mut self) -> Option<SequencerEvent> {
        let result = self.pending.as_mut()?.try_result()?;
        self.pending = None;

        match (self.state, result) {
            (LoadState::LoadingPrimary, Ok(node)) => {
                log::info!("primary subject '{}' loaded", node.name);
                self.state = LoadState::PrimaryLoaded;
                Some(SequencerEvent::SubjectLoaded(node))
            }
            (LoadState::LoadingPrimary, Err(e)) => {
                log::info!("primary load failed ({e}), trying fallback");
                self.start_fallback(e)
            }
            (LoadState::LoadingFallback, Ok(node)) => {
                log::info!("fallback subject '{}' loaded", node.name);
                self.state = LoadState::FallbackLoaded;
                Some(SequencerEvent::SubjectLoaded(node))
            }
            (LoadState::LoadingFallback, Err(e)) => {
                log::info!("fallback load failed ({e}); no asset available");
                self.state = LoadState::NoAssetAvailable;
                Some(SequencerEvent::Exhausted(e))
            }
            // Terminal and idle states never have a pending task
            _ => None,
        }
    }

    fn start_fallback(
        &mut self,
        primary_error: LoadError,
    ) -> Option<SequencerEvent> {
        let Some(source) = self.fallback.take() else {
            self.state = LoadState::NoAssetAvailable;
            return Some(SequencerEvent::Exhausted(primary_error));
        };
        match AssetTask::spawn(source) {
            Ok(task) => {
                self.pending = Some(task);
                self.state = LoadState::LoadingFallback;
                Some(SequencerEvent::PrimaryFailed(primary_error))
            }
            Err(e) => {
                log::warn!("could not spawn fallback loader: {e}");
                self.state = LoadState::NoAssetAvailable;
                Some(SequencerEvent::Exhausted(primary_error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use super::*;
    use crate::loader::AssetLoader;
    use crate::scene::{NodeKind, SceneNode};

    struct Stub(Result<NodeKind, ()>);

    impl AssetLoader for Stub {
        fn load(&self, _: &Path) -> Result<SceneNode, LoadError> {
            match self.0 {
                Ok(kind) => Ok(SceneNode::new("stub", kind)),
                Err(()) => {
                    Err(LoadError::NotFound(PathBuf::from("missing")))
                }
            }
        }
    }

    fn source(result: Result<NodeKind, ()>) -> AssetSource {
        AssetSource::new(Box::new(Stub(result)), "stub")
    }

    fn drive_to_terminal(seq: &mut LoadSequencer) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        for _ in 0..400 {
            if let Some(event) = seq.poll() {
                events.push(event);
            }
            if seq.state().is_terminal() {
                return events;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("sequencer never reached a terminal state");
    }

    #[test]
    fn primary_success_is_terminal() {
        let mut seq = LoadSequencer::new(
            source(Ok(NodeKind::Splat)),
            source(Ok(NodeKind::Mesh)),
        );
        assert_eq!(seq.state(), LoadState::Idle);
        seq.begin().unwrap();
        assert_eq!(seq.state(), LoadState::LoadingPrimary);

        let events = drive_to_terminal(&mut seq);
        assert_eq!(seq.state(), LoadState::PrimaryLoaded);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            SequencerEvent::SubjectLoaded(n) if n.kind == NodeKind::Splat
        ));
        // Terminal: further polls yield nothing
        assert!(seq.poll().is_none());
    }

    #[test]
    fn primary_failure_falls_back_once() {
        let mut seq = LoadSequencer::new(
            source(Err(())),
            source(Ok(NodeKind::Mesh)),
        );
        seq.begin().unwrap();

        let events = drive_to_terminal(&mut seq);
        assert_eq!(seq.state(), LoadState::FallbackLoaded);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], SequencerEvent::PrimaryFailed(_)));
        assert!(matches!(
            &events[1],
            SequencerEvent::SubjectLoaded(n) if n.kind == NodeKind::Mesh
        ));
    }

    #[test]
    fn panicking_primary_still_falls_back() {
        struct Panicking;
        impl AssetLoader for Panicking {
            fn load(&self, _: &Path) -> Result<SceneNode, LoadError> {
                panic!("decoder blew up");
            }
        }

        let mut seq = LoadSequencer::new(
            AssetSource::new(Box::new(Panicking), "stub"),
            source(Ok(NodeKind::Mesh)),
        );
        seq.begin().unwrap();

        let events = drive_to_terminal(&mut seq);
        assert_eq!(seq.state(), LoadState::FallbackLoaded);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], SequencerEvent::PrimaryFailed(_)));
        assert!(matches!(
            &events[1],
            SequencerEvent::SubjectLoaded(n) if n.kind == NodeKind::Mesh
        ));
    }

    #[test]
    fn both_failures_exhaust_without_retry() {
        let mut seq =
            LoadSequencer::new(source(Err(())), source(Err(())));
        seq.begin().unwrap();

        let events = drive_to_terminal(&mut seq);
        assert_eq!(seq.state(), LoadState::NoAssetAvailable);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], SequencerEvent::PrimaryFailed(_)));
        assert!(matches!(&events[1], SequencerEvent::Exhausted(_)));
        assert!(seq.poll().is_none());
    }
}
