//! Asset loading seam: loader trait, background load tasks, and the
//! primary/fallback sequencer.
//!
//! Actual decoding (splat PLY, glTF meshes) lives in external libraries;
//! this module only defines the contract and runs loads off the host
//! thread so a slow or missing asset never stalls the render loop.

pub mod sequencer;

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::{fmt, io};

pub use sequencer::{LoadSequencer, LoadState, SequencerEvent};

use crate::scene::{Aabb, NodeKind, SceneNode};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load failed. The sequencer does not branch on the cause — any
/// failure triggers the same fallback path — but the cause is kept for
/// logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Asset file does not exist.
    NotFound(PathBuf),
    /// File exists but its format is not handled by this loader.
    Unsupported(String),
    /// Decoder rejected the file contents.
    Decode(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "asset not found: {}", path.display())
            }
            Self::Unsupported(msg) => {
                write!(f, "unsupported asset format: {msg}")
            }
            Self::Decode(msg) => write!(f, "asset decode error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

// ---------------------------------------------------------------------------
// Loader trait and background task
// ---------------------------------------------------------------------------

/// A blocking asset loader. Runs on a background thread via [`AssetTask`].
pub trait AssetLoader: Send {
    /// Load the asset at `path` into a scene node, or fail with an opaque
    /// load error.
    fn load(&self, path: &Path) -> Result<SceneNode, LoadError>;
}

/// One asset to load: the loader that understands it plus its path.
pub struct AssetSource {
    /// Loader implementation.
    pub loader: Box<dyn AssetLoader>,
    /// Asset file path.
    pub path: PathBuf,
}

impl AssetSource {
    /// Pair a loader with a path.
    #[must_use]
    pub fn new(loader: Box<dyn AssetLoader>, path: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            path: path.into(),
        }
    }
}

/// A one-shot background load, polled non-blockingly.
///
/// Dropping the task abandons it: the thread finishes on its own and its
/// result send lands in a closed channel, so a load that resolves after
/// host teardown mutates nothing.
pub struct AssetTask {
    result_rx: mpsc::Receiver<Result<SceneNode, LoadError>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl AssetTask {
    /// Spawn the load on a named background thread.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] if the background thread fails to spawn.
    pub fn spawn(source: AssetSource) -> Result<Self, io::Error> {
        let (result_tx, result_rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                let result = source.loader.load(&source.path);
                // Receiver may be gone after teardown; that is fine
                let _ = result_tx.send(result);
            })?;
        Ok(Self {
            result_rx,
            thread: Some(thread),
        })
    }

    /// Non-blocking check for the load result. Returns `Some` exactly once.
    pub fn try_result(&mut self) -> Option<Result<SceneNode, LoadError>> {
        // Taken thread handle marks the result as already delivered
        if self.thread.is_none() {
            return None;
        }
        let result = match self.result_rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return None,
            // The loader panicked: its thread unwound without sending,
            // closing the channel. Surface that as a load failure so the
            // caller can fall back instead of polling forever.
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(LoadError::Decode("loader thread terminated".into()))
            }
        };
        if let Some(handle) = self.thread.take() {
            // Thread already sent or died, so this returns promptly
            let _ = handle.join();
        }
        Some(result)
    }
}

// ---------------------------------------------------------------------------
// File-probe loader (demo stand-in)
// ---------------------------------------------------------------------------

/// Stand-in loader for the demo driver and tests: checks that the file
/// exists and carries the expected extension, then emits a node with
/// nominal unit bounds instead of decoded geometry. Real hosts plug in a
/// splat/glTF decoder behind [`AssetLoader`] instead.
pub struct FileProbeLoader {
    kind: NodeKind,
    extension: &'static str,
}

impl FileProbeLoader {
    /// Probe for a splat point-cloud file (`.ply`). Splat decoders stream
    /// geometry in after resolving, so the node is marked streaming.
    #[must_use]
    pub const fn splat() -> Self {
        Self {
            kind: NodeKind::Splat,
            extension: "ply",
        }
    }

    /// Probe for a mesh file (`.glb`).
    #[must_use]
    pub const fn mesh() -> Self {
        Self {
            kind: NodeKind::Mesh,
            extension: "glb",
        }
    }
}

impl AssetLoader for FileProbeLoader {
    fn load(&self, path: &Path) -> Result<SceneNode, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case(self.extension) {
            return Err(LoadError::Unsupported(format!(
                "expected .{}, got {}",
                self.extension,
                path.display()
            )));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("subject")
            .to_owned();
        let mut node = SceneNode::new(name, self.kind);
        node.local_bounds = Aabb::centered_cube(glam::Vec3::ZERO, 0.5);
        node.streaming = self.kind == NodeKind::Splat;
        Ok(node)
    }
}
