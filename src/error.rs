//! Crate-level error types.
//!
//! Nothing here is fatal to the render loop: the host logs and keeps
//! drawing whatever state exists, including after every asset load fails.

use std::fmt;

use crate::loader::LoadError;

/// Errors produced by the parawin crate.
#[derive(Debug)]
pub enum ParawinError {
    /// Tracking source failed to start (no camera / permission denied).
    /// Non-fatal: the host keeps the neutral pose.
    Tracking(String),
    /// An asset load failed.
    AssetLoad(LoadError),
    /// Failed to spawn a background loader thread.
    ThreadSpawn(std::io::Error),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ParawinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking(msg) => write!(f, "tracking error: {msg}"),
            Self::AssetLoad(e) => write!(f, "asset load error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ParawinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AssetLoad(e) => Some(e),
            Self::ThreadSpawn(e) | Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadError> for ParawinError {
    fn from(e: LoadError) -> Self {
        Self::AssetLoad(e)
    }
}

impl From<std::io::Error> for ParawinError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
