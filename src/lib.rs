// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Head-tracked parallax viewer core.
//!
//! Parawin implements the logic behind a "window" illusion viewer: a
//! webcam-derived head position steers a virtual camera around a Gaussian
//! splat (or fallback mesh) so the scene appears to sit behind the screen.
//! The GPU renderer, splat/mesh decoders, and face-tracking estimator are
//! external collaborators plugged in behind traits.
//!
//! # Key entry points
//!
//! - [`engine::ViewerEngine`] - the host context driving everything per
//!   tick
//! - [`camera::fit_camera`] - bounding-box camera auto-fit
//! - [`camera::map_sample`] - the pure parallax mapping
//! - [`loader::LoadSequencer`] - splat-then-mesh fallback sequencing
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Asset loads run on background threads and hand finished nodes back
//! over channels; tracking samples arrive the same way. The host's render
//! loop calls [`engine::ViewerEngine::tick`] once per display tick, which
//! drains both producers, applies any due camera fit, and rebuilds the
//! camera snapshot — so the render surface always sees a fully-applied
//! camera state, and no load or tracking failure ever stops the loop.

pub mod camera;
pub mod engine;
pub mod error;
pub mod loader;
pub mod options;
pub mod scene;
pub mod tracking;
