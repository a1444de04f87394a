//! ipm-frames: reference-frame transforms for the motor plant.
//!
//! Contains:
//! - frames (three-phase / alpha-beta / dq types + Clarke and Park transforms)
//! - angle (cyclic position wrapping helpers)
//! - numeric (Real + tolerances + float comparison helpers)

pub mod angle;
pub mod frames;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use angle::*;
pub use frames::*;
pub use numeric::*;
