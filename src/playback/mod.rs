//! Per-chunk audio playback over a single shared output
//!
//! At most one chunk's clip is ever active. The controller owns the playback
//! cursor and the toggle/teardown rules; the `AudioOutput` trait keeps the
//! rodio device behind a seam so tests can script it.

mod controller;
mod output;

pub use controller::{PlaybackController, Toggle};
pub use output::{AudioOutput, NullOutput, RodioOutput};
