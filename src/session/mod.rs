//! Client session lifecycle and chunk polling
//!
//! This module provides the `ClientSession` abstraction that manages:
//! - Session start/stop/resume against the transcription service
//! - The fixed-interval chunk polling loop
//! - Last-seen chunk id tracking for incremental fetches
//! - Threshold forwarding while a session is active
//! - Event delivery to the UI

mod client;
mod events;

pub use client::ClientSession;
pub use events::SessionEvent;
