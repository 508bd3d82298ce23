//! REST client for the transcription service
//!
//! The service owns recording, diarization, and transcription; this module is
//! the wire to it:
//! - POST /api/start, /api/stop - session control
//! - GET /api/status - adopt an already-active session at startup
//! - GET /api/chunks?last_chunk_id= - incremental transcript fetch
//! - GET /api/audio/:chunk_id - per-chunk WAV clip
//! - POST /api/set_mic_threshold, /api/set_speaker_threshold
//! - GET /api/devices, GET /download/:path

mod client;
mod types;

pub use client::ApiClient;
pub use types::{
    Chunk, ChunksResponse, Device, DeviceList, StartResponse, StatusResponse, StopResponse,
    ThresholdRequest, ThresholdResponse,
};
