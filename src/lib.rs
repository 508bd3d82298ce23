pub mod api;
pub mod app;
pub mod config;
pub mod palette;
pub mod playback;
pub mod render;
pub mod session;

pub use api::{ApiClient, Chunk, ChunksResponse, StartResponse, StatusResponse, StopResponse};
pub use config::Config;
pub use palette::{SpeakerColor, SpeakerPalette, PALETTE};
pub use playback::{AudioOutput, NullOutput, PlaybackController, RodioOutput, Toggle};
pub use session::{ClientSession, SessionEvent};
