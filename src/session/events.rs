use crate::api::Chunk;

/// Events delivered from the session to the UI over an unbounded channel.
///
/// The UI owns everything visual (rendered chunks, the speaker color map, the
/// playback cursor); these events are the only way session state reaches it.
#[derive(Debug)]
pub enum SessionEvent {
    /// A new session started. The UI clears rendered chunks and resets the
    /// speaker color map, keeping only "You".
    Started { session_id: String },

    /// The service reported an already-active session at startup. Nothing is
    /// cleared; polling resumes against the existing session.
    Resumed { session_id: String },

    /// The session stopped; the transcript file is ready to download.
    Stopped,

    /// Startup status query found no active session.
    Inactive,

    /// A non-empty batch of new chunks, in arrival order.
    Chunks(Vec<Chunk>),
}
