use super::output::AudioOutput;
use anyhow::Result;
use tracing::debug;

/// What a toggle resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The chunk was playing; it is now paused and the cursor is cleared.
    Paused,
    /// The chunk became the current target; the caller fetches its clip and
    /// hands it to [`PlaybackController::begin`] (or calls
    /// [`PlaybackController::fail`] if the fetch dies).
    Start,
}

/// Enforces the one-clip-at-a-time rule over the shared audio output.
///
/// The cursor holds the ordinal of the chunk whose clip is active; it is the
/// single record of what is playing. Toggling the current chunk pauses it and
/// clears the cursor, so toggling it again replays from the top, exactly like
/// the original play buttons.
pub struct PlaybackController {
    output: Box<dyn AudioOutput>,
    current: Option<usize>,

    /// True between a `Start` toggle and the matching `begin`/`fail`. Keeps a
    /// tick that lands in that window from misreading the silent output as
    /// end-of-playback.
    pending: bool,
}

impl PlaybackController {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            current: None,
            pending: false,
        }
    }

    /// Ordinal of the chunk currently playing, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Toggle playback for the chunk at `ordinal`.
    pub fn toggle(&mut self, ordinal: usize) -> Toggle {
        if self.current == Some(ordinal) && !self.output.is_idle() {
            self.output.pause();
            self.current = None;
            return Toggle::Paused;
        }

        // Switching targets tears down the previous clip before the new one
        // is even fetched.
        self.output.stop();
        self.current = Some(ordinal);
        self.pending = true;

        Toggle::Start
    }

    /// Feed the fetched clip to the output. A failed play reverts the cursor,
    /// matching a rejected play request in the original.
    pub fn begin(&mut self, ordinal: usize, clip: Vec<u8>) -> Result<()> {
        self.pending = false;

        match self.output.play(clip) {
            Ok(()) => Ok(()),
            Err(e) => {
                if self.current == Some(ordinal) {
                    self.current = None;
                }
                Err(e)
            }
        }
    }

    /// The clip fetch failed before reaching the output; revert the cursor.
    pub fn fail(&mut self, ordinal: usize) {
        self.pending = false;
        if self.current == Some(ordinal) {
            self.current = None;
            debug!("playback of chunk {} abandoned", ordinal);
        }
    }

    /// Stop the output and clear the cursor. Used when the chunk list is
    /// cleared for a new session, since ordinals restart with it.
    pub fn reset(&mut self) {
        self.output.stop();
        self.current = None;
        self.pending = false;
    }

    /// Poll for natural end-of-playback. Returns the ordinal whose clip just
    /// finished, with the cursor cleared.
    pub fn on_tick(&mut self) -> Option<usize> {
        if self.pending {
            return None;
        }

        if let Some(ordinal) = self.current {
            if self.output.is_idle() {
                self.current = None;
                return Some(ordinal);
            }
        }

        None
    }
}
