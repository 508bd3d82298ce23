use anyhow::{anyhow, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;

/// The shared audio output behind the playback controller.
///
/// Exactly one clip is loaded at a time; `play` replaces whatever was there.
/// The production implementation is [`RodioOutput`]; tests drive the
/// controller with a scripted fake.
pub trait AudioOutput {
    /// Load `clip` (encoded WAV bytes) and start playing from the top,
    /// replacing any current clip.
    fn play(&mut self, clip: Vec<u8>) -> Result<()>;

    /// Pause the current clip in place.
    fn pause(&mut self);

    /// Drop the current clip entirely.
    fn stop(&mut self);

    /// True when nothing is loaded or the loaded clip has run out.
    fn is_idle(&self) -> bool;
}

/// Rodio-backed output: one `OutputStream` for the process, one `Sink` per
/// played clip. Dropping the sink is what stops a superseded clip.
pub struct RodioOutput {
    // The stream must stay alive for the sink to produce sound.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioOutput {
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| anyhow!("no audio output device: {e}"))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

/// Stand-in for terminals with no audio device. Every play attempt fails,
/// which the controller reports as a rejected play; the rest of the client
/// works normally.
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn play(&mut self, _clip: Vec<u8>) -> Result<()> {
        Err(anyhow!("audio output unavailable"))
    }

    fn pause(&mut self) {}

    fn stop(&mut self) {}

    fn is_idle(&self) -> bool {
        true
    }
}

impl AudioOutput for RodioOutput {
    fn play(&mut self, clip: Vec<u8>) -> Result<()> {
        self.sink = None;

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| anyhow!("failed to open audio sink: {e}"))?;
        let source = Decoder::new(Cursor::new(clip))
            .map_err(|e| anyhow!("failed to decode audio clip: {e}"))?;

        sink.append(source);
        sink.play();
        self.sink = Some(sink);

        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        self.sink = None;
    }

    fn is_idle(&self) -> bool {
        self.sink.as_ref().map(|sink| sink.empty()).unwrap_or(true)
    }
}
