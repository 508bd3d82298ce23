//! The interactive terminal loop
//!
//! Single-threaded and event-driven: one `tokio::select!` over keyboard
//! events, session events, and a short playback tick. Key map:
//!
//! - `s` start session, `x` stop session
//! - `d` download the transcript (while no session is recording)
//! - digits + Enter toggle playback of that chunk ordinal
//! - `[` / `]` lower/raise the mic threshold, `{` / `}` the speaker threshold
//! - `q`, Esc or Ctrl-C quit

use crate::api::{ApiClient, Chunk};
use crate::config::Config;
use crate::palette::SpeakerPalette;
use crate::playback::{AudioOutput, NullOutput, PlaybackController, RodioOutput, Toggle};
use crate::render;
use crate::session::{ClientSession, SessionEvent};
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const HELP_LINE: &str =
    "keys: s=start  x=stop  d=download  <n>+Enter=play chunk n  [ ]=mic  { }=speaker  q=quit";

/// Run the client until the user quits.
pub async fn run(config: Config) -> Result<()> {
    let api = Arc::new(ApiClient::new(config.server.url.clone()));
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let session = ClientSession::new(
        Arc::clone(&api),
        events_tx,
        Duration::from_millis(config.client.poll_interval_ms),
    );

    // Best-effort: show what the recorder will capture from.
    match api.devices().await {
        Ok(devices) => info!(
            "capture devices: {} microphone(s), {} speaker output(s); default mic: {}",
            devices.microphones.len(),
            devices.speakers.len(),
            devices.default_mic
        ),
        Err(e) => warn!("device query failed: {e:#}"),
    }

    let output: Box<dyn AudioOutput> = match RodioOutput::new() {
        Ok(output) => Box::new(output),
        Err(e) => {
            warn!("audio output unavailable, playback disabled: {e:#}");
            Box::new(NullOutput)
        }
    };

    let mut app = App {
        mic_threshold: config.thresholds.mic,
        speaker_threshold: config.thresholds.speaker,
        config,
        api,
        session,
        palette: SpeakerPalette::new(),
        chunks: Vec::new(),
        playback: PlaybackController::new(output),
        digits: String::new(),
    };

    say(HELP_LINE);

    // Adopt a session that is already recording, page-load style.
    if let Err(e) = app.session.resume().await {
        warn!("status check failed: {e:#}");
    }

    enable_raw_mode().context("failed to enable raw terminal mode")?;
    let result = app.event_loop(&mut events_rx).await;
    disable_raw_mode().ok();

    app.session.dispose().await;

    result
}

struct App {
    config: Config,
    api: Arc<ApiClient>,
    session: ClientSession,
    palette: SpeakerPalette,
    chunks: Vec<Chunk>,
    playback: PlaybackController,

    /// Locally displayed threshold values; forwarded to the service only
    /// while a session is recording.
    mic_threshold: f64,
    speaker_threshold: f64,

    /// Pending ordinal keystrokes, consumed by Enter.
    digits: String,
}

impl App {
    async fn event_loop(
        &mut self,
        events_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Result<()> {
        let mut keys = EventStream::new();
        let mut playback_tick = tokio::time::interval(Duration::from_millis(250));

        loop {
            tokio::select! {
                maybe_key = keys.next() => {
                    match maybe_key {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if self.handle_key(key).await? {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => warn!("terminal event error: {e}"),
                        None => break,
                    }
                }

                Some(event) = events_rx.recv() => {
                    self.handle_session_event(event);
                }

                _ = playback_tick.tick() => {
                    if let Some(ordinal) = self.playback.on_tick() {
                        say(&format!("finished chunk [{ordinal}]"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns true when the user asked to quit.
    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

            KeyCode::Char('s') => {
                if let Err(e) = self.session.start().await {
                    error!("start failed: {e:#}");
                }
            }

            KeyCode::Char('x') => {
                if let Err(e) = self.session.stop().await {
                    error!("stop failed: {e:#}");
                }
            }

            KeyCode::Char('d') => self.download_transcript().await,

            KeyCode::Char(c @ '0'..='9') => {
                self.digits.push(c);
                echo(&c.to_string());
            }

            KeyCode::Backspace => {
                if self.digits.pop().is_some() {
                    echo("\x08 \x08");
                }
            }

            KeyCode::Enter => {
                let buffer = std::mem::take(&mut self.digits);
                if buffer.is_empty() {
                    return Ok(false);
                }
                echo("\r\n");
                match buffer.parse::<usize>() {
                    Ok(ordinal) => self.toggle_playback(ordinal).await,
                    Err(_) => say(&format!("not a chunk number: {buffer}")),
                }
            }

            KeyCode::Char('[') => self.adjust_mic_threshold(-self.config.thresholds.step).await,
            KeyCode::Char(']') => self.adjust_mic_threshold(self.config.thresholds.step).await,
            KeyCode::Char('{') => {
                self.adjust_speaker_threshold(-self.config.thresholds.step).await
            }
            KeyCode::Char('}') => {
                self.adjust_speaker_threshold(self.config.thresholds.step).await
            }

            _ => {}
        }

        Ok(false)
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started { session_id } => {
                // Everything visual starts over with a new session.
                self.palette.reset();
                self.chunks.clear();
                self.playback.reset();

                say(&render::status_line(true));
                say(&format!(
                    "session {} started at {}",
                    session_id,
                    chrono::Local::now().format("%H:%M:%S")
                ));
            }

            SessionEvent::Resumed { session_id } => {
                say(&render::status_line(true));
                say(&format!("resumed active session {session_id}"));
            }

            SessionEvent::Stopped => {
                say(&render::status_line(false));
                say("transcript ready - press d to download");
            }

            SessionEvent::Inactive => {
                say(&render::status_line(false));
            }

            SessionEvent::Chunks(batch) => self.append_chunks(batch),
        }
    }

    fn append_chunks(&mut self, batch: Vec<Chunk>) {
        for chunk in batch {
            let ordinal = self.chunks.len() + 1;
            let (name, color_key) = render::speaker_display(&chunk);
            let color = self.palette.color_for(&color_key);

            say(&render::chunk_block(ordinal, &chunk, &name, color));
            self.chunks.push(chunk);
        }

        let legend = render::legend(&self.palette);
        if !legend.is_empty() {
            say(&legend);
        }
    }

    async fn toggle_playback(&mut self, ordinal: usize) {
        let Some(chunk) = self.chunks.get(ordinal.wrapping_sub(1)) else {
            say(&format!("no chunk [{ordinal}]"));
            return;
        };
        let chunk_id = chunk.chunk_id.clone();

        match self.playback.toggle(ordinal) {
            Toggle::Paused => say(&format!("paused chunk [{ordinal}]")),

            Toggle::Start => match self.api.audio(&chunk_id).await {
                Ok(clip) => match self.playback.begin(ordinal, clip) {
                    Ok(()) => say(&format!("playing chunk [{ordinal}]")),
                    Err(e) => error!("playback failed: {e:#}"),
                },
                Err(e) => {
                    self.playback.fail(ordinal);
                    error!("audio fetch failed: {e:#}");
                }
            },
        }
    }

    async fn download_transcript(&self) {
        // Mirrors the disabled download button: no download mid-session.
        if self.session.is_recording() {
            say("stop the session before downloading the transcript");
            return;
        }

        let path = &self.config.client.transcript_path;
        match self.api.download_transcript(path).await {
            Ok(text) => {
                let filename = Path::new(path)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "transcription.txt".to_string());
                let dest = Path::new(&self.config.client.download_dir).join(filename);

                match std::fs::write(&dest, text) {
                    Ok(()) => say(&format!("transcript saved to {}", dest.display())),
                    Err(e) => error!("failed to write transcript: {e}"),
                }
            }
            Err(e) => error!("transcript download failed: {e:#}"),
        }
    }

    async fn adjust_mic_threshold(&mut self, delta: f64) {
        self.mic_threshold = (self.mic_threshold + delta).max(0.0);
        say(&format!("mic threshold: {:.3}", self.mic_threshold));

        if let Err(e) = self.session.set_mic_threshold(self.mic_threshold).await {
            error!("mic threshold update failed: {e:#}");
        }
    }

    async fn adjust_speaker_threshold(&mut self, delta: f64) {
        self.speaker_threshold = (self.speaker_threshold + delta).max(0.0);
        say(&format!("speaker threshold: {:.3}", self.speaker_threshold));

        if let Err(e) = self
            .session
            .set_speaker_threshold(self.speaker_threshold)
            .await
        {
            error!("speaker threshold update failed: {e:#}");
        }
    }
}

/// Print a (possibly styled, possibly multi-line) block under raw mode, where
/// bare `\n` does not return the carriage.
fn say(text: &str) {
    let mut stdout = std::io::stdout();
    for line in text.lines() {
        let _ = write!(stdout, "{line}\r\n");
    }
    let _ = stdout.flush();
}

/// Echo raw keystroke feedback without a line ending.
fn echo(text: &str) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{text}");
    let _ = stdout.flush();
}
