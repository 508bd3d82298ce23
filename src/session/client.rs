use super::events::SessionEvent;
use crate::api::ApiClient;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// A client-side recording session: start/stop calls against the service plus
/// the fixed-interval polling loop that pulls new transcript chunks.
///
/// This object owns all the session state the original page kept in globals:
/// the session id, the recording flag, the poll task handle, the poll
/// generation, and the last-seen chunk id. Lifecycle is `new` -> `start` /
/// `resume` -> `stop` -> `dispose`; every transition and chunk batch is
/// reported through the event channel handed to `new`.
pub struct ClientSession {
    api: Arc<ApiClient>,

    /// Event channel to the UI.
    events: mpsc::UnboundedSender<SessionEvent>,

    /// Period of the chunk polling loop.
    poll_interval: Duration,

    /// Whether a session is currently recording.
    recording: Arc<AtomicBool>,

    /// Server-issued session id, present while recording.
    session_id: Arc<Mutex<Option<String>>>,

    /// Identifier of the newest chunk seen so far. Deliberately never reset:
    /// the original client keeps it for the lifetime of the page, across
    /// start/stop cycles.
    last_chunk_id: Arc<Mutex<Option<String>>>,

    /// Bumped on every polling start/stop. A fetch that completes under a
    /// stale generation discards its batch instead of appending chunks from a
    /// superseded session.
    poll_generation: Arc<AtomicU64>,

    /// Handle for the polling task.
    poll_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ClientSession {
    pub fn new(
        api: Arc<ApiClient>,
        events: mpsc::UnboundedSender<SessionEvent>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            events,
            poll_interval,
            recording: Arc::new(AtomicBool::new(false)),
            session_id: Arc::new(Mutex::new(None)),
            last_chunk_id: Arc::new(Mutex::new(None)),
            poll_generation: Arc::new(AtomicU64::new(0)),
            poll_task: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    pub async fn last_chunk_id(&self) -> Option<String> {
        self.last_chunk_id.lock().await.clone()
    }

    /// Start a recording session. On success the speaker map and rendered
    /// chunks are reset by the UI (via [`SessionEvent::Started`]) and polling
    /// begins. On failure nothing changes; the caller logs and moves on.
    pub async fn start(&self) -> Result<()> {
        if self.is_recording() {
            warn!("session already recording");
            return Ok(());
        }

        let resp = self.api.start().await.context("failed to start session")?;
        if !resp.success {
            anyhow::bail!("service refused to start a session");
        }

        let session_id = resp.session_id.unwrap_or_default();
        info!("session started: {}", session_id);

        {
            let mut id = self.session_id.lock().await;
            *id = Some(session_id.clone());
        }
        self.recording.store(true, Ordering::SeqCst);

        let _ = self.events.send(SessionEvent::Started { session_id });

        self.start_polling().await;

        Ok(())
    }

    /// Stop the recording session. On success polling halts; on failure state
    /// is left unchanged.
    pub async fn stop(&self) -> Result<()> {
        if !self.is_recording() {
            warn!("no session to stop");
            return Ok(());
        }

        let resp = self.api.stop().await.context("failed to stop session")?;
        if !resp.success {
            anyhow::bail!("service refused to stop the session");
        }

        self.recording.store(false, Ordering::SeqCst);
        {
            let mut id = self.session_id.lock().await;
            *id = None;
        }

        self.stop_polling().await;

        info!("session stopped");
        let _ = self.events.send(SessionEvent::Stopped);

        Ok(())
    }

    /// Query `/api/status` at startup and adopt an already-active session.
    /// Unlike [`start`](Self::start), nothing is cleared: the session was not
    /// ours to begin, so existing state stays. Returns whether a session was
    /// adopted.
    pub async fn resume(&self) -> Result<bool> {
        let status = self.api.status().await.context("failed to query status")?;

        if !status.active {
            let _ = self.events.send(SessionEvent::Inactive);
            return Ok(false);
        }

        let session_id = status.session_id.unwrap_or_default();
        info!("adopting active session: {}", session_id);

        {
            let mut id = self.session_id.lock().await;
            *id = Some(session_id.clone());
        }
        self.recording.store(true, Ordering::SeqCst);

        let _ = self.events.send(SessionEvent::Resumed { session_id });

        self.start_polling().await;

        Ok(true)
    }

    /// Tear the session object down without talking to the service. Used on
    /// quit; idempotent.
    pub async fn dispose(&self) {
        self.stop_polling().await;
        self.recording.store(false, Ordering::SeqCst);
    }

    /// Send a microphone threshold update. Only forwarded while recording;
    /// while idle the caller just updates its displayed value. Negative values
    /// clamp to zero because the service rejects them.
    pub async fn set_mic_threshold(&self, threshold: f64) -> Result<()> {
        let threshold = threshold.max(0.0);
        if !self.is_recording() {
            debug!("mic threshold {} kept local; no active session", threshold);
            return Ok(());
        }

        let resp = self
            .api
            .set_mic_threshold(threshold)
            .await
            .context("failed to set mic threshold")?;
        if !resp.success {
            anyhow::bail!("service rejected mic threshold {threshold}");
        }
        Ok(())
    }

    /// Send a computer-audio threshold update. Same rules as the mic setter.
    pub async fn set_speaker_threshold(&self, threshold: f64) -> Result<()> {
        let threshold = threshold.max(0.0);
        if !self.is_recording() {
            debug!(
                "speaker threshold {} kept local; no active session",
                threshold
            );
            return Ok(());
        }

        let resp = self
            .api
            .set_speaker_threshold(threshold)
            .await
            .context("failed to set speaker threshold")?;
        if !resp.success {
            anyhow::bail!("service rejected speaker threshold {threshold}");
        }
        Ok(())
    }

    /// Cancel any existing polling task, then arm a fresh one at the
    /// configured period.
    async fn start_polling(&self) {
        self.stop_polling().await;

        let generation = self.poll_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let last_chunk_id = Arc::clone(&self.last_chunk_id);
        let poll_generation = Arc::clone(&self.poll_generation);
        let period = self.poll_interval;

        let task = tokio::spawn(async move {
            debug!("polling task started (generation {})", generation);

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                if poll_generation.load(Ordering::SeqCst) != generation {
                    break;
                }

                let after = { last_chunk_id.lock().await.clone() };

                match api.chunks(after.as_deref()).await {
                    Ok(resp) => {
                        // A stop/restart may have superseded this poll while
                        // the request was in flight; its chunks belong to a
                        // session the UI no longer shows.
                        if poll_generation.load(Ordering::SeqCst) != generation {
                            debug!(
                                "discarding {} chunk(s) from superseded poll",
                                resp.chunks.len()
                            );
                            break;
                        }

                        if resp.chunks.is_empty() {
                            continue;
                        }

                        if let Some(newest) = resp.chunks.last() {
                            let mut last = last_chunk_id.lock().await;
                            *last = Some(newest.chunk_id.clone());
                        }

                        if events.send(SessionEvent::Chunks(resp.chunks)).is_err() {
                            // UI went away; nothing left to poll for.
                            break;
                        }
                    }
                    Err(e) => {
                        // Transient failures are logged and the loop carries
                        // on at the next tick. No backoff, no cancellation.
                        warn!("chunk poll failed: {e:#}");
                    }
                }
            }

            debug!("polling task stopped (generation {})", generation);
        });

        let mut handle = self.poll_task.lock().await;
        *handle = Some(task);
    }

    /// Cancel the polling task if one is armed. Idempotent.
    async fn stop_polling(&self) {
        self.poll_generation.fetch_add(1, Ordering::SeqCst);

        let mut handle = self.poll_task.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
        }
    }
}
