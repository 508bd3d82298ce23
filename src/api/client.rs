use super::types::{
    ChunksResponse, DeviceList, StartResponse, StatusResponse, StopResponse, ThresholdRequest,
    ThresholdResponse,
};
use anyhow::{Context, Result};
use tracing::debug;

/// Thin REST client for the transcription service.
///
/// Every method is a single request with no retry and no explicit timeout;
/// the caller decides what a failure means (the polling loop logs and carries
/// on, the lifecycle calls surface the error).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `/api/start` - begin a recording session.
    pub async fn start(&self) -> Result<StartResponse> {
        let resp = self
            .http
            .post(self.url("/api/start"))
            .send()
            .await
            .context("start request failed")?
            .error_for_status()
            .context("start request rejected")?
            .json::<StartResponse>()
            .await
            .context("start response was not valid JSON")?;

        debug!(success = resp.success, "session start response");
        Ok(resp)
    }

    /// POST `/api/stop` - end the active recording session.
    pub async fn stop(&self) -> Result<StopResponse> {
        let resp = self
            .http
            .post(self.url("/api/stop"))
            .send()
            .await
            .context("stop request failed")?
            .error_for_status()
            .context("stop request rejected")?
            .json::<StopResponse>()
            .await
            .context("stop response was not valid JSON")?;

        debug!(success = resp.success, "session stop response");
        Ok(resp)
    }

    /// GET `/api/status` - query whether a session is already recording.
    pub async fn status(&self) -> Result<StatusResponse> {
        self.http
            .get(self.url("/api/status"))
            .send()
            .await
            .context("status request failed")?
            .error_for_status()
            .context("status request rejected")?
            .json::<StatusResponse>()
            .await
            .context("status response was not valid JSON")
    }

    /// GET `/api/chunks` - fetch transcript chunks newer than `last_chunk_id`.
    ///
    /// The query parameter is omitted entirely on the first call so the
    /// service returns the session's chunks from the beginning.
    pub async fn chunks(&self, last_chunk_id: Option<&str>) -> Result<ChunksResponse> {
        let mut req = self.http.get(self.url("/api/chunks"));
        if let Some(id) = last_chunk_id {
            req = req.query(&[("last_chunk_id", id)]);
        }

        req.send()
            .await
            .context("chunk request failed")?
            .error_for_status()
            .context("chunk request rejected")?
            .json::<ChunksResponse>()
            .await
            .context("chunk response was not valid JSON")
    }

    /// POST `/api/set_mic_threshold` - adjust microphone sensitivity on the
    /// active session.
    pub async fn set_mic_threshold(&self, threshold: f64) -> Result<ThresholdResponse> {
        self.set_threshold("/api/set_mic_threshold", threshold)
            .await
    }

    /// POST `/api/set_speaker_threshold` - adjust computer-audio sensitivity
    /// on the active session.
    pub async fn set_speaker_threshold(&self, threshold: f64) -> Result<ThresholdResponse> {
        self.set_threshold("/api/set_speaker_threshold", threshold)
            .await
    }

    async fn set_threshold(&self, path: &str, threshold: f64) -> Result<ThresholdResponse> {
        self.http
            .post(self.url(path))
            .json(&ThresholdRequest { threshold })
            .send()
            .await
            .context("threshold request failed")?
            .error_for_status()
            .context("threshold request rejected")?
            .json::<ThresholdResponse>()
            .await
            .context("threshold response was not valid JSON")
    }

    /// GET `/api/audio/:chunk_id` - the WAV clip for one chunk.
    pub async fn audio(&self, chunk_id: &str) -> Result<Vec<u8>> {
        let bytes = self
            .http
            .get(self.url(&format!("/api/audio/{chunk_id}")))
            .send()
            .await
            .context("audio request failed")?
            .error_for_status()
            .context("audio request rejected")?
            .bytes()
            .await
            .context("failed to read audio body")?;

        Ok(bytes.to_vec())
    }

    /// GET `/api/devices` - capture devices the recorder has available.
    pub async fn devices(&self) -> Result<DeviceList> {
        self.http
            .get(self.url("/api/devices"))
            .send()
            .await
            .context("device request failed")?
            .error_for_status()
            .context("device request rejected")?
            .json::<DeviceList>()
            .await
            .context("device response was not valid JSON")
    }

    /// GET `/download/:path` - fetch the transcript file as text.
    pub async fn download_transcript(&self, path: &str) -> Result<String> {
        self.http
            .get(self.url(&format!("/download/{path}")))
            .send()
            .await
            .context("transcript download failed")?
            .error_for_status()
            .context("transcript download rejected")?
            .text()
            .await
            .context("failed to read transcript body")
    }
}
