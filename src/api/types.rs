use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// One transcribed audio segment as returned by `/api/chunks`.
///
/// `chunk_id` is an opaque, server-issued identifier (a TEXT primary key on the
/// service side). Chunks are immutable once received; ordering is arrival
/// order, assumed monotonic in `chunk_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,

    /// Origin of the segment: "mic" for the local microphone, "speaker" for
    /// computer audio. Older rows may carry no source at all.
    pub source: Option<String>,

    /// Diarized speaker label, when the service could attribute one.
    pub speaker_id: Option<String>,

    /// Server-side timestamp, displayed verbatim.
    pub timestamp: String,

    pub text: String,
}

/// Response to `POST /api/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResponse {
    pub success: bool,
    pub session_id: Option<String>,
}

/// Response to `POST /api/stop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopResponse {
    pub success: bool,
}

/// Response to `GET /api/status`, queried once at startup to adopt a session
/// that is already recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub active: bool,
    pub session_id: Option<String>,
}

/// Response to `GET /api/chunks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunksResponse {
    pub chunks: Vec<Chunk>,
}

/// Body for the threshold setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRequest {
    pub threshold: f64,
}

/// Response to the threshold setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdResponse {
    pub success: bool,
}

/// One capture device as reported by `GET /api/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub id: String,
}

/// Response to `GET /api/devices`: what the recorder will capture from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceList {
    pub microphones: Vec<Device>,
    pub speakers: Vec<Device>,
    #[serde(default)]
    pub default_mic: String,
    #[serde(default)]
    pub default_speaker: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_parses_with_missing_speaker_fields() {
        // Rows migrated from before diarization carry no source or speaker_id.
        let raw = r#"{"chunk_id":"sess1_0004","timestamp":"12:01:55","text":"hello"}"#;
        let chunk: Chunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.chunk_id, "sess1_0004");
        assert!(chunk.source.is_none());
        assert!(chunk.speaker_id.is_none());
    }

    #[test]
    fn chunk_parses_full_row() {
        let raw = r#"{
            "chunk_id": "sess1_0005",
            "source": "speaker",
            "speaker_id": "Speaker 2",
            "timestamp": "12:02:01",
            "text": "and then we shipped it"
        }"#;
        let chunk: Chunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.source.as_deref(), Some("speaker"));
        assert_eq!(chunk.speaker_id.as_deref(), Some("Speaker 2"));
    }

    #[test]
    fn start_response_without_session_id_parses() {
        // A refused start comes back as {"success": false}.
        let resp: StartResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.session_id.is_none());
    }
}
