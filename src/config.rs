use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the transcription service.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Period of the chunk polling loop in milliseconds.
    pub poll_interval_ms: u64,

    /// Server-side path of the transcript file. The service writes to one
    /// fixed location, so this rarely changes.
    pub transcript_path: String,

    /// Local directory downloaded transcripts are written into.
    pub download_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Initial microphone noise threshold shown before any adjustment.
    pub mic: f64,

    /// Initial computer-audio noise threshold.
    pub speaker: f64,

    /// Amount a single keypress moves a threshold by.
    pub step: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            transcript_path: "transcriptions/transcription.txt".to_string(),
            download_dir: ".".to_string(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        // The recorder's own defaults; shown until the user adjusts them.
        Self {
            mic: 0.005,
            speaker: 0.01,
            step: 0.005,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            client: ClientConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path` (extension resolved by the config
    /// crate). A missing file is not an error: the client runs against a
    /// stock local service with built-in defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load("config/does-not-exist").unwrap();
        assert_eq!(cfg.server.url, "http://localhost:5000");
        assert_eq!(cfg.client.poll_interval_ms, 1000);
        assert_eq!(cfg.client.transcript_path, "transcriptions/transcription.txt");
        assert_eq!(cfg.thresholds.mic, 0.005);
        assert_eq!(cfg.thresholds.speaker, 0.01);
    }
}
