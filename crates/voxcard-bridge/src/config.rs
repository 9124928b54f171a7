use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Configuration for the external audio-lookup service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Base URL of the lookup service. The per-language endpoint is
    /// `{base_url}/api/audio/{language}/`. Site-relative audio URLs returned
    /// by the service are resolved against this value as well.
    pub base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Endpoint configuration for the audio-lookup service.
    pub lookup: LookupConfig,
    /// Language the widget resolves on startup. The selection made during a
    /// session is never persisted back.
    pub default_language: Language,
    /// Directory downloaded audio is saved into. Falls back to the
    /// platform's download directory when unset.
    pub download_dir: Option<PathBuf>,
}
