//! HTTP client for the external audio-lookup service.
//!
//! The service maps a language to a playable audio URL. Its contract:
//! `GET {base_url}/api/audio/{language}/` answers either a success body
//! `{"language": ..., "url": ...}` or a failure body `{"detail": ...}`.
//! Any non-success status is treated as a failure regardless of body shape.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use voxcard_bridge::language::Language;

/// A successfully resolved audio resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedAudio {
    pub language: Language,
    /// Absolute or site-relative location of the playable resource. Used
    /// verbatim as the widget's current URL; resolve it with
    /// [`absolute_media_url`] before fetching.
    pub url: String,
}

/// Structured failure body returned by the lookup service.
#[derive(Debug, Deserialize)]
struct LookupFailure {
    detail: String,
}

/// Errors that can occur while resolving a language to an audio URL.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The service reported a failure with a structured detail message.
    #[error("lookup service returned {status}: {detail}")]
    Service { status: StatusCode, detail: String },
    /// The service returned a non-success status without a readable detail.
    #[error("lookup service returned {0}")]
    Status(StatusCode),
    /// The request could not complete.
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A success response carried a body that does not match the contract.
    #[error("malformed lookup response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl LookupError {
    /// The message shown inline in the widget. Service-provided detail is
    /// surfaced verbatim; everything else collapses into a generic
    /// description.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Service { detail, .. } => detail.clone(),
            _ => "Failed to fetch audio URL".to_string(),
        }
    }
}

/// Resolves a language selection to a playable audio resource.
///
/// Implemented by [`HttpAudioLookup`] in production; tests supply scripted
/// implementations to drive the resolution flow deterministically.
#[async_trait]
pub trait AudioLookup: Send + Sync {
    /// Issues exactly one lookup for `language`. No automatic retry.
    async fn resolve(&self, language: Language) -> Result<ResolvedAudio, LookupError>;
}

/// Production lookup client speaking the documented HTTP contract.
pub struct HttpAudioLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAudioLookup {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AudioLookup for HttpAudioLookup {
    async fn resolve(&self, language: Language) -> Result<ResolvedAudio, LookupError> {
        let url = endpoint_url(&self.base_url, language);
        log::debug!("Looking up audio for {language} at {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_lookup_response(status, &body)
    }
}

/// Builds the per-language endpoint: `{base_url}/api/audio/{language}/`.
fn endpoint_url(base_url: &str, language: Language) -> String {
    format!("{}/api/audio/{}/", base_url.trim_end_matches('/'), language)
}

/// Interprets a lookup response defensively: any non-success status is a
/// failure, whether or not the body carries a structured detail.
fn parse_lookup_response(status: StatusCode, body: &str) -> Result<ResolvedAudio, LookupError> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }
    match serde_json::from_str::<LookupFailure>(body) {
        Ok(failure) => Err(LookupError::Service {
            status,
            detail: failure.detail,
        }),
        Err(_) => Err(LookupError::Status(status)),
    }
}

/// Resolves the service-provided URL against the configured base. The
/// service may hand out either an absolute URL or a site-relative path.
pub(crate) fn absolute_media_url(base_url: &str, url: &str) -> Option<Url> {
    Url::parse(base_url).ok()?.join(url).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_resolves() {
        let resolved = parse_lookup_response(
            StatusCode::OK,
            r#"{"language": "English", "url": "/a.mp3"}"#,
        )
        .unwrap();
        assert_eq!(
            resolved,
            ResolvedAudio {
                language: Language::English,
                url: "/a.mp3".to_string(),
            }
        );
    }

    #[test]
    fn structured_failure_surfaces_the_detail() {
        let error = parse_lookup_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "voice unavailable"}"#,
        )
        .unwrap_err();
        assert_eq!(error.user_message(), "voice unavailable");
    }

    #[test]
    fn non_success_status_fails_even_with_an_unreadable_body() {
        let error = parse_lookup_response(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert!(matches!(error, LookupError::Status(status) if status == StatusCode::BAD_GATEWAY));
        assert_eq!(error.user_message(), "Failed to fetch audio URL");
    }

    #[test]
    fn success_status_with_a_malformed_body_is_an_error() {
        let error = parse_lookup_response(StatusCode::OK, r#"{"language": "English"}"#).unwrap_err();
        assert!(matches!(error, LookupError::MalformedBody(_)));
    }

    #[test]
    fn unknown_language_in_the_body_is_rejected() {
        let error = parse_lookup_response(
            StatusCode::OK,
            r#"{"language": "Esperanto", "url": "/a.mp3"}"#,
        )
        .unwrap_err();
        assert!(matches!(error, LookupError::MalformedBody(_)));
    }

    #[test]
    fn endpoint_uses_the_literal_language_with_a_trailing_slash() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000", Language::Arabic),
            "http://127.0.0.1:8000/api/audio/Arabic/"
        );
        // A trailing slash on the base must not double up.
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000/", Language::English),
            "http://127.0.0.1:8000/api/audio/English/"
        );
    }

    #[test]
    fn media_urls_resolve_relative_to_the_base() {
        let url = absolute_media_url("http://127.0.0.1:8000", "/a.mp3").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/a.mp3");

        let url = absolute_media_url("http://127.0.0.1:8000", "https://cdn.example.com/b.mp3")
            .unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/b.mp3");
    }
}
