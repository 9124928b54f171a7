use std::sync::Arc;

use crate::{MediaTrack, TrackFactory};

/// Fallback factory for hosts without an audio output device.
///
/// Tracks accept the full transport protocol but never produce sound and
/// never reach a natural end; play requests are logged as start failures.
pub struct NullTrackFactory;

impl TrackFactory for NullTrackFactory {
    fn open(&self, url: &str) -> Arc<dyn MediaTrack> {
        Arc::new(NullTrack {
            url: url.to_string(),
        })
    }
}

struct NullTrack {
    url: String,
}

impl MediaTrack for NullTrack {
    fn play(&self) {
        log::error!(
            "Failed to start playback of {}: no audio output device",
            self.url
        );
    }

    fn pause(&self) {}

    fn stop(&self) {}

    fn is_ended(&self) -> bool {
        false
    }
}
