//! Playable media handles for resolved audio resources.
//!
//! The backend owns at most one [`MediaTrack`] at a time, bound to a single
//! URL for its whole lifetime. Tracks are created through a [`TrackFactory`]
//! so the playback lifecycle can be driven in tests without an audio device,
//! and so hosts without one can fall back to [`NullTrackFactory`].

mod http_track;
mod null;

use std::sync::Arc;

pub use crate::http_track::{AudioOutput, HttpTrackFactory};
pub use crate::null::NullTrackFactory;

/// Errors that can occur while fetching or starting a playable resource.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// The media resource could not be fetched over HTTP.
    #[error("failed to fetch media resource: {0}")]
    Fetch(#[from] reqwest::Error),
    /// The fetched bytes could not be decoded as audio.
    #[error("failed to decode media resource: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    /// The track could not be routed to the audio output.
    #[error("failed to route track to the audio output: {0}")]
    Output(#[from] rodio::PlayError),
}

/// An exclusively-owned handle to a single playable audio resource.
///
/// All methods are non-blocking. Starting playback may fetch and decode the
/// resource in the background; a failure to start is logged rather than
/// surfaced, and does not revert any caller-side state.
pub trait MediaTrack: Send + Sync {
    /// Request playback to start (or resume).
    fn play(&self);
    /// Pause playback, keeping the decoded resource around.
    fn pause(&self);
    /// Stop playback and release the underlying output route. Terminal: the
    /// track cannot be restarted afterwards.
    fn stop(&self);
    /// Whether the resource played through to its natural end.
    fn is_ended(&self) -> bool;
}

/// Creates [`MediaTrack`]s bound to resolved URLs.
///
/// A track is never reused across URLs; replacing the resource means
/// stopping the old track and opening a new one.
pub trait TrackFactory: Send + Sync {
    fn open(&self, url: &str) -> Arc<dyn MediaTrack>;
}
