use std::sync::Arc;

use voxcard_bridge::config::Config;
use voxcard_playback::{MediaTrack, TrackFactory};

use crate::lookup::AudioLookup;
use crate::widget::WidgetState;

/// The single live media handle together with the URL it is bound to and
/// the resolution generation that created it.
pub(crate) struct ActiveTrack {
    pub track: Arc<dyn MediaTrack>,
    pub url: String,
    pub generation: u64,
}

/// The core application state shared across async tasks.
///
/// It is wrapped in thread-safe, async-friendly concurrency primitives (see
/// [`SharedState`]) to allow safe concurrent reads and serialized writes
/// from multiple tasks. All widget transitions happen under the write lock.
pub(crate) struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// Client resolving language selections to playable audio URLs.
    pub lookup: Arc<dyn AudioLookup>,
    /// Factory creating media handles for resolved URLs.
    pub tracks: Arc<dyn TrackFactory>,
    /// The widget state container.
    pub widget: WidgetState,
    /// The single live media handle, if any. Exclusively owned here; every
    /// exit path that changes or removes the bound URL releases it.
    pub active_track: Option<ActiveTrack>,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub(crate) type SharedState = Arc<tokio::sync::RwLock<State>>;
