//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to frontend bridge requests.

use std::{sync::Arc, thread};

use tokio::sync::RwLock;
use tokio::sync::mpsc::{Receiver, Sender};
use voxcard_bridge::config::Config;
use voxcard_bridge::{MessageFromBackend, MessageToBackend};
use voxcard_playback::{AudioOutput, HttpTrackFactory, NullTrackFactory, TrackFactory};

use crate::app::AppContext;
use crate::lookup::{AudioLookup, HttpAudioLookup};
use crate::state::State;
use crate::widget::{WidgetEvent, WidgetState};

/// The injectable parts of the backend: configuration plus the effectful
/// collaborators. [`run`] assembles the production set; tests substitute
/// scripted implementations.
pub struct BackendParts {
    pub config: Config,
    pub request_client: reqwest::Client,
    pub lookup: Arc<dyn AudioLookup>,
    pub tracks: Arc<dyn TrackFactory>,
}

/// Drives the backend until the bridge closes: resolves the default
/// language once (the widget's initial mount), then processes frontend
/// messages.
pub async fn serve(
    parts: BackendParts,
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) {
    let default_language = parts.config.default_language;
    let state = Arc::new(RwLock::new(State {
        config: parts.config,
        request_client: parts.request_client,
        lookup: parts.lookup,
        tracks: parts.tracks,
        widget: WidgetState::new(default_language),
        active_track: None,
    }));

    let context = Arc::new(AppContext { state, tx });
    context
        .apply_widget_event(WidgetEvent::LanguageSelected(default_language))
        .await;
    context.consume_bridge_messages(rx).await;
}

/// Assembles the production collaborators for [`serve`].
async fn build_parts() -> BackendParts {
    let config = crate::config::load_config()
        .await
        .expect("failed to load config");

    let request_client = reqwest::Client::new();
    let lookup: Arc<dyn AudioLookup> = Arc::new(HttpAudioLookup::new(
        request_client.clone(),
        config.lookup.base_url.clone(),
    ));
    let tracks: Arc<dyn TrackFactory> = match AudioOutput::try_default() {
        Ok(output) => Arc::new(HttpTrackFactory::new(request_client.clone(), output)),
        Err(error) => {
            log::warn!("Audio output unavailable ({error}); playback will be silent");
            Arc::new(NullTrackFactory)
        }
    };

    BackendParts {
        config,
        request_client,
        lookup,
        tracks,
    }
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async {
            let parts = build_parts().await;
            serve(parts, rx, tx).await;
        });
    });
}
