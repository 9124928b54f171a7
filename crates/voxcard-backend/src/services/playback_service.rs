//! Playback controller: owns the lifetime of the single media handle and
//! carries out transport effects.

use std::sync::{Arc, Weak};
use std::time::Duration;

use voxcard_playback::MediaTrack;

use crate::lookup;
use crate::state::{ActiveTrack, State};
use crate::widget::WidgetEvent;

/// How often the end-of-playback watcher samples the active track.
const END_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Handles an incoming toggle request (see
/// [`voxcard_bridge::MessageToBackend::TogglePlayback`]). The state
/// container ignores it unless a resolved URL is active, and flips the
/// playback state optimistically: a failure to start is logged by the track
/// and deliberately does not revert the flip.
pub async fn handle_toggle_request(context: super::AppContextHandle) {
    context.apply_widget_event(WidgetEvent::ToggleRequested).await;
}

/// Releases the active media handle: stops playback and drops the owning
/// reference. Runs on every exit path that changes or removes the bound
/// URL: a replacement resolving, a language selection invalidating the
/// resource, and backend shutdown.
pub(crate) fn teardown(state: &mut State) {
    if let Some(active) = state.active_track.take() {
        log::debug!(
            "Releasing media handle bound to {} (generation {})",
            active.url,
            active.generation
        );
        active.track.stop();
    }
}

/// Binds a fresh media handle to `url`, releasing the previous one first so
/// two handles never coexist. The new handle starts paused; resolution
/// never implies auto-play.
pub(crate) fn replace_track(
    context: super::AppContextHandle,
    state: &mut State,
    url: String,
    generation: u64,
) {
    teardown(state);

    let Some(media_url) = lookup::absolute_media_url(&state.config.lookup.base_url, &url) else {
        log::error!(
            "Cannot resolve media location for {url} against {}",
            state.config.lookup.base_url
        );
        return;
    };

    let track = state.tracks.open(media_url.as_str());
    spawn_end_watcher(context, Arc::downgrade(&track), generation);
    state.active_track = Some(ActiveTrack {
        track,
        url,
        generation,
    });
}

/// Watches the track for its natural end and reports it back through the
/// state container. The watcher holds only a weak reference, so releasing
/// the handle ends it, and the generation tag lets the container discard a
/// signal that raced with a newer selection.
fn spawn_end_watcher(context: super::AppContextHandle, track: Weak<dyn MediaTrack>, generation: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(END_POLL_INTERVAL);
        loop {
            ticker.tick().await;
            let Some(track) = track.upgrade() else { break };
            if track.is_ended() {
                context
                    .apply_widget_event(WidgetEvent::PlaybackEnded { generation })
                    .await;
                break;
            }
        }
    });
}

pub(crate) fn request_start(state: &mut State) {
    match state.active_track.as_ref() {
        Some(active) => active.track.play(),
        None => log::error!("Playback start requested without an active media handle"),
    }
}

pub(crate) fn request_pause(state: &mut State) {
    if let Some(active) = state.active_track.as_ref() {
        active.track.pause();
    }
}
