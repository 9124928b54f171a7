//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the frontend bridge. Every widget
//! transition funnels through [`AppContext::apply_widget_event`], which
//! applies the event and carries out its effects under one write lock so
//! event handling stays strictly ordered.

use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};
use voxcard_bridge::{MessageFromBackend, MessageToBackend};

use crate::services;
use crate::state::{SharedState, State};
use crate::widget::{Effect, WidgetEvent};

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes,
    /// then release the media handle: the widget is being torn down.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }

        let mut state = self.state.write().await;
        services::playback_service::teardown(&mut state);
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::SelectLanguage(language) => {
                services::resolver_service::handle_language_selected(self.clone(), language).await;
            }
            MessageToBackend::TogglePlayback => {
                services::playback_service::handle_toggle_request(self.clone()).await;
            }
            MessageToBackend::DownloadRequest => {
                services::download_service::handle_download_request(self.clone()).await;
            }
        }
    }

    /// Applies a widget event, performs the resulting effects, and pushes
    /// the state changes to the frontend. The write lock is held across all
    /// of it so concurrent completions observe transitions in the same
    /// order they were applied.
    pub async fn apply_widget_event(self: &Arc<Self>, event: WidgetEvent) {
        let mut state = self.state.write().await;
        let previous_resolution = state.widget.resolution().clone();
        let previous_playback = state.widget.playback();

        for effect in state.widget.apply(event) {
            self.perform_effect(&mut state, effect);
        }

        if state.widget.resolution() != &previous_resolution {
            self.send(MessageFromBackend::ResolutionStateUpdate(
                state.widget.resolution().clone(),
            ))
            .await;
        }
        if state.widget.playback() != previous_playback {
            self.send(MessageFromBackend::PlaybackStateUpdate(
                state.widget.playback(),
            ))
            .await;
        }
    }

    fn perform_effect(self: &Arc<Self>, state: &mut State, effect: Effect) {
        match effect {
            Effect::ReleaseTrack => services::playback_service::teardown(state),
            Effect::StartResolution {
                language,
                generation,
            } => services::resolver_service::start_resolution(
                self.clone(),
                state,
                language,
                generation,
            ),
            Effect::ReplaceTrack { url, generation } => {
                services::playback_service::replace_track(self.clone(), state, url, generation);
            }
            Effect::StartPlayback => services::playback_service::request_start(state),
            Effect::PausePlayback => services::playback_service::request_pause(state),
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to frontend");
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(
        &self,
        notification_type: voxcard_bridge::notification::NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(
            voxcard_bridge::notification::NotificationMessage {
                notification_type,
                message: content.into(),
            },
        ))
        .await;
    }
}
