//! Resolver: maps the selected language to a resolution state by calling
//! the external audio-lookup service.

use std::sync::Arc;

use voxcard_bridge::language::Language;

use crate::state::State;
use crate::widget::WidgetEvent;

/// Handles an incoming language selection (see
/// [`voxcard_bridge::MessageToBackend::SelectLanguage`]). Also invoked once
/// at startup for the configured default language.
pub async fn handle_language_selected(context: super::AppContextHandle, language: Language) {
    log::info!("Language selected: {language}");
    context
        .apply_widget_event(WidgetEvent::LanguageSelected(language))
        .await;
}

/// Spawns the single lookup call for this resolution attempt.
///
/// The outcome is routed back through the state container tagged with
/// `generation`; the container discards it if a newer selection has
/// superseded the attempt by the time it arrives. The transport call itself
/// is never aborted.
pub(crate) fn start_resolution(
    context: super::AppContextHandle,
    state: &State,
    language: Language,
    generation: u64,
) {
    let lookup = Arc::clone(&state.lookup);
    tokio::spawn(async move {
        let event = match lookup.resolve(language).await {
            Ok(resolved) => WidgetEvent::ResolutionSucceeded {
                generation,
                url: resolved.url,
            },
            Err(error) => {
                log::warn!("Audio lookup for {language} failed: {error}");
                WidgetEvent::ResolutionFailed {
                    generation,
                    message: error.user_message(),
                }
            }
        };
        context.apply_widget_event(event).await;
    });
}
