//! The widget state container and its pure transition functions.
//!
//! Every externally-triggered or asynchronous occurrence is expressed as a
//! [`WidgetEvent`]; applying an event mutates the container and yields the
//! [`Effect`]s the runtime must carry out. Keeping transitions pure makes
//! the race policy for superseded requests directly testable.

use voxcard_bridge::language::Language;
use voxcard_bridge::widget::{PlaybackState, ResolutionState};

/// An occurrence the widget reacts to.
#[derive(Debug, Clone)]
pub(crate) enum WidgetEvent {
    /// The user picked a language (also fired once on startup).
    LanguageSelected(Language),
    /// The lookup started for `generation` produced a playable URL.
    ResolutionSucceeded { generation: u64, url: String },
    /// The lookup started for `generation` failed with a user-visible message.
    ResolutionFailed { generation: u64, message: String },
    /// The user asked to toggle play/pause.
    ToggleRequested,
    /// The media handle created for `generation` played to its natural end.
    PlaybackEnded { generation: u64 },
}

/// A side effect the runtime must perform after a transition, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Release the current media handle, if any.
    ReleaseTrack,
    /// Start a lookup for `language`, tagged with `generation`.
    StartResolution { language: Language, generation: u64 },
    /// Release the current media handle and bind a new one to `url`.
    ReplaceTrack { url: String, generation: u64 },
    /// Request playback start on the current media handle.
    StartPlayback,
    /// Request playback pause on the current media handle.
    PausePlayback,
}

/// Explicit container for all mutable widget state.
///
/// `generation` increases on every language selection. Asynchronous results
/// carry the generation of the request that produced them; a result whose
/// generation no longer matches has been superseded and is discarded, which
/// guarantees that only the most recently requested language can transition
/// the resolution state.
#[derive(Debug)]
pub(crate) struct WidgetState {
    language: Language,
    resolution: ResolutionState,
    playback: PlaybackState,
    generation: u64,
}

impl WidgetState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            resolution: ResolutionState::Idle,
            playback: PlaybackState::Paused,
            generation: 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn resolution(&self) -> &ResolutionState {
        &self.resolution
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Applies `event` and returns the effects to perform, in order.
    pub fn apply(&mut self, event: WidgetEvent) -> Vec<Effect> {
        match event {
            WidgetEvent::LanguageSelected(language) => {
                self.language = language;
                self.generation += 1;
                self.resolution = ResolutionState::Loading;
                self.playback = PlaybackState::Paused;
                vec![
                    Effect::ReleaseTrack,
                    Effect::StartResolution {
                        language,
                        generation: self.generation,
                    },
                ]
            }
            WidgetEvent::ResolutionSucceeded { generation, url } => {
                if generation != self.generation {
                    log::debug!("Discarding stale resolution result for generation {generation}");
                    return Vec::new();
                }
                self.resolution = ResolutionState::Ready { url: url.clone() };
                self.playback = PlaybackState::Paused;
                vec![Effect::ReplaceTrack { url, generation }]
            }
            WidgetEvent::ResolutionFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    log::debug!("Discarding stale resolution failure for generation {generation}");
                    return Vec::new();
                }
                self.resolution = ResolutionState::Failed { message };
                self.playback = PlaybackState::Paused;
                vec![Effect::ReleaseTrack]
            }
            WidgetEvent::ToggleRequested => {
                if !self.resolution.can_toggle() {
                    return Vec::new();
                }
                self.playback = self.playback.toggled();
                match self.playback {
                    PlaybackState::Playing => vec![Effect::StartPlayback],
                    PlaybackState::Paused => vec![Effect::PausePlayback],
                }
            }
            WidgetEvent::PlaybackEnded { generation } => {
                if generation != self.generation {
                    return Vec::new();
                }
                self.playback = PlaybackState::Paused;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_widget(url: &str) -> WidgetState {
        let mut widget = WidgetState::new(Language::English);
        widget.apply(WidgetEvent::LanguageSelected(Language::English));
        widget.apply(WidgetEvent::ResolutionSucceeded {
            generation: 1,
            url: url.to_string(),
        });
        widget
    }

    #[test]
    fn selection_starts_a_fresh_resolution_attempt() {
        let mut widget = WidgetState::new(Language::English);
        let effects = widget.apply(WidgetEvent::LanguageSelected(Language::Arabic));

        assert_eq!(widget.language(), Language::Arabic);
        assert_eq!(widget.resolution(), &ResolutionState::Loading);
        assert_eq!(widget.playback(), PlaybackState::Paused);
        assert_eq!(
            effects,
            vec![
                Effect::ReleaseTrack,
                Effect::StartResolution {
                    language: Language::Arabic,
                    generation: 1,
                },
            ]
        );
    }

    #[test]
    fn only_the_latest_selection_may_transition_the_resolution() {
        let mut widget = WidgetState::new(Language::English);
        widget.apply(WidgetEvent::LanguageSelected(Language::English));
        widget.apply(WidgetEvent::LanguageSelected(Language::Arabic));

        // The superseded English response arrives late and must be dropped.
        let effects = widget.apply(WidgetEvent::ResolutionSucceeded {
            generation: 1,
            url: "/english.mp3".to_string(),
        });
        assert!(effects.is_empty());
        assert_eq!(widget.resolution(), &ResolutionState::Loading);

        let effects = widget.apply(WidgetEvent::ResolutionSucceeded {
            generation: 2,
            url: "/arabic.mp3".to_string(),
        });
        assert_eq!(
            effects,
            vec![Effect::ReplaceTrack {
                url: "/arabic.mp3".to_string(),
                generation: 2,
            }]
        );
        assert_eq!(
            widget.resolution(),
            &ResolutionState::Ready {
                url: "/arabic.mp3".to_string(),
            }
        );
    }

    #[test]
    fn stale_failures_are_discarded_too() {
        let mut widget = WidgetState::new(Language::English);
        widget.apply(WidgetEvent::LanguageSelected(Language::English));
        widget.apply(WidgetEvent::LanguageSelected(Language::Arabic));

        let effects = widget.apply(WidgetEvent::ResolutionFailed {
            generation: 1,
            message: "voice unavailable".to_string(),
        });
        assert!(effects.is_empty());
        assert_eq!(widget.resolution(), &ResolutionState::Loading);
    }

    #[test]
    fn failure_replaces_prior_state_and_retains_no_handle() {
        let mut widget = ready_widget("/a.mp3");
        widget.apply(WidgetEvent::ToggleRequested);
        widget.apply(WidgetEvent::LanguageSelected(Language::Arabic));

        let effects = widget.apply(WidgetEvent::ResolutionFailed {
            generation: 2,
            message: "voice unavailable".to_string(),
        });
        assert_eq!(effects, vec![Effect::ReleaseTrack]);
        assert_eq!(
            widget.resolution(),
            &ResolutionState::Failed {
                message: "voice unavailable".to_string(),
            }
        );
        assert_eq!(widget.playback(), PlaybackState::Paused);
    }

    #[test]
    fn toggle_is_a_noop_without_a_resolved_url() {
        let mut widget = WidgetState::new(Language::English);
        widget.apply(WidgetEvent::LanguageSelected(Language::English));

        let effects = widget.apply(WidgetEvent::ToggleRequested);
        assert!(effects.is_empty());
        assert_eq!(widget.playback(), PlaybackState::Paused);
    }

    #[test]
    fn toggling_twice_returns_to_paused() {
        let mut widget = ready_widget("/a.mp3");

        let effects = widget.apply(WidgetEvent::ToggleRequested);
        assert_eq!(effects, vec![Effect::StartPlayback]);
        assert_eq!(widget.playback(), PlaybackState::Playing);

        let effects = widget.apply(WidgetEvent::ToggleRequested);
        assert_eq!(effects, vec![Effect::PausePlayback]);
        assert_eq!(widget.playback(), PlaybackState::Paused);
    }

    #[test]
    fn natural_end_of_playback_pauses_the_widget() {
        let mut widget = ready_widget("/a.mp3");
        widget.apply(WidgetEvent::ToggleRequested);

        let effects = widget.apply(WidgetEvent::PlaybackEnded { generation: 1 });
        assert!(effects.is_empty());
        assert_eq!(widget.playback(), PlaybackState::Paused);
    }

    #[test]
    fn end_signal_from_a_released_handle_is_ignored() {
        let mut widget = ready_widget("/a.mp3");
        widget.apply(WidgetEvent::LanguageSelected(Language::Arabic));
        widget.apply(WidgetEvent::ResolutionSucceeded {
            generation: 2,
            url: "/b.mp3".to_string(),
        });
        widget.apply(WidgetEvent::ToggleRequested);

        widget.apply(WidgetEvent::PlaybackEnded { generation: 1 });
        assert_eq!(widget.playback(), PlaybackState::Playing);
    }
}
