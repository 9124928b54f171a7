//! Shared vocabulary for the widget's resolution and playback state.
//!
//! Both enums travel over the bridge as snapshots; the backend owns the only
//! live instance of each and pushes an update whenever one changes.

/// Outcome of resolving the selected language to a playable audio URL.
///
/// Exactly one instance is live at a time. Per resolution attempt the
/// transitions are monotonic: `Idle`/previous state to `Loading`, then to
/// either `Ready` or `Failed`. A new language selection supersedes any
/// in-flight attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResolutionState {
    /// No resolution has been requested yet.
    #[default]
    Idle,
    /// A lookup request is in flight.
    Loading,
    /// The lookup produced a playable URL.
    Ready { url: String },
    /// The lookup failed; `message` is shown to the user inline.
    Failed { message: String },
}

impl ResolutionState {
    /// URL of the resolved resource, if any. Doubles as the download target.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolutionState::Ready { url } => Some(url),
            _ => None,
        }
    }

    /// Whether the play/pause control is enabled. Derived, never stored.
    pub fn can_toggle(&self) -> bool {
        matches!(self, ResolutionState::Ready { .. })
    }

    /// Whether the download control is enabled. Derived, never stored.
    pub fn can_download(&self) -> bool {
        matches!(self, ResolutionState::Ready { .. })
    }
}

/// Transport state of the active media handle.
///
/// Only meaningful while the backend holds a handle; it resets to `Paused`
/// whenever the handle is replaced and when playback reaches its natural end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl PlaybackState {
    /// The state a toggle request moves to.
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_are_enabled_only_when_ready() {
        let ready = ResolutionState::Ready {
            url: "/a.mp3".to_string(),
        };
        assert!(ready.can_toggle());
        assert!(ready.can_download());

        for state in [
            ResolutionState::Idle,
            ResolutionState::Loading,
            ResolutionState::Failed {
                message: "voice unavailable".to_string(),
            },
        ] {
            assert!(!state.can_toggle(), "{state:?} must disable toggle");
            assert!(!state.can_download(), "{state:?} must disable download");
        }
    }

    #[test]
    fn url_is_exposed_only_when_ready() {
        let ready = ResolutionState::Ready {
            url: "/a.mp3".to_string(),
        };
        assert_eq!(ready.url(), Some("/a.mp3"));
        assert_eq!(ResolutionState::Loading.url(), None);
    }

    #[test]
    fn toggling_flips_between_the_two_states() {
        assert_eq!(PlaybackState::Paused.toggled(), PlaybackState::Playing);
        assert_eq!(PlaybackState::Playing.toggled(), PlaybackState::Paused);
    }
}
