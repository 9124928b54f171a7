//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect a frontend
//! with the asynchronous backend responsible for audio-URL resolution,
//! playback lifecycle management, and downloads.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., select a language, toggle
//!   playback, request a download).
//! - The backend pushes events (e.g., resolution and playback state
//!   updates, notifications, download progress).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod language;
pub mod notification;
pub mod widget;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::language::Language;
use crate::widget::{PlaybackState, ResolutionState};

/// Messages emitted by the backend to inform the frontend of state updates.
///
/// These are typically sent in response to frontend requests or to push
/// asynchronous progress/events (e.g., a resolution completing, download
/// progress, notifications).
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// The resolution state of the widget changed.
    ResolutionStateUpdate(ResolutionState),
    /// The playback state of the active media handle changed.
    PlaybackStateUpdate(PlaybackState),
    /// Generic message for reporting the progress of a download.
    DownloadProgressUpdate {
        /// Current speed in bytes per second.
        speed: f64,
        /// Amount of downloaded bytes to this point.
        downloaded_bytes: u64,
        /// Overall amount of bytes to be downloaded.
        total_bytes: u64,
        /// Estimated remaining time until download completion, in seconds.
        remaining_time: f64,
    },
    /// A requested download completed and was saved at the given path.
    DownloadFinished { path: std::path::PathBuf },
}

/// Commands issued by the frontend to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Select the language the widget resolves audio for.
    SelectLanguage(Language),
    /// Toggle play/pause of the resolved audio resource.
    TogglePlayback,
    /// Request to download the resolved audio resource to disk.
    DownloadRequest,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
