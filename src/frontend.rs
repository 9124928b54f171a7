//! Line-oriented terminal frontend for the demo widget.
//!
//! Renders state updates pushed by the backend and forwards user commands
//! over the bridge. The rendering is deliberately minimal; everything
//! interesting lives behind the bridge in the backend.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc::{Receiver, Sender};
use voxcard_bridge::language::Language;
use voxcard_bridge::widget::ResolutionState;
use voxcard_bridge::{MessageFromBackend, MessageToBackend};

/// Runs the frontend until the user quits or stdin closes.
pub fn run(rx: Receiver<MessageFromBackend>, tx: Sender<MessageToBackend>) -> anyhow::Result<()> {
    print_help();

    let printer = thread::spawn(move || render_updates(rx));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("q") || command.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_command(command) {
            Some(message) => tx.blocking_send(message)?,
            None => println!("Unknown command: {command}"),
        }
    }

    // Dropping the sender closes the bridge and lets the backend tear down.
    drop(tx);
    let _ = printer.join();
    Ok(())
}

fn print_help() {
    let languages = Language::ALL
        .iter()
        .map(Language::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Pick a language ({languages}), then: p = play/pause, d = download, c = config, q = quit");
}

fn parse_command(command: &str) -> Option<MessageToBackend> {
    if let Ok(language) = command.parse::<Language>() {
        return Some(MessageToBackend::SelectLanguage(language));
    }
    match command.to_ascii_lowercase().as_str() {
        "p" | "play" | "pause" | "toggle" => Some(MessageToBackend::TogglePlayback),
        "d" | "download" => Some(MessageToBackend::DownloadRequest),
        "c" | "config" => Some(MessageToBackend::ConfigurationRequest),
        _ => None,
    }
}

fn render_updates(mut rx: Receiver<MessageFromBackend>) {
    while let Some(message) = rx.blocking_recv() {
        match message {
            MessageFromBackend::ResolutionStateUpdate(resolution) => render_resolution(&resolution),
            MessageFromBackend::PlaybackStateUpdate(playback) => {
                if playback.is_playing() {
                    println!("Playing.");
                } else {
                    println!("Paused.");
                }
            }
            MessageFromBackend::NotificationMessage(notification) => {
                println!(
                    "[{:?}] {}",
                    notification.notification_type, notification.message
                );
            }
            MessageFromBackend::ConfigurationResponse(config) => {
                println!("Lookup service: {}", config.lookup.base_url);
            }
            MessageFromBackend::DownloadProgressUpdate {
                downloaded_bytes,
                total_bytes,
                ..
            } => {
                println!("Downloading... {downloaded_bytes}/{total_bytes} bytes");
            }
            MessageFromBackend::DownloadFinished { path } => {
                println!("Saved to {}", path.display());
            }
        }
    }
}

fn render_resolution(resolution: &ResolutionState) {
    match resolution {
        ResolutionState::Idle => {}
        ResolutionState::Loading => println!("Loading..."),
        ResolutionState::Ready { url } => {
            println!("Ready: {url} (p to play/pause, d to download)");
        }
        ResolutionState::Failed { message } => println!("Error: {message}"),
    }
}
