//! Streams the resolved audio resource to disk with progress reporting.
//!
//! The widget core only exposes the current URL as the download target; the
//! transfer performed here never touches widget state.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Url;
use tokio::io::AsyncWriteExt;
use voxcard_bridge::MessageFromBackend;
use voxcard_bridge::config::Config;
use voxcard_bridge::language::Language;
use voxcard_bridge::notification::NotificationType;

use crate::lookup;

#[derive(Debug, thiserror::Error)]
enum DownloadError {
    #[error("download request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to write downloaded audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Picks the directory downloads are saved into: the configured override
/// when set, otherwise the platform download directory, otherwise the
/// current directory.
fn downloads_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.download_dir {
        return dir.clone();
    }
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// File name for the saved resource: the last path segment of the resolved
/// URL when it has one, otherwise `{language}.mp3`.
fn file_name_for(url: &Url, language: Language) -> String {
    match url.path_segments().and_then(|mut segments| segments.next_back()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{language}.mp3"),
    }
}

/// Handles an incoming download request (see
/// [`voxcard_bridge::MessageToBackend::DownloadRequest`]). Rejected with an
/// error notification unless a resolved URL is active.
pub async fn handle_download_request(context: super::AppContextHandle) {
    let (config, request_client, resolved) = {
        let state = context.state.read().await;
        (
            state.config.clone(),
            state.request_client.clone(),
            state
                .widget
                .resolution()
                .url()
                .map(|url| (url.to_string(), state.widget.language())),
        )
    };

    let Some((url, language)) = resolved else {
        context
            .send_notification(
                NotificationType::Error,
                "No audio resource is ready to download.",
            )
            .await;
        return;
    };

    let Some(media_url) = lookup::absolute_media_url(&config.lookup.base_url, &url) else {
        context
            .send_notification(
                NotificationType::Error,
                format!("Cannot resolve download location for {url}."),
            )
            .await;
        return;
    };

    let save_path = downloads_dir(&config).join(file_name_for(&media_url, language));
    log::info!("Downloading {media_url}, saving to {save_path:?}");

    if let Some(parent) = save_path.parent() {
        if let Err(error) = tokio::fs::create_dir_all(parent).await {
            context
                .send_notification(
                    NotificationType::Error,
                    format!("Cannot create download directory: {error}"),
                )
                .await;
            return;
        }
    }

    tokio::spawn(async move {
        match stream_to_disk(&context, &request_client, media_url.clone(), &save_path).await {
            Ok(()) => {
                context
                    .send(MessageFromBackend::DownloadFinished { path: save_path })
                    .await;
            }
            Err(error) => {
                log::error!("Download of {media_url} failed: {error}");
                context
                    .send_notification(NotificationType::Error, error.to_string())
                    .await;
            }
        }
    });
}

async fn stream_to_disk(
    context: &super::AppContextHandle,
    client: &reqwest::Client,
    url: Url,
    save_path: &Path,
) -> Result<(), DownloadError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let total_bytes = response.content_length().unwrap_or(0);

    let mut output_file = tokio::fs::File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(save_path)
        .await?;

    let start = tokio::time::Instant::now();
    let mut downloaded_bytes = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let current_chunk = chunk?;
        output_file.write_all(&current_chunk).await?;
        downloaded_bytes += current_chunk.len() as u64;

        let elapsed_secs = start.elapsed().as_secs_f64();
        let speed = downloaded_bytes as f64 / elapsed_secs;
        let remaining_time = total_bytes.saturating_sub(downloaded_bytes) as f64 / speed;

        // notify frontend about current state
        context
            .send(MessageFromBackend::DownloadProgressUpdate {
                speed,
                downloaded_bytes,
                total_bytes,
                remaining_time,
            })
            .await;
    }
    output_file.sync_all().await?;

    Ok(())
}
