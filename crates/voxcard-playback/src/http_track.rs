use std::io::Cursor;
use std::sync::{Arc, Mutex};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::{MediaTrack, TrackError, TrackFactory};

/// Handle to the process-wide audio output route.
pub struct AudioOutput {
    handle: OutputStreamHandle,
}

impl AudioOutput {
    /// Opens the default audio output device of the host.
    pub fn try_default() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        // The stream must outlive every sink routed through its handle, so
        // it is leaked and stays valid for the process lifetime.
        std::mem::forget(stream);
        Ok(Self { handle })
    }
}

/// Creates [`HttpTrack`]s that fetch their resource over HTTP.
pub struct HttpTrackFactory {
    client: reqwest::Client,
    output: AudioOutput,
}

impl HttpTrackFactory {
    pub fn new(client: reqwest::Client, output: AudioOutput) -> Self {
        Self { client, output }
    }
}

impl TrackFactory for HttpTrackFactory {
    fn open(&self, url: &str) -> Arc<dyn MediaTrack> {
        Arc::new(HttpTrack {
            url: url.to_string(),
            client: self.client.clone(),
            output: self.output.handle.clone(),
            inner: Arc::new(Mutex::new(TrackInner::default())),
        })
    }
}

#[derive(Default)]
struct TrackInner {
    sink: Option<Sink>,
    loading: bool,
    stopped: bool,
    want_playing: bool,
}

/// A playable track bound to one URL.
///
/// The resource is fetched and decoded lazily on the first play request, so
/// creating a handle right after resolution stays cheap. The sink is created
/// paused; `want_playing` carries the transport intent across the load.
struct HttpTrack {
    url: String,
    client: reqwest::Client,
    output: OutputStreamHandle,
    inner: Arc<Mutex<TrackInner>>,
}

async fn fetch_and_decode(
    client: &reqwest::Client,
    url: &str,
    output: &OutputStreamHandle,
) -> Result<Sink, TrackError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let source = Decoder::new(Cursor::new(bytes.to_vec()))?;
    let sink = Sink::try_new(output)?;
    sink.pause();
    sink.append(source);
    Ok(sink)
}

impl MediaTrack for HttpTrack {
    fn play(&self) {
        let mut inner = self.inner.lock().expect("track state poisoned");
        if inner.stopped {
            return;
        }
        inner.want_playing = true;

        if let Some(sink) = inner.sink.as_ref() {
            sink.play();
            return;
        }
        if inner.loading {
            return;
        }
        inner.loading = true;
        drop(inner);

        let url = self.url.clone();
        let client = self.client.clone();
        let output = self.output.clone();
        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = fetch_and_decode(&client, &url, &output).await;
            let mut inner = shared.lock().expect("track state poisoned");
            inner.loading = false;
            match result {
                Ok(sink) => {
                    if inner.stopped {
                        sink.stop();
                        return;
                    }
                    if inner.want_playing {
                        sink.play();
                    }
                    inner.sink = Some(sink);
                }
                Err(error) => {
                    log::error!("Failed to start playback of {url}: {error}");
                }
            }
        });
    }

    fn pause(&self) {
        let mut inner = self.inner.lock().expect("track state poisoned");
        inner.want_playing = false;
        if let Some(sink) = inner.sink.as_ref() {
            sink.pause();
        }
    }

    fn stop(&self) {
        let mut inner = self.inner.lock().expect("track state poisoned");
        inner.stopped = true;
        inner.want_playing = false;
        if let Some(sink) = inner.sink.take() {
            sink.stop();
        }
    }

    fn is_ended(&self) -> bool {
        let inner = self.inner.lock().expect("track state poisoned");
        !inner.stopped && inner.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}
