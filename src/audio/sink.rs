//! rodio-backed implementation of the audio facility

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::spectrum::{SpectrumAnalyzer, TapHandle, TapSource};
use super::{AudioBackend, AudioError, LoadedSource, MediaEvent};

const MONITOR_TICK: Duration = Duration::from_millis(200);

/// Plays local files through the default output device. One `Sink` per
/// loaded source; a monitor task per load emits epoch-tagged time/ended
/// events so listeners can discard anything from a superseded load.
pub struct RodioBackend {
    handle: OutputStreamHandle,
    sink: Mutex<Option<Arc<Sink>>>,
    monitor: Mutex<Option<JoinHandle<()>>>,
    epoch: AtomicU64,
    volume: Mutex<f32>,
    events: mpsc::UnboundedSender<MediaEvent>,
    tap: TapHandle,
    analyzer: SpectrumAnalyzer,
}

impl RodioBackend {
    /// Open the default output device. The stream itself is intentionally
    /// leaked so the handle stays valid for the process lifetime, the same
    /// trick the logging setup uses for its writer guard.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<MediaEvent>), AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;
        Box::leak(Box::new(stream));

        let (events, receiver) = mpsc::unbounded_channel();
        tracing::info!("Audio output initialized");
        Ok((
            Self {
                handle,
                sink: Mutex::new(None),
                monitor: Mutex::new(None),
                epoch: AtomicU64::new(0),
                volume: Mutex::new(1.0),
                events,
                tap: TapHandle::new(),
                analyzer: SpectrumAnalyzer::new(),
            },
            receiver,
        ))
    }

    fn spawn_monitor(&self, sink: Arc<Sink>, epoch: u64) {
        let events = self.events.clone();
        let tap = self.tap.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(MONITOR_TICK);
            let mut started = false;
            loop {
                ticker.tick().await;
                if sink.empty() {
                    if started {
                        tracing::debug!(epoch, "Source drained");
                        let _ = events.send(MediaEvent::Ended { epoch });
                    }
                    break;
                }
                if sink.is_paused() {
                    continue;
                }
                started = true;
                let _ = events.send(MediaEvent::TimeUpdate {
                    epoch,
                    position: tap.position(),
                });
            }
        });

        if let Some(previous) = self.monitor.lock().replace(handle) {
            previous.abort();
        }
    }
}

#[async_trait]
impl AudioBackend for RodioBackend {
    async fn load(&self, source: &Path) -> Result<LoadedSource, AudioError> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let path = source.to_path_buf();
        tracing::debug!(path = %path.display(), epoch, "Loading source");

        // Probing the container can touch the disk, keep it off the runtime.
        let decoder = tokio::task::spawn_blocking(move || -> Result<_, AudioError> {
            let file = File::open(&path).map_err(|e| AudioError::SourceUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::DecodeFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })
        .await
        .map_err(|e| AudioError::OutputUnavailable(e.to_string()))??;

        let duration = decoder.total_duration();
        let tapped = TapSource::new(decoder.convert_samples::<f32>(), self.tap.clone());

        let sink = Arc::new(
            Sink::try_new(&self.handle)
                .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?,
        );
        sink.pause();
        sink.set_volume(*self.volume.lock());
        sink.append(tapped);

        // Dropping the previous sink stops its playback.
        *self.sink.lock() = Some(sink.clone());
        self.spawn_monitor(sink, epoch);

        Ok(LoadedSource { epoch, duration })
    }

    async fn play(&self) -> Result<(), AudioError> {
        match self.sink.lock().as_ref() {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(AudioError::NothingLoaded),
        }
    }

    async fn pause(&self) {
        if let Some(sink) = self.sink.lock().as_ref() {
            sink.pause();
        }
    }

    async fn seek(&self, position: Duration) -> Result<(), AudioError> {
        match self.sink.lock().as_ref() {
            Some(sink) => sink
                .try_seek(position)
                .map_err(|_| AudioError::SeekUnsupported),
            None => Err(AudioError::NothingLoaded),
        }
    }

    async fn set_volume(&self, volume: f32) {
        *self.volume.lock() = volume;
        if let Some(sink) = self.sink.lock().as_ref() {
            sink.set_volume(volume);
        }
    }

    async fn stop(&self) {
        if let Some(handle) = self.monitor.lock().take() {
            handle.abort();
        }
        *self.sink.lock() = None;
        self.tap.disarm();
    }

    fn spectrum(&self) -> Option<Vec<f32>> {
        self.analyzer.sample(&self.tap)
    }
}
