//! Audio facility - the seam between the playback coordinator and the
//! environment's decoding/output machinery
//!
//! - `sink`: rodio-backed implementation for local files
//! - `spectrum`: sample tap and FFT spectrum snapshots
//!
//! The coordinator only ever talks to [`AudioBackend`]; tests script a mock,
//! and [`NullBackend`] keeps the player visibly inert when no output device
//! is available.

mod sink;
pub mod spectrum;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

pub use sink::RodioBackend;
pub use spectrum::SPECTRUM_BUCKETS;

/// Failures at the audio boundary. All of them are recoverable: the caller
/// logs and reverts to the paused state.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
    #[error("cannot open source {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },
    #[error("cannot decode {path}: {reason}")]
    DecodeFailed { path: String, reason: String },
    #[error("no source loaded")]
    NothingLoaded,
    #[error("seeking is not supported by this source")]
    SeekUnsupported,
}

/// Events pushed by the backend while a source plays. Tagged with the load
/// epoch so late events from a superseded source are discarded by the
/// listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
    TimeUpdate { epoch: u64, position: Duration },
    Ended { epoch: u64 },
}

/// Result of a successful load: the source is ready to play.
#[derive(Clone, Copy, Debug)]
pub struct LoadedSource {
    pub epoch: u64,
    /// `None` when the container does not report a duration.
    pub duration: Option<Duration>,
}

/// The environment's audio-decoding facility, reduced to the operations the
/// coordinator needs.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Prepare a source for playback, replacing whatever was loaded before.
    /// Resolves once the source is ready.
    async fn load(&self, source: &Path) -> Result<LoadedSource, AudioError>;

    /// Start or resume the loaded source.
    async fn play(&self) -> Result<(), AudioError>;

    async fn pause(&self);

    async fn seek(&self, position: Duration) -> Result<(), AudioError>;

    async fn set_volume(&self, volume: f32);

    /// Drop the loaded source and stop emitting events.
    async fn stop(&self);

    /// Pull one spectrum snapshot; `None` when no analysis tap is attached.
    fn spectrum(&self) -> Option<Vec<f32>>;
}

/// Stand-in used when audio output cannot be initialized. Every load is
/// refused, so the player stays paused and the widget renders inert.
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MediaEvent>) {
        let (_sender, receiver) = mpsc::unbounded_channel();
        (Self, receiver)
    }
}

#[async_trait]
impl AudioBackend for NullBackend {
    async fn load(&self, _source: &Path) -> Result<LoadedSource, AudioError> {
        Err(AudioError::OutputUnavailable("audio disabled".to_string()))
    }

    async fn play(&self) -> Result<(), AudioError> {
        Err(AudioError::NothingLoaded)
    }

    async fn pause(&self) {}

    async fn seek(&self, _position: Duration) -> Result<(), AudioError> {
        Err(AudioError::NothingLoaded)
    }

    async fn set_volume(&self, _volume: f32) {}

    async fn stop(&self) {}

    fn spectrum(&self) -> Option<Vec<f32>> {
        None
    }
}
