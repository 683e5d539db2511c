use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex as SyncMutex;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Mutex;

use crate::audio::{AudioBackend, AudioError, LoadedSource, MediaEvent};
use crate::model::{AppModel, PlayerPhase, Track};
use crate::router::Navigator;
use crate::routes::route_table;

use super::AppController;

/// Scripted backend: records commands, optionally refuses loads or plays,
/// and lets tests push media events.
struct MockBackend {
    epoch: AtomicU64,
    loads: AtomicUsize,
    plays: AtomicUsize,
    pauses: AtomicUsize,
    fail_loads: AtomicBool,
    fail_plays: AtomicBool,
    last_seek: SyncMutex<Option<Duration>>,
    last_volume: SyncMutex<Option<f32>>,
    duration: Duration,
}

impl MockBackend {
    fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<MediaEvent>, UnboundedSender<MediaEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let backend = Arc::new(Self {
            epoch: AtomicU64::new(0),
            loads: AtomicUsize::new(0),
            plays: AtomicUsize::new(0),
            pauses: AtomicUsize::new(0),
            fail_loads: AtomicBool::new(false),
            fail_plays: AtomicBool::new(false),
            last_seek: SyncMutex::new(None),
            last_volume: SyncMutex::new(None),
            duration: Duration::from_secs(120),
        });
        (backend, receiver, sender)
    }
}

#[async_trait]
impl AudioBackend for MockBackend {
    async fn load(&self, source: &Path) -> Result<LoadedSource, AudioError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(AudioError::SourceUnavailable {
                path: source.display().to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(LoadedSource {
            epoch,
            duration: Some(self.duration),
        })
    }

    async fn play(&self) -> Result<(), AudioError> {
        if self.fail_plays.load(Ordering::SeqCst) {
            return Err(AudioError::NothingLoaded);
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    async fn seek(&self, position: Duration) -> Result<(), AudioError> {
        *self.last_seek.lock() = Some(position);
        Ok(())
    }

    async fn set_volume(&self, volume: f32) {
        *self.last_volume.lock() = Some(volume);
    }

    async fn stop(&self) {}

    fn spectrum(&self) -> Option<Vec<f32>> {
        None
    }
}

fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: id.to_string(),
        source: PathBuf::from(format!("/music/{id}.mp3")),
        artist: None,
        duration_hint: None,
    }
}

async fn controller_with_tracks(
    n: usize,
) -> (
    AppController,
    Arc<MockBackend>,
    UnboundedSender<MediaEvent>,
) {
    let (backend, receiver, sender) = MockBackend::new();
    let model = AppModel::new(
        Navigator::new(route_table(), "/"),
        crate::model::sample_catalog(),
        crate::model::sample_dashboard(),
        0.75,
    );
    let model = Arc::new(Mutex::new(model));
    let controller = AppController::new(model.clone(), backend.clone());
    {
        let model = model.lock().await;
        model
            .load_tracks((0..n).map(|i| track(&format!("t{i}"))).collect())
            .await;
    }
    controller.start_media_event_listener(receiver);
    (controller, backend, sender)
}

async fn phase(controller: &AppController) -> PlayerPhase {
    let model = controller.model.lock().await;
    model.player_phase().await
}

async fn current_index(controller: &AppController) -> usize {
    let model = controller.model.lock().await;
    model.playback_info().await.current_index
}

#[tokio::test]
async fn play_transitions_to_playing_with_reported_duration() {
    let (controller, backend, _events) = controller_with_tracks(2).await;
    controller.play(Some(0)).await;

    assert_eq!(phase(&controller).await, PlayerPhase::Playing);
    assert_eq!(backend.plays.load(Ordering::SeqCst), 1);

    let model = controller.model.lock().await;
    assert_eq!(model.playback_info().await.duration, 120.0);
}

#[tokio::test]
async fn failed_load_reverts_to_paused_with_an_error_toast() {
    let (controller, backend, _events) = controller_with_tracks(2).await;
    backend.fail_loads.store(true, Ordering::SeqCst);

    controller.play(Some(1)).await;

    assert_eq!(phase(&controller).await, PlayerPhase::Paused);
    assert_eq!(backend.plays.load(Ordering::SeqCst), 0);
    let model = controller.model.lock().await;
    assert!(model.has_error().await);
    // The selection still moved, matching a rejected-but-selected track.
    assert_eq!(model.playback_info().await.current_index, 1);
}

#[tokio::test]
async fn refused_play_never_escapes_as_an_error() {
    let (controller, backend, _events) = controller_with_tracks(1).await;
    backend.fail_plays.store(true, Ordering::SeqCst);

    controller.play(Some(0)).await;

    assert_eq!(phase(&controller).await, PlayerPhase::Paused);
}

#[tokio::test]
async fn toggle_on_empty_playlist_changes_nothing() {
    let (controller, backend, _events) = controller_with_tracks(0).await;
    controller.toggle_play_pause().await;

    assert_eq!(phase(&controller).await, PlayerPhase::Empty);
    assert_eq!(backend.loads.load(Ordering::SeqCst), 0);
    assert_eq!(backend.plays.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn next_walks_the_playlist_cyclically() {
    let (controller, _backend, _events) = controller_with_tracks(3).await;
    controller.play(Some(0)).await;

    let mut seen = Vec::new();
    for _ in 0..3 {
        controller.next_track().await;
        seen.push(current_index(&controller).await);
    }
    assert_eq!(seen, vec![1, 2, 0]);
}

#[tokio::test]
async fn previous_on_single_track_is_a_no_op() {
    let (controller, backend, _events) = controller_with_tracks(1).await;
    controller.play(Some(0)).await;
    let loads_before = backend.loads.load(Ordering::SeqCst);

    controller.previous_track().await;

    assert_eq!(current_index(&controller).await, 0);
    assert_eq!(backend.loads.load(Ordering::SeqCst), loads_before);
    assert_eq!(phase(&controller).await, PlayerPhase::Playing);
}

#[tokio::test]
async fn pause_twice_equals_pause_once() {
    let (controller, _backend, _events) = controller_with_tracks(2).await;
    controller.play(Some(0)).await;

    controller.pause().await;
    let once = phase(&controller).await;
    controller.pause().await;
    let twice = phase(&controller).await;

    assert_eq!(once, PlayerPhase::Paused);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn select_track_out_of_bounds_is_a_no_op() {
    let (controller, backend, _events) = controller_with_tracks(2).await;
    controller.select_track(7).await;
    assert_eq!(backend.loads.load(Ordering::SeqCst), 0);
    assert_eq!(phase(&controller).await, PlayerPhase::Paused);
}

#[tokio::test]
async fn seek_clamps_into_the_track() {
    let (controller, backend, _events) = controller_with_tracks(1).await;
    controller.play(Some(0)).await;

    controller.seek_to(500.0).await;
    assert_eq!(*backend.last_seek.lock(), Some(Duration::from_secs(120)));

    controller.seek_to(-5.0).await;
    assert_eq!(*backend.last_seek.lock(), Some(Duration::ZERO));

    let model = controller.model.lock().await;
    assert_eq!(model.playback_info().await.position, 0.0);
}

#[tokio::test]
async fn seek_with_unknown_duration_is_a_no_op() {
    let (controller, backend, _events) = controller_with_tracks(1).await;
    // Nothing loaded yet, duration unknown.
    controller.seek_to(30.0).await;
    assert_eq!(*backend.last_seek.lock(), None);
}

#[tokio::test]
async fn volume_steps_clamp_to_unit_range() {
    let (controller, backend, _events) = controller_with_tracks(1).await;
    for _ in 0..30 {
        controller.volume_up().await;
    }
    assert_eq!(*backend.last_volume.lock(), Some(1.0));
    for _ in 0..40 {
        controller.volume_down().await;
    }
    assert_eq!(*backend.last_volume.lock(), Some(0.0));
}

#[tokio::test]
async fn end_of_track_chains_into_the_next_one() {
    let (controller, backend, events) = controller_with_tracks(3).await;
    controller.play(Some(0)).await;
    let epoch = backend.epoch.load(Ordering::SeqCst);

    events
        .send(MediaEvent::Ended { epoch })
        .expect("listener alive");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(current_index(&controller).await, 1);
    assert_eq!(phase(&controller).await, PlayerPhase::Playing);
}

#[tokio::test]
async fn end_of_single_track_pauses_without_chaining() {
    let (controller, backend, events) = controller_with_tracks(1).await;
    controller.play(Some(0)).await;
    let epoch = backend.epoch.load(Ordering::SeqCst);
    let loads_before = backend.loads.load(Ordering::SeqCst);

    events
        .send(MediaEvent::Ended { epoch })
        .expect("listener alive");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(phase(&controller).await, PlayerPhase::Paused);
    let model = controller.model.lock().await;
    assert_eq!(model.playback_info().await.position, 0.0);
    drop(model);
    assert_eq!(backend.loads.load(Ordering::SeqCst), loads_before);
}

#[tokio::test]
async fn stale_events_from_a_superseded_source_are_discarded() {
    let (controller, backend, events) = controller_with_tracks(3).await;
    controller.play(Some(0)).await;
    let old_epoch = backend.epoch.load(Ordering::SeqCst);
    controller.play(Some(2)).await;

    // A late end-of-track from the first source must not advance anything.
    events
        .send(MediaEvent::Ended { epoch: old_epoch })
        .expect("listener alive");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(current_index(&controller).await, 2);
    assert_eq!(phase(&controller).await, PlayerPhase::Playing);
}

#[tokio::test]
async fn stale_time_updates_are_discarded() {
    let (controller, backend, events) = controller_with_tracks(2).await;
    controller.play(Some(0)).await;
    let old_epoch = backend.epoch.load(Ordering::SeqCst);
    controller.play(Some(1)).await;

    events
        .send(MediaEvent::TimeUpdate {
            epoch: old_epoch,
            position: Duration::from_secs(99),
        })
        .expect("listener alive");
    tokio::time::sleep(Duration::from_millis(50)).await;

    let model = controller.model.lock().await;
    assert_eq!(model.playback_info().await.position, 0.0);
}

#[tokio::test]
async fn logout_resets_playback_and_slots() {
    let (controller, _backend, _events) = controller_with_tracks(2).await;
    controller.start_session().await;
    controller.play(Some(0)).await;
    {
        let model = controller.model.lock().await;
        assert!(!model.registry.lock().is_empty());
    }

    controller.logout().await;

    assert_eq!(phase(&controller).await, PlayerPhase::Empty);
    let model = controller.model.lock().await;
    assert!(model.registry.lock().is_empty());
    assert_eq!(model.nav_info().await.path, "/login");
}
