//! Playback control methods

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::model::PlayerPhase;

use super::AppController;

/// Step size for the volume keys.
const VOLUME_STEP: f32 = 0.05;
/// Step size for the seek keys, seconds.
const SEEK_STEP: f64 = 5.0;

impl AppController {
    /// Start playback. With an index, switch to that track first and wait
    /// for its source to become ready; without one, resume the current
    /// track. Failures are logged and leave the player paused.
    pub async fn play(&self, index: Option<usize>) {
        let target = match index {
            Some(index) => index,
            None => {
                let model = self.model.lock().await;
                let Some(resume) = model.resume_index().await else {
                    // Empty playlist, nothing to do.
                    return;
                };
                if *self.loaded.lock().await == Some(resume) {
                    // The backend already holds this track, resume it.
                    drop(model);
                    self.resume_loaded().await;
                    return;
                }
                resume
            }
        };

        let model = self.model.lock().await;
        let Some((generation, track)) = model.begin_load(target).await else {
            tracing::debug!(target, "Ignoring play for out-of-bounds index");
            return;
        };
        let volume = model.volume().await;
        drop(model);

        tracing::debug!(track = %track.title, target, "Loading track");

        match self.audio.load(&track.source).await {
            Ok(loaded) => {
                self.current_epoch.store(loaded.epoch, Ordering::SeqCst);
                *self.loaded.lock().await = Some(target);

                let duration = loaded
                    .duration
                    .map(|d| d.as_secs_f64())
                    .or(track.duration_hint)
                    .unwrap_or(0.0);

                let model = self.model.lock().await;
                if !model.complete_load(generation, duration).await {
                    // A newer transition superseded this load while the
                    // source was getting ready; let it win.
                    tracing::debug!(track = %track.title, "Discarding stale load completion");
                    return;
                }
                drop(model);

                self.audio.set_volume(volume).await;
                if let Err(e) = self.audio.play().await {
                    tracing::warn!(track = %track.title, error = %e, "Playback refused");
                    let model = self.model.lock().await;
                    model.set_paused().await;
                    model.set_error(Self::format_error(&e)).await;
                } else {
                    tracing::info!(track_id = %track.id, track = %track.title, "Playing");
                }
            }
            Err(e) => {
                tracing::warn!(track = %track.title, error = %e, "Load failed");
                let model = self.model.lock().await;
                model.reject_load(generation).await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    async fn resume_loaded(&self) {
        match self.audio.play().await {
            Ok(()) => {
                let model = self.model.lock().await;
                model.mark_playing().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Resume refused");
                let model = self.model.lock().await;
                model.set_paused().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Pause playback. Idempotent.
    pub async fn pause(&self) {
        self.audio.pause().await;
        let model = self.model.lock().await;
        model.set_paused().await;
    }

    pub async fn toggle_play_pause(&self) {
        let phase = {
            let model = self.model.lock().await;
            model.player_phase().await
        };
        match phase {
            PlayerPhase::Playing | PlayerPhase::Loading => self.pause().await,
            PlayerPhase::Paused | PlayerPhase::Empty => self.play(None).await,
        }
    }

    /// Advance circularly; a single-track playlist restarts itself.
    pub async fn next_track(&self) {
        let next = {
            let model = self.model.lock().await;
            model.next_index().await
        };
        if let Some(index) = next {
            self.play(Some(index)).await;
        }
    }

    /// Step back circularly; a no-op with fewer than two tracks.
    pub async fn previous_track(&self) {
        let previous = {
            let model = self.model.lock().await;
            model.previous_index().await
        };
        if let Some(index) = previous {
            self.play(Some(index)).await;
        }
    }

    /// Bounds-checked selection that begins playback.
    pub async fn select_track(&self, index: usize) {
        let in_bounds = {
            let model = self.model.lock().await;
            index < model.playlist_len().await
        };
        if in_bounds {
            self.play(Some(index)).await;
        }
    }

    /// Seek to an absolute position, clamped to `[0, duration]`. Unknown
    /// duration makes this a no-op.
    pub async fn seek_to(&self, time: f64) {
        let clamped = {
            let model = self.model.lock().await;
            model.clamp_seek(time).await
        };
        let Some(time) = clamped else {
            return;
        };
        match self.audio.seek(Duration::from_secs_f64(time)).await {
            Ok(()) => {
                let model = self.model.lock().await;
                model.set_playback_position(time).await;
            }
            Err(e) => {
                // Degrade quietly, the position just stays where it was.
                tracing::debug!(error = %e, "Seek ignored");
            }
        }
    }

    pub async fn seek_forward(&self) {
        let position = {
            let model = self.model.lock().await;
            model.playback_info().await.position
        };
        self.seek_to(position + SEEK_STEP).await;
    }

    pub async fn seek_backward(&self) {
        let position = {
            let model = self.model.lock().await;
            model.playback_info().await.position
        };
        self.seek_to(position - SEEK_STEP).await;
    }

    /// Clamp and apply a volume change.
    pub async fn set_volume(&self, volume: f32) {
        let applied = {
            let model = self.model.lock().await;
            model.set_volume(volume).await
        };
        self.audio.set_volume(applied).await;
    }

    pub async fn volume_up(&self) {
        let volume = {
            let model = self.model.lock().await;
            model.volume().await
        };
        self.set_volume(volume + VOLUME_STEP).await;
    }

    pub async fn volume_down(&self) {
        let volume = {
            let model = self.model.lock().await;
            model.volume().await
        };
        self.set_volume(volume - VOLUME_STEP).await;
    }
}
