//! Listener for audio backend events

use std::sync::atomic::Ordering;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::MediaEvent;
use crate::model::PlayerPhase;

use super::AppController;

impl AppController {
    /// Consume backend events for the lifetime of the session. Events are
    /// serialized in arrival order; anything tagged with an epoch older than
    /// the newest accepted load is discarded so a late event from an
    /// abandoned source cannot resurrect it.
    pub fn start_media_event_listener(&self, mut events: UnboundedReceiver<MediaEvent>) {
        let controller = self.clone();
        tracing::info!("Starting media event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let model = controller.model.lock().await;
                if model.should_quit().await {
                    tracing::debug!("Media event listener shutting down");
                    break;
                }

                let newest = controller.current_epoch.load(Ordering::SeqCst);
                match event {
                    MediaEvent::TimeUpdate { epoch, position } => {
                        if epoch < newest {
                            continue;
                        }
                        if model.player_phase().await == PlayerPhase::Playing {
                            model.set_playback_position(position.as_secs_f64()).await;
                        }
                    }
                    MediaEvent::Ended { epoch } => {
                        if epoch < newest {
                            tracing::debug!(epoch, newest, "Discarding stale end-of-track");
                            continue;
                        }
                        tracing::debug!(epoch, "End of track");
                        model.finish_track().await;
                        let more_than_one = model.playlist_len().await > 1;
                        drop(model);

                        // Autoplay continuation: chain into the next track.
                        if more_than_one {
                            controller.next_track().await;
                        }
                    }
                }
            }
        });
    }
}
