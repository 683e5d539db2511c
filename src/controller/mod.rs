//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and manages playback operations.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Route changes, history, slot lifecycle, session scope
//! - `playback`: Playback control methods
//! - `media_events`: Audio backend event listener

mod input;
mod media_events;
mod navigation;
mod playback;

#[cfg(test)]
mod tests;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::audio::{AudioBackend, AudioError};
use crate::model::AppModel;
use crate::topbar::SlotGuard;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) audio: Arc<dyn AudioBackend>,
    /// Slots owned by the current page; replaced on every route change.
    pub(crate) page_slots: Arc<Mutex<Vec<SlotGuard>>>,
    /// Slots owned by the session (brand, clock); dropped on logout.
    pub(crate) session_slots: Arc<Mutex<Vec<SlotGuard>>>,
    /// Playlist index the backend currently has loaded, to tell "resume"
    /// apart from "load from scratch".
    pub(crate) loaded: Arc<Mutex<Option<usize>>>,
    /// Newest accepted backend epoch; events below it are stale.
    pub(crate) current_epoch: Arc<AtomicU64>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, audio: Arc<dyn AudioBackend>) -> Self {
        Self {
            model,
            audio,
            page_slots: Arc::new(Mutex::new(Vec::new())),
            session_slots: Arc::new(Mutex::new(Vec::new())),
            loaded: Arc::new(Mutex::new(None)),
            current_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn format_error(error: &AudioError) -> String {
        match error {
            AudioError::OutputUnavailable(_) => {
                "Audio output is not available on this system.".to_string()
            }
            AudioError::SourceUnavailable { path, .. } => {
                format!("Cannot open {path}.")
            }
            AudioError::DecodeFailed { path, .. } => {
                format!("Cannot decode {path}.")
            }
            AudioError::NothingLoaded => "Nothing is loaded yet.".to_string(),
            AudioError::SeekUnsupported => "This track cannot be seeked.".to_string(),
        }
    }
}
