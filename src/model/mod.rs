//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state)
//! - `files`: The virtual file catalog and demo data
//! - `dashboard`: Dashboard stats, favorites and activity data
//! - `player`: The shared playback state machine
//! - `app_model`: Main application model with state management methods

mod app_model;
mod dashboard;
mod files;
mod player;
mod types;

pub use types::{FileKind, FocusPane, UiState, ViewMode, DOCK_ITEMS};

pub use files::{sample_catalog, Catalog, FileEntry, Permissions};

pub use dashboard::{
    sample_dashboard, weekly_activity, ActivityEntry, ActivityKind, DashboardData,
    FavoriteFile, FavoriteFolder, QuickAccessItem, SystemStats,
};

pub use player::{PlaybackInfo, PlayerPhase, PlayerState, Track};

pub use app_model::{AppModel, NavInfo};
