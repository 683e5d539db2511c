//! Main application model with state management

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::router::{LayoutKind, Navigator, PageKind};
use crate::topbar::{shared_registry, SharedSlotRegistry};

use super::dashboard::DashboardData;
use super::files::{Catalog, FileEntry};
use super::player::{PlaybackInfo, PlayerPhase, PlayerState, Track};
use super::types::{UiState, DOCK_ITEMS};

/// Everything the view needs to know about the current location.
#[derive(Clone, Debug)]
pub struct NavInfo {
    pub path: String,
    /// `None` renders the 404 fallback page.
    pub page: Option<PageKind>,
    pub layout: LayoutKind,
    pub params: HashMap<String, String>,
}

/// Main application model containing all state.
pub struct AppModel {
    navigator: Arc<Mutex<Navigator>>,
    player: Arc<Mutex<PlayerState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub registry: SharedSlotRegistry,
    catalog: Arc<Catalog>,
    dashboard: Arc<DashboardData>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(
        navigator: Navigator,
        catalog: Catalog,
        dashboard: DashboardData,
        initial_volume: f32,
    ) -> Self {
        Self {
            navigator: Arc::new(Mutex::new(navigator)),
            player: Arc::new(Mutex::new(PlayerState::new(initial_volume))),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            registry: shared_registry(),
            catalog: Arc::new(catalog),
            dashboard: Arc::new(dashboard),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    pub fn dashboard(&self) -> Arc<DashboardData> {
        self.dashboard.clone()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Push a navigation entry. Returns the new route title for the caller
    /// to apply to the terminal window.
    pub async fn navigate(&self, path: &str) -> Option<&'static str> {
        let mut navigator = self.navigator.lock().await;
        navigator.navigate(path);
        navigator.title()
    }

    /// Back/forward, the popstate-equivalent transitions. Returns the title
    /// when the cursor actually moved.
    pub async fn history_back(&self) -> Option<&'static str> {
        let mut navigator = self.navigator.lock().await;
        navigator.back().then(|| navigator.title()).flatten()
    }

    pub async fn history_forward(&self) -> Option<&'static str> {
        let mut navigator = self.navigator.lock().await;
        navigator.forward().then(|| navigator.title()).flatten()
    }

    pub async fn nav_info(&self) -> NavInfo {
        let navigator = self.navigator.lock().await;
        match navigator.resolved() {
            Some(resolved) => NavInfo {
                path: navigator.current_path().to_string(),
                page: Some(resolved.page),
                layout: resolved.layout,
                params: resolved.params.clone(),
            },
            None => NavInfo {
                path: navigator.current_path().to_string(),
                page: None,
                layout: LayoutKind::Main,
                params: HashMap::new(),
            },
        }
    }

    pub async fn current_page(&self) -> Option<PageKind> {
        self.navigator.lock().await.resolved().map(|r| r.page)
    }

    pub async fn current_title(&self) -> Option<&'static str> {
        self.navigator.lock().await.title()
    }

    pub async fn route_param(&self, name: &str) -> Option<String> {
        self.navigator
            .lock()
            .await
            .resolved()
            .and_then(|r| r.params.get(name).cloned())
    }

    // ========================================================================
    // Playback state
    // ========================================================================

    pub async fn load_tracks(&self, tracks: Vec<Track>) {
        self.player.lock().await.load_tracks(tracks);
    }

    pub async fn playback_info(&self) -> PlaybackInfo {
        self.player.lock().await.snapshot()
    }

    pub async fn player_phase(&self) -> PlayerPhase {
        self.player.lock().await.phase()
    }

    pub async fn playlist_len(&self) -> usize {
        self.player.lock().await.playlist_len()
    }

    pub async fn playlist_titles(&self) -> Vec<String> {
        let player = self.player.lock().await;
        (0..player.playlist_len())
            .filter_map(|i| player.track_at(i).map(|t| t.title.clone()))
            .collect()
    }

    pub async fn begin_load(&self, index: usize) -> Option<(u64, Track)> {
        self.player.lock().await.begin_load(index)
    }

    pub async fn complete_load(&self, generation: u64, duration: f64) -> bool {
        self.player.lock().await.complete_load(generation, duration)
    }

    pub async fn reject_load(&self, generation: u64) {
        self.player.lock().await.reject_load(generation);
    }

    pub async fn mark_playing(&self) {
        self.player.lock().await.mark_playing();
    }

    pub async fn set_paused(&self) {
        self.player.lock().await.set_paused();
    }

    pub async fn finish_track(&self) {
        self.player.lock().await.finish_track();
    }

    pub async fn resume_index(&self) -> Option<usize> {
        self.player.lock().await.resume_index()
    }

    pub async fn next_index(&self) -> Option<usize> {
        self.player.lock().await.next_index()
    }

    pub async fn previous_index(&self) -> Option<usize> {
        self.player.lock().await.previous_index()
    }

    pub async fn clamp_seek(&self, time: f64) -> Option<f64> {
        self.player.lock().await.clamp_seek(time)
    }

    pub async fn set_playback_position(&self, position: f64) {
        self.player.lock().await.set_position(position);
    }

    pub async fn set_volume(&self, volume: f32) -> f32 {
        self.player.lock().await.set_volume(volume)
    }

    pub async fn volume(&self) -> f32 {
        self.player.lock().await.volume()
    }

    /// Session teardown for the player.
    pub async fn reset_player(&self) {
        self.player.lock().await.reset();
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_focus(&self) {
        let mut state = self.ui_state.lock().await;
        state.focus = state.focus.next();
    }

    pub async fn dock_move(&self, delta: i64) {
        let mut state = self.ui_state.lock().await;
        state.dock_selected = step(state.dock_selected, delta, DOCK_ITEMS.len());
    }

    pub async fn selected_dock_path(&self) -> &'static str {
        let state = self.ui_state.lock().await;
        DOCK_ITEMS[state.dock_selected.min(DOCK_ITEMS.len() - 1)].1
    }

    /// Point the dock highlight at the entry for `path`, if one exists.
    pub async fn sync_dock_to_path(&self, path: &str) {
        let mut state = self.ui_state.lock().await;
        if let Some(index) = DOCK_ITEMS.iter().position(|(_, p)| *p == path) {
            state.dock_selected = index;
        }
    }

    pub async fn files_move(&self, delta: i64) {
        let mut state = self.ui_state.lock().await;
        let count = self.catalog.children_of(&state.files_path).len();
        state.files_selected = step(state.files_selected, delta, count);
    }

    pub async fn selected_file(&self) -> Option<FileEntry> {
        let state = self.ui_state.lock().await;
        self.catalog
            .children_of(&state.files_path)
            .get(state.files_selected)
            .map(|e| (*e).clone())
    }

    pub async fn set_files_path(&self, path: &str) {
        let mut state = self.ui_state.lock().await;
        state.files_path = path.to_string();
        state.files_selected = 0;
    }

    pub async fn files_path(&self) -> String {
        self.ui_state.lock().await.files_path.clone()
    }

    pub async fn toggle_view_mode(&self) {
        let mut state = self.ui_state.lock().await;
        state.view_mode = state.view_mode.toggle();
    }

    pub async fn home_move(&self, delta: i64) {
        let mut state = self.ui_state.lock().await;
        state.home_selected = step(
            state.home_selected,
            delta,
            self.dashboard.favorite_folders.len(),
        );
    }

    pub async fn selected_favorite_path(&self) -> Option<String> {
        let state = self.ui_state.lock().await;
        self.dashboard
            .favorite_folders
            .get(state.home_selected)
            .map(|f| f.path.clone())
    }

    pub async fn set_authenticated(&self, authenticated: bool) {
        self.ui_state.lock().await.authenticated = authenticated;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.ui_state.lock().await.authenticated
    }

    // ========================================================================
    // Track picker overlay
    // ========================================================================

    pub async fn open_track_picker(&self) {
        let current = self.player.lock().await.current_index();
        let mut state = self.ui_state.lock().await;
        state.show_track_picker = true;
        state.playlist_selected = current;
    }

    pub async fn hide_track_picker(&self) {
        self.ui_state.lock().await.show_track_picker = false;
    }

    pub async fn is_track_picker_open(&self) -> bool {
        self.ui_state.lock().await.show_track_picker
    }

    pub async fn track_picker_move(&self, delta: i64) {
        let count = self.player.lock().await.playlist_len();
        let mut state = self.ui_state.lock().await;
        state.playlist_selected = step(state.playlist_selected, delta, count);
    }

    pub async fn track_picker_selection(&self) -> usize {
        self.ui_state.lock().await.playlist_selected
    }

    // ========================================================================
    // Help popup and errors
    // ========================================================================

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

/// Move a selection by `delta`, clamped to `[0, count)`.
fn step(current: usize, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let target = current as i64 + delta;
    target.clamp(0, count as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps_at_both_ends() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 1, 5), 3);
        assert_eq!(step(0, 1, 0), 0);
    }
}
