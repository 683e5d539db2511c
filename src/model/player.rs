//! Playback state machine shared by every interested UI

use std::path::PathBuf;

/// One playlist entry. `source` is any locator the audio backend can
/// resolve; nothing is fetched or validated here.
#[derive(Clone, Debug)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub source: PathBuf,
    pub artist: Option<String>,
    /// Seconds, advisory until the backend reports the real duration.
    pub duration_hint: Option<f64>,
}

/// Coordinator phases. `Loading` only exists during an in-flight play
/// transition; `Empty` is reachable whenever the playlist is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    Empty,
    Paused,
    Loading,
    Playing,
}

/// Snapshot handed to the view each frame.
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub track_title: Option<String>,
    pub artist: Option<String>,
    pub phase: PlayerPhase,
    pub position: f64,
    pub duration: f64,
    pub volume: f32,
    pub current_index: usize,
    pub playlist_len: usize,
}

/// Owned playback state. All transitions are synchronous methods here; the
/// controller drives them from user commands and media events. Loads carry a
/// generation so a completion belonging to a superseded transition cannot
/// resurrect an abandoned track.
pub struct PlayerState {
    playlist: Vec<Track>,
    current_index: usize,
    phase: PlayerPhase,
    position: f64,
    duration: f64,
    volume: f32,
    generation: u64,
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            playlist: Vec::new(),
            current_index: 0,
            phase: PlayerPhase::Empty,
            position: 0.0,
            duration: 0.0,
            volume: volume.clamp(0.0, 1.0),
            generation: 0,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn playlist_len(&self) -> usize {
        self.playlist.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.playlist.get(index)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn snapshot(&self) -> PlaybackInfo {
        PlaybackInfo {
            track_title: self.current_track().map(|t| t.title.clone()),
            artist: self.current_track().and_then(|t| t.artist.clone()),
            phase: self.phase,
            position: self.position,
            duration: self.duration,
            volume: self.volume,
            current_index: self.current_index,
            playlist_len: self.playlist.len(),
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Append tracks. When nothing was current, index 0 becomes current
    /// without starting playback.
    pub fn load_tracks(&mut self, tracks: Vec<Track>) {
        let was_empty = self.playlist.is_empty();
        self.playlist.extend(tracks);
        if was_empty && !self.playlist.is_empty() {
            self.current_index = 0;
            self.phase = PlayerPhase::Paused;
            if let Some(hint) = self.playlist[0].duration_hint {
                self.duration = hint;
            }
        }
    }

    /// Start a load transition toward `index`. Out-of-bounds indices are a
    /// no-op. Returns the generation of this load and the target track.
    pub fn begin_load(&mut self, index: usize) -> Option<(u64, Track)> {
        let track = self.playlist.get(index)?.clone();
        self.current_index = index;
        self.phase = PlayerPhase::Loading;
        self.position = 0.0;
        self.duration = track.duration_hint.unwrap_or(0.0);
        self.generation += 1;
        Some((self.generation, track))
    }

    /// The source for `generation` became ready. Stale completions (a newer
    /// load started, or the user paused meanwhile) return false and change
    /// nothing.
    pub fn complete_load(&mut self, generation: u64, duration: f64) -> bool {
        if generation != self.generation || self.phase != PlayerPhase::Loading {
            return false;
        }
        self.duration = duration;
        self.phase = PlayerPhase::Playing;
        true
    }

    /// The source for `generation` failed to start. Reverts to paused; never
    /// fatal.
    pub fn reject_load(&mut self, generation: u64) {
        if generation == self.generation && self.phase == PlayerPhase::Loading {
            self.phase = PlayerPhase::Paused;
        }
    }

    /// Resume confirmed by the backend for the already-loaded track.
    pub fn mark_playing(&mut self) {
        if !self.playlist.is_empty() {
            self.phase = PlayerPhase::Playing;
        }
    }

    /// Pause. Idempotent; an in-flight load is demoted so its completion is
    /// discarded by the generation/phase check.
    pub fn set_paused(&mut self) {
        if self.phase != PlayerPhase::Empty {
            self.phase = PlayerPhase::Paused;
        }
    }

    /// Current track finished: paused, position back to 0.
    pub fn finish_track(&mut self) {
        if self.phase != PlayerPhase::Empty {
            self.phase = PlayerPhase::Paused;
            self.position = 0.0;
        }
    }

    /// Index to resume when `play` is called with no target.
    pub fn resume_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    /// Circular successor. `None` on an empty playlist; a single-track
    /// playlist cycles to itself.
    pub fn next_index(&self) -> Option<usize> {
        let n = self.playlist.len();
        if n == 0 {
            None
        } else {
            Some((self.current_index + 1) % n)
        }
    }

    /// Circular predecessor. `None` (a no-op upstream) when the playlist has
    /// one track or none.
    pub fn previous_index(&self) -> Option<usize> {
        let n = self.playlist.len();
        if n <= 1 {
            None
        } else {
            Some((self.current_index + n - 1) % n)
        }
    }

    /// Clamp a seek target to `[0, duration]`; `None` while the duration is
    /// unknown.
    pub fn clamp_seek(&self, time: f64) -> Option<f64> {
        if self.duration <= 0.0 {
            None
        } else {
            Some(time.clamp(0.0, self.duration))
        }
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        };
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = volume.clamp(0.0, 1.0);
        self.volume
    }

    /// Session teardown: back to the empty state.
    pub fn reset(&mut self) {
        self.playlist.clear();
        self.current_index = 0;
        self.phase = PlayerPhase::Empty;
        self.position = 0.0;
        self.duration = 0.0;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            source: PathBuf::from(format!("/music/{id}.mp3")),
            artist: None,
            duration_hint: None,
        }
    }

    fn loaded(n: usize) -> PlayerState {
        let mut state = PlayerState::new(0.75);
        state.load_tracks((0..n).map(|i| track(&format!("t{i}"))).collect());
        state
    }

    #[test]
    fn load_tracks_selects_first_without_autostart() {
        let state = loaded(3);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.phase(), PlayerPhase::Paused);
    }

    #[test]
    fn load_tracks_appends_and_keeps_current() {
        let mut state = loaded(2);
        state.begin_load(1);
        state.load_tracks(vec![track("late")]);
        assert_eq!(state.playlist_len(), 3);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn next_cycles_back_to_start_after_n_steps() {
        let mut state = loaded(3);
        let start = state.current_index();
        for _ in 0..3 {
            let next = state.next_index().unwrap();
            state.begin_load(next);
        }
        assert_eq!(state.current_index(), start);
    }

    #[test]
    fn next_on_single_track_cycles_to_itself() {
        let state = loaded(1);
        assert_eq!(state.next_index(), Some(0));
    }

    #[test]
    fn previous_on_single_track_is_none() {
        let state = loaded(1);
        assert_eq!(state.previous_index(), None);
        assert_eq!(loaded(0).previous_index(), None);
    }

    #[test]
    fn previous_wraps_from_start() {
        let state = loaded(3);
        assert_eq!(state.previous_index(), Some(2));
    }

    #[test]
    fn pause_is_idempotent() {
        let mut state = loaded(2);
        let (generation, _) = state.begin_load(0).unwrap();
        state.complete_load(generation, 120.0);
        state.set_paused();
        let once = state.snapshot();
        state.set_paused();
        let twice = state.snapshot();
        assert_eq!(once.phase, twice.phase);
        assert_eq!(once.position, twice.position);
        assert_eq!(once.current_index, twice.current_index);
    }

    #[test]
    fn empty_playlist_has_no_resume_target() {
        let state = PlayerState::new(0.5);
        assert_eq!(state.resume_index(), None);
        assert_eq!(state.phase(), PlayerPhase::Empty);
    }

    #[test]
    fn stale_completion_cannot_resurrect_an_abandoned_load() {
        let mut state = loaded(3);
        let (old_generation, _) = state.begin_load(0).unwrap();
        let (new_generation, _) = state.begin_load(1).unwrap();

        assert!(!state.complete_load(old_generation, 90.0));
        assert_eq!(state.phase(), PlayerPhase::Loading);
        assert_eq!(state.current_index(), 1);

        assert!(state.complete_load(new_generation, 240.0));
        assert_eq!(state.phase(), PlayerPhase::Playing);
        assert_eq!(state.duration(), 240.0);
    }

    #[test]
    fn pausing_during_load_discards_the_completion() {
        let mut state = loaded(1);
        let (generation, _) = state.begin_load(0).unwrap();
        state.set_paused();
        assert!(!state.complete_load(generation, 90.0));
        assert_eq!(state.phase(), PlayerPhase::Paused);
    }

    #[test]
    fn rejected_load_reverts_to_paused() {
        let mut state = loaded(2);
        let (generation, _) = state.begin_load(1).unwrap();
        state.reject_load(generation);
        assert_eq!(state.phase(), PlayerPhase::Paused);
        // The selection survives even though playback did not start.
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut state = loaded(1);
        let (generation, _) = state.begin_load(0).unwrap();
        state.complete_load(generation, 120.0);
        assert_eq!(state.clamp_seek(-5.0), Some(0.0));
        assert_eq!(state.clamp_seek(500.0), Some(120.0));
        assert_eq!(state.clamp_seek(60.0), Some(60.0));
    }

    #[test]
    fn seek_with_unknown_duration_is_none() {
        let state = loaded(1);
        assert_eq!(state.clamp_seek(10.0), None);
    }

    #[test]
    fn volume_clamps_to_unit_range() {
        let mut state = PlayerState::new(0.75);
        assert_eq!(state.set_volume(1.7), 1.0);
        assert_eq!(state.set_volume(-0.3), 0.0);
        assert_eq!(state.set_volume(0.4), 0.4);
    }

    #[test]
    fn finish_track_pauses_and_rewinds() {
        let mut state = loaded(2);
        let (generation, _) = state.begin_load(0).unwrap();
        state.complete_load(generation, 100.0);
        state.set_position(100.0);
        state.finish_track();
        assert_eq!(state.phase(), PlayerPhase::Paused);
        assert_eq!(state.position(), 0.0);
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut state = loaded(3);
        state.reset();
        assert_eq!(state.phase(), PlayerPhase::Empty);
        assert_eq!(state.playlist_len(), 0);
        assert!(state.current_track().is_none());
    }
}
