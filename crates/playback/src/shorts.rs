//! The shorts viewer: automatic, interruptible story → scene playback.
//!
//! ```text
//!            open(playlist, i)
//!   Closed ─────────────────────► Playing ◄──── resume ────┐
//!     ▲                             │  │                   │
//!     │          close              │  └──── pause ───► Paused
//!     └─────────────────────────────┴──────────────────────┘
//! ```
//!
//! While Playing the timer is armed once per (story, scene) position. A
//! firing moves to the next scene, or to the next story once the current
//! story's scenes are exhausted. Every change of the current story is
//! reported to the [`VisitSink`] exactly once.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use st_common::{Notice, PlaybackConfig, StoryId};

use crate::intent::ViewerIntent;
use crate::playlist::{Playlist, PlaylistEntry};
use crate::sink::VisitSink;
use crate::snapshot::PlaybackSnapshot;
use crate::timer::{ManualTimer, PlaybackTimer, TimerTick};

pub const LIKED_MESSAGE: &str = "Added to favorites! ❤️";
pub const UNLIKED_MESSAGE: &str = "Removed from favorites";
pub const SHARED_MESSAGE: &str = "Story link copied to clipboard!";

/// Viewer lifecycle state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerState {
    /// Not showing anything. Initial and terminal state of a session.
    #[default]
    Closed,
    /// Showing a story and auto-advancing.
    Playing,
    /// Showing a story, timer disarmed.
    Paused,
}

/// Drives the shorts viewer over a [`Playlist`].
///
/// The timer and the visit sink are injected so the same controller runs
/// against a wall-clock [`ThreadTimer`](crate::ThreadTimer) in the CLI and
/// a [`ManualTimer`] in tests.
pub struct ShortsController<T: PlaybackTimer, S: VisitSink> {
    config: PlaybackConfig,
    timer: T,
    sink: S,
    state: ViewerState,
    playlist: Playlist,
    story_index: usize,
    scene_index: usize,
    liked: bool,
    muted: bool,
    /// Tick of the outstanding arm, if any. Any other tick is stale.
    armed: Option<TimerTick>,
    next_tick: u64,
}

impl<T: PlaybackTimer, S: VisitSink> ShortsController<T, S> {
    pub fn new(config: PlaybackConfig, timer: T, sink: S) -> Self {
        Self {
            config,
            timer,
            sink,
            state: ViewerState::Closed,
            playlist: Playlist::default(),
            story_index: 0,
            scene_index: 0,
            liked: false,
            muted: false,
            armed: None,
            next_tick: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Open the viewer on `playlist` at `initial_story`, clamped into range.
    ///
    /// An empty playlist leaves the viewer closed. Opening an open viewer
    /// restarts the session.
    pub fn open(&mut self, playlist: Playlist, initial_story: usize) {
        self.disarm();

        let Some(story_index) = playlist.clamp_index(initial_story) else {
            if let Err(e) = playlist.check_index(initial_story) {
                warn!(error = %e, "Shorts viewer not opened");
            }
            self.state = ViewerState::Closed;
            self.playlist = Playlist::default();
            return;
        };
        if let Err(e) = playlist.check_index(initial_story) {
            debug!(error = %e, clamped = story_index, "Initial story index clamped");
        }

        self.playlist = playlist;
        self.story_index = story_index;
        self.scene_index = 0;
        self.liked = false;
        self.state = ViewerState::Playing;

        info!(
            story_index,
            stories = self.playlist.len(),
            "Shorts viewer opened"
        );
        self.notify_visit();
        self.arm();
    }

    /// Close the viewer. Any armed timer is cancelled first.
    pub fn close(&mut self) {
        if self.state == ViewerState::Closed {
            return;
        }
        self.disarm();
        self.state = ViewerState::Closed;
        self.playlist = Playlist::default();
        self.story_index = 0;
        self.scene_index = 0;
        self.liked = false;
        info!("Shorts viewer closed");
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// Stop auto-advancing. No effect unless Playing.
    pub fn pause(&mut self) {
        if self.state != ViewerState::Playing {
            return;
        }
        self.disarm();
        self.state = ViewerState::Paused;
        debug!(
            story = self.story_index,
            scene = self.scene_index,
            "Playback paused"
        );
    }

    /// Resume auto-advancing with a fresh, full interval.
    pub fn resume(&mut self) {
        if self.state != ViewerState::Paused {
            return;
        }
        self.state = ViewerState::Playing;
        debug!(
            story = self.story_index,
            scene = self.scene_index,
            "Playback resumed"
        );
        self.arm();
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state {
            ViewerState::Playing => self.pause(),
            ViewerState::Paused => self.resume(),
            ViewerState::Closed => {}
        }
    }

    /// Flip the liked flag of the current story. Returns the new value.
    pub fn toggle_like(&mut self) -> bool {
        if self.state != ViewerState::Closed {
            self.liked = !self.liked;
            debug!(liked = self.liked, "Like toggled");
        }
        self.liked
    }

    /// Flip the muted flag. Returns the new value. Survives reopening.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        debug!(muted = self.muted, "Mute toggled");
        self.muted
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Jump to the next story. Returns `false` (and does nothing) on the
    /// last story.
    pub fn go_to_next_story(&mut self) -> bool {
        if self.state == ViewerState::Closed || !self.has_next_story() {
            return false;
        }
        self.enter_story(self.story_index + 1);
        true
    }

    /// Jump to the previous story. Returns `false` (and does nothing) on
    /// the first story.
    pub fn go_to_prev_story(&mut self) -> bool {
        if self.state == ViewerState::Closed || !self.has_prev_story() {
            return false;
        }
        self.enter_story(self.story_index - 1);
        true
    }

    /// Deliver a fired timer tick. Returns `true` if the position changed.
    ///
    /// Ticks that do not match the outstanding arm are ignored.
    pub fn on_timer_fired(&mut self, tick: TimerTick) -> bool {
        if self.armed != Some(tick) {
            debug!(tick = tick.0, "Stale timer tick ignored");
            return false;
        }
        self.armed = None;
        if self.state != ViewerState::Playing {
            return false;
        }

        let scene_count = self.current_entry().map_or(1, PlaylistEntry::scene_count);
        if self.scene_index + 1 < scene_count {
            self.scene_index += 1;
            debug!(
                story = self.story_index,
                scene = self.scene_index,
                "Auto-advanced scene"
            );
            self.arm();
            return true;
        }

        if self.config.auto_advance_stories && self.has_next_story() {
            debug!(from = self.story_index, "Auto-advancing story");
            self.enter_story(self.story_index + 1);
            return true;
        }

        debug!(
            story = self.story_index,
            scene = self.scene_index,
            "Reached end of content; auto-advance halted"
        );
        false
    }

    /// Apply a user intent. Returns a notice for the surface to show, if
    /// the action produces one.
    pub fn handle(&mut self, intent: ViewerIntent) -> Option<Notice> {
        match intent {
            ViewerIntent::Close => self.close(),
            ViewerIntent::TogglePlayPause => self.toggle_play_pause(),
            ViewerIntent::ToggleLike => {
                if self.state == ViewerState::Closed {
                    return None;
                }
                let message = if self.toggle_like() {
                    LIKED_MESSAGE
                } else {
                    UNLIKED_MESSAGE
                };
                return Some(Notice::success(message));
            }
            ViewerIntent::ToggleMute => {
                self.toggle_mute();
            }
            ViewerIntent::NextStory => {
                self.go_to_next_story();
            }
            ViewerIntent::PrevStory => {
                self.go_to_prev_story();
            }
            ViewerIntent::Share => {
                if self.state == ViewerState::Closed {
                    return None;
                }
                return Some(Notice::success(SHARED_MESSAGE));
            }
            ViewerIntent::Tap(zone) => {
                if let Some(intent) = zone.intent() {
                    return self.handle(intent);
                }
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current view, or `None` while closed.
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        if self.state == ViewerState::Closed {
            return None;
        }
        let entry = self.current_entry()?;
        Some(PlaybackSnapshot {
            story_index: self.story_index,
            scene_index: self.scene_index,
            story_id: entry.story_id().clone(),
            story_count: self.playlist.len(),
            scene_count: entry.scene_count(),
            is_playing: self.state == ViewerState::Playing,
            is_liked: self.liked,
            is_muted: self.muted,
            has_next_story: self.has_next_story(),
            has_prev_story: self.has_prev_story(),
        })
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ViewerState::Closed
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_story_id(&self) -> Option<&StoryId> {
        if self.state == ViewerState::Closed {
            return None;
        }
        self.current_entry().map(PlaylistEntry::story_id)
    }

    pub fn is_timer_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn has_next_story(&self) -> bool {
        self.story_index + 1 < self.playlist.len()
    }

    fn has_prev_story(&self) -> bool {
        self.story_index > 0
    }

    fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.playlist.get(self.story_index)
    }

    /// Move to another story: scene 0, like cleared, visit reported, timer
    /// restarted when playing.
    fn enter_story(&mut self, index: usize) {
        self.disarm();
        self.story_index = index;
        self.scene_index = 0;
        self.liked = false;
        self.notify_visit();
        if self.state == ViewerState::Playing {
            self.arm();
        }
    }

    fn notify_visit(&mut self) {
        let Some(id) = self.playlist.get(self.story_index).map(|e| e.story_id().clone()) else {
            return;
        };
        debug!(story_id = %id, index = self.story_index, "Story visited");
        self.sink.story_visited(&id);
    }

    fn arm(&mut self) {
        self.next_tick += 1;
        let tick = TimerTick(self.next_tick);
        self.armed = Some(tick);
        self.timer.schedule(self.config.scene_interval(), tick);
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.timer.cancel();
        }
    }
}

impl<S: VisitSink> ShortsController<ManualTimer, S> {
    /// Advance the virtual clock and deliver the tick if it fired.
    pub fn advance(&mut self, by: std::time::Duration) -> bool {
        match self.timer.advance(by) {
            Some(tick) => self.on_timer_fired(tick),
            None => false,
        }
    }

    /// Jump the virtual clock to the armed deadline and deliver the tick.
    /// Returns `false` if nothing was armed.
    pub fn fire_next(&mut self) -> bool {
        match self.timer.fire() {
            Some(tick) => self.on_timer_fired(tick),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::TapZone;
    use crate::sink::VisitLog;
    use std::time::Duration;

    type Controller = ShortsController<ManualTimer, VisitLog>;

    fn controller() -> Controller {
        ShortsController::new(PlaybackConfig::default(), ManualTimer::new(), VisitLog::new())
    }

    fn playlist(counts: &[usize]) -> Playlist {
        Playlist::from_scene_counts(counts).unwrap()
    }

    fn position(c: &Controller) -> (usize, usize) {
        let snap = c.snapshot().unwrap();
        (snap.story_index, snap.scene_index)
    }

    #[test]
    fn new_controller_is_closed() {
        let c = controller();
        assert_eq!(c.state(), ViewerState::Closed);
        assert!(c.snapshot().is_none());
        assert!(c.current_story_id().is_none());
        assert!(!c.timer().is_armed());
    }

    #[test]
    fn open_empty_playlist_stays_inert() {
        let mut c = controller();
        c.open(Playlist::default(), 0);
        assert_eq!(c.state(), ViewerState::Closed);
        assert!(c.sink().is_empty());
        assert_eq!(c.timer().schedule_count(), 0);
    }

    #[test]
    fn open_arms_configured_interval() {
        let config = PlaybackConfig {
            scene_interval_ms: 1500,
            ..PlaybackConfig::default()
        };
        let mut c = ShortsController::new(config, ManualTimer::new(), VisitLog::new());
        c.open(playlist(&[2]), 0);
        assert_eq!(c.timer().remaining(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn timer_on_paused_story_does_nothing() {
        let mut c = controller();
        c.open(playlist(&[3]), 0);
        c.pause();
        c.pause();
        assert_eq!(c.state(), ViewerState::Paused);
        assert!(!c.timer().is_armed());
        assert!(!c.advance(Duration::from_secs(60)));
        assert_eq!(position(&c), (0, 0));
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut c = controller();
        c.open(playlist(&[3, 1]), 0);
        let first = TimerTick(1);
        c.go_to_next_story();
        // The tick armed at open was replaced by navigation.
        assert!(!c.on_timer_fired(first));
        assert_eq!(position(&c), (1, 0));
    }

    #[test]
    fn tick_after_close_is_ignored() {
        let mut c = controller();
        c.open(playlist(&[3]), 0);
        c.close();
        assert!(!c.on_timer_fired(TimerTick(1)));
        assert_eq!(c.state(), ViewerState::Closed);
        assert!(!c.timer().is_armed());
    }

    #[test]
    fn like_resets_on_story_change_mute_persists() {
        let mut c = controller();
        c.open(playlist(&[1, 1]), 0);
        assert!(c.toggle_like());
        assert!(c.toggle_mute());
        // Toggles leave the timer alone.
        assert_eq!(c.timer().schedule_count(), 1);

        c.go_to_next_story();
        let snap = c.snapshot().unwrap();
        assert!(!snap.is_liked);
        assert!(snap.is_muted);

        c.close();
        c.open(playlist(&[1]), 0);
        assert!(c.is_muted());
    }

    #[test]
    fn navigation_while_paused_does_not_rearm() {
        let mut c = controller();
        c.open(playlist(&[1, 1]), 0);
        c.pause();
        assert!(c.go_to_next_story());
        assert_eq!(c.state(), ViewerState::Paused);
        assert!(!c.timer().is_armed());
        assert_eq!(c.sink().len(), 2);
    }

    #[test]
    fn navigation_restarts_window() {
        let mut c = controller();
        c.open(playlist(&[2, 2]), 0);
        c.advance(Duration::from_millis(3000));
        c.go_to_next_story();
        assert_eq!(c.timer().remaining(), Some(Duration::from_millis(4000)));
        assert!(!c.advance(Duration::from_millis(3999)));
        assert!(c.advance(Duration::from_millis(1)));
        assert_eq!(position(&c), (1, 1));
    }

    #[test]
    fn stories_do_not_chain_when_auto_advance_disabled() {
        let config = PlaybackConfig {
            auto_advance_stories: false,
            ..PlaybackConfig::default()
        };
        let mut c = ShortsController::new(config, ManualTimer::new(), VisitLog::new());
        c.open(playlist(&[2, 2]), 0);
        assert!(c.fire_next());
        assert!(!c.fire_next());
        assert_eq!(position(&c), (0, 1));
        assert_eq!(c.state(), ViewerState::Playing);
        assert!(!c.is_timer_armed());
    }

    #[test]
    fn handle_like_and_share_notices() {
        let mut c = controller();
        assert_eq!(c.handle(ViewerIntent::ToggleLike), None);

        c.open(playlist(&[1]), 0);
        assert_eq!(
            c.handle(ViewerIntent::ToggleLike),
            Some(Notice::success(LIKED_MESSAGE))
        );
        assert_eq!(
            c.handle(ViewerIntent::ToggleLike),
            Some(Notice::success(UNLIKED_MESSAGE))
        );
        assert_eq!(
            c.handle(ViewerIntent::Share),
            Some(Notice::success(SHARED_MESSAGE))
        );
        assert_eq!(c.handle(ViewerIntent::TogglePlayPause), None);
        assert_eq!(c.state(), ViewerState::Paused);
        c.handle(ViewerIntent::Close);
        assert_eq!(c.state(), ViewerState::Closed);
    }

    #[test]
    fn handle_taps_navigate() {
        let mut c = controller();
        c.open(playlist(&[1, 1, 1]), 1);
        c.handle(ViewerIntent::Tap(TapZone::Lower));
        assert_eq!(position(&c), (2, 0));
        c.handle(ViewerIntent::Tap(TapZone::Middle));
        assert_eq!(position(&c), (2, 0));
        c.handle(ViewerIntent::Tap(TapZone::Upper));
        assert_eq!(position(&c), (1, 0));
    }

    #[test]
    fn reopen_restarts_session() {
        let mut c = controller();
        c.open(playlist(&[2, 2]), 1);
        c.fire_next();
        c.open(playlist(&[3]), 0);
        assert_eq!(position(&c), (0, 0));
        assert_eq!(c.snapshot().unwrap().story_count, 1);
        assert_eq!(c.sink().len(), 2);
    }
}
