//! Single-story viewer, stepping through one story's scenes.
//!
//! Opens paused on the first scene. While playing, each scene stays on
//! screen for its own duration; after the last scene the viewer pauses
//! itself.

use std::time::Duration;

use tracing::{debug, info};

use st_common::{Story, StoryId};

use crate::snapshot::SceneViewerSnapshot;
use crate::timer::{ManualTimer, PlaybackTimer, TimerTick};

#[derive(Clone, Debug)]
struct OpenStory {
    id: StoryId,
    durations: Vec<Duration>,
}

pub struct SceneViewer<T: PlaybackTimer> {
    timer: T,
    story: Option<OpenStory>,
    scene_index: usize,
    playing: bool,
    armed: Option<TimerTick>,
    next_tick: u64,
}

impl<T: PlaybackTimer> SceneViewer<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            story: None,
            scene_index: 0,
            playing: false,
            armed: None,
            next_tick: 0,
        }
    }

    /// Show `story` from its first scene, paused.
    pub fn open(&mut self, story: &Story) {
        self.disarm();
        let durations = story
            .scenes()
            .iter()
            .map(|scene| scene.display_time())
            .collect();
        self.story = Some(OpenStory {
            id: story.id().clone(),
            durations,
        });
        self.scene_index = 0;
        self.playing = false;
        info!(story_id = %story.id(), scenes = story.scene_count(), "Scene viewer opened");
    }

    pub fn close(&mut self) {
        if self.story.take().is_some() {
            self.disarm();
            self.playing = false;
            self.scene_index = 0;
            info!("Scene viewer closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.story.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    pub fn toggle_play_pause(&mut self) {
        if self.story.is_none() {
            return;
        }
        self.playing = !self.playing;
        debug!(playing = self.playing, scene = self.scene_index, "Scene viewer toggled");
        if self.playing {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Step forward one scene. `false` on the last scene.
    pub fn next_scene(&mut self) -> bool {
        if self.scene_index + 1 >= self.scene_count() {
            return false;
        }
        self.go_to(self.scene_index + 1);
        true
    }

    /// Step back one scene. `false` on the first scene.
    pub fn prev_scene(&mut self) -> bool {
        if self.story.is_none() || self.scene_index == 0 {
            return false;
        }
        self.go_to(self.scene_index - 1);
        true
    }

    /// Deliver a fired tick. Returns `true` if the scene changed.
    pub fn on_timer_fired(&mut self, tick: TimerTick) -> bool {
        if self.armed != Some(tick) {
            return false;
        }
        self.armed = None;
        if !self.playing {
            return false;
        }
        if self.next_scene() {
            return true;
        }
        self.playing = false;
        debug!(scene = self.scene_index, "Last scene reached; scene viewer paused");
        false
    }

    pub fn snapshot(&self) -> Option<SceneViewerSnapshot> {
        let story = self.story.as_ref()?;
        let count = story.durations.len();
        Some(SceneViewerSnapshot {
            story_id: story.id.clone(),
            scene_index: self.scene_index,
            scene_count: count,
            is_playing: self.playing,
            has_next_scene: self.scene_index + 1 < count,
            has_prev_scene: self.scene_index > 0,
        })
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    fn scene_count(&self) -> usize {
        self.story.as_ref().map_or(0, |s| s.durations.len())
    }

    fn go_to(&mut self, index: usize) {
        self.disarm();
        self.scene_index = index;
        debug!(scene = index, "Scene changed");
        if self.playing {
            self.arm();
        }
    }

    fn arm(&mut self) {
        let Some(interval) = self
            .story
            .as_ref()
            .and_then(|s| s.durations.get(self.scene_index).copied())
        else {
            return;
        };
        self.next_tick += 1;
        let tick = TimerTick(self.next_tick);
        self.armed = Some(tick);
        self.timer.schedule(interval, tick);
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.timer.cancel();
        }
    }
}

impl SceneViewer<ManualTimer> {
    pub fn advance(&mut self, by: Duration) -> bool {
        match self.timer.advance(by) {
            Some(tick) => self.on_timer_fired(tick),
            None => false,
        }
    }

    pub fn fire_next(&mut self) -> bool {
        match self.timer.fire() {
            Some(tick) => self.on_timer_fired(tick),
            None => false,
        }
    }
}
