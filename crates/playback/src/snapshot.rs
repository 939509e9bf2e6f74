//! Presentation snapshots of viewer state.
//!
//! A snapshot is recomputed from the controller after every transition and
//! is all a presentation surface needs to render the viewer chrome
//! (counters, progress bars, navigation hints, button states).

use serde::Serialize;

use st_common::StoryId;

/// State of one progress-bar segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SegmentState {
    /// Scene already shown.
    Seen,
    /// Scene on screen now.
    Current,
    /// Scene not reached yet.
    Upcoming,
}

/// One segment per scene, relative to the current scene.
pub fn progress_segments(current: usize, count: usize) -> Vec<SegmentState> {
    (0..count)
        .map(|i| match i.cmp(&current) {
            std::cmp::Ordering::Less => SegmentState::Seen,
            std::cmp::Ordering::Equal => SegmentState::Current,
            std::cmp::Ordering::Greater => SegmentState::Upcoming,
        })
        .collect()
}

/// What the shorts viewer shows right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaybackSnapshot {
    pub story_index: usize,
    pub scene_index: usize,
    pub story_id: StoryId,
    pub story_count: usize,
    pub scene_count: usize,
    pub is_playing: bool,
    pub is_liked: bool,
    pub is_muted: bool,
    pub has_next_story: bool,
    pub has_prev_story: bool,
}

impl PlaybackSnapshot {
    /// Header text, e.g. `"Story 2 of 4"`.
    pub fn story_label(&self) -> String {
        format!("Story {} of {}", self.story_index + 1, self.story_count)
    }

    pub fn progress(&self) -> Vec<SegmentState> {
        progress_segments(self.scene_index, self.scene_count)
    }

    pub fn is_last_scene(&self) -> bool {
        self.scene_index + 1 == self.scene_count
    }
}

/// What the single-story scene viewer shows right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SceneViewerSnapshot {
    pub story_id: StoryId,
    pub scene_index: usize,
    pub scene_count: usize,
    pub is_playing: bool,
    pub has_next_scene: bool,
    pub has_prev_scene: bool,
}

impl SceneViewerSnapshot {
    /// Footer text, e.g. `"Scene 1 of 3"`.
    pub fn scene_label(&self) -> String {
        format!("Scene {} of {}", self.scene_index + 1, self.scene_count)
    }

    pub fn progress(&self) -> Vec<SegmentState> {
        progress_segments(self.scene_index, self.scene_count)
    }
}
