//! The read-only view of the story list a viewer plays through.
//!
//! A viewer never holds the stories themselves: at open it captures each
//! story's id and scene count, which is all the sequencing logic needs. The
//! presentation surface looks the content up in the library by id.

use serde::Serialize;

use st_common::{Story, StoryError, StoryId, StoryResult};
use st_library::StoryLibrary;

/// One story as seen by the playback logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    story_id: StoryId,
    scene_count: usize,
}

impl PlaylistEntry {
    /// Build an entry. A story must have at least one scene.
    pub fn new(story_id: StoryId, scene_count: usize) -> StoryResult<Self> {
        if scene_count == 0 {
            return Err(StoryError::MalformedStory {
                id: story_id,
                reason: "story has no scenes".into(),
            });
        }
        Ok(Self {
            story_id,
            scene_count,
        })
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    /// Always at least 1.
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }
}

impl From<&Story> for PlaylistEntry {
    fn from(story: &Story) -> Self {
        // `Story` guarantees a non-empty scene list.
        Self {
            story_id: story.id().clone(),
            scene_count: story.scene_count(),
        }
    }
}

/// Ordered playlist captured when a viewer opens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    pub fn from_stories(stories: &[Story]) -> Self {
        Self::new(stories.iter().map(PlaylistEntry::from).collect())
    }

    pub fn from_library(library: &StoryLibrary) -> Self {
        Self::from_stories(library.stories())
    }

    /// Build a playlist from bare scene counts; ids are `"0"`, `"1"`, ...
    pub fn from_scene_counts(counts: &[usize]) -> StoryResult<Self> {
        let entries = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| PlaylistEntry::new(StoryId::new(i.to_string()), count))
            .collect::<StoryResult<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a requested story index.
    pub fn check_index(&self, index: usize) -> StoryResult<usize> {
        if self.entries.is_empty() {
            return Err(StoryError::EmptyCollection);
        }
        if index >= self.entries.len() {
            return Err(StoryError::InvalidIndex {
                index,
                len: self.entries.len(),
            });
        }
        Ok(index)
    }

    /// Clamp a requested index into range. `None` for an empty playlist.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn zero_scene_entry_is_malformed() {
        let err = PlaylistEntry::new(StoryId::new("x"), 0).unwrap_err();
        assert!(matches!(err, StoryError::MalformedStory { .. }));
        assert!(Playlist::from_scene_counts(&[2, 0, 1]).is_err());
    }

    #[test]
    fn check_and_clamp_index() {
        let playlist = Playlist::from_scene_counts(&[2, 1, 3]).unwrap();
        assert_eq!(playlist.check_index(2).unwrap(), 2);
        assert!(matches!(
            playlist.check_index(3),
            Err(StoryError::InvalidIndex { index: 3, len: 3 })
        ));
        assert_eq!(playlist.clamp_index(99), Some(2));
        assert_eq!(playlist.clamp_index(1), Some(1));

        let empty = Playlist::default();
        assert!(matches!(empty.check_index(0), Err(StoryError::EmptyCollection)));
        assert_eq!(empty.clamp_index(0), None);
    }

    #[test]
    fn from_library_keeps_order_and_scene_counts() {
        let library = StoryLibrary::from_stories(st_library::sample_stories(Utc::now()));
        let playlist = Playlist::from_library(&library);
        assert_eq!(playlist.len(), 4);
        assert_eq!(playlist.get(3).unwrap().scene_count(), 2);
        assert_eq!(playlist.get(0).unwrap().story_id(), &StoryId::new("1"));
    }
}
