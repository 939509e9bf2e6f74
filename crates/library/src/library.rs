//! In-memory story repository.
//!
//! `StoryLibrary` owns the ordered story list. Viewers never mutate it
//! directly; they issue [`LibraryCommand`]s (usually over a crossbeam
//! channel) which the owner applies with [`StoryLibrary::apply`] or
//! [`StoryLibrary::apply_pending`].

use crossbeam::channel::Receiver;
use tracing::{debug, info, warn};

use st_common::{Story, StoryError, StoryId, StoryResult};

/// Commands a viewer issues to the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryCommand {
    /// A viewer started showing this story; bump its play count once.
    IncrementPlayCount(StoryId),
}

/// Ordered collection of stories, newest first.
#[derive(Clone, Debug, Default)]
pub struct StoryLibrary {
    stories: Vec<Story>,
}

impl StoryLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library from an ordered story list.
    ///
    /// Stories whose id is already present are dropped with a warning so
    /// that play-count commands always resolve to exactly one story.
    pub fn from_stories(stories: impl IntoIterator<Item = Story>) -> Self {
        let mut library = Self::new();
        for story in stories {
            if library.contains(story.id()) {
                warn!(story_id = %story.id(), "Duplicate story id ignored");
                continue;
            }
            library.stories.push(story);
        }
        debug!(count = library.stories.len(), "Story library created");
        library
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    pub fn get_by_id(&self, id: &StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Position of a story in display order.
    pub fn find_index(&self, id: &StoryId) -> Option<usize> {
        self.stories.iter().position(|s| s.id() == id)
    }

    /// Prepend a freshly created story so it shows first in the grid.
    pub fn insert_front(&mut self, story: Story) -> StoryResult<()> {
        if self.contains(story.id()) {
            return Err(StoryError::MalformedStory {
                id: story.id().clone(),
                reason: "a story with this id already exists".into(),
            });
        }
        info!(story_id = %story.id(), title = %story.title, "Story added to library");
        self.stories.insert(0, story);
        Ok(())
    }

    /// Increment a story's play counter. Returns the new count.
    pub fn increment_play_count(&mut self, id: &StoryId) -> StoryResult<u64> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| StoryError::UnknownStory(id.clone()))?;
        let plays = story.increment_times_played();
        debug!(story_id = %id, plays, "Play count incremented");
        Ok(plays)
    }

    /// Apply a single command from a viewer.
    pub fn apply(&mut self, command: LibraryCommand) -> StoryResult<()> {
        match command {
            LibraryCommand::IncrementPlayCount(id) => {
                self.increment_play_count(&id)?;
            }
        }
        Ok(())
    }

    /// Apply every command waiting on `rx` without blocking.
    ///
    /// Commands for unknown stories are logged and skipped. Returns the
    /// number of commands applied successfully.
    pub fn apply_pending(&mut self, rx: &Receiver<LibraryCommand>) -> usize {
        let mut applied = 0;
        for command in rx.try_iter() {
            match self.apply(command) {
                Ok(()) => applied += 1,
                Err(e) => warn!(error = %e, "Library command rejected"),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_stories;
    use chrono::Utc;
    use crossbeam::channel;

    fn library() -> StoryLibrary {
        StoryLibrary::from_stories(sample_stories(Utc::now()))
    }

    #[test]
    fn lookup_by_id_and_index() {
        let lib = library();
        assert_eq!(lib.len(), 4);
        let id = StoryId::new("3");
        assert_eq!(lib.find_index(&id), Some(2));
        assert_eq!(lib.get_by_id(&id).unwrap().title, "The Underwater Kingdom");
        assert!(lib.get(4).is_none());
    }

    #[test]
    fn increment_play_count() {
        let mut lib = library();
        let id = StoryId::new("1");
        let before = lib.get_by_id(&id).unwrap().times_played();
        assert_eq!(lib.increment_play_count(&id).unwrap(), before + 1);

        let err = lib.increment_play_count(&StoryId::new("missing")).unwrap_err();
        assert!(matches!(err, StoryError::UnknownStory(_)));
    }

    #[test]
    fn insert_front_prepends_and_rejects_duplicates() {
        let mut lib = StoryLibrary::new();
        let mut stories = sample_stories(Utc::now());
        let second = stories.remove(1);
        let first = stories.remove(0);

        lib.insert_front(first.clone()).unwrap();
        lib.insert_front(second).unwrap();
        assert_eq!(lib.get(0).unwrap().id(), &StoryId::new("2"));
        assert!(lib.insert_front(first).is_err());
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn duplicate_ids_dropped_on_construction() {
        let stories = sample_stories(Utc::now());
        let dup = stories[0].clone();
        let lib = StoryLibrary::from_stories(stories.into_iter().chain(std::iter::once(dup)));
        assert_eq!(lib.len(), 4);
    }

    #[test]
    fn apply_pending_drains_channel() {
        let mut lib = library();
        let (tx, rx) = channel::unbounded();
        tx.send(LibraryCommand::IncrementPlayCount(StoryId::new("2"))).unwrap();
        tx.send(LibraryCommand::IncrementPlayCount(StoryId::new("2"))).unwrap();
        tx.send(LibraryCommand::IncrementPlayCount(StoryId::new("nope"))).unwrap();

        let before = lib.get_by_id(&StoryId::new("2")).unwrap().times_played();
        assert_eq!(lib.apply_pending(&rx), 2);
        assert_eq!(
            lib.get_by_id(&StoryId::new("2")).unwrap().times_played(),
            before + 2
        );
        assert_eq!(lib.apply_pending(&rx), 0);
    }
}
