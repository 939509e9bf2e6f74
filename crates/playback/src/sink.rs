//! Outbound "story visited" notifications.
//!
//! A viewer calls [`VisitSink::story_visited`] exactly once each time the
//! displayed story changes. The usual sink is a crossbeam sender of
//! [`LibraryCommand`]s, so the library owner applies the play-count
//! increment on its own schedule.

use crossbeam::channel::Sender;
use tracing::warn;

use st_common::StoryId;
use st_library::{LibraryCommand, StoryLibrary};

/// Receives one call per distinct story visit.
pub trait VisitSink {
    fn story_visited(&mut self, story_id: &StoryId);
}

impl<S: VisitSink + ?Sized> VisitSink for &mut S {
    fn story_visited(&mut self, story_id: &StoryId) {
        (**self).story_visited(story_id)
    }
}

impl VisitSink for Sender<LibraryCommand> {
    fn story_visited(&mut self, story_id: &StoryId) {
        if self
            .send(LibraryCommand::IncrementPlayCount(story_id.clone()))
            .is_err()
        {
            warn!(story_id = %story_id, "Library command channel closed; visit dropped");
        }
    }
}

impl VisitSink for StoryLibrary {
    fn story_visited(&mut self, story_id: &StoryId) {
        if let Err(e) = self.increment_play_count(story_id) {
            warn!(error = %e, "Visit for unknown story ignored");
        }
    }
}

/// Sink that only records visits, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitLog {
    visits: Vec<StoryId>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> &[StoryId] {
        &self.visits
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

impl VisitSink for VisitLog {
    fn story_visited(&mut self, story_id: &StoryId) {
        self.visits.push(story_id.clone());
    }
}
