//! Story card summaries for the story grid.

use serde::{Deserialize, Serialize};

use st_common::{AgeGroup, Genre, Story, StoryId};

use crate::library::StoryLibrary;

/// Everything a grid card displays for one story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryCard {
    pub story_id: StoryId,
    /// Position in the library, i.e. the index the shorts viewer opens at.
    pub index: usize,
    pub title: String,
    pub genre: Genre,
    pub age_group: AgeGroup,
    pub cover_image_url: String,
    pub times_played: u64,
    pub duration_minutes: u32,
    pub created_label: String,
}

impl StoryCard {
    pub fn from_story(index: usize, story: &Story) -> Self {
        Self {
            story_id: story.id().clone(),
            index,
            title: story.title.clone(),
            genre: story.meta.genre,
            age_group: story.meta.age_group,
            cover_image_url: story.cover_or_placeholder().to_string(),
            times_played: story.times_played(),
            duration_minutes: story.duration_minutes(),
            created_label: story.created_label(),
        }
    }
}

impl StoryLibrary {
    /// Cards for every story, in display order.
    pub fn cards(&self) -> Vec<StoryCard> {
        self.stories()
            .iter()
            .enumerate()
            .map(|(i, story)| StoryCard::from_story(i, story))
            .collect()
    }
}
