//! Story and scene records.
//!
//! A `Story` can only be obtained through [`Story::try_from`] on a
//! [`StoryRecord`] (or by deserializing one, which goes through the same
//! path), so every `Story` in the system has at least one scene and every
//! scene has a positive duration of at most [`MAX_SCENE_SECONDS`] and an
//! image reference.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::types::{AgeGroup, Emotion, Genre, MoralLesson, SceneId, StoryId, VoiceOption};

/// Image shown for a story without a cover.
pub const PLACEHOLDER_COVER: &str = "/placeholder.svg";

/// Longest time a single scene may stay on screen (one day).
pub const MAX_SCENE_SECONDS: f64 = 24.0 * 60.0 * 60.0;

/// Default art style offered by the story form.
pub const DEFAULT_ART_STYLE: &str = "Disney style";

/// One illustrated unit of narrative text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SceneRecord")]
pub struct Scene {
    id: SceneId,
    image_url: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    /// Intended display time in seconds.
    duration: f64,
}

/// Unvalidated scene fields, as found in a catalog file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub id: SceneId,
    pub image_url: String,
    pub text: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub duration: f64,
}

impl Scene {
    /// Build a scene without narration audio.
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        text: impl Into<String>,
        duration: f64,
    ) -> StoryResult<Self> {
        Self::try_from(SceneRecord {
            id: SceneId::new(id),
            image_url: image_url.into(),
            text: text.into(),
            audio_url: None,
            duration,
        })
    }

    /// Attach a narration track.
    pub fn with_audio(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    pub fn id(&self) -> &SceneId {
        &self.id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    /// Intended display time in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Intended display time, for arming a timer.
    pub fn display_time(&self) -> Duration {
        // Validated at construction, so the conversion cannot fail.
        Duration::try_from_secs_f64(self.duration)
            .unwrap_or(Duration::from_secs(MAX_SCENE_SECONDS as u64))
    }
}

impl TryFrom<SceneRecord> for Scene {
    type Error = StoryError;

    fn try_from(record: SceneRecord) -> StoryResult<Self> {
        if !(record.duration.is_finite() && record.duration > 0.0) {
            return Err(StoryError::InvalidScene {
                id: record.id,
                reason: format!("duration must be positive, got {}", record.duration),
            });
        }
        if record.duration > MAX_SCENE_SECONDS
            || Duration::try_from_secs_f64(record.duration).is_err()
        {
            return Err(StoryError::InvalidScene {
                id: record.id,
                reason: format!(
                    "duration must be at most {MAX_SCENE_SECONDS} seconds, got {}",
                    record.duration
                ),
            });
        }
        if record.image_url.trim().is_empty() {
            return Err(StoryError::InvalidScene {
                id: record.id,
                reason: "image reference is required".into(),
            });
        }
        Ok(Self {
            id: record.id,
            image_url: record.image_url,
            text: record.text,
            audio_url: record.audio_url,
            duration: record.duration,
        })
    }
}

/// Descriptive metadata of a story.
///
/// This is also the payload of a story creation request; `Default` yields
/// the values the creation form starts with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryMeta {
    pub prompt: String,
    pub genre: Genre,
    pub age_group: AgeGroup,
    pub moral_lesson: MoralLesson,
    pub emotion: Emotion,
    pub art_style: String,
    pub voice_option: VoiceOption,
}

impl Default for StoryMeta {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            genre: Genre::default(),
            age_group: AgeGroup::default(),
            moral_lesson: MoralLesson::default(),
            emotion: Emotion::default(),
            art_style: DEFAULT_ART_STYLE.to_string(),
            voice_option: VoiceOption::default(),
        }
    }
}

impl StoryMeta {
    /// Create metadata with form defaults for everything but the prompt.
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// The trimmed prompt, or `EmptyPrompt` if nothing but whitespace was entered.
    pub fn validated_prompt(&self) -> StoryResult<&str> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(StoryError::EmptyPrompt);
        }
        Ok(prompt)
    }
}

/// An ordered, non-empty sequence of scenes plus metadata and usage counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoryRecord", into = "StoryRecord")]
pub struct Story {
    id: StoryId,
    pub title: String,
    pub meta: StoryMeta,
    scenes: Vec<Scene>,
    times_played: u64,
    created_at: DateTime<Utc>,
    pub cover_image_url: Option<String>,
    pub duration_seconds: u32,
}

/// Unvalidated story fields, as found in a catalog file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: StoryId,
    pub title: String,
    #[serde(flatten)]
    pub meta: StoryMeta,
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub times_played: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub duration_seconds: u32,
}

impl TryFrom<StoryRecord> for Story {
    type Error = StoryError;

    fn try_from(record: StoryRecord) -> StoryResult<Self> {
        if record.scenes.is_empty() {
            tracing::warn!(story_id = %record.id, "Rejected story without scenes");
            return Err(StoryError::MalformedStory {
                id: record.id,
                reason: "story has no scenes".into(),
            });
        }
        Ok(Self {
            id: record.id,
            title: record.title,
            meta: record.meta,
            scenes: record.scenes,
            times_played: record.times_played,
            created_at: record.created_at,
            cover_image_url: record.cover_image_url,
            duration_seconds: record.duration_seconds,
        })
    }
}

impl From<Story> for StoryRecord {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            meta: story.meta,
            scenes: story.scenes,
            times_played: story.times_played,
            created_at: story.created_at,
            cover_image_url: story.cover_image_url,
            duration_seconds: story.duration_seconds,
        }
    }
}

impl Story {
    pub fn id(&self) -> &StoryId {
        &self.id
    }

    /// All scenes, in presentation order. Never empty.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn times_played(&self) -> u64 {
        self.times_played
    }

    /// Record one more visit. Returns the new count.
    pub fn increment_times_played(&mut self) -> u64 {
        self.times_played += 1;
        self.times_played
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Cover image, falling back to the placeholder.
    pub fn cover_or_placeholder(&self) -> &str {
        self.cover_image_url.as_deref().unwrap_or(PLACEHOLDER_COVER)
    }

    /// Total duration rounded up to whole minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_seconds.div_ceil(60)
    }

    /// Creation date as shown on cards, e.g. `"Mar 4"`.
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d").to_string()
    }
}
