//! `st-common` -- Shared story model, errors, and configuration for Storytime.
//!
//! This crate is the foundation that the library, playback, and CLI crates
//! depend on:
//!
//! - **Types**: `StoryId`, `SceneId` (newtypes) and the metadata enums
//!   `Genre`, `AgeGroup`, `MoralLesson`, `Emotion`, `VoiceOption`
//! - **Story**: `Story`, `Scene`, `StoryMeta` with construction-time validation
//! - **Errors**: `StoryError` (thiserror-based)
//! - **Notices**: `Notice` toast messages shown after user actions
//! - **Config**: `AppConfig`, `PlaybackConfig`, `StudioConfig`

pub mod config;
pub mod error;
pub mod notice;
pub mod story;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, PlaybackConfig, StudioConfig};
pub use error::{StoryError, StoryResult};
pub use notice::{Notice, NoticeLevel};
pub use story::{
    Scene, SceneRecord, Story, StoryMeta, StoryRecord, MAX_SCENE_SECONDS, PLACEHOLDER_COVER,
};
pub use types::{AgeGroup, Emotion, Genre, MoralLesson, SceneId, StoryId, VoiceOption};
