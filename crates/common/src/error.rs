//! Central error types for story handling (thiserror-based).

use thiserror::Error;

use crate::types::{SceneId, StoryId};

/// Errors raised while building, ingesting, or generating stories.
///
/// Playback transitions never surface these to callers: out-of-range
/// indices are clamped and empty collections leave the viewer inert. The
/// variants still name those conditions so they can be logged uniformly.
#[derive(Error, Debug)]
pub enum StoryError {
    /// A requested story or scene index lies outside the collection.
    #[error("Index {index} out of range for {len} entries")]
    InvalidIndex { index: usize, len: usize },

    /// An operation needs at least one story.
    #[error("No stories available")]
    EmptyCollection,

    /// A story violates a structural invariant (e.g. no scenes).
    #[error("Malformed story {id}: {reason}")]
    MalformedStory { id: StoryId, reason: String },

    /// A scene violates a structural invariant.
    #[error("Invalid scene {id}: {reason}")]
    InvalidScene { id: SceneId, reason: String },

    /// The story request has a blank prompt.
    #[error("Please enter a story prompt")]
    EmptyPrompt,

    /// The story generator could not produce a story.
    #[error("Story generation failed: {0}")]
    GenerationFailed(String),

    /// No story with this id exists in the library.
    #[error("Unknown story: {0}")]
    UnknownStory(StoryId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = StoryError::InvalidIndex { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7') && msg.contains('3'));

        let err = StoryError::MalformedStory {
            id: StoryId::new("dragon"),
            reason: "story has no scenes".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dragon") && msg.contains("no scenes"));

        assert_eq!(StoryError::EmptyPrompt.to_string(), "Please enter a story prompt");
        assert!(StoryError::UnknownStory(StoryId::new("x9"))
            .to_string()
            .contains("x9"));
    }

    #[test]
    fn json_error_conversion() {
        let result: Result<crate::story::Story, _> = serde_json::from_str("not json");
        let err: StoryError = result.unwrap_err().into();
        assert!(matches!(err, StoryError::Json(_)));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StoryError = io_err.into();
        assert!(matches!(err, StoryError::Io(_)));
    }
}
