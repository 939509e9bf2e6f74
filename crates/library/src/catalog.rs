//! Catalog import: reading a story list from a JSON file.
//!
//! Import is read-only: nothing is ever written back. Every story passes
//! through the same validation as in-code construction, so a catalog with
//! a scene-less story is rejected here rather than at playback time.

use std::path::Path;

use tracing::{debug, info};

use st_common::{Story, StoryError, StoryResult};

use crate::library::StoryLibrary;

/// Parse a JSON array of stories.
pub fn from_json_string(json: &str) -> StoryResult<Vec<Story>> {
    let stories: Vec<Story> = serde_json::from_str(json)?;
    debug!(count = stories.len(), "Parsed story catalog");
    Ok(stories)
}

/// Load a catalog file into a new library.
pub fn load_catalog(path: &Path) -> StoryResult<StoryLibrary> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read catalog file");
        StoryError::Io(e)
    })?;

    let stories = from_json_string(&json)?;
    let library = StoryLibrary::from_stories(stories);

    info!(
        path = %path.display(),
        stories = library.len(),
        "Story catalog loaded"
    );

    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_json(id: &str, scenes: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "The Brave Little Mouse Adventure",
            "prompt": "A tiny mouse goes on a big adventure",
            "genre": "Adventure",
            "age_group": "4-6",
            "moral_lesson": "courage",
            "emotion": "happiness",
            "art_style": "Disney style",
            "voice_option": "Eve",
            "scenes": scenes,
            "times_played": 8,
            "created_at": "2024-05-01T12:00:00Z",
            "cover_image_url": "mouse.jpg",
            "duration_seconds": 240
        })
    }

    fn one_scene() -> serde_json::Value {
        serde_json::json!([{
            "id": "2-1",
            "image_url": "mouse.jpg",
            "text": "Meet Pip.",
            "duration": 4
        }])
    }

    #[test]
    fn parses_valid_catalog() {
        let json = serde_json::Value::Array(vec![
            story_json("a", one_scene()),
            story_json("b", one_scene()),
        ])
        .to_string();
        let stories = from_json_string(&json).unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].times_played(), 8);
        assert_eq!(stories[1].scenes()[0].text(), "Meet Pip.");
    }

    #[test]
    fn rejects_story_without_scenes() {
        let json = serde_json::Value::Array(vec![story_json("a", serde_json::json!([]))]).to_string();
        let err = from_json_string(&json).unwrap_err();
        assert!(matches!(err, StoryError::Json(_)));
        assert!(err.to_string().contains("no scenes"));
    }

    #[test]
    fn rejects_scene_with_zero_duration() {
        let scenes = serde_json::json!([{
            "id": "x-1", "image_url": "x.jpg", "text": "", "duration": 0
        }]);
        let json = serde_json::Value::Array(vec![story_json("x", scenes)]).to_string();
        assert!(from_json_string(&json).is_err());
    }

    #[test]
    fn load_catalog_from_file() {
        let dir = std::env::temp_dir().join("st_library_catalog_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("catalog.json");
        let json = serde_json::Value::Array(vec![story_json("a", one_scene())]).to_string();
        std::fs::write(&path, json).unwrap();

        let library = load_catalog(&path).unwrap();
        assert_eq!(library.len(), 1);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, StoryError::Io(_)));
    }
}
