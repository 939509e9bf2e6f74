//! Plain-text rendering of cards and viewer snapshots.

use st_library::{StoryCard, StoryLibrary};
use st_playback::{PlaybackSnapshot, SceneViewerSnapshot, SegmentState};

/// `[■■□]` style progress bar.
pub fn progress_bar(segments: &[SegmentState]) -> String {
    let bar: String = segments
        .iter()
        .map(|s| match s {
            SegmentState::Seen | SegmentState::Current => '■',
            SegmentState::Upcoming => '□',
        })
        .collect();
    format!("[{bar}]")
}

/// One grid row.
pub fn card_line(card: &StoryCard) -> String {
    format!(
        "{:>2}  {:<45} {:<10} {:<5} {:>3} plays  {:>2} min  {}",
        card.index,
        card.title,
        card.genre.label(),
        card.age_group.label(),
        card.times_played,
        card.duration_minutes,
        card.created_label,
    )
}

/// Header plus current scene text for the shorts viewer.
pub fn shorts_frame(snap: &PlaybackSnapshot, library: &StoryLibrary) -> String {
    let story = library.get_by_id(&snap.story_id);
    let title = story.map_or("?", |s| s.title.as_str());
    let text = story
        .and_then(|s| s.scene(snap.scene_index))
        .map_or("", |scene| scene.text());

    let mut flags = vec![if snap.is_playing { "playing" } else { "paused" }];
    if snap.is_liked {
        flags.push("liked");
    }
    if snap.is_muted {
        flags.push("muted");
    }

    let mut nav = String::new();
    if snap.has_prev_story {
        nav.push_str("  (b) previous");
    }
    if snap.has_next_story {
        nav.push_str("  (n) next");
    }

    format!(
        "{} · {}  {}  {}\n  {}\n {}",
        snap.story_label(),
        title,
        progress_bar(&snap.progress()),
        flags.join(", "),
        text,
        nav,
    )
}

/// Footer plus current scene text for the scene viewer.
pub fn scene_frame(snap: &SceneViewerSnapshot, library: &StoryLibrary) -> String {
    let text = library
        .get_by_id(&snap.story_id)
        .and_then(|s| s.scene(snap.scene_index))
        .map_or("", |scene| scene.text());
    format!(
        "{}  {}  {}\n  {}",
        snap.scene_label(),
        progress_bar(&snap.progress()),
        if snap.is_playing { "playing" } else { "paused" },
        text,
    )
}
