//! `st-playback` -- Viewer state machines for Storytime.
//!
//! This crate provides:
//!
//! - **`ShortsController`**: The multi-story shorts viewer (Closed / Playing / Paused),
//!   auto-advancing story → scene and reporting story visits.
//! - **`SceneViewer`**: The single-story viewer, one scene at a time.
//! - **`PlaybackTimer`**: One-shot, restartable timer contract with a virtual-clock
//!   (`ManualTimer`) and a wall-clock thread (`ThreadTimer`) implementation.
//! - **`VisitSink`**: Outbound "story visited" notifications, usually a channel of
//!   `LibraryCommand::IncrementPlayCount`.
//! - **`PlaybackSnapshot`**: What a presentation surface renders after each transition.
//!
//! # Architecture
//!
//! ```text
//! StoryLibrary ──Playlist──► ShortsController ──snapshot()──► presentation
//!      ▲                      │        ▲
//!      │   IncrementPlayCount │        │ ViewerIntent / TimerTick
//!      └──────(VisitSink)─────┘        └──────────── host loop
//! ```

pub mod intent;
pub mod playlist;
pub mod scene_viewer;
pub mod shorts;
pub mod sink;
pub mod snapshot;
pub mod timer;

// Re-export primary types at crate root for convenience.
pub use intent::{TapZone, ViewerIntent};
pub use playlist::{Playlist, PlaylistEntry};
pub use scene_viewer::SceneViewer;
pub use shorts::{ShortsController, ViewerState};
pub use sink::{VisitLog, VisitSink};
pub use snapshot::{progress_segments, PlaybackSnapshot, SceneViewerSnapshot, SegmentState};
pub use timer::{ManualTimer, PlaybackTimer, ThreadTimer, TimerTick};
