//! `st-library` -- The story repository for Storytime.
//!
//! This crate owns the story list that viewers read from. It provides:
//!
//! - **Library**: `StoryLibrary`, the ordered in-memory repository, and
//!   `LibraryCommand`, the commands viewers send it (play-count increments)
//! - **Samples**: the built-in demo catalog
//! - **Catalog**: read-only JSON import with validation at ingestion
//! - **Studio**: `StoryStudio` + `StoryGenerator`, the creation workflow
//!   (mock generation on a worker thread)
//! - **Cards**: `StoryCard` summaries for the story grid
//!
//! # Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use st_common::StoryMeta;
//! use st_library::{sample_stories, MockGenerator, StoryLibrary, StoryStudio};
//!
//! let mut library = StoryLibrary::from_stories(sample_stories(Utc::now()));
//! let mut studio = StoryStudio::new(MockGenerator::instant());
//!
//! let outcome = studio.create_blocking(StoryMeta::with_prompt("a sleepy owl"), &mut library);
//! println!("{}", outcome.notice());
//! ```

pub mod card;
pub mod catalog;
pub mod library;
pub mod samples;
pub mod studio;

// Re-export primary API at crate root
pub use card::StoryCard;
pub use catalog::{from_json_string, load_catalog};
pub use library::{LibraryCommand, StoryLibrary};
pub use samples::sample_stories;
pub use studio::{CreateOutcome, MockGenerator, StoryGenerator, StoryStudio};
