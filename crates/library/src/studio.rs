//! Story studio: turning a creation request into a new library story.
//!
//! Generation runs on a worker thread so a front-end can keep rendering
//! (and show a "creating" state) while it waits:
//!
//! ```text
//! Front-end                      Worker thread
//! ┌──────────────┐   request    ┌───────────────────┐
//! │ submit()     │─────────────►│ generator         │
//! │ poll()/wait()│◄── result ───│   .generate(meta) │
//! └──────────────┘   channel    └───────────────────┘
//! ```
//!
//! Whatever goes wrong inside the generator, the user only ever sees the
//! single generic failure notice, and neither the library nor any open
//! viewer is touched.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossbeam::channel::{self, Receiver, TryRecvError};
use tracing::{debug, info, warn};

use st_common::{
    Notice, Scene, SceneId, SceneRecord, Story, StoryError, StoryId, StoryMeta, StoryRecord,
    StoryResult, StudioConfig,
};

use crate::library::StoryLibrary;
use crate::samples::DRAGON_IMAGE;

pub const CREATED_MESSAGE: &str = "✨ Your magical story has been created!";
pub const FAILED_MESSAGE: &str = "Failed to create story. Please try again.";
pub const BUSY_MESSAGE: &str = "A story is already being created";

const TITLE_PROMPT_CHARS: usize = 30;
const INTRO_PROMPT_CHARS: usize = 50;
const MOCK_SCENE_SECONDS: f64 = 5.0;
const MOCK_STORY_SECONDS: u32 = 180;

/// Produces a complete story from a creation request.
pub trait StoryGenerator: Send + Sync + 'static {
    fn generate(&self, request: &StoryMeta) -> StoryResult<Story>;
}

/// Stand-in for a real generation backend.
///
/// Waits for the configured latency, then returns a two-scene story built
/// from the request fields.
#[derive(Clone, Debug)]
pub struct MockGenerator {
    latency: Duration,
    image_url: String,
}

impl MockGenerator {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            latency: config.simulated_latency(),
            image_url: DRAGON_IMAGE.to_string(),
        }
    }

    /// A generator that answers immediately.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            image_url: DRAGON_IMAGE.to_string(),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(&StudioConfig::default())
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl StoryGenerator for MockGenerator {
    fn generate(&self, request: &StoryMeta) -> StoryResult<Story> {
        request.validated_prompt()?;
        // Titles and text quote the prompt as typed, surrounding spaces included.
        let prompt = request.prompt.as_str();
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let id = uuid::Uuid::new_v4().to_string();
        let genre = request.genre.label();
        let scene = |n: usize, text: String| {
            Scene::try_from(SceneRecord {
                id: SceneId::new(format!("{id}-{n}")),
                image_url: self.image_url.clone(),
                text,
                audio_url: None,
                duration: MOCK_SCENE_SECONDS,
            })
        };

        let scenes = vec![
            scene(
                1,
                format!(
                    "This is the beginning of your {} story about {}...",
                    genre.to_lowercase(),
                    truncate_chars(prompt, INTRO_PROMPT_CHARS)
                ),
            )?,
            scene(
                2,
                format!(
                    "The adventure continues as our hero learns about {} and discovers the joy of {}...",
                    request.moral_lesson, request.emotion
                ),
            )?,
        ];

        Story::try_from(StoryRecord {
            id: StoryId::new(id.clone()),
            title: format!(
                "{genre} Story: {}...",
                truncate_chars(prompt, TITLE_PROMPT_CHARS)
            ),
            meta: request.clone(),
            scenes,
            times_played: 0,
            created_at: Utc::now(),
            cover_image_url: Some(self.image_url.clone()),
            duration_seconds: MOCK_STORY_SECONDS,
        })
    }
}

/// Result of a finished creation request.
#[derive(Clone, Debug, PartialEq)]
pub enum CreateOutcome {
    /// The story was generated and is now first in the library.
    Created { story_id: StoryId, notice: Notice },
    /// Generation failed; the library is unchanged.
    Failed(Notice),
}

impl CreateOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            Self::Created { notice, .. } | Self::Failed(notice) => notice,
        }
    }
}

/// Runs one creation request at a time on a worker thread.
pub struct StoryStudio<G: StoryGenerator> {
    generator: Arc<G>,
    pending: Option<Receiver<StoryResult<Story>>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<G: StoryGenerator> StoryStudio<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator: Arc::new(generator),
            pending: None,
            worker: None,
        }
    }

    /// Whether a request is in flight.
    pub fn is_creating(&self) -> bool {
        self.pending.is_some()
    }

    /// Start generating a story.
    ///
    /// Rejects a blank prompt or a second concurrent request with an error
    /// notice, without starting any work.
    pub fn submit(&mut self, request: StoryMeta) -> Result<(), Notice> {
        if let Err(e) = request.validated_prompt() {
            warn!(error = %e, "Story request rejected");
            return Err(Notice::error(e.to_string()));
        }
        if self.is_creating() {
            warn!("Story request rejected: creation already in progress");
            return Err(Notice::error(BUSY_MESSAGE));
        }

        let genre = request.genre;
        let (tx, rx) = channel::bounded(1);
        let generator = Arc::clone(&self.generator);
        let spawned = thread::Builder::new()
            .name("story-generator".into())
            .spawn(move || {
                let result = generator.generate(&request);
                // Receiver may be gone if the studio was dropped mid-request.
                let _ = tx.send(result);
            });

        self.start(spawned, rx)?;
        debug!(%genre, "Story generation started");
        Ok(())
    }

    fn start(
        &mut self,
        spawned: io::Result<thread::JoinHandle<()>>,
        rx: Receiver<StoryResult<Story>>,
    ) -> Result<(), Notice> {
        match spawned {
            Ok(handle) => {
                self.pending = Some(rx);
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to spawn story generator thread");
                Err(Notice::error(FAILED_MESSAGE))
            }
        }
    }

    /// Collect a finished request without blocking.
    pub fn poll(&mut self, library: &mut StoryLibrary) -> Option<CreateOutcome> {
        let rx = self.pending.as_ref()?;
        let received = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err(StoryError::GenerationFailed("generator worker exited".into()))
            }
        };
        Some(self.finish(received, library))
    }

    /// Block until the in-flight request finishes.
    pub fn wait(&mut self, library: &mut StoryLibrary) -> Option<CreateOutcome> {
        let rx = self.pending.as_ref()?;
        let received = rx
            .recv()
            .unwrap_or_else(|_| Err(StoryError::GenerationFailed("generator worker exited".into())));
        Some(self.finish(received, library))
    }

    /// Submit and wait in one call.
    pub fn create_blocking(
        &mut self,
        request: StoryMeta,
        library: &mut StoryLibrary,
    ) -> CreateOutcome {
        if let Err(notice) = self.submit(request) {
            return CreateOutcome::Failed(notice);
        }
        self.wait(library)
            .unwrap_or_else(|| CreateOutcome::Failed(Notice::error(FAILED_MESSAGE)))
    }

    fn finish(&mut self, result: StoryResult<Story>, library: &mut StoryLibrary) -> CreateOutcome {
        self.pending = None;
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Story generator worker panicked");
            }
        }

        match result.and_then(|story| {
            let id = story.id().clone();
            library.insert_front(story).map(|()| id)
        }) {
            Ok(story_id) => {
                info!(story_id = %story_id, "Story created");
                CreateOutcome::Created {
                    story_id,
                    notice: Notice::success(CREATED_MESSAGE),
                }
            }
            Err(e) => {
                warn!(error = %e, "Story creation failed");
                CreateOutcome::Failed(Notice::error(FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_common::{Emotion, Genre, MoralLesson};

    struct BrokenGenerator;

    impl StoryGenerator for BrokenGenerator {
        fn generate(&self, _request: &StoryMeta) -> StoryResult<Story> {
            Err(StoryError::GenerationFailed("backend unavailable".into()))
        }
    }

    fn request(prompt: &str) -> StoryMeta {
        StoryMeta {
            genre: Genre::Bedtime,
            moral_lesson: MoralLesson::Gratitude,
            emotion: Emotion::Empathy,
            ..StoryMeta::with_prompt(prompt)
        }
    }

    #[test]
    fn mock_story_follows_request() {
        let prompt = "a brave little rabbit who discovers a magical garden full of talking flowers";
        let story = MockGenerator::instant().generate(&request(prompt)).unwrap();

        assert_eq!(story.title, "Bedtime Story: a brave little rabbit who disc...");
        assert_eq!(story.scene_count(), 2);
        assert_eq!(story.times_played(), 0);
        assert_eq!(story.duration_seconds, 180);
        assert!(story.scenes()[0]
            .text()
            .starts_with("This is the beginning of your bedtime story about a brave little rabbit"));
        assert_eq!(
            story.scenes()[1].text(),
            "The adventure continues as our hero learns about gratitude and discovers the joy of empathy..."
        );
        assert_eq!(story.scenes()[0].duration(), 5.0);
        assert_eq!(story.cover_image_url.as_deref(), Some(DRAGON_IMAGE));
        assert_eq!(story.scenes()[0].id().0, format!("{}-1", story.id()));
    }

    #[test]
    fn create_prepends_to_library() {
        let mut library = StoryLibrary::from_stories(crate::sample_stories(Utc::now()));
        let mut studio = StoryStudio::new(MockGenerator::instant());

        let outcome = studio.create_blocking(request("a sleepy owl"), &mut library);
        let CreateOutcome::Created { story_id, notice } = outcome else {
            panic!("expected a created story");
        };
        assert_eq!(notice.message, CREATED_MESSAGE);
        assert_eq!(library.len(), 5);
        assert_eq!(library.get(0).unwrap().id(), &story_id);
        assert!(!studio.is_creating());
    }

    #[test]
    fn blank_prompt_is_rejected_before_generation() {
        let mut studio = StoryStudio::new(MockGenerator::instant());
        let notice = studio.submit(request("   ")).unwrap_err();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Please enter a story prompt");
        assert!(!studio.is_creating());
    }

    #[test]
    fn generator_failure_yields_generic_notice() {
        let mut library = StoryLibrary::from_stories(crate::sample_stories(Utc::now()));
        let mut studio = StoryStudio::new(BrokenGenerator);

        let outcome = studio.create_blocking(request("a lost kite"), &mut library);
        assert_eq!(outcome, CreateOutcome::Failed(Notice::error(FAILED_MESSAGE)));
        assert_eq!(library.len(), 4);
    }

    #[test]
    fn second_request_while_busy_is_rejected() {
        let mut library = StoryLibrary::new();
        let slow = MockGenerator::new(&StudioConfig {
            simulated_latency_ms: 200,
        });
        let mut studio = StoryStudio::new(slow);

        studio.submit(request("first")).unwrap();
        assert!(studio.is_creating());
        let notice = studio.submit(request("second")).unwrap_err();
        assert_eq!(notice.message, BUSY_MESSAGE);

        let outcome = studio.wait(&mut library).unwrap();
        assert!(matches!(outcome, CreateOutcome::Created { .. }));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn poll_without_request_is_none() {
        let mut library = StoryLibrary::new();
        let mut studio = StoryStudio::new(MockGenerator::instant());
        assert!(studio.poll(&mut library).is_none());
    }

    #[test]
    fn mock_quotes_prompt_as_typed() {
        let story = MockGenerator::instant()
            .generate(&StoryMeta::with_prompt("  a fox"))
            .unwrap();
        assert_eq!(story.title, "Fantasy Story:   a fox...");
        assert_eq!(story.meta.prompt, "  a fox");
        assert_eq!(
            story.scenes()[0].text(),
            "This is the beginning of your fantasy story about   a fox..."
        );
    }

    #[test]
    fn spawn_error_yields_generic_notice() {
        let mut library = StoryLibrary::new();
        let mut studio = StoryStudio::new(MockGenerator::instant());
        let (_tx, rx) = channel::bounded(1);
        let failed = Err(io::Error::new(io::ErrorKind::WouldBlock, "no threads left"));

        let notice = studio.start(failed, rx).unwrap_err();
        assert_eq!(notice, Notice::error(FAILED_MESSAGE));
        assert!(!studio.is_creating());
        assert!(studio.wait(&mut library).is_none());
        assert!(library.is_empty());
    }
}
