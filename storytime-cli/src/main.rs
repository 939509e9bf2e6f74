//! `storytime` -- terminal front end for Storytime.
//!
//! Lists the story grid, creates stories with the mock studio, and plays
//! stories in the shorts viewer or the single-story scene viewer. Nothing
//! is persisted: every run starts from the sample catalog or from a JSON
//! catalog passed with `--catalog`.

mod render;
mod session;

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use st_common::{AgeGroup, AppConfig, Emotion, Genre, MoralLesson, StoryMeta, VoiceOption};
use st_library::{load_catalog, sample_stories, CreateOutcome, MockGenerator, StoryLibrary, StoryStudio};

#[derive(Parser, Debug)]
#[command(name = "storytime", version, about = "Browse, create, and play short illustrated stories")]
struct Cli {
    /// JSON configuration file (playback and studio settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON story catalog to use instead of the built-in samples
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the story grid
    List {
        /// Print the cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a new story and add it to the front of the grid
    Create {
        /// What the story should be about
        prompt: String,
        #[arg(long, value_parser = parse_genre)]
        genre: Option<Genre>,
        #[arg(long, value_parser = parse_age_group)]
        age_group: Option<AgeGroup>,
        #[arg(long, value_parser = parse_moral_lesson)]
        moral_lesson: Option<MoralLesson>,
        #[arg(long, value_parser = parse_emotion)]
        emotion: Option<Emotion>,
        #[arg(long)]
        art_style: Option<String>,
        #[arg(long, value_parser = parse_voice)]
        voice: Option<VoiceOption>,
    },
    /// Play every story in the shorts viewer
    Shorts {
        /// Index of the first story to show
        #[arg(short, long, default_value_t = 0)]
        start: usize,
    },
    /// Step through the scenes of one story
    View {
        /// Index of the story in the grid
        index: usize,
    },
}

fn choice<T: Copy + fmt::Display>(all: &[T], raw: &str) -> Result<T, String> {
    all.iter()
        .copied()
        .find(|v| v.to_string().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            let options: Vec<String> = all.iter().map(ToString::to_string).collect();
            format!("expected one of: {}", options.join(", "))
        })
}

fn parse_genre(raw: &str) -> Result<Genre, String> {
    choice(&Genre::ALL, raw)
}

fn parse_age_group(raw: &str) -> Result<AgeGroup, String> {
    choice(&AgeGroup::ALL, raw)
}

fn parse_moral_lesson(raw: &str) -> Result<MoralLesson, String> {
    choice(&MoralLesson::ALL, raw)
}

fn parse_emotion(raw: &str) -> Result<Emotion, String> {
    choice(&Emotion::ALL, raw)
}

fn parse_voice(raw: &str) -> Result<VoiceOption, String> {
    choice(&VoiceOption::ALL, raw)
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn load_library(path: Option<&PathBuf>) -> Result<StoryLibrary> {
    match path {
        Some(path) => load_catalog(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(StoryLibrary::from_stories(sample_stories(Utc::now()))),
    }
}

fn print_cards(library: &StoryLibrary) {
    for card in library.cards() {
        println!("{}", render::card_line(&card));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = load_config(cli.config.as_ref())?;
    let mut library = load_library(cli.catalog.as_ref())?;
    info!(stories = library.len(), "Library ready");

    match cli.command {
        Command::List { json } => {
            if json {
                let cards = serde_json::to_string_pretty(&library.cards())
                    .context("Failed to serialize story cards")?;
                println!("{cards}");
            } else {
                print_cards(&library);
            }
        }
        Command::Create {
            prompt,
            genre,
            age_group,
            moral_lesson,
            emotion,
            art_style,
            voice,
        } => {
            let defaults = StoryMeta::default();
            let request = StoryMeta {
                prompt,
                genre: genre.unwrap_or(defaults.genre),
                age_group: age_group.unwrap_or(defaults.age_group),
                moral_lesson: moral_lesson.unwrap_or(defaults.moral_lesson),
                emotion: emotion.unwrap_or(defaults.emotion),
                art_style: art_style.unwrap_or(defaults.art_style),
                voice_option: voice.unwrap_or(defaults.voice_option),
            };

            let mut studio = StoryStudio::new(MockGenerator::new(&config.studio));
            println!("Creating your story...");
            match studio.create_blocking(request, &mut library) {
                CreateOutcome::Created { notice, .. } => {
                    println!("{notice}");
                    print_cards(&library);
                }
                CreateOutcome::Failed(notice) => bail!("{}", notice.message),
            }
        }
        Command::Shorts { start } => {
            session::run_shorts(&mut library, &config.playback, start)?;
            print_cards(&library);
        }
        Command::View { index } => session::run_scene_viewer(&library, index)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_match_form_labels_case_insensitively() {
        assert_eq!(parse_genre("sci fi"), Ok(Genre::SciFi));
        assert_eq!(parse_age_group("6-8"), Ok(AgeGroup::SixToEight));
        assert_eq!(parse_moral_lesson("Hard Work"), Ok(MoralLesson::HardWork));
        assert_eq!(parse_voice("eve"), Ok(VoiceOption::Eve));
        assert!(parse_emotion("boredom").unwrap_err().contains("happiness"));
    }

    #[test]
    fn cli_parses_create_flags() {
        let cli = Cli::try_parse_from([
            "storytime",
            "create",
            "a sleepy owl",
            "--genre",
            "Bedtime",
            "--voice",
            "Eve",
        ])
        .unwrap();
        match cli.command {
            Command::Create { prompt, genre, voice, age_group, .. } => {
                assert_eq!(prompt, "a sleepy owl");
                assert_eq!(genre, Some(Genre::Bedtime));
                assert_eq!(voice, Some(VoiceOption::Eve));
                assert_eq!(age_group, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_genre() {
        assert!(Cli::try_parse_from(["storytime", "create", "x", "--genre", "Horror"]).is_err());
    }
}
