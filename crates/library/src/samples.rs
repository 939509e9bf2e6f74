//! Built-in demo stories shown before any story has been created.

use chrono::{DateTime, Duration, Utc};
use tracing::error;

use st_common::{
    AgeGroup, Emotion, Genre, MoralLesson, Scene, SceneId, SceneRecord, Story, StoryId, StoryMeta,
    StoryRecord, VoiceOption,
};

pub const DRAGON_IMAGE: &str = "assets/story-dragon.jpg";
pub const MOUSE_IMAGE: &str = "assets/story-mouse.jpg";
pub const UNDERWATER_IMAGE: &str = "assets/story-underwater.jpg";

struct SampleSpec {
    id: &'static str,
    title: &'static str,
    prompt: &'static str,
    genre: Genre,
    age_group: AgeGroup,
    moral_lesson: MoralLesson,
    emotion: Emotion,
    art_style: &'static str,
    voice_option: VoiceOption,
    image: &'static str,
    scene_seconds: f64,
    scenes: &'static [&'static str],
    times_played: u64,
    days_old: i64,
    duration_seconds: u32,
}

const SAMPLES: [SampleSpec; 4] = [
    SampleSpec {
        id: "1",
        title: "The Dragon Who Loved Books",
        prompt: "A young dragon discovers the magic of reading",
        genre: Genre::Fantasy,
        age_group: AgeGroup::FourToSix,
        moral_lesson: MoralLesson::Courage,
        emotion: Emotion::Happiness,
        art_style: "Disney style",
        voice_option: VoiceOption::Adam,
        image: DRAGON_IMAGE,
        scene_seconds: 5.0,
        scenes: &[
            "Once upon a time, in a magical land far away, there lived a small dragon named Sparkle who was different from all the other dragons.",
            "While other dragons breathed fire and collected treasure, Sparkle loved to read books and learn new things every day.",
            "One day, Sparkle discovered a magical library hidden deep in the forest, filled with books that could transport readers to incredible adventures.",
        ],
        times_played: 12,
        days_old: 0,
        duration_seconds: 300,
    },
    SampleSpec {
        id: "2",
        title: "The Brave Little Mouse Adventure",
        prompt: "A tiny mouse goes on a big adventure through the forest",
        genre: Genre::Adventure,
        age_group: AgeGroup::FourToSix,
        moral_lesson: MoralLesson::Courage,
        emotion: Emotion::Happiness,
        art_style: "Disney style",
        voice_option: VoiceOption::Eve,
        image: MOUSE_IMAGE,
        scene_seconds: 4.0,
        scenes: &[
            "Meet Pip, the smallest mouse in the forest, who dreamed of going on the biggest adventure of all!",
            "Armed with nothing but courage and a tiny backpack, Pip set off through the tall grass on a quest to find the legendary Golden Acorn.",
            "Along the way, Pip met friendly creatures who taught him that being small doesn't mean you can't do big things!",
        ],
        times_played: 8,
        days_old: 1,
        duration_seconds: 240,
    },
    SampleSpec {
        id: "3",
        title: "The Underwater Kingdom",
        prompt: "A magical underwater world full of friendly sea creatures",
        genre: Genre::Fantasy,
        age_group: AgeGroup::SixToEight,
        moral_lesson: MoralLesson::Gratitude,
        emotion: Emotion::Empathy,
        art_style: "Disney style",
        voice_option: VoiceOption::Adam,
        image: UNDERWATER_IMAGE,
        scene_seconds: 6.0,
        scenes: &[
            "Deep beneath the ocean waves, there existed a beautiful kingdom where mermaids, dolphins, and colorful fish lived together in harmony.",
            "Princess Marina, a young mermaid with a heart full of kindness, discovered that the coral reef was losing its colors and needed her help.",
            "With the help of her ocean friends, Marina learned that by showing gratitude and caring for others, she could restore the reef's magical glow.",
        ],
        times_played: 15,
        days_old: 2,
        duration_seconds: 450,
    },
    SampleSpec {
        id: "4",
        title: "The Space Adventure",
        prompt: "A young astronaut explores distant planets and makes new friends",
        genre: Genre::SciFi,
        age_group: AgeGroup::SixToEight,
        moral_lesson: MoralLesson::Courage,
        emotion: Emotion::Happiness,
        art_style: "Comic style",
        voice_option: VoiceOption::Adam,
        image: DRAGON_IMAGE,
        scene_seconds: 5.0,
        scenes: &[
            "Captain Luna was the youngest astronaut in the galaxy, but she had the biggest dreams of exploring new worlds.",
            "When her spaceship landed on Planet Zephyr, she discovered friendly alien creatures who taught her about their colorful world.",
        ],
        times_played: 5,
        days_old: 3,
        duration_seconds: 300,
    },
];

/// The demo catalog, dated relative to `now`.
pub fn sample_stories(now: DateTime<Utc>) -> Vec<Story> {
    SAMPLES
        .iter()
        .filter_map(|spec| match build(spec, now) {
            Ok(story) => Some(story),
            Err(e) => {
                error!(story_id = spec.id, error = %e, "Invalid sample story");
                None
            }
        })
        .collect()
}

fn build(spec: &SampleSpec, now: DateTime<Utc>) -> st_common::StoryResult<Story> {
    let scenes = spec
        .scenes
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Scene::try_from(SceneRecord {
                id: SceneId::new(format!("{}-{}", spec.id, i + 1)),
                image_url: spec.image.to_string(),
                text: (*text).to_string(),
                audio_url: None,
                duration: spec.scene_seconds,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Story::try_from(StoryRecord {
        id: StoryId::new(spec.id),
        title: spec.title.to_string(),
        meta: StoryMeta {
            prompt: spec.prompt.to_string(),
            genre: spec.genre,
            age_group: spec.age_group,
            moral_lesson: spec.moral_lesson,
            emotion: spec.emotion,
            art_style: spec.art_style.to_string(),
            voice_option: spec.voice_option,
        },
        scenes,
        times_played: spec.times_played,
        created_at: now - Duration::days(spec.days_old),
        cover_image_url: Some(spec.image.to_string()),
        duration_seconds: spec.duration_seconds,
    })
}
