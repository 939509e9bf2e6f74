//! Core identity newtypes and story metadata enums.
//!
//! Every enum serializes to the exact label the story form presents, so a
//! catalog written by hand (`"genre": "Sci Fi"`, `"age_group": "4-6"`) loads
//! without any mapping table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque story identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scene identifier, unique within its story.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Story genre.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[default]
    Fantasy,
    #[serde(rename = "Sci Fi")]
    SciFi,
    Adventure,
    Animals,
    Funny,
    Bedtime,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Adventure,
        Genre::Animals,
        Genre::Funny,
        Genre::Bedtime,
    ];

    /// Label shown on badges and used in generated titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fantasy => "Fantasy",
            Self::SciFi => "Sci Fi",
            Self::Adventure => "Adventure",
            Self::Animals => "Animals",
            Self::Funny => "Funny",
            Self::Bedtime => "Bedtime",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target age bracket of the listener.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "2-4")]
    TwoToFour,
    #[default]
    #[serde(rename = "4-6")]
    FourToSix,
    #[serde(rename = "6-8")]
    SixToEight,
    #[serde(rename = "8-10")]
    EightToTen,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::TwoToFour,
        AgeGroup::FourToSix,
        AgeGroup::SixToEight,
        AgeGroup::EightToTen,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::TwoToFour => "2-4",
            Self::FourToSix => "4-6",
            Self::SixToEight => "6-8",
            Self::EightToTen => "8-10",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The lesson a story is written to teach.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoralLesson {
    Honesty,
    #[serde(rename = "hard work")]
    HardWork,
    #[default]
    Courage,
    Gratitude,
}

impl MoralLesson {
    pub const ALL: [MoralLesson; 4] = [
        MoralLesson::Honesty,
        MoralLesson::HardWork,
        MoralLesson::Courage,
        MoralLesson::Gratitude,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Honesty => "honesty",
            Self::HardWork => "hard work",
            Self::Courage => "courage",
            Self::Gratitude => "gratitude",
        }
    }
}

impl fmt::Display for MoralLesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dominant emotion of a story.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Happiness,
    Anger,
    Sadness,
    Fear,
    Empathy,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Happiness,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Empathy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Anger => "anger",
            Self::Sadness => "sadness",
            Self::Fear => "fear",
            Self::Empathy => "empathy",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Narration voice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceOption {
    #[default]
    Adam,
    Eve,
}

impl VoiceOption {
    pub const ALL: [VoiceOption; 2] = [Self::Adam, Self::Eve];

    pub fn label(self) -> &'static str {
        match self {
            Self::Adam => "Adam",
            Self::Eve => "Eve",
        }
    }
}

impl fmt::Display for VoiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_serializes_to_form_label() {
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci Fi\"");
        let parsed: Genre = serde_json::from_str("\"Bedtime\"").unwrap();
        assert_eq!(parsed, Genre::Bedtime);
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{}\"", genre.label()));
        }
    }

    #[test]
    fn age_group_labels() {
        assert_eq!(AgeGroup::EightToTen.to_string(), "8-10");
        let parsed: AgeGroup = serde_json::from_str("\"2-4\"").unwrap();
        assert_eq!(parsed, AgeGroup::TwoToFour);
    }

    #[test]
    fn lesson_and_emotion_labels() {
        assert_eq!(
            serde_json::to_string(&MoralLesson::HardWork).unwrap(),
            "\"hard work\""
        );
        assert_eq!(serde_json::to_string(&MoralLesson::Courage).unwrap(), "\"courage\"");
        assert_eq!(serde_json::to_string(&Emotion::Empathy).unwrap(), "\"empathy\"");
    }

    #[test]
    fn defaults_match_story_form() {
        assert_eq!(Genre::default(), Genre::Fantasy);
        assert_eq!(AgeGroup::default(), AgeGroup::FourToSix);
        assert_eq!(MoralLesson::default(), MoralLesson::Courage);
        assert_eq!(Emotion::default(), Emotion::Happiness);
        assert_eq!(VoiceOption::default(), VoiceOption::Adam);
    }

    #[test]
    fn ids_are_transparent_strings() {
        let id = StoryId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        assert_eq!(id.to_string(), "42");
    }
}
