use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed catalog of moods a day can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Good,
    Loved,
    Rough,
    Calm,
    Social,
    Focused,
    Meh,
    Awesome,
}

impl Mood {
    /// Catalog order, which is also the order of the mood menu.
    pub const ALL: [Mood; 8] = [
        Mood::Good,
        Mood::Loved,
        Mood::Rough,
        Mood::Calm,
        Mood::Social,
        Mood::Focused,
        Mood::Meh,
        Mood::Awesome,
    ];

    pub fn color(self) -> &'static str {
        match self {
            Mood::Good => "#FFF5B7",
            Mood::Loved => "#FCD5CE",
            Mood::Rough => "#C3DDFD",
            Mood::Calm => "#E6E6FA",
            Mood::Social => "#FFDACC",
            Mood::Focused => "#C4F1F9",
            Mood::Meh => "#D3D3D3",
            Mood::Awesome => "#FFA5C5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Good => "good",
            Mood::Loved => "loved",
            Mood::Rough => "rough",
            Mood::Calm => "calm",
            Mood::Social => "social",
            Mood::Focused => "focused",
            Mood::Meh => "meh",
            Mood::Awesome => "awesome",
        }
    }

    /// Snapshot this catalog entry into a record that outlives catalog edits.
    pub fn record(self) -> MoodRecord {
        MoodRecord::new(self.color(), self.label())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Mood::ALL.iter().map(|m| m.label()).collect();
                anyhow!("unknown mood '{}', expected one of: {}", s, valid.join(", "))
            })
    }
}

/// A persisted mood choice for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub color: String,
    pub label: String,
}

impl MoodRecord {
    pub fn new(color: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: label.into(),
        }
    }

    /// The `awesome` label gets a decorative marker when rendered.
    pub fn is_awesome(&self) -> bool {
        self.label == Mood::Awesome.label()
    }
}

impl From<Mood> for MoodRecord {
    fn from(mood: Mood) -> Self {
        mood.record()
    }
}
