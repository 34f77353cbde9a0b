use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

/// Display themes. Pink is used whenever nothing valid is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    #[default]
    Pink,
    Green,
    Lavender,
    Blue,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Pink,
        ThemeName::Green,
        ThemeName::Lavender,
        ThemeName::Blue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Pink => "pink",
            ThemeName::Green => "green",
            ThemeName::Lavender => "lavender",
            ThemeName::Blue => "blue",
        }
    }

    /// Accent color shown in the theme swatch and widget background.
    pub fn accent(self) -> &'static str {
        match self {
            ThemeName::Pink => "#ffeef2",
            ThemeName::Green => "#e7f8ee",
            ThemeName::Lavender => "#f3e8ff",
            ThemeName::Blue => "#e0f0ff",
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ThemeName::ALL
            .into_iter()
            .find(|theme| theme.as_str() == wanted)
            .ok_or_else(|| {
                anyhow!(
                    "unknown theme '{}', expected one of: {}",
                    s,
                    Self::available_themes().join(", ")
                )
            })
    }
}
