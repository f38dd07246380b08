use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Romantic,
    Elegant,
    Playful,
    Classic,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Romantic,
        Theme::Elegant,
        Theme::Playful,
        Theme::Classic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Theme::Romantic => "romantic",
            Theme::Elegant => "elegant",
            Theme::Playful => "playful",
            Theme::Classic => "classic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Romantic => "Romantic Rose",
            Theme::Elegant => "Elegant Gold",
            Theme::Playful => "Playful Pink",
            Theme::Classic => "Classic Red",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.id() == lower)
            .ok_or_else(|| CoreError::InvalidTheme(s.trim().to_string()))
    }
}
