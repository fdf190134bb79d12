//! Theme preference
//!
//! The ledger only stores the user's choice; rendering is the presentation
//! layer's business. Legacy snapshots written in the Russian locale use
//! Russian theme names, which are accepted as aliases. Unknown names fall back to the
//! default rather than failing a whole import.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Midnight,
    Ocean,
    Graphite,
    Cosmos,
    Depth,
    Cloud,
    Mint,
    Sand,
    Paper,
    Marshmallow,
}

impl Theme {
    /// All themes in picker order
    pub fn all() -> &'static [Self] {
        &[
            Self::Midnight,
            Self::Ocean,
            Self::Graphite,
            Self::Cosmos,
            Self::Depth,
            Self::Cloud,
            Self::Mint,
            Self::Sand,
            Self::Paper,
            Self::Marshmallow,
        ]
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Midnight => "Midnight",
            Self::Ocean => "Ocean",
            Self::Graphite => "Graphite",
            Self::Cosmos => "Cosmos",
            Self::Depth => "Depth",
            Self::Cloud => "Cloud",
            Self::Mint => "Mint",
            Self::Sand => "Sand",
            Self::Paper => "Paper",
            Self::Marshmallow => "Marshmallow",
        }
    }

    fn legacy_name(&self) -> &'static str {
        match self {
            Self::Midnight => "Полночь",
            Self::Ocean => "Океан",
            Self::Graphite => "Графит",
            Self::Cosmos => "Космос",
            Self::Depth => "Глубина",
            Self::Cloud => "Облако",
            Self::Mint => "Мята",
            Self::Sand => "Песок",
            Self::Paper => "Бумага",
            Self::Marshmallow => "Зефир",
        }
    }

    /// Look up a theme by canonical (case-insensitive) or legacy name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name) || t.legacy_name() == name)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown theme: {}", s))
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(theme = %name, "unknown theme, falling back to default");
            Self::default()
        })
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Theme::from_name("ocean"), Some(Theme::Ocean));
        assert_eq!(Theme::from_name("Полночь"), Some(Theme::Midnight));
        assert_eq!(Theme::from_name("Neon"), None);
        assert!("Neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Mint).unwrap(), "\"Mint\"");

        let legacy: Theme = serde_json::from_str("\"Зефир\"").unwrap();
        assert_eq!(legacy, Theme::Marshmallow);

        let unknown: Theme = serde_json::from_str("\"Neon\"").unwrap();
        assert_eq!(unknown, Theme::Midnight);
    }
}
