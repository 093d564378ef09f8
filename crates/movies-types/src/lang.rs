use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Language of user facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Id,
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnknownLanguage(String);

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Id => "id",
        }
    }

    /// First supported language listed in `Accept-Language` header value.
    /// Quality weights are ignored, order of tags decides.
    pub fn from_accept_language(value: &str) -> Option<Lang> {
        value
            .split(',')
            .filter_map(|tag| tag.split(';').next())
            .map(str::trim)
            .find_map(|tag| tag.parse().ok())
    }
}

impl FromStr for Lang {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            // "in" is deprecated code for Indonesian, still sent by some clients
            "id" | "in" => Ok(Lang::Id),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
