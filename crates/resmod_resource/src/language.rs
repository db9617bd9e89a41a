use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of a localized resource.
///
/// [`Any`](Language::Any) marks data that applies regardless of the requested
/// language. The specific languages never include each other.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    Any,
    Default,
    French,
    German,
}

impl Language {
    /// The specific languages, in archive order. [`Language::Any`] is not part of it.
    pub const ALL: [Language; 3] = [Language::Default, Language::French, Language::German];

    /// Returns true if data stored under `self` applies to a request for `other`.
    pub fn includes(self, other: Language) -> bool {
        self == Language::Any || self == other
    }

    /// [`Language::Any`] followed by all specific languages.
    pub fn with_any() -> impl Iterator<Item = Language> {
        std::iter::once(Language::Any).chain(Self::ALL)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Any => "any",
            Language::Default => "default",
            Language::French => "french",
            Language::German => "german",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Language::Any),
            "default" | "english" | "eng" => Ok(Language::Default),
            "french" | "fre" => Ok(Language::French),
            "german" | "ger" => Ok(Language::German),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}
