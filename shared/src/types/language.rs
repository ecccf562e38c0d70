//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for user-facing messages
///
/// The product is Hebrew-first; English is served when the client asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "he")]
    Hebrew,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Extract language from an Accept-Language header
    ///
    /// Only the most preferred entry is considered; anything that is not
    /// English resolves to Hebrew.
    pub fn from_accept_language(header: &str) -> Self {
        let preferred = header
            .split(',')
            .next()
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        if preferred == "en" || preferred.starts_with("en-") {
            Language::English
        } else {
            Language::Hebrew
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hebrew => "he",
            Language::English => "en",
        }
    }

    /// Check if language uses right-to-left script
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Hebrew)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "he" | "heb" | "hebrew" | "iw" => Ok(Language::Hebrew),
            "en" | "eng" | "english" => Ok(Language::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
