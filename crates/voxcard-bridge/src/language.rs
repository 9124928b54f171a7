use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the demo widget can resolve audio for.
///
/// The set is closed: the lookup service only stocks audio for these values,
/// and the serialized form doubles as the path segment of the per-language
/// endpoint, so the variants map to the literal strings the service expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Language {
    /// The initial selection on startup.
    #[default]
    English,
    Arabic,
}

impl Language {
    /// All selectable languages, in presentation order.
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// The literal value used in the lookup endpoint path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that names no supported language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Case-insensitive, matching the lookup service's own language matching.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLanguage(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_casing_of_supported_languages() {
        assert_eq!("English".parse(), Ok(Language::English));
        assert_eq!("arabic".parse(), Ok(Language::Arabic));
        assert_eq!("ARABIC".parse(), Ok(Language::Arabic));
    }

    #[test]
    fn rejects_unsupported_languages() {
        assert_eq!(
            "French".parse::<Language>(),
            Err(UnknownLanguage("French".to_string()))
        );
    }

    #[test]
    fn display_matches_the_endpoint_path_segment() {
        assert_eq!(Language::English.to_string(), "English");
        assert_eq!(Language::Arabic.to_string(), "Arabic");
    }
}
