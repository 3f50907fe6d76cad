// Display language for status labels, report headers and messages.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    PtBr,
    En,
}

impl Language {
    // Unknown codes fall back to the default (pt-BR), like the staff UI does.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Language::En,
            _ => Language::PtBr,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::En => "en",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::PtBr => "Português (Brasil)",
            Language::En => "English",
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("EN-us"), Language::En);
        assert_eq!(Language::from_code("pt-BR"), Language::PtBr);
        assert_eq!(Language::from_code("fr"), Language::PtBr);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Language::En).unwrap();
        assert_eq!(json, "\"en\"");
        let parsed: Language = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(parsed, Language::PtBr);
    }
}
