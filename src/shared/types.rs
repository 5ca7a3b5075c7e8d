use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the two languages the endpoint translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "session.ts")]
pub enum Language {
    Russian,
    Mansi,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::Mansi => "Мансийский",
        }
    }
}

/// Which language is the input for the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "session.ts")]
pub enum Direction {
    #[default]
    RussianToMansi,
    MansiToRussian,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::RussianToMansi => Direction::MansiToRussian,
            Direction::MansiToRussian => Direction::RussianToMansi,
        }
    }

    pub fn source(self) -> Language {
        match self {
            Direction::RussianToMansi => Language::Russian,
            Direction::MansiToRussian => Language::Mansi,
        }
    }

    pub fn target(self) -> Language {
        self.flipped().source()
    }
}

/// Wire identifiers the endpoint expects for each language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePair {
    pub russian: String,
    pub mansi: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            russian: "rus_Cyrl".to_string(),
            mansi: "mancy_Cyrl".to_string(),
        }
    }
}

impl LanguagePair {
    pub fn code(&self, language: Language) -> &str {
        match language {
            Language::Russian => &self.russian,
            Language::Mansi => &self.mansi,
        }
    }
}

/// Request body posted to the translation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, direction: Direction, languages: &LanguagePair) -> Self {
        Self {
            text: text.into(),
            source_language: languages.code(direction.source()).to_string(),
            target_language: languages.code(direction.target()).to_string(),
        }
    }
}

/// Success body returned by the translation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub translated_text: String,
}

/// How responses that arrive out of order are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "session.ts")]
pub enum ResponseOrdering {
    /// Only the response to the most recently issued request is applied.
    #[default]
    LatestOnly,
    /// Every response is applied as it arrives; a slow earlier response can
    /// overwrite a newer one.
    LastArrivalWins,
}

/// Everything the presentation layer needs to render a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "session.ts")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub input_text: String,
    pub translated_text: String,
    pub direction: Direction,
    pub input_label: String,
    pub output_label: String,
    pub input_placeholder: String,
    /// `translated_text`, or the output placeholder when it is empty
    pub output_display: String,
    pub picker_visible: bool,
    pub debounce_armed: bool,
    pub requests_in_flight: u32,
    #[ts(type = "number")]
    pub generation: u64,
}
