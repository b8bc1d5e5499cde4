use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a dictionary headword.
///
/// This is the only shape a word leaves the service in, whichever endpoint
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: Uuid,
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    pub variations: Vec<String>,
    pub normalized: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    pub stems: Vec<String>,
}

impl Word {
    pub fn new(id: Uuid, new: NewWord) -> Self {
        Self {
            id,
            word: new.word,
            word_class: new.word_class,
            definitions: new.definitions,
            variations: new.variations,
            normalized: new.normalized,
            frequency: new.frequency,
            stems: new.stems,
        }
    }
}

/// Creation payload. Every optional field is defaulted here, so list fields
/// are never missing once a word exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    #[serde(default)]
    pub word_class: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub normalized: String,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub stems: Vec<String>,
}

impl NewWord {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.word.trim().is_empty() {
            return Err(SchemaError::Blank("word"));
        }
        if self.frequency.is_some_and(|f| !f.is_finite()) {
            return Err(SchemaError::Invalid {
                field: "frequency",
                reason: "must be a finite number",
            });
        }
        Ok(())
    }

    /// Fill in `normalized` from the headword when the payload left it empty.
    pub fn with_normalized(mut self) -> Self {
        if self.normalized.is_empty() {
            self.normalized = normalize(&self.word);
        }
        self
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordUpdate {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub word_class: Option<String>,
    #[serde(default)]
    pub definitions: Option<Vec<String>>,
    #[serde(default)]
    pub variations: Option<Vec<String>>,
    #[serde(default)]
    pub normalized: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub stems: Option<Vec<String>>,
}

impl WordUpdate {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.word.as_deref().is_some_and(|w| w.trim().is_empty()) {
            return Err(SchemaError::Blank("word"));
        }
        if self.frequency.is_some_and(|f| !f.is_finite()) {
            return Err(SchemaError::Invalid {
                field: "frequency",
                reason: "must be a finite number",
            });
        }
        Ok(())
    }

    pub fn apply_to(self, word: &mut Word) {
        if let Some(text) = self.word {
            word.word = text;
        }
        if let Some(word_class) = self.word_class {
            word.word_class = word_class;
        }
        if let Some(definitions) = self.definitions {
            word.definitions = definitions;
        }
        if let Some(variations) = self.variations {
            word.variations = variations;
        }
        if let Some(normalized) = self.normalized {
            word.normalized = normalized;
        }
        if let Some(frequency) = self.frequency {
            word.frequency = Some(frequency);
        }
        if let Some(stems) = self.stems {
            word.stems = stems;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("`{0}` is required and must not be blank")]
    Blank(&'static str),
    #[error("`{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Compute the search form of a piece of Igbo text.
///
/// Tone marks are dropped, the dotted vowels and `ṅ` keep their dots, and the
/// result is lowercased with whitespace collapsed to single spaces.
pub fn normalize(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;

    let stripped: String = text.nfd().filter(|c| !marks::is_tone(*c)).nfc().collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub mod marks {
    const GRAVE: char = '\u{0300}';
    const ACUTE: char = '\u{0301}';
    const CIRCUMFLEX: char = '\u{0302}';
    const MACRON: char = '\u{0304}';

    /// Whether a decomposed combining character marks tone rather than being
    /// part of the letter (like the dot below in `ị`).
    pub fn is_tone(c: char) -> bool {
        matches!(c, GRAVE | ACUTE | CIRCUMFLEX | MACRON)
    }
}
