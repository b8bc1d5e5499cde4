use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: Uuid,
    pub igbo: String,
    pub english: String,
    /// Headwords this sentence illustrates.
    pub associated_words: Vec<Uuid>,
    pub updated_on: DateTime<Utc>,
}

impl Example {
    pub fn new(id: Uuid, new: NewExample, updated_on: DateTime<Utc>) -> Self {
        Self {
            id,
            igbo: new.igbo,
            english: new.english,
            associated_words: new.associated_words,
            updated_on,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExample {
    pub igbo: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub associated_words: Vec<Uuid>,
}

impl NewExample {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.igbo.trim().is_empty() {
            return Err(SchemaError::Blank("igbo"));
        }
        Ok(())
    }
}

/// Partial update. Absent and `null` keys both leave the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUpdate {
    #[serde(default)]
    pub igbo: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub associated_words: Option<Vec<Uuid>>,
}

impl ExampleUpdate {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.igbo.as_deref().is_some_and(|igbo| igbo.trim().is_empty()) {
            return Err(SchemaError::Blank("igbo"));
        }
        Ok(())
    }

    pub fn apply_to(self, example: &mut Example, updated_on: DateTime<Utc>) {
        if let Some(igbo) = self.igbo {
            example.igbo = igbo;
        }
        if let Some(english) = self.english {
            example.english = english;
        }
        if let Some(associated_words) = self.associated_words {
            example.associated_words = associated_words;
        }
        example.updated_on = updated_on;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("`{0}` is required and must not be blank")]
    Blank(&'static str),
}
