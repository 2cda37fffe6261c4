//! Flashcard Endpoints
//!
//! Flashcards belong to the signed-in student; the token scopes every call.

use leptos_listkit::{require, Changes, QueryParams, Validate, ValidationError};
use serde::Serialize;

use super::{segment, text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::Flashcard;

pub const FLASHCARDS: &str = "/flashcards";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashcardFilter {
    pub question: String,
    pub subject: String,
    pub status: StatusFilter,
}

impl QueryParams for FlashcardFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "question", &self.question);
        text_param(&mut pairs, "subject", &self.subject);
        pairs.extend(self.status.param());
        pairs
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Validate for NewFlashcard {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Question", self.question.as_str()), ("Answer", self.answer.as_str())])
    }
}

impl ApiClient {
    pub fn flashcards(&self) -> EndpointSource<FlashcardFilter, Flashcard> {
        self.source(FLASHCARDS)
    }

    pub async fn create_flashcard(&self, card: NewFlashcard) -> AppResult<ApiMessage> {
        self.post(FLASHCARDS, &card).await
    }

    pub async fn update_flashcard(&self, id: &str, changes: Changes) -> AppResult<ApiMessage> {
        self.patch(&format!("{}/{}", FLASHCARDS, segment(id)), &changes.to_json()).await
    }

    pub async fn set_flashcard_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(FLASHCARDS, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_requires_both_sides() {
        let card = NewFlashcard {
            question: "What is entropy?".into(),
            ..Default::default()
        };
        assert_eq!(card.validate(), Err(ValidationError::Missing("Answer")));
    }

    #[test]
    fn test_subject_omitted_when_unset() {
        let card = NewFlashcard {
            question: "Q".into(),
            answer: "A".into(),
            subject: None,
        };
        assert_eq!(serde_json::to_string(&card).unwrap(), r#"{"question":"Q","answer":"A"}"#);
    }
}
