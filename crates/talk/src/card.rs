//! Analysis cards returned by the inference endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Characters of analysis text shown before "Read more".
pub const PREVIEW_CHARS: usize = 200;
/// Suggested questions shown before "Show more".
pub const VISIBLE_QUESTIONS: usize = 3;

/// Labelled link (citation or recommended product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

/// Structured analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Database id, absent on cards that were never stored
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Score 0-100
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub citations: Vec<Link>,
    #[serde(default)]
    pub recommendations: Vec<Link>,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

/// Score band used for coloring the rating badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl RatingBand {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 80.0 {
            RatingBand::Excellent
        } else if rating >= 60.0 {
            RatingBand::Good
        } else if rating >= 40.0 {
            RatingBand::Fair
        } else {
            RatingBand::Poor
        }
    }
}

impl Card {
    /// Parse a JSON value as a card.
    ///
    /// Only objects carrying a `rating` count as cards.
    pub fn from_value(value: &Value) -> Option<Card> {
        let object = value.as_object()?;
        if !object.contains_key("rating") {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(card) => Some(card),
            Err(e) => {
                log::warn!("discarding malformed card: {}", e);
                None
            }
        }
    }

    /// Parse a card list, dropping nulls and anything that is not a card.
    pub fn list_from_value(value: &Value) -> Vec<Card> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Card::from_value).collect())
            .unwrap_or_default()
    }

    pub fn band(&self) -> RatingBand {
        RatingBand::for_rating(self.rating)
    }

    /// Rating as shown on the badge.
    pub fn rating_label(&self) -> String {
        if self.rating.fract() == 0.0 {
            format!("{}", self.rating as i64)
        } else {
            format!("{:.1}", self.rating)
        }
    }

    /// Analysis text, truncated unless `expanded`.
    pub fn preview(&self, expanded: bool) -> String {
        if expanded || self.text.chars().count() <= PREVIEW_CHARS {
            return self.text.clone();
        }
        let mut preview: String = self.text.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }

    pub fn is_truncated(&self) -> bool {
        self.text.chars().count() > PREVIEW_CHARS
    }

    /// Suggested questions, limited unless `show_all`.
    pub fn visible_questions(&self, show_all: bool) -> &[String] {
        if show_all {
            &self.suggested_questions
        } else {
            let end = self.suggested_questions.len().min(VISIBLE_QUESTIONS);
            &self.suggested_questions[..end]
        }
    }

    /// Questions hidden behind "Show more".
    pub fn hidden_question_count(&self) -> usize {
        self.suggested_questions.len().saturating_sub(VISIBLE_QUESTIONS)
    }

    /// Creation time formatted like "Mar 4, 2025, 09:15".
    pub fn created_label(&self) -> Option<String> {
        self.created_at
            .map(|t| t.format("%b %-d, %Y, %H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_api_field_names() {
        let value = json!({
            "_id": "abc",
            "rating": 72,
            "text": "Recycled packaging",
            "createdAt": "2025-03-04T09:15:00Z",
            "citations": [{"label": "Report", "url": "https://example.test/r"}],
            "suggestedQuestions": ["Is it vegan?"]
        });

        let card = Card::from_value(&value).unwrap();
        assert_eq!(card.id.as_deref(), Some("abc"));
        assert_eq!(card.rating, 72.0);
        assert_eq!(card.citations.len(), 1);
        assert!(card.recommendations.is_empty());
        assert_eq!(card.created_label().unwrap(), "Mar 4, 2025, 09:15");
    }

    #[test]
    fn test_value_without_rating_is_not_a_card() {
        assert!(Card::from_value(&json!({"text": "hi"})).is_none());
        assert!(Card::from_value(&json!(null)).is_none());
        assert!(Card::from_value(&json!("text")).is_none());
    }

    #[test]
    fn test_list_filters_invalid_entries() {
        let value = json!([
            {"rating": 10},
            null,
            {"error": "x"},
            {"rating": 90, "text": "ok"}
        ]);
        let cards = Card::list_from_value(&value);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].rating, 90.0);
        assert!(Card::list_from_value(&json!({"rating": 1})).is_empty());
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(RatingBand::for_rating(80.0), RatingBand::Excellent);
        assert_eq!(RatingBand::for_rating(79.9), RatingBand::Good);
        assert_eq!(RatingBand::for_rating(40.0), RatingBand::Fair);
        assert_eq!(RatingBand::for_rating(12.0), RatingBand::Poor);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let mut card = Card::from_value(&json!({"rating": 50})).unwrap();
        card.text = "a".repeat(250);

        let preview = card.preview(false);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(card.preview(true).len(), 250);
        assert!(card.is_truncated());
    }

    #[test]
    fn test_question_visibility() {
        let mut card = Card::from_value(&json!({"rating": 50})).unwrap();
        card.suggested_questions = (1..=5).map(|i| format!("q{}", i)).collect();

        assert_eq!(card.visible_questions(false).len(), 3);
        assert_eq!(card.visible_questions(true).len(), 5);
        assert_eq!(card.hidden_question_count(), 2);
    }

    #[test]
    fn test_rating_label() {
        let mut card = Card::from_value(&json!({"rating": 64})).unwrap();
        assert_eq!(card.rating_label(), "64");
        card.rating = 64.75;
        assert_eq!(card.rating_label(), "64.8");
    }
}
