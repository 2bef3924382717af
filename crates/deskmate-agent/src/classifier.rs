// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory relevance classification.
//!
//! After every completed turn, a small model decides whether the exchange
//! revealed durable information about the employee and, if so, which
//! category it belongs to. Classification is best-effort: any failure is
//! treated as "do not store" so noise never blocks the reply.

use std::sync::Arc;

use deskmate_core::{
    ChatTurn, CompletionProvider, CompletionRequest, MemoryCategory, ResponseFormat,
};

const CLASSIFIER_PROMPT: &str = r#"You are a memory analyzer. Analyze the user message and determine:
1. If it contains NEW, MEANINGFUL information worth remembering for future interactions
2. What category it belongs to

STORE memory if the message contains:
- Personal preferences (food likes/dislikes, dietary restrictions, favorite items)
- Personal information (home address, usual commute locations, work schedule)
- Habits or patterns (e.g., "I usually order coffee at 10am")
- Important context about their life (e.g., "I have a meeting tomorrow", "I'm vegetarian")
- Corrections to previous assumptions

DO NOT store memory if the message is:
- A simple transactional request using already-known preferences (e.g., "order my usual", "book a cab")
- A greeting or small talk
- A question about status or information (e.g., "what's my leave balance?", "show my orders")
- A confirmation or acknowledgment (e.g., "yes", "okay", "thanks")
- A request that doesn't reveal new personal information

CATEGORIES (use exactly these values):
- food_preferences: Food likes, dislikes, dietary restrictions, allergies, favorite meals/restaurants
- travel_preferences: Commute preferences, pickup/drop locations, home address, office location, cab preferences
- work_schedule: Work hours, meeting patterns, busy times, project schedules
- leave_time_off: Vacation plans, leave patterns, holidays, time-off preferences
- expense_finance: Spending habits, budget preferences, expense categories
- personal_info: Personal details, family info, health conditions, emergency contacts
- communication_style: Communication preferences, notification settings
- general_preferences: Other preferences that don't fit above categories

Respond in JSON format ONLY:
{"shouldStore": true/false, "category": "category_name" or null}"#;

/// Outcome of classifying one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryDecision {
    pub should_store: bool,
    pub category: Option<MemoryCategory>,
}

impl MemoryDecision {
    pub const SKIP: Self = Self {
        should_store: false,
        category: None,
    };
}

/// Classifies exchanges with a dedicated (usually smaller) model.
pub struct MemoryClassifier {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl MemoryClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Decide whether to store this exchange. Never fails; classification
    /// errors degrade to [`MemoryDecision::SKIP`].
    pub async fn classify(&self, user_message: &str, assistant_response: &str) -> MemoryDecision {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: Some(CLASSIFIER_PROMPT.to_string()),
            messages: vec![ChatTurn::user(format!(
                "User message: \"{user_message}\"\n\nAssistant response: \"{assistant_response}\""
            ))],
            max_tokens: Some(50),
            temperature: Some(0.0),
            tools: Vec::new(),
            response_format: Some(ResponseFormat::JsonObject),
        };

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(error = %error, "memory classification failed, skipping store");
                return MemoryDecision::SKIP;
            }
        };

        let Some(content) = response.content else {
            return MemoryDecision::SKIP;
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(verdict) => {
                let should_store = verdict["shouldStore"] == true;
                let category = should_store.then(|| {
                    verdict
                        .get("category")
                        .and_then(|v| v.as_str())
                        .map(MemoryCategory::parse_lossy)
                        .unwrap_or(MemoryCategory::GeneralPreferences)
                });
                MemoryDecision {
                    should_store,
                    category,
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "classifier returned malformed JSON");
                MemoryDecision::SKIP
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskmate_test_utils::{FailingProvider, ScriptedProvider};

    #[tokio::test]
    async fn store_verdict_carries_category() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push(ScriptedProvider::text_response(
            r#"{"shouldStore": true, "category": "food_preferences"}"#,
        ));
        let classifier = MemoryClassifier::new(provider.clone(), "gpt-4o-mini");

        let decision = classifier.classify("I'm vegetarian", "Noted!").await;
        assert!(decision.should_store);
        assert_eq!(decision.category, Some(MemoryCategory::FoodPreferences));

        // The classifier asks for strict JSON output.
        let request = &provider.requests()[0];
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(request.max_tokens, Some(50));
        assert_eq!(request.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn missing_category_defaults_to_general() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push(ScriptedProvider::text_response(
            r#"{"shouldStore": true, "category": null}"#,
        ));
        let classifier = MemoryClassifier::new(provider, "gpt-4o-mini");

        let decision = classifier.classify("x", "y").await;
        assert_eq!(decision.category, Some(MemoryCategory::GeneralPreferences));
    }

    #[tokio::test]
    async fn unknown_category_is_coerced() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push(ScriptedProvider::text_response(
            r#"{"shouldStore": true, "category": "favorite_colors"}"#,
        ));
        let classifier = MemoryClassifier::new(provider, "gpt-4o-mini");

        let decision = classifier.classify("x", "y").await;
        assert_eq!(decision.category, Some(MemoryCategory::GeneralPreferences));
    }

    #[tokio::test]
    async fn negative_verdict_skips() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push(ScriptedProvider::text_response(
            r#"{"shouldStore": false, "category": null}"#,
        ));
        let classifier = MemoryClassifier::new(provider, "gpt-4o-mini");

        let decision = classifier.classify("thanks", "You're welcome!").await;
        assert_eq!(decision, MemoryDecision::SKIP);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_skip() {
        let classifier = MemoryClassifier::new(Arc::new(FailingProvider), "gpt-4o-mini");
        let decision = classifier.classify("x", "y").await;
        assert_eq!(decision, MemoryDecision::SKIP);
    }

    #[tokio::test]
    async fn malformed_json_degrades_to_skip() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push(ScriptedProvider::text_response("not json"));
        let classifier = MemoryClassifier::new(provider, "gpt-4o-mini");

        let decision = classifier.classify("x", "y").await;
        assert_eq!(decision, MemoryDecision::SKIP);
    }
}
