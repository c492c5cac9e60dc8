use async_trait::async_trait;
use indoc::formatdoc;

use crate::error::ReasoningError;

/// A text-generation backend the engine can ask for reasoning.
///
/// A call resolves to the generated text or a [`ReasoningError`]. The engine
/// runs calls on a background task, so implementations must be `Send + Sync`.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Short identifier used in logs (e.g. "openai", "claude").
    fn name(&self) -> &str;

    /// Send a raw prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ReasoningError>;

    async fn analyze_preferences(&self, user_data: &str) -> Result<String, ReasoningError> {
        self.generate(&analyze_preferences_prompt(user_data)).await
    }

    /// Ask for a ranked, explained recommendation over `events`.
    async fn recommend(&self, preferences: &str, events: &str) -> Result<String, ReasoningError> {
        self.generate(&recommend_prompt(preferences, events)).await
    }
}

pub fn analyze_preferences_prompt(user_data: &str) -> String {
    formatdoc! {"
        Analyze the following user data and extract preferences for event recommendations:
        {user_data}"
    }
}

pub fn recommend_prompt(preferences: &str, events: &str) -> String {
    formatdoc! {"
        Based on these user preferences:
        {preferences}

        Recommend events from this list:
        {events}

        Provide a ranked list with explanations."
    }
}
