use std::sync::Arc;

use ai_client::ChatAgent;
use tracing::warn;

use assetgraph_common::{Intent, QueryResponse};

/// Prompt describing what the deterministic pipeline can answer, so
/// the model steers the user back toward supported phrasings.
const FALLBACK_SYSTEM_PROMPT: &str = "You are the help layer of a real-estate and infrastructure \
portfolio assistant. The assistant answers questions by matching them against a fixed set of \
query patterns over a knowledge graph. Supported question types are:\n\
- Portfolio analysis: distribution and counts by platform, region, investment type, building type, or state\n\
- Geographic assets: assets in a named state, city, or region, optionally filtered by building type, \
or within a distance of a reference location\n\
- Economic data: current values and trends for unemployment rates, mortgage rates, the federal funds rate, \
and other interest rates\n\
- Semantic search: assets described by qualities such as sustainability, ESG focus, or luxury, \
optionally combined with a location\n\
The user's question did not match any supported pattern. Reply with exactly one of: \
a suggested rephrasing that would match a supported pattern, a direct factual answer if the question \
is answerable from the capabilities above, or brief guidance on what can be asked. Be concise.";

const STATIC_SUGGESTIONS: &str = "I couldn't match that question to a supported query pattern. \
Try questions like:\n\
\u{2022} What is the portfolio distribution by platform?\n\
\u{2022} Show me assets in Texas\n\
\u{2022} Which assets are within 50 km of Los Angeles?\n\
\u{2022} What is the current unemployment rate in California?\n\
\u{2022} Find sustainable, ESG-friendly properties in Texas";

/// Last-resort path when no deterministic rule matches: ask the LLM
/// for a rephrasing or guidance, with a static suggestion list if the
/// call fails or no model is configured. Never errors past this point.
pub struct FallbackEscalator {
    chat: Option<Arc<dyn ChatAgent>>,
}

impl FallbackEscalator {
    pub fn new(chat: Option<Arc<dyn ChatAgent>>) -> Self {
        Self { chat }
    }

    pub async fn escalate(&self, question: &str, intent: Intent) -> QueryResponse {
        let (answer, query_type) = match &self.chat {
            Some(chat) => match chat.complete(FALLBACK_SYSTEM_PROMPT, question).await {
                Ok(text) if !text.trim().is_empty() => (text, "llm_fallback"),
                Ok(_) => (STATIC_SUGGESTIONS.to_string(), "static_fallback"),
                Err(e) => {
                    warn!(error = %e, "LLM fallback call failed, using static suggestions");
                    (STATIC_SUGGESTIONS.to_string(), "static_fallback")
                }
            },
            None => (STATIC_SUGGESTIONS.to_string(), "static_fallback"),
        };

        QueryResponse {
            answer,
            cypher: None,
            data: Vec::new(),
            question: question.to_string(),
            pattern_matched: false,
            query_type: query_type.to_string(),
            intent_classification: intent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use assetgraph_common::QueryCategory;
    use async_trait::async_trait;

    struct FailingChat;

    #[async_trait]
    impl ChatAgent for FailingChat {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            Err(anyhow!("model offline"))
        }
    }

    struct CannedChat(&'static str);

    #[async_trait]
    impl ChatAgent for CannedChat {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn unknown_intent() -> Intent {
        Intent {
            category: QueryCategory::Unknown,
            confidence: 0.5,
            reasoning: "Could not classify query into known categories".to_string(),
        }
    }

    #[tokio::test]
    async fn unconfigured_llm_yields_static_suggestions() {
        let escalator = FallbackEscalator::new(None);
        let response = escalator.escalate("tell me about zebras", unknown_intent()).await;
        assert!(!response.pattern_matched);
        assert!(response.cypher.is_none());
        assert!(response.data.is_empty());
        assert_eq!(response.query_type, "static_fallback");
        assert!(response.answer.contains("Try questions like"));
    }

    #[tokio::test]
    async fn failed_llm_call_degrades_to_static_suggestions() {
        let escalator = FallbackEscalator::new(Some(Arc::new(FailingChat)));
        let response = escalator.escalate("zebras?", unknown_intent()).await;
        assert_eq!(response.query_type, "static_fallback");
        assert!(!response.answer.is_empty());
    }

    #[tokio::test]
    async fn llm_answer_is_returned_verbatim() {
        let escalator = FallbackEscalator::new(Some(Arc::new(CannedChat(
            "Try asking: show me assets in Texas",
        ))));
        let response = escalator.escalate("zebras?", unknown_intent()).await;
        assert_eq!(response.query_type, "llm_fallback");
        assert_eq!(response.answer, "Try asking: show me assets in Texas");
    }

    #[tokio::test]
    async fn empty_question_still_gets_guidance() {
        let escalator = FallbackEscalator::new(None);
        let response = escalator.escalate("", unknown_intent()).await;
        assert!(!response.answer.is_empty());
        assert!(!response.pattern_matched);
    }
}
