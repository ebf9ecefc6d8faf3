use async_trait::async_trait;
use tracing::{debug, instrument};

use study_common::openai::{OpenAiClient, OpenAiClientError};
use study_common::usage::UsageTracker;

/// Text-completion backend used for summaries and quiz generation.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, OpenAiClientError>;
}

/// Oracle backed by an OpenAI-compatible chat-completions API (OpenRouter by default).
pub struct ChatOracle {
    client: OpenAiClient,
    model: String,
    usage: UsageTracker,
}

impl ChatOracle {
    pub fn new(client: OpenAiClient, model: String, usage: UsageTracker) -> Self {
        Self {
            client,
            model,
            usage,
        }
    }
}

#[async_trait]
impl Oracle for ChatOracle {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, OpenAiClientError> {
        let (text, usage) = self
            .client
            .complete_text(&self.model, prompt, Some(max_tokens))
            .await?;
        self.usage.record(&self.model, usage.as_ref()).await;
        debug!(completion_len = text.len(), "oracle completion received");
        Ok(text)
    }
}

pub fn summary_prompt(notes: &str) -> String {
    format!("Short Summary:\n{notes}")
}

pub fn quiz_prompt(notes: &str) -> String {
    format!(
        "Generate a quiz based on the following notes. Provide questions with multiple-choice options. \
Include the correct answer at the end of each question using the format: \"Answer: a\".\n\n\
Notes:\n{notes}\n\n\
Format:\n\
1. Sample question?\n   a) Option 1\n   b) Option 2\n   c) Option 3\n   d) Option 4\n\
Answer: b\n\n\
Only provide the quiz text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scan_quiz;
    use study_common::openai::OpenAiClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn summary_prompt_wraps_notes() {
        assert_eq!(summary_prompt("cells divide"), "Short Summary:\ncells divide");
    }

    #[test]
    fn quiz_prompt_example_follows_parser_grammar() {
        let prompt = quiz_prompt("Photosynthesis converts light to energy.");
        assert!(prompt.contains("Notes:\nPhotosynthesis converts light to energy.\n"));
        assert!(prompt.ends_with("Only provide the quiz text."));

        // The embedded format example must itself parse as one question.
        let drafts = scan_quiz(&prompt);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].prompt, "Sample question?");
        assert_eq!(drafts[0].options.len(), 4);
        assert_eq!(drafts[0].correct_index, Some(1));
    }

    #[tokio::test]
    async fn chat_oracle_records_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "summary"}}],
                "usage": {"total_tokens": 42}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(OpenAiClientConfig {
            base_url: server.uri(),
            ..OpenAiClientConfig::default()
        })
        .unwrap();
        let usage = UsageTracker::new();
        let oracle = ChatOracle::new(client, "test/model".to_string(), usage.clone());

        assert_eq!(oracle.complete("p", 10).await.unwrap(), "summary");
        let stats = usage.get_usage_stats().await;
        assert_eq!(stats.models[0].model, "test/model");
        assert_eq!(stats.models[0].total_tokens, Some(42));
    }
}
