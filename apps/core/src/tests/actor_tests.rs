//! Actor System Tests
//!
//! Mock remote model shared by the unit tests, plus tests for the remote client,
//! the analysis gateway and the suggestion engine working together.

use crate::actors::messages::AppError;
use crate::actors::traits::{GenerationParams, LlmActor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::time::{sleep, Duration};

// ============================================================================
// Mock Actors for Testing
// ============================================================================

/// Mock LLM Actor that returns predictable responses
pub struct MockLlmActor {
    pub response: String,
    pub delay_ms: u64,
    pub should_fail: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, GenerationParams)>>,
}

impl MockLlmActor {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            delay_ms: 0,
            should_fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(p, _)| p.clone())
    }

    pub fn last_params(&self) -> Option<GenerationParams> {
        self.prompts.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl LlmActor for MockLlmActor {
    async fn generate_with_params(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push((prompt, params));
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.should_fail {
            Err(AppError::Remote("Mock failure".to_string()))
        } else {
            Ok(self.response.clone())
        }
    }
}

// ============================================================================
// LLM Actor Tests
// ============================================================================

#[cfg(test)]
mod llm_actor_tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams {
            system_prompt: Some("You are a helpful assistant.".to_string()),
            temperature: Some(0.7),
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_mock_llm_basic_response() {
        let llm = MockLlmActor::new("Hello, I am an AI assistant.");

        let result = llm.generate_with_params("Hello".to_string(), params()).await;

        assert_eq!(result.unwrap(), "Hello, I am an AI assistant.");
        assert_eq!(llm.calls(), 1);
        assert_eq!(llm.last_prompt().as_deref(), Some("Hello"));
        assert_eq!(llm.last_params().unwrap().temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_mock_llm_failure() {
        let llm = MockLlmActor::failing();
        let result = llm.generate_with_params("Test".to_string(), params()).await;
        assert!(matches!(result, Err(AppError::Remote(_))));
    }

    #[tokio::test]
    async fn test_mock_llm_with_delay() {
        let llm = MockLlmActor::new("Delayed response").with_delay(100);

        let start = std::time::Instant::now();
        let result = llm.generate_with_params("Test".to_string(), params()).await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}

// ============================================================================
// Remote Client Through The Gateways
// ============================================================================

#[cfg(test)]
mod remote_pipeline_tests {
    use crate::actors::analysis::RemoteAnalysisGateway;
    use crate::actors::llm::OpenRouterClient;
    use crate::actors::suggestions::SuggestionEngine;
    use crate::brain::analyzer::LexiconClassifier;
    use crate::brain::sentiment::{AnalysisMethod, Mood};
    use crate::config::RemoteConfig;
    use crate::models::Session;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header_exists, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))
    }

    fn client_for(server: &MockServer) -> Arc<OpenRouterClient> {
        let mut config = RemoteConfig::new("test-key");
        config.base_url = format!("{}/chat/completions", server.uri());
        Arc::new(OpenRouterClient::new(config))
    }

    #[tokio::test]
    async fn test_gateway_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header_exists("x-title"))
            .and(body_string_contains("JOURNAL ENTRY"))
            .respond_with(completion(
                r#"{"mood":"tired","sentiment_score":0.3,"polarity":-0.2,"subjectivity":0.7,"intensity":"medium","sentiment_label":"negative","confidence":0.9}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = RemoteAnalysisGateway::new(Some(client_for(&server)), Duration::from_secs(5));
        let result = gateway.analyze("Long day, barely slept").await;

        assert_eq!(result.analysis_method, AnalysisMethod::Remote);
        assert_eq!(result.mood, Mood::Tired);
        assert!((result.sentiment_score - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_gateway_falls_back_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let text = "Feeling calm and peaceful this evening";
        let gateway = RemoteAnalysisGateway::new(Some(client_for(&server)), Duration::from_secs(5));

        assert_eq!(gateway.analyze(text).await, LexiconClassifier::new().analyze(text));
    }

    #[tokio::test]
    async fn test_engine_over_http_with_chatty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("RESPOND WITH ONLY VALID JSON ARRAY"))
            .respond_with(completion(
                "Of course!\n```json\n[\n {\"text\": \"Take a slow lap around the block\", \"icon\": \"🚶\"},\n {\"text\": \"Journal one thing that went right\", \"icon\": \"📝\"},\n {\"text\": \"Turn off screens an hour before bed\", \"icon\": \"🌙\"},\n]\n```",
            ))
            .mount(&server)
            .await;

        let engine = SuggestionEngine::new(Some(client_for(&server)), Duration::from_secs(5));
        let sentiment = LexiconClassifier::new().analyze("so tired today");
        let mut rng = StdRng::seed_from_u64(11);

        let result = engine
            .suggest("so tired today", &sentiment, &Session::new("s"), 21, &mut rng)
            .await;

        let texts: Vec<&str> = result.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Take a slow lap around the block",
                "Journal one thing that went right",
                "Turn off screens an hour before bed"
            ]
        );
    }
}
