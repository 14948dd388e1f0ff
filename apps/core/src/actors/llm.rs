use crate::actors::traits::{GenerationParams, LlmActor};
use crate::config::RemoteConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

// --- Constants ---
const DEFAULT_MAX_TOKENS: u32 = 400;

/// Client for an OpenAI-compatible chat-completions endpoint (OpenRouter by default).
///
/// Holds no per-request state, so a single instance is shared between the analysis
/// gateway and the suggestion engine.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: RemoteConfig,
}

impl OpenRouterClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| AppError::Config(format!("Invalid API key header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(referer) = HeaderValue::from_str(&self.config.referer) {
            headers.insert("HTTP-Referer", referer);
        }
        if let Ok(title) = HeaderValue::from_str(&self.config.title) {
            headers.insert("X-Title", title);
        }
        Ok(headers)
    }

    fn build_payload(&self, prompt: String, params: &GenerationParams) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = &params.system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });
        if let Some(temperature) = params.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions response.
pub fn extract_message_content(body: &Value) -> Result<String, AppError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.to_string())
        .ok_or_else(|| AppError::Remote("Response has no choices[0].message.content".to_string()))
}

#[async_trait]
impl LlmActor for OpenRouterClient {
    async fn generate_with_params(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> Result<String, AppError> {
        info!("Remote completion requested ({} prompt chars)", prompt.len());

        let payload = self.build_payload(prompt, &params);
        let res = self
            .client
            .post(&self.config.base_url)
            .headers(self.headers()?)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Unreadable completion body: {}", e)))?;
        let content = extract_message_content(&json)?;
        debug!("Remote completion returned {} chars", content.len());
        Ok(content)
    }
}
