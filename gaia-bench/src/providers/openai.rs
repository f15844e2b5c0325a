//! OpenAI-compatible chat-completions client with function calling

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::traits::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, ProviderError, ProviderResult,
    Role, ToolCall, ToolSpec,
};
use crate::config::ProviderConfig;
use crate::runner::rate_limiter::RateLimiter;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http_client: Client,
    rate_limiter: Arc<RateLimiter>,
    default_model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: Client::new(),
            rate_limiter: Arc::new(RateLimiter::new(500, 200_000)),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_env_var("OPENAI_API_KEY")
    }

    /// Create from a named environment variable
    pub fn from_env_var(var: &str) -> ProviderResult<Self> {
        let api_key = std::env::var(var)
            .map_err(|_| ProviderError::Config(format!("{} not set", var)))?;
        Ok(Self::new(api_key))
    }

    /// Create from a provider config section; the key comes from its `api_key_env`
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self::from_env_var(&config.api_key_env)?
            .with_base_url(&config.base_url)
            .with_rate_limits(config.rpm, config.tpm)
            .with_model(&config.default_model))
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set custom rate limits
    pub fn with_rate_limits(mut self, rpm: u32, tpm: u32) -> Self {
        self.rate_limiter = Arc::new(RateLimiter::new(rpm, tpm));
        self
    }

    /// Set default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Translate a provider-neutral request into the wire body
    fn build_body(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages: Vec<OpenAIMessage> = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system_prompt {
            messages.push(OpenAIMessage::from(&Message::system(system.clone())));
        }
        messages.extend(request.messages.iter().map(OpenAIMessage::from));

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        // Reasoning models and GPT-5.x take max_completion_tokens and reject temperature
        let is_reasoning = model.starts_with("o1") || model.starts_with("o3") || model.starts_with("o4");
        let uses_completion_tokens = is_reasoning || model.starts_with("gpt-5");

        let tools: Vec<OpenAITool> = request.tools.iter().map(OpenAITool::from).collect();

        OpenAIRequest {
            model,
            messages,
            max_tokens: (!uses_completion_tokens).then_some(request.max_tokens),
            max_completion_tokens: uses_completion_tokens.then_some(request.max_tokens),
            temperature: if is_reasoning { None } else { request.temperature },
            tools: (!tools.is_empty()).then_some(tools),
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    /// For standard models
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// For reasoning models
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl From<&Message> for OpenAIMessage {
    fn from(msg: &Message) -> Self {
        let tool_calls = if msg.tool_calls.is_empty() {
            None
        } else {
            Some(msg.tool_calls.iter().map(OpenAIToolCall::from).collect())
        };
        // Assistant turns that only call tools carry a null content
        let content = if msg.role == Role::Assistant && msg.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(msg.content.clone())
        };
        Self {
            role: msg.role.as_str().to_string(),
            content,
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: OpenAIFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

/// Arguments travel as a JSON-encoded string
#[derive(Serialize, Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

impl From<&ToolCall> for OpenAIToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            call_type: function_type(),
            function: OpenAIFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.to_string(),
            },
        }
    }
}

impl From<OpenAIToolCall> for ToolCall {
    fn from(call: OpenAIToolCall) -> Self {
        // Malformed argument JSON is passed through as a string for the tool to reject
        let arguments = serde_json::from_str(&call.function.arguments)
            .unwrap_or(Value::String(call.function.arguments));
        ToolCall::new(call.id, call.function.name, arguments)
    }
}

#[derive(Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunction,
}

#[derive(Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

impl From<&ToolSpec> for OpenAITool {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            tool_type: "function",
            function: OpenAIFunction {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: spec.parameters.clone(),
            },
        }
    }
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    usage: OpenAIUsage,
}

#[derive(Deserialize)]
struct Choice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIError {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// `Retry-After` seconds in milliseconds, 60s when absent or unparsable
fn retry_after_ms(header: Option<&str>) -> u64 {
    header
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(60)
        .saturating_mul(1000)
}

fn parse_response(api_response: OpenAIResponse, latency_ms: u64) -> ProviderResult<CompletionResponse> {
    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("No choices in response".to_string()))?;

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        tool_calls: choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(ToolCall::from)
            .collect(),
        model: api_response.model,
        input_tokens: api_response.usage.prompt_tokens,
        output_tokens: api_response.usage.completion_tokens,
        finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
        latency_ms,
    })
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<CompletionResponse> {
        self.rate_limiter.wait_for_token_capacity(request.max_tokens).await;
        self.rate_limiter.acquire().await;

        let start = Instant::now();
        let body = self.build_body(request);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status == 429 {
            let retry_after = retry_after_ms(
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok()),
            );

            // 429 covers both rate limiting and an exhausted quota; only the
            // former is worth retrying.
            let body = response.text().await.unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<OpenAIError>(&body) {
                let error_type = error.error.error_type.as_deref().unwrap_or("");
                if error_type == "insufficient_quota"
                    || error.error.message.contains("exceeded your current quota")
                {
                    return Err(ProviderError::Config(format!(
                        "OpenAI quota exceeded: {}",
                        error.error.message
                    )));
                }
                tracing::debug!("Rate limited (type={}): {}", error_type, error.error.message);
            }

            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<OpenAIError>(&body) {
                Ok(error) => error.error.message,
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
            };

            if status == 401 || status == 403 {
                return Err(ProviderError::Config(format!(
                    "OpenAI auth error ({}): {}",
                    status.as_u16(),
                    message
                )));
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: OpenAIResponse = response.json().await?;

        self.rate_limiter
            .record_tokens(
                api_response
                    .usage
                    .prompt_tokens
                    .saturating_add(api_response.usage.completion_tokens),
            )
            .await;

        parse_response(api_response, latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OpenAIClient {
        OpenAIClient::new("sk-test".to_string()).with_base_url("http://localhost:8080/v1/")
    }

    fn calculator_spec() -> ToolSpec {
        ToolSpec {
            name: "calculator".to_string(),
            description: "Evaluate arithmetic".to_string(),
            parameters: json!({"type": "object", "properties": {"expression": {"type": "string"}}}),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_body_with_tools_and_history() {
        let call = ToolCall::new("call_1", "calculator", json!({"expression": "6*7"}));
        let request = CompletionRequest::new(
            vec![
                Message::user("What is 6*7?"),
                Message::assistant_with_tools("", vec![call]),
                Message::tool("call_1", "42"),
            ],
            512,
        )
        .with_system("Answer with FINAL ANSWER:")
        .with_temperature(0.0)
        .with_tools(vec![calculator_spec()]);

        let body = serde_json::to_value(client().build_body(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 512);
        assert!(body.get("max_completion_tokens").is_none());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][2]["content"], Value::Null);
        assert_eq!(body["messages"][2]["tool_calls"][0]["type"], "function");
        assert_eq!(
            body["messages"][2]["tool_calls"][0]["function"]["arguments"],
            r#"{"expression":"6*7"}"#
        );
        assert_eq!(body["messages"][3]["tool_call_id"], "call_1");
        assert_eq!(body["tools"][0]["function"]["name"], "calculator");
    }

    #[test]
    fn test_reasoning_model_body() {
        let request = CompletionRequest::new(vec![Message::user("hi")], 100)
            .with_model("o3-mini")
            .with_temperature(0.5);
        let body = serde_json::to_value(client().build_body(&request)).unwrap();
        assert_eq!(body["max_completion_tokens"], 100);
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_parse_tool_call_response() {
        let raw = r#"{
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "calculator", "arguments": "{\"expression\": \"2+2\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 50, "completion_tokens": 12}
        }"#;
        let parsed = parse_response(serde_json::from_str(raw).unwrap(), 5).unwrap();
        assert!(parsed.has_tool_calls());
        assert_eq!(parsed.content, "");
        assert_eq!(parsed.tool_calls[0].name, "calculator");
        assert_eq!(parsed.tool_calls[0].arguments, json!({"expression": "2+2"}));
        assert_eq!(parsed.input_tokens, 50);
        assert_eq!(parsed.finish_reason, "tool_calls");
    }

    #[test]
    fn test_parse_malformed_arguments_kept_as_string() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "tool_calls": [
            {"id": "c", "function": {"name": "calculator", "arguments": "{oops"}}]}}]}"#;
        let parsed = parse_response(serde_json::from_str(raw).unwrap(), 0).unwrap();
        assert_eq!(parsed.tool_calls[0].arguments, Value::String("{oops".to_string()));
        assert_eq!(parsed.finish_reason, "unknown");
    }

    #[test]
    fn test_parse_no_choices() {
        let raw = r#"{"choices": [], "model": "m"}"#;
        assert!(matches!(
            parse_response(serde_json::from_str(raw).unwrap(), 0),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn test_retry_after_header() {
        assert_eq!(retry_after_ms(Some("3")), 3000);
        assert_eq!(retry_after_ms(Some("soon")), 60_000);
        assert_eq!(retry_after_ms(None), 60_000);
        assert_eq!(retry_after_ms(Some(&u64::MAX.to_string())), u64::MAX);
    }
}
