//! OpenAI API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o", "gpt-4.1")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in completion (for older models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Maximum completion tokens (for o1, o3, gpt-5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,

    /// Output format constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            max_completion_tokens: None,
            response_format: None,
        }
    }
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens, picking the field the model understands.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        if Self::uses_max_completion_tokens(&self.model) {
            self.max_completion_tokens = Some(max_tokens);
        } else {
            self.max_tokens = Some(max_tokens);
        }
        self
    }

    /// Ask for a single JSON object as the reply.
    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }

    /// Check if a model requires max_completion_tokens instead of max_tokens.
    pub fn uses_max_completion_tokens(model: &str) -> bool {
        model.starts_with("o1")
            || model.starts_with("o3")
            || model.starts_with("gpt-5")
            || model.contains("-o1")
            || model.contains("-o3")
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Response content
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

// =============================================================================
// Response Format
// =============================================================================

/// `{"type": "json_object"}` and friends.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

// =============================================================================
// Responses API
// =============================================================================

/// Request for the `/responses` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,

    /// Input messages, same roles as chat completion
    pub input: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextOptions {
    pub format: ResponseFormat,
}

impl ResponsesRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: Vec::new(),
            text: None,
            max_output_tokens: None,
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.input.push(message);
        self
    }

    pub fn json_object(mut self) -> Self {
        self.text = Some(TextOptions {
            format: ResponseFormat::json_object(),
        });
        self
    }
}

/// Pull the reply text out of a `/responses` payload.
///
/// Accepts, in order: the `output_text` convenience field, the text parts of
/// `output[].content[]`, a bare string `output` (or the first string item of
/// an `output` array), and finally a chat-completion shaped
/// `choices[0].message.content`, which some proxies return.
pub fn extract_output_text(payload: &Value) -> Option<String> {
    if let Some(text) = payload.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return Some(text.to_string());
        }
    }

    match payload.get("output") {
        Some(Value::String(text)) if !text.trim().is_empty() => return Some(text.clone()),
        Some(Value::Array(items)) => {
            let mut parts = Vec::new();
            for item in items {
                match item {
                    Value::String(text) => parts.push(text.clone()),
                    Value::Object(_) => collect_content_text(item.get("content"), &mut parts),
                    _ => {}
                }
            }
            let joined = parts.concat();
            if !joined.trim().is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn collect_content_text(content: Option<&Value>, parts: &mut Vec<String>) {
    match content {
        Some(Value::String(text)) => parts.push(text.clone()),
        Some(Value::Array(chunks)) => {
            for chunk in chunks {
                match chunk {
                    Value::String(text) => parts.push(text.clone()),
                    _ => {
                        if let Some(text) = chunk.get("text").and_then(Value::as_str) {
                            parts.push(text.to_string());
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

// =============================================================================
// Utilities
// =============================================================================

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip markdown code blocks from a response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_json_object() {
        let req = ChatRequest::new("gpt-4.1")
            .message(Message::system("Be brief"))
            .message(Message::user("Hello"))
            .json_object();

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_max_tokens_field_per_model() {
        let req = ChatRequest::new("gpt-5.1").max_tokens(100);
        assert_eq!(req.max_completion_tokens, Some(100));
        assert_eq!(req.max_tokens, None);

        let req = ChatRequest::new("gpt-4o").max_tokens(100);
        assert_eq!(req.max_tokens, Some(100));
    }

    #[test]
    fn test_responses_request_shape() {
        let req = ResponsesRequest::new("gpt-5.1")
            .message(Message::user("Hi"))
            .json_object();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["text"]["format"]["type"], "json_object");
        assert_eq!(body["input"][0]["content"], "Hi");
        assert!(body.get("max_output_tokens").is_none());
    }

    #[test]
    fn test_extract_output_text_convenience_field() {
        let payload = json!({"output_text": "{\"a\":1}", "output": []});
        assert_eq!(extract_output_text(&payload).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_extract_output_text_from_content_parts() {
        let payload = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "{\"title\":"},
                    {"type": "output_text", "text": "\"X\"}"}
                ]}
            ]
        });
        assert_eq!(extract_output_text(&payload).as_deref(), Some("{\"title\":\"X\"}"));
    }

    #[test]
    fn test_extract_output_text_string_and_choices() {
        assert_eq!(
            extract_output_text(&json!({"output": "{}"})).as_deref(),
            Some("{}")
        );
        assert_eq!(
            extract_output_text(&json!({"choices": [{"message": {"content": "{}"}}]})).as_deref(),
            Some("{}")
        );
        assert_eq!(extract_output_text(&json!({"output": []})), None);
    }

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Hello 世界";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }
}
