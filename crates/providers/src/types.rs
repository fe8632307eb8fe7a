//! Wire types for the Gemini `generateContent` endpoint.

use radar_core::{Message, Role};
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn with no system instruction
    pub fn prompt(text: impl Into<String>) -> Self {
        Self { contents: vec![Content::user(text)], system_instruction: None, generation_config: None }
    }

    /// Prior transcript followed by a new user turn
    pub fn conversation(history: &[Message], message: &str) -> Self {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::user(message));
        Self { contents, system_instruction: None, generation_config: None }
    }

    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(SystemInstruction { parts: vec![Part::text(text)] });
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User.as_str().to_string(), parts: vec![Part::text(text)] }
    }
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        Self { role: message.role.as_str().to_string(), parts: vec![Part::text(message.text.clone())] }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Constrain the reply to JSON matching `schema`
    pub fn json(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; `None` when it has no text
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_maps_roles() {
        let history = vec![Message::user("Who is Acme?"), Message::model("A cloud vendor.")];
        let request = GenerateContentRequest::conversation(&history, "Their CEO?");

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(request.contents[2].parts[0].text.as_deref(), Some("Their CEO?"));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest::prompt("hi")
            .with_system_instruction("be brief")
            .with_generation_config(GenerationConfig::json(serde_json::json!({"type": "OBJECT"})));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "there" }] }, "finishReason": "STOP" }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_response_text_empty() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert_eq!(response.text(), None);

        let json = r#"{ "candidates": [{ "content": { "role": "model", "parts": [{ "text": "  " }] } }] }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }
}
