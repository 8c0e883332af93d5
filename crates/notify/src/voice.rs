//! Text-to-speech voice messages through the Brevo voice endpoint.

use serde::Serialize;

use crate::messaging::{dispatch, env_non_empty, http_client, MessagingError};

const BREVO_VOICE_ENDPOINT: &str = "https://api.brevo.com/v3/voiceMessages/send";
const DEFAULT_SENDER: &str = "AdminCall";
const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VoiceRequest<'a> {
    pub sender: &'a str,
    pub to: &'a str,
    pub content: &'a str,
    pub language: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

pub struct VoiceClient {
    api_key: String,
    sender: String,
    endpoint: String,
    client: reqwest::Client,
}

impl VoiceClient {
    pub fn new(api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender: sender.into(),
            endpoint: BREVO_VOICE_ENDPOINT.to_string(),
            client: http_client(),
        }
    }

    /// `VOICE_API_KEY` (required) and `VOICE_SENDER` (default `AdminCall`).
    pub fn from_env() -> Option<Self> {
        let api_key = env_non_empty("VOICE_API_KEY")?;
        let sender = env_non_empty("VOICE_SENDER").unwrap_or_else(|| DEFAULT_SENDER.into());
        Some(Self::new(api_key, sender))
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn request<'a>(&'a self, to: &'a str, content: &'a str) -> VoiceRequest<'a> {
        VoiceRequest {
            sender: &self.sender,
            to,
            content,
            language: DEFAULT_LANGUAGE,
            kind: "transactional",
        }
    }

    pub async fn send(&self, to: &str, content: &str) -> Result<(), MessagingError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&self.request(to, content));
        dispatch(request).await?;
        tracing::info!(to, "Voice message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_defaults_language_and_type() {
        let client = VoiceClient::new("key", "AdminCall");
        let body = serde_json::to_value(client.request("+91", "Please call back")).unwrap();
        assert_eq!(body["language"], "en-US");
        assert_eq!(body["type"], "transactional");
        assert_eq!(body["sender"], "AdminCall");
        assert_eq!(body["content"], "Please call back");
    }

    #[test]
    fn from_env_requires_api_key() {
        std::env::remove_var("VOICE_API_KEY");
        assert!(VoiceClient::from_env().is_none());
    }
}
