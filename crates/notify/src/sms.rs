//! Transactional SMS through the Brevo API.

use serde::Serialize;

use crate::messaging::{dispatch, env_non_empty, http_client, MessagingError};

const BREVO_SMS_ENDPOINT: &str = "https://api.brevo.com/v3/sms/send";
const DEFAULT_SENDER: &str = "MessageSend";

/// JSON body accepted by `POST /v3/sms/send`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SmsRequest<'a> {
    pub sender: &'a str,
    pub to: &'a str,
    pub content: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

pub struct SmsClient {
    api_key: String,
    sender: String,
    endpoint: String,
    client: reqwest::Client,
}

impl SmsClient {
    pub fn new(api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender: sender.into(),
            endpoint: BREVO_SMS_ENDPOINT.to_string(),
            client: http_client(),
        }
    }

    /// `BREVO_API_KEY` (required) and `BREVO_SMS_SENDER` (default `MessageSend`).
    pub fn from_env() -> Option<Self> {
        let api_key = env_non_empty("BREVO_API_KEY")?;
        let sender = env_non_empty("BREVO_SMS_SENDER").unwrap_or_else(|| DEFAULT_SENDER.into());
        Some(Self::new(api_key, sender))
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn request<'a>(&'a self, to: &'a str, content: &'a str) -> SmsRequest<'a> {
        SmsRequest {
            sender: &self.sender,
            to,
            content,
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
        tracing::info!(to, "SMS sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_brevo_shape() {
        let client = SmsClient::new("key", "Office");
        let body = serde_json::to_value(client.request("+919999999999", "Hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "sender": "Office",
                "to": "+919999999999",
                "content": "Hello",
                "type": "transactional",
            })
        );
    }

    #[test]
    fn from_env_requires_api_key() {
        std::env::remove_var("BREVO_API_KEY");
        assert!(SmsClient::from_env().is_none());
    }

    #[tokio::test]
    async fn send_to_unreachable_endpoint_is_request_error() {
        let client = SmsClient::new("key", "Office").with_endpoint("http://127.0.0.1:9/sms");
        let err = client.send("+91", "hi").await.unwrap_err();
        assert!(matches!(err, MessagingError::Request(_)));
    }
}
