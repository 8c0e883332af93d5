//! Plain-text WhatsApp messages through the WhatsApp Cloud API.

use serde::Serialize;

use crate::messaging::{dispatch, env_non_empty, http_client, MessagingError};

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WhatsAppText<'a> {
    pub preview_url: bool,
    pub body: &'a str,
}

/// JSON body accepted by `POST /{phone-number-id}/messages`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WhatsAppRequest<'a> {
    pub messaging_product: &'a str,
    pub to: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub text: WhatsAppText<'a>,
}

pub struct WhatsAppClient {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl WhatsAppClient {
    pub fn new(api_key: impl Into<String>, phone_id: &str) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: format!("{GRAPH_API_BASE}/{phone_id}/messages"),
            client: http_client(),
        }
    }

    /// Both `WHATSAPP_API_KEY` and `WHATSAPP_PHONE_ID` are required.
    pub fn from_env() -> Option<Self> {
        let api_key = env_non_empty("WHATSAPP_API_KEY")?;
        let phone_id = env_non_empty("WHATSAPP_PHONE_ID")?;
        Some(Self::new(api_key, &phone_id))
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request<'a>(&self, to: &'a str, body: &'a str) -> WhatsAppRequest<'a> {
        WhatsAppRequest {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: WhatsAppText {
                preview_url: false,
                body,
            },
        }
    }

    pub async fn send(&self, to: &str, body: &str) -> Result<(), MessagingError> {
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(to, body));
        dispatch(request).await?;
        tracing::info!(to, "WhatsApp message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_phone_id() {
        let client = WhatsAppClient::new("token", "12345");
        assert_eq!(client.endpoint(), "https://graph.facebook.com/v18.0/12345/messages");
    }

    #[test]
    fn request_body_is_plain_text_without_preview() {
        let client = WhatsAppClient::new("token", "12345");
        let body = serde_json::to_value(client.request("919999999999", "Hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "919999999999",
                "type": "text",
                "text": { "preview_url": false, "body": "Hello" },
            })
        );
    }
}
