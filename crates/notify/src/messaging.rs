//! Shared plumbing for the HTTP messaging providers (SMS, WhatsApp, voice).

use std::time::Duration;

use crate::sms::SmsClient;
use crate::voice::VoiceClient;
use crate::whatsapp::WhatsAppClient;

/// HTTP request timeout for a single provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for provider delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Provider returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// Messengers
// ---------------------------------------------------------------------------

/// The set of configured providers. A `None` slot means the channel is
/// disabled and sends through it are rejected before any network call.
#[derive(Default)]
pub struct Messengers {
    pub sms: Option<SmsClient>,
    pub whatsapp: Option<WhatsAppClient>,
    pub voice: Option<VoiceClient>,
}

impl Messengers {
    /// Load every provider from the environment, logging the disabled ones.
    pub fn from_env() -> Self {
        let messengers = Self {
            sms: SmsClient::from_env(),
            whatsapp: WhatsAppClient::from_env(),
            voice: VoiceClient::from_env(),
        };
        if messengers.sms.is_none() {
            tracing::warn!("BREVO_API_KEY not set; SMS sending disabled");
        }
        if messengers.whatsapp.is_none() {
            tracing::warn!("WHATSAPP_API_KEY/WHATSAPP_PHONE_ID not set; WhatsApp sending disabled");
        }
        if messengers.voice.is_none() {
            tracing::warn!("VOICE_API_KEY not set; voice messages disabled");
        }
        messengers
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the HTTP client every provider uses.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build reqwest HTTP client")
}

/// Send a prepared request and map non-2xx answers to
/// [`MessagingError::HttpStatus`], keeping the provider's error text.
pub(crate) async fn dispatch(request: reqwest::RequestBuilder) -> Result<(), MessagingError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(MessagingError::HttpStatus {
        status: status.as_u16(),
        message: provider_message(&body),
    })
}

/// Pull a human-readable message out of a provider error body.
///
/// Brevo answers `{"message": ...}`; the Graph API answers
/// `{"error": {"message": ...}}`. Anything else is returned as-is.
pub(crate) fn provider_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error").and_then(|e| e.get("message")))
        })
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Read a non-empty environment variable.
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_reads_brevo_shape() {
        assert_eq!(
            provider_message(r#"{"code":"unauthorized","message":"Key not found"}"#),
            "Key not found"
        );
    }

    #[test]
    fn provider_message_reads_graph_shape() {
        assert_eq!(
            provider_message(r#"{"error":{"message":"Invalid OAuth access token","code":190}}"#),
            "Invalid OAuth access token"
        );
    }

    #[test]
    fn provider_message_falls_back_to_raw_body() {
        assert_eq!(provider_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn error_display_http_status() {
        let err = MessagingError::HttpStatus {
            status: 401,
            message: "Key not found".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned HTTP 401: Key not found");
    }

    #[test]
    fn default_messengers_are_all_disabled() {
        let m = Messengers::default();
        assert!(m.sms.is_none() && m.whatsapp.is_none() && m.voice.is_none());
    }
}
