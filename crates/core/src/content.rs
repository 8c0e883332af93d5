//! Content-type enums and field validation shared by the resource handlers.
//!
//! Each enum mirrors a `CHECK` constraint in the schema and follows the
//! same `as_str` / `from_str` pattern so handlers can validate input before
//! touching the database.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum admin password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Default icon name for Ente Nadu cards.
pub const DEFAULT_CARD_ICON: &str = "Info";

/// Default icon name for recognitions.
pub const DEFAULT_RECOGNITION_ICON: &str = "Activity";

/// Group label for gallery media whose event has no type.
pub const UNCATEGORIZED_GROUP: &str = "Uncategorized";

/// Matches the common YouTube URL shapes and captures the 11-char video id.
const YOUTUBE_PATTERN: &str = r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$";

static YOUTUBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(YOUTUBE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Testimonial type
// ---------------------------------------------------------------------------

/// Kind of an Ente Nadu testimonial. Also the testimonial rank scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonialType {
    Text,
    Video,
}

impl TestimonialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "text" => Ok(Self::Text),
            "video" => Ok(Self::Video),
            _ => Err(CoreError::Validation(
                "type must be \"text\" or \"video\".".to_string(),
            )),
        }
    }
}

/// Validate the type-specific required fields of a testimonial.
pub fn validate_testimonial(
    kind: TestimonialType,
    author_name: Option<&str>,
    video_url: Option<&str>,
) -> Result<(), CoreError> {
    match kind {
        TestimonialType::Text if is_blank(author_name) => Err(CoreError::Validation(
            "author_name is required for text testimonials.".to_string(),
        )),
        TestimonialType::Video if is_blank(video_url) => Err(CoreError::Validation(
            "video_url is required for video testimonials.".to_string(),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Visual story video source
// ---------------------------------------------------------------------------

/// Where a visual story's video lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSource {
    /// An external link (YouTube, Vimeo, ...). Never reaped.
    Url,
    /// A file in the upload directory.
    Upload,
}

impl VideoSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Upload => "upload",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "url" => Ok(Self::Url),
            "upload" => Ok(Self::Upload),
            _ => Err(CoreError::Validation(
                "video_type must be \"url\" or \"upload\".".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Event media type
// ---------------------------------------------------------------------------

/// Kind of an event media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventMediaType {
    Photo,
    Video,
}

impl EventMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "photo" => Ok(Self::Photo),
            "video" => Ok(Self::Video),
            _ => Err(CoreError::Validation(
                "media_type must be \"photo\" or \"video\".".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Media centre section type
// ---------------------------------------------------------------------------

/// Content kind of a media centre section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMediaType {
    Article,
    Video,
    Mixed,
}

const VALID_SECTION_TYPES: &[&str] = &["article", "video", "mixed"];

impl SectionMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Video => "video",
            Self::Mixed => "mixed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "article" => Ok(Self::Article),
            "video" => Ok(Self::Video),
            "mixed" => Ok(Self::Mixed),
            _ => Err(CoreError::Validation(format!(
                "Invalid media_type '{s}'. Must be one of: {}",
                VALID_SECTION_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Contact enquiries
// ---------------------------------------------------------------------------

/// Workflow state of a contact enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    New,
    Read,
    Resolved,
}

const VALID_ENQUIRY_STATUSES: &[&str] = &["new", "read", "resolved"];

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Resolved => "resolved",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "resolved" => Ok(Self::Resolved),
            _ => Err(CoreError::Validation(format!(
                "Invalid status. Must be one of: {}.",
                VALID_ENQUIRY_STATUSES.join(", ")
            ))),
        }
    }
}

/// Topic chosen on the public contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnquiryCategory {
    #[serde(rename = "membership")]
    Membership,
    #[serde(rename = "local issues")]
    LocalIssues,
    #[serde(rename = "submit ideas")]
    SubmitIdeas,
    #[serde(rename = "submit opinions")]
    SubmitOpinions,
    #[serde(rename = "general")]
    General,
}

const VALID_CATEGORIES: &[&str] = &[
    "membership",
    "local issues",
    "submit ideas",
    "submit opinions",
    "general",
];

impl EnquiryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::LocalIssues => "local issues",
            Self::SubmitIdeas => "submit ideas",
            Self::SubmitOpinions => "submit opinions",
            Self::General => "general",
        }
    }

    /// Parse a category case-insensitively.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "membership" => Ok(Self::Membership),
            "local issues" => Ok(Self::LocalIssues),
            "submit ideas" => Ok(Self::SubmitIdeas),
            "submit opinions" => Ok(Self::SubmitOpinions),
            "general" => Ok(Self::General),
            _ => Err(CoreError::Validation(format!(
                "Invalid category. Must be one of: {}.",
                VALID_CATEGORIES.join(", ")
            ))),
        }
    }

    /// Parse an optional form value, defaulting to `general` when blank.
    pub fn parse_or_default(s: Option<&str>) -> Result<Self, CoreError> {
        match s.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Self::from_str(s),
            None => Ok(Self::General),
        }
    }
}

/// Outbound channel used to follow up on an enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationChannel {
    Email,
    Sms,
    Whatsapp,
    Voice,
}

impl CommunicationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Whatsapp => "whatsapp",
            Self::Voice => "voice",
        }
    }

    /// Display name used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::Whatsapp => "WhatsApp",
            Self::Voice => "Voice message",
        }
    }
}

/// Delivery outcome recorded for an enquiry communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStatus {
    Sent,
    Failed,
    Pending,
}

impl CommunicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// `true` when the value is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Return the trimmed value of a required field, or a validation error
/// carrying `message`.
pub fn require_text(value: Option<&str>, message: &str) -> Result<String, CoreError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation(message.to_string()))
}

/// Trim an optional field, mapping blank input to `None`.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate a new password against the minimum length.
pub fn validate_password_length(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Extract the video id from a YouTube URL.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Default thumbnail for a YouTube video.
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn testimonial_type_messages() {
        assert_matches!(TestimonialType::from_str("audio"), Err(CoreError::Validation(m)) if m == "type must be \"text\" or \"video\".");
    }

    #[test]
    fn text_testimonial_requires_author() {
        assert_matches!(
            validate_testimonial(TestimonialType::Text, Some("  "), None),
            Err(CoreError::Validation(m)) if m.contains("author_name")
        );
        assert!(validate_testimonial(TestimonialType::Text, Some("Anu"), None).is_ok());
    }

    #[test]
    fn video_testimonial_requires_url() {
        assert_matches!(
            validate_testimonial(TestimonialType::Video, Some("Anu"), None),
            Err(CoreError::Validation(m)) if m.contains("video_url")
        );
        assert!(validate_testimonial(TestimonialType::Video, None, Some("/uploads/v.mp4")).is_ok());
    }

    #[test]
    fn category_is_case_insensitive_with_default() {
        assert_eq!(EnquiryCategory::from_str("Local Issues").unwrap(), EnquiryCategory::LocalIssues);
        assert_eq!(EnquiryCategory::parse_or_default(None).unwrap(), EnquiryCategory::General);
        assert_eq!(EnquiryCategory::parse_or_default(Some(" ")).unwrap(), EnquiryCategory::General);
        assert_matches!(EnquiryCategory::from_str("complaints"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn category_serializes_with_spaces() {
        let json = serde_json::to_value(EnquiryCategory::SubmitIdeas).unwrap();
        assert_eq!(json, "submit ideas");
    }

    #[test]
    fn enquiry_status_parse() {
        assert_eq!(EnquiryStatus::from_str("resolved").unwrap(), EnquiryStatus::Resolved);
        assert_matches!(EnquiryStatus::from_str("closed"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text(Some("  Road  "), "title is required.").unwrap(), "Road");
        assert_matches!(require_text(Some(""), "title is required."), Err(CoreError::Validation(m)) if m == "title is required.");
        assert_matches!(require_text(None, "x"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn password_length() {
        assert!(validate_password_length("12345678").is_ok());
        assert_matches!(validate_password_length("1234567"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn youtube_ids() {
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_video_id("https://vimeo.com/12345"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?v=short"), None);
    }

    #[test]
    fn section_media_type_parse() {
        assert_eq!(SectionMediaType::from_str("mixed").unwrap(), SectionMediaType::Mixed);
        assert_matches!(SectionMediaType::from_str("podcast"), Err(CoreError::Validation(_)));
    }
}
