//! Upload rules: size limits, accepted MIME types, stored file naming, and
//! the mapping between public `/uploads/...` URLs and paths inside the
//! upload root.
//!
//! The API crate does the actual I/O; everything here is pure so the
//! path-safety rules can be tested without touching disk.

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Public URL prefix under which uploaded files are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";

/// Subdirectory of the upload root that holds icon uploads.
pub const ICON_SUBDIR: &str = "icons";

const MB: usize = 1024 * 1024;

/// Image MIME types accepted by every upload kind.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Video MIME types accepted by media uploads.
pub const VIDEO_MIME_TYPES: &[&str] = &["video/mp4", "video/webm", "video/quicktime"];

/// Length of the random suffix in generated filenames.
const RANDOM_SUFFIX_LEN: usize = 11;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// Upload kinds
// ---------------------------------------------------------------------------

/// The size/type class of an upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// General images (10 MB).
    Image,
    /// Photos or videos (200 MB).
    Media,
    /// Icons, stored under `/uploads/icons/` (2 MB).
    Icon,
    /// Video thumbnails (5 MB).
    Thumbnail,
}

impl UploadKind {
    /// Maximum accepted size in bytes.
    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Image => 10 * MB,
            Self::Media => 200 * MB,
            Self::Icon => 2 * MB,
            Self::Thumbnail => 5 * MB,
        }
    }

    /// Subdirectory of the upload root, if any.
    pub fn subdir(&self) -> Option<&'static str> {
        match self {
            Self::Icon => Some(ICON_SUBDIR),
            _ => None,
        }
    }

    /// Whether a file with this content type may be stored.
    pub fn accepts(&self, content_type: &str) -> bool {
        let ct = normalize_mime(content_type);
        match self {
            Self::Media => IMAGE_MIME_TYPES.contains(&ct) || VIDEO_MIME_TYPES.contains(&ct),
            Self::Image | Self::Icon | Self::Thumbnail => IMAGE_MIME_TYPES.contains(&ct),
        }
    }

    /// Human-readable size limit for error messages.
    pub fn limit_label(&self) -> String {
        format!("{} MB", self.max_bytes() / MB)
    }
}

/// Validate an upload's content type for the given kind.
pub fn validate_content_type(kind: UploadKind, content_type: &str) -> Result<(), CoreError> {
    if kind.accepts(content_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "File type not allowed: {content_type}"
        )))
    }
}

/// Coarse category of an accepted MIME type: `"image"` or `"video"`.
pub fn media_category(content_type: &str) -> Option<&'static str> {
    let ct = normalize_mime(content_type);
    if IMAGE_MIME_TYPES.contains(&ct) {
        Some("image")
    } else if VIDEO_MIME_TYPES.contains(&ct) {
        Some("video")
    } else {
        None
    }
}

/// Strip MIME parameters (`; charset=...`) and surrounding whitespace.
fn normalize_mime(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Generate a stored filename: `<unix-millis>-<base36 random>.<ext>`.
///
/// The extension is derived from the validated content type only. The
/// client's filename never reaches disk, so an `image/png` part named
/// `page.html` is still served as `.png`.
pub fn generate_filename(content_type: &str, now_millis: i64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    match mime_extension(content_type) {
        Some(ext) => format!("{now_millis}-{suffix}.{ext}"),
        None => format!("{now_millis}-{suffix}"),
    }
}

/// File extension for an accepted MIME type.
pub fn mime_extension(content_type: &str) -> Option<&'static str> {
    let ext = match normalize_mime(content_type) {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => return None,
    };
    Some(ext)
}

/// Public URL for a stored file.
pub fn public_url(subdir: Option<&str>, filename: &str) -> String {
    match subdir {
        Some(dir) => format!("{UPLOAD_URL_PREFIX}{dir}/{filename}"),
        None => format!("{UPLOAD_URL_PREFIX}{filename}"),
    }
}

// ---------------------------------------------------------------------------
// URL <-> path safety
// ---------------------------------------------------------------------------

/// Map a stored URL back to a path relative to the upload root.
///
/// Only URLs under `/uploads/` qualify (a leading slash is optional, as
/// older rows were stored as `uploads/...`). External URLs, absolute
/// paths, backslashes, and any `.`/`..` segment yield `None`.
pub fn relative_path(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix(UPLOAD_URL_PREFIX)
        .or_else(|| url.strip_prefix(&UPLOAD_URL_PREFIX[1..]))?;

    if rest.is_empty() || rest.contains('\\') || rest.contains('\0') {
        return None;
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let safe = segments
        .iter()
        .all(|s| !s.is_empty() && *s != "." && *s != ".." && !s.contains(':'));
    if !safe {
        return None;
    }

    Some(segments.join("/"))
}

/// Whether `name` is a bare filename with no directory component.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
