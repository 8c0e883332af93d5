//! Upload directory: storing multipart files and reaping orphaned ones.
//!
//! Files are written under the configured root with generated names and
//! referenced from rows by their public path (`/uploads/<name>`). Reaping
//! is best-effort: failures are logged and never surface to the caller.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use portfolio_core::uploads::{
    generate_filename, is_plain_filename, public_url, relative_path, validate_content_type,
    UploadKind, ICON_SUBDIR,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A file found by [`UploadStore::list_files`].
#[derive(Debug, Serialize)]
pub struct StoredFile {
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// The upload directory served at `/uploads`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    public_base_url: String,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root and icon directories if they are missing.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.root.join(ICON_SUBDIR)).await
    }

    /// Absolute URL for an upload path (used by inline editor images).
    pub fn absolute_url(&self, url: &str) -> String {
        format!("{}{url}", self.public_base_url.trim_end_matches('/'))
    }

    /// Filesystem path for an upload URL, or `None` when the URL is not an
    /// upload or would escape the root.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        relative_path(url).map(|rel| self.root.join(rel))
    }

    /// Validate and write one file. Returns its public URL.
    pub async fn store(
        &self,
        kind: UploadKind,
        original_name: Option<&str>,
        content_type: &str,
        bytes: &[u8],
    ) -> AppResult<String> {
        validate_content_type(kind, content_type)?;
        if bytes.len() > kind.max_bytes() {
            return Err(too_large(kind));
        }

        let filename = generate_filename(content_type, Utc::now().timestamp_millis());
        let dir = match kind.subdir() {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("create upload dir: {e}")))?;
        tokio::fs::write(dir.join(&filename), bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("write upload: {e}")))?;

        let url = public_url(kind.subdir(), &filename);
        tracing::debug!(%url, original_name, size = bytes.len(), "Stored upload");
        Ok(url)
    }

    // -----------------------------------------------------------------------
    // Reaping
    // -----------------------------------------------------------------------

    /// Remove the file behind `url`. Non-upload URLs are ignored and a
    /// missing file counts as success.
    pub async fn reap(&self, url: &str) {
        let Some(path) = self.resolve(url) else {
            if !url.trim().is_empty() {
                tracing::debug!(url, "Skipping reap of non-upload URL");
            }
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(url, "Reaped upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(url, error = %e, "Failed to reap upload"),
        }
    }

    /// Reap every URL in `urls`.
    pub async fn reap_all<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<S> = urls.into_iter().collect();
        futures::future::join_all(urls.iter().map(|u| self.reap(u.as_ref()))).await;
    }

    /// Reap `old` when it is non-empty and no longer the stored value.
    pub async fn reap_if_replaced(&self, old: Option<&str>, new: Option<&str>) {
        if let Some(old) = old.map(str::trim).filter(|o| !o.is_empty()) {
            if new.map(str::trim) != Some(old) {
                self.reap(old).await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // File browser
    // -----------------------------------------------------------------------

    /// Regular files directly under the root, newest first.
    pub async fn list_files(&self) -> std::io::Result<Vec<StoredFile>> {
        let mut files = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(e),
        };
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().into_owned();
            files.push(StoredFile {
                url: public_url(None, &filename),
                filename,
                size: meta.len(),
                modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        files.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(files)
    }

    /// Delete a top-level file by name. Only plain filenames are accepted.
    pub async fn delete_file(&self, filename: &str) -> AppResult<()> {
        if !is_plain_filename(filename) {
            return Err(AppError::BadRequest("Invalid filename.".into()));
        }
        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::Core(
                portfolio_core::error::CoreError::Missing("File not found.".into()),
            )),
            Err(e) => Err(AppError::InternalError(format!("delete file: {e}"))),
        }
    }
}

fn too_large(kind: UploadKind) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File too large. Maximum size is {}.",
        kind.limit_label()
    ))
}

// ---------------------------------------------------------------------------
// Multipart forms
// ---------------------------------------------------------------------------

/// Text fields and stored file URLs from one multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<&'static str, String>,
    content_types: HashMap<&'static str, String>,
}

impl UploadForm {
    /// Trimmed text value, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Raw text value, `Some("")` when sent empty.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// URL of the stored file for `field`.
    pub fn file(&self, field: &str) -> Option<&str> {
        self.files.get(field).map(String::as_str)
    }

    /// Declared content type of the stored file for `field`.
    pub fn content_type(&self, field: &str) -> Option<&str> {
        self.content_types.get(field).map(String::as_str)
    }

    /// Every stored file URL.
    pub fn file_urls(&self) -> Vec<String> {
        self.files.values().cloned().collect()
    }
}

/// Read a multipart request, storing each file field listed in `file_fields`.
///
/// Unlisted file fields are ignored. If any part fails validation, files
/// already stored by this request are reaped before returning the error.
pub async fn collect_form(
    store: &UploadStore,
    multipart: &mut Multipart,
    file_fields: &[(&'static str, UploadKind)],
) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    match read_parts(store, multipart, file_fields, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            store.reap_all(form.file_urls()).await;
            Err(e)
        }
    }
}

async fn read_parts(
    store: &UploadStore,
    multipart: &mut Multipart,
    file_fields: &[(&'static str, UploadKind)],
    form: &mut UploadForm,
) -> AppResult<()> {
    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        let listed = file_fields.iter().find(|(n, _)| *n == name);

        match listed {
            Some(&(field_name, kind)) => {
                let original = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = read_limited(&mut field, kind).await?;
                if bytes.is_empty() {
                    continue;
                }
                let url = store
                    .store(kind, original.as_deref(), &content_type, &bytes)
                    .await?;
                if let Some(previous) = form.files.insert(field_name, url) {
                    store.reap(&previous).await;
                }
                form.content_types.insert(field_name, content_type);
            }
            None if field.file_name().is_some() => {
                // Drain unexpected file parts without storing them.
                while field.chunk().await?.is_some() {}
            }
            None => {
                let text = field.text().await?;
                form.fields.insert(name, text);
            }
        }
    }
    Ok(())
}

/// Buffer a field, failing as soon as it exceeds the kind's limit.
async fn read_limited(field: &mut Field<'_>, kind: UploadKind) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > kind.max_bytes() {
            return Err(too_large(kind));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Store the `file` field of a single-file upload request.
pub async fn store_single(
    store: &UploadStore,
    multipart: &mut Multipart,
    kind: UploadKind,
) -> AppResult<String> {
    let form = collect_form(store, multipart, &[("file", kind)]).await?;
    form.file("file")
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("No file uploaded.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), "http://localhost:5000");
        (dir, store)
    }

    #[tokio::test]
    async fn store_then_reap_removes_file() {
        let (_dir, store) = store();
        let url = store
            .store(UploadKind::Image, Some("a.png"), "image/png", b"png")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/") && url.ends_with(".png"));

        let path = store.resolve(&url).unwrap();
        assert!(path.exists());
        store.reap(&url).await;
        assert!(!path.exists());

        // Reaping twice is a silent no-op.
        store.reap(&url).await;
    }

    #[tokio::test]
    async fn icons_are_stored_in_subdir() {
        let (_dir, store) = store();
        let url = store
            .store(UploadKind::Icon, None, "image/webp", b"x")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/icons/"));
    }

    #[tokio::test]
    async fn rejects_wrong_type_and_oversize() {
        let (_dir, store) = store();
        let err = store
            .store(UploadKind::Image, None, "video/mp4", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Core(_)));

        let big = vec![0u8; UploadKind::Icon.max_bytes() + 1];
        let err = store
            .store(UploadKind::Icon, None, "image/png", &big)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[tokio::test]
    async fn reap_never_touches_paths_outside_root() {
        let outer = tempfile::tempdir().unwrap();
        let victim = outer.path().join("keep.txt");
        tokio::fs::write(&victim, b"keep").await.unwrap();

        let root = outer.path().join("uploads");
        let store = UploadStore::new(&root, "http://localhost:5000");
        store.reap("/uploads/../keep.txt").await;
        store.reap("https://cdn.example.com/keep.txt").await;
        assert!(victim.exists());
    }

    #[tokio::test]
    async fn reap_if_replaced_keeps_unchanged_file() {
        let (_dir, store) = store();
        let url = store
            .store(UploadKind::Image, None, "image/jpeg", b"jpg")
            .await
            .unwrap();
        let path = store.resolve(&url).unwrap();

        store.reap_if_replaced(Some(url.as_str()), Some(url.as_str())).await;
        assert!(path.exists());

        store.reap_if_replaced(None, Some("/uploads/new.jpg")).await;
        store.reap_if_replaced(Some(url.as_str()), Some("/uploads/new.jpg")).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_file_requires_plain_name() {
        let (_dir, store) = store();
        let err = store.delete_file("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = store.delete_file("missing.png").await.unwrap_err();
        assert!(matches!(err, AppError::Core(_)));
    }

    #[tokio::test]
    async fn list_files_skips_directories() {
        let (_dir, store) = store();
        store.ensure_dirs().await.unwrap();
        store
            .store(UploadKind::Image, Some("a.gif"), "image/gif", b"gif")
            .await
            .unwrap();
        let files = store.list_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].filename.ends_with(".gif"));
    }

    #[test]
    fn absolute_url_joins_base() {
        let store = UploadStore::new("uploads", "http://api.example/");
        assert_eq!(
            store.absolute_url("/uploads/a.png"),
            "http://api.example/uploads/a.png"
        );
    }
}
