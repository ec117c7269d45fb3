//! Background fetch tasks
//!
//! Every server call runs as its own spawned task and reports back over
//! one unbounded channel. There is no queue or deduplication layer: the
//! listing revision decides which responses still matter, and batch
//! operations run sequentially inside a single task so the server never
//! sees a burst of direct-link requests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::{AListClient, ApiError, FileDetail, FileEntry};
use crate::logic::file_type::PreviewKind;
use crate::logic::path::{join, local_leaf};

/// Pause between items of a sequential batch; some storage drivers rate
/// limit direct-link generation
pub const BATCH_ITEM_DELAY: Duration = Duration::from_millis(400);

/// Cap on text preview bodies
pub const MAX_PREVIEW_BYTES: usize = 512 * 1024;

/// Which sequential batch finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Download,
    CopyLinks,
}

/// What a preview task produced beyond the detail
#[derive(Debug)]
pub enum PreviewPayload {
    Text(String),
    Image(Vec<u8>),
    /// Body written to a temp file for the system opener
    LocalFile(PathBuf),
    /// Nothing to fetch: the caller hands the raw URL elsewhere
    DetailOnly,
}

/// Results flowing back into the event loop
#[derive(Debug)]
pub enum ApiResponse {
    LoginResult {
        url: String,
        username: String,
        server_name: String,
        result: Result<(AListClient, String), ApiError>,
    },

    ListingResult {
        revision: u64,
        path: String,
        entries: Result<Vec<FileEntry>, ApiError>,
    },

    PreviewResult {
        path: String,
        result: Result<(FileDetail, PreviewPayload), ApiError>,
    },

    UploadResult {
        file_name: String,
        /// Destination path on success
        result: Result<String, ApiError>,
    },

    DeleteResult {
        dir: String,
        names: Vec<String>,
        result: Result<(), ApiError>,
    },

    /// One direct link of a copy-links batch resolved
    LinkResult {
        name: String,
        result: Result<String, ApiError>,
    },

    /// One file of a download batch finished
    DownloadResult {
        name: String,
        result: Result<PathBuf, ApiError>,
    },

    BatchFinished {
        kind: BatchKind,
        ok: usize,
        failed: usize,
    },
}

pub fn spawn_login(
    tx: mpsc::UnboundedSender<ApiResponse>,
    base_url: String,
    username: String,
    password: String,
    server_name: String,
    timeout: Duration,
) {
    tokio::spawn(async move {
        let result = login_task(&base_url, &username, &password, timeout).await;
        let _ = tx.send(ApiResponse::LoginResult {
            url: base_url,
            username,
            server_name,
            result,
        });
    });
}

async fn login_task(
    base_url: &str,
    username: &str,
    password: &str,
    timeout: Duration,
) -> Result<(AListClient, String), ApiError> {
    let mut client = AListClient::new(base_url, timeout)?;
    let token = client.login(username, password).await?;
    Ok((client, token))
}

pub fn spawn_listing(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    path: String,
    revision: u64,
    per_page: u64,
    refresh: bool,
) {
    tokio::spawn(async move {
        let entries = client.list_files(&path, 1, per_page, refresh).await;
        let _ = tx.send(ApiResponse::ListingResult {
            revision,
            path,
            entries,
        });
    });
}

pub fn spawn_preview(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    path: String,
    kind: PreviewKind,
) {
    tokio::spawn(async move {
        let result = preview_task(&client, &path, kind).await;
        let _ = tx.send(ApiResponse::PreviewResult { path, result });
    });
}

async fn preview_task(
    client: &AListClient,
    path: &str,
    kind: PreviewKind,
) -> Result<(FileDetail, PreviewPayload), ApiError> {
    let detail = client.get_file_detail(path).await?;
    let payload = match kind {
        PreviewKind::Text => {
            let bytes = client.fetch_direct(&detail.raw_url).await?;
            PreviewPayload::Text(decode_text(&bytes))
        }
        PreviewKind::Image => {
            let bytes = client.fetch_direct(&detail.raw_url).await?;
            PreviewPayload::Image(bytes)
        }
        PreviewKind::Pdf => {
            let bytes = client.fetch_direct(&detail.raw_url).await?;
            let local = materialize_temp(&detail.name, &bytes).await?;
            PreviewPayload::LocalFile(local)
        }
        PreviewKind::Video | PreviewKind::Other => PreviewPayload::DetailOnly,
    };
    Ok((detail, payload))
}

fn decode_text(bytes: &[u8]) -> String {
    let cut = bytes.len().min(MAX_PREVIEW_BYTES);
    let mut text = String::from_utf8_lossy(&bytes[..cut]).into_owned();
    if bytes.len() > MAX_PREVIEW_BYTES {
        text.push_str("\n… (truncated)");
    }
    text
}

async fn materialize_temp(name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    // Entry names come from the server; never let one name a path
    // outside the preview directory
    let file_name =
        local_leaf(name).ok_or_else(|| ApiError::Validation(format!("unusable file name: {:?}", name)))?;
    let dir = std::env::temp_dir().join("alistui-previews");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Validation(format!("cannot create {}: {}", dir.display(), e)))?;
    let target = dir.join(file_name);
    tokio::fs::write(&target, bytes)
        .await
        .map_err(|e| ApiError::Validation(format!("cannot write {}: {}", target.display(), e)))?;
    Ok(target)
}

pub fn spawn_upload(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    dir: String,
    local: PathBuf,
) {
    tokio::spawn(async move {
        let file_name = local
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let result = client.upload_file(&dir, &local).await;
        let _ = tx.send(ApiResponse::UploadResult { file_name, result });
    });
}

/// Bulk delete is a single server call; the remove endpoint takes all
/// names for one directory at once
pub fn spawn_delete(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    dir: String,
    names: Vec<String>,
) {
    tokio::spawn(async move {
        let result = client.remove_entries(&dir, &names).await;
        let _ = tx.send(ApiResponse::DeleteResult { dir, names, result });
    });
}

pub fn spawn_link_collection(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    dir: String,
    names: Vec<String>,
) {
    tokio::spawn(async move {
        let mut ok = 0usize;
        let mut failed = 0usize;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_ITEM_DELAY).await;
            }
            let result = client
                .get_file_detail(&join(&dir, name))
                .await
                .map(|detail| detail.raw_url);
            match &result {
                Ok(_) => ok += 1,
                Err(_) => failed += 1,
            }
            let _ = tx.send(ApiResponse::LinkResult {
                name: name.clone(),
                result,
            });
        }
        let _ = tx.send(ApiResponse::BatchFinished {
            kind: BatchKind::CopyLinks,
            ok,
            failed,
        });
    });
}

pub fn spawn_downloads(
    tx: mpsc::UnboundedSender<ApiResponse>,
    client: AListClient,
    dir: String,
    names: Vec<String>,
    dest_dir: PathBuf,
) {
    tokio::spawn(async move {
        let mut ok = 0usize;
        let mut failed = 0usize;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_ITEM_DELAY).await;
            }
            let result = download_one(&client, &dir, name, &dest_dir).await;
            match &result {
                Ok(_) => ok += 1,
                Err(_) => failed += 1,
            }
            let _ = tx.send(ApiResponse::DownloadResult {
                name: name.clone(),
                result,
            });
        }
        let _ = tx.send(ApiResponse::BatchFinished {
            kind: BatchKind::Download,
            ok,
            failed,
        });
    });
}

async fn download_one(
    client: &AListClient,
    dir: &str,
    name: &str,
    dest_dir: &Path,
) -> Result<PathBuf, ApiError> {
    let file_name =
        local_leaf(name).ok_or_else(|| ApiError::Validation(format!("unusable file name: {:?}", name)))?;
    let detail = client.get_file_detail(&join(dir, name)).await?;
    tokio::fs::create_dir_all(dest_dir).await.map_err(|e| {
        ApiError::Validation(format!("cannot create {}: {}", dest_dir.display(), e))
    })?;
    let target = dest_dir.join(file_name);
    client.fetch_to_file(&detail.raw_url, &target).await?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_truncates_large_bodies() {
        let big = vec![b'x'; MAX_PREVIEW_BYTES + 10];
        let text = decode_text(&big);
        assert!(text.ends_with("(truncated)"));
        assert!(text.len() < big.len() + 32);

        let small = b"hello world".to_vec();
        assert_eq!(decode_text(&small), "hello world");
    }

    #[test]
    fn test_decode_text_handles_invalid_utf8() {
        let bytes = vec![0x66, 0x6f, 0x6f, 0xff, 0xfe];
        let text = decode_text(&bytes);
        assert!(text.starts_with("foo"));
    }

    #[tokio::test]
    async fn test_materialize_temp_confines_hostile_names() {
        let dir = std::env::temp_dir().join("alistui-previews");

        // A traversal name must land inside the preview dir, not above it
        let target = materialize_temp("../escaped.pdf", b"owned").await.unwrap();
        assert!(target.starts_with(&dir));
        assert_eq!(target.file_name().unwrap(), "escaped.pdf");
        let _ = tokio::fs::remove_file(&target).await;

        // Names with no usable component are refused outright
        let err = materialize_temp("..", b"owned").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
