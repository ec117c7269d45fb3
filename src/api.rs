//! AList/OpenList REST API client
//!
//! Wraps the handful of endpoints the browser needs. Every JSON endpoint
//! shares the `{code, message, data}` envelope; `code == 200` means success
//! regardless of transport status, and an expired token can surface either
//! as HTTP 401 or as envelope code 401 depending on server version.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::logic::file_type::content_type_for;
use crate::logic::path::{join, split_parent};
use crate::logic::url::{api_endpoint, normalize_media_url, parse_base_url};

/// Default per-request timeout, overridable via `request_timeout_secs`
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials or expired token; the session must be torn down
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Envelope-level rejection from a server that answered normally
    #[error("server error (code {code}): {message}")]
    Api { code: i64, message: String },
    /// Transport-level failure before any server answer
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("request timed out")]
    Timeout,
    /// Rejected client-side before any network call
    #[error("{0}")]
    Validation(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

/// Some drivers report `"content": null` for empty directories
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Response envelope shared by every JSON endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub is_dir: bool,
    /// RFC 3339; absent on some storage drivers
    #[serde(default)]
    pub modified: String,
    /// Signature some drivers require on direct links
    #[serde(default)]
    pub sign: String,
    /// Thumbnail URL, normalized against the base URL
    #[serde(default)]
    pub thumb: String,
    /// Server-side category hint
    #[serde(rename = "type", default)]
    pub file_type: u64,
}

/// Everything /api/fs/get reports for a single file
#[derive(Debug, Clone, Deserialize)]
pub struct FileDetail {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub sign: String,
    #[serde(default)]
    pub thumb: String,
    /// Direct download URL for the file content
    #[serde(default)]
    pub raw_url: String,
    /// Storage driver backing this path
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "type", default)]
    pub file_type: u64,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct FsListData {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    content: Vec<FileEntry>,
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<Option<T>, ApiError> {
    match envelope.code {
        200 => Ok(envelope.data),
        401 => Err(ApiError::Auth(envelope.message)),
        code => Err(ApiError::Api {
            code,
            message: envelope.message,
        }),
    }
}

fn require_data<T>(endpoint: &str, data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::Decode(format!("{} returned no data", endpoint)))
}

/// Client for one AList server session
#[derive(Clone)]
pub struct AListClient {
    base_url: Url,
    token: String,
    client: Client,
}

/// Token kept out of debug output
impl std::fmt::Debug for AListClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AListClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl AListClient {
    /// Build a client for a server address, without credentials
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url).map_err(ApiError::Validation)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self {
            base_url,
            token: String::new(),
            client,
        })
    }

    /// Resume a session with a previously issued token
    pub fn with_token(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut resumed = Self::new(base_url, timeout)?;
        resumed.token = token.to_string();
        Ok(resumed)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, ApiError> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("token rejected by server".to_string()));
        }
        let envelope: Envelope<T> = response.json().await.map_err(ApiError::from)?;
        unwrap_envelope(envelope)
    }

    async fn post_api<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Option<T>, ApiError> {
        let mut request = self
            .client
            .post(api_endpoint(&self.base_url, path))
            .json(&body);
        if !self.token.is_empty() {
            request = request.header("Authorization", &self.token);
        }
        let response = request.send().await.map_err(ApiError::from)?;
        Self::read_envelope(response).await
    }

    /// Log in and keep the issued token for subsequent calls
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = json!({ "username": username, "password": password });
        let data = match self.post_api::<LoginData>("/api/auth/login", body).await {
            Ok(data) => require_data("/api/auth/login", data)?,
            // Credential rejections come back as ordinary envelope errors
            Err(ApiError::Api { message, .. }) => return Err(ApiError::Auth(message)),
            Err(other) => return Err(other),
        };
        self.token = data.token.clone();
        Ok(data.token)
    }

    /// List one page of a directory
    ///
    /// `refresh` asks the server to bypass its own listing cache. Passing
    /// `per_page` 0 returns the whole directory in one page.
    pub async fn list_files(
        &self,
        path: &str,
        page: u64,
        per_page: u64,
        refresh: bool,
    ) -> Result<Vec<FileEntry>, ApiError> {
        let body = json!({
            "path": path,
            "password": "",
            "page": page,
            "per_page": per_page,
            "refresh": refresh,
        });
        let data: FsListData = require_data(
            "/api/fs/list",
            self.post_api("/api/fs/list", body).await?,
        )?;
        let mut entries = data.content;
        for entry in &mut entries {
            entry.thumb = normalize_media_url(&self.base_url, &entry.thumb);
        }
        Ok(entries)
    }

    /// Fetch direct-link metadata for one file
    pub async fn get_file_detail(&self, path: &str) -> Result<FileDetail, ApiError> {
        let body = json!({ "path": path, "password": "" });
        let mut detail: FileDetail =
            require_data("/api/fs/get", self.post_api("/api/fs/get", body).await?)?;
        detail.raw_url = normalize_media_url(&self.base_url, &detail.raw_url);
        detail.thumb = normalize_media_url(&self.base_url, &detail.thumb);
        Ok(detail)
    }

    /// Delete entries by name inside one directory
    pub async fn remove_entries(&self, dir: &str, names: &[String]) -> Result<(), ApiError> {
        if names.is_empty() {
            return Err(ApiError::Validation("nothing selected to delete".to_string()));
        }
        let body = json!({ "dir": dir, "names": names });
        self.post_api::<serde_json::Value>("/api/fs/remove", body)
            .await
            .map(|_| ())
    }

    /// Delete a single entry addressed by full path
    pub async fn delete_file(&self, path: &str) -> Result<(), ApiError> {
        let (dir, name) = split_parent(path);
        if name.is_empty() {
            return Err(ApiError::Validation("cannot delete the root".to_string()));
        }
        self.remove_entries(&dir, &[name]).await
    }

    /// Upload a local file into a remote directory, returning the new path
    ///
    /// The whole body is read into memory and sent in one PUT with
    /// `As-Task: false`, so the server writes it inline and failures are
    /// reported on this call instead of a background task.
    pub async fn upload_file(&self, dir: &str, local: &Path) -> Result<String, ApiError> {
        let file_name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ApiError::Validation(format!("not a file path: {}", local.display()))
            })?;
        let dest = join(dir, file_name);
        let bytes = tokio::fs::read(local).await.map_err(|e| {
            ApiError::Validation(format!("cannot read {}: {}", local.display(), e))
        })?;

        let response = self
            .client
            .put(api_endpoint(&self.base_url, "/api/fs/put"))
            .header("Authorization", &self.token)
            .header("AList-Token", &self.token)
            .header("File-Path", urlencoding::encode(&dest).into_owned())
            .header("As-Task", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type_for(file_name))
            .body(bytes)
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::read_envelope::<serde_json::Value>(response)
            .await
            .map(|_| dest)
    }

    /// Stream a direct URL into a local file, returning the bytes written
    ///
    /// Downloads can be multi-gigabyte videos; the body goes to disk
    /// chunk by chunk instead of through memory.
    pub async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64, ApiError> {
        use tokio::io::AsyncWriteExt;

        let mut response = self.client.get(url).send().await.map_err(ApiError::from)?;
        if !response.status().is_success() {
            return Err(ApiError::Api {
                code: response.status().as_u16() as i64,
                message: "direct link fetch failed".to_string(),
            });
        }
        let write_err =
            |e: std::io::Error| ApiError::Validation(format!("cannot write {}: {}", dest.display(), e));
        let mut file = tokio::fs::File::create(dest).await.map_err(write_err)?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(ApiError::from)? {
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_err)?;
        Ok(written)
    }

    /// GET a direct (signed) URL produced by `get_file_detail`
    ///
    /// Buffers the whole body, so only previews (capped or image-sized)
    /// use it; downloads go through `fetch_to_file`.
    pub async fn fetch_direct(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await.map_err(ApiError::from)?;
        if !response.status().is_success() {
            return Err(ApiError::Api {
                code: response.status().as_u16() as i64,
                message: "direct link fetch failed".to_string(),
            });
        }
        Ok(response.bytes().await.map_err(ApiError::from)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_alist_shape() {
        let entry: FileEntry = serde_json::from_str(
            r#"{
                "name": "cam.mp4",
                "size": 1048576,
                "is_dir": false,
                "modified": "2024-03-01T12:00:00Z",
                "sign": "abc123",
                "thumb": "/p/cam.jpg",
                "type": 2
            }"#,
        )
        .unwrap();
        assert_eq!(entry.name, "cam.mp4");
        assert_eq!(entry.size, 1_048_576);
        assert_eq!(entry.file_type, 2);
        assert!(!entry.is_dir);
    }

    #[test]
    fn test_entry_defaults_for_sparse_drivers() {
        let entry: FileEntry = serde_json::from_str(r#"{"name": "x", "is_dir": true}"#).unwrap();
        assert_eq!(entry.size, 0);
        assert_eq!(entry.modified, "");
        assert_eq!(entry.sign, "");
    }

    #[test]
    fn test_list_data_accepts_null_content() {
        let data: FsListData = serde_json::from_str(r#"{"content": null, "total": 0}"#).unwrap();
        assert!(data.content.is_empty());
    }

    #[test]
    fn test_envelope_code_mapping() {
        let ok: Envelope<LoginData> =
            serde_json::from_str(r#"{"code":200,"message":"success","data":{"token":"t"}}"#)
                .unwrap();
        assert_eq!(unwrap_envelope(ok).unwrap().unwrap().token, "t");

        let auth: Envelope<LoginData> =
            serde_json::from_str(r#"{"code":401,"message":"token expired","data":null}"#).unwrap();
        match unwrap_envelope(auth) {
            Err(ApiError::Auth(msg)) => assert_eq!(msg, "token expired"),
            other => panic!("expected auth error, got {:?}", other.map(|_| ())),
        }

        let failed: Envelope<LoginData> =
            serde_json::from_str(r#"{"code":500,"message":"storage offline","data":null}"#)
                .unwrap();
        match unwrap_envelope(failed) {
            Err(ApiError::Api { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "storage offline");
            }
            other => panic!("expected api error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_detail_normalization_fields_present() {
        let detail: FileDetail = serde_json::from_str(
            r#"{
                "name": "doc.pdf",
                "size": 2048,
                "is_dir": false,
                "raw_url": "http://nas.local/d/doc.pdf?sign=s",
                "provider": "Local",
                "type": 4
            }"#,
        )
        .unwrap();
        assert_eq!(detail.provider, "Local");
        assert!(detail.raw_url.starts_with("http://"));
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let err = AListClient::new("   ", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_auth_predicate() {
        assert!(ApiError::Auth("expired".into()).is_auth());
        assert!(!ApiError::Timeout.is_auth());
    }
}
