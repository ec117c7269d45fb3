//! File kind detection
//!
//! Extension-based classification used by the listing type filter, the
//! preview branch in the action surface, and upload Content-Type headers.

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ts", "rmvb", "m3u8",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "ico", "heic", "avif", "tiff",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "epub", "txt", "md",
];

const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "zst", "iso"];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "log", "json", "yaml", "yml", "toml", "ini", "conf", "cfg", "xml", "csv", "sh",
    "py", "js", "ts", "rs", "go", "c", "cpp", "h", "java", "rb", "lua", "sql", "html", "css",
    "srt", "ass", "vtt", "nfo",
];

/// Broad class a file falls into, for the listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Video,
    Image,
    Document,
    Archive,
    Other,
}

/// How the preview surface should present a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
    Text,
    Video,
    Other,
}

/// Lowercased extension of a file name, without the dot
pub fn extension(name: &str) -> Option<String> {
    let idx = name.rfind('.')?;
    let ext = &name[idx + 1..];
    if ext.is_empty() || idx == 0 {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn classify(name: &str) -> FileKind {
    let ext = match extension(name) {
        Some(ext) => ext,
        None => return FileKind::Other,
    };
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Video
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Image
    } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Document
    } else if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Archive
    } else {
        FileKind::Other
    }
}

/// Pick the preview branch for a file name
///
/// PDF wins over the generic document class because it gets its own
/// handling (materialized locally and handed to the system opener).
pub fn preview_kind(name: &str) -> PreviewKind {
    let ext = match extension(name) {
        Some(ext) => ext,
        None => return PreviewKind::Other,
    };
    if ext == "pdf" {
        PreviewKind::Pdf
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Image
    } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Text
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Video
    } else {
        PreviewKind::Other
    }
}

/// Content-Type for an upload, from the destination file name
pub fn content_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("txt") | Some("md") | Some("log") => "text/plain",
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Active type filter for the file listing
///
/// Directories are exempt from filtering; that rule lives in the view
/// derivation, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Video,
    Image,
    Document,
    Other,
    /// Exact extension match, stored lowercase without the dot
    Extension(String),
}

impl TypeFilter {
    /// Build an extension filter from user input ("MP4", ".mp4" -> "mp4")
    pub fn extension(input: &str) -> Option<TypeFilter> {
        let cleaned = input.trim().trim_start_matches('.').to_lowercase();
        if cleaned.is_empty() || cleaned.contains(['/', '\\', ' ']) {
            return None;
        }
        Some(TypeFilter::Extension(cleaned))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Video => classify(name) == FileKind::Video,
            TypeFilter::Image => classify(name) == FileKind::Image,
            TypeFilter::Document => classify(name) == FileKind::Document,
            TypeFilter::Other => matches!(classify(name), FileKind::Archive | FileKind::Other),
            TypeFilter::Extension(ext) => extension(name).as_deref() == Some(ext.as_str()),
        }
    }

    /// Cycle through the fixed classes; an extension filter resets to All
    pub fn next(&self) -> TypeFilter {
        match self {
            TypeFilter::All => TypeFilter::Video,
            TypeFilter::Video => TypeFilter::Image,
            TypeFilter::Image => TypeFilter::Document,
            TypeFilter::Document => TypeFilter::Other,
            TypeFilter::Other => TypeFilter::All,
            TypeFilter::Extension(_) => TypeFilter::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TypeFilter::All => "All".to_string(),
            TypeFilter::Video => "Video".to_string(),
            TypeFilter::Image => "Image".to_string(),
            TypeFilter::Document => "Docs".to_string(),
            TypeFilter::Other => "Other".to_string(),
            TypeFilter::Extension(ext) => format!("*.{}", ext),
        }
    }
}
