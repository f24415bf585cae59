//! File upload bundling.
//!
//! # Responsibility
//! - Turn picked file bytes (or an external link) into a `NewFile`: an
//!   opaque payload plus display metadata.
//!
//! # Invariants
//! - Embedded payloads are `data:<mime>;base64,<body>` URIs.
//! - Display type is the upper-cased extension, or `Unknown`.
//! - Size strings use base 1024 and at most two decimals.

use crate::model::file::NewFile;
use crate::model::ids::ContactId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const FALLBACK_MIME: &str = "application/octet-stream";
const UNKNOWN_TYPE: &str = "Unknown";
const UNKNOWN_SIZE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// File name is blank.
    EmptyName,
    /// Link is blank or not an http(s) URL.
    InvalidLink(String),
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "file name is required"),
            Self::InvalidLink(value) => write!(f, "invalid file link: `{value}`"),
        }
    }
}

impl Error for UploadError {}

/// Embeds `bytes` as a data URI and derives display metadata.
pub fn bundle_upload(
    name: &str,
    bytes: &[u8],
    contact_id: Option<ContactId>,
) -> Result<NewFile, UploadError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UploadError::EmptyName);
    }

    let extension = extension(name);
    let mime = extension
        .as_deref()
        .map(mime_for_extension)
        .unwrap_or(FALLBACK_MIME);
    let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));

    debug!(
        "event=file_bundle module=upload status=ok bytes={} mime={}",
        bytes.len(),
        mime
    );

    Ok(NewFile {
        name: name.to_string(),
        kind: display_type(extension.as_deref()),
        size: format_file_size(bytes.len() as u64),
        contact_id,
        data_url,
    })
}

/// Registers external content by link; size is unknown.
pub fn bundle_link(
    name: &str,
    url: &str,
    contact_id: Option<ContactId>,
) -> Result<NewFile, UploadError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UploadError::EmptyName);
    }
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(UploadError::InvalidLink(url.to_string()));
    }

    Ok(NewFile {
        name: name.to_string(),
        kind: display_type(extension(name).as_deref()),
        size: UNKNOWN_SIZE.to_string(),
        contact_id,
        data_url: url.to_string(),
    })
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.3 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0usize;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{scaled:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.trim();
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

fn display_type(extension: Option<&str>) -> String {
    extension
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => FALLBACK_MIME,
    }
}
