//! Extension-based content type lookup.
//!
//! # Design Decisions
//! - Static table, extended by adding a row
//! - Unrecognized or absent extensions fall back to text/html, matching the
//!   historical behavior browsers already depend on
//! - Video types sit behind a config switch since not every deployment
//!   serves media assets

/// Fallback for unrecognized or missing extensions.
pub const DEFAULT: &str = "text/html";

/// Extension (without dot) to content type. Checked in order.
const TABLE: &[(&str, &str)] = &[
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpg"),
];

const VIDEO_TABLE: &[(&str, &str)] = &[("mp4", "video/mp4")];

/// Resolve the content type for a file extension.
///
/// `extension` is the bare extension as produced by `Path::extension`
/// (no leading dot); `None` means the path had no extension.
pub fn for_extension(extension: Option<&str>, video: bool) -> &'static str {
    let Some(ext) = extension else {
        return DEFAULT;
    };

    if let Some((_, ct)) = TABLE.iter().find(|(e, _)| *e == ext) {
        return ct;
    }
    if video {
        if let Some((_, ct)) = VIDEO_TABLE.iter().find(|(e, _)| *e == ext) {
            return ct;
        }
    }
    DEFAULT
}
