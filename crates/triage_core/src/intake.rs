/// Identifies one file selection or drop. Results tagged with an older id are stale.
pub type IntakeId = u64;

/// How a file entered the UI. Both paths are handled identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSource {
    #[default]
    Picker,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    PlainText,
    Pdf,
    Unsupported,
}

impl MediaKind {
    /// Classify a declared media type such as `text/plain; charset=utf-8`.
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type.split(';').next().unwrap_or(media_type).trim();
        if essence.eq_ignore_ascii_case("text/plain") {
            MediaKind::PlainText
        } else if essence.eq_ignore_ascii_case("application/pdf") {
            MediaKind::Pdf
        } else {
            MediaKind::Unsupported
        }
    }
}
