use std::fs;
use std::io;
use std::path::Path;

use triage_core::{FileSource, Msg};

/// A file read from disk, ready to hand to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub filename: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not a regular file")]
    NotAFile(String),
}

impl PickedFile {
    pub fn into_msg(self, source: FileSource) -> Msg {
        Msg::FileChosen {
            filename: self.filename,
            media_type: self.media_type,
            bytes: self.bytes,
            source,
        }
    }
}

/// Declared media type for a path, from its extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub fn read_picked_file(path: &Path) -> Result<PickedFile, IntakeError> {
    let display = path.display().to_string();
    let meta = fs::metadata(path).map_err(|source| IntakeError::Read {
        path: display.clone(),
        source,
    })?;
    if !meta.is_file() {
        return Err(IntakeError::NotAFile(display));
    }
    let bytes = fs::read(path).map_err(|source| IntakeError::Read {
        path: display.clone(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(display);
    Ok(PickedFile {
        filename,
        media_type: media_type_for_path(path).to_string(),
        bytes,
    })
}
