use crate::TriageError;

/// Filename sent for text typed or pasted directly into the text box.
pub const MANUAL_ENTRY_FILENAME: &str = "textarea_input";
/// `fileType` sent for manual entry.
pub const MANUAL_FILE_TYPE: &str = "text/plain";
/// `fileType` sent for content that came from a loaded `.txt` or `.pdf` file.
pub const FILE_DERIVED_FILE_TYPE: &str = "pdf_or_text";
/// Shown in the text box while a PDF is with the extraction service.
pub const PDF_PENDING_SENTINEL: &str = "Extracting text from PDF...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Manual,
    FileDerived,
}

/// The validated text about to be submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPayload {
    pub filename: String,
    pub kind: PayloadKind,
    pub content: String,
}

/// Body of `POST /classify-email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub filename: String,
    pub file_type: String,
    pub content: String,
}

/// Answer of the classification service. `category` is an open set of codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    pub category: String,
    pub reasoning: String,
    pub suggested_reply: String,
}

impl InputPayload {
    /// Build a payload from the text box, failing fast on empty text or the
    /// pending-extraction sentinel.
    ///
    /// `display_filename` is `Some` when a file is loaded (file mode).
    pub fn from_text(text: &str, display_filename: Option<&str>) -> Result<Self, TriageError> {
        if text.trim().is_empty() || text == PDF_PENDING_SENTINEL {
            return Err(TriageError::EmptyOrPendingInput);
        }
        let (filename, kind) = match display_filename {
            Some(name) => (name.to_string(), PayloadKind::FileDerived),
            None => (MANUAL_ENTRY_FILENAME.to_string(), PayloadKind::Manual),
        };
        Ok(Self {
            filename,
            kind,
            content: text.to_string(),
        })
    }

    pub fn to_request(&self) -> ClassificationRequest {
        let file_type = match self.kind {
            PayloadKind::Manual => MANUAL_FILE_TYPE,
            PayloadKind::FileDerived => FILE_DERIVED_FILE_TYPE,
        };
        ClassificationRequest {
            filename: self.filename.clone(),
            file_type: file_type.to_string(),
            content: self.content.clone(),
        }
    }
}
