/// User-facing failures of the intake and analysis pipeline.
///
/// The `Display` text of each variant is the inline notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriageError {
    #[error("Unsupported file type. Please use a .txt or .pdf file.")]
    UnsupportedFileType { media_type: String },
    #[error("Paste the email text or load a .txt or .pdf file before analyzing.")]
    EmptyOrPendingInput,
    #[error("Could not extract text from {filename}.")]
    ExtractionFailed { filename: String },
    #[error("The email could not be analyzed. Please try again.")]
    ClassificationFailed,
}
