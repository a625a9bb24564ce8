use crate::{ClassificationResult, FileSource, IntakeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the email text box; carries the full new text.
    TextEdited(String),
    /// A line was added at the end of the email text box.
    TextAppended(String),
    /// A file was picked or dropped.
    FileChosen {
        filename: String,
        media_type: String,
        bytes: Vec<u8>,
        source: FileSource,
    },
    /// User clicked the remove-file button.
    FileRemoved,
    /// A drag entered the drop area.
    DragEntered,
    /// A drag left the drop area without dropping.
    DragLeft,
    /// Decoding of a text file finished.
    TextFileRead {
        intake: IntakeId,
        result: Result<String, String>,
    },
    /// The extraction service answered for a PDF.
    PdfTextExtracted {
        intake: IntakeId,
        result: Result<String, String>,
    },
    /// User clicked Analyze.
    AnalyzeClicked,
    /// The classification service answered; the error carries the cause for logging.
    ClassificationFinished(Result<ClassificationResult, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
