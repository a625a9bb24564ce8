use crate::{ClassificationRequest, IntakeId};

/// Side effects requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Decode the bytes of a `text/plain` file and answer with `Msg::TextFileRead`.
    DecodeText {
        intake: IntakeId,
        filename: String,
        bytes: Vec<u8>,
    },
    /// Send the PDF to the extraction service and answer with `Msg::PdfTextExtracted`.
    ExtractPdf {
        intake: IntakeId,
        filename: String,
        bytes: Vec<u8>,
    },
    /// Submit the request to the classification service and answer with
    /// `Msg::ClassificationFinished`.
    Classify { request: ClassificationRequest },
}
