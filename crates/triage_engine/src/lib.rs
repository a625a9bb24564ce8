//! Mail triage engine: file intake, text decoding and the remote service client.
mod decode;
mod engine;
mod intake;
mod service;
mod types;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{EngineError, EngineHandle};
pub use intake::{media_type_for_path, read_picked_file, IntakeError, PickedFile};
pub use service::{
    ReqwestTriageService, ServiceSettings, TriageService, CLASSIFY_PATH, EXTRACT_PDF_PATH,
};
pub use types::{EngineEvent, FailureKind, ServiceError};
