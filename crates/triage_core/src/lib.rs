//! Mail triage core: pure state machine, request construction and view-model helpers.
mod category;
mod effect;
mod error;
mod intake;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use category::{category_badge, render_result, Category, CategoryBadge, ColorClass};
pub use effect::Effect;
pub use error::TriageError;
pub use intake::{FileSource, IntakeId, MediaKind};
pub use msg::Msg;
pub use request::{
    ClassificationRequest, ClassificationResult, InputPayload, PayloadKind,
    FILE_DERIVED_FILE_TYPE, MANUAL_ENTRY_FILENAME, MANUAL_FILE_TYPE, PDF_PENDING_SENTINEL,
};
pub use state::{AppState, UiState};
pub use update::update;
pub use view_model::{
    AppViewModel, ResultPanel, ResultView, ANALYZE_BUSY_LABEL, ANALYZE_LABEL,
    ANALYZING_PLACEHOLDER,
};
