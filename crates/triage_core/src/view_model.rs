use crate::{CategoryBadge, UiState};

/// Label of the analyze trigger when it is idle.
pub const ANALYZE_LABEL: &str = "Analyze";
/// Label of the analyze trigger while a classification is in flight.
pub const ANALYZE_BUSY_LABEL: &str = "Analyzing...";
/// Shown in the result panel while a classification is in flight.
pub const ANALYZING_PLACEHOLDER: &str = "Analyzing email...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub badge: CategoryBadge,
    pub reasoning: String,
    pub suggested_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Pending,
    Shown(ResultView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub ui_state: UiState,
    pub text: String,
    /// `Some` shows the file confirmation, `None` the upload prompt.
    pub file_name: Option<String>,
    pub extracting: bool,
    pub drop_highlight: bool,
    pub analyze_enabled: bool,
    pub analyze_label: &'static str,
    pub result: ResultPanel,
    pub error: Option<String>,
    pub dirty: bool,
}
