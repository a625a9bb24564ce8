use crate::view_model::{AppViewModel, ResultPanel, ResultView};
use crate::{
    IntakeId, MediaKind, TriageError, ANALYZE_BUSY_LABEL, ANALYZE_LABEL, PDF_PENDING_SENTINEL,
};

/// Coarse presentation state derived from [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected,
    Analyzing,
    ResultShown,
    ErrorShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LoadedFile {
    display_name: String,
    kind: MediaKind,
}

/// All UI state. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    text: String,
    /// The text box holds text the UI put there (pending sentinel or failure notice).
    text_is_placeholder: bool,
    file: Option<LoadedFile>,
    next_intake: IntakeId,
    pending_intake: Option<IntakeId>,
    analyzing: bool,
    result: Option<ResultView>,
    error: Option<TriageError>,
    drop_highlight: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_is_placeholder(&self) -> bool {
        self.text_is_placeholder
    }

    pub fn display_filename(&self) -> Option<&str> {
        self.file.as_ref().map(|file| file.display_name.as_str())
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn error(&self) -> Option<&TriageError> {
        self.error.as_ref()
    }

    pub fn ui_state(&self) -> UiState {
        if self.analyzing {
            UiState::Analyzing
        } else if self.error.is_some() {
            UiState::ErrorShown
        } else if self.result.is_some() {
            UiState::ResultShown
        } else if self.file.is_some() {
            UiState::FileSelected
        } else {
            UiState::Idle
        }
    }

    pub fn view(&self) -> AppViewModel {
        let result = if self.analyzing {
            ResultPanel::Pending
        } else {
            match &self.result {
                Some(result) => ResultPanel::Shown(result.clone()),
                None => ResultPanel::Hidden,
            }
        };
        AppViewModel {
            ui_state: self.ui_state(),
            text: self.text.clone(),
            file_name: self.display_filename().map(ToOwned::to_owned),
            extracting: self.pending_intake.is_some()
                && matches!(self.file, Some(LoadedFile { kind: MediaKind::Pdf, .. })),
            drop_highlight: self.drop_highlight,
            analyze_enabled: !self.analyzing,
            analyze_label: if self.analyzing {
                ANALYZE_BUSY_LABEL
            } else {
                ANALYZE_LABEL
            },
            result,
            error: self.error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.text_is_placeholder = false;
        self.mark_dirty();
    }

    /// Adds `line` on a new line after the current text. Placeholder text is replaced.
    pub(crate) fn append_text(&mut self, line: &str) {
        if self.text_is_placeholder {
            self.text.clear();
        }
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.text_is_placeholder = false;
        self.mark_dirty();
    }

    /// Puts a notice into the text box; analysis refuses it until the user edits.
    pub(crate) fn set_notice(&mut self, notice: String) {
        self.text = notice;
        self.text_is_placeholder = true;
        self.mark_dirty();
    }

    pub(crate) fn set_drop_highlight(&mut self, on: bool) {
        if self.drop_highlight != on {
            self.drop_highlight = on;
            self.mark_dirty();
        }
    }

    /// Start a new intake for a supported file and return its id.
    pub(crate) fn begin_intake(&mut self, display_name: String, kind: MediaKind) -> IntakeId {
        self.next_intake += 1;
        let intake = self.next_intake;
        self.pending_intake = Some(intake);
        self.file = Some(LoadedFile { display_name, kind });
        self.error = None;
        self.text = match kind {
            MediaKind::Pdf => PDF_PENDING_SENTINEL.to_string(),
            MediaKind::PlainText | MediaKind::Unsupported => String::new(),
        };
        self.text_is_placeholder = kind == MediaKind::Pdf;
        self.mark_dirty();
        intake
    }

    /// Ends the intake `intake` if it is still current. Returns `false` for stale results.
    pub(crate) fn finish_intake(&mut self, intake: IntakeId) -> bool {
        if self.pending_intake == Some(intake) {
            self.pending_intake = None;
            true
        } else {
            false
        }
    }

    /// Back to the empty upload prompt. Any shown result stays.
    pub(crate) fn clear_input(&mut self) {
        self.text.clear();
        self.text_is_placeholder = false;
        self.file = None;
        self.pending_intake = None;
        self.error = None;
        self.drop_highlight = false;
        self.mark_dirty();
    }

    /// Drop the loaded file but keep whatever the text box holds.
    pub(crate) fn reset_file_selection(&mut self) {
        self.file = None;
        self.pending_intake = None;
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, error: TriageError) {
        self.error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn hide_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn start_analysis(&mut self) {
        self.analyzing = true;
        self.result = None;
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn finish_analysis(&mut self, outcome: Result<ResultView, TriageError>) {
        self.analyzing = false;
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(error) => self.error = Some(error),
        }
        self.mark_dirty();
    }
}
