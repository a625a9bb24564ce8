use crate::{
    render_result, AppState, Effect, InputPayload, MediaKind, Msg, TriageError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(text) => {
            state.set_text(text);
            state.hide_error();
            Vec::new()
        }
        Msg::TextAppended(line) => {
            state.append_text(&line);
            state.hide_error();
            Vec::new()
        }
        Msg::FileChosen {
            filename,
            media_type,
            bytes,
            source: _,
        } => {
            state.set_drop_highlight(false);
            match MediaKind::from_media_type(&media_type) {
                MediaKind::PlainText => {
                    let intake = state.begin_intake(filename.clone(), MediaKind::PlainText);
                    vec![Effect::DecodeText {
                        intake,
                        filename,
                        bytes,
                    }]
                }
                MediaKind::Pdf => {
                    let intake = state.begin_intake(filename.clone(), MediaKind::Pdf);
                    vec![Effect::ExtractPdf {
                        intake,
                        filename,
                        bytes,
                    }]
                }
                MediaKind::Unsupported => {
                    state.clear_input();
                    state.show_error(TriageError::UnsupportedFileType { media_type });
                    Vec::new()
                }
            }
        }
        Msg::FileRemoved => {
            state.clear_input();
            Vec::new()
        }
        Msg::DragEntered => {
            state.set_drop_highlight(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drop_highlight(false);
            Vec::new()
        }
        Msg::TextFileRead { intake, result } | Msg::PdfTextExtracted { intake, result } => {
            if state.finish_intake(intake) {
                apply_intake_result(&mut state, result);
            }
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            if state.is_analyzing() {
                return (state, Vec::new());
            }
            let payload = if state.text_is_placeholder() {
                Err(TriageError::EmptyOrPendingInput)
            } else {
                InputPayload::from_text(state.text(), state.display_filename())
            };
            match payload {
                Ok(payload) => {
                    state.start_analysis();
                    vec![Effect::Classify {
                        request: payload.to_request(),
                    }]
                }
                Err(error) => {
                    state.show_error(error);
                    Vec::new()
                }
            }
        }
        Msg::ClassificationFinished(result) => {
            if state.is_analyzing() {
                let outcome = result
                    .map(|result| render_result(&result))
                    .map_err(|_cause| TriageError::ClassificationFailed);
                state.finish_analysis(outcome);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_intake_result(state: &mut AppState, result: Result<String, String>) {
    match result {
        Ok(text) => state.set_text(text),
        Err(_cause) => {
            let filename = state.display_filename().unwrap_or_default().to_string();
            let notice = TriageError::ExtractionFailed { filename }.to_string();
            state.reset_file_selection();
            state.set_notice(notice);
        }
    }
}
