use triage_core::{AppViewModel, ColorClass, ResultPanel, ANALYZING_PLACEHOLDER};

use super::commands::{ControlId, UiCommand};
use super::constants::*;

fn set_text(control_id: ControlId, text: impl Into<String>) -> UiCommand {
    UiCommand::SetText {
        control_id,
        text: text.into(),
    }
}

fn set_visible(control_id: ControlId, visible: bool) -> UiCommand {
    UiCommand::SetVisible {
        control_id,
        visible,
    }
}

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    cmds.push(UiCommand::SetHighlight {
        control_id: PANEL_DROP_AREA,
        highlighted: view.drop_highlight,
    });
    cmds.push(set_visible(PANEL_UPLOAD_PROMPT, view.file_name.is_none()));
    cmds.push(set_visible(PANEL_FILE_CONFIRMATION, view.file_name.is_some()));
    cmds.push(set_text(
        LABEL_FILE_NAME,
        view.file_name.clone().unwrap_or_default(),
    ));

    cmds.push(set_text(INPUT_EMAIL_TEXT, view.text.clone()));
    cmds.push(UiCommand::SetEnabled {
        control_id: INPUT_EMAIL_TEXT,
        enabled: !view.extracting,
    });

    cmds.push(UiCommand::SetEnabled {
        control_id: BUTTON_ANALYZE,
        enabled: view.analyze_enabled,
    });
    cmds.push(set_text(BUTTON_ANALYZE, view.analyze_label));

    cmds.extend(render_result_panel(&view.result));

    cmds.push(set_visible(PANEL_ERROR, view.error.is_some()));
    cmds.push(set_text(LABEL_ERROR, view.error.clone().unwrap_or_default()));

    cmds
}

fn render_result_panel(panel: &ResultPanel) -> Vec<UiCommand> {
    match panel {
        ResultPanel::Hidden => vec![set_visible(PANEL_RESULT, false)],
        ResultPanel::Pending => vec![
            set_visible(PANEL_RESULT, true),
            set_visible(LABEL_RESULT_STATUS, true),
            set_text(LABEL_RESULT_STATUS, ANALYZING_PLACEHOLDER),
            set_visible(LABEL_CATEGORY, false),
            set_visible(LABEL_REASONING, false),
            set_visible(LABEL_SUGGESTED_REPLY, false),
        ],
        ResultPanel::Shown(result) => vec![
            set_visible(PANEL_RESULT, true),
            set_visible(LABEL_RESULT_STATUS, false),
            set_visible(LABEL_CATEGORY, true),
            set_text(LABEL_CATEGORY, result.badge.label.clone()),
            UiCommand::SetColor {
                control_id: LABEL_CATEGORY,
                color: result.badge.color,
            },
            set_visible(LABEL_REASONING, true),
            set_text(LABEL_REASONING, result.reasoning.clone()),
            set_visible(LABEL_SUGGESTED_REPLY, true),
            set_text(LABEL_SUGGESTED_REPLY, result.suggested_reply.clone()),
        ],
    }
}

/// Short tag used by text surfaces that cannot show color.
pub fn color_tag(color: ColorClass) -> &'static str {
    match color {
        ColorClass::Red => "red",
        ColorClass::Blue => "blue",
        ColorClass::Green => "green",
        ColorClass::Amber => "amber",
        ColorClass::Gray => "gray",
        ColorClass::Neutral => "neutral",
    }
}
