use triage_core::ANALYZE_LABEL;

use super::commands::{ControlId, ControlKind, UiCommand};
use super::constants::*;

fn create(
    control_id: ControlId,
    parent: Option<ControlId>,
    kind: ControlKind,
    caption: &'static str,
    initial_text: &str,
) -> UiCommand {
    UiCommand::CreateControl {
        control_id,
        parent,
        kind,
        caption,
        initial_text: initial_text.to_string(),
    }
}

#[allow(clippy::vec_init_then_push)]
pub fn initial_commands() -> Vec<UiCommand> {
    let mut commands = Vec::new();

    commands.push(create(
        PANEL_DROP_AREA,
        None,
        ControlKind::Panel,
        "Upload",
        "",
    ));
    commands.push(create(
        PANEL_UPLOAD_PROMPT,
        Some(PANEL_DROP_AREA),
        ControlKind::Label,
        "Prompt",
        "Drop a .txt or .pdf email here, or browse for a file.",
    ));
    commands.push(create(
        PANEL_FILE_CONFIRMATION,
        Some(PANEL_DROP_AREA),
        ControlKind::Panel,
        "Loaded file",
        "",
    ));
    commands.push(create(
        LABEL_FILE_NAME,
        Some(PANEL_FILE_CONFIRMATION),
        ControlKind::Label,
        "File",
        "",
    ));
    commands.push(create(
        BUTTON_REMOVE_FILE,
        Some(PANEL_FILE_CONFIRMATION),
        ControlKind::Button,
        "Remove",
        "Remove file",
    ));
    commands.push(create(
        INPUT_EMAIL_TEXT,
        None,
        ControlKind::TextInput,
        "Email",
        "",
    ));
    commands.push(create(
        BUTTON_ANALYZE,
        None,
        ControlKind::Button,
        "Action",
        ANALYZE_LABEL,
    ));
    commands.push(create(PANEL_RESULT, None, ControlKind::Panel, "Result", ""));
    commands.push(create(
        LABEL_RESULT_STATUS,
        Some(PANEL_RESULT),
        ControlKind::Label,
        "Status",
        "",
    ));
    commands.push(create(
        LABEL_CATEGORY,
        Some(PANEL_RESULT),
        ControlKind::Label,
        "Category",
        "",
    ));
    commands.push(create(
        LABEL_REASONING,
        Some(PANEL_RESULT),
        ControlKind::Label,
        "Reasoning",
        "",
    ));
    commands.push(create(
        LABEL_SUGGESTED_REPLY,
        Some(PANEL_RESULT),
        ControlKind::Label,
        "Suggested reply",
        "",
    ));
    commands.push(create(PANEL_ERROR, None, ControlKind::Panel, "Error", ""));
    commands.push(create(
        LABEL_ERROR,
        Some(PANEL_ERROR),
        ControlKind::Label,
        "Message",
        "",
    ));

    commands
}
