use super::commands::ControlId;

pub const PANEL_DROP_AREA: ControlId = ControlId::new(1001);
pub const PANEL_UPLOAD_PROMPT: ControlId = ControlId::new(1002);
pub const PANEL_FILE_CONFIRMATION: ControlId = ControlId::new(1003);
pub const LABEL_FILE_NAME: ControlId = ControlId::new(1004);
pub const BUTTON_REMOVE_FILE: ControlId = ControlId::new(1005);
pub const INPUT_EMAIL_TEXT: ControlId = ControlId::new(1501);
pub const BUTTON_ANALYZE: ControlId = ControlId::new(1502);
pub const PANEL_RESULT: ControlId = ControlId::new(2001);
pub const LABEL_RESULT_STATUS: ControlId = ControlId::new(2002);
pub const LABEL_CATEGORY: ControlId = ControlId::new(2003);
pub const LABEL_REASONING: ControlId = ControlId::new(2004);
pub const LABEL_SUGGESTED_REPLY: ControlId = ControlId::new(2005);
pub const PANEL_ERROR: ControlId = ControlId::new(3001);
pub const LABEL_ERROR: ControlId = ControlId::new(3002);
