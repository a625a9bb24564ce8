use std::collections::BTreeMap;

use triage_core::ColorClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Panel,
    Label,
    TextInput,
    Button,
}

/// Abstract UI operations produced by layout and render, executed by a [`RenderTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    CreateControl {
        control_id: ControlId,
        parent: Option<ControlId>,
        kind: ControlKind,
        caption: &'static str,
        initial_text: String,
    },
    SetText {
        control_id: ControlId,
        text: String,
    },
    SetVisible {
        control_id: ControlId,
        visible: bool,
    },
    SetEnabled {
        control_id: ControlId,
        enabled: bool,
    },
    SetColor {
        control_id: ControlId,
        color: ColorClass,
    },
    SetHighlight {
        control_id: ControlId,
        highlighted: bool,
    },
}

pub trait RenderTarget {
    fn execute(&mut self, commands: &[UiCommand]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub parent: Option<ControlId>,
    pub kind: ControlKind,
    pub caption: &'static str,
    pub text: String,
    pub visible: bool,
    pub enabled: bool,
    pub color: ColorClass,
    pub highlighted: bool,
}

/// Retained control state that command batches are applied to.
#[derive(Debug, Default)]
pub struct ControlTree {
    controls: BTreeMap<ControlId, Control>,
    order: Vec<ControlId>,
}

impl ControlTree {
    pub fn apply(&mut self, command: &UiCommand) {
        match command {
            UiCommand::CreateControl {
                control_id,
                parent,
                kind,
                caption,
                initial_text,
            } => {
                let previous = self.controls.insert(
                    *control_id,
                    Control {
                        parent: *parent,
                        kind: *kind,
                        caption: *caption,
                        text: initial_text.clone(),
                        visible: true,
                        enabled: true,
                        color: ColorClass::Neutral,
                        highlighted: false,
                    },
                );
                if previous.is_none() {
                    self.order.push(*control_id);
                }
            }
            UiCommand::SetText { control_id, text } => {
                if let Some(control) = self.controls.get_mut(control_id) {
                    control.text.clone_from(text);
                }
            }
            UiCommand::SetVisible {
                control_id,
                visible,
            } => {
                if let Some(control) = self.controls.get_mut(control_id) {
                    control.visible = *visible;
                }
            }
            UiCommand::SetEnabled {
                control_id,
                enabled,
            } => {
                if let Some(control) = self.controls.get_mut(control_id) {
                    control.enabled = *enabled;
                }
            }
            UiCommand::SetColor { control_id, color } => {
                if let Some(control) = self.controls.get_mut(control_id) {
                    control.color = *color;
                }
            }
            UiCommand::SetHighlight {
                control_id,
                highlighted,
            } => {
                if let Some(control) = self.controls.get_mut(control_id) {
                    control.highlighted = *highlighted;
                }
            }
        }
    }

    pub fn get(&self, control_id: ControlId) -> Option<&Control> {
        self.controls.get(&control_id)
    }

    pub fn text(&self, control_id: ControlId) -> &str {
        self.get(control_id).map_or("", |control| control.text.as_str())
    }

    /// A control is shown only if it and all of its ancestors are visible.
    pub fn is_shown(&self, control_id: ControlId) -> bool {
        let mut current = Some(control_id);
        while let Some(id) = current {
            match self.controls.get(&id) {
                Some(control) if control.visible => current = control.parent,
                _ => return false,
            }
        }
        true
    }

    /// Controls in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.order
            .iter()
            .filter_map(|id| self.controls.get(id).map(|control| (*id, control)))
    }
}
