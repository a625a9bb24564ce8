use std::io::{self, Write};

use engine_logging::engine_warn;

use super::commands::{ControlKind, ControlTree, RenderTarget, UiCommand};
use super::constants::{BUTTON_REMOVE_FILE, LABEL_CATEGORY, PANEL_DROP_AREA};
use super::render::color_tag;

/// Renders the control tree as plain text frames on a writer (stdout by default).
pub struct TerminalTarget<W: Write> {
    tree: ControlTree,
    out: W,
}

impl TerminalTarget<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            tree: ControlTree::default(),
            out,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame(&self) -> String {
        let mut frame = String::from("\n==================== Mail Triage ====================\n");
        for (id, control) in self.tree.iter() {
            if !self.tree.is_shown(id) || id == BUTTON_REMOVE_FILE {
                continue;
            }
            let text = sanitize_for_terminal(&control.text);
            match control.kind {
                ControlKind::Panel => {
                    let marker = if id == PANEL_DROP_AREA && control.highlighted {
                        " (release to drop)"
                    } else {
                        ""
                    };
                    frame.push_str(&format!("-- {}{} --\n", control.caption, marker));
                }
                ControlKind::Button => {
                    let state = if control.enabled { "" } else { " (disabled)" };
                    frame.push_str(&format!("[ {text} ]{state}\n"));
                }
                ControlKind::TextInput => {
                    let state = if control.enabled { "" } else { " (read-only)" };
                    frame.push_str(&format!("{}{}:\n", control.caption, state));
                    for line in text.lines() {
                        frame.push_str(&format!("  | {line}\n"));
                    }
                }
                ControlKind::Label if text.is_empty() => {}
                ControlKind::Label if id == LABEL_CATEGORY => {
                    frame.push_str(&format!(
                        "{}: {} [{}]\n",
                        control.caption,
                        text,
                        color_tag(control.color)
                    ));
                }
                ControlKind::Label => {
                    frame.push_str(&format!("{}: {}\n", control.caption, text));
                }
            }
        }
        frame
    }
}

impl<W: Write> RenderTarget for TerminalTarget<W> {
    fn execute(&mut self, commands: &[UiCommand]) {
        for command in commands {
            self.tree.apply(command);
        }
        let frame = self.frame();
        if let Err(err) = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
        {
            engine_warn!("Failed to write frame to terminal: {}", err);
        }
    }
}

/// Drop control characters (except newline and tab) so server text cannot
/// smuggle escape sequences into the terminal.
pub fn sanitize_for_terminal(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
