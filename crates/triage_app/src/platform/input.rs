use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_error, engine_info};
use triage_core::{FileSource, Msg};
use triage_engine::read_picked_file;

use super::app::Inbound;

pub const HELP: &str = "\
Commands:
  :open <path>   load a .txt or .pdf file
  :drop <path>   same, through the drop area
  :remove        remove the loaded file and clear the text
  :text <text>   replace the email text
  :analyze       classify the current text
  :help          show this help
  :quit          exit
Any other line is appended to the email text.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Drop(PathBuf),
    Remove,
    SetText(String),
    Analyze,
    Help,
    Quit,
    Line(String),
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Line(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match (name, arg) {
        ("open", path) if !path.is_empty() => Command::Open(PathBuf::from(path)),
        ("drop", path) if !path.is_empty() => Command::Drop(PathBuf::from(path)),
        ("remove", _) => Command::Remove,
        ("text", text) => Command::SetText(text.to_string()),
        ("analyze", _) => Command::Analyze,
        ("help", _) => Command::Help,
        ("quit" | "q", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Turns a terminal command into messages for the main loop.
pub fn translate(command: Command) -> Vec<Inbound> {
    match command {
        Command::Open(path) => load_file(&path, FileSource::Picker),
        Command::Drop(path) => {
            let mut inbound = vec![Inbound::Msg(Msg::DragEntered)];
            let loaded = load_file(&path, FileSource::Drop);
            if loaded.is_empty() {
                inbound.push(Inbound::Msg(Msg::DragLeft));
            }
            inbound.extend(loaded);
            inbound
        }
        Command::Remove => vec![Inbound::Msg(Msg::FileRemoved)],
        Command::SetText(text) => vec![Inbound::Msg(Msg::TextEdited(text))],
        Command::Line(line) => vec![Inbound::Msg(Msg::TextAppended(line))],
        Command::Analyze => vec![Inbound::Msg(Msg::AnalyzeClicked)],
        Command::Help => {
            println!("{HELP}");
            Vec::new()
        }
        Command::Quit => vec![Inbound::Quit],
        Command::Unknown(line) => {
            println!("Unknown command {line:?}. Type :help for the list.");
            Vec::new()
        }
    }
}

fn load_file(path: &Path, source: FileSource) -> Vec<Inbound> {
    match read_picked_file(path) {
        Ok(picked) => {
            engine_info!(
                "Loaded {} ({}, {} bytes)",
                picked.filename,
                picked.media_type,
                picked.bytes.len()
            );
            vec![Inbound::Msg(picked.into_msg(source))]
        }
        Err(err) => {
            engine_error!("{}", err);
            Vec::new()
        }
    }
}

/// Read stdin on a background thread until EOF or `:quit`.
pub fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for inbound in translate(parse_line(&line)) {
                let quit = matches!(inbound, Inbound::Quit);
                if tx.send(inbound).is_err() || quit {
                    return;
                }
            }
        }
        let _ = tx.send(Inbound::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_commands_and_plain_lines() {
        assert_eq!(
            parse_line(":open ./mail box/a.pdf"),
            Command::Open(PathBuf::from("./mail box/a.pdf"))
        );
        assert_eq!(parse_line(":drop x.txt\r\n"), Command::Drop(PathBuf::from("x.txt")));
        assert_eq!(parse_line(":analyze"), Command::Analyze);
        assert_eq!(parse_line(":text  Hello "), Command::SetText("Hello".to_string()));
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line("Dear team,"), Command::Line("Dear team,".to_string()));
        assert_eq!(parse_line(":open"), Command::Unknown(":open".to_string()));
    }

    #[test]
    fn plain_lines_append_to_the_shown_text() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("mail.txt");
        std::fs::write(&path, "Original loaded body").unwrap();

        let inbound = translate(Command::Open(path));
        assert!(matches!(
            inbound.as_slice(),
            [Inbound::Msg(Msg::FileChosen { filename, .. })] if filename == "mail.txt"
        ));
        let inbound = translate(Command::Line("PS: thanks".to_string()));
        assert!(matches!(
            inbound.as_slice(),
            [Inbound::Msg(Msg::TextAppended(line))] if line == "PS: thanks"
        ));
        let inbound = translate(Command::SetText("fresh".to_string()));
        assert!(matches!(
            inbound.as_slice(),
            [Inbound::Msg(Msg::TextEdited(text))] if text == "fresh"
        ));
    }

    #[test]
    fn unreadable_drop_leaves_drop_area() {
        let inbound = translate(Command::Drop(PathBuf::from("/nonexistent/x.pdf")));
        assert!(matches!(
            inbound.as_slice(),
            [Inbound::Msg(Msg::DragEntered), Inbound::Msg(Msg::DragLeft)]
        ));
    }
}
