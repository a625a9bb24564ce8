use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use triage_core::{update, AppState, Msg};
use triage_engine::EngineHandle;

use super::config::{load_config, AppConfig, API_BASE_ENV, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::input::{spawn_stdin_reader, HELP};
use super::logging;
use super::ui;
use super::ui::commands::RenderTarget;

/// Everything the main loop receives: messages for the core, or a request to exit.
#[derive(Debug)]
pub enum Inbound {
    Msg(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_problem) = match load_config(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let config = config.with_api_base_override(std::env::var(API_BASE_ENV).ok());

    logging::initialize(config.log_destination, logging::parse_level(&config.log_level));
    if let Some(err) = config_problem {
        engine_warn!("{}; using defaults", err);
    }
    engine_info!("Using classification service at {}", config.api_base);

    let engine = EngineHandle::new(config.service_settings()).context("starting engine")?;
    let (tx, rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(engine, tx.clone());
    let mut session = Session::new(runner, ui::terminal::TerminalTarget::stdout());

    println!("{HELP}");
    spawn_stdin_reader(tx);

    while let Ok(inbound) = rx.recv() {
        match inbound {
            Inbound::Msg(msg) => session.dispatch(msg),
            Inbound::Quit => break,
        }
    }
    engine_info!("Exiting");
    Ok(())
}

/// Owns the state, runs `update` for each message, executes effects and renders.
pub struct Session<T: RenderTarget> {
    state: AppState,
    runner: EffectRunner,
    target: T,
}

impl<T: RenderTarget> Session<T> {
    pub fn new(runner: EffectRunner, mut target: T) -> Self {
        let state = AppState::new();
        let mut commands = ui::layout::initial_commands();
        commands.extend(ui::render::render(&state.view()));
        target.execute(&commands);
        Self {
            state,
            runner,
            target,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.target.execute(&ui::render::render(&view));
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use serde_json::json;
    use triage_core::{FileSource, UiState, ANALYZE_LABEL};
    use triage_engine::ServiceSettings;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::platform::input::{translate, Command};
    use crate::platform::ui::commands::{ControlTree, UiCommand};
    use crate::platform::ui::constants::*;

    const WAIT: Duration = Duration::from_secs(5);

    #[derive(Default)]
    struct RecordingTarget {
        tree: ControlTree,
        batches: usize,
    }

    impl RenderTarget for RecordingTarget {
        fn execute(&mut self, commands: &[UiCommand]) {
            self.batches += 1;
            for command in commands {
                self.tree.apply(command);
            }
        }
    }

    struct Harness {
        session: Session<RecordingTarget>,
        rx: mpsc::Receiver<Inbound>,
    }

    impl Harness {
        fn new(api_base: String) -> Self {
            engine_logging::initialize_for_tests();
            let engine = EngineHandle::new(ServiceSettings {
                api_base,
                ..ServiceSettings::default()
            })
            .unwrap();
            let (tx, rx) = mpsc::channel();
            let runner = EffectRunner::new(engine, tx);
            Self {
                session: Session::new(runner, RecordingTarget::default()),
                rx,
            }
        }

        fn send(&mut self, msg: Msg) {
            self.session.dispatch(msg);
        }

        /// Dispatch the next message coming back from the engine.
        fn pump(&mut self) {
            match self.rx.recv_timeout(WAIT) {
                Ok(Inbound::Msg(msg)) => self.session.dispatch(msg),
                other => panic!("expected engine message, got {other:?}"),
            }
        }

        fn tree(&self) -> &ControlTree {
            &self.session.target().tree
        }
    }

    /// Mock server driven by its own runtime, so blocking test bodies never stall it.
    fn mock_backend() -> (tokio::runtime::Runtime, MockServer) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        (runtime, server)
    }

    fn closed_port_base() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn initial_render_shows_idle_ui() {
        let harness = Harness::new(closed_port_base());
        let tree = harness.tree();
        assert_eq!(harness.session.target().batches, 1);
        assert!(tree.is_shown(PANEL_UPLOAD_PROMPT));
        assert_eq!(tree.text(BUTTON_ANALYZE), ANALYZE_LABEL);
        assert!(tree.get(BUTTON_ANALYZE).unwrap().enabled);
    }

    #[test]
    fn typed_text_is_classified_and_rendered() {
        let (runtime, server) = mock_backend();
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path("/classify-email"))
                .and(body_json(json!({
                    "filename": "textarea_input",
                    "fileType": "text/plain",
                    "content": "Please reset my password",
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "category": "info_request",
                    "reasoning": "The sender asks for account help.",
                    "suggested_reply": "Use the reset link on the login page.",
                })))
                .expect(1)
                .mount(&server),
        );

        let mut harness = Harness::new(server.uri());
        harness.send(Msg::TextEdited("Please reset my password".to_string()));
        harness.send(Msg::AnalyzeClicked);
        assert!(!harness.tree().get(BUTTON_ANALYZE).unwrap().enabled);
        // A second click while in flight is swallowed.
        harness.send(Msg::AnalyzeClicked);

        harness.pump();
        let tree = harness.tree();
        assert_eq!(tree.text(LABEL_CATEGORY), "Information Request");
        assert_eq!(tree.text(LABEL_REASONING), "The sender asks for account help.");
        assert!(tree.get(BUTTON_ANALYZE).unwrap().enabled);
        assert_eq!(tree.text(BUTTON_ANALYZE), ANALYZE_LABEL);
        assert_eq!(harness.session.state().ui_state(), UiState::ResultShown);
    }

    #[test]
    fn dropped_pdf_is_extracted_then_classified() {
        let (runtime, server) = mock_backend();
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path("/extract-text-from-pdf"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({"text_content": "Invoice overdue"})),
                )
                .expect(1)
                .mount(&server),
        );
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path("/classify-email"))
                .and(body_json(json!({
                    "filename": "invoice.pdf",
                    "fileType": "pdf_or_text",
                    "content": "Invoice overdue",
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "category": "billing_issue",
                    "reasoning": "Overdue invoice.",
                    "suggested_reply": "We will check the payment.",
                })))
                .expect(1)
                .mount(&server),
        );

        let mut harness = Harness::new(server.uri());
        harness.send(Msg::DragEntered);
        assert!(harness.tree().get(PANEL_DROP_AREA).unwrap().highlighted);
        harness.send(Msg::FileChosen {
            filename: "invoice.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
            source: FileSource::Drop,
        });
        assert_eq!(harness.tree().text(INPUT_EMAIL_TEXT), "Extracting text from PDF...");
        assert_eq!(harness.tree().text(LABEL_FILE_NAME), "invoice.pdf");

        harness.pump();
        assert_eq!(harness.tree().text(INPUT_EMAIL_TEXT), "Invoice overdue");

        harness.send(Msg::AnalyzeClicked);
        harness.pump();
        assert_eq!(harness.tree().text(LABEL_CATEGORY), "Billing Issue");
        assert!(harness.tree().is_shown(PANEL_FILE_CONFIRMATION));
    }

    #[test]
    fn failed_extraction_reports_file_and_sends_nothing_else() {
        let (runtime, server) = mock_backend();
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path("/extract-text-from-pdf"))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount(&server),
        );
        runtime.block_on(
            Mock::given(method("POST"))
                .and(path("/classify-email"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server),
        );

        let mut harness = Harness::new(server.uri());
        harness.send(Msg::FileChosen {
            filename: "scan.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
            source: FileSource::Picker,
        });
        harness.pump();

        let tree = harness.tree();
        assert_eq!(tree.text(INPUT_EMAIL_TEXT), "Could not extract text from scan.pdf.");
        assert!(tree.is_shown(PANEL_UPLOAD_PROMPT));
        assert!(!tree.is_shown(PANEL_FILE_CONFIRMATION));

        harness.send(Msg::AnalyzeClicked);
        assert!(harness.tree().is_shown(PANEL_ERROR));
        assert!(harness.rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn classification_network_failure_keeps_input() {
        let mut harness = Harness::new(closed_port_base());
        harness.send(Msg::TextEdited("Server is down again".to_string()));
        harness.send(Msg::AnalyzeClicked);
        harness.pump();

        let tree = harness.tree();
        assert!(tree.is_shown(PANEL_ERROR));
        assert_eq!(
            tree.text(LABEL_ERROR),
            "The email could not be analyzed. Please try again."
        );
        assert!(tree.get(BUTTON_ANALYZE).unwrap().enabled);
        assert_eq!(tree.text(BUTTON_ANALYZE), ANALYZE_LABEL);
        assert_eq!(tree.text(INPUT_EMAIL_TEXT), "Server is down again");
        assert!(!tree.is_shown(PANEL_RESULT));
    }

    #[test]
    fn unsupported_file_resets_without_engine_traffic() {
        let mut harness = Harness::new(closed_port_base());
        harness.send(Msg::TextEdited("draft".to_string()));
        harness.send(Msg::FileChosen {
            filename: "photo.png".to_string(),
            media_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
            source: FileSource::Picker,
        });

        let tree = harness.tree();
        assert_eq!(tree.text(INPUT_EMAIL_TEXT), "");
        assert!(tree.is_shown(PANEL_UPLOAD_PROMPT));
        assert_eq!(
            tree.text(LABEL_ERROR),
            "Unsupported file type. Please use a .txt or .pdf file."
        );
        assert!(harness.rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn text_file_round_trips_through_engine() {
        let mut harness = Harness::new(closed_port_base());
        let content = "Olá,\r\nsegue o relatório.\n\tObrigado";
        harness.send(Msg::FileChosen {
            filename: "mail.txt".to_string(),
            media_type: "text/plain".to_string(),
            bytes: content.as_bytes().to_vec(),
            source: FileSource::Picker,
        });
        harness.pump();
        assert_eq!(harness.tree().text(INPUT_EMAIL_TEXT), content);
        assert_eq!(harness.session.state().text(), content);
    }

    #[test]
    fn typed_line_after_loaded_file_extends_its_text() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("mail.txt");
        std::fs::write(&file, "Original loaded body").unwrap();

        let mut harness = Harness::new(closed_port_base());
        for inbound in translate(Command::Open(file)) {
            if let Inbound::Msg(msg) = inbound {
                harness.send(msg);
            }
        }
        harness.pump();
        for inbound in translate(Command::Line("PS: thanks".to_string())) {
            if let Inbound::Msg(msg) = inbound {
                harness.send(msg);
            }
        }

        assert_eq!(
            harness.tree().text(INPUT_EMAIL_TEXT),
            "Original loaded body\nPS: thanks"
        );
        assert_eq!(harness.tree().text(LABEL_FILE_NAME), "mail.txt");
    }
}
