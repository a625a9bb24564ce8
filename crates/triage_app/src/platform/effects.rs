use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use triage_core::{Effect, Msg};
use triage_engine::{EngineEvent, EngineHandle};

use super::app::Inbound;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Hands core effects to the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Inbound>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DecodeText {
                    intake,
                    filename,
                    bytes,
                } => {
                    engine_debug!("DecodeText intake={} file={}", intake, filename);
                    self.engine.decode_text(intake, filename, bytes);
                }
                Effect::ExtractPdf {
                    intake,
                    filename,
                    bytes,
                } => {
                    engine_info!(
                        "ExtractPdf intake={} file={} bytes={}",
                        intake,
                        filename,
                        bytes.len()
                    );
                    self.engine.extract_pdf(intake, filename, bytes);
                }
                Effect::Classify { request } => {
                    engine_info!(
                        "Classify file={} type={} content_len={}",
                        request.filename,
                        request.file_type,
                        request.content.len()
                    );
                    self.engine.classify(request);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Inbound>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.recv_timeout(EVENT_POLL) {
                Ok(event) => {
                    if msg_tx.send(Inbound::Msg(event_to_msg(event))).is_err() {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    engine_warn!("Engine event channel closed");
                    break;
                }
            }
        });
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TextDecoded {
            intake,
            filename,
            result,
        } => {
            if let Err(err) = &result {
                engine_warn!("Could not decode {}: {}", filename, err);
            }
            Msg::TextFileRead {
                intake,
                result: result.map_err(|err| err.to_string()),
            }
        }
        EngineEvent::PdfExtracted {
            intake,
            filename,
            result,
        } => {
            if let Err(err) = &result {
                engine_warn!("Text extraction failed for {}: {}", filename, err);
            }
            Msg::PdfTextExtracted {
                intake,
                result: result.map_err(|err| err.to_string()),
            }
        }
        EngineEvent::ClassificationCompleted { result } => {
            if let Err(err) = &result {
                engine_warn!("Classification failed: {}", err);
            }
            Msg::ClassificationFinished(result.map_err(|err| err.to_string()))
        }
    }
}
