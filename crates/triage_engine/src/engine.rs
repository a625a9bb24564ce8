use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use engine_logging::{engine_debug, engine_error, engine_info};
use triage_core::{ClassificationRequest, IntakeId};

use crate::service::{ReqwestTriageService, ServiceSettings, TriageService};
use crate::{decode_text, DecodeError, EngineEvent, FailureKind, ServiceError};

enum EngineCommand {
    DecodeText {
        intake: IntakeId,
        filename: String,
        bytes: Vec<u8>,
    },
    ExtractPdf {
        intake: IntakeId,
        filename: String,
        bytes: Vec<u8>,
    },
    Classify {
        request: ClassificationRequest,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build service client: {0}")]
    Service(#[from] ServiceError),
}

/// Runs service calls on a background thread and reports back through [`EngineEvent`]s.
///
/// Every command produces exactly one event, even when the task running it panics.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let service = ReqwestTriageService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn TriageService>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("triage-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
            engine_debug!("engine command channel closed; shutting down");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn decode_text(&self, intake: IntakeId, filename: impl Into<String>, bytes: Vec<u8>) {
        self.send(EngineCommand::DecodeText {
            intake,
            filename: filename.into(),
            bytes,
        });
    }

    pub fn extract_pdf(&self, intake: IntakeId, filename: impl Into<String>, bytes: Vec<u8>) {
        self.send(EngineCommand::ExtractPdf {
            intake,
            filename: filename.into(),
            bytes,
        });
    }

    pub fn classify(&self, request: ClassificationRequest) {
        self.send(EngineCommand::Classify { request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_error!("engine thread is gone; command dropped");
        }
    }
}

/// Sends `fallback` when dropped before [`CompletionGuard::complete`] ran.
struct CompletionGuard {
    event_tx: mpsc::Sender<EngineEvent>,
    fallback: Option<EngineEvent>,
}

impl CompletionGuard {
    fn new(event_tx: mpsc::Sender<EngineEvent>, fallback: EngineEvent) -> Self {
        Self {
            event_tx,
            fallback: Some(fallback),
        }
    }

    fn complete(mut self, event: EngineEvent) {
        self.fallback = None;
        let _ = self.event_tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            engine_error!("engine task ended without a result; reporting {:?}", event);
            let _ = self.event_tx.send(event);
        }
    }
}

fn cancelled() -> ServiceError {
    ServiceError::new(FailureKind::Cancelled, "task ended without a result")
}

async fn handle_command(
    service: &dyn TriageService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::DecodeText {
            intake,
            filename,
            bytes,
        } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::TextDecoded {
                    intake,
                    filename: filename.clone(),
                    result: Err(DecodeError::Interrupted),
                },
            );
            let result = match tokio::task::spawn_blocking(move || decode_text(&bytes)).await {
                Ok(decoded) => decoded.map(|decoded| {
                    engine_debug!("decoded {} as {}", filename, decoded.encoding_label);
                    decoded.text
                }),
                Err(_) => Err(DecodeError::Interrupted),
            };
            guard.complete(EngineEvent::TextDecoded {
                intake,
                filename,
                result,
            });
        }
        EngineCommand::ExtractPdf {
            intake,
            filename,
            bytes,
        } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::PdfExtracted {
                    intake,
                    filename: filename.clone(),
                    result: Err(cancelled()),
                },
            );
            engine_info!("extracting text from {} ({} bytes)", filename, bytes.len());
            let content_base64 = STANDARD.encode(&bytes);
            let result = service.extract_pdf_text(&content_base64, &filename).await;
            guard.complete(EngineEvent::PdfExtracted {
                intake,
                filename,
                result,
            });
        }
        EngineCommand::Classify { request } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::ClassificationCompleted {
                    result: Err(cancelled()),
                },
            );
            engine_info!(
                "classifying {} ({} chars)",
                request.filename,
                request.content.chars().count()
            );
            let result = service.classify(&request).await;
            guard.complete(EngineEvent::ClassificationCompleted { result });
        }
    }
}
