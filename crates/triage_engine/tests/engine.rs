use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use triage_core::{ClassificationRequest, ClassificationResult};
use triage_engine::{
    DecodeError, EngineEvent, EngineHandle, FailureKind, ServiceError, ServiceSettings,
    TriageService,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn request(content: &str) -> ClassificationRequest {
    ClassificationRequest {
        filename: "mail.txt".to_string(),
        file_type: "pdf_or_text".to_string(),
        content: content.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_command_base64_encodes_pdf_bytes() {
    engine_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-text-from-pdf"))
        .and(body_json(json!({
            "content_base64": "JVBERi0xLjQ=",
            "filename": "invoice.pdf",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"text_content": "Invoice overdue"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(ServiceSettings {
        api_base: server.uri(),
        ..ServiceSettings::default()
    })
    .unwrap();
    engine.extract_pdf(3, "invoice.pdf", b"%PDF-1.4".to_vec());

    let event = engine.recv_timeout(WAIT).expect("event");
    assert_eq!(
        event,
        EngineEvent::PdfExtracted {
            intake: 3,
            filename: "invoice.pdf".to_string(),
            result: Ok("Invoice overdue".to_string()),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn decode_command_reports_text() {
    let engine = EngineHandle::new(ServiceSettings::default()).unwrap();
    engine.decode_text(1, "mail.txt", "Olá".as_bytes().to_vec());

    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::TextDecoded {
            intake,
            filename,
            result,
        } => {
            assert_eq!(intake, 1);
            assert_eq!(filename, "mail.txt");
            assert_eq!(result, Ok("Olá".to_string()));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(engine.try_recv().is_none());
}

struct PanickingService;

#[async_trait::async_trait]
impl TriageService for PanickingService {
    async fn extract_pdf_text(
        &self,
        _content_base64: &str,
        _filename: &str,
    ) -> Result<String, ServiceError> {
        panic!("extractor blew up");
    }

    async fn classify(
        &self,
        _request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ServiceError> {
        panic!("classifier blew up");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn panicking_task_still_reports_completion() {
    let engine = EngineHandle::with_service(Arc::new(PanickingService)).unwrap();

    engine.classify(request("Hi"));
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::ClassificationCompleted { result } => {
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.extract_pdf(9, "a.pdf", b"%PDF".to_vec());
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::PdfExtracted { intake, result, .. } => {
            assert_eq!(intake, 9);
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn decode_error_is_comparable() {
    let event = EngineEvent::TextDecoded {
        intake: 1,
        filename: "x.txt".to_string(),
        result: Err(DecodeError::Interrupted),
    };
    assert_eq!(event.clone(), event);
}
