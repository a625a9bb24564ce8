use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use triage_core::{ClassificationRequest, ClassificationResult};
use url::Url;

use crate::{FailureKind, ServiceError};

pub const EXTRACT_PDF_PATH: &str = "extract-text-from-pdf";
pub const CLASSIFY_PATH: &str = "classify-email";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Prefix the endpoint paths are joined onto.
    pub api_base: String,
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the request time bounded only by the network stack.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000/".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The two remote calls the client depends on.
#[async_trait::async_trait]
pub trait TriageService: Send + Sync {
    async fn extract_pdf_text(
        &self,
        content_base64: &str,
        filename: &str,
    ) -> Result<String, ServiceError>;

    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ServiceError>;
}

#[derive(Serialize)]
struct ExtractRequestBody<'a> {
    content_base64: &'a str,
    filename: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponseBody {
    text_content: String,
}

#[derive(Serialize)]
struct ClassifyRequestBody<'a> {
    filename: &'a str,
    #[serde(rename = "fileType")]
    file_type: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponseBody {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    suggested_reply: Option<String>,
}

impl From<ClassifyResponseBody> for ClassificationResult {
    fn from(body: ClassifyResponseBody) -> Self {
        Self {
            category: body.category.unwrap_or_default(),
            reasoning: body.reasoning.unwrap_or_default(),
            suggested_reply: body.suggested_reply.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestTriageService {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTriageService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base = parse_base(&settings.api_base)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| ServiceError::new(FailureKind::MalformedBody, err.to_string()))?;
        engine_debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("POST {} answered {}", url, status);
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ServiceError::new(FailureKind::MalformedBody, err.to_string()))
    }
}

#[async_trait::async_trait]
impl TriageService for ReqwestTriageService {
    async fn extract_pdf_text(
        &self,
        content_base64: &str,
        filename: &str,
    ) -> Result<String, ServiceError> {
        let body = ExtractRequestBody {
            content_base64,
            filename,
        };
        let response: ExtractResponseBody = self.post_json(EXTRACT_PDF_PATH, &body).await?;
        Ok(response.text_content)
    }

    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ServiceError> {
        let body = ClassifyRequestBody {
            filename: &request.filename,
            file_type: &request.file_type,
            content: &request.content,
        };
        let response: ClassifyResponseBody = self.post_json(CLASSIFY_PATH, &body).await?;
        Ok(response.into())
    }
}

/// Parse the API base so that relative endpoint paths append to it.
fn parse_base(api_base: &str) -> Result<Url, ServiceError> {
    let mut base = api_base.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base)
        .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, format!("{api_base}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ServiceError::new(
            FailureKind::InvalidUrl,
            format!("{api_base}: not a base url"),
        ));
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::MalformedBody, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base: &str) -> ReqwestTriageService {
        ReqwestTriageService::new(ServiceSettings {
            api_base: base.to_string(),
            ..ServiceSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_join_onto_base_with_or_without_slash() {
        assert_eq!(
            service("http://localhost:8000").endpoint(CLASSIFY_PATH).unwrap().as_str(),
            "http://localhost:8000/classify-email"
        );
        assert_eq!(
            service("http://localhost:8000/api")
                .endpoint(EXTRACT_PDF_PATH)
                .unwrap()
                .as_str(),
            "http://localhost:8000/api/extract-text-from-pdf"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        let err = ReqwestTriageService::new(ServiceSettings {
            api_base: "not a url".to_string(),
            ..ServiceSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn classify_body_uses_wire_field_names() {
        let body = ClassifyRequestBody {
            filename: "textarea_input",
            file_type: "text/plain",
            content: "Hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"filename": "textarea_input", "fileType": "text/plain", "content": "Hi"})
        );
    }

    #[test]
    fn null_or_missing_fields_become_empty() {
        let body: ClassifyResponseBody =
            serde_json::from_str(r#"{"category": null, "reasoning": "r"}"#).unwrap();
        let result = ClassificationResult::from(body);
        assert_eq!(result.category, "");
        assert_eq!(result.reasoning, "r");
        assert_eq!(result.suggested_reply, "");
    }
}
