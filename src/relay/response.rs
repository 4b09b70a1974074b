use serde::{Deserialize, Serialize};
use serde_json::Value;

const PDF_CONTENT_TYPE: &str = "application/pdf";

const SERVICE_FAILED: &str = "The highlighting service failed.";
const NO_DETAILS: &str = "No technical details.";
const UNEXPECTED_RESPONSE: &str = "The highlighting service returned an unexpected response.";

/// What came back from the highlighting service, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Raw `X-Pages-Found` header value.
    pub pages_found: Option<String>,
    pub body: Vec<u8>,
}

/// A highlighted PDF ready to hand back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedPdf {
    /// Suggested download name.
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Raw `X-Pages-Found` value, forwarded untouched.
    pub pages_found: Option<String>,
}

impl HighlightedPdf {
    /// Page numbers listed in `X-Pages-Found`, if the header was a JSON array of numbers.
    pub fn pages(&self) -> Option<Vec<u32>> {
        let raw = self.pages_found.as_deref()?;
        serde_json::from_str(raw).ok()
    }
}

/// Structured error payload relayed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayFailure {
    pub success: bool,
    pub message: String,
    pub details: String,
}

impl RelayFailure {
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        RelayFailure {
            success: false,
            message: message.into(),
            details: details.into(),
        }
    }

    /// Failure synthesized when the service could not be reached at all.
    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self::new(UNEXPECTED_RESPONSE, format!("transport error: {error}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOutcome {
    Pdf(HighlightedPdf),
    Failed(RelayFailure),
}

impl HighlightOutcome {
    /// HTTP status to answer the original caller with.
    pub fn status_code(&self) -> u16 {
        match self {
            HighlightOutcome::Pdf(_) => 200,
            HighlightOutcome::Failed(_) => 500,
        }
    }
}

/// Turn the service's reply into a PDF or a structured failure.
///
/// Only a 200 carrying `application/pdf` counts as success. A JSON body is
/// mined for `error` and `details`; anything else is reported verbatim.
pub fn interpret(response: RemoteResponse, source_file_name: &str) -> HighlightOutcome {
    let is_pdf = response
        .content_type
        .as_deref()
        .map_or(false, |ct| ct.contains(PDF_CONTENT_TYPE));

    if response.status == 200 && is_pdf {
        return HighlightOutcome::Pdf(HighlightedPdf {
            file_name: format!("highlighted_{source_file_name}"),
            bytes: response.body,
            pages_found: response.pages_found,
        });
    }

    let failure = match serde_json::from_slice::<Value>(&response.body) {
        Ok(json) => RelayFailure::new(
            json.get("error")
                .and_then(Value::as_str)
                .unwrap_or(SERVICE_FAILED),
            match json.get("details") {
                Some(Value::String(details)) => details.clone(),
                Some(Value::Null) | None => NO_DETAILS.to_string(),
                Some(other) => other.to_string(),
            },
        ),
        Err(_) => RelayFailure::new(
            UNEXPECTED_RESPONSE,
            format!(
                "HTTP status: {} | Response: {}",
                response.status,
                String::from_utf8_lossy(&response.body)
            ),
        ),
    };

    HighlightOutcome::Failed(failure)
}
