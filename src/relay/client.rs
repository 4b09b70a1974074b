use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use super::response::RemoteResponse;
use crate::config::HighlighterConfig;
use crate::document::CodeSet;

const PAGES_FOUND_HEADER: &str = "x-pages-found";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One PDF plus the codes to highlight in it.
#[derive(Debug, Clone)]
pub struct HighlightRequest {
    pub file_name: String,
    pub pdf: Vec<u8>,
    pub codes: CodeSet,
}

/// Transport to the remote highlighting service.
pub trait Highlighter {
    fn send(&self, request: &HighlightRequest) -> Result<RemoteResponse, RelayError>;
}

impl<H: Highlighter + ?Sized> Highlighter for &H {
    fn send(&self, request: &HighlightRequest) -> Result<RemoteResponse, RelayError> {
        (**self).send(request)
    }
}

/// Multipart HTTP client for the highlighting service.
///
/// Sends the codes as the `specific_codes` text field (one per line) and the
/// PDF as the `pdf_file` part.
pub struct HttpHighlighter {
    client: Client,
    url: String,
}

impl HttpHighlighter {
    pub fn new(config: &HighlighterConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl Highlighter for HttpHighlighter {
    fn send(&self, request: &HighlightRequest) -> Result<RemoteResponse, RelayError> {
        let part = Part::bytes(request.pdf.clone())
            .file_name(request.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .text("specific_codes", request.codes.join_lines())
            .part("pdf_file", part);

        tracing::debug!(
            url = %self.url,
            file = %request.file_name,
            codes = request.codes.len(),
            "sending highlight request"
        );

        let response = self.client.post(&self.url).multipart(form).send()?;

        let status = response.status().as_u16();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE.as_str());
        let pages_found = header(PAGES_FOUND_HEADER);
        let body = response.bytes()?.to_vec();

        Ok(RemoteResponse {
            status,
            content_type,
            pages_found,
            body,
        })
    }
}
