use crate::error::ApiError;
use crate::types::MultipartForm;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// What the client needs to know about an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL when the request was redirected.
    pub redirected_to: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// HTTP seam. Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait Transport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, ApiError>;

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, ApiError>;
}

/// `reqwest` transport; uses `fetch` on wasm and hyper elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, ApiError> {
        debug!("transport.post_json: url={url}");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(url, response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, ApiError> {
        let (fields, files) = form.into_parts();
        debug!(
            "transport.post_multipart: url={url} fields={} files={}",
            fields.len(),
            files.len()
        );

        let mut multipart = reqwest::multipart::Form::new();
        for (name, value) in fields {
            multipart = multipart.text(name, value);
        }
        for file in files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.content_type.as_deref().filter(|m| !m.is_empty()) {
                part = part
                    .mime_str(mime)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            }
            multipart = multipart.part(file.field, part);
        }

        let mut request = self.client.post(url).multipart(multipart);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(url, response).await
    }
}

async fn read_response(
    requested: &str,
    response: reqwest::Response,
) -> Result<RawResponse, ApiError> {
    let status = response.status().as_u16();
    // Redirects are followed transparently; a different final URL is the only trace left.
    let redirected_to = match reqwest::Url::parse(requested) {
        Ok(url) if &url == response.url() => None,
        _ => Some(response.url().to_string()),
    };
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?
        .to_vec();

    debug!(
        "transport.read_response: status={status} redirected={} body_len={}",
        redirected_to.is_some(),
        body.len()
    );
    Ok(RawResponse {
        status,
        redirected_to,
        content_type,
        body,
    })
}
