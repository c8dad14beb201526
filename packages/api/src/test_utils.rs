//! Scripted transport for tests of anything that talks to the studio endpoints.

use crate::error::ApiError;
use crate::transport::{RawResponse, Transport};
use crate::types::MultipartForm;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RecordedBody,
}

/// Replays queued responses in order and records every request.
/// An exhausted queue answers with a network error.
#[derive(Default)]
pub struct StubTransport {
    responses: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<RawResponse, ApiError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn next(&self) -> Result<RawResponse, ApiError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no stubbed response".to_string())))
    }
}

#[async_trait(?Send)]
impl Transport for StubTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: Vec::new(),
            body: RecordedBody::Json(body.clone()),
        });
        self.next()
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: RecordedBody::Multipart(form),
        });
        self.next()
    }
}

pub fn json_response(value: serde_json::Value) -> RawResponse {
    RawResponse {
        status: 200,
        redirected_to: None,
        content_type: Some("application/json".to_string()),
        body: value.to_string().into_bytes(),
    }
}

pub fn html_response(body: &str) -> RawResponse {
    RawResponse {
        status: 200,
        redirected_to: None,
        content_type: Some("text/html; charset=utf-8".to_string()),
        body: body.as_bytes().to_vec(),
    }
}
