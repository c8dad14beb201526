use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    ChangeLanguageRequest, ChangeLanguageResponse, CreateMusicResponse, MultipartForm,
    SubmissionResult,
};
use std::rc::Rc;
use tracing::{debug, info};

/// Result of posting the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateMusicOutcome {
    /// The server redirected (typically to its login page); navigate there.
    Redirect(String),
    Completed(SubmissionResult),
}

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the server to remember `code` for the session.
    ///
    /// Any JSON body is returned as-is; callers decide what a non-success
    /// status means. Bodies that are not JSON surface as `ApiError::Decode`.
    pub async fn change_language(&self, code: &str) -> Result<ChangeLanguageResponse, ApiError> {
        debug!("api.change_language: code={code}");
        let body = serde_json::to_value(ChangeLanguageRequest {
            language: code.to_string(),
        })?;
        let raw = self
            .transport
            .post_json(&self.config.change_language_url(), &body)
            .await?;
        let resp: ChangeLanguageResponse = raw.json()?;
        debug!(
            "api.change_language: status={} success={}",
            raw.status,
            resp.is_success()
        );
        Ok(resp)
    }

    /// Submit the creation form. Redirects win over bodies; a body that is
    /// not declared as JSON is an error.
    pub async fn create_music(&self, form: MultipartForm) -> Result<CreateMusicOutcome, ApiError> {
        debug!(
            "api.create_music: mode={}",
            form.field("mode").unwrap_or("<none>")
        );
        let raw = self
            .transport
            .post_multipart(
                &self.config.create_music_url(),
                form,
                &[
                    ("Accept", "application/json"),
                    ("X-Requested-With", "XMLHttpRequest"),
                ],
            )
            .await?;

        if let Some(target) = &raw.redirected_to {
            info!("api.create_music: redirected to {target}");
            return Ok(CreateMusicOutcome::Redirect(target.clone()));
        }
        if !raw.is_json() {
            return Err(ApiError::UnexpectedResponse);
        }
        let resp: CreateMusicResponse = raw.json()?;
        Ok(CreateMusicOutcome::Completed(resp.into()))
    }
}
