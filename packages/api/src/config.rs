#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

/// Read `.env` into the process environment when running locally.
/// A missing file is fine; production sets real env vars.
#[cfg(feature = "server")]
pub fn load_dotenv() {
    if AppMode::from_env() == AppMode::Local || std::env::var("APP_MODE").is_err() {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("config.load_dotenv: no .env loaded: {e}");
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where the studio client talks to and what it persists under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub change_language_path: String,
    pub create_music_path: String,
    pub project_path_prefix: String,
    pub language_storage_key: String,
    pub fallback_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            change_language_path: "/auth/change_language".to_string(),
            create_music_path: "/create_music".to_string(),
            project_path_prefix: "/project".to_string(),
            language_storage_key: "language".to_string(),
            fallback_language: "zh_CN".to_string(),
        }
    }
}

impl ClientConfig {
    /// Native builds read `APP_BASE_URL`; wasm builds have no process env and
    /// should call `with_base_url` with the window origin instead.
    pub fn from_env() -> Self {
        match std::env::var("APP_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn change_language_url(&self) -> String {
        self.endpoint(&self.change_language_path)
    }

    pub fn create_music_url(&self) -> String {
        self.endpoint(&self.create_music_path)
    }

    /// Same-origin path of a project's page, used for navigation after creation.
    pub fn project_path(&self, project_id: &str) -> String {
        format!(
            "{}/{}",
            self.project_path_prefix.trim_end_matches('/'),
            urlencoding::encode(project_id)
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Bounds of the range inputs on the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    pub tempo_min: u32,
    pub tempo_max: u32,
    pub tempo_default: u32,
    pub duration_min: u32,
    pub duration_max: u32,
    pub duration_default: u32,
}

impl GenerationLimits {
    pub const DEFAULT: GenerationLimits = GenerationLimits {
        tempo_min: 60,
        tempo_max: 240,
        tempo_default: 120,
        duration_min: 10,
        duration_max: 300,
        duration_default: 60,
    };
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
