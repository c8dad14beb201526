use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Value of `status` that marks a successful response on both endpoints.
pub const STATUS_SUCCESS: &str = "success";

/// Which of the two creation forms is shown and submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    #[default]
    Simple,
    Advanced,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Simple => "simple",
            FormMode::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChangeLanguageResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl ChangeLanguageResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CreateMusicResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "project_id_from_json")]
    pub project_id: Option<String>,
}

/// Outcome of a music creation request that produced a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success {
        message: Option<String>,
        project_id: Option<String>,
    },
    Failure {
        message: Option<String>,
    },
}

impl From<CreateMusicResponse> for SubmissionResult {
    fn from(resp: CreateMusicResponse) -> Self {
        let message = resp.message.filter(|m| !m.trim().is_empty());
        if resp.status == STATUS_SUCCESS {
            SubmissionResult::Success {
                message,
                project_id: resp.project_id,
            }
        } else {
            SubmissionResult::Failure { message }
        }
    }
}

/// Any truthy `project_id` names the created project. `null`, `false`, `0`
/// and blank strings mean there is nothing to open.
fn project_id_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(project_id_from_value))
}

fn project_id_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => number_path_segment(&n),
        Value::Bool(true) => Some("true".to_string()),
        Value::Null | Value::Bool(false) => None,
        // Objects and arrays do not form a usable project path.
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_path_segment(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 || !f.is_finite() {
        return None;
    }
    // 42.0 renders as "42", like a JS number in a template string.
    if f.fract() == 0.0 && f.abs() < 1e15 {
        Some(format!("{}", f as i64))
    } else {
        Some(f.to_string())
    }
}

/// A file attached to a multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart payload built from the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field. Repeated names are kept, as a browser `FormData` would.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(&mut self, part: FilePart) -> &mut Self {
        self.files.push(part);
        self
    }

    /// First value recorded for `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn into_parts(self) -> (Vec<(String, String)>, Vec<FilePart>) {
        (self.fields, self.files)
    }
}
