use std::collections::HashMap;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    ZhCn,
    ZhTw,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::ZhCn, Lang::ZhTw];

    /// Used when nothing has been persisted yet.
    pub const DEFAULT: Lang = Lang::ZhCn;

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::ZhCn => "zh_CN",
            Lang::ZhTw => "zh_TW",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::ZhCn => "简体中文",
            Lang::ZhTw => "繁體中文",
        }
    }

    /// Lenient parse for browser-style tags (`zh-TW`, `en-US`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "en" | "en_us" | "en_gb" => Some(Lang::En),
            "zh_cn" | "zh_hans" | "zh" => Some(Lang::ZhCn),
            "zh_tw" | "zh_hant" | "zh_hk" => Some(Lang::ZhTw),
            _ => None,
        }
    }
}

/// Name shown in the language status element; unknown codes show as-is.
pub fn display_name_for(code: &str) -> String {
    Lang::ALL
        .iter()
        .find(|lang| lang.code() == code)
        .map(|lang| lang.display_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

// key, en, zh_CN, zh_TW
const CATALOG: &[(&str, &str, &str, &str)] = &[
    // Nav / common
    ("app.name", "Music Studio", "音乐工作室", "音樂工作室"),
    ("nav.create", "Create", "创作", "創作"),
    ("lang.label", "Language", "语言", "語言"),
    // Studio page
    ("studio.title", "Create music", "创作音乐", "創作音樂"),
    (
        "studio.subtitle",
        "Pick a style and a mood, or fine-tune every parameter in advanced mode.",
        "选择风格与情绪，或在高级模式中调整每个参数。",
        "選擇風格與情緒，或在進階模式中調整每個參數。",
    ),
    ("mode.simple", "Simple", "简单模式", "簡單模式"),
    ("mode.advanced", "Advanced", "高级模式", "進階模式"),
    ("mode.switch_title", "Switch form mode", "切换表单模式", "切換表單模式"),
    // Form fields
    ("form.style", "Style", "风格", "風格"),
    ("style.pop", "Pop", "流行", "流行"),
    ("style.rock", "Rock", "摇滚", "搖滾"),
    ("style.jazz", "Jazz", "爵士", "爵士"),
    ("style.classical", "Classical", "古典", "古典"),
    ("style.electronic", "Electronic", "电子", "電子"),
    ("form.mood", "Mood", "情绪", "情緒"),
    ("mood.happy", "Happy", "快乐", "快樂"),
    ("mood.sad", "Sad", "悲伤", "悲傷"),
    ("mood.energetic", "Energetic", "活力", "活力"),
    ("mood.calm", "Calm", "平静", "平靜"),
    ("mood.romantic", "Romantic", "浪漫", "浪漫"),
    ("mood.mysterious", "Mysterious", "神秘", "神秘"),
    ("form.tempo", "Tempo", "速度", "速度"),
    ("form.duration", "Duration (seconds)", "时长（秒）", "時長（秒）"),
    ("form.chord_progression", "Chord progression", "和弦进行", "和弦進行"),
    (
        "form.chord_progression_ph",
        "e.g. C G Am F",
        "例如：C G Am F",
        "例如：C G Am F",
    ),
    (
        "form.chord_progression_title",
        "Space-separated chord symbols",
        "以空格分隔的和弦符号",
        "以空格分隔的和弦符號",
    ),
    ("form.incomplete_track", "Continue a track", "续写音轨", "續寫音軌"),
    ("form.choose_file", "Choose file", "选择文件", "選擇檔案"),
    ("form.no_file_chosen", "No file chosen", "未选择文件", "未選擇檔案"),
    ("form.clear_file", "Remove file", "移除文件", "移除檔案"),
    ("form.create", "Create music", "生成音乐", "生成音樂"),
    ("form.creating", "Creating...", "生成中...", "生成中..."),
    // Submission feedback
    ("music.created", "Music created successfully", "音乐生成成功", "音樂生成成功"),
    (
        "error.create_failed",
        "An error occurred while generating music",
        "生成音乐时发生错误",
        "生成音樂時發生錯誤",
    ),
    (
        "error.unexpected_response",
        "Not signed in, or the server returned a non-JSON response",
        "未登录或服务器返回了非 JSON 响应",
        "未登入或伺服器返回了非 JSON 回應",
    ),
];

/// Translate a key for a given language from the built-in catalog.
/// Falls back to English, then to the key itself.
pub fn t(lang: Lang, key: &str) -> String {
    let Some(row) = CATALOG.iter().find(|row| row.0 == key) else {
        return key.to_string();
    };
    let value = match lang {
        Lang::En => row.1,
        Lang::ZhCn => row.2,
        Lang::ZhTw => row.3,
    };
    let value = if value.is_empty() { row.1 } else { value };
    value.to_string()
}

/// language code -> translation key -> localized string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    languages: HashMap<String, HashMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every supported language with every catalog key.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for lang in Lang::ALL {
            for row in CATALOG {
                table.insert(lang.code(), row.0, t(lang, row.0));
            }
        }
        table
    }

    /// Parse a page-supplied table: `{"en": {"key": "value"}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            languages: serde_json::from_str(json)?,
        })
    }

    pub fn insert(
        &mut self,
        code: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.languages
            .entry(code.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn supports(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    pub fn language(&self, code: &str) -> Option<&HashMap<String, String>> {
        self.languages.get(code)
    }

    pub fn get(&self, code: &str, key: &str) -> Option<&str> {
        self.languages
            .get(code)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}
