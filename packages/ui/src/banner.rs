/// Dismissible feedback shown at the top of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }

    /// Full class list of the banner container (Bootstrap alert markup).
    pub fn class_list(self) -> &'static str {
        match self {
            BannerKind::Success => "alert alert-success alert-dismissible fade show mt-3",
            BannerKind::Error => "alert alert-danger alert-dismissible fade show mt-3",
        }
    }
}

pub const CLOSE_BUTTON_CLASS: &str = "btn-close";
pub const DISMISS_ATTR: &str = "data-bs-dismiss";
