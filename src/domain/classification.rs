use serde::{Deserialize, Serialize};

/// Classification returned by the backend for one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub reply: String,
}

/// Visual hint attached to a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Danger,
}

impl Severity {
    /// Maps known category labels; unknown labels get no hint.
    pub fn for_category(category: &str) -> Option<Self> {
        match category.trim().to_lowercase().as_str() {
            "produtivo" => Some(Severity::Success),
            "improdutivo" => Some(Severity::Info),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Danger => "danger",
        }
    }
}
