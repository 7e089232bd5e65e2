use super::classification::Severity;

/// Everything the view renders. Only the controller mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub loading: bool,
    pub error_message: Option<String>,
    pub category: Option<String>,
    pub severity: Option<Severity>,
    pub suggested_reply: Option<String>,
    pub copied: bool,
}
