use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::Severity;

pub const GENERIC_ERROR_SUMMARY: &str = "Erro";
pub const GENERIC_ERROR_DETAIL: &str =
    "Não foi possível processar o e-mail. Tente novamente mais tarde.";

/// A toast-style message raised outside the inline form errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            raised_at: Utc::now(),
        }
    }

    /// The one opaque message shown for every failed classification.
    pub fn classification_failed() -> Self {
        Self::new(Severity::Danger, GENERIC_ERROR_SUMMARY, GENERIC_ERROR_DETAIL)
    }

    pub fn clipboard_unavailable() -> Self {
        Self::new(
            Severity::Warn,
            "Aviso",
            "Área de transferência indisponível; copie a resposta manualmente.",
        )
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Collects toasts until the front end drains and renders them.
#[derive(Debug, Default)]
pub struct ToastBoard {
    pending: Mutex<Vec<Notification>>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            target: "notify",
            severity = notification.severity.label(),
            summary = %notification.summary,
            raised_at = %notification.raised_at,
            "toast raised"
        );
        self.pending.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_board() {
        let board = ToastBoard::new();
        board.notify(Notification::classification_failed());
        board.notify(Notification::clipboard_unavailable());
        assert!(!board.is_empty());

        let drained = board.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].summary, "Erro");
        assert_eq!(drained[0].severity, Severity::Danger);
        assert_eq!(drained[1].severity, Severity::Warn);
        assert!(board.is_empty());
    }
}
