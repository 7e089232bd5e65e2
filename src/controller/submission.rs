use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::time::{sleep, Instant};

use crate::{
    classifier::{Classifier, TransportError},
    config::{AppConfig, UploadConfig},
    domain::{SelectedFile, Severity, SubmissionInput, UiState},
    infrastructure::{
        clipboard::ClipboardSink,
        notifier::{Notification, Notifier},
    },
};

use super::{
    feedback::CopyFeedback,
    validation::{resolve_input, validate_file, ValidationError},
};

/// The widget that shows the picked file; cleared alongside the controller.
pub trait FileSelection {
    fn clear(&mut self);
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub deadline: Duration,
    pub upload: UploadConfig,
    pub copied_duration: Duration,
}

impl From<&AppConfig> for ControllerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            deadline: config.api.request_timeout,
            upload: config.upload.clone(),
            copied_duration: config.feedback.copied_duration,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Owns the form inputs and the rendered [`UiState`].
pub struct SubmissionController<C> {
    classifier: C,
    notifier: Arc<dyn Notifier>,
    clipboard: Option<Box<dyn ClipboardSink>>,
    settings: ControllerSettings,
    state: UiState,
    text: String,
    file: Option<SelectedFile>,
    copy_feedback: CopyFeedback,
}

/// Keeps `loading` set for exactly as long as the guard lives, including
/// when the submit future is dropped mid-request.
struct LoadingGuard<'a> {
    state: &'a mut UiState,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a mut UiState) -> Self {
        state.loading = true;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.loading = false;
    }
}

impl<C: Classifier> SubmissionController<C> {
    pub fn new(classifier: C, notifier: Arc<dyn Notifier>, settings: ControllerSettings) -> Self {
        let copy_feedback = CopyFeedback::new(settings.copied_duration);
        Self {
            classifier,
            notifier,
            clipboard: None,
            settings,
            state: UiState::default(),
            text: String::new(),
            file: None,
            copy_feedback,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Snapshot of what the view should render right now.
    pub fn state(&self) -> UiState {
        UiState {
            copied: self.copy_feedback.is_active(),
            ..self.state.clone()
        }
    }

    pub fn input_text(&self) -> &str {
        &self.text
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        self.state.error_message = None;
        match validate_file(&file, &self.settings.upload) {
            Ok(()) => {
                tracing::debug!(
                    target: "controller",
                    file = %file.name,
                    size = file.size,
                    mime = %file.mime_type,
                    "file selected"
                );
                self.file = Some(file);
                Ok(())
            }
            Err(err) => {
                match &err {
                    ValidationError::FileTooLarge { size, max_bytes } => tracing::info!(
                        target: "controller",
                        file = %file.name,
                        size,
                        max_bytes,
                        "file rejected: too large"
                    ),
                    ValidationError::UnsupportedFileType { name, mime_type } => tracing::info!(
                        target: "controller",
                        file = %name,
                        mime = %mime_type,
                        "file rejected: unsupported type"
                    ),
                    ValidationError::EmptyInput => {}
                }
                self.file = None;
                self.state.error_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn remove_file(&mut self, selection: Option<&mut dyn FileSelection>) {
        self.file = None;
        if let Some(selection) = selection {
            selection.clear();
        }
    }

    pub fn reset(&mut self, selection: Option<&mut dyn FileSelection>) {
        self.text.clear();
        self.file = None;
        self.state.category = None;
        self.state.severity = None;
        self.state.suggested_reply = None;
        self.state.error_message = None;
        if let Some(selection) = selection {
            selection.clear();
        }
    }

    /// Sends the current input for classification.
    ///
    /// Validation problems land in `error_message`; anything after dispatch
    /// raises one generic toast. The request is raced against the configured
    /// deadline and dropped if it loses, so a late answer never reaches the
    /// state.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        self.state.error_message = None;
        self.state.category = None;
        self.state.severity = None;
        self.state.suggested_reply = None;

        let input = match resolve_input(&self.text, self.file.as_ref()) {
            Ok(input) => input,
            Err(err) => {
                self.state.error_message = Some(err.to_string());
                return Err(err.into());
            }
        };
        let kind = match input {
            SubmissionInput::File(_) => "file",
            SubmissionInput::Text(_) => "text",
        };

        let deadline = self.settings.deadline;
        let started = Instant::now();
        let guard = LoadingGuard::start(&mut self.state);

        let outcome = tokio::select! {
            res = self.classifier.classify(input) => res,
            _ = sleep(deadline) => Err(TransportError::Timeout(deadline)),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                let severity = Severity::for_category(&result.category);
                tracing::info!(
                    target: "controller",
                    kind,
                    category = %result.category,
                    severity = severity.map(|s| s.label()),
                    elapsed_ms,
                    "classification received"
                );
                guard.state.severity = severity;
                guard.state.category = Some(result.category);
                guard.state.suggested_reply = Some(result.reply);
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    target: "controller",
                    kind,
                    error = %err,
                    elapsed_ms,
                    "classification failed"
                );
                self.notifier.notify(Notification::classification_failed());
                Err(err.into())
            }
        }
    }

    /// Copies `text` (or an empty string) and flips the `copied` indicator.
    /// Does nothing when no clipboard is available.
    pub fn copy_to_clipboard(&mut self, text: Option<&str>) {
        let Some(clipboard) = self.clipboard.as_mut() else {
            tracing::debug!(target: "clipboard", "copy skipped; no clipboard available");
            return;
        };
        match clipboard.write_text(text.unwrap_or_default()) {
            Ok(()) => self.copy_feedback.mark(),
            Err(err) => {
                tracing::warn!(target: "clipboard", error = %err, "copy failed");
            }
        }
    }

    pub async fn copy_settled(&self) {
        self.copy_feedback.settled().await;
    }
}
