use anyhow::{Context, Result};
use arboard::Clipboard;

/// Somewhere copied text can be written.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    /// Returns `None` on hosts without a usable clipboard (headless, no display).
    pub fn detect() -> Option<Self> {
        match Clipboard::new() {
            Ok(inner) => Some(Self { inner }),
            Err(err) => {
                tracing::debug!(target: "clipboard", error = %err, "system clipboard unavailable");
                None
            }
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .context("failed to write to system clipboard")
    }
}
