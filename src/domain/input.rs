use std::path::Path;

use anyhow::{Context, Result};

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A document picked by the user, held fully in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME_TYPE);
        Ok(Self::new(name, mime_type, bytes))
    }
}

/// The single input that goes out with a submission.
#[derive(Debug, Clone, Copy)]
pub enum SubmissionInput<'a> {
    Text(&'a str),
    File(&'a SelectedFile),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_path_guesses_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pedido.TXT");
        std::fs::write(&path, b"Preciso do extrato").unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "pedido.TXT");
        assert_eq!(file.size, 18);
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.bytes, b"Preciso do extrato");
    }

    #[tokio::test]
    async fn from_path_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzzunknown");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.mime_type, FALLBACK_MIME_TYPE);
    }

    #[tokio::test]
    async fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelectedFile::from_path(&dir.path().join("nope.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
