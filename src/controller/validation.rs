use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{
    config::UploadConfig,
    domain::{SelectedFile, SubmissionInput},
};

pub const ALLOWED_MIME_TYPES: [&str; 2] = ["text/plain", "application/pdf"];

static ALLOWED_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(txt|pdf)$").expect("valid extension regex"));

const BYTES_PER_KB: u64 = 1024;
const BYTES_PER_MB: u64 = 1024 * BYTES_PER_KB;

/// Upload limit as shown to users, rounded up so it never reads as zero.
fn limit_label(max_bytes: &u64) -> String {
    if *max_bytes >= BYTES_PER_MB {
        format!("{} MB", max_bytes.div_ceil(BYTES_PER_MB))
    } else {
        format!("{} KB", max_bytes.div_ceil(BYTES_PER_KB))
    }
}

/// Local input problems. `Display` is the text shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Insira texto ou envie um arquivo.")]
    EmptyInput,
    #[error("O arquivo deve ser menor que {}.", limit_label(.max_bytes))]
    FileTooLarge { size: u64, max_bytes: u64 },
    #[error("Tipo de arquivo inválido. Use .txt ou .pdf")]
    UnsupportedFileType { name: String, mime_type: String },
}

pub fn validate_file(file: &SelectedFile, limits: &UploadConfig) -> Result<(), ValidationError> {
    if file.size > limits.max_bytes {
        return Err(ValidationError::FileTooLarge {
            size: file.size,
            max_bytes: limits.max_bytes,
        });
    }
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str())
        && !ALLOWED_EXTENSION.is_match(&file.name)
    {
        return Err(ValidationError::UnsupportedFileType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }
    Ok(())
}

/// Resolves the text draft and selected file into the one input to send.
/// A file wins over text, but non-empty blank text is still refused.
pub fn resolve_input<'a>(
    text: &'a str,
    file: Option<&'a SelectedFile>,
) -> Result<SubmissionInput<'a>, ValidationError> {
    if !text.is_empty() && text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    match (file, text.is_empty()) {
        (Some(file), _) => Ok(SubmissionInput::File(file)),
        (None, false) => Ok(SubmissionInput::Text(text)),
        (None, true) => Err(ValidationError::EmptyInput),
    }
}
