use reqwest::{
    multipart::{Form, Part},
    Response,
};
use serde::Serialize;

use crate::domain::{ClassificationResult, SelectedFile, FALLBACK_MIME_TYPE};

use super::error::TransportError;

pub const TEXT_ENDPOINT: &str = "classify-email-content";
pub const FILE_ENDPOINT: &str = "classify-email-file-content";
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TextPayload<'a> {
    pub text: &'a str,
}

pub fn build_text_payload(text: &str) -> TextPayload<'_> {
    TextPayload { text: text.trim() }
}

fn file_part(file: &SelectedFile, mime_type: &str) -> reqwest::Result<Part> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(mime_type)
}

/// Files accepted by extension may carry an empty or garbled type; those go
/// out as `application/octet-stream`.
pub fn build_file_form(file: &SelectedFile) -> Result<Form, TransportError> {
    let part = match file_part(file, &file.mime_type) {
        Ok(part) => part,
        Err(err) => {
            tracing::debug!(
                target: "classifier",
                file = %file.name,
                mime = %file.mime_type,
                fallback = FALLBACK_MIME_TYPE,
                error = %err,
                "unusable mime type; using fallback"
            );
            file_part(file, FALLBACK_MIME_TYPE)?
        }
    };
    Ok(Form::new().part(FILE_FIELD, part))
}

pub async fn parse_response(response: Response) -> Result<ClassificationResult, TransportError> {
    let result: ClassificationResult = response.error_for_status()?.json().await?;
    Ok(result)
}
