use futures::future::BoxFuture;
use reqwest::Client;
use url::Url;

use crate::{
    config::ApiConfig,
    domain::{ClassificationResult, SelectedFile, SubmissionInput},
};

use super::{
    error::TransportError,
    wire::{build_file_form, build_text_payload, parse_response, FILE_ENDPOINT, TEXT_ENDPOINT},
};

/// Seam between the submission controller and whatever answers classifications.
pub trait Classifier {
    fn classify<'a>(
        &'a self,
        input: SubmissionInput<'a>,
    ) -> BoxFuture<'a, Result<ClassificationResult, TransportError>>;
}

#[derive(Clone)]
pub struct MailSenseClient {
    http: Client,
    base_url: Url,
}

impl MailSenseClient {
    pub fn new(http: Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    pub async fn classify_by_file(
        &self,
        file: &SelectedFile,
    ) -> Result<ClassificationResult, TransportError> {
        let url = self.base_url.join(FILE_ENDPOINT)?;
        let form = build_file_form(file)?;
        tracing::debug!(
            target: "classifier",
            url = %url,
            file = %file.name,
            size = file.size,
            "sending file classification request"
        );
        let response = self.http.post(url).multipart(form).send().await?;
        parse_response(response).await
    }

    pub async fn classify_by_text(
        &self,
        text: &str,
    ) -> Result<ClassificationResult, TransportError> {
        let url = self.base_url.join(TEXT_ENDPOINT)?;
        let payload = build_text_payload(text);
        tracing::debug!(
            target: "classifier",
            url = %url,
            chars = payload.text.chars().count(),
            "sending text classification request"
        );
        let response = self.http.post(url).json(&payload).send().await?;
        parse_response(response).await
    }
}

impl Classifier for MailSenseClient {
    fn classify<'a>(
        &'a self,
        input: SubmissionInput<'a>,
    ) -> BoxFuture<'a, Result<ClassificationResult, TransportError>> {
        Box::pin(async move {
            match input {
                SubmissionInput::File(file) => self.classify_by_file(file).await,
                SubmissionInput::Text(text) => self.classify_by_text(text).await,
            }
        })
    }
}
