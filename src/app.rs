use std::{fmt::Write as _, process::ExitCode, sync::Arc};

use anyhow::Result;
use reqwest::Client;
use tokio::io::BufReader;

use crate::{
    cli::Cli,
    classifier::MailSenseClient,
    config::AppConfig,
    controller::{ControllerSettings, SubmissionController, SubmitError},
    domain::{SelectedFile, UiState},
    infrastructure::{
        clipboard::SystemClipboard,
        directories::ResolvedPaths,
        notifier::{Notification, ToastBoard},
        shutdown::Shutdown,
    },
    session::Session,
};

pub const APP_TITLE: &str = "MailSense | Classificador Inteligente de Emails";

pub struct MailSenseApp {
    _paths: ResolvedPaths,
    controller: SubmissionController<MailSenseClient>,
    toasts: Arc<ToastBoard>,
    shutdown: Shutdown,
}

impl MailSenseApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("mailsense/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = MailSenseClient::new(http_client, &config.api);
        let toasts = Arc::new(ToastBoard::new());
        let mut controller =
            SubmissionController::new(client, toasts.clone(), ControllerSettings::from(&config));
        if let Some(clipboard) = SystemClipboard::detect() {
            controller = controller.with_clipboard(Box::new(clipboard));
        }

        Ok(Self {
            _paths: paths,
            controller,
            toasts,
            shutdown,
        })
    }

    pub async fn run(self, cli: Cli) -> Result<ExitCode> {
        let MailSenseApp {
            _paths: _,
            mut controller,
            toasts,
            shutdown,
        } = self;

        tracing::info!(target: "app", "{APP_TITLE}");
        let mut shutdown_listener = shutdown.subscribe();

        if cli.text.is_none() && cli.file.is_none() {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            Session::new(&mut controller, &toasts)
                .run(stdin, &mut stdout, &mut shutdown_listener)
                .await?;
            return Ok(ExitCode::SUCCESS);
        }

        if let Some(text) = cli.text {
            controller.set_text(text);
        }
        if let Some(path) = cli.file.as_deref() {
            let file = SelectedFile::from_path(path).await?;
            if let Err(err) = controller.select_file(file) {
                eprintln!("{err}");
                return Ok(ExitCode::FAILURE);
            }
        }

        let outcome = tokio::select! {
            res = controller.submit() => res,
            _ = shutdown_listener.notified() => {
                tracing::info!(target: "app", "submission cancelled by shutdown");
                return Ok(ExitCode::FAILURE);
            }
        };

        for toast in toasts.drain() {
            eprintln!("{}", render_toast(&toast));
        }
        if let Err(err) = outcome {
            if let SubmitError::Validation(err) = err {
                eprintln!("{err}");
            }
            return Ok(ExitCode::FAILURE);
        }

        let state = controller.state();
        print!("{}", render_state(&state));

        if cli.copy {
            controller.copy_to_clipboard(state.suggested_reply.as_deref());
            if controller.state().copied {
                println!("Resposta copiada!");
                // Some platforms drop clipboard contents once the owning
                // process exits; stay alive while the indicator is shown.
                tokio::select! {
                    _ = controller.copy_settled() => {}
                    _ = shutdown_listener.notified() => {}
                }
            } else {
                eprintln!("{}", render_toast(&Notification::clipboard_unavailable()));
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

pub fn render_state(state: &UiState) -> String {
    let mut out = String::new();
    if state.loading {
        out.push_str("Classificando...\n");
    }
    if let Some(category) = &state.category {
        let _ = match state.severity {
            Some(severity) => writeln!(out, "Categoria: {} [{}]", category.trim(), severity.label()),
            None => writeln!(out, "Categoria: {}", category.trim()),
        };
    }
    if let Some(reply) = &state.suggested_reply {
        let _ = writeln!(out, "Resposta sugerida:\n{reply}");
    }
    out
}

pub fn render_toast(toast: &Notification) -> String {
    format!("[{}] {}", toast.summary, toast.detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    #[test]
    fn renders_category_with_severity() {
        let state = UiState {
            category: Some(" Produtivo ".into()),
            severity: Some(Severity::Success),
            suggested_reply: Some("Recebemos sua solicitação.".into()),
            ..Default::default()
        };
        assert_eq!(
            render_state(&state),
            "Categoria: Produtivo [success]\nResposta sugerida:\nRecebemos sua solicitação.\n"
        );
    }

    #[test]
    fn renders_unknown_category_without_tag() {
        let state = UiState {
            category: Some("Outro".into()),
            ..Default::default()
        };
        assert_eq!(render_state(&state), "Categoria: Outro\n");
        assert_eq!(render_state(&UiState::default()), "");
        let loading = UiState {
            loading: true,
            ..Default::default()
        };
        assert_eq!(render_state(&loading), "Classificando...\n");
    }

    #[test]
    fn toast_shows_summary_and_detail() {
        let toast = Notification::classification_failed();
        assert_eq!(
            render_toast(&toast),
            "[Erro] Não foi possível processar o e-mail. Tente novamente mais tarde."
        );
    }
}
