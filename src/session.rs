use std::{io::Write, path::PathBuf};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    app::{render_state, render_toast, APP_TITLE},
    classifier::Classifier,
    controller::{FileSelection, SubmissionController, SubmitError},
    domain::SelectedFile,
    infrastructure::{
        notifier::{Notification, Notifier, ToastBoard},
        shutdown::ShutdownListener,
    },
};

const HELP: &str = "\
Digite o texto do e-mail; cada linha é adicionada ao rascunho.
  :file <caminho>  seleciona um arquivo .txt ou .pdf
  :remove          remove o arquivo selecionado
  :send            envia para classificação
  :copy            copia a resposta sugerida
  :show            mostra o rascunho atual
  :reset           limpa o formulário
  :quit            sai";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    AppendText(String),
    SelectFile(PathBuf),
    RemoveFile,
    Reset,
    Submit,
    Copy,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix(':') else {
            return Self::AppendText(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };
        match name {
            "file" | "f" if !arg.is_empty() => Self::SelectFile(PathBuf::from(arg)),
            "remove" | "rm" => Self::RemoveFile,
            "reset" => Self::Reset,
            "send" | "s" => Self::Submit,
            "copy" | "c" => Self::Copy,
            "show" => Self::Show,
            "help" | "h" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Name of the picked file as the session displays it.
#[derive(Debug, Default)]
pub struct FileBadge {
    label: Option<String>,
}

impl FileBadge {
    fn show(&mut self, name: &str) {
        self.label = Some(name.to_string());
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl FileSelection for FileBadge {
    fn clear(&mut self) {
        self.label = None;
    }
}

/// Line-driven front end over the controller; each line is one UI event.
pub struct Session<'a, C> {
    controller: &'a mut SubmissionController<C>,
    toasts: &'a ToastBoard,
    badge: FileBadge,
}

impl<'a, C: Classifier> Session<'a, C> {
    pub fn new(controller: &'a mut SubmissionController<C>, toasts: &'a ToastBoard) -> Self {
        Self {
            controller,
            toasts,
            badge: FileBadge::default(),
        }
    }

    pub async fn run<R, W>(
        &mut self,
        reader: R,
        out: &mut W,
        shutdown: &mut ShutdownListener,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{APP_TITLE}\n{HELP}")?;
        let mut lines = reader.lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = shutdown.notified() => None,
            };
            let Some(line) = line else {
                break;
            };
            let command = SessionCommand::parse(&line);
            if command == SessionCommand::Quit {
                break;
            }
            if !self.handle(command, out, shutdown).await? {
                break;
            }
        }
        tracing::debug!(target: "app", "interactive session ended");
        Ok(())
    }

    /// Returns `false` when the session has to stop.
    async fn handle<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
        shutdown: &mut ShutdownListener,
    ) -> Result<bool> {
        match command {
            SessionCommand::AppendText(line) => {
                let mut draft = self.controller.input_text().to_string();
                if !draft.is_empty() {
                    draft.push('\n');
                }
                draft.push_str(&line);
                self.controller.set_text(draft);
            }
            SessionCommand::SelectFile(path) => match SelectedFile::from_path(&path).await {
                Ok(file) => {
                    let name = file.name.clone();
                    if self.controller.select_file(file).is_ok() {
                        self.badge.show(&name);
                        writeln!(out, "Arquivo selecionado: {name}")?;
                    } else {
                        self.badge.clear();
                        self.write_inline_error(out)?;
                    }
                }
                Err(err) => writeln!(out, "{err:#}")?,
            },
            SessionCommand::RemoveFile => {
                let removed = self.badge.label().unwrap_or("-").to_string();
                self.controller.remove_file(Some(&mut self.badge));
                writeln!(out, "Arquivo removido: {removed}")?;
            }
            SessionCommand::Reset => {
                self.controller.reset(Some(&mut self.badge));
                writeln!(out, "Formulário limpo.")?;
            }
            SessionCommand::Submit => {
                writeln!(out, "Classificando...")?;
                let outcome = tokio::select! {
                    res = self.controller.submit() => res,
                    _ = shutdown.notified() => return Ok(false),
                };
                self.flush_toasts(out)?;
                match outcome {
                    Ok(()) => write!(out, "{}", render_state(&self.controller.state()))?,
                    Err(SubmitError::Validation(_)) => self.write_inline_error(out)?,
                    Err(_) => {}
                }
            }
            SessionCommand::Copy => {
                let reply = self.controller.state().suggested_reply;
                self.controller.copy_to_clipboard(reply.as_deref());
                if self.controller.state().copied {
                    writeln!(out, "Resposta copiada!")?;
                } else {
                    self.toasts.notify(Notification::clipboard_unavailable());
                    self.flush_toasts(out)?;
                }
            }
            SessionCommand::Show => {
                match self.controller.selected_file() {
                    Some(file) => writeln!(out, "Arquivo: {} ({} bytes)", file.name, file.size)?,
                    None => writeln!(out, "Arquivo: -")?,
                }
                writeln!(out, "Texto:\n{}", self.controller.input_text())?;
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Unknown(raw) => writeln!(out, "Comando desconhecido: {raw}")?,
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn write_inline_error<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(message) = self.controller.state().error_message {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }

    fn flush_toasts<W: Write>(&self, out: &mut W) -> Result<()> {
        for toast in self.toasts.drain() {
            writeln!(out, "{}", render_toast(&toast))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        classifier::{echo_backend, spawn_backend, MailSenseClient},
        config::UploadConfig,
        controller::ControllerSettings,
        infrastructure::shutdown::Shutdown,
    };

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(
            SessionCommand::parse("Bom dia, equipe\r\n"),
            SessionCommand::AppendText("Bom dia, equipe".into())
        );
        assert_eq!(
            SessionCommand::parse(":file  docs/carta 1.pdf "),
            SessionCommand::SelectFile(PathBuf::from("docs/carta 1.pdf"))
        );
        assert_eq!(SessionCommand::parse(":send"), SessionCommand::Submit);
        assert_eq!(SessionCommand::parse(":rm"), SessionCommand::RemoveFile);
        assert_eq!(SessionCommand::parse(":q"), SessionCommand::Quit);
        assert_eq!(
            SessionCommand::parse(":file"),
            SessionCommand::Unknown(":file".into())
        );
        assert_eq!(
            SessionCommand::parse(":launch"),
            SessionCommand::Unknown(":launch".into())
        );
    }

    #[test]
    fn badge_clears_as_file_selection() {
        let mut badge = FileBadge::default();
        badge.show("a.txt");
        assert_eq!(badge.label(), Some("a.txt"));
        badge.clear();
        assert_eq!(badge.label(), None);
    }

    async fn run_script(script: &str) -> String {
        let api = spawn_backend(echo_backend()).await;
        let client = MailSenseClient::new(reqwest::Client::new(), &api);
        let toasts = Arc::new(ToastBoard::new());
        let settings = ControllerSettings {
            deadline: Duration::from_secs(15),
            upload: UploadConfig::default(),
            copied_duration: Duration::from_millis(2_000),
        };
        let mut controller = SubmissionController::new(client, toasts.clone(), settings);
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();

        let mut out = Vec::new();
        Session::new(&mut controller, &toasts)
            .run(script.as_bytes(), &mut out, &mut listener)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn multi_line_text_is_sent_trimmed() {
        let out = run_script("  Olá,\npreciso do extrato.  \n:send\n:quit\n").await;
        assert!(out.contains("Categoria: Produtivo [success]"), "{out}");
        assert!(out.contains("texto:Olá,\npreciso do extrato."), "{out}");
    }

    #[tokio::test]
    async fn empty_submit_shows_inline_error() {
        let out = run_script(":send\n").await;
        assert!(out.contains("Insira texto ou envie um arquivo."), "{out}");
        assert!(!out.contains("[Erro]"), "{out}");
    }

    #[tokio::test]
    async fn file_flow_with_remove_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convite.txt");
        std::fs::write(&path, "Parabéns pelo aniversário!").unwrap();
        let bad = dir.path().join("foto.png");
        std::fs::write(&bad, [0u8; 4]).unwrap();

        let script = format!(
            ":file {}\n:show\n:send\n:file {}\n:show\n:reset\n:show\n:send\n",
            path.display(),
            bad.display()
        );
        let out = run_script(&script).await;

        assert!(out.contains("Arquivo selecionado: convite.txt"), "{out}");
        assert!(out.contains("Arquivo: convite.txt"), "{out}");
        assert!(out.contains("Categoria: improdutivo [info]"), "{out}");
        assert!(out.contains("Tipo de arquivo inválido. Use .txt ou .pdf"), "{out}");
        assert!(out.contains("Formulário limpo."), "{out}");
        assert!(out.ends_with("Classificando...\nInsira texto ou envie um arquivo.\n"), "{out}");
    }

    #[tokio::test]
    async fn show_reports_selection_until_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pauta.txt");
        std::fs::write(&path, "Bom dia").unwrap();

        let out = run_script(&format!(":file {}\n:show\n:remove\n:show\n", path.display())).await;

        assert!(out.contains("Arquivo: pauta.txt (7 bytes)"), "{out}");
        assert!(out.contains("Arquivo removido: pauta.txt"), "{out}");
        assert!(out.ends_with("Arquivo: -\nTexto:\n\n"), "{out}");
    }

    #[tokio::test]
    async fn copy_without_clipboard_warns() {
        let out = run_script("oi\n:send\n:copy\n").await;
        assert!(out.contains("[Aviso]"), "{out}");
        assert!(!out.contains("Resposta copiada!"), "{out}");
    }

    #[tokio::test]
    async fn shutdown_ends_the_session() {
        let toasts = Arc::new(ToastBoard::new());
        let api = spawn_backend(echo_backend()).await;
        let client = MailSenseClient::new(reqwest::Client::new(), &api);
        let settings = ControllerSettings {
            deadline: Duration::from_secs(15),
            upload: UploadConfig::default(),
            copied_duration: Duration::from_millis(2_000),
        };
        let mut controller = SubmissionController::new(client, toasts.clone(), settings);
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        shutdown.trigger();

        let (_writer, reader) = tokio::io::duplex(64);
        let mut out = Vec::new();
        Session::new(&mut controller, &toasts)
            .run(tokio::io::BufReader::new(reader), &mut out, &mut listener)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with(APP_TITLE));
    }
}
