use std::path::PathBuf;

use clap::Parser;

/// Classify an email as productive or unproductive and suggest a reply.
#[derive(Debug, Parser)]
#[command(name = "mailsense", version)]
pub struct Cli {
    /// Email body to classify
    #[arg(long, short = 't')]
    pub text: Option<String>,

    /// A .txt or .pdf file with the email content
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Copy the suggested reply to the clipboard
    #[arg(long)]
    pub copy: bool,
}
