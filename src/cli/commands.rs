//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::core::client::Translator;
use crate::core::config::TranslatorConfig;
use crate::core::history::HistoryStore;
use crate::core::models::TranslationRecord;
use crate::core::session::{Outcome, TranslateSession};
use crate::core::storage::{FileStorage, MemoryStorage};

/// Commands for translate-me
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text once and record it in history
    Translate {
        /// Text to translate
        text: String,
    },

    /// Show translation history, most recent first
    History,

    /// Clear translation history
    Clear,

    /// Read lines from stdin and translate each one
    Interactive,
}

/// Build a session from configuration. `no_persist` keeps history in memory only.
pub fn build_session(config: TranslatorConfig, no_persist: bool) -> anyhow::Result<TranslateSession> {
    let history = if no_persist {
        HistoryStore::load(MemoryStorage::new())
    } else {
        let storage = FileStorage::new(config.history_dir(), &config.history_slot);
        info!("History file: {}", storage.path().display());
        HistoryStore::load(storage)
    };

    let translator = Translator::new(config)?;
    Ok(TranslateSession::new(translator, history))
}

/// Render history records for display
pub fn format_history(records: &[TranslationRecord]) -> String {
    if records.is_empty() {
        return "No translations yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(record.original());
        out.push('\n');
        out.push_str("    ");
        out.push_str(record.translated());
        out.push('\n');
    }
    out
}

/// Handle translate command
pub async fn handle_translate(
    session: &mut TranslateSession,
    text: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match session.submit(text).await {
        Outcome::Skipped => writeln!(out, "Nothing to translate.")?,
        Outcome::Translated(_) | Outcome::Failed(_) => writeln!(out, "{}", session.displayed())?,
    }
    Ok(())
}

/// Handle history command
pub fn handle_history(session: &TranslateSession, out: &mut impl Write) -> anyhow::Result<()> {
    write!(out, "{}", format_history(session.history().records()))?;
    Ok(())
}

/// Handle clear command
pub fn handle_clear(session: &mut TranslateSession, out: &mut impl Write) -> anyhow::Result<()> {
    let count = session.history().len();
    session.clear_history();
    writeln!(out, "Cleared {} translations.", count)?;
    Ok(())
}

/// Interactive loop. Each line is translated; `:history`, `:clear` and
/// `:quit` are handled locally. Ends at `:quit` or end of input.
pub async fn handle_interactive<R>(
    session: &mut TranslateSession,
    input: R,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    writeln!(
        out,
        "Translating {}. Commands: :history, :clear, :quit",
        session.translator().language_pair()
    )?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim_end_matches('\r') {
            ":quit" | ":q" => break,
            ":history" => handle_history(session, out)?,
            ":clear" => handle_clear(session, out)?,
            "" => continue,
            text => handle_translate(session, text, out).await?,
        }
        out.flush()?;
    }

    Ok(())
}

/// Base configuration: the JSON file at `path` if given, then environment
/// variables on top
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TranslatorConfig> {
    let base = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            TranslatorConfig::from_file(path)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
        }
        None => TranslatorConfig::default(),
    };
    base.with_lookup(|key| std::env::var(key).ok())
}

/// Apply CLI overrides on top of file and environment configuration
pub fn apply_overrides(
    mut config: TranslatorConfig,
    endpoint: Option<String>,
    langpair: Option<String>,
    history_dir: Option<PathBuf>,
) -> anyhow::Result<TranslatorConfig> {
    if let Some(endpoint) = endpoint {
        config.api_endpoint = endpoint;
    }
    if let Some(pair) = langpair {
        config.language_pair = pair
            .parse()
            .map_err(|e| anyhow::anyhow!("--langpair: {}", e))?;
    }
    if let Some(dir) = history_dir {
        config.history_dir = Some(dir);
    }
    config.validate()?;
    Ok(config)
}
