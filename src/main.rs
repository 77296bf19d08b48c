//! Main entry point for the translate-me CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translate_me::cli::commands::{self, Commands};

/// translate-me - translate text and keep a local history
#[derive(Parser, Debug)]
#[command(name = "translate-me", version, about, long_about = None)]
struct Args {
    /// JSON config file; environment variables and flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language pair as `source|target` (defaults to TRANSLATE_LANGPAIR or en|es)
    #[arg(long)]
    langpair: Option<String>,

    /// Translation endpoint (defaults to TRANSLATE_ENDPOINT or MyMemory)
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory holding the history file
    #[arg(long)]
    history_dir: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long)]
    no_persist: bool,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging on stderr so results stay on stdout
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={}", env!("CARGO_CRATE_NAME"), default_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::apply_overrides(
        commands::load_config(args.config.as_deref())?,
        args.endpoint,
        args.langpair,
        args.history_dir,
    )?;
    let mut session = commands::build_session(config, args.no_persist)?;
    let mut stdout = std::io::stdout();

    match args.command {
        Some(Commands::Translate { text }) => {
            commands::handle_translate(&mut session, &text, &mut stdout).await?;
        }
        Some(Commands::History) => {
            commands::handle_history(&session, &mut stdout)?;
        }
        Some(Commands::Clear) => {
            commands::handle_clear(&mut session, &mut stdout)?;
        }
        Some(Commands::Interactive) | None => {
            let stdin = BufReader::new(tokio::io::stdin());
            commands::handle_interactive(&mut session, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
