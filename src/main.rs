//! native-msgbox - show a message box from the command line
//!
//! Exits 0 for Ok/Yes and 1 for Cancel/No, like dialog and zenity.

use anyhow::{Context, Result};
use clap::Parser;
use native_msgbox::{ButtonSet, Config, Icon, MessageBox, ResultCode};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "native-msgbox")]
#[command(about = "Native fallback message box (X11 / Win32 / AppKit)")]
#[command(version)]
struct Cli {
    /// Window title
    caption: String,

    /// Body text; "\n" starts a new line
    text: String,

    /// ok, ok-cancel or yes-no
    #[arg(short, long, default_value = "ok")]
    buttons: ButtonSet,

    /// none, info, warning, error, question, stop or success
    #[arg(short, long, default_value = "none")]
    icon: Icon,

    /// Locale tag for button captions (defaults to the environment)
    #[arg(short, long)]
    locale: Option<String>,

    /// Config file path (defaults to XDG config)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("native_msgbox=debug")
    } else {
        EnvFilter::new("native_msgbox=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.locale.is_some() {
        config.locale.tag = cli.locale.clone();
    }
    info!(?config, "Loaded configuration");

    let text = cli.text.replace("\\n", "\n");
    let mb = MessageBox::new(config);
    let result = if cfg!(target_os = "macos") {
        // NSAlert refuses to run off the main thread
        mb.show(&cli.caption, &text, cli.buttons, cli.icon)
    } else {
        mb.show_async(&cli.caption, &text, cli.buttons, cli.icon).await
    }
    .context("Failed to show message box")?;

    if cli.json {
        println!("{}", serde_json::json!({ "result": result }));
    } else {
        println!("{result}");
    }

    Ok(match result {
        ResultCode::Confirm | ResultCode::Yes => ExitCode::SUCCESS,
        ResultCode::Cancel | ResultCode::No | ResultCode::None => ExitCode::from(1),
    })
}
