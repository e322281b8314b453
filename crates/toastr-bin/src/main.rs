//! toastr-render - queue notifications and print the resulting output.

mod toast_arg;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Map;
use toastr::{render_script, NotificationQueue, Renderer, TitleMap};
use toastr_config_and_utils::{
    init_logging, ConfigRepository, JsonConfigRepository, Paths, ToastrConfig, OPTIONS_PATH,
};
use toastr_session_store::FlashSession;

use crate::toast_arg::ToastArg;

/// toastr command-line interface.
#[derive(Parser)]
#[command(name = "toastr-render")]
#[command(about = "Queue toast notifications and render them as a toastr.js script")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Config file to load. Defaults to ~/.toastr/config.json
    #[arg(short, long, global = true, env = "TOASTR_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ToastArgs {
    /// Toast to queue, as TYPE:MESSAGE[:TITLE]. Repeatable.
    #[arg(short, long = "toast", value_name = "TYPE:MESSAGE[:TITLE]")]
    toasts: Vec<ToastArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue toasts, cross request boundaries, then render from the session
    Render {
        #[command(flatten)]
        toasts: ToastArgs,

        /// Request boundaries to cross before rendering
        #[arg(short, long, default_value_t = 0)]
        requests: usize,
    },
    /// Render the queued toasts directly, bypassing the session
    Preview {
        #[command(flatten)]
        toasts: ToastArgs,
    },
    /// Queue toasts, then print each drained record as a JSON line
    Drain {
        #[command(flatten)]
        toasts: ToastArgs,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<ToastrConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ToastrConfig::load_from_file(&path)?,
        None => ToastrConfig::load(&Paths::new()?)?,
    };
    Ok(config)
}

fn enqueue(queue: &mut NotificationQueue, toasts: &ToastArgs) {
    for toast in &toasts.toasts {
        if !queue.add(&toast.kind, toast.message.as_str(), toast.title.as_deref(), Map::new()) {
            tracing::warn!(kind = %toast.kind, "toast was not queued");
        }
    }
}

/// Execute a subcommand against a fresh session, returning the lines to print.
fn run(command: Commands, config: &ToastrConfig) -> Vec<String> {
    let repository = Arc::new(JsonConfigRepository::from_config(config));
    let session = Arc::new(FlashSession::new());

    let titles = TitleMap::from_repository(&*repository);
    let mut queue = NotificationQueue::with_titles(session.clone(), titles);

    match command {
        Commands::Render { toasts, requests } => {
            enqueue(&mut queue, &toasts);
            for _ in 0..requests {
                session.advance();
            }
            let renderer = Renderer::new(session, repository);
            let output = renderer.render().unwrap_or_else(|| "false".to_string());
            vec![output]
        }
        Commands::Preview { toasts } => {
            enqueue(&mut queue, &toasts);
            let notifications: Vec<_> = queue.notifications().cloned().collect();
            vec![render_script(&repository.get_map(OPTIONS_PATH), &notifications)]
        }
        Commands::Drain { toasts } => {
            enqueue(&mut queue, &toasts);
            let mut lines = Vec::with_capacity(queue.len());
            while !queue.is_empty() {
                lines.push(queue.drain_one_as_text());
            }
            lines
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = load_config(cli.config)?;
    for line in run(cli.command, &config) {
        println!("{}", line);
    }

    Ok(())
}
