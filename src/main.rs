// ABOUTME: Entry point for the enroll binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and runs the editor server or a config command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use enroll_server::{
    AppState, PageSource, bind_with_fallback, create_router, editor_url, startup_web_config,
};
use enroll_store::ConfigStore;

#[derive(Parser)]
#[command(name = "enroll", version, about = "Edit the course-registration agent's configuration in a browser")]
struct Cli {
    /// Configuration file to edit.
    #[arg(long, env = "ENROLL_CONFIG", default_value = "config.json", global = true)]
    config: PathBuf,

    /// Serve this HTML file at / instead of the built-in editor page.
    #[arg(long, env = "ENROLL_PAGE", global = true)]
    page: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web editor (default).
    Serve,
    /// Write a default configuration file.
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Load and validate the configuration file.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "enroll=info,enroll_server=info,enroll_store=info,enroll_core=info,tower_http=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(cli.config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let page = cli.page.map(PageSource::File).unwrap_or_default();
            serve(store, page).await
        }
        Command::Init { force } => {
            store
                .init(force)
                .with_context(|| format!("initialising {}", store.path().display()))?;
            println!("wrote default configuration to {}", store.path().display());
            Ok(())
        }
        Command::Check => {
            let cfg = store
                .load()
                .with_context(|| format!("loading {}", store.path().display()))?;
            cfg.validate()
                .with_context(|| format!("validating {}", store.path().display()))?;
            println!(
                "{} is valid ({} courses)",
                store.path().display(),
                cfg.course.len()
            );
            Ok(())
        }
    }
}

async fn serve(store: ConfigStore, page: PageSource) -> anyhow::Result<()> {
    let web = startup_web_config(&store);
    let (listener, port) = bind_with_fallback(&web.host, web.port).await?;
    if port != web.port {
        tracing::warn!("port {} is busy, using {} instead", web.port, port);
    }
    if web.auth.is_enabled() {
        tracing::info!("basic authentication enabled for user {}", web.auth.username);
    }

    let state = Arc::new(AppState::new(store, page));
    let app = create_router(state, &web.auth);

    tracing::info!("open {} to edit the configuration", editor_url(&web.host, port));
    axum::serve(listener, app).await?;
    Ok(())
}
