use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use mockgate::{
    adapters::{AppState, DirContentSource, GithubContentSource, ReqwestNotifier, router},
    config::{loader, validation::MockConfigValidator},
    core::Resolver,
    ports::content_source::ContentSource,
    tracing_setup,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Start the mock server (default)
    Serve {
        /// Address to listen on
        #[clap(short, long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Serve definitions from a local directory tree
        /// ({root}/{owner}/{repo}/{branch}/...) instead of GitHub
        #[clap(long)]
        root: Option<PathBuf>,

        /// Emit JSON logs instead of console output
        #[clap(long)]
        json_logs: bool,
    },
    /// Validate a local definition document
    Validate {
        /// Definition file to validate
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    match Args::parse().command {
        Some(Commands::Validate { file }) => validate_command(&file),
        Some(Commands::Serve {
            listen,
            root,
            json_logs,
        }) => serve_command(&listen, root, json_logs).await,
        None => serve_command("127.0.0.1:8080", None, false).await,
    }
}

async fn serve_command(listen: &str, root: Option<PathBuf>, json_logs: bool) -> Result<()> {
    if json_logs {
        tracing_setup::init_tracing()?;
    } else {
        tracing_setup::init_console_tracing()?;
    }

    let source: Arc<dyn ContentSource> = match root {
        Some(root) => {
            tracing::info!("Serving definitions from local directory {}", root.display());
            Arc::new(DirContentSource::new(root))
        }
        None => Arc::new(GithubContentSource::new()?),
    };
    let notifier = Arc::new(ReqwestNotifier::new()?);
    let resolver = Arc::new(Resolver::new(source.clone(), notifier));
    let app = router(AppState { source, resolver });

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .wrap_err_with(|| format!("Failed to bind {listen}"))?;
    tracing::info!("Mockgate listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;
    tracing::info!("Mockgate shut down");
    Ok(())
}

fn validate_command(file: &PathBuf) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| eyre!("Invalid definition path: {}", file.display()))?;
    let text = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;

    let parsed = loader::parse_definition(file_name, &text)?;
    MockConfigValidator::validate(&parsed.config)?;

    println!("{} is a valid mock definition", file.display());
    println!(
        "  {} method(s), data source: {}",
        parsed.config.routes.len(),
        parsed.config.db_file
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutdown signal received");
}
