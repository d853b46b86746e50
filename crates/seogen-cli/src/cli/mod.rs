//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use seogen_core::api;
use seogen_core::api::keys::Plan;
use seogen_core::config::Config;
use seogen_core::credentials::FileCredentialStore;
use seogen_core::notify::{DedupSink, NotificationSink, StderrSink};

mod commands;

#[derive(Parser)]
#[command(name = "seogen")]
#[command(version)]
#[command(about = "Terminal client for the SEOGEN API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Provision an API key under a billing plan
    CreateKey {
        /// Billing plan: basic, pro, or agency
        #[arg(long, default_value = "basic")]
        plan: Plan,
    },

    /// Generate an SEO description with the stored key
    Generate {
        /// Product name
        #[arg(long)]
        title: String,

        /// Comma-separated keywords
        #[arg(long)]
        keywords: String,
    },

    /// Show which credential is stored (masked)
    Credential,

    /// Check that the API server is reachable
    Health,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let base_url = match cli.base_url.as_deref() {
        Some(url) => {
            api::validate_url(url)?;
            url.to_string()
        }
        None => api::resolve_base_url(config.api.base_url.as_deref())?,
    };

    let store = FileCredentialStore::at_default_path();
    let sink: Box<dyn NotificationSink> = if config.notifications.dedup {
        Box::new(DedupSink::new(StderrSink::new()))
    } else {
        Box::new(StderrSink::new())
    };

    match cli.command {
        Commands::Register { email, password } => {
            commands::auth::register(&base_url, sink.as_ref(), &email, &password).await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&base_url, &store, sink.as_ref(), &email, &password).await
        }
        Commands::CreateKey { plan } => {
            commands::keys::create(&base_url, &store, sink.as_ref(), plan).await
        }
        Commands::Generate { title, keywords } => {
            commands::generate::run(&base_url, &store, sink.as_ref(), &title, &keywords).await
        }
        Commands::Credential => commands::status::credential(&store),
        Commands::Health => commands::status::health(&base_url).await,
    }
}
