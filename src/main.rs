//! CLI entry point for mdocs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdocs")]
#[command(version)]
#[command(about = "Serve and export a Markdown documentation site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new documentation site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List every page with its URL and title
    List,

    /// Resolve a request path and print the page metadata as JSON
    Resolve {
        /// Request path, e.g. /getting-started/
        #[arg(default_value = "/")]
        path: String,
    },

    /// Export the site as static files
    #[command(alias = "e")]
    Export {
        /// Output directory (defaults to output_dir from _config.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdocs=debug,tower_http=debug,info"
    } else {
        "mdocs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            mdocs::commands::init::init_site(&target_dir)?;
            println!("Initialized documentation site in {:?}", target_dir);
        }

        Commands::Serve { port, ip } => {
            let site = mdocs::Site::new(&base_dir)?;
            tracing::info!("Serving {:?}", site.content_dir);
            mdocs::server::start(site, &ip, port).await?;
        }

        Commands::List => {
            let site = mdocs::Site::new(&base_dir)?;
            mdocs::commands::list::run(&site).await?;
        }

        Commands::Resolve { path } => {
            let site = mdocs::Site::new(&base_dir)?;
            mdocs::commands::resolve::run(&site, &path).await?;
        }

        Commands::Export { output } => {
            let site = mdocs::Site::new(&base_dir)?;
            let output = output.map(|dir| {
                if dir.is_absolute() {
                    dir
                } else {
                    base_dir.join(dir)
                }
            });
            let summary = mdocs::commands::export::run(&site, output.as_deref()).await?;
            println!(
                "Exported {} pages ({} skipped, {} assets copied)",
                summary.pages, summary.skipped, summary.assets
            );
        }

        Commands::Version => {
            println!("mdocs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
