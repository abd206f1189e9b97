//! CLI entry point for spaceblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spaceblog")]
#[command(version)]
#[command(about = "A static blog generator backed by a headless content API", long_about = None)]
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
    /// Fetch posts from the content service and generate static files
    #[command(alias = "g")]
    Generate,

    /// Generate, then serve the site locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Clean the public folder
    Clean,

    /// List posts known to the content service
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spaceblog=debug,info"
    } else {
        "spaceblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Generate => {
            let blog = spaceblog::Blog::new(&base_dir)?;
            let service = blog.service();
            tracing::info!("Generating static files from {}", blog.config.api_url);

            blog.generate(&service)?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = spaceblog::Blog::new(&base_dir)?;
            let service = blog.service();

            // Generate first
            tracing::info!("Generating static files...");
            blog.generate(&service)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            spaceblog::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = spaceblog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let blog = spaceblog::Blog::new(&base_dir)?;
            let service = blog.service();
            spaceblog::commands::list::run(&blog, &service)?;
        }

        Commands::Version => {
            println!("spaceblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
