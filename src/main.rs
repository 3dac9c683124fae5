//! CLI entry point for velcro

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use velcro::build::BuildOptions;
use velcro::server::ServeOptions;

#[derive(Parser)]
#[command(name = "velcro")]
#[command(version)]
#[command(about = "A small static blog generator with per-post script hooks", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog in a new folder
    Init {
        /// Name of the blog folder (A-Z, a-z, 0-9, hyphens and underscores)
        name: String,
    },

    /// Build the blog into a static site
    #[command(alias = "b")]
    Build {
        /// Also build draft posts
        #[arg(long)]
        drafts: bool,

        /// Rebuild on file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Build and serve the blog locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Also build draft posts
        #[arg(long)]
        drafts: bool,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the output folder
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "velcro=debug,info"
    } else {
        "velcro=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { name } => {
            let site = velcro::commands::init::init_site(&base_dir, &name)?;
            tracing::info!("Blog initialized successfully in {:?}", site);
            tracing::info!("Getting started with your new blog:");
            tracing::info!("1. cd ./{}", name);
            tracing::info!("2. velcro build");
            tracing::info!("3. velcro serve");
        }

        Commands::Build { drafts, watch } => {
            let site = velcro::Velcro::new(&base_dir)?;
            let options = BuildOptions { drafts };
            site.build(options)?;

            if watch {
                tokio::task::spawn_blocking(move || {
                    velcro::commands::build::watch(&site, options)
                })
                .await??;
            }
        }

        Commands::Serve {
            port,
            ip,
            drafts,
            r#static,
        } => {
            let site = velcro::Velcro::new(&base_dir)?;
            let build = BuildOptions { drafts };
            site.build(build)?;

            let options = ServeOptions {
                ip,
                port,
                watch: !r#static,
                build,
            };
            velcro::server::start(&site, options).await?;
        }

        Commands::Clean => {
            let site = velcro::Velcro::new(&base_dir)?;
            site.clean()?;
        }
    }

    Ok(())
}
