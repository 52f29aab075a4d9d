use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avastore_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "avastore")]
#[command(author, version, about = "Catalog admin and carousel showcase for the AVA clinic store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List products in display order
    List,
    /// Show a single product
    Show {
        id: i64,
    },
    /// Create a product
    Add {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'p', long)]
        price: String,
        /// Up to three descriptions, in order
        #[arg(short = 'd', long = "description")]
        descriptions: Vec<String>,
        /// Image URLs, in gallery order
        #[arg(short = 'i', long = "image")]
        images: Vec<String>,
    },
    /// Edit a product; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(short = 'n', long)]
        name: Option<String>,
        #[arg(short = 'p', long)]
        price: Option<String>,
        /// Replaces all descriptions when given
        #[arg(short = 'd', long = "description")]
        descriptions: Vec<String>,
        /// Replaces the image list when given
        #[arg(short = 'i', long = "image")]
        images: Vec<String>,
    },
    /// Delete a product and its uploaded images
    Remove {
        id: i64,
    },
    /// Change a product's position
    Move {
        id: i64,
        /// Zero-based target index
        #[arg(long, conflicts_with_all = ["page", "onto"], required_unless_present_any = ["page", "onto"])]
        to: Option<usize>,
        /// Move to the start of this (1-based) page
        #[arg(long, conflicts_with = "onto")]
        page: Option<usize>,
        /// Take the position of this product (drag and drop)
        #[arg(long)]
        onto: Option<i64>,
    },
    /// Upload images and append them to a product's gallery
    Upload {
        id: i64,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the sidebar products in display order
    Sidebar,
    /// Print the config path, writing defaults if it does not exist
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    // The TUI owns the terminal, so its logs go to a file
    if matches!(cli.command, Some(Commands::Run) | None) {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if let Some(Commands::Config) = cli.command {
        return commands::config::run(&config);
    }

    // Initialize database
    let db = Arc::new(Database::new(&config).await?);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(db, config).await,
        Some(Commands::List) => commands::list::run(&db, &config).await,
        Some(Commands::Show { id }) => commands::show::run(&db, id).await,
        Some(Commands::Add {
            name,
            price,
            descriptions,
            images,
        }) => commands::add::run(&db, name, price, descriptions, images).await,
        Some(Commands::Edit {
            id,
            name,
            price,
            descriptions,
            images,
        }) => commands::edit::run(&db, id, name, price, descriptions, images).await,
        Some(Commands::Remove { id }) => commands::remove::run(&db, &config, id).await,
        Some(Commands::Move { id, to, page, onto }) => {
            let target = commands::reorder::MoveTarget::from_args(to, page, onto)?;
            commands::reorder::run(&db, &config, id, target).await
        }
        Some(Commands::Upload { id, files }) => {
            commands::upload::run(&db, &config, id, &files).await
        }
        Some(Commands::Sidebar) => commands::sidebar::run(&db, &config).await,
        Some(Commands::Config) => Ok(()),
    }
}
