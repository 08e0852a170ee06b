use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod batch;
mod candidates;
mod config;
mod deck;
mod error;
mod fetch;
mod utils;

use config::{FetchConfig, RetryPolicy, COMMONS_FILE_PATH};
use deck::{rws, Arcana};
use fetch::Fetcher;

/// Download the Rider-Waite-Smith tarot card images from Wikimedia Commons
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch card images, skipping the ones already on disk
    Fetch {
        /// Which part of the deck to fetch
        #[arg(value_enum, default_value = "all")]
        arcana: Arcana,

        /// Root directory for card collections
        #[arg(short, long, default_value = "public/cards")]
        root: PathBuf,

        /// Collection directory under the root
        #[arg(short, long, default_value = "rws")]
        collection: String,

        /// Base URL that file names are appended to
        #[arg(long, default_value = COMMONS_FILE_PATH)]
        base_url: String,

        /// Attempts per candidate name
        #[arg(short, long, default_value_t = 3)]
        attempts: u32,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Write the final report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the manifest and the names tried for each card
    List {
        #[arg(value_enum, default_value = "all")]
        arcana: Arcana,

        /// Also print every candidate name
        #[arg(long, default_value_t = false)]
        candidates: bool,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Commands::Fetch {
            arcana,
            root,
            collection,
            base_url,
            attempts,
            timeout,
            report,
        } => {
            println!("Arcana: {:?}", arcana);
            println!("Path: {}", root.join(&collection).display());

            let output_dir = utils::ensure_directories(&root, &collection)?;

            let config = FetchConfig {
                base_url,
                timeout: Duration::from_secs(timeout),
                retry: RetryPolicy {
                    attempts,
                    ..RetryPolicy::default()
                },
                ..FetchConfig::default()
            };
            let fetcher = Fetcher::new(&config)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            let entries = rws::select(arcana);
            println!("Fetching {} cards", entries.len());

            let outcome = batch::run(&fetcher, &entries, &output_dir).await;
            print!("{}", outcome.summary());

            if outcome.downloaded > 0 || outcome.skipped > 0 {
                println!(
                    "Downloaded {} cards, skipped {} (already existed)",
                    outcome.downloaded, outcome.skipped
                );
            }

            match utils::count_images(&output_dir) {
                Ok(count) => println!("Total card images in {}: {}", output_dir.display(), count),
                Err(e) => eprintln!("Error counting card images: {}", e),
            }

            if let Some(path) = report {
                outcome.write_json(&path)?;
                println!("Report written to {}", path.display());
            }
        }
        Commands::List { arcana, candidates } => {
            for entry in rws::select(arcana) {
                println!("{} -> {}", entry.source, entry.output);
                if candidates {
                    for name in entry.candidates() {
                        println!("    {}", name);
                    }
                }
            }
        }
    }

    Ok(())
}
