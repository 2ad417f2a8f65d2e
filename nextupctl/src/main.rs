//! Command-line driver for the NextUp catalog sync pipeline.
//!
//! A periodic scheduler (cron, systemd timer, `--every`) pointing at
//! `nextupctl sync` is the whole background-job story: the binary loads
//! configuration from the environment, opens the store, runs the
//! requested sync, and prints the report.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nextup_core::sync::LibrarySync;
use nextup_core::{database, CatalogClient, SyncConfig, SyncReport};
use nextup_model::StreamingService;

#[derive(Parser, Debug)]
#[command(name = "nextupctl")]
#[command(about = "Sync the NextUp catalog database from the streaming-availability API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full catalog sync, optionally resumed and/or capped.
    Sync {
        /// Catalog to sync, e.g. "netflix".
        #[arg(long, default_value = "netflix")]
        catalog: String,

        /// Opaque cursor from a previous run to resume from.
        #[arg(long)]
        cursor: Option<String>,

        /// Stop after this many pages.
        #[arg(long)]
        max_pages: Option<u32>,

        /// Keep re-running on a fixed interval, e.g. "12h".
        #[arg(long, value_parser = humantime::parse_duration)]
        every: Option<Duration>,
    },

    /// Sync a single title by its catalog id.
    Title {
        /// Catalog id of the title, e.g. "82".
        mon_id: String,
    },

    /// Sync a ranked top-shows list and reconcile the stored ranking.
    TopShows {
        /// Streaming service the ranking belongs to.
        #[arg(long)]
        service: String,

        /// Catalog ids of the ranked titles, best first.
        mon_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SyncConfig::from_env().context("loading configuration")?;

    let pool = database::connect(&config.database.path)
        .await
        .context("opening catalog database")?;
    let client = CatalogClient::new(&config.remote, config.retry.clone())
        .context("building catalog client")?;
    let sync = LibrarySync::new(Arc::new(client), pool);

    match cli.command {
        Command::Sync {
            catalog,
            cursor,
            max_pages,
            every,
        } => {
            let mut cursor = cursor;
            loop {
                let report = sync
                    .sync_all(&catalog, cursor.take(), max_pages)
                    .await
                    .context("catalog sync failed")?;
                print_report(&report);

                let Some(interval) = every else { break };
                info!(interval = %humantime::format_duration(interval), "sleeping until next sync");
                tokio::time::sleep(interval).await;
            }
        }

        Command::Title { mon_id } => {
            let report = sync
                .sync_title(&mon_id)
                .await
                .with_context(|| format!("syncing title {mon_id}"))?;
            print_report(&report);
        }

        Command::TopShows { service, mon_ids } => {
            let service = StreamingService::from_str(&service)?;
            let report = sync
                .sync_top_shows(service, &mon_ids)
                .await
                .with_context(|| format!("reconciling top shows for {service}"))?;
            print_report(&report);
            if !report.succeeded() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!("=== Sync Report ===");
    println!("Pages processed:    {}", report.pages);
    println!("Titles created:     {}", report.titles_upserted);
    println!("Episodes upserted:  {}", report.episodes_upserted);
    println!("External ids:       {}", report.external_ids_upserted);
    println!("Genres created:     {}", report.genres_upserted);
    println!("People created:     {}", report.people_upserted);
    println!("Title-genre links:  {}", report.title_genre_links);
    println!("Title-person links: {}", report.title_person_links);
    if let Some(cursor) = &report.last_cursor {
        println!("Last cursor:        {cursor}");
    }
    if !report.failed.is_empty() {
        println!("Failed titles:      {}", report.failed.len());
        for failure in &report.failed {
            println!("  {}: {}", failure.mon_id, failure.error);
        }
    }
}
