//! CLI administration tool for shorty.
//!
//! Provides commands for inspecting and pruning links and for database
//! diagnostics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links, optionally a [from,to] window
//! cargo run --bin admin -- links list --from 0 --to 20
//!
//! # Delete a link and its visits
//! cargo run --bin admin -- links delete 42
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`), plus
//! `BASE_URL` for the printed short URLs.

use shorty::application::services::LinkService;
use shorty::config::{Config, mask_connection_string};
use shorty::domain::pagination::RangeSpec;
use shorty::domain::repositories::{LinkRepository, VisitRepository};
use shorty::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use shorty::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show link and visit totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List links ordered by id
    List {
        /// First offset of the window (inclusive)
        #[arg(long, requires = "to")]
        from: Option<i64>,

        /// End of the window; the window holds `to - from` links
        #[arg(long, requires = "from")]
        to: Option<i64>,
    },

    /// Delete a link together with its visits
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

fn link_service(pool: &PgPool, config: &Config) -> LinkService {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    LinkService::new(repo, &config.base_url)
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool, config: &Config) -> Result<()> {
    let service = link_service(pool, config);

    match action {
        LinksAction::List { from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(
                    RangeSpec::new(from, to)
                        .map_err(|_| anyhow::anyhow!("Invalid range [{from},{to}]"))?,
                ),
                _ => None,
            };
            list_links(&service, range).await?;
        }
        LinksAction::Delete { id, yes } => {
            delete_link(&service, id, yes).await?;
        }
    }

    Ok(())
}

/// Prints links as a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   ID     Short name   Created            URL
///   ----------------------------------------------------------------------------
///   1      exmpl        2026-01-15 10:30   https://example.com
///
///   Showing links 0-0/1
/// ```
async fn list_links(service: &LinkService, range: Option<RangeSpec>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let page = service
        .list_links(range)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if page.items.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!("  {}", page.content_range("links").bright_black());
        return Ok(());
    }

    println!(
        "  {:<6} {:<12} {:<18} {}",
        "ID".bright_white().bold(),
        "Short name".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(76).bright_black());

    for link in &page.items {
        println!(
            "  {:<6} {:<12} {:<18} {}",
            link.id.to_string().bright_black(),
            link.short_name.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Showing {}", page.content_range("links").bright_white());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete link".bright_blue().bold());
    println!();

    let link = service
        .get_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Link {id}: {e}"))?;

    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Short URL: {}", service.short_url(&link.short_name).cyan());
    println!("  Target:    {}", link.original_url);
    println!();
    println!("{}", "  All recorded visits of this link are removed too.".yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays link and visit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let shared = Arc::new(pool.clone());
    let links = PgLinkRepository::new(shared.clone());
    let visits = PgVisitRepository::new(shared);

    let links_count = links
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let visits_count = visits
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count visits: {}", e))?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits:  {}",
        visits_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database did not answer")?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!(
                "  URL:        {}",
                mask_connection_string(&config.database_url).bright_black()
            );
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
