use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;
use structured_playlist::repository::{LibraryFileRepository, RetryPolicy, RetryingRepository};
use structured_playlist::structure::from_definition;
use structured_playlist::validation::validate_definition;
use structured_playlist::{Definition, SyncConfig, SyncPipeline};

#[derive(Parser, Debug)]
#[command(name = "structured-playlist")]
#[command(about = "Build playlists from other playlists and keep them in sync", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Quota units charged per added item
    #[arg(long, global = true, default_value_t = structured_playlist::sync::config::DEFAULT_UNIT_COST)]
    unit_cost: u64,

    /// Quota budget for a single sync run
    #[arg(long, global = true, default_value_t = structured_playlist::sync::config::DEFAULT_QUOTA_LIMIT)]
    quota_limit: u64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a definition file for schema errors and dependency cycles
    Validate {
        /// Path to the definition (JSON)
        definition: String,
    },

    /// Print the dependency tree of a definition
    Tree {
        /// Path to the definition (JSON)
        definition: String,

        /// Playlist library used to resolve titles
        #[arg(short = 'l', long)]
        library: Option<String>,
    },

    /// Show the steps a sync would run, without changing anything
    Plan {
        /// Path to the definition (JSON)
        definition: String,

        /// Playlist library to plan against
        #[arg(short = 'l', long)]
        library: String,
    },

    /// Copy missing items into every playlist from its dependencies
    Sync {
        /// Path to the definition (JSON)
        definition: String,

        /// Playlist library to sync (updated in place)
        #[arg(short = 'l', long)]
        library: String,

        /// Retries for transient repository failures
        #[arg(long, default_value = "3")]
        retries: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = SyncConfig::new()
        .with_unit_cost(args.unit_cost)
        .with_quota_limit(args.quota_limit);

    match args.command {
        Command::Validate { definition } => {
            let definition = load_definition(&expand(&definition))?;
            validate_definition(&definition).context("Definition is invalid")?;
            log::info!(
                "✅ Definition '{}' is valid ({} playlists)",
                definition.name,
                definition.playlist_ids().len()
            );
        }

        Command::Tree {
            definition,
            library,
        } => {
            let definition = load_definition(&expand(&definition))?;
            let known = match library {
                Some(path) => LibraryFileRepository::load(&expand(&path))?.summaries(),
                None => Vec::new(),
            };

            let graph = from_definition(&definition, &known);
            print!("{}", graph.render_tree());
        }

        Command::Plan {
            definition,
            library,
        } => {
            let definition = load_definition(&expand(&definition))?;
            let repository = LibraryFileRepository::load(&expand(&library))?;
            let pipeline = SyncPipeline::new(config, repository);

            let prepared = pipeline
                .prepare(&definition)
                .await
                .context("Failed to plan sync")?;

            for step in &prepared.plan.steps {
                println!(
                    "{} <- {} ({}) from {}",
                    step.target_playlist_id,
                    step.item.title,
                    step.item.external_item_id,
                    step.source_playlist_id
                );
            }
            for (target, count) in prepared.plan.steps_by_target() {
                log::info!("{}: {} item(s) to add", target, count);
            }
            log::info!(
                "{} step(s), {} of {} quota units",
                prepared.plan.len(),
                prepared.quota_required,
                pipeline.config().quota_limit
            );
        }

        Command::Sync {
            definition,
            library,
            retries,
            json,
        } => {
            let library_path = expand(&library);
            let raw = read_definition(&expand(&definition))?;

            let repository = RetryingRepository::new(LibraryFileRepository::load(&library_path)?)
                .with_policy(
                    RetryPolicy::default()
                        .with_max_retries(retries)
                        .with_delays(Duration::from_millis(500), Duration::from_secs(10)),
                );
            let pipeline = SyncPipeline::new(config, repository);

            // Stop between steps on Ctrl-C; completed steps are kept
            let cancel = pipeline.cancel_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::warn!("Interrupted, finishing current step...");
                    cancel.store(true, Ordering::SeqCst);
                }
            });

            let report = pipeline.sync(&raw).await.context("Sync failed")?;

            pipeline.repository().inner().save(&library_path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            for failure in &report.errors {
                log::warn!(
                    "Not added: {} -> {}: {}",
                    failure.step.item.external_item_id,
                    failure.step.target_playlist_id,
                    failure.error
                );
            }

            if report.is_complete_success() {
                log::info!("✅ {}", report.summary());
            } else {
                log::warn!("⚠️ {}", report.summary());
            }
        }
    }

    Ok(())
}

/// Expand ~ in a user-supplied path
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn read_definition(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read definition: {:?}", path))
}

fn load_definition(path: &Path) -> Result<Definition> {
    let raw = read_definition(path)?;
    Definition::from_json(&raw).with_context(|| format!("Failed to parse definition: {:?}", path))
}
