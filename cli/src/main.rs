//! # lumina
//!
//! Reads a directory, extracts bounded text from every file and optionally
//! sends the result to the organization service.
//!
//! ```bash
//! # Print processed records as JSON
//! lumina scan ~/Downloads
//!
//! # Organize a folder through the service
//! lumina analyze ~/Downloads --api-url http://127.0.0.1:8000
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use lumina::acquire::{collect_dropped, files_from_directory, FsDirectoryHandle};
use lumina::analyze::{AnalysisClient, AnalyzeError, AnalyzeResponse};
use lumina::pipeline::FnProgress;
use lumina::telemetry::{self, LogFormat};
use lumina::{
    load_config_or_default, AcquireError, BatchPipeline, Config, DirectoryScanner, DroppedEntry,
    ProcessedRecord, SourceFile,
};

#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "Extract and organize the files of a directory")]
#[command(version)]
struct Cli {
    /// Path to config file (default: <config dir>/lumina/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    Text,
    #[default]
    Json,
}

/// How the directory is turned into files.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Source {
    /// Recursive OS-level scan
    #[default]
    Scan,
    /// Directory handle tree, paths relative to the directory
    Handle,
    /// Dropped-folder tree, paths include the folder name
    Drop,
}

#[derive(clap::Args)]
struct IngestArgs {
    /// Directory to read
    path: PathBuf,

    #[arg(short, long, value_enum, default_value = "scan")]
    source: Source,

    /// Files extracted concurrently per group
    #[arg(long)]
    group_size: Option<usize>,

    /// Run OCR on images (needs the `ocr` feature)
    #[arg(long)]
    ocr: bool,

    /// Put extraction failures into the record instead of only logging them
    #[arg(long)]
    surface_errors: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a directory and print the records
    Scan {
        #[command(flatten)]
        ingest: IngestArgs,

        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Process a directory and send it to the organization service
    Analyze {
        #[command(flatten)]
        ingest: IngestArgs,

        /// Service base URL (overrides config and LUMINA_API_URL)
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Check that the organization service is up
    Health {
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Semantic search across stored collections
    Search {
        query: String,

        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show a stored collection, or list all of them
    Collection {
        id: Option<String>,

        #[arg(long)]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "info,lumina=debug,lumina_cli=debug"
    } else {
        telemetry::DEFAULT_FILTER
    };
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    telemetry::init_tracing(filter, log_format).context("Failed to initialize logging")?;

    let mut config = load_config_or_default(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Scan { ingest, output } => {
            let records = ingest_directory(&mut config, &ingest).await?;
            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&records)?;
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {} records to {}", records.len(), path.display());
                }
                None => print_records(&records, cli.format)?,
            }
        }
        Commands::Analyze { ingest, api_url } => {
            let records = ingest_directory(&mut config, &ingest).await?;
            let client = client_for(&mut config, api_url)?;
            let response = client.analyze(&records).await.map_err(report)?;
            print_structure(&response, cli.format)?;
        }
        Commands::Health { api_url } => {
            let client = client_for(&mut config, api_url)?;
            let health = client.health().await.map_err(report)?;
            print_value(&health, cli.format, || {
                format!("{}: {}", client.base_url(), health.status)
            })?;
        }
        Commands::Search { query, api_url } => {
            let client = client_for(&mut config, api_url)?;
            let results = client.search(&query).await.map_err(report)?;
            print_value(&results, cli.format, || {
                results
                    .iter()
                    .map(|f| format!("{}  ({})", f.path, f.file_type))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Commands::Collection { id, api_url } => {
            let client = client_for(&mut config, api_url)?;
            match id {
                Some(id) => {
                    let collection = client.collection(&id).await.map_err(report)?;
                    print_structure(&collection, cli.format)?;
                }
                None => {
                    let collections = client.collections().await.map_err(report)?;
                    print_value(&collections, cli.format, || {
                        collections
                            .iter()
                            .map(|c| format!("{}  {} files", c.collection_id, c.total_files))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })?;
                }
            }
        }
    }

    Ok(())
}

async fn ingest_directory(config: &mut Config, args: &IngestArgs) -> Result<Vec<ProcessedRecord>> {
    if let Some(group_size) = args.group_size {
        anyhow::ensure!(group_size > 0, "--group-size must be greater than 0");
        config.ingest.group_size = group_size;
    }
    config.ingest.ocr_enabled |= args.ocr;
    config.ingest.surface_extraction_errors |= args.surface_errors;

    let files = acquire(&args.path, args.source).await.map_err(|e| {
        match e.user_message() {
            Some(message) => warn!("{}", message),
            None => info!("Directory selection cancelled"),
        }
        anyhow::Error::new(e)
    })?;
    info!("Acquired {} files from {}", files.len(), args.path.display());

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current group");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let pipeline = BatchPipeline::new(Arc::new(config.ingest.clone())).with_cancellation(cancelled);
    let progress = FnProgress(|done, total| info!("Processed {}/{} files", done, total));
    let records = pipeline.process_files(files, &progress).await?;

    Ok(records)
}

async fn acquire(path: &Path, source: Source) -> Result<Vec<SourceFile>, AcquireError> {
    match source {
        Source::Scan => {
            let scanner = DirectoryScanner::new(path);
            tokio::task::block_in_place(|| scanner.scan_sources())
        }
        Source::Handle => files_from_directory(&FsDirectoryHandle::new(path)).await,
        Source::Drop => {
            let entry = tokio::task::block_in_place(|| DroppedEntry::from_path(path))?;
            Ok(collect_dropped(vec![entry]))
        }
    }
}

fn client_for(config: &mut Config, api_url: Option<String>) -> Result<AnalysisClient> {
    if let Some(url) = api_url {
        config.analysis.base_url = url;
    }
    AnalysisClient::new(&config.analysis).context("Failed to create analysis client")
}

/// Logs the user-facing message before handing the error to anyhow.
fn report(err: AnalyzeError) -> anyhow::Error {
    log::error!("{}", err.user_message());
    anyhow::Error::new(err)
}

fn print_records(records: &[ProcessedRecord], format: OutputFormat) -> Result<()> {
    print_value(&records, format, || {
        records
            .iter()
            .map(|r| {
                let status = match (&r.extracted_text, &r.error) {
                    (_, Some(error)) => format!("error: {}", error),
                    (Some(text), None) => format!("{} chars", text.chars().count()),
                    (None, None) => "no text".to_string(),
                };
                format!("{}  {} bytes  {}", r.path, r.size, status)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn print_structure(response: &AnalyzeResponse, format: OutputFormat) -> Result<()> {
    print_value(response, format, || {
        let mut lines = vec![format!(
            "Collection {} ({} files)",
            response.collection_id, response.total_files
        )];
        for (category, subcategories) in &response.organized_structure {
            lines.push(category.clone());
            for (subcategory, folders) in subcategories {
                lines.push(format!("  {}", subcategory));
                for (folder, files) in folders {
                    lines.push(format!("    {}/", folder));
                    lines.extend(files.iter().map(|f| format!("      {}", f.name)));
                }
            }
        }
        lines.join("\n")
    })
}

fn print_value<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}
