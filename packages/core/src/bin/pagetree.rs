//! PageTree Operator CLI
//!
//! Offline front end for the restructuring engine. Trees and plans are read as
//! JSON files in the same camelCase shape the service layer serializes, and
//! every result is printed to stdout as pretty JSON. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! pagetree plan original.json draft.json
//! pagetree validate tree.json plan.json
//! pagetree move draft.json <dragged-id> <target-id> <before|after|inside>
//! pagetree dry-run tree.json plan.json
//! pagetree page-id "https://example.atlassian.net/wiki/spaces/DOC/pages/123/Title"
//! ```
//!
//! # Environment Variables
//!
//! - `PAGETREE_MAX_PAGES`: Largest tree accepted (default: 500)
//! - `PAGETREE_SESSION_TTL_SECS`: Session lifetime (default: 1800)
//! - `PAGETREE_MAX_RETRIES`: Retries for transient move failures (default: 2)
//! - `PAGETREE_RETRY_BASE_DELAY_MS`: First retry backoff (default: 300)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use pagetree_core::utils::extract_page_id_from_url;
use pagetree_core::{
    CommitOptions, DropPosition, EngineConfig, MoveExecutor, MoveFailure, MoveOperation,
    PageNode, RestructureService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "pagetree", version, about = "Plan, validate and rehearse page tree moves")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the move plan turning the original tree into the draft.
    Plan {
        /// Loaded tree JSON path (PageNode)
        original: PathBuf,
        /// Edited tree JSON path (PageNode)
        draft: PathBuf,
    },
    /// Validate a move plan against a loaded tree.
    Validate {
        /// Loaded tree JSON path (PageNode)
        tree: PathBuf,
        /// Plan JSON path (array of MoveOperation)
        plan: PathBuf,
    },
    /// Apply one drag-and-drop edit and print the new draft.
    Move {
        /// Draft tree JSON path (PageNode)
        draft: PathBuf,
        /// Page being dragged
        dragged: String,
        /// Page it is dropped on
        target: String,
        /// Where the dragged page lands relative to the target
        #[arg(value_enum)]
        position: Position,
    },
    /// Run a guarded commit in dry-run mode and print the report.
    DryRun {
        /// Loaded tree JSON path (PageNode)
        tree: PathBuf,
        /// Plan JSON path (array of MoveOperation)
        plan: PathBuf,
    },
    /// Extract the page id from a page URL.
    PageId {
        url: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Position {
    Before,
    After,
    Inside,
}

impl From<Position> for DropPosition {
    fn from(position: Position) -> Self {
        match position {
            Position::Before => DropPosition::Before,
            Position::After => DropPosition::After,
            Position::Inside => DropPosition::Inside,
        }
    }
}

/// Executor for a CLI without a backend connection; only dry runs succeed
struct OfflineExecutor;

#[async_trait]
impl MoveExecutor for OfflineExecutor {
    async fn move_page(&self, operation: &MoveOperation) -> Result<(), MoveFailure> {
        Err(MoveFailure::new(format!(
            "Move failed ({}): no backend configured",
            operation.page_id
        )))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let service = RestructureService::new(EngineConfig::from_env())?;

    match cli.cmd {
        Command::Plan { original, draft } => {
            let original = service.admit_tree(&read_json::<PageNode>(&original)?)?.tree;
            let draft: PageNode = read_json(&draft)?;
            print_json(&service.plan(&original, &draft)?)
        }

        Command::Validate { tree, plan } => {
            let tree = service.admit_tree(&read_json::<PageNode>(&tree)?)?.tree;
            let plan: Vec<MoveOperation> = read_json(&plan)?;
            let response = service.validate(&tree, &plan);
            if !response.ok {
                tracing::warn!("Plan has {} validation finding(s)", response.errors.len());
            }
            print_json(&response)
        }

        Command::Move {
            draft,
            dragged,
            target,
            position,
        } => {
            let draft: PageNode = read_json(&draft)?;
            print_json(&service.drag_drop(&draft, &dragged, &target, position.into())?)
        }

        Command::DryRun { tree, plan } => {
            let tree = service.admit_tree(&read_json::<PageNode>(&tree)?)?.tree;
            let plan: Vec<MoveOperation> = read_json(&plan)?;
            let report = service
                .commit(&tree, &plan, &OfflineExecutor, &CommitOptions::dry_run())
                .await?;
            print_json(&report)
        }

        Command::PageId { url } => {
            println!("{}", extract_page_id_from_url(&url)?);
            Ok(())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
