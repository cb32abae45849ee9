use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use history_graph::{CommitHistory, CommitRecord, HistoryConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "history")]
#[command(about = "Attribute crawled commits to branches and color them", long_about = None)]
struct Cli {
    /// JSON file holding an array of commit records
    input: PathBuf,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the short id length
    #[arg(long)]
    short_id_len: Option<usize>,
    /// Print the attributed graph as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HistoryConfig::load(path)?,
        None => HistoryConfig::default(),
    };
    if let Some(len) = cli.short_id_len {
        config.short_id_len = len;
    }

    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let records: Vec<CommitRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse commit records in {}", cli.input.display()))?;
    tracing::debug!(path = %cli.input.display(), records = records.len(), "loaded commit records");

    let history = CommitHistory::from_records(&records, &config)?;
    let dag = history.dag();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(dag)?);
        return Ok(());
    }

    let stats = dag.stats();
    println!(
        "Commits: {}  Edges: {}  Merges: {}",
        stats.total_commits, stats.total_edges, stats.merge_commits
    );
    println!("Branches:");
    for name in history.branch_names() {
        println!("  {} {}", history.palette().color_for(Some(name.as_str())), name);
    }
    if stats.unattributed > 0 {
        println!(
            "  {} (no branch, {} commits)",
            history.palette().unassigned(),
            stats.unattributed
        );
    }
    println!();

    for node in dag.nodes() {
        let color = node.color.unwrap_or(history.palette().unassigned());
        let branch = node.branch.as_deref().unwrap_or("-");
        let summary = node.message.lines().next().unwrap_or("");
        println!("{} {} {:<20} {}", node.short_id, color, branch, summary);
    }

    Ok(())
}
