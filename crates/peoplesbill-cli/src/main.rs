//! `peoplesbill`: cluster citizen submissions and draft bill clauses from
//! the command line.
//!
//! Input files are JSON arrays of submissions
//! (`{"id", "content", "region", "age"?, "occupation"?, "created_at"?}`).

mod display;
mod export;
mod input;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use peoplesbill_ai::{ClusteringConfig, ClusteringEngine};
use peoplesbill_core::{Clause, bill};
use peoplesbill_core::stats::{
    ClusterDemographics, participation, submissions_by_region, submissions_over_time,
};
use peoplesbill_draft::{ClauseGenerator, validate_clause};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peoplesbill", version, about = "Cluster citizen submissions and draft bill clauses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group submissions into themed clusters
    Cluster {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long, value_enum, default_value_t = Format::Table, env = "PEOPLESBILL_FORMAT")]
        format: Format,
        /// Also write the cluster batch to this Arrow IPC file
        #[arg(long)]
        ipc: Option<PathBuf>,
    },
    /// Rank submissions by similarity to a query
    Similar {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, short)]
        query: String,
        #[arg(long, default_value_t = 5, env = "PEOPLESBILL_TOP_K")]
        top_k: usize,
        #[arg(long)]
        json: bool,
    },
    /// Cluster submissions and draft one clause per cluster
    Draft {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        tuning: Tuning,
        #[arg(long)]
        json: bool,
        /// Also write the clause batch to this Arrow IPC file
        #[arg(long)]
        ipc: Option<PathBuf>,
    },
    /// Merge two clusters from a cluster JSON file (indices are 0-based)
    Merge {
        #[arg(long, env = "PEOPLESBILL_CLUSTERS")]
        clusters: PathBuf,
        first: usize,
        second: usize,
    },
    /// Check a clause body for drafting form
    Validate {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Demographics, participation and recent volume
    Stats {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON file holding an array of submissions
    #[arg(long, short, env = "PEOPLESBILL_INPUT")]
    input: PathBuf,
}

/// Overrides for [`ClusteringConfig`].
#[derive(Args)]
struct Tuning {
    #[arg(long, env = "PEOPLESBILL_EPS")]
    eps: Option<f64>,
    #[arg(long, env = "PEOPLESBILL_MIN_SAMPLES")]
    min_samples: Option<usize>,
    #[arg(long, env = "PEOPLESBILL_MAX_FEATURES")]
    max_features: Option<usize>,
    #[arg(long, env = "PEOPLESBILL_PCA_COMPONENTS")]
    pca_components: Option<usize>,
}

impl Tuning {
    fn config(&self) -> ClusteringConfig {
        let mut config = ClusteringConfig::default();
        if let Some(eps) = self.eps {
            config.eps = eps;
        }
        if let Some(min_samples) = self.min_samples {
            config.min_samples = min_samples;
        }
        if let Some(max_features) = self.max_features {
            config.max_features = max_features;
        }
        if let Some(pca_components) = self.pca_components {
            config.pca_components = pca_components;
        }
        config
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Cards,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("peoplesbill v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Cluster {
            input,
            tuning,
            format,
            ipc,
        } => cmd_cluster(&input, &tuning, format, ipc.as_deref()),
        Commands::Similar { input, query, top_k, json } => cmd_similar(&input, &query, top_k, json),
        Commands::Draft {
            input,
            tuning,
            json,
            ipc,
        } => cmd_draft(&input, &tuning, json, ipc.as_deref()),
        Commands::Merge { clusters, first, second } => cmd_merge(&clusters, first, second),
        Commands::Validate { text, json } => cmd_validate(&text, json),
        Commands::Stats { input, json } => cmd_stats(&input, json),
    }
}

fn cmd_cluster(source: &InputArgs, tuning: &Tuning, format: Format, ipc: Option<&Path>) -> Result<()> {
    let submissions = input::load_submissions(&source.input)?;
    let clusters = ClusteringEngine::new(tuning.config()).cluster_submissions(&submissions);

    if let Some(path) = ipc {
        let batch = bill::clusters_to_batch(&clusters).context("building cluster batch")?;
        export::write_ipc(path, &batch)?;
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&clusters)?),
        Format::Table | Format::Cards => {
            if clusters.is_empty() {
                println!("No clusters.");
                return Ok(());
            }
            let batch = bill::clusters_to_batch(&clusters).context("building cluster batch")?;
            if matches!(format, Format::Cards) {
                display::print_cluster_cards(&batch)?;
            } else {
                display::print_cluster_table(&batch)?;
            }
        }
    }
    Ok(())
}

fn cmd_similar(source: &InputArgs, query: &str, top_k: usize, json: bool) -> Result<()> {
    let submissions = input::load_submissions(&source.input)?;
    let hits = ClusteringEngine::default().find_similar(query, &submissions, top_k);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("No similar submissions.");
        return Ok(());
    }
    for hit in &hits {
        println!(
            "  {:.2}  #{:<6} {:<14} {}",
            hit.similarity_score,
            hit.submission.id,
            hit.submission.region.name(),
            display::preview(&hit.submission.content)
        );
    }
    Ok(())
}

fn cmd_draft(source: &InputArgs, tuning: &Tuning, json: bool, ipc: Option<&Path>) -> Result<()> {
    let submissions = input::load_submissions(&source.input)?;
    let clusters = ClusteringEngine::new(tuning.config()).cluster_submissions(&submissions);
    let generator = ClauseGenerator::new();

    let drafts: Vec<_> = clusters
        .iter()
        .map(|cluster| {
            let members = input::members(cluster, &submissions);
            let clause = generator.generate(cluster, &members);
            let validation = validate_clause(&clause.content);
            (cluster, clause, validation)
        })
        .collect();
    info!(clauses = drafts.len(), "drafting complete");

    if let Some(path) = ipc {
        let clauses: Vec<Clause> = drafts.iter().map(|(_, clause, _)| clause.clone()).collect();
        let batch = bill::clauses_to_batch(&clauses).context("building clause batch")?;
        export::write_ipc(path, &batch)?;
    }

    if json {
        let out: Vec<serde_json::Value> = drafts
            .iter()
            .map(|(cluster, clause, validation)| {
                serde_json::json!({
                    "theme": cluster.theme,
                    "clause": clause,
                    "validation": validation,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if drafts.is_empty() {
        println!("No clauses drafted.");
        return Ok(());
    }
    for (i, (_, clause, validation)) in drafts.iter().enumerate() {
        display::print_clause_card(i, clause, validation);
    }
    Ok(())
}

fn cmd_merge(path: &Path, first: usize, second: usize) -> Result<()> {
    let clusters = input::load_clusters(path)?;
    let a = input::pick(&clusters, first)?;
    let b = input::pick(&clusters, second)?;
    let merged = ClusteringEngine::default().merge_clusters(a, b);
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn cmd_validate(text: &str, json: bool) -> Result<()> {
    let validation = validate_clause(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else {
        display::print_validation(&validation);
    }
    Ok(())
}

fn cmd_stats(source: &InputArgs, json: bool) -> Result<()> {
    let submissions = input::load_submissions(&source.input)?;
    let demographics = ClusterDemographics::from_submissions(&submissions);
    let rates = participation(&submissions_by_region(&submissions));
    let recent = submissions_over_time(&submissions, Utc::now());

    if json {
        let out = serde_json::json!({
            "demographics": demographics,
            "participation": rates,
            "recent": recent,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        display::print_stats(&demographics, &rates, &recent);
    }
    Ok(())
}
