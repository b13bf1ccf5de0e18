//! `flipcheck` binary: rebuild or upsert the combined metrics table, and
//! classify a single base pair.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flipcheck_analysis::{ClassifyOutcome, ClassifyRequest, Pipeline};
use flipcheck_core::config::{CliOverrides, FlipcheckConfig};
use flipcheck_core::constants::VERSION;
use flipcheck_core::errors::{FlipcheckErrorCode, PipelineError};
use flipcheck_core::tracing::init_tracing;
use flipcheck_core::CompositeKey;

#[derive(Parser, Debug)]
#[command(name = "flipcheck")]
#[command(version = VERSION)]
#[command(about = "Decide whether a modeled purine is better explained as WC or HG", long_about = None)]
struct Cli {
    /// Working root holding the classification and pair directories
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory of the summary tables, relative to the root
    #[arg(long)]
    classification_dir: Option<String>,

    /// Directory rendered reports are written to, relative to the root
    #[arg(long)]
    reports_dir: Option<String>,

    /// Report format: text or json
    #[arg(long)]
    report_format: Option<String>,

    /// Keep pair working directories regardless of the verdict
    #[arg(long)]
    no_cleanup: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the combined table from every summary table
    Rebuild,

    /// Refresh one pair's row in the combined table
    #[command(allow_negative_numbers = true)]
    Upsert(KeyArgs),

    /// Classify one pair, log the result and write its report
    #[command(allow_negative_numbers = true)]
    Classify {
        pdb_id: String,
        resolution: String,
        chain_1: String,
        nt_type_1: String,
        nt_number_1: i64,
        chain_2: String,
        nt_type_2: String,
        nt_number_2: i64,
        /// Glycosidic conformation of side 1 (syn or anti)
        chi_1: String,
        /// Glycosidic conformation of side 2 (syn or anti)
        chi_2: String,
    },
}

#[derive(Args, Debug)]
struct KeyArgs {
    pdb_id: String,
    chain_1: String,
    nt_type_1: String,
    nt_number_1: i64,
    chain_2: String,
    nt_type_2: String,
    nt_number_2: i64,
}

impl KeyArgs {
    fn key(&self) -> CompositeKey {
        CompositeKey::new(
            &self.pdb_id,
            &self.chain_1,
            &self.nt_type_1,
            self.nt_number_1,
            &self.chain_2,
            &self.nt_type_2,
            self.nt_number_2,
        )
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            classification_dir: self.classification_dir.clone(),
            reports_dir: self.reports_dir.clone(),
            report_format: self.report_format.clone(),
            cleanup_enabled: self.no_cleanup.then_some(false),
        }
    }
}

/// Attach the stable error code so scripts can match on it.
fn coded(e: PipelineError) -> anyhow::Error {
    anyhow::anyhow!(e.coded_string())
}

fn print_outcome(outcome: &ClassifyOutcome) {
    let record = &outcome.record;
    println!("{}: {}", record.key, record.verdict());
    println!(
        "  conformation: {}({}) -> {}",
        record.purine.nt_type, record.conformation, record.conformation_bp
    );
    println!(
        "  votes: WC {} / HG {} / ambiguous {} (rule: {})",
        record.classification.tally.wc,
        record.classification.tally.hg,
        record.classification.tally.ambiguous,
        record.classification.rule
    );
    if let Some(path) = &outcome.report_path {
        println!("  report: {}", path.display());
    }
    println!("  cleanup: {:?}", outcome.cleanup);
}

fn run(cli: Cli) -> Result<()> {
    let config = FlipcheckConfig::load(&cli.root, Some(&cli.overrides()))
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("failed to load configuration")?;
    let pipeline = Pipeline::new(config, &cli.root)
        .map_err(coded)
        .context("failed to set up pipeline")?;

    match cli.command {
        Command::Rebuild => {
            let summary = pipeline
                .rebuild_all()
                .map_err(coded)
                .context("rebuild failed")?;
            println!(
                "Combined {} rows from {} tables into {}",
                summary.rows,
                summary.sources_present,
                pipeline.layout().combined_path.display()
            );
        }
        Command::Upsert(args) => {
            let key = args.key();
            let summary = pipeline
                .upsert_one(&key)
                .map_err(coded)
                .with_context(|| format!("upsert failed for {key}"))?;
            if summary.rebuilt {
                println!("Combined table was rebuilt first");
            }
            println!("{:?} {}", summary.action, summary.record.key);
        }
        Command::Classify {
            pdb_id,
            resolution,
            chain_1,
            nt_type_1,
            nt_number_1,
            chain_2,
            nt_type_2,
            nt_number_2,
            chi_1,
            chi_2,
        } => {
            let request = ClassifyRequest {
                key: CompositeKey::new(
                    pdb_id,
                    chain_1,
                    nt_type_1,
                    nt_number_1,
                    chain_2,
                    nt_type_2,
                    nt_number_2,
                ),
                resolution,
                conformation_1: chi_1,
                conformation_2: chi_2,
            };
            let outcome = pipeline
                .classify_one(&request)
                .map_err(coded)
                .with_context(|| format!("classification failed for {}", request.key))?;
            print_outcome(&outcome);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(root = %cli.root.display(), "flipcheck starting");
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_arguments_follow_pipeline_order() {
        let cli = Cli::try_parse_from([
            "flipcheck", "--no-cleanup", "classify", "1ABC", "2.5", "A", "g", "-3", "B", "C", "20",
            "syn", "anti",
        ])
        .unwrap();
        assert_eq!(cli.overrides().cleanup_enabled, Some(false));
        match cli.command {
            Command::Classify {
                nt_type_1,
                nt_number_1,
                chi_1,
                chi_2,
                ..
            } => {
                assert_eq!(nt_type_1, "g");
                assert_eq!(nt_number_1, -3);
                assert_eq!(chi_1, "syn");
                assert_eq!(chi_2, "anti");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn upsert_takes_seven_key_fields() {
        let cli = Cli::try_parse_from([
            "flipcheck", "upsert", "1abc", "A", "G", "10", "B", "C", "20",
        ])
        .unwrap();
        let Command::Upsert(args) = cli.command else {
            panic!("expected upsert");
        };
        assert_eq!(args.key(), CompositeKey::new("1abc", "A", "G", 10, "B", "C", 20));
        assert!(Cli::try_parse_from(["flipcheck", "upsert", "1abc", "A"]).is_err());
    }

    #[test]
    fn flags_default_to_config() {
        let cli = Cli::try_parse_from(["flipcheck", "rebuild"]).unwrap();
        let o = cli.overrides();
        assert!(o.cleanup_enabled.is_none());
        assert!(o.report_format.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
