//! classify-one end to end: combined table in, results log, report and cleanup out.

use std::fs;
use std::path::{Path, PathBuf};

use flipcheck_analysis::cleanup::CleanupOutcome;
use flipcheck_analysis::record::RESULTS_HEADER;
use flipcheck_analysis::{ClassifyRequest, Pipeline, Verdict};
use flipcheck_core::config::FlipcheckConfig;
use flipcheck_core::errors::{ClassifyError, PipelineError, ResolveError};
use flipcheck_core::types::CompositeKey;
use flipcheck_storage::append_log::append_metric_row;
use flipcheck_storage::MetricSource;

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    pipeline: Pipeline,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(FlipcheckConfig::default())
    }

    fn with_config(config: FlipcheckConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("work");
        fs::create_dir_all(&root).unwrap();
        let pipeline = Pipeline::new(config, &root).unwrap();
        Self {
            _dir: dir,
            root,
            pipeline,
        }
    }

    fn append(&self, source: MetricSource, key: &CompositeKey, values: &[Option<f64>]) {
        let path = self.pipeline.layout().source_path(source);
        append_metric_row(path, source, key, values).unwrap();
    }

    fn pair_dir(&self, name: &str) -> PathBuf {
        let dir = self.root.join("PDB_without_nt").join(name);
        fs::create_dir_all(dir.join("WC")).unwrap();
        fs::create_dir_all(dir.join("HG")).unwrap();
        dir
    }

    fn results(&self) -> Option<String> {
        fs::read_to_string(&self.pipeline.layout().results_path).ok()
    }
}

fn key() -> CompositeKey {
    CompositeKey::new("1abc", "A", "G", 10, "B", "C", 20)
}

fn request(key: CompositeKey, chi_1: &str) -> ClassifyRequest {
    ClassifyRequest {
        key,
        resolution: "2.5".to_string(),
        conformation_1: chi_1.to_string(),
        conformation_2: "anti".to_string(),
    }
}

/// RSCC, EDIA and clash-bp all favour the WC-labeled model.
fn seed_wc_favoured(fx: &Fixture, key: &CompositeKey) {
    fx.append(MetricSource::Rscc, key, &[Some(0.9), Some(0.8)]);
    fx.append(MetricSource::Edia, key, &[Some(0.9), Some(0.8)]);
    fx.append(
        MetricSource::Clashscore,
        key,
        &[None, None, Some(1.0), Some(3.0), None, None],
    );
    fx.append(MetricSource::BFactor, key, &[Some(35.0), Some(30.0)]);
    fx.pipeline.rebuild_all().unwrap();
}

fn last_line(text: &str) -> Vec<String> {
    text.lines()
        .last()
        .unwrap()
        .split_whitespace()
        .map(String::from)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Results log, report and cleanup
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_wc_verdict_logs_reports_and_cleans_up() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    let pair_dir = fx.pair_dir("1abc_A_10");

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Wc);
    assert_eq!(outcome.cleanup, CleanupOutcome::Removed);
    assert!(!pair_dir.exists());

    let results = fx.results().unwrap();
    let mut lines = results.lines();
    assert_eq!(lines.next().unwrap(), RESULTS_HEADER.join(" "));
    let expected = "1abc 2.5 A G 10 B C 20 \
                    0.900 0.800 0.100 0.900 0.800 0.100 \
                    1.0 3.0 -2.0 NA NA NA NA NA \
                    NA NA NA NA NA NA \
                    30.0 35.0 WC WC";
    assert_eq!(lines.next().unwrap(), expected);
    assert_eq!(last_line(&results).len(), 32);

    let report = outcome.report_path.unwrap();
    assert_eq!(report, fx.root.join("reports").join("1abc_A_G_10_B_C_20.txt"));
    let text = fs::read_to_string(report).unwrap();
    assert!(text.contains("Overall Result: WC"));
    let rscc: Vec<&str> = text
        .lines()
        .find(|l| l.starts_with("RSCC"))
        .unwrap()
        .split_whitespace()
        .collect();
    assert_eq!(rscc, ["RSCC", "0.800", "0.900", "0.100", "WC"]);
    let clash_global: Vec<&str> = text
        .lines()
        .find(|l| l.starts_with("Clashscore global"))
        .unwrap()
        .split_whitespace()
        .collect();
    assert_eq!(clash_global, ["Clashscore", "global", "NA", "NA", "NA", "N/A"]);
    assert!(text.contains("Original conformation: G(anti) - WC"));
    assert!(text.contains("1abc_A_10_B_20_WC_map_water_90.png"));
}

#[test]
fn test_hg_verdict_keeps_pair_dir() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    let pair_dir = fx.pair_dir("1abc_A_10");

    // Modeled syn: the HG-labeled columns become the reference and lose.
    let outcome = fx.pipeline.classify_one(&request(key(), "syn")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Hg);
    assert_eq!(outcome.cleanup, CleanupOutcome::Kept);
    assert!(pair_dir.exists());

    let fields = last_line(&fx.results().unwrap());
    // Reference (HG-labeled) values come first after the swap.
    assert_eq!(&fields[8..11], &["0.800", "0.900", "-0.100"]);
    assert_eq!(&fields[14..17], &["3.0", "1.0", "2.0"]);
    assert_eq!(&fields[28..30], &["35.0", "30.0"]);
    assert_eq!(fields[30], "HG");
    assert_eq!(fields[31], "HG");
}

#[test]
fn test_poor_density_removes_pair_dir() {
    let fx = Fixture::new();
    fx.append(MetricSource::Edia, &key(), &[Some(0.3), Some(0.2)]);
    fx.pipeline.rebuild_all().unwrap();
    let pair_dir = fx.pair_dir("1abc_A_10");

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::PoorDensity);
    assert_eq!(outcome.cleanup, CleanupOutcome::Removed);
    assert!(!pair_dir.exists());
    assert!(fx.results().unwrap().ends_with("WC Poor electron density\n"));
}

#[test]
fn test_total_failure_reads_occupancy_of_wc_model() {
    let fx = Fixture::new();
    fx.append(MetricSource::Rscc, &key(), &[None, None]);
    fx.pipeline.rebuild_all().unwrap();
    let pair_dir = fx.pair_dir("1abc_A_10");
    fs::write(pair_dir.join("WC").join("occupancy"), "0.87\n").unwrap();

    let outcome = fx.pipeline.classify_one(&request(key(), "syn")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::OccupancyNot1);
    assert_eq!(outcome.cleanup, CleanupOutcome::Kept);
    assert!(pair_dir.exists());

    fs::write(pair_dir.join("WC").join("occupancy"), "1.000").unwrap();
    let outcome = fx.pipeline.classify_one(&request(key(), "syn")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Error);

    fs::remove_file(pair_dir.join("WC").join("occupancy")).unwrap();
    let outcome = fx.pipeline.classify_one(&request(key(), "syn")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Error);

    // Three runs, three appended lines under one header.
    assert_eq!(fx.results().unwrap().lines().count(), 4);
}

#[test]
fn test_cleanup_can_be_disabled() {
    let config = FlipcheckConfig::from_toml("[cleanup]\nenabled = false\n").unwrap();
    let fx = Fixture::with_config(config);
    seed_wc_favoured(&fx, &key());
    let pair_dir = fx.pair_dir("1abc_A_10");

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Wc);
    assert_eq!(outcome.cleanup, CleanupOutcome::Disabled);
    assert!(pair_dir.exists());
}

#[test]
fn test_missing_pair_dir_is_not_an_error() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert_eq!(outcome.cleanup, CleanupOutcome::NotFound);
}

#[test]
fn test_pair_dir_found_under_second_root() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    let outer = fx.root.parent().unwrap().join("PDB_without_nt").join("1abc_A_10");
    fs::create_dir_all(outer.join("WC")).unwrap();

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert_eq!(outcome.record.pair_dir, fx.root.join("../PDB_without_nt/1abc_A_10"));
    assert_eq!(outcome.cleanup, CleanupOutcome::Removed);
    assert!(!outer.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// Lookup and input errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_lookup_normalises_case() {
    let fx = Fixture::new();
    let stored = CompositeKey::new("1ABC", "A", "G", 10, "B", "C", 20);
    seed_wc_favoured(&fx, &stored);

    let asked = CompositeKey::new("1AbC", "A", "g", 10, "B", "c", 20);
    let outcome = fx.pipeline.classify_one(&request(asked, "anti")).unwrap();
    assert_eq!(outcome.record.key, key());
    assert_eq!(outcome.record.verdict(), Verdict::Wc);
}

#[test]
fn test_unknown_key_writes_nothing() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    let other = CompositeKey::new("9zzz", "A", "G", 1, "B", "C", 2);

    match fx.pipeline.classify_one(&request(other, "anti")) {
        Err(PipelineError::Classify(ClassifyError::KeyNotFound { .. })) => {}
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
    assert!(fx.results().is_none());
    assert!(!fx.root.join("reports").exists());
}

#[test]
fn test_missing_combined_table() {
    let fx = Fixture::new();
    match fx.pipeline.classify_one(&request(key(), "anti")) {
        Err(PipelineError::Classify(ClassifyError::CombinedTableMissing { .. })) => {}
        other => panic!("expected CombinedTableMissing, got {other:?}"),
    }
}

#[test]
fn test_ambiguous_purine_writes_nothing() {
    let fx = Fixture::new();
    let both = CompositeKey::new("1abc", "A", "G", 10, "B", "A", 20);
    seed_wc_favoured(&fx, &both);
    match fx.pipeline.classify_one(&request(both, "anti")) {
        Err(PipelineError::Resolve(ResolveError::BothPurines { .. })) => {}
        other => panic!("expected BothPurines, got {other:?}"),
    }
    assert!(fx.results().is_none());
}

#[test]
fn test_unknown_conformation_rejected_unless_allowed() {
    let fx = Fixture::new();
    seed_wc_favoured(&fx, &key());
    assert!(matches!(
        fx.pipeline.classify_one(&request(key(), "high-anti")),
        Err(PipelineError::Resolve(ResolveError::UnknownConformation { .. }))
    ));

    let config =
        FlipcheckConfig::from_toml("[classifier]\nallow_unknown_conformation = true\n").unwrap();
    let fx = Fixture::with_config(config);
    seed_wc_favoured(&fx, &key());
    let outcome = fx.pipeline.classify_one(&request(key(), "high-anti")).unwrap();
    assert_eq!(outcome.record.verdict(), Verdict::Wc);
    assert_eq!(last_line(&fx.results().unwrap())[30], "Other");
}

// ═══════════════════════════════════════════════════════════════════════════
// Report formats
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_json_report() {
    let config = FlipcheckConfig::from_toml("[report]\nformat = \"json\"\n").unwrap();
    let fx = Fixture::with_config(config);
    seed_wc_favoured(&fx, &key());

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    let path = outcome.report_path.unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["classification"]["verdict"], "WC");
    assert_eq!(value["conformation_bp"], "WC");
    assert_eq!(value["key"]["pdb_id"], "1abc");
}

#[test]
fn test_reports_disabled() {
    let config = FlipcheckConfig::from_toml("[report]\nenabled = false\n").unwrap();
    let fx = Fixture::with_config(config);
    seed_wc_favoured(&fx, &key());

    let outcome = fx.pipeline.classify_one(&request(key(), "anti")).unwrap();
    assert!(outcome.report_path.is_none());
    assert!(fx.results().is_some());
    assert!(!Path::new(&fx.root.join("reports")).exists());
}
