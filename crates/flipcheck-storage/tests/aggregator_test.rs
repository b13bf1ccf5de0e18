//! Aggregator behaviour against real files in a temporary classification dir.

use std::fs;
use std::path::Path;

use flipcheck_core::errors::TableError;
use flipcheck_core::types::{CompositeKey, DeltaField, Geometry, Metric};
use flipcheck_storage::append_log::append_metric_row;
use flipcheck_storage::{Aggregator, CombinedTable, MetricSource, StorageLayout, UpsertAction};

fn key(pdb: &str, n1: i64) -> CompositeKey {
    CompositeKey::new(pdb, "A", "G", n1, "B", "C", n1 + 10)
}

fn setup() -> (tempfile::TempDir, Aggregator) {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = Aggregator::new(StorageLayout::in_dir(dir.path()));
    (dir, aggregator)
}

fn append(agg: &Aggregator, source: MetricSource, key: &CompositeKey, values: &[Option<f64>]) {
    append_metric_row(agg.layout().source_path(source), source, key, values).unwrap();
}

fn combined_text(agg: &Aggregator) -> String {
    fs::read_to_string(&agg.layout().combined_path).unwrap()
}

fn load_combined(path: &Path) -> CombinedTable {
    CombinedTable::load(path).unwrap().unwrap()
}

/// Three keys spread over sparse tables: k1 everywhere, k2 only in RSCC and
/// clashscore, k3 only in B-factor.
fn seed(agg: &Aggregator) -> [CompositeKey; 3] {
    let (k1, k2, k3) = (key("1abc", 1), key("2def", 2), key("3ghi", 3));
    append(
        agg,
        MetricSource::RValues,
        &k1,
        &[Some(0.2), Some(0.19), Some(0.23), Some(0.21), Some(0.2), Some(0.24)],
    );
    append(agg, MetricSource::Rscc, &k1, &[Some(0.85), Some(0.80)]);
    append(agg, MetricSource::Rscc, &k2, &[Some(0.70), None]);
    append(agg, MetricSource::Edia, &k1, &[Some(0.9), Some(0.7)]);
    append(
        agg,
        MetricSource::Clashscore,
        &k2,
        &[Some(3.0), Some(3.5), Some(10.0), Some(5.0), Some(2.0), Some(2.0)],
    );
    append(agg, MetricSource::Clashscore, &k1, &[Some(1.0); 6]);
    append(agg, MetricSource::BFactor, &k3, &[Some(40.0), Some(35.5)]);
    [k1, k2, k3]
}

// ═══════════════════════════════════════════════════════════════════════════
// Rebuild
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rebuild_join_completeness() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);

    let summary = agg.rebuild_all().unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.sources_present, 5);

    let table = load_combined(&agg.layout().combined_path);
    let order: Vec<&CompositeKey> = table.records().into_iter().map(|r| &r.key).collect();
    // R-values seeds k1; RSCC adds k2; B-factor adds k3.
    assert_eq!(order, vec![&keys[0], &keys[1], &keys[2]]);

    let k3 = table.get(&keys[2]).unwrap();
    assert_eq!(k3.get(Metric::MeanB, Geometry::Hg), Some(40.0));
    assert_eq!(k3.get(Metric::Rscc, Geometry::Wc), None);
}

#[test]
fn test_rebuild_deltas_and_missing() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    agg.rebuild_all().unwrap();

    let table = load_combined(&agg.layout().combined_path);
    let k1 = table.get(&keys[0]).unwrap();
    let rscc = k1.delta(DeltaField::Rscc).unwrap();
    assert!((rscc - 0.05).abs() < 1e-12);
    assert_eq!(k1.delta(DeltaField::ClashBp), Some(0.0));

    let k2 = table.get(&keys[1]).unwrap();
    assert_eq!(k2.delta(DeltaField::Rscc), None);
    assert_eq!(k2.delta(DeltaField::ClashBp), Some(5.0));
    assert_eq!(k2.delta(DeltaField::ClashNeighbour), Some(0.0));
    assert_eq!(k2.delta(DeltaField::Edia), None);
}

#[test]
fn test_rebuild_header_and_none_tokens() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    agg.rebuild_all().unwrap();

    let text = combined_text(&agg);
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split_whitespace().collect();
    assert_eq!(header.len(), 29);
    assert_eq!(header[15], "delta_RSCC");
    assert_eq!(header[27], "mean_B_HG");

    let k3_line = lines.find(|l| l.starts_with(&keys[2].pdb_id)).unwrap();
    let cells: Vec<&str> = k3_line.split_whitespace().collect();
    assert_eq!(cells.len(), 29);
    assert_eq!(cells[13], "None");
    assert_eq!(cells[27], "40.0");
}

#[test]
fn test_rebuild_drops_duplicate_keys() {
    let (_dir, agg) = setup();
    let k = key("1abc", 1);
    append(&agg, MetricSource::Rscc, &k, &[Some(0.5), Some(0.4)]);
    append(&agg, MetricSource::Rscc, &k, &[Some(0.9), Some(0.9)]);

    agg.rebuild_all().unwrap();
    let table = load_combined(&agg.layout().combined_path);
    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].get(Metric::Rscc, Geometry::Wc), Some(0.5));
}

#[test]
fn test_rebuild_without_sources_fails() {
    let (_dir, agg) = setup();
    match agg.rebuild_all() {
        Err(TableError::NoSources { .. }) => {}
        other => panic!("expected NoSources, got {other:?}"),
    }
    assert!(!agg.layout().combined_path.exists());
}

#[test]
fn test_malformed_source_treated_as_absent() {
    let (_dir, agg) = setup();
    let k = key("1abc", 1);
    append(&agg, MetricSource::Edia, &k, &[Some(0.6), Some(0.4)]);
    fs::write(agg.layout().source_path(MetricSource::Rscc), "RSCC_WC RSCC_HG\n0.1 0.2\n").unwrap();

    let summary = agg.rebuild_all().unwrap();
    assert_eq!(summary.sources_present, 1);
    assert_eq!(summary.rows, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Upsert
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_upsert_is_idempotent() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    agg.upsert_one(&keys[1]).unwrap();
    let first = combined_text(&agg);
    let outcome = agg.upsert_one(&keys[1]).unwrap();
    assert_eq!(outcome.action, UpsertAction::Updated);
    assert!(!outcome.rebuilt);
    assert_eq!(combined_text(&agg), first);
}

#[test]
fn test_upsert_after_rebuild_changes_nothing() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    agg.rebuild_all().unwrap();
    let rebuilt = combined_text(&agg);

    for k in &keys {
        let outcome = agg.upsert_one(k).unwrap();
        assert_eq!(outcome.action, UpsertAction::Updated);
    }
    assert_eq!(combined_text(&agg), rebuilt);
}

#[test]
fn test_upsert_missing_combined_rebuilds_first() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    let outcome = agg.upsert_one(&keys[0]).unwrap();
    assert!(outcome.rebuilt);
    assert_eq!(outcome.action, UpsertAction::Updated);
    assert_eq!(load_combined(&agg.layout().combined_path).len(), 3);
}

#[test]
fn test_upsert_refreshes_only_its_key() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    agg.rebuild_all().unwrap();
    let before = load_combined(&agg.layout().combined_path);

    // A later producer fills in k2's missing RSCC_HG; first match still wins,
    // so rewrite the RSCC table with the new value first.
    let rscc = agg.layout().source_path(MetricSource::Rscc).to_path_buf();
    fs::remove_file(&rscc).unwrap();
    append(&agg, MetricSource::Rscc, &keys[1], &[Some(0.70), Some(0.60)]);

    agg.upsert_one(&keys[1]).unwrap();
    let after = load_combined(&agg.layout().combined_path);

    let k2 = after.get(&keys[1]).unwrap();
    assert_eq!(k2.get(Metric::Rscc, Geometry::Hg), Some(0.60));
    assert!((k2.delta(DeltaField::Rscc).unwrap() - 0.10).abs() < 1e-12);
    // k1 lost its RSCC row on disk but must not be touched by an upsert of k2.
    assert_eq!(after.get(&keys[0]), before.get(&keys[0]));
    assert_eq!(after.get(&keys[2]), before.get(&keys[2]));
}

#[test]
fn test_upsert_appends_new_key() {
    let (_dir, agg) = setup();
    seed(&agg);
    agg.rebuild_all().unwrap();

    let fresh = key("9zzz", 9);
    append(&agg, MetricSource::Edia, &fresh, &[Some(0.3), Some(0.2)]);
    let outcome = agg.upsert_one(&fresh).unwrap();
    assert_eq!(outcome.action, UpsertAction::Inserted);

    let table = load_combined(&agg.layout().combined_path);
    assert_eq!(table.len(), 4);
    assert_eq!(table.records()[3].key, fresh);
}

#[test]
fn test_upsert_unknown_key_writes_all_missing_row() {
    let (_dir, agg) = setup();
    seed(&agg);
    let ghost = key("0nil", 0);
    let outcome = agg.upsert_one(&ghost).unwrap();
    assert_eq!(outcome.action, UpsertAction::Inserted);
    for metric in Metric::ALL {
        assert_eq!(outcome.record.get(metric, Geometry::Wc), None);
        assert_eq!(outcome.record.get(metric, Geometry::Hg), None);
    }
}

#[test]
fn test_upsert_recovers_from_corrupt_combined() {
    let (_dir, agg) = setup();
    let keys = seed(&agg);
    fs::write(&agg.layout().combined_path, "garbage without key columns\n").unwrap();

    let outcome = agg.upsert_one(&keys[2]).unwrap();
    assert!(outcome.rebuilt);
    assert_eq!(load_combined(&agg.layout().combined_path).len(), 3);
}

#[test]
fn test_incremental_upserts_match_rebuild() {
    let (dir, agg) = setup();
    let keys = seed(&agg);
    agg.rebuild_all().unwrap();
    let rebuilt = combined_text(&agg);

    // Start from an empty table and upsert every key in rebuild order.
    fs::write(
        &agg.layout().combined_path,
        format!("{}\n", flipcheck_storage::COMBINED_COLUMNS.join(" ")),
    )
    .unwrap();
    for k in &keys {
        agg.upsert_one(k).unwrap();
    }
    assert_eq!(combined_text(&agg), rebuilt);
    assert!(!dir.path().join("combined_metrics.txt.tmp").exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// Rows other than the upserted key
// ═══════════════════════════════════════════════════════════════════════════

fn combined_line(key_cells: &str, rscc_wc: &str) -> String {
    let mut cells: Vec<String> = key_cells.split(' ').map(String::from).collect();
    cells.extend(std::iter::repeat("None".to_string()).take(22));
    // RSCC_WC follows the seven key and six R-value columns.
    cells[13] = rscc_wc.to_string();
    cells.join(" ")
}

/// Two rows for 2xyz and one row whose nt_number_1 is not an integer.
fn write_irregular_combined(agg: &Aggregator) -> String {
    let text = format!(
        "{}\n{}\n{}\n{}\n",
        flipcheck_storage::COMBINED_COLUMNS.join(" "),
        combined_line("2xyz A G 4 B C 14", "0.8"),
        combined_line("2xyz A G 4 B C 14", "0.6"),
        combined_line("3qrs A G 7.5 B C 17", "0.7"),
    );
    fs::write(&agg.layout().combined_path, &text).unwrap();
    text
}

#[test]
fn test_upsert_keeps_duplicate_and_unkeyed_rows() {
    let (_dir, agg) = setup();
    let before = write_irregular_combined(&agg);

    let outcome = agg.upsert_one(&key("1abc", 1)).unwrap();
    assert_eq!(outcome.action, UpsertAction::Inserted);
    assert!(!outcome.rebuilt);

    let after = combined_text(&agg);
    assert!(after.starts_with(&before), "existing rows changed:\n{after}");
    assert_eq!(after.lines().count(), 5);
    assert!(after.lines().last().unwrap().starts_with("1abc A G 1 B C 11 "));

    let table = load_combined(&agg.layout().combined_path);
    assert_eq!(table.len(), 4);
    assert_eq!(table.matching(&key("2xyz", 4)).len(), 2);
}

#[test]
fn test_upsert_of_duplicated_key_updates_first_row_only() {
    let (_dir, agg) = setup();
    let before = write_irregular_combined(&agg);
    let k = key("2xyz", 4);
    append(&agg, MetricSource::Rscc, &k, &[Some(0.9), Some(0.85)]);

    let outcome = agg.upsert_one(&k).unwrap();
    assert_eq!(outcome.action, UpsertAction::Updated);

    let after = combined_text(&agg);
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();
    assert_eq!(new.len(), old.len());
    assert_ne!(new[1], old[1]);
    assert_eq!(new[2], old[2]);
    assert_eq!(new[3], old[3]);

    let table = load_combined(&agg.layout().combined_path);
    let rows = table.matching(&k);
    assert_eq!(rows[0].get(Metric::Rscc, Geometry::Wc), Some(0.9));
    assert_eq!(rows[1].get(Metric::Rscc, Geometry::Wc), Some(0.6));
}
