//! Document expansion through the library API

#[path = "common/mod.rs"]
mod common;
use common::{expand, write_log, ErrorPolicy, DICE_LOG, MULTI_LOG};

#[test]
fn test_clean_document_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let doc = "No spans here.\n\\hline\n";
    assert_eq!(expand(doc, &[dir.path()], ErrorPolicy::Strict).unwrap(), doc);
}

#[test]
fn test_identical_spans_resolve_independently() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "dice.log", DICE_LOG);
    let output = expand(
        "£states(\"dice.log\")£ states; £p_time£ £p_time£",
        &[dir.path()],
        ErrorPolicy::Strict,
    )
    .unwrap();
    assert_eq!(output, "13 states; 12.3 12.3");
}

#[test]
fn test_table_row_from_multi_objective_log() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "multi.log", MULTI_LOG);
    let doc = "£states('multi.log')£ & £objectives£ & £lp_vars£ & £lp_time£ & £vi_time£ & £weights£ & £p_time£ \\\\";
    let output = expand(doc, &[dir.path()], ErrorPolicy::Strict).unwrap();
    assert_eq!(output, "5121 & 2 & 10342 & 0.48 & 1.725 & 6 & 2.9 \\\\");
}

#[test]
fn test_relative_indexing_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "a.log", "States: 1\n");
    write_log(dir.path(), "b.log", "States: 2\n");
    write_log(dir.path(), "c.log", "States: 3\n");
    let doc = "£states('a.log')££states('b.log')££states('c.log')£ £states(-1)£ £states(0)£";
    let output = expand(doc, &[dir.path()], ErrorPolicy::Strict).unwrap();
    // adjacent spans expand back to back
    assert_eq!(output, "123 3 1");
}

#[test]
fn test_out_of_range_index_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "a.log", "States: 1\n");
    let err = expand("£states('a.log')£ £states(5)£", &[dir.path()], ErrorPolicy::Strict).unwrap_err();
    assert!(err.contains("IndexError"), "{}", err);
    assert!(err.contains("states(5)"), "{}", err);
}

#[test]
fn test_absent_metric_is_not_success() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "dice.log", DICE_LOG);
    let err = expand("£lp_time('dice.log')£", &[dir.path()], ErrorPolicy::Strict).unwrap_err();
    assert!(err.contains("EmptyResult"), "{}", err);

    let output = expand("[£lp_time('dice.log')£]", &[dir.path()], ErrorPolicy::Permissive).unwrap();
    assert_eq!(output, "[ERROR]");
}

#[test]
fn test_permissive_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "dice.log", DICE_LOG);
    let doc = "£states('missing.log')£ £states('dice.log')£ £nope£ £states(dice.log)£ £p_time£";
    let output = expand(doc, &[dir.path()], ErrorPolicy::Permissive).unwrap();
    assert_eq!(output, "ERROR 13 ERROR ERROR 12.3");
}

#[test]
fn test_directory_search_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write_log(first.path(), "run.log", "States: 100\n");
    write_log(second.path(), "run.log", "States: 200\n");
    write_log(second.path(), "other.log", "States: 300\n");

    let output = expand(
        "£states('run.log')£ £states('other.log')£",
        &[first.path(), second.path()],
        ErrorPolicy::Strict,
    )
    .unwrap();
    assert_eq!(output, "100 300");

    let output = expand("£states('run.log')£", &[second.path(), first.path()], ErrorPolicy::Strict).unwrap();
    assert_eq!(output, "200");
}

#[test]
fn test_absolute_path_bypasses_search() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "dice.log", DICE_LOG);
    let path = dir.path().join("dice.log");
    let doc = format!("£states(\"{}\")£", path.display());
    assert_eq!(expand(&doc, &[], ErrorPolicy::Strict).unwrap(), "13");
}
