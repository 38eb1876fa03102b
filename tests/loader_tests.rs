//! Integration tests for catalog CSV loading

use course_planner::core::loader::{load_courses, parse_courses_csv};
use course_planner::store::{BstStore, CatalogStore, CourseStore, StoreKind};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE_CATALOG: &str = "samples/courses/ABCU_Advising_Program_Input.csv";

/// Write a catalog file into a temp dir and return its path
fn write_catalog(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("catalog.csv");
    fs::write(&path, content).expect("Failed to write catalog file");
    path
}

#[test]
fn test_load_shipped_sample_catalog() {
    let mut store = BstStore::new();

    let summary = load_courses(SAMPLE_CATALOG, &mut store).expect("Failed to load sample catalog");

    assert_eq!(summary.loaded, 8);
    assert_eq!(summary.skipped, 0);

    let capstone = store.search("CSCI400").expect("CSCI400 should exist");
    assert_eq!(capstone.title, "Large Software Development");
    assert_eq!(capstone.prerequisites, vec!["CSCI301", "CSCI350"]);

    let intro = store.search("CSCI100").expect("CSCI100 should exist");
    assert!(intro.prerequisites.is_empty());
}

#[test]
fn test_sample_catalog_loads_into_every_backend() {
    for kind in [StoreKind::Bst, StoreKind::Vector, StoreKind::Dag] {
        let mut store = CatalogStore::new(kind);

        let summary = load_courses(SAMPLE_CATALOG, &mut store)
            .unwrap_or_else(|e| panic!("Failed to load into {kind}: {e}"));

        assert_eq!(summary.loaded, 8, "wrong count in {kind}");
        assert!(store.search("MATH201").is_some(), "MATH201 missing in {kind}");
    }
}

#[test]
fn test_sample_catalog_is_acyclic() {
    let mut store = CatalogStore::new(StoreKind::Dag);
    load_courses(SAMPLE_CATALOG, &mut store).expect("Failed to load sample catalog");

    let dag = store.as_dag().expect("dag projection");
    assert!(!dag.has_cycle());

    // Every prerequisite must already be listed when its course appears
    let order: Vec<String> = store.courses().into_iter().map(|c| c.id).collect();
    assert_eq!(order.len(), 8);
    for course in store.courses() {
        let course_pos = order.iter().position(|id| *id == course.id).unwrap();
        for prereq in &course.prerequisites {
            let prereq_pos = order.iter().position(|id| id == prereq).unwrap();
            assert!(
                prereq_pos < course_pos,
                "{prereq} should come before {}",
                course.id
            );
        }
    }
}

#[test]
fn test_load_counts_skipped_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(
        &temp_dir,
        "CSCI100,Intro to CS\nCSCI999\n,Orphan Title\nCSCI200,Data Structures,CSCI100\n",
    );

    let mut store = BstStore::new();
    let summary = load_courses(&path, &mut store).expect("Failed to load catalog");

    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_load_uppercases_ids_but_not_titles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(&temp_dir, "csci101,Intro to Programming,csci100\n");

    let mut store = BstStore::new();
    load_courses(&path, &mut store).expect("Failed to load catalog");

    let course = store.search("CSCI101").expect("id should be uppercased");
    assert_eq!(course.title, "Intro to Programming");
    assert_eq!(course.prerequisites, vec!["CSCI100"]);
}

#[test]
fn test_load_keeps_quoted_commas_in_titles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(&temp_dir, "CSCI150,\"Algorithms, Part I\",CSCI100\n");

    let mut store = BstStore::new();
    load_courses(&path, &mut store).expect("Failed to load catalog");

    let course = store.search("CSCI150").expect("CSCI150 should exist");
    assert_eq!(course.title, "Algorithms, Part I");
}

#[test]
fn test_duplicate_rows_collapse_to_last() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(&temp_dir, "CSCI100,Old Title\nCSCI100,New Title\n");

    let mut store = BstStore::new();
    let summary = load_courses(&path, &mut store).expect("Failed to load catalog");

    assert_eq!(summary.loaded, 1);
    assert_eq!(
        store.search("CSCI100").map(|c| c.title.as_str()),
        Some("New Title")
    );
}

#[test]
fn test_reload_replaces_previous_contents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let first = temp_dir.path().join("first.csv");
    fs::write(&first, "CSCI100,Intro\nCSCI200,Data Structures,CSCI100\n")
        .expect("Failed to write first catalog");
    let second = temp_dir.path().join("second.csv");
    fs::write(&second, "MATH201,Discrete Math\n").expect("Failed to write second catalog");

    let mut store = BstStore::new();
    load_courses(&first, &mut store).expect("Failed to load first catalog");
    assert_eq!(store.len(), 2);

    load_courses(&second, &mut store).expect("Failed to load second catalog");
    assert_eq!(store.len(), 1);
    assert!(store.search("CSCI100").is_none());
    assert!(store.search("MATH201").is_some());
}

#[test]
fn test_missing_file_errors_and_preserves_store() {
    let mut store = BstStore::new();
    load_courses(SAMPLE_CATALOG, &mut store).expect("Failed to load sample catalog");

    let result = load_courses("no/such/file.csv", &mut store);
    assert!(result.is_err());
    // A failed read must not wipe the loaded catalog
    assert_eq!(store.len(), 8);
}

#[test]
fn test_parse_courses_csv_keeps_file_order() {
    let courses = parse_courses_csv(SAMPLE_CATALOG).expect("Failed to parse sample catalog");

    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "CSCI100", "CSCI101", "CSCI200", "MATH201", "CSCI300", "CSCI301", "CSCI350", "CSCI400"
        ]
    );
}
