use gof_catalog::{build_registry, Category, FixtureSet, RunOptions, RunStatus, Runner};
use std::collections::HashSet;
use tempfile::TempDir;

#[tokio::test]
async fn test_every_catalog_example_runs_cleanly_and_deterministically() {
    let registry = build_registry().unwrap();
    let runner = Runner::new(&registry);

    let first = runner.run_all(42).await;
    let second = runner.run_all(42).await;

    assert_eq!(first.len(), registry.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.status, RunStatus::Passed, "{}: {:?}", a.example_id, a.error_detail);
        assert!(!a.captured_output.is_empty(), "{} produced no output", a.example_id);
        assert_eq!(a.captured_output, b.captured_output, "{} is not deterministic", a.example_id);
    }
}

#[tokio::test]
async fn test_seed_changes_random_examples_only() {
    let registry = build_registry().unwrap();
    let runner = Runner::new(&registry);

    let a = runner.run_one("flyweight/money-drop", 1).await.unwrap();
    let b = runner.run_one("flyweight/money-drop", 2).await.unwrap();
    assert_ne!(a.captured_output, b.captured_output);

    let a = runner.run_one("composite/drawing", 1).await.unwrap();
    let b = runner.run_one("composite/drawing", 2).await.unwrap();
    assert_eq!(a.captured_output, b.captured_output);
}

#[test]
fn test_catalog_ids_are_unique_and_well_formed() {
    let registry = build_registry().unwrap();
    let ids: HashSet<&str> = registry.ids().collect();
    assert_eq!(ids.len(), registry.len());
    for id in &ids {
        gof_catalog::utils::validation::validate_example_id(id).unwrap();
    }
}

#[tokio::test]
async fn test_recorded_fixtures_pass_on_replay() {
    let registry = build_registry().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fixtures").join("expected.toml");

    let recorded = Runner::new(&registry).run_category(Category::Behavioral, 42).await;
    let fixtures = FixtureSet::from_results(&recorded);
    fixtures.save(&path).unwrap();

    let reloaded = FixtureSet::from_file(&path).unwrap();
    assert_eq!(reloaded, fixtures);

    let runner = Runner::with_options(&registry, RunOptions::default().with_fixtures(reloaded));
    let replayed = runner.run_category(Category::Behavioral, 42).await;
    assert_eq!(replayed.len(), recorded.len());
    assert!(replayed.iter().all(|r| r.status == RunStatus::Passed && !r.is_unverified()));
}

#[tokio::test]
async fn test_tampered_fixture_fails() {
    let registry = build_registry().unwrap();
    let mut fixtures = FixtureSet::new();
    fixtures.insert(
        "adapter/structural",
        vec!["Called SpecificRequest!".to_string()],
    );

    let runner = Runner::with_options(&registry, RunOptions::default().with_fixtures(fixtures));
    let result = runner.run_one("adapter/structural", 42).await.unwrap();
    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.captured_output, vec!["Called SpecificRequest()"]);
}
