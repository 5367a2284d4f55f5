use gof_catalog::{
    CatalogError, Category, Entropy, ExampleDef, FixtureSet, Registry, RunOptions, RunStatus, Runner,
    Transcript,
};

fn emit_a(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    out.line("A");
    Ok(())
}

fn emit_b(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    out.line("B");
    Ok(())
}

fn emit_c(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    out.line("C");
    Ok(())
}

fn fail_midway(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    out.line("starting");
    anyhow::bail!("No boss assigned.")
}

fn random_walk(out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()> {
    for _ in 0..20 {
        out.line(entropy.between(-100, 100).to_string());
    }
    Ok(())
}

fn abc_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(ExampleDef::new("a", Category::Behavioral, "emits A", emit_a))
        .unwrap();
    registry
        .register(ExampleDef::new("b", Category::Creational, "emits B", emit_b))
        .unwrap();
    registry
        .register(ExampleDef::new("c", Category::Structural, "emits C", emit_c))
        .unwrap();
    registry
}

#[tokio::test]
async fn test_run_all_returns_results_in_registration_order() {
    let registry = abc_registry();
    let results = Runner::new(&registry).run_all(42).await;

    let ids: Vec<&str> = results.iter().map(|r| r.example_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(results[0].captured_output, vec!["A"]);
    assert_eq!(results[1].captured_output, vec!["B"]);
    assert_eq!(results[2].captured_output, vec!["C"]);
    assert!(results.iter().all(|r| r.status == RunStatus::Passed));
}

#[tokio::test]
async fn test_errored_example_does_not_stop_the_batch() {
    let mut registry = Registry::new();
    registry
        .register(ExampleDef::new("a", Category::Behavioral, "emits A", emit_a))
        .unwrap();
    registry
        .register(ExampleDef::new("broken", Category::Behavioral, "fails", fail_midway))
        .unwrap();
    registry
        .register(ExampleDef::new("c", Category::Structural, "emits C", emit_c))
        .unwrap();

    let results = Runner::new(&registry).run_all(42).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].status, RunStatus::Passed);
    assert_eq!(results[1].status, RunStatus::Errored);
    assert_eq!(results[1].captured_output, vec!["starting"]);
    assert_eq!(results[1].error_detail.as_deref(), Some("No boss assigned."));
    assert_eq!(results[2].status, RunStatus::Passed);
    assert_eq!(results[2].captured_output, vec!["C"]);
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let mut registry = Registry::new();
    registry
        .register(ExampleDef::new("walk", Category::Behavioral, "random walk", random_walk))
        .unwrap();
    let runner = Runner::new(&registry);

    let first = runner.run_one("walk", 42).await.unwrap();
    let second = runner.run_one("walk", 42).await.unwrap();
    assert_eq!(first.captured_output, second.captured_output);
    assert_eq!(first.captured_output.len(), 20);
    assert_eq!(first.seed, 42);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let registry = abc_registry();
    let err = Runner::new(&registry).run_one("missing", 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { ref id } if id == "missing"));
}

#[tokio::test]
async fn test_fixture_grading_exact_and_one_character_off() {
    let registry = abc_registry();

    let mut fixtures = FixtureSet::new();
    fixtures.insert("a", vec!["A".to_string()]);
    fixtures.insert("b", vec!["b".to_string()]);
    let runner = Runner::with_options(&registry, RunOptions::default().with_fixtures(fixtures));

    let passed = runner.run_one("a", 0).await.unwrap();
    assert_eq!(passed.status, RunStatus::Passed);
    assert!(!passed.is_unverified());

    let failed = runner.run_one("b", 0).await.unwrap();
    assert_eq!(failed.status, RunStatus::Failed);
    assert_eq!(failed.captured_output, vec!["B"]);
    assert_eq!(failed.expected_output, Some(vec!["b".to_string()]));
    let mismatch = failed.mismatch.unwrap();
    assert_eq!(mismatch.line, 1);
    assert_eq!(mismatch.expected.as_deref(), Some("b"));
    assert_eq!(mismatch.actual.as_deref(), Some("B"));

    let unverified = runner.run_one("c", 0).await.unwrap();
    assert_eq!(unverified.status, RunStatus::Passed);
    assert!(unverified.is_unverified());
}

#[tokio::test]
async fn test_parallel_run_keeps_list_order() {
    let registry = gof_catalog::build_registry().unwrap();
    let sequential = Runner::new(&registry).run_all(42).await;
    let parallel = Runner::with_options(&registry, RunOptions::default().with_jobs(4))
        .run_all(42)
        .await;

    let listed: Vec<&str> = registry.list(None).map(|e| e.id()).collect();
    let ran: Vec<&str> = parallel.iter().map(|r| r.example_id.as_str()).collect();
    assert_eq!(ran, listed);

    for (s, p) in sequential.iter().zip(&parallel) {
        assert_eq!(s.captured_output, p.captured_output, "{}", s.example_id);
    }
}

#[test]
fn test_duplicate_registration_leaves_registry_unchanged() {
    let mut registry = abc_registry();
    let err = registry
        .register(ExampleDef::new("b", Category::Structural, "impostor", emit_c))
        .unwrap_err();

    assert!(matches!(err, CatalogError::DuplicateId { .. }));
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get("b").unwrap().title(), "emits B");
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}
