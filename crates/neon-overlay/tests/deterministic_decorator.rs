use neon_core::{generate_artifact_id, GenieError, Provenance, SeededRandom};
use neon_engine::{
    CorpusStore, FileCorpus, IdeaEngine, IdeationDomain, IdeationPrompt, MemoryCorpus,
    EVOLVED_TRANSFORMATION,
};
use neon_overlay::DeterministicGenie;

const TS: &str = "2025-01-18T12:00:00.000Z";

fn provenance() -> Provenance {
    Provenance::new("r1", TS).with_seed("s1")
}

fn genie(provenance: Provenance) -> DeterministicGenie<MemoryCorpus> {
    DeterministicGenie::with_corpus(Some(provenance), MemoryCorpus::new(), "standalone")
        .expect("valid provenance")
}

fn prompt() -> IdeationPrompt {
    IdeationPrompt::new("Tidal energy cooperative", IdeationDomain::Business)
        .with_tags(vec!["energy".into()])
}

#[test]
fn construction_requires_provenance() {
    let err = DeterministicGenie::with_corpus(None, MemoryCorpus::new(), "standalone")
        .expect_err("missing provenance");
    assert!(matches!(err, GenieError::Provenance(_)));
    assert_eq!(err.code(), "MissingProvenance");
}

#[test]
fn construction_rejects_invalid_timestamp() {
    let err = DeterministicGenie::with_corpus(
        Some(Provenance::new("r1", "not-a-date")),
        MemoryCorpus::new(),
        "standalone",
    )
    .expect_err("invalid timestamp");
    assert_eq!(err.code(), "InvalidTimestamp");
    assert_eq!(err.info().context["timestamp_iso"], "not-a-date");
}

#[test]
fn generate_is_stamped_from_provenance() {
    let mut genie = genie(provenance());
    let artifact = genie.generate(&prompt()).unwrap();

    assert_eq!(artifact.id, "idea_06774533aa389368");
    assert_eq!(artifact.provenance.timestamp, TS);
    assert_eq!(artifact.metadata.created_at, TS);
    assert_eq!(artifact.provenance.transformations, vec!["overlay_run:r1"]);

    let stored = genie.engine().corpus().retrieve(&artifact.id).unwrap();
    assert_eq!(stored, Some(artifact));
}

#[test]
fn independent_instances_agree() {
    let a = genie(provenance()).generate(&prompt()).unwrap();
    let b = genie(provenance()).generate(&prompt()).unwrap();
    assert_eq!(a, b);

    let report_a = genie(provenance()).analyze(&prompt()).unwrap();
    let report_b = genie(provenance()).analyze(&prompt()).unwrap();
    assert_eq!(report_a, report_b);
    assert_eq!(report_a.id, a.id);
}

#[test]
fn analyze_stamps_the_stored_artifact() {
    let mut genie = genie(provenance());
    let report = genie.analyze(&prompt()).unwrap();
    let stored = genie
        .engine()
        .corpus()
        .retrieve(&report.id)
        .unwrap()
        .expect("analysis stores its artifact");
    assert_eq!(stored.provenance.transformations, vec!["overlay_run:r1"]);
    assert_eq!(stored.provenance.timestamp, TS);
}

#[test]
fn run_id_changes_the_identifier() {
    let a = genie(Provenance::new("r1", TS)).generate(&prompt()).unwrap();
    let b = genie(Provenance::new("r2", TS)).generate(&prompt()).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.title, b.title);
    assert_eq!(a.quality, b.quality);
}

#[test]
fn timestamp_literal_changes_seed_and_identifier() {
    let with_millis = genie(Provenance::new("r1", TS));
    let without_millis = genie(Provenance::new("r1", "2025-01-18T12:00:00Z"));
    assert_ne!(with_millis.derived_seed(), without_millis.derived_seed());
    assert_eq!(
        without_millis.derived_seed(),
        "0decad37a68be5f8f821aba0283090a3e03e47da6faadaa95b548438b0ac5bb1"
    );

    let mut without_millis = without_millis;
    let artifact = without_millis.generate(&prompt()).unwrap();
    assert_eq!(artifact.id, "idea_1188ce3780e074fb");
    assert_eq!(artifact.provenance.timestamp, "2025-01-18T12:00:00Z");
}

#[test]
fn explicit_seed_overrides_derivation() {
    let seeded = genie(provenance());
    assert_eq!(seeded.derived_seed(), "s1");
    assert_eq!(seeded.provenance(), &provenance());

    let blank = genie(Provenance::new("r1", TS).with_seed(""));
    let unseeded = genie(Provenance::new("r1", TS));
    assert_eq!(blank.derived_seed(), unseeded.derived_seed());
}

#[test]
fn rng_follows_derived_seed() {
    let mut genie = genie(provenance());
    let mut expected = SeededRandom::new("s1");
    let drawn: Vec<i64> = (0..8).map(|_| genie.rng().next_int(0, 100)).collect();
    let reference: Vec<i64> = (0..8).map(|_| expected.next_int(0, 100)).collect();
    assert_eq!(drawn, reference);
    assert_eq!(genie.rng().counter(), 8);
}

#[test]
fn evolve_across_runs_keeps_audit_trail() {
    let dir = tempfile::tempdir().unwrap();
    let open = |run_id: &str| {
        DeterministicGenie::with_corpus(
            Some(Provenance::new(run_id, TS)),
            FileCorpus::new(dir.path()),
            "standalone",
        )
        .unwrap()
    };

    let parent = open("r1").generate(&prompt()).unwrap();
    let mut second = open("r2");
    let child = second
        .evolve(&parent.id, &["add storage pricing".into()])
        .unwrap()
        .expect("parent was stored");

    assert_eq!(
        child.id,
        generate_artifact_id("r2", TS, Some(second.derived_seed()))
    );
    assert_eq!(child.lineage.parent.as_deref(), Some(parent.id.as_str()));
    assert_eq!(
        child.provenance.transformations,
        vec!["overlay_run:r1", EVOLVED_TRANSFORMATION, "overlay_run:r2"]
    );

    let stored_parent = second
        .engine()
        .corpus()
        .retrieve(&parent.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored_parent.lineage.children, vec![child.id.clone()]);
}

#[test]
fn evolve_without_parent_is_none() {
    let mut genie = genie(provenance());
    assert!(genie.evolve("idea_missing", &[]).unwrap().is_none());
}

#[test]
fn evolve_under_the_creating_provenance_is_rejected() {
    let mut genie = genie(provenance());
    let parent = genie.generate(&prompt()).unwrap();

    for _ in 0..2 {
        let err = genie
            .evolve(&parent.id, &["more".into()])
            .expect_err("child would replace its parent");
        assert!(matches!(err, GenieError::Engine(_)));
        assert_eq!(err.code(), "InvalidPayload");
        assert_eq!(err.info().context["parentId"], parent.id);
    }

    let stored = genie
        .engine()
        .corpus()
        .retrieve(&parent.id)
        .unwrap()
        .expect("parent still stored");
    assert_eq!(stored, parent);
    assert!(stored.lineage.children.is_empty());
}
