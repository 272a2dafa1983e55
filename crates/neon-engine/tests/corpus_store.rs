use neon_engine::{
    validate_artifact_id, CorpusFilter, CorpusStore, FileCorpus, Genie, IdeaEngine,
    IdeationDomain, IdeationPrompt, MemoryCorpus, WallClock,
};
use serde_json::json;

fn sample(domain: IdeationDomain, concept: &str) -> neon_engine::IdeaArtifact {
    let mut genie = Genie::with_parts(WallClock, MemoryCorpus::new(), "standalone");
    genie.generate(&IdeationPrompt::new(concept, domain)).unwrap()
}

#[test]
fn file_corpus_round_trips_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = FileCorpus::new(dir.path().join("corpus"));
    let artifact = sample(IdeationDomain::Research, "Open lab notebooks");

    corpus.store(&artifact).unwrap();
    assert!(dir
        .path()
        .join("corpus")
        .join(format!("{}.json", artifact.id))
        .exists());
    let restored = corpus.retrieve(&artifact.id).unwrap().unwrap();
    assert_eq!(restored.id, artifact.id);
    assert_eq!(restored.components, artifact.components);
    assert_eq!(restored.lineage, artifact.lineage);
    assert_eq!(restored.metadata, artifact.metadata);
    assert_eq!(restored.quality.tier, artifact.quality.tier);
}

#[test]
fn file_corpus_missing_id_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = FileCorpus::new(dir.path());
    assert_eq!(corpus.retrieve("idea_absent").unwrap(), None);
}

#[test]
fn file_corpus_lists_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = FileCorpus::new(dir.path());
    let mut research = sample(IdeationDomain::Research, "Citation graph explorer");
    research.id = "idea_b".into();
    let mut events = sample(IdeationDomain::Events, "Pop-up night market");
    events.id = "idea_a".into();
    let mut more_research = sample(IdeationDomain::Research, "Peer review exchange");
    more_research.id = "idea_c".into();
    for artifact in [&research, &events, &more_research] {
        corpus.store(artifact).unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let all: Vec<String> = corpus
        .list(&CorpusFilter::default())
        .unwrap()
        .into_iter()
        .map(|artifact| artifact.id)
        .collect();
    assert_eq!(all, vec!["idea_a", "idea_b", "idea_c"]);

    let only_research: Vec<String> = corpus
        .list(&CorpusFilter::domain(IdeationDomain::Research))
        .unwrap()
        .into_iter()
        .map(|artifact| artifact.id)
        .collect();
    assert_eq!(only_research, vec!["idea_b", "idea_c"]);

    let strict = CorpusFilter {
        min_quality: Some(1.1),
        ..CorpusFilter::default()
    };
    assert!(corpus.list(&strict).unwrap().is_empty());
}

#[test]
fn corrupt_file_surfaces_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("idea_bad.json"), "{not json").unwrap();
    let corpus = FileCorpus::new(dir.path());

    let err = corpus.retrieve("idea_bad").unwrap_err();
    assert_eq!(err.family(), "corpus");
    assert_eq!(err.code(), "CorpusDecode");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn store_replaces_existing_entry() {
    let mut corpus = MemoryCorpus::new();
    let mut artifact = sample(IdeationDomain::Content, "Serial fiction club");
    corpus.store(&artifact).unwrap();
    artifact.lineage.children.push("idea_child".into());
    corpus.store(&artifact).unwrap();

    assert_eq!(corpus.len(), 1);
    let stored = corpus.retrieve(&artifact.id).unwrap().unwrap();
    assert_eq!(stored.lineage.children, vec!["idea_child"]);
}

#[test]
fn ids_that_leave_the_root_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let outside = dir.path().join("other");
    let mut other = FileCorpus::new(&outside);
    let mut secret = sample(IdeationDomain::Business, "secret plan");
    secret.id = "idea_secret".into();
    other.store(&secret).unwrap();

    let mut corpus = FileCorpus::new(dir.path().join("corpus"));
    let absolute = outside.join("idea_secret").display().to_string();
    for id in [absolute.as_str(), "../other/idea_secret", "", "idea.x", "a\\b"] {
        let err = corpus.retrieve(id).expect_err(id);
        assert_eq!(err.family(), "corpus");
        assert_eq!(err.code(), "InvalidPayload");
        assert!(corpus.delete(id).is_err());
    }

    secret.id = "../escape".into();
    assert!(corpus.store(&secret).is_err());
    assert!(!dir.path().join("escape.json").exists());
}

#[test]
fn generated_ids_pass_validation() {
    let artifact = sample(IdeationDomain::Software, "Id shape check");
    assert_eq!(validate_artifact_id(&artifact.id).unwrap(), artifact.id);
    assert!(validate_artifact_id("idea_06774533aa389368").is_ok());
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = FileCorpus::new(dir.path());
    let artifact = sample(IdeationDomain::Events, "Lantern walk");
    corpus.store(&artifact).unwrap();

    assert!(corpus.delete(&artifact.id).unwrap());
    assert_eq!(corpus.retrieve(&artifact.id).unwrap(), None);
    assert!(!corpus.delete(&artifact.id).unwrap());

    let mut memory = MemoryCorpus::new();
    memory.store(&artifact).unwrap();
    assert!(memory.delete(&artifact.id).unwrap());
    assert!(memory.is_empty());
}

#[test]
fn update_merges_top_level_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = FileCorpus::new(dir.path());
    let artifact = sample(IdeationDomain::Creative, "Mural exchange");
    corpus.store(&artifact).unwrap();

    let updated = corpus
        .update(&artifact.id, &json!({"title": "Mural Exchange Network", "themes": ["art"]}))
        .unwrap()
        .expect("artifact exists");
    assert_eq!(updated.title, "Mural Exchange Network");
    assert_eq!(updated.themes, vec!["art"]);
    assert_eq!(updated.concept, artifact.concept);

    let stored = corpus.retrieve(&artifact.id).unwrap().unwrap();
    assert_eq!(stored.title, "Mural Exchange Network");

    assert!(corpus.update("idea_missing", &json!({})).unwrap().is_none());
    let err = corpus
        .update(&artifact.id, &json!({"domain": "astrology"}))
        .unwrap_err();
    assert_eq!(err.code(), "InvalidPayload");
    assert!(corpus.update(&artifact.id, &json!([1])).is_err());
}

#[test]
fn stats_count_domains_and_modes() {
    let mut corpus = MemoryCorpus::new();
    let empty = corpus.stats().unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.avg_quality, 0.0);

    let first = sample(IdeationDomain::Research, "Open data commons");
    let second = sample(IdeationDomain::Research, "Replication bounty board");
    let mut third = sample(IdeationDomain::Education, "Peer tutoring mesh");
    third.metadata.mode = "overlay".into();
    for artifact in [&first, &second, &third] {
        corpus.store(artifact).unwrap();
    }

    let stats = corpus.stats().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_domain[&IdeationDomain::Research], 2);
    assert_eq!(stats.by_domain[&IdeationDomain::Education], 1);
    assert_eq!(stats.by_mode["standalone"], 2);
    assert_eq!(stats.by_mode["overlay"], 1);
    let expected = (first.quality.composite + second.quality.composite + third.quality.composite) / 3.0;
    assert!((stats.avg_quality - expected).abs() < 1e-12);

    let encoded = serde_json::to_value(&stats).unwrap();
    assert_eq!(encoded["byDomain"]["research"], 2);
    assert_eq!(encoded["byMode"]["overlay"], 1);
}
