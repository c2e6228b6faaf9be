//! Tag resolution, competition and co-mention reinforcement tests
//!
//! Exercises the full ingestion path: candidate names from extraction are
//! resolved onto the tag graph, similar names collapse onto existing
//! concepts, and co-mentions build mutual weighted edges.

use chrono::Utc;
use living_graph::store::GraphStore;
use living_graph::types::ThoughtStatus;
use living_graph::uuid::Uuid;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Scenario: first thought, no existing tags.
#[test]
fn fresh_thought_creates_tags_and_edges() {
    let mut store = GraphStore::new();
    let now = Utc::now();
    let thought = store.ingest("Learning Rust ownership".to_string(), now);

    let resolved = store
        .apply_extraction(thought.id, &names(&["rust", "ownership", "learning"]), now)
        .unwrap();

    assert_eq!(resolved.len(), 3);
    assert_eq!(store.tag_count(), 3);

    for tag_id in &resolved {
        let tag = store.tag(*tag_id).unwrap();
        assert_eq!(tag.frequency, 1);
        assert_eq!(tag.thought_ids, vec![thought.id]);
        // Created at 80, then +2 per co-mention pair; each of the three
        // tags sits in two pairs.
        assert_eq!(tag.atp, 84.0);

        // Edges to both siblings, one co-mention each, strength 0.5.
        assert_eq!(tag.connections.len(), 2);
        for conn in tag.connections.values() {
            assert_eq!(conn.co_mentions, 1);
            assert!((conn.strength - 0.5).abs() < 0.001);
        }
    }
}

/// Scenario: exact (case-insensitive) re-mention reinforces the tag.
#[test]
fn exact_match_reinforces_existing_tag() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    let first = store.ingest("Rust is great".to_string(), now);
    let resolved = store.apply_extraction(first.id, &names(&["Rust"]), now).unwrap();
    let tag_id = resolved[0];
    assert_eq!(store.tag(tag_id).unwrap().atp, 80.0);

    let second = store.ingest("More rust notes".to_string(), now);
    let resolved = store.apply_extraction(second.id, &names(&["rust"]), now).unwrap();

    // Same tag object, no new tag, +10 reinforcement.
    assert_eq!(resolved, vec![tag_id]);
    assert_eq!(store.tag_count(), 1);
    let tag = store.tag(tag_id).unwrap();
    assert_eq!(tag.frequency, 2);
    assert_eq!(tag.atp, 90.0);
    assert_eq!(tag.thought_ids.len(), 2);
    // First-seen casing wins for display.
    assert_eq!(tag.name, "Rust");
}

/// Scenario: a typo close to an existing tag loses the competition and is
/// absorbed with the larger bonus.
#[test]
fn similar_candidate_wins_competition_bonus() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    let first = store.ingest("I enjoy programming".to_string(), now);
    let resolved = store
        .apply_extraction(first.id, &names(&["Programming"]), now)
        .unwrap();
    let tag_id = resolved[0];

    let second = store.ingest("programing every day".to_string(), now);
    let resolved = store
        .apply_extraction(second.id, &names(&["programing"]), now)
        .unwrap();

    assert_eq!(resolved, vec![tag_id]);
    assert_eq!(store.tag_count(), 1);
    // Competition pays +15, not the exact-match +10.
    assert_eq!(store.tag(tag_id).unwrap().atp, 95.0);
}

/// Resolving the same candidate for two thoughts never duplicates the tag.
#[test]
fn competition_is_idempotent_across_thoughts() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    let a = store.ingest("a".to_string(), now);
    let b = store.ingest("b".to_string(), now);
    store.apply_extraction(a.id, &names(&["machine-learning"]), now).unwrap();
    store.apply_extraction(b.id, &names(&["Machine Learning"]), now).unwrap();

    assert_eq!(store.tag_count(), 1);
    let tags = store.all_tags();
    let tag = &tags[0];
    assert_eq!(tag.thought_ids.len(), 2);
    assert!(tag.thought_ids.contains(&a.id));
    assert!(tag.thought_ids.contains(&b.id));
}

/// When several existing tags are similar, the first-created one wins.
#[test]
fn competition_tie_break_is_creation_order() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    // "book" and "shelf" share no characters, so they coexist as tags.
    let a = store.ingest("a".to_string(), now);
    let older = store.apply_extraction(a.id, &names(&["book"]), now).unwrap()[0];
    let b = store.ingest("b".to_string(), now);
    let newer = store.apply_extraction(b.id, &names(&["shelf"]), now).unwrap()[0];
    assert_ne!(older, newer);
    assert_eq!(store.tag_count(), 2);

    // "bookshelf" contains both names; the first-created tag absorbs it.
    let c = store.ingest("c".to_string(), now);
    let resolved = store.apply_extraction(c.id, &names(&["bookshelf"]), now).unwrap();
    assert_eq!(resolved, vec![older]);
}

#[test]
fn edges_stay_mutual_at_every_observation_point() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    for i in 0..5 {
        let thought = store.ingest(format!("thought {i}"), now);
        store
            .apply_extraction(thought.id, &names(&["alpha", "beta", "gamma"]), now)
            .unwrap();

        for tag in store.all_tags() {
            for (other_id, conn) in &tag.connections {
                let mirror = store.tag(*other_id).unwrap().connections[&tag.id];
                assert_eq!(conn.co_mentions, mirror.co_mentions);
                assert_eq!(conn.strength, mirror.strength);
            }
        }
    }
}

#[test]
fn edge_strength_caps_after_twenty_co_mentions() {
    let mut store = GraphStore::new();
    let now = Utc::now();

    let mut pair_ids: Option<(Uuid, Uuid)> = None;
    for i in 0..20 {
        let thought = store.ingest(format!("pair {i}"), now);
        let resolved = store
            .apply_extraction(thought.id, &names(&["alpha", "beta"]), now)
            .unwrap();
        pair_ids = Some((resolved[0], resolved[1]));
    }

    let (a, b) = pair_ids.unwrap();
    let conn = store.tag(a).unwrap().connections[&b];
    assert_eq!(conn.co_mentions, 20);
    assert_eq!(conn.strength, 10.0);

    // One more co-mention counts but cannot raise the strength.
    let extra = store.ingest("pair 20".to_string(), now);
    store.apply_extraction(extra.id, &names(&["alpha", "beta"]), now).unwrap();
    let conn = store.tag(a).unwrap().connections[&b];
    assert_eq!(conn.co_mentions, 21);
    assert_eq!(conn.strength, 10.0);
}

#[test]
fn single_tag_resolution_creates_no_edges() {
    let mut store = GraphStore::new();
    let now = Utc::now();
    let thought = store.ingest("solo".to_string(), now);

    let resolved = store.apply_extraction(thought.id, &names(&["alone"]), now).unwrap();

    let tag = store.tag(resolved[0]).unwrap();
    assert!(tag.connections.is_empty());
    // No reinforcement bonus without a pair.
    assert_eq!(tag.atp, 80.0);
}

#[test]
fn extraction_failure_leaves_thought_untagged_but_valid() {
    let mut store = GraphStore::new();
    let now = Utc::now();
    let thought = store.ingest("provider was down".to_string(), now);

    // No extraction applied at all: the thought stays fully valid.
    let stored = store.thought(thought.id).unwrap();
    assert!(stored.tags.is_empty());
    assert_eq!(stored.status, ThoughtStatus::Active);
    assert_eq!(stored.atp, 100.0);
}

#[test]
fn display_cache_accumulates_across_reanalysis() {
    let mut store = GraphStore::new();
    let now = Utc::now();
    let thought = store.ingest("evolving".to_string(), now);

    store.apply_extraction(thought.id, &names(&["rust"]), now).unwrap();
    store.apply_extraction(thought.id, &names(&["rust", "ownership"]), now).unwrap();

    let stored = store.thought(thought.id).unwrap();
    assert_eq!(stored.tags, vec!["rust", "ownership"]);

    // Re-resolving the same thought against the same tag does not inflate
    // membership or frequency.
    let tag = store
        .all_tags()
        .into_iter()
        .find(|t| t.name == "rust")
        .unwrap();
    assert_eq!(tag.thought_ids.len(), 1);
    assert_eq!(tag.frequency, 1);
}
