//! In-memory graph store: the single owner of all thoughts and tags
//!
//! All mutation goes through this type: thought ingestion, tag resolution
//! and competition, co-mention reinforcement, manual boosts and the decay
//! tick. Callers serialize access (the server wraps the store in one
//! `parking_lot::RwLock`), so invariants only need to hold across whole
//! method calls:
//!
//! - every `thought_ids` entry on a tag references a live thought;
//! - ATP stays in [0, 100] everywhere;
//! - connection edges are mutual with identical co-mention counts;
//! - a thought's `tags` display cache names only tags that contain its id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::constants::{
    CO_MENTION_BONUS, COMPETITION_BONUS, EDGE_STRENGTH_CAP, EDGE_STRENGTH_PER_CO_MENTION,
    EXACT_MATCH_BONUS, TAG_BOOST,
};
use crate::decay::{edge_tick, tag_tick, thought_tick};
use crate::errors::{AppError, Result};
use crate::similarity::names_similar;
use crate::types::{SemanticTag, Thought, ThoughtStatus};

/// Serializable snapshot of the full store, the unit of persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub thoughts: Vec<Thought>,
    pub tags: Vec<SemanticTag>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty() && self.tags.is_empty()
    }
}

/// The living graph: thoughts plus the semantic-tag concept graph.
#[derive(Debug, Default)]
pub struct GraphStore {
    thoughts: HashMap<Uuid, Thought>,
    /// Ingestion order of thoughts.
    thought_order: Vec<Uuid>,
    tags: HashMap<Uuid, SemanticTag>,
    /// Creation order of tags. Also the scan order for similarity
    /// competition, which makes the first-created similar tag the
    /// deterministic winner when several would match.
    tag_order: Vec<Uuid>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the store from a persisted snapshot.
    ///
    /// Stale references are dropped on the way in: tag membership entries
    /// for unknown thoughts and edges to unknown tags cannot satisfy the
    /// store invariants, so they do not survive the load.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();

        for thought in snapshot.thoughts {
            store.thought_order.push(thought.id);
            store.thoughts.insert(thought.id, thought);
        }

        let known_tags: Vec<Uuid> = snapshot.tags.iter().map(|t| t.id).collect();
        for mut tag in snapshot.tags {
            tag.thought_ids.retain(|id| store.thoughts.contains_key(id));
            tag.connections.retain(|other, _| known_tags.contains(other));
            store.tag_order.push(tag.id);
            store.tags.insert(tag.id, tag);
        }

        store
    }

    /// Snapshot the full state in stable order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            thoughts: self
                .thought_order
                .iter()
                .filter_map(|id| self.thoughts.get(id).cloned())
                .collect(),
            tags: self
                .tag_order
                .iter()
                .filter_map(|id| self.tags.get(id).cloned())
                .collect(),
        }
    }

    // =========================================================================
    // INGESTION
    // =========================================================================

    /// Capture a new thought at full energy. Tags arrive later, once the
    /// extraction call completes; a thought with no tags is still valid.
    pub fn ingest(&mut self, text: String, now: DateTime<Utc>) -> Thought {
        let thought = Thought::new(text, now);
        self.thought_order.push(thought.id);
        self.thoughts.insert(thought.id, thought.clone());
        thought
    }

    // =========================================================================
    // TAG RESOLUTION & COMPETITION
    // =========================================================================

    /// Resolve extracted candidate names onto the tag graph for one thought,
    /// then reinforce co-mention edges between the resolved tags.
    ///
    /// Per candidate, in input order:
    /// 1. exact name match (case-insensitive): the tag absorbs the mention
    ///    with a +10 bonus;
    /// 2. else the first similar tag in creation order wins the competition
    ///    and absorbs the mention with the larger +15 bonus;
    /// 3. else a fresh tag is created at ATP 80.
    ///
    /// Returns the resolved tag ids in processing order (deduplicated).
    pub fn apply_extraction(
        &mut self,
        thought_id: Uuid,
        candidates: &[String],
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>> {
        if !self.thoughts.contains_key(&thought_id) {
            return Err(AppError::ThoughtNotFound(thought_id.to_string()));
        }

        let mut processed: Vec<Uuid> = Vec::with_capacity(candidates.len());
        for name in candidates {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let tag_id = self.resolve_candidate(thought_id, name, now);
            if !processed.contains(&tag_id) {
                processed.push(tag_id);
            }
        }

        self.reinforce(&processed);
        self.sync_display_cache(thought_id, &processed);

        Ok(processed)
    }

    /// Resolve one candidate name to an existing or fresh tag.
    fn resolve_candidate(&mut self, thought_id: Uuid, name: &str, now: DateTime<Utc>) -> Uuid {
        // Exact match first. Equality is also "similar", so checking fuzzy
        // similarity first would make this branch unreachable and hand the
        // competition bonus to plain re-mentions.
        if let Some(tag_id) = self.find_exact(name) {
            if let Some(tag) = self.tags.get_mut(&tag_id) {
                tag.absorb_mention(thought_id, EXACT_MATCH_BONUS, now);
                debug!(tag = %tag.name, candidate = name, "exact match reinforced");
            }
            return tag_id;
        }

        // Competition: first similar tag in creation order absorbs the
        // mention and collects the competitive-exclusion reward.
        if let Some(tag_id) = self.find_similar(name) {
            if let Some(tag) = self.tags.get_mut(&tag_id) {
                tag.absorb_mention(thought_id, COMPETITION_BONUS, now);
                debug!(tag = %tag.name, candidate = name, "competition won");
            }
            return tag_id;
        }

        // Unmatched mention: a new concept enters the graph.
        let tag = SemanticTag::new(name.to_string(), thought_id, now);
        let tag_id = tag.id;
        debug!(tag = %tag.name, "new tag created");
        self.tag_order.push(tag_id);
        self.tags.insert(tag_id, tag);
        tag_id
    }

    fn find_exact(&self, name: &str) -> Option<Uuid> {
        self.tag_order
            .iter()
            .find(|id| {
                self.tags
                    .get(id)
                    .is_some_and(|t| t.name.eq_ignore_ascii_case(name))
            })
            .copied()
    }

    fn find_similar(&self, name: &str) -> Option<Uuid> {
        self.tag_order
            .iter()
            .find(|id| {
                self.tags
                    .get(id)
                    .is_some_and(|t| names_similar(&t.name, name))
            })
            .copied()
    }

    // =========================================================================
    // CO-MENTION REINFORCEMENT
    // =========================================================================

    /// Strengthen pairwise edges between every distinct pair of tags
    /// resolved for one thought.
    ///
    /// Both directions of each edge are updated in lockstep, which keeps
    /// strength and co-mention counts identical on both sides. Edge
    /// strength grows linearly with co-mentions and caps at 10.
    fn reinforce(&mut self, processed: &[Uuid]) {
        for i in 0..processed.len() {
            for j in (i + 1)..processed.len() {
                self.strengthen_edge_half(processed[i], processed[j]);
                self.strengthen_edge_half(processed[j], processed[i]);
            }
        }
    }

    /// Update the directed half of the mutual edge `from -> to`, and give
    /// `from` its co-mention ATP bonus.
    fn strengthen_edge_half(&mut self, from: Uuid, to: Uuid) {
        let Some(tag) = self.tags.get_mut(&from) else {
            return;
        };
        let conn = tag.connections.entry(to).or_default();
        conn.co_mentions += 1;
        conn.strength =
            (conn.co_mentions as f32 * EDGE_STRENGTH_PER_CO_MENTION).min(EDGE_STRENGTH_CAP);
        let boosted = tag.atp + CO_MENTION_BONUS;
        tag.set_atp(boosted);
    }

    /// Refresh the thought's display cache with the resolved tag names,
    /// preserving previously resolved names.
    fn sync_display_cache(&mut self, thought_id: Uuid, processed: &[Uuid]) {
        let names: Vec<String> = processed
            .iter()
            .filter_map(|id| self.tags.get(id).map(|t| t.name.clone()))
            .collect();

        if let Some(thought) = self.thoughts.get_mut(&thought_id) {
            for name in names {
                if !thought.tags.contains(&name) {
                    thought.tags.push(name);
                }
            }
        }
    }

    // =========================================================================
    // MANUAL BOOST
    // =========================================================================

    /// User-triggered energy boost for a thought. Status recomputes from
    /// the new ATP; nothing else changes.
    pub fn boost_thought(&mut self, id: Uuid, amount: f32) -> Result<Thought> {
        let thought = self
            .thoughts
            .get_mut(&id)
            .ok_or_else(|| AppError::ThoughtNotFound(id.to_string()))?;
        thought.set_atp(thought.atp + amount);
        Ok(thought.clone())
    }

    /// User-triggered energy boost for a tag.
    pub fn boost_tag(&mut self, id: Uuid) -> Result<SemanticTag> {
        let tag = self
            .tags
            .get_mut(&id)
            .ok_or_else(|| AppError::TagNotFound(id.to_string()))?;
        tag.set_atp(tag.atp + TAG_BOOST);
        Ok(tag.clone())
    }

    // =========================================================================
    // DECAY TICK
    // =========================================================================

    /// Apply one metabolic tick to the whole store.
    ///
    /// Thoughts pay the base cost, tags pay their frequency- and
    /// idleness-adjusted cost, and every edge loses strength. Edges that
    /// fall to the prune floor disappear; because both halves of a mutual
    /// edge always hold identical values, they disappear from both
    /// endpoints on the same tick.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for thought in self.thoughts.values_mut() {
            thought.set_atp(thought_tick(thought.atp));
        }

        for tag in self.tags.values_mut() {
            let decayed = tag_tick(tag.atp, tag.frequency, tag.last_mentioned, now);
            tag.set_atp(decayed);

            tag.connections.retain(|_, conn| match edge_tick(conn.strength) {
                Some(strength) => {
                    conn.strength = strength;
                    true
                }
                None => false,
            });
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn thought(&self, id: Uuid) -> Option<&Thought> {
        self.thoughts.get(&id)
    }

    pub fn tag(&self, id: Uuid) -> Option<&SemanticTag> {
        self.tags.get(&id)
    }

    /// All thoughts, newest first.
    pub fn all_thoughts(&self) -> Vec<Thought> {
        self.thought_order
            .iter()
            .rev()
            .filter_map(|id| self.thoughts.get(id).cloned())
            .collect()
    }

    /// All tags in creation order.
    pub fn all_tags(&self) -> Vec<SemanticTag> {
        self.tag_order
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect()
    }

    /// Thoughts associated with one tag, newest first.
    pub fn thoughts_for_tag(&self, tag_id: Uuid) -> Result<Vec<Thought>> {
        let tag = self
            .tags
            .get(&tag_id)
            .ok_or_else(|| AppError::TagNotFound(tag_id.to_string()))?;

        let mut thoughts: Vec<Thought> = tag
            .thought_ids
            .iter()
            .filter_map(|id| self.thoughts.get(id).cloned())
            .collect();
        thoughts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(thoughts)
    }

    /// Select context thoughts for prompt enhancement.
    ///
    /// Fossils never qualify. When a focus tag is given and still active,
    /// its member thoughts are preferred; otherwise all non-fossil thoughts
    /// compete. Either way the result is sorted by descending ATP and
    /// capped.
    pub fn enhancement_candidates(&self, focus_tag: Option<Uuid>, cap: usize) -> Vec<Thought> {
        let mut candidates: Vec<Thought> = match focus_tag
            .and_then(|id| self.tags.get(&id))
            .filter(|tag| tag.status() == ThoughtStatus::Active)
        {
            Some(tag) => tag
                .thought_ids
                .iter()
                .filter_map(|id| self.thoughts.get(id).cloned())
                .collect(),
            None => self.thoughts.values().cloned().collect(),
        };

        candidates.retain(|t| t.status != ThoughtStatus::Fossil);
        candidates.sort_by(|a, b| b.atp.partial_cmp(&a.atp).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(cap);
        candidates
    }

    pub fn thought_count(&self) -> usize {
        self.thoughts.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty() && self.tags.is_empty()
    }
}
