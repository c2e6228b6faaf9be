//! Core data model: thoughts, semantic tags, and their connections
//!
//! Two kinds of graph node exist. `Thought` is an immutable piece of text
//! with a decaying energy budget. `SemanticTag` is a first-class concept
//! node that accumulates mentions across thoughts and holds the weighted
//! co-occurrence edges of the graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::constants::{
    ATP_MAX, ATP_MIN, STATUS_ACTIVE_MIN, STATUS_DYING_MIN, TAG_INITIAL_ATP, THOUGHT_INITIAL_ATP,
};

/// Derived lifecycle state, a pure function of current ATP. No hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtStatus {
    Active,
    Dying,
    Fossil,
}

impl ThoughtStatus {
    /// Recompute status from an ATP value.
    pub fn from_atp(atp: f32) -> Self {
        if atp >= STATUS_ACTIVE_MIN {
            Self::Active
        } else if atp >= STATUS_DYING_MIN {
            Self::Dying
        } else {
            Self::Fossil
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Dying => "dying",
            Self::Fossil => "fossil",
        }
    }
}

/// A captured free-text thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// Unique identifier, assigned at creation, immutable.
    pub id: Uuid,

    /// Original user-entered text, immutable.
    pub text: String,

    /// Creation time, immutable.
    pub timestamp: DateTime<Utc>,

    /// Display cache of associated tag names, derived from SemanticTag
    /// membership and kept in sync at update time.
    pub tags: Vec<String>,

    /// Energy value in [0, 100], mutated by decay and manual boosts.
    pub atp: f32,

    /// Derived from `atp`; recomputed whenever `atp` changes.
    pub status: ThoughtStatus,
}

impl Thought {
    /// Create a thought at full energy.
    pub fn new(text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            timestamp: now,
            tags: Vec::new(),
            atp: THOUGHT_INITIAL_ATP,
            status: ThoughtStatus::Active,
        }
    }

    /// Set ATP with clamping and status recomputation. The only way ATP
    /// should ever be written.
    pub fn set_atp(&mut self, atp: f32) {
        self.atp = atp.clamp(ATP_MIN, ATP_MAX);
        self.status = ThoughtStatus::from_atp(self.atp);
    }
}

/// A weighted, mutual connection between two semantic tags.
///
/// Symmetry invariant: if tag A holds an edge to B, B holds one to A with
/// identical `co_mentions`. Strength decays on both sides by the same
/// amount per tick, so it stays equal too.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TagConnection {
    /// Edge weight, >= 0, capped at [`crate::constants::EDGE_STRENGTH_CAP`].
    pub strength: f32,

    /// How many thoughts mentioned both endpoints together.
    pub co_mentions: u32,
}

/// A semantic concept node in the living graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticTag {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,

    /// Canonical display string. First-seen casing wins.
    pub name: String,

    /// Thought ids that reference this tag. A thought appears at most once.
    pub thought_ids: Vec<Uuid>,

    /// Mutual weighted edges to other tags, keyed by tag id.
    pub connections: HashMap<Uuid, TagConnection>,

    /// Energy value in [0, 100].
    pub atp: f32,

    /// Count of distinct thoughts that resolved to this tag.
    pub frequency: u32,

    /// Timestamp of the most recent resolution.
    pub last_mentioned: DateTime<Utc>,
}

impl SemanticTag {
    /// Create a tag on its first mention.
    pub fn new(name: String, thought_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            thought_ids: vec![thought_id],
            connections: HashMap::new(),
            atp: TAG_INITIAL_ATP,
            frequency: 1,
            last_mentioned: now,
        }
    }

    /// Set ATP with clamping.
    pub fn set_atp(&mut self, atp: f32) {
        self.atp = atp.clamp(ATP_MIN, ATP_MAX);
    }

    /// Absorb a mention into this existing tag.
    ///
    /// The thought id is appended (and frequency incremented) only if the
    /// thought is not already a member; the ATP bonus and `last_mentioned`
    /// refresh apply to every mention.
    pub fn absorb_mention(&mut self, thought_id: Uuid, bonus: f32, now: DateTime<Utc>) {
        if !self.thought_ids.contains(&thought_id) {
            self.thought_ids.push(thought_id);
            self.frequency += 1;
        }
        self.set_atp(self.atp + bonus);
        self.last_mentioned = now;
    }

    /// Derived status using the same thresholds as thoughts.
    pub fn status(&self) -> ThoughtStatus {
        ThoughtStatus::from_atp(self.atp)
    }
}

/// Result of the external tag-extraction call, validated at the boundary.
///
/// The provider payload shape varies across clients: sometimes
/// `connections`, sometimes `relatedTags`, sometimes neither. Every field
/// defaults so a partial payload never fails deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionPayload {
    #[serde(default)]
    pub tags: Vec<String>,

    /// Ids of existing thoughts the provider considers related.
    #[serde(default)]
    pub connections: Vec<String>,

    /// Alternate field some payload revisions use instead of `connections`.
    #[serde(default, alias = "relatedTags")]
    pub related_tags: Vec<String>,

    #[serde(default)]
    pub summary: String,
}

/// Result of the prompt-enhancement call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedPrompt {
    pub enhanced_prompt: String,

    /// How many stored thoughts were woven into the prompt.
    pub context_used: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(ThoughtStatus::from_atp(100.0), ThoughtStatus::Active);
        assert_eq!(ThoughtStatus::from_atp(30.0), ThoughtStatus::Active);
        assert_eq!(ThoughtStatus::from_atp(29.9), ThoughtStatus::Dying);
        assert_eq!(ThoughtStatus::from_atp(10.0), ThoughtStatus::Dying);
        assert_eq!(ThoughtStatus::from_atp(9.9), ThoughtStatus::Fossil);
        assert_eq!(ThoughtStatus::from_atp(0.0), ThoughtStatus::Fossil);
    }

    #[test]
    fn test_set_atp_clamps_and_rederives_status() {
        let mut thought = Thought::new("test".to_string(), Utc::now());
        thought.set_atp(150.0);
        assert_eq!(thought.atp, 100.0);
        assert_eq!(thought.status, ThoughtStatus::Active);

        thought.set_atp(-5.0);
        assert_eq!(thought.atp, 0.0);
        assert_eq!(thought.status, ThoughtStatus::Fossil);
    }

    #[test]
    fn test_absorb_mention_deduplicates_thought_ids() {
        let now = Utc::now();
        let thought_id = Uuid::new_v4();
        let mut tag = SemanticTag::new("Rust".to_string(), thought_id, now);
        assert_eq!(tag.frequency, 1);

        // Same thought again: no new membership, no frequency bump.
        tag.absorb_mention(thought_id, 10.0, now);
        assert_eq!(tag.thought_ids.len(), 1);
        assert_eq!(tag.frequency, 1);
        assert_eq!(tag.atp, 90.0);

        let other = Uuid::new_v4();
        tag.absorb_mention(other, 10.0, now);
        assert_eq!(tag.thought_ids.len(), 2);
        assert_eq!(tag.frequency, 2);
        assert_eq!(tag.atp, 100.0);
    }

    #[test]
    fn test_extraction_payload_tolerates_partial_json() {
        let payload: ExtractionPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.tags.is_empty());
        assert!(payload.connections.is_empty());

        let payload: ExtractionPayload =
            serde_json::from_str(r#"{"tags":["rust"],"relatedTags":["ownership"]}"#).unwrap();
        assert_eq!(payload.tags, vec!["rust"]);
        assert_eq!(payload.related_tags, vec!["ownership"]);
    }
}
