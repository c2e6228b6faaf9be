//! Documented constants for the metabolic model
//!
//! All tunable parameters live here with justification for their values.
//! Centralizing constants prevents magic numbers and makes tuning easier.

// =============================================================================
// ATP BOUNDS & STATUS THRESHOLDS
// =============================================================================

/// Upper bound for ATP on every entity. All mutations clamp to this.
pub const ATP_MAX: f32 = 100.0;

/// Lower bound for ATP. Entities are never deleted when they hit zero;
/// they stay queryable as inert fossils.
pub const ATP_MIN: f32 = 0.0;

/// Minimum ATP for `active` status. Below this an entity is dying or worse.
pub const STATUS_ACTIVE_MIN: f32 = 30.0;

/// Minimum ATP for `dying` status. Below this an entity is a fossil and is
/// excluded from active-context selection (prompt enhancement).
pub const STATUS_DYING_MIN: f32 = 10.0;

/// ATP assigned to a freshly captured thought.
pub const THOUGHT_INITIAL_ATP: f32 = 100.0;

/// ATP assigned to a newly created semantic tag.
///
/// New tags start below the maximum: a single mention has not yet proven
/// the concept's relevance. Reinforcement and boosts can still take the
/// tag to 100.
pub const TAG_INITIAL_ATP: f32 = 80.0;

// =============================================================================
// DECAY RATES (per tick)
// =============================================================================

/// Base metabolic cost for a thought, subtracted every decay tick.
pub const THOUGHT_DECAY_PER_TICK: f32 = 0.5;

/// Base decay rate for a semantic tag.
pub const TAG_DECAY_BASE: f32 = 0.3;

/// Reduced decay rate for consolidated tags (frequency above
/// [`TAG_CONSOLIDATION_FREQUENCY`]). Frequently used concepts resist decay,
/// modeling long-term memory consolidation.
pub const TAG_DECAY_CONSOLIDATED: f32 = 0.2;

/// A tag's frequency must exceed this count to earn the consolidated rate.
pub const TAG_CONSOLIDATION_FREQUENCY: u32 = 5;

/// Extra decay applied to a tag that has not been mentioned recently.
pub const TAG_IDLE_PENALTY: f32 = 0.2;

/// Idle threshold in seconds of wall-clock time since `last_mentioned`.
/// One hour: a concept untouched for that long starts fading faster.
pub const TAG_IDLE_AFTER_SECS: i64 = 3600;

/// Per-tick decay subtracted from every connection edge's strength.
pub const EDGE_DECAY_PER_TICK: f32 = 0.05;

/// Edges whose strength decays to or below this value are removed from
/// both endpoints. Pruning keeps the graph from accumulating near-zero
/// edges without bound.
pub const EDGE_PRUNE_STRENGTH: f32 = 0.1;

// =============================================================================
// TAG RESOLUTION & REINFORCEMENT
// =============================================================================

/// ATP bonus when a candidate name matches an existing tag exactly
/// (case-insensitive). Plain reinforcement, no competition involved.
pub const EXACT_MATCH_BONUS: f32 = 10.0;

/// ATP bonus when an existing tag wins a mention through fuzzy similarity.
///
/// Larger than the exact-match bonus: the competitive-exclusion reward lets
/// the structurally main concept outcompete synonyms and near-duplicates
/// for graph prominence.
pub const COMPETITION_BONUS: f32 = 15.0;

/// ATP boost applied to both tags of a pair on every co-mention.
pub const CO_MENTION_BONUS: f32 = 2.0;

/// Edge strength gained per co-mention before capping.
pub const EDGE_STRENGTH_PER_CO_MENTION: f32 = 0.5;

/// Strength cap for a connection edge. Linear growth reaches the cap after
/// 20 co-mentions; further co-mentions keep counting but do not raise it.
pub const EDGE_STRENGTH_CAP: f32 = 10.0;

/// Manual boost amount for a semantic tag.
pub const TAG_BOOST: f32 = 10.0;

/// Default manual boost amount for a thought. Overridable via
/// `LIVING_GRAPH_THOUGHT_BOOST`.
pub const THOUGHT_BOOST_DEFAULT: f32 = 10.0;

// =============================================================================
// SIMILARITY PREDICATE
// =============================================================================

/// Maximum length difference (after normalization) for the character-overlap
/// comparison to apply at all.
pub const SIMILARITY_MAX_LEN_DIFF: usize = 2;

/// Character-overlap ratio above which two close-length names are similar.
/// Catches typos like "programing" vs "programming" without paying for
/// edit distance.
pub const SIMILARITY_OVERLAP_THRESHOLD: f32 = 0.7;

// =============================================================================
// SCHEDULING & CONTEXT SELECTION
// =============================================================================

/// Default cadence of the decay tick in seconds. Configuration, not part of
/// the decay algorithm itself.
pub const DECAY_INTERVAL_SECS_DEFAULT: u64 = 5;

/// How many context thoughts the enhancement endpoint sends at most.
pub const ENHANCE_CONTEXT_CAP: usize = 8;

/// How many raw thoughts the naive enhancement fallback concatenates.
pub const ENHANCE_FALLBACK_CAP: usize = 3;
