//! Metabolic decay model
//!
//! Pure per-tick step functions for thought ATP, tag ATP and edge strength.
//! A tick is a monotonic step of wall/tick time: the scheduler decides the
//! cadence, this module only knows what one tick does.
//!
//! The model is deliberately linear rather than exponential. The demo runs
//! on a seconds-scale timer, where a fixed cost per tick reads naturally as
//! a "base metabolic rate"; frequently used and recently mentioned concepts
//! pay less per tick instead of decaying on a different curve.

use chrono::{DateTime, Utc};

use crate::constants::{
    ATP_MAX, ATP_MIN, EDGE_DECAY_PER_TICK, EDGE_PRUNE_STRENGTH, TAG_CONSOLIDATION_FREQUENCY,
    TAG_DECAY_BASE, TAG_DECAY_CONSOLIDATED, TAG_IDLE_AFTER_SECS, TAG_IDLE_PENALTY,
    THOUGHT_DECAY_PER_TICK,
};

/// One decay tick applied to a thought's ATP. Clamped to [0, 100].
#[inline]
pub fn thought_tick(atp: f32) -> f32 {
    (atp - THOUGHT_DECAY_PER_TICK).clamp(ATP_MIN, ATP_MAX)
}

/// Total decay a tag pays this tick.
///
/// Frequently used tags (frequency above the consolidation threshold) pay a
/// reduced base rate. Tags idle for over an hour of wall-clock time pay an
/// extra penalty on top of whichever base rate applies.
#[inline]
pub fn tag_decay_amount(frequency: u32, last_mentioned: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let base = if frequency > TAG_CONSOLIDATION_FREQUENCY {
        TAG_DECAY_CONSOLIDATED
    } else {
        TAG_DECAY_BASE
    };

    let idle_secs = now.signed_duration_since(last_mentioned).num_seconds();
    let idle_penalty = if idle_secs > TAG_IDLE_AFTER_SECS {
        TAG_IDLE_PENALTY
    } else {
        0.0
    };

    base + idle_penalty
}

/// One decay tick applied to a tag's ATP.
#[inline]
pub fn tag_tick(
    atp: f32,
    frequency: u32,
    last_mentioned: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f32 {
    (atp - tag_decay_amount(frequency, last_mentioned, now)).max(ATP_MIN)
}

/// One decay tick applied to an edge's strength.
///
/// Returns `None` when the edge should be pruned: once strength falls to or
/// below the prune floor the edge is removed from both endpoints rather
/// than kept around near zero.
#[inline]
pub fn edge_tick(strength: f32) -> Option<f32> {
    let decayed = strength - EDGE_DECAY_PER_TICK;
    if decayed <= EDGE_PRUNE_STRENGTH {
        None
    } else {
        Some(decayed)
    }
}
