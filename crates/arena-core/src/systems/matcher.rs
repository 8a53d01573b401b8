//! Requirement Matcher
//!
//! Decides whether a candidate tuple of tributes satisfies an action's
//! per-slot requirements. Pure: it never mutates, so the scheduler can retry
//! as often as it likes.

use crate::actions::{Action, SlotRequirement};
use crate::components::Tribute;

/// Check every slot requirement of `action` against `candidates` (slot order).
///
/// Requirement slots beyond the tuple, and relation targets beyond the tuple,
/// are skipped.
pub fn requirements_met(action: &Action, candidates: &[&Tribute]) -> bool {
    action.requirements.iter().all(|(slot, requirement)| {
        match candidates.get(slot.index()) {
            Some(candidate) => slot_satisfied(requirement, candidate, candidates),
            None => true,
        }
    })
}

/// Check one slot: stats, then items, then relations
pub fn slot_satisfied(requirement: &SlotRequirement, candidate: &Tribute, tuple: &[&Tribute]) -> bool {
    let stats_ok = requirement
        .stats
        .iter()
        .all(|(stat, bound)| bound.admits(candidate.stat(*stat)));
    if !stats_ok {
        return false;
    }

    if !requirement.items.iter().all(|name| candidate.has_item(name)) {
        return false;
    }

    requirement.relations.iter().all(|(target, label)| {
        let Some(other) = tuple.get(target.index()) else {
            return true;
        };
        // No relation yet is fine; only a conflicting one fails
        candidate
            .relation_to(&other.name)
            .map_or(true, |existing| existing == label)
    })
}
