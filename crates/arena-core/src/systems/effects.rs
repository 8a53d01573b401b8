//! Effect Applier
//!
//! Applies a matched action's stat deltas, item grants, item removals and
//! relation changes to the tuple it matched. Every slot is processed; nothing
//! here short-circuits.

use crate::actions::{Action, Slot};
use crate::components::Tribute;

/// Apply all of `action`'s effects to `tuple` (slot order).
///
/// Per slot the order is: stats, bonus items, removed items, relations.
pub fn apply_effects(action: &Action, tuple: &mut [Tribute]) {
    let names: Vec<String> = tuple.iter().map(|t| t.name.clone()).collect();

    for (index, tribute) in tuple.iter_mut().enumerate() {
        apply_slot_effects(action, Slot(index), tribute, &names);
    }
}

/// Apply the effects keyed to one slot. `names` are the tuple's tribute names
/// in slot order and resolve relation targets.
pub fn apply_slot_effects(action: &Action, slot: Slot, tribute: &mut Tribute, names: &[String]) {
    if let Some(changes) = action.stats_changes.get(&slot) {
        for (stat, delta) in changes {
            (stat.mutator())(tribute, *delta);
        }
    }

    if let Some(items) = action.bonus_items.get(&slot) {
        for item in items {
            item.apply_payload(tribute);
            tribute.add_item(item.clone());
        }
    }

    if let Some(items) = action.removed_items.get(&slot) {
        for name in items {
            tribute.remove_item(name);
        }
    }

    if let Some(changes) = action.relation_changes.get(&slot) {
        for change in changes {
            match names.get(change.target.index()) {
                Some(target) => tribute.change_relation(target.clone(), change.relation.clone()),
                None => tracing::debug!(
                    "Skipping relation change from slot {} to missing slot {} in '{}'",
                    slot, change.target, action.name
                ),
            }
        }
    }
}
