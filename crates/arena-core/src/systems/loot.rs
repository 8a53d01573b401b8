//! Lethality & Loot Resolver
//!
//! After effects are applied, decides who died and who gets the credit, then
//! splits the victims' inventories between the killers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::actions::Action;
use crate::components::{Item, Tribute};

/// Outcome of resolving one applied action. Indices are slots in the tuple.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Credited killers that survived the action
    pub killers: Vec<usize>,
    /// Killed by a lethal action
    pub killed: Vec<usize>,
    /// Reached zero health during a non-lethal action
    pub mishaps: Vec<usize>,
    /// Items each killer received, in the order received
    pub loot: Vec<(usize, Vec<Item>)>,
    /// Items that vanished
    pub discarded: Vec<Item>,
}

impl Resolution {
    /// Every slot that died, in slot order
    pub fn deaths(&self) -> Vec<usize> {
        let mut deaths: Vec<usize> = self.killed.iter().chain(self.mishaps.iter()).copied().collect();
        deaths.sort_unstable();
        deaths
    }
}

/// Resolve deaths, kill credit and loot for a tuple that `action` was just
/// applied to.
pub fn resolve_lethality<R: Rng + ?Sized>(action: &Action, tuple: &mut [Tribute], rng: &mut R) -> Resolution {
    let mut resolution = Resolution::default();

    for (index, tribute) in tuple.iter_mut().enumerate() {
        if tribute.health > 0 && tribute.is_alive() {
            continue;
        }
        tribute.kill();
        if action.usually_lethal {
            resolution.killed.push(index);
        } else {
            resolution.mishaps.push(index);
        }
    }

    resolution.killers = action
        .killers
        .iter()
        .map(|slot| slot.index())
        .filter(|&index| index < tuple.len() && tuple[index].is_alive())
        .collect();

    // Nobody inherits from a mishap
    for &index in &resolution.mishaps {
        resolution.discarded.extend(tuple[index].take_inventory());
    }

    if resolution.killed.is_empty() {
        return resolution;
    }

    let mut pool = Vec::new();
    for &index in &resolution.killed {
        pool.extend(tuple[index].take_inventory());
    }

    let kills = resolution.killed.len() as u32;
    for &index in &resolution.killers {
        tuple[index].kill_count += kills;
    }

    if resolution.killers.is_empty() {
        resolution.discarded.extend(pool);
        return resolution;
    }

    let shares = distribute_loot(pool, resolution.killers.len(), rng);
    for (&index, share) in resolution.killers.iter().zip(shares) {
        if share.is_empty() {
            continue;
        }
        for item in &share {
            tuple[index].add_item(item.clone());
        }
        resolution.loot.push((index, share));
    }

    resolution
}

/// Shuffle `pool` and split it between `killer_count` killers.
///
/// Each killer gets `n / k` items as contiguous slices of the shuffled pool;
/// the `n % k` leftover items go, in pool order, to distinct randomly chosen
/// killers. Returns one share per killer. With no killers the result is empty.
pub fn distribute_loot<T, R: Rng + ?Sized>(mut pool: Vec<T>, killer_count: usize, rng: &mut R) -> Vec<Vec<T>> {
    if killer_count == 0 {
        return Vec::new();
    }

    pool.shuffle(rng);
    let base = pool.len() / killer_count;
    let remainder = pool.len() % killer_count;

    let mut items = pool.into_iter();
    let mut shares: Vec<Vec<T>> = (0..killer_count)
        .map(|_| items.by_ref().take(base).collect())
        .collect();

    let lucky = rand::seq::index::sample(rng, killer_count, remainder);
    for (killer, item) in lucky.into_iter().zip(items) {
        shares[killer].push(item);
    }

    shares
}
