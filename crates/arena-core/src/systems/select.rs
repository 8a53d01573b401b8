//! Action and Candidate Selection
//!
//! Random draws used by the round scheduler: which action, and which
//! tributes to try it on.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::actions::Action;

/// Perform weighted random selection from a pool of actions.
///
/// Returns `None` only for an empty pool. Equal weights give a uniform draw.
pub fn weighted_random_choice<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [Action]) -> Option<&'a Action> {
    let total_weight: f32 = pool.iter().map(|a| a.weight).sum();

    if total_weight <= 0.0 {
        return pool.choose(rng);
    }

    let mut roll: f32 = rng.gen::<f32>() * total_weight;

    for action in pool {
        roll -= action.weight;
        if roll < 0.0 {
            return Some(action);
        }
    }

    // Float rounding can leave a sliver past the last bucket
    pool.last()
}

/// Sample `size` distinct candidates uniformly, in random slot order.
pub fn sample_tuple<T: Copy, R: Rng + ?Sized>(rng: &mut R, available: &[T], size: usize) -> Vec<T> {
    let mut candidates = available.to_vec();
    let (picked, _) = candidates.partial_shuffle(rng, size);
    picked.to_vec()
}
