use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{EngineError, Result};

/// A shuffled copy of `source`. The source is left untouched.
pub fn shuffle_copy<T: Clone, R: Rng + ?Sized>(source: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = source.to_vec();
    if shuffled.len() > 1 {
        shuffled.shuffle(rng);
    }
    shuffled
}

/// A uniformly chosen element of `source`.
pub fn random_element<'a, T, R: Rng + ?Sized>(source: &'a [T], rng: &mut R) -> Result<&'a T> {
    if source.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    Ok(&source[rng.gen_range(0..source.len())])
}
