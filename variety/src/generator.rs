//! Core generator trait and the table-backed pick generator.

use crate::error::FuzzError;
use crate::hashing::{HashArgument, combine_hashes, hash_value};
use crate::rng::SharedRng;

/// A validated, reusable recipe for drawing values of type `T`
///
/// Range checks happen when the generator is built, so `generate` itself
/// cannot fail. Every draw goes through the two PRNG primitives of
/// [`SharedRng`], which keeps seeds reproducible through every derived
/// generator.
pub trait Generator<T> {
    /// Draw a value from `rng`
    fn generate(&self, rng: &SharedRng) -> T;

    /// Structural hash of the generator's parameters, used as memoizer key
    fn arguments_hash(&self) -> u64;
}

/// A generator that picks uniformly from a fixed list of values
#[derive(Debug, Clone)]
pub struct OneOfGenerator<'a, T> {
    values: &'a [T],
}

impl<'a, T> OneOfGenerator<'a, T> {
    /// Create a one-of generator; `None` and empty lists are rejected
    pub fn new(values: Option<&'a [T]>) -> Result<Self, FuzzError> {
        let values = values.ok_or(FuzzError::NullCandidates {
            parameter: "values",
        })?;
        if values.is_empty() {
            return Err(FuzzError::EmptyCandidates {
                parameter: "values",
            });
        }
        Ok(Self { values })
    }

    /// Create a one-of generator over a static table known to be non-empty
    pub(crate) fn from_table(values: &'a [T]) -> Self {
        debug_assert!(!values.is_empty());
        Self { values }
    }

    /// Number of possible values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: empty lists are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Clone + HashArgument> Generator<T> for OneOfGenerator<'_, T> {
    fn generate(&self, rng: &SharedRng) -> T {
        self.values[rng.next_index(self.values.len())].clone()
    }

    fn arguments_hash(&self) -> u64 {
        combine_hashes([hash_value("one_of"), self.values.argument_hash()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_generator() {
        let values = [1, 2, 3, 4, 5];
        let generator = OneOfGenerator::new(Some(&values[..])).unwrap();
        let rng = SharedRng::new(17);

        assert_eq!(generator.len(), 5);
        for _ in 0..20 {
            let value = generator.generate(&rng);
            assert!(values.contains(&value));
        }
    }

    #[test]
    fn test_one_of_generator_rejects_missing_values() {
        let missing = OneOfGenerator::<i32>::new(None).unwrap_err();
        assert_eq!(missing, FuzzError::NullCandidates { parameter: "values" });

        let empty = OneOfGenerator::<i32>::new(Some(&[])).unwrap_err();
        assert_eq!(empty, FuzzError::EmptyCandidates { parameter: "values" });
    }

    #[test]
    fn test_one_of_generator_is_reproducible() {
        let values = ["a", "b", "c", "d"];
        let generator = OneOfGenerator::from_table(&values[..]);
        let rng1 = SharedRng::new(99);
        let rng2 = SharedRng::new(99);

        let first: Vec<_> = (0..10).map(|_| generator.generate(&rng1)).collect();
        let second: Vec<_> = (0..10).map(|_| generator.generate(&rng2)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_tables_share_arguments_hash() {
        let first = vec![1, 2, 3];
        let second = vec![1, 2, 3];
        assert_eq!(
            OneOfGenerator::from_table(&first[..]).arguments_hash(),
            OneOfGenerator::from_table(&second[..]).arguments_hash()
        );
    }
}
