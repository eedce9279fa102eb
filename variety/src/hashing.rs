//! Structural hashing of generator arguments, used to key memoized streams.
//!
//! Two calls of the same operation with equal arguments (same elements, same
//! order) must land on the same key, whatever the identity of the argument
//! collections.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

const SEED: u64 = 17;
const FACTOR: u64 = 23;

/// Fold `hashes` into one value with the fixed multiplicative combiner
pub fn combine_hashes(hashes: impl IntoIterator<Item = u64>) -> u64 {
    hashes
        .into_iter()
        .fold(SEED, |acc, hash| acc.wrapping_mul(FACTOR).wrapping_add(hash))
}

/// Hash an ordered list of call arguments
pub fn hash_arguments(values: &[&dyn HashArgument]) -> u64 {
    combine_hashes(values.iter().map(|value| value.argument_hash()))
}

/// Values that can take part in a memoizer key
pub trait HashArgument {
    /// Stable structural hash of the value
    fn argument_hash(&self) -> u64;
}

/// Hash one value with the standard hasher
pub fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

macro_rules! impl_scalar_hash_argument {
    ($($t:ty),*) => {
        $(
            impl HashArgument for $t {
                fn argument_hash(&self) -> u64 {
                    hash_value(self)
                }
            }
        )*
    };
}

impl_scalar_hash_argument!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, str, String,
    NaiveDate, NaiveDateTime, Uuid
);

impl HashArgument for f64 {
    fn argument_hash(&self) -> u64 {
        // -0.0 and 0.0 are the same bound
        if *self == 0.0 {
            hash_value(&0u64)
        } else {
            hash_value(&self.to_bits())
        }
    }
}

impl HashArgument for f32 {
    fn argument_hash(&self) -> u64 {
        f64::from(*self).argument_hash()
    }
}

impl<T: HashArgument + ?Sized> HashArgument for &T {
    fn argument_hash(&self) -> u64 {
        (**self).argument_hash()
    }
}

impl<T: HashArgument> HashArgument for Option<T> {
    fn argument_hash(&self) -> u64 {
        match self {
            Some(value) => combine_hashes([1, value.argument_hash()]),
            None => 0,
        }
    }
}

impl<T: HashArgument> HashArgument for [T] {
    fn argument_hash(&self) -> u64 {
        combine_hashes(self.iter().map(HashArgument::argument_hash))
    }
}

impl<T: HashArgument> HashArgument for Vec<T> {
    fn argument_hash(&self) -> u64 {
        self.as_slice().argument_hash()
    }
}

impl<T: HashArgument, const N: usize> HashArgument for [T; N] {
    fn argument_hash(&self) -> u64 {
        self.as_slice().argument_hash()
    }
}

/// Hash a list of arguments in call order
///
/// ```rust
/// use variety::arguments;
///
/// let a = arguments![1, Some(10)];
/// let b = arguments![1, Some(10)];
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! arguments {
    () => {
        $crate::hashing::hash_arguments(&[])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::hashing::hash_arguments(&[$(&$value as &dyn $crate::hashing::HashArgument),+])
    };
}
