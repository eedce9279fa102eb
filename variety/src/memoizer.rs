//! Per-scope memory of values already handed out, keyed by generation stream.
//!
//! Each [`MemoizerKey`] owns a sorted set of the values returned for it. Sets
//! only grow; a fresh scope is obtained by creating a no-duplication
//! sub-fuzzer, never by clearing.

use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use crate::error::DuplicationFailure;

/// Identity of one generation stream inside a memoizer scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoizerKey {
    /// Name of the generating operation
    pub operation: &'static str,
    /// Structural hash of the operation's arguments
    pub arguments_hash: u64,
    value_type: TypeId,
}

impl MemoizerKey {
    /// Key for values of type `T` produced by `operation` called with `arguments_hash`
    pub fn new<T: 'static>(operation: &'static str, arguments_hash: u64) -> Self {
        Self {
            operation,
            arguments_hash,
            value_type: TypeId::of::<T>(),
        }
    }
}

/// Type-erased store of already-provided value sets
#[derive(Default)]
pub struct Memoizer {
    provided: HashMap<MemoizerKey, Box<dyn Any>>,
}

impl Memoizer {
    /// Create an empty scope
    pub fn new() -> Self {
        Self {
            provided: HashMap::new(),
        }
    }

    /// Remember `value` for `key`. Returns `false` when it was already provided.
    pub fn record<T>(&mut self, key: &MemoizerKey, value: &T) -> bool
    where
        T: Ord + Clone + 'static,
    {
        let slot = self
            .provided
            .entry(*key)
            .or_insert_with(|| Box::new(BTreeSet::<T>::new()));
        // Keys carry the TypeId of T, so the downcast only misses on a foreign set
        match slot.downcast_mut::<BTreeSet<T>>() {
            Some(set) if !set.contains(value) => set.insert(value.clone()),
            _ => false,
        }
    }

    /// Values already provided for `key`, in sorted order
    pub fn already_provided<T>(&self, key: &MemoizerKey) -> Option<&BTreeSet<T>>
    where
        T: Ord + 'static,
    {
        self.provided
            .get(key)
            .and_then(|boxed| boxed.downcast_ref::<BTreeSet<T>>())
    }

    /// Number of distinct streams in this scope
    pub fn len(&self) -> usize {
        self.provided.len()
    }

    /// Check if nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.provided.is_empty()
    }

    /// Build the failure reported once `max_attempts` draws found nothing new
    pub fn exhausted<T>(&self, key: &MemoizerKey, max_attempts: usize) -> DuplicationFailure
    where
        T: Ord + Debug + 'static,
    {
        let already_provided = self
            .already_provided::<T>(key)
            .map(|set| set.iter().map(|value| format!("{:?}", value)).collect())
            .unwrap_or_default();

        DuplicationFailure {
            type_name: type_name::<T>(),
            max_attempts,
            already_provided,
        }
    }
}

impl std::fmt::Debug for Memoizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoizer")
            .field("streams", &self.provided.len())
            .finish()
    }
}
