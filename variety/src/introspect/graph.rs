//! The object-graph fuzzer.
//!
//! One [`GraphFuzzer`] serves one `generate_instance_of` request. Siblings and
//! collection elements share the depth of their parent plus one. A branch
//! comes back as its type's degraded value once it is nested deeper than
//! [`MAX_RECURSION_LEVEL`], or once its type already appears more than
//! [`MAX_SELF_NESTING`] times above it. The second limit keeps
//! self-referential types small even with a fan-out of [`COLLECTION_SIZE`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{COLLECTION_SIZE, MAX_RECURSION_LEVEL, MAX_SELF_NESTING};
use crate::fuzzer::Fuzzer;
use crate::introspect::{Fuzzable, TypeDescriptor, TypeShape, Variant};

/// Builds object graphs from type descriptors, drawing from one fuzzer
pub struct GraphFuzzer<'f> {
    fuzzer: &'f mut Fuzzer,
    recursion_level: usize,
    on_path: HashMap<TypeId, usize>,
    shapes: HashMap<TypeId, Rc<dyn Any>>,
}

impl<'f> GraphFuzzer<'f> {
    /// Start a request drawing from `fuzzer`
    pub fn new(fuzzer: &'f mut Fuzzer) -> Self {
        Self {
            fuzzer,
            recursion_level: 0,
            on_path: HashMap::new(),
            shapes: HashMap::new(),
        }
    }

    /// Depth of the value currently being built; 0 between top-level calls
    pub fn recursion_level(&self) -> usize {
        self.recursion_level
    }

    /// The fuzzer values are drawn from
    pub fn fuzzer(&mut self) -> &mut Fuzzer {
        &mut *self.fuzzer
    }

    /// Build a value of type `T`
    ///
    /// Never fails. Past the recursion ceiling, past the self-nesting limit,
    /// and for composite types whose constructors all fail, the type's
    /// degraded value is returned.
    pub fn fuzz<T: Fuzzable>(&mut self) -> T {
        let type_id = TypeId::of::<T>();
        let nesting = self.on_path.get(&type_id).copied().unwrap_or(0);
        if self.recursion_level > MAX_RECURSION_LEVEL || nesting > MAX_SELF_NESTING {
            tracing::trace!(
                type_name = std::any::type_name::<T>(),
                depth = self.recursion_level,
                nesting,
                "recursion ceiling reached, returning degraded value"
            );
            return T::degraded();
        }

        self.recursion_level += 1;
        self.on_path.insert(type_id, nesting + 1);

        let shape = self.shape_of::<T>();
        let value = match &*shape {
            TypeShape::Primitive(draw) => draw(&mut *self.fuzzer),
            TypeShape::Enumeration(variants) => self.pick_variant(variants),
            TypeShape::Collection(build) => build(self),
            TypeShape::Composite(descriptor) => self.construct(descriptor),
        };

        self.recursion_level -= 1;
        if nesting == 0 {
            self.on_path.remove(&type_id);
        } else {
            self.on_path.insert(type_id, nesting);
        }
        value
    }

    /// Collect exactly [`COLLECTION_SIZE`] fuzzed elements
    pub fn fuzz_collection<T, C>(&mut self) -> C
    where
        T: Fuzzable,
        C: FromIterator<T>,
    {
        (0..COLLECTION_SIZE).map(|_| self.fuzz::<T>()).collect()
    }

    fn shape_of<T: Fuzzable>(&mut self) -> Rc<TypeShape<T>> {
        let cached = self
            .shapes
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Rc::new(T::shape()) as Rc<dyn Any>)
            .clone();
        cached
            .downcast::<TypeShape<T>>()
            .unwrap_or_else(|_| Rc::new(T::shape()))
    }

    fn pick_variant<T: Fuzzable>(&mut self, variants: &[Variant<T>]) -> T {
        if variants.is_empty() {
            return T::degraded();
        }
        let index = self.fuzzer.rng().next_index(variants.len());
        variants[index].build(self)
    }

    fn construct<T: Fuzzable>(&mut self, descriptor: &TypeDescriptor<T>) -> T {
        for constructor in descriptor.constructors_by_arity() {
            match constructor.build(self) {
                Ok(mut instance) => {
                    if constructor.arity() == 0 {
                        for setter in descriptor.setters() {
                            setter.assign(&mut instance, self);
                        }
                    }
                    return instance;
                }
                Err(err) => {
                    tracing::debug!(
                        type_name = descriptor.name(),
                        arity = constructor.arity(),
                        error = %err,
                        "constructor failed, trying the next one"
                    );
                }
            }
        }

        tracing::debug!(
            type_name = descriptor.name(),
            "no constructor succeeded, returning degraded value"
        );
        T::degraded()
    }
}

impl std::fmt::Debug for GraphFuzzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphFuzzer")
            .field("seed", &self.fuzzer.seed())
            .field("recursion_level", &self.recursion_level)
            .field("cached_shapes", &self.shapes.len())
            .finish()
    }
}
