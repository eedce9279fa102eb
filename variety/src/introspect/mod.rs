//! Type descriptors and the object-graph fuzzer.
//!
//! A type takes part in object-graph generation by implementing [`Fuzzable`],
//! usually through `#[derive(Fuzzable)]`. Its [`TypeShape`] tells the
//! [`GraphFuzzer`] whether it is a primitive leaf, an enumeration, a
//! collection or a composite built from constructors and setters.

mod graph;
mod impls;

pub use graph::GraphFuzzer;

use crate::fuzzer::Fuzzer;

/// Error a fallible constructor may return; it only triggers a fallback
pub type ConstructorError = Box<dyn std::error::Error + Send + Sync>;

type BuildFn<T> = Box<dyn Fn(&mut GraphFuzzer<'_>) -> Result<T, ConstructorError>>;
type AssignFn<T> = Box<dyn Fn(&mut T, &mut GraphFuzzer<'_>)>;
type ShapeFn<T> = Box<dyn Fn(&mut GraphFuzzer<'_>) -> T>;

/// Types the graph fuzzer can build
///
/// ```rust
/// use variety::{Fuzzable, Fuzzer, TypeDescriptor, TypeShape};
///
/// struct Celsius(f64);
///
/// impl Fuzzable for Celsius {
///     fn shape() -> TypeShape<Self> {
///         TypeShape::Composite(
///             TypeDescriptor::new("Celsius")
///                 .constructor(1, |graph| Celsius::try_new(graph.fuzz())),
///         )
///     }
///
///     fn degraded() -> Self {
///         Celsius(0.0)
///     }
/// }
///
/// impl Celsius {
///     fn try_new(degrees: f64) -> Result<Self, String> {
///         if degrees < -273.15 {
///             return Err(format!("{} is below absolute zero", degrees));
///         }
///         Ok(Celsius(degrees))
///     }
/// }
///
/// variety::register_log_sink(|_: &str| {});
/// let mut fuzzer = Fuzzer::with_seed(42).unwrap();
/// let temperature: Celsius = fuzzer.generate_instance_of();
/// assert!(temperature.0 >= -273.15);
/// ```
pub trait Fuzzable: Sized + 'static {
    /// How instances of this type are built
    fn shape() -> TypeShape<Self>;

    /// Placeholder returned past the recursion ceiling or when every constructor fails
    fn degraded() -> Self;
}

/// The generation strategy of a type
pub enum TypeShape<T> {
    /// Scalar leaf drawn directly from the fuzzer's PRNG
    Primitive(fn(&mut Fuzzer) -> T),
    /// One of the declared variants, picked uniformly
    Enumeration(Vec<Variant<T>>),
    /// A collection filled with exactly [`COLLECTION_SIZE`](crate::COLLECTION_SIZE) elements
    Collection(ShapeFn<T>),
    /// A type built through its constructors and setters
    Composite(TypeDescriptor<T>),
}

impl<T> TypeShape<T> {
    /// Collection shape from a builder closure
    pub fn collection<F>(build: F) -> Self
    where
        F: Fn(&mut GraphFuzzer<'_>) -> T + 'static,
    {
        TypeShape::Collection(Box::new(build))
    }

    /// Short name of the shape, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            TypeShape::Primitive(_) => "primitive",
            TypeShape::Enumeration(_) => "enumeration",
            TypeShape::Collection(_) => "collection",
            TypeShape::Composite(_) => "composite",
        }
    }
}

/// One declared variant of an enumeration
pub struct Variant<T> {
    name: &'static str,
    build: ShapeFn<T>,
}

impl<T> Variant<T> {
    /// Declare a variant and how to fill its fields
    pub fn new<F>(name: &'static str, build: F) -> Self
    where
        F: Fn(&mut GraphFuzzer<'_>) -> T + 'static,
    {
        Self {
            name,
            build: Box::new(build),
        }
    }

    /// Declared name of the variant
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn build(&self, graph: &mut GraphFuzzer<'_>) -> T {
        (self.build)(graph)
    }
}

/// A way to instantiate a composite type from `arity` fuzzed arguments
pub struct Constructor<T> {
    arity: usize,
    build: BuildFn<T>,
}

impl<T> Constructor<T> {
    /// Number of arguments the constructor takes
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn build(&self, graph: &mut GraphFuzzer<'_>) -> Result<T, ConstructorError> {
        (self.build)(graph)
    }
}

/// A writable member assigned after a zero-argument construction
pub struct Setter<T> {
    name: &'static str,
    assign: AssignFn<T>,
}

impl<T> Setter<T> {
    /// Name of the member
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn assign(&self, instance: &mut T, graph: &mut GraphFuzzer<'_>) {
        (self.assign)(instance, graph)
    }
}

/// Constructors and setters of a composite type
pub struct TypeDescriptor<T> {
    name: &'static str,
    constructors: Vec<Constructor<T>>,
    setters: Vec<Setter<T>>,
}

impl<T> TypeDescriptor<T> {
    /// Start an empty descriptor for the type called `name`
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            constructors: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// Declare a constructor taking `arity` arguments
    pub fn constructor<F, E>(mut self, arity: usize, build: F) -> Self
    where
        T: 'static,
        F: Fn(&mut GraphFuzzer<'_>) -> Result<T, E> + 'static,
        E: Into<ConstructorError> + 'static,
    {
        self.constructors.push(Constructor {
            arity,
            build: Box::new(move |graph| build(graph).map_err(Into::into)),
        });
        self
    }

    /// Declare a writable member
    pub fn setter<F>(mut self, name: &'static str, assign: F) -> Self
    where
        F: Fn(&mut T, &mut GraphFuzzer<'_>) + 'static,
    {
        self.setters.push(Setter {
            name,
            assign: Box::new(assign),
        });
        self
    }

    /// Name of the described type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared setters, in declaration order
    pub fn setters(&self) -> &[Setter<T>] {
        &self.setters
    }

    /// Constructors from richest to poorest; ties keep declaration order
    pub fn constructors_by_arity(&self) -> Vec<&Constructor<T>> {
        let mut constructors: Vec<&Constructor<T>> = self.constructors.iter().collect();
        constructors.sort_by(|a, b| b.arity.cmp(&a.arity));
        constructors
    }
}
