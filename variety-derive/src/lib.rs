//! Derive macros for the Variety test data library
//!
//! This crate provides `#[derive(Fuzzable)]`, which describes how the object
//! graph fuzzer builds instances of a type.

use proc_macro::TokenStream;

mod derive;

/// Derive macro for automatically implementing the Fuzzable trait
///
/// This macro can be applied to structs and enums. The generated descriptor
/// is what `Fuzzer::generate_instance_of` walks to build fully populated
/// instances.
///
/// # Basic Usage
///
/// ```rust
/// use variety::Fuzzable;
///
/// #[derive(Fuzzable)]
/// struct User {
///     id: u32,
///     name: String,
///     tags: Vec<String>,
/// }
/// ```
///
/// By default a struct is built through its literal, with every field
/// fuzzed recursively.
///
/// # Constructors
///
/// Validating constructors can be declared instead. The richest one is tried
/// first; when a `fallible` constructor returns `Err`, the next one by
/// descending arity is tried with fresh arguments:
///
/// ```rust
/// use variety::Fuzzable;
///
/// #[derive(Fuzzable)]
/// #[fuzz(constructor(path = "Money::try_new", arity = 2, fallible))]
/// #[fuzz(constructor(path = "Money::zero", arity = 0))]
/// struct Money {
///     amount: i64,
///     currency: String,
/// }
///
/// impl Money {
///     fn try_new(amount: i64, currency: String) -> Result<Self, String> {
///         if amount < 0 {
///             return Err(format!("negative amount {}", amount));
///         }
///         Ok(Money { amount, currency })
///     }
///
///     fn zero() -> Self {
///         Money { amount: 0, currency: "EUR".to_string() }
///     }
/// }
/// ```
///
/// # Setters
///
/// `#[fuzz(setters)]` builds the value with `Default::default()` and then
/// assigns every field. Fields marked `#[fuzz(skip)]` keep their default:
///
/// ```rust
/// use variety::Fuzzable;
///
/// #[derive(Default, Fuzzable)]
/// #[fuzz(setters)]
/// struct Settings {
///     retries: u8,
///     endpoint: String,
///     #[fuzz(skip)]
///     revision: u64,
/// }
/// ```
///
/// # Supported Attributes
///
/// - `#[fuzz(constructor(path = "...", arity = N))]`: build through a function taking `N` fuzzed arguments
/// - `#[fuzz(constructor(path = "...", arity = N, fallible))]`: same, for functions returning `Result<Self, E>`
/// - `#[fuzz(setters)]`: default construction followed by one assignment per field
/// - `#[fuzz(skip)]` on a field: never fuzzed, always `Default::default()`
///
/// # Enums
///
/// Each generated value is one of the declared variants, picked uniformly,
/// with its fields fuzzed:
///
/// ```rust
/// use variety::Fuzzable;
///
/// #[derive(Fuzzable)]
/// enum Status {
///     Active,
///     Suspended(String),
///     Closed { reason: String },
/// }
/// ```
///
/// # Generic Types
///
/// Type parameters receive a `Fuzzable` bound. Lifetime parameters are not
/// supported.
#[proc_macro_derive(Fuzzable, attributes(fuzz))]
pub fn derive_fuzzable(input: TokenStream) -> TokenStream {
    derive::derive_fuzzable_impl(input)
}
