//! [`Fuzzable`] implementations for standard library and ecosystem types.
//!
//! Scalars draw straight from the PRNG and are never memoized, even on a
//! no-duplication fuzzer.

use std::collections::VecDeque;
use std::convert::Infallible;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::generator::Generator;
use crate::generators::dates::{DateGenerator, DateTimeGenerator, default_min_date_time};
use crate::generators::guids::GuidGenerator;
use crate::generators::numbers::{DecimalGenerator, IntegerGenerator, LongGenerator};
use crate::generators::strings::{LatinTextGenerator, draw_char};
use crate::introspect::{Fuzzable, GraphFuzzer, TypeDescriptor, TypeShape};
use crate::rng::SharedRng;

const GRAPH_STRING_MIN_WORDS: usize = 1;
const GRAPH_STRING_MAX_WORDS: usize = 3;
const GRAPH_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

macro_rules! impl_primitive_fuzzable {
    ($($t:ty => $draw:expr),* $(,)?) => {
        $(
            impl Fuzzable for $t {
                fn shape() -> TypeShape<Self> {
                    TypeShape::Primitive($draw)
                }

                fn degraded() -> Self {
                    <$t>::default()
                }
            }
        )*
    };
}

macro_rules! impl_narrow_integer_fuzzable {
    ($($t:ty),*) => {
        $(
            impl Fuzzable for $t {
                fn shape() -> TypeShape<Self> {
                    TypeShape::Primitive(|fuzzer| {
                        let range = LongGenerator::between(i64::from(<$t>::MIN), i64::from(<$t>::MAX));
                        range.generate(fuzzer.rng()) as $t
                    })
                }

                fn degraded() -> Self {
                    0
                }
            }
        )*
    };
}

impl_narrow_integer_fuzzable!(i8, i16, u8, u16, u32);

impl_primitive_fuzzable! {
    bool => |fuzzer| fuzzer.rng().flip_coin(),
    i32 => |fuzzer| IntegerGenerator::full_range().generate(fuzzer.rng()),
    i64 => |fuzzer| LongGenerator::full_range().generate(fuzzer.rng()),
    isize => |fuzzer| LongGenerator::full_range().generate(fuzzer.rng()) as isize,
    u64 => |fuzzer| LongGenerator::full_range().generate(fuzzer.rng()) as u64,
    usize => |fuzzer| LongGenerator::full_range().generate(fuzzer.rng()) as usize,
    f64 => |fuzzer| draw_decimal(fuzzer.rng()),
    f32 => |fuzzer| draw_decimal(fuzzer.rng()) as f32,
    char => |fuzzer| draw_char(fuzzer.rng(), GRAPH_CHARS),
    String => |fuzzer| {
        LatinTextGenerator::between(GRAPH_STRING_MIN_WORDS, GRAPH_STRING_MAX_WORDS)
            .generate(fuzzer.rng())
            .join(" ")
    },
    Uuid => |fuzzer| GuidGenerator.generate(fuzzer.rng()),
}

fn draw_decimal(rng: &SharedRng) -> f64 {
    match DecimalGenerator::positive(None, None) {
        Ok(generator) => generator.generate(rng),
        Err(_) => rng.next_double(),
    }
}

impl Fuzzable for NaiveDateTime {
    fn shape() -> TypeShape<Self> {
        TypeShape::Primitive(|fuzzer| DateTimeGenerator::default().generate(fuzzer.rng()))
    }

    fn degraded() -> Self {
        default_min_date_time()
    }
}

impl Fuzzable for NaiveDate {
    fn shape() -> TypeShape<Self> {
        TypeShape::Primitive(|fuzzer| DateGenerator::default().generate(fuzzer.rng()))
    }

    fn degraded() -> Self {
        default_min_date_time().date()
    }
}

impl<T: Fuzzable> Fuzzable for Vec<T> {
    fn shape() -> TypeShape<Self> {
        TypeShape::collection(|graph: &mut GraphFuzzer<'_>| graph.fuzz_collection::<T, Self>())
    }

    fn degraded() -> Self {
        Vec::new()
    }
}

impl<T: Fuzzable> Fuzzable for VecDeque<T> {
    fn shape() -> TypeShape<Self> {
        TypeShape::collection(|graph: &mut GraphFuzzer<'_>| graph.fuzz_collection::<T, Self>())
    }

    fn degraded() -> Self {
        VecDeque::new()
    }
}

impl<T: Fuzzable> Fuzzable for Option<T> {
    fn shape() -> TypeShape<Self> {
        TypeShape::Composite(
            TypeDescriptor::new("Option")
                .constructor(1, |graph| Ok::<_, Infallible>(Some(graph.fuzz::<T>()))),
        )
    }

    fn degraded() -> Self {
        None
    }
}

impl<T: Fuzzable> Fuzzable for Box<T> {
    fn shape() -> TypeShape<Self> {
        TypeShape::Composite(
            TypeDescriptor::new("Box")
                .constructor(1, |graph| Ok::<_, Infallible>(Box::new(graph.fuzz::<T>()))),
        )
    }

    fn degraded() -> Self {
        Box::new(T::degraded())
    }
}

impl<A: Fuzzable, B: Fuzzable> Fuzzable for (A, B) {
    fn shape() -> TypeShape<Self> {
        TypeShape::Composite(TypeDescriptor::new("tuple").constructor(2, |graph| {
            let a = graph.fuzz::<A>();
            let b = graph.fuzz::<B>();
            Ok::<_, Infallible>((a, b))
        }))
    }

    fn degraded() -> Self {
        (A::degraded(), B::degraded())
    }
}

impl<A: Fuzzable, B: Fuzzable, C: Fuzzable> Fuzzable for (A, B, C) {
    fn shape() -> TypeShape<Self> {
        TypeShape::Composite(TypeDescriptor::new("tuple").constructor(3, |graph| {
            let a = graph.fuzz::<A>();
            let b = graph.fuzz::<B>();
            let c = graph.fuzz::<C>();
            Ok::<_, Infallible>((a, b, c))
        }))
    }

    fn degraded() -> Self {
        (A::degraded(), B::degraded(), C::degraded())
    }
}
