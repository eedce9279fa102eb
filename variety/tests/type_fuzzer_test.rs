//! Integration tests for object-graph generation through the derive macro

use std::collections::{HashSet, VecDeque};

use chrono::NaiveDateTime;
use variety::{COLLECTION_SIZE, Fuzzable, Fuzzer, MAX_SELF_NESTING};

fn fuzzer(seed: i32) -> Fuzzer {
    variety::register_log_sink(|_: &str| {});
    Fuzzer::with_seed(seed).unwrap()
}

#[derive(Debug, Clone, PartialEq, Fuzzable)]
struct Customer {
    name: String,
    email: String,
    vip: bool,
}

#[derive(Debug, Clone, PartialEq, Fuzzable)]
struct OrderLine {
    sku: uuid::Uuid,
    quantity: u16,
    unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Fuzzable)]
struct Order {
    id: i64,
    placed_at: NaiveDateTime,
    customer: Customer,
    lines: Vec<OrderLine>,
    note: Option<String>,
}

#[test]
fn test_nested_struct_is_fully_populated() {
    let mut fuzzer = fuzzer(42);
    let order: Order = fuzzer.generate_instance_of();

    assert!(!order.customer.name.is_empty());
    assert_eq!(order.lines.len(), COLLECTION_SIZE);
    assert!(order.lines.iter().all(|line| line.unit_price >= 1.0));
    assert!(order.note.is_some());
}

#[test]
fn test_same_seed_same_graph() {
    let first: Order = fuzzer(42).generate_instance_of();
    let second: Order = fuzzer(42).generate_instance_of();
    assert_eq!(first, second);
}

#[derive(Debug, Clone, PartialEq, Fuzzable)]
struct Ledger {
    orders: Vec<Order>,
    archived: Vec<Vec<Order>>,
}

#[test]
fn test_wide_graph_is_fully_populated() {
    let mut fuzzer = fuzzer(3);
    let ledger: Ledger = fuzzer.generate_instance_of();

    let orders: Vec<&Order> = ledger
        .orders
        .iter()
        .chain(ledger.archived.iter().flatten())
        .collect();
    assert_eq!(orders.len(), COLLECTION_SIZE + COLLECTION_SIZE * COLLECTION_SIZE);
    for order in orders {
        assert_eq!(order.lines.len(), COLLECTION_SIZE);
        assert!(order.lines.iter().all(|line| line.unit_price >= 1.0));
        assert!(!order.customer.name.is_empty());
    }
}

#[derive(Debug, Fuzzable)]
struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

#[test]
fn test_self_referential_type_terminates() {
    let mut fuzzer = fuzzer(7);
    let tree: Node = fuzzer.generate_instance_of();

    assert_eq!(tree.children.len(), COLLECTION_SIZE);
    let full_tree: usize = (0..=MAX_SELF_NESTING + 1)
        .map(|level| COLLECTION_SIZE.pow(level as u32))
        .sum();
    assert_eq!(tree.count(), full_tree);

}

#[derive(Debug, Fuzzable)]
struct Graph {
    nodes: VecDeque<Box<Graph>>,
    weight: Option<Box<Graph>>,
}

#[test]
fn test_mutually_nested_wrappers_terminate() {
    let mut fuzzer = fuzzer(8);
    let graph: Graph = fuzzer.generate_instance_of();
    assert_eq!(graph.nodes.len(), COLLECTION_SIZE);
}

#[derive(Debug, Default, Fuzzable)]
#[fuzz(setters)]
struct Profile {
    nickname: String,
    logins: u32,
    #[fuzz(skip)]
    revision: u64,
}

#[test]
fn test_setters_fill_writable_fields_only() {
    let mut fuzzer = fuzzer(11);
    let profile: Profile = fuzzer.generate_instance_of();

    assert!(!profile.nickname.is_empty());
    assert_eq!(profile.revision, 0);
}

#[derive(Debug, PartialEq, Fuzzable)]
#[fuzz(constructor(path = "Percentage::try_new", arity = 1, fallible))]
#[fuzz(constructor(path = "Percentage::half", arity = 0))]
struct Percentage(i32);

impl Percentage {
    fn try_new(value: i32) -> Result<Self, String> {
        if (0..=100).contains(&value) {
            Ok(Percentage(value))
        } else {
            Err(format!("{} is not a percentage", value))
        }
    }

    fn half() -> Self {
        Percentage(50)
    }
}

#[test]
fn test_failing_constructor_falls_back() {
    let mut fuzzer = fuzzer(13);
    for _ in 0..20 {
        let percentage: Percentage = fuzzer.generate_instance_of();
        assert!((0..=100).contains(&percentage.0));
    }
}

#[derive(Debug, PartialEq, Fuzzable)]
#[fuzz(constructor(path = "Impossible::try_new", arity = 1, fallible))]
struct Impossible {
    value: u8,
}

impl Impossible {
    fn try_new(_value: u8) -> Result<Self, std::io::Error> {
        Err(std::io::Error::other("never constructible"))
    }
}

#[test]
fn test_unconstructible_type_degrades() {
    let mut fuzzer = fuzzer(13);
    let impossible: Impossible = fuzzer.generate_instance_of();
    assert_eq!(impossible, Impossible { value: 0 });
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fuzzable)]
enum Shipment {
    Pending,
    Shipped(String),
    Delivered { signed_by: String, attempts: u8 },
}

#[test]
fn test_enum_variants_are_all_reachable() {
    let mut fuzzer = fuzzer(19);
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let shipment: Shipment = fuzzer.generate_instance_of();
        seen.insert(std::mem::discriminant(&shipment));
    }
    assert_eq!(seen.len(), 3);
    assert_eq!(<Shipment as Fuzzable>::degraded(), Shipment::Pending);
}

#[derive(Debug, PartialEq, Fuzzable)]
struct Pair<T> {
    left: T,
    right: T,
}

#[derive(Debug, PartialEq, Fuzzable)]
struct Meters(f64);

#[derive(Debug, PartialEq, Fuzzable)]
struct Marker;

#[test]
fn test_generic_tuple_and_unit_structs() {
    let mut fuzzer = fuzzer(23);

    let pair: Pair<Meters> = fuzzer.generate_instance_of();
    assert!(pair.left.0 >= 1.0 && pair.right.0 >= 1.0);

    let Marker = fuzzer.generate_instance_of::<Marker>();
    let degraded = <Pair<Meters> as Fuzzable>::degraded();
    assert_eq!(degraded, Pair { left: Meters(0.0), right: Meters(0.0) });
}

#[test]
fn test_graph_primitives_ignore_duplicate_avoidance() {
    let mut scope = fuzzer(29).no_duplication_fuzzer();
    let flags: Vec<bool> = scope.generate_instance_of();
    assert_eq!(flags.len(), COLLECTION_SIZE);

    let again: Vec<bool> = scope.generate_instance_of();
    assert_eq!(again.len(), COLLECTION_SIZE);
}
