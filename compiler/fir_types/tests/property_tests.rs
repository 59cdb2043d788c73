//! Property-based tests for the type codec and the pool.
//!
//! Strategies generate canonical type text that satisfies every
//! construction invariant, then check:
//! 1. Round-trip: print(parse(text)) == text
//! 2. Interning: parsing the same text twice yields the same handle and
//!    grows nothing
//! 3. Pool independence: a fresh pool prints the same text
//! 4. Classification agrees with the family the text was built from
//!
//! Each case first draws a small graph of derived types. Every record text
//! in the case comes from that graph, so a record never appears with two
//! different bodies.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::sync::Arc;

use fir_types::{Pool, STD_FLOAT_WIDTHS};
use proptest::prelude::*;

/// Family of a generated type, as far as the construction rules care.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Family {
    Scalar,
    Indirection,
    Descriptor,
    Sequence,
    Function,
    Metadata,
    Invalid,
}

// -- Record Graphs --

const RECORD_NAMES: [&str; 3] = ["_QMgTa", "_QMgTb", "_QMgTc"];

#[derive(Clone, Debug)]
enum FieldDef {
    Scalar(String),
    /// `ptr`/`heap` of another record in the graph, possibly itself.
    Link(&'static str, usize),
    /// Another record by value. Only ever points later in the graph.
    Inline(usize),
}

#[derive(Clone, Debug)]
struct RecordDef {
    name: &'static str,
    /// Kind of the `n` length parameter.
    len_kind: Option<u32>,
    /// `None` while only declared.
    body: Option<Vec<FieldDef>>,
}

type Graph = Arc<Vec<RecordDef>>;

fn field_strategy(count: usize) -> impl Strategy<Value = FieldDef> {
    prop_oneof![
        intrinsic_strategy().prop_map(FieldDef::Scalar),
        (prop::sample::select(vec!["ptr", "heap"]), 0..count)
            .prop_map(|(keyword, to)| FieldDef::Link(keyword, to)),
        (0..count).prop_map(FieldDef::Inline),
    ]
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1..=RECORD_NAMES.len()).prop_flat_map(|count| {
        let def = (
            prop::option::of(1u32..=8),
            prop::option::weighted(0.8, prop::collection::vec(field_strategy(count), 0..4)),
        );
        prop::collection::vec(def, count).prop_map(|defs| {
            let records = defs
                .into_iter()
                .enumerate()
                .map(|(i, (len_kind, body))| RecordDef {
                    name: RECORD_NAMES[i],
                    len_kind,
                    body: body.map(|fields| {
                        fields
                            .into_iter()
                            .map(|field| match field {
                                FieldDef::Inline(to) if to <= i => FieldDef::Link("ptr", to),
                                field => field,
                            })
                            .collect()
                    }),
                })
                .collect();
            Arc::new(records)
        })
    })
}

/// Canonical text of record `i`. A record reached inside its own body
/// prints bare.
fn record_text(graph: &[RecordDef], i: usize) -> String {
    let mut out = String::new();
    write_record(graph, i, &mut Vec::new(), &mut out);
    out
}

fn write_record(graph: &[RecordDef], i: usize, open: &mut Vec<usize>, out: &mut String) {
    let def = &graph[i];
    out.push_str("type<");
    out.push_str(def.name);
    if let Some(body) = def.body.as_ref().filter(|_| !open.contains(&i)) {
        open.push(i);
        if let Some(kind) = def.len_kind {
            out.push_str(&format!("(n:int<{kind}>)"));
        }
        out.push('{');
        for (f, field) in body.iter().enumerate() {
            if f > 0 {
                out.push(',');
            }
            out.push_str(&format!("f{f}:"));
            match field {
                FieldDef::Scalar(text) => out.push_str(text),
                FieldDef::Link(keyword, to) => {
                    out.push_str(keyword);
                    out.push('<');
                    write_record(graph, *to, open, out);
                    out.push('>');
                }
                FieldDef::Inline(to) => write_record(graph, *to, open, out),
            }
        }
        out.push('}');
        open.pop();
    }
    out.push('>');
}

// -- Type Text Strategies --

fn intrinsic_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["character", "complex", "int", "logical", "real"]),
        1u32..=16,
    )
        .prop_map(|(keyword, kind)| format!("{keyword}<{kind}>"))
}

fn metadata_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("field".to_owned()),
        Just("len".to_owned()),
        prop::option::of(0u32..8)
            .prop_map(|rank| rank.map_or_else(|| "dims<*>".to_owned(), |r| format!("dims<{r}>"))),
    ]
}

fn leaf_strategy(graph: Graph) -> impl Strategy<Value = (String, Family)> {
    let count = graph.len();
    prop_oneof![
        4 => intrinsic_strategy().prop_map(|t| (t, Family::Scalar)),
        1 => (1u32..=128).prop_map(|w| (format!("i{w}"), Family::Scalar)),
        1 => prop::sample::select(STD_FLOAT_WIDTHS.to_vec())
            .prop_map(|w| (format!("f{w}"), Family::Scalar)),
        1 => Just(("index".to_owned(), Family::Scalar)),
        1 => (1u32..=4).prop_map(|k| (format!("boxchar<{k}>"), Family::Descriptor)),
        1 => prop::sample::select(vec!["a", "node", "_QMmodTpoint"])
            .prop_map(|name| (format!("type<{name}>"), Family::Scalar)),
        3 => (0..count).prop_map(move |i| (record_text(&graph, i), Family::Scalar)),
        1 => metadata_strategy().prop_map(|t| (t, Family::Metadata)),
        1 => Just(("invalid".to_owned(), Family::Invalid)),
    ]
}

fn shape_strategy() -> impl Strategy<Value = String> {
    let extent = prop_oneof![Just(None), (0i64..1000).prop_map(Some)];
    prop::collection::vec(extent, 0..4).prop_map(|extents| {
        if extents.is_empty() {
            return "*".to_owned();
        }
        extents
            .iter()
            .map(|e| e.map_or_else(|| "?".to_owned(), |e| e.to_string()))
            .collect::<Vec<_>>()
            .join("x")
    })
}

fn layout_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        1 => Just(", layout=(d0) -> (d0)".to_owned()),
        1 => Just(", layout=affine_map<(d0, d1) -> (d1, d0)>".to_owned()),
    ]
}

fn type_strategy(graph: Graph) -> impl Strategy<Value = (String, Family)> {
    leaf_strategy(graph).prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            inner.clone().prop_filter_map("ref of indirection or metadata", |(t, family)| {
                (!matches!(family, Family::Indirection | Family::Metadata))
                    .then(|| (format!("ref<{t}>"), Family::Indirection))
            }),
            (prop::sample::select(vec!["ptr", "heap"]), inner.clone()).prop_filter_map(
                "ptr/heap of indirection or descriptor",
                |(keyword, (t, family))| {
                    matches!(family, Family::Scalar | Family::Sequence | Family::Function)
                        .then(|| (format!("{keyword}<{t}>"), Family::Indirection))
                }
            ),
            (inner.clone(), layout_strategy())
                .prop_map(|((t, _), layout)| (format!("box<{t}{layout}>"), Family::Descriptor)),
            (
                prop::collection::vec(inner.clone(), 0..2),
                prop::collection::vec(inner.clone(), 0..2)
            )
                .prop_map(|(inputs, results)| {
                    let sig = signature(&inputs, &results);
                    (format!("boxproc<{sig}>"), Family::Descriptor)
                }),
            (shape_strategy(), inner.clone(), layout_strategy()).prop_filter_map(
                "array of sequence or descriptor",
                |(shape, (t, family), layout)| {
                    matches!(family, Family::Scalar | Family::Indirection | Family::Function)
                        .then(|| (format!("array<{shape}:{t}{layout}>"), Family::Sequence))
                }
            ),
            inner.clone().prop_filter_map("tdesc of a non-scalar", |(t, family)| {
                (family == Family::Scalar).then(|| (format!("tdesc<{t}>"), Family::Metadata))
            }),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner, 0..3)
            )
                .prop_map(|(inputs, results)| (signature(&inputs, &results), Family::Function)),
        ]
    })
}

/// A graph plus one type drawn from it.
fn case_strategy() -> impl Strategy<Value = (String, Family)> {
    graph_strategy().prop_flat_map(type_strategy)
}

/// A graph plus two types drawn from it.
fn pair_strategy() -> impl Strategy<Value = (String, String)> {
    graph_strategy().prop_flat_map(|graph| {
        (type_strategy(Arc::clone(&graph)), type_strategy(graph))
            .prop_map(|((a, _), (b, _))| (a, b))
    })
}

fn signature(inputs: &[(String, Family)], results: &[(String, Family)]) -> String {
    let list = |types: &[(String, Family)]| {
        types
            .iter()
            .map(|(t, _)| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match results {
        [(single, family)] if *family != Family::Function => {
            format!("({}) -> {single}", list(inputs))
        }
        _ => format!("({}) -> ({})", list(inputs), list(results)),
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Canonical text survives parse then print unchanged.
    #[test]
    fn prop_roundtrip((text, _) in case_strategy()) {
        let mut pool = Pool::new();
        let idx = pool.parse_type_str(&text).unwrap();
        prop_assert_eq!(pool.format_type(idx), text);
    }

    /// Interning is idempotent: the same text is the same handle.
    #[test]
    fn prop_interning_idempotent((text, _) in case_strategy()) {
        let mut pool = Pool::new();
        let first = pool.parse_type_str(&text).unwrap();
        let len = pool.len();
        let second = pool.parse_type_str(&text).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(pool.len(), len);
    }

    /// Printed text means the same thing in any pool.
    #[test]
    fn prop_pools_agree((text, noise) in pair_strategy()) {
        let mut noisy = Pool::new();
        noisy.parse_type_str(&noise).unwrap();
        let a = noisy.parse_type_str(&text).unwrap();

        let mut fresh = Pool::new();
        let b = fresh.parse_type_str(&noisy.format_type(a)).unwrap();
        prop_assert_eq!(fresh.format_type(b), noisy.format_type(a));
    }

    /// Flags agree with the family each type was generated as.
    #[test]
    fn prop_classification((text, family) in case_strategy()) {
        let mut pool = Pool::new();
        let idx = pool.parse_type_str(&text).unwrap();

        prop_assert_eq!(pool.is_indirection_type(idx), family == Family::Indirection);
        prop_assert_eq!(
            pool.is_aggregate_type(idx),
            matches!(family, Family::Descriptor | Family::Sequence)
                || text.starts_with("type<")
        );
        prop_assert_eq!(pool.is_procedure_signature(idx), family == Family::Function);
        prop_assert_eq!(pool.is_fir_or_std_type(idx), family != Family::Invalid);
        prop_assert_eq!(pool.has_invalid(idx), text.contains("invalid"));
    }

    /// Stripping an indirection yields the type inside the brackets.
    #[test]
    fn prop_element_of_indirection((text, family) in case_strategy()) {
        let mut pool = Pool::new();
        let idx = pool.parse_type_str(&text).unwrap();
        match pool.element_type_of_indirection(idx) {
            Some(elem) => {
                prop_assert_eq!(family, Family::Indirection);
                let open = text.find('<').unwrap();
                prop_assert_eq!(pool.format_type(elem), &text[open + 1..text.len() - 1]);
            }
            None => prop_assert_ne!(family, Family::Indirection),
        }
    }
}
