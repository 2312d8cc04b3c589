//! Property-based tests for the parser.
//!
//! 1. **Parsing never panics** on arbitrary input, and always terminates
//! 2. **Same-tier operators fold to the left**
//! 3. **Rendering is a fixed point**: parsing the canonical rendering of an
//!    expression and rendering it again yields the same text

use proptest::prelude::*;

use crate::{ast::ast::Node, lexer::tokens::RESERVED_LOOKUP};

use super::parser::{parse, parse_expression, parse_statements};

// ============================================================================
// Generators
// ============================================================================

const FRAGMENTS: &[&str] = &[
    "main() { return 0; }",
    "add(a (int), b (int)) -> int { return a + b; }",
    "Point = (x, y);",
    "Vec = { x: int, y: int[] }",
    "Shape -> { area() -> { return 0; } }",
    "type Circle { let r = 1; }",
    "import \"std/io\";",
    "let f = (x) -> x * 2;",
    "if (a) { b(); } else { c(); }",
    "for (x in xs -> x > 1) { print(x); }",
    "switch (k) { case 1: return 2; default: return 3; }",
    "x = c ? a : b",
    "y = 1 if c else 2",
    "syscall(60, 0)",
];

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}".prop_filter("keywords are not identifiers", |name| {
        !RESERVED_LOOKUP.contains_key(name.as_str())
    })
}

fn number() -> impl Strategy<Value = String> {
    (0u32..1000).prop_map(|n| n.to_string())
}

fn binary_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=",
    ])
}

/// Operators that share a binding power.
fn operator_tier() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::select(vec![
        vec!["+", "-"],
        vec!["*", "/", "%"],
        vec!["<", "<=", ">", ">="],
        vec!["==", "!="],
    ])
}

/// Source text of an expression built from operators, groupings, calls,
/// arrays, prefix minus and `?` ternaries.
fn expression_source() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![identifier(), number()];

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), binary_operator(), inner.clone())
                .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
            inner.clone().prop_map(|expr| format!("({})", expr)),
            inner.clone().prop_map(|expr| format!("-{}", expr)),
            (identifier(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(callee, args)| format!("{}({})", callee, args.join(", "))),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|elements| format!("[{}]", elements.join(", "))),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(c, a, b)| format!("({} ? {} : {})", c, a, b)),
        ]
    })
}

fn near_valid_source() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(FRAGMENTS).prop_map(|s| s.to_string());

    prop_oneof![
        fragment.clone(),
        fragment.clone().prop_flat_map(|s| {
            let len = s.len();
            (0..len).prop_map(move |cut| s[..cut].to_string())
        }),
        (fragment.clone(), fragment).prop_map(|(a, b)| format!("{}\n{}", a, b)),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn parse_never_panics(input in "\\PC{0,200}") {
        let (parser, program) = parse(&input);
        let _ = program.to_string();
        let _ = parser.errors();
    }

    #[test]
    fn parse_never_panics_near_valid(input in near_valid_source()) {
        let (_, program) = parse(&input);
        let _ = program.to_string();

        let (_, statements) = parse_statements(&input);
        for stmt in &statements {
            let _ = stmt.to_string_indent(0);
        }
    }

    #[test]
    fn same_tier_operators_fold_left(
        (first, rest) in (
            identifier(),
            operator_tier().prop_flat_map(|tier| {
                prop::collection::vec((prop::sample::select(tier), identifier()), 1..6)
            }),
        )
    ) {
        let mut source = first.clone();
        let mut expected = first;
        for (op, operand) in &rest {
            source = format!("{} {} {}", source, op, operand);
            expected = format!("({} {} {})", expected, op, operand);
        }

        let (parser, expr) = parse_expression(&source);
        prop_assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        prop_assert_eq!(expr.map(|e| e.to_string()), Some(expected));
    }

    #[test]
    fn rendering_is_a_fixed_point(source in expression_source()) {
        let (parser, expr) = parse_expression(&source);
        prop_assert!(parser.errors().is_empty(), "{:?} for {:?}", parser.errors(), source);
        let Some(expr) = expr else {
            return Err(TestCaseError::fail("no expression"));
        };
        let first = expr.to_string();

        let (parser, reparsed) = parse_expression(&first);
        prop_assert!(parser.errors().is_empty(), "{:?} for {:?}", parser.errors(), first);
        prop_assert_eq!(reparsed.map(|e| e.to_string()), Some(first));
    }
}
