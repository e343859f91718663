//! Property-based tests for the universal invariants the core parsing
//! contract pins down: span containment, post-order allocation, arena
//! equality, and deterministic rejection of pathologically deep input.

use proptest::prelude::*;

use java_syntax::{parse_java, JavaVersion, NodeId, ParseFailureKind};

/// Every child's span must be nested inside its parent's, and allocation
/// order must equal post-order traversal (a parent's index is always
/// greater than every one of its children's).
fn assert_span_and_order_invariants(arena: &java_syntax::Arena) {
    for i in 0..arena.len() {
        let id = NodeId(i);
        let record = arena.get(id);
        assert!(
            record.start <= record.end,
            "node {i} has start {} > end {}",
            record.start,
            record.end
        );
        for child in arena.children(id) {
            assert!(
                child.index() < id.index(),
                "child {} allocated after parent {i}; allocation order must be post-order",
                child.index()
            );
            let c = arena.get(child);
            assert!(
                c.start >= record.start && c.end <= record.end,
                "child span ({}, {}) escapes parent span ({}, {})",
                c.start,
                c.end,
                record.start,
                record.end
            );
        }
    }
}

const SAMPLE_SOURCES: &[&str] = &[
    "class A {}",
    "class A { int x; }",
    "class A { void m() { int x = 1 + 2 * 3 - 4 / 5; } }",
    "class A { void m() { if (true) { x++; } else { y--; } } }",
    "interface I { void m(); }",
    "enum Color { RED, GREEN, BLUE }",
    "record Point(int x, int y) {}",
    "class A<T extends Comparable<T>> { T value; }",
    "class A { void m() { for (int i = 0; i < 10; i++) {} } }",
    "class A { void m() { try { f(); } catch (Exception e) { } finally { } } }",
    "class A { void m() { switch (x) { case 1 -> System.out.println(1); default -> {} } } }",
    "class A { void m() { Runnable r = () -> System.out.println(\"hi\"); } }",
    "class A { void m() { var x = 5; x = x + 1; } }",
    "class A { void m(Object o) { if (o instanceof String s) { System.out.println(s); } } }",
    "package com.example; import java.util.List; class A { List<String> xs; }",
];

#[test]
fn sample_sources_satisfy_span_and_order_invariants() {
    for src in SAMPLE_SOURCES {
        let arena = parse_java(src, JavaVersion::V21)
            .unwrap_or_else(|e| panic!("sample `{src}` failed to parse: {e}"));
        assert_span_and_order_invariants(&arena);

        let root = arena.view(arena.root());
        assert_eq!(
            (root.start(), root.end()),
            (0, src.len() as u32),
            "root span must cover the whole source for `{src}`"
        );
    }
}

#[test]
fn repeated_parses_of_the_same_source_are_value_equal() {
    for src in SAMPLE_SOURCES {
        let a = parse_java(src, JavaVersion::V21).unwrap();
        let b = parse_java(src, JavaVersion::V21).unwrap();
        assert!(a.equals(&b), "two parses of `{src}` must produce equal arenas");
        assert_eq!(a, b);
    }
}

#[test]
fn arena_equality_is_reflexive_and_distinguishes_different_sources() {
    let a = parse_java("class A {}", JavaVersion::V21).unwrap();
    let b = parse_java("class B {}", JavaVersion::V21).unwrap();
    assert!(a.equals(&a));
    assert!(!a.equals(&b), "differently-named classes must not compare equal");
}

proptest! {
    /// For every `n` of nested nullary-parenthesized integer literal beyond a
    /// generous cap, parsing must reject deterministically with
    /// `DepthExceeded` rather than hang or overflow the stack.
    #[test]
    fn excessive_paren_nesting_always_rejects_deterministically(n in 300usize..600) {
        let src = format!(
            "class T {{ void m() {{ int x = {}1{}; }} }}",
            "(".repeat(n),
            ")".repeat(n)
        );
        let result = parse_java(&src, JavaVersion::V17);
        prop_assert!(result.is_err());
        let err = result.unwrap_err();
        prop_assert!(matches!(err.kind, ParseFailureKind::DepthExceeded { .. }));
    }

    /// Binary-expression chains of `+` over small integer literals always
    /// parse, and the root's span always covers the whole source.
    #[test]
    fn left_associative_additive_chains_always_parse(n in 1usize..20) {
        let chain: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let expr = chain.join(" + ");
        let src = format!("class T {{ void m() {{ int x = {expr}; }} }}");
        let arena = parse_java(&src, JavaVersion::V17);
        prop_assert!(arena.is_ok());
        let arena = arena.unwrap();
        let root = arena.view(arena.root());
        prop_assert_eq!(root.end(), src.len() as u32);
    }
}
