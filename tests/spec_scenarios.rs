//! End-to-end scenarios pinned by the core parsing contract: each test here
//! exercises one worked example — exact allocation order, exact spans, or
//! an exact accept/reject verdict.

use java_syntax::{
    parse, parse_java, parse_module_info, Attribute, JavaVersion, NodeKind, ParseFailureKind,
};

fn kinds(arena: &java_syntax::Arena) -> Vec<NodeKind> {
    (0..arena.len())
        .map(|i| arena.get(java_syntax::NodeId(i)).kind)
        .collect()
}

#[test]
fn empty_input_is_a_single_zero_width_compilation_unit() {
    let arena = parse_java("", JavaVersion::V17).expect("empty source parses");
    assert_eq!(arena.len(), 1);
    let root = arena.view(arena.root());
    assert_eq!(root.kind(), NodeKind::CompilationUnit);
    assert_eq!((root.start(), root.end()), (0, 0));
}

#[test]
fn minimal_class_spans_match_source_bytes() {
    let src = "class Test\n{\n}\n";
    assert_eq!(src.len(), 15);
    let arena = parse_java(src, JavaVersion::V17).expect("minimal class parses");

    let root = arena.view(arena.root());
    assert_eq!(root.kind(), NodeKind::CompilationUnit);
    assert_eq!((root.start(), root.end()), (0, 15));

    let children = root.children();
    assert_eq!(children.len(), 1);
    let class_decl = arena.view(children[0]);
    assert_eq!(class_decl.kind(), NodeKind::ClassDeclaration);
    assert_eq!((class_decl.start(), class_decl.end()), (0, 14));
    match class_decl.attribute() {
        Some(Attribute::TypeDeclaration { name, .. }) => assert_eq!(&**name, "Test"),
        other => panic!("expected a TypeDeclaration attribute, got {other:?}"),
    }
}

#[test]
fn integer_literal_in_method_body_has_exact_spans() {
    let src = "class Test\n{\n\tvoid m()\n\t{\n\t\tint x = 42;\n\t}\n}\n";
    assert_eq!(src.len(), 45);
    let arena = parse_java(src, JavaVersion::V17).expect("source parses");

    let root = arena.view(arena.root());
    assert_eq!((root.start(), root.end()), (0, 45));

    let class_decl = arena.view(root.children()[0]);
    assert_eq!(class_decl.kind(), NodeKind::ClassDeclaration);
    assert_eq!((class_decl.start(), class_decl.end()), (0, 44));
    match class_decl.attribute() {
        Some(Attribute::TypeDeclaration { name, .. }) => assert_eq!(&**name, "Test"),
        other => panic!("expected a TypeDeclaration attribute, got {other:?}"),
    }

    let method_decl = arena.view(
        class_decl
            .children()
            .into_iter()
            .find(|&id| arena.get(id).kind == NodeKind::MethodDeclaration)
            .expect("method_declaration present"),
    );
    assert_eq!((method_decl.start(), method_decl.end()), (14, 42));

    let block = arena.view(
        method_decl
            .children()
            .into_iter()
            .find(|&id| arena.get(id).kind == NodeKind::Block)
            .expect("block present"),
    );
    assert_eq!((block.start(), block.end()), (24, 42));

    // The integer literal `42` must appear somewhere in the arena with the
    // exact byte span of its occurrence in the source above.
    let int_lit = (0..arena.len())
        .map(java_syntax::NodeId)
        .find(|&id| arena.get(id).kind == NodeKind::IntegerLiteral)
        .expect("an integer_literal node exists");
    let view = arena.view(int_lit);
    assert_eq!((view.start(), view.end()), (36, 38));
    match view.attribute() {
        Some(Attribute::IntegerLiteral { value, .. }) => assert_eq!(*value, 42),
        other => panic!("expected an IntegerLiteral attribute, got {other:?}"),
    }
}

#[test]
fn additive_binds_looser_than_multiplicative() {
    let src = "class T { void m() { int x = 1 + 2 * 3; } }";
    let arena = parse_java(src, JavaVersion::V17).expect("source parses");

    let plus = (0..arena.len())
        .map(java_syntax::NodeId)
        .find(|&id| {
            matches!(
                arena.attribute(id),
                Some(Attribute::BinaryExpression {
                    op: java_syntax::BinaryOp::Add
                })
            )
        })
        .expect("a `+` binary_expression exists");

    let plus_view = arena.view(plus);
    let plus_children = plus_view.children();
    assert_eq!(plus_children.len(), 2, "`+` must have exactly two operand children");

    let lhs = arena.view(plus_children[0]);
    assert_eq!(lhs.kind(), NodeKind::IntegerLiteral);
    match lhs.attribute() {
        Some(Attribute::IntegerLiteral { value, .. }) => assert_eq!(*value, 1),
        other => panic!("expected IntegerLiteral(1), got {other:?}"),
    }

    let rhs = arena.view(plus_children[1]);
    assert_eq!(rhs.kind(), NodeKind::BinaryExpression);
    match rhs.attribute() {
        Some(Attribute::BinaryExpression {
            op: java_syntax::BinaryOp::Mul,
        }) => {}
        other => panic!("expected the `*` to nest under the `+`, got {other:?}"),
    }

    let mul_children = rhs.children();
    assert_eq!(mul_children.len(), 2);
    let two = arena.view(mul_children[0]);
    let three = arena.view(mul_children[1]);
    match (two.attribute(), three.attribute()) {
        (
            Some(Attribute::IntegerLiteral { value: 2, .. }),
            Some(Attribute::IntegerLiteral { value: 3, .. }),
        ) => {}
        other => panic!("expected (2, 3) operands under `*`, got {other:?}"),
    }
}

#[test]
fn contextual_keyword_with_parses_as_a_plain_method_name() {
    let src = "class Builder { public Builder with(String value) { return this; } }";
    let arena = parse_java(src, JavaVersion::V17).expect("`with` is a valid method name");

    let method = (0..arena.len())
        .map(java_syntax::NodeId)
        .find(|&id| arena.get(*id).kind == NodeKind::MethodDeclaration)
        .expect("method_declaration present");
    match arena.attribute(method) {
        Some(Attribute::MethodDeclaration { name, .. }) => assert_eq!(&**name, "with"),
        other => panic!("expected MethodDeclaration(name=\"with\"), got {other:?}"),
    }
}

#[test]
fn flexible_constructor_body_allows_statements_before_super_call() {
    let src = "class Child extends Base { \
                 public Child(int value) { \
                   if (value < 0) throw new IllegalArgumentException(); \
                   super(value); \
                 } \
               }";
    let arena = parse_java(src, JavaVersion::V22Plus)
        .expect("a statement prologue before super(...) must not be rejected once the feature is available");

    let ctor = (0..arena.len())
        .map(java_syntax::NodeId)
        .find(|&id| arena.get(*id).kind == NodeKind::ConstructorDeclaration)
        .expect("constructor_declaration present");
    let ctor_view = arena.view(ctor);
    let block = arena.view(
        ctor_view
            .children()
            .into_iter()
            .find(|&id| arena.get(id).kind == NodeKind::Block)
            .expect("constructor body block present"),
    );

    let stmts = block.children();
    assert_eq!(stmts.len(), 2, "expected the if-statement then the super(...) call");
    assert_eq!(arena.get(stmts[0]).kind, NodeKind::IfStatement);

    let expr_stmt = arena.view(stmts[1]);
    assert_eq!(expr_stmt.kind(), NodeKind::ExpressionStatement);
    let invocation = arena.view(
        expr_stmt
            .children()
            .into_iter()
            .next()
            .expect("expression_statement wraps the super(...) invocation"),
    );
    assert_eq!(invocation.kind(), NodeKind::MethodInvocation);
    match invocation.attribute() {
        Some(Attribute::MethodInvocation { name }) => assert_eq!(&**name, "super"),
        other => panic!("expected MethodInvocation(name=\"super\"), got {other:?}"),
    }
    let callee = arena.view(
        invocation
            .children()
            .into_iter()
            .next()
            .expect("the super(...) call has a super_expression callee child"),
    );
    assert_eq!(callee.kind(), NodeKind::SuperExpression);
}

#[test]
fn flexible_constructor_body_is_rejected_before_java_22() {
    let src = "class Child extends Base { \
                 public Child(int value) { \
                   if (value < 0) throw new IllegalArgumentException(); \
                   super(value); \
                 } \
               }";
    let err = parse_java(src, JavaVersion::V21)
        .expect_err("a statement before super(...) requires Java 22's flexible constructor bodies");
    assert!(matches!(
        err.kind,
        ParseFailureKind::FeatureNotAvailable {
            feature: "flexible constructor bodies",
            ..
        }
    ));
}

#[test]
fn constructor_with_super_call_as_first_statement_needs_no_version_gate() {
    let src = "class Child extends Base { \
                 public Child(int value) { super(value); } \
               }";
    assert!(parse_java(src, JavaVersion::V8).is_ok());
}

#[test]
fn module_declaration_with_transitive_requires() {
    let src = "module app\n{\n\trequires transitive java.sql;\n}\n";
    let arena = parse_module_info(src, JavaVersion::V17).expect("module-info parses");

    let root = arena.view(arena.root());
    let module_decl = arena.view(root.children()[0]);
    assert_eq!(module_decl.kind(), NodeKind::ModuleDeclaration);
    match module_decl.attribute() {
        Some(Attribute::Module { name, is_open }) => {
            assert_eq!(&**name, "app");
            assert!(!is_open);
        }
        other => panic!("expected Module(name=\"app\", is_open=false), got {other:?}"),
    }

    let requires = arena.view(
        module_decl
            .children()
            .into_iter()
            .find(|&id| arena.get(id).kind == NodeKind::RequiresDirective)
            .expect("requires_directive present"),
    );
    match requires.attribute() {
        Some(Attribute::RequiresDirective {
            module_name,
            is_transitive,
            is_static,
        }) => {
            assert_eq!(&**module_name, "java.sql");
            assert!(is_transitive);
            assert!(!is_static);
        }
        other => panic!("expected RequiresDirective, got {other:?}"),
    }
}

#[test]
fn parse_infers_module_info_from_leading_module_keyword() {
    let src = "module app { requires java.base; }";
    let arena = parse(src, JavaVersion::V17).expect("inferred module-info parses");
    let root = arena.view(arena.root());
    assert_eq!(root.children().len(), 1);
    assert_eq!(
        arena.get(root.children()[0]).kind,
        NodeKind::ModuleDeclaration
    );
}

#[test]
fn deeply_nested_parentheses_fail_deterministically_instead_of_overflowing_the_stack() {
    // `ParserConfig::default().max_parse_depth` is 200; a nesting far beyond
    // it (well past any surrounding class/method/block overhead the same
    // parse already spends on the way to the expression) must be rejected
    // with `DepthExceeded`, never a stack overflow or a hang.
    let deep_nesting = 2000;
    let too_deep = format!(
        "class T {{ void m() {{ int x = {}1{}; }} }}",
        "(".repeat(deep_nesting),
        ")".repeat(deep_nesting)
    );
    let err = parse_java(&too_deep, JavaVersion::V17)
        .expect_err("source nested far past MAX_PARSE_DEPTH must fail");
    assert!(
        matches!(err.kind, ParseFailureKind::DepthExceeded { .. }),
        "expected DepthExceeded, got {:?}",
        err.kind
    );
}

#[test]
fn modestly_nested_parentheses_still_parse() {
    let shallow = format!(
        "class T {{ void m() {{ int x = {}1{}; }} }}",
        "(".repeat(10),
        ")".repeat(10)
    );
    parse_java(&shallow, JavaVersion::V17).expect("ten levels of nesting is well under the limit");
}

#[test]
fn pattern_matching_instanceof_binds_a_type_pattern() {
    let src = "class T { void m(Object obj) { if (obj instanceof String s) { System.out.println(s); } } }";
    let arena = parse_java(src, JavaVersion::V21).expect("pattern instanceof parses under Java 21");

    let instanceof = (0..arena.len())
        .map(java_syntax::NodeId)
        .find(|&id| arena.get(*id).kind == NodeKind::InstanceofExpression)
        .expect("instanceof_expression present");
    let children = arena.view(instanceof).children();
    assert_eq!(children.len(), 2, "operand plus the type pattern");
    let pattern = arena.view(children[1]);
    assert_eq!(pattern.kind(), NodeKind::TypePattern);
    match pattern.attribute() {
        Some(Attribute::TypePattern { binding_name }) => assert_eq!(&**binding_name, "s"),
        other => panic!("expected TypePattern(binding_name=\"s\"), got {other:?}"),
    }
}

#[test]
fn pattern_matching_instanceof_is_rejected_before_java_16() {
    let src = "class T { void m(Object obj) { if (obj instanceof String s) {} } }";
    assert!(parse_java(src, JavaVersion::V11).is_err());
    assert!(parse_java(src, JavaVersion::V16).is_ok());
}

#[test]
fn parse_failure_reports_one_based_line_and_column() {
    let src = "class Test\n{\n  int x = ;\n}\n";
    let err = parse_java(src, JavaVersion::V17).expect_err("missing initializer must fail");
    let (line, column) = err.line_column(src);
    // The failure is on the third line (`  int x = ;`), past the two
    // leading spaces and the offending `;` at byte offset within that line.
    assert_eq!(line, 3);
    assert!(column >= 1);
}

#[test]
fn kinds_list_ends_with_compilation_unit_as_root() {
    let arena = parse_java("class A {} class B {}", JavaVersion::V17).unwrap();
    let all = kinds(&arena);
    assert_eq!(*all.last().unwrap(), NodeKind::CompilationUnit);
}

#[test]
fn try_statement_wraps_its_finally_body_in_a_finally_clause() {
    let src = "class T { void m() { try { f(); } finally { g(); } } }";
    let arena = parse_java(src, JavaVersion::V17).expect("try/finally parses");
    assert!(
        kinds(&arena).contains(&NodeKind::FinallyClause),
        "expected a FinallyClause node in {:?}",
        kinds(&arena)
    );
}

#[test]
fn try_statement_with_neither_catch_nor_finally_is_rejected() {
    let src = "class T { void m() { try { f(); } } }";
    assert!(parse_java(src, JavaVersion::V17).is_err());
}

#[test]
fn try_with_resources_needs_neither_catch_nor_finally() {
    let src = "class T { void m() { try (AutoCloseable r = open()) { f(); } } }";
    assert!(parse_java(src, JavaVersion::V17).is_ok());
}

#[test]
fn switch_expression_arrow_rules_allocate_switch_expression_arm() {
    let src = "class T { int m(int x) { return switch (x) { case 1 -> 1; default -> 0; }; } }";
    let arena = parse_java(src, JavaVersion::V17).expect("arrow-form switch expression parses");
    let arm_count = kinds(&arena)
        .iter()
        .filter(|k| **k == NodeKind::SwitchExpressionArm)
        .count();
    assert_eq!(arm_count, 2, "expected one SwitchExpressionArm per arrow rule");
}
