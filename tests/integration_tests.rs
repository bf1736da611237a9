//! Integration tests for the whole front end.
//!
//! These run source text through tokenization, parsing and type checking
//! using only the public API of the crate.

use tspp_frontend::{
    ast::{
        ast::{Ast, Node},
        declarations::Decl,
        expressions::{Expr, LiteralKind},
        printer::expr_to_string,
        statements::Stmt,
        types::{PrimitiveKind, TypeNode},
    },
    check_source,
    errors::diagnostics::Diagnostics,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    type_checker::{resolved_type::ResolvedType, scope::ScopeTable, type_checker::type_check},
    CheckOutput, SourceLocation,
};

fn run(source: &str) -> CheckOutput {
    check_source(source, "test.tspp").unwrap()
}

fn parse_only(source: &str) -> (Ast, Diagnostics) {
    let tokens = tokenize(source.to_string(), Some("test.tspp".to_string())).unwrap();
    let mut diagnostics = Diagnostics::new();
    let ast = parse(tokens, &mut diagnostics);
    (ast, diagnostics)
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message.clone())
        .collect()
}

fn single_expr(source: &str) -> Expr {
    let (ast, diagnostics) = parse_only(source);
    assert!(diagnostics.is_empty());
    match ast.nodes.into_iter().next() {
        Some(Node::Stmt(Stmt::Expression { expr, .. })) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn is_call_to(stmt: &Stmt, name: &str) -> bool {
    match stmt {
        Stmt::Block(block) => match block.body.as_slice() {
            [Stmt::Expression {
                expr: Expr::Call { callee, args, .. },
                ..
            }] => args.is_empty() && matches!(callee.as_ref(), Expr::Identifier { name: n, .. } if n == name),
            _ => false,
        },
        _ => false,
    }
}

#[test]
fn test_let_with_inferred_type() {
    let source = "let a = 42;";
    let output = run(source);
    assert!(output.is_success());

    match output.ast.nodes[0].as_decl() {
        Some(Decl::Var {
            name,
            type_annotation: None,
            initializer: Some(Expr::Literal { kind, value, .. }),
            is_const: false,
            ..
        }) => {
            assert_eq!(name, "a");
            assert_eq!(*kind, LiteralKind::Number);
            assert_eq!(value, "42");
        }
        other => panic!("unexpected node {:?}", other),
    }

    let mut diagnostics = Diagnostics::new();
    let checker = type_check(&output.ast, &mut diagnostics);
    assert_eq!(checker.lookup_variable("a"), Some(&ResolvedType::Int));
}

#[test]
fn test_typed_const() {
    let output = run("const b: int = 10;");
    assert!(output.diagnostics.is_empty());

    match output.ast.nodes[0].as_decl() {
        Some(Decl::Var {
            name,
            type_annotation: Some(TypeNode::Primitive { kind, .. }),
            initializer: Some(Expr::Literal { value, .. }),
            is_const: true,
            ..
        }) => {
            assert_eq!(name, "b");
            assert_eq!(*kind, PrimitiveKind::Int);
            assert_eq!(value, "10");
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_if_else_shape() {
    let (ast, diagnostics) = parse_only("if (x > 10) { y(); } else { z(); }");
    assert!(diagnostics.is_empty());

    match &ast.nodes[0] {
        Node::Stmt(Stmt::If {
            condition,
            then_branch,
            else_branch: Some(else_branch),
            ..
        }) => {
            match condition {
                Expr::Binary { op, left, right, .. } => {
                    assert_eq!(*op, TokenKind::Greater);
                    assert!(matches!(left.as_ref(), Expr::Identifier { name, .. } if name == "x"));
                    assert!(matches!(right.as_ref(), Expr::Literal { value, .. } if value == "10"));
                }
                other => panic!("unexpected condition {:?}", other),
            }
            assert!(is_call_to(then_branch, "y"));
            assert!(is_call_to(else_branch, "z"));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_return_type_mismatch() {
    let output = run("function f(): int { return 1.5; }");
    let diagnostics = output.diagnostics.diagnostics();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert_eq!(diagnostics[0].code.as_deref(), Some("ReturnTypeMismatch"));
    assert_eq!(diagnostics[0].location.line, 1);
    assert_eq!(diagnostics[0].location.column, 21);
}

#[test]
fn test_unmatched_brace() {
    let output = run("function f() { let a = 1;");
    let found = messages(&output.diagnostics);

    assert_eq!(found.len(), 1);
    assert!(found[0].starts_with("Expected '}'"), "got {:?}", found);
}

#[test]
fn test_recovers_at_next_declaration() {
    let output = run("let = 1;\nfunction g(): int { return 1; }");

    assert_eq!(output.diagnostics.error_count(), 1);
    assert_eq!(output.ast.len(), 1);
    assert_eq!(output.ast.nodes[0].as_decl().map(|decl| decl.name()), Some("g"));
}

#[test]
fn test_precedence() {
    assert_eq!(expr_to_string(&single_expr("1 + 2 * 3;")), "(+ 1 (* 2 3))");
    assert_eq!(expr_to_string(&single_expr("(1 + 2) * 3;")), "(* (+ 1 2) 3)");
}

#[test]
fn test_declaration_inside_block() {
    let (ast, diagnostics) = parse_only("{ let x = 1; }");
    assert!(diagnostics.is_empty());

    match &ast.nodes[0] {
        Node::Stmt(Stmt::Block(block)) => match block.body.as_slice() {
            [Stmt::Declaration(declaration)] => {
                assert!(matches!(declaration.declaration.as_ref(), Decl::Var { name, .. } if name == "x"));
            }
            other => panic!("unexpected block body {:?}", other),
        },
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_error_isolation() {
    let output = run("let ; let y = 2;");

    assert_eq!(output.diagnostics.error_count(), 1);
    assert!(output
        .ast
        .nodes
        .iter()
        .any(|node| node.as_decl().map(|decl| decl.name()) == Some("y")));
}

#[test]
fn test_assignability() {
    let union = ResolvedType::union(ResolvedType::Int, ResolvedType::String);

    assert!(ResolvedType::Int.is_assignable_to(&ResolvedType::Float));
    assert!(!ResolvedType::Float.is_assignable_to(&ResolvedType::Int));
    assert!(ResolvedType::Int.is_assignable_to(&union));
    assert!(!ResolvedType::Bool.is_assignable_to(&union));
}

#[test]
fn test_scope_shadowing() {
    let location = SourceLocation::null();
    let mut scopes = ScopeTable::new();

    scopes.declare_variable("x", ResolvedType::String, &location).unwrap();
    scopes.push();
    scopes.declare_variable("x", ResolvedType::Int, &location).unwrap();
    scopes.declare_variable("inner", ResolvedType::Bool, &location).unwrap();
    assert_eq!(scopes.lookup_variable("x"), Some(&ResolvedType::Int));
    scopes.pop();

    assert_eq!(scopes.lookup_variable("x"), Some(&ResolvedType::String));
    assert_eq!(scopes.lookup_variable("inner"), None);
}

#[test]
fn test_break_legality() {
    let outside = run("break;");
    assert_eq!(outside.diagnostics.error_count(), 1);

    let inside = run("while (true) { break; }");
    assert!(inside.is_success());
}

#[test]
fn test_program_checks_clean() {
    let output = run(
        "class Point {
            let x: int = 0;
            let y: int = 0;
            constructor(x: int, y: int) { this.x = x; this.y = y; }
            public function length(): float { return this.x * this.x + this.y * this.y; }
        }

        function sum(values: int[]): int {
            let total = 0;
            for (const v of values) { total += v; }
            return total;
        }

        let p = new Point(1, 2);
        let n: float = p.length();
        let s = sum([1, 2, 3]);",
    );

    assert!(output.is_success(), "{:?}", messages(&output.diagnostics));
}
