//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable and function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Classes, interfaces, enums, namespaces and typedefs
//! - Type annotations
//! - Error recovery

use crate::{
    ast::{
        ast::{Ast, Node},
        declarations::{AccessModifier, Decl, PropertyKind, StorageClass},
        expressions::Expr,
        printer::expr_to_string,
        statements::Stmt,
        types::{PointerKind, SmartPointerKind, TypeNode},
    },
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> (Ast, Diagnostics) {
    let tokens = tokenize(source.to_string(), Some("test.tspp".to_string())).unwrap();
    let mut diagnostics = Diagnostics::new();
    let ast = parse(tokens, &mut diagnostics);
    (ast, diagnostics)
}

fn parse_ok(source: &str) -> Ast {
    let (ast, diagnostics) = parse_source(source);
    assert!(
        !diagnostics.has_errors(),
        "unexpected diagnostics: {:?}",
        diagnostics.diagnostics()
    );
    ast
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message.clone())
        .collect()
}

/// Parses `source` as a single expression statement and prints it.
fn expr_of(source: &str) -> String {
    let ast = parse_ok(source);
    match &ast.nodes[0] {
        Node::Stmt(Stmt::Expression { expr, .. }) => expr_to_string(expr),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn first_decl(ast: &Ast) -> &Decl {
    ast.nodes[0].as_decl().expect("expected a declaration")
}

fn var_type(source: &str) -> TypeNode {
    let ast = parse_ok(source);
    match first_decl(&ast) {
        Decl::Var {
            type_annotation: Some(type_annotation),
            ..
        } => type_annotation.clone(),
        other => panic!("expected typed variable, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let ast = parse_ok("let x = 42;");

    assert_eq!(ast.len(), 1);
    match first_decl(&ast) {
        Decl::Var {
            name,
            is_const,
            initializer: Some(Expr::Literal { value, .. }),
            ..
        } => {
            assert_eq!(name, "x");
            assert!(!is_const);
            assert_eq!(value, "42");
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_const_declaration() {
    let ast = parse_ok("const PI: float = 3.14;");

    match first_decl(&ast) {
        Decl::Var {
            is_const,
            type_annotation,
            ..
        } => {
            assert!(is_const);
            assert_eq!(type_annotation.as_ref().unwrap().to_string(), "float");
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_const_without_initializer() {
    let (_, diagnostics) = parse_source("const x: int;");

    assert_eq!(
        messages(&diagnostics),
        vec!["Const declarations must have an initializer"]
    );
}

#[test]
fn test_parse_storage_class() {
    let ast = parse_ok("#heap let buffer: int[] = [1, 2];");

    match first_decl(&ast) {
        Decl::Var { storage_class, .. } => assert_eq!(*storage_class, Some(StorageClass::Heap)),
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_storage_class_requires_variable() {
    let (_, diagnostics) = parse_source("#static function f() {}");

    assert_eq!(
        messages(&diagnostics)[0],
        "Expected variable declaration after storage class"
    );
}

#[test]
fn test_precedence_multiplicative_over_additive() {
    assert_eq!(expr_of("1 + 2 * 3;"), "(+ 1 (* 2 3))");
    assert_eq!(expr_of("1 * 2 + 3;"), "(+ (* 1 2) 3)");
}

#[test]
fn test_precedence_full_ladder() {
    assert_eq!(expr_of("a || b && c;"), "(|| a (&& b c))");
    assert_eq!(expr_of("a | b ^ c & d;"), "(| a (^ b (& c d)))");
    assert_eq!(expr_of("a == b < c;"), "(== a (< b c))");
    assert_eq!(expr_of("a < b << c;"), "(< a (<< b c))");
    assert_eq!(expr_of("a << b + c;"), "(<< a (+ b c))");
    assert_eq!(expr_of("a && b == c;"), "(&& a (== b c))");
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(expr_of("a - b - c;"), "(- (- a b) c)");
    assert_eq!(expr_of("a / b * c;"), "(* (/ a b) c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(expr_of("a = b = c;"), "(= a (= b c))");
    assert_eq!(expr_of("a += 1 + 2;"), "(+= a (+ 1 2))");
    assert_eq!(expr_of("a %= b;"), "(%= a b)");
}

#[test]
fn test_conditional_expression() {
    assert_eq!(expr_of("a ? b : c;"), "(? a b c)");
    assert_eq!(expr_of("a ? b : c ? d : e;"), "(? a b (? c d e))");
    assert_eq!(expr_of("x = a || b ? 1 : 2;"), "(= x (? (|| a b) 1 2))");
}

#[test]
fn test_conditional_requires_colon() {
    let (_, diagnostics) = parse_source("a ? b;");

    assert_eq!(
        messages(&diagnostics),
        vec!["Expected ':' in conditional expression"]
    );
}

#[test]
fn test_prefix_and_postfix_operators() {
    assert_eq!(expr_of("-a * b;"), "(* (- a) b)");
    assert_eq!(expr_of("!a && b;"), "(&& (! a) b)");
    assert_eq!(expr_of("~a;"), "(~ a)");
    assert_eq!(expr_of("++i;"), "(++ i)");
    assert_eq!(expr_of("i--;"), "(i --)");
    assert_eq!(expr_of("-a++;"), "(- (a ++))");
    assert_eq!(expr_of("*p;"), "(* p)");
    assert_eq!(expr_of("@x;"), "(@ x)");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(expr_of("a.b.c;"), "(. (. a b) c)");
    assert_eq!(expr_of("a.b(1)[2];"), "(index (call (. a b) 1) 2)");
    assert_eq!(expr_of("p@x;"), "(@ p x)");
    assert_eq!(expr_of("-a.b;"), "(- (. a b))");
}

#[test]
fn test_pointer_expressions() {
    assert_eq!(expr_of("@#unsafe x;"), "(@#unsafe x)");
    assert_eq!(expr_of("@#aligned(16) x;"), "(@#aligned(16) x)");
}

#[test]
fn test_aligned_pointer_requires_value() {
    let (_, diagnostics) = parse_source("@#aligned() x;");

    assert_eq!(messages(&diagnostics), vec!["Expected alignment value"]);
}

#[test]
fn test_primary_forms() {
    assert_eq!(expr_of("(1 + 2) * 3;"), "(* (+ 1 2) 3)");
    assert_eq!(expr_of("[1, 2, 3];"), "[1, 2, 3]");
    assert_eq!(expr_of("\"hi\";"), "\"hi\"");
    assert_eq!(expr_of("null_value;"), "null_value");
    assert_eq!(expr_of("undefined;"), "undefined");
    assert_eq!(expr_of("true;"), "true");
    assert_eq!(expr_of("this;"), "this");
    assert_eq!(expr_of("new Point(1, 2);"), "(new Point 1 2)");
    assert_eq!(expr_of("cast<int> x;"), "(cast<int> x)");
    assert_eq!(expr_of("#sizeof(x);"), "(#sizeof x)");
    assert_eq!(expr_of("#typeof(a + b);"), "(#typeof (+ a b))");
    assert_eq!(expr_of("#sizeof(int);"), "(#sizeof int)");
    assert_eq!(expr_of("#alignof(float);"), "(#alignof float)");
}

#[test]
fn test_function_expression() {
    let text = expr_of("f = function(a: int): int { return a; };");
    assert_eq!(text, "(= f (function(a: int): int {1 statements}))");
}

#[test]
fn test_generic_call() {
    assert_eq!(expr_of("identity<int>(5);"), "(call identity<int> 5)");
    assert_eq!(expr_of("pair<int, string>(1, \"a\");"), "(call pair<int, string> 1 \"a\")");
}

#[test]
fn test_relational_is_not_generic_call() {
    assert_eq!(expr_of("a < b;"), "(< a b)");
    assert_eq!(expr_of("a < b && c > d;"), "(&& (< a b) (> c d))");
}

#[test]
fn test_template_specialization() {
    assert_eq!(expr_of("Box<int>.create;"), "(. Box<int> create)");
}

#[test]
fn test_missing_expression() {
    let (_, diagnostics) = parse_source("let x = ;");
    assert_eq!(messages(&diagnostics), vec!["Expected expression"]);
}

#[test]
fn test_expression_errors() {
    let cases = [
        ("(1 + 2;", "Expected ')' after expression"),
        ("a.;", "Expected property name after '.'"),
        ("a[1;", "Expected ']' after array index"),
        ("f(1;", "Expected ')' after function arguments"),
        ("new ;", "Expected class name after 'new'"),
        ("new A;", "Expected '(' after class name"),
        ("[1, 2;", "Expected ']' after array elements"),
        ("cast int x;", "Expected '<' after 'cast'"),
        ("cast<> x;", "Expected type name in cast"),
        ("cast<int x;", "Expected '>' after cast type"),
    ];

    for (source, expected) in cases {
        let (_, diagnostics) = parse_source(source);
        assert_eq!(
            messages(&diagnostics).first().map(String::as_str),
            Some(expected),
            "source: {}",
            source
        );
    }
}

#[test]
fn test_parse_function_declaration() {
    let ast = parse_ok("function add(a: int, b: int): int { return a + b; }");

    match first_decl(&ast) {
        Decl::Function {
            name,
            params,
            return_type,
            body: Some(body),
            ..
        } => {
            assert_eq!(name, "add");
            assert_eq!(params.len(), 2);
            assert_eq!(return_type.as_ref().unwrap().to_string(), "int");
            assert_eq!(body.body.len(), 1);
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_function_prototype_and_modifiers() {
    let ast = parse_ok("#inline #target(\"avx\") async function f(ref x: int, const y: float = 1.0);");

    match first_decl(&ast) {
        Decl::Function {
            modifiers,
            is_async,
            body,
            params,
            ..
        } => {
            assert_eq!(modifiers.len(), 2);
            assert_eq!(modifiers[0].name, "inline");
            assert_eq!(modifiers[1].name, "target");
            assert!(modifiers[1].argument.is_some());
            assert!(is_async);
            assert!(body.is_none());
            assert!(params[0].is_ref);
            assert!(params[1].is_const);
            assert!(params[1].default.is_some());
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_generic_function() {
    let ast = parse_ok(
        "function max<T extends comparable & Printable, U>(a: T, b: T): T where U: number throws Error { return a; }",
    );

    match first_decl(&ast) {
        Decl::Function {
            generic_params,
            where_clauses,
            throws,
            ..
        } => {
            assert_eq!(generic_params.len(), 2);
            assert_eq!(generic_params[0].name, "T");
            assert!(matches!(
                &generic_params[0].constraints[0],
                TypeNode::BuiltinConstraint { name, .. } if name == "comparable"
            ));
            assert!(matches!(
                &generic_params[0].constraints[1],
                TypeNode::Named { name, .. } if name == "Printable"
            ));
            assert!(generic_params[1].constraints.is_empty());
            assert_eq!(where_clauses.len(), 1);
            assert_eq!(where_clauses[0].param, "U");
            assert_eq!(throws.len(), 1);
        }
        other => panic!("unexpected node {:?}", other),
    }
    assert!(first_decl(&ast).is_generic());
}

#[test]
fn test_parameter_requires_type() {
    let (_, diagnostics) = parse_source("function f(a) {}");
    assert_eq!(messages(&diagnostics), vec!["Expected ':' after parameter name"]);
}

#[test]
fn test_function_requires_body() {
    let (_, diagnostics) = parse_source("function f() return 1;");
    assert_eq!(
        messages(&diagnostics)[0],
        "Expected '{' before function body"
    );
}

#[test]
fn test_parse_if_statement() {
    let ast = parse_ok("if (x > 0) { y = 1; } else y = 2;");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::If {
            condition,
            else_branch,
            ..
        }) => {
            assert_eq!(expr_to_string(condition), "(> x 0)");
            assert!(else_branch.is_some());
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_if_requires_parentheses() {
    let (_, diagnostics) = parse_source("if x > 0 { }");
    assert_eq!(messages(&diagnostics)[0], "Expected '(' after 'if'");
}

#[test]
fn test_parse_loops() {
    let ast = parse_ok(
        "while (i < 10) i++; do { i--; } while (i > 0); for (let i = 0; i < 3; i++) {} for (;;) break;",
    );

    assert!(matches!(ast.nodes[0], Node::Stmt(Stmt::While { .. })));
    assert!(matches!(ast.nodes[1], Node::Stmt(Stmt::DoWhile { .. })));
    match &ast.nodes[2] {
        Node::Stmt(Stmt::For {
            initializer: Some(initializer),
            condition: Some(_),
            increment: Some(_),
            ..
        }) => assert!(matches!(**initializer, Stmt::Declaration(_))),
        other => panic!("unexpected node {:?}", other),
    }
    match &ast.nodes[3] {
        Node::Stmt(Stmt::For {
            initializer: None,
            condition: None,
            increment: None,
            ..
        }) => {}
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parse_for_of() {
    let ast = parse_ok("for (const item: int of items) {} for (x of xs) {}");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::ForOf {
            is_const,
            identifier,
            declared_type,
            ..
        }) => {
            assert!(is_const);
            assert_eq!(identifier, "item");
            assert!(declared_type.is_some());
        }
        other => panic!("unexpected node {:?}", other),
    }
    assert!(matches!(ast.nodes[1], Node::Stmt(Stmt::ForOf { .. })));
}

#[test]
fn test_parse_try_catch_finally() {
    let ast = parse_ok("try { f(); } catch (e: Error) { } catch (other) { } finally { }");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::Try {
            catch_clauses,
            finally,
            ..
        }) => {
            assert_eq!(catch_clauses.len(), 2);
            assert!(catch_clauses[0].parameter_type.is_some());
            assert!(catch_clauses[1].parameter_type.is_none());
            assert!(finally.is_some());
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_try_requires_handler() {
    let (_, diagnostics) = parse_source("try { }");
    assert_eq!(
        messages(&diagnostics),
        vec!["Try statement must have at least one catch or finally clause"]
    );
}

#[test]
fn test_parse_switch() {
    let ast = parse_ok("switch (x) { case 1: f(); break; case 2: default: g(); }");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::Switch { cases, .. }) => {
            assert_eq!(cases.len(), 3);
            assert_eq!(cases[0].body.len(), 2);
            assert!(cases[1].body.is_empty());
            assert!(cases[2].is_default);
            assert!(cases[2].value.is_none());
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_switch_errors() {
    let (_, diagnostics) = parse_source("switch (x) { default: a(); default: b(); }");
    assert_eq!(
        messages(&diagnostics)[0],
        "Multiple default clauses in switch statement"
    );

    let (_, diagnostics) = parse_source("switch (x) { f(); }");
    assert_eq!(
        messages(&diagnostics)[0],
        "Expected 'case' or 'default' in switch statement"
    );
}

#[test]
fn test_parse_jumps_and_labels() {
    let ast = parse_ok("outer: while (true) { break outer; continue; } throw e; return;");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::Labeled { label, statement, .. }) => {
            assert_eq!(label, "outer");
            assert!(matches!(**statement, Stmt::While { .. }));
        }
        other => panic!("unexpected node {:?}", other),
    }
    assert!(matches!(ast.nodes[1], Node::Stmt(Stmt::Throw { .. })));
    assert!(matches!(ast.nodes[2], Node::Stmt(Stmt::Return { value: None, .. })));
}

#[test]
fn test_parse_assembly() {
    let ast = parse_ok("#asm(\"mov eax, 1\", \"=r\");");

    match &ast.nodes[0] {
        Node::Stmt(Stmt::Assembly {
            code, constraints, ..
        }) => {
            assert_eq!(code, "mov eax, 1");
            assert_eq!(constraints, &vec![String::from("=r")]);
        }
        other => panic!("unexpected node {:?}", other),
    }

    let (_, diagnostics) = parse_source("#asm(42);");
    assert_eq!(
        messages(&diagnostics)[0],
        "Expected string literal containing assembly code"
    );
}

#[test]
fn test_parse_class() {
    let ast = parse_ok(
        "#packed class Point<T> extends Base implements Printable, Comparable {
            private let x: int = 0;
            public const y: float = 1.0;
            constructor(x: int) { this.x = x; }
            public function length(): float { return 0.0; }
            #inline scale(factor: float) { }
            get size(): int { return 1; }
            set size(value: int) { }
            class Inner { }
        }",
    );

    match first_decl(&ast) {
        Decl::Class {
            name,
            modifiers,
            base_class,
            interfaces,
            members,
            generic_params,
            ..
        } => {
            assert_eq!(name, "Point");
            assert_eq!(modifiers[0].name, "packed");
            assert!(base_class.is_some());
            assert_eq!(interfaces.len(), 2);
            assert_eq!(generic_params.len(), 1);
            assert_eq!(members.len(), 8);

            assert!(matches!(
                &members[0],
                Decl::Field { access: AccessModifier::Private, is_const: false, .. }
            ));
            assert!(matches!(&members[1], Decl::Field { is_const: true, .. }));
            assert!(matches!(&members[2], Decl::Constructor { .. }));
            assert!(matches!(&members[3], Decl::Method { name, .. } if name == "length"));
            match &members[4] {
                Decl::Method { name, modifiers, .. } => {
                    assert_eq!(name, "scale");
                    assert_eq!(modifiers.len(), 1);
                }
                other => panic!("unexpected member {:?}", other),
            }
            assert!(matches!(
                &members[5],
                Decl::Property { kind: PropertyKind::Getter, .. }
            ));
            match &members[6] {
                Decl::Property {
                    kind: PropertyKind::Setter,
                    property_type,
                    parameter: Some(parameter),
                    ..
                } => {
                    assert_eq!(property_type.to_string(), "int");
                    assert_eq!(parameter.name, "value");
                }
                other => panic!("unexpected member {:?}", other),
            }
            assert!(matches!(&members[7], Decl::Class { name, .. } if name == "Inner"));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_class_member_recovery() {
    let (ast, diagnostics) = parse_source(
        "class A {
            let x: int = ;
            let y: int = 2;
        }",
    );

    assert_eq!(messages(&diagnostics), vec!["Expected expression"]);
    match first_decl(&ast) {
        Decl::Class { members, .. } => {
            assert_eq!(members.len(), 1);
            assert_eq!(members[0].name(), "y");
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_class_requires_closing_brace() {
    let (ast, diagnostics) = parse_source("class A { let x: int = 1;");

    assert!(ast.is_empty());
    assert_eq!(
        messages(&diagnostics),
        vec!["Expected '}' at end of class declaration"]
    );
}

#[test]
fn test_unknown_class_member() {
    let (_, diagnostics) = parse_source("class A { 42; }");

    assert_eq!(
        messages(&diagnostics)[0],
        "Expected class member declaration, found: 42"
    );
}

#[test]
fn test_getter_requires_type() {
    let (_, diagnostics) = parse_source("class A { get size() { return 1; } }");
    assert_eq!(messages(&diagnostics)[0], "Expected ':' after property name");
}

#[test]
fn test_parse_interface() {
    let ast = parse_ok(
        "#zerocast interface Shape<T> extends Base {
            area(scale: float): float;
            private draw(): void throws Error;
            get name: string;
            set name(value: string): string;
        }",
    );

    match first_decl(&ast) {
        Decl::Interface {
            name,
            is_zero_cast,
            extends,
            members,
            generic_params,
            ..
        } => {
            assert_eq!(name, "Shape");
            assert!(is_zero_cast);
            assert_eq!(extends.len(), 1);
            assert_eq!(generic_params.len(), 1);
            assert_eq!(members.len(), 4);
            assert!(matches!(&members[0], Decl::MethodSignature { name, .. } if name == "area"));
            assert!(matches!(
                &members[1],
                Decl::MethodSignature { access: AccessModifier::Private, throws, .. } if throws.len() == 1
            ));
            assert!(matches!(
                &members[2],
                Decl::PropertySignature { has_getter: true, has_setter: false, .. }
            ));
            assert!(matches!(
                &members[3],
                Decl::PropertySignature { has_getter: false, has_setter: true, .. }
            ));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_interface_errors() {
    let (_, diagnostics) = parse_source("interface I { area(): float }");
    assert_eq!(messages(&diagnostics)[0], "Expected ';' after method signature");

    let (_, diagnostics) = parse_source("interface I { 1; }");
    assert_eq!(
        messages(&diagnostics)[0],
        "Expected interface member (method or property)"
    );
}

#[test]
fn test_parse_enum() {
    let ast = parse_ok("enum Color: int { Red = 1, Green, Blue };");

    match first_decl(&ast) {
        Decl::Enum {
            name,
            underlying_type,
            members,
            ..
        } => {
            assert_eq!(name, "Color");
            assert!(underlying_type.is_some());
            assert_eq!(members.len(), 3);
            assert!(members[0].value.is_some());
            assert!(members[2].value.is_none());
        }
        other => panic!("unexpected node {:?}", other),
    }
    assert_eq!(ast.len(), 1);
}

#[test]
fn test_enum_member_separator() {
    let (_, diagnostics) = parse_source("enum E { A B }");
    assert_eq!(messages(&diagnostics)[0], "Expected ',' or ';' after enum member");
}

#[test]
fn test_parse_namespace_and_typedef() {
    let ast = parse_ok("namespace geo { class Point { } function origin(): int { return 0; } } typedef Id = int;");

    match first_decl(&ast) {
        Decl::Namespace {
            name, declarations, ..
        } => {
            assert_eq!(name, "geo");
            assert_eq!(declarations.len(), 2);
        }
        other => panic!("unexpected node {:?}", other),
    }
    assert!(matches!(
        ast.nodes[1].as_decl(),
        Some(Decl::Typedef { name, .. }) if name == "Id"
    ));
}

#[test]
fn test_typedef_errors() {
    let (_, diagnostics) = parse_source("typedef Id int;");
    assert_eq!(messages(&diagnostics)[0], "Expected '=' after type alias name");
}

#[test]
fn test_parse_type_annotations() {
    assert_eq!(var_type("let a: int[];").to_string(), "int[]");
    assert_eq!(var_type("let a: int[4];").to_string(), "int[_]");
    assert_eq!(var_type("let a: int@;").to_string(), "int@");
    assert_eq!(var_type("let a: int&;").to_string(), "int&");
    assert_eq!(var_type("let a: int | string;").to_string(), "int | string");
    assert_eq!(var_type("let a: geo.Point;").to_string(), "geo.Point");
    assert_eq!(
        var_type("let a: function(int, float): void;").to_string(),
        "function(int, float): void"
    );
    assert_eq!(var_type("let a: Map<string, int[]>;").to_string(), "Map<string, int[]>");
}

#[test]
fn test_parse_pointer_type_kinds() {
    match var_type("let a: int@#aligned(8);") {
        TypeNode::Pointer {
            kind, alignment, ..
        } => {
            assert_eq!(kind, PointerKind::Aligned);
            assert_eq!(alignment, Some(8));
        }
        other => panic!("unexpected type {:?}", other),
    }
    assert!(matches!(
        var_type("let a: int@#unsafe;"),
        TypeNode::Pointer { kind: PointerKind::Unsafe, .. }
    ));
    assert!(matches!(
        var_type("let a: int@safe;"),
        TypeNode::Pointer { kind: PointerKind::Safe, .. }
    ));
}

#[test]
fn test_parse_smart_pointer_and_nested_templates() {
    assert!(matches!(
        var_type("let a: #shared<Node>;"),
        TypeNode::SmartPointer { kind: SmartPointerKind::Shared, .. }
    ));
    assert_eq!(
        var_type("let a: List<List<int>>;").to_string(),
        "List<List<int>>"
    );
    assert_eq!(
        var_type("let a: #unique<Box<int>>;").to_string(),
        "#unique<Box<int>>"
    );
}

#[test]
fn test_missing_type() {
    let (_, diagnostics) = parse_source("let a: = 1;");
    assert_eq!(
        messages(&diagnostics),
        vec!["Expected type name or primitive type"]
    );
}

#[test]
fn test_error_isolation_between_statements() {
    let (ast, diagnostics) = parse_source("let x = 1; let = 2; let y = 3;");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(messages(&diagnostics), vec!["Expected variable name"]);
    assert_eq!(ast.len(), 2);
    assert_eq!(ast.nodes[1].as_decl().unwrap().name(), "y");
}

#[test]
fn test_block_recovery() {
    let (ast, diagnostics) = parse_source("function f() { let a = ; let b = 2; return b; }");

    assert_eq!(messages(&diagnostics), vec!["Expected expression"]);
    match first_decl(&ast) {
        Decl::Function {
            body: Some(body), ..
        } => assert_eq!(body.body.len(), 2),
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_unclosed_block() {
    let (ast, diagnostics) = parse_source("{ let x = 1;");

    assert!(ast.is_empty());
    assert_eq!(messages(&diagnostics), vec!["Expected '}' after block"]);
}

#[test]
fn test_missing_semicolon() {
    let (_, diagnostics) = parse_source("f()");
    assert_eq!(messages(&diagnostics), vec!["Expected ';' after expression"]);
}

#[test]
fn test_empty_source() {
    let (ast, diagnostics) = parse_source("");
    assert!(ast.is_empty());
    assert!(diagnostics.is_empty());
}
