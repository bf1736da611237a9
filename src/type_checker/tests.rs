//! Unit tests for the type checker module.
//!
//! Covers the resolved type algebra, the scope table and the checking
//! rules for declarations, statements and expressions.

use std::collections::HashMap;

use crate::{
    ast::{ast::Ast, types::SmartPointerKind},
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse,
    SourceLocation,
};

use super::{
    resolved_type::ResolvedType,
    scope::ScopeTable,
    type_checker::type_check,
};

fn parse_source(source: &str) -> Ast {
    let tokens = tokenize(source.to_string(), Some("test.tspp".to_string())).unwrap();
    let mut diagnostics = Diagnostics::new();
    let ast = parse(tokens, &mut diagnostics);
    assert!(
        !diagnostics.has_errors(),
        "unexpected parse errors: {:?}",
        diagnostics.diagnostics()
    );
    ast
}

fn check(source: &str) -> Diagnostics {
    let ast = parse_source(source);
    let mut diagnostics = Diagnostics::new();
    type_check(&ast, &mut diagnostics);
    diagnostics
}

fn errors(source: &str) -> Vec<String> {
    check(source)
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.is_error())
        .map(|diagnostic| diagnostic.message.clone())
        .collect()
}

fn assert_clean(source: &str) {
    let found = errors(source);
    assert!(found.is_empty(), "unexpected errors: {:?}", found);
}

fn global_type(source: &str, name: &str) -> Option<ResolvedType> {
    let ast = parse_source(source);
    let mut diagnostics = Diagnostics::new();
    let checker = type_check(&ast, &mut diagnostics);
    checker.lookup_variable(name).cloned()
}

fn array(element: ResolvedType) -> ResolvedType {
    ResolvedType::Array(Box::new(element))
}

fn smart(pointee: ResolvedType, kind: SmartPointerKind) -> ResolvedType {
    ResolvedType::Smart {
        pointee: Box::new(pointee),
        kind,
    }
}

#[test]
fn test_assignability() {
    let int_or_string = ResolvedType::union(ResolvedType::Int, ResolvedType::String);

    assert!(ResolvedType::Int.is_assignable_to(&ResolvedType::Float));
    assert!(!ResolvedType::Float.is_assignable_to(&ResolvedType::Int));
    assert!(ResolvedType::Int.is_assignable_to(&int_or_string));
    assert!(!ResolvedType::Bool.is_assignable_to(&int_or_string));

    assert!(ResolvedType::Error.is_assignable_to(&ResolvedType::Int));
    assert!(ResolvedType::String.is_assignable_to(&ResolvedType::Error));
    assert!(array(ResolvedType::Int).is_assignable_to(&array(ResolvedType::Float)));
    assert!(!array(ResolvedType::Float).is_assignable_to(&array(ResolvedType::Int)));
}

#[test]
fn test_smart_pointer_assignability() {
    let shared = smart(ResolvedType::Int, SmartPointerKind::Shared);
    let weak = smart(ResolvedType::Int, SmartPointerKind::Weak);
    let unique = smart(ResolvedType::Int, SmartPointerKind::Unique);

    assert!(shared.is_assignable_to(&weak));
    assert!(!weak.is_assignable_to(&shared));
    assert!(!unique.is_assignable_to(&shared));
    assert!(unique.is_assignable_to(&smart(ResolvedType::Int, SmartPointerKind::Unique)));
}

#[test]
fn test_function_assignability() {
    let takes_float = ResolvedType::function(ResolvedType::Int, vec![ResolvedType::Float]);
    let takes_int = ResolvedType::function(ResolvedType::Int, vec![ResolvedType::Int]);
    let returns_float = ResolvedType::function(ResolvedType::Float, vec![ResolvedType::Float]);

    // Parameters are contravariant, return types covariant.
    assert!(takes_float.is_assignable_to(&takes_int));
    assert!(!takes_int.is_assignable_to(&takes_float));
    assert!(takes_float.is_assignable_to(&returns_float));
    assert!(!returns_float.is_assignable_to(&takes_float));

    let no_params = ResolvedType::function(ResolvedType::Int, vec![]);
    assert!(!no_params.is_assignable_to(&takes_int));
}

#[test]
fn test_conversions() {
    let pointer = ResolvedType::pointer(ResolvedType::Int, false);

    assert!(ResolvedType::Int.is_implicitly_convertible_to(&ResolvedType::Bool));
    assert!(pointer.is_implicitly_convertible_to(&ResolvedType::Bool));
    assert!(!ResolvedType::String.is_implicitly_convertible_to(&ResolvedType::Bool));
    assert!(!ResolvedType::Float.is_implicitly_convertible_to(&ResolvedType::Int));

    assert!(ResolvedType::Float.is_explicitly_convertible_to(&ResolvedType::Int));
    assert!(ResolvedType::Bool.is_explicitly_convertible_to(&ResolvedType::String));
    assert!(pointer.is_explicitly_convertible_to(&ResolvedType::Int));
    assert!(ResolvedType::Int.is_explicitly_convertible_to(&pointer));
    assert!(!ResolvedType::String.is_explicitly_convertible_to(&ResolvedType::Int));
    assert!(ResolvedType::union(ResolvedType::String, ResolvedType::Float)
        .is_explicitly_convertible_to(&ResolvedType::Int));
}

#[test]
fn test_equality_and_display() {
    assert_eq!(
        ResolvedType::union(ResolvedType::Int, ResolvedType::String),
        ResolvedType::union(ResolvedType::String, ResolvedType::Int)
    );
    assert_ne!(
        ResolvedType::pointer(ResolvedType::Int, true),
        ResolvedType::pointer(ResolvedType::Int, false)
    );

    let function = ResolvedType::function(
        ResolvedType::Bool,
        vec![ResolvedType::Int, array(ResolvedType::Float)],
    );
    assert_eq!(function.to_string(), "function(int, float[]): bool");
    assert_eq!(ResolvedType::pointer(ResolvedType::Int, true).to_string(), "int@unsafe");
    assert_eq!(ResolvedType::Reference(Box::new(ResolvedType::Int)).to_string(), "int&");
    assert_eq!(
        smart(ResolvedType::Named(String::from("Node")), SmartPointerKind::Shared).to_string(),
        "#shared<Node>"
    );
    assert_eq!(
        ResolvedType::Template {
            name: String::from("Map"),
            args: vec![ResolvedType::String, ResolvedType::Int],
        }
        .to_string(),
        "Map<string, int>"
    );
    assert_eq!(ResolvedType::Error.to_string(), "error_type");
}

#[test]
fn test_substitute() {
    let mut bindings = HashMap::new();
    bindings.insert(String::from("T"), ResolvedType::Int);

    let generic = ResolvedType::function(
        ResolvedType::Named(String::from("T")),
        vec![array(ResolvedType::Named(String::from("T"))), ResolvedType::String],
    );
    assert_eq!(
        generic.substitute(&bindings),
        ResolvedType::function(ResolvedType::Int, vec![array(ResolvedType::Int), ResolvedType::String])
    );
}

#[test]
fn test_scope_shadowing() {
    let location = SourceLocation::null();
    let mut scopes = ScopeTable::new();

    scopes.declare_variable("x", ResolvedType::Int, &location).unwrap();
    scopes.push();
    scopes.declare_variable("x", ResolvedType::String, &location).unwrap();
    scopes.declare_variable("y", ResolvedType::Bool, &location).unwrap();
    assert_eq!(scopes.lookup_variable("x"), Some(&ResolvedType::String));

    scopes.pop();
    assert_eq!(scopes.lookup_variable("x"), Some(&ResolvedType::Int));
    assert_eq!(scopes.lookup_variable("y"), None);

    // The global frame survives an unbalanced pop.
    scopes.pop();
    assert_eq!(scopes.depth(), 1);
    assert_eq!(scopes.lookup_variable("x"), Some(&ResolvedType::Int));
}

#[test]
fn test_scope_namespaces_are_separate() {
    let location = SourceLocation::null();
    let mut scopes = ScopeTable::new();

    scopes.declare_type("Point", ResolvedType::Named(String::from("Point")));
    scopes.declare_variable("Point", ResolvedType::Int, &location).unwrap();
    assert_eq!(scopes.lookup_type("Point"), Some(&ResolvedType::Named(String::from("Point"))));
    assert_eq!(scopes.lookup_function("Point"), None);

    let err = scopes
        .declare_variable("Point", ResolvedType::Float, &location)
        .unwrap_err();
    assert_eq!(err.message(), "Variable 'Point' is already declared in this scope");
}

#[test]
fn test_variable_inference() {
    assert_eq!(global_type("let a = 42;", "a"), Some(ResolvedType::Int));
    assert_eq!(global_type("let a = 4.2;", "a"), Some(ResolvedType::Float));
    assert_eq!(global_type("let a = \"s\" + 1;", "a"), Some(ResolvedType::String));
    assert_eq!(global_type("let a = 1 + 2.0;", "a"), Some(ResolvedType::Float));
    assert_eq!(global_type("let a = 1 < 2;", "a"), Some(ResolvedType::Bool));
    assert_eq!(global_type("let a = [1, 2];", "a"), Some(array(ResolvedType::Int)));
    assert_eq!(global_type("let a = true ? 1 : 2.5;", "a"), Some(ResolvedType::Float));
    assert_eq!(global_type("let x = 1; let a = @x;", "a"), Some(ResolvedType::pointer(ResolvedType::Int, false)));
    assert_eq!(global_type("let a = #sizeof(1);", "a"), Some(ResolvedType::Int));
    assert_eq!(
        global_type("let a = @missing;", "a"),
        Some(ResolvedType::pointer(ResolvedType::Error, false))
    );
    assert_eq!(
        global_type("let p: #shared<int>; let a = *p;", "a"),
        Some(ResolvedType::Int)
    );
    assert_eq!(global_type("let a = #sizeof(int);", "a"), Some(ResolvedType::Int));
    assert_eq!(global_type("let a = #alignof(float);", "a"), Some(ResolvedType::Int));
    assert_eq!(global_type("let a = #typeof(boolean);", "a"), Some(ResolvedType::String));
    assert_eq!(global_type("const b: int = 10;", "b"), Some(ResolvedType::Int));
}

#[test]
fn test_variable_declaration_errors() {
    assert_eq!(
        errors("let x: int = \"s\";"),
        vec!["Initializer type doesn't match variable type"]
    );
    assert_eq!(
        errors("let x;"),
        vec!["Variable declaration needs either a type or an initializer for type inference"]
    );
    assert_eq!(
        errors("let a = 1; let a = 2;"),
        vec!["Variable 'a' is already declared in this scope"]
    );
    assert_eq!(errors("let a: Foo;"), vec!["Undefined type: Foo"]);
    assert_clean("let a: float = 1;");
}

#[test]
fn test_return_type_mismatch() {
    let diagnostics = check("function f(): int { return 1.5; }");

    assert_eq!(diagnostics.error_count(), 1);
    let diagnostic = &diagnostics.diagnostics()[0];
    assert_eq!(
        diagnostic.message,
        "Return value type doesn't match function return type"
    );
    assert_eq!(diagnostic.location.line, 1);
    assert_eq!(diagnostic.location.column, 21);
}

#[test]
fn test_return_rules() {
    assert_eq!(errors("return 1;"), vec!["Return statement outside of a function"]);
    assert_clean("function f() { return; }");
    assert_eq!(
        errors("function f(): int { return; }"),
        vec!["Return value type doesn't match function return type"]
    );
}

#[test]
fn test_loop_context() {
    assert_eq!(
        errors("break;"),
        vec!["Break statement must be inside a loop or switch"]
    );
    assert_clean("while (true) { break; }");
    assert_clean("let v = 1; switch (v) { case 1: break; }");
    assert_eq!(
        errors("let v = 1; switch (v) { case 1: continue; }"),
        vec!["Continue statement must be inside a loop"]
    );
    assert_clean("for (let i = 0; i < 3; i++) { if (i > 1) { continue; } }");
    assert_eq!(
        errors("while (true) { function f() { break; } }"),
        vec!["Break statement must be inside a loop or switch"]
    );
}

#[test]
fn test_conditions() {
    assert_eq!(
        errors("if (\"s\") { }"),
        vec!["If condition must be convertible to boolean"]
    );
    assert_eq!(
        errors("while (\"s\") { }"),
        vec!["While condition must be convertible to boolean"]
    );
    assert_eq!(
        errors("do { } while (\"s\");"),
        vec!["Do-while condition must be convertible to boolean"]
    );
    assert_clean("let n = 1; if (n) { } while (n > 0) { n--; }");
}

#[test]
fn test_for_of() {
    assert_clean("let xs = [1, 2]; for (const x of xs) { let y: int = x; }");

    let diagnostics = check("let n = 1; for (const x of n) { }");
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.diagnostics()[0].message, "For-of requires an iterable type");
}

#[test]
fn test_block_scope_is_popped() {
    assert_eq!(
        errors("{ let inner = 1; } inner;"),
        vec!["Undefined identifier: inner"]
    );
    assert_clean("let x = 1; { let x = \"s\"; } let y: int = x;");
}

#[test]
fn test_operator_errors() {
    assert_eq!(
        errors("let b = true - 1;"),
        vec!["Invalid operands for arithmetic operator"]
    );
    assert_eq!(
        errors("let b = 1 == \"s\";"),
        vec!["Cannot compare incompatible types"]
    );
    assert_eq!(
        errors("let b = 1.5 & 1;"),
        vec!["Bitwise operators require integer operands"]
    );
    assert_eq!(errors("let b = ~1.5;"), vec!["Bitwise NOT requires integer operand"]);
    assert_eq!(errors("let b = -\"s\";"), vec!["Unary +/- requires numeric operand"]);
    assert_eq!(errors("let b = *1;"), vec!["Dereference requires pointer operand"]);
    // An undefined operand is reported once, not again by the operator.
    assert_eq!(errors("let b = missing + 1;"), vec!["Undefined identifier: missing"]);
}

#[test]
fn test_assignment_errors() {
    assert_eq!(errors("let i = 1; i = \"s\";"), vec!["Cannot assign string to int"]);
    assert_eq!(
        errors("let i = 1; i += 1.5;"),
        vec!["Result of compound assignment is not assignable to target"]
    );
    assert_clean("let f = 1.5; f += 1;");
}

#[test]
fn test_calls() {
    let add = "function add(a: int, b: int): int { return a + b; }";

    assert_clean(&format!("{} let r: int = add(1, 2);", add));
    assert_eq!(
        errors(&format!("{} add(1);", add)),
        vec!["Wrong number of arguments: expected 2, received 1"]
    );
    assert_eq!(errors(&format!("{} add(1, \"s\");", add)), vec!["Argument type mismatch"]);
    assert_eq!(errors("let n = 1; n();"), vec!["Cannot call non-function type"]);
    assert_clean("function a(): int { return b(); } function b(): int { return 1; }");
}

#[test]
fn test_parameters() {
    assert_eq!(
        errors("function f(a: int = \"s\") { }"),
        vec!["Parameter default value type mismatch"]
    );
    assert_clean("function inc(ref x: int) { x = x + 1; } let v = 1; inc(v);");
    // Signatures are hoisted quietly, so a bad parameter type is reported once.
    assert_eq!(errors("function f(x: Foo) { }"), vec!["Undefined type: Foo"]);
}

#[test]
fn test_generic_calls() {
    let id = "function id<T>(x: T): T { return x; }";

    assert_clean(&format!("{} let a: int = id<int>(5); let b: string = id(\"s\");", id));
    assert_eq!(
        errors(&format!("{} let c: int = id(\"s\");", id)),
        vec!["Initializer type doesn't match variable type"]
    );
    assert_eq!(
        errors(&format!("{} id<int>(\"s\");", id)),
        vec!["Argument type mismatch"]
    );
}

#[test]
fn test_nested_generic_calls() {
    assert_clean(
        "function outer(): void {
            function id<T>(x: T): T { return x; }
            let r: int = id<int>(5);
            let s: string = id(\"s\");
        }",
    );
    assert_eq!(
        errors(
            "function outer(): void {
                function id<T>(x: T): T { return x; }
                id<int>(\"s\");
            }"
        ),
        vec!["Argument type mismatch"]
    );
}

#[test]
fn test_namespaced_generic_calls() {
    let util = "namespace util {
        function id<T>(x: T): T { return x; }
        let inner: int = id<int>(5);
        let short: string = id(\"s\");
    }";

    assert_clean(&format!("{} let r: int = util.id(5);", util));
    assert_eq!(
        errors(&format!("{} let r: string = util.id(5);", util)),
        vec!["Initializer type doesn't match variable type"]
    );
}

#[test]
fn test_inner_function_hides_generic() {
    assert_eq!(
        errors(
            "function id<T>(x: T): T { return x; }
            function outer(): void {
                function id(x: int): int { return x; }
                id(\"s\");
            }"
        ),
        vec!["Argument type mismatch"]
    );
}

#[test]
fn test_classes() {
    let point = "class Point {
        let x: int = 0;
        constructor(x: int) { this.x = x; }
        public function length(): float { return 1.0; }
        get size(): int { return this.x; }
    }";

    assert_clean(&format!(
        "{} let p = new Point(1); let l: float = p.length(); let x: int = p.x; let s: int = p.size;",
        point
    ));
    assert_eq!(
        errors(&format!("{} let p = new Point(\"a\");", point)),
        vec!["Argument type mismatch"]
    );
    assert_eq!(
        errors(&format!("{} let p = new Point(1); p.z;", point)),
        vec!["Type 'Point' has no member 'z'"]
    );
    assert_eq!(errors("new Missing();"), vec!["Undefined class: Missing"]);
    assert_eq!(errors("this;"), vec!["'this' can only be used inside a class"]);
}

#[test]
fn test_class_forward_references_and_inheritance() {
    assert_clean(
        "let b = new B();
        let v: int = b.a;
        class A { let a: int = 1; }
        class B extends A { }",
    );
}

#[test]
fn test_fields() {
    assert_eq!(
        errors("class A { let x; }"),
        vec!["Field must have either explicit type or initializer"]
    );
    assert_eq!(
        errors("class A { let x: int = \"s\"; }"),
        vec!["Field initializer type doesn't match field type"]
    );
    assert_clean("class A { let x = 1; } let a = new A(); let v: int = a.x;");
}

#[test]
fn test_member_access_on_primitive() {
    assert_eq!(
        errors("let n = 1; n.size;"),
        vec!["Cannot access member 'size' on type int"]
    );
}

#[test]
fn test_enums() {
    assert_clean("enum Color { Red = 1, Green } let c = Color.Red;");
    assert_eq!(
        global_type("enum Color { Red, Green } let c = Color.Green;", "c"),
        Some(ResolvedType::Int)
    );
    assert_clean("enum Color { Red, Green = 2 } let c: int = Color.Red;");
    assert_clean("function f(): int { enum Level { Low, High } return Level.High; }");
    assert_clean("enum Scale: float { Low = 1.5 } let s: float = Scale.Low;");
    assert_eq!(
        errors("enum Scale: float { Low = 1.5 } let i: int = Scale.Low;"),
        vec!["Initializer type doesn't match variable type"]
    );
    assert_eq!(
        errors("enum E { A = \"x\" }"),
        vec!["Enum member value must be compatible with underlying type"]
    );
    assert_eq!(
        errors("enum Color { Red } let c = Color.Blue;"),
        vec!["Type 'Color' has no member 'Blue'"]
    );
}

#[test]
fn test_namespaces_and_typedefs() {
    assert_clean(
        "namespace geo {
            class Point { }
            function origin(): int { return 0; }
            function twice(): int { return origin() * 2; }
        }
        let o: int = geo.origin();
        let p: geo.Point;",
    );
    assert_clean("typedef Id = int; let i: Id = 5;");
    assert_eq!(errors("let p: geo.Point;"), vec!["Undefined qualified type: geo.Point"]);
}

#[test]
fn test_casts() {
    assert_eq!(
        global_type("let f = 1.5; let i = cast<int> f;", "i"),
        Some(ResolvedType::Int)
    );
    assert_eq!(
        errors("let i = cast<int> \"s\";"),
        vec!["Invalid cast from string to int"]
    );
    assert_eq!(errors("let i = cast<Foo> 1;"), vec!["Undefined type: Foo"]);
}

#[test]
fn test_arrays() {
    assert_eq!(
        errors("let a = [];"),
        vec!["Cannot determine type of empty array literal"]
    );
    assert_eq!(
        errors("let a = [1, \"s\"];"),
        vec!["Array elements must have compatible types"]
    );
    assert_clean("let a = [1, 2]; let b: int = a[0];");
    assert_eq!(
        errors("let a = [1, 2]; a[1.5];"),
        vec!["Array index must be an integer"]
    );
    assert_eq!(errors("let n = 1; n[0];"), vec!["Cannot index non-array type"]);
}

#[test]
fn test_switch_try_and_assembly() {
    assert_eq!(
        errors("let v = 1; switch (v) { case \"a\": break; }"),
        vec!["Case value type doesn't match switch expression type"]
    );
    assert_clean("try { let a = 1; } catch (e) { let b = e; } finally { }");
    assert_eq!(
        errors("#asm(\"  \");"),
        vec!["Assembly statement cannot have empty code"]
    );
}

#[test]
fn test_conditional_branches() {
    assert_eq!(
        errors("let c = true ? 1 : \"s\";"),
        vec!["Conditional expression branches have incompatible types"]
    );
}
