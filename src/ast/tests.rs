use crate::{
    ast::{
        ast::{Ast, Node},
        expressions::{Expr, LiteralKind},
        printer::{dump, expr_to_string},
        statements::Stmt,
    },
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse,
    SourceLocation,
};

fn parse_source(source: &str) -> Ast {
    let tokens = tokenize(source.to_string(), Some("test.tspp".to_string())).unwrap();
    let mut diagnostics = Diagnostics::new();
    let ast = parse(tokens, &mut diagnostics);
    assert!(!diagnostics.has_errors());
    ast
}

#[test]
fn test_dump_variable_and_function() {
    let ast = parse_source(
        "let a = 42;
        const b: int = 10;
        function f(): int {
            if (x > 10) {
                y();
            } else {
                return 1.5;
            }
        }",
    );

    let expected = "\
Var a = 42
Const b: int = 10
Function f(): int
  Block
    If (> x 10)
      Block
        Expr (call y)
      Else
        Block
          Return 1.5
";
    assert_eq!(dump(&ast), expected);
}

#[test]
fn test_dump_class_enum_namespace() {
    let ast = parse_source(
        "class A { let x: int; }
        enum E { One = 1, Two }
        typedef N = int;
        namespace ns { let v = 1; }",
    );

    let expected = "\
Class A
  public Field x: int
Enum E
  One = 1
  Two
Typedef N = int
Namespace ns
  Var v = 1
";
    assert_eq!(dump(&ast), expected);
}

#[test]
fn test_dump_loops_and_switch() {
    let ast = parse_source(
        "for (let i = 0; i < 3; i++) { }
        for (const x of xs) break;
        switch (v) { case 1: f(); default: g(); }",
    );

    let expected = "\
For ; (< i 3) ; (i ++)
  Init
    Var i = 0
  Block
ForOf const x of xs
  Break
Switch v
  Case 1
    Expr (call f)
  Default
    Expr (call g)
";
    assert_eq!(dump(&ast), expected);
}

#[test]
fn test_dump_generic_function() {
    let ast = parse_source("function id<T extends comparable>(ref x: T): T;");

    assert_eq!(
        dump(&ast),
        "Function id<T extends comparable>(ref x: T): T\n"
    );
}

#[test]
fn test_expr_to_string_literals() {
    let location = SourceLocation::null();
    let expr = Expr::Literal {
        kind: LiteralKind::String,
        value: String::from("a\"b"),
        location,
    };

    assert_eq!(expr_to_string(&expr), "\"a\\\"b\"");
}

#[test]
fn test_node_accessors() {
    let ast = parse_source("let a = 1; a = 2;");

    assert_eq!(ast.declarations().count(), 1);
    assert!(ast.nodes[0].as_decl().is_some());
    assert!(matches!(
        ast.nodes[1].as_stmt(),
        Some(Stmt::Expression { .. })
    ));
    assert!(matches!(ast.nodes[1], Node::Stmt(_)));
    assert_eq!(ast.nodes[1].location().line, 1);
    assert_eq!(ast.nodes[1].location().column, 12);
}
