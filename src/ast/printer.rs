//! Textual dump of a parsed unit, one node per line.
//!
//! Statements and declarations are printed as an indented tree. Expressions
//! are printed inline in prefix form, e.g. `(+ 1 (* 2 3))`.

use crate::lexer::tokens::TokenKind;

use super::{
    ast::{Ast, Node},
    declarations::{AccessModifier, Decl, Parameter, PropertyKind, StorageClass},
    expressions::{Attribute, Expr, LiteralKind},
    statements::{BlockStmt, Stmt},
    types::{GenericParam, PointerKind, TypeNode},
};

const INDENT: &str = "  ";

pub fn dump(ast: &Ast) -> String {
    let mut printer = AstPrinter::default();

    for node in ast.iter() {
        match node {
            Node::Decl(decl) => printer.decl(decl),
            Node::Stmt(stmt) => printer.stmt(stmt),
        }
    }

    printer.output
}

pub fn expr_to_string(expr: &Expr) -> String {
    match expr {
        Expr::Binary {
            op, left, right, ..
        } => format!(
            "({} {} {})",
            operator(*op),
            expr_to_string(left),
            expr_to_string(right)
        ),
        Expr::Unary {
            op,
            operand,
            is_prefix,
            ..
        } => {
            if *is_prefix {
                format!("({} {})", operator(*op), expr_to_string(operand))
            } else {
                format!("({} {})", expr_to_string(operand), operator(*op))
            }
        }
        Expr::Literal { kind, value, .. } => match kind {
            LiteralKind::String => format!("{:?}", value),
            LiteralKind::Null => String::from("null_value"),
            LiteralKind::Undefined => String::from("undefined"),
            LiteralKind::Number | LiteralKind::True | LiteralKind::False => value.clone(),
        },
        Expr::Identifier { name, .. } => name.clone(),
        Expr::ArrayLiteral { elements, .. } => format!("[{}]", join_exprs(elements, ", ")),
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
            ..
        } => format!(
            "(? {} {} {})",
            expr_to_string(condition),
            expr_to_string(then_branch),
            expr_to_string(else_branch)
        ),
        Expr::Assignment {
            op, target, value, ..
        } => format!(
            "({} {} {})",
            operator(*op),
            expr_to_string(target),
            expr_to_string(value)
        ),
        Expr::Call {
            callee,
            args,
            type_args,
            ..
        } => {
            let mut text = format!("(call {}", expr_to_string(callee));
            if !type_args.is_empty() {
                text.push_str(&format!("<{}>", type_args.join(", ")));
            }
            for arg in args {
                text.push(' ');
                text.push_str(&expr_to_string(arg));
            }
            text.push(')');
            text
        }
        Expr::Member {
            object,
            name,
            is_pointer_access,
            ..
        } => {
            let accessor = if *is_pointer_access { "@" } else { "." };
            format!("({} {} {})", accessor, expr_to_string(object), name)
        }
        Expr::Index { array, index, .. } => format!(
            "(index {} {})",
            expr_to_string(array),
            expr_to_string(index)
        ),
        Expr::This { .. } => String::from("this"),
        Expr::New {
            class_name, args, ..
        } => {
            if args.is_empty() {
                format!("(new {})", class_name)
            } else {
                format!("(new {} {})", class_name, join_exprs(args, " "))
            }
        }
        Expr::Cast {
            target_type, expr, ..
        } => format!("(cast<{}> {})", target_type, expr_to_string(expr)),
        Expr::CompileTime { kind, operand, .. } => {
            format!("({} {})", kind.keyword(), expr_to_string(operand))
        }
        Expr::TemplateSpecialization {
            base, type_args, ..
        } => format!("{}<{}>", base, type_args.join(", ")),
        Expr::Pointer {
            operand,
            kind,
            alignment,
            ..
        } => {
            let prefix = match kind {
                PointerKind::Unsafe => String::from("@#unsafe"),
                PointerKind::Aligned => format!("@#aligned({})", alignment.unwrap_or_default()),
                PointerKind::Raw | PointerKind::Safe => String::from("@"),
            };
            format!("({} {})", prefix, expr_to_string(operand))
        }
        Expr::Function(function) => {
            let mut text = format!("(function({})", params_to_string(&function.params));
            if let Some(return_type) = &function.return_type {
                text.push_str(&format!(": {}", return_type));
            }
            text.push_str(&format!(" {{{} statements}})", function.body.body.len()));
            text
        }
        Expr::Attribute(attribute) => attribute_to_string(attribute),
    }
}

fn operator(kind: TokenKind) -> String {
    kind.operator_symbol()
        .map(String::from)
        .unwrap_or_else(|| kind.to_string())
}

fn join_exprs(exprs: &[Expr], separator: &str) -> String {
    exprs
        .iter()
        .map(expr_to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn join_types(types: &[TypeNode]) -> String {
    types
        .iter()
        .map(|type_node| type_node.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn attribute_to_string(attribute: &Attribute) -> String {
    match &attribute.argument {
        Some(argument) => format!("#{}({})", attribute.name, expr_to_string(argument)),
        None => format!("#{}", attribute.name),
    }
}

fn param_to_string(param: &Parameter) -> String {
    let mut text = String::new();
    if param.is_ref {
        text.push_str("ref ");
    }
    if param.is_const {
        text.push_str("const ");
    }
    text.push_str(&format!("{}: {}", param.name, param.param_type));
    if let Some(default) = &param.default {
        text.push_str(&format!(" = {}", expr_to_string(default)));
    }
    text
}

fn params_to_string(params: &[Parameter]) -> String {
    params
        .iter()
        .map(param_to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn generics_to_string(params: &[GenericParam]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let rendered = params
        .iter()
        .map(|param| TypeNode::GenericParam(param.clone()).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("<{}>", rendered)
}

fn access_to_string(access: AccessModifier) -> &'static str {
    match access {
        AccessModifier::Public => "public",
        AccessModifier::Private => "private",
        AccessModifier::Protected => "protected",
    }
}

fn modifiers_prefix(modifiers: &[Attribute]) -> String {
    modifiers
        .iter()
        .map(|modifier| format!("{} ", attribute_to_string(modifier)))
        .collect()
}

#[derive(Default)]
struct AstPrinter {
    output: String,
    depth: usize,
}

impl AstPrinter {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn nested(&mut self, print: impl FnOnce(&mut Self)) {
        self.depth += 1;
        print(self);
        self.depth -= 1;
    }

    fn block(&mut self, block: &BlockStmt) {
        self.line("Block");
        self.nested(|printer| {
            for stmt in block.iter() {
                printer.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Expression { expr, .. } => self.line(format!("Expr {}", expr_to_string(expr))),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.line(format!("If {}", expr_to_string(condition)));
                self.nested(|printer| {
                    printer.stmt(then_branch);
                    if let Some(else_branch) = else_branch {
                        printer.line("Else");
                        printer.nested(|printer| printer.stmt(else_branch));
                    }
                });
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.line(format!("While {}", expr_to_string(condition)));
                self.nested(|printer| printer.stmt(body));
            }
            Stmt::DoWhile {
                body, condition, ..
            } => {
                self.line(format!("DoWhile {}", expr_to_string(condition)));
                self.nested(|printer| printer.stmt(body));
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
                ..
            } => {
                let condition = condition
                    .as_ref()
                    .map(expr_to_string)
                    .unwrap_or_default();
                let increment = increment
                    .as_ref()
                    .map(expr_to_string)
                    .unwrap_or_default();
                self.line(format!("For ; {} ; {}", condition, increment));
                self.nested(|printer| {
                    if let Some(initializer) = initializer {
                        printer.line("Init");
                        printer.nested(|printer| printer.stmt(initializer));
                    }
                    printer.stmt(body);
                });
            }
            Stmt::ForOf {
                is_const,
                identifier,
                declared_type,
                iterable,
                body,
                ..
            } => {
                let keyword = if *is_const { "const" } else { "let" };
                let annotation = declared_type
                    .as_ref()
                    .map(|type_node| format!(": {}", type_node))
                    .unwrap_or_default();
                self.line(format!(
                    "ForOf {} {}{} of {}",
                    keyword,
                    identifier,
                    annotation,
                    expr_to_string(iterable)
                ));
                self.nested(|printer| printer.stmt(body));
            }
            Stmt::Break { label, .. } => match label {
                Some(label) => self.line(format!("Break {}", label)),
                None => self.line("Break"),
            },
            Stmt::Continue { label, .. } => match label {
                Some(label) => self.line(format!("Continue {}", label)),
                None => self.line("Continue"),
            },
            Stmt::Return { value, .. } => match value {
                Some(value) => self.line(format!("Return {}", expr_to_string(value))),
                None => self.line("Return"),
            },
            Stmt::Try {
                try_block,
                catch_clauses,
                finally,
                ..
            } => {
                self.line("Try");
                self.nested(|printer| {
                    printer.stmt(try_block);
                    for clause in catch_clauses {
                        match &clause.parameter_type {
                            Some(parameter_type) => printer
                                .line(format!("Catch {}: {}", clause.parameter, parameter_type)),
                            None => printer.line(format!("Catch {}", clause.parameter)),
                        }
                        printer.nested(|printer| printer.stmt(&clause.body));
                    }
                    if let Some(finally) = finally {
                        printer.line("Finally");
                        printer.nested(|printer| printer.stmt(finally));
                    }
                });
            }
            Stmt::Throw { value, .. } => self.line(format!("Throw {}", expr_to_string(value))),
            Stmt::Switch { expr, cases, .. } => {
                self.line(format!("Switch {}", expr_to_string(expr)));
                self.nested(|printer| {
                    for case in cases {
                        match &case.value {
                            Some(value) => printer.line(format!("Case {}", expr_to_string(value))),
                            None => printer.line("Default"),
                        }
                        printer.nested(|printer| {
                            for stmt in &case.body {
                                printer.stmt(stmt);
                            }
                        });
                    }
                });
            }
            Stmt::Assembly {
                code, constraints, ..
            } => {
                if constraints.is_empty() {
                    self.line(format!("Asm {:?}", code));
                } else {
                    self.line(format!("Asm {:?} {:?}", code, constraints));
                }
            }
            Stmt::Labeled {
                label, statement, ..
            } => {
                self.line(format!("Label {}", label));
                self.nested(|printer| printer.stmt(statement));
            }
            Stmt::Declaration(declaration) => self.decl(&declaration.declaration),
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var {
                name,
                type_annotation,
                initializer,
                storage_class,
                is_const,
                ..
            } => {
                let mut text = String::from(if *is_const { "Const " } else { "Var " });
                if let Some(storage_class) = storage_class {
                    text.push_str(match storage_class {
                        StorageClass::Stack => "#stack ",
                        StorageClass::Heap => "#heap ",
                        StorageClass::Static => "#static ",
                        StorageClass::Weak => "#weak ",
                    });
                }
                text.push_str(name);
                if let Some(type_annotation) = type_annotation {
                    text.push_str(&format!(": {}", type_annotation));
                }
                if let Some(initializer) = initializer {
                    text.push_str(&format!(" = {}", expr_to_string(initializer)));
                }
                self.line(text);
            }
            Decl::Function {
                name,
                params,
                return_type,
                throws,
                modifiers,
                body,
                is_async,
                generic_params,
                where_clauses,
                ..
            } => {
                let mut text = modifiers_prefix(modifiers);
                if *is_async {
                    text.push_str("async ");
                }
                text.push_str(&format!(
                    "Function {}{}({})",
                    name,
                    generics_to_string(generic_params),
                    params_to_string(params)
                ));
                if let Some(return_type) = return_type {
                    text.push_str(&format!(": {}", return_type));
                }
                for clause in where_clauses {
                    text.push_str(&format!(" where {}: {}", clause.param, clause.constraint));
                }
                if !throws.is_empty() {
                    text.push_str(&format!(" throws {}", join_types(throws)));
                }
                self.line(text);
                if let Some(body) = body {
                    self.nested(|printer| printer.block(body));
                }
            }
            Decl::Class {
                name,
                modifiers,
                base_class,
                interfaces,
                members,
                generic_params,
                ..
            } => {
                let mut text = format!(
                    "{}Class {}{}",
                    modifiers_prefix(modifiers),
                    name,
                    generics_to_string(generic_params)
                );
                if let Some(base_class) = base_class {
                    text.push_str(&format!(" extends {}", base_class));
                }
                if !interfaces.is_empty() {
                    text.push_str(&format!(" implements {}", join_types(interfaces)));
                }
                self.line(text);
                self.nested(|printer| {
                    for member in members {
                        printer.decl(member);
                    }
                });
            }
            Decl::Constructor {
                access,
                params,
                body,
                ..
            } => {
                self.line(format!(
                    "{} Constructor({})",
                    access_to_string(*access),
                    params_to_string(params)
                ));
                self.nested(|printer| printer.block(body));
            }
            Decl::Method {
                name,
                access,
                params,
                return_type,
                throws,
                modifiers,
                body,
                ..
            } => {
                let mut text = format!(
                    "{} {}Method {}({})",
                    access_to_string(*access),
                    modifiers_prefix(modifiers),
                    name,
                    params_to_string(params)
                );
                if let Some(return_type) = return_type {
                    text.push_str(&format!(": {}", return_type));
                }
                if !throws.is_empty() {
                    text.push_str(&format!(" throws {}", join_types(throws)));
                }
                self.line(text);
                self.nested(|printer| printer.block(body));
            }
            Decl::Field {
                name,
                access,
                is_const,
                type_annotation,
                initializer,
                ..
            } => {
                let mut text = format!(
                    "{} {}{}",
                    access_to_string(*access),
                    if *is_const { "ConstField " } else { "Field " },
                    name
                );
                if let Some(type_annotation) = type_annotation {
                    text.push_str(&format!(": {}", type_annotation));
                }
                if let Some(initializer) = initializer {
                    text.push_str(&format!(" = {}", expr_to_string(initializer)));
                }
                self.line(text);
            }
            Decl::Property {
                name,
                access,
                kind,
                property_type,
                parameter,
                body,
                ..
            } => {
                let keyword = match kind {
                    PropertyKind::Getter => "Get",
                    PropertyKind::Setter => "Set",
                };
                let parameter = parameter
                    .as_ref()
                    .map(param_to_string)
                    .unwrap_or_default();
                self.line(format!(
                    "{} {} {}({}): {}",
                    access_to_string(*access),
                    keyword,
                    name,
                    parameter,
                    property_type
                ));
                self.nested(|printer| printer.block(body));
            }
            Decl::Namespace {
                name, declarations, ..
            } => {
                self.line(format!("Namespace {}", name));
                self.nested(|printer| {
                    for declaration in declarations {
                        printer.decl(declaration);
                    }
                });
            }
            Decl::Enum {
                name,
                underlying_type,
                members,
                ..
            } => {
                match underlying_type {
                    Some(underlying_type) => {
                        self.line(format!("Enum {}: {}", name, underlying_type))
                    }
                    None => self.line(format!("Enum {}", name)),
                }
                self.nested(|printer| {
                    for member in members {
                        match &member.value {
                            Some(value) => printer
                                .line(format!("{} = {}", member.name, expr_to_string(value))),
                            None => printer.line(&member.name),
                        }
                    }
                });
            }
            Decl::Interface {
                name,
                extends,
                members,
                is_zero_cast,
                generic_params,
                ..
            } => {
                let mut text = format!(
                    "{}Interface {}{}",
                    if *is_zero_cast { "#zerocast " } else { "" },
                    name,
                    generics_to_string(generic_params)
                );
                if !extends.is_empty() {
                    text.push_str(&format!(" extends {}", join_types(extends)));
                }
                self.line(text);
                self.nested(|printer| {
                    for member in members {
                        printer.decl(member);
                    }
                });
            }
            Decl::MethodSignature {
                name,
                access,
                params,
                return_type,
                throws,
                ..
            } => {
                let mut text = format!(
                    "{} MethodSignature {}({})",
                    access_to_string(*access),
                    name,
                    params_to_string(params)
                );
                if let Some(return_type) = return_type {
                    text.push_str(&format!(": {}", return_type));
                }
                if !throws.is_empty() {
                    text.push_str(&format!(" throws {}", join_types(throws)));
                }
                self.line(text);
            }
            Decl::PropertySignature {
                name,
                access,
                property_type,
                has_getter,
                has_setter,
                ..
            } => {
                let accessors = match (has_getter, has_setter) {
                    (true, true) => "get set",
                    (true, false) => "get",
                    (false, true) => "set",
                    (false, false) => "",
                };
                self.line(format!(
                    "{} PropertySignature {} {}: {}",
                    access_to_string(*access),
                    accessors,
                    name,
                    property_type
                ));
            }
            Decl::Typedef {
                name, aliased_type, ..
            } => self.line(format!("Typedef {} = {}", name, aliased_type)),
        }
    }
}
