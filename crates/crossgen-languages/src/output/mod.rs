//! Output writers - emit IR as source code.
//!
//! Java, Kotlin and Swift share one C-family walk over the IR, [`Dialect`].
//! Each writer implements the hooks where its syntax differs and looks
//! every modifier and operator up in its own tables.

#[cfg(feature = "write-java")]
pub mod java;

#[cfg(feature = "write-java")]
pub use java::{JAVA_WRITER, JavaWriter};

#[cfg(feature = "write-kotlin")]
pub mod kotlin;

#[cfg(feature = "write-kotlin")]
pub use kotlin::{KOTLIN_WRITER, KotlinWriter};

#[cfg(feature = "write-swift")]
pub mod swift;

#[cfg(feature = "write-swift")]
pub use swift::{SWIFT_WRITER, SwiftWriter};

mod imports;

pub(crate) use imports::written_name;

use crate::emit::{Emit, render};
use crate::tables::{ModifierTable, OperatorTable};
use crate::traits::GenerateError;
use crossgen_ir::properties::keys;
use crossgen_ir::*;

/// Verbatim text of an unknown node, if it was recorded for `target`.
pub(crate) fn unknown_text<'a>(meta: &'a SyntaxMeta, target: &str) -> Result<&'a str, GenerateError> {
    meta.representation(target).ok_or_else(|| {
        let language = meta
            .string_representation
            .first()
            .map_or("unknown", |r| r.language.as_str());
        GenerateError::UnsupportedUnknown {
            language: language.to_string(),
            target: target.to_string(),
        }
    })
}

/// The one class-kind super-type of `class`, if any.
pub(crate) fn superclass(class: &Class) -> Result<Option<&SuperClass>, GenerateError> {
    let mut classes = class
        .super_classes
        .iter()
        .filter(|s| s.kind == ClassKind::Class);
    let first = classes.next();
    let rest = classes.count();
    if rest > 0 {
        return Err(GenerateError::MultipleSuperclasses {
            node: class.display_name().to_string(),
            count: rest + 1,
        });
    }
    Ok(first)
}

/// Drop the package prefix of a JVM-style name: the segments before the
/// first capitalized one.
pub(crate) fn strip_package(name: &str) -> &str {
    let mut offset = 0;
    for segment in name.split('.') {
        if segment.starts_with(|c: char| c.is_uppercase()) {
            return &name[offset..];
        }
        offset += segment.len() + 1;
    }
    name.rsplit('.').next().unwrap_or(name)
}

/// Chain of `(header, body)` blocks closed by one `}`, as in
/// `if {} else if {} else {}` or `try {} catch {} finally {}`.
pub(crate) fn chain(parts: Vec<(String, Vec<Emit>)>) -> Vec<Emit> {
    let last = parts.len().saturating_sub(1);
    parts
        .into_iter()
        .enumerate()
        .map(|(i, (header, body))| Emit::block(header, body, if i == last { "}" } else { "" }))
        .collect()
}

/// Join member groups with one blank line between non-empty groups.
pub(crate) fn separated(groups: Vec<Vec<Emit>>) -> Vec<Emit> {
    let mut emits = Vec::new();
    for group in groups.into_iter().filter(|g| !g.is_empty()) {
        if !emits.is_empty() {
            emits.push(Emit::Line);
        }
        emits.extend(group);
    }
    emits
}

/// `expr` when `statement` is exactly `return expr`.
pub(crate) fn single_return(statement: &Statement) -> Option<&Expression> {
    match statement.as_statements() {
        [Statement::Return(ReturnStatement {
            expression: Some(expression),
            ..
        })] => Some(expression),
        _ => None,
    }
}

pub(crate) fn is_enum_entry(field: &Field) -> bool {
    field.meta.language_properties.flag(keys::ENUM_ENTRY)
}

/// Constructor arguments of an enum entry, written `A(1, 2)`.
pub(crate) fn entry_arguments(field: &Field) -> &[Expression] {
    match field.initializer_expression() {
        Some(Expression::ObjectCreation(creation)) => &creation.constructor_args,
        _ => &[],
    }
}

/// Case body without its trailing `break`, for targets whose cases do not
/// fall through.
pub(crate) fn without_trailing_break(statements: &[Statement]) -> &[Statement] {
    match statements.split_last() {
        Some((Statement::Break(_), rest)) => rest,
        _ => statements,
    }
}

/// `statements` with `update` copied in front of every `continue` that
/// belongs to the enclosing loop. Nested loops keep their own `continue`s.
pub(crate) fn update_before_continue(statements: Vec<Statement>, update: &[Statement]) -> Vec<Statement> {
    let mut placed = Vec::with_capacity(statements.len());
    for statement in statements {
        if let Statement::Continue(_) = statement {
            placed.extend(update.iter().cloned());
            placed.push(statement);
        } else {
            placed.push(update_in_statement(statement, update));
        }
    }
    placed
}

/// A branch body. Branches are written without their block wrapper, so a
/// lone `continue` can grow into a block.
fn update_in_branch(statement: Statement, update: &[Statement]) -> Statement {
    match statement {
        Statement::Continue(_) => Statement::Block(BlockStatement {
            statements: update_before_continue(vec![statement], update),
            ..Default::default()
        }),
        other => update_in_statement(other, update),
    }
}

fn update_in_statement(statement: Statement, update: &[Statement]) -> Statement {
    match statement {
        Statement::Block(mut block) => {
            block.statements = update_before_continue(block.statements, update);
            Statement::Block(block)
        }
        Statement::If(mut s) => {
            s.then_statement = Box::new(update_in_branch(*s.then_statement, update));
            s.else_statement = s.else_statement.map(|e| Box::new(update_in_branch(*e, update)));
            Statement::If(s)
        }
        Statement::Switch(mut s) => {
            for case in &mut s.cases {
                case.body = case.body.take().map(|b| Box::new(update_in_branch(*b, update)));
            }
            Statement::Switch(s)
        }
        Statement::TryCatch(mut s) => {
            s.try_block = Box::new(update_in_branch(*s.try_block, update));
            for clause in &mut s.catch_clauses {
                clause.body = clause.body.take().map(|b| Box::new(update_in_branch(*b, update)));
            }
            s.finally_block = s.finally_block.map(|f| Box::new(update_in_branch(*f, update)));
            Statement::TryCatch(s)
        }
        other => other,
    }
}

/// The C-family walk shared by every target.
pub(crate) trait Dialect: Sync {
    /// Language name unknown nodes must be tagged with to be emitted.
    fn target(&self) -> &'static str;
    fn operators(&self) -> &'static OperatorTable;
    fn modifiers(&self) -> &'static ModifierTable;

    /// Terminator of simple statements.
    fn statement_end(&self) -> &'static str {
        ""
    }

    fn type_name(&self, ty: &Type) -> Result<String, GenerateError>;

    // Expressions

    fn expression(&self, expression: &Expression) -> Result<String, GenerateError> {
        let text = match expression {
            Expression::Empty(_) => String::new(),
            Expression::Literal(literal) => self.literal(&literal.value),
            Expression::Identifier(identifier) => {
                let selector = self.expression(&identifier.selector)?;
                match &identifier.qualifier {
                    Some(qualifier) => format!("{}.{selector}", self.expression(qualifier)?),
                    None => selector,
                }
            }
            Expression::TypeReferenceIdentifier(reference) => {
                self.type_name(&reference.referenced_type.with_nullable(false))?
            }
            Expression::PropertyAccess(access) => match &access.receiver {
                Some(receiver) => format!("{}.{}", self.expression(receiver)?, access.property_name),
                None => access.property_name.clone(),
            },
            Expression::MethodCall(call) => self.method_call(call)?,
            Expression::ObjectCreation(creation) => self.object_creation(
                written_name(&creation.class_name, &creation.meta.element.language_properties),
                &self.arguments(&creation.constructor_args)?,
            ),
            Expression::Binary(binary) => format!(
                "{} {} {}",
                self.expression(&binary.left)?,
                self.operators().binary(&binary.operator)?,
                self.expression(&binary.right)?
            ),
            Expression::Unary(unary) => self.unary(unary)?,
            Expression::Assignment(assignment) => format!(
                "{} {} {}",
                self.expression(&assignment.target)?,
                self.operators().assignment(&assignment.operator)?,
                self.expression(&assignment.value)?
            ),
            Expression::Ternary(ternary) => self.ternary(
                &self.expression(&ternary.condition)?,
                &self.expression(&ternary.if_true)?,
                &self.expression(&ternary.if_false)?,
            ),
            Expression::Cast(cast) => self.cast(
                &self.expression(&cast.expression)?,
                &self.type_name(&cast.target_type)?,
            ),
            Expression::TypeCheck(check) => self.type_check(
                &self.expression(&check.expression)?,
                &self.type_name(&check.check_type.with_nullable(false))?,
            ),
            Expression::Unknown(unknown) => unknown_text(&unknown.meta, self.target())?.to_string(),
            Expression::Lambda(lambda) => self.lambda(lambda)?,
        };
        if expression
            .meta()
            .element
            .language_properties
            .flag(keys::PARENTHESIZED)
        {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    fn literal(&self, value: &str) -> String {
        value.to_string()
    }

    fn arguments(&self, arguments: &[Expression]) -> Result<String, GenerateError> {
        let arguments = arguments
            .iter()
            .map(|a| self.expression(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(arguments.join(", "))
    }

    fn method_call(&self, call: &MethodCallExpression) -> Result<String, GenerateError> {
        let callee = match self.operators().call_kind(&call.ir_method_call_kind)? {
            Some(token) => token.to_string(),
            None if call.type_arguments.is_empty() => call.method_name.clone(),
            None => {
                let types = call
                    .type_arguments
                    .iter()
                    .map(|t| self.type_name(t))
                    .collect::<Result<Vec<_>, _>>()?;
                self.explicit_type_arguments(&call.method_name, &types.join(", "))
            }
        };
        let arguments = self.arguments(&call.value_arguments)?;
        match &call.receiver {
            Some(receiver) => Ok(format!("{}.{callee}({arguments})", self.expression(receiver)?)),
            None => Ok(format!("{callee}({arguments})")),
        }
    }

    /// `name<T>` in most targets.
    fn explicit_type_arguments(&self, name: &str, types: &str) -> String {
        format!("{name}<{types}>")
    }

    fn object_creation(&self, class_name: &str, arguments: &str) -> String {
        format!("{class_name}({arguments})")
    }

    fn unary(&self, unary: &UnaryExpression) -> Result<String, GenerateError> {
        let operator = self.operators().unary(&unary.operator)?;
        let operand = self.expression(&unary.operand)?;
        if unary.is_prefix {
            Ok(format!("{operator}{operand}"))
        } else {
            Ok(format!("{operand}{operator}"))
        }
    }

    fn ternary(&self, condition: &str, if_true: &str, if_false: &str) -> String {
        format!("{condition} ? {if_true} : {if_false}")
    }

    fn cast(&self, expression: &str, target: &str) -> String;

    fn type_check(&self, expression: &str, checked: &str) -> String {
        format!("{expression} is {checked}")
    }

    fn lambda(&self, lambda: &LambdaExpression) -> Result<String, GenerateError>;

    /// `{`-delimited block rendered to text, for blocks nested inside an
    /// expression.
    fn inline_block(&self, header: &str, body: &Statement) -> Result<String, GenerateError> {
        let emits = vec![Emit::block(header, self.body(body)?, "}")];
        Ok(render(&emits).trim_end().to_string())
    }

    // Statements

    fn statement(&self, statement: &Statement) -> Result<Vec<Emit>, GenerateError> {
        let end = self.statement_end();
        match statement {
            Statement::Empty(_) if end.is_empty() => Ok(Vec::new()),
            Statement::Empty(_) => Ok(Emit::line(end)),
            Statement::Expression(s) => Ok(Emit::line(format!("{}{end}", self.expression(&s.expression)?))),
            Statement::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            Statement::Block(block) => Ok(vec![Emit::block(
                self.scope_header(),
                self.statements(&block.statements)?,
                "}",
            )]),
            Statement::If(s) => self.if_statement(s),
            Statement::For(s) => self.for_statement(s),
            Statement::While(s) => Ok(vec![Emit::block(
                format!("while {} {{", self.condition(&s.condition)?),
                self.body(&s.body)?,
                "}",
            )]),
            Statement::DoWhile(s) => Ok(vec![Emit::block(
                format!("{} {{", self.do_keyword()),
                self.body(&s.body)?,
                format!("}} while {}{end}", self.condition(&s.condition)?),
            )]),
            Statement::Switch(s) => self.switch(s),
            Statement::Return(s) => Ok(Emit::line(match &s.expression {
                Some(e) => format!("return {}{end}", self.expression(e)?),
                None => format!("return{end}"),
            })),
            Statement::Break(_) => Ok(Emit::line(format!("break{end}"))),
            Statement::Continue(_) => Ok(Emit::line(format!("continue{end}"))),
            Statement::Throw(s) => Ok(Emit::line(format!("throw {}{end}", self.expression(&s.expression)?))),
            Statement::TryCatch(s) => self.try_catch(s),
            Statement::Unknown(s) => Ok(Emit::line(unknown_text(&s.meta, self.target())?)),
        }
    }

    fn statements(&self, statements: &[Statement]) -> Result<Vec<Emit>, GenerateError> {
        let mut emits = Vec::new();
        for statement in statements {
            emits.extend(self.statement(statement)?);
        }
        Ok(emits)
    }

    /// Statements of a branch or loop body, without the block wrapper.
    fn body(&self, statement: &Statement) -> Result<Vec<Emit>, GenerateError> {
        self.statements(statement.as_statements())
    }

    fn callable_body(&self, body: Option<&MethodBody>) -> Result<Vec<Emit>, GenerateError> {
        match body {
            Some(body) => self.statements(&body.statements),
            None => Ok(Vec::new()),
        }
    }

    fn condition(&self, condition: &Expression) -> Result<String, GenerateError> {
        Ok(self.wrap_condition(&self.expression(condition)?))
    }

    fn wrap_condition(&self, condition: &str) -> String {
        format!("({condition})")
    }

    /// Opening line of a standalone nested scope.
    fn scope_header(&self) -> &'static str;

    fn do_keyword(&self) -> &'static str {
        "do"
    }

    /// Expression a variable or field initializer statement stands for.
    fn initializer(&self, statement: &Statement) -> Result<String, GenerateError> {
        match statement {
            Statement::Expression(s) => self.expression(&s.expression),
            Statement::Unknown(s) => Ok(unknown_text(&s.meta, self.target())?.to_string()),
            other => Err(GenerateError::unsupported(
                "initializer",
                format!("{} statement cannot initialize a variable", other.kind_name()),
            )),
        }
    }

    fn variable_declaration(
        &self,
        declaration: &VariableDeclarationStatement,
    ) -> Result<Vec<Emit>, GenerateError>;

    fn if_statement(&self, statement: &IfStatement) -> Result<Vec<Emit>, GenerateError> {
        let mut parts = Vec::new();
        let mut header = format!("if {} {{", self.condition(&statement.condition)?);
        let mut current = statement;
        loop {
            parts.push((header, self.body(&current.then_statement)?));
            match current.else_statement.as_deref() {
                None => break,
                Some(Statement::If(next)) => {
                    header = format!("}} else if {} {{", self.condition(&next.condition)?);
                    current = next;
                }
                Some(other) => {
                    parts.push(("} else {".to_string(), self.body(other)?));
                    break;
                }
            }
        }
        Ok(chain(parts))
    }

    /// Targets without a C-style `for` run the initializer in its own
    /// scope and the update at the end of a `while` body and before each
    /// `continue` of the loop.
    fn for_statement(&self, statement: &ForStatement) -> Result<Vec<Emit>, GenerateError> {
        let condition = match &statement.condition {
            Some(condition) => self.condition(condition)?,
            None => self.wrap_condition("true"),
        };
        let mut body = statement.body.as_statements().to_vec();
        if let Some(update) = &statement.update {
            let update = update.as_statements();
            body = update_before_continue(body, update);
            body.extend(update.iter().cloned());
        }
        let lowered = Emit::block(format!("while {condition} {{"), self.statements(&body)?, "}");
        match &statement.initializer {
            None => Ok(vec![lowered]),
            Some(initializer) => {
                let mut scoped = self.body(initializer)?;
                scoped.push(lowered);
                Ok(vec![Emit::block(self.scope_header(), scoped, "}")])
            }
        }
    }

    fn switch(&self, statement: &SwitchStatement) -> Result<Vec<Emit>, GenerateError>;

    /// Statements of a case arm, trailing `break` dropped.
    fn case_body(&self, case: &SwitchCase) -> Result<Vec<Emit>, GenerateError> {
        match &case.body {
            Some(body) => self.statements(without_trailing_break(body.as_statements())),
            None => Ok(Vec::new()),
        }
    }

    fn try_catch(&self, statement: &TryCatchStatement) -> Result<Vec<Emit>, GenerateError> {
        let mut parts = vec![("try {".to_string(), self.body(&statement.try_block)?)];
        for clause in &statement.catch_clauses {
            let body = match &clause.body {
                Some(body) => self.body(body)?,
                None => Vec::new(),
            };
            parts.push((format!("}} catch ({}) {{", self.catch_parameter(clause)?), body));
        }
        if let Some(finally) = &statement.finally_block {
            parts.push(("} finally {".to_string(), self.body(finally)?));
        }
        Ok(chain(parts))
    }

    fn catch_parameter(&self, clause: &CatchClause) -> Result<String, GenerateError>;

    // Declarations

    fn annotation(&self, annotation: &Annotation) -> Result<String, GenerateError> {
        let arguments = match annotation.parameters.as_slice() {
            [] => return Ok(format!("@{}", annotation.name)),
            [only] if only.parameter_name == "value" => self.expression(&only.parameter_value)?,
            parameters => parameters
                .iter()
                .map(|p| Ok(format!("{} = {}", p.parameter_name, self.expression(&p.parameter_value)?)))
                .collect::<Result<Vec<_>, GenerateError>>()?
                .join(", "),
        };
        Ok(format!("@{}({arguments})", annotation.name))
    }

    fn annotations(&self, meta: &ElementMeta) -> Result<Vec<Emit>, GenerateError> {
        let mut emits = Vec::new();
        for annotation in &meta.annotations {
            emits.extend(Emit::line(self.annotation(annotation)?));
        }
        Ok(emits)
    }

    fn type_parameter(&self, parameter: &TypeParameter) -> Result<String, GenerateError>;

    fn type_parameters(&self, parameters: &[TypeParameter]) -> Result<String, GenerateError> {
        if parameters.is_empty() {
            return Ok(String::new());
        }
        let parameters = parameters
            .iter()
            .map(|p| self.type_parameter(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("<{}>", parameters.join(", ")))
    }

    fn parameter(&self, parameter: &Parameter) -> Result<String, GenerateError>;

    fn parameters(&self, parameters: &[Parameter]) -> Result<String, GenerateError> {
        let parameters = parameters
            .iter()
            .map(|p| self.parameter(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parameters.join(", "))
    }

    /// Super-type as written in a class header.
    fn super_type(&self, super_class: &SuperClass) -> Result<String, GenerateError> {
        let name = written_name(super_class.display_name(), &super_class.meta.language_properties);
        if super_class.types.is_empty() {
            return Ok(name.to_string());
        }
        let types = super_class
            .types
            .iter()
            .map(|t| self.type_name(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{name}<{}>", types.join(", ")))
    }

    fn class(&self, class: &Class) -> Result<Vec<Emit>, GenerateError>;

    /// A declaration outside any class.
    fn top_level_field(&self, field: &Field) -> Result<Vec<Emit>, GenerateError>;

    fn top_level_method(&self, method: &Method) -> Result<Vec<Emit>, GenerateError>;

    fn file_header(&self, file: &File) -> Result<Vec<Emit>, GenerateError>;

    /// Packages whose types need no import. `None` for targets that do not
    /// import types at all.
    fn implicit_packages(&self) -> Option<&'static [&'static str]> {
        None
    }

    /// Whether the target spells `qualified` as a builtin of its own.
    fn is_builtin(&self, _qualified: &str) -> bool {
        false
    }

    fn file(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        let file = match self.implicit_packages() {
            Some(implicit) => {
                let builtin = |name: &str| self.is_builtin(name);
                imports::plan(file, &imports::ImportRules { implicit, builtin: &builtin })
            }
            None => std::borrow::Cow::Borrowed(file),
        };
        let file = file.as_ref();
        let mut groups = vec![self.file_header(file)?];
        for declaration in &file.declarations {
            groups.push(match declaration {
                Declaration::Class(class) => self.class(class)?,
                Declaration::Field(field) => self.top_level_field(field)?,
                Declaration::Method(method) => self.top_level_method(method)?,
            });
        }
        Ok(separated(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossgen_ir::builders::{ClassBuilder, SuperClassBuilder, UnknownStatementBuilder};

    #[test]
    fn strip_package_keeps_nested_names() {
        assert_eq!(strip_package("com.example.Outer.Inner"), "Outer.Inner");
        assert_eq!(strip_package("Point"), "Point");
        assert_eq!(strip_package("java.util.list"), "list");
    }

    #[test]
    fn superclass_rejects_two_class_supers() {
        let class = ClassBuilder::new("C")
            .visibility(Visibility::public())
            .super_class(SuperClassBuilder::new("A", ClassKind::Class).build().unwrap())
            .super_class(SuperClassBuilder::new("I", ClassKind::Interface).build().unwrap())
            .super_class(SuperClassBuilder::new("B", ClassKind::Class).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            superclass(&class),
            Err(GenerateError::MultipleSuperclasses {
                node: "C".into(),
                count: 2
            })
        );
    }

    #[test]
    fn unknown_text_requires_matching_language() {
        let Statement::Unknown(unknown) = UnknownStatementBuilder::new("java", "assert x;").build()
        else {
            unreachable!()
        };
        assert_eq!(unknown_text(&unknown.meta, "java"), Ok("assert x;"));
        assert_eq!(
            unknown_text(&unknown.meta, "kotlin"),
            Err(GenerateError::UnsupportedUnknown {
                language: "java".into(),
                target: "kotlin".into()
            })
        );
    }

    #[test]
    fn chain_closes_only_the_last_block() {
        let emits = chain(vec![
            ("try {".into(), Emit::line("f();")),
            ("} finally {".into(), Emit::line("g();")),
        ]);
        assert_eq!(render(&emits), "try {\n    f();\n} finally {\n    g();\n}\n");
    }
}
