//! Kotlin writer.
//!
//! Java-shaped IR is folded into Kotlin idiom on the way out: a constructor
//! flagged [`keys::PRIMARY`] moves into the class header, static members
//! gather in a `companion object`, and `switch` becomes `when`.

use super::{
    Dialect, entry_arguments, is_enum_entry, separated, single_return, superclass, written_name,
};
use crate::emit::{Emit, render};
use crate::tables::{C_ASSIGNMENT, C_UNARY, JVM_CALL_KINDS, ModifierTable, OperatorTable, STRUCTURAL_FLAGS};
use crate::traits::{GenerateError, Writer};
use crossgen_ir::properties::keys;
use crossgen_ir::*;
use tracing::debug;

/// Static instance of the Kotlin writer for registry.
pub static KOTLIN_WRITER: KotlinWriter = KotlinWriter;

pub static KOTLIN_MODIFIERS: ModifierTable = ModifierTable::new(&[
    (keys::ABSTRACT, "abstract"),
    (keys::FINAL, "final"),
    (keys::OPEN, "open"),
    (keys::SEALED, "sealed"),
    (keys::DATA, "data"),
    (keys::INNER, "inner"),
    (keys::OVERRIDE, "override"),
    (keys::INLINE, "inline"),
    (keys::SUSPEND, "suspend"),
    (keys::TAILREC, "tailrec"),
    (keys::CONST, "const"),
    (keys::LATEINIT, "lateinit"),
]);

const KOTLIN_BINARY: &[(BinaryOperator, &str)] = &[
    (BinaryOperator::Plus, "+"),
    (BinaryOperator::Minus, "-"),
    (BinaryOperator::Multiply, "*"),
    (BinaryOperator::Divide, "/"),
    (BinaryOperator::Modulo, "%"),
    (BinaryOperator::Equals, "=="),
    (BinaryOperator::NotEquals, "!="),
    (BinaryOperator::Greater, ">"),
    (BinaryOperator::GreaterOrEqual, ">="),
    (BinaryOperator::Less, "<"),
    (BinaryOperator::LessOrEqual, "<="),
    (BinaryOperator::And, "&&"),
    (BinaryOperator::Or, "||"),
    (BinaryOperator::BitwiseAnd, "and"),
    (BinaryOperator::BitwiseOr, "or"),
    (BinaryOperator::BitwiseXor, "xor"),
    (BinaryOperator::ShiftLeft, "shl"),
    (BinaryOperator::ShiftRight, "shr"),
];

pub static KOTLIN_OPERATORS: OperatorTable =
    OperatorTable::new("kotlin", KOTLIN_BINARY, C_UNARY, C_ASSIGNMENT, JVM_CALL_KINDS);

/// Lambda parameter names Kotlin binds implicitly.
const IMPLICIT_PARAMETERS: &[&str] = &["it", "$receiver"];

/// Emits IR as Kotlin source code.
pub struct KotlinWriter;

impl Writer for KotlinWriter {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn emit_file(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        debug!(file = %file.name, declarations = file.declarations.len(), "generating kotlin");
        self.file(file)
    }
}

fn visibility(visibility: &Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Protected { .. } => Some("protected"),
        Visibility::Internal { .. } => Some("internal"),
        Visibility::Private { .. } | Visibility::Fileprivate { .. } => Some("private"),
        _ => None,
    }
}

fn primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Void => "Unit",
        PrimitiveType::Boolean => "Boolean",
        PrimitiveType::Byte => "Byte",
        PrimitiveType::Short => "Short",
        PrimitiveType::Int => "Int",
        PrimitiveType::Long => "Long",
        PrimitiveType::Char => "Char",
        PrimitiveType::Float => "Float",
        PrimitiveType::Double => "Double",
    }
}

/// Packages every Kotlin/JVM file imports by default.
const KOTLIN_DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "kotlin.jvm",
    "java.lang",
];

/// Kotlin name of a `java.lang` type that Kotlin maps to a builtin.
fn builtin_alias(qualified: &str) -> Option<&'static str> {
    match qualified {
        "java.lang.Object" => Some("Any"),
        "java.lang.Integer" => Some("Int"),
        "java.lang.Character" => Some("Char"),
        "java.lang.Void" => Some("Unit"),
        _ => None,
    }
}

fn is_static_field(field: &Field) -> bool {
    field.meta.language_properties.flag(keys::STATIC)
}

fn is_companion(class: &Class) -> bool {
    class.kind == ClassKind::Object && class.meta.language_properties.flag(keys::COMPANION)
}

fn primary_constructor(class: &Class) -> Option<&Constructor> {
    class
        .constructors()
        .find(|c| c.meta.language_properties.flag(keys::PRIMARY))
}

fn is_this(expression: &Expression) -> bool {
    matches!(expression, Expression::Literal(l) if l.value == "this")
}

fn bare_name(expression: &Expression) -> Option<&str> {
    match expression {
        Expression::Literal(l) => Some(&l.value),
        _ => None,
    }
}

/// `x` when `statement` is `this.x = x`.
fn assigned_parameter(statement: &Statement) -> Option<&str> {
    let Statement::Expression(statement) = statement else {
        return None;
    };
    let Expression::Assignment(assignment) = &statement.expression else {
        return None;
    };
    if assignment.operator != AssignmentOperator::Assign {
        return None;
    }
    let target = match assignment.target.as_ref() {
        Expression::PropertyAccess(p) if p.receiver.as_deref().is_some_and(is_this) => {
            p.property_name.as_str()
        }
        Expression::Identifier(i) if i.qualifier.as_deref().is_some_and(is_this) => {
            bare_name(&i.selector)?
        }
        _ => return None,
    };
    let value = match assignment.value.as_ref() {
        Expression::Identifier(i) if i.qualifier.is_none() => bare_name(&i.selector)?,
        _ => return None,
    };
    (target == value).then_some(target)
}

/// Fields the primary constructor initializes straight from a parameter
/// of the same name. They are declared in the class header.
fn header_properties<'a>(class: &'a Class, primary: &'a Constructor) -> Vec<&'a str> {
    let Some(body) = &primary.body else {
        return Vec::new();
    };
    body.statements
        .iter()
        .filter_map(assigned_parameter)
        .filter(|name| primary.parameters.iter().any(|p| p.name == *name))
        .filter(|name| class.field(name).is_some_and(|f| !is_static_field(f)))
        .collect()
}

/// Members of one class body.
struct Members<'a> {
    primary: Option<&'a Constructor>,
    header_properties: Vec<&'a str>,
}

impl<'a> Members<'a> {
    fn of(class: &'a Class) -> Self {
        let primary = primary_constructor(class);
        let header_properties = primary
            .map(|p| header_properties(class, p))
            .unwrap_or_default();
        Self {
            primary,
            header_properties,
        }
    }

    fn in_header(&self, field: &Field) -> bool {
        self.header_properties.contains(&field.name.as_str())
    }

    /// Primary constructor statements that do not just copy a parameter.
    fn init_statements(&self) -> Vec<&'a Statement> {
        let Some(body) = self.primary.and_then(|p| p.body.as_ref()) else {
            return Vec::new();
        };
        body.statements
            .iter()
            .filter(|s| {
                assigned_parameter(s).is_none_or(|name| !self.header_properties.contains(&name))
            })
            .collect()
    }
}

impl KotlinWriter {
    fn kotlin_type(&self, ty: &Type) -> Result<String, GenerateError> {
        let nullable = if ty.is_nullable() { "?" } else { "" };
        let shape = match ty {
            Type::Primitive(p) => primitive(p.primitive_type).to_string(),
            Type::Reference(r) => {
                let qualified = r
                    .referenced_class_qualified_name
                    .as_deref()
                    .unwrap_or(&r.referenced_class_simple_name);
                let name = builtin_alias(qualified)
                    .unwrap_or_else(|| written_name(qualified, &r.meta.language_properties));
                if r.type_parameters.is_empty() {
                    name.to_string()
                } else {
                    let arguments = r
                        .type_parameters
                        .iter()
                        .map(|t| self.kotlin_type(t))
                        .collect::<Result<Vec<_>, _>>()?;
                    format!("{name}<{}>", arguments.join(", "))
                }
            }
            Type::Array(a) => format!("Array<{}>", self.kotlin_type(&a.element_type)?),
            Type::Generic(g) => g.name.clone(),
            Type::Function(f) => {
                let parameters = f
                    .parameter_types
                    .iter()
                    .map(|t| self.kotlin_type(t))
                    .collect::<Result<Vec<_>, _>>()?;
                let function = format!(
                    "({}) -> {}",
                    parameters.join(", "),
                    self.kotlin_type(&f.return_type)?
                );
                if f.is_nullable {
                    return Ok(format!("({function})?"));
                }
                function
            }
        };
        Ok(format!("{shape}{nullable}"))
    }

    fn property(&self, field: &Field, owner: Option<&Class>) -> Result<Vec<Emit>, GenerateError> {
        let in_interface = owner.is_some_and(|c| c.kind == ClassKind::Interface);
        let mut words: Vec<&str> = visibility(&field.visibility).into_iter().collect();
        let except: &[&str] = if in_interface { &[keys::ABSTRACT] } else { &[] };
        words.extend(KOTLIN_MODIFIERS.keywords(&field.meta.language_properties, except));
        words.push(if field.is_mutable { "var" } else { "val" });
        let initializer = match &field.initializer {
            Some(initializer) => format!(" = {}", self.initializer(initializer)?),
            None => String::new(),
        };
        let mut emits = self.annotations(&field.meta)?;
        emits.extend(Emit::line(format!(
            "{} {}: {}{initializer}",
            words.join(" "),
            field.name,
            self.type_name(&field.ir_type)?
        )));
        Ok(emits)
    }

    fn function(&self, method: &Method, owner: Option<&Class>) -> Result<Vec<Emit>, GenerateError> {
        let in_interface = owner.is_some_and(|c| c.kind == ClassKind::Interface);
        let mut words: Vec<&str> = visibility(&method.visibility).into_iter().collect();
        words.extend(KOTLIN_MODIFIERS.flag(method.is_abstract && !in_interface, keys::ABSTRACT));
        words.extend(KOTLIN_MODIFIERS.flag(method.is_override, keys::OVERRIDE));
        words.extend(KOTLIN_MODIFIERS.keywords(&method.meta.language_properties, STRUCTURAL_FLAGS));
        words.push("fun");
        let type_parameters = self.type_parameters(&method.type_parameters)?;
        if !type_parameters.is_empty() {
            words.push(&type_parameters);
        }
        let mut signature = format!(
            "{} {}({})",
            words.join(" "),
            method.name,
            self.parameters(&method.parameters)?
        );
        if !method.return_type.is_void() {
            signature.push_str(&format!(": {}", self.type_name(&method.return_type)?));
        }

        let mut emits = self.annotations(&method.meta)?;
        match &method.body {
            None => emits.extend(Emit::line(signature)),
            Some(body) => emits.push(Emit::block(
                format!("{signature} {{"),
                self.statements(&body.statements)?,
                "}",
            )),
        }
        Ok(emits)
    }

    fn secondary_constructor(&self, constructor: &Constructor) -> Result<Vec<Emit>, GenerateError> {
        let mut words: Vec<&str> = visibility(&constructor.visibility).into_iter().collect();
        words.push("constructor");
        let mut signature = format!(
            "{}({})",
            words.join(" "),
            self.parameters(&constructor.parameters)?
        );
        if let Some(call) = &constructor.other_constructor_call {
            signature.push_str(&format!(" : {}", self.method_call(call)?));
        }
        let body = self.callable_body(constructor.body.as_ref())?;
        let mut emits = self.annotations(&constructor.meta)?;
        if body.is_empty() {
            emits.extend(Emit::line(signature));
        } else {
            emits.push(Emit::block(format!("{signature} {{"), body, "}"));
        }
        Ok(emits)
    }

    /// `name: T = default`, without annotations.
    fn parameter_declaration(&self, parameter: &Parameter) -> Result<String, GenerateError> {
        let mut text = format!("{}: {}", parameter.name, self.type_name(&parameter.ir_type)?);
        if let Some(default) = &parameter.default_value {
            text.push_str(&format!(" = {}", self.expression(default)?));
        }
        Ok(text)
    }

    fn init_block(&self, statements: &[Statement]) -> Result<Vec<Emit>, GenerateError> {
        Ok(vec![Emit::block("init {", self.statements(statements)?, "}")])
    }

    /// `(val x: Int, y: Int)` for the primary constructor.
    fn primary_parameters(&self, class: &Class, members: &Members) -> Result<String, GenerateError> {
        let Some(primary) = members.primary else {
            return Ok(String::new());
        };
        let mut parameters = Vec::new();
        for parameter in &primary.parameters {
            let mut text = String::new();
            for annotation in &parameter.meta.annotations {
                text.push_str(&self.annotation(annotation)?);
                text.push(' ');
            }
            if let Some(field) = class.field(&parameter.name).filter(|f| members.in_header(f)) {
                let mut words: Vec<&str> = visibility(&field.visibility).into_iter().collect();
                words.extend(KOTLIN_MODIFIERS.keywords(&field.meta.language_properties, &[]));
                words.push(if field.is_mutable { "var" } else { "val" });
                text.push_str(&words.join(" "));
                text.push(' ');
            }
            text.push_str(&self.parameter_declaration(parameter)?);
            parameters.push(text);
        }
        let prefix = match visibility(&primary.visibility) {
            Some(keyword) => format!(" {keyword} constructor"),
            None => String::new(),
        };
        if parameters.is_empty() && prefix.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{prefix}({})", parameters.join(", ")))
    }

    fn class_header(&self, class: &Class, members: &Members) -> Result<String, GenerateError> {
        let keyword = match &class.kind {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum class",
            ClassKind::Annotation => "annotation class",
            ClassKind::Object if is_companion(class) => "companion object",
            ClassKind::Object => "object",
            other => {
                return Err(GenerateError::unsupported(
                    class.display_name(),
                    format!("{} declarations have no Kotlin form", other.name()),
                ));
            }
        };
        superclass(class)?;

        let mut words: Vec<&str> = visibility(&class.visibility).into_iter().collect();
        let except: &[&str] = if class.kind == ClassKind::Interface {
            &[keys::ABSTRACT]
        } else {
            &[]
        };
        words.extend(KOTLIN_MODIFIERS.keywords(&class.meta.language_properties, except));
        words.push(keyword);
        let mut header = words.join(" ");
        if !is_companion(class) || class.simple_name != "Companion" {
            header.push(' ');
            header.push_str(&class.simple_name);
        }
        header.push_str(&self.type_parameters(&class.type_parameters)?);
        header.push_str(&self.primary_parameters(class, members)?);

        let base_arguments = match members.primary {
            Some(primary) => match &primary.other_constructor_call {
                Some(call) if call.ir_method_call_kind == MethodCallKind::Super => {
                    Some(self.arguments(&call.value_arguments)?)
                }
                _ => Some(String::new()),
            },
            None if class.constructors().next().is_none() => Some(String::new()),
            None => None,
        };
        let mut supers = Vec::new();
        for super_class in &class.super_classes {
            let mut text = self.super_type(super_class)?;
            if super_class.kind == ClassKind::Class && class.kind != ClassKind::Interface {
                if let Some(arguments) = &base_arguments {
                    text.push_str(&format!("({arguments})"));
                }
            }
            supers.push(text);
        }
        if !supers.is_empty() {
            header.push_str(&format!(" : {}", supers.join(", ")));
        }
        Ok(header)
    }

    fn enum_entries(&self, entries: &[&Field], has_members: bool) -> Result<Vec<Emit>, GenerateError> {
        let mut emits = Vec::new();
        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            emits.extend(self.annotations(&entry.meta)?);
            let arguments = entry_arguments(entry);
            let mut text = if arguments.is_empty() {
                entry.name.clone()
            } else {
                format!("{}({})", entry.name, self.arguments(arguments)?)
            };
            text.push_str(if i < last { "," } else if has_members { ";" } else { "" });
            emits.extend(Emit::line(text));
        }
        Ok(emits)
    }

    /// Member groups of a class body, each separated by a blank line.
    fn class_body(&self, class: &Class, members: &Members) -> Result<Vec<Vec<Emit>>, GenerateError> {
        let statics_inline = class.kind == ClassKind::Object;
        let instance_field = |f: &&Field| {
            !is_enum_entry(f) && !members.in_header(f) && (statics_inline || !is_static_field(f))
        };
        let entries: Vec<&Field> = class.fields.iter().filter(|f| is_enum_entry(f)).collect();
        let companion = class.nested_classes.iter().find(|c| is_companion(c));

        let mut groups = Vec::new();
        let mut fields = Vec::new();
        for field in class.fields.iter().filter(instance_field) {
            fields.extend(self.property(field, Some(class))?);
        }
        groups.push(fields);

        let init = members.init_statements();
        if !init.is_empty() {
            let statements: Vec<Statement> = init.into_iter().cloned().collect();
            groups.push(self.init_block(&statements)?);
        }
        for initializer in &class.initializers {
            if statics_inline || initializer.kind == InitializerKind::Instance {
                groups.push(self.init_block(initializer_statements(initializer))?);
            }
        }
        for callable in &class.methods {
            match callable {
                Callable::Method(method) if statics_inline || !method.is_static => {
                    groups.push(self.function(method, Some(class))?);
                }
                Callable::Constructor(constructor)
                    if !constructor.meta.language_properties.flag(keys::PRIMARY) =>
                {
                    groups.push(self.secondary_constructor(constructor)?);
                }
                _ => {}
            }
        }
        for nested in class.nested_classes.iter().filter(|c| !is_companion(c)) {
            groups.push(self.class(nested)?);
        }

        let statics = if statics_inline {
            Vec::new()
        } else {
            self.static_members(class)?
        };
        if companion.is_some() || !statics.is_empty() {
            let (header, mut companion_groups) = match companion {
                Some(companion) => {
                    let companion_members = Members::of(companion);
                    (
                        self.class_header(companion, &companion_members)?,
                        self.class_body(companion, &companion_members)?,
                    )
                }
                None => ("companion object".to_string(), Vec::new()),
            };
            companion_groups.extend(statics);
            groups.push(vec![Emit::block(
                format!("{header} {{"),
                separated(companion_groups),
                "}",
            )]);
        }

        if class.kind == ClassKind::Enum {
            let has_members = groups.iter().any(|g| !g.is_empty());
            groups.insert(0, self.enum_entries(&entries, has_members)?);
        }
        Ok(groups)
    }

    /// Static fields, initializers and methods, for the companion object.
    fn static_members(&self, class: &Class) -> Result<Vec<Vec<Emit>>, GenerateError> {
        let mut groups = Vec::new();
        let mut fields = Vec::new();
        for field in class.fields.iter().filter(|f| is_static_field(f) && !is_enum_entry(f)) {
            fields.extend(self.property(field, None)?);
        }
        groups.push(fields);
        for initializer in &class.initializers {
            if initializer.kind == InitializerKind::Static {
                groups.push(self.init_block(initializer_statements(initializer))?);
            }
        }
        for method in class.plain_methods().filter(|m| m.is_static) {
            groups.push(self.function(method, None)?);
        }
        groups.retain(|g| !g.is_empty());
        Ok(groups)
    }

    fn when_label(&self, case: &SwitchCase) -> Result<String, GenerateError> {
        if case.is_default() {
            return Ok("else".to_string());
        }
        let labels = case
            .match_expressions
            .iter()
            .map(|e| self.expression(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(labels.join(", "))
    }
}

fn initializer_statements(initializer: &ClassInitializer) -> &[Statement] {
    initializer
        .body
        .as_ref()
        .map_or(&[], |body| body.statements.as_slice())
}

impl Dialect for KotlinWriter {
    fn target(&self) -> &'static str {
        "kotlin"
    }

    fn operators(&self) -> &'static OperatorTable {
        &KOTLIN_OPERATORS
    }

    fn modifiers(&self) -> &'static ModifierTable {
        &KOTLIN_MODIFIERS
    }

    fn type_name(&self, ty: &Type) -> Result<String, GenerateError> {
        self.kotlin_type(ty)
    }

    fn ternary(&self, condition: &str, if_true: &str, if_false: &str) -> String {
        format!("if ({condition}) {if_true} else {if_false}")
    }

    fn cast(&self, expression: &str, target: &str) -> String {
        format!("{expression} as {target}")
    }

    fn lambda(&self, lambda: &LambdaExpression) -> Result<String, GenerateError> {
        let names: Vec<_> = lambda
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| !IMPLICIT_PARAMETERS.contains(name))
            .collect();
        let arrow = if names.is_empty() {
            String::new()
        } else {
            format!(" {} ->", names.join(", "))
        };
        if let Some(expression) = single_return(&lambda.body) {
            return Ok(format!("{{{arrow} {} }}", self.expression(expression)?));
        }
        let statements = lambda.body.as_statements();
        if let [Statement::Expression(only)] = statements {
            return Ok(format!("{{{arrow} {} }}", self.expression(&only.expression)?));
        }
        // The last expression of a lambda is its value; `return` would
        // leave the enclosing function.
        let mut body = Vec::new();
        for (i, statement) in statements.iter().enumerate() {
            match statement {
                Statement::Return(ReturnStatement {
                    expression: Some(expression),
                    ..
                }) if i + 1 == statements.len() => {
                    body.extend(Emit::line(self.expression(expression)?));
                }
                other => body.extend(self.statement(other)?),
            }
        }
        let text = render(&[Emit::block(format!("{{{arrow}"), body, "}")]);
        Ok(text.trim_end().to_string())
    }

    fn scope_header(&self) -> &'static str {
        "run {"
    }

    fn variable_declaration(
        &self,
        declaration: &VariableDeclarationStatement,
    ) -> Result<Vec<Emit>, GenerateError> {
        let keyword = if declaration.is_mutable { "var" } else { "val" };
        let ty = self.type_name(&declaration.ir_type)?;
        let initializer = match &declaration.initializer {
            Some(initializer) => format!(" = {}", self.initializer(initializer)?),
            None => String::new(),
        };
        let mut emits = Vec::new();
        for name in std::iter::once(&declaration.name).chain(&declaration.additional_names) {
            emits.extend(Emit::line(format!("{keyword} {name}: {ty}{initializer}")));
        }
        Ok(emits)
    }

    fn switch(&self, statement: &SwitchStatement) -> Result<Vec<Emit>, GenerateError> {
        let mut cases = Vec::new();
        for case in &statement.cases {
            cases.push(Emit::block(
                format!("{} -> {{", self.when_label(case)?),
                self.case_body(case)?,
                "}",
            ));
        }
        Ok(vec![Emit::block(
            format!("when {} {{", self.condition(&statement.expression)?),
            cases,
            "}",
        )])
    }

    fn catch_parameter(&self, clause: &CatchClause) -> Result<String, GenerateError> {
        Ok(format!(
            "{}: {}",
            clause.exception_name.as_deref().unwrap_or("e"),
            self.type_name(&clause.exception_type.with_nullable(false))?
        ))
    }

    fn type_parameter(&self, parameter: &TypeParameter) -> Result<String, GenerateError> {
        match parameter.extends_list.as_slice() {
            [] => Ok(parameter.name.clone()),
            [bound] => Ok(format!("{} : {}", parameter.name, self.type_name(bound)?)),
            _ => Err(GenerateError::unsupported(
                &parameter.name,
                "several upper bounds need a `where` clause",
            )),
        }
    }

    fn parameter(&self, parameter: &Parameter) -> Result<String, GenerateError> {
        let mut text = String::new();
        for annotation in &parameter.meta.annotations {
            text.push_str(&self.annotation(annotation)?);
            text.push(' ');
        }
        text.push_str(&self.parameter_declaration(parameter)?);
        Ok(text)
    }

    fn class(&self, class: &Class) -> Result<Vec<Emit>, GenerateError> {
        let members = Members::of(class);
        let header = self.class_header(class, &members)?;
        let body = separated(self.class_body(class, &members)?);
        let mut emits = self.annotations(&class.meta)?;
        if body.is_empty() {
            emits.extend(Emit::line(header));
        } else {
            emits.push(Emit::block(format!("{header} {{"), body, "}"));
        }
        Ok(emits)
    }

    fn top_level_field(&self, field: &Field) -> Result<Vec<Emit>, GenerateError> {
        self.property(field, None)
    }

    fn top_level_method(&self, method: &Method) -> Result<Vec<Emit>, GenerateError> {
        self.function(method, None)
    }

    fn implicit_packages(&self) -> Option<&'static [&'static str]> {
        Some(KOTLIN_DEFAULT_IMPORTS)
    }

    fn is_builtin(&self, qualified: &str) -> bool {
        builtin_alias(qualified).is_some()
    }

    fn file_header(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        let package = match file.package() {
            Some(package) => Emit::line(format!("package {package}")),
            None => Vec::new(),
        };
        let mut imports = Vec::new();
        for import in &file.imports {
            let suffix = match import.meta.language_properties.string("alias") {
                _ if import.is_wildcard => ".*".to_string(),
                Some(alias) => format!(" as {alias}"),
                None => String::new(),
            };
            imports.extend(Emit::line(format!("import {}{suffix}", import.path)));
        }
        Ok(separated(vec![package, imports]))
    }
}
