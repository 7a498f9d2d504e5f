//! Swift writer.

use super::{Dialect, chain, entry_arguments, is_enum_entry, separated, single_return, strip_package, superclass};
use crate::emit::{Emit, render};
use crate::tables::{C_ASSIGNMENT, C_BINARY, ModifierTable, OperatorTable, STRUCTURAL_FLAGS};
use crate::traits::{GenerateError, Writer};
use crossgen_ir::properties::keys;
use crossgen_ir::*;
use tracing::debug;

/// Static instance of the Swift writer for registry.
pub static SWIFT_WRITER: SwiftWriter = SwiftWriter;

pub static SWIFT_MODIFIERS: ModifierTable = ModifierTable::new(&[
    (keys::FINAL, "final"),
    (keys::STATIC, "static"),
    (keys::OVERRIDE, "override"),
    (keys::CONVENIENCE, "convenience"),
]);

const SWIFT_UNARY: &[(UnaryOperator, &str)] = &[
    (UnaryOperator::Not, "!"),
    (UnaryOperator::Plus, "+"),
    (UnaryOperator::Minus, "-"),
    (UnaryOperator::Increment, "+= 1"),
    (UnaryOperator::Decrement, "-= 1"),
];

const SWIFT_CALL_KINDS: &[(MethodCallKind, Option<&str>)] = &[
    (MethodCallKind::Default, None),
    (MethodCallKind::This, Some("self.init")),
    (MethodCallKind::Super, Some("super.init")),
];

pub static SWIFT_OPERATORS: OperatorTable =
    OperatorTable::new("swift", C_BINARY, SWIFT_UNARY, C_ASSIGNMENT, SWIFT_CALL_KINDS);

/// Emits IR as Swift source code.
pub struct SwiftWriter;

impl Writer for SwiftWriter {
    fn language(&self) -> &'static str {
        "swift"
    }

    fn extension(&self) -> &'static str {
        "swift"
    }

    fn emit_file(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        debug!(file = %file.name, declarations = file.declarations.len(), "generating swift");
        self.file(file)
    }
}

fn visibility(visibility: &Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Public { .. } => Some("public"),
        Visibility::Internal { .. } => Some("internal"),
        Visibility::Private { .. } => Some("private"),
        Visibility::Fileprivate { .. } => Some("fileprivate"),
        Visibility::Open { .. } => Some("open"),
        _ => None,
    }
}

fn primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Void => "Void",
        PrimitiveType::Boolean => "Bool",
        PrimitiveType::Byte => "Int8",
        PrimitiveType::Short => "Int16",
        PrimitiveType::Int => "Int",
        PrimitiveType::Long => "Int64",
        PrimitiveType::Char => "Character",
        PrimitiveType::Float => "Float",
        PrimitiveType::Double => "Double",
    }
}

fn builtin_alias(qualified: &str) -> Option<&'static str> {
    match qualified {
        "java.lang.Object" | "kotlin.Any" => Some("Any"),
        "java.lang.Boolean" => Some("Bool"),
        "java.lang.Integer" => Some("Int"),
        "java.lang.Long" => Some("Int64"),
        "java.lang.Character" => Some("Character"),
        "java.lang.Void" | "kotlin.Unit" => Some("Void"),
        _ => None,
    }
}

/// JVM literal spelled for Swift: `null` is `nil`, `this` is `self`,
/// character literals become strings and numeric suffixes are dropped.
fn swift_literal(value: &str) -> String {
    match value {
        "null" => return "nil".to_string(),
        "this" => return "self".to_string(),
        _ => {}
    }
    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return format!("\"{inner}\"");
    }
    if value.starts_with(|c: char| c.is_ascii_digit()) && !value.starts_with("0x") {
        if let Some(number) = value.strip_suffix(['L', 'l', 'f', 'F', 'd', 'D']) {
            return number.to_string();
        }
    }
    value.to_string()
}

impl SwiftWriter {
    fn swift_type(&self, ty: &Type) -> Result<String, GenerateError> {
        let nullable = if ty.is_nullable() { "?" } else { "" };
        let shape = match ty {
            Type::Primitive(p) => primitive(p.primitive_type).to_string(),
            Type::Reference(r) => {
                let qualified = r
                    .referenced_class_qualified_name
                    .as_deref()
                    .unwrap_or(&r.referenced_class_simple_name);
                let name = builtin_alias(qualified).unwrap_or_else(|| strip_package(qualified));
                if r.type_parameters.is_empty() {
                    name.to_string()
                } else {
                    let arguments = r
                        .type_parameters
                        .iter()
                        .map(|t| self.swift_type(t))
                        .collect::<Result<Vec<_>, _>>()?;
                    format!("{name}<{}>", arguments.join(", "))
                }
            }
            Type::Array(a) => format!("[{}]", self.swift_type(&a.element_type)?),
            Type::Generic(g) => g.name.clone(),
            Type::Function(f) => {
                let parameters = f
                    .parameter_types
                    .iter()
                    .map(|t| self.swift_type(t))
                    .collect::<Result<Vec<_>, _>>()?;
                let function = format!(
                    "({}) -> {}",
                    parameters.join(", "),
                    self.swift_type(&f.return_type)?
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
        let mut emits = self.annotations(&field.meta)?;
        let ty = self.type_name(&field.ir_type)?;
        let mut words: Vec<&str> = visibility(&field.visibility).into_iter().collect();
        words.extend(SWIFT_MODIFIERS.keywords(&field.meta.language_properties, &[]));

        if owner.is_some_and(|c| c.kind == ClassKind::Interface) {
            let accessors = if field.is_mutable { "{ get set }" } else { "{ get }" };
            words.push("var");
            emits.extend(Emit::line(format!("{} {}: {ty} {accessors}", words.join(" "), field.name)));
            return Ok(emits);
        }

        words.push(if field.is_mutable { "var" } else { "let" });
        let initializer = match &field.initializer {
            Some(initializer) => format!(" = {}", self.initializer(initializer)?),
            None => String::new(),
        };
        emits.extend(Emit::line(format!(
            "{} {}: {ty}{initializer}",
            words.join(" "),
            field.name
        )));
        Ok(emits)
    }

    fn function(&self, method: &Method, owner: Option<&Class>) -> Result<Vec<Emit>, GenerateError> {
        let in_protocol = owner.is_some_and(|c| c.kind == ClassKind::Interface);
        let mut words: Vec<&str> = visibility(&method.visibility).into_iter().collect();
        words.extend(SWIFT_MODIFIERS.flag(method.is_static, keys::STATIC));
        words.extend(SWIFT_MODIFIERS.flag(method.is_override, keys::OVERRIDE));
        words.extend(SWIFT_MODIFIERS.keywords(&method.meta.language_properties, STRUCTURAL_FLAGS));
        words.push("func");
        let mut signature = format!(
            "{} {}{}({})",
            words.join(" "),
            method.name,
            self.type_parameters(&method.type_parameters)?,
            self.parameters(&method.parameters)?
        );
        if !method.return_type.is_void() {
            signature.push_str(&format!(" -> {}", self.type_name(&method.return_type)?));
        }

        let mut emits = self.annotations(&method.meta)?;
        match &method.body {
            None if in_protocol => emits.extend(Emit::line(signature)),
            // Swift has no abstract methods; the body traps if reached.
            None => emits.push(Emit::block(
                format!("{signature} {{"),
                Emit::line(format!("fatalError(\"{} is abstract\")", method.name)),
                "}",
            )),
            Some(body) => emits.push(Emit::block(
                format!("{signature} {{"),
                self.statements(&body.statements)?,
                "}",
            )),
        }
        Ok(emits)
    }

    fn initializer_declaration(&self, constructor: &Constructor) -> Result<Vec<Emit>, GenerateError> {
        let delegation = constructor.other_constructor_call.as_ref();
        let convenience = delegation.is_some_and(|c| c.ir_method_call_kind == MethodCallKind::This);
        let mut words: Vec<&str> = visibility(&constructor.visibility).into_iter().collect();
        words.extend(SWIFT_MODIFIERS.flag(convenience, keys::CONVENIENCE));
        words.push("init");

        // `self.init` must run before the body touches `self`, `super.init`
        // only once every stored property is set.
        let mut body = Vec::new();
        if let Some(call) = delegation.filter(|_| convenience) {
            body.extend(Emit::line(self.method_call(call)?));
        }
        body.extend(self.callable_body(constructor.body.as_ref())?);
        if let Some(call) = delegation.filter(|_| !convenience) {
            body.extend(Emit::line(self.method_call(call)?));
        }

        let mut emits = self.annotations(&constructor.meta)?;
        emits.push(Emit::block(
            format!(
                "{}{}({}) {{",
                words.join(" "),
                self.type_parameters(&constructor.type_parameters)?,
                self.parameters(&constructor.parameters)?
            ),
            body,
            "}",
        ));
        Ok(emits)
    }

    fn enum_cases(&self, entries: &[&Field]) -> Result<Vec<Emit>, GenerateError> {
        let mut emits = Vec::new();
        for entry in entries {
            if !entry_arguments(entry).is_empty() {
                return Err(GenerateError::unsupported(
                    &entry.name,
                    "Swift enum cases take no constructor arguments",
                ));
            }
            emits.extend(self.annotations(&entry.meta)?);
            emits.extend(Emit::line(format!("case {}", entry.name)));
        }
        Ok(emits)
    }

    fn class_header(&self, class: &Class) -> Result<String, GenerateError> {
        let keyword = match &class.kind {
            ClassKind::Class => "class",
            ClassKind::Interface => "protocol",
            ClassKind::Enum => "enum",
            ClassKind::Struct => "struct",
            ClassKind::Actor => "actor",
            other => {
                return Err(GenerateError::unsupported(
                    class.display_name(),
                    format!("{} declarations have no Swift form", other.name()),
                ));
            }
        };
        superclass(class)?;
        let mut words: Vec<&str> = visibility(&class.visibility).into_iter().collect();
        words.extend(SWIFT_MODIFIERS.keywords(&class.meta.language_properties, &[keys::STATIC]));
        words.push(keyword);
        let mut header = format!(
            "{} {}{}",
            words.join(" "),
            class.simple_name,
            self.type_parameters(&class.type_parameters)?
        );
        // The superclass must come first in a Swift inheritance clause.
        let mut supers: Vec<&SuperClass> = class.super_classes.iter().collect();
        supers.sort_by_key(|s| s.kind != ClassKind::Class);
        let supers = supers
            .into_iter()
            .map(|s| self.super_type(s))
            .collect::<Result<Vec<_>, _>>()?;
        if !supers.is_empty() {
            header.push_str(&format!(": {}", supers.join(", ")));
        }
        header.push_str(" {");
        Ok(header)
    }
}

impl Dialect for SwiftWriter {
    fn target(&self) -> &'static str {
        "swift"
    }

    fn operators(&self) -> &'static OperatorTable {
        &SWIFT_OPERATORS
    }

    fn modifiers(&self) -> &'static ModifierTable {
        &SWIFT_MODIFIERS
    }

    fn type_name(&self, ty: &Type) -> Result<String, GenerateError> {
        self.swift_type(ty)
    }

    fn literal(&self, value: &str) -> String {
        swift_literal(value)
    }

    /// Swift has no `++`/`--`; both become compound assignments.
    fn unary(&self, unary: &UnaryExpression) -> Result<String, GenerateError> {
        let operator = self.operators().unary(&unary.operator)?;
        let operand = self.expression(&unary.operand)?;
        match unary.operator {
            UnaryOperator::Increment | UnaryOperator::Decrement => Ok(format!("{operand} {operator}")),
            _ if unary.is_prefix => Ok(format!("{operator}{operand}")),
            _ => Ok(format!("{operand}{operator}")),
        }
    }

    fn explicit_type_arguments(&self, name: &str, _types: &str) -> String {
        name.to_string()
    }

    fn cast(&self, expression: &str, target: &str) -> String {
        format!("{expression} as! {target}")
    }

    fn lambda(&self, lambda: &LambdaExpression) -> Result<String, GenerateError> {
        let names: Vec<_> = lambda.parameters.iter().map(|p| p.name.as_str()).collect();
        let header = if names.is_empty() {
            "{".to_string()
        } else {
            format!("{{ {} in", names.join(", "))
        };
        if let Some(expression) = single_return(&lambda.body) {
            return Ok(format!("{header} {} }}", self.expression(expression)?));
        }
        if let [Statement::Expression(only)] = lambda.body.as_statements() {
            return Ok(format!("{header} {} }}", self.expression(&only.expression)?));
        }
        let text = render(&[Emit::block(header, self.body(&lambda.body)?, "}")]);
        Ok(text.trim_end().to_string())
    }

    fn wrap_condition(&self, condition: &str) -> String {
        condition.to_string()
    }

    fn scope_header(&self) -> &'static str {
        "do {"
    }

    fn do_keyword(&self) -> &'static str {
        "repeat"
    }

    fn variable_declaration(
        &self,
        declaration: &VariableDeclarationStatement,
    ) -> Result<Vec<Emit>, GenerateError> {
        let keyword = if declaration.is_mutable { "var" } else { "let" };
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
            let label = if case.is_default() {
                "default:".to_string()
            } else {
                let labels = case
                    .match_expressions
                    .iter()
                    .map(|e| self.expression(e))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("case {}:", labels.join(", "))
            };
            let mut body = self.case_body(case)?;
            if body.is_empty() {
                body = Emit::line("break");
            }
            cases.push(Emit::block(label, body, ""));
        }
        // Swift switches must be exhaustive.
        if !statement.cases.iter().any(SwitchCase::is_default) {
            cases.push(Emit::block("default:", Emit::line("break"), ""));
        }
        Ok(vec![Emit::block(
            format!("switch {} {{", self.condition(&statement.expression)?),
            cases,
            "}",
        )])
    }

    fn try_catch(&self, statement: &TryCatchStatement) -> Result<Vec<Emit>, GenerateError> {
        let mut body = Vec::new();
        if let Some(finally) = &statement.finally_block {
            body.push(Emit::block("defer {", self.body(finally)?, "}"));
        }
        body.extend(self.body(&statement.try_block)?);
        let mut parts = vec![("do {".to_string(), body)];
        for clause in &statement.catch_clauses {
            let body = match &clause.body {
                Some(body) => self.body(body)?,
                None => Vec::new(),
            };
            parts.push((format!("}} catch {} {{", self.catch_parameter(clause)?), body));
        }
        Ok(chain(parts))
    }

    fn catch_parameter(&self, clause: &CatchClause) -> Result<String, GenerateError> {
        Ok(format!(
            "let {} as {}",
            clause.exception_name.as_deref().unwrap_or("error"),
            self.type_name(&clause.exception_type.with_nullable(false))?
        ))
    }

    fn type_parameter(&self, parameter: &TypeParameter) -> Result<String, GenerateError> {
        if parameter.extends_list.is_empty() {
            return Ok(parameter.name.clone());
        }
        let bounds = parameter
            .extends_list
            .iter()
            .map(|t| self.type_name(&t.with_nullable(false)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}: {}", parameter.name, bounds.join(" & ")))
    }

    fn parameter(&self, parameter: &Parameter) -> Result<String, GenerateError> {
        let mut text = String::new();
        for annotation in &parameter.meta.annotations {
            text.push_str(&self.annotation(annotation)?);
            text.push(' ');
        }
        text.push_str(&format!("_ {}: {}", parameter.name, self.type_name(&parameter.ir_type)?));
        if let Some(default) = &parameter.default_value {
            text.push_str(&format!(" = {}", self.expression(default)?));
        }
        Ok(text)
    }

    fn super_type(&self, super_class: &SuperClass) -> Result<String, GenerateError> {
        let name = builtin_alias(super_class.display_name())
            .unwrap_or_else(|| strip_package(super_class.display_name()));
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

    fn class(&self, class: &Class) -> Result<Vec<Emit>, GenerateError> {
        let header = self.class_header(class)?;
        if let Some(initializer) = class.initializers.first() {
            let kind = match initializer.kind {
                InitializerKind::Static => "static",
                InitializerKind::Instance => "instance",
            };
            return Err(GenerateError::unsupported(
                class.display_name(),
                format!("Swift has no {kind} initializer blocks"),
            ));
        }
        let (entries, fields): (Vec<&Field>, Vec<&Field>) =
            class.fields.iter().partition(|f| is_enum_entry(f));

        let mut groups = Vec::new();
        if class.kind == ClassKind::Enum {
            groups.push(self.enum_cases(&entries)?);
        }
        let mut properties = Vec::new();
        for field in fields {
            properties.extend(self.property(field, Some(class))?);
        }
        groups.push(properties);
        for callable in &class.methods {
            groups.push(match callable {
                Callable::Method(method) => self.function(method, Some(class))?,
                Callable::Constructor(constructor) => self.initializer_declaration(constructor)?,
            });
        }
        for nested in &class.nested_classes {
            groups.push(self.class(nested)?);
        }

        let mut emits = self.annotations(&class.meta)?;
        emits.push(Emit::block(header, separated(groups), "}"));
        Ok(emits)
    }

    fn top_level_field(&self, field: &Field) -> Result<Vec<Emit>, GenerateError> {
        self.property(field, None)
    }

    fn top_level_method(&self, method: &Method) -> Result<Vec<Emit>, GenerateError> {
        self.function(method, None)
    }

    /// JVM imports name classes and Swift imports name modules, so none
    /// carry over.
    fn file_header(&self, _file: &File) -> Result<Vec<Emit>, GenerateError> {
        Ok(Vec::new())
    }
}
