//! Java writer.

use super::{Dialect, entry_arguments, is_enum_entry, separated, single_return, superclass, written_name};
use crate::emit::Emit;
use crate::tables::{
    C_ASSIGNMENT, C_BINARY, C_UNARY, JVM_CALL_KINDS, ModifierTable, OperatorTable, STRUCTURAL_FLAGS,
};
use crate::traits::{GenerateError, Writer};
use crossgen_ir::properties::keys;
use crossgen_ir::*;
use tracing::debug;

/// Static instance of the Java writer for registry.
pub static JAVA_WRITER: JavaWriter = JavaWriter;

pub static JAVA_MODIFIERS: ModifierTable = ModifierTable::new(&[
    (keys::ABSTRACT, "abstract"),
    (keys::STATIC, "static"),
    (keys::FINAL, "final"),
    (keys::DEFAULT, "default"),
    (keys::SYNCHRONIZED, "synchronized"),
    (keys::TRANSIENT, "transient"),
    (keys::VOLATILE, "volatile"),
    (keys::NATIVE, "native"),
]);

pub static JAVA_OPERATORS: OperatorTable =
    OperatorTable::new("java", C_BINARY, C_UNARY, C_ASSIGNMENT, JVM_CALL_KINDS);

/// Emits IR as Java source code.
pub struct JavaWriter;

impl Writer for JavaWriter {
    fn language(&self) -> &'static str {
        "java"
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn emit_file(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        debug!(file = %file.name, declarations = file.declarations.len(), "generating java");
        self.file(file)
    }
}

fn visibility(visibility: &Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Public { .. } | Visibility::Open { .. } => Some("public"),
        Visibility::Protected { .. } => Some("protected"),
        Visibility::Private { .. } => Some("private"),
        _ => None,
    }
}

fn primitive(primitive: PrimitiveType, boxed: bool) -> &'static str {
    match (primitive, boxed) {
        (PrimitiveType::Void, false) => "void",
        (PrimitiveType::Void, true) => "Void",
        (PrimitiveType::Boolean, false) => "boolean",
        (PrimitiveType::Boolean, true) => "Boolean",
        (PrimitiveType::Byte, false) => "byte",
        (PrimitiveType::Byte, true) => "Byte",
        (PrimitiveType::Short, false) => "short",
        (PrimitiveType::Short, true) => "Short",
        (PrimitiveType::Int, false) => "int",
        (PrimitiveType::Int, true) => "Integer",
        (PrimitiveType::Long, false) => "long",
        (PrimitiveType::Long, true) => "Long",
        (PrimitiveType::Char, false) => "char",
        (PrimitiveType::Char, true) => "Character",
        (PrimitiveType::Float, false) => "float",
        (PrimitiveType::Float, true) => "Float",
        (PrimitiveType::Double, false) => "double",
        (PrimitiveType::Double, true) => "Double",
    }
}

impl JavaWriter {
    /// Type as written in Java. Type arguments and nullable primitives
    /// are boxed.
    fn java_type(&self, ty: &Type, boxed: bool) -> Result<String, GenerateError> {
        match ty {
            Type::Primitive(p) => Ok(primitive(p.primitive_type, boxed || p.is_nullable).to_string()),
            Type::Reference(r) => {
                let name = written_name(
                    r.referenced_class_qualified_name
                        .as_deref()
                        .unwrap_or(&r.referenced_class_simple_name),
                    &r.meta.language_properties,
                );
                if r.type_parameters.is_empty() {
                    return Ok(name.to_string());
                }
                let arguments = r
                    .type_parameters
                    .iter()
                    .map(|t| self.java_type(t, true))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{name}<{}>", arguments.join(", ")))
            }
            Type::Array(a) => Ok(format!("{}[]", self.java_type(&a.element_type, false)?)),
            Type::Generic(g) => Ok(g.name.clone()),
            Type::Function(_) => Err(GenerateError::unsupported(
                ty.display_name(),
                "Java has no function types",
            )),
        }
    }

    /// Initializer or update clause of a `for` header.
    fn for_clause(&self, statement: &Statement) -> Result<String, GenerateError> {
        let clauses = statement
            .as_statements()
            .iter()
            .map(|s| match s {
                Statement::Expression(e) => self.expression(&e.expression),
                Statement::VariableDeclaration(v) => self.declarators(v),
                other => Err(GenerateError::unsupported(
                    "for",
                    format!("{} statement in a for header", other.kind_name()),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clauses.join(", "))
    }

    /// `[final] T a = x, b = x`, without the terminator.
    fn declarators(&self, declaration: &VariableDeclarationStatement) -> Result<String, GenerateError> {
        let initializer = match &declaration.initializer {
            Some(initializer) => format!(" = {}", self.initializer(initializer)?),
            None => String::new(),
        };
        let names: Vec<_> = std::iter::once(&declaration.name)
            .chain(&declaration.additional_names)
            .map(|name| format!("{name}{initializer}"))
            .collect();
        let ty = self.type_name(&declaration.ir_type)?;
        let modifier = if declaration.is_mutable { "" } else { "final " };
        Ok(format!("{modifier}{ty} {}", names.join(", ")))
    }

    fn field(&self, field: &Field) -> Result<Vec<Emit>, GenerateError> {
        let properties = &field.meta.language_properties;
        let mut words: Vec<&str> = visibility(&field.visibility).into_iter().collect();
        words.extend(JAVA_MODIFIERS.flag(properties.flag(keys::STATIC), keys::STATIC));
        words.extend(JAVA_MODIFIERS.flag(!field.is_mutable, keys::FINAL));
        words.extend(JAVA_MODIFIERS.keywords(properties, &[keys::STATIC, keys::FINAL]));
        let ty = self.type_name(&field.ir_type)?;
        let initializer = match &field.initializer {
            Some(initializer) => format!(" = {}", self.initializer(initializer)?),
            None => String::new(),
        };
        let mut emits = self.annotations(&field.meta)?;
        words.push("");
        emits.extend(Emit::line(format!("{}{ty} {}{initializer};", words.join(" "), field.name)));
        Ok(emits)
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
        if entries.is_empty() && has_members {
            emits.extend(Emit::line(";"));
        }
        Ok(emits)
    }

    fn method(&self, method: &Method, owner: &Class) -> Result<Vec<Emit>, GenerateError> {
        let in_interface = owner.kind == ClassKind::Interface;
        let properties = &method.meta.language_properties;
        let mut emits = Vec::new();
        if method.is_override {
            emits.extend(Emit::line("@Override"));
        }
        emits.extend(self.annotations(&method.meta)?);

        let mut words: Vec<&str> = visibility(&method.visibility).into_iter().collect();
        words.extend(JAVA_MODIFIERS.flag(method.is_abstract && !in_interface, keys::ABSTRACT));
        words.extend(JAVA_MODIFIERS.flag(method.is_static, keys::STATIC));
        let default = in_interface && method.body.is_some() && !method.is_static;
        words.extend(JAVA_MODIFIERS.flag(default, keys::DEFAULT));
        let mut except = STRUCTURAL_FLAGS.to_vec();
        except.push(keys::DEFAULT);
        words.extend(JAVA_MODIFIERS.keywords(properties, &except));
        let type_parameters = self.type_parameters(&method.type_parameters)?;
        if !type_parameters.is_empty() {
            words.push(&type_parameters);
        }
        let return_type = self.type_name(&method.return_type)?;
        words.push(&return_type);
        let signature = format!(
            "{} {}({})",
            words.join(" "),
            method.name,
            self.parameters(&method.parameters)?
        );

        match &method.body {
            None => emits.extend(Emit::line(format!("{signature};"))),
            Some(body) => emits.push(Emit::block(
                format!("{signature} {{"),
                self.statements(&body.statements)?,
                "}",
            )),
        }
        Ok(emits)
    }

    fn constructor(&self, constructor: &Constructor, owner: &Class) -> Result<Vec<Emit>, GenerateError> {
        let mut emits = self.annotations(&constructor.meta)?;
        let mut words: Vec<&str> = visibility(&constructor.visibility).into_iter().collect();
        let type_parameters = self.type_parameters(&constructor.type_parameters)?;
        if !type_parameters.is_empty() {
            words.push(&type_parameters);
        }
        words.push(&owner.simple_name);
        let mut body = Vec::new();
        if let Some(call) = &constructor.other_constructor_call {
            body.extend(Emit::line(format!("{};", self.method_call(call)?)));
        }
        body.extend(self.callable_body(constructor.body.as_ref())?);
        emits.push(Emit::block(
            format!("{}({}) {{", words.join(" "), self.parameters(&constructor.parameters)?),
            body,
            "}",
        ));
        Ok(emits)
    }

    fn class_initializer(&self, initializer: &ClassInitializer) -> Result<Vec<Emit>, GenerateError> {
        let header = match initializer.kind {
            InitializerKind::Static => "static {",
            InitializerKind::Instance => "{",
        };
        Ok(vec![Emit::block(
            header,
            self.callable_body(initializer.body.as_ref())?,
            "}",
        )])
    }

    fn class_header(&self, class: &Class) -> Result<String, GenerateError> {
        let keyword = match &class.kind {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
            other => {
                return Err(GenerateError::unsupported(
                    class.display_name(),
                    format!("{} declarations have no Java form", other.name()),
                ));
            }
        };
        let interface = matches!(class.kind, ClassKind::Interface | ClassKind::Annotation);
        let properties = &class.meta.language_properties;

        let mut words: Vec<&str> = visibility(&class.visibility).into_iter().collect();
        let except: &[&str] = if interface { &[keys::ABSTRACT] } else { &[] };
        words.extend(JAVA_MODIFIERS.keywords(properties, except));
        words.push(keyword);
        let mut header = format!(
            "{} {}{}",
            words.join(" "),
            class.simple_name,
            self.type_parameters(&class.type_parameters)?
        );

        if interface {
            let supers = class
                .super_classes
                .iter()
                .map(|s| self.super_type(s))
                .collect::<Result<Vec<_>, _>>()?;
            if !supers.is_empty() {
                header.push_str(&format!(" extends {}", supers.join(", ")));
            }
        } else {
            if let Some(base) = superclass(class)? {
                header.push_str(&format!(" extends {}", self.super_type(base)?));
            }
            let interfaces = class
                .super_classes
                .iter()
                .filter(|s| s.kind != ClassKind::Class)
                .map(|s| self.super_type(s))
                .collect::<Result<Vec<_>, _>>()?;
            if !interfaces.is_empty() {
                header.push_str(&format!(" implements {}", interfaces.join(", ")));
            }
        }
        header.push_str(" {");
        Ok(header)
    }
}

impl Dialect for JavaWriter {
    fn target(&self) -> &'static str {
        "java"
    }

    fn operators(&self) -> &'static OperatorTable {
        &JAVA_OPERATORS
    }

    fn modifiers(&self) -> &'static ModifierTable {
        &JAVA_MODIFIERS
    }

    fn statement_end(&self) -> &'static str {
        ";"
    }

    fn type_name(&self, ty: &Type) -> Result<String, GenerateError> {
        self.java_type(ty, false)
    }

    fn object_creation(&self, class_name: &str, arguments: &str) -> String {
        format!("new {class_name}({arguments})")
    }

    fn explicit_type_arguments(&self, name: &str, types: &str) -> String {
        format!("<{types}>{name}")
    }

    fn cast(&self, expression: &str, target: &str) -> String {
        format!("({target}) {expression}")
    }

    fn type_check(&self, expression: &str, checked: &str) -> String {
        format!("{expression} instanceof {checked}")
    }

    fn lambda(&self, lambda: &LambdaExpression) -> Result<String, GenerateError> {
        let names: Vec<_> = lambda.parameters.iter().map(|p| p.name.as_str()).collect();
        let parameters = match names.as_slice() {
            [single] => single.to_string(),
            names => format!("({})", names.join(", ")),
        };
        let statements = lambda.body.as_statements();
        if let Some(expression) = single_return(&lambda.body) {
            return Ok(format!("{parameters} -> {}", self.expression(expression)?));
        }
        if let [Statement::Expression(only)] = statements {
            return Ok(format!("{parameters} -> {}", self.expression(&only.expression)?));
        }
        self.inline_block(&format!("{parameters} -> {{"), &lambda.body)
    }

    fn scope_header(&self) -> &'static str {
        "{"
    }

    fn variable_declaration(
        &self,
        declaration: &VariableDeclarationStatement,
    ) -> Result<Vec<Emit>, GenerateError> {
        Ok(Emit::line(format!("{};", self.declarators(declaration)?)))
    }

    fn for_statement(&self, statement: &ForStatement) -> Result<Vec<Emit>, GenerateError> {
        let initializer = match &statement.initializer {
            Some(initializer) => self.for_clause(initializer)?,
            None => String::new(),
        };
        let condition = match &statement.condition {
            Some(condition) => format!(" {}", self.expression(condition)?),
            None => String::new(),
        };
        let update = match &statement.update {
            Some(update) => format!(" {}", self.for_clause(update)?),
            None => String::new(),
        };
        Ok(vec![Emit::block(
            format!("for ({initializer};{condition};{update}) {{"),
            self.body(&statement.body)?,
            "}",
        )])
    }

    fn switch(&self, statement: &SwitchStatement) -> Result<Vec<Emit>, GenerateError> {
        let mut cases = Vec::new();
        for case in &statement.cases {
            let labels = if case.is_default() {
                vec!["default:".to_string()]
            } else {
                case.match_expressions
                    .iter()
                    .map(|e| Ok(format!("case {}:", self.expression(e)?)))
                    .collect::<Result<Vec<_>, GenerateError>>()?
            };
            let body = match &case.body {
                Some(body) => self.body(body)?,
                None => Vec::new(),
            };
            if let Some((last, rest)) = labels.split_last() {
                for label in rest {
                    cases.extend(Emit::line(label));
                }
                cases.push(Emit::block(last, body, ""));
            }
        }
        Ok(vec![Emit::block(
            format!("switch {} {{", self.condition(&statement.expression)?),
            cases,
            "}",
        )])
    }

    fn catch_parameter(&self, clause: &CatchClause) -> Result<String, GenerateError> {
        Ok(format!(
            "{} {}",
            self.type_name(&clause.exception_type.with_nullable(false))?,
            clause.exception_name.as_deref().unwrap_or("e")
        ))
    }

    fn type_parameter(&self, parameter: &TypeParameter) -> Result<String, GenerateError> {
        if parameter.extends_list.is_empty() {
            return Ok(parameter.name.clone());
        }
        let bounds = parameter
            .extends_list
            .iter()
            .map(|t| self.type_name(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{} extends {}", parameter.name, bounds.join(" & ")))
    }

    /// Default values have no Java spelling and are dropped.
    fn parameter(&self, parameter: &Parameter) -> Result<String, GenerateError> {
        let mut text = String::new();
        for annotation in &parameter.meta.annotations {
            text.push_str(&self.annotation(annotation)?);
            text.push(' ');
        }
        text.push_str(&format!("{} {}", self.type_name(&parameter.ir_type)?, parameter.name));
        Ok(text)
    }

    fn class(&self, class: &Class) -> Result<Vec<Emit>, GenerateError> {
        let header = self.class_header(class)?;
        let (entries, fields): (Vec<&Field>, Vec<&Field>) =
            class.fields.iter().partition(|f| is_enum_entry(f));
        let has_members = !fields.is_empty()
            || !class.methods.is_empty()
            || !class.initializers.is_empty()
            || !class.nested_classes.is_empty();

        let mut groups = Vec::new();
        if class.kind == ClassKind::Enum {
            groups.push(self.enum_entries(&entries, has_members)?);
        }
        let mut field_group = Vec::new();
        for field in fields {
            field_group.extend(self.field(field)?);
        }
        groups.push(field_group);
        for initializer in &class.initializers {
            groups.push(self.class_initializer(initializer)?);
        }
        for callable in &class.methods {
            groups.push(match callable {
                Callable::Method(method) => self.method(method, class)?,
                Callable::Constructor(constructor) => self.constructor(constructor, class)?,
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
        Err(GenerateError::unsupported(
            &field.name,
            "Java fields must be declared inside a class",
        ))
    }

    fn top_level_method(&self, method: &Method) -> Result<Vec<Emit>, GenerateError> {
        Err(GenerateError::unsupported(
            &method.name,
            "Java methods must be declared inside a class",
        ))
    }

    fn implicit_packages(&self) -> Option<&'static [&'static str]> {
        Some(&["java.lang"])
    }

    fn file_header(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
        let package = match file.package() {
            Some(package) => Emit::line(format!("package {package};")),
            None => Vec::new(),
        };
        let mut imports = Vec::new();
        for import in &file.imports {
            let modifier = if import.meta.language_properties.flag(keys::STATIC) {
                "static "
            } else {
                ""
            };
            let suffix = if import.is_wildcard { ".*" } else { "" };
            imports.extend(Emit::line(format!("import {modifier}{}{suffix};", import.path)));
        }
        Ok(separated(vec![package, imports]))
    }
}
