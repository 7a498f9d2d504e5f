//! Tree-sitter based Java reader.
//!
//! Conventions the back ends rely on:
//! - `this` and `super` are literal expressions;
//! - a dotted name is an identifier chain, and member access on a computed
//!   receiver (`make().x`) is a property access;
//! - a name that resolves to a class becomes a type reference identifier;
//! - `this(...)`/`super(...)` in a constructor moves to its
//!   `other_constructor_call`;
//! - a field or local is mutable unless declared `final`;
//! - enum constants are static fields flagged `enumEntry`.

use crate::input::{assignment_operator, binary_operator, unary_operator};
use crate::scope::{
    ConversionScope, child_of_kind, has_token, member_access, named_children, super_class_of,
};
use crate::tables::STRUCTURAL_FLAGS;
use crate::traits::{ReadError, Reader, ResolutionContext, SyntacticResolver};
use crossgen_ir::builders::*;
use crossgen_ir::properties::keys;
use crossgen_ir::*;
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

const LANGUAGE: &str = "java";

/// Classes every Java file sees without importing them.
const JAVA_LANG: &[&str] = &[
    "Object",
    "String",
    "CharSequence",
    "StringBuilder",
    "Boolean",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Character",
    "Float",
    "Double",
    "Number",
    "Void",
    "Math",
    "System",
    "Thread",
    "Runnable",
    "Iterable",
    "Comparable",
    "AutoCloseable",
    "Cloneable",
    "Enum",
    "Record",
    "Class",
    "Throwable",
    "Exception",
    "Error",
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "NullPointerException",
    "UnsupportedOperationException",
    "IndexOutOfBoundsException",
    "Override",
    "Deprecated",
    "FunctionalInterface",
    "SuppressWarnings",
];

/// Static instance of the Java reader for registry.
pub static JAVA_READER: JavaReader = JavaReader;

/// Java reader using tree-sitter.
pub struct JavaReader;

impl Reader for JavaReader {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn read(
        &self,
        file_name: &str,
        source: &str,
        context: &dyn ResolutionContext,
    ) -> Result<File, ReadError> {
        read_java(file_name, source, context)
    }
}

/// Parse Java source into the IR.
pub fn read_java(
    file_name: &str,
    source: &str,
    context: &dyn ResolutionContext,
) -> Result<File, ReadError> {
    debug!(file = %file_name, language = LANGUAGE, "reading file");
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_java::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ReadError::Parse(format!("{file_name}: syntax error in source")));
    }

    let (resolver, classes) = prescan(root, source);
    let mut scope = ConversionScope::new(LANGUAGE, file_name, source, context, resolver);
    for (simple, qualified) in &classes {
        scope.register_class(simple, qualified);
    }
    let mut ctx = ReadContext {
        scope,
        generics: Vec::new(),
    };
    let file = ctx.read_file(file_name, root)?;
    debug!(
        file = %file_name,
        declarations = file.declarations.len(),
        "converted file"
    );
    Ok(file)
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "annotation_type_declaration"
            | "record_declaration"
    )
}

/// Members of a class-like body. Enum bodies keep their constants first,
/// followed by the declarations after the `;`.
fn body_members(body: Node) -> Vec<Node> {
    let mut members = Vec::new();
    for child in named_children(body) {
        if child.kind() == "enum_body_declarations" {
            members.extend(named_children(child));
        } else {
            members.push(child);
        }
    }
    members
}

/// Collect what the file declares about itself before converting anything.
fn prescan(root: Node, source: &str) -> (SyntacticResolver, Vec<(String, String)>) {
    let package = named_children(root)
        .into_iter()
        .find(|c| c.kind() == "package_declaration")
        .and_then(|p| {
            named_children(p)
                .into_iter()
                .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
        })
        .map(|name| text(name, source));
    let mut resolver = SyntacticResolver::new(package);
    let mut classes = Vec::new();

    for child in named_children(root) {
        match child.kind() {
            "import_declaration" => {
                let Some(path) = named_children(child)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
                else {
                    continue;
                };
                let path = text(path, source);
                if child_of_kind(child, "asterisk").is_none() && !has_token(child, "static") {
                    resolver.add_import(path);
                }
            }
            kind if is_type_declaration(kind) => {
                collect_declarations(child, None, source, &mut resolver, &mut classes);
            }
            _ => {}
        }
    }
    for name in JAVA_LANG {
        resolver.add_class(name, &format!("java.lang.{name}"));
    }
    (resolver, classes)
}

fn collect_declarations(
    node: Node,
    outer: Option<&str>,
    source: &str,
    resolver: &mut SyntacticResolver,
    classes: &mut Vec<(String, String)>,
) {
    let Some(name) = node.child_by_field_name("name").map(|n| text(n, source)) else {
        return;
    };
    let qualified = match outer {
        Some(outer) => format!("{outer}.{name}"),
        None => resolver.qualify(name),
    };
    resolver.add_class(name, &qualified);
    classes.push((name.to_string(), qualified.clone()));

    if let Some(components) = node.child_by_field_name("parameters") {
        for component in named_children(components) {
            if let Some(name) = component.child_by_field_name("name") {
                resolver.add_field(text(name, source));
            }
        }
    }
    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    for member in body_members(body) {
        match member.kind() {
            "field_declaration" | "constant_declaration" => {
                let mut cursor = member.walk();
                for declarator in member.children_by_field_name("declarator", &mut cursor) {
                    if let Some(name) = declarator.child_by_field_name("name") {
                        resolver.add_field(text(name, source));
                    }
                }
            }
            "enum_constant" => {
                if let Some(name) = member.child_by_field_name("name") {
                    resolver.add_field(text(name, source));
                }
            }
            kind if is_type_declaration(kind) => {
                collect_declarations(member, Some(&qualified), source, resolver, classes);
            }
            _ => {}
        }
    }
}

fn modifier_key(token: &str) -> Option<&'static str> {
    match token {
        "abstract" => Some(keys::ABSTRACT),
        "static" => Some(keys::STATIC),
        "final" => Some(keys::FINAL),
        "default" => Some(keys::DEFAULT),
        "sealed" => Some(keys::SEALED),
        "synchronized" => Some(keys::SYNCHRONIZED),
        "transient" => Some(keys::TRANSIENT),
        "volatile" => Some(keys::VOLATILE),
        "native" => Some(keys::NATIVE),
        _ => None,
    }
}

fn primitive_type(name: &str) -> Option<PrimitiveType> {
    match name {
        "void" => Some(PrimitiveType::Void),
        "boolean" => Some(PrimitiveType::Boolean),
        "byte" => Some(PrimitiveType::Byte),
        "short" => Some(PrimitiveType::Short),
        "int" => Some(PrimitiveType::Int),
        "long" => Some(PrimitiveType::Long),
        "char" => Some(PrimitiveType::Char),
        "float" => Some(PrimitiveType::Float),
        "double" => Some(PrimitiveType::Double),
        _ => None,
    }
}

fn primitive(primitive: PrimitiveType) -> Type {
    PrimitiveTypeBuilder::new(primitive).nullable(false).build()
}

/// Members without a visibility keyword: public inside interfaces,
/// package-private elsewhere.
fn default_visibility(in_interface: bool) -> Visibility {
    if in_interface {
        Visibility::public()
    } else {
        Visibility::package_private()
    }
}

/// Wrap `ty` in one array level per `[]` of a `dimensions` node.
fn with_dimensions(ty: Type, dimensions: Option<Node>) -> Type {
    let Some(dimensions) = dimensions else {
        return ty;
    };
    let mut cursor = dimensions.walk();
    let depth = dimensions
        .children(&mut cursor)
        .filter(|c| c.kind() == "[")
        .count();
    (0..depth).fold(ty, |element, _| ArrayTypeBuilder::new(element).build())
}

fn compact(name: &str) -> String {
    name.split_whitespace().collect()
}

fn expression_statement(expression: Expression) -> Statement {
    ExpressionStatementBuilder::new(expression).build()
}

#[derive(Default)]
struct Modifiers {
    visibility: Option<Visibility>,
    flags: Vec<&'static str>,
    annotations: Vec<Annotation>,
    is_override: bool,
}

impl Modifiers {
    fn has(&self, key: &str) -> bool {
        self.flags.contains(&key)
    }

    fn visibility_or(&self, default: Visibility) -> Visibility {
        self.visibility.clone().unwrap_or(default)
    }

    /// Flags that are not already expressed as a structural field.
    fn extra_flags<'m>(&'m self, except: &'m [&str]) -> impl Iterator<Item = &'static str> + 'm {
        self.flags
            .iter()
            .copied()
            .filter(move |key| !STRUCTURAL_FLAGS.contains(key) && !except.contains(key))
    }
}

struct ReadContext<'a> {
    scope: ConversionScope<'a>,
    /// Type parameter names in scope, innermost last.
    generics: Vec<Vec<String>>,
}

impl<'a> ReadContext<'a> {
    fn field_text(&self, node: Node, field: &str) -> Result<&'a str, ReadError> {
        node.child_by_field_name(field)
            .map(|n| self.scope.text(n))
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("{} with a {field}", node.kind()),
                got: self.scope.text(node).to_string(),
            })
    }

    fn required<'t>(&self, node: Node<'t>, field: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(field)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("{} with a {field}", node.kind()),
                got: self.scope.text(node).to_string(),
            })
    }

    fn is_generic(&self, name: &str) -> bool {
        self.generics.iter().flatten().any(|g| g == name)
    }

    fn read_file(&mut self, name: &str, root: Node) -> Result<File, ReadError> {
        let mut builder = FileBuilder::new(name);
        if let Some(package) = self.scope.resolver().package() {
            builder = builder.property(keys::JVM_PACKAGE, package);
        }
        for child in named_children(root) {
            match child.kind() {
                "import_declaration" => builder = builder.import(self.read_import(child)?),
                kind if is_type_declaration(kind) => {
                    builder = builder.class(self.read_class(child, false)?);
                }
                _ => {}
            }
        }
        Ok(builder.build()?)
    }

    fn read_import(&mut self, node: Node) -> Result<Import, ReadError> {
        let path = named_children(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: "import path".into(),
                got: self.scope.text(node).to_string(),
            })?;
        let mut builder = ImportBuilder::new(self.scope.text(path))
            .wildcard(child_of_kind(node, "asterisk").is_some())
            .location(self.scope.location(node));
        if has_token(node, "static") {
            builder = builder.property(keys::STATIC, true);
        }
        Ok(builder.build()?)
    }

    fn read_modifiers(&mut self, owner: Node) -> Result<Modifiers, ReadError> {
        let mut modifiers = Modifiers::default();
        let Some(node) = child_of_kind(owner, "modifiers") else {
            return Ok(modifiers);
        };
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "annotation" | "marker_annotation" => {
                    let annotation = self.read_annotation(child)?;
                    if annotation.name == "Override" {
                        modifiers.is_override = true;
                    } else {
                        modifiers.annotations.push(annotation);
                    }
                }
                token @ ("public" | "protected" | "private") => {
                    modifiers.visibility = Some(Visibility::from_keyword(LANGUAGE, token));
                }
                token => modifiers.flags.extend(modifier_key(token)),
            }
        }
        Ok(modifiers)
    }

    fn read_annotation(&mut self, node: Node) -> Result<Annotation, ReadError> {
        let mut builder = AnnotationBuilder::new(self.field_text(node, "name")?);
        if let Some(arguments) = node.child_by_field_name("arguments") {
            for argument in named_children(arguments) {
                if argument.kind() == "element_value_pair" {
                    let key = self.field_text(argument, "key")?;
                    let value = self.read_expression(self.required(argument, "value")?)?;
                    builder = builder.parameter(key, value);
                } else {
                    builder = builder.parameter("value", self.read_expression(argument)?);
                }
            }
        }
        Ok(builder.build()?)
    }

    // Declarations

    fn read_class(&mut self, node: Node, enclosing_interface: bool) -> Result<Class, ReadError> {
        let name = self.field_text(node, "name")?;
        let nested = self.scope.current_class().map(str::to_string);
        let qualified = match &nested {
            Some(outer) => format!("{outer}.{name}"),
            None => self.scope.resolver().qualify(name),
        };
        let kind = match node.kind() {
            "interface_declaration" => ClassKind::Interface,
            "enum_declaration" => ClassKind::Enum,
            "annotation_type_declaration" => ClassKind::Annotation,
            _ => ClassKind::Class,
        };
        let in_interface = matches!(kind, ClassKind::Interface | ClassKind::Annotation);
        let modifiers = self.read_modifiers(node)?;

        let mut builder = ClassBuilder::new(name)
            .qualified_name(qualified.as_str())
            .kind(kind)
            .visibility(modifiers.visibility_or(default_visibility(enclosing_interface)))
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for key in &modifiers.flags {
            builder = builder.property(*key, true);
        }
        let is_inner = nested.is_some()
            && node.kind() == "class_declaration"
            && !enclosing_interface
            && !modifiers.has(keys::STATIC);
        if is_inner {
            builder = builder.property(keys::INNER, true);
        }

        self.scope.enter_class(&qualified);
        let type_parameters = self.read_type_parameters(node.child_by_field_name("type_parameters"))?;
        self.generics
            .push(type_parameters.iter().map(|p| p.name.clone()).collect());
        for parameter in type_parameters {
            builder = builder.type_parameter(parameter);
        }

        if let Some(superclass) = node.child_by_field_name("superclass") {
            for ty in named_children(superclass) {
                builder = builder.super_class(self.read_super(ty, ClassKind::Class)?);
            }
        }
        let interface_lists = [
            node.child_by_field_name("interfaces"),
            child_of_kind(node, "extends_interfaces"),
        ];
        for list in interface_lists.into_iter().flatten() {
            for types in named_children(list) {
                for ty in named_children(types) {
                    builder = builder.super_class(self.read_super(ty, ClassKind::Interface)?);
                }
            }
        }

        if node.kind() == "record_declaration" {
            builder = self.read_record_components(builder, node, &qualified)?;
        }
        if let Some(body) = node.child_by_field_name("body") {
            for member in body_members(body) {
                builder = self.read_member(builder, member, in_interface, &qualified)?;
            }
        }

        self.generics.pop();
        self.scope.exit_class();
        Ok(builder.build()?)
    }

    fn read_super(&mut self, node: Node, kind: ClassKind) -> Result<SuperClass, ReadError> {
        let ty = self.read_type(node);
        Ok(super_class_of(&ty, kind)
            .location(self.scope.location(node))
            .build()?)
    }

    /// A record's components become private final fields assigned by a
    /// primary constructor.
    fn read_record_components(
        &mut self,
        mut builder: ClassBuilder,
        node: Node,
        qualified: &str,
    ) -> Result<ClassBuilder, ReadError> {
        builder = builder.property(keys::DATA, true);
        self.scope.push_locals();
        let parameters = self.read_parameters(node.child_by_field_name("parameters"))?;
        self.scope.pop_locals();

        let mut body = MethodBodyBuilder::new();
        for parameter in &parameters {
            builder = builder.field(
                FieldBuilder::new(parameter.name.as_str(), parameter.ir_type.clone())
                    .visibility(Visibility::private())
                    .mutable(false)
                    .build()?,
            );
            let target = IdentifierBuilder::new(LiteralBuilder::new(parameter.name.as_str()).build())
                .qualifier(LiteralBuilder::new("this").build())
                .build();
            let value = IdentifierBuilder::simple(parameter.name.as_str()).build();
            body = body.statement(expression_statement(AssignmentBuilder::new(target, value).build()));
        }
        let name = self.field_text(node, "name")?;
        let constructor = ConstructorBuilder::new(name, self.scope.class_type(qualified, false))
            .visibility(Visibility::public())
            .parameters(parameters)
            .body(body.build())
            .property(keys::PRIMARY, true)
            .build()?;
        Ok(builder.constructor(constructor))
    }

    fn read_member(
        &mut self,
        builder: ClassBuilder,
        member: Node,
        in_interface: bool,
        owner: &str,
    ) -> Result<ClassBuilder, ReadError> {
        Ok(match member.kind() {
            "field_declaration" | "constant_declaration" => {
                builder.fields(self.read_fields(member, in_interface)?)
            }
            "method_declaration" | "annotation_type_element_declaration" => {
                builder.method(self.read_method(member, in_interface)?)
            }
            "constructor_declaration" => builder.constructor(self.read_constructor(member, owner)?),
            "enum_constant" => builder.field(self.read_enum_constant(member, owner)?),
            "static_initializer" => {
                builder.initializer(self.read_initializer(member, InitializerKind::Static)?)
            }
            "block" => builder.initializer(self.read_initializer(member, InitializerKind::Instance)?),
            kind if is_type_declaration(kind) => {
                builder.nested_class(self.read_class(member, in_interface)?)
            }
            kind => {
                trace!(language = LANGUAGE, kind, "skipped member");
                builder
            }
        })
    }

    fn read_fields(&mut self, node: Node, in_interface: bool) -> Result<Vec<Field>, ReadError> {
        let modifiers = self.read_modifiers(node)?;
        let base = self.read_type(self.required(node, "type")?);
        let visibility = modifiers.visibility_or(default_visibility(in_interface));
        let is_static = in_interface || modifiers.has(keys::STATIC);
        let is_mutable = !in_interface && !modifiers.has(keys::FINAL);

        let mut cursor = node.walk();
        let declarators: Vec<Node> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        let mut fields = Vec::with_capacity(declarators.len());
        for declarator in declarators {
            let name = self.field_text(declarator, "name")?;
            let ty = with_dimensions(base.clone(), declarator.child_by_field_name("dimensions"));
            let mut builder = FieldBuilder::new(name, ty)
                .visibility(visibility.clone())
                .mutable(is_mutable)
                .annotations(modifiers.annotations.clone())
                .location(self.scope.location(declarator));
            if is_static {
                builder = builder.property(keys::STATIC, true);
            }
            for key in modifiers.extra_flags(&[keys::FINAL]) {
                builder = builder.property(key, true);
            }
            if let Some(value) = declarator.child_by_field_name("value") {
                builder = builder.initializer(expression_statement(self.read_expression(value)?));
            }
            fields.push(builder.build()?);
        }
        Ok(fields)
    }

    fn read_enum_constant(&mut self, node: Node, owner: &str) -> Result<Field, ReadError> {
        let name = self.field_text(node, "name")?;
        let modifiers = self.read_modifiers(node)?;
        let mut builder = FieldBuilder::new(name, self.scope.class_type(owner, false))
            .visibility(Visibility::public())
            .mutable(false)
            .property(keys::ENUM_ENTRY, true)
            .property(keys::STATIC, true)
            .annotations(modifiers.annotations)
            .location(self.scope.location(node));
        if let Some(arguments) = node.child_by_field_name("arguments") {
            let creation = ObjectCreationBuilder::new(owner)
                .arguments(self.read_arguments(arguments)?)
                .build()?;
            builder = builder.initializer(expression_statement(creation));
        }
        if node.child_by_field_name("body").is_some() {
            trace!(language = LANGUAGE, constant = name, "dropped enum constant body");
        }
        Ok(builder.build()?)
    }

    fn read_method(&mut self, node: Node, in_interface: bool) -> Result<Method, ReadError> {
        let name = self.field_text(node, "name")?;
        let modifiers = self.read_modifiers(node)?;
        let type_parameters = self.read_type_parameters(node.child_by_field_name("type_parameters"))?;
        self.generics
            .push(type_parameters.iter().map(|p| p.name.clone()).collect());

        let return_type = with_dimensions(
            self.read_type(self.required(node, "type")?),
            node.child_by_field_name("dimensions"),
        );
        self.scope.push_locals();
        let parameters = self.read_parameters(node.child_by_field_name("parameters"))?;
        let body = match node.child_by_field_name("body") {
            Some(body) => Some(self.read_body(body)?),
            None => None,
        };
        self.scope.pop_locals();
        self.generics.pop();

        let is_static = modifiers.has(keys::STATIC);
        let is_abstract = modifiers.has(keys::ABSTRACT) || (in_interface && body.is_none() && !is_static);
        let mut builder = MethodBuilder::new(name, return_type)
            .visibility(modifiers.visibility_or(default_visibility(in_interface)))
            .is_abstract(is_abstract)
            .is_static(is_static)
            .is_override(modifiers.is_override)
            .parameters(parameters)
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for parameter in type_parameters {
            builder = builder.type_parameter(parameter);
        }
        for key in modifiers.extra_flags(&[]) {
            builder = builder.property(key, true);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder.build()?)
    }

    fn read_constructor(&mut self, node: Node, owner: &str) -> Result<Constructor, ReadError> {
        let name = self.field_text(node, "name")?;
        let modifiers = self.read_modifiers(node)?;
        let type_parameters = self.read_type_parameters(node.child_by_field_name("type_parameters"))?;

        self.scope.push_locals();
        let parameters = self.read_parameters(node.child_by_field_name("parameters"))?;
        let mut builder = ConstructorBuilder::new(name, self.scope.class_type(owner, false))
            .visibility(modifiers.visibility_or(Visibility::package_private()))
            .parameters(parameters)
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for parameter in type_parameters {
            builder = builder.type_parameter(parameter);
        }
        for key in modifiers.extra_flags(&[]) {
            builder = builder.property(key, true);
        }
        if let Some(body) = node.child_by_field_name("body") {
            let mut statements = Vec::new();
            for child in named_children(body) {
                let delegates = child.kind() == "explicit_constructor_invocation"
                    && child.child_by_field_name("object").is_none();
                if delegates {
                    builder = builder.other_constructor_call(self.read_delegation(child)?);
                } else {
                    self.push_statement(&mut statements, child)?;
                }
            }
            builder = builder.body(MethodBodyBuilder::new().statements(statements).build());
        }
        self.scope.pop_locals();
        Ok(builder.build()?)
    }

    fn read_delegation(&mut self, node: Node) -> Result<MethodCallExpression, ReadError> {
        let keyword = node
            .child_by_field_name("constructor")
            .map(|n| n.kind())
            .unwrap_or("this");
        let kind = if keyword == "super" {
            MethodCallKind::Super
        } else {
            MethodCallKind::This
        };
        Ok(MethodCallBuilder::new(keyword)
            .kind(kind)
            .arguments(self.read_arguments(self.required(node, "arguments")?)?)
            .build_call()?)
    }

    fn read_initializer(
        &mut self,
        node: Node,
        kind: InitializerKind,
    ) -> Result<ClassInitializer, ReadError> {
        let block = if node.kind() == "block" {
            Some(node)
        } else {
            child_of_kind(node, "block")
        };
        let mut builder = ClassInitializerBuilder::new(kind).location(self.scope.location(node));
        if let Some(block) = block {
            builder = builder.body(self.read_body(block)?);
        }
        Ok(builder.build())
    }

    fn read_type_parameters(&mut self, node: Option<Node>) -> Result<Vec<TypeParameter>, ReadError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let declared: Vec<Node> = named_children(node);
        // Every name is in scope for every bound: `<T extends Comparable<T>>`.
        let names: Vec<String> = declared
            .iter()
            .filter_map(|p| child_of_kind(*p, "type_identifier"))
            .map(|n| self.scope.text(n).to_string())
            .collect();
        self.generics.push(names);
        let mut parameters = Vec::with_capacity(declared.len());
        for parameter in declared {
            let Some(name) = child_of_kind(parameter, "type_identifier") else {
                continue;
            };
            let mut builder = TypeParameterBuilder::new(self.scope.text(name));
            if let Some(bound) = child_of_kind(parameter, "type_bound") {
                for ty in named_children(bound) {
                    builder = builder.extends(self.read_type(ty));
                }
            }
            parameters.push(builder.build()?);
        }
        self.generics.pop();
        Ok(parameters)
    }

    /// Parameters are declared as locals of the current frame.
    fn read_parameters(&mut self, node: Option<Node>) -> Result<Vec<Parameter>, ReadError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let mut parameters = Vec::new();
        for child in named_children(node) {
            let (name, ty) = match child.kind() {
                "formal_parameter" => {
                    let ty = with_dimensions(
                        self.read_type(self.required(child, "type")?),
                        child.child_by_field_name("dimensions"),
                    );
                    (self.field_text(child, "name")?, ty)
                }
                // `T... rest`
                "spread_parameter" => {
                    let children = named_children(child);
                    let Some(element) = children
                        .iter()
                        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
                    else {
                        continue;
                    };
                    let Some(declarator) = children.iter().find(|c| c.kind() == "variable_declarator")
                    else {
                        continue;
                    };
                    let ty = ArrayTypeBuilder::new(self.read_type(*element)).build();
                    (self.field_text(*declarator, "name")?, ty)
                }
                _ => continue,
            };
            let modifiers = self.read_modifiers(child)?;
            self.scope.declare_local(name);
            parameters.push(
                ParameterBuilder::new(name, ty)
                    .annotations(modifiers.annotations)
                    .location(self.scope.location(child))
                    .build()?,
            );
        }
        Ok(parameters)
    }

    // Types

    fn read_type(&mut self, node: Node) -> Type {
        match node.kind() {
            "void_type" | "integral_type" | "floating_point_type" | "boolean_type" => {
                let name = self.scope.text(node);
                match primitive_type(name) {
                    Some(p) => primitive(p),
                    None => self.scope.reference_type(name, Vec::new(), true),
                }
            }
            "type_identifier" => {
                let name = self.scope.text(node);
                if self.is_generic(name) {
                    GenericTypeBuilder::new(name).build()
                } else {
                    self.scope.reference_type(name, Vec::new(), true)
                }
            }
            "generic_type" => {
                let children = named_children(node);
                let base = children
                    .iter()
                    .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
                    .map(|n| compact(self.scope.text(*n)))
                    .unwrap_or_default();
                let mut arguments = Vec::new();
                if let Some(list) = children.iter().find(|c| c.kind() == "type_arguments") {
                    for argument in named_children(*list) {
                        arguments.push(self.read_type(argument));
                    }
                }
                self.scope.reference_type(&base, arguments, true)
            }
            // `? extends T` reads as `T`; a bare `?` as `Object`.
            "wildcard" => match named_children(node).into_iter().last() {
                Some(bound) => self.read_type(bound),
                None => self.scope.reference_type("Object", Vec::new(), true),
            },
            "array_type" => {
                let element = match node.child_by_field_name("element") {
                    Some(element) => self.read_type(element),
                    None => self.scope.reference_type("Object", Vec::new(), true),
                };
                with_dimensions(element, node.child_by_field_name("dimensions"))
            }
            "annotated_type" => match named_children(node).into_iter().last() {
                Some(inner) => self.read_type(inner),
                None => self.scope.reference_type("Object", Vec::new(), true),
            },
            _ => {
                let name = compact(self.scope.text(node));
                self.scope.reference_type(&name, Vec::new(), true)
            }
        }
    }

    // Statements

    fn read_body(&mut self, block: Node) -> Result<MethodBody, ReadError> {
        Ok(MethodBodyBuilder::new()
            .statements(self.read_block_statements(block)?)
            .build())
    }

    fn read_block_statements(&mut self, block: Node) -> Result<Vec<Statement>, ReadError> {
        self.scope.push_locals();
        let mut statements = Vec::new();
        for child in named_children(block) {
            self.push_statement(&mut statements, child)?;
        }
        self.scope.pop_locals();
        Ok(statements)
    }

    /// Append the statements `node` converts to. A declaration with several
    /// initialized declarators splices in one declaration per name.
    fn push_statement(&mut self, out: &mut Vec<Statement>, node: Node) -> Result<(), ReadError> {
        if node.kind() == "local_variable_declaration" {
            out.extend(self.read_local_variables(node)?);
        } else {
            out.push(self.read_statement(node)?);
        }
        Ok(())
    }

    fn read_block(&mut self, block: Node) -> Result<Statement, ReadError> {
        Ok(BlockBuilder::new()
            .statements(self.read_block_statements(block)?)
            .build())
    }

    fn read_statement(&mut self, node: Node) -> Result<Statement, ReadError> {
        let statement = match node.kind() {
            "block" => self.read_block(node)?,
            "expression_statement" => match named_children(node).into_iter().next() {
                Some(switch) if switch.kind() == "switch_expression" => self.read_switch(switch)?,
                Some(expression) => expression_statement(self.read_expression(expression)?),
                None => EmptyStatementBuilder::new().build(),
            },
            "local_variable_declaration" => {
                let mut declarations = self.read_local_variables(node)?;
                if declarations.len() == 1 {
                    declarations.remove(0)
                } else {
                    BlockBuilder::new().statements(declarations).build()
                }
            }
            "if_statement" => {
                let condition = self.read_condition(self.required(node, "condition")?)?;
                let then = self.read_statement(self.required(node, "consequence")?)?;
                let mut builder = IfBuilder::new(condition).then(then);
                if let Some(alternative) = node.child_by_field_name("alternative") {
                    builder = builder.otherwise(self.read_statement(alternative)?);
                }
                builder.build()?
            }
            "while_statement" => {
                let condition = self.read_condition(self.required(node, "condition")?)?;
                let body = self.read_statement(self.required(node, "body")?)?;
                WhileBuilder::new(condition).body(body).build()?
            }
            "do_statement" => {
                let body = self.read_statement(self.required(node, "body")?)?;
                let condition = self.read_condition(self.required(node, "condition")?)?;
                DoWhileBuilder::new(condition).body(body).build()?
            }
            "for_statement" => self.read_for(node)?,
            "switch_expression" | "switch_statement" => self.read_switch(node)?,
            "return_statement" => {
                let mut builder = ReturnBuilder::new();
                if let Some(value) = named_children(node).into_iter().next() {
                    builder = builder.value(self.read_expression(value)?);
                }
                builder.build()
            }
            // Labelled jumps have no IR shape.
            "break_statement" if named_children(node).is_empty() => BreakBuilder::new().build(),
            "continue_statement" if named_children(node).is_empty() => {
                ContinueBuilder::new().build()
            }
            "throw_statement" => match named_children(node).into_iter().next() {
                Some(value) => ThrowBuilder::new(self.read_expression(value)?).build(),
                None => self.scope.unknown_statement(node),
            },
            "try_statement" => self.read_try(node)?,
            _ => self.scope.unknown_statement(node),
        };
        Ok(statement)
    }

    fn read_local_variables(&mut self, node: Node) -> Result<Vec<Statement>, ReadError> {
        let modifiers = self.read_modifiers(node)?;
        let is_mutable = !modifiers.has(keys::FINAL);
        let type_node = self.required(node, "type")?;
        let inferred = self.scope.text(type_node) == "var";
        let base = if inferred {
            None
        } else {
            Some(self.read_type(type_node))
        };

        let mut cursor = node.walk();
        let declarators: Vec<Node> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        let mut declared = Vec::with_capacity(declarators.len());
        for declarator in declarators {
            let name = self.field_text(declarator, "name")?;
            let value = declarator.child_by_field_name("value");
            let ty = match &base {
                Some(base) => with_dimensions(base.clone(), declarator.child_by_field_name("dimensions")),
                None => value
                    .and_then(|v| self.scope.inferred_type(v))
                    .unwrap_or_else(|| self.scope.reference_type("Object", Vec::new(), true)),
            };
            let value = match value {
                Some(value) => Some(self.read_expression(value)?),
                None => None,
            };
            self.scope.declare_local(name);
            declared.push((name, ty, value));
        }

        let any_initialized = declared.iter().any(|(_, _, value)| value.is_some());
        if !any_initialized && declared.iter().all(|(_, ty, _)| Some(ty) == base.as_ref()) {
            let mut names = declared.into_iter();
            let Some((first, ty, _)) = names.next() else {
                return Ok(Vec::new());
            };
            let mut builder = VariableDeclarationBuilder::new(first, ty).mutable(is_mutable);
            for (name, _, _) in names {
                builder = builder.additional_name(name);
            }
            return Ok(vec![builder.build()?]);
        }

        let mut statements = Vec::with_capacity(declared.len());
        for (name, ty, value) in declared {
            let mut builder = VariableDeclarationBuilder::new(name, ty).mutable(is_mutable);
            if let Some(value) = value {
                builder = builder.initializer_expression(value);
            }
            statements.push(builder.build()?);
        }
        Ok(statements)
    }

    /// `(cond)` as a condition loses its parentheses.
    fn read_condition(&mut self, node: Node) -> Result<Expression, ReadError> {
        if node.kind() == "parenthesized_expression"
            && let Some(inner) = named_children(node).into_iter().next()
        {
            return self.read_expression(inner);
        }
        self.read_expression(node)
    }

    /// Several comma-separated clauses of a `for` header form a block.
    fn for_clause(&mut self, nodes: Vec<Node>) -> Result<Option<Statement>, ReadError> {
        let mut statements = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.kind() == "local_variable_declaration" {
                statements.extend(self.read_local_variables(node)?);
            } else {
                statements.push(expression_statement(self.read_expression(node)?));
            }
        }
        Ok(match statements.len() {
            0 => None,
            1 => statements.pop(),
            _ => Some(BlockBuilder::new().statements(statements).build()),
        })
    }

    fn read_for(&mut self, node: Node) -> Result<Statement, ReadError> {
        self.scope.push_locals();
        let mut cursor = node.walk();
        let init: Vec<Node> = node.children_by_field_name("init", &mut cursor).collect();
        let update: Vec<Node> = node.children_by_field_name("update", &mut cursor).collect();

        let mut builder = ForBuilder::new();
        if let Some(init) = self.for_clause(init)? {
            builder = builder.initializer(init);
        }
        if let Some(condition) = node.child_by_field_name("condition") {
            builder = builder.condition(self.read_expression(condition)?);
        }
        if let Some(update) = self.for_clause(update)? {
            builder = builder.update(update);
        }
        let body = self.read_statement(self.required(node, "body")?)?;
        self.scope.pop_locals();
        Ok(builder.body(body).build()?)
    }

    fn read_switch(&mut self, node: Node) -> Result<Statement, ReadError> {
        let subject = self.read_condition(self.required(node, "condition")?)?;
        let mut builder = SwitchBuilder::new(subject);
        let body = self.required(node, "body")?;
        for group in named_children(body) {
            let children = named_children(group);
            let (labels, statements): (Vec<Node>, Vec<Node>) =
                children.into_iter().partition(|c| c.kind() == "switch_label");

            let mut matches = Vec::new();
            let mut is_default = false;
            for label in labels {
                if has_token(label, "default") {
                    is_default = true;
                }
                for expression in named_children(label) {
                    matches.push(self.read_expression(expression)?);
                }
            }

            self.scope.push_locals();
            let mut body = Vec::new();
            for statement in statements {
                self.push_statement(&mut body, statement)?;
            }
            self.scope.pop_locals();
            // `case X -> ...` never falls through.
            if group.kind() == "switch_rule" {
                body.push(BreakBuilder::new().build());
            }
            let body = (!body.is_empty()).then(|| BlockBuilder::new().statements(body).build());

            // `case A: default:` keeps A as a separate case falling into
            // the default.
            if is_default && !matches.is_empty() {
                let mut case = SwitchCaseBuilder::new();
                for expression in matches.drain(..) {
                    case = case.matching(expression);
                }
                builder = builder.case(case.build());
            }
            let mut case = SwitchCaseBuilder::new();
            for expression in matches {
                case = case.matching(expression);
            }
            if let Some(body) = body {
                case = case.body(body);
            }
            builder = builder.case(case.build());
        }
        Ok(builder.build()?)
    }

    fn read_try(&mut self, node: Node) -> Result<Statement, ReadError> {
        let mut builder = TryCatchBuilder::new().try_block(self.read_block(self.required(node, "body")?)?);
        for child in named_children(node) {
            match child.kind() {
                "catch_clause" => {
                    let Some(parameter) = child_of_kind(child, "catch_formal_parameter") else {
                        return Ok(self.scope.unknown_statement(node));
                    };
                    let types = child_of_kind(parameter, "catch_type")
                        .map(named_children)
                        .unwrap_or_default();
                    // Multi-catch has no IR shape.
                    let [exception] = types.as_slice() else {
                        return Ok(self.scope.unknown_statement(node));
                    };
                    let exception_type = self.read_type(*exception);
                    let name = self.field_text(parameter, "name")?;
                    self.scope.push_locals();
                    self.scope.declare_local(name);
                    let body = self.read_block(self.required(child, "body")?)?;
                    self.scope.pop_locals();
                    builder = builder.catch(
                        CatchClauseBuilder::new(exception_type)
                            .exception_name(name)
                            .body(body)
                            .build(),
                    );
                }
                "finally_clause" => {
                    if let Some(block) = child_of_kind(child, "block") {
                        builder = builder.finally_block(self.read_block(block)?);
                    }
                }
                _ => {}
            }
        }
        Ok(builder.build()?)
    }

    // Expressions

    fn read_arguments(&mut self, node: Node) -> Result<Vec<Expression>, ReadError> {
        named_children(node)
            .into_iter()
            .map(|argument| self.read_expression(argument))
            .collect()
    }

    fn read_expression(&mut self, node: Node) -> Result<Expression, ReadError> {
        let expression = match node.kind() {
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "true"
            | "false"
            | "character_literal"
            | "string_literal"
            | "null_literal"
            | "this"
            | "super" => LiteralBuilder::new(self.scope.text(node)).build(),
            "identifier" => self.scope.name_expression(self.scope.text(node)),
            "parenthesized_expression" => match named_children(node).into_iter().next() {
                Some(inner) => self
                    .read_expression(inner)?
                    .with_property(keys::PARENTHESIZED, true),
                None => self.scope.unknown_expression(node),
            },
            "field_access" => {
                let receiver = self.read_expression(self.required(node, "object")?)?;
                member_access(receiver, self.field_text(node, "field")?)?
            }
            "method_invocation" => self.read_call(node)?,
            "object_creation_expression" if node.child_by_field_name("body").is_none() => {
                let class_name = match self.read_type(self.required(node, "type")?) {
                    Type::Reference(reference) => reference
                        .referenced_class_qualified_name
                        .unwrap_or(reference.referenced_class_simple_name),
                    other => other.display_name(),
                };
                ObjectCreationBuilder::new(class_name)
                    .arguments(self.read_arguments(self.required(node, "arguments")?)?)
                    .build()?
            }
            "binary_expression" => {
                let left = self.read_expression(self.required(node, "left")?)?;
                let operator = binary_operator(self.required(node, "operator")?.kind());
                let right = self.read_expression(self.required(node, "right")?)?;
                BinaryBuilder::new(left, operator, right).build()
            }
            "unary_expression" => {
                let operator = unary_operator(self.required(node, "operator")?.kind());
                let operand = self.read_expression(self.required(node, "operand")?)?;
                UnaryBuilder::new(operator, operand).build()
            }
            "update_expression" => {
                let (Some(first), Some(second)) = (node.child(0), node.child(1)) else {
                    return Ok(self.scope.unknown_expression(node));
                };
                if first.is_named() {
                    let operand = self.read_expression(first)?;
                    UnaryBuilder::new(unary_operator(second.kind()), operand)
                        .postfix()
                        .build()
                } else {
                    let operand = self.read_expression(second)?;
                    UnaryBuilder::new(unary_operator(first.kind()), operand).build()
                }
            }
            "assignment_expression" => {
                let target = self.read_expression(self.required(node, "left")?)?;
                let operator = assignment_operator(self.required(node, "operator")?.kind());
                let value = self.read_expression(self.required(node, "right")?)?;
                AssignmentBuilder::new(target, value).operator(operator).build()
            }
            "ternary_expression" => {
                let condition = self.read_expression(self.required(node, "condition")?)?;
                let if_true = self.read_expression(self.required(node, "consequence")?)?;
                let if_false = self.read_expression(self.required(node, "alternative")?)?;
                TernaryBuilder::new(condition, if_true, if_false).build()
            }
            "cast_expression" => {
                let target = self.read_type(self.required(node, "type")?);
                let value = self.read_expression(self.required(node, "value")?)?;
                CastBuilder::new(value, target).build()
            }
            // Pattern matching (`x instanceof Foo f`) has no IR shape.
            "instanceof_expression"
                if node.child_by_field_name("name").is_none()
                    && node.child_by_field_name("right").is_some() =>
            {
                let value = self.read_expression(self.required(node, "left")?)?;
                let checked = self.read_type(self.required(node, "right")?);
                TypeCheckBuilder::new(value, checked.with_nullable(false)).build()
            }
            "lambda_expression" => self.read_lambda(node)?,
            _ => self.scope.unknown_expression(node),
        };
        Ok(expression)
    }

    fn read_call(&mut self, node: Node) -> Result<Expression, ReadError> {
        let mut builder = MethodCallBuilder::new(self.field_text(node, "name")?)
            .arguments(self.read_arguments(self.required(node, "arguments")?)?);
        if let Some(object) = node.child_by_field_name("object") {
            builder = builder.receiver(self.read_expression(object)?);
        }
        if let Some(arguments) = node.child_by_field_name("type_arguments") {
            for argument in named_children(arguments) {
                builder = builder.type_argument(self.read_type(argument));
            }
        }
        if let Some(call) = self.scope.resolved_call(node) {
            builder = builder.kind(call.kind);
        }
        Ok(builder.build()?)
    }

    fn read_lambda(&mut self, node: Node) -> Result<Expression, ReadError> {
        self.scope.push_locals();
        let mut builder = LambdaBuilder::new();
        let parameters = self.required(node, "parameters")?;
        let untyped = match parameters.kind() {
            "identifier" => vec![parameters],
            "inferred_parameters" => named_children(parameters),
            _ => Vec::new(),
        };
        if parameters.kind() == "formal_parameters" {
            for parameter in self.read_parameters(Some(parameters))? {
                builder = builder.parameter(parameter);
            }
        }
        for parameter in untyped {
            let name = self.scope.text(parameter);
            let ty = self
                .scope
                .inferred_type(parameter)
                .unwrap_or_else(|| self.scope.reference_type("Object", Vec::new(), true));
            self.scope.declare_local(name);
            builder = builder.parameter(ParameterBuilder::new(name, ty).build()?);
        }

        let body = self.required(node, "body")?;
        let body = if body.kind() == "block" {
            self.read_block(body)?
        } else {
            let value = self.read_expression(body)?;
            BlockBuilder::new()
                .statement(ReturnBuilder::new().value(value).build())
                .build()
        };
        self.scope.pop_locals();
        Ok(builder.body(body).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoContext;

    fn read(source: &str) -> File {
        read_java("Test.java", source, &NoContext).unwrap()
    }

    fn method_body(file: &File) -> Vec<Statement> {
        let class = file.classes().next().unwrap();
        let method = class.plain_methods().next().unwrap();
        method.body.clone().unwrap().statements
    }

    #[test]
    fn package_and_imports() {
        let file = read(
            "package com.example;\nimport java.util.List;\nimport java.util.*;\nimport static java.lang.Math.max;\nclass A {}",
        );
        assert_eq!(file.package(), Some("com.example"));
        assert_eq!(file.imports.len(), 3);
        assert_eq!(file.imports[0].path, "java.util.List");
        assert!(!file.imports[0].is_wildcard);
        assert_eq!(file.imports[1].path, "java.util");
        assert!(file.imports[1].is_wildcard);
        assert!(file.imports[2].meta.language_properties.flag(keys::STATIC));
        assert_eq!(
            file.class("A").unwrap().qualified_name.as_deref(),
            Some("com.example.A")
        );
    }

    #[test]
    fn modifiers_map_to_fields_and_properties() {
        let file = read(
            "public abstract class Shape {\n    protected static final int SIDES = 0;\n    private transient String name;\n    public abstract double area();\n    @Override public String toString() { return name; }\n}",
        );
        let shape = file.class("Shape").unwrap();
        assert!(shape.is_abstract());
        assert!(shape.visibility.is_public());

        let sides = shape.field("SIDES").unwrap();
        assert!(!sides.is_mutable);
        assert!(sides.meta.language_properties.flag(keys::STATIC));
        assert!(sides.meta.language_properties.get(keys::FINAL).is_none());
        let name = shape.field("name").unwrap();
        assert!(name.is_mutable);
        assert!(name.meta.language_properties.flag(keys::TRANSIENT));

        let methods: Vec<_> = shape.plain_methods().collect();
        assert!(methods[0].is_abstract);
        assert!(methods[0].body.is_none());
        assert!(methods[1].is_override);
        assert!(methods[1].meta.annotations.is_empty());
    }

    #[test]
    fn interface_members_default_to_public_abstract() {
        let file = read("interface Named { String name(); int LIMIT = 3; }");
        let named = file.class("Named").unwrap();
        assert_eq!(named.kind, ClassKind::Interface);
        let method = named.plain_methods().next().unwrap();
        assert!(method.is_abstract);
        assert!(method.visibility.is_public());
        let limit = named.field("LIMIT").unwrap();
        assert!(!limit.is_mutable);
        assert!(limit.meta.language_properties.flag(keys::STATIC));
    }

    #[test]
    fn constructor_delegation_is_lifted() {
        let file = read("class P { int x; P() { this(1); x = 2; } P(int x) { super(); this.x = x; } }");
        let class = file.class("P").unwrap();
        let constructors: Vec<_> = class.constructors().collect();
        let first = constructors[0].other_constructor_call.as_ref().unwrap();
        assert_eq!(first.ir_method_call_kind, MethodCallKind::This);
        assert_eq!(first.value_arguments.len(), 1);
        assert_eq!(constructors[0].body.as_ref().unwrap().statements.len(), 1);
        let second = constructors[1].other_constructor_call.as_ref().unwrap();
        assert_eq!(second.ir_method_call_kind, MethodCallKind::Super);
    }

    #[test]
    fn enum_constants_become_entry_fields() {
        let file = read("enum Color { RED(1), GREEN(2); private final int code; Color(int code) { this.code = code; } }");
        let color = file.class("Color").unwrap();
        assert_eq!(color.kind, ClassKind::Enum);
        let red = color.field("RED").unwrap();
        assert!(red.meta.language_properties.flag(keys::ENUM_ENTRY));
        assert!(!red.ir_type.is_nullable());
        match red.initializer_expression() {
            Some(Expression::ObjectCreation(creation)) => {
                assert_eq!(creation.class_name, "Color");
                assert_eq!(creation.constructor_args.len(), 1);
            }
            other => panic!("unexpected initializer {other:?}"),
        }
        assert!(!color.field("code").unwrap().meta.language_properties.flag(keys::ENUM_ENTRY));
    }

    #[test]
    fn initialized_declarators_split() {
        let file = read("class A { void f() { int a, b = 1; int c, d; } }");
        let body = method_body(&file);
        assert_eq!(body.len(), 3);
        match &body[2] {
            Statement::VariableDeclaration(declaration) => {
                assert_eq!(declaration.name, "c");
                assert_eq!(declaration.additional_names, vec!["d".to_string()]);
                assert!(declaration.is_mutable);
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn control_flow_statements() {
        let file = read(
            "class A { int f(int n) {\n for (int i = 0; i < n; i++) { if (i == 2) continue; else break; }\n while (n > 0) n--;\n do { n++; } while (n < 3);\n switch (n) { case 1: case 2: return 1; default: break; }\n try { f(1); } catch (RuntimeException e) { throw e; } finally { n = 0; }\n return n;\n} }",
        );
        let kinds: Vec<_> = method_body(&file).iter().map(Statement::kind_name).collect();
        assert_eq!(
            kinds,
            vec!["for", "while", "do-while", "switch", "try-catch", "return"]
        );
    }

    #[test]
    fn unmapped_statements_keep_source_text() {
        let source = "class A { void f(int[] xs) { for (int x : xs) { g(x); } } }";
        let file = read(source);
        match &method_body(&file)[0] {
            Statement::Unknown(unknown) => {
                assert_eq!(
                    unknown.meta.representation("java"),
                    Some("for (int x : xs) { g(x); }")
                );
            }
            other => panic!("expected unknown, got {other:?}"),
        }
    }

    #[test]
    fn names_resolve_to_types_locals_and_fields() {
        let file = read("class A { int n; void f(int k) { System.out.println(this.n + k); } }");
        let Statement::Expression(statement) = &method_body(&file)[0] else {
            panic!("expected expression statement");
        };
        let Expression::MethodCall(call) = &statement.expression else {
            panic!("expected call");
        };
        assert_eq!(call.method_name, "println");
        let Some(Expression::Identifier(out)) = call.receiver.as_deref() else {
            panic!("expected identifier receiver");
        };
        assert!(matches!(
            out.qualifier.as_deref(),
            Some(Expression::TypeReferenceIdentifier(_))
        ));
        let Expression::Binary(sum) = &call.value_arguments[0] else {
            panic!("expected binary argument");
        };
        assert_eq!(sum.operator, BinaryOperator::Plus);
    }

    #[test]
    fn on_demand_imports_leave_names_as_written() {
        let file = read("import java.util.*;\nimport java.awt.Color;\nclass A { List xs; Color c; }");
        let class = file.class("A").unwrap();
        let types: Vec<_> = class.fields.iter().map(|f| f.ir_type.display_name()).collect();
        assert_eq!(types, ["List", "java.awt.Color"]);
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = read_java("Broken.java", "class {", &NoContext).unwrap_err();
        assert!(matches!(err, ReadError::Parse(_)));
    }
}
