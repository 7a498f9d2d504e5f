//! Tree-sitter based Kotlin reader.
//!
//! Kotlin is read into the same Java-shaped IR the Java reader produces:
//! - `val`/`var` parameters of the class header become fields, assigned
//!   from a constructor flagged `primary`;
//! - builtin types (`Int`, `Boolean`, `Unit`, ...) are primitives, `String`
//!   and `Any` are their `java.lang` counterparts;
//! - types are non-null unless written `T?`;
//! - `when` with a subject becomes a switch.
//!
//! For-in loops, string templates, safe calls and the like have no IR shape
//! and degrade to unknown nodes.

use crate::input::{assignment_operator, binary_operator, unary_operator};
use crate::scope::{
    ConversionScope, child_of_kind, has_token, member_access, named_children, super_class_of,
};
use crate::tables::STRUCTURAL_FLAGS;
use crate::traits::{ReadError, Reader, ReferenceKind, ResolutionContext, SyntacticResolver};
use crossgen_ir::builders::*;
use crossgen_ir::properties::keys;
use crossgen_ir::*;
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

const LANGUAGE: &str = "kotlin";

/// Kotlin names for classes that live in `java.lang` on the JVM.
const IMPLICIT: &[(&str, &str)] = &[
    ("Any", "java.lang.Object"),
    ("String", "java.lang.String"),
    ("CharSequence", "java.lang.CharSequence"),
    ("Number", "java.lang.Number"),
    ("Comparable", "java.lang.Comparable"),
    ("Throwable", "java.lang.Throwable"),
    ("Exception", "java.lang.Exception"),
    ("Error", "java.lang.Error"),
    ("RuntimeException", "java.lang.RuntimeException"),
    ("IllegalArgumentException", "java.lang.IllegalArgumentException"),
    ("IllegalStateException", "java.lang.IllegalStateException"),
    ("UnsupportedOperationException", "java.lang.UnsupportedOperationException"),
    ("IndexOutOfBoundsException", "java.lang.IndexOutOfBoundsException"),
];

const TYPE_KINDS: &[&str] = &[
    "type",
    "user_type",
    "nullable_type",
    "function_type",
    "parenthesized_type",
    "not_nullable_type",
    "non_nullable_type",
    "definitely_non_nullable_type",
    "type_reference",
];

const CLASS_KINDS: &[&str] = &["class_declaration", "object_declaration", "companion_object"];

/// Static instance of the Kotlin reader for registry.
pub static KOTLIN_READER: KotlinReader = KotlinReader;

/// Kotlin reader using tree-sitter.
pub struct KotlinReader;

impl Reader for KotlinReader {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["kt", "kts"]
    }

    fn read(
        &self,
        file_name: &str,
        source: &str,
        context: &dyn ResolutionContext,
    ) -> Result<File, ReadError> {
        read_kotlin(file_name, source, context)
    }
}

/// Parse Kotlin source into the IR.
pub fn read_kotlin(
    file_name: &str,
    source: &str,
    context: &dyn ResolutionContext,
) -> Result<File, ReadError> {
    debug!(file = %file_name, language = LANGUAGE, "reading file");
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_kotlin::language().into())
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

fn compact(name: &str) -> String {
    name.split_whitespace().collect()
}

/// Name of a declaration. Class names are aliased to `type_identifier`.
fn declared_name(node: Node) -> Option<Node> {
    node.child_by_field_name("name")
        .or_else(|| child_of_kind(node, "type_identifier"))
        .or_else(|| child_of_kind(node, "simple_identifier"))
}

fn type_child(node: Node) -> Option<Node> {
    named_children(node)
        .into_iter()
        .find(|c| TYPE_KINDS.contains(&c.kind()))
}

/// A function's receiver type is an unnamed type child written before the
/// function name.
fn is_extension(function: Node) -> bool {
    let Some(name) = declared_name(function) else {
        return false;
    };
    named_children(function)
        .into_iter()
        .any(|c| TYPE_KINDS.contains(&c.kind()) && c.start_byte() < name.start_byte())
}

/// Declared return type: the type child after the parameter list.
fn return_type_child(function: Node) -> Option<Node> {
    let parameters = child_of_kind(function, "function_value_parameters")?;
    named_children(function)
        .into_iter()
        .find(|c| TYPE_KINDS.contains(&c.kind()) && c.start_byte() > parameters.end_byte())
}

/// Children that can stand for an expression. `null` is an anonymous token
/// in this grammar.
fn operands(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| (c.is_named() && !c.is_extra()) || c.kind() == "null")
        .collect()
}

/// The operand written after `token`, as in `val x = 1` or `a: Int = 0`.
fn after_token<'t>(node: Node<'t>, token: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .skip_while(|c| c.is_named() || c.kind() != token)
        .skip(1)
        .find(|c| (c.is_named() && !c.is_extra()) || c.kind() == "null")
}

fn contains_kind(node: Node, kinds: &[&str]) -> bool {
    kinds.contains(&node.kind()) || named_children(node).into_iter().any(|c| contains_kind(c, kinds))
}

/// Named children with the grammar's grouping nodes flattened away.
fn flattened<'t>(node: Node<'t>, groups: &[&str]) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for child in named_children(node) {
        if groups.contains(&child.kind()) {
            out.extend(flattened(child, groups));
        } else {
            out.push(child);
        }
    }
    out
}

fn body_members(body: Node) -> Vec<Node> {
    flattened(
        body,
        &["class_member_declarations", "class_member_declaration", "declaration", "enum_entries"],
    )
}

/// Statements of a block, lambda or `statements` node. Labels and
/// statement annotations are dropped.
fn statement_nodes(node: Node) -> Vec<Node> {
    flattened(node, &["statements", "statement"])
        .into_iter()
        .filter(|c| !matches!(c.kind(), "label" | "annotation" | "lambda_parameters" | "semis"))
        .collect()
}

fn class_parameters(primary: Node) -> Vec<Node> {
    flattened(primary, &["class_parameters"])
        .into_iter()
        .filter(|c| c.kind() == "class_parameter")
        .collect()
}

/// Super-type entries of a class header, unwrapped from their specifier
/// nodes.
fn delegations(node: Node) -> Vec<Node> {
    let mut out = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "delegation_specifiers" | "delegation_specifier" | "annotated_delegation_specifier" => {
                out.extend(delegations(child));
            }
            "constructor_invocation" | "user_type" | "explicit_delegation" | "function_type" => {
                out.push(child)
            }
            _ => {}
        }
    }
    out
}

fn prescan(root: Node, source: &str) -> (SyntacticResolver, Vec<(String, String)>) {
    let package = child_of_kind(root, "package_header")
        .and_then(|p| child_of_kind(p, "identifier"))
        .map(|name| compact(text(name, source)));
    let mut resolver = SyntacticResolver::new(package.as_deref());
    let mut classes = Vec::new();

    for child in flattened(root, &["import_list"]) {
        match child.kind() {
            "import_header" => {
                let Some(path) = child_of_kind(child, "identifier") else {
                    continue;
                };
                let path = compact(text(path, source));
                if let Some(alias) = child_of_kind(child, "import_alias").and_then(declared_name)
                {
                    resolver.add_class(text(alias, source), &path);
                } else if child_of_kind(child, "wildcard_import").is_none() {
                    resolver.add_import(&path);
                }
            }
            kind if CLASS_KINDS.contains(&kind) => {
                collect_declarations(child, None, source, &mut resolver, &mut classes);
            }
            "property_declaration" => collect_property(child, source, &mut resolver),
            _ => {}
        }
    }
    for (simple, qualified) in IMPLICIT {
        resolver.add_class(simple, qualified);
    }
    (resolver, classes)
}

fn collect_property(node: Node, source: &str, resolver: &mut SyntacticResolver) {
    if let Some(name) = child_of_kind(node, "variable_declaration").and_then(declared_name) {
        resolver.add_field(text(name, source));
    }
}

fn collect_declarations(
    node: Node,
    outer: Option<&str>,
    source: &str,
    resolver: &mut SyntacticResolver,
    classes: &mut Vec<(String, String)>,
) {
    let name = match declared_name(node) {
        Some(name) => text(name, source),
        None if node.kind() == "companion_object" => "Companion",
        None => return,
    };
    let qualified = match outer {
        Some(outer) => format!("{outer}.{name}"),
        None => resolver.qualify(name),
    };
    resolver.add_class(name, &qualified);
    classes.push((name.to_string(), qualified.clone()));

    if let Some(primary) = child_of_kind(node, "primary_constructor") {
        for parameter in class_parameters(primary) {
            let is_property = has_token(parameter, "val") || has_token(parameter, "var");
            if let Some(name) = declared_name(parameter).filter(|_| is_property) {
                resolver.add_field(text(name, source));
            }
        }
    }
    let body = child_of_kind(node, "class_body").or_else(|| child_of_kind(node, "enum_class_body"));
    let Some(body) = body else {
        return;
    };
    for member in body_members(body) {
        match member.kind() {
            "property_declaration" => collect_property(member, source, resolver),
            "enum_entry" => {
                if let Some(name) = declared_name(member) {
                    resolver.add_field(text(name, source));
                }
            }
            kind if CLASS_KINDS.contains(&kind) => {
                collect_declarations(member, Some(&qualified), source, resolver, classes);
            }
            _ => {}
        }
    }
}

fn builtin_type(name: &str) -> Option<PrimitiveType> {
    match name.strip_prefix("kotlin.").unwrap_or(name) {
        "Unit" => Some(PrimitiveType::Void),
        "Boolean" => Some(PrimitiveType::Boolean),
        "Byte" => Some(PrimitiveType::Byte),
        "Short" => Some(PrimitiveType::Short),
        "Int" => Some(PrimitiveType::Int),
        "Long" => Some(PrimitiveType::Long),
        "Char" => Some(PrimitiveType::Char),
        "Float" => Some(PrimitiveType::Float),
        "Double" => Some(PrimitiveType::Double),
        _ => None,
    }
}

fn unit() -> Type {
    PrimitiveTypeBuilder::new(PrimitiveType::Void)
        .nullable(false)
        .build()
}

fn expression_statement(expression: Expression) -> Statement {
    ExpressionStatementBuilder::new(expression).build()
}

fn this_member(name: &str) -> Expression {
    IdentifierBuilder::new(LiteralBuilder::new(name).build())
        .qualifier(LiteralBuilder::new("this").build())
        .build()
}

#[derive(Default)]
struct Modifiers<'a> {
    visibility: Option<Visibility>,
    /// Modifier words as written. Every well-known key is spelled like its
    /// keyword; other words are carried through as keys of their own.
    flags: Vec<&'a str>,
    annotations: Vec<Annotation>,
    kind: Option<ClassKind>,
}

impl Modifiers<'_> {
    fn has(&self, key: &str) -> bool {
        self.flags.contains(&key)
    }

    fn visibility(&self) -> Visibility {
        self.visibility.clone().unwrap_or_else(Visibility::public)
    }

    fn non_structural(&self) -> impl Iterator<Item = &str> + '_ {
        self.flags
            .iter()
            .copied()
            .filter(|key| !STRUCTURAL_FLAGS.contains(key))
    }
}

struct ReadContext<'a> {
    scope: ConversionScope<'a>,
    generics: Vec<Vec<String>>,
}

impl<'a> ReadContext<'a> {
    fn name_of(&self, node: Node) -> Result<&'a str, ReadError> {
        declared_name(node)
            .map(|n| self.scope.text(n))
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("named {}", node.kind()),
                got: self.scope.text(node).to_string(),
            })
    }

    fn is_generic(&self, name: &str) -> bool {
        self.generics.iter().flatten().any(|g| g == name)
    }

    /// `Any?`, the type of anything written without one.
    fn any(&mut self) -> Type {
        self.scope.reference_type("Any", Vec::new(), true)
    }

    fn read_file(&mut self, name: &str, root: Node) -> Result<File, ReadError> {
        let mut builder = FileBuilder::new(name);
        if let Some(package) = self.scope.resolver().package() {
            builder = builder.property(keys::JVM_PACKAGE, package);
        }
        for child in flattened(root, &["import_list"]) {
            match child.kind() {
                "import_header" => builder = builder.import(self.read_import(child)?),
                kind if CLASS_KINDS.contains(&kind) => {
                    builder = builder.class(self.read_class(child)?);
                }
                "function_declaration" => {
                    if let Some(method) = self.read_function(child, false)? {
                        builder = builder.method(method);
                    }
                }
                "property_declaration" => builder = builder.field(self.read_property(child)?),
                _ => {}
            }
        }
        Ok(builder.build()?)
    }

    fn read_import(&mut self, node: Node) -> Result<Import, ReadError> {
        let path = child_of_kind(node, "identifier").ok_or_else(|| ReadError::UnexpectedNode {
            expected: "import path".into(),
            got: self.scope.text(node).to_string(),
        })?;
        let mut builder = ImportBuilder::new(compact(self.scope.text(path)))
            .wildcard(child_of_kind(node, "wildcard_import").is_some())
            .location(self.scope.location(node));
        if let Some(alias) = child_of_kind(node, "import_alias").and_then(declared_name) {
            builder = builder.property("alias", self.scope.text(alias));
        }
        Ok(builder.build()?)
    }

    fn read_modifiers(&mut self, owner: Node) -> Result<Modifiers<'a>, ReadError> {
        let mut modifiers = Modifiers::default();
        let Some(node) = child_of_kind(owner, "modifiers") else {
            return Ok(modifiers);
        };
        for child in named_children(node) {
            match child.kind() {
                "annotation" => modifiers.annotations.push(self.read_annotation(child)?),
                "visibility_modifier" => {
                    modifiers.visibility =
                        Some(Visibility::from_keyword(LANGUAGE, self.scope.text(child)));
                }
                _ => match self.scope.text(child) {
                    "enum" => modifiers.kind = Some(ClassKind::Enum),
                    "annotation" => modifiers.kind = Some(ClassKind::Annotation),
                    word => modifiers.flags.push(word),
                },
            }
        }
        Ok(modifiers)
    }

    fn read_annotation(&mut self, node: Node) -> Result<Annotation, ReadError> {
        let invocation = child_of_kind(node, "constructor_invocation");
        let name = invocation
            .and_then(|i| child_of_kind(i, "user_type"))
            .or_else(|| child_of_kind(node, "user_type"))
            .map(|n| compact(self.scope.text(n)))
            .unwrap_or_default();
        let mut builder = AnnotationBuilder::new(name);
        if let Some(arguments) = invocation.and_then(|i| child_of_kind(i, "value_arguments")) {
            for argument in named_children(arguments) {
                let Some(value) = operands(argument).into_iter().last() else {
                    continue;
                };
                let key = if has_token(argument, "=") {
                    declared_name(argument).map(|n| self.scope.text(n)).unwrap_or("value")
                } else {
                    "value"
                };
                builder = builder.parameter(key, self.read_expression(value)?);
            }
        }
        Ok(builder.build()?)
    }

    // Declarations

    fn read_class(&mut self, node: Node) -> Result<Class, ReadError> {
        let companion = node.kind() == "companion_object";
        let name = match declared_name(node) {
            Some(name) => self.scope.text(name),
            None if companion => "Companion",
            None => return Err(self.unexpected("named class", node)),
        };
        let qualified = match self.scope.current_class() {
            Some(outer) => format!("{outer}.{name}"),
            None => self.scope.resolver().qualify(name),
        };
        let modifiers = self.read_modifiers(node)?;
        let kind = match node.kind() {
            "object_declaration" | "companion_object" => ClassKind::Object,
            _ if has_token(node, "interface") => ClassKind::Interface,
            _ => modifiers.kind.clone().unwrap_or_default(),
        };
        let is_interface = kind == ClassKind::Interface;

        let mut builder = ClassBuilder::new(name)
            .qualified_name(qualified.as_str())
            .kind(kind.clone())
            .visibility(modifiers.visibility())
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for key in &modifiers.flags {
            builder = builder.property(*key, true);
        }
        if companion {
            builder = builder.property(keys::COMPANION, true);
        }

        self.scope.enter_class(&qualified);
        let type_parameters = self.read_type_parameters(child_of_kind(node, "type_parameters"))?;
        self.generics
            .push(type_parameters.iter().map(|p| p.name.clone()).collect());
        for parameter in type_parameters {
            builder = builder.type_parameter(parameter);
        }

        let mut super_arguments = None;
        for delegation in delegations(node) {
            let (type_node, arguments) = match delegation.kind() {
                "constructor_invocation" => (
                    child_of_kind(delegation, "user_type"),
                    child_of_kind(delegation, "value_arguments"),
                ),
                "explicit_delegation" => {
                    trace!(language = LANGUAGE, class = name, "dropped delegate of super-type");
                    (type_child(delegation), None)
                }
                _ => (Some(delegation), None),
            };
            let Some(type_node) = type_node else {
                continue;
            };
            let super_kind = if arguments.is_some() && !is_interface {
                ClassKind::Class
            } else {
                ClassKind::Interface
            };
            if let Some(arguments) = arguments {
                super_arguments = Some(self.read_arguments(arguments)?);
            }
            let ty = self.read_type(type_node);
            builder = builder.super_class(
                super_class_of(&ty, super_kind)
                    .location(self.scope.location(delegation))
                    .build()?,
            );
        }

        builder = self.read_primary(
            builder,
            child_of_kind(node, "primary_constructor"),
            super_arguments,
            name,
            &qualified,
        )?;

        let body = child_of_kind(node, "class_body").or_else(|| child_of_kind(node, "enum_class_body"));
        if let Some(body) = body {
            for member in body_members(body) {
                builder = self.read_member(builder, member, is_interface, name, &qualified)?;
            }
        }

        self.generics.pop();
        self.scope.exit_class();
        Ok(builder.build()?)
    }

    /// The class header's parameter list. `val`/`var` parameters become
    /// fields assigned by the constructor.
    fn read_primary(
        &mut self,
        mut builder: ClassBuilder,
        node: Option<Node>,
        super_arguments: Option<Vec<Expression>>,
        name: &str,
        qualified: &str,
    ) -> Result<ClassBuilder, ReadError> {
        let delegates = super_arguments.as_ref().is_some_and(|args| !args.is_empty());
        if node.is_none() && !delegates {
            return Ok(builder);
        }
        let modifiers = match node {
            Some(node) => self.read_modifiers(node)?,
            None => Modifiers::default(),
        };

        self.scope.push_locals();
        let mut constructor = ConstructorBuilder::new(name, self.scope.class_type(qualified, false))
            .visibility(modifiers.visibility())
            .annotations(modifiers.annotations.clone())
            .property(keys::PRIMARY, true);
        let mut body = MethodBodyBuilder::new();
        for parameter in node.map(class_parameters).unwrap_or_default() {
            let parameter_name = self.name_of(parameter)?;
            let ty = match type_child(parameter) {
                Some(ty) => self.read_type(ty),
                None => self.any(),
            };
            let parameter_modifiers = self.read_modifiers(parameter)?;
            let mut declared = ParameterBuilder::new(parameter_name, ty.clone())
                .location(self.scope.location(parameter));
            if let Some(default) = after_token(parameter, "=") {
                declared = declared.default_value(self.read_expression(default)?);
            }

            if has_token(parameter, "val") || has_token(parameter, "var") {
                let mut field = FieldBuilder::new(parameter_name, ty)
                    .visibility(parameter_modifiers.visibility())
                    .mutable(has_token(parameter, "var"))
                    .annotations(parameter_modifiers.annotations)
                    .location(self.scope.location(parameter));
                for key in &parameter_modifiers.flags {
                    field = field.property(*key, true);
                }
                builder = builder.field(field.build()?);
                let value = IdentifierBuilder::simple(parameter_name).build();
                body = body.statement(expression_statement(
                    AssignmentBuilder::new(this_member(parameter_name), value).build(),
                ));
            } else {
                declared = declared.annotations(parameter_modifiers.annotations);
            }
            self.scope.declare_local(parameter_name);
            constructor = constructor.parameter(declared.build()?);
        }
        self.scope.pop_locals();

        if let Some(arguments) = super_arguments.filter(|args| !args.is_empty()) {
            constructor = constructor.other_constructor_call(
                MethodCallBuilder::new("super")
                    .kind(MethodCallKind::Super)
                    .arguments(arguments)
                    .build_call()?,
            );
        }
        Ok(builder.constructor(constructor.body(body.build()).build()?))
    }

    fn read_member(
        &mut self,
        builder: ClassBuilder,
        member: Node,
        in_interface: bool,
        name: &str,
        owner: &str,
    ) -> Result<ClassBuilder, ReadError> {
        Ok(match member.kind() {
            "property_declaration" => builder.field(self.read_property(member)?),
            "function_declaration" => match self.read_function(member, in_interface)? {
                Some(method) => builder.method(method),
                None => builder,
            },
            "secondary_constructor" => {
                builder.constructor(self.read_secondary(member, name, owner)?)
            }
            "anonymous_initializer" => {
                let mut initializer = ClassInitializerBuilder::new(InitializerKind::Instance)
                    .location(self.scope.location(member));
                if let Some(block) = child_of_kind(member, "block") {
                    initializer = initializer.body(self.read_body(block)?);
                }
                builder.initializer(initializer.build())
            }
            "enum_entry" => builder.field(self.read_enum_entry(member, owner)?),
            kind if CLASS_KINDS.contains(&kind) => {
                builder.nested_class(self.read_class(member)?)
            }
            kind => {
                trace!(language = LANGUAGE, kind, "skipped member");
                builder
            }
        })
    }

    fn read_enum_entry(&mut self, node: Node, owner: &str) -> Result<Field, ReadError> {
        let name = self.name_of(node)?;
        let modifiers = self.read_modifiers(node)?;
        let mut builder = FieldBuilder::new(name, self.scope.class_type(owner, false))
            .visibility(Visibility::public())
            .mutable(false)
            .property(keys::ENUM_ENTRY, true)
            .property(keys::STATIC, true)
            .annotations(modifiers.annotations)
            .location(self.scope.location(node));
        if let Some(arguments) = child_of_kind(node, "value_arguments") {
            let creation = ObjectCreationBuilder::new(owner)
                .arguments(self.read_arguments(arguments)?)
                .build()?;
            builder = builder.initializer(expression_statement(creation));
        }
        if child_of_kind(node, "class_body").is_some() {
            trace!(language = LANGUAGE, entry = name, "dropped enum entry body");
        }
        Ok(builder.build()?)
    }

    fn read_property(&mut self, node: Node) -> Result<Field, ReadError> {
        let modifiers = self.read_modifiers(node)?;
        let declaration = child_of_kind(node, "variable_declaration")
            .ok_or_else(|| self.unexpected("single property", node))?;
        let name = self.name_of(declaration)?;
        let value = after_token(node, "=");
        let ty = match (type_child(declaration), value) {
            (Some(ty), _) => self.read_type(ty),
            (None, Some(value)) => self.scope.inferred_type(value).unwrap_or_else(|| self.any()),
            (None, None) => self.any(),
        };

        let mut builder = FieldBuilder::new(name, ty)
            .visibility(modifiers.visibility())
            .mutable(has_token(node, "var"))
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for key in &modifiers.flags {
            builder = builder.property(*key, true);
        }
        if let Some(value) = value {
            builder = builder.initializer(expression_statement(self.read_expression(value)?));
        }
        if child_of_kind(node, "property_delegate").is_some()
            || child_of_kind(node, "getter").is_some()
            || child_of_kind(node, "setter").is_some()
        {
            trace!(language = LANGUAGE, property = name, "dropped property accessors");
        }
        Ok(builder.build()?)
    }

    /// Extension functions have no IR shape and read as `None`.
    fn read_function(&mut self, node: Node, in_interface: bool) -> Result<Option<Method>, ReadError> {
        let name = self.name_of(node)?;
        if is_extension(node) {
            debug!(language = LANGUAGE, function = name, "skipped extension function");
            return Ok(None);
        }
        let modifiers = self.read_modifiers(node)?;
        let type_parameters = self.read_type_parameters(child_of_kind(node, "type_parameters"))?;
        self.generics
            .push(type_parameters.iter().map(|p| p.name.clone()).collect());

        self.scope.push_locals();
        let parameters = self.read_parameters(child_of_kind(node, "function_value_parameters"))?;
        let declared = return_type_child(node).map(|ty| self.read_type(ty));
        let function_body = child_of_kind(node, "function_body");
        let expression_body = function_body
            .filter(|body| child_of_kind(*body, "block").is_none())
            .and_then(|body| operands(body).into_iter().next());
        let return_type = match (declared, expression_body) {
            (Some(ty), _) => ty,
            (None, Some(value)) => self.scope.inferred_type(value).unwrap_or_else(|| self.any()),
            (None, None) => unit(),
        };
        let body = match (function_body, expression_body) {
            (_, Some(value)) => {
                let value = self.read_expression(value)?;
                let statement = if return_type.is_void() {
                    expression_statement(value)
                } else {
                    ReturnBuilder::new().value(value).build()
                };
                Some(MethodBodyBuilder::new().statement(statement).build())
            }
            (Some(body), None) => match child_of_kind(body, "block") {
                Some(block) => Some(self.read_body(block)?),
                None => None,
            },
            (None, None) => None,
        };
        self.scope.pop_locals();
        self.generics.pop();

        let is_abstract = modifiers.has(keys::ABSTRACT) || (in_interface && body.is_none());
        let mut builder = MethodBuilder::new(name, return_type)
            .visibility(modifiers.visibility())
            .is_abstract(is_abstract)
            .is_override(modifiers.has(keys::OVERRIDE))
            .parameters(parameters)
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for parameter in type_parameters {
            builder = builder.type_parameter(parameter);
        }
        for key in modifiers.non_structural() {
            builder = builder.property(key, true);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(Some(builder.build()?))
    }

    fn read_secondary(&mut self, node: Node, name: &str, owner: &str) -> Result<Constructor, ReadError> {
        let modifiers = self.read_modifiers(node)?;
        self.scope.push_locals();
        let parameters = self.read_parameters(child_of_kind(node, "function_value_parameters"))?;
        let mut builder = ConstructorBuilder::new(name, self.scope.class_type(owner, false))
            .visibility(modifiers.visibility())
            .parameters(parameters)
            .annotations(modifiers.annotations.clone())
            .location(self.scope.location(node));
        for key in modifiers.non_structural() {
            builder = builder.property(key, true);
        }
        if let Some(delegation) = child_of_kind(node, "constructor_delegation_call") {
            let (keyword, kind) = if has_token(delegation, "super") {
                ("super", MethodCallKind::Super)
            } else {
                ("this", MethodCallKind::This)
            };
            let mut call = MethodCallBuilder::new(keyword).kind(kind);
            if let Some(arguments) = child_of_kind(delegation, "value_arguments") {
                call = call.arguments(self.read_arguments(arguments)?);
            }
            builder = builder.other_constructor_call(call.build_call()?);
        }
        if let Some(block) = child_of_kind(node, "block") {
            builder = builder.body(self.read_body(block)?);
        }
        self.scope.pop_locals();
        Ok(builder.build()?)
    }

    fn read_type_parameters(&mut self, node: Option<Node>) -> Result<Vec<TypeParameter>, ReadError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let declared: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "type_parameter")
            .collect();
        let names: Vec<String> = declared
            .iter()
            .filter_map(|p| declared_name(*p))
            .map(|n| self.scope.text(n).to_string())
            .collect();
        self.generics.push(names);
        let mut parameters = Vec::with_capacity(declared.len());
        for parameter in declared {
            let mut builder = TypeParameterBuilder::new(self.name_of(parameter)?);
            if let Some(bound) = type_child(parameter) {
                builder = builder.extends(self.read_type(bound));
            }
            parameters.push(builder.build()?);
        }
        self.generics.pop();
        Ok(parameters)
    }

    /// `(a: Int, b: String = "")`. A default value follows its parameter
    /// as a sibling.
    fn read_parameters(&mut self, node: Option<Node>) -> Result<Vec<Parameter>, ReadError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        let mut parameters: Vec<ParameterBuilder> = Vec::new();
        let mut expect_default = false;
        for child in children {
            match child.kind() {
                "parameter" => {
                    let name = self.name_of(child)?;
                    let ty = match type_child(child) {
                        Some(ty) => self.read_type(ty),
                        None => self.any(),
                    };
                    self.scope.declare_local(name);
                    parameters.push(
                        ParameterBuilder::new(name, ty).location(self.scope.location(child)),
                    );
                }
                "=" => expect_default = true,
                _ if expect_default && (child.is_named() || child.kind() == "null") => {
                    expect_default = false;
                    let value = self.read_expression(child)?;
                    if let Some(last) = parameters.pop() {
                        parameters.push(last.default_value(value));
                    }
                }
                _ => {}
            }
        }
        parameters
            .into_iter()
            .map(|p| p.build().map_err(ReadError::from))
            .collect()
    }

    // Types

    fn read_type(&mut self, node: Node) -> Type {
        match node.kind() {
            "nullable_type" => match named_children(node).into_iter().next() {
                Some(inner) => self.read_type(inner).with_nullable(true),
                None => self.any(),
            },
            "user_type" => self.read_user_type(node),
            "type_identifier" | "simple_identifier" => {
                let name = self.scope.text(node);
                self.named_type(name, Vec::new())
            }
            "function_type" => {
                let mut parameter_types = Vec::new();
                if let Some(parameters) = child_of_kind(node, "function_type_parameters") {
                    for parameter in named_children(parameters) {
                        let ty = match type_child(parameter) {
                            Some(inner) if parameter.kind() == "parameter" => self.read_type(inner),
                            _ => self.read_type(parameter),
                        };
                        parameter_types.push(ty);
                    }
                }
                let return_type = match type_child(node) {
                    Some(ret) => self.read_type(ret),
                    None => unit(),
                };
                let mut builder = FunctionTypeBuilder::new(return_type).nullable(false);
                for ty in parameter_types {
                    builder = builder.parameter_type(ty);
                }
                builder.build()
            }
            "type_projection" => match type_child(node) {
                Some(inner) => self.read_type(inner),
                None => self.any(),
            },
            _ => {
                let inner = named_children(node)
                    .into_iter()
                    .filter(|c| !c.kind().ends_with("modifiers"))
                    .last();
                match inner {
                    Some(inner) => self.read_type(inner),
                    None => {
                        let name = compact(self.scope.text(node));
                        self.named_type(&name, Vec::new())
                    }
                }
            }
        }
    }

    /// `a.b.C<T>`: the arguments of the last segment are the type's.
    fn read_user_type(&mut self, node: Node) -> Type {
        let mut segments = Vec::new();
        let mut arguments = Vec::new();
        let mut parts = Vec::new();
        for child in named_children(node) {
            if child.kind() == "simple_user_type" {
                parts.extend(named_children(child));
            } else {
                parts.push(child);
            }
        }
        for part in parts {
            match part.kind() {
                "type_identifier" | "simple_identifier" => {
                    segments.push(self.scope.text(part));
                    arguments.clear();
                }
                "type_arguments" => {
                    arguments = named_children(part)
                        .into_iter()
                        .map(|argument| self.read_type(argument))
                        .collect();
                }
                _ => {}
            }
        }
        self.named_type(&segments.join("."), arguments)
    }

    fn named_type(&mut self, name: &str, mut arguments: Vec<Type>) -> Type {
        if arguments.is_empty() {
            if let Some(primitive) = builtin_type(name) {
                return PrimitiveTypeBuilder::new(primitive).nullable(false).build();
            }
            if self.is_generic(name) {
                return GenericTypeBuilder::new(name).nullable(false).build();
            }
        }
        if name == "Array" && arguments.len() == 1 {
            if let Some(element) = arguments.pop() {
                return ArrayTypeBuilder::new(element).nullable(false).build();
            }
        }
        self.scope.reference_type(name, arguments, false)
    }

    // Statements

    fn unexpected(&self, expected: &str, node: Node) -> ReadError {
        ReadError::UnexpectedNode {
            expected: expected.to_string(),
            got: self.scope.text(node).to_string(),
        }
    }

    fn read_body(&mut self, block: Node) -> Result<MethodBody, ReadError> {
        Ok(MethodBodyBuilder::new()
            .statements(self.read_statements(block)?)
            .build())
    }

    fn read_statements(&mut self, node: Node) -> Result<Vec<Statement>, ReadError> {
        self.scope.push_locals();
        let mut statements = Vec::new();
        for child in statement_nodes(node) {
            statements.push(self.read_statement(child)?);
        }
        self.scope.pop_locals();
        Ok(statements)
    }

    fn read_block(&mut self, block: Node) -> Result<Statement, ReadError> {
        Ok(BlockBuilder::new()
            .statements(self.read_statements(block)?)
            .build())
    }

    /// Body of `if`/`while`/`when` branches: a block or a single statement.
    fn read_control_body(&mut self, node: Node) -> Result<Statement, ReadError> {
        match named_children(node).into_iter().next() {
            Some(block) if block.kind() == "block" => self.read_block(block),
            Some(statement) if node.kind() == "control_structure_body" => self.read_statement(statement),
            _ if node.kind() == "block" => self.read_block(node),
            _ => self.read_statement(node),
        }
    }

    fn read_statement(&mut self, node: Node) -> Result<Statement, ReadError> {
        let statement = match node.kind() {
            "property_declaration" => self.read_local(node)?,
            "assignment" => expression_statement(self.read_assignment(node)?),
            "if_expression" => self.read_if(node)?,
            "when_expression" => self.read_when(node)?,
            "while_statement" => {
                let condition = self.read_condition(node)?;
                let body = match child_of_kind(node, "control_structure_body") {
                    Some(body) => self.read_control_body(body)?,
                    None => EmptyStatementBuilder::new().build(),
                };
                WhileBuilder::new(condition).body(body).build()?
            }
            "do_while_statement" => {
                let condition = self.read_condition(node)?;
                let body = match child_of_kind(node, "control_structure_body") {
                    Some(body) => self.read_control_body(body)?,
                    None => BlockBuilder::new().build(),
                };
                DoWhileBuilder::new(condition).body(body).build()?
            }
            "try_expression" => self.read_try(node)?,
            "jump_expression" => self.read_jump(node)?,
            "block" => self.read_block(node)?,
            "for_statement" | "class_declaration" | "object_declaration" | "function_declaration" => {
                self.scope.unknown_statement(node)
            }
            _ => {
                let expression = self.read_expression(node)?;
                match expression {
                    Expression::Unknown(_) => self.scope.unknown_statement(node),
                    expression => expression_statement(expression),
                }
            }
        };
        Ok(statement)
    }

    fn read_local(&mut self, node: Node) -> Result<Statement, ReadError> {
        let Some(declaration) = child_of_kind(node, "variable_declaration") else {
            return Ok(self.scope.unknown_statement(node));
        };
        let name = self.name_of(declaration)?;
        let value = after_token(node, "=");
        let ty = match (type_child(declaration), value) {
            (Some(ty), _) => self.read_type(ty),
            (None, Some(value)) => self.scope.inferred_type(value).unwrap_or_else(|| self.any()),
            (None, None) => self.any(),
        };
        let mut builder = VariableDeclarationBuilder::new(name, ty)
            .mutable(has_token(node, "var"))
            .location(self.scope.location(node));
        if let Some(value) = value {
            builder = builder.initializer_expression(self.read_expression(value)?);
        }
        self.scope.declare_local(name);
        Ok(builder.build()?)
    }

    /// The parenthesized condition of `if`/`while`/`do-while`.
    fn read_condition(&mut self, node: Node) -> Result<Expression, ReadError> {
        let condition = after_token(node, "(").ok_or_else(|| self.unexpected("condition", node))?;
        self.read_expression(condition)
    }

    fn read_assignment(&mut self, node: Node) -> Result<Expression, ReadError> {
        let parts = operands(node);
        let [target, value] = parts.as_slice() else {
            return Ok(self.scope.unknown_expression(node));
        };
        let operator = assignment_operator(self.scope.text_between(*target, *value));
        let target = self.read_assignable(*target)?;
        let value = self.read_expression(*value)?;
        Ok(AssignmentBuilder::new(target, value)
            .operator(operator)
            .build())
    }

    /// Left-hand side of an assignment: a name or `receiver.member`.
    fn read_assignable(&mut self, node: Node) -> Result<Expression, ReadError> {
        if node.kind() != "directly_assignable_expression" {
            return self.read_expression(node);
        }
        let parts = named_children(node);
        match parts.as_slice() {
            [name] if name.kind() == "simple_identifier" => {
                Ok(self.scope.name_expression(self.scope.text(*name)))
            }
            [receiver, suffix] if suffix.kind() == "navigation_suffix" => {
                self.read_member_access(node, *receiver, *suffix)
            }
            _ => Ok(self.scope.unknown_expression(node)),
        }
    }

    fn read_if(&mut self, node: Node) -> Result<Statement, ReadError> {
        let condition = self.read_condition(node)?;
        let mut branches = Vec::new();
        for body in named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "control_structure_body")
        {
            branches.push(self.read_control_body(body)?);
        }
        let mut branches = branches.into_iter();
        let then = branches
            .next()
            .unwrap_or_else(|| EmptyStatementBuilder::new().build());
        let mut builder = IfBuilder::new(condition).then(then);
        if let Some(otherwise) = branches.next() {
            builder = builder.otherwise(otherwise);
        }
        Ok(builder.build()?)
    }

    fn read_when(&mut self, node: Node) -> Result<Statement, ReadError> {
        let Some(subject) = child_of_kind(node, "when_subject") else {
            return Ok(self.scope.unknown_statement(node));
        };
        let subject_value = operands(subject).into_iter().last();
        let (false, Some(subject_value)) = (has_token(subject, "val"), subject_value) else {
            return Ok(self.scope.unknown_statement(node));
        };
        let mut builder = SwitchBuilder::new(self.read_expression(subject_value)?);
        for entry in named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "when_entry")
        {
            let mut case = SwitchCaseBuilder::new();
            for condition in named_children(entry)
                .into_iter()
                .filter(|c| c.kind() == "when_condition")
            {
                let Some(value) = operands(condition).into_iter().next() else {
                    continue;
                };
                if matches!(value.kind(), "range_test" | "type_test") {
                    return Ok(self.scope.unknown_statement(node));
                }
                case = case.matching(self.read_expression(value)?);
            }
            let mut body = match child_of_kind(entry, "control_structure_body") {
                Some(body) => self.read_control_body(body)?.as_statements().to_vec(),
                None => Vec::new(),
            };
            body.push(BreakBuilder::new().build());
            builder = builder.case(case.body(BlockBuilder::new().statements(body).build()).build());
        }
        Ok(builder.build()?)
    }

    fn read_try(&mut self, node: Node) -> Result<Statement, ReadError> {
        let block = child_of_kind(node, "block").ok_or_else(|| self.unexpected("try block", node))?;
        let mut builder = TryCatchBuilder::new().try_block(self.read_block(block)?);
        for child in named_children(node) {
            match child.kind() {
                "catch_block" => {
                    let name = self.name_of(child)?;
                    let exception_type = match type_child(child) {
                        Some(ty) => self.read_type(ty),
                        None => self.scope.reference_type("Throwable", Vec::new(), false),
                    };
                    self.scope.push_locals();
                    self.scope.declare_local(name);
                    let body = match child_of_kind(child, "block") {
                        Some(block) => self.read_block(block)?,
                        None => BlockBuilder::new().build(),
                    };
                    self.scope.pop_locals();
                    builder = builder.catch(
                        CatchClauseBuilder::new(exception_type)
                            .exception_name(name)
                            .body(body)
                            .build(),
                    );
                }
                "finally_block" => {
                    if let Some(block) = child_of_kind(child, "block") {
                        builder = builder.finally_block(self.read_block(block)?);
                    }
                }
                _ => {}
            }
        }
        Ok(builder.build()?)
    }

    fn read_jump(&mut self, node: Node) -> Result<Statement, ReadError> {
        let Some(keyword) = node.child(0) else {
            return Ok(self.scope.unknown_statement(node));
        };
        // `return@label` and friends.
        if keyword.kind().contains('@') || child_of_kind(node, "label").is_some() {
            return Ok(self.scope.unknown_statement(node));
        }
        let value = operands(node).into_iter().last();
        Ok(match (keyword.kind(), value) {
            ("return", None) => ReturnBuilder::new().build(),
            ("return", Some(value)) => ReturnBuilder::new().value(self.read_expression(value)?).build(),
            ("throw", Some(value)) => ThrowBuilder::new(self.read_expression(value)?).build(),
            ("break", None) => BreakBuilder::new().build(),
            ("continue", None) => ContinueBuilder::new().build(),
            _ => self.scope.unknown_statement(node),
        })
    }

    // Expressions

    fn read_arguments(&mut self, node: Node) -> Result<Vec<Expression>, ReadError> {
        let mut arguments = Vec::new();
        for argument in named_children(node) {
            if let Some(value) = operands(argument).into_iter().last() {
                arguments.push(self.read_expression(value)?);
            }
        }
        Ok(arguments)
    }

    fn read_expression(&mut self, node: Node) -> Result<Expression, ReadError> {
        let expression = match node.kind() {
            "integer_literal" | "long_literal" | "hex_literal" | "bin_literal" | "unsigned_literal"
            | "real_literal" | "boolean_literal" | "character_literal" | "null" | "null_literal" => {
                LiteralBuilder::new(self.scope.text(node)).build()
            }
            "string_literal" | "line_string_literal" | "multi_line_string_literal"
                if !contains_kind(
                    node,
                    &["interpolated_expression", "interpolated_identifier", "interpolation"],
                ) =>
            {
                LiteralBuilder::new(self.scope.text(node)).build()
            }
            "simple_identifier" => self.scope.name_expression(self.scope.text(node)),
            "this_expression" | "super_expression"
                if matches!(self.scope.text(node), "this" | "super") =>
            {
                LiteralBuilder::new(self.scope.text(node)).build()
            }
            "parenthesized_expression" => match operands(node).into_iter().next() {
                Some(inner) => self
                    .read_expression(inner)?
                    .with_property(keys::PARENTHESIZED, true),
                None => self.scope.unknown_expression(node),
            },
            "navigation_expression" => {
                let parts = named_children(node);
                match parts.as_slice() {
                    [receiver, suffix] if suffix.kind() == "navigation_suffix" => {
                        self.read_member_access(node, *receiver, *suffix)?
                    }
                    _ => self.scope.unknown_expression(node),
                }
            }
            "call_expression" => self.read_call(node)?,
            "additive_expression"
            | "multiplicative_expression"
            | "comparison_expression"
            | "equality_expression"
            | "conjunction_expression"
            | "disjunction_expression"
            | "elvis_expression"
            | "range_expression" => {
                let parts = operands(node);
                let [left, right] = parts.as_slice() else {
                    return Ok(self.scope.unknown_expression(node));
                };
                let operator = binary_operator(self.scope.text_between(*left, *right));
                let left = self.read_expression(*left)?;
                let right = self.read_expression(*right)?;
                BinaryBuilder::new(left, operator, right).build()
            }
            "prefix_expression" => {
                let parts = operands(node);
                match (node.child(0), parts.last()) {
                    (Some(operator), Some(operand))
                        if !operator.is_named() && operator.id() != operand.id() =>
                    {
                        let operator = unary_operator(self.scope.text(operator));
                        let operand = self.read_expression(*operand)?;
                        UnaryBuilder::new(operator, operand).build()
                    }
                    _ => self.scope.unknown_expression(node),
                }
            }
            "postfix_expression" => {
                let parts = operands(node);
                let last = node.child(node.child_count().saturating_sub(1) as _);
                match (parts.first(), last) {
                    (Some(operand), Some(operator))
                        if !operator.is_named() && operator.id() != operand.id() =>
                    {
                        let operator = unary_operator(self.scope.text(operator));
                        let operand = self.read_expression(*operand)?;
                        UnaryBuilder::new(operator, operand).postfix().build()
                    }
                    _ => self.scope.unknown_expression(node),
                }
            }
            "as_expression" => {
                let parts = operands(node);
                match parts.as_slice() {
                    [value, target] if self.scope.text_between(*value, *target) == "as" => {
                        let target = self.read_type(*target);
                        let value = self.read_expression(*value)?;
                        CastBuilder::new(value, target).build()
                    }
                    _ => self.scope.unknown_expression(node),
                }
            }
            "check_expression" => {
                let parts = operands(node);
                match parts.as_slice() {
                    [value, checked] if self.scope.text_between(*value, *checked) == "is" => {
                        let checked = self.read_type(*checked);
                        let value = self.read_expression(*value)?;
                        TypeCheckBuilder::new(value, checked).build()
                    }
                    _ => self.scope.unknown_expression(node),
                }
            }
            "if_expression" => self.read_if_expression(node)?,
            "lambda_literal" => self.read_lambda(node)?,
            "annotated_lambda" => match child_of_kind(node, "lambda_literal") {
                Some(lambda) if named_children(node).len() == 1 => self.read_lambda(lambda)?,
                _ => self.scope.unknown_expression(node),
            },
            "assignment" => self.read_assignment(node)?,
            _ => self.scope.unknown_expression(node),
        };
        Ok(expression)
    }

    /// `receiver.member`. Safe calls (`?.`) and references (`::`) have no
    /// IR shape.
    fn read_member_access(
        &mut self,
        whole: Node,
        receiver: Node,
        suffix: Node,
    ) -> Result<Expression, ReadError> {
        let member = child_of_kind(suffix, "simple_identifier");
        let (true, Some(member)) = (has_token(suffix, "."), member) else {
            return Ok(self.scope.unknown_expression(whole));
        };
        let receiver = self.read_expression(receiver)?;
        Ok(member_access(receiver, self.scope.text(member))?)
    }

    fn read_call(&mut self, node: Node) -> Result<Expression, ReadError> {
        let parts = named_children(node);
        let [callee, suffix] = parts.as_slice() else {
            return Ok(self.scope.unknown_expression(node));
        };
        let mut arguments = Vec::new();
        let mut type_arguments = Vec::new();
        for child in named_children(*suffix) {
            match child.kind() {
                "value_arguments" => {
                    // Named and spread arguments have no IR shape.
                    let special = named_children(child)
                        .into_iter()
                        .any(|a| has_token(a, "=") || has_token(a, "*"));
                    if special {
                        return Ok(self.scope.unknown_expression(node));
                    }
                    arguments.extend(self.read_arguments(child)?);
                }
                "annotated_lambda" | "lambda_literal" => arguments.push(self.read_expression(child)?),
                "type_arguments" => {
                    for argument in named_children(child) {
                        type_arguments.push(self.read_type(argument));
                    }
                }
                _ => {}
            }
        }

        let (receiver, name) = match callee.kind() {
            "simple_identifier" => (None, self.scope.text(*callee)),
            "navigation_expression" => {
                let callee_parts = named_children(*callee);
                let [receiver, member_suffix] = callee_parts.as_slice() else {
                    return Ok(self.scope.unknown_expression(node));
                };
                let member = child_of_kind(*member_suffix, "simple_identifier");
                let (true, Some(member)) = (has_token(*member_suffix, "."), member) else {
                    return Ok(self.scope.unknown_expression(node));
                };
                (Some(*receiver), self.scope.text(member))
            }
            _ => return Ok(self.scope.unknown_expression(node)),
        };

        // `Point(1, 2)` constructs.
        if receiver.is_none() && self.scope.reference_kind(name) == ReferenceKind::Class {
            let class_name = self.scope.qualified_name(name).unwrap_or_else(|| name.to_string());
            return Ok(ObjectCreationBuilder::new(class_name)
                .arguments(arguments)
                .build()?);
        }
        let mut builder = MethodCallBuilder::new(name).arguments(arguments);
        if let Some(receiver) = receiver {
            builder = builder.receiver(self.read_expression(receiver)?);
        }
        for ty in type_arguments {
            builder = builder.type_argument(ty);
        }
        if let Some(call) = self.scope.resolved_call(node) {
            builder = builder.kind(call.kind);
        }
        Ok(builder.build()?)
    }

    /// `if (c) a else b` as a value reads as a ternary when both branches
    /// are single expressions.
    fn read_if_expression(&mut self, node: Node) -> Result<Expression, ReadError> {
        let branches: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "control_structure_body")
            .collect();
        let [then, otherwise] = branches.as_slice() else {
            return Ok(self.scope.unknown_expression(node));
        };
        let then = self.read_control_body(*then)?;
        let otherwise = self.read_control_body(*otherwise)?;
        match (then.as_statements(), otherwise.as_statements()) {
            ([then], [otherwise]) => match (then.as_expression(), otherwise.as_expression()) {
                (Some(then), Some(otherwise)) => {
                    let condition = self.read_condition(node)?;
                    Ok(TernaryBuilder::new(condition, then.clone(), otherwise.clone()).build())
                }
                _ => Ok(self.scope.unknown_expression(node)),
            },
            _ => Ok(self.scope.unknown_expression(node)),
        }
    }

    fn read_lambda(&mut self, node: Node) -> Result<Expression, ReadError> {
        self.scope.push_locals();
        let mut builder = LambdaBuilder::new();
        if let Some(parameters) = child_of_kind(node, "lambda_parameters") {
            for parameter in named_children(parameters) {
                let Some(name) = declared_name(parameter) else {
                    continue;
                };
                let name = self.scope.text(name);
                let ty = match type_child(parameter) {
                    Some(ty) => self.read_type(ty),
                    None => self.scope.inferred_type(parameter).unwrap_or_else(|| self.any()),
                };
                self.scope.declare_local(name);
                builder = builder.parameter(ParameterBuilder::new(name, ty).build()?);
            }
        }

        let mut statements = Vec::new();
        for child in statement_nodes(node) {
            statements.push(self.read_statement(child)?);
        }
        self.scope.pop_locals();
        // The value of a single-expression lambda is that expression.
        if let [Statement::Expression(only)] = statements.as_slice() {
            statements = vec![ReturnBuilder::new().value(only.expression.clone()).build()];
        }
        Ok(builder
            .body(BlockBuilder::new().statements(statements).build())
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoContext;

    fn read(source: &str) -> File {
        read_kotlin("Test.kt", source, &NoContext).unwrap()
    }

    #[test]
    fn header_properties_become_fields() {
        let file = read("package geo\n\nclass Point(val x: Int, var y: Int, scale: Double = 1.0)\n");
        assert_eq!(file.package(), Some("geo"));
        let point = file.class("Point").unwrap();
        assert_eq!(point.qualified_name.as_deref(), Some("geo.Point"));
        assert_eq!(point.fields.len(), 2);
        assert!(!point.field("x").unwrap().is_mutable);
        assert!(point.field("y").unwrap().is_mutable);

        let constructor = point.constructors().next().unwrap();
        assert!(constructor.meta.language_properties.flag(keys::PRIMARY));
        assert_eq!(constructor.parameters.len(), 3);
        assert!(constructor.parameters[2].default_value.is_some());
        assert_eq!(constructor.body.as_ref().unwrap().statements.len(), 2);
    }

    #[test]
    fn builtin_types_are_primitives() {
        let file = read("class A {\n    val n: Int = 0\n    var s: String? = null\n    fun f(): Unit {}\n}\n");
        let a = file.class("A").unwrap();
        let n = &a.field("n").unwrap().ir_type;
        assert_eq!(n.as_primitive(), Some(PrimitiveType::Int));
        assert!(!n.is_nullable());
        let s = &a.field("s").unwrap().ir_type;
        assert!(s.is_nullable());
        let Type::Reference(string) = s else {
            panic!("expected a reference type");
        };
        assert_eq!(
            string.referenced_class_qualified_name.as_deref(),
            Some("java.lang.String")
        );
        let f = a.plain_methods().next().unwrap();
        assert!(f.return_type.is_void());
        assert!(!f.return_type.is_nullable());
    }

    #[test]
    fn interfaces_objects_and_enums() {
        let file = read(
            "interface Shape { fun area(): Double }\nobject Registry\nenum class Color(val code: Int) { RED(1), GREEN(2) }\n",
        );
        let shape = file.class("Shape").unwrap();
        assert_eq!(shape.kind, ClassKind::Interface);
        assert!(shape.plain_methods().next().unwrap().is_abstract);
        assert_eq!(file.class("Registry").unwrap().kind, ClassKind::Object);

        let color = file.class("Color").unwrap();
        assert_eq!(color.kind, ClassKind::Enum);
        let red = color.field("RED").unwrap();
        assert!(red.meta.language_properties.flag(keys::ENUM_ENTRY));
        assert!(matches!(
            red.initializer_expression(),
            Some(Expression::ObjectCreation(_))
        ));
    }

    #[test]
    fn supertypes_and_secondary_constructors() {
        let file = read(
            "open class Base(val id: Int)\nclass Child(id: Int) : Base(id), Comparable<Child> {\n    constructor() : this(0)\n    override fun compareTo(other: Child): Int = 0\n}\n",
        );
        let child = file.class("Child").unwrap();
        assert_eq!(child.super_classes.len(), 2);
        assert_eq!(child.super_classes[0].kind, ClassKind::Class);
        assert_eq!(child.super_classes[1].kind, ClassKind::Interface);

        let constructors: Vec<_> = child.constructors().collect();
        let primary = constructors[0].other_constructor_call.as_ref().unwrap();
        assert_eq!(primary.ir_method_call_kind, MethodCallKind::Super);
        let secondary = constructors[1].other_constructor_call.as_ref().unwrap();
        assert_eq!(secondary.ir_method_call_kind, MethodCallKind::This);

        let compare = child.plain_methods().next().unwrap();
        assert!(compare.is_override);
        assert_eq!(compare.return_type.as_primitive(), Some(PrimitiveType::Int));
        assert!(file.class("Base").unwrap().meta.language_properties.flag(keys::OPEN));
    }

    #[test]
    fn statements_convert_one_by_one() {
        let file = read(
            "class A {\n    fun f(n: Int): Int {\n        var total = 0\n        while (total < n) {\n            total += 1\n        }\n        if (total > 3) { return 3 } else { total = 0 }\n        for (i in 0..n) { total += i }\n        return total\n    }\n}\n",
        );
        let body = &file.class("A").unwrap().plain_methods().next().unwrap().body;
        let kinds: Vec<_> = body
            .as_ref()
            .unwrap()
            .statements
            .iter()
            .map(Statement::kind_name)
            .collect();
        assert_eq!(
            kinds,
            vec!["variable declaration", "while", "if", "unknown", "return"]
        );
    }

    #[test]
    fn constructor_calls_and_lambdas() {
        let file = read(
            "class P(val x: Int)\nclass A {\n    fun f() {\n        val p = P(1)\n        val g = { a: Int -> a + 1 }\n    }\n}\n",
        );
        let body = file.class("A").unwrap().plain_methods().next().unwrap().body.clone().unwrap();
        let Statement::VariableDeclaration(p) = &body.statements[0] else {
            panic!("expected declaration");
        };
        assert!(matches!(
            p.initializer.as_deref().and_then(Statement::as_expression),
            Some(Expression::ObjectCreation(_))
        ));
        let Statement::VariableDeclaration(g) = &body.statements[1] else {
            panic!("expected declaration");
        };
        let Some(Expression::Lambda(lambda)) = g.initializer.as_deref().and_then(Statement::as_expression)
        else {
            panic!("expected lambda");
        };
        assert_eq!(lambda.parameters.len(), 1);
        assert!(matches!(lambda.body.as_ref(), Statement::Block(_)));
    }
}
