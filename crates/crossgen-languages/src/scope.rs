//! Per-file conversion state for the tree-sitter readers.
//!
//! A [`ConversionScope`] lives for exactly one `read` call. It owns the type
//! memo (qualified identity to the `Type` already built for it), the stack of
//! classes being converted, and the local names visible at the current point
//! of a method body. Nothing in it outlives the file.

use crate::traits::{
    ReferenceKind, ResolutionContext, ResolvedCall, SourceSpan, SyntacticResolver,
};
use crossgen_ir::builders::{
    BuildError, IdentifierBuilder, LiteralBuilder, PropertyAccessBuilder, SuperClassBuilder,
    TypeReferenceBuilder, TypeReferenceIdentifierBuilder, UnknownExpressionBuilder,
    UnknownStatementBuilder,
};
use crossgen_ir::{ClassKind, Expression, Location, Statement, Type};
use std::collections::{HashMap, HashSet};
use tracing::trace;
use tree_sitter::Node;

pub struct ConversionScope<'a> {
    language: &'static str,
    file_name: &'a str,
    source: &'a str,
    context: &'a dyn ResolutionContext,
    resolver: SyntacticResolver,
    types: HashMap<String, Type>,
    classes: Vec<String>,
    locals: Vec<HashSet<String>>,
}

impl<'a> ConversionScope<'a> {
    pub fn new(
        language: &'static str,
        file_name: &'a str,
        source: &'a str,
        context: &'a dyn ResolutionContext,
        resolver: SyntacticResolver,
    ) -> Self {
        Self {
            language,
            file_name,
            source,
            context,
            resolver,
            types: HashMap::new(),
            classes: Vec::new(),
            locals: Vec::new(),
        }
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn resolver(&self) -> &SyntacticResolver {
        &self.resolver
    }

    pub fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Source text strictly between two sibling nodes, trimmed. Operators
    /// that the grammar leaves anonymous are read this way.
    pub fn text_between(&self, left: Node, right: Node) -> &'a str {
        self.source
            .get(left.end_byte()..right.start_byte())
            .unwrap_or("")
            .trim()
    }

    pub fn span(&self, node: Node) -> SourceSpan {
        SourceSpan::new(node.start_byte(), node.end_byte())
    }

    pub fn location(&self, node: Node) -> Location {
        let position = node.start_position();
        Location::new(
            self.file_name,
            position.row as u32 + 1,
            position.column as u32 + 1,
        )
    }

    /// Qualified name for a type name as written. The caller's context wins
    /// over what the file says about itself; then classes nested in the
    /// enclosing classes are tried, innermost first.
    pub fn qualified_name(&self, written: &str) -> Option<String> {
        if let Some(name) = self.context.qualified_name(written) {
            return Some(name);
        }
        if let Some(name) = self.resolver.qualified_name(written) {
            return Some(name);
        }
        let (head, rest) = match written.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (written, None),
        };
        let head = self
            .classes
            .iter()
            .rev()
            .map(|outer| format!("{outer}.{head}"))
            .find(|candidate| self.types.contains_key(candidate))
            .or_else(|| self.resolver.qualified_name(head))?;
        Some(match rest {
            Some(rest) => format!("{head}.{rest}"),
            None => head,
        })
    }

    /// Record a class declared in this file before any member is converted,
    /// so self-references and forward references resolve to one identity.
    pub fn register_class(&mut self, simple: &str, qualified: &str) {
        self.resolver.add_class(simple, qualified);
        self.types
            .entry(qualified.to_string())
            .or_insert_with(|| TypeReferenceBuilder::qualified(qualified).build());
    }

    /// The type of a class declared in this file, by qualified name.
    pub fn class_type(&mut self, qualified: &str, nullable: bool) -> Type {
        self.types
            .entry(qualified.to_string())
            .or_insert_with(|| TypeReferenceBuilder::qualified(qualified).build())
            .with_nullable(nullable)
    }

    /// The reference type for a name as written, with its type arguments.
    ///
    /// Built once per identity; later requests for the same identity clone
    /// the memoized node with the requested nullability.
    pub fn reference_type(&mut self, written: &str, arguments: Vec<Type>, nullable: bool) -> Type {
        let qualified = self.qualified_name(written);
        let candidate = match &qualified {
            Some(qualified) => TypeReferenceBuilder::qualified(qualified.as_str()),
            // Already qualified in source.
            None if written.contains('.') => TypeReferenceBuilder::qualified(written),
            None => TypeReferenceBuilder::new(written),
        }
        .type_parameters(arguments)
        .build();
        let key = candidate.with_nullable(false).display_name();
        if let Some(known) = self.types.get(&key) {
            trace!(language = self.language, ty = %key, "type memo hit");
            return known.with_nullable(nullable);
        }
        self.types.insert(key, candidate.clone());
        candidate.with_nullable(nullable)
    }

    pub fn enter_class(&mut self, qualified: &str) {
        self.classes.push(qualified.to_string());
    }

    pub fn exit_class(&mut self) {
        self.classes.pop();
    }

    pub fn current_class(&self) -> Option<&str> {
        self.classes.last().map(String::as_str)
    }

    pub fn push_locals(&mut self) {
        self.locals.push(HashSet::new());
    }

    pub fn pop_locals(&mut self) {
        self.locals.pop();
    }

    pub fn declare_local(&mut self, name: &str) {
        if let Some(frame) = self.locals.last_mut() {
            frame.insert(name.to_string());
        }
    }

    /// What a bare name refers to at this point. Locals shadow everything.
    pub fn reference_kind(&self, name: &str) -> ReferenceKind {
        if self.locals.iter().any(|frame| frame.contains(name)) {
            return ReferenceKind::Local;
        }
        match self.context.reference_kind(name) {
            ReferenceKind::Unresolved => self.resolver.reference_kind(name),
            kind => kind,
        }
    }

    /// A bare name: a type reference when it names a class, else an
    /// identifier.
    pub fn name_expression(&mut self, name: &str) -> Expression {
        match self.reference_kind(name) {
            ReferenceKind::Class => {
                TypeReferenceIdentifierBuilder::new(self.reference_type(name, Vec::new(), false))
                    .build()
            }
            _ => IdentifierBuilder::simple(name).build(),
        }
    }

    pub fn inferred_type(&self, node: Node) -> Option<Type> {
        self.context.inferred_type(self.span(node))
    }

    pub fn resolved_call(&self, node: Node) -> Option<ResolvedCall> {
        self.context.resolved_call(self.span(node))
    }

    /// A statement the IR has no shape for, kept byte for byte.
    pub fn unknown_statement(&self, node: Node) -> Statement {
        trace!(language = self.language, kind = node.kind(), "unknown statement");
        UnknownStatementBuilder::new(self.language, self.text(node))
            .location(self.location(node))
            .build()
    }

    /// An expression the IR has no shape for, kept byte for byte.
    pub fn unknown_expression(&self, node: Node) -> Expression {
        trace!(language = self.language, kind = node.kind(), "unknown expression");
        UnknownExpressionBuilder::new(self.language, self.text(node))
            .location(self.location(node))
            .build()
    }
}

/// `receiver.member`. Names and `this`/`super` extend an identifier chain;
/// a computed receiver gets a property access.
pub fn member_access(receiver: Expression, member: &str) -> Result<Expression, BuildError> {
    match receiver {
        Expression::Literal(_) | Expression::Identifier(_) | Expression::TypeReferenceIdentifier(_) => {
            Ok(IdentifierBuilder::new(LiteralBuilder::new(member).build())
                .qualifier(receiver)
                .build())
        }
        receiver => PropertyAccessBuilder::new(member).receiver(receiver).build(),
    }
}

/// Super-type entry for a type as read from source.
pub fn super_class_of(ty: &Type, kind: ClassKind) -> SuperClassBuilder {
    match ty {
        Type::Reference(reference) => {
            let mut builder =
                SuperClassBuilder::new(reference.referenced_class_simple_name.as_str(), kind);
            if let Some(qualified) = &reference.referenced_class_qualified_name {
                builder = builder.qualified_name(qualified.as_str());
            }
            for argument in &reference.type_parameters {
                builder = builder.type_argument(argument.clone());
            }
            builder
        }
        other => SuperClassBuilder::new(other.display_name(), kind),
    }
}

/// Named children of `node` in source order, comments excluded.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

/// First named child of `node` with the given kind.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|c| c.kind() == kind)
}

/// Whether `node` has an anonymous child spelled `token`.
pub fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == token)
}
