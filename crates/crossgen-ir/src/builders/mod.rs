//! Builders: the sanctioned way to construct IR nodes.
//!
//! Every node kind has a builder. Required attributes are positional
//! arguments of `new`; everything else has a fluent setter that consumes
//! and returns the builder. Collections default to empty, `is_nullable` to
//! `true`, other flags to `false`.
//!
//! `build(self)` consumes the builder and either returns an immutable node
//! or fails with a [`BuildError`] naming the missing attribute. Builders are
//! plain owned values: clone one to build twice.
//!
//! ```
//! use crossgen_ir::builders::{ClassBuilder, FieldBuilder, PrimitiveTypeBuilder};
//! use crossgen_ir::{PrimitiveType, Visibility};
//!
//! let int = PrimitiveTypeBuilder::new(PrimitiveType::Int).nullable(false).build();
//! let class = ClassBuilder::new("Point")
//!     .visibility(Visibility::public())
//!     .field(FieldBuilder::new("x", int.clone()).visibility(Visibility::public()).build()?)
//!     .field(FieldBuilder::new("y", int).visibility(Visibility::public()).build()?)
//!     .build()?;
//! assert_eq!(class.fields.len(), 2);
//! # Ok::<(), crossgen_ir::BuildError>(())
//! ```

/// Setters for builders whose node embeds an [`ElementMeta`](crate::ElementMeta)
/// as `self.meta`.
macro_rules! element_setters {
    () => {
        /// Record where the node came from.
        pub fn location(mut self, location: $crate::ir::Location) -> Self {
            self.meta.location = Some(location);
            self
        }

        pub fn annotation(mut self, annotation: $crate::ir::Annotation) -> Self {
            self.meta.annotations.push(annotation);
            self
        }

        pub fn annotations(
            mut self,
            annotations: impl IntoIterator<Item = $crate::ir::Annotation>,
        ) -> Self {
            self.meta.annotations.extend(annotations);
            self
        }

        /// Set one language property.
        pub fn property(
            mut self,
            key: impl Into<String>,
            value: impl Into<$crate::ir::PropertyValue>,
        ) -> Self {
            self.meta.language_properties.insert(key, value);
            self
        }

        /// Set every property of `bag`, keeping properties already set.
        pub fn properties(mut self, bag: &$crate::ir::PropertyBag) -> Self {
            for (key, value) in bag.iter() {
                self.meta.language_properties.insert(key, value.clone());
            }
            self
        }
    };
}

/// Setters for builders whose node embeds a [`SyntaxMeta`](crate::SyntaxMeta)
/// as `self.meta`.
macro_rules! syntax_setters {
    () => {
        /// Record where the node came from.
        pub fn location(mut self, location: $crate::ir::Location) -> Self {
            self.meta.element.location = Some(location);
            self
        }

        pub fn annotation(mut self, annotation: $crate::ir::Annotation) -> Self {
            self.meta.element.annotations.push(annotation);
            self
        }

        /// Set one language property.
        pub fn property(
            mut self,
            key: impl Into<String>,
            value: impl Into<$crate::ir::PropertyValue>,
        ) -> Self {
            self.meta.element.language_properties.insert(key, value);
            self
        }

        /// Record how `language` spells this node.
        pub fn representation(
            mut self,
            language: impl Into<String>,
            text: impl Into<String>,
        ) -> Self {
            self.meta
                .string_representation
                .push($crate::ir::StringRepresentation::new(language, text));
            self
        }
    };
}

mod decl;
mod expr;
mod file;
mod stmt;
mod types;

pub use decl::{
    AnnotationBuilder, ClassBuilder, ClassInitializerBuilder, ConstructorBuilder, FieldBuilder,
    MethodBodyBuilder, MethodBuilder, ParameterBuilder, SuperClassBuilder, TypeParameterBuilder,
};
pub use expr::{
    AssignmentBuilder, BinaryBuilder, CastBuilder, EmptyExpressionBuilder, IdentifierBuilder,
    LambdaBuilder, LiteralBuilder, MethodCallBuilder, ObjectCreationBuilder, PropertyAccessBuilder,
    TernaryBuilder, TypeCheckBuilder, TypeReferenceIdentifierBuilder, UnaryBuilder,
    UnknownExpressionBuilder,
};
pub use file::{FileBuilder, ImportBuilder};
pub use stmt::{
    BlockBuilder, BreakBuilder, CatchClauseBuilder, ContinueBuilder, DoWhileBuilder,
    EmptyStatementBuilder, ExpressionStatementBuilder, ForBuilder, IfBuilder, ReturnBuilder,
    SwitchBuilder, SwitchCaseBuilder, ThrowBuilder, TryCatchBuilder, UnknownStatementBuilder,
    VariableDeclarationBuilder, WhileBuilder,
};
pub use types::{
    ArrayTypeBuilder, FunctionTypeBuilder, GenericTypeBuilder, PrimitiveTypeBuilder,
    TypeReferenceBuilder,
};

/// A node could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{node} `{name}`: required `{field}` was never set")]
    MissingField {
        node: &'static str,
        name: String,
        field: &'static str,
    },

    #[error("{node}: {message}")]
    Invalid { node: &'static str, message: String },
}

impl BuildError {
    pub(crate) fn missing(node: &'static str, name: impl Into<String>, field: &'static str) -> Self {
        BuildError::MissingField {
            node,
            name: name.into(),
            field,
        }
    }

    pub(crate) fn empty_name(node: &'static str) -> Self {
        BuildError::Invalid {
            node,
            message: "name must not be empty".into(),
        }
    }
}

/// Fail with `MissingField` when `value` is `None`.
pub(crate) fn require<T>(
    value: Option<T>,
    node: &'static str,
    name: &str,
    field: &'static str,
) -> Result<T, BuildError> {
    value.ok_or_else(|| BuildError::missing(node, name, field))
}
