//! The IR model.
//!
//! A closed tree of immutable nodes. Trees are assembled bottom-up through
//! [`crate::builders`]; a pass that needs to change a node builds a
//! replacement instead of mutating in place.

mod decl;
mod expr;
mod file;
mod meta;
mod ops;
pub mod properties;
mod stmt;
mod structure_eq;
mod types;
mod visibility;

pub use decl::{
    Callable, Class, ClassInitializer, Constructor, Declaration, Field, InitializerKind, Method,
    MethodBody, Parameter, SuperClass, TypeParameter,
};
pub use expr::{
    AssignmentExpression, BinaryExpression, CastExpression, EmptyExpression, Expression,
    IdentifierExpression, LambdaExpression, LiteralExpression, MethodCallExpression,
    ObjectCreationExpression, PropertyAccessExpression, TernaryExpression, TypeCheckExpression,
    TypeReferenceIdentifierExpression, UnaryExpression, UnknownExpression,
};
pub use file::{File, Import};
pub use meta::{
    Annotation, AnnotationParameter, ElementMeta, Location, StringRepresentation, SyntaxMeta,
    representation_for,
};
pub use ops::{AssignmentOperator, BinaryOperator, MethodCallKind, UnaryOperator};
pub use properties::{PropertyBag, PropertyValue};
pub use stmt::{
    BlockStatement, BreakStatement, CatchClause, ContinueStatement, DoWhileStatement,
    EmptyStatement, ExpressionStatement, ForStatement, IfStatement, ReturnStatement, Statement,
    SwitchCase, SwitchStatement, ThrowStatement, TryCatchStatement, UnknownStatement,
    VariableDeclarationStatement, WhileStatement,
};
pub use structure_eq::{Normalize, StructureEq};
pub use types::{PrimitiveType, Type, TypeArray, TypeFunction, TypeGeneric, TypePrimitive, TypeReference};
pub use visibility::{ClassKind, Visibility};
