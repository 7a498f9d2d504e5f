//! IR expressions.

use super::decl::Parameter;
use super::meta::SyntaxMeta;
use super::ops::{AssignmentOperator, BinaryOperator, MethodCallKind, UnaryOperator};
use super::stmt::Statement;
use super::types::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrEmptyExpression")]
    Empty(EmptyExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrLiteralExpression")]
    Literal(LiteralExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrIdentifierExpression")]
    Identifier(IdentifierExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeReferenceIdentifierExpression")]
    TypeReferenceIdentifier(TypeReferenceIdentifierExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrPropertyAccessExpression")]
    PropertyAccess(PropertyAccessExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression")]
    MethodCall(MethodCallExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrObjectCreationExpression")]
    ObjectCreation(ObjectCreationExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression")]
    Binary(BinaryExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression")]
    Unary(UnaryExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression")]
    Assignment(AssignmentExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTernaryExpression")]
    Ternary(TernaryExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrCastExpression")]
    Cast(CastExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeCheckExpression")]
    TypeCheck(TypeCheckExpression),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrExpressionUnknown")]
    Unknown(UnknownExpression),
    /// Kotlin-style lambda. An extension node: only some targets can emit it.
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.kotlin.ir.IrLambdaExpression")]
    Lambda(LambdaExpression),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyExpression {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// A literal, kept as its raw source text (`42`, `"hi"`, `'c'`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpression {
    pub value: String,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// `qualifier.selector`, where the selector may itself be a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierExpression {
    #[serde(default)]
    pub qualifier: Option<Box<Expression>>,
    pub selector: Box<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// An identifier that names a type, and so may need an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReferenceIdentifierExpression {
    pub referenced_type: Type,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAccessExpression {
    #[serde(default)]
    pub receiver: Option<Box<Expression>>,
    pub property_name: String,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodCallExpression {
    #[serde(default)]
    pub receiver: Option<Box<Expression>>,
    pub method_name: String,
    #[serde(default)]
    pub value_arguments: Vec<Expression>,
    #[serde(default)]
    pub type_arguments: Vec<Type>,
    #[serde(default)]
    pub ir_method_call_kind: MethodCallKind,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCreationExpression {
    pub class_name: String,
    #[serde(default)]
    pub constructor_args: Vec<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub is_prefix: bool,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub operator: AssignmentOperator,
    pub value: Box<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TernaryExpression {
    pub condition: Box<Expression>,
    pub if_true: Box<Expression>,
    pub if_false: Box<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastExpression {
    pub expression: Box<Expression>,
    pub target_type: Type,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCheckExpression {
    pub expression: Box<Expression>,
    pub check_type: Type,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// A construct with no IR shape. The verbatim source lives in
/// `meta.string_representation`, keyed by the language it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownExpression {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaExpression {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<Type>,
    pub body: Box<Statement>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

impl Expression {
    pub fn meta(&self) -> &SyntaxMeta {
        match self {
            Expression::Empty(e) => &e.meta,
            Expression::Literal(e) => &e.meta,
            Expression::Identifier(e) => &e.meta,
            Expression::TypeReferenceIdentifier(e) => &e.meta,
            Expression::PropertyAccess(e) => &e.meta,
            Expression::MethodCall(e) => &e.meta,
            Expression::ObjectCreation(e) => &e.meta,
            Expression::Binary(e) => &e.meta,
            Expression::Unary(e) => &e.meta,
            Expression::Assignment(e) => &e.meta,
            Expression::Ternary(e) => &e.meta,
            Expression::Cast(e) => &e.meta,
            Expression::TypeCheck(e) => &e.meta,
            Expression::Unknown(e) => &e.meta,
            Expression::Lambda(e) => &e.meta,
        }
    }

    pub(crate) fn meta_mut(&mut self) -> &mut SyntaxMeta {
        match self {
            Expression::Empty(e) => &mut e.meta,
            Expression::Literal(e) => &mut e.meta,
            Expression::Identifier(e) => &mut e.meta,
            Expression::TypeReferenceIdentifier(e) => &mut e.meta,
            Expression::PropertyAccess(e) => &mut e.meta,
            Expression::MethodCall(e) => &mut e.meta,
            Expression::ObjectCreation(e) => &mut e.meta,
            Expression::Binary(e) => &mut e.meta,
            Expression::Unary(e) => &mut e.meta,
            Expression::Assignment(e) => &mut e.meta,
            Expression::Ternary(e) => &mut e.meta,
            Expression::Cast(e) => &mut e.meta,
            Expression::TypeCheck(e) => &mut e.meta,
            Expression::Unknown(e) => &mut e.meta,
            Expression::Lambda(e) => &mut e.meta,
        }
    }

    /// Copy of this expression with one language property set.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<super::properties::PropertyValue>,
    ) -> Self {
        self.meta_mut().element.language_properties.insert(key, value);
        self
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Empty(_) => "empty",
            Expression::Literal(_) => "literal",
            Expression::Identifier(_) => "identifier",
            Expression::TypeReferenceIdentifier(_) => "type reference",
            Expression::PropertyAccess(_) => "property access",
            Expression::MethodCall(_) => "method call",
            Expression::ObjectCreation(_) => "object creation",
            Expression::Binary(_) => "binary",
            Expression::Unary(_) => "unary",
            Expression::Assignment(_) => "assignment",
            Expression::Ternary(_) => "ternary",
            Expression::Cast(_) => "cast",
            Expression::TypeCheck(_) => "type check",
            Expression::Unknown(_) => "unknown",
            Expression::Lambda(_) => "lambda",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Expression::Unknown(_))
    }
}
