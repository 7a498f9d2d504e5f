//! Operator and call-kind vocabularies.
//!
//! Each set is open: `Other` carries the raw token of an operator the core
//! vocabulary does not enumerate (identity equality, ranges, elvis, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BinaryOperator {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Plus")]
    Plus,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Minus")]
    Minus,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Multiply")]
    Multiply,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Divide")]
    Divide,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Modulo")]
    Modulo,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Equals")]
    Equals,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.NotEquals")]
    NotEquals,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Greater")]
    Greater,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.GreaterOrEqual"
    )]
    GreaterOrEqual,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Less")]
    Less,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.LessOrEqual"
    )]
    LessOrEqual,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.And")]
    And,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Or")]
    Or,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseAnd"
    )]
    BitwiseAnd,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseOr")]
    BitwiseOr,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseXor"
    )]
    BitwiseXor,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.ShiftLeft")]
    ShiftLeft,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.ShiftRight"
    )]
    ShiftRight,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Other")]
    Other { token: String },
}

impl BinaryOperator {
    pub const KNOWN: [BinaryOperator; 18] = [
        BinaryOperator::Plus,
        BinaryOperator::Minus,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
        BinaryOperator::Equals,
        BinaryOperator::NotEquals,
        BinaryOperator::Greater,
        BinaryOperator::GreaterOrEqual,
        BinaryOperator::Less,
        BinaryOperator::LessOrEqual,
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::BitwiseAnd,
        BinaryOperator::BitwiseOr,
        BinaryOperator::BitwiseXor,
        BinaryOperator::ShiftLeft,
        BinaryOperator::ShiftRight,
    ];

    pub fn other(token: impl Into<String>) -> Self {
        BinaryOperator::Other {
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UnaryOperator {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Not")]
    Not,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Plus")]
    Plus,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Minus")]
    Minus,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Increment")]
    Increment,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Decrement")]
    Decrement,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Other")]
    Other { token: String },
}

impl UnaryOperator {
    pub const KNOWN: [UnaryOperator; 5] = [
        UnaryOperator::Not,
        UnaryOperator::Plus,
        UnaryOperator::Minus,
        UnaryOperator::Increment,
        UnaryOperator::Decrement,
    ];

    pub fn other(token: impl Into<String>) -> Self {
        UnaryOperator::Other {
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssignmentOperator {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.Assign")]
    Assign,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.PlusAssign"
    )]
    PlusAssign,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.MinusAssign"
    )]
    MinusAssign,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.MultiplyAssign"
    )]
    MultiplyAssign,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.DivideAssign"
    )]
    DivideAssign,
    #[serde(
        rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.ModuloAssign"
    )]
    ModuloAssign,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.Other")]
    Other { token: String },
}

impl AssignmentOperator {
    pub const KNOWN: [AssignmentOperator; 6] = [
        AssignmentOperator::Assign,
        AssignmentOperator::PlusAssign,
        AssignmentOperator::MinusAssign,
        AssignmentOperator::MultiplyAssign,
        AssignmentOperator::DivideAssign,
        AssignmentOperator::ModuloAssign,
    ];

    pub fn other(token: impl Into<String>) -> Self {
        AssignmentOperator::Other {
            token: token.into(),
        }
    }
}

/// How a method call dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MethodCallKind {
    #[default]
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrDefaultMethodCallKind")]
    Default,
    /// `this(...)` delegation.
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrThisMethodCallKind")]
    This,
    /// `super(...)` delegation.
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrSuperMethodCallKind")]
    Super,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrOtherMethodCallKind")]
    Other { token: String },
}

impl MethodCallKind {
    pub const KNOWN: [MethodCallKind; 3] = [
        MethodCallKind::Default,
        MethodCallKind::This,
        MethodCallKind::Super,
    ];
}
