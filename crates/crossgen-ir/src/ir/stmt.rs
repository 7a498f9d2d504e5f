//! IR statements.

use super::expr::Expression;
use super::meta::SyntaxMeta;
use super::types::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrEmptyStatement")]
    Empty(EmptyStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrExpressionStatement")]
    Expression(ExpressionStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVariableDeclarationStatement")]
    VariableDeclaration(VariableDeclarationStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBlockStatement")]
    Block(BlockStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrIfStatement")]
    If(IfStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrForStatement")]
    For(ForStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrWhileStatement")]
    While(WhileStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrDoWhileStatement")]
    DoWhile(DoWhileStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrSwitchStatement")]
    Switch(SwitchStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrReturnStatement")]
    Return(ReturnStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrBreakStatement")]
    Break(BreakStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrContinueStatement")]
    Continue(ContinueStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrThrowStatement")]
    Throw(ThrowStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTryCatchStatement")]
    TryCatch(TryCatchStatement),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrStatementUnknown")]
    Unknown(UnknownStatement),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyStatement {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// `name` plus any `additional_names` declared in the same statement
/// (`int a, b, c;`) share one type and initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarationStatement {
    pub name: String,
    pub ir_type: Type,
    #[serde(default)]
    pub additional_names: Vec<String>,
    pub is_mutable: bool,
    #[serde(default)]
    pub initializer: Option<Box<Statement>>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    pub condition: Expression,
    pub then_statement: Box<Statement>,
    #[serde(default)]
    pub else_statement: Option<Box<Statement>>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    #[serde(default)]
    pub initializer: Option<Box<Statement>>,
    #[serde(default)]
    pub condition: Option<Expression>,
    #[serde(default)]
    pub update: Option<Box<Statement>>,
    pub body: Box<Statement>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub condition: Expression,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub expression: Expression,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// One arm of a switch. No match expressions means `default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename = "com.voxeldev.mcodegen.dsl.ir.IrSwitchStatement.IrSwitchStatementCase"
)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCase {
    #[serde(default)]
    pub match_expressions: Vec<Expression>,
    #[serde(default)]
    pub body: Option<Box<Statement>>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

impl SwitchCase {
    pub fn is_default(&self) -> bool {
        self.match_expressions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub expression: Option<Expression>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakStatement {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinueStatement {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub expression: Expression,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryCatchStatement {
    pub try_block: Box<Statement>,
    #[serde(default)]
    pub catch_clauses: Vec<CatchClause>,
    #[serde(default)]
    pub finally_block: Option<Box<Statement>>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename = "com.voxeldev.mcodegen.dsl.ir.IrTryCatchStatement.IrTryCatchStatementClause"
)]
#[serde(rename_all = "camelCase")]
pub struct CatchClause {
    pub exception_type: Type,
    #[serde(default)]
    pub exception_name: Option<String>,
    #[serde(default)]
    pub body: Option<Box<Statement>>,
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

/// A construct with no IR shape; see [`UnknownExpression`](super::expr::UnknownExpression).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownStatement {
    #[serde(flatten)]
    pub meta: SyntaxMeta,
}

impl Statement {
    pub fn meta(&self) -> &SyntaxMeta {
        match self {
            Statement::Empty(s) => &s.meta,
            Statement::Expression(s) => &s.meta,
            Statement::VariableDeclaration(s) => &s.meta,
            Statement::Block(s) => &s.meta,
            Statement::If(s) => &s.meta,
            Statement::For(s) => &s.meta,
            Statement::While(s) => &s.meta,
            Statement::DoWhile(s) => &s.meta,
            Statement::Switch(s) => &s.meta,
            Statement::Return(s) => &s.meta,
            Statement::Break(s) => &s.meta,
            Statement::Continue(s) => &s.meta,
            Statement::Throw(s) => &s.meta,
            Statement::TryCatch(s) => &s.meta,
            Statement::Unknown(s) => &s.meta,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Empty(_) => "empty",
            Statement::Expression(_) => "expression",
            Statement::VariableDeclaration(_) => "variable declaration",
            Statement::Block(_) => "block",
            Statement::If(_) => "if",
            Statement::For(_) => "for",
            Statement::While(_) => "while",
            Statement::DoWhile(_) => "do-while",
            Statement::Switch(_) => "switch",
            Statement::Return(_) => "return",
            Statement::Break(_) => "break",
            Statement::Continue(_) => "continue",
            Statement::Throw(_) => "throw",
            Statement::TryCatch(_) => "try-catch",
            Statement::Unknown(_) => "unknown",
        }
    }

    /// Statements of a block, or the statement itself for anything else.
    pub fn as_statements(&self) -> &[Statement] {
        match self {
            Statement::Block(b) => &b.statements,
            other => std::slice::from_ref(other),
        }
    }

    /// The expression of an expression statement.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Statement::Expression(s) => Some(&s.expression),
            _ => None,
        }
    }
}
