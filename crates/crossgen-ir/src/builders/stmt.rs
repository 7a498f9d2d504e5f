//! Statement builders.

use super::{BuildError, require};
use crate::ir::{
    BlockStatement, BreakStatement, CatchClause, ContinueStatement, DoWhileStatement,
    EmptyStatement, Expression, ExpressionStatement, ForStatement, IfStatement, ReturnStatement,
    Statement, SwitchCase, SwitchStatement, SyntaxMeta, ThrowStatement, TryCatchStatement, Type,
    UnknownStatement, VariableDeclarationStatement, WhileStatement,
};

#[derive(Debug, Clone, Default)]
pub struct EmptyStatementBuilder {
    meta: SyntaxMeta,
}

impl EmptyStatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Empty(EmptyStatement { meta: self.meta })
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStatementBuilder {
    expression: Expression,
    meta: SyntaxMeta,
}

impl ExpressionStatementBuilder {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Expression(ExpressionStatement {
            expression: self.expression,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationBuilder {
    name: String,
    ir_type: Type,
    additional_names: Vec<String>,
    mutable: bool,
    initializer: Option<Statement>,
    meta: SyntaxMeta,
}

impl VariableDeclarationBuilder {
    pub fn new(name: impl Into<String>, ir_type: Type) -> Self {
        Self {
            name: name.into(),
            ir_type,
            additional_names: Vec::new(),
            mutable: true,
            initializer: None,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn additional_name(mut self, name: impl Into<String>) -> Self {
        self.additional_names.push(name.into());
        self
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    pub fn initializer(mut self, initializer: Statement) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Shorthand for an expression-statement initializer.
    pub fn initializer_expression(self, expression: Expression) -> Self {
        self.initializer(ExpressionStatementBuilder::new(expression).build())
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("variable declaration"));
        }
        Ok(Statement::VariableDeclaration(VariableDeclarationStatement {
            name: self.name,
            ir_type: self.ir_type,
            additional_names: self.additional_names,
            is_mutable: self.mutable,
            initializer: self.initializer.map(Box::new),
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockBuilder {
    statements: Vec<Statement>,
    meta: SyntaxMeta,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn statements(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.statements.extend(statements);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Block(BlockStatement {
            statements: self.statements,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct IfBuilder {
    condition: Expression,
    then_statement: Option<Statement>,
    else_statement: Option<Statement>,
    meta: SyntaxMeta,
}

impl IfBuilder {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition,
            then_statement: None,
            else_statement: None,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn then(mut self, statement: Statement) -> Self {
        self.then_statement = Some(statement);
        self
    }

    pub fn otherwise(mut self, statement: Statement) -> Self {
        self.else_statement = Some(statement);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        let then_statement = require(self.then_statement, "if", "", "then")?;
        Ok(Statement::If(IfStatement {
            condition: self.condition,
            then_statement: Box::new(then_statement),
            else_statement: self.else_statement.map(Box::new),
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForBuilder {
    initializer: Option<Statement>,
    condition: Option<Expression>,
    update: Option<Statement>,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl ForBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initializer(mut self, statement: Statement) -> Self {
        self.initializer = Some(statement);
        self
    }

    pub fn condition(mut self, condition: Expression) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn update(mut self, statement: Statement) -> Self {
        self.update = Some(statement);
        self
    }

    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        let body = require(self.body, "for", "", "body")?;
        Ok(Statement::For(ForStatement {
            initializer: self.initializer.map(Box::new),
            condition: self.condition,
            update: self.update.map(Box::new),
            body: Box::new(body),
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct WhileBuilder {
    condition: Expression,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl WhileBuilder {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition,
            body: None,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        let body = require(self.body, "while", "", "body")?;
        Ok(Statement::While(WhileStatement {
            condition: self.condition,
            body: Box::new(body),
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct DoWhileBuilder {
    condition: Expression,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl DoWhileBuilder {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition,
            body: None,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        let body = require(self.body, "do-while", "", "body")?;
        Ok(Statement::DoWhile(DoWhileStatement {
            body: Box::new(body),
            condition: self.condition,
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct SwitchBuilder {
    expression: Expression,
    cases: Vec<SwitchCase>,
    meta: SyntaxMeta,
}

impl SwitchBuilder {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            cases: Vec::new(),
            meta: SyntaxMeta::default(),
        }
    }

    pub fn case(mut self, case: SwitchCase) -> Self {
        self.cases.push(case);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        if self.cases.iter().filter(|c| c.is_default()).count() > 1 {
            return Err(BuildError::Invalid {
                node: "switch",
                message: "more than one default case".into(),
            });
        }
        Ok(Statement::Switch(SwitchStatement {
            expression: self.expression,
            cases: self.cases,
            meta: self.meta,
        }))
    }
}

/// One switch arm. With no match expressions it is the `default` arm.
#[derive(Debug, Clone, Default)]
pub struct SwitchCaseBuilder {
    match_expressions: Vec<Expression>,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl SwitchCaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matching(mut self, expression: Expression) -> Self {
        self.match_expressions.push(expression);
        self
    }

    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> SwitchCase {
        SwitchCase {
            match_expressions: self.match_expressions,
            body: self.body.map(Box::new),
            meta: self.meta,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReturnBuilder {
    expression: Option<Expression>,
    meta: SyntaxMeta,
}

impl ReturnBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, expression: Expression) -> Self {
        self.expression = Some(expression);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Return(ReturnStatement {
            expression: self.expression,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BreakBuilder {
    meta: SyntaxMeta,
}

impl BreakBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Break(BreakStatement { meta: self.meta })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContinueBuilder {
    meta: SyntaxMeta,
}

impl ContinueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Continue(ContinueStatement { meta: self.meta })
    }
}

#[derive(Debug, Clone)]
pub struct ThrowBuilder {
    expression: Expression,
    meta: SyntaxMeta,
}

impl ThrowBuilder {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Throw(ThrowStatement {
            expression: self.expression,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TryCatchBuilder {
    try_block: Option<Statement>,
    catch_clauses: Vec<CatchClause>,
    finally_block: Option<Statement>,
    meta: SyntaxMeta,
}

impl TryCatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_block(mut self, block: Statement) -> Self {
        self.try_block = Some(block);
        self
    }

    pub fn catch(mut self, clause: CatchClause) -> Self {
        self.catch_clauses.push(clause);
        self
    }

    pub fn finally_block(mut self, block: Statement) -> Self {
        self.finally_block = Some(block);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Statement, BuildError> {
        let try_block = require(self.try_block, "try-catch", "", "try block")?;
        Ok(Statement::TryCatch(TryCatchStatement {
            try_block: Box::new(try_block),
            catch_clauses: self.catch_clauses,
            finally_block: self.finally_block.map(Box::new),
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct CatchClauseBuilder {
    exception_type: Type,
    exception_name: Option<String>,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl CatchClauseBuilder {
    pub fn new(exception_type: Type) -> Self {
        Self {
            exception_type,
            exception_name: None,
            body: None,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn exception_name(mut self, name: impl Into<String>) -> Self {
        self.exception_name = Some(name.into());
        self
    }

    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> CatchClause {
        CatchClause {
            exception_type: self.exception_type,
            exception_name: self.exception_name,
            body: self.body.map(Box::new),
            meta: self.meta,
        }
    }
}

/// Degradation target for statements.
#[derive(Debug, Clone)]
pub struct UnknownStatementBuilder {
    meta: SyntaxMeta,
}

impl UnknownStatementBuilder {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            meta: SyntaxMeta::default(),
        }
        .representation(language, text)
    }

    syntax_setters!();

    pub fn build(self) -> Statement {
        Statement::Unknown(UnknownStatement { meta: self.meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{LiteralBuilder, PrimitiveTypeBuilder};
    use crate::ir::PrimitiveType;

    #[test]
    fn control_flow_needs_a_body() {
        let cond = || LiteralBuilder::new("true").build();
        assert!(IfBuilder::new(cond()).build().is_err());
        assert!(WhileBuilder::new(cond()).build().is_err());
        assert!(DoWhileBuilder::new(cond()).build().is_err());
        assert!(ForBuilder::new().build().is_err());
        assert!(TryCatchBuilder::new().build().is_err());
        assert!(
            IfBuilder::new(cond())
                .then(BlockBuilder::new().build())
                .build()
                .is_ok()
        );
    }

    #[test]
    fn variables_default_to_mutable() {
        let int = PrimitiveTypeBuilder::new(PrimitiveType::Int)
            .nullable(false)
            .build();
        let Statement::VariableDeclaration(v) = VariableDeclarationBuilder::new("i", int)
            .initializer_expression(LiteralBuilder::new("0").build())
            .build()
            .unwrap()
        else {
            panic!("expected a variable declaration");
        };
        assert!(v.is_mutable);
        assert!(v.initializer.is_some());
    }

    #[test]
    fn switch_rejects_two_defaults() {
        let result = SwitchBuilder::new(LiteralBuilder::new("x").build())
            .case(SwitchCaseBuilder::new().build())
            .case(SwitchCaseBuilder::new().build())
            .build();
        assert!(matches!(result, Err(BuildError::Invalid { .. })));
    }
}
