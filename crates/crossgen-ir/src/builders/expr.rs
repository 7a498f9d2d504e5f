//! Expression builders.

use super::{BuildError, require};
use crate::ir::{
    AssignmentExpression, AssignmentOperator, BinaryExpression, BinaryOperator, CastExpression,
    EmptyExpression, Expression, IdentifierExpression, LambdaExpression, LiteralExpression,
    MethodCallExpression, MethodCallKind, ObjectCreationExpression, Parameter,
    PropertyAccessExpression, Statement, SyntaxMeta, TernaryExpression, Type,
    TypeCheckExpression, TypeReferenceIdentifierExpression, UnaryExpression, UnaryOperator,
    UnknownExpression,
};

#[derive(Debug, Clone, Default)]
pub struct EmptyExpressionBuilder {
    meta: SyntaxMeta,
}

impl EmptyExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Empty(EmptyExpression { meta: self.meta })
    }
}

#[derive(Debug, Clone)]
pub struct LiteralBuilder {
    value: String,
    meta: SyntaxMeta,
}

impl LiteralBuilder {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Literal(LiteralExpression {
            value: self.value,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct IdentifierBuilder {
    qualifier: Option<Expression>,
    selector: Expression,
    meta: SyntaxMeta,
}

impl IdentifierBuilder {
    pub fn new(selector: Expression) -> Self {
        Self {
            qualifier: None,
            selector,
            meta: SyntaxMeta::default(),
        }
    }

    /// A bare name: the selector is a literal holding `name`.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(LiteralBuilder::new(name).build())
    }

    pub fn qualifier(mut self, qualifier: Expression) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Identifier(IdentifierExpression {
            qualifier: self.qualifier.map(Box::new),
            selector: Box::new(self.selector),
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TypeReferenceIdentifierBuilder {
    referenced_type: Type,
    meta: SyntaxMeta,
}

impl TypeReferenceIdentifierBuilder {
    pub fn new(referenced_type: Type) -> Self {
        Self {
            referenced_type,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::TypeReferenceIdentifier(TypeReferenceIdentifierExpression {
            referenced_type: self.referenced_type,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PropertyAccessBuilder {
    receiver: Option<Expression>,
    property_name: String,
    meta: SyntaxMeta,
}

impl PropertyAccessBuilder {
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            receiver: None,
            property_name: property_name.into(),
            meta: SyntaxMeta::default(),
        }
    }

    pub fn receiver(mut self, receiver: Expression) -> Self {
        self.receiver = Some(receiver);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Expression, BuildError> {
        if self.property_name.is_empty() {
            return Err(BuildError::empty_name("property access"));
        }
        Ok(Expression::PropertyAccess(PropertyAccessExpression {
            receiver: self.receiver.map(Box::new),
            property_name: self.property_name,
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct MethodCallBuilder {
    receiver: Option<Expression>,
    method_name: String,
    value_arguments: Vec<Expression>,
    type_arguments: Vec<Type>,
    kind: MethodCallKind,
    meta: SyntaxMeta,
}

impl MethodCallBuilder {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            receiver: None,
            method_name: method_name.into(),
            value_arguments: Vec::new(),
            type_arguments: Vec::new(),
            kind: MethodCallKind::Default,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn receiver(mut self, receiver: Expression) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn argument(mut self, argument: Expression) -> Self {
        self.value_arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Expression>) -> Self {
        self.value_arguments.extend(arguments);
        self
    }

    pub fn type_argument(mut self, ty: Type) -> Self {
        self.type_arguments.push(ty);
        self
    }

    pub fn kind(mut self, kind: MethodCallKind) -> Self {
        self.kind = kind;
        self
    }

    syntax_setters!();

    /// Build the bare call node, for places that hold a call rather than
    /// an arbitrary expression (delegating constructor calls).
    pub fn build_call(self) -> Result<MethodCallExpression, BuildError> {
        if self.method_name.is_empty() {
            return Err(BuildError::empty_name("method call"));
        }
        Ok(MethodCallExpression {
            receiver: self.receiver.map(Box::new),
            method_name: self.method_name,
            value_arguments: self.value_arguments,
            type_arguments: self.type_arguments,
            ir_method_call_kind: self.kind,
            meta: self.meta,
        })
    }

    pub fn build(self) -> Result<Expression, BuildError> {
        self.build_call().map(Expression::MethodCall)
    }
}

#[derive(Debug, Clone)]
pub struct ObjectCreationBuilder {
    class_name: String,
    constructor_args: Vec<Expression>,
    meta: SyntaxMeta,
}

impl ObjectCreationBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            constructor_args: Vec::new(),
            meta: SyntaxMeta::default(),
        }
    }

    pub fn argument(mut self, argument: Expression) -> Self {
        self.constructor_args.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Expression>) -> Self {
        self.constructor_args.extend(arguments);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Expression, BuildError> {
        if self.class_name.is_empty() {
            return Err(BuildError::empty_name("object creation"));
        }
        Ok(Expression::ObjectCreation(ObjectCreationExpression {
            class_name: self.class_name,
            constructor_args: self.constructor_args,
            meta: self.meta,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct BinaryBuilder {
    left: Expression,
    operator: BinaryOperator,
    right: Expression,
    meta: SyntaxMeta,
}

impl BinaryBuilder {
    pub fn new(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Self {
            left,
            operator,
            right,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Binary(BinaryExpression {
            left: Box::new(self.left),
            operator: self.operator,
            right: Box::new(self.right),
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UnaryBuilder {
    operator: UnaryOperator,
    operand: Expression,
    prefix: bool,
    meta: SyntaxMeta,
}

impl UnaryBuilder {
    pub fn new(operator: UnaryOperator, operand: Expression) -> Self {
        Self {
            operator,
            operand,
            prefix: true,
            meta: SyntaxMeta::default(),
        }
    }

    /// `i++` rather than `++i`.
    pub fn postfix(mut self) -> Self {
        self.prefix = false;
        self
    }

    pub fn prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Unary(UnaryExpression {
            operator: self.operator,
            operand: Box::new(self.operand),
            is_prefix: self.prefix,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentBuilder {
    target: Expression,
    operator: AssignmentOperator,
    value: Expression,
    meta: SyntaxMeta,
}

impl AssignmentBuilder {
    pub fn new(target: Expression, value: Expression) -> Self {
        Self {
            target,
            operator: AssignmentOperator::Assign,
            value,
            meta: SyntaxMeta::default(),
        }
    }

    pub fn operator(mut self, operator: AssignmentOperator) -> Self {
        self.operator = operator;
        self
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Assignment(AssignmentExpression {
            target: Box::new(self.target),
            operator: self.operator,
            value: Box::new(self.value),
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TernaryBuilder {
    condition: Expression,
    if_true: Expression,
    if_false: Expression,
    meta: SyntaxMeta,
}

impl TernaryBuilder {
    pub fn new(condition: Expression, if_true: Expression, if_false: Expression) -> Self {
        Self {
            condition,
            if_true,
            if_false,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Ternary(TernaryExpression {
            condition: Box::new(self.condition),
            if_true: Box::new(self.if_true),
            if_false: Box::new(self.if_false),
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CastBuilder {
    expression: Expression,
    target_type: Type,
    meta: SyntaxMeta,
}

impl CastBuilder {
    pub fn new(expression: Expression, target_type: Type) -> Self {
        Self {
            expression,
            target_type,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Cast(CastExpression {
            expression: Box::new(self.expression),
            target_type: self.target_type,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TypeCheckBuilder {
    expression: Expression,
    check_type: Type,
    meta: SyntaxMeta,
}

impl TypeCheckBuilder {
    pub fn new(expression: Expression, check_type: Type) -> Self {
        Self {
            expression,
            check_type,
            meta: SyntaxMeta::default(),
        }
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::TypeCheck(TypeCheckExpression {
            expression: Box::new(self.expression),
            check_type: self.check_type,
            meta: self.meta,
        })
    }
}

/// Degradation target of every front end.
#[derive(Debug, Clone)]
pub struct UnknownExpressionBuilder {
    meta: SyntaxMeta,
}

impl UnknownExpressionBuilder {
    /// An unknown carrying `text` verbatim as `language`'s rendering.
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            meta: SyntaxMeta::default(),
        }
        .representation(language, text)
    }

    syntax_setters!();

    pub fn build(self) -> Expression {
        Expression::Unknown(UnknownExpression { meta: self.meta })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LambdaBuilder {
    parameters: Vec<Parameter>,
    return_type: Option<Type>,
    body: Option<Statement>,
    meta: SyntaxMeta,
}

impl LambdaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn return_type(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// The body. Must be a block statement.
    pub fn body(mut self, body: Statement) -> Self {
        self.body = Some(body);
        self
    }

    syntax_setters!();

    pub fn build(self) -> Result<Expression, BuildError> {
        let body = require(self.body, "lambda", "", "body")?;
        if !matches!(body, Statement::Block(_)) {
            return Err(BuildError::Invalid {
                node: "lambda",
                message: format!("body must be a block, got {}", body.kind_name()),
            });
        }
        Ok(Expression::Lambda(LambdaExpression {
            parameters: self.parameters,
            return_type: self.return_type,
            body: Box::new(body),
            meta: self.meta,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::BlockBuilder;

    #[test]
    fn unknown_keeps_text_verbatim() {
        let text = "a -> { return b::c; }";
        let e = UnknownExpressionBuilder::new("java", text).build();
        assert_eq!(e.meta().representation("java"), Some(text));
        assert!(e.is_unknown());
    }

    #[test]
    fn method_call_requires_a_name() {
        assert!(MethodCallBuilder::new("").build().is_err());
        let call = MethodCallBuilder::new("println")
            .receiver(IdentifierBuilder::simple("out").build())
            .argument(LiteralBuilder::new("\"hi\"").build())
            .build_call()
            .unwrap();
        assert_eq!(call.ir_method_call_kind, MethodCallKind::Default);
        assert_eq!(call.value_arguments.len(), 1);
    }

    #[test]
    fn lambda_body_must_be_a_block() {
        assert!(matches!(
            LambdaBuilder::new().build(),
            Err(BuildError::MissingField { field: "body", .. })
        ));
        let e = LambdaBuilder::new()
            .body(BlockBuilder::new().build())
            .build()
            .unwrap();
        assert_eq!(e.kind_name(), "lambda");
    }

    #[test]
    fn unary_defaults_to_prefix() {
        let Expression::Unary(u) =
            UnaryBuilder::new(UnaryOperator::Increment, IdentifierBuilder::simple("i").build())
                .build()
        else {
            panic!("expected unary");
        };
        assert!(u.is_prefix);
    }
}
