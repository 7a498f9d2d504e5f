//! Structural equality for IR trees.
//!
//! `structure_eq` compares IR trees ignoring "surface hints": fields that
//! record how or where something was written but not what it means.
//!
//! # Hint Fields (normalized during comparison)
//!
//! - `location` on every node - provenance only
//! - `string_representation` on visibilities - per-language spelling
//! - `string_representation` on statements and expressions, except the
//!   unknown variants where it is the payload
//!
//! # Core Fields (must match exactly)
//!
//! - All names, kinds, operators, flags and language properties
//! - Types including nullability
//! - Statement and expression trees

use super::*;

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores surface hint fields that may differ
/// between front ends but don't affect the declared program.
pub trait StructureEq {
    fn structure_eq(&self, other: &Self) -> bool;
}

impl<T: Clone + PartialEq + Normalize> StructureEq for T {
    fn structure_eq(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.normalize();
        b.normalize();
        a == b
    }
}

/// Strip hint fields in place. Applied to private copies only.
pub trait Normalize {
    fn normalize(&mut self);
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&mut self) {
        self.iter_mut().for_each(Normalize::normalize);
    }
}

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&mut self) {
        if let Some(inner) = self {
            inner.normalize();
        }
    }
}

impl<T: Normalize> Normalize for Box<T> {
    fn normalize(&mut self) {
        (**self).normalize();
    }
}

impl Normalize for ElementMeta {
    fn normalize(&mut self) {
        self.location = None;
        for annotation in &mut self.annotations {
            for parameter in &mut annotation.parameters {
                parameter.parameter_value.normalize();
            }
        }
    }
}

/// Statements and expressions: drop renderings unless they are the payload.
fn normalize_syntax(meta: &mut SyntaxMeta, keep_representation: bool) {
    meta.element.normalize();
    if !keep_representation {
        meta.string_representation.clear();
    }
}

impl Normalize for Visibility {
    fn normalize(&mut self) {
        *self = match self {
            Visibility::Public { .. } => Visibility::public(),
            Visibility::Protected { .. } => Visibility::protected(),
            Visibility::Internal { .. } => Visibility::internal(),
            Visibility::Private { .. } => Visibility::private(),
            Visibility::Open { .. } => Visibility::Open {
                string_representation: Vec::new(),
            },
            Visibility::Fileprivate { .. } => Visibility::Fileprivate {
                string_representation: Vec::new(),
            },
            Visibility::PackagePrivate { .. } => Visibility::package_private(),
            Visibility::Other { token, .. } => Visibility::other(token.clone()),
        };
    }
}

impl Normalize for Type {
    fn normalize(&mut self) {
        match self {
            Type::Reference(t) => {
                t.meta.normalize();
                t.type_parameters.normalize();
            }
            Type::Primitive(t) => t.meta.normalize(),
            Type::Function(t) => {
                t.meta.normalize();
                t.parameter_types.normalize();
                t.return_type.normalize();
            }
            Type::Array(t) => {
                t.meta.normalize();
                t.element_type.normalize();
            }
            Type::Generic(t) => t.meta.normalize(),
        }
    }
}

impl Normalize for Expression {
    fn normalize(&mut self) {
        let keep = self.is_unknown();
        match self {
            Expression::Empty(_) | Expression::Literal(_) | Expression::Unknown(_) => {}
            Expression::Identifier(e) => {
                e.qualifier.normalize();
                e.selector.normalize();
            }
            Expression::TypeReferenceIdentifier(e) => e.referenced_type.normalize(),
            Expression::PropertyAccess(e) => e.receiver.normalize(),
            Expression::MethodCall(e) => e.normalize(),
            Expression::ObjectCreation(e) => e.constructor_args.normalize(),
            Expression::Binary(e) => {
                e.left.normalize();
                e.right.normalize();
            }
            Expression::Unary(e) => e.operand.normalize(),
            Expression::Assignment(e) => {
                e.target.normalize();
                e.value.normalize();
            }
            Expression::Ternary(e) => {
                e.condition.normalize();
                e.if_true.normalize();
                e.if_false.normalize();
            }
            Expression::Cast(e) => {
                e.expression.normalize();
                e.target_type.normalize();
            }
            Expression::TypeCheck(e) => {
                e.expression.normalize();
                e.check_type.normalize();
            }
            Expression::Lambda(e) => {
                e.parameters.normalize();
                e.return_type.normalize();
                e.body.normalize();
            }
        }
        normalize_syntax(self.meta_mut(), keep);
    }
}

impl Normalize for MethodCallExpression {
    fn normalize(&mut self) {
        normalize_syntax(&mut self.meta, false);
        self.receiver.normalize();
        self.value_arguments.normalize();
        self.type_arguments.normalize();
    }
}

impl Normalize for Statement {
    fn normalize(&mut self) {
        match self {
            Statement::Empty(s) => normalize_syntax(&mut s.meta, false),
            Statement::Expression(s) => {
                normalize_syntax(&mut s.meta, false);
                s.expression.normalize();
            }
            Statement::VariableDeclaration(s) => {
                normalize_syntax(&mut s.meta, false);
                s.ir_type.normalize();
                s.initializer.normalize();
            }
            Statement::Block(s) => {
                normalize_syntax(&mut s.meta, false);
                s.statements.normalize();
            }
            Statement::If(s) => {
                normalize_syntax(&mut s.meta, false);
                s.condition.normalize();
                s.then_statement.normalize();
                s.else_statement.normalize();
            }
            Statement::For(s) => {
                normalize_syntax(&mut s.meta, false);
                s.initializer.normalize();
                s.condition.normalize();
                s.update.normalize();
                s.body.normalize();
            }
            Statement::While(s) => {
                normalize_syntax(&mut s.meta, false);
                s.condition.normalize();
                s.body.normalize();
            }
            Statement::DoWhile(s) => {
                normalize_syntax(&mut s.meta, false);
                s.body.normalize();
                s.condition.normalize();
            }
            Statement::Switch(s) => {
                normalize_syntax(&mut s.meta, false);
                s.expression.normalize();
                for case in &mut s.cases {
                    normalize_syntax(&mut case.meta, false);
                    case.match_expressions.normalize();
                    case.body.normalize();
                }
            }
            Statement::Return(s) => {
                normalize_syntax(&mut s.meta, false);
                s.expression.normalize();
            }
            Statement::Break(s) => normalize_syntax(&mut s.meta, false),
            Statement::Continue(s) => normalize_syntax(&mut s.meta, false),
            Statement::Throw(s) => {
                normalize_syntax(&mut s.meta, false);
                s.expression.normalize();
            }
            Statement::TryCatch(s) => {
                normalize_syntax(&mut s.meta, false);
                s.try_block.normalize();
                for clause in &mut s.catch_clauses {
                    normalize_syntax(&mut clause.meta, false);
                    clause.exception_type.normalize();
                    clause.body.normalize();
                }
                s.finally_block.normalize();
            }
            Statement::Unknown(s) => normalize_syntax(&mut s.meta, true),
        }
    }
}

impl Normalize for TypeParameter {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.extends_list.normalize();
    }
}

impl Normalize for Parameter {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.ir_type.normalize();
        self.default_value.normalize();
    }
}

impl Normalize for MethodBody {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.statements.normalize();
    }
}

impl Normalize for Field {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.ir_type.normalize();
        self.visibility.normalize();
        self.initializer.normalize();
    }
}

impl Normalize for Method {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.return_type.normalize();
        self.parameters.normalize();
        self.type_parameters.normalize();
        self.body.normalize();
        self.visibility.normalize();
    }
}

impl Normalize for Constructor {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.other_constructor_call.normalize();
        self.return_type.normalize();
        self.parameters.normalize();
        self.type_parameters.normalize();
        self.body.normalize();
        self.visibility.normalize();
    }
}

impl Normalize for Callable {
    fn normalize(&mut self) {
        match self {
            Callable::Method(m) => m.normalize(),
            Callable::Constructor(c) => c.normalize(),
        }
    }
}

impl Normalize for Class {
    fn normalize(&mut self) {
        self.meta.normalize();
        self.visibility.normalize();
        self.type_parameters.normalize();
        for superclass in &mut self.super_classes {
            superclass.meta.normalize();
            superclass.types.normalize();
        }
        self.fields.normalize();
        self.methods.normalize();
        for initializer in &mut self.initializers {
            initializer.meta.normalize();
            initializer.body.normalize();
        }
        self.nested_classes.normalize();
    }
}

impl Normalize for Declaration {
    fn normalize(&mut self) {
        match self {
            Declaration::Class(c) => c.normalize(),
            Declaration::Field(f) => f.normalize(),
            Declaration::Method(m) => m.normalize(),
        }
    }
}

impl Normalize for File {
    fn normalize(&mut self) {
        for import in &mut self.imports {
            import.meta.normalize();
        }
        self.declarations.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &str, location: Option<Location>) -> Expression {
        Expression::Literal(LiteralExpression {
            value: value.into(),
            meta: SyntaxMeta {
                string_representation: vec![StringRepresentation::new("java", value)],
                element: ElementMeta {
                    location,
                    ..ElementMeta::default()
                },
            },
        })
    }

    #[test]
    fn ignores_locations_and_renderings() {
        let a = literal("1", Some(Location::new("A.java", 3, 7)));
        let b = literal("1", None);
        assert_ne!(a, b);
        assert!(a.structure_eq(&b));
        assert!(!a.structure_eq(&literal("2", None)));
    }

    #[test]
    fn unknown_payload_still_compared() {
        let unknown = |text: &str| {
            Expression::Unknown(UnknownExpression {
                meta: SyntaxMeta {
                    string_representation: vec![StringRepresentation::new("java", text)],
                    element: ElementMeta::default(),
                },
            })
        };
        assert!(unknown("a::b").structure_eq(&unknown("a::b")));
        assert!(!unknown("a::b").structure_eq(&unknown("a::c")));
    }

    #[test]
    fn visibility_spelling_is_a_hint() {
        let java = Visibility::from_keyword("java", "public");
        let kotlin = Visibility::from_keyword("kotlin", "public");
        assert!(java.structure_eq(&kotlin));
        assert!(!java.structure_eq(&Visibility::private()));
    }
}
