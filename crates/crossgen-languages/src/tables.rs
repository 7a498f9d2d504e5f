//! Per-target lookup tables for modifiers and operators.
//!
//! Back ends never branch on a modifier key or an operator variant; they
//! look the token up here. Adding a target keyword means adding a table
//! row.

use crate::traits::GenerateError;
use crossgen_ir::properties::keys;
use crossgen_ir::{AssignmentOperator, BinaryOperator, MethodCallKind, PropertyBag, UnaryOperator};
use tracing::warn;

/// Outcome of a modifier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Keyword(&'static str),
    /// The key has no spelling in this target.
    Omit,
}

/// Language-property key (or structural flag) to target keyword.
#[derive(Debug)]
pub struct ModifierTable {
    entries: &'static [(&'static str, &'static str)],
}

impl ModifierTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Never fails: keys without a row are omitted.
    pub fn lookup(&self, key: &str) -> Modifier {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(Modifier::Omit, |(_, keyword)| Modifier::Keyword(keyword))
    }

    /// Keywords for the set flags of `properties`, in canonical order,
    /// skipping `except`.
    pub fn keywords(&self, properties: &PropertyBag, except: &[&str]) -> Vec<&'static str> {
        properties
            .set_modifiers()
            .filter(|key| !except.contains(key))
            .filter_map(|key| match self.lookup(key) {
                Modifier::Keyword(keyword) => Some(keyword),
                Modifier::Omit => None,
            })
            .collect()
    }

    /// Keyword for a structural flag, when the flag is set and the target
    /// spells it.
    pub fn flag(&self, set: bool, key: &str) -> Option<&'static str> {
        match (set, self.lookup(key)) {
            (true, Modifier::Keyword(keyword)) => Some(keyword),
            _ => None,
        }
    }
}

/// Operator and call-kind tokens for one target.
#[derive(Debug)]
pub struct OperatorTable {
    language: &'static str,
    binary: &'static [(BinaryOperator, &'static str)],
    unary: &'static [(UnaryOperator, &'static str)],
    assignment: &'static [(AssignmentOperator, &'static str)],
    call_kinds: &'static [(MethodCallKind, Option<&'static str>)],
}

impl OperatorTable {
    pub const fn new(
        language: &'static str,
        binary: &'static [(BinaryOperator, &'static str)],
        unary: &'static [(UnaryOperator, &'static str)],
        assignment: &'static [(AssignmentOperator, &'static str)],
        call_kinds: &'static [(MethodCallKind, Option<&'static str>)],
    ) -> Self {
        Self {
            language,
            binary,
            unary,
            assignment,
            call_kinds,
        }
    }

    pub fn binary<'a>(&self, op: &'a BinaryOperator) -> Result<&'a str, GenerateError> {
        if let BinaryOperator::Other { token } = op {
            return Ok(token);
        }
        find(self.binary, op).ok_or_else(|| self.missing("binary operator", op))
    }

    pub fn unary<'a>(&self, op: &'a UnaryOperator) -> Result<&'a str, GenerateError> {
        if let UnaryOperator::Other { token } = op {
            return Ok(token);
        }
        find(self.unary, op).ok_or_else(|| self.missing("unary operator", op))
    }

    pub fn assignment<'a>(&self, op: &'a AssignmentOperator) -> Result<&'a str, GenerateError> {
        if let AssignmentOperator::Other { token } = op {
            return Ok(token);
        }
        find(self.assignment, op).ok_or_else(|| self.missing("assignment operator", op))
    }

    /// Callee token for a call kind. `None` means "call by method name".
    pub fn call_kind<'a>(&self, kind: &'a MethodCallKind) -> Result<Option<&'a str>, GenerateError> {
        if let MethodCallKind::Other { token } = kind {
            return Ok(Some(token));
        }
        self.call_kinds
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, token)| *token)
            .ok_or_else(|| self.missing("call kind", kind))
    }

    fn missing(&self, what: &str, value: &dyn std::fmt::Debug) -> GenerateError {
        warn!(language = self.language, what, value = ?value, "operator table has no row");
        GenerateError::unsupported(
            format!("{what} {value:?}"),
            format!("no token in the {} operator table", self.language),
        )
    }
}

fn find<T: PartialEq>(rows: &'static [(T, &'static str)], op: &T) -> Option<&'static str> {
    rows.iter().find(|(k, _)| k == op).map(|(_, token)| *token)
}

/// Operator rows shared by the C-family targets.
pub(crate) const C_BINARY: &[(BinaryOperator, &str)] = &[
    (BinaryOperator::Plus, "+"),
    (BinaryOperator::Minus, "-"),
    (BinaryOperator::Multiply, "*"),
    (BinaryOperator::Divide, "/"),
    (BinaryOperator::Modulo, "%"),
    (BinaryOperator::Equals, "=="),
    (BinaryOperator::NotEquals, "!="),
    (BinaryOperator::Greater, ">"),
    (BinaryOperator::GreaterOrEqual, ">="),
    (BinaryOperator::Less, "<"),
    (BinaryOperator::LessOrEqual, "<="),
    (BinaryOperator::And, "&&"),
    (BinaryOperator::Or, "||"),
    (BinaryOperator::BitwiseAnd, "&"),
    (BinaryOperator::BitwiseOr, "|"),
    (BinaryOperator::BitwiseXor, "^"),
    (BinaryOperator::ShiftLeft, "<<"),
    (BinaryOperator::ShiftRight, ">>"),
];

pub(crate) const C_UNARY: &[(UnaryOperator, &str)] = &[
    (UnaryOperator::Not, "!"),
    (UnaryOperator::Plus, "+"),
    (UnaryOperator::Minus, "-"),
    (UnaryOperator::Increment, "++"),
    (UnaryOperator::Decrement, "--"),
];

pub(crate) const C_ASSIGNMENT: &[(AssignmentOperator, &str)] = &[
    (AssignmentOperator::Assign, "="),
    (AssignmentOperator::PlusAssign, "+="),
    (AssignmentOperator::MinusAssign, "-="),
    (AssignmentOperator::MultiplyAssign, "*="),
    (AssignmentOperator::DivideAssign, "/="),
    (AssignmentOperator::ModuloAssign, "%="),
];

/// `this(...)` / `super(...)` delegation, as the JVM languages spell it.
pub(crate) const JVM_CALL_KINDS: &[(MethodCallKind, Option<&str>)] = &[
    (MethodCallKind::Default, None),
    (MethodCallKind::This, Some("this")),
    (MethodCallKind::Super, Some("super")),
];

/// Structural flags every target looks up by key.
pub const STRUCTURAL_FLAGS: &[&str] = &[keys::ABSTRACT, keys::STATIC, keys::OVERRIDE];

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: OperatorTable = OperatorTable::new("test", C_BINARY, &[], C_ASSIGNMENT, JVM_CALL_KINDS);
    static MODIFIERS: ModifierTable = ModifierTable::new(&[(keys::ABSTRACT, "abstract")]);

    #[test]
    fn other_operators_pass_their_token_through() {
        let op = BinaryOperator::other("?:");
        assert_eq!(TABLE.binary(&op), Ok("?:"));
        assert_eq!(
            TABLE.call_kind(&MethodCallKind::Other {
                token: "super@Base".into()
            }),
            Ok(Some("super@Base"))
        );
    }

    #[test]
    fn missing_known_row_is_an_error() {
        let err = TABLE.unary(&UnaryOperator::Not).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedNode { .. }));
    }

    #[test]
    fn unknown_modifier_keys_are_omitted() {
        assert_eq!(MODIFIERS.lookup(keys::ABSTRACT), Modifier::Keyword("abstract"));
        assert_eq!(MODIFIERS.lookup("tailrec"), Modifier::Omit);
        assert_eq!(MODIFIERS.flag(false, keys::ABSTRACT), None);
        assert_eq!(MODIFIERS.flag(true, keys::ABSTRACT), Some("abstract"));
    }

    #[test]
    fn keywords_follow_canonical_order() {
        let bag: PropertyBag = [(keys::OPEN, true), (keys::ABSTRACT, true)]
            .into_iter()
            .collect();
        let table = ModifierTable::new(&[(keys::OPEN, "open"), (keys::ABSTRACT, "abstract")]);
        assert_eq!(table.keywords(&bag, &[]), vec!["abstract", "open"]);
        assert_eq!(table.keywords(&bag, &[keys::ABSTRACT]), vec!["open"]);
    }
}
