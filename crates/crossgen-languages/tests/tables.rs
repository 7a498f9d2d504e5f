//! Every known operator and call kind has a token in every target, and
//! modifier lookups never fail.

use crossgen_ir::properties::keys;
use crossgen_ir::{AssignmentOperator, BinaryOperator, MethodCallKind, PropertyBag, UnaryOperator};
use crossgen_languages::output::java::{JAVA_MODIFIERS, JAVA_OPERATORS};
use crossgen_languages::output::kotlin::{KOTLIN_MODIFIERS, KOTLIN_OPERATORS};
use crossgen_languages::output::swift::{SWIFT_MODIFIERS, SWIFT_OPERATORS};
use crossgen_languages::tables::{Modifier, OperatorTable};

fn targets() -> [(&'static str, &'static OperatorTable); 3] {
    [
        ("java", &JAVA_OPERATORS),
        ("kotlin", &KOTLIN_OPERATORS),
        ("swift", &SWIFT_OPERATORS),
    ]
}

#[test]
fn operator_tables_are_total() {
    for (language, table) in targets() {
        for op in &BinaryOperator::KNOWN {
            assert!(table.binary(op).is_ok(), "{language}: {op:?}");
        }
        for op in &UnaryOperator::KNOWN {
            assert!(table.unary(op).is_ok(), "{language}: {op:?}");
        }
        for op in &AssignmentOperator::KNOWN {
            assert!(table.assignment(op).is_ok(), "{language}: {op:?}");
        }
        for kind in &MethodCallKind::KNOWN {
            assert!(table.call_kind(kind).is_ok(), "{language}: {kind:?}");
        }
    }
}

#[test]
fn targets_spell_operators_their_own_way() {
    assert_eq!(JAVA_OPERATORS.binary(&BinaryOperator::ShiftLeft), Ok("<<"));
    assert_eq!(KOTLIN_OPERATORS.binary(&BinaryOperator::ShiftLeft), Ok("shl"));
    assert_eq!(KOTLIN_OPERATORS.binary(&BinaryOperator::BitwiseAnd), Ok("and"));
    assert_eq!(SWIFT_OPERATORS.unary(&UnaryOperator::Increment), Ok("+= 1"));
    assert_eq!(JAVA_OPERATORS.call_kind(&MethodCallKind::Super), Ok(Some("super")));
    assert_eq!(SWIFT_OPERATORS.call_kind(&MethodCallKind::Super), Ok(Some("super.init")));
    assert_eq!(KOTLIN_OPERATORS.call_kind(&MethodCallKind::Default), Ok(None));
}

#[test]
fn modifiers_without_a_row_are_omitted() {
    assert_eq!(JAVA_MODIFIERS.lookup(keys::STATIC), Modifier::Keyword("static"));
    assert_eq!(KOTLIN_MODIFIERS.lookup(keys::DATA), Modifier::Keyword("data"));
    assert_eq!(SWIFT_MODIFIERS.lookup(keys::CONVENIENCE), Modifier::Keyword("convenience"));

    assert_eq!(JAVA_MODIFIERS.lookup(keys::DATA), Modifier::Omit);
    assert_eq!(KOTLIN_MODIFIERS.lookup(keys::STATIC), Modifier::Omit);
    assert_eq!(SWIFT_MODIFIERS.lookup(keys::ABSTRACT), Modifier::Omit);
    assert_eq!(JAVA_MODIFIERS.lookup("reified"), Modifier::Omit);
}

#[test]
fn keywords_follow_canonical_order() {
    let props: PropertyBag = [
        (keys::OVERRIDE, true),
        (keys::ABSTRACT, true),
        (keys::DATA, false),
        (keys::SUSPEND, true),
    ]
    .into_iter()
    .collect();

    assert_eq!(KOTLIN_MODIFIERS.keywords(&props, &[]), vec!["abstract", "override", "suspend"]);
    assert_eq!(KOTLIN_MODIFIERS.keywords(&props, &[keys::ABSTRACT]), vec!["override", "suspend"]);
    assert_eq!(JAVA_MODIFIERS.keywords(&props, &[]), vec!["abstract"]);
    assert_eq!(SWIFT_MODIFIERS.flag(true, keys::OVERRIDE), Some("override"));
    assert_eq!(SWIFT_MODIFIERS.flag(false, keys::OVERRIDE), None);
}
