//! JSON wire codec.
//!
//! Every node object carries a `type` discriminant naming its declared
//! kind (`com.voxeldev.mcodegen.dsl.ir.IrClass`, nested variants joined
//! with `.`). Decoding checks every discriminant against [`DISCRIMINANTS`]
//! before shape decoding, so an unknown node kind is reported with its
//! location in the document rather than as a generic shape error.
//!
//! `languageProperties` subtrees are opaque: they may hold any JSON value,
//! including objects with a `type` key of their own, and are never checked.

use crate::ir::File;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Key of the discriminant on every node object.
pub const TYPE_KEY: &str = "type";

const OPAQUE_KEY: &str = "languageProperties";

/// Every documented discriminant, core nodes first, then language
/// extensions.
pub const DISCRIMINANTS: &[&str] = &[
    "com.voxeldev.mcodegen.dsl.ir.IrAnnotation",
    "com.voxeldev.mcodegen.dsl.ir.IrAnnotationParameter",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.Assign",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.DivideAssign",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.MinusAssign",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.ModuloAssign",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.MultiplyAssign",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.Other",
    "com.voxeldev.mcodegen.dsl.ir.IrAssignmentExpression.IrAssignmentOperator.PlusAssign",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.And",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseAnd",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseOr",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.BitwiseXor",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Divide",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Equals",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Greater",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.GreaterOrEqual",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Less",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.LessOrEqual",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Minus",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Modulo",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Multiply",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.NotEquals",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Or",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Other",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Plus",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.ShiftLeft",
    "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.ShiftRight",
    "com.voxeldev.mcodegen.dsl.ir.IrBlockStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrBreakStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrCastExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrClass",
    "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer",
    "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer.IrInstanceClassInitializerKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer.IrStaticClassInitializerKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrAnnotationClassKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrClassClassKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrEnumClassKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrInterfaceClassKind",
    "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrOtherClassKind",
    "com.voxeldev.mcodegen.dsl.ir.IrConstructor",
    "com.voxeldev.mcodegen.dsl.ir.IrContinueStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrDoWhileStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrEmptyExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrEmptyStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrExpressionStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrExpressionUnknown",
    "com.voxeldev.mcodegen.dsl.ir.IrField",
    "com.voxeldev.mcodegen.dsl.ir.IrFile",
    "com.voxeldev.mcodegen.dsl.ir.IrForStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrIdentifierExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrIfStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrImport",
    "com.voxeldev.mcodegen.dsl.ir.IrLiteralExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrLocation",
    "com.voxeldev.mcodegen.dsl.ir.IrMethod",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodBody",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrDefaultMethodCallKind",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrOtherMethodCallKind",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrSuperMethodCallKind",
    "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression.IrThisMethodCallKind",
    "com.voxeldev.mcodegen.dsl.ir.IrObjectCreationExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrParameter",
    "com.voxeldev.mcodegen.dsl.ir.IrPropertyAccessExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrReturnStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrStatementUnknown",
    "com.voxeldev.mcodegen.dsl.ir.IrStringRepresentation",
    "com.voxeldev.mcodegen.dsl.ir.IrSuperClass",
    "com.voxeldev.mcodegen.dsl.ir.IrSwitchStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrSwitchStatement.IrSwitchStatementCase",
    "com.voxeldev.mcodegen.dsl.ir.IrTernaryExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrThrowStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrTryCatchStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrTryCatchStatement.IrTryCatchStatementClause",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeArray",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeCheckExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeFunction",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeGeneric",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeParameter",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Boolean",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Byte",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Char",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Double",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Float",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Int",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Long",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Short",
    "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Void",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeReference",
    "com.voxeldev.mcodegen.dsl.ir.IrTypeReferenceIdentifierExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Decrement",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Increment",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Minus",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Not",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Other",
    "com.voxeldev.mcodegen.dsl.ir.IrUnaryExpression.IrUnaryOperator.Plus",
    "com.voxeldev.mcodegen.dsl.ir.IrVariableDeclarationStatement",
    "com.voxeldev.mcodegen.dsl.ir.IrVisibilityInternal",
    "com.voxeldev.mcodegen.dsl.ir.IrVisibilityOther",
    "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPrivate",
    "com.voxeldev.mcodegen.dsl.ir.IrVisibilityProtected",
    "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPublic",
    "com.voxeldev.mcodegen.dsl.ir.IrWhileStatement",
    // language extensions
    "com.voxeldev.mcodegen.dsl.language.java.ir.IrVisibilityPackagePrivate",
    "com.voxeldev.mcodegen.dsl.language.kotlin.ir.IrLambdaExpression",
    "com.voxeldev.mcodegen.dsl.language.kotlin.ir.IrObjectClassKind",
    "com.voxeldev.mcodegen.dsl.language.swift.ir.IrActorClassKind",
    "com.voxeldev.mcodegen.dsl.language.swift.ir.IrStructClassKind",
    "com.voxeldev.mcodegen.dsl.language.swift.ir.IrVisibilityFileprivate",
    "com.voxeldev.mcodegen.dsl.language.swift.ir.IrVisibilityOpen",
];

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("unknown discriminant `{discriminant}` at {path}")]
    UnknownDiscriminant { discriminant: String, path: String },

    #[error("{}", shape_message(.path, .message))]
    Shape {
        path: Option<String>,
        message: String,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn shape_message(path: &Option<String>, message: &str) -> String {
    match path {
        Some(path) => format!("bad shape at {path}: {message}"),
        None => format!("bad shape: {message}"),
    }
}

fn known() -> &'static HashSet<&'static str> {
    static KNOWN: OnceLock<HashSet<&'static str>> = OnceLock::new();
    KNOWN.get_or_init(|| DISCRIMINANTS.iter().copied().collect())
}

/// True if `discriminant` names a node kind this codec understands.
pub fn is_known(discriminant: &str) -> bool {
    known().contains(discriminant)
}

/// Decode one file.
pub fn decode_file(json: &str) -> Result<File, WireError> {
    let value: Value = serde_json::from_str(json)?;
    check_discriminants(&value, &mut String::new())?;
    let file: File = serde_json::from_value(value.clone()).map_err(|err| WireError::Shape {
        path: None,
        message: err.to_string(),
    })?;
    report_ignored(&value, &serde_json::to_value(&file)?, &mut String::new());
    debug!(
        file = %file.name,
        declarations = file.declarations.len(),
        "decoded file"
    );
    Ok(file)
}

/// Encode one file as compact JSON.
pub fn encode_file(file: &File) -> Result<String, WireError> {
    Ok(serde_json::to_string(file)?)
}

/// Encode one file as indented JSON.
pub fn encode_file_pretty(file: &File) -> Result<String, WireError> {
    Ok(serde_json::to_string_pretty(file)?)
}

/// Encode any node, e.g. a single class or expression.
pub fn encode_node<T: Serialize>(node: &T) -> Result<Value, WireError> {
    Ok(serde_json::to_value(node)?)
}

fn check_discriminants(value: &Value, path: &mut String) -> Result<(), WireError> {
    match value {
        Value::Object(map) => {
            if let Some(tag) = map.get(TYPE_KEY) {
                let Some(tag) = tag.as_str() else {
                    return Err(WireError::Shape {
                        path: Some(pointer(path)),
                        message: format!("`{TYPE_KEY}` must be a string"),
                    });
                };
                if !is_known(tag) {
                    return Err(WireError::UnknownDiscriminant {
                        discriminant: tag.to_string(),
                        path: pointer(path),
                    });
                }
            }
            for (key, child) in map {
                if key == OPAQUE_KEY {
                    continue;
                }
                with_segment(path, key, |path| check_discriminants(child, path))?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                with_segment(path, &index.to_string(), |path| {
                    check_discriminants(child, path)
                })?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Warn about object keys in the input that the decoded tree dropped.
fn report_ignored(input: &Value, decoded: &Value, path: &mut String) {
    match (input, decoded) {
        (Value::Object(input), Value::Object(decoded)) => {
            for (key, child) in input {
                if key == OPAQUE_KEY {
                    continue;
                }
                match decoded.get(key) {
                    Some(decoded_child) => with_segment(path, key, |path| {
                        report_ignored(child, decoded_child, path)
                    }),
                    None => warn!(path = %pointer(path), field = %key, "ignoring unknown wire field"),
                }
            }
        }
        (Value::Array(input), Value::Array(decoded)) => {
            for (index, (child, decoded_child)) in input.iter().zip(decoded).enumerate() {
                with_segment(path, &index.to_string(), |path| {
                    report_ignored(child, decoded_child, path)
                });
            }
        }
        _ => {}
    }
}

fn with_segment<R>(path: &mut String, segment: &str, f: impl FnOnce(&mut String) -> R) -> R {
    let len = path.len();
    path.push('/');
    // JSON pointer escaping
    path.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    let result = f(path);
    path.truncate(len);
    result
}

fn pointer(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_unique() {
        assert_eq!(known().len(), DISCRIMINANTS.len());
    }

    #[test]
    fn unknown_discriminant_reports_path() {
        let json = r#"{
            "type": "com.voxeldev.mcodegen.dsl.ir.IrFile",
            "name": "A",
            "declarations": [
                {"type": "com.voxeldev.mcodegen.dsl.ir.IrMystery"}
            ]
        }"#;
        match decode_file(json) {
            Err(WireError::UnknownDiscriminant { discriminant, path }) => {
                assert_eq!(discriminant, "com.voxeldev.mcodegen.dsl.ir.IrMystery");
                assert_eq!(path, "/declarations/0");
            }
            other => panic!("expected unknown discriminant, got {other:?}"),
        }
    }

    #[test]
    fn language_properties_are_opaque() {
        let json = r#"{
            "type": "com.voxeldev.mcodegen.dsl.ir.IrFile",
            "name": "A",
            "languageProperties": {"x": {"type": "not.a.node"}}
        }"#;
        let file = decode_file(json).unwrap();
        assert_eq!(file.language_properties.len(), 1);
    }

    #[test]
    fn missing_field_is_a_shape_error() {
        let json = r#"{"type": "com.voxeldev.mcodegen.dsl.ir.IrFile"}"#;
        assert!(matches!(decode_file(json), Err(WireError::Shape { .. })));
        assert!(matches!(decode_file("{"), Err(WireError::Json(_))));
    }

    #[test]
    fn pointer_segments_are_escaped() {
        let mut path = String::new();
        let inner = with_segment(&mut path, "a/b~c", |p| p.clone());
        assert_eq!(inner, "/a~1b~0c");
        assert!(path.is_empty());
    }
}
