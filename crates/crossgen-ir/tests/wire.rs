//! Wire codec tests over complete trees.

use crossgen_ir::builders::*;
use crossgen_ir::properties::keys;
use crossgen_ir::wire::{self, DISCRIMINANTS};
use crossgen_ir::*;
use serde_json::Value;

fn int() -> Type {
    PrimitiveTypeBuilder::new(PrimitiveType::Int)
        .nullable(false)
        .build()
}

fn name(n: &str) -> Expression {
    IdentifierBuilder::simple(n).build()
}

fn lit(v: &str) -> Expression {
    LiteralBuilder::new(v).build()
}

fn expr_stmt(e: Expression) -> Statement {
    ExpressionStatementBuilder::new(e).build()
}

/// One file touching every statement and expression kind.
fn kitchen_sink() -> File {
    let point = TypeReferenceBuilder::qualified("com.example.Point").build();
    let list = TypeReferenceBuilder::qualified("java.util.List")
        .type_parameter(point.clone())
        .build();

    let expressions = vec![
        EmptyExpressionBuilder::new().build(),
        lit("42"),
        IdentifierBuilder::simple("x").qualifier(name("this")).build(),
        TypeReferenceIdentifierBuilder::new(point.clone()).build(),
        PropertyAccessBuilder::new("size")
            .receiver(name("items"))
            .build()
            .unwrap(),
        MethodCallBuilder::new("add")
            .receiver(name("items"))
            .argument(lit("1"))
            .type_argument(point.clone())
            .build()
            .unwrap(),
        ObjectCreationBuilder::new("Point")
            .arguments([lit("1"), lit("2")])
            .build()
            .unwrap(),
        BinaryBuilder::new(name("a"), BinaryOperator::Plus, name("b")).build(),
        BinaryBuilder::new(name("a"), BinaryOperator::other("==="), name("b")).build(),
        UnaryBuilder::new(UnaryOperator::Increment, name("i"))
            .postfix()
            .build(),
        AssignmentBuilder::new(name("x"), lit("0"))
            .operator(AssignmentOperator::PlusAssign)
            .build(),
        TernaryBuilder::new(name("c"), lit("1"), lit("2")).build(),
        CastBuilder::new(name("o"), point.clone()).build(),
        TypeCheckBuilder::new(name("o"), point.clone()).build(),
        UnknownExpressionBuilder::new("java", "Point::new").build(),
        LambdaBuilder::new()
            .parameter(ParameterBuilder::new("it", int()).build().unwrap())
            .body(BlockBuilder::new().statement(expr_stmt(name("it"))).build())
            .build()
            .unwrap(),
    ];

    let block = |statements: Vec<Statement>| BlockBuilder::new().statements(statements).build();
    let statements = vec![
        EmptyStatementBuilder::new().build(),
        VariableDeclarationBuilder::new("p", list.clone())
            .additional_name("q")
            .mutable(false)
            .initializer_expression(lit("null"))
            .build()
            .unwrap(),
        IfBuilder::new(name("c"))
            .then(block(vec![BreakBuilder::new().build()]))
            .otherwise(block(vec![ContinueBuilder::new().build()]))
            .build()
            .unwrap(),
        ForBuilder::new()
            .initializer(
                VariableDeclarationBuilder::new("i", int())
                    .initializer_expression(lit("0"))
                    .build()
                    .unwrap(),
            )
            .condition(BinaryBuilder::new(name("i"), BinaryOperator::Less, lit("10")).build())
            .update(expr_stmt(
                UnaryBuilder::new(UnaryOperator::Increment, name("i"))
                    .postfix()
                    .build(),
            ))
            .body(block(vec![]))
            .build()
            .unwrap(),
        WhileBuilder::new(name("c"))
            .body(block(vec![]))
            .build()
            .unwrap(),
        DoWhileBuilder::new(name("c"))
            .body(block(vec![]))
            .build()
            .unwrap(),
        SwitchBuilder::new(name("k"))
            .case(
                SwitchCaseBuilder::new()
                    .matching(lit("1"))
                    .body(block(vec![BreakBuilder::new().build()]))
                    .build(),
            )
            .case(SwitchCaseBuilder::new().build())
            .build()
            .unwrap(),
        ThrowBuilder::new(
            ObjectCreationBuilder::new("IllegalStateException")
                .build()
                .unwrap(),
        )
        .build(),
        TryCatchBuilder::new()
            .try_block(block(vec![]))
            .catch(
                CatchClauseBuilder::new(TypeReferenceBuilder::new("Exception").build())
                    .exception_name("e")
                    .body(block(vec![]))
                    .build(),
            )
            .finally_block(block(vec![]))
            .build()
            .unwrap(),
        UnknownStatementBuilder::new("java", "assert x > 0;").build(),
        ReturnBuilder::new().value(name("p")).build(),
    ];

    let body = MethodBodyBuilder::new()
        .statements(expressions.into_iter().map(expr_stmt))
        .statements(statements)
        .build();

    let class = ClassBuilder::new("Sink")
        .qualified_name("com.example.Sink")
        .visibility(Visibility::from_keyword("java", "public"))
        .property(keys::FINAL, true)
        .annotation(
            AnnotationBuilder::new("Deprecated")
                .parameter("since", lit("\"1.2\""))
                .build()
                .unwrap(),
        )
        .type_parameter(
            TypeParameterBuilder::new("T")
                .extends(TypeReferenceBuilder::new("Comparable").build())
                .build()
                .unwrap(),
        )
        .super_class(
            SuperClassBuilder::new("Base", ClassKind::Class)
                .qualified_name("com.example.Base")
                .type_argument(GenericTypeBuilder::new("T").build())
                .build()
                .unwrap(),
        )
        .field(
            FieldBuilder::new("items", list)
                .visibility(Visibility::private())
                .mutable(false)
                .build()
                .unwrap(),
        )
        .field(
            FieldBuilder::new(
                "grid",
                ArrayTypeBuilder::new(ArrayTypeBuilder::new(int()).build()).build(),
            )
            .visibility(Visibility::package_private())
            .build()
            .unwrap(),
        )
        .field(
            FieldBuilder::new(
                "callback",
                FunctionTypeBuilder::new(PrimitiveTypeBuilder::new(PrimitiveType::Void).build())
                    .parameter_type(int())
                    .build(),
            )
            .visibility(Visibility::protected())
            .build()
            .unwrap(),
        )
        .constructor(
            ConstructorBuilder::new("Sink", TypeReferenceBuilder::new("Sink").build())
                .visibility(Visibility::public())
                .other_constructor_call(
                    MethodCallBuilder::new("super")
                        .kind(MethodCallKind::Super)
                        .build_call()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .method(
            MethodBuilder::new("run", point)
                .visibility(Visibility::public())
                .is_override(true)
                .body(body)
                .build()
                .unwrap(),
        )
        .initializer(
            ClassInitializerBuilder::new(InitializerKind::Static)
                .body(MethodBodyBuilder::new().build())
                .build(),
        )
        .nested_class(
            ClassBuilder::new("Kind")
                .kind(ClassKind::Enum)
                .visibility(Visibility::public())
                .build()
                .unwrap(),
        )
        .location(Location::new("Sink.java", 3, 1))
        .build()
        .unwrap();

    FileBuilder::new("Sink")
        .import(ImportBuilder::new("java.util.List").build().unwrap())
        .import(ImportBuilder::new("java.util").wildcard(true).build().unwrap())
        .class(class)
        .property(keys::JVM_PACKAGE, "com.example")
        .build()
        .unwrap()
}

fn collect_discriminants(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(tag)) = map.get("type") {
                out.push(tag.clone());
            }
            for (key, child) in map {
                if key != "languageProperties" {
                    collect_discriminants(child, out);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_discriminants(v, out)),
        _ => {}
    }
}

#[test]
fn round_trip_is_lossless() {
    let file = kitchen_sink();
    let json = wire::encode_file(&file).unwrap();
    let decoded = wire::decode_file(&json).unwrap();
    assert_eq!(decoded, file);

    let pretty = wire::encode_file_pretty(&file).unwrap();
    assert_eq!(wire::decode_file(&pretty).unwrap(), file);
}

#[test]
fn every_emitted_discriminant_is_documented() {
    let value = wire::encode_node(&kitchen_sink()).unwrap();
    let mut tags = Vec::new();
    collect_discriminants(&value, &mut tags);
    assert!(tags.len() > 50);
    for tag in tags {
        assert!(DISCRIMINANTS.contains(&tag.as_str()), "undocumented {tag}");
    }
}

#[test]
fn every_object_carries_a_discriminant() {
    fn check(value: &Value, path: &str) {
        match value {
            Value::Object(map) => {
                assert!(map.contains_key("type"), "no discriminant at {path}");
                for (key, child) in map {
                    if key != "languageProperties" {
                        check(child, &format!("{path}/{key}"));
                    }
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    check(child, &format!("{path}/{i}"));
                }
            }
            _ => {}
        }
    }
    check(&wire::encode_node(&kitchen_sink()).unwrap(), "");
}

#[test]
fn mixed_language_properties_round_trip() {
    let bag: PropertyBag = serde_json::from_str(
        r#"{"a":null,"b":true,"c":-3,"d":1.5,"e":"x","f":[1,"y",null],"g":{"h":false,"i":{"j":[]}},"k":18446744073709551615}"#,
    )
    .unwrap();
    let mut file = kitchen_sink();
    file.language_properties = bag.clone();
    let decoded = wire::decode_file(&wire::encode_file(&file).unwrap()).unwrap();
    assert_eq!(decoded.language_properties, bag);
    assert_eq!(decoded.language_properties.get("c"), Some(&PropertyValue::Int(-3)));
    assert_eq!(decoded.language_properties.get("d"), Some(&PropertyValue::Float(1.5)));
    assert_eq!(
        decoded.language_properties.get("k"),
        Some(&PropertyValue::UInt(u64::MAX))
    );
}

#[test]
fn swift_companion_shapes_decode() {
    let json = r#"{
        "type": "com.voxeldev.mcodegen.dsl.ir.IrFile",
        "name": "Point",
        "imports": [],
        "declarations": [{
            "type": "com.voxeldev.mcodegen.dsl.ir.IrClass",
            "qualifiedName": null,
            "simpleName": "Point",
            "kind": {"type": "com.voxeldev.mcodegen.dsl.language.swift.ir.IrStructClassKind"},
            "visibility": {
                "type": "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPublic",
                "stringRepresentation": [{
                    "type": "com.voxeldev.mcodegen.dsl.ir.IrStringRepresentation",
                    "language": "swift",
                    "representation": "public"
                }]
            },
            "fields": [{
                "type": "com.voxeldev.mcodegen.dsl.ir.IrField",
                "name": "x",
                "irType": {
                    "type": "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive",
                    "primitiveType": {"type": "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Int"},
                    "isNullable": false
                },
                "visibility": {"type": "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPublic"},
                "isMutable": false,
                "initializer": null,
                "languageProperties": {"swiftLet": true}
            }],
            "languageProperties": {}
        }],
        "languageProperties": {"swiftModule": "Geometry"}
    }"#;
    let file = wire::decode_file(json).unwrap();
    let point = file.class("Point").unwrap();
    assert_eq!(point.kind, ClassKind::Struct);
    assert_eq!(point.visibility.display("swift"), "public");
    let x = point.field("x").unwrap();
    assert!(!x.is_mutable);
    assert!(x.meta.language_properties.flag("swiftLet"));
    assert_eq!(
        file.language_properties.string(keys::SWIFT_MODULE),
        Some("Geometry")
    );
}

#[test]
fn other_fallbacks_keep_their_token() {
    let e = BinaryBuilder::new(name("a"), BinaryOperator::other("?:"), name("b")).build();
    let value = wire::encode_node(&e).unwrap();
    assert_eq!(
        value["operator"]["type"],
        "com.voxeldev.mcodegen.dsl.ir.IrBinaryExpression.IrBinaryOperator.Other"
    );
    assert_eq!(value["operator"]["token"], "?:");
}

#[test]
fn primitive_type_shape() {
    insta::assert_json_snapshot!(int(), @r###"
    {
      "type": "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive",
      "primitiveType": {
        "type": "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Int"
      },
      "isNullable": false,
      "location": null,
      "annotations": [],
      "languageProperties": {}
    }
    "###);
}
