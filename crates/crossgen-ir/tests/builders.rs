//! Builder behavior over whole declarations.

use crossgen_ir::builders::*;
use crossgen_ir::properties::keys;
use crossgen_ir::*;

fn int() -> Type {
    PrimitiveTypeBuilder::new(PrimitiveType::Int)
        .nullable(false)
        .build()
}

fn point_builder() -> ClassBuilder {
    let field = |name: &str| {
        FieldBuilder::new(name, int())
            .visibility(Visibility::public())
            .mutable(false)
            .build()
            .unwrap()
    };
    let point = TypeReferenceBuilder::qualified("com.example.Point")
        .nullable(false)
        .build();
    ClassBuilder::new("Point")
        .qualified_name("com.example.Point")
        .visibility(Visibility::public())
        .property(keys::DATA, true)
        .field(field("x"))
        .field(field("y"))
        .constructor(
            ConstructorBuilder::new("Point", point)
                .visibility(Visibility::public())
                .parameter(ParameterBuilder::new("x", int()).build().unwrap())
                .parameter(ParameterBuilder::new("y", int()).build().unwrap())
                .build()
                .unwrap(),
        )
}

#[test]
fn point_class() {
    let point = point_builder().build().unwrap();
    assert_eq!(point.display_name(), "com.example.Point");
    assert_eq!(point.kind, ClassKind::Class);
    assert_eq!(point.fields.len(), 2);
    assert!(point.fields.iter().all(|f| !f.is_mutable));
    assert!(point.fields.iter().all(|f| !f.ir_type.is_nullable()));
    assert_eq!(point.constructors().count(), 1);
    assert_eq!(point.plain_methods().count(), 0);
    assert!(point.meta.language_properties.flag(keys::DATA));
    assert!(point.meta.language_properties.get(keys::ABSTRACT).is_none());
}

#[test]
fn building_clones_yields_equal_nodes() {
    let builder = point_builder();
    let a = builder.clone().build().unwrap();
    let b = builder.build().unwrap();
    assert_eq!(a, b);
}

#[test]
fn copy_and_override_leaves_the_original() {
    let original = point_builder().build().unwrap();
    let edited = original
        .to_builder()
        .visibility(Visibility::internal())
        .clear_members()
        .build()
        .unwrap();
    assert!(original.visibility.is_public());
    assert_eq!(original.fields.len(), 2);
    assert!(edited.fields.is_empty());
    assert_eq!(edited.simple_name, "Point");
}

#[test]
fn missing_visibility_names_the_node() {
    let err = FieldBuilder::new("x", int()).build().unwrap_err();
    assert_eq!(err.to_string(), "field `x`: required `visibility` was never set");
}

#[test]
fn file_lookups() {
    let file = FileBuilder::new("Point")
        .property(keys::JVM_PACKAGE, "com.example")
        .import(ImportBuilder::new("java.util.List").build().unwrap())
        .class(point_builder().build().unwrap())
        .build()
        .unwrap();
    assert_eq!(file.package(), Some("com.example"));
    assert_eq!(file.imports[0].simple_name(), "List");
    assert!(file.class("Point").is_some());
    assert!(file.class("Line").is_none());
}
