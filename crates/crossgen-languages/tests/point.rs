//! The two-field `Point` class, read from Java and Kotlin and generated back.

use crossgen_ir::{Class, ClassKind, File, PrimitiveType};
use crossgen_languages::{NoContext, Writer, read_java, read_kotlin};
use crossgen_languages::output::{JAVA_WRITER, KOTLIN_WRITER, SWIFT_WRITER};

fn point(file: &File) -> &Class {
    let point = file.class("Point").expect("Point class");
    assert_eq!(point.kind, ClassKind::Class);
    assert!(point.visibility.is_public());
    assert_eq!(point.fields.len(), 2);
    for (field, name) in point.fields.iter().zip(["x", "y"]) {
        assert_eq!(field.name, name);
        assert_eq!(field.ir_type.as_primitive(), Some(PrimitiveType::Int));
        assert!(!field.ir_type.is_nullable());
        assert!(field.visibility.is_public());
    }
    point
}

/// Both names appear, `x` before `y`.
fn assert_in_order(text: &str, x: &str, y: &str) {
    let x_at = text.find(x).unwrap_or_else(|| panic!("{x:?} missing from:\n{text}"));
    let y_at = text.find(y).unwrap_or_else(|| panic!("{y:?} missing from:\n{text}"));
    assert!(x_at < y_at, "fields out of order in:\n{text}");
}

#[test]
fn java_point() {
    let source = "public class Point {\n    public int x;\n    public int y;\n}\n";
    let file = read_java("Point.java", source, &NoContext).unwrap();
    let point = point(&file);
    assert!(point.fields.iter().all(|f| f.is_mutable));

    let java = JAVA_WRITER.write(&file).unwrap();
    assert_eq!(java, source);

    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    insta::assert_snapshot!(kotlin, @r###"
    class Point {
        var x: Int
        var y: Int
    }
    "###);

    let swift = SWIFT_WRITER.write(&file).unwrap();
    assert_in_order(&swift, "public var x: Int", "public var y: Int");
}

#[test]
fn kotlin_point() {
    let source = "class Point(val x: Int, val y: Int)\n";
    let file = read_kotlin("Point.kt", source, &NoContext).unwrap();
    let point = point(&file);
    assert!(point.fields.iter().all(|f| !f.is_mutable));

    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    assert_eq!(kotlin, source);

    let java = JAVA_WRITER.write(&file).unwrap();
    insta::assert_snapshot!(java, @r###"
    public class Point {
        public final int x;
        public final int y;

        public Point(int x, int y) {
            this.x = x;
            this.y = y;
        }
    }
    "###);
    assert_in_order(&java, "int x;", "int y;");
}

#[test]
fn java_and_kotlin_points_share_field_shapes() {
    let java = read_java(
        "Point.java",
        "public class Point { public final int x; public final int y; }",
        &NoContext,
    )
    .unwrap();
    let kotlin = read_kotlin("Point.kt", "class Point(val x: Int, val y: Int)", &NoContext).unwrap();

    let java_fields: Vec<_> = point(&java)
        .fields
        .iter()
        .map(|f| (&f.name, &f.ir_type, f.is_mutable))
        .collect();
    let kotlin_fields: Vec<_> = point(&kotlin)
        .fields
        .iter()
        .map(|f| (&f.name, &f.ir_type, f.is_mutable))
        .collect();
    assert_eq!(java_fields, kotlin_fields);
}
