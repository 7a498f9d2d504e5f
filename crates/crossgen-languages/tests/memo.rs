//! Type memo stability: self-references terminate and repeated references
//! to one identity come out value-equal.

use crossgen_ir::{StructureEq, Type};
use crossgen_languages::{NoContext, read_java, read_kotlin};

fn qualified(ty: &Type) -> Option<&str> {
    match ty {
        Type::Reference(r) => r.referenced_class_qualified_name.as_deref(),
        _ => None,
    }
}

#[test]
fn java_self_reference() {
    let file = read_java(
        "Node.java",
        "package list;\n\nclass Node {\n    Node next;\n    Node prev;\n    Node copy(Node other) { return other; }\n}\n",
        &NoContext,
    )
    .unwrap();
    let node = file.class("Node").unwrap();
    let next = &node.field("next").unwrap().ir_type;
    let prev = &node.field("prev").unwrap().ir_type;
    assert_eq!(next, prev);
    assert_eq!(qualified(next), Some("list.Node"));
    assert!(next.is_nullable());

    let copy = node.plain_methods().next().unwrap();
    assert_eq!(&copy.return_type, next);
    assert_eq!(&copy.parameters[0].ir_type, next);
}

#[test]
fn java_repeated_generic_reference() {
    let file = read_java(
        "Holder.java",
        "import java.util.List;\n\nclass Holder {\n    List<String> a;\n    List<String> b;\n    List<Integer> c;\n}\n",
        &NoContext,
    )
    .unwrap();
    let holder = file.class("Holder").unwrap();
    let a = &holder.field("a").unwrap().ir_type;
    let b = &holder.field("b").unwrap().ir_type;
    let c = &holder.field("c").unwrap().ir_type;
    assert_eq!(a, b);
    assert!(a.structure_eq(b));
    assert_ne!(a, c);
    assert_eq!(qualified(a), Some("java.util.List"));
}

#[test]
fn kotlin_self_reference_keeps_nullability_per_use() {
    let file = read_kotlin(
        "Node.kt",
        "class Node(val next: Node?, val prev: Node?) {\n    val self: Node = this\n}\n",
        &NoContext,
    )
    .unwrap();
    let node = file.class("Node").unwrap();
    let next = &node.field("next").unwrap().ir_type;
    let prev = &node.field("prev").unwrap().ir_type;
    let this = &node.field("self").unwrap().ir_type;
    assert_eq!(next, prev);
    assert!(next.is_nullable());
    assert!(!this.is_nullable());
    assert_eq!(&this.with_nullable(true), next);
}

#[test]
fn nested_class_references_resolve_to_one_identity() {
    let file = read_java(
        "Outer.java",
        "class Outer {\n    Inner first;\n    static class Inner { Inner again; Outer.Inner spelled; }\n}\n",
        &NoContext,
    )
    .unwrap();
    let outer = file.class("Outer").unwrap();
    let inner = outer.nested_class("Inner").unwrap();
    let first = &outer.field("first").unwrap().ir_type;
    assert_eq!(first, &inner.field("again").unwrap().ir_type);
    assert_eq!(first, &inner.field("spelled").unwrap().ir_type);
    assert_eq!(qualified(first), Some("Outer.Inner"));
}
