//! Imports written for the package-qualified names a file uses.

use crossgen_ir::File;
use crossgen_languages::output::{JAVA_WRITER, KOTLIN_WRITER, SWIFT_WRITER};
use crossgen_languages::{NoContext, Writer, read_java, read_kotlin};

const QUALIFIED: &str = "\
package a;

class C {
    java.util.List<String> xs;
    b.Foo foo;
}
";

fn field_types(file: &File) -> Vec<String> {
    file.classes()
        .flat_map(|c| &c.fields)
        .map(|f| f.ir_type.with_nullable(false).display_name())
        .collect()
}

#[test]
fn java_round_trip_keeps_qualified_names() {
    let file = read_java("C.java", QUALIFIED, &NoContext).unwrap();
    let java = JAVA_WRITER.write(&file).unwrap();
    insta::assert_snapshot!(java, @r###"
    package a;

    import b.Foo;
    import java.util.List;

    class C {
        List<String> xs;
        Foo foo;
    }
    "###);

    let reread = read_java("C.java", &java, &NoContext).unwrap();
    assert_eq!(field_types(&reread), field_types(&file));
    assert_eq!(
        field_types(&file),
        ["java.util.List<java.lang.String>", "b.Foo"]
    );
}

#[test]
fn second_list_stays_fully_qualified() {
    let source = "\
package a;

import java.util.List;

class C {
    List<String> xs;
    java.awt.List ys;
}
";
    let file = read_java("C.java", source, &NoContext).unwrap();
    let java = JAVA_WRITER.write(&file).unwrap();
    assert!(java.contains("java.awt.List ys;"), "{java}");
    assert!(!java.contains("import java.awt.List;"), "{java}");
    assert_eq!(java.matches("import java.util.List;").count(), 1, "{java}");

    let reread = read_java("C.java", &java, &NoContext).unwrap();
    assert_eq!(field_types(&reread), field_types(&file));
}

#[test]
fn declared_class_shadows_an_import() {
    let source = "package a;\n\nclass List {\n    java.util.List<String> items;\n}\n";
    let file = read_java("List.java", source, &NoContext).unwrap();
    let java = JAVA_WRITER.write(&file).unwrap();
    assert!(java.contains("java.util.List<String> items;"), "{java}");
    assert!(!java.contains("import"), "{java}");
}

#[test]
fn kotlin_imports_what_it_does_not_get_by_default() {
    let source = "package a;\n\nclass C {\n    java.util.Date date;\n    String name;\n}\n";
    let file = read_java("C.java", source, &NoContext).unwrap();
    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    assert!(kotlin.contains("import java.util.Date\n"), "{kotlin}");
    assert!(!kotlin.contains("java.lang"), "{kotlin}");

    let reread = read_kotlin("C.kt", &kotlin, &NoContext).unwrap();
    assert_eq!(field_types(&reread), field_types(&file));
}

#[test]
fn swift_writes_no_type_imports() {
    let file = read_java("C.java", QUALIFIED, &NoContext).unwrap();
    let swift = SWIFT_WRITER.write(&file).unwrap();
    assert!(!swift.contains("import"), "{swift}");
    assert!(swift.contains("Foo"), "{swift}");
}
