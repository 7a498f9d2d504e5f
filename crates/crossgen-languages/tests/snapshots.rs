//! Generated text for small but complete programs.

use crossgen_ir::builders::{ClassBuilder, FileBuilder, ImportBuilder};
use crossgen_ir::Visibility;
use crossgen_languages::output::{JAVA_WRITER, KOTLIN_WRITER, SWIFT_WRITER};
use crossgen_languages::{NoContext, Writer, read_java};

const COUNTER: &str = "\
public class Counter {
    private int count;

    public int next(int step) {
        if (step > 0) {
            count += step;
        } else {
            count = 0;
        }
        return count;
    }
}
";

#[test]
fn counter_round_trips_through_java() {
    let file = read_java("Counter.java", COUNTER, &NoContext).unwrap();
    assert_eq!(JAVA_WRITER.write(&file).unwrap(), COUNTER);
}

#[test]
fn counter_as_kotlin() {
    let file = read_java("Counter.java", COUNTER, &NoContext).unwrap();
    insta::assert_snapshot!(KOTLIN_WRITER.write(&file).unwrap(), @r###"
    class Counter {
        private var count: Int

        fun next(step: Int): Int {
            if (step > 0) {
                count += step
            } else {
                count = 0
            }
            return count
        }
    }
    "###);
}

#[test]
fn counter_as_swift() {
    let file = read_java("Counter.java", COUNTER, &NoContext).unwrap();
    let swift = SWIFT_WRITER.write(&file).unwrap();
    assert!(swift.contains("count += step\n"), "{swift}");
    assert!(!swift.contains(';'), "{swift}");
}

#[test]
fn kotlin_import_alias() {
    let file = FileBuilder::new("Box.kt")
        .import(
            ImportBuilder::new("java.util.ArrayList")
                .property("alias", "JList")
                .build()
                .unwrap(),
        )
        .import(ImportBuilder::new("kotlin.math").wildcard(true).build().unwrap())
        .class(ClassBuilder::new("Box").visibility(Visibility::public()).build().unwrap())
        .build()
        .unwrap();
    insta::assert_snapshot!(KOTLIN_WRITER.write(&file).unwrap(), @r###"
    import java.util.ArrayList as JList
    import kotlin.math.*

    class Box
    "###);
}
