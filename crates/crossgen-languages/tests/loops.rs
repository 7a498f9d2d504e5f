//! C-style `for` loops in targets that only have `while`.

use crossgen_languages::output::{KOTLIN_WRITER, SWIFT_WRITER};
use crossgen_languages::{NoContext, Writer, read_java};

const SKIP_ONE: &str = "\
public class Loop {
    void run() {
        for (int i = 0; i < 3; i++) {
            if (i == 1) {
                continue;
            }
            f(i);
        }
    }
}
";

const NESTED: &str = "\
public class Loop {
    void run() {
        for (int i = 0; i < 3; i++) {
            while (g()) {
                continue;
            }
        }
    }
}
";

fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Every `continue` is preceded by `update`, and the loop body ends with it.
fn assert_update_runs(text: &str, update: &str) {
    let lines = lines(text);
    let continues: Vec<_> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| **l == "continue")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(continues.len(), 1, "{text}");
    assert_eq!(lines[continues[0] - 1], update, "{text}");
    assert_eq!(lines.iter().filter(|l| **l == update).count(), 2, "{text}");
}

#[test]
fn kotlin_update_runs_before_continue() {
    let file = read_java("Loop.java", SKIP_ONE, &NoContext).unwrap();
    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    assert!(kotlin.contains("while (i < 3) {"), "{kotlin}");
    assert_update_runs(&kotlin, "i++");
}

#[test]
fn swift_update_runs_before_continue() {
    let file = read_java("Loop.java", SKIP_ONE, &NoContext).unwrap();
    let swift = SWIFT_WRITER.write(&file).unwrap();
    assert_update_runs(&swift, "i += 1");
}

#[test]
fn inner_loop_keeps_its_own_continue() {
    let file = read_java("Loop.java", NESTED, &NoContext).unwrap();
    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    let lines = lines(&kotlin);
    let at = lines.iter().position(|l| *l == "continue").unwrap();
    assert_eq!(lines[at - 1], "while (g()) {", "{kotlin}");
    assert_eq!(lines.iter().filter(|l| **l == "i++").count(), 1, "{kotlin}");
}
