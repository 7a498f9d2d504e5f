//! Constructs without an IR shape survive as unknown nodes holding their
//! exact source text, and only a writer for the same language re-emits
//! them.

use crossgen_ir::{Declaration, Expression, Statement};
use crossgen_languages::output::{JAVA_WRITER, KOTLIN_WRITER, SWIFT_WRITER};
use crossgen_languages::{Emit, GenerateError, NoContext, Writer, read_java, read_kotlin};

const LOOP: &str = "for (String item : items) {\n            total +=  item.length();\n        }";

fn java_source() -> String {
    format!(
        "class Totals {{\n    int sum(java.util.List<String> items) {{\n        int total = 0;\n        {LOOP}\n        return total;\n    }}\n}}\n"
    )
}

/// Whether `text` is written as one instruction somewhere in `emits`.
fn emits_text(emits: &[Emit], text: &str) -> bool {
    emits.iter().any(|emit| match emit {
        Emit::Text(t) => t == text,
        Emit::Line => false,
        Emit::Block { body, .. } => emits_text(body, text),
    })
}

fn body(file: &crossgen_ir::File) -> &[Statement] {
    let method = file.classes().next().unwrap().plain_methods().next().unwrap();
    &method.body.as_ref().unwrap().statements
}

#[test]
fn java_unknown_statement_is_byte_exact() {
    let source = java_source();
    let file = read_java("Totals.java", &source, &NoContext).unwrap();
    let statements = body(&file);
    assert_eq!(statements.len(), 3);

    let Statement::Unknown(unknown) = &statements[1] else {
        panic!("expected an unknown statement, got {}", statements[1].kind_name());
    };
    assert_eq!(unknown.meta.representation("java"), Some(LOOP));
    assert_eq!(unknown.meta.representation("kotlin"), None);

    let emits = JAVA_WRITER.emit_file(&file).unwrap();
    assert!(emits_text(&emits, LOOP));
    let java = JAVA_WRITER.write(&file).unwrap();
    assert!(java.contains("        for (String item : items) {\n"));
}

#[test]
fn unknown_from_another_language_is_an_error() {
    let file = read_java("Totals.java", &java_source(), &NoContext).unwrap();
    for result in [KOTLIN_WRITER.write(&file), SWIFT_WRITER.write(&file)] {
        match result {
            Err(GenerateError::UnsupportedUnknown { language, .. }) => assert_eq!(language, "java"),
            other => panic!("expected UnsupportedUnknown, got {other:?}"),
        }
    }
}

#[test]
fn kotlin_unknown_expression_is_byte_exact() {
    let template = "\"sum: ${a + b}\"";
    let source = format!("fun label(a: Int, b: Int): String {{\n    return {template}\n}}\n");
    let file = read_kotlin("Label.kt", &source, &NoContext).unwrap();
    let Declaration::Method(method) = &file.declarations[0] else {
        panic!("expected a top-level function");
    };
    let statements = &method.body.as_ref().unwrap().statements;

    let Statement::Return(ret) = &statements[0] else {
        panic!("expected return");
    };
    let Some(Expression::Unknown(unknown)) = &ret.expression else {
        panic!("expected an unknown expression");
    };
    assert_eq!(unknown.meta.representation("kotlin"), Some(template));

    let kotlin = KOTLIN_WRITER.write(&file).unwrap();
    assert!(kotlin.contains(&format!("return {template}")));
    assert!(JAVA_WRITER.write(&file).is_err());
}
