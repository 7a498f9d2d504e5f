//! Facts from a caller's analysis take part in conversion.

use crossgen_ir::builders::TypeReferenceBuilder;
use crossgen_ir::{Expression, File, MethodCallKind, Statement, Type};
use crossgen_languages::{
    NoContext, ResolutionContext, ResolvedCall, SourceSpan, read_java, read_kotlin,
};
use std::collections::HashMap;

/// Analysis results keyed the way an analyzer reports them.
#[derive(Default)]
struct Facts {
    names: HashMap<&'static str, &'static str>,
    types: HashMap<SourceSpan, Type>,
    calls: HashMap<SourceSpan, ResolvedCall>,
}

impl ResolutionContext for Facts {
    fn qualified_name(&self, simple: &str) -> Option<String> {
        self.names.get(simple).map(|q| q.to_string())
    }

    fn inferred_type(&self, span: SourceSpan) -> Option<Type> {
        self.types.get(&span).cloned()
    }

    fn resolved_call(&self, span: SourceSpan) -> Option<ResolvedCall> {
        self.calls.get(&span).cloned()
    }
}

/// Span of `text` in `source`, which must occur exactly once.
fn span(source: &str, text: &str) -> SourceSpan {
    assert_eq!(source.matches(text).count(), 1, "{text:?} is ambiguous");
    let start = source.find(text).unwrap();
    SourceSpan::new(start, start + text.len())
}

fn named(name: &str) -> Type {
    TypeReferenceBuilder::qualified(name).nullable(false).build()
}

fn statements(file: &File) -> &[Statement] {
    let method = file.class("C").unwrap().plain_methods().next().unwrap();
    &method.body.as_ref().unwrap().statements
}

fn field_type(file: &File) -> String {
    let class = file.class("C").unwrap();
    class.fields[0].ir_type.with_nullable(false).display_name()
}

/// `var xs = makeList()`: the declared type and the call kind.
fn local(statement: &Statement) -> (String, &MethodCallKind) {
    let Statement::VariableDeclaration(declaration) = statement else {
        panic!("expected declaration, got {statement:?}");
    };
    let initializer = declaration.initializer.as_deref().and_then(Statement::as_expression);
    let Some(Expression::MethodCall(call)) = initializer else {
        panic!("expected call initializer");
    };
    (
        declaration.ir_type.with_nullable(false).display_name(),
        &call.ir_method_call_kind,
    )
}

const JAVA: &str = "\
import java.util.List;

class C {
    List items;

    void run() {
        var xs = makeList();
        apply(y -> y);
    }
}
";

fn java_facts() -> Facts {
    let mut facts = Facts::default();
    facts.names.insert("List", "com.acme.List");
    facts.types.insert(span(JAVA, "makeList()"), named("java.util.ArrayList"));
    let y = JAVA.find("y ->").unwrap();
    facts.types.insert(SourceSpan::new(y, y + 1), named("java.lang.String"));
    facts.calls.insert(
        span(JAVA, "makeList()"),
        ResolvedCall {
            declaring_type: Some("com.acme.Lists".into()),
            kind: MethodCallKind::Other { token: "static".into() },
        },
    );
    facts
}

#[test]
fn java_context_name_beats_the_import() {
    let file = read_java("C.java", JAVA, &java_facts()).unwrap();
    assert_eq!(field_type(&file), "com.acme.List");

    let file = read_java("C.java", JAVA, &NoContext).unwrap();
    assert_eq!(field_type(&file), "java.util.List");
}

#[test]
fn java_inferred_local_and_call_kind() {
    let file = read_java("C.java", JAVA, &java_facts()).unwrap();
    let (ty, kind) = local(&statements(&file)[0]);
    assert_eq!(ty, "java.util.ArrayList");
    assert_eq!(kind, &MethodCallKind::Other { token: "static".into() });

    let file = read_java("C.java", JAVA, &NoContext).unwrap();
    let (ty, kind) = local(&statements(&file)[0]);
    assert_eq!(ty, "java.lang.Object");
    assert_eq!(kind, &MethodCallKind::Default);
}

#[test]
fn java_untyped_lambda_parameter() {
    let file = read_java("C.java", JAVA, &java_facts()).unwrap();
    let Statement::Expression(statement) = &statements(&file)[1] else {
        panic!("expected expression statement");
    };
    let Expression::MethodCall(apply) = &statement.expression else {
        panic!("expected call");
    };
    let [Expression::Lambda(lambda)] = apply.value_arguments.as_slice() else {
        panic!("expected one lambda argument");
    };
    assert_eq!(lambda.parameters[0].name, "y");
    assert_eq!(
        lambda.parameters[0].ir_type.with_nullable(false).display_name(),
        "java.lang.String"
    );
}

const KOTLIN: &str = "\
import java.util.List

class C {
    val items: List? = null

    fun run() {
        val xs = makeList()
    }
}
";

#[test]
fn kotlin_context_reaches_names_locals_and_calls() {
    let mut facts = Facts::default();
    facts.names.insert("List", "com.acme.List");
    facts.types.insert(span(KOTLIN, "makeList()"), named("java.util.ArrayList"));
    facts.calls.insert(
        span(KOTLIN, "makeList()"),
        ResolvedCall {
            declaring_type: None,
            kind: MethodCallKind::Super,
        },
    );

    let file = read_kotlin("C.kt", KOTLIN, &facts).unwrap();
    assert_eq!(field_type(&file), "com.acme.List");
    let (ty, kind) = local(&statements(&file)[0]);
    assert_eq!(ty, "java.util.ArrayList");
    assert_eq!(kind, &MethodCallKind::Super);

    let file = read_kotlin("C.kt", KOTLIN, &NoContext).unwrap();
    assert_eq!(field_type(&file), "java.util.List");
}
