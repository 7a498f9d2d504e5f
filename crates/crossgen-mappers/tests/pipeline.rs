//! The standard pipeline end to end, and wiring batch determinism.

use crossgen_ir::builders::{ClassBuilder, FieldBuilder, FileBuilder, TypeReferenceBuilder};
use crossgen_ir::{Declaration, Expression, File, Visibility};
use crossgen_languages::output::KOTLIN_WRITER;
use crossgen_languages::{NoContext, Writer, read_java};
use crossgen_mappers::{ListMapper, MapError, Pipeline, PipelineConfig, WiringModulesMapper};

const API: &str = "\
package org.example;

public class Api {
    public abstract static class Object {
    }

    public static class User extends Object {
        public static final int CONSTRUCTOR = 42;
        public int id;
        public String name;
    }

    public static class Chat extends Object {
        public static final int CONSTRUCTOR = 7;
        public String title;
        public User owner;
    }
}
";

fn registry(count: usize) -> File {
    let mut api = ClassBuilder::new("Registry")
        .qualified_name("org.example.Registry")
        .visibility(Visibility::public());
    for i in 0..count {
        let field = FieldBuilder::new("label", TypeReferenceBuilder::qualified("java.lang.String").build())
            .visibility(Visibility::public())
            .build()
            .unwrap();
        api = api.nested_class(
            ClassBuilder::new(format!("Item{i}"))
                .qualified_name(format!("org.example.Registry.Item{i}"))
                .visibility(Visibility::public())
                .field(field)
                .build()
                .unwrap(),
        );
    }
    FileBuilder::new("Registry.java")
        .class(api.build().unwrap())
        .build()
        .unwrap()
}

/// Getter types registered by one wiring module file, in order.
fn registered(file: &File) -> Vec<String> {
    let [Declaration::Field(module)] = file.declarations.as_slice() else {
        panic!("one module field expected in {}", file.name);
    };
    let Some(Expression::MethodCall(call)) = module.initializer_expression() else {
        panic!("module call expected");
    };
    let [Expression::Lambda(lambda)] = call.value_arguments.as_slice() else {
        panic!("module lambda expected");
    };
    lambda
        .body
        .as_statements()
        .iter()
        .filter_map(|s| match s.as_expression() {
            Some(Expression::MethodCall(single)) => Some(single.type_arguments[0].display_name()),
            _ => None,
        })
        .collect()
}

#[test]
fn batching_is_contiguous_and_deterministic() {
    let mut config = PipelineConfig::default();
    config.wiring.batch_size = 3;
    let wiring = WiringModulesMapper::new(config);

    let files = wiring.map_all(vec![registry(7)]).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "InstanceGettersModule1",
            "InstanceGettersModule2",
            "InstanceGettersModule3",
            "InstanceGettersModule",
        ]
    );

    let batches: Vec<_> = files[..3].iter().map(registered).collect();
    let sizes: Vec<_> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, [3, 3, 1]);
    let expected: Vec<_> = (0..7)
        .map(|i| format!("crossgen.generated.CommonItem{i}.InstanceGetter"))
        .collect();
    assert_eq!(batches.concat(), expected);

    assert_eq!(wiring.map_all(vec![registry(7)]).unwrap(), files);
}

#[test]
fn exact_multiple_has_no_partial_batch() {
    let mut config = PipelineConfig::default();
    config.wiring.batch_size = 2;
    let files = WiringModulesMapper::new(config)
        .map_all(vec![registry(4)])
        .unwrap();
    assert_eq!(files.len(), 3);
    assert!(files[..2].iter().all(|f| registered(f).len() == 2));
}

#[test]
fn java_source_to_kotlin_artifacts() {
    let api = read_java("Api.java", API, &NoContext).unwrap();
    let files = Pipeline::from_config(&PipelineConfig::default())
        .run(vec![api])
        .unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "CommonInterfaces",
            "InstanceGetterImpls",
            "InstanceGettersModule1",
            "InstanceGettersModule",
            "ClassBoxes",
        ]
    );

    let kotlin: Vec<String> = files
        .iter()
        .map(|f| KOTLIN_WRITER.write(f).unwrap())
        .collect();
    assert!(kotlin.iter().all(|k| k.starts_with("package crossgen.generated\n")));

    let interfaces = &kotlin[0];
    assert!(interfaces.contains("interface CommonUser : CommonObject {"), "{interfaces}");
    assert!(interfaces.contains("val name: String?"), "{interfaces}");
    assert!(interfaces.contains("interface InstanceGetter {"), "{interfaces}");

    let impls = &kotlin[1];
    assert!(
        impls.contains("class CommonChatInstanceGetterImpl : CommonChat.InstanceGetter {"),
        "{impls}"
    );

    insta::assert_snapshot!(&kotlin[3], @r###"
    package crossgen.generated

    import org.koin.dsl.module
    import org.koin.core.module.Module

    val instanceGettersModule: Module = module({ includes(instanceGettersModule1) })
    "###);
    assert!(kotlin[2].contains("import org.koin.core.module.Module\n"), "{}", kotlin[2]);

    let boxes = &kotlin[4];
    assert!(boxes.contains("CommonUserBox(private val value: Api.User) : BoxBase(), Kit.CommonUser"), "{boxes}");
    assert!(boxes.contains("import org.example.Api\n"), "{boxes}");
}

#[test]
fn configured_container_must_be_present() {
    let mut config = PipelineConfig::default();
    config.source.container = Some("TdApi".into());
    let err = Pipeline::from_config(&config)
        .run(vec![registry(1)])
        .unwrap_err();
    assert_eq!(err, MapError::MissingDeclaration("TdApi".into()));
}
