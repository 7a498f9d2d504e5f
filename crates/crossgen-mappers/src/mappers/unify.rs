//! Intersection of the same API read from several sources.
//!
//! Given one file per platform, keeps what every platform declares: classes
//! present by simple name in every file, and within them the fields and
//! methods whose names and types agree everywhere. Nested classes are
//! intersected the same way. The result is a single file named after the
//! first input, carrying its imports and properties.

use crate::traits::{ListMapper, MapError};
use crossgen_ir::builders::FileBuilder;
use crossgen_ir::{Callable, Class, File, StructureEq};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnifyMapper;

impl UnifyMapper {
    pub fn new() -> Self {
        Self
    }
}

fn same_signature(a: &Callable, b: &Callable) -> bool {
    a.name() == b.name()
        && std::mem::discriminant(a) == std::mem::discriminant(b)
        && a.return_type().structure_eq(b.return_type())
        && a.parameters().len() == b.parameters().len()
        && a.parameters()
            .iter()
            .zip(b.parameters())
            .all(|(x, y)| x.ir_type.structure_eq(&y.ir_type))
}

/// `class` reduced to the members every one of `others` also has.
fn intersect(class: &Class, others: &[&Class]) -> Result<Class, MapError> {
    let mut builder = class.to_builder().clear_members();
    for field in &class.fields {
        let everywhere = others.iter().all(|other| {
            other
                .field(&field.name)
                .is_some_and(|f| f.ir_type.structure_eq(&field.ir_type))
        });
        if everywhere {
            builder = builder.field(field.clone());
        }
    }
    for callable in &class.methods {
        if others
            .iter()
            .all(|other| other.methods.iter().any(|c| same_signature(c, callable)))
        {
            builder = builder.callable(callable.clone());
        }
    }
    for nested in &class.nested_classes {
        let counterparts: Option<Vec<&Class>> = others
            .iter()
            .map(|other| other.nested_class(&nested.simple_name))
            .collect();
        if let Some(counterparts) = counterparts {
            builder = builder.nested_class(intersect(nested, &counterparts)?);
        }
    }
    Ok(builder.build()?)
}

impl ListMapper for UnifyMapper {
    fn name(&self) -> &'static str {
        "unify"
    }

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        let Some((first, rest)) = files.split_first() else {
            return Ok(Vec::new());
        };
        let mut output = FileBuilder::new(&first.name).imports(first.imports.iter().cloned());
        for (key, value) in first.language_properties.iter() {
            output = output.property(key, value.clone());
        }
        let mut kept = 0;
        for class in first.classes() {
            let counterparts: Option<Vec<&Class>> =
                rest.iter().map(|file| file.class(&class.simple_name)).collect();
            if let Some(counterparts) = counterparts {
                output = output.class(intersect(class, &counterparts)?);
                kept += 1;
            }
        }
        debug!(files = files.len(), classes = kept, "unified files");
        Ok(vec![output.build()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::{api, chat, field, nested, source, string, user};
    use crossgen_ir::builders::{ClassBuilder, MethodBuilder, PrimitiveTypeBuilder};
    use crossgen_ir::{PrimitiveType, Visibility};

    fn class_names(file: &File) -> Vec<&str> {
        file.classes()
            .flat_map(|c| c.nested_classes.iter())
            .map(|c| c.simple_name.as_str())
            .collect()
    }

    #[test]
    fn empty_input_gives_no_files() {
        assert!(UnifyMapper.map_all(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn single_file_is_kept_whole() {
        let files = UnifyMapper.map_all(vec![api()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].structure_eq(&api()));
    }

    #[test]
    fn only_shared_nested_classes_survive() {
        let files = UnifyMapper
            .map_all(vec![api(), source(vec![chat()])])
            .unwrap();
        assert_eq!(class_names(&files[0]), ["Object", "Chat"]);
        assert_eq!(files[0].package(), Some("org.example"));
    }

    #[test]
    fn fields_must_agree_on_type() {
        let retyped = nested(
            "User",
            vec![
                field("id", PrimitiveTypeBuilder::new(PrimitiveType::Long).nullable(false).build()),
                field("name", string()),
            ],
        );
        let files = UnifyMapper
            .map_all(vec![source(vec![user()]), source(vec![retyped])])
            .unwrap();
        let api = files[0].class("Api").unwrap();
        let user = api.nested_class("User").unwrap();
        let names: Vec<_> = user.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name"]);
    }

    #[test]
    fn methods_must_agree_on_signature() {
        let with_method = |ret: PrimitiveType| {
            let class = ClassBuilder::new("Clock")
                .visibility(Visibility::public())
                .method(
                    MethodBuilder::new("now", PrimitiveTypeBuilder::new(ret).build())
                        .visibility(Visibility::public())
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap();
            FileBuilder::new("Clock").class(class).build().unwrap()
        };
        let same = UnifyMapper
            .map_all(vec![with_method(PrimitiveType::Long), with_method(PrimitiveType::Long)])
            .unwrap();
        assert_eq!(same[0].class("Clock").unwrap().methods.len(), 1);

        let differ = UnifyMapper
            .map_all(vec![with_method(PrimitiveType::Long), with_method(PrimitiveType::Int)])
            .unwrap();
        assert!(differ[0].class("Clock").unwrap().methods.is_empty());
    }
}
