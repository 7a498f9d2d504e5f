//! Naming shared by the derived-artifact mappers.
//!
//! Every derived declaration is named after one nested class of a
//! container: `Foo` nested in `Api` yields the interface `<prefix>Foo`, the
//! getter `<prefix>FooInstanceGetterImpl`, and so on. Types that refer to a
//! sibling nested class are renamed to the sibling's interface.

use crate::config::PipelineConfig;
use crate::traits::MapError;
use crossgen_ir::builders::{
    FileBuilder, IdentifierBuilder, LiteralBuilder, MethodBodyBuilder, PrimitiveTypeBuilder,
    ReturnBuilder, TypeReferenceBuilder,
};
use crossgen_ir::properties::keys;
use crossgen_ir::{
    Class, Expression, Field, File, MethodBody, PrimitiveType, Type, TypeReference,
};
use std::collections::HashSet;

/// Static field holding a class's wire constructor id.
pub const CONSTRUCTOR_FIELD: &str = "CONSTRUCTOR";

/// Name of the getter interface nested in each derived interface.
pub const INSTANCE_GETTER: &str = "InstanceGetter";

/// Top-level classes whose nested classes are mapped.
///
/// With a configured container, exactly that class (by simple or qualified
/// name); otherwise every top-level class that has nested classes.
pub fn containers<'a>(
    files: impl IntoIterator<Item = &'a File>,
    config: &PipelineConfig,
) -> Result<Vec<&'a Class>, MapError> {
    let mut classes = files.into_iter().flat_map(|f| f.classes());
    match &config.source.container {
        Some(wanted) => classes
            .find(|c| {
                c.simple_name == *wanted || c.qualified_name.as_deref() == Some(wanted.as_str())
            })
            .map(|c| vec![c])
            .ok_or_else(|| MapError::MissingDeclaration(wanted.clone())),
        None => Ok(classes.filter(|c| !c.nested_classes.is_empty()).collect()),
    }
}

/// Last dot-separated segment of a name.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Fields that become properties and getter parameters.
pub fn data_fields(class: &Class) -> impl Iterator<Item = &Field> {
    class
        .fields
        .iter()
        .filter(|f| f.name != CONSTRUCTOR_FIELD && !f.meta.language_properties.flag(keys::STATIC))
}

/// Initializer of the class's `CONSTRUCTOR` field, if it has one.
pub fn constructor_id(class: &Class) -> Option<&Expression> {
    class
        .field(CONSTRUCTOR_FIELD)
        .and_then(Field::initializer_expression)
}

/// A bare name used as an expression.
pub fn name(name: &str) -> Expression {
    IdentifierBuilder::simple(name).build()
}

/// `this.<member>`.
pub fn this_member(member: &str) -> Expression {
    IdentifierBuilder::new(LiteralBuilder::new(member).build())
        .qualifier(LiteralBuilder::new("this").build())
        .build()
}

/// A body that only returns `value`.
pub fn returning(value: Expression) -> MethodBody {
    MethodBodyBuilder::new()
        .statement(ReturnBuilder::new().value(value).build())
        .build()
}

pub fn int() -> Type {
    PrimitiveTypeBuilder::new(PrimitiveType::Int)
        .nullable(false)
        .build()
}

/// A generated file in the configured package.
pub fn file(config: &PipelineConfig, name: &str) -> FileBuilder {
    let builder = FileBuilder::new(name);
    if config.package.is_empty() {
        builder
    } else {
        builder.property(keys::JVM_PACKAGE, config.package.as_str())
    }
}

/// Derived names for the nested classes of one container.
pub struct Naming<'a> {
    config: &'a PipelineConfig,
    siblings: HashSet<&'a str>,
}

impl<'a> Naming<'a> {
    pub fn new(config: &'a PipelineConfig, container: &'a Class) -> Self {
        Self {
            config,
            siblings: container
                .nested_classes
                .iter()
                .map(|c| c.simple_name.as_str())
                .collect(),
        }
    }

    pub fn config(&self) -> &'a PipelineConfig {
        self.config
    }

    /// `<prefix><Name>`.
    pub fn interface(&self, class: &str) -> String {
        format!("{}{class}", self.config.prefix)
    }

    pub fn qualified_interface(&self, class: &str) -> String {
        self.config.qualify(&self.interface(class))
    }

    /// `<package>.<prefix><Name>.InstanceGetter`.
    pub fn qualified_getter(&self, class: &str) -> String {
        format!("{}.{INSTANCE_GETTER}", self.qualified_interface(class))
    }

    /// `<prefix><Name>InstanceGetterImpl`.
    pub fn getter_impl(&self, class: &str) -> String {
        format!("{}{INSTANCE_GETTER}Impl", self.interface(class))
    }

    /// Non-null reference to the derived interface of `class`.
    pub fn interface_type(&self, class: &str) -> Type {
        TypeReferenceBuilder::qualified(self.qualified_interface(class))
            .nullable(false)
            .build()
    }

    pub fn is_sibling(&self, name: &str) -> bool {
        self.siblings.contains(last_segment(name))
    }

    /// Whether `ty` refers to a sibling anywhere, including type
    /// arguments and array elements.
    pub fn mentions_sibling(&self, ty: &Type) -> bool {
        match ty {
            Type::Reference(reference) => {
                self.is_sibling(reference_name(reference))
                    || reference.type_parameters.iter().any(|t| self.mentions_sibling(t))
            }
            Type::Array(array) => self.mentions_sibling(&array.element_type),
            _ => false,
        }
    }

    /// `ty` with every sibling reference renamed to its interface. Array
    /// elements that are renamed become non-null. Types without a sibling
    /// are returned as they are.
    pub fn convert(&self, ty: &Type) -> Type {
        if !self.mentions_sibling(ty) {
            return ty.clone();
        }
        match ty {
            Type::Reference(reference) => {
                let mut converted = reference.clone();
                let name = reference_name(reference);
                if self.is_sibling(name) {
                    let interface = self.interface(last_segment(name));
                    converted.referenced_class_qualified_name = Some(self.config.qualify(&interface));
                    converted.referenced_class_simple_name = interface;
                }
                converted.type_parameters = reference
                    .type_parameters
                    .iter()
                    .map(|t| self.convert(t))
                    .collect();
                Type::Reference(converted)
            }
            Type::Array(array) => {
                let mut converted = array.clone();
                converted.element_type = Box::new(self.convert(&array.element_type).with_nullable(false));
                Type::Array(converted)
            }
            other => other.clone(),
        }
    }
}

fn reference_name(reference: &TypeReference) -> &str {
    reference
        .referenced_class_qualified_name
        .as_deref()
        .unwrap_or(&reference.referenced_class_simple_name)
}

/// Non-null reference to `class` itself.
pub fn class_type(class: &Class) -> Type {
    match &class.qualified_name {
        Some(qualified) => TypeReferenceBuilder::qualified(qualified),
        None => TypeReferenceBuilder::new(&class.simple_name),
    }
    .nullable(false)
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossgen_ir::builders::{ArrayTypeBuilder, ClassBuilder};
    use crossgen_ir::Visibility;

    fn api() -> Class {
        ClassBuilder::new("Api")
            .qualified_name("org.example.Api")
            .visibility(Visibility::public())
            .nested_class(ClassBuilder::new("User").visibility(Visibility::public()).build().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn sibling_references_become_interfaces() {
        let config = PipelineConfig::default();
        let api = api();
        let naming = Naming::new(&config, &api);

        let user = TypeReferenceBuilder::qualified("org.example.Api.User").build();
        let users = ArrayTypeBuilder::new(user.with_nullable(false)).build();
        let Type::Array(converted) = naming.convert(&users) else {
            panic!("array expected");
        };
        assert!(converted.is_nullable);
        assert_eq!(
            *converted.element_type,
            TypeReferenceBuilder::qualified("crossgen.generated.CommonUser")
                .nullable(false)
                .build()
        );

        let list = TypeReferenceBuilder::qualified("java.util.List")
            .type_parameter(user)
            .build();
        assert_eq!(naming.convert(&list).display_name(), "java.util.List<crossgen.generated.CommonUser?>?");
        assert_eq!(naming.convert(&int()), int());
    }

    #[test]
    fn configured_container_must_exist() {
        let file = FileBuilder::new("Api.java").class(api()).build().unwrap();
        let mut config = PipelineConfig::default();
        assert_eq!(containers([&file], &config).unwrap().len(), 1);

        config.source.container = Some("org.example.Api".into());
        assert_eq!(containers([&file], &config).unwrap()[0].simple_name, "Api");

        config.source.container = Some("Missing".into());
        assert_eq!(
            containers([&file], &config),
            Err(MapError::MissingDeclaration("Missing".into()))
        );
    }
}
