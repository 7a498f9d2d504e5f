//! One shared interface per nested class of a container.
//!
//! `Api.User { CONSTRUCTOR = 42; String name; }` becomes
//!
//! ```kotlin
//! interface CommonUser {
//!     val name: String?
//!     fun getConstructor(): Int { return 42 }
//!     interface InstanceGetter {
//!         fun getInstance(name: String?): CommonUser
//!         fun getInstance(): CommonUser
//!     }
//! }
//! ```

use crate::config::PipelineConfig;
use crate::naming::{self, INSTANCE_GETTER, Naming};
use crate::traits::{MapError, Mapper};
use crossgen_ir::builders::{
    ClassBuilder, FieldBuilder, MethodBuilder, ParameterBuilder, SuperClassBuilder,
};
use crossgen_ir::properties::keys;
use crossgen_ir::{Class, ClassKind, File, Method, Parameter};
use tracing::debug;

pub struct CommonInterfacesMapper {
    config: PipelineConfig,
}

impl CommonInterfacesMapper {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    fn interface(&self, naming: &Naming, class: &Class) -> Result<Class, MapError> {
        let name = &class.simple_name;
        let mut builder = ClassBuilder::new(naming.interface(name))
            .qualified_name(naming.qualified_interface(name))
            .kind(ClassKind::Interface)
            .visibility(class.visibility.clone());

        let parent = class
            .super_classes
            .iter()
            .find(|s| s.kind == ClassKind::Class)
            .map(|s| naming::last_segment(s.display_name()))
            .filter(|parent| naming.is_sibling(parent));
        if let Some(parent) = parent {
            builder = builder.super_class(
                SuperClassBuilder::new(naming.interface(parent), ClassKind::Interface)
                    .qualified_name(naming.qualified_interface(parent))
                    .build()?,
            );
        }

        // Abstract classes only carry the hierarchy.
        if class.is_abstract() {
            return Ok(builder.build()?);
        }

        for field in naming::data_fields(class) {
            builder = builder.field(
                FieldBuilder::new(&field.name, naming.convert(&field.ir_type))
                    .visibility(field.visibility.clone())
                    .mutable(false)
                    .property(keys::ABSTRACT, true)
                    .build()?,
            );
        }
        if let Some(id) = naming::constructor_id(class) {
            builder = builder.method(
                MethodBuilder::new("getConstructor", naming::int())
                    .visibility(class.visibility.clone())
                    .body(naming::returning(id.clone()))
                    .build()?,
            );
        }
        Ok(builder.nested_class(self.instance_getter(naming, class)?).build()?)
    }

    fn instance_getter(&self, naming: &Naming, class: &Class) -> Result<Class, MapError> {
        let parameters = getter_parameters(naming, class)?;
        let has_fields = !parameters.is_empty();
        let mut builder = ClassBuilder::new(INSTANCE_GETTER)
            .qualified_name(naming.qualified_getter(&class.simple_name))
            .kind(ClassKind::Interface)
            .visibility(class.visibility.clone())
            .method(get_instance(naming, class, parameters)?);
        if has_fields {
            builder = builder.method(get_instance(naming, class, Vec::new())?);
        }
        Ok(builder.build()?)
    }
}

/// One parameter per data field, typed as the interface sees it.
pub(crate) fn getter_parameters(naming: &Naming, class: &Class) -> Result<Vec<Parameter>, MapError> {
    naming::data_fields(class)
        .map(|f| ParameterBuilder::new(&f.name, naming.convert(&f.ir_type)).build())
        .collect::<Result<_, _>>()
        .map_err(MapError::from)
}

fn get_instance(naming: &Naming, class: &Class, parameters: Vec<Parameter>) -> Result<Method, MapError> {
    Ok(MethodBuilder::new("getInstance", naming.interface_type(&class.simple_name))
        .parameters(parameters)
        .visibility(class.visibility.clone())
        .is_abstract(true)
        .build()?)
}

impl Mapper for CommonInterfacesMapper {
    fn name(&self) -> &'static str {
        "common-interfaces"
    }

    fn map(&self, file: File) -> Result<File, MapError> {
        let mut output = naming::file(&self.config, &self.config.interfaces.file_name);
        let mut count = 0;
        for container in naming::containers([&file], &self.config)? {
            let naming = Naming::new(&self.config, container);
            for class in &container.nested_classes {
                output = output.class(self.interface(&naming, class)?);
                count += 1;
            }
        }
        debug!(file = %file.name, interfaces = count, "derived common interfaces");
        Ok(output.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::{api, constructor_field, nested, source};
    use crossgen_ir::Type;

    fn interfaces() -> File {
        CommonInterfacesMapper::new(PipelineConfig::default())
            .map(api())
            .unwrap()
    }

    #[test]
    fn one_interface_per_nested_class() {
        let file = interfaces();
        assert_eq!(file.name, "CommonInterfaces");
        assert_eq!(file.package(), Some("crossgen.generated"));
        let names: Vec<_> = file.classes().map(|c| c.simple_name.as_str()).collect();
        assert_eq!(names, ["CommonObject", "CommonUser", "CommonChat"]);
        assert!(file.classes().all(|c| c.kind == ClassKind::Interface));
    }

    #[test]
    fn abstract_classes_keep_only_the_hierarchy() {
        let file = interfaces();
        let object = file.class("CommonObject").unwrap();
        assert!(object.fields.is_empty());
        assert!(object.methods.is_empty());
        assert!(object.nested_classes.is_empty());

        let user = file.class("CommonUser").unwrap();
        assert_eq!(user.super_classes.len(), 1);
        assert_eq!(user.super_classes[0].display_name(), "crossgen.generated.CommonObject");
        assert_eq!(user.super_classes[0].kind, ClassKind::Interface);
    }

    #[test]
    fn fields_become_abstract_read_only_properties() {
        let file = interfaces();
        let chat = file.class("CommonChat").unwrap();
        let names: Vec<_> = chat.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "owner"]);
        assert!(chat.fields.iter().all(|f| !f.is_mutable));
        assert!(chat.fields.iter().all(|f| f.meta.language_properties.flag(keys::ABSTRACT)));
        assert_eq!(
            chat.field("owner").unwrap().ir_type.display_name(),
            "crossgen.generated.CommonUser?"
        );
    }

    #[test]
    fn constructor_id_becomes_a_method() {
        let file = interfaces();
        let user = file.class("CommonUser").unwrap();
        let method = user.plain_methods().next().unwrap();
        assert_eq!(method.name, "getConstructor");
        assert_eq!(method.return_type, naming::int());
        assert!(user.field("CONSTRUCTOR").is_none());
    }

    #[test]
    fn instance_getter_has_both_overloads() {
        let file = interfaces();
        let getter = file
            .class("CommonUser")
            .and_then(|c| c.nested_class(INSTANCE_GETTER))
            .unwrap();
        assert_eq!(
            getter.qualified_name.as_deref(),
            Some("crossgen.generated.CommonUser.InstanceGetter")
        );
        let arities: Vec<_> = getter.plain_methods().map(|m| m.parameters.len()).collect();
        assert_eq!(arities, [2, 0]);
        assert!(getter.plain_methods().all(|m| m.is_abstract));
        let Type::Reference(returns) = &getter.plain_methods().next().unwrap().return_type else {
            panic!("reference expected");
        };
        assert!(!returns.is_nullable);
    }

    #[test]
    fn fieldless_class_has_one_overload() {
        let ping = nested("Ping", vec![constructor_field("3")]);
        let file = CommonInterfacesMapper::new(PipelineConfig::default())
            .map(source(vec![ping]))
            .unwrap();
        let getter = file
            .class("CommonPing")
            .and_then(|c| c.nested_class(INSTANCE_GETTER))
            .unwrap();
        assert_eq!(getter.methods.len(), 1);
        assert!(getter.plain_methods().all(|m| m.parameters.is_empty()));
    }
}
