//! Wrapper ("box") types holding a platform value behind its shared
//! interface.

use crate::config::PipelineConfig;
use crate::naming::{self, Naming};
use crate::traits::{MapError, Mapper};
use crossgen_ir::builders::{
    AssignmentBuilder, ClassBuilder, ConstructorBuilder, ExpressionStatementBuilder, FieldBuilder,
    MethodBodyBuilder, MethodBuilder, ParameterBuilder, PropertyAccessBuilder, SuperClassBuilder,
    TypeReferenceBuilder,
};
use crossgen_ir::properties::keys;
use crossgen_ir::{Class, ClassKind, Field, File, Visibility};
use tracing::debug;

/// The wrapped value.
const VALUE: &str = "value";

pub struct WrapperTypesMapper {
    config: PipelineConfig,
}

impl WrapperTypesMapper {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    fn wrapper(&self, naming: &Naming, class: &Class) -> Result<Class, MapError> {
        let wrappers = &self.config.wrappers;
        let interface = naming.interface(&class.simple_name);
        let name = format!("{interface}{}", wrappers.suffix);
        let value_type = naming::class_type(class);

        let assign = AssignmentBuilder::new(naming::this_member(VALUE), naming::name(VALUE)).build();
        let constructor = ConstructorBuilder::new(
            &name,
            TypeReferenceBuilder::new(&name).nullable(false).build(),
        )
        .parameter(ParameterBuilder::new(VALUE, value_type.clone()).build()?)
        .visibility(Visibility::public())
        .body(
            MethodBodyBuilder::new()
                .statement(ExpressionStatementBuilder::new(assign).build())
                .build(),
        )
        .property(keys::PRIMARY, true)
        .build()?;

        let mut builder = ClassBuilder::new(&name)
            .kind(ClassKind::Class)
            .visibility(Visibility::public())
            .property(keys::FINAL, true)
            .super_class(SuperClassBuilder::new(&wrappers.box_base, ClassKind::Class).build()?)
            .super_class(
                SuperClassBuilder::new(&interface, ClassKind::Interface)
                    .qualified_name(format!("{}.{interface}", wrappers.kit))
                    .build()?,
            )
            .field(
                FieldBuilder::new(VALUE, value_type)
                    .visibility(Visibility::private())
                    .mutable(false)
                    .build()?,
            )
            .constructor(constructor);

        if class.is_abstract() {
            return Ok(builder.build()?);
        }

        let mut fields: Vec<&Field> = naming::data_fields(class).collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        for field in fields {
            let access = PropertyAccessBuilder::new(&field.name)
                .receiver(naming::name(VALUE))
                .build()?;
            builder = builder.field(
                FieldBuilder::new(&field.name, naming.convert(&field.ir_type))
                    .visibility(Visibility::public())
                    .mutable(false)
                    .property(keys::OVERRIDE, true)
                    .initializer(ExpressionStatementBuilder::new(access).build())
                    .build()?,
            );
        }
        if let Some(id) = naming::constructor_id(class) {
            builder = builder.method(
                MethodBuilder::new("getConstructor", naming::int())
                    .visibility(Visibility::public())
                    .is_override(true)
                    .body(naming::returning(id.clone()))
                    .build()?,
            );
        }
        Ok(builder.build()?)
    }
}

impl Mapper for WrapperTypesMapper {
    fn name(&self) -> &'static str {
        "wrapper-types"
    }

    fn map(&self, file: File) -> Result<File, MapError> {
        let mut output = naming::file(&self.config, &self.config.wrappers.file_name);
        let mut count = 0;
        for container in naming::containers([&file], &self.config)? {
            let naming = Naming::new(&self.config, container);
            for class in &container.nested_classes {
                output = output.class(self.wrapper(&naming, class)?);
                count += 1;
            }
        }
        debug!(file = %file.name, wrappers = count, "derived wrapper types");
        Ok(output.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::api;
    use crossgen_ir::{Expression, Type};

    fn wrappers() -> File {
        WrapperTypesMapper::new(PipelineConfig::default())
            .map(api())
            .unwrap()
    }

    #[test]
    fn wrapper_extends_box_base_and_the_kit_interface() {
        let file = wrappers();
        assert_eq!(file.name, "ClassBoxes");
        let user = file.class("CommonUserBox").unwrap();
        assert!(user.meta.language_properties.flag(keys::FINAL));
        let supers: Vec<_> = user.super_classes.iter().map(|s| (s.display_name(), s.kind.clone())).collect();
        assert_eq!(
            supers,
            [("BoxBase", ClassKind::Class), ("Kit.CommonUser", ClassKind::Interface)]
        );
    }

    #[test]
    fn value_is_private_and_set_by_the_primary_constructor() {
        let file = wrappers();
        let user = file.class("CommonUserBox").unwrap();
        let value = user.field(VALUE).unwrap();
        assert!(value.visibility.is_private());
        assert!(!value.is_mutable);
        assert_eq!(value.ir_type.display_name(), "org.example.Api.User");

        let constructor = user.constructors().next().unwrap();
        assert!(constructor.meta.language_properties.flag(keys::PRIMARY));
        assert_eq!(constructor.parameters[0].name, VALUE);
        assert_eq!(constructor.body.as_ref().unwrap().statements.len(), 1);
    }

    #[test]
    fn forwarding_properties_are_sorted_overrides() {
        let file = wrappers();
        let chat = file.class("CommonChatBox").unwrap();
        let names: Vec<_> = chat.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, [VALUE, "owner", "title"]);

        let owner = chat.field("owner").unwrap();
        assert!(owner.meta.language_properties.flag(keys::OVERRIDE));
        let Type::Reference(reference) = &owner.ir_type else {
            panic!("reference expected");
        };
        assert_eq!(reference.referenced_class_simple_name, "CommonUser");
        let Some(Expression::PropertyAccess(access)) = owner.initializer_expression() else {
            panic!("property access expected");
        };
        assert_eq!(access.property_name, "owner");

        let method = chat.plain_methods().next().unwrap();
        assert_eq!(method.name, "getConstructor");
        assert!(method.is_override);
    }

    #[test]
    fn abstract_wrapper_has_no_forwarding() {
        let file = wrappers();
        let object = file.class("CommonObjectBox").unwrap();
        assert_eq!(object.fields.len(), 1);
        assert!(object.plain_methods().next().is_none());
    }
}
