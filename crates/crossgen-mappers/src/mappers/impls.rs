//! Concrete instance getters, one per non-abstract nested class.

use super::interfaces::getter_parameters;
use crate::config::PipelineConfig;
use crate::naming::{self, INSTANCE_GETTER, Naming};
use crate::traits::{MapError, Mapper};
use crossgen_ir::builders::{
    BlockBuilder, CastBuilder, ClassBuilder, ExpressionStatementBuilder, LambdaBuilder,
    MethodBuilder, MethodCallBuilder, ObjectCreationBuilder, SuperClassBuilder,
};
use crossgen_ir::{Class, ClassKind, Expression, Field, File, Method, Parameter, Type, Visibility};
use tracing::debug;

pub struct InstanceGetterImplsMapper {
    config: PipelineConfig,
}

impl InstanceGetterImplsMapper {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    fn getter(&self, naming: &Naming, class: &Class) -> Result<Class, MapError> {
        let name = &class.simple_name;
        let getter = naming.getter_impl(name);
        let parameters = getter_parameters(naming, class)?;
        let arguments = naming::data_fields(class)
            .map(|f| argument(naming, f))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = ClassBuilder::new(&getter)
            .qualified_name(self.config.qualify(&getter))
            .kind(ClassKind::Class)
            .visibility(Visibility::public())
            .super_class(
                SuperClassBuilder::new(INSTANCE_GETTER, ClassKind::Interface)
                    .qualified_name(naming.qualified_getter(name))
                    .build()?,
            );
        let has_fields = !parameters.is_empty();
        builder = builder.method(get_instance(naming, class, parameters, arguments)?);
        if has_fields {
            builder = builder.method(get_instance(naming, class, Vec::new(), Vec::new())?);
        }
        Ok(builder.build()?)
    }
}

fn get_instance(
    naming: &Naming,
    class: &Class,
    parameters: Vec<Parameter>,
    arguments: Vec<Expression>,
) -> Result<Method, MapError> {
    let creation = ObjectCreationBuilder::new(class.display_name())
        .arguments(arguments)
        .build()?;
    Ok(MethodBuilder::new("getInstance", naming.interface_type(&class.simple_name))
        .parameters(parameters)
        .visibility(Visibility::public())
        .is_override(true)
        .body(naming::returning(creation))
        .build()?)
}

/// The parameter for `field`, converted back to the field's own type.
///
/// Sibling references are cast; arrays of them are mapped element by
/// element and collected back into an array.
fn argument(naming: &Naming, field: &Field) -> Result<Expression, MapError> {
    let value = naming::name(&field.name);
    if !naming.mentions_sibling(&field.ir_type) {
        return Ok(value);
    }
    match &field.ir_type {
        Type::Array(array) => {
            let element = CastBuilder::new(naming::name("it"), (*array.element_type).clone()).build();
            let convert = LambdaBuilder::new()
                .body(
                    BlockBuilder::new()
                        .statement(ExpressionStatementBuilder::new(element).build())
                        .build(),
                )
                .build()?;
            let mapped = MethodCallBuilder::new("map")
                .receiver(value)
                .argument(convert)
                .build()?;
            Ok(MethodCallBuilder::new("toTypedArray")
                .receiver(mapped)
                .build()?)
        }
        other => Ok(CastBuilder::new(value, other.clone()).build()),
    }
}

impl Mapper for InstanceGetterImplsMapper {
    fn name(&self) -> &'static str {
        "instance-getter-impls"
    }

    fn map(&self, file: File) -> Result<File, MapError> {
        let mut output = naming::file(&self.config, &self.config.impls.file_name);
        let mut count = 0;
        for container in naming::containers([&file], &self.config)? {
            let naming = Naming::new(&self.config, container);
            for class in container.nested_classes.iter().filter(|c| !c.is_abstract()) {
                output = output.class(self.getter(&naming, class)?);
                count += 1;
            }
        }
        debug!(file = %file.name, getters = count, "derived instance getters");
        Ok(output.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::{api, field, nested, nested_type, source};
    use crossgen_ir::builders::ArrayTypeBuilder;
    use crossgen_ir::{Statement, TypeReference};

    fn impls(file: File) -> File {
        InstanceGetterImplsMapper::new(PipelineConfig::default())
            .map(file)
            .unwrap()
    }

    fn returned(method: &Method) -> &Expression {
        let body = method.body.as_ref().unwrap();
        let [Statement::Return(statement)] = body.statements.as_slice() else {
            panic!("single return expected");
        };
        statement.expression.as_ref().unwrap()
    }

    #[test]
    fn abstract_classes_get_no_getter() {
        let file = impls(api());
        let names: Vec<_> = file.classes().map(|c| c.simple_name.as_str()).collect();
        assert_eq!(names, ["CommonUserInstanceGetterImpl", "CommonChatInstanceGetterImpl"]);
    }

    #[test]
    fn getter_implements_the_nested_interface() {
        let file = impls(api());
        let getter = file.class("CommonUserInstanceGetterImpl").unwrap();
        assert_eq!(
            getter.qualified_name.as_deref(),
            Some("crossgen.generated.CommonUserInstanceGetterImpl")
        );
        assert_eq!(
            getter.super_classes[0].display_name(),
            "crossgen.generated.CommonUser.InstanceGetter"
        );
        assert!(getter.plain_methods().all(|m| m.is_override && m.body.is_some()));
        assert_eq!(getter.methods.len(), 2);
    }

    #[test]
    fn plain_fields_pass_through_and_siblings_are_cast() {
        let file = impls(api());
        let getter = file.class("CommonChatInstanceGetterImpl").unwrap();
        let Expression::ObjectCreation(creation) = returned(getter.plain_methods().next().unwrap())
        else {
            panic!("object creation expected");
        };
        assert_eq!(creation.class_name, "org.example.Api.Chat");
        let [title, owner] = creation.constructor_args.as_slice() else {
            panic!("two arguments expected");
        };
        assert!(matches!(title, Expression::Identifier(_)));
        let Expression::Cast(cast) = owner else {
            panic!("cast expected");
        };
        assert_eq!(cast.target_type, nested_type("User"));
    }

    #[test]
    fn sibling_arrays_are_mapped() {
        let members = field(
            "members",
            ArrayTypeBuilder::new(nested_type("User").with_nullable(false)).build(),
        );
        let file = impls(source(vec![nested("User", vec![]), nested("Group", vec![members])]));
        let getter = file.class("CommonGroupInstanceGetterImpl").unwrap();
        let Expression::ObjectCreation(creation) = returned(getter.plain_methods().next().unwrap())
        else {
            panic!("object creation expected");
        };
        let Expression::MethodCall(call) = &creation.constructor_args[0] else {
            panic!("method call expected");
        };
        assert_eq!(call.method_name, "toTypedArray");
        let Some(Expression::MethodCall(map)) = call.receiver.as_deref() else {
            panic!("map call expected");
        };
        assert_eq!(map.method_name, "map");

        let parameter = &getter.plain_methods().next().unwrap().parameters[0];
        let Type::Array(array) = &parameter.ir_type else {
            panic!("array expected");
        };
        let Type::Reference(TypeReference {
            referenced_class_simple_name,
            ..
        }) = array.element_type.as_ref()
        else {
            panic!("reference expected");
        };
        assert_eq!(referenced_class_simple_name, "CommonUser");
    }

    #[test]
    fn empty_overload_creates_a_default_instance() {
        let file = impls(api());
        let getter = file.class("CommonUserInstanceGetterImpl").unwrap();
        let empty = getter.plain_methods().nth(1).unwrap();
        assert!(empty.parameters.is_empty());
        let Expression::ObjectCreation(creation) = returned(empty) else {
            panic!("object creation expected");
        };
        assert!(creation.constructor_args.is_empty());
    }
}
