//! Dependency-injection modules registering every instance getter.
//!
//! Registrations are split into batches of `wiring.batch_size` so no single
//! generated initializer grows past what a JVM method can hold:
//!
//! ```kotlin
//! internal val instanceGettersModule1: Module = module {
//!     single<CommonUser.InstanceGetter> { CommonUserInstanceGetterImpl() }
//! }
//! val instanceGettersModule: Module = module { includes(instanceGettersModule1) }
//! ```

use crate::config::PipelineConfig;
use crate::naming::{self, Naming};
use crate::pipeline::batch;
use crate::traits::{ListMapper, MapError};
use crossgen_ir::builders::{
    BlockBuilder, ExpressionStatementBuilder, FieldBuilder, FileBuilder, ImportBuilder,
    LambdaBuilder, MethodCallBuilder, ObjectCreationBuilder, TypeReferenceBuilder,
};
use crossgen_ir::{Expression, Field, File, Statement, Visibility};
use tracing::debug;

pub struct WiringModulesMapper {
    config: PipelineConfig,
}

impl WiringModulesMapper {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// `single<Getter> { GetterImpl() }`.
    fn registration(&self, naming: &Naming, class: &str) -> Result<Statement, MapError> {
        let getter = ObjectCreationBuilder::new(naming.config().qualify(&naming.getter_impl(class)))
            .build()?;
        let single = MethodCallBuilder::new("single")
            .type_argument(
                TypeReferenceBuilder::qualified(naming.qualified_getter(class))
                    .nullable(false)
                    .build(),
            )
            .argument(block_lambda(vec![ExpressionStatementBuilder::new(getter).build()])?)
            .build()?;
        Ok(ExpressionStatementBuilder::new(single).build())
    }

    /// A wiring file, importing the module function it calls. The module
    /// type is a type use and gets imported by the writer.
    fn module_file(&self, name: &str) -> Result<FileBuilder, MapError> {
        let import = ImportBuilder::new(self.config.wiring.module_function.as_str()).build()?;
        Ok(naming::file(&self.config, name).import(import))
    }

    /// `<name>: Module = module { <statements> }`.
    fn module(&self, name: &str, visibility: Visibility, statements: Vec<Statement>) -> Result<Field, MapError> {
        let function = &self.config.wiring.module_function;
        let module = MethodCallBuilder::new(function.rsplit('.').next().unwrap_or(function))
            .argument(block_lambda(statements)?)
            .build()?;
        let ty = TypeReferenceBuilder::qualified(&self.config.wiring.module_type)
            .nullable(false)
            .build();
        Ok(FieldBuilder::new(name, ty)
            .visibility(visibility)
            .mutable(false)
            .initializer(ExpressionStatementBuilder::new(module).build())
            .build()?)
    }
}

fn block_lambda(statements: Vec<Statement>) -> Result<Expression, MapError> {
    Ok(LambdaBuilder::new()
        .body(BlockBuilder::new().statements(statements).build())
        .build()?)
}

impl ListMapper for WiringModulesMapper {
    fn name(&self) -> &'static str {
        "wiring-modules"
    }

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        let wiring = &self.config.wiring;
        let mut registrations = Vec::new();
        for container in naming::containers(&files, &self.config)? {
            let naming = Naming::new(&self.config, container);
            for class in container.nested_classes.iter().filter(|c| !c.is_abstract()) {
                registrations.push(self.registration(&naming, &class.simple_name)?);
            }
        }

        let batches = batch(&registrations, wiring.batch_size);
        debug!(
            registrations = registrations.len(),
            batches = batches.len(),
            "batched wiring modules"
        );

        let mut output = Vec::with_capacity(batches.len() + 1);
        let mut includes = Vec::with_capacity(batches.len());
        for (i, chunk) in batches.into_iter().enumerate() {
            let module_name = format!("{}{}", wiring.module_base, i + 1);
            let field = self.module(&module_name, Visibility::internal(), chunk.to_vec())?;
            output.push(
                self.module_file(&format!("{}{}", wiring.file_base, i + 1))?
                    .field(field)
                    .build()?,
            );
            includes.push(naming::name(&module_name));
        }

        let include = MethodCallBuilder::new("includes")
            .arguments(includes)
            .build()?;
        let aggregate = self.module(
            &wiring.module_base,
            Visibility::public(),
            vec![ExpressionStatementBuilder::new(include).build()],
        )?;
        output.push(self.module_file(&wiring.file_base)?.field(aggregate).build()?);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::api;
    use crossgen_ir::Declaration;

    fn wiring(batch_size: usize) -> WiringModulesMapper {
        let mut config = PipelineConfig::default();
        config.wiring.batch_size = batch_size;
        WiringModulesMapper::new(config)
    }

    fn module_statements(file: &File) -> &[Statement] {
        let [Declaration::Field(field)] = file.declarations.as_slice() else {
            panic!("one field expected in {}", file.name);
        };
        let Some(Expression::MethodCall(module)) = field.initializer_expression() else {
            panic!("module call expected");
        };
        let [Expression::Lambda(lambda)] = module.value_arguments.as_slice() else {
            panic!("lambda expected");
        };
        lambda.body.as_statements()
    }

    #[test]
    fn batches_then_aggregator() {
        let files = wiring(1).map_all(vec![api()]).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["InstanceGettersModule1", "InstanceGettersModule2", "InstanceGettersModule"]
        );
        assert!(files.iter().all(|f| f.package() == Some("crossgen.generated")));
    }

    #[test]
    fn module_function_is_imported_and_called_by_name() {
        let mut config = PipelineConfig::default();
        config.wiring.module_function = "com.example.di.wire".into();
        let files = WiringModulesMapper::new(config).map_all(vec![api()]).unwrap();
        for file in &files {
            let paths: Vec<_> = file.imports.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(paths, ["com.example.di.wire"]);
            let [Declaration::Field(field)] = file.declarations.as_slice() else {
                panic!("one field expected in {}", file.name);
            };
            let Some(Expression::MethodCall(call)) = field.initializer_expression() else {
                panic!("module call expected");
            };
            assert_eq!(call.method_name, "wire");
        }
    }

    #[test]
    fn batch_modules_are_internal_and_aggregate_is_public() {
        let files = wiring(500).map_all(vec![api()]).unwrap();
        assert_eq!(files.len(), 2);
        let Declaration::Field(batch) = &files[0].declarations[0] else {
            panic!("field expected");
        };
        assert_eq!(batch.name, "instanceGettersModule1");
        assert_eq!(batch.visibility, Visibility::internal());
        assert!(!batch.is_mutable);
        assert_eq!(batch.ir_type.display_name(), "org.koin.core.module.Module");

        let Declaration::Field(aggregate) = &files[1].declarations[0] else {
            panic!("field expected");
        };
        assert_eq!(aggregate.name, "instanceGettersModule");
        assert_eq!(aggregate.visibility, Visibility::public());
    }

    #[test]
    fn registrations_skip_abstract_classes() {
        let files = wiring(500).map_all(vec![api()]).unwrap();
        let statements = module_statements(&files[0]);
        assert_eq!(statements.len(), 2);
        let Some(Expression::MethodCall(single)) = statements[0].as_expression() else {
            panic!("single call expected");
        };
        assert_eq!(single.method_name, "single");
        assert_eq!(
            single.type_arguments[0].display_name(),
            "crossgen.generated.CommonUser.InstanceGetter"
        );
    }

    #[test]
    fn aggregator_includes_every_batch_in_order() {
        let files = wiring(1).map_all(vec![api(), api()]).unwrap();
        assert_eq!(files.len(), 5);
        let aggregate = files.last().unwrap();
        let [Statement::Expression(include)] = module_statements(aggregate) else {
            panic!("one includes call expected");
        };
        let Expression::MethodCall(includes) = &include.expression else {
            panic!("method call expected");
        };
        assert_eq!(includes.method_name, "includes");
        assert_eq!(includes.value_arguments.len(), 4);
    }
}
