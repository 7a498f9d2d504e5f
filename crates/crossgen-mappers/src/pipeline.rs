//! Ordered composition of mappers.

use crate::config::PipelineConfig;
use crate::mappers::{
    CommonInterfacesMapper, InstanceGetterImplsMapper, UnifyMapper, WiringModulesMapper,
    WrapperTypesMapper,
};
use crate::traits::{ListMapper, MapError};
use crossgen_ir::File;
use tracing::debug;

/// Split `items` into contiguous chunks of at most `size`, in order.
///
/// Yields `ceil(len / size)` chunks; every chunk but the last is full. A
/// `size` of zero is treated as one.
pub fn batch<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

/// Runs each stage on the output of the previous one.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ListMapper>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard pipeline: unify the sources, then derive interfaces,
    /// getters, wiring modules and wrappers from the unified file.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new().stage(UnifyMapper).stage(
            Fanout::new()
                .branch(CommonInterfacesMapper::new(config.clone()))
                .branch(InstanceGetterImplsMapper::new(config.clone()))
                .branch(WiringModulesMapper::new(config.clone()))
                .branch(WrapperTypesMapper::new(config.clone())),
        )
    }

    pub fn stage(mut self, stage: impl ListMapper + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        self.stages.iter().try_fold(files, |files, stage| {
            let input = files.len();
            let output = stage.map_all(files)?;
            debug!(stage = stage.name(), input, output = output.len(), "mapper stage");
            Ok(output)
        })
    }
}

impl ListMapper for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        self.run(files)
    }
}

/// Runs every branch on the same input and concatenates their outputs in
/// branch order.
#[derive(Default)]
pub struct Fanout {
    branches: Vec<Box<dyn ListMapper>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, branch: impl ListMapper + 'static) -> Self {
        self.branches.push(Box::new(branch));
        self
    }
}

impl ListMapper for Fanout {
    fn name(&self) -> &'static str {
        "fanout"
    }

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        let mut output = Vec::new();
        for branch in &self.branches {
            let produced = branch.map_all(files.clone())?;
            debug!(branch = branch.name(), files = produced.len(), "fanout branch");
            output.extend(produced);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::tests::api;
    use crate::traits::Mapper;
    use crossgen_ir::builders::FileBuilder;

    struct Rename(&'static str);

    impl Mapper for Rename {
        fn name(&self) -> &'static str {
            "rename"
        }

        fn map(&self, file: File) -> Result<File, MapError> {
            Ok(FileBuilder::new(format!("{}{}", file.name, self.0)).build()?)
        }
    }

    fn names(files: &[File]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn batch_sizes() {
        let items: Vec<u32> = (0..7).collect();
        let sizes: Vec<_> = batch(&items, 3).iter().map(|b| b.len()).collect();
        assert_eq!(sizes, [3, 3, 1]);
        assert_eq!(batch(&items, 7).len(), 1);
        assert_eq!(batch(&items, 100).len(), 1);
        assert_eq!(batch(&items, 0).len(), 7);
        assert!(batch::<u32>(&[], 3).is_empty());
    }

    #[test]
    fn stages_run_in_order() {
        let pipeline = Pipeline::new().stage(Rename("A")).stage(Rename("B"));
        let files = vec![FileBuilder::new("x").build().unwrap()];
        assert_eq!(names(&pipeline.run(files).unwrap()), ["xAB"]);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run(vec![api()]).unwrap(), vec![api()]);
    }

    #[test]
    fn fanout_concatenates_branches() {
        let fanout = Fanout::new().branch(Rename("A")).branch(Rename("B"));
        let files = vec![
            FileBuilder::new("x").build().unwrap(),
            FileBuilder::new("y").build().unwrap(),
        ];
        assert_eq!(names(&fanout.map_all(files).unwrap()), ["xA", "yA", "xB", "yB"]);
    }

    #[test]
    fn standard_pipeline_output() {
        let pipeline = Pipeline::from_config(&PipelineConfig::default());
        assert_eq!(pipeline.len(), 2);
        let files = pipeline.run(vec![api()]).unwrap();
        assert_eq!(
            names(&files),
            [
                "CommonInterfaces",
                "InstanceGetterImpls",
                "InstanceGettersModule1",
                "InstanceGettersModule",
                "ClassBoxes",
            ]
        );
    }
}
