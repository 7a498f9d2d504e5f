//! Traits for IR-to-IR passes.

use crossgen_ir::{BuildError, File};

/// Error raised by a mapper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A declaration the mapper was configured to start from is absent.
    #[error("no declaration named `{0}` in the input")]
    MissingDeclaration(String),
}

/// A pass from one file to one new file.
///
/// Mappers synthesize declarations that were not in the input; they never
/// re-emit it. A mapper holds only its configuration, so running it twice
/// on the same file yields the same result.
///
/// # Implementing Custom Mappers
///
/// ```ignore
/// use crossgen_mappers::{Mapper, MapError, Pipeline};
/// use crossgen_ir::File;
///
/// struct Rename;
///
/// impl Mapper for Rename {
///     fn name(&self) -> &'static str { "rename" }
///     fn map(&self, file: File) -> Result<File, MapError> {
///         Ok(file.to_builder().build()?)
///     }
/// }
///
/// let pipeline = Pipeline::new().stage(Rename);
/// ```
pub trait Mapper: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    fn map(&self, file: File) -> Result<File, MapError>;
}

/// A pass over a whole list of files, for mappers whose output depends on
/// the aggregate (batching, unification).
pub trait ListMapper: Send + Sync {
    fn name(&self) -> &'static str;

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError>;
}

/// Every single-file mapper runs over a list file by file.
impl<M: Mapper> ListMapper for M {
    fn name(&self) -> &'static str {
        Mapper::name(self)
    }

    fn map_all(&self, files: Vec<File>) -> Result<Vec<File>, MapError> {
        files.into_iter().map(|file| self.map(file)).collect()
    }
}
