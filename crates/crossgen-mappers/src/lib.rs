//! IR-to-IR passes for crossgen.
//!
//! A mapper takes IR files and synthesizes new ones: shared interfaces for
//! the classes of an API, getters that construct them, dependency-injection
//! modules registering the getters, and wrapper types exposing platform
//! values through the interfaces. Mappers compose into a [`Pipeline`].
//!
//! # Example
//!
//! ```ignore
//! use crossgen_languages::{NoContext, read_java, writer_for_language};
//! use crossgen_mappers::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::load("crossgen.toml".as_ref())?;
//! let api = read_java("Api.java", &source, &NoContext)?;
//! let kotlin = writer_for_language("kotlin").unwrap();
//! for file in Pipeline::from_config(&config).run(vec![api])? {
//!     println!("{}", kotlin.write(&file)?);
//! }
//! ```

pub mod config;
pub mod mappers;
mod naming;
pub mod pipeline;
pub mod traits;

pub use config::{ConfigError, PipelineConfig};
pub use mappers::{
    CommonInterfacesMapper, InstanceGetterImplsMapper, UnifyMapper, WiringModulesMapper,
    WrapperTypesMapper,
};
pub use pipeline::{Fanout, Pipeline, batch};
pub use traits::{ListMapper, MapError, Mapper};
