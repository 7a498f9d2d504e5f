//! Language front ends and back ends for the crossgen IR.
//!
//! Readers parse source text into an IR [`File`](crossgen_ir::File); writers
//! generate source text back from one. Both are plain trait objects held in
//! a global registry, so a caller can pick them by language name or file
//! extension.
//!
//! # Architecture
//!
//! ```text
//! Source Languages        IR              Target Languages
//! ────────────────    ─────────────    ────────────────────
//! Java            ─┐                ┌─> Java
//! Kotlin          ─┴─> File ────────┼─> Kotlin
//!                                   └─> Swift
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crossgen_languages::{NoContext, reader_for_language, writer_for_language};
//!
//! let reader = reader_for_language("java").unwrap();
//! let file = reader.read("Point.java", "public class Point { public int x; }", &NoContext)?;
//!
//! let kotlin = writer_for_language("kotlin").unwrap().write(&file)?;
//! ```
//!
//! # Fidelity
//!
//! Readers keep what the IR cannot model as unknown nodes carrying the
//! exact source text. A writer re-emits that text only when it was recorded
//! for the writer's own language; otherwise generation fails with
//! [`GenerateError::UnsupportedUnknown`].

pub mod emit;
pub mod input;
pub mod output;
pub mod registry;
pub mod tables;
pub mod traits;

#[cfg(any(feature = "read-java", feature = "read-kotlin"))]
mod scope;

// Re-exports: Traits
pub use traits::{
    GenerateError, NoContext, ReadError, Reader, ReferenceKind, ResolutionContext, ResolvedCall,
    SourceSpan, SyntacticResolver, Writer,
};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, register_reader, register_writer,
    writer_for_language, writers,
};

// Re-exports: Built-in readers
#[cfg(feature = "read-java")]
pub use input::{JavaReader, read_java};
#[cfg(feature = "read-kotlin")]
pub use input::{KotlinReader, read_kotlin};

// Re-exports: Built-in writers
#[cfg(feature = "write-java")]
pub use output::JavaWriter;
#[cfg(feature = "write-kotlin")]
pub use output::KotlinWriter;
#[cfg(feature = "write-swift")]
pub use output::SwiftWriter;

pub use emit::{Emit, render};
