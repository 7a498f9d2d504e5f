//! Language-neutral intermediate representation.
//!
//! `crossgen-ir` holds the tree every front end produces and every back
//! end consumes: classes, members, statements, expressions and types,
//! plus the per-node metadata (location, annotations, language
//! properties) that lets a conversion round-trip through one language
//! without losing what another language cares about.
//!
//! # Architecture
//!
//! ```text
//! Source Languages        IR              Target Languages
//! ────────────────    ─────────────    ────────────────────
//! Java            ─┐                ┌─> Java
//! Kotlin          ─┼─> File ────────┼─> Kotlin
//!                  │    (ir)        └─> Swift
//!                  └─ JSON (wire) <──> other tools
//! ```
//!
//! Nodes are immutable once built. Construct them through [`builders`];
//! to change one, call `to_builder()` and rebuild.
//!
//! # Unknown nodes
//!
//! A front end never fails on a construct the IR cannot express. It emits
//! an unknown statement or expression holding the verbatim source text,
//! tagged with its language. Back ends emit it only for that language.

pub mod builders;
pub mod ir;
pub mod wire;

pub use builders::BuildError;
pub use ir::*;
pub use wire::WireError;
