//! Traits for language readers and writers, and the boundary between a
//! reader and whatever analyzed the source before it.

use crate::emit::{Emit, RenderSink, TextSink};
use crossgen_ir::{BuildError, File, MethodCallKind, Type};
use std::collections::{HashMap, HashSet};

/// Error that can occur when reading source code into IR.
///
/// Constructs the IR cannot express are not errors; they become unknown
/// nodes. These variants cover input the reader cannot walk at all.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported syntax: {0}")]
    Unsupported(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Error raised when a back end is asked for a shape its target cannot
/// represent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("{node}: {count} superclasses, target allows at most one")]
    MultipleSuperclasses { node: String, count: usize },

    #[error("{node}: {reason}")]
    UnsupportedNode { node: String, reason: String },

    #[error("unknown node recorded for `{language}` cannot be emitted as {target}")]
    UnsupportedUnknown { language: String, target: String },
}

impl GenerateError {
    pub fn unsupported(node: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::UnsupportedNode {
            node: node.into(),
            reason: reason.into(),
        }
    }
}

/// Byte range of a source construct. Analyzers key their facts by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What a bare name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Class,
    Field,
    Local,
    Unresolved,
}

/// Resolved overload target of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    /// Qualified name of the type declaring the target.
    pub declaring_type: Option<String>,
    pub kind: MethodCallKind,
}

/// Semantic facts about one source file, computed before conversion.
///
/// Readers never derive these themselves beyond what the file spells out.
/// Every method has a "don't know" default, so an analyzer implements only
/// what it has.
pub trait ResolutionContext: Send + Sync {
    /// Qualified name of the declaration `simple` refers to.
    fn qualified_name(&self, _simple: &str) -> Option<String> {
        None
    }

    fn reference_kind(&self, _name: &str) -> ReferenceKind {
        ReferenceKind::Unresolved
    }

    /// Type of the expression at `span` when the source leaves it implicit.
    fn inferred_type(&self, _span: SourceSpan) -> Option<Type> {
        None
    }

    fn resolved_call(&self, _span: SourceSpan) -> Option<ResolvedCall> {
        None
    }
}

/// A context that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl ResolutionContext for NoContext {}

/// Facts a file states about itself: its package, its imports, the classes
/// and fields it declares.
///
/// Readers build one per file by pre-scanning the tree, and consult it
/// after the caller's context. On-demand imports name no class, so they
/// resolve nothing here; only a caller's context can see through them.
#[derive(Debug, Clone, Default)]
pub struct SyntacticResolver {
    package: Option<String>,
    classes: HashMap<String, String>,
    fields: HashSet<String>,
}

impl SyntacticResolver {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.filter(|p| !p.is_empty()).map(str::to_string),
            ..Self::default()
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Qualify a name declared in this file against its package.
    pub fn qualify(&self, name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        }
    }

    /// Record a single-type import.
    pub fn add_import(&mut self, path: &str) {
        let simple = path.rsplit('.').next().unwrap_or(path);
        self.classes
            .entry(simple.to_string())
            .or_insert_with(|| path.to_string());
    }

    /// Record a class visible under `simple`. Earlier entries win.
    pub fn add_class(&mut self, simple: &str, qualified: &str) {
        self.classes
            .entry(simple.to_string())
            .or_insert_with(|| qualified.to_string());
    }

    pub fn add_field(&mut self, name: &str) {
        self.fields.insert(name.to_string());
    }
}

impl ResolutionContext for SyntacticResolver {
    fn qualified_name(&self, simple: &str) -> Option<String> {
        self.classes.get(simple).cloned()
    }

    fn reference_kind(&self, name: &str) -> ReferenceKind {
        if self.fields.contains(name) {
            ReferenceKind::Field
        } else if self.classes.contains_key(name) {
            ReferenceKind::Class
        } else {
            ReferenceKind::Unresolved
        }
    }
}

/// A reader parses source code into the IR.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "java", "kotlin").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["kt", "kts"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Convert one source file. `file_name` becomes the IR file's name.
    fn read(
        &self,
        file_name: &str,
        source: &str,
        context: &dyn ResolutionContext,
    ) -> Result<File, ReadError>;
}

/// A writer emits the IR as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "swift").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "kt").
    fn extension(&self) -> &'static str;

    /// Lower a file to emission instructions.
    fn emit_file(&self, file: &File) -> Result<Vec<Emit>, GenerateError>;

    /// Emit a file as source text through the reference sink.
    fn write(&self, file: &File) -> Result<String, GenerateError> {
        let emits = self.emit_file(file)?;
        let mut sink = TextSink::new();
        sink.render(&emits);
        Ok(sink.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_fields_shadow_classes() {
        let mut resolver = SyntacticResolver::new(Some("com.example"));
        resolver.add_class("Point", &resolver.qualify("Point"));
        resolver.add_import("java.util.List");
        resolver.add_field("List");
        assert_eq!(resolver.reference_kind("Point"), ReferenceKind::Class);
        assert_eq!(resolver.reference_kind("List"), ReferenceKind::Field);
        assert_eq!(resolver.reference_kind("x"), ReferenceKind::Unresolved);
        assert_eq!(
            resolver.qualified_name("Point").as_deref(),
            Some("com.example.Point")
        );
    }

    #[test]
    fn first_import_wins() {
        let mut resolver = SyntacticResolver::default();
        resolver.add_import("java.util.List");
        resolver.add_import("java.awt.List");
        assert_eq!(
            resolver.qualified_name("List").as_deref(),
            Some("java.util.List")
        );
        assert_eq!(resolver.qualify("Point"), "Point");
    }

    #[test]
    fn no_context_knows_nothing() {
        assert_eq!(NoContext.reference_kind("x"), ReferenceKind::Unresolved);
        assert!(NoContext.qualified_name("Point").is_none());
        assert!(NoContext.inferred_type(SourceSpan::new(0, 1)).is_none());
    }
}
