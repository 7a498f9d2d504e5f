//! Data shared by every IR node: provenance, annotations, language properties.

use super::expr::Expression;
use super::properties::PropertyBag;
use serde::{Deserialize, Serialize};

/// Where a node came from. Provenance only; nothing depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrLocation")]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file_path: String,
    pub line_number: u32,
    pub column_number: u32,
}

impl Location {
    pub fn new(file_path: impl Into<String>, line_number: u32, column_number: u32) -> Self {
        Self {
            file_path: file_path.into(),
            line_number,
            column_number,
        }
    }
}

/// A rendering of a node in one concrete language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename = "com.voxeldev.mcodegen.dsl.ir.IrStringRepresentation"
)]
pub struct StringRepresentation {
    pub language: String,
    pub representation: String,
}

impl StringRepresentation {
    pub fn new(language: impl Into<String>, representation: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            representation: representation.into(),
        }
    }
}

/// Find the rendering for `language`, if one was recorded.
pub fn representation_for<'a>(
    representations: &'a [StringRepresentation],
    language: &str,
) -> Option<&'a str> {
    representations
        .iter()
        .find(|r| r.language == language)
        .map(|r| r.representation.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrAnnotation")]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<AnnotationParameter>,
    #[serde(default)]
    pub language_properties: PropertyBag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename = "com.voxeldev.mcodegen.dsl.ir.IrAnnotationParameter"
)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationParameter {
    pub parameter_name: String,
    pub parameter_value: Expression,
}

/// The base contract of every node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub language_properties: PropertyBag,
}

impl ElementMeta {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }
}

/// Base data of statements and expressions, which additionally carry
/// per-language renderings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxMeta {
    #[serde(default)]
    pub string_representation: Vec<StringRepresentation>,
    #[serde(flatten)]
    pub element: ElementMeta,
}

impl SyntaxMeta {
    pub fn representation(&self, language: &str) -> Option<&str> {
        representation_for(&self.string_representation, language)
    }
}
