use super::decl::{Class, Declaration};
use super::meta::ElementMeta;
use super::properties::{PropertyBag, keys};
use serde::{Deserialize, Serialize};

/// One source file: the unit of round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrFile")]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub language_properties: PropertyBag,
}

impl File {
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.declarations.iter().filter_map(Declaration::as_class)
    }

    pub fn class(&self, simple_name: &str) -> Option<&Class> {
        self.classes().find(|c| c.simple_name == simple_name)
    }

    /// JVM package recorded by the front end, if any.
    pub fn package(&self) -> Option<&str> {
        self.language_properties.string(keys::JVM_PACKAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrImport")]
#[serde(rename_all = "camelCase")]
pub struct Import {
    pub path: String,
    #[serde(default)]
    pub is_wildcard: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

impl Import {
    /// Last segment of the path, the simple name an import brings in.
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}
