use super::BuildError;
use crate::ir::{Class, Declaration, ElementMeta, Field, File, Import, Method, PropertyBag, PropertyValue};

#[derive(Debug, Clone)]
pub struct ImportBuilder {
    path: String,
    wildcard: bool,
    meta: ElementMeta,
}

impl ImportBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            wildcard: false,
            meta: ElementMeta::default(),
        }
    }

    pub fn wildcard(mut self, wildcard: bool) -> Self {
        self.wildcard = wildcard;
        self
    }

    element_setters!();

    pub fn build(self) -> Result<Import, BuildError> {
        if self.path.is_empty() {
            return Err(BuildError::empty_name("import"));
        }
        Ok(Import {
            path: self.path,
            is_wildcard: self.wildcard,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FileBuilder {
    name: String,
    imports: Vec<Import>,
    declarations: Vec<Declaration>,
    language_properties: PropertyBag,
}

impl FileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            declarations: Vec::new(),
            language_properties: PropertyBag::new(),
        }
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn class(self, class: Class) -> Self {
        self.declaration(Declaration::Class(class))
    }

    pub fn field(self, field: Field) -> Self {
        self.declaration(Declaration::Field(field))
    }

    pub fn method(self, method: Method) -> Self {
        self.declaration(Declaration::Method(method))
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.language_properties.insert(key, value);
        self
    }

    pub fn build(self) -> Result<File, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("file"));
        }
        Ok(File {
            name: self.name,
            imports: self.imports,
            declarations: self.declarations,
            language_properties: self.language_properties,
        })
    }
}

impl File {
    /// A builder pre-filled with this file.
    pub fn to_builder(&self) -> FileBuilder {
        FileBuilder {
            name: self.name.clone(),
            imports: self.imports.clone(),
            declarations: self.declarations.clone(),
            language_properties: self.language_properties.clone(),
        }
    }
}
