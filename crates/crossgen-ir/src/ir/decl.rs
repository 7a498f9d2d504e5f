//! Declarations: classes and their members.

use super::expr::{Expression, MethodCallExpression};
use super::meta::ElementMeta;
use super::properties::keys;
use super::stmt::Statement;
use super::types::Type;
use super::visibility::{ClassKind, Visibility};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

pub(crate) const CLASS_TAG: &str = "com.voxeldev.mcodegen.dsl.ir.IrClass";
pub(crate) const FIELD_TAG: &str = "com.voxeldev.mcodegen.dsl.ir.IrField";
pub(crate) const METHOD_TAG: &str = "com.voxeldev.mcodegen.dsl.ir.IrMethod";
pub(crate) const CONSTRUCTOR_TAG: &str = "com.voxeldev.mcodegen.dsl.ir.IrConstructor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrClass")]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub qualified_name: Option<String>,
    pub simple_name: String,
    #[serde(default)]
    pub kind: ClassKind,
    pub visibility: Visibility,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub super_classes: Vec<SuperClass>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Callable>,
    #[serde(default)]
    pub initializers: Vec<ClassInitializer>,
    #[serde(default)]
    pub nested_classes: Vec<Class>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

impl Class {
    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.methods.iter().filter_map(|m| match m {
            Callable::Constructor(c) => Some(c),
            Callable::Method(_) => None,
        })
    }

    /// Methods, excluding constructors.
    pub fn plain_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter_map(|m| match m {
            Callable::Method(m) => Some(m),
            Callable::Constructor(_) => None,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn nested_class(&self, simple_name: &str) -> Option<&Class> {
        self.nested_classes
            .iter()
            .find(|c| c.simple_name == simple_name)
    }

    /// Marked `abstract` by its source language.
    pub fn is_abstract(&self) -> bool {
        self.meta.language_properties.flag(keys::ABSTRACT)
    }

    /// Qualified name if known, simple name otherwise.
    pub fn display_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.simple_name)
    }
}

/// A super-type. "extends" and "implements" are the same relation, told
/// apart by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrSuperClass")]
#[serde(rename_all = "camelCase")]
pub struct SuperClass {
    pub super_class_simple_name: String,
    #[serde(default)]
    pub super_class_qualified_name: Option<String>,
    pub kind: ClassKind,
    #[serde(default)]
    pub types: Vec<Type>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

impl SuperClass {
    pub fn display_name(&self) -> &str {
        self.super_class_qualified_name
            .as_deref()
            .unwrap_or(&self.super_class_simple_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeParameter")]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub extends_list: Vec<Type>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrField")]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub ir_type: Type,
    pub visibility: Visibility,
    pub is_mutable: bool,
    #[serde(default)]
    pub initializer: Option<Statement>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

impl Field {
    /// The initializer's expression, when it is a plain expression statement.
    pub fn initializer_expression(&self) -> Option<&Expression> {
        self.initializer.as_ref().and_then(Statement::as_expression)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrParameter")]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub ir_type: Type,
    #[serde(default)]
    pub default_value: Option<Expression>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodBody")]
pub struct MethodBody {
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrMethod")]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub return_type: Type,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub body: Option<MethodBody>,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrConstructor")]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    /// Delegating `this(...)` / `super(...)` call, if any.
    #[serde(default, with = "constructor_call")]
    pub other_constructor_call: Option<MethodCallExpression>,
    pub name: String,
    pub return_type: Type,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub body: Option<MethodBody>,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

/// On the wire a delegating call is a full method-call expression, tag
/// included.
mod constructor_call {
    use super::*;

    #[derive(Serialize)]
    #[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrMethodCallExpression")]
    struct Tagged<'a> {
        #[serde(flatten)]
        call: &'a MethodCallExpression,
    }

    pub fn serialize<S: Serializer>(
        call: &Option<MethodCallExpression>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        call.as_ref()
            .map(|call| Tagged { call })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<MethodCallExpression>, D::Error> {
        match Option::<Expression>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Expression::MethodCall(call)) => Ok(Some(call)),
            Some(other) => Err(de::Error::custom(format!(
                "otherConstructorCall must be a method call, found {}",
                other.kind_name()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InitializerKind {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer.IrInstanceClassInitializerKind")]
    Instance,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer.IrStaticClassInitializerKind")]
    Static,
}

/// `{ ... }` or `static { ... }` / `init { ... }` blocks in a class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "com.voxeldev.mcodegen.dsl.ir.IrClassInitializer")]
pub struct ClassInitializer {
    pub kind: InitializerKind,
    #[serde(default)]
    pub body: Option<MethodBody>,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

/// A method or a constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    Method(Method),
    Constructor(Constructor),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Method(m) => &m.name,
            Callable::Constructor(c) => &c.name,
        }
    }

    pub fn return_type(&self) -> &Type {
        match self {
            Callable::Method(m) => &m.return_type,
            Callable::Constructor(c) => &c.return_type,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Callable::Method(m) => &m.parameters,
            Callable::Constructor(c) => &c.parameters,
        }
    }

    pub fn type_parameters(&self) -> &[TypeParameter] {
        match self {
            Callable::Method(m) => &m.type_parameters,
            Callable::Constructor(c) => &c.type_parameters,
        }
    }

    pub fn body(&self) -> Option<&MethodBody> {
        match self {
            Callable::Method(m) => m.body.as_ref(),
            Callable::Constructor(c) => c.body.as_ref(),
        }
    }

    pub fn visibility(&self) -> &Visibility {
        match self {
            Callable::Method(m) => &m.visibility,
            Callable::Constructor(c) => &c.visibility,
        }
    }

    pub fn is_abstract(&self) -> bool {
        match self {
            Callable::Method(m) => m.is_abstract,
            Callable::Constructor(c) => c.is_abstract,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Callable::Method(m) => m.is_static,
            Callable::Constructor(c) => c.is_static,
        }
    }

    pub fn is_override(&self) -> bool {
        match self {
            Callable::Method(m) => m.is_override,
            Callable::Constructor(c) => c.is_override,
        }
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Callable::Method(m) => &m.meta,
            Callable::Constructor(c) => &c.meta,
        }
    }
}

impl Serialize for Callable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Callable::Method(m) => m.serialize(serializer),
            Callable::Constructor(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Callable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = tag_of::<D::Error>(&value)?;
        match tag.as_str() {
            METHOD_TAG => Method::deserialize(value)
                .map(Callable::Method)
                .map_err(de::Error::custom),
            CONSTRUCTOR_TAG => Constructor::deserialize(value)
                .map(Callable::Constructor)
                .map_err(de::Error::custom),
            other => Err(de::Error::unknown_variant(
                other,
                &[METHOD_TAG, CONSTRUCTOR_TAG],
            )),
        }
    }
}

/// A top-level declaration of a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(Class),
    Field(Field),
    Method(Method),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(c) => &c.simple_name,
            Declaration::Field(f) => &f.name,
            Declaration::Method(m) => &m.name,
        }
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Declaration::Class(c) => &c.meta,
            Declaration::Field(f) => &f.meta,
            Declaration::Method(m) => &m.meta,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Declaration::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl Serialize for Declaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Declaration::Class(c) => c.serialize(serializer),
            Declaration::Field(f) => f.serialize(serializer),
            Declaration::Method(m) => m.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = tag_of::<D::Error>(&value)?;
        match tag.as_str() {
            CLASS_TAG => Class::deserialize(value)
                .map(Declaration::Class)
                .map_err(de::Error::custom),
            FIELD_TAG => Field::deserialize(value)
                .map(Declaration::Field)
                .map_err(de::Error::custom),
            METHOD_TAG => Method::deserialize(value)
                .map(Declaration::Method)
                .map_err(de::Error::custom),
            other => Err(de::Error::unknown_variant(
                other,
                &[CLASS_TAG, FIELD_TAG, METHOD_TAG],
            )),
        }
    }
}

fn tag_of<E: de::Error>(value: &serde_json::Value) -> Result<String, E> {
    value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| E::missing_field("type"))
}
