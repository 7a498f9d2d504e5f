//! IR types.

use super::meta::ElementMeta;
use serde::{Deserialize, Serialize};

/// A type as written at a use site. Nullability belongs to the use, not
/// to the shape, so every variant carries its own flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Type {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeReference")]
    Reference(TypeReference),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive")]
    Primitive(TypePrimitive),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeFunction")]
    Function(TypeFunction),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeArray")]
    Array(TypeArray),
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypeGeneric")]
    Generic(TypeGeneric),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    pub referenced_class_simple_name: String,
    #[serde(default)]
    pub referenced_class_qualified_name: Option<String>,
    #[serde(default)]
    pub type_parameters: Vec<Type>,
    pub is_nullable: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePrimitive {
    pub primitive_type: PrimitiveType,
    pub is_nullable: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFunction {
    #[serde(default)]
    pub parameter_types: Vec<Type>,
    pub return_type: Box<Type>,
    pub is_nullable: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeArray {
    pub element_type: Box<Type>,
    pub is_nullable: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

/// A use of a type parameter. Its bounds live on the declaring
/// [`TypeParameter`](super::decl::TypeParameter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeGeneric {
    pub name: String,
    pub is_nullable: bool,
    #[serde(flatten)]
    pub meta: ElementMeta,
}

/// The closed set of primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrimitiveType {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Void")]
    Void,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Boolean")]
    Boolean,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Byte")]
    Byte,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Short")]
    Short,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Int")]
    Int,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Long")]
    Long,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Char")]
    Char,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Float")]
    Float,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrTypePrimitive.PrimitiveType.Double")]
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Void,
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Char,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];
}

impl Type {
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Reference(t) => t.is_nullable,
            Type::Primitive(t) => t.is_nullable,
            Type::Function(t) => t.is_nullable,
            Type::Array(t) => t.is_nullable,
            Type::Generic(t) => t.is_nullable,
        }
    }

    /// Copy of this type with its nullability replaced.
    pub fn with_nullable(&self, nullable: bool) -> Type {
        let mut copy = self.clone();
        match &mut copy {
            Type::Reference(t) => t.is_nullable = nullable,
            Type::Primitive(t) => t.is_nullable = nullable,
            Type::Function(t) => t.is_nullable = nullable,
            Type::Array(t) => t.is_nullable = nullable,
            Type::Generic(t) => t.is_nullable = nullable,
        }
        copy
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Type::Reference(t) => &t.meta,
            Type::Primitive(t) => &t.meta,
            Type::Function(t) => &t.meta,
            Type::Array(t) => &t.meta,
            Type::Generic(t) => &t.meta,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(t) => Some(t.primitive_type),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.as_primitive() == Some(PrimitiveType::Void)
    }

    /// Language-neutral spelling used for diagnostics and memo keys, e.g.
    /// `java.util.List<java.lang.String>?`.
    pub fn display_name(&self) -> String {
        let nullable = if self.is_nullable() { "?" } else { "" };
        let shape = match self {
            Type::Reference(t) => {
                let name = t
                    .referenced_class_qualified_name
                    .as_deref()
                    .unwrap_or(&t.referenced_class_simple_name);
                if t.type_parameters.is_empty() {
                    name.to_string()
                } else {
                    let args: Vec<_> = t.type_parameters.iter().map(Type::display_name).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            Type::Primitive(t) => format!("{:?}", t.primitive_type).to_lowercase(),
            Type::Function(t) => {
                let params: Vec<_> = t.parameter_types.iter().map(Type::display_name).collect();
                format!("({}) -> {}", params.join(", "), t.return_type.display_name())
            }
            Type::Array(t) => format!("{}[]", t.element_type.display_name()),
            Type::Generic(t) => t.name.clone(),
        };
        format!("{shape}{nullable}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str, nullable: bool) -> Type {
        Type::Reference(TypeReference {
            referenced_class_simple_name: name.into(),
            referenced_class_qualified_name: Some(format!("com.example.{name}")),
            type_parameters: vec![],
            is_nullable: nullable,
            meta: ElementMeta::default(),
        })
    }

    #[test]
    fn with_nullable_changes_only_the_flag() {
        let t = reference("Point", true);
        let non_null = t.with_nullable(false);
        assert!(!non_null.is_nullable());
        assert_eq!(non_null.with_nullable(true), t);
    }

    #[test]
    fn display_name_uses_qualified_name() {
        let list = Type::Reference(TypeReference {
            referenced_class_simple_name: "List".into(),
            referenced_class_qualified_name: Some("java.util.List".into()),
            type_parameters: vec![reference("Point", false)],
            is_nullable: true,
            meta: ElementMeta::default(),
        });
        assert_eq!(list.display_name(), "java.util.List<com.example.Point>?");
    }
}
