//! Type builders. None of them can fail: every type is complete once its
//! positional arguments are given.

use crate::ir::{
    ElementMeta, PrimitiveType, Type, TypeArray, TypeFunction, TypeGeneric, TypePrimitive,
    TypeReference,
};

#[derive(Debug, Clone)]
pub struct TypeReferenceBuilder {
    simple_name: String,
    qualified_name: Option<String>,
    type_parameters: Vec<Type>,
    nullable: bool,
    meta: ElementMeta,
}

impl TypeReferenceBuilder {
    pub fn new(simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: None,
            type_parameters: Vec::new(),
            nullable: true,
            meta: ElementMeta::default(),
        }
    }

    /// Reference by qualified name; the simple name is its last segment.
    pub fn qualified(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        Self::new(simple).qualified_name(qualified_name)
    }

    pub fn qualified_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    pub fn type_parameter(mut self, ty: Type) -> Self {
        self.type_parameters.push(ty);
        self
    }

    pub fn type_parameters(mut self, types: impl IntoIterator<Item = Type>) -> Self {
        self.type_parameters.extend(types);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    element_setters!();

    pub fn build(self) -> Type {
        Type::Reference(TypeReference {
            referenced_class_simple_name: self.simple_name,
            referenced_class_qualified_name: self.qualified_name,
            type_parameters: self.type_parameters,
            is_nullable: self.nullable,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveTypeBuilder {
    primitive: PrimitiveType,
    nullable: bool,
    meta: ElementMeta,
}

impl PrimitiveTypeBuilder {
    pub fn new(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            nullable: true,
            meta: ElementMeta::default(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    element_setters!();

    pub fn build(self) -> Type {
        Type::Primitive(TypePrimitive {
            primitive_type: self.primitive,
            is_nullable: self.nullable,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FunctionTypeBuilder {
    parameter_types: Vec<Type>,
    return_type: Type,
    nullable: bool,
    meta: ElementMeta,
}

impl FunctionTypeBuilder {
    pub fn new(return_type: Type) -> Self {
        Self {
            parameter_types: Vec::new(),
            return_type,
            nullable: true,
            meta: ElementMeta::default(),
        }
    }

    pub fn parameter_type(mut self, ty: Type) -> Self {
        self.parameter_types.push(ty);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    element_setters!();

    pub fn build(self) -> Type {
        Type::Function(TypeFunction {
            parameter_types: self.parameter_types,
            return_type: Box::new(self.return_type),
            is_nullable: self.nullable,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ArrayTypeBuilder {
    element_type: Type,
    nullable: bool,
    meta: ElementMeta,
}

impl ArrayTypeBuilder {
    pub fn new(element_type: Type) -> Self {
        Self {
            element_type,
            nullable: true,
            meta: ElementMeta::default(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    element_setters!();

    pub fn build(self) -> Type {
        Type::Array(TypeArray {
            element_type: Box::new(self.element_type),
            is_nullable: self.nullable,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GenericTypeBuilder {
    name: String,
    nullable: bool,
    meta: ElementMeta,
}

impl GenericTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            meta: ElementMeta::default(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    element_setters!();

    pub fn build(self) -> Type {
        Type::Generic(TypeGeneric {
            name: self.name,
            is_nullable: self.nullable,
            meta: self.meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_default_to_nullable() {
        let t = TypeReferenceBuilder::new("Point").build();
        assert!(t.is_nullable());
        let t = PrimitiveTypeBuilder::new(PrimitiveType::Int).build();
        assert!(t.is_nullable());
    }

    #[test]
    fn qualified_splits_simple_name() {
        let Type::Reference(r) = TypeReferenceBuilder::qualified("java.util.List").build() else {
            panic!("expected a reference");
        };
        assert_eq!(r.referenced_class_simple_name, "List");
        assert_eq!(r.referenced_class_qualified_name.as_deref(), Some("java.util.List"));
    }
}
