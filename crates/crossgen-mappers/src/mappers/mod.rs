//! Built-in mappers.
//!
//! All of them derive from the nested classes of a container class (see
//! [`SourceConfig`](crate::config::SourceConfig)) and emit new files; none
//! re-emits its input.

mod impls;
mod interfaces;
mod unify;
mod wiring;
mod wrappers;

pub use impls::InstanceGetterImplsMapper;
pub use interfaces::CommonInterfacesMapper;
pub use unify::UnifyMapper;
pub use wiring::WiringModulesMapper;
pub use wrappers::WrapperTypesMapper;

pub use crate::naming::{CONSTRUCTOR_FIELD, INSTANCE_GETTER};

/// A container in the shape the mappers expect:
///
/// ```java
/// package org.example;
///
/// public class Api {
///     public abstract static class Object {}
///     public static class User extends Object {
///         public static final int CONSTRUCTOR = 42;
///         public int id;
///         public String name;
///     }
///     public static class Chat extends Object {
///         public static final int CONSTRUCTOR = 7;
///         public String title;
///         public User owner;
///     }
/// }
/// ```
#[cfg(test)]
pub(crate) mod tests {
    use crossgen_ir::builders::{
        ClassBuilder, ExpressionStatementBuilder, FieldBuilder, FileBuilder, LiteralBuilder,
        PrimitiveTypeBuilder, SuperClassBuilder, TypeReferenceBuilder,
    };
    use crossgen_ir::properties::keys;
    use crossgen_ir::{Class, ClassKind, Field, File, PrimitiveType, Type, Visibility};

    pub fn string() -> Type {
        TypeReferenceBuilder::qualified("java.lang.String").build()
    }

    pub fn nested_type(name: &str) -> Type {
        TypeReferenceBuilder::qualified(format!("org.example.Api.{name}")).build()
    }

    pub fn field(name: &str, ty: Type) -> Field {
        FieldBuilder::new(name, ty)
            .visibility(Visibility::public())
            .build()
            .unwrap()
    }

    pub fn constructor_field(id: &str) -> Field {
        FieldBuilder::new(
            "CONSTRUCTOR",
            PrimitiveTypeBuilder::new(PrimitiveType::Int).nullable(false).build(),
        )
        .visibility(Visibility::public())
        .mutable(false)
        .property(keys::STATIC, true)
        .initializer(ExpressionStatementBuilder::new(LiteralBuilder::new(id).build()).build())
        .build()
        .unwrap()
    }

    /// `public static class <name> extends Object`.
    pub fn nested(name: &str, fields: Vec<Field>) -> Class {
        ClassBuilder::new(name)
            .qualified_name(format!("org.example.Api.{name}"))
            .visibility(Visibility::public())
            .property(keys::STATIC, true)
            .super_class(
                SuperClassBuilder::new("Object", ClassKind::Class)
                    .qualified_name("org.example.Api.Object")
                    .build()
                    .unwrap(),
            )
            .fields(fields)
            .build()
            .unwrap()
    }

    pub fn object() -> Class {
        ClassBuilder::new("Object")
            .qualified_name("org.example.Api.Object")
            .visibility(Visibility::public())
            .property(keys::ABSTRACT, true)
            .property(keys::STATIC, true)
            .build()
            .unwrap()
    }

    pub fn user() -> Class {
        nested(
            "User",
            vec![
                constructor_field("42"),
                field("id", PrimitiveTypeBuilder::new(PrimitiveType::Int).nullable(false).build()),
                field("name", string()),
            ],
        )
    }

    pub fn chat() -> Class {
        nested(
            "Chat",
            vec![
                constructor_field("7"),
                field("title", string()),
                field("owner", nested_type("User")),
            ],
        )
    }

    /// `Api.java` holding `Api` with `classes` nested, plus `Object`.
    pub fn source(classes: Vec<Class>) -> File {
        let mut api = ClassBuilder::new("Api")
            .qualified_name("org.example.Api")
            .visibility(Visibility::public())
            .nested_class(object());
        for class in classes {
            api = api.nested_class(class);
        }
        FileBuilder::new("Api.java")
            .property(keys::JVM_PACKAGE, "org.example")
            .class(api.build().unwrap())
            .build()
            .unwrap()
    }

    pub fn api() -> File {
        source(vec![user(), chat()])
    }
}
