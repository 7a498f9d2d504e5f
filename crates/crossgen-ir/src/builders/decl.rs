//! Declaration builders: classes, members, annotations.

use super::{BuildError, require};
use crate::ir::{
    Annotation, AnnotationParameter, Callable, Class, ClassInitializer, ClassKind, Constructor,
    ElementMeta, Expression, Field, InitializerKind, Method, MethodBody, MethodCallExpression,
    Parameter, PropertyBag, PropertyValue, Statement, SuperClass, Type, TypeParameter, Visibility,
};

#[derive(Debug, Clone)]
pub struct AnnotationBuilder {
    name: String,
    parameters: Vec<AnnotationParameter>,
    language_properties: PropertyBag,
}

impl AnnotationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            language_properties: PropertyBag::new(),
        }
    }

    pub fn parameter(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.parameters.push(AnnotationParameter {
            parameter_name: name.into(),
            parameter_value: value,
        });
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.language_properties.insert(key, value);
        self
    }

    pub fn build(self) -> Result<Annotation, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("annotation"));
        }
        Ok(Annotation {
            name: self.name,
            parameters: self.parameters,
            language_properties: self.language_properties,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TypeParameterBuilder {
    name: String,
    extends_list: Vec<Type>,
    meta: ElementMeta,
}

impl TypeParameterBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends_list: Vec::new(),
            meta: ElementMeta::default(),
        }
    }

    /// Add an upper bound.
    pub fn extends(mut self, bound: Type) -> Self {
        self.extends_list.push(bound);
        self
    }

    element_setters!();

    pub fn build(self) -> Result<TypeParameter, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("type parameter"));
        }
        Ok(TypeParameter {
            name: self.name,
            extends_list: self.extends_list,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SuperClassBuilder {
    simple_name: String,
    qualified_name: Option<String>,
    kind: ClassKind,
    types: Vec<Type>,
    meta: ElementMeta,
}

impl SuperClassBuilder {
    pub fn new(simple_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: None,
            kind,
            types: Vec::new(),
            meta: ElementMeta::default(),
        }
    }

    pub fn qualified_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    /// Add a type argument applied to the super-type.
    pub fn type_argument(mut self, ty: Type) -> Self {
        self.types.push(ty);
        self
    }

    element_setters!();

    pub fn build(self) -> Result<SuperClass, BuildError> {
        if self.simple_name.is_empty() {
            return Err(BuildError::empty_name("super class"));
        }
        Ok(SuperClass {
            super_class_simple_name: self.simple_name,
            super_class_qualified_name: self.qualified_name,
            kind: self.kind,
            types: self.types,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    ir_type: Type,
    visibility: Option<Visibility>,
    mutable: bool,
    initializer: Option<Statement>,
    meta: ElementMeta,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, ir_type: Type) -> Self {
        Self {
            name: name.into(),
            ir_type,
            visibility: None,
            mutable: true,
            initializer: None,
            meta: ElementMeta::default(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    pub fn initializer(mut self, initializer: Statement) -> Self {
        self.initializer = Some(initializer);
        self
    }

    element_setters!();

    pub fn build(self) -> Result<Field, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("field"));
        }
        let visibility = require(self.visibility, "field", &self.name, "visibility")?;
        Ok(Field {
            name: self.name,
            ir_type: self.ir_type,
            visibility,
            is_mutable: self.mutable,
            initializer: self.initializer,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    name: String,
    ir_type: Type,
    default_value: Option<Expression>,
    meta: ElementMeta,
}

impl ParameterBuilder {
    pub fn new(name: impl Into<String>, ir_type: Type) -> Self {
        Self {
            name: name.into(),
            ir_type,
            default_value: None,
            meta: ElementMeta::default(),
        }
    }

    pub fn default_value(mut self, value: Expression) -> Self {
        self.default_value = Some(value);
        self
    }

    element_setters!();

    pub fn build(self) -> Result<Parameter, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name("parameter"));
        }
        Ok(Parameter {
            name: self.name,
            ir_type: self.ir_type,
            default_value: self.default_value,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodBodyBuilder {
    statements: Vec<Statement>,
    meta: ElementMeta,
}

impl MethodBodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn statements(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.statements.extend(statements);
        self
    }

    element_setters!();

    pub fn build(self) -> MethodBody {
        MethodBody {
            statements: self.statements,
            meta: self.meta,
        }
    }
}

/// State shared by method and constructor builders.
#[derive(Debug, Clone)]
struct CallableParts {
    name: String,
    return_type: Type,
    parameters: Vec<Parameter>,
    type_parameters: Vec<TypeParameter>,
    body: Option<MethodBody>,
    visibility: Option<Visibility>,
    is_abstract: bool,
    is_static: bool,
    is_override: bool,
}

impl CallableParts {
    fn new(name: String, return_type: Type) -> Self {
        Self {
            name,
            return_type,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            body: None,
            visibility: None,
            is_abstract: false,
            is_static: false,
            is_override: false,
        }
    }

    fn validate(&self, node: &'static str) -> Result<Visibility, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::empty_name(node));
        }
        require(self.visibility.clone(), node, &self.name, "visibility")
    }
}

/// Setters common to [`MethodBuilder`] and [`ConstructorBuilder`].
macro_rules! callable_setters {
    () => {
        pub fn parameter(mut self, parameter: Parameter) -> Self {
            self.parts.parameters.push(parameter);
            self
        }

        pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
            self.parts.parameters.extend(parameters);
            self
        }

        pub fn type_parameter(mut self, parameter: TypeParameter) -> Self {
            self.parts.type_parameters.push(parameter);
            self
        }

        pub fn body(mut self, body: MethodBody) -> Self {
            self.parts.body = Some(body);
            self
        }

        pub fn visibility(mut self, visibility: Visibility) -> Self {
            self.parts.visibility = Some(visibility);
            self
        }

        pub fn is_abstract(mut self, value: bool) -> Self {
            self.parts.is_abstract = value;
            self
        }

        pub fn is_static(mut self, value: bool) -> Self {
            self.parts.is_static = value;
            self
        }

        pub fn is_override(mut self, value: bool) -> Self {
            self.parts.is_override = value;
            self
        }
    };
}

#[derive(Debug, Clone)]
pub struct MethodBuilder {
    parts: CallableParts,
    meta: ElementMeta,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            parts: CallableParts::new(name.into(), return_type),
            meta: ElementMeta::default(),
        }
    }

    callable_setters!();
    element_setters!();

    pub fn build(self) -> Result<Method, BuildError> {
        let visibility = self.parts.validate("method")?;
        let parts = self.parts;
        Ok(Method {
            name: parts.name,
            return_type: parts.return_type,
            parameters: parts.parameters,
            type_parameters: parts.type_parameters,
            body: parts.body,
            visibility,
            is_abstract: parts.is_abstract,
            is_static: parts.is_static,
            is_override: parts.is_override,
            meta: self.meta,
        })
    }

    pub fn build_callable(self) -> Result<Callable, BuildError> {
        self.build().map(Callable::Method)
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    parts: CallableParts,
    other_constructor_call: Option<MethodCallExpression>,
    meta: ElementMeta,
}

impl ConstructorBuilder {
    /// `return_type` is the type the constructor produces.
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            parts: CallableParts::new(name.into(), return_type),
            other_constructor_call: None,
            meta: ElementMeta::default(),
        }
    }

    /// Delegating `this(...)` / `super(...)` call.
    pub fn other_constructor_call(mut self, call: MethodCallExpression) -> Self {
        self.other_constructor_call = Some(call);
        self
    }

    callable_setters!();
    element_setters!();

    pub fn build(self) -> Result<Constructor, BuildError> {
        let visibility = self.parts.validate("constructor")?;
        let parts = self.parts;
        Ok(Constructor {
            other_constructor_call: self.other_constructor_call,
            name: parts.name,
            return_type: parts.return_type,
            parameters: parts.parameters,
            type_parameters: parts.type_parameters,
            body: parts.body,
            visibility,
            is_abstract: parts.is_abstract,
            is_static: parts.is_static,
            is_override: parts.is_override,
            meta: self.meta,
        })
    }

    pub fn build_callable(self) -> Result<Callable, BuildError> {
        self.build().map(Callable::Constructor)
    }
}

#[derive(Debug, Clone)]
pub struct ClassInitializerBuilder {
    kind: InitializerKind,
    body: Option<MethodBody>,
    meta: ElementMeta,
}

impl ClassInitializerBuilder {
    pub fn new(kind: InitializerKind) -> Self {
        Self {
            kind,
            body: None,
            meta: ElementMeta::default(),
        }
    }

    pub fn body(mut self, body: MethodBody) -> Self {
        self.body = Some(body);
        self
    }

    element_setters!();

    pub fn build(self) -> ClassInitializer {
        ClassInitializer {
            kind: self.kind,
            body: self.body,
            meta: self.meta,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassBuilder {
    qualified_name: Option<String>,
    simple_name: String,
    kind: ClassKind,
    visibility: Option<Visibility>,
    type_parameters: Vec<TypeParameter>,
    super_classes: Vec<SuperClass>,
    fields: Vec<Field>,
    methods: Vec<Callable>,
    initializers: Vec<ClassInitializer>,
    nested_classes: Vec<Class>,
    meta: ElementMeta,
}

impl ClassBuilder {
    pub fn new(simple_name: impl Into<String>) -> Self {
        Self {
            qualified_name: None,
            simple_name: simple_name.into(),
            kind: ClassKind::Class,
            visibility: None,
            type_parameters: Vec::new(),
            super_classes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
            nested_classes: Vec::new(),
            meta: ElementMeta::default(),
        }
    }

    pub fn qualified_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn super_class(mut self, super_class: SuperClass) -> Self {
        self.super_classes.push(super_class);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(Callable::Method(method));
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.methods.push(Callable::Constructor(constructor));
        self
    }

    pub fn callable(mut self, callable: Callable) -> Self {
        self.methods.push(callable);
        self
    }

    pub fn initializer(mut self, initializer: ClassInitializer) -> Self {
        self.initializers.push(initializer);
        self
    }

    pub fn nested_class(mut self, class: Class) -> Self {
        self.nested_classes.push(class);
        self
    }

    /// Drop every member, keeping name, kind, visibility and metadata.
    pub fn clear_members(mut self) -> Self {
        self.fields.clear();
        self.methods.clear();
        self.initializers.clear();
        self.nested_classes.clear();
        self
    }

    pub fn clear_super_classes(mut self) -> Self {
        self.super_classes.clear();
        self
    }

    element_setters!();

    pub fn build(self) -> Result<Class, BuildError> {
        if self.simple_name.is_empty() {
            return Err(BuildError::empty_name("class"));
        }
        let visibility = require(self.visibility, "class", &self.simple_name, "visibility")?;
        Ok(Class {
            qualified_name: self.qualified_name,
            simple_name: self.simple_name,
            kind: self.kind,
            visibility,
            type_parameters: self.type_parameters,
            super_classes: self.super_classes,
            fields: self.fields,
            methods: self.methods,
            initializers: self.initializers,
            nested_classes: self.nested_classes,
            meta: self.meta,
        })
    }
}

impl Class {
    /// A builder pre-filled with this class, for copy-and-override edits.
    pub fn to_builder(&self) -> ClassBuilder {
        ClassBuilder {
            qualified_name: self.qualified_name.clone(),
            simple_name: self.simple_name.clone(),
            kind: self.kind.clone(),
            visibility: Some(self.visibility.clone()),
            type_parameters: self.type_parameters.clone(),
            super_classes: self.super_classes.clone(),
            fields: self.fields.clone(),
            methods: self.methods.clone(),
            initializers: self.initializers.clone(),
            nested_classes: self.nested_classes.clone(),
            meta: self.meta.clone(),
        }
    }
}
