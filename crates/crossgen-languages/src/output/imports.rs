//! Import planning for JVM targets.
//!
//! Writers spell types by their simple names, so every package-qualified
//! name a file uses must either be imported or stay fully qualified. The
//! plan runs on a copy of the file before emission: it appends the missing
//! imports and flags the uses whose simple name is already taken.

use super::strip_package;
use crossgen_ir::properties::{PropertyBag, keys};
use crossgen_ir::*;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Name as a writer spells it at a use site.
pub(crate) fn written_name<'a>(name: &'a str, properties: &PropertyBag) -> &'a str {
    if properties.flag(keys::FULLY_QUALIFIED) {
        name
    } else {
        strip_package(name)
    }
}

/// Package and importable head of a JVM-style name: `a.b.Outer.Inner`
/// splits into `a.b` and `Outer`.
fn split_name(name: &str) -> (&str, &str) {
    let mut offset = 0;
    for segment in name.split('.') {
        if segment.starts_with(|c: char| c.is_uppercase()) {
            let package = name[..offset].trim_end_matches('.');
            return (package, segment);
        }
        offset += segment.len() + 1;
    }
    ("", name)
}

/// Target rules an import plan follows.
pub(crate) struct ImportRules<'r> {
    /// Packages the target imports without being asked.
    pub implicit: &'r [&'r str],
    /// Names the target spells as a builtin instead of importing.
    pub builtin: &'r dyn Fn(&str) -> bool,
}

/// Copy of `file` with an import for every name it uses from another
/// package, and clashing names flagged [`keys::FULLY_QUALIFIED`].
pub(crate) fn plan<'f>(file: &'f File, rules: &ImportRules<'_>) -> Cow<'f, File> {
    let mut planned = file.clone();
    let mut used = Vec::new();
    planned.visit_names(&mut |name, _| used.push(name.to_string()));

    let package = file.package().unwrap_or("");
    // Simple name -> the head path that owns it in this file.
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut claim = |simple: &str, path: String| {
        owners.entry(simple.to_string()).or_insert(path);
    };
    for class in file.classes() {
        claim(&class.simple_name, qualified_head(package, &class.simple_name));
    }
    let mut explicit = HashSet::new();
    let mut wildcards = HashSet::new();
    for import in &file.imports {
        if import.is_wildcard {
            wildcards.insert(import.path.as_str());
            continue;
        }
        explicit.insert(import.path.as_str());
        if import.meta.language_properties.flag(keys::STATIC) {
            continue;
        }
        let simple = import
            .meta
            .language_properties
            .string("alias")
            .unwrap_or_else(|| import.simple_name());
        claim(simple, import.path.clone());
    }
    // Names the file already spells without a foreign package come first.
    for name in &used {
        let (owner, head) = split_name(name);
        if owner.is_empty() || owner == package {
            claim(head, qualified_head(owner, head));
        }
    }

    let mut imports = BTreeSet::new();
    let mut qualified = HashSet::new();
    for name in &used {
        if (rules.builtin)(name) {
            continue;
        }
        let (owner, head) = split_name(name);
        if owner.is_empty() || owner == package {
            continue;
        }
        let path = qualified_head(owner, head);
        let entry = owners.entry(head.to_string()).or_insert_with(|| path.clone());
        if *entry != path {
            qualified.insert(path);
            continue;
        }
        let implicit = rules.implicit.contains(&owner) || wildcards.contains(owner);
        if !implicit && !explicit.contains(path.as_str()) {
            imports.insert(path);
        }
    }

    if imports.is_empty() && qualified.is_empty() {
        return Cow::Borrowed(file);
    }
    debug!(
        file = %file.name,
        imports = imports.len(),
        qualified = qualified.len(),
        "planned imports"
    );
    if !qualified.is_empty() {
        planned.visit_names(&mut |name, properties| {
            let (owner, head) = split_name(name);
            if qualified.contains(&qualified_head(owner, head)) {
                properties.insert(keys::FULLY_QUALIFIED, true);
            }
        });
    }
    planned.imports.extend(imports.into_iter().map(|path| Import {
        path,
        is_wildcard: false,
        meta: ElementMeta::default(),
    }));
    Cow::Owned(planned)
}

fn qualified_head(package: &str, head: &str) -> String {
    if package.is_empty() {
        head.to_string()
    } else {
        format!("{package}.{head}")
    }
}

/// Walk over every use of a class name, with the property bag of the node
/// that spells it.
trait VisitNames {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag));
}

impl<T: VisitNames> VisitNames for Vec<T> {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.iter_mut().for_each(|item| item.visit_names(visit));
    }
}

impl<T: VisitNames> VisitNames for Option<T> {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        if let Some(inner) = self {
            inner.visit_names(visit);
        }
    }
}

impl<T: VisitNames> VisitNames for Box<T> {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        (**self).visit_names(visit);
    }
}

impl VisitNames for Type {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        match self {
            Type::Reference(t) => {
                let name = t
                    .referenced_class_qualified_name
                    .as_deref()
                    .unwrap_or(&t.referenced_class_simple_name);
                visit(name, &mut t.meta.language_properties);
                t.type_parameters.visit_names(visit);
            }
            Type::Function(t) => {
                t.parameter_types.visit_names(visit);
                t.return_type.visit_names(visit);
            }
            Type::Array(t) => t.element_type.visit_names(visit),
            Type::Primitive(_) | Type::Generic(_) => {}
        }
    }
}

impl VisitNames for Expression {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        match self {
            Expression::Empty(_) | Expression::Literal(_) | Expression::Unknown(_) => {}
            Expression::Identifier(e) => {
                e.qualifier.visit_names(visit);
                e.selector.visit_names(visit);
            }
            Expression::TypeReferenceIdentifier(e) => e.referenced_type.visit_names(visit),
            Expression::PropertyAccess(e) => e.receiver.visit_names(visit),
            Expression::MethodCall(e) => e.visit_names(visit),
            Expression::ObjectCreation(e) => {
                visit(&e.class_name, &mut e.meta.element.language_properties);
                e.constructor_args.visit_names(visit);
            }
            Expression::Binary(e) => {
                e.left.visit_names(visit);
                e.right.visit_names(visit);
            }
            Expression::Unary(e) => e.operand.visit_names(visit),
            Expression::Assignment(e) => {
                e.target.visit_names(visit);
                e.value.visit_names(visit);
            }
            Expression::Ternary(e) => {
                e.condition.visit_names(visit);
                e.if_true.visit_names(visit);
                e.if_false.visit_names(visit);
            }
            Expression::Cast(e) => {
                e.expression.visit_names(visit);
                e.target_type.visit_names(visit);
            }
            Expression::TypeCheck(e) => {
                e.expression.visit_names(visit);
                e.check_type.visit_names(visit);
            }
            Expression::Lambda(e) => {
                e.parameters.visit_names(visit);
                e.return_type.visit_names(visit);
                e.body.visit_names(visit);
            }
        }
    }
}

impl VisitNames for MethodCallExpression {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.receiver.visit_names(visit);
        self.value_arguments.visit_names(visit);
        self.type_arguments.visit_names(visit);
    }
}

impl VisitNames for Statement {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        match self {
            Statement::Empty(_)
            | Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Unknown(_) => {}
            Statement::Expression(s) => s.expression.visit_names(visit),
            Statement::VariableDeclaration(s) => {
                s.ir_type.visit_names(visit);
                s.initializer.visit_names(visit);
            }
            Statement::Block(s) => s.statements.visit_names(visit),
            Statement::If(s) => {
                s.condition.visit_names(visit);
                s.then_statement.visit_names(visit);
                s.else_statement.visit_names(visit);
            }
            Statement::For(s) => {
                s.initializer.visit_names(visit);
                s.condition.visit_names(visit);
                s.update.visit_names(visit);
                s.body.visit_names(visit);
            }
            Statement::While(s) => {
                s.condition.visit_names(visit);
                s.body.visit_names(visit);
            }
            Statement::DoWhile(s) => {
                s.body.visit_names(visit);
                s.condition.visit_names(visit);
            }
            Statement::Switch(s) => {
                s.expression.visit_names(visit);
                for case in &mut s.cases {
                    case.match_expressions.visit_names(visit);
                    case.body.visit_names(visit);
                }
            }
            Statement::Return(s) => s.expression.visit_names(visit),
            Statement::Throw(s) => s.expression.visit_names(visit),
            Statement::TryCatch(s) => {
                s.try_block.visit_names(visit);
                for clause in &mut s.catch_clauses {
                    clause.exception_type.visit_names(visit);
                    clause.body.visit_names(visit);
                }
                s.finally_block.visit_names(visit);
            }
        }
    }
}

impl VisitNames for TypeParameter {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.extends_list.visit_names(visit);
    }
}

impl VisitNames for Parameter {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.ir_type.visit_names(visit);
        self.default_value.visit_names(visit);
    }
}

impl VisitNames for MethodBody {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.statements.visit_names(visit);
    }
}

impl VisitNames for Field {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.ir_type.visit_names(visit);
        self.initializer.visit_names(visit);
    }
}

impl VisitNames for Method {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.type_parameters.visit_names(visit);
        self.return_type.visit_names(visit);
        self.parameters.visit_names(visit);
        self.body.visit_names(visit);
    }
}

impl VisitNames for Constructor {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.type_parameters.visit_names(visit);
        self.other_constructor_call.visit_names(visit);
        self.parameters.visit_names(visit);
        self.body.visit_names(visit);
    }
}

impl VisitNames for Callable {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        match self {
            Callable::Method(m) => m.visit_names(visit),
            Callable::Constructor(c) => c.visit_names(visit),
        }
    }
}

impl VisitNames for Class {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.type_parameters.visit_names(visit);
        for super_class in &mut self.super_classes {
            let name = super_class
                .super_class_qualified_name
                .as_deref()
                .unwrap_or(&super_class.super_class_simple_name);
            visit(name, &mut super_class.meta.language_properties);
            super_class.types.visit_names(visit);
        }
        self.fields.visit_names(visit);
        self.methods.visit_names(visit);
        for initializer in &mut self.initializers {
            initializer.body.visit_names(visit);
        }
        self.nested_classes.visit_names(visit);
    }
}

impl VisitNames for Declaration {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        match self {
            Declaration::Class(c) => c.visit_names(visit),
            Declaration::Field(f) => f.visit_names(visit),
            Declaration::Method(m) => m.visit_names(visit),
        }
    }
}

impl VisitNames for File {
    fn visit_names(&mut self, visit: &mut dyn FnMut(&str, &mut PropertyBag)) {
        self.declarations.visit_names(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_the_first_capitalized_segment() {
        assert_eq!(split_name("java.util.List"), ("java.util", "List"));
        assert_eq!(split_name("a.b.Outer.Inner"), ("a.b", "Outer"));
        assert_eq!(split_name("Point"), ("", "Point"));
    }

    #[test]
    fn flagged_names_stay_qualified() {
        let mut properties = PropertyBag::new();
        assert_eq!(written_name("java.awt.List", &properties), "List");
        properties.insert(keys::FULLY_QUALIFIED, true);
        assert_eq!(written_name("java.awt.List", &properties), "java.awt.List");
    }
}
