//! Declarations as reported by the host build tool.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a tagged declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    Method,
    Constructor,
    Field,
    Parameter,
    Package,
}

impl DeclarationKind {
    /// Only plain classes can be component targets.
    pub fn is_class(&self) -> bool {
        matches!(self, DeclarationKind::Class)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::AnnotationType => "annotation type",
            DeclarationKind::Method => "method",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Field => "field",
            DeclarationKind::Parameter => "parameter",
            DeclarationKind::Package => "package",
        };
        f.write_str(name)
    }
}

/// The value of one annotation member: a single class literal or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    One(String),
    Many(Vec<String>),
}

impl AnnotationValue {
    /// Flattens the value into its elements, preserving order.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            AnnotationValue::One(value) => vec![value.clone()],
            AnnotationValue::Many(values) => values.clone(),
        }
    }
}

/// An annotation present on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Qualified annotation type name.
    pub name: String,
    /// Set by the host when the annotation type is itself annotated with a
    /// DI scope meta-annotation.
    #[serde(default)]
    pub scope: bool,
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: false,
            values: BTreeMap::new(),
        }
    }

    /// An annotation whose type is a scope.
    pub fn scope(name: impl Into<String>) -> Self {
        Self {
            scope: true,
            ..Self::new(name)
        }
    }

    /// Adds a list-valued member.
    pub fn with_values<I, S>(mut self, member: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.values
            .insert(member.to_string(), AnnotationValue::Many(values));
        self
    }

    /// Returns the elements of a member, or an empty list when it is absent.
    pub fn list(&self, member: &str) -> Vec<String> {
        self.values
            .get(member)
            .map(AnnotationValue::to_vec)
            .unwrap_or_default()
    }
}

/// A declaration carrying one or more annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDeclaration {
    /// Fully qualified name, e.g. `com.example.Foo`.
    pub name: String,
    pub kind: DeclarationKind,
    /// Package the declaration lives in, when the host reports it. Needed
    /// to tell enclosing types from packages for nested classes with
    /// unconventional names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TaggedDeclaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            package: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Simple name: the last dotted segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Finds an annotation by qualified type name.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Annotations the host flagged as scopes.
    pub fn scope_annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_declaration() {
        let json = r#"{
            "name": "com.example.Foo",
            "kind": "class",
            "annotations": [
                {
                    "name": "com.github.alexdochioiu.daggersharpener.SharpComponent",
                    "values": {
                        "modules": ["com.example.FooModule.class"],
                        "provides": "com.example.Bar.class"
                    }
                },
                { "name": "com.example.ActivityScope", "scope": true }
            ]
        }"#;

        let decl: TaggedDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.kind, DeclarationKind::Class);
        assert_eq!(decl.simple_name(), "Foo");

        let component = decl
            .annotation("com.github.alexdochioiu.daggersharpener.SharpComponent")
            .unwrap();
        assert_eq!(component.list("modules"), vec!["com.example.FooModule.class"]);
        assert_eq!(component.list("provides"), vec!["com.example.Bar.class"]);
        assert!(component.list("dependencies").is_empty());

        let scopes: Vec<_> = decl.scope_annotations().map(|a| a.name.as_str()).collect();
        assert_eq!(scopes, vec!["com.example.ActivityScope"]);
    }

    #[test]
    fn test_kind_names() {
        let kind: DeclarationKind = serde_json::from_str("\"annotation_type\"").unwrap();
        assert_eq!(kind, DeclarationKind::AnnotationType);
        assert!(!kind.is_class());
        assert_eq!(DeclarationKind::Method.to_string(), "method");
    }
}
