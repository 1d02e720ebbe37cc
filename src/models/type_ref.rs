//! Type references parsed from class literals.
//!
//! The host exports every type reference the way it appears in annotation
//! values (`com.example.Foo.class`) or as a bare qualified name. Both forms
//! parse to the same [`TypeRef`].
//!
//! # Example
//!
//! ```
//! use sharpener::models::TypeRef;
//!
//! let ty = TypeRef::parse("com.example.FooModule.class").unwrap();
//! assert_eq!(ty.package(), "com.example");
//! assert_eq!(ty.simple_name(), "FooModule");
//! ```

use std::fmt;

use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[grammar = "models/type_ref.pest"]
struct ClassLiteralParser;

/// A reference to a named Java type.
///
/// Nested types keep their enclosing types apart from the package, so
/// `com.example.Outer.Inner` lives in `com.example` and is written
/// `Outer.Inner` there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    package: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    enclosing: Vec<String>,
    simple_name: String,
}

impl TypeRef {
    /// Creates a top-level type reference. An empty package is the default
    /// package.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: Vec::new(),
            simple_name: simple_name.into(),
        }
    }

    /// Parses a class literal or qualified name.
    ///
    /// The package is everything up to the first segment starting with an
    /// uppercase letter; the remaining segments are the type and the types
    /// enclosing it. When no segment is capitalized the last one is the type.
    pub fn parse(literal: &str) -> Result<Self, TypeRefError> {
        let mut segments = parse_segments(literal)?;
        let split = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len() - 1);
        let names = segments.split_off(split);
        Self::from_parts(segments.join("."), names, literal)
    }

    /// Parses `literal` as a type declared in `package`.
    ///
    /// Every segment after the package is a type name, whatever its case.
    pub fn parse_in(literal: &str, package: &str) -> Result<Self, TypeRefError> {
        let segments = parse_segments(literal)?;
        let package_len = if package.is_empty() {
            0
        } else {
            package.split('.').count()
        };

        if segments.len() <= package_len || segments[..package_len].join(".") != package {
            return Err(TypeRefError::OutsidePackage {
                literal: literal.to_string(),
                package: package.to_string(),
            });
        }
        let names = segments[package_len..].to_vec();
        Self::from_parts(package.to_string(), names, literal)
    }

    fn from_parts(package: String, mut names: Vec<&str>, literal: &str) -> Result<Self, TypeRefError> {
        let simple_name = names
            .pop()
            .ok_or_else(|| TypeRefError::Empty(literal.to_string()))?;
        Ok(Self {
            package,
            enclosing: names.into_iter().map(str::to_string).collect(),
            simple_name: simple_name.to_string(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Innermost type name, e.g. `Inner` for `com.example.Outer.Inner`.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// The outermost type this reference is declared in, or itself.
    pub fn top_level(&self) -> TypeRef {
        match self.enclosing.first() {
            Some(outer) => Self::new(self.package.clone(), outer.clone()),
            None => self.clone(),
        }
    }

    /// Name relative to the package: `Outer.Inner`.
    pub fn nested_name(&self) -> String {
        let mut name = self.enclosing.join(".");
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&self.simple_name);
        name
    }

    /// A top-level type in the same package.
    pub fn with_simple_name(&self, simple_name: impl Into<String>) -> Self {
        Self::new(self.package.clone(), simple_name)
    }

    /// Fully qualified name, e.g. `com.example.Foo`.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.nested_name()
        } else {
            format!("{}.{}", self.package, self.nested_name())
        }
    }
}

fn parse_segments(literal: &str) -> Result<Vec<&str>, TypeRefError> {
    let mut pairs = ClassLiteralParser::parse(Rule::ClassLiteral, literal).map_err(|e| {
        TypeRefError::InvalidSyntax {
            literal: literal.to_string(),
            message: e.variant.message().to_string(),
        }
    })?;

    let qualified = pairs
        .next()
        .into_iter()
        .flat_map(|literal| literal.into_inner())
        .find(|pair| pair.as_rule() == Rule::QualifiedName)
        .ok_or_else(|| TypeRefError::Empty(literal.to_string()))?;

    let segments: Vec<&str> = qualified
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::Identifier)
        .map(|pair| pair.as_str())
        .collect();

    if segments.is_empty() {
        return Err(TypeRefError::Empty(literal.to_string()));
    }
    Ok(segments)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Errors that can occur while parsing a type reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    #[error("'{literal}' is not a class literal: {message}")]
    InvalidSyntax { literal: String, message: String },

    #[error("'{0}' does not name a type")]
    Empty(String),

    #[error("'{literal}' is not declared in package '{package}'")]
    OutsidePackage { literal: String, package: String },
}

/// Returns true if `name` is a valid Java identifier.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
