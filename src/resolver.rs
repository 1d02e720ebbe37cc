//! Resolution of declared type references.
//!
//! A reference is resolvable when it parses as a class literal and, for
//! resolvers that know the host's type universe, names a known type.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::TypeRef;

/// Turns a reference as written by the host into a [`TypeRef`].
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<TypeRef, AppError>;

    /// Resolves every reference, failing on the first unresolvable one.
    fn resolve_all(&self, references: &[String]) -> Result<Vec<TypeRef>, AppError> {
        references.iter().map(|r| self.resolve(r)).collect()
    }
}

/// Resolver shared through the generation context.
pub type SharedResolver = Arc<dyn TypeResolver>;

/// Accepts any syntactically valid class literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralResolver;

impl TypeResolver for StructuralResolver {
    fn resolve(&self, reference: &str) -> Result<TypeRef, AppError> {
        Ok(TypeRef::parse(reference)?)
    }
}

/// Accepts class literals naming one of a fixed set of types.
#[derive(Debug, Clone, Default)]
pub struct KnownTypes {
    known: BTreeSet<String>,
}

impl KnownTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, qualified_name: impl Into<String>) {
        self.known.insert(qualified_name.into());
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.known.contains(qualified_name)
    }
}

impl TypeResolver for KnownTypes {
    fn resolve(&self, reference: &str) -> Result<TypeRef, AppError> {
        let ty = TypeRef::parse(reference)?;
        if self.contains(&ty.qualified_name()) {
            Ok(ty)
        } else {
            Err(AppError::UnresolvedType {
                reference: reference.to_string(),
                reason: format!("'{}' is not a known type", ty.qualified_name()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_resolver() {
        let resolver = StructuralResolver;
        let ty = resolver.resolve("com.example.Anything.class").unwrap();
        assert_eq!(ty.qualified_name(), "com.example.Anything");
        assert!(matches!(
            resolver.resolve("not a type"),
            Err(AppError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn test_known_types() {
        let resolver = KnownTypes::new(["com.example.Bar"]);
        assert!(resolver.resolve("com.example.Bar.class").is_ok());

        let err = resolver.resolve("com.example.Missing.class").unwrap_err();
        assert!(err.to_string().contains("com.example.Missing"));
    }

    #[test]
    fn test_resolve_all_stops_at_first_failure() {
        let resolver = KnownTypes::new(["com.example.A", "com.example.C"]);
        let refs = vec![
            "com.example.A".to_string(),
            "com.example.B".to_string(),
            "com.example.C".to_string(),
        ];
        let err = resolver.resolve_all(&refs).unwrap_err();
        assert!(err.to_string().contains("com.example.B"));

        let ok = resolver
            .resolve_all(&["com.example.C".to_string(), "com.example.A".to_string()])
            .unwrap();
        assert_eq!(ok[0].simple_name(), "C");
        assert_eq!(ok[1].simple_name(), "A");
    }
}
