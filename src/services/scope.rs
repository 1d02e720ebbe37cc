//! Scope resolution for generated components.

use std::sync::Arc;

use crate::codegen::{AnnotationMember, AnnotationSpec, JavaFile, TypeSpec};
use crate::config::Config;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{ComponentModel, ScopeResolution, TypeRef};

use super::naming::NamingResolver;

const RETENTION: &str = "java.lang.annotation.Retention";
const RETENTION_POLICY: &str = "java.lang.annotation.RetentionPolicy";
const TARGET: &str = "java.lang.annotation.Target";
const ELEMENT_TYPE: &str = "java.lang.annotation.ElementType";

/// The scope decided for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopePlan {
    /// Annotate the component with a scope declared elsewhere.
    External(TypeRef),
    /// Annotate the component with a newly generated scope.
    Synthesized { scope: TypeRef, declaration: JavaFile },
    /// No scope annotation.
    Unscoped,
}

impl ScopePlan {
    /// The scope annotation to put on the component, if any.
    pub fn annotation(&self) -> Option<AnnotationSpec> {
        match self {
            ScopePlan::External(scope) | ScopePlan::Synthesized { scope, .. } => {
                Some(AnnotationSpec::marker(scope.clone()))
            }
            ScopePlan::Unscoped => None,
        }
    }

    /// The generated scope declaration, if one is needed.
    pub fn companion(&self) -> Option<&JavaFile> {
        match self {
            ScopePlan::Synthesized { declaration, .. } => Some(declaration),
            _ => None,
        }
    }
}

/// Decides between an external scope and a synthesized one.
#[derive(FromContext, Clone)]
pub struct ScopeSynthesizer {
    config: Arc<Config>,
    naming: NamingResolver,
}

impl ScopeSynthesizer {
    pub fn plan(&self, model: &ComponentModel) -> Result<ScopePlan, AppError> {
        Ok(match &model.scope {
            ScopeResolution::External(scope) => ScopePlan::External(scope.clone()),
            ScopeResolution::Unscoped => ScopePlan::Unscoped,
            ScopeResolution::Synthesize => {
                let scope = self.naming.scope_name(&model.target);
                let declaration = self.scope_declaration(&scope)?;
                ScopePlan::Synthesized { scope, declaration }
            }
        })
    }

    /// A public scope annotation type, retained at runtime and applicable
    /// to types:
    ///
    /// ```java
    /// @Scope
    /// @Retention(RetentionPolicy.RUNTIME)
    /// @Target(ElementType.TYPE)
    /// public @interface SharpFooScope {
    /// }
    /// ```
    fn scope_declaration(&self, scope: &TypeRef) -> Result<JavaFile, AppError> {
        let scope_meta = TypeRef::parse(&self.config.framework.scope)?;
        let retention = AnnotationSpec::marker(TypeRef::parse(RETENTION)?).with_member(
            "value",
            AnnotationMember::EnumConstant(TypeRef::parse(RETENTION_POLICY)?, "RUNTIME".into()),
        );
        let target = AnnotationSpec::marker(TypeRef::parse(TARGET)?).with_member(
            "value",
            AnnotationMember::EnumConstant(TypeRef::parse(ELEMENT_TYPE)?, "TYPE".into()),
        );

        let spec = TypeSpec::annotation(scope.simple_name())
            .with_annotation(AnnotationSpec::marker(scope_meta))
            .with_annotation(retention)
            .with_annotation(target);

        Ok(JavaFile::new(scope.package(), spec).with_file_comment(&self.config.output.file_comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GenerationContext;
    use crate::resolver::StructuralResolver;

    fn model(scope: ScopeResolution) -> ComponentModel {
        ComponentModel {
            target: TypeRef::new("com.example", "Foo"),
            scope,
            modules: vec![],
            dependencies: vec![],
            sharp_dependencies: vec![],
            provides: vec![],
        }
    }

    fn synthesizer() -> ScopeSynthesizer {
        GenerationContext::new(Config::default(), Arc::new(StructuralResolver)).resolve()
    }

    #[test]
    fn test_synthesized_scope() {
        let plan = synthesizer().plan(&model(ScopeResolution::Synthesize)).unwrap();

        let scope = TypeRef::new("com.example", "SharpFooScope");
        assert_eq!(plan.annotation(), Some(AnnotationSpec::marker(scope.clone())));

        let companion = plan.companion().unwrap();
        assert_eq!(companion.type_ref(), scope);
        let source = companion.render();
        assert!(source.contains("@Scope\n"));
        assert!(source.contains("@Retention(RetentionPolicy.RUNTIME)\n"));
        assert!(source.contains("@Target(ElementType.TYPE)\n"));
        assert!(source.contains("public @interface SharpFooScope {"));
        assert!(source.starts_with("// Generated by DaggerSharpener\n"));
    }

    #[test]
    fn test_external_scope_has_no_companion() {
        let activity = TypeRef::new("com.example.scopes", "ActivityScope");
        let plan = synthesizer()
            .plan(&model(ScopeResolution::External(activity.clone())))
            .unwrap();

        assert_eq!(plan, ScopePlan::External(activity.clone()));
        assert_eq!(plan.annotation(), Some(AnnotationSpec::marker(activity)));
        assert!(plan.companion().is_none());
    }

    #[test]
    fn test_unscoped() {
        let plan = synthesizer().plan(&model(ScopeResolution::Unscoped)).unwrap();
        assert!(plan.annotation().is_none());
        assert!(plan.companion().is_none());
    }
}
