//! Assembly of the component annotation.

use std::sync::Arc;

use crate::codegen::{AnnotationMember, AnnotationSpec};
use crate::config::Config;
use crate::di::FromContext;
use crate::diagnostics::Diagnostics;
use crate::error::AppError;
use crate::models::{ComponentModel, TypeRef};
use crate::resolver::SharedResolver;

use super::naming::{NameTable, NamingResolver, SharpName};

/// Resolved contents of the framework component annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMetadata {
    /// The framework's component annotation type, e.g. `dagger.Component`.
    pub annotation: TypeRef,
    pub modules: Vec<TypeRef>,
    /// Sharp dependencies (renamed) followed by native dependencies.
    pub dependencies: Vec<TypeRef>,
}

impl ComponentMetadata {
    /// Builds the annotation. Empty lists are left out entirely.
    pub fn to_annotation(&self) -> AnnotationSpec {
        let mut annotation = AnnotationSpec::marker(self.annotation.clone());
        if !self.modules.is_empty() {
            annotation = annotation
                .with_member("modules", AnnotationMember::Classes(self.modules.clone()));
        }
        if !self.dependencies.is_empty() {
            annotation = annotation.with_member(
                "dependencies",
                AnnotationMember::Classes(self.dependencies.clone()),
            );
        }
        annotation
    }
}

/// Merges a model's module and dependency lists into [`ComponentMetadata`].
#[derive(FromContext, Clone)]
pub struct MetadataAssembler {
    config: Arc<Config>,
    diagnostics: Diagnostics,
    naming: NamingResolver,
    resolver: SharedResolver,
}

impl MetadataAssembler {
    /// Assembles the metadata for `model`.
    ///
    /// Every module and dependency must resolve; the first unresolvable
    /// entry fails the whole model and nothing is returned for it.
    pub fn assemble(
        &self,
        model: &ComponentModel,
        names: &NameTable,
    ) -> Result<ComponentMetadata, AppError> {
        self.try_assemble(model, names).map_err(|err| {
            self.diagnostics.error(format_args!(
                "Could not assemble component for '{}': {}",
                model.target, err
            ));
            err
        })
    }

    fn try_assemble(
        &self,
        model: &ComponentModel,
        names: &NameTable,
    ) -> Result<ComponentMetadata, AppError> {
        let annotation = TypeRef::parse(&self.config.framework.component)?;
        let modules = self.resolver.resolve_all(&model.modules)?;

        let sharp = self.resolver.resolve_all(&model.sharp_dependencies)?;
        let native = self.resolver.resolve_all(&model.dependencies)?;

        let mut dependencies = Vec::with_capacity(sharp.len() + native.len());
        for dependency in &sharp {
            match self.naming.sharp_dependency(dependency, names) {
                SharpName::Recorded(generated) => dependencies.push(generated),
                SharpName::Derived(generated) => {
                    self.diagnostics.warning(format_args!(
                        "Sharp dependency '{}' of '{}' is not a SharpComponent in this run; assuming '{}'",
                        dependency, model.target, generated
                    ));
                    dependencies.push(generated);
                }
            }
        }
        dependencies.extend(native);

        Ok(ComponentMetadata {
            annotation,
            modules,
            dependencies,
        })
    }
}
