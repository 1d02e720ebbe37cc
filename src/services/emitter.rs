//! Rendering and persistence of generated artifacts.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::codegen::{JavaFile, MethodSpec, TypeSpec};
use crate::config::Config;
use crate::di::FromContext;
use crate::diagnostics::Diagnostics;
use crate::error::AppError;
use crate::filer::Filer;
use crate::models::ComponentModel;
use crate::{report_error, report_warning};
use crate::resolver::SharedResolver;

use super::metadata::ComponentMetadata;
use super::naming::NamingResolver;
use super::scope::ScopePlan;

/// Parameter name of the generated `inject` method.
const INJECT_PARAM: &str = "thisClass";

/// What one model produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emitted {
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Writes that failed and were reported.
    pub failed: usize,
}

/// Builds the component interface and hands it, with its scope companion,
/// to the filer.
#[derive(FromContext, Clone)]
pub struct ArtifactEmitter {
    config: Arc<Config>,
    diagnostics: Diagnostics,
    naming: NamingResolver,
    resolver: SharedResolver,
}

impl ArtifactEmitter {
    /// The component interface for `model`:
    ///
    /// ```java
    /// @Component(modules = {FooModule.class})
    /// @SharpFooScope
    /// public interface SharpFooComponent {
    ///   Foo inject(Foo thisClass);
    ///
    ///   Bar provideBar();
    /// }
    /// ```
    pub fn component_file(
        &self,
        model: &ComponentModel,
        metadata: &ComponentMetadata,
        scope: &ScopePlan,
    ) -> Result<JavaFile, AppError> {
        let name = self.naming.component_name(&model.target);

        let mut spec = TypeSpec::interface(name.simple_name())
            .with_annotation(metadata.to_annotation());
        if let Some(annotation) = scope.annotation() {
            spec = spec.with_annotation(annotation);
        }

        spec = spec.with_method(
            MethodSpec::new("inject", model.target.clone())
                .with_param(model.target.clone(), INJECT_PARAM),
        );
        let mut accessors = BTreeSet::new();
        for provided in self.resolver.resolve_all(&model.provides)? {
            let accessor = format!("provide{}", provided.simple_name());
            if !accessors.insert(accessor.clone()) {
                report_warning!(
                    self.diagnostics,
                    "Component for '{}' provides more than one type named '{}'; '{}' is declared twice",
                    model.target,
                    provided.simple_name(),
                    accessor
                );
            }
            spec = spec.with_method(MethodSpec::new(accessor, provided));
        }

        Ok(JavaFile::new(model.package(), spec).with_file_comment(&self.config.output.file_comment))
    }

    /// Writes the scope companion (if any) and the component interface.
    ///
    /// An unresolvable `provides` entry fails the model before anything is
    /// written. Write failures are reported and counted; they never abort
    /// the run.
    pub fn emit(
        &self,
        model: &ComponentModel,
        metadata: &ComponentMetadata,
        scope: &ScopePlan,
        filer: &mut dyn Filer,
    ) -> Result<Emitted, AppError> {
        let component = self.component_file(model, metadata, scope).map_err(|err| {
            report_error!(
                self.diagnostics,
                "Could not generate component for '{}': {}",
                model.target,
                err
            );
            err
        })?;
        let component_name = component.type_ref();

        let mut emitted = Emitted::default();
        if let Some(companion) = scope.companion() {
            self.persist(companion, filer, &mut emitted);
        }
        if self.persist(&component, filer, &mut emitted) {
            tracing::debug!("Generated component {}", component_name);
        }

        Ok(emitted)
    }

    /// Writes one file, reporting a failure instead of returning it.
    fn persist(&self, file: &JavaFile, filer: &mut dyn Filer, emitted: &mut Emitted) -> bool {
        match filer.write(file) {
            Ok(path) => {
                emitted.written.push(path);
                true
            }
            Err(source) => {
                let err = AppError::Persistence {
                    name: file.type_ref().qualified_name(),
                    source,
                };
                self.diagnostics.error(&err);
                emitted.failed += 1;
                false
            }
        }
    }
}
