//! One generation run.
//!
//! A run makes two passes over the declarations visible to it:
//!
//! 1. build a [`ComponentModel`] for every `SharpComponent` class, in
//!    discovery order, and record each generated component name;
//! 2. for each model, assemble the component annotation, decide its scope
//!    and write the artifacts.
//!
//! A declaration that is not a class aborts the run before anything is
//! written. Any other failure only affects the model it belongs to.

use std::path::PathBuf;

use serde::Serialize;

use crate::context::GenerationContext;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::AppError;
use crate::filer::Filer;
use crate::markers::{DeclarationSource, Marker, MarkerSet};
use crate::models::{ComponentModel, TypeRef};
use crate::report_warning;
use crate::services::{
    find_cycles, ArtifactEmitter, MetadataAssembler, ModelBuilder, NameTable, NamingResolver,
    ScopeSynthesizer,
};

/// Summary of a finished run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of component models built.
    pub models: usize,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Declarations or models that produced no component.
    pub skipped: usize,
    /// Writes that failed.
    pub failed_writes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Runs the generator against a declaration source and a filer.
pub struct Generator {
    ctx: GenerationContext,
    markers: MarkerSet,
}

impl Generator {
    /// Creates a generator, checking everything the run depends on.
    ///
    /// Fails with [`AppError::Initialization`] when a naming pattern, the
    /// marker package or a framework type name is unusable.
    pub fn new(ctx: GenerationContext) -> Result<Self, AppError> {
        Self::check(&ctx).map_err(|err| {
            ctx.diagnostics.error(&err);
            err
        })?;

        let markers = MarkerSet::new(ctx.config.markers.package.clone());
        Ok(Self { ctx, markers })
    }

    fn check(ctx: &GenerationContext) -> Result<(), AppError> {
        ctx.resolve::<NamingResolver>().validate()?;

        let config = &ctx.config;
        for (key, value) in [
            ("markers.package", &config.markers.package),
            ("framework.component", &config.framework.component),
            ("framework.scope", &config.framework.scope),
        ] {
            TypeRef::parse(value).map_err(|e| {
                AppError::Initialization(format!("{} '{}' is invalid: {}", key, value, e))
            })?;
        }
        Ok(())
    }

    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    /// Pass 1: builds the models of all `SharpComponent` declarations.
    ///
    /// Returns the models that could be built; declarations with malformed
    /// scopes or names are reported and skipped. The first declaration that
    /// is not a class aborts the batch.
    pub fn build_models(
        &self,
        source: &dyn DeclarationSource,
    ) -> Result<(Vec<ComponentModel>, usize), AppError> {
        let builder: ModelBuilder = self.ctx.resolve();
        let declarations = source.annotated_with(&self.markers.name(Marker::Component));

        let mut models = Vec::with_capacity(declarations.len());
        let mut skipped = 0;
        for declaration in declarations {
            match builder.build(declaration) {
                Ok(model) => models.push(model),
                Err(err) if err.aborts_batch() => return Err(err),
                Err(_) => skipped += 1,
            }
        }

        self.warn_stray_markers(source);
        Ok((models, skipped))
    }

    /// `SharpScope` and `NoScope` only mean something next to `SharpComponent`.
    fn warn_stray_markers(&self, source: &dyn DeclarationSource) {
        for marker in [Marker::Scope, Marker::NoScope] {
            for declaration in source.annotated_with(&self.markers.name(marker)) {
                if !self.markers.is_tagged(declaration, Marker::Component) {
                    report_warning!(
                        self.ctx.diagnostics,
                        "{} on '{}' has no effect without {}",
                        marker,
                        declaration.name,
                        Marker::Component
                    );
                }
            }
        }
    }

    /// Runs both passes, writing through `filer`.
    pub fn run(
        &self,
        source: &dyn DeclarationSource,
        filer: &mut dyn Filer,
    ) -> Result<RunReport, AppError> {
        let (models, skipped) = self.build_models(source)?;
        tracing::info!("Processing {} SharpComponent classes", models.len());

        let naming: NamingResolver = self.ctx.resolve();
        let names: NameTable = naming.name_table(&models);

        for cycle in find_cycles(&models) {
            let members: Vec<String> = cycle.iter().map(TypeRef::to_string).collect();
            report_warning!(
                self.ctx.diagnostics,
                "Cyclic sharp dependencies between {}; the component graph will not compile",
                members.join(" -> ")
            );
        }

        let assembler: MetadataAssembler = self.ctx.resolve();
        let synthesizer: ScopeSynthesizer = self.ctx.resolve();
        let emitter: ArtifactEmitter = self.ctx.resolve();

        let mut report = RunReport {
            models: models.len(),
            skipped,
            ..RunReport::default()
        };

        for model in &models {
            let emitted = assembler.assemble(model, &names).and_then(|metadata| {
                let scope = synthesizer.plan(model)?;
                emitter.emit(model, &metadata, &scope, filer)
            });

            match emitted {
                Ok(emitted) => {
                    report.written.extend(emitted.written);
                    report.failed_writes += emitted.failed;
                }
                Err(_) => report.skipped += 1,
            }
        }

        report.diagnostics = self.ctx.diagnostics.snapshot();
        tracing::info!(
            "Generated {} files from {} components ({} skipped)",
            report.written.len(),
            report.models,
            report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    use crate::codegen::JavaFile;
    use crate::config::{Config, NamingConfig};
    use crate::filer::MemoryFiler;
    use crate::manifest::Manifest;
    use crate::models::{Annotation, DeclarationKind, TaggedDeclaration};
    use crate::resolver::StructuralResolver;

    const PACKAGE: &str = "com.github.alexdochioiu.daggersharpener";

    fn component() -> Annotation {
        Annotation::new(Marker::Component.qualified_name(PACKAGE))
    }

    fn run(declarations: Vec<TaggedDeclaration>) -> (Result<RunReport, AppError>, MemoryFiler) {
        let manifest = Manifest::new(declarations);
        let generator =
            Generator::new(GenerationContext::new(Config::default(), manifest.resolver())).unwrap();
        let mut filer = MemoryFiler::new();
        let result = generator.run(&manifest, &mut filer);
        (result, filer)
    }

    #[test]
    fn test_invalid_pattern_fails_initialization() {
        let config = Config {
            naming: NamingConfig {
                component_pattern: "Component".to_string(),
                ..NamingConfig::default()
            },
            ..Config::default()
        };
        let ctx = GenerationContext::new(config, Arc::new(StructuralResolver));
        let diagnostics = ctx.diagnostics.clone();

        let err = Generator::new(ctx).err().unwrap();

        assert!(matches!(err, AppError::Initialization(_)));
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_invalid_framework_type_fails_initialization() {
        let mut config = Config::default();
        config.framework.component = "dagger..Component".to_string();
        let ctx = GenerationContext::new(config, Arc::new(StructuralResolver));

        assert!(matches!(Generator::new(ctx), Err(AppError::Initialization(_))));
    }

    #[test]
    fn test_non_class_aborts_batch() {
        let (result, filer) = run(vec![
            TaggedDeclaration::new("com.example.Foo", DeclarationKind::Class)
                .with_annotation(component()),
            TaggedDeclaration::new("com.example.Foo.start", DeclarationKind::Method)
                .with_annotation(component()),
            TaggedDeclaration::new("com.example.Bar", DeclarationKind::Class)
                .with_annotation(component()),
        ]);

        assert!(matches!(result, Err(AppError::InvalidTarget { .. })));
        assert!(filer.is_empty());
    }

    #[test]
    fn test_build_models_keeps_discovery_order() {
        let declarations = vec![
            TaggedDeclaration::new("com.example.B", DeclarationKind::Class)
                .with_annotation(component()),
            TaggedDeclaration::new("com.example.A", DeclarationKind::Class)
                .with_annotation(component()),
        ];

        let generator = Generator::new(GenerationContext::new(
            Config::default(),
            Arc::new(StructuralResolver),
        ))
        .unwrap();

        let (models, skipped) = generator.build_models(&declarations).unwrap();

        let names: Vec<&str> = models.iter().map(|m| m.simple_name()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_malformed_scope_skips_only_that_declaration() {
        let (result, filer) = run(vec![
            TaggedDeclaration::new("com.example.Bad", DeclarationKind::Class)
                .with_annotation(component())
                .with_annotation(Annotation::new(Marker::Scope.qualified_name(PACKAGE)))
                .with_annotation(Annotation::new(Marker::NoScope.qualified_name(PACKAGE))),
            TaggedDeclaration::new("com.example.Good", DeclarationKind::Class)
                .with_annotation(component()),
        ]);

        let report = result.unwrap();
        assert_eq!(report.models, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.has_errors());
        assert!(filer.get("com/example/SharpGoodComponent.java").is_some());
        assert!(filer.get("com/example/SharpBadComponent.java").is_none());
    }

    #[test]
    fn test_cycles_are_reported_but_generated() {
        let (result, filer) = run(vec![
            TaggedDeclaration::new("com.example.A", DeclarationKind::Class).with_annotation(
                component().with_values("sharpDependencies", ["com.example.B.class"]),
            ),
            TaggedDeclaration::new("com.example.B", DeclarationKind::Class).with_annotation(
                component().with_values("sharpDependencies", ["com.example.A.class"]),
            ),
        ]);

        let report = result.unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0]
            .message
            .contains("com.example.A -> com.example.B"));
        assert!(filer.get("com/example/SharpAComponent.java").is_some());
        assert!(filer.get("com/example/SharpBComponent.java").is_some());
    }

    /// Fails every write whose path ends with the given file name.
    struct FailingFiler {
        inner: MemoryFiler,
        fail_on: &'static str,
    }

    impl Filer for FailingFiler {
        fn write(&mut self, file: &JavaFile) -> io::Result<PathBuf> {
            if file.relative_path().ends_with(self.fail_on) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.inner.write(file)
        }
    }

    #[test]
    fn test_failed_component_write_continues_with_next_model() {
        let manifest = Manifest::new(vec![
            TaggedDeclaration::new("com.example.A", DeclarationKind::Class)
                .with_annotation(component())
                .with_annotation(Annotation::new(Marker::NoScope.qualified_name(PACKAGE))),
            TaggedDeclaration::new("com.example.B", DeclarationKind::Class)
                .with_annotation(component()),
        ]);
        let generator =
            Generator::new(GenerationContext::new(Config::default(), manifest.resolver())).unwrap();
        let mut filer = FailingFiler {
            inner: MemoryFiler::new(),
            fail_on: "SharpAComponent.java",
        };

        let report = generator.run(&manifest, &mut filer).unwrap();

        assert_eq!(report.failed_writes, 1);
        assert!(report.has_errors());
        assert_eq!(report.skipped, 0);
        assert!(filer.inner.get("com/example/SharpAComponent.java").is_none());
        assert!(filer.inner.get("com/example/SharpBComponent.java").is_some());
        assert!(filer.inner.get("com/example/SharpBScope.java").is_some());
        assert_eq!(
            report.written,
            vec![
                PathBuf::from("com/example/SharpBScope.java"),
                PathBuf::from("com/example/SharpBComponent.java"),
            ]
        );
    }

    #[test]
    fn test_stray_scope_marker_warns() {
        let (result, filer) = run(vec![TaggedDeclaration::new(
            "com.example.Lonely",
            DeclarationKind::Class,
        )
        .with_annotation(Annotation::new(Marker::NoScope.qualified_name(PACKAGE)))]);

        let report = result.unwrap();
        assert_eq!(report.models, 0);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        assert!(filer.is_empty());
    }
}
