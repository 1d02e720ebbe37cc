//! Extraction of component models from tagged declarations.

use std::sync::Arc;

use crate::config::{Config, UnscopedPolicy};
use crate::di::FromContext;
use crate::diagnostics::Diagnostics;
use crate::error::AppError;
use crate::markers::{Marker, MarkerSet};
use crate::models::{ComponentModel, ScopeInput, ScopeResolution, TaggedDeclaration, TypeRef};
use crate::resolver::SharedResolver;

/// Builds one [`ComponentModel`] per tagged declaration.
///
/// Errors are reported to the diagnostic sink before they are returned.
#[derive(FromContext, Clone)]
pub struct ModelBuilder {
    config: Arc<Config>,
    diagnostics: Diagnostics,
    resolver: SharedResolver,
}

impl ModelBuilder {
    /// Builds the model for `declaration`.
    ///
    /// A declaration that is not a class yields [`AppError::InvalidTarget`],
    /// which callers treat as fatal for the whole batch.
    pub fn build(&self, declaration: &TaggedDeclaration) -> Result<ComponentModel, AppError> {
        self.extract(declaration).map_err(|err| {
            self.diagnostics.error(&err);
            err
        })
    }

    fn extract(&self, declaration: &TaggedDeclaration) -> Result<ComponentModel, AppError> {
        if !declaration.kind.is_class() {
            return Err(AppError::InvalidTarget {
                name: declaration.simple_name().to_string(),
                kind: declaration.kind,
            });
        }

        let target = match &declaration.package {
            Some(package) => TypeRef::parse_in(&declaration.name, package)?,
            None => TypeRef::parse(&declaration.name)?,
        };
        let markers = MarkerSet::new(self.config.markers.package.clone());
        let scope = self.resolve_scope(self.scope_input(declaration, &markers)?);

        let component = declaration.annotation(&markers.name(Marker::Component));
        let list = |member: &str| component.map(|a| a.list(member)).unwrap_or_default();

        let model = ComponentModel {
            target,
            scope,
            modules: list(Marker::MODULES),
            dependencies: list(Marker::DEPENDENCIES),
            sharp_dependencies: list(Marker::SHARP_DEPENDENCIES),
            provides: list(Marker::PROVIDES),
        };

        tracing::debug!(
            "Built model for {}: {} modules, {} dependencies, {} sharp dependencies, {} provides",
            model.target,
            model.modules.len(),
            model.dependencies.len(),
            model.sharp_dependencies.len(),
            model.provides.len()
        );

        Ok(model)
    }

    /// Classifies the scope information present on `declaration`.
    ///
    /// At most one of `SharpScope`, `NoScope` and an external scope
    /// annotation may be present.
    pub fn scope_input(
        &self,
        declaration: &TaggedDeclaration,
        markers: &MarkerSet,
    ) -> Result<ScopeInput, AppError> {
        let sharp = markers.is_tagged(declaration, Marker::Scope);
        let none = markers.is_tagged(declaration, Marker::NoScope);

        let marker_names: Vec<String> = Marker::all().iter().map(|m| markers.name(*m)).collect();
        let external: Vec<&str> = declaration
            .scope_annotations()
            .map(|a| a.name.as_str())
            .filter(|name| !marker_names.iter().any(|m| m == name))
            .collect();

        if external.len() > 1 {
            return Err(AppError::MalformedScope {
                name: declaration.name.clone(),
                reason: format!("multiple scope annotations: {}", external.join(", ")),
            });
        }

        let mut present = Vec::new();
        if sharp {
            present.push(Marker::Scope.simple_name().to_string());
        }
        if none {
            present.push(Marker::NoScope.simple_name().to_string());
        }
        present.extend(external.iter().map(|name| name.to_string()));

        if present.len() > 1 {
            return Err(AppError::MalformedScope {
                name: declaration.name.clone(),
                reason: format!("conflicting scope declarations: {}", present.join(", ")),
            });
        }

        Ok(match (sharp, none, external.first()) {
            (true, _, _) => ScopeInput::Sharp,
            (_, true, _) => ScopeInput::NoScope,
            (_, _, Some(name)) => ScopeInput::External(self.resolver.resolve(name)?),
            _ => ScopeInput::Absent,
        })
    }

    /// Applies the unscoped policy to a scope input.
    pub fn resolve_scope(&self, input: ScopeInput) -> ScopeResolution {
        match input {
            ScopeInput::Sharp => ScopeResolution::Synthesize,
            ScopeInput::NoScope => ScopeResolution::Unscoped,
            ScopeInput::External(ty) => ScopeResolution::External(ty),
            ScopeInput::Absent => match self.config.scope.unscoped {
                UnscopedPolicy::Synthesize => ScopeResolution::Synthesize,
                UnscopedPolicy::None => ScopeResolution::Unscoped,
            },
        }
    }
}
