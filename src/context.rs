//! Per-run generation context.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::diagnostics::Diagnostics;
use crate::resolver::SharedResolver;

/// Root of service wiring for one generation run.
///
/// Created once per run; services built from it share the same config,
/// diagnostic sink and type resolver.
#[derive(ContextDerive, Clone)]
pub struct GenerationContext {
    pub config: Arc<Config>,
    pub diagnostics: Diagnostics,
    pub resolver: SharedResolver,
}

impl GenerationContext {
    /// Creates a context with a fresh diagnostic sink.
    pub fn new(config: Config, resolver: SharedResolver) -> Self {
        Self {
            config: Arc::new(config),
            diagnostics: Diagnostics::new(),
            resolver,
        }
    }
}
