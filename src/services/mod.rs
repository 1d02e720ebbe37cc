//! Generator services.
//!
//! Each service is built from the generation context with the
//! `FromContext` derive macro and covers one step of the pipeline:
//! model building, naming, metadata assembly, scope synthesis and emission.

mod builder;
mod cycles;
mod emitter;
mod metadata;
mod naming;
mod scope;

pub use builder::ModelBuilder;
pub use cycles::find_cycles;
pub use emitter::{ArtifactEmitter, Emitted};
pub use metadata::{ComponentMetadata, MetadataAssembler};
pub use naming::{NameTable, NamingResolver, SharpName, PLACEHOLDER};
pub use scope::{ScopePlan, ScopeSynthesizer};
