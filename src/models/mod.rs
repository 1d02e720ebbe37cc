//! Data model for tagged declarations and the components built from them.

mod component;
mod declaration;
mod type_ref;

pub use component::{ComponentModel, ScopeInput, ScopeResolution};
pub use declaration::{Annotation, AnnotationValue, DeclarationKind, TaggedDeclaration};
pub use type_ref::{is_java_identifier, TypeRef, TypeRefError};
