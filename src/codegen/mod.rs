//! Java source model and rendering.
//!
//! A small declarative model of the two kinds of files the generator writes
//! (an interface and an annotation type), rendered with deterministic
//! imports and layout so identical input always yields identical bytes.

mod imports;
mod spec;

pub use imports::ImportScope;
pub use spec::{
    AnnotationMember, AnnotationSpec, JavaFile, MethodSpec, ParameterSpec, TypeKind, TypeSpec,
};
