//! DaggerSharpener - Dagger component generator
//!
//! Turns classes tagged with `@SharpComponent` into Dagger component
//! interfaces and, where needed, dedicated scope annotations.

pub mod cli;
pub mod codegen;
pub mod config;
pub mod context;
pub mod di;
pub mod diagnostics;
pub mod error;
pub mod filer;
pub mod manifest;
pub mod markers;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod services;

// Re-export FromRef at crate root for sharpener-macros generated code
pub use di::FromRef;
