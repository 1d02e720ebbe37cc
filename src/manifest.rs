//! Declaration manifests exported by the host build tool.
//!
//! ```json
//! {
//!   "known_types": ["com.example.Bar", "com.example.FooModule"],
//!   "declarations": [
//!     {
//!       "name": "com.example.Foo",
//!       "kind": "class",
//!       "annotations": [
//!         {
//!           "name": "com.github.alexdochioiu.daggersharpener.SharpComponent",
//!           "values": { "provides": ["com.example.Bar.class"] }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! When `known_types` is present, every reference must name a known type or
//! a declaration of the manifest; otherwise references are only checked for
//! syntax.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::markers::DeclarationSource;
use crate::models::TaggedDeclaration;
use crate::resolver::{KnownTypes, SharedResolver, StructuralResolver};

/// Declarations visible to one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_types: Option<Vec<String>>,
    #[serde(default)]
    pub declarations: Vec<TaggedDeclaration>,
}

impl Manifest {
    pub fn new(declarations: Vec<TaggedDeclaration>) -> Self {
        Self {
            known_types: None,
            declarations,
        }
    }

    /// Reads a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the type resolver matching this manifest.
    pub fn resolver(&self) -> SharedResolver {
        match &self.known_types {
            Some(types) => {
                let mut known = KnownTypes::new(types.iter().cloned());
                for decl in &self.declarations {
                    known.insert(decl.name.clone());
                }
                Arc::new(known)
            }
            None => Arc::new(StructuralResolver),
        }
    }
}

impl DeclarationSource for Manifest {
    fn annotated_with(&self, annotation: &str) -> Vec<&TaggedDeclaration> {
        self.declarations.annotated_with(annotation)
    }
}
