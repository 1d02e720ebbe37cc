//! Service wiring.
//!
//! Every generator service is built from the per-run [`GenerationContext`]
//! through the `FromRef` trait and the derive macros from `sharpener-macros`.
//!
//! - `FromRef<T>`: extract a value from a reference to `T`
//! - `#[derive(Context)]`: makes each field of the context extractable
//! - `#[derive(FromContext)]`: builds a service by extracting each field
//!
//! # Example
//!
//! ```ignore
//! use crate::di::FromContext;
//!
//! #[derive(FromContext, Clone)]
//! pub struct ScopeSynthesizer {
//!     config: Arc<Config>,     // context member
//!     naming: NamingResolver,  // another FromContext service
//! }
//!
//! let synthesizer: ScopeSynthesizer = ctx.resolve();
//! ```
//!
//! [`GenerationContext`]: crate::context::GenerationContext

/// Extracts a value from a reference to another type.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use sharpener_macros::{Context, FromContext};
