//! Compile-time service wiring macros for sharpener.
//!
//! The generator's services are assembled from a single per-run context:
//! - `#[derive(Context)]` makes each field of the context extractable
//! - `#[derive(FromContext)]` builds a service by extracting each of its fields
//!
//! Generated code references `crate::FromRef`, which the consuming crate
//! re-exports at its root.

use proc_macro::TokenStream;

mod context;
mod from_context;

/// Derive macro for the per-run generation context.
///
/// Generates one `FromRef` implementation per field type and an inherent
/// `resolve::<T>()` helper that builds any `T: FromRef<Self>` from the context.
///
/// # Requirements
///
/// - All fields must implement `Clone`
/// - No two fields may share a type (the extraction would be ambiguous)
///
/// # Example
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct GenerationContext {
///     pub config: Arc<Config>,
///     pub diagnostics: Diagnostics,
/// }
///
/// let builder: ModelBuilder = ctx.resolve();
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for services that are built from the generation context.
///
/// Each field is resolved with `FromRef::from_ref`, so fields may be context
/// members or other `FromContext` services.
///
/// The context type defaults to `crate::context::GenerationContext` and can
/// be overridden with `#[from_context(context = path::To::Context)]`.
///
/// # Example
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct MetadataAssembler {
///     naming: NamingResolver,   // itself FromContext
///     resolver: SharedResolver, // context member
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
