//! Implementation of #[derive(FromContext)].

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

pub fn derive_from_context_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let context_type = match parse_context_type(&input) {
        Ok(ty) => ty,
        Err(err) => return err.to_compile_error().into(),
    };

    let initializer = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let inits = fields.named.iter().filter_map(|field| {
                    let field_name = field.ident.as_ref()?;
                    let field_type = &field.ty;
                    Some(quote! {
                        #field_name: <#field_type as crate::FromRef<#context_type>>::from_ref(ctx)
                    })
                });
                quote! { Self { #(#inits),* } }
            }
            Fields::Unit => quote! { Self },
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    &input,
                    "FromContext requires named fields so each one can be resolved by type",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "FromContext can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics crate::FromRef<#context_type> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &#context_type) -> Self {
                #initializer
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[from_context(context = path::To::Context)]`.
fn parse_context_type(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let mut context_ty: Option<syn::Path> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("from_context")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("context") {
                context_ty = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `context = <type path>`"))
            }
        })?;
    }

    Ok(match context_ty {
        Some(path) => quote! { #path },
        None => quote! { crate::context::GenerationContext },
    })
}
