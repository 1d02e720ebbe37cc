//! Implementation of #[derive(Context)].

use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

pub fn derive_context_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Context requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Context can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    // Two fields of one type would generate overlapping FromRef impls.
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let key = field.ty.to_token_stream().to_string();
        if let Some(previous) = seen.insert(key, ident) {
            return syn::Error::new_spanned(
                &field.ty,
                format!(
                    "field `{}` has the same type as field `{}`; wrap one of them in a newtype",
                    ident, previous
                ),
            )
            .to_compile_error()
            .into();
        }
    }

    let extractors = fields.iter().filter_map(|field| {
        let field_name = field.ident.as_ref()?;
        let field_type = &field.ty;

        Some(quote! {
            impl #impl_generics crate::FromRef<#name #ty_generics> for #field_type #where_clause {
                fn from_ref(ctx: &#name #ty_generics) -> Self {
                    ::core::clone::Clone::clone(&ctx.#field_name)
                }
            }
        })
    });

    let expanded = quote! {
        #(#extractors)*

        impl #impl_generics #name #ty_generics #where_clause {
            /// Builds any value that can be extracted from this context.
            pub fn resolve<T: crate::FromRef<Self>>(&self) -> T {
                <T as crate::FromRef<Self>>::from_ref(self)
            }
        }
    };

    TokenStream::from(expanded)
}
