//! `#[stack_trace_debug]` generates a `Debug` impl for Snafu error enums that
//! renders the `Display` message followed by the capture site of whichever
//! variant is live, instead of the derive-generated field dump.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_attribute]
pub fn stack_trace_debug(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input, "stack_trace_debug only supports enums")
            .to_compile_error()
            .into();
    };

    let arms = data.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let has_location = match &variant.fields {
            Fields::Named(fields) => fields.named.iter().any(|f| {
                f.ident
                    .as_ref()
                    .is_some_and(|ident| ident == "location")
            }),
            _ => false,
        };

        if has_location {
            quote! {
                #name::#variant_name { location, .. } => {
                    write!(f, "{self}\n  at {location}")
                }
            }
        } else {
            quote! {
                #name::#variant_name { .. } => write!(f, "{self}"),
            }
        }
    });

    let expanded = quote! {
        #input

        impl #impl_generics std::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    #(#arms)*
                }
            }
        }
    };

    expanded.into()
}
