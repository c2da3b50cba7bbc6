//! Code generation for `Document` implementations

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parsing::DocumentInfo;

pub fn generate_document_impl(input: &DeriveInput, info: &DocumentInfo) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Generic records keep the runtime type name so each instantiation gets
    // its own table.
    let type_path_fn = if input.generics.params.is_empty() {
        quote! {
            fn type_path() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(concat!(module_path!(), "::", stringify!(#name)))
            }
        }
    } else {
        quote! {}
    };

    let table_name_fn = match &info.table_name {
        Some(table_name) => quote! {
            fn table_name() -> String {
                #table_name.to_string()
            }
        },
        None => quote! {},
    };

    quote! {
        impl #impl_generics store_object::Document for #name #ty_generics #where_clause {
            #type_path_fn
            #table_name_fn
        }
    }
}
