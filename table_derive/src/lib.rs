//! Procedural macros for binding record types to document tables
//!
//! This crate provides the `Document` derive, which registers a record's type
//! path at compile time so its table name does not depend on runtime type
//! names, and the `#[model]` attribute that adds the usual derives in one go.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod model_macro;
mod parsing;

use codegen::generate_document_impl;
use model_macro::model_attribute;
use parsing::parse_document_attributes;

/// Derive macro for the `store_object::Document` trait
///
/// The table name is `<module>_<type>` in lowercase, taken from the module
/// the struct is declared in. `#[document(name = "...")]` replaces it with an
/// explicit name, validated at compile time.
///
/// ```ignore
/// use table_derive::Document;
///
/// mod nosqlite {
///     #[derive(serde::Serialize, serde::Deserialize, table_derive::Document)]
///     pub struct Foo {
///         pub name: String,
///     }
/// }
///
/// // stored in table `nosqlite_foo`
///
/// #[derive(serde::Serialize, serde::Deserialize, Document)]
/// #[document(name = "people")]
/// pub struct Person {
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let info = match parse_document_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_document_impl(&input, &info))
}

/// Convenience attribute macro that adds `Debug`, `Clone`, serde and
/// `Document` derives to a record struct
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
