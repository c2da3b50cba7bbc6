use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Convenience attribute macro that adds the derives a stored record needs
///
/// Usage:
/// ```ignore
/// use table_derive::{model, Document};
///
/// #[model]
/// #[document(name = "users")]
/// pub struct User {
///     pub id: i64,
///     pub name: String,
/// }
/// ```
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    if !matches!(input.data, Data::Struct(_)) {
        return Error::new_spanned(&input.ident, "model can only be used on structs")
            .to_compile_error()
            .into();
    }

    let expanded = quote! {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Document)]
        #input
    };

    TokenStream::from(expanded)
}
