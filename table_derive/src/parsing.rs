//! Parsing utilities for the `#[document]` attribute
//!
//! This module reads the optional table name override and validates it with
//! the same rules the runtime applies to derived names.

use syn::{Attribute, Error, LitStr, Result};

/// Longest table name accepted, matching `store_object::naming`
const MAX_IDENTIFIER_LENGTH: usize = 128;

#[derive(Debug, Default)]
pub struct DocumentInfo {
    /// `#[document(name = "...")]`
    pub table_name: Option<String>,
}

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validation logic that mirrors store_object::naming::validate_identifier
/// so compile-time checks match runtime checks
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(format!(
            "Name '{}' is too long: {} characters (max {})",
            name,
            name.len(),
            MAX_IDENTIFIER_LENGTH
        ));
    }

    if !first_char.is_ascii_lowercase() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(format!("Name '{}' contains invalid characters: only lowercase alphanumeric characters and underscores are allowed", name));
    }

    Ok(())
}

pub fn parse_document_attributes(attrs: &[Attribute]) -> Result<DocumentInfo> {
    let mut info = DocumentInfo::default();

    for attr in attrs {
        if !attr.path().is_ident("document") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                validate_table_name_syn(&lit.value(), lit.span())?;
                if info.table_name.is_some() {
                    return Err(meta.error("duplicate `name` in #[document(...)]"));
                }
                info.table_name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported document attribute, expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("nosqlite_foo").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1foo").is_err());
        assert!(validate_identifier("Foo").is_err());
        assert!(validate_identifier("foo-bar").is_err());
        assert!(validate_identifier(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_parse_without_attribute() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[derive(Debug)])];
        let info = parse_document_attributes(&attrs).unwrap();
        assert!(info.table_name.is_none());
    }

    #[test]
    fn test_parse_name_override() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[document(name = "people")])];
        let info = parse_document_attributes(&attrs).unwrap();
        assert_eq!(info.table_name.as_deref(), Some("people"));
    }

    #[test]
    fn test_parse_rejects_invalid_name() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[document(name = "Bad Name")])];
        assert!(parse_document_attributes(&attrs).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[document(table = "people")])];
        assert!(parse_document_attributes(&attrs).is_err());
    }
}
