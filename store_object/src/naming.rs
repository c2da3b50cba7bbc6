//! Table and index name derivation
//!
//! Names are pure functions of a record's type path and the field paths being
//! indexed, so `CREATE ... IF NOT EXISTS` statements stay idempotent across
//! process runs.

use std::fmt;

/// Root marker that starts every field path (`$.name`)
const PATH_ROOT: char = '$';

/// SQLite has no hard identifier limit; this keeps generated names readable.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validation errors for derived identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name contains characters other than lowercase ascii letters, digits and underscores
    InvalidCharacters(String),
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    Empty,
    /// Name must start with a letter or underscore
    InvalidStartCharacter(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(f, "Invalid characters in name '{}': only lowercase alphanumeric characters and underscores are allowed", name)
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Name '{}' is too long: {} characters (max {})",
                    name, length, max_length
                )
            }
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that a derived table name is safe to quote into SQL.
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !first_char.is_ascii_lowercase() && first_char != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    Ok(())
}

/// Strip reference and raw-pointer sigils so `&Foo` and `*const Foo` name `Foo`.
fn strip_pointer(mut path: &str) -> &str {
    loop {
        let trimmed = path.trim_start();
        let next = trimmed
            .strip_prefix("&mut ")
            .or_else(|| trimmed.strip_prefix('&'))
            .or_else(|| trimmed.strip_prefix("*const "))
            .or_else(|| trimmed.strip_prefix("*mut "));
        match next {
            Some(rest) => path = rest,
            None => return trimmed,
        }
    }
}

/// Last two segments of a `::`-separated path (`module::Type`).
fn qualified_tail(path: &str) -> Vec<&str> {
    let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].to_vec()
}

/// Derive a table name from a Rust type path.
///
/// `nosqlite::Foo`, `&nosqlite::Foo` and `app::nosqlite::Foo` all yield
/// `nosqlite_foo`. Generic arguments contribute their own short names:
/// `app::Envelope<app::models::User>` yields `app_envelope_models_user`.
pub fn table_name_from_type_path(type_path: &str) -> String {
    let path = strip_pointer(type_path);

    let (base, generics) = match path.find('<') {
        Some(pos) => (&path[..pos], Some(&path[pos + 1..path.rfind('>').unwrap_or(path.len())])),
        None => (path, None),
    };

    let mut parts: Vec<String> = qualified_tail(base)
        .into_iter()
        .map(str::to_string)
        .collect();

    if let Some(generics) = generics {
        for argument in split_generic_arguments(generics) {
            parts.push(table_name_from_type_path(argument));
        }
    }

    let joined = parts.join("_").to_lowercase();
    joined
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Split `A, B<C, D>` at top-level commas only.
fn split_generic_arguments(arguments: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in arguments.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(arguments[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = arguments[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Turn a field path into an index-name fragment.
///
/// Drops a single leading root marker, then maps `.` to `__` and spaces to
/// `_`: `$.name.first` becomes `name__first`. Distinct paths may still
/// collide (`$.a b` and `$.a_b`).
pub fn escape_field_name(field: &str) -> String {
    let without_root = match field.strip_prefix(PATH_ROOT) {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => field,
    };

    without_root.replace('.', "__").replace(' ', "_")
}

pub fn join_escaped_field_names(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| escape_field_name(field))
        .collect::<Vec<_>>()
        .join("_")
}

/// `idx_<table>_<escaped fields>`
pub fn index_name(table_name: &str, fields: &[&str]) -> String {
    format!("idx_{}_{}", table_name, join_escaped_field_names(fields))
}
