//! Binding record types to tables

use crate::naming::table_name_from_type_path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// A record type stored as one JSON document per row.
///
/// The table name is derived from [`Document::type_path`], which defaults to
/// the compiler's type name. Deriving with `#[derive(Document)]` registers the
/// path at compile time instead and accepts a `#[document(name = "...")]`
/// override:
///
/// ```ignore
/// use table_derive::Document;
///
/// #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Document)]
/// pub struct Foo {
///     pub name: String,
/// }
///
/// // In module `nosqlite`, Foo is stored in table `nosqlite_foo`.
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Qualified type path the table name is derived from
    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Physical table name: lowercase, `::` flattened to `_`
    fn table_name() -> String {
        table_name_from_type_path(&Self::type_path())
    }
}

/// A boxed record shares its table with the unboxed type.
impl<T: Document> Document for Box<T> {
    fn type_path() -> Cow<'static, str> {
        T::type_path()
    }

    fn table_name() -> String {
        T::table_name()
    }
}

/// Table name for `T`, shorthand for `T::table_name()`
pub fn table_name<T: Document>() -> String {
    T::table_name()
}
