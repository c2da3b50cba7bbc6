//! Item module
//!
//! Envelope that stores a record together with creation and update times.

use crate::traits::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record plus timestamps, stored as `{"data": .., "created": .., "updated": ..}`.
///
/// Clauses reach the wrapped record through `$.data.*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<T> {
    pub data: T,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl<T> Item<T> {
    /// Wrap `data` with both timestamps set to now
    pub fn new(data: T) -> Self {
        let now = Utc::now();
        Self {
            data,
            created: now,
            updated: now,
        }
    }

    /// Replace the record and bump `updated`
    pub fn replace(&mut self, data: T) {
        self.data = data;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> From<T> for Item<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

/// Items live next to their record type's table: `<table>_item`.
impl<T: Document> Document for Item<T> {
    fn table_name() -> String {
        format!("{}_item", T::table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nosqlite {
        use super::*;

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Foo {
            pub name: String,
        }

        impl Document for Foo {}
    }

    #[test]
    fn test_item_table_name() {
        assert_eq!(Item::<nosqlite::Foo>::table_name(), "nosqlite_foo_item");
    }

    #[test]
    fn test_item_layout() {
        let item = Item::new(nosqlite::Foo {
            name: "a".to_string(),
        });
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["data"]["name"], "a");
        assert!(value.get("created").is_some());
        assert!(value.get("updated").is_some());
    }

    #[test]
    fn test_replace_bumps_updated() {
        let mut item = Item::new(nosqlite::Foo {
            name: "a".to_string(),
        });
        let created = item.created;
        item.replace(nosqlite::Foo {
            name: "b".to_string(),
        });
        assert_eq!(item.data.name, "b");
        assert_eq!(item.created, created);
        assert!(item.updated >= created);
    }
}
