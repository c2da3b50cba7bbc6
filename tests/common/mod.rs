//! Shared records and setup for the integration tests

#![allow(dead_code)]

use docstore::prelude::*;
use tempfile::TempDir;

pub mod nosqlite {
    use docstore::prelude::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    pub struct Bar {
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
    pub struct Foo {
        pub id: i64,
        pub name: String,
        pub bar: Bar,
        pub list: Vec<String>,
    }

    impl Foo {
        pub fn new(id: i64, name: &str, bar: &str, list: &[&str]) -> Self {
            Self {
                id,
                name: name.to_string(),
                bar: Bar {
                    name: bar.to_string(),
                },
                list: list.iter().map(|s| s.to_string()).collect(),
            }
        }
    }
}

/// Open a fresh database in a temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub async fn open_store() -> (TempDir, DocStore) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("docstore.db");
    let config = DatabaseConfig::new(path.to_string_lossy().to_string());
    let store = DocStore::new(config).await.expect("open store");
    (dir, store)
}

/// Ten records with ids 1..=10 and names `foo1`..`foo10`
pub fn numbered_foos() -> Vec<nosqlite::Foo> {
    (1..=10)
        .map(|i| nosqlite::Foo::new(i, &format!("foo{}", i), "bar", &[]))
        .collect()
}
