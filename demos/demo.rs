//! Quick tour of DocStore: tables, indexes, clauses, pagination and transactions.
//!
//! Run with `cargo run --example demo`. Set `DOCSTORE_CONFIG` to a TOML file
//! to use a specific database, otherwise a temporary file is used.

use docstore::prelude::*;

mod library {
    use docstore::prelude::*;

    #[model]
    pub struct Book {
        pub id: i64,
        pub title: String,
        pub year: i64,
        pub tags: Vec<String>,
    }
}

use library::Book;

fn book(id: i64, title: &str, year: i64, tags: &[&str]) -> Book {
    Book {
        id,
        title: title.to_string(),
        year,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join("docstore-demo");
    std::fs::create_dir_all(&dir)?;

    let store = match AppConfig::load() {
        Ok(config) => DocStore::from_config(&config).await?,
        Err(_) => {
            let path = dir.join("demo.db");
            DocStore::new(DatabaseConfig::new(path.to_string_lossy().to_string())).await?
        }
    };
    store.health_check().await?;

    let ctx = Context::background();
    let books = store.table::<Book>(&ctx).await?;
    println!("Table: {}", books.name());

    books.delete(&ctx, &all()).await?;
    let index = books.create_index(&ctx, &["$.year"]).await?;
    println!("Index: {} (exists: {})", index, books.has_index(&ctx, &index).await?);

    books
        .insert_many(
            &ctx,
            &[
                book(1, "Dune", 1965, &["scifi", "classic"]),
                book(2, "Neuromancer", 1984, &["scifi", "cyberpunk"]),
                book(3, "Emma", 1815, &["classic"]),
                book(4, "Snow Crash", 1992, &["cyberpunk"]),
            ],
        )
        .await?;

    let modern_scifi = books
        .query_many(
            &ctx,
            &greater_than("$.year", 1950).and(contains("$.tags", "scifi")),
        )
        .await?;
    println!("Modern scifi: {:?}", modern_scifi.iter().map(|b| &b.title).collect::<Vec<_>>());

    let page = books
        .query_many_with_pagination(&ctx, &all(), 2, 1)
        .await?;
    println!("Second page: {:?}", page.iter().map(|b| &b.title).collect::<Vec<_>>());

    let tx = store.begin(&ctx).await?;
    let view = books.with_transaction(&tx);
    view.update(&ctx, &equal("$.id", 3), &book(3, "Emma", 1815, &["classic", "romance"]))
        .await?;
    view.delete(&ctx, &contains_any("$.tags", ["cyberpunk"])).await?;
    tx.commit().await?;

    println!(
        "After transaction: {} books, {} classics",
        books.count(&ctx).await?,
        books.count_where(&ctx, &contains("$.tags", "classic")).await?
    );

    store.close().await;
    Ok(())
}
