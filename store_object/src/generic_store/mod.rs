pub mod core;
pub(crate) mod operations;
pub mod store_object;
pub mod transaction;

pub use self::core::Table;
pub use transaction::TableTx;
