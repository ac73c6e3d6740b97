pub mod favorites;
pub mod filter;
pub mod record;
pub mod store;

pub use favorites::FavoritesLedger;
pub use record::Record;
pub use store::{load_catalog, append_entry, CatalogReport, EntryError, NewEntry};
