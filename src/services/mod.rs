pub mod claim_report;
pub mod claim_store;
pub mod item_filter;
pub mod items_table;
pub mod media;

pub use claim_report::ClaimReport;
pub use claim_store::ClaimStore;
pub use item_filter::{BeforeRule, ItemFilter};
pub use items_table::ItemsTable;
pub use media::{MediaCollector, MediaFile};
