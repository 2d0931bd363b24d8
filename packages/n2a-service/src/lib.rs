pub mod fetch;
pub mod sync;
pub mod upsert;

pub use fetch::{RecordPager, fetch};
pub use sync::{RuleReport, SyncReport, Syncer};
pub use upsert::{SyncResult, upsert};
