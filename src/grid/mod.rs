//! Generic list-view engine
//!
//! Everything list-shaped in Tiller - the entity `list` commands and the
//! interactive `browse` mode - runs on this module: a pure pipeline
//! (search -> filter -> sort -> paginate) over opaque rows, plus persisted
//! column layout and an owning view state. The pipeline stages are plain
//! functions over source-row indices, so the engine never copies or mutates
//! the records it is given.

pub mod columns;
pub mod debounce;
pub mod filter;
pub mod page;
pub mod prefs;
pub mod record;
pub mod sort;
pub mod state;

pub use columns::{ColumnDef, ColumnLayout, ToggleAll};
pub use debounce::Debouncer;
pub use filter::{filter_rows, Filter, FilterSet};
pub use page::{page_slice, total_pages};
pub use prefs::{MemoryStore, PrefsStore, SqliteStore, StoreError};
pub use record::{Row, Value};
pub use sort::{cycle, sort_rows, Direction, SortSpec};
pub use state::{ListView, ViewConfig};
