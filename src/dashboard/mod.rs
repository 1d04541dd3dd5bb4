//! Filtering, aggregation and export over a normalized table.

pub mod cache;
pub mod export;
pub mod filter;
pub mod summary;

pub use cache::RunCache;
pub use export::{export_filename, format_amount, write_csv};
pub use filter::{row_limit, FilterOptions, FilterParams, FundFilter};
pub use summary::{GroupStat, Summary};
