//! Extractors: one `FundsSource` per configured portal or open-data endpoint.

pub mod base;
pub mod data_gouv;
pub mod factory;
pub mod fallback;
pub mod parsers;
pub mod profile;
pub mod territories;

pub use base::{BaseScraper, FundsSource, SourceParser};
pub use factory::{create_source, sources_for_territory};
