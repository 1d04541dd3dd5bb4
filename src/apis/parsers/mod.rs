pub mod portal;

pub use portal::PortalParser;
