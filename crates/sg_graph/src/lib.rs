#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod copy;
mod crawl;
mod error;
mod ser;
mod walk;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use copy::Copier;
pub use crawl::{CrawlAction, crawl_components, crawl_properties};
pub use error::GraphError;
pub use ser::Serializer;
pub use walk::{GraphVisitor, walk};
