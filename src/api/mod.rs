//! High-level, ergonomic library API: one entrypoint per batch pipeline, each
//! taking its parameter struct and returning a report. Prefer these over the
//! low-level `core` and `io` building blocks when integrating cardsmith.
pub mod extract;
pub mod generate;
pub mod slice;

pub use extract::{ExtractReport, extract_images};
pub use generate::{GenerateReport, compose_pages, generate_cards};
pub use slice::{SliceReport, slice_documents};
