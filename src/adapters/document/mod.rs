//! Document adapters - Rendering backends for policy HTML.
//!
//! - `PandocConverter` - HTML to PDF / DOCX through the Pandoc executable

mod pandoc_converter;

pub use pandoc_converter::PandocConverter;
