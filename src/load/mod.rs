//! The load pipeline - normalize line-delimited JSON sources into SQLite.
//!
//! Data flows reader -> extractor -> driver: [`reader::JsonLines`] turns a
//! source file into parsed records, [`extractor::extract`] projects each
//! record through its source's [`types::SourceSpec`], and
//! [`driver::load_source`] writes the result inside a per-record savepoint,
//! counting whatever fails along the way.

pub mod driver;
pub mod error;
pub mod extractor;
pub mod reader;
pub mod schema;
pub mod types;

pub use driver::{load_all, load_source};
pub use error::RecordError;
pub use extractor::{extract, RecipeDraft};
pub use reader::JsonLines;
pub use types::{LoadConfig, RecipeAttr, SourceReport, SourceSpec, SOURCES};
