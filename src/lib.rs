//! # Larder - Recipe Dataset Loader
//!
//! A one-shot batch loader that normalizes heterogeneous line-delimited JSON
//! recipe dumps into a single relational SQLite schema (recipes, ingredients,
//! instructions, tags).
//!
//! ## Modules
//!
//! - **load**: the ETL pipeline - per-source field mapping, lazy NDJSON
//!   reading, schema bootstrap, and the fault-tolerant load driver
//! - **inspect**: ad hoc schema-discovery helpers over raw records
//!
//! ## Quick Start
//!
//! ### Extracting a record
//!
//! ```rust
//! use larder::load::{extract, SOURCES};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let allrecipes = SOURCES.iter().find(|s| s.name == "allrecipes").unwrap();
//!
//! let draft = extract(allrecipes, &json!({
//!     "title": "Pad Thai",
//!     "total_time_minutes": 35,
//!     "url": "https://example.com/pad-thai",
//!     "photo_url": "https://example.com/pad-thai.jpg",
//!     "ingredients": ["200g rice noodles", "2 eggs"],
//!     "instructions": ["Soak the noodles", "Fry everything"]
//! }))?;
//!
//! assert_eq!(draft.ingredients.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Loading everything
//!
//! ```rust,no_run
//! use larder::load::{load_all, schema, LoadConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = LoadConfig::all("data");
//! let mut conn = schema::open("recipes.db")?;
//!
//! for report in load_all(&mut conn, &config)? {
//!     println!("{}: {} loaded, {} failed", report.source, report.loaded, report.failed);
//! }
//! # Ok(())
//! # }
//! ```

pub mod inspect;
pub mod load;

// Re-export commonly used types for convenience
pub use inspect::{distinct_keys, unique_values, values};
pub use load::{
    extract, load_all, load_source, JsonLines, LoadConfig, RecipeDraft, RecordError, SourceReport,
    SourceSpec, SOURCES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn end_to_end_single_source() {
        let dir = tempfile::tempdir().unwrap();
        let record = json!({
            "title": "Toast",
            "total_time_minutes": 5,
            "url": "https://example.com/toast",
            "photo_url": null,
            "ingredients": ["bread", "butter"],
            "instructions": ["toast", "spread"]
        });
        std::fs::write(
            dir.path().join("allrecipes-recipes.json"),
            format!("{record}\n"),
        )
        .unwrap();

        let mut conn = load::schema::open_in_memory().unwrap();
        let config = LoadConfig::select(dir.path(), &["allrecipes".to_string()]).unwrap();
        let reports = load_all(&mut conn, &config).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].loaded, 1);
        assert_eq!(reports[0].failed, 0);
    }
}
