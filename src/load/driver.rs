//! The load loop: pull records, extract, insert, count what failed

use crate::load::error::RecordError;
use crate::load::extractor::{extract, RecipeDraft};
use crate::load::reader::JsonLines;
use crate::load::schema;
use crate::load::types::{LoadConfig, SourceReport, SourceSpec};
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, Transaction};
use std::path::Path;
use tracing::{debug, info};

const PROGRESS_EVERY: usize = 1000;

/// Initialize the schema and load every configured source in order
pub fn load_all(conn: &mut Connection, config: &LoadConfig) -> Result<Vec<SourceReport>> {
    schema::init(conn)?;

    let mut reports = Vec::with_capacity(config.sources.len());
    for spec in &config.sources {
        let path = config.source_path(spec);
        let report = load_source(conn, spec, &path)?;
        info!(
            source = spec.name,
            loaded = report.loaded,
            failed = report.failed,
            "source complete"
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Load every record of one source file, isolating failures per record.
///
/// The whole source runs inside one transaction for throughput; each record
/// gets its own savepoint so a failed record rolls back alone and can never
/// leave partial rows behind. A mid-run fatal condition therefore costs at
/// most the current source, never the already-committed ones.
pub fn load_source(
    conn: &mut Connection,
    spec: &SourceSpec,
    path: &Path,
) -> Result<SourceReport> {
    println!("Inserting recipes from {}", spec.name);

    let records = JsonLines::open(path)?;
    let insert_recipe = spec.insert_sql();

    let mut attempted = 0usize;
    let mut failed = 0usize;

    let mut tx = conn
        .transaction()
        .context("failed to begin source transaction")?;

    for record in records {
        attempted += 1;
        let outcome = record
            .and_then(|value| extract(spec, &value))
            .and_then(|draft| insert_record(&mut tx, &insert_recipe, &draft));

        match outcome {
            Ok(()) => {
                if attempted % PROGRESS_EVERY == 0 {
                    println!("Inserted {attempted} recipes");
                }
            }
            Err(err) => {
                failed += 1;
                debug!(source = spec.name, record = attempted, %err, "skipping record");
            }
        }
    }

    tx.commit().context("failed to commit source transaction")?;

    let report = SourceReport {
        source: spec.name.to_string(),
        attempted,
        loaded: attempted - failed,
        failed,
    };
    println!(
        "Loaded {} recipes from {} ({} skipped)",
        report.loaded, report.source, report.failed
    );
    Ok(report)
}

/// Insert one recipe plus its children inside a savepoint. Any error rolls
/// the savepoint back on drop, so the caller sees either all rows or none.
fn insert_record(
    tx: &mut Transaction,
    insert_recipe: &str,
    draft: &RecipeDraft,
) -> Result<(), RecordError> {
    let sp = tx.savepoint()?;

    {
        let mut stmt = sp.prepare_cached(insert_recipe)?;
        stmt.execute(params_from_iter(draft.columns.iter()))?;
    }
    let recipe_id = sp.last_insert_rowid();

    {
        let mut stmt = sp.prepare_cached(
            "INSERT INTO ingredient_recipe (recipe_id, description) VALUES (?1, ?2)",
        )?;
        for ingredient in &draft.ingredients {
            stmt.execute(params![recipe_id, ingredient])?;
        }
    }

    {
        let mut stmt = sp.prepare_cached(
            "INSERT INTO instruction_recipe (recipe_id, ord, description) VALUES (?1, ?2, ?3)",
        )?;
        for (index, instruction) in draft.instructions.iter().enumerate() {
            stmt.execute(params![recipe_id, index as i64 + 1, instruction])?;
        }
    }

    sp.commit()?;
    Ok(())
}
