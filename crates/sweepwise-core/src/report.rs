/// Report helpers for a finished scan: CSV export and a plain-text summary.
use crate::model::size::format_size;
use crate::model::CleanerResult;
use crate::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CsvRow<'a> {
    category: &'a str,
    path: &'a str,
    name: &'a str,
    size: u64,
    needs_elevation: bool,
}

/// Write one CSV row per entry, categories in key order, entries in scan
/// order. Empty categories produce no rows.
pub fn write_csv<W: Write>(result: &CleanerResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (category, files) in &result.files {
        for f in files {
            wtr.serialize(CsvRow {
                category,
                path: &f.path,
                name: &f.name,
                size: f.size,
                needs_elevation: f.needs_elevation,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// One line per category, largest first, followed by the total and the
/// share that needs no elevation.
pub fn summary_lines(result: &CleanerResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .categories_by_size()
        .into_iter()
        .map(|(name, size)| {
            let count = result.files.get(name).map_or(0, Vec::len);
            format!("{name}: {count} item(s), {}", format_size(size))
        })
        .collect();
    lines.push(format!(
        "Total reclaimable: {} across {} item(s)",
        format_size(result.total_size),
        result.file_count()
    ));
    let (size, count) = result
        .user_cleanable()
        .fold((0u64, 0usize), |(size, count), f| (size + f.size, count + 1));
    lines.push(format!(
        "Without elevation: {} across {count} item(s)",
        format_size(size)
    ));
    if result.permissions.requires_elevation {
        lines.push(format!(
            "{} location(s) need elevation: {}",
            result.permissions.unaccessible_paths.len(),
            result.permissions.elevation_command
        ));
    }
    lines
}
