use std::path::Path;

use crate::{
    assemble::{Column, CompanyRow},
    core::Result,
};

/// Overwrite `path` with the rows.
///
/// The first column is an unnamed 0-based row index. The remaining columns are the union
/// of keys present across rows, in canonical order; a row lacking a key gets an empty cell.
/// Missing parent directories are created. Returns the number of data rows written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_csv(rows: &[CompanyRow], path: &Path) -> Result<usize> {
    tracing::info!(path = %path.display(), rows = rows.len(), "writing final data to csv");

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let columns = Column::union_of(rows);
    let mut wtr = ::csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("");
    header.extend(columns.iter().map(|c| c.name()));
    wtr.write_record(&header)?;

    for (i, row) in rows.iter().enumerate() {
        let mut cells: [Option<String>; Column::ALL.len()] = Default::default();
        for (c, v) in row.fields() {
            cells[c as usize] = Some(v.to_string());
        }
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(i.to_string());
        record.extend(columns.iter().map(|c| cells[*c as usize].take().unwrap_or_default()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    tracing::info!(path = %path.display(), "final data written");
    Ok(rows.len())
}
