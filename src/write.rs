// src/write.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::process::Table;

/// Make sure `dir` exists, creating parents as needed.
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "creating output directory");
        fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    }
    Ok(())
}

/// `<dir>/data_<content_head>.csv`
pub fn table_path(dir: &Path, table: &Table) -> PathBuf {
    dir.join(format!("data_{}.csv", table.content_head))
}

/// Write `records` to `path`, truncating whatever was there.
///
/// Rows may differ in length. An empty record becomes an empty line. The
/// file is flushed before returning.
pub fn write_records(path: &Path, records: &[Vec<String>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {:?}", path))?;
    for record in records {
        if record.is_empty() {
            // csv would emit `""` here; bypass it so only the terminator lands
            writer
                .flush()
                .with_context(|| format!("flushing {:?}", path))?;
            writer
                .get_ref()
                .write_all(b"\n")
                .with_context(|| format!("writing empty record to {:?}", path))?;
            continue;
        }
        writer
            .write_record(record)
            .with_context(|| format!("writing record to {:?}", path))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {:?}", path))?;
    Ok(())
}

/// Write one table into `dir` and return the file it landed in.
pub fn write_table(dir: &Path, table: &Table) -> Result<PathBuf> {
    let path = table_path(dir, table);
    write_records(&path, &table.records)?;
    debug!(path = %path.display(), rows = table.records.len(), "wrote table");
    Ok(path)
}
