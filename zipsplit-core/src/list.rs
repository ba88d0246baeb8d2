use crate::error::Result;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

#[derive(Clone, Debug)]
pub struct EntryRow {
    pub name: String,
    pub size: u64,
    pub compressed: u64,
    pub method: String,
}

/// Entries of a written archive, in stored order.
pub fn list_entries(archive: &Path) -> Result<Vec<EntryRow>> {
    let mut za = ZipArchive::new(File::open(archive)?)?;
    let mut rows = Vec::with_capacity(za.len());
    for i in 0..za.len() {
        let e = za.by_index(i)?;
        rows.push(EntryRow {
            name: e.name().to_string(),
            size: e.size(),
            compressed: e.compressed_size(),
            method: format!("{:?}", e.compression()),
        });
    }
    Ok(rows)
}
