use crate::domain::Group;
use crate::error::{Result, SplitError};
use crate::order::key::sort_records;
use crate::pack::grouper::group;
use crate::pack::walker::collect;
use crate::pack::writer::entry_name;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MIB: u64 = 1024 * 1024;

/// Byte limit for a split size given in (possibly fractional) megabytes.
pub fn limit_from_mb(mb: f64) -> Result<u64> {
    if !mb.is_finite() || mb <= 0.0 {
        return Err(SplitError::InvalidOption(format!(
            "split size must be a positive number of MB, got {mb}"
        )));
    }
    let bytes = (mb * MIB as f64) as u64;
    if bytes == 0 {
        return Err(SplitError::InvalidOption(format!(
            "split size {mb}MB is below one byte"
        )));
    }
    Ok(bytes)
}

/// `{out_dir}/{prefix}-{index}.zip`, index counted from 1.
pub fn archive_path(out_dir: &Path, prefix: &str, index: usize) -> PathBuf {
    out_dir.join(format!("{prefix}-{index}.zip"))
}

/// Walked, sorted and grouped files, ready to be written.
#[derive(Clone, Debug)]
pub struct SplitPlan {
    pub root: PathBuf,
    pub limit: u64,
    pub groups: Vec<Group>,
}

impl SplitPlan {
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.groups.iter().map(|g| g.size).sum()
    }

    /// Archive names and entry names as they would be written.
    pub fn view(&self, out_dir: &Path, prefix: &str) -> PlanView {
        let archives = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| PlannedArchive {
                path: archive_path(out_dir, prefix, i + 1),
                size: g.size,
                entries: g
                    .members
                    .iter()
                    .map(|m| entry_name(&self.root, &m.path))
                    .collect(),
            })
            .collect();
        PlanView {
            root: self.root.clone(),
            limit: self.limit,
            files: self.file_count(),
            bytes: self.total_bytes(),
            archives,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlannedArchive {
    pub path: PathBuf,
    pub size: u64,
    pub entries: Vec<String>,
}

/// Serializable form of a plan, for dry runs.
#[derive(Clone, Debug, Serialize)]
pub struct PlanView {
    pub root: PathBuf,
    pub limit: u64,
    pub files: usize,
    pub bytes: u64,
    pub archives: Vec<PlannedArchive>,
}

/// Walk `root`, sort its files naturally and group them under `limit` bytes.
///
/// Nothing is written. Fails before any grouping if a file exceeds `limit`.
pub fn plan(root: &Path, limit: u64) -> Result<SplitPlan> {
    if limit == 0 {
        return Err(SplitError::InvalidOption("split size must be above zero".into()));
    }
    let root = std::path::absolute(root)?;
    let mut files = collect(&root, limit)?;
    sort_records(&mut files);
    let groups = group(files, limit);
    info!(
        "planned {} archive(s) for {} under {} bytes each",
        groups.len(),
        root.display(),
        limit
    );
    Ok(SplitPlan {
        root,
        limit,
        groups,
    })
}
