use crate::error::{Result, SplitError};
use crate::pack::writer::{ArchiveSummary, WriteOptions, write_archive};
use crate::plan::{SplitPlan, archive_path, plan};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct SplitOptions {
    pub root: PathBuf,
    pub out_dir: PathBuf,
    /// Archive file name prefix, `{prefix}-{index}.zip`
    pub prefix: String,
    pub limit: u64,
    pub write: WriteOptions,
}

/// Decides what happens when an output archive already exists.
pub trait Prompt {
    /// `Ok(true)` removes `path` and writes it afresh; `Ok(false)` stops the run.
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

/// Replace existing archives without asking.
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Never replace an existing archive.
pub struct AssumeNo;

impl Prompt for AssumeNo {
    fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Debug)]
pub enum Event<'a> {
    Planned(&'a SplitPlan),
    Creating { index: usize, path: &'a Path },
    Created(&'a ArchiveSummary),
}

#[derive(Clone, Debug, Default)]
pub struct SplitReport {
    pub archives: Vec<ArchiveSummary>,
    pub files: usize,
    pub source_bytes: u64,
    pub archive_bytes: u64,
}

impl SplitReport {
    fn push(&mut self, s: ArchiveSummary) {
        self.files += s.entries;
        self.source_bytes += s.source_bytes;
        self.archive_bytes += s.archive_bytes;
        self.archives.push(s);
    }
}

/// Plan and write the whole split.
pub fn split(
    opts: &SplitOptions,
    prompt: &mut dyn Prompt,
    mut on_event: impl FnMut(Event<'_>),
) -> Result<SplitReport> {
    let plan = plan(&opts.root, opts.limit)?;
    on_event(Event::Planned(&plan));
    write_plan(&plan, opts, prompt, on_event)
}

/// Write one archive per planned group, strictly in order.
///
/// An existing output path goes through `prompt` first. A refusal ends the
/// run with `OverwriteRefused`; archives written before it stay on disk.
pub fn write_plan(
    plan: &SplitPlan,
    opts: &SplitOptions,
    prompt: &mut dyn Prompt,
    mut on_event: impl FnMut(Event<'_>),
) -> Result<SplitReport> {
    fs::create_dir_all(&opts.out_dir)?;
    if out_dir_inside_root(&plan.root, &opts.out_dir) {
        warn!(
            "{} is inside {}; its archives will be collected by the next split",
            opts.out_dir.display(),
            plan.root.display()
        );
    }
    let mut report = SplitReport::default();

    for (i, g) in plan.groups.iter().enumerate() {
        let index = i + 1;
        let out = archive_path(&opts.out_dir, &opts.prefix, index);
        on_event(Event::Creating { index, path: &out });

        if out.exists() {
            if !prompt.confirm_overwrite(&out)? {
                return Err(SplitError::OverwriteRefused(out));
            }
            warn!("removing existing {}", out.display());
            fs::remove_file(&out)?;
        }

        let summary = write_archive(&out, &plan.root, &g.members, &opts.write)?;
        info!(
            "wrote {} ({} files, {} -> {} bytes)",
            out.display(),
            summary.entries,
            summary.source_bytes,
            summary.archive_bytes
        );
        on_event(Event::Created(&summary));
        report.push(summary);
    }
    Ok(report)
}

/// Whether `out_dir` lies under `root`, compared as absolute paths.
fn out_dir_inside_root(root: &Path, out_dir: &Path) -> bool {
    match (std::path::absolute(root), std::path::absolute(out_dir)) {
        (Ok(root), Ok(out)) => out.starts_with(root),
        _ => false,
    }
}
