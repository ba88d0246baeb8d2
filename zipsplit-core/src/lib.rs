#![forbid(unsafe_code)]

pub mod codec;
pub mod domain;
pub mod error;

pub mod order {
    pub mod key;
}

pub mod pack {
    pub mod grouper;
    pub mod walker;
    pub mod writer;
}

pub mod list;
pub mod plan;
pub mod run;

// Re-exports: stable API surface
pub use list::list_entries;
pub use pack::writer::{ArchiveSummary, WriteOptions, write_archive};
pub use plan::{PlanView, PlannedArchive, SplitPlan, archive_path, limit_from_mb, plan};
pub use run::{AssumeNo, AssumeYes, Event, Prompt, SplitOptions, SplitReport, split, write_plan};
