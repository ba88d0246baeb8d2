use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A single file can never be split across archives.
    #[error(
        "split size ({limit} bytes) can't be lower than the largest file: {} is {size} bytes",
        path.display()
    )]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("sort key overflow in {path}: digit run longer than {run_len} digits")]
    KeyOverflow { path: String, run_len: usize },

    #[error("{} exists already and was not overwritten", .0.display())]
    OverwriteRefused(PathBuf),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SplitError>;
