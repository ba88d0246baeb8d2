use crate::domain::FileRecord;
use crate::error::{Result, SplitError};
use crate::order::key::path_key;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Collect every regular file under `root`, unsorted.
///
/// Fails on the first file larger than `limit`: it could never fit in any
/// archive. Walk and metadata errors are fatal too, nothing partial is
/// returned.
pub fn collect(root: &Path, limit: u64) -> Result<Vec<FileRecord>> {
    if !root.is_dir() {
        return Err(SplitError::NotADirectory(root.to_path_buf()));
    }
    let mut files = Vec::new();
    for e in WalkDir::new(root).follow_links(false) {
        let e = e?;
        // dirs yield no record; symlinks and special files are skipped
        if !e.file_type().is_file() {
            continue;
        }
        let size = e.metadata()?.len();
        if size > limit {
            return Err(SplitError::FileTooLarge {
                path: e.path().to_path_buf(),
                size,
                limit,
            });
        }
        let key = path_key(&e.path().to_string_lossy())?;
        files.push(FileRecord {
            path: e.into_path(),
            size,
            key,
        });
    }
    debug!("collected {} files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_nested_files_only() {
        let td = tempfile::tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/b")).unwrap();
        fs::create_dir_all(td.path().join("empty")).unwrap();
        fs::write(td.path().join("top.txt"), b"1234").unwrap();
        fs::write(td.path().join("a/b/deep.bin"), vec![0u8; 10]).unwrap();

        let mut got = collect(td.path(), 100).unwrap();
        got.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].path, td.path().join("a/b/deep.bin"));
        assert_eq!(got[0].size, 10);
        assert_eq!(got[1].path, td.path().join("top.txt"));
        assert_eq!(got[1].size, 4);
        assert!(!got[1].key.is_empty());
    }

    #[test]
    fn file_at_limit_is_accepted() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("x"), vec![7u8; 64]).unwrap();
        assert_eq!(collect(td.path(), 64).unwrap().len(), 1);
    }

    #[test]
    fn file_over_limit_is_rejected_with_both_sizes() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("x"), vec![7u8; 65]).unwrap();
        match collect(td.path(), 64) {
            Err(SplitError::FileTooLarge { size, limit, path }) => {
                assert_eq!(size, 65);
                assert_eq!(limit, 64);
                assert_eq!(path, td.path().join("x"));
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn root_must_be_a_directory() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("plain");
        fs::write(&f, b"x").unwrap();
        assert!(matches!(collect(&f, 10), Err(SplitError::NotADirectory(_))));
        assert!(matches!(
            collect(&td.path().join("missing"), 10),
            Err(SplitError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_collected() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("real"), b"data").unwrap();
        std::os::unix::fs::symlink(td.path().join("real"), td.path().join("link")).unwrap();
        let got = collect(td.path(), 10).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].path, td.path().join("real"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_fails_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempfile::tempdir().unwrap();
        let locked = td.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("inner.txt"), b"x").unwrap();
        fs::write(td.path().join("open.txt"), b"y").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        let readable = fs::read_dir(&locked).is_ok();
        let got = collect(td.path(), 10);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }
        assert!(matches!(got, Err(SplitError::Walk(_))), "got {got:?}");
    }
}
