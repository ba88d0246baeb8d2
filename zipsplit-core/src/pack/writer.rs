use crate::codec::Codec;
use crate::domain::FileRecord;
use crate::error::Result;
use log::debug;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use time::OffsetDateTime;
use zip::DateTime;
use zip::write::{SimpleFileOptions, ZipWriter};

#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    pub codec: Codec,
    /// Deflate level 0..=9; `None` keeps the zip writer's default.
    pub level: Option<i64>,
    /// When true, zero entry timestamps and permissions for reproducible bytes.
    pub deterministic: bool,
}

#[derive(Clone, Debug)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    /// Sum of source bytes streamed into the archive
    pub source_bytes: u64,
    /// Size of the finished archive on disk
    pub archive_bytes: u64,
}

const DETERMINISTIC_MODE: u32 = 0o644;

fn mode_from(_md: &std::fs::Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        _md.permissions().mode() & 0o7777
    }
    #[cfg(not(unix))]
    {
        DETERMINISTIC_MODE
    }
}

fn mtime_from(md: &std::fs::Metadata) -> DateTime {
    md.modified()
        .ok()
        .map(OffsetDateTime::from)
        .and_then(|t| {
            DateTime::from_date_and_time(
                t.year().try_into().ok()?,
                u8::from(t.month()),
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
            )
            .ok()
        })
        .unwrap_or_default()
}

fn entry_options(
    opts: &WriteOptions,
    level: Option<i64>,
    md: &std::fs::Metadata,
) -> SimpleFileOptions {
    let (mtime, mode) = if opts.deterministic {
        (DateTime::default(), DETERMINISTIC_MODE)
    } else {
        (mtime_from(md), mode_from(md))
    };
    SimpleFileOptions::default()
        .compression_method(opts.codec.method())
        .compression_level(level)
        .last_modified_time(mtime)
        .unix_permissions(mode)
        .large_file(md.len() >= u32::MAX as u64)
}

/// Entry name for `path`: its components below `root`, joined with `/`
/// and rooted at `.` (`root/a/b.txt` -> `./a/b.txt`).
pub fn entry_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut name = String::from(".");
    for c in rel.components() {
        if let Component::Normal(part) = c {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}

/// Write `members` into a new archive at `out`, one entry per file, in order.
///
/// Every source file is streamed into its entry. On error the partial file
/// stays on disk and is not a valid archive.
pub fn write_archive(
    out: &Path,
    root: &Path,
    members: &[FileRecord],
    opts: &WriteOptions,
) -> Result<ArchiveSummary> {
    let level = opts.codec.level(opts.level)?;
    let mut zip = ZipWriter::new(File::create(out)?);
    let mut source_bytes = 0u64;

    for rec in members {
        let mut src = File::open(&rec.path)?;
        let md = src.metadata()?;
        let name = entry_name(root, &rec.path);
        zip.start_file(name.as_str(), entry_options(opts, level, &md))?;
        let n = std::io::copy(&mut src, &mut zip)?;
        source_bytes += n;
        debug!("added {name} ({n} bytes)");
    }

    let file = zip.finish()?;
    let archive_bytes = file.metadata()?.len();

    Ok(ArchiveSummary {
        path: out.to_path_buf(),
        entries: members.len(),
        source_bytes,
        archive_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use zip::ZipArchive;

    fn rec(path: PathBuf) -> FileRecord {
        let size = fs::metadata(&path).unwrap().len();
        FileRecord {
            path,
            size,
            key: Vec::new(),
        }
    }

    #[test]
    fn entry_names_are_rooted_at_dot() {
        let root = Path::new("/data/photos");
        assert_eq!(entry_name(root, Path::new("/data/photos/a.jpg")), "./a.jpg");
        assert_eq!(
            entry_name(root, Path::new("/data/photos/2020/07/b.jpg")),
            "./2020/07/b.jpg"
        );
    }

    #[test]
    fn writes_entries_in_member_order_with_content() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("z.txt"), b"last letter").unwrap();
        fs::write(root.join("sub/a.txt"), "hello ".repeat(1000)).unwrap();

        let members = vec![rec(root.join("z.txt")), rec(root.join("sub/a.txt"))];
        let out = td.path().join("out.zip");
        let sum = write_archive(&out, &root, &members, &WriteOptions::default()).unwrap();
        assert_eq!(sum.entries, 2);
        assert_eq!(sum.source_bytes, 11 + 6000);
        assert_eq!(sum.archive_bytes, fs::metadata(&out).unwrap().len());

        let mut za = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(za.len(), 2);
        {
            let e = za.by_index(0).unwrap();
            assert_eq!(e.name(), "./z.txt");
        }
        let mut e = za.by_index(1).unwrap();
        assert_eq!(e.name(), "./sub/a.txt");
        assert_eq!(e.compression(), zip::CompressionMethod::Deflated);
        assert!(e.compressed_size() < e.size());
        let mut body = String::new();
        e.read_to_string(&mut body).unwrap();
        assert_eq!(body, "hello ".repeat(1000));
    }

    #[test]
    fn store_codec_keeps_bytes_uncompressed() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("a"), vec![b'x'; 4096]).unwrap();
        let out = td.path().join("o.zip");
        let opts = WriteOptions {
            codec: Codec::Store,
            level: Some(9),
            deterministic: true,
        };
        write_archive(&out, td.path(), &[rec(td.path().join("a"))], &opts).unwrap();
        let mut za = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let e = za.by_index(0).unwrap();
        assert_eq!(e.compression(), zip::CompressionMethod::Stored);
        assert_eq!(e.compressed_size(), 4096);
    }

    #[test]
    fn deterministic_output_is_byte_identical() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("a"), b"alpha").unwrap();
        fs::write(td.path().join("b"), b"beta").unwrap();
        let members = vec![rec(td.path().join("a")), rec(td.path().join("b"))];
        let opts = WriteOptions {
            deterministic: true,
            ..Default::default()
        };
        let one = td.path().join("1.zip");
        let two = td.path().join("2.zip");
        write_archive(&one, td.path(), &members, &opts).unwrap();
        write_archive(&two, td.path(), &members, &opts).unwrap();
        assert_eq!(fs::read(one).unwrap(), fs::read(two).unwrap());
    }

    #[test]
    fn missing_source_aborts_the_archive() {
        let td = tempfile::tempdir().unwrap();
        let ghost = FileRecord {
            path: td.path().join("gone"),
            size: 1,
            key: Vec::new(),
        };
        let out = td.path().join("o.zip");
        assert!(write_archive(&out, td.path(), &[ghost], &WriteOptions::default()).is_err());
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let out = td.path().join("nope/o.zip");
        assert!(write_archive(&out, td.path(), &[], &WriteOptions::default()).is_err());
    }
}
