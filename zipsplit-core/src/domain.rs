// zipsplit_core/src/domain.rs
use std::path::PathBuf;

/// One regular file found under the walked root.
#[derive(Clone, Debug)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Size at discovery time; not re-checked before archiving.
    pub size: u64,
    /// Natural sort key derived from `path`. Ordering only, never displayed.
    pub key: Vec<u8>,
}

/// Files destined for one archive, in sorted-stream order.
#[derive(Clone, Debug, Default)]
pub struct Group {
    pub size: u64,
    pub members: Vec<FileRecord>,
}

impl Group {
    pub fn open(first: FileRecord) -> Self {
        Self {
            size: first.size,
            members: vec![first],
        }
    }

    pub fn push(&mut self, rec: FileRecord) {
        self.size += rec.size;
        self.members.push(rec);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
