//! Natural ordering of path strings.
//!
//! A key is the path's bytes with every maximal digit run replaced by a
//! length marker followed by the digits. Comparing keys bytewise then
//! compares digit runs by length first (so `9` < `10`) and digit by digit
//! second, while non-digit bytes keep their plain byte order.

use crate::domain::FileRecord;
use crate::error::{Result, SplitError};

/// Longest digit run one marker byte can describe.
pub const MAX_RUN: usize = u8::MAX as usize;

pub fn path_key(path: &str) -> Result<Vec<u8>> {
    let src = path.as_bytes();
    let mut key = Vec::with_capacity(src.len() + 8);
    // index of the marker of the open digit run
    let mut marker: Option<usize> = None;

    for &b in src {
        if !b.is_ascii_digit() {
            key.push(b);
            marker = None;
            continue;
        }
        let j = match marker {
            Some(j) => j,
            None => {
                key.push(0);
                let j = key.len() - 1;
                marker = Some(j);
                j
            }
        };
        // A run holding a single '0' takes the next digit in its place:
        // "05" keys like "5".
        if key[j] == 1 && key[j + 1] == b'0' {
            key[j + 1] = b;
            continue;
        }
        if key[j] as usize == MAX_RUN {
            return Err(SplitError::KeyOverflow {
                path: path.to_string(),
                run_len: MAX_RUN,
            });
        }
        key.push(b);
        key[j] += 1;
    }
    Ok(key)
}

/// Sort records into natural path order. Records whose keys tie (`a05`
/// and `a5`) are ordered by their raw path.
pub fn sort_records(records: &mut [FileRecord]) {
    records.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.path.cmp(&b.path)));
}
