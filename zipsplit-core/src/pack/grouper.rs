use crate::domain::{FileRecord, Group};

/// Greedy first-fit-append: each record joins the most recently opened
/// group, or opens a new one when it would push that group past `limit`.
///
/// Expects records already in natural order, each no larger than `limit`.
/// Never looks ahead and never revisits a closed group.
pub fn group(records: Vec<FileRecord>, limit: u64) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for rec in records {
        match groups.last_mut() {
            Some(cur) if cur.size + rec.size <= limit => cur.push(rec),
            _ => groups.push(Group::open(rec)),
        }
    }
    groups
}
