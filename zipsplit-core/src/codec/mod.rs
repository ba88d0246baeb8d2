use crate::error::{Result, SplitError};
use zip::CompressionMethod;

/// How entry bytes are stored inside an archive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Codec {
    Store,
    #[default]
    Deflate,
}

pub const MAX_DEFLATE_LEVEL: i64 = 9;

impl Codec {
    pub fn method(self) -> CompressionMethod {
        match self {
            Codec::Store => CompressionMethod::Stored,
            Codec::Deflate => CompressionMethod::Deflated,
        }
    }

    /// Level to hand to the zip writer; stored entries take none.
    pub fn level(self, requested: Option<i64>) -> Result<Option<i64>> {
        match (self, requested) {
            (Codec::Store, _) => Ok(None),
            (Codec::Deflate, None) => Ok(None),
            (Codec::Deflate, Some(l)) if (0..=MAX_DEFLATE_LEVEL).contains(&l) => Ok(Some(l)),
            (Codec::Deflate, Some(l)) => Err(SplitError::InvalidOption(format!(
                "deflate level {l} outside 0..={MAX_DEFLATE_LEVEL}"
            ))),
        }
    }
}
