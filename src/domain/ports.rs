use crate::utils::error::Result;

/// Where course files come from. Files are handed over as raw bytes; the
/// loader decides how to decode them line by line.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}
