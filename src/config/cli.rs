use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    /// Relative paths are resolved against `base_path`; absolute paths are
    /// used as given.
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|source| PlannerError::FileOpenError {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_relative_to_base_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("courses.csv"), "CS100,Intro\n").unwrap();

        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert_eq!(storage.read_file("courses.csv").unwrap(), b"CS100,Intro\n");
        assert!(matches!(
            storage.read_file("nope.csv"),
            Err(PlannerError::FileOpenError { path, .. }) if path == "nope.csv"
        ));
    }

    #[test]
    fn test_reads_bytes_that_are_not_utf8() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("latin1.csv"), b"MUS101,Caf\xe9 Music\n").unwrap();

        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert_eq!(storage.read_file("latin1.csv").unwrap(), b"MUS101,Caf\xe9 Music\n");
    }
}
