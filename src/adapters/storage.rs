use crate::domain::ports::Store;
use crate::utils::error::{DirectoryError, Result};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Plain text file, overwritten wholesale on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store. `fail_writes` makes every write report an I/O error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<Vec<u8>>>,
    fail_writes: bool,
    writes: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .borrow()
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(DirectoryError::IoError(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "memory store is read-only",
            )));
        }

        *self.contents.borrow_mut() = Some(contents.as_bytes().to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("absent.txt"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_overwrites_and_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested").join("teldir.txt"));

        store.write("Doe Jane 111\nSmith Bob 222\n").unwrap();
        store.write("Adams Tom 5550000\n").unwrap();

        assert_eq!(
            store.read().unwrap().as_deref(),
            Some(&b"Adams Tom 5550000\n"[..])
        );
    }

    #[test]
    fn test_read_returns_bytes_that_are_not_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, b"M\xFCller Hans 123\n").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.read().unwrap().unwrap(), b"M\xFCller Hans 123\n");
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert!(matches!(store.write("x"), Err(DirectoryError::IoError(_))));
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::failing();
        assert!(store.write("Doe Jane 1\n").is_err());
        assert_eq!(store.contents(), None);
        assert_eq!(store.write_count(), 0);
    }
}
