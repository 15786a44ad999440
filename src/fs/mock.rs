// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem for tests.
///
/// Paths are normalised by dropping `.` components, so `./my/logs.json` and
/// `my/logs.json` refer to the same entry.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut files = self.lock();
        if let Some(parent) = path.parent() {
            ensure_dirs(&mut files, parent);
        }
        files.insert(path, MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        ensure_dirs(&mut self.lock(), &path);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        self.lock().get(&normalize(path)).cloned()
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn ensure_dirs(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    for dir in path.ancestors() {
        if dir.as_os_str().is_empty() {
            break;
        }
        files.entry(dir.to_path_buf()).or_insert(MockEntry::Dir);
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("file not found: {}", path.display()))
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::other(format!("is a directory: {}", path.display()))
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.entry(path) {
            Some(MockEntry::File(content)) => Ok(content),
            Some(MockEntry::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.entry(path).is_some()
    }
}
