use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the workout snapshot lives between sessions.
pub trait Storage {
    /// The last saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored snapshot.
    fn save(&mut self, text: &str) -> Result<()>;

    /// Forgets the stored snapshot.
    fn clear(&mut self) -> Result<()>;
}

/// Snapshot kept in a single JSON file.
///
/// Saves go to a temp file in the same directory which is then renamed over
/// the target, so a crash never leaves half a snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                // Invalid UTF-8 is handed on as text the codec will reject,
                // so it is treated like any other corrupt snapshot.
                let text = String::from_utf8(bytes).unwrap_or_else(|e| {
                    tracing::warn!(path = %self.path.display(), err = %e, "snapshot is not valid UTF-8");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                });
                // A bare `null` is what an empty snapshot looked like before.
                if text.trim() == "null" {
                    return Ok(None);
                }
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("reading snapshot: {}", self.path.display()))
            }
        }
    }

    fn save(&mut self, text: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).with_context(|| format!("creating dir: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(text.as_bytes())
            .context("writing snapshot to temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing snapshot: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), bytes = text.len(), "snapshot saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing snapshot: {}", self.path.display()))
            }
        }
    }
}

/// Snapshot kept in memory, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    text: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }

    fn save(&mut self, text: &str) -> Result<()> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.text = None;
        Ok(())
    }
}
