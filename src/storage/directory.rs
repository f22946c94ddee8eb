//! Directory-backed resume store
//!
//! Layout: `<root>/chapter-<n>/<links_file>`, one link per line, no header.
//! The file's existence and line count are the only resume signal.

use crate::storage::traits::{ResumeStore, StorageResult};
use crate::PersistError;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Stores each chapter's links in its own subdirectory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    links_file: String,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`
    ///
    /// The root directory itself is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>, links_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            links_file: links_file.into(),
        }
    }

    /// Creates the root directory if needed
    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one chapter's output
    pub fn chapter_dir(&self, chapter: u32) -> PathBuf {
        self.root.join(format!("chapter-{}", chapter))
    }

    /// Path of one chapter's link file
    pub fn links_path(&self, chapter: u32) -> PathBuf {
        self.chapter_dir(chapter).join(&self.links_file)
    }

    fn persist_error(chapter: u32, path: &Path, source: io::Error) -> PersistError {
        PersistError {
            chapter,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ResumeStore for DirectoryStore {
    fn prior_count(&self, chapter: u32) -> StorageResult<Option<usize>> {
        let path = self.links_path(chapter);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::persist_error(chapter, &path, e)),
        };

        count_lines(file)
            .map(Some)
            .map_err(|e| Self::persist_error(chapter, &path, e))
    }

    fn persist(&self, chapter: u32, links: &[String]) -> StorageResult<()> {
        let dir = self.chapter_dir(chapter);
        let path = self.links_path(chapter);

        fs::create_dir_all(&dir).map_err(|e| Self::persist_error(chapter, &dir, e))?;

        // Write beside the target and rename, so a partial file is never counted
        let tmp_path = dir.join(format!(".{}.partial", self.links_file));
        write_links(&tmp_path, links).map_err(|e| Self::persist_error(chapter, &tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            Self::persist_error(chapter, &path, e)
        })?;

        tracing::trace!("Wrote {} links to {}", links.len(), path.display());
        Ok(())
    }
}

fn write_links(path: &Path, links: &[String]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for link in links {
        writer.write_all(link.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()
}

/// Counts lines the way a line-by-line reader sees them
///
/// Each `\n` ends a line; trailing bytes without a final newline form one more
/// line. An empty input has zero lines. Content need not be UTF-8.
pub fn count_lines<R: Read>(mut reader: R) -> io::Result<usize> {
    let mut buf = [0u8; 8192];
    let mut count = 0;
    let mut last = None;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        count += buf[..n].iter().filter(|&&b| b == b'\n').count();
        last = Some(buf[n - 1]);
    }

    match last {
        Some(b'\n') | None => Ok(count),
        Some(_) => Ok(count + 1),
    }
}
