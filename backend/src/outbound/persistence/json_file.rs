//! Capability-scoped JSON document files.
//!
//! Each store is one document inside the data directory plus an optional
//! `<stem>.template.json` sibling used to seed it. Writes go to a hidden
//! temporary file which is then renamed over the target, so readers never
//! observe a partially written document.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A JSON document and its optional seed template.
#[derive(Debug, Clone)]
pub(crate) struct JsonDocumentFile {
    dir: Arc<Dir>,
    name: &'static str,
    template: &'static str,
}

impl JsonDocumentFile {
    /// Open `name` (and `template`) inside `data_dir`, creating the directory
    /// when absent.
    pub(crate) fn open(
        data_dir: &Path,
        name: &'static str,
        template: &'static str,
    ) -> io::Result<Self> {
        Dir::create_ambient_dir_all(data_dir, ambient_authority())?;
        let dir = Dir::open_ambient_dir(data_dir, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            name,
            template,
        })
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Document contents, or `None` when the file does not exist.
    pub(crate) fn read(&self) -> io::Result<Option<String>> {
        read_optional(&self.dir, self.name)
    }

    /// Template contents, or `None` when there is no template.
    pub(crate) fn read_template(&self) -> io::Result<Option<String>> {
        read_optional(&self.dir, self.template)
    }

    /// Replace the document with `contents` atomically.
    pub(crate) fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(
            ".{}.tmp.{}.{}.{}",
            self.name,
            std::process::id(),
            suffix,
            counter
        );

        self.write_temp(&tmp_name, contents)?;
        if let Err(err) = rename(&self.dir, &tmp_name, self.name) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(err);
        }
        sync_directory(&self.dir);
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(err) = written {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
            return Err(err);
        }
        Ok(())
    }
}

fn read_optional(dir: &Dir, name: &str) -> io::Result<Option<String>> {
    match dir.read_to_string(name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(windows)]
fn rename(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn rename(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

fn sync_directory(dir: &Dir) {
    // Best effort; the rename already happened.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}

/// Run blocking file work off the async executor.
pub(crate) async fn run_blocking<T, E, F>(
    work: F,
    on_join_error: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(err) => Err(on_join_error(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cap_fs::{file_exists, read_file_to_string, write_file};
    use rstest::rstest;

    #[rstest]
    fn open_creates_missing_data_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root.path().join("nested").join("data");

        let file = JsonDocumentFile::open(&nested, "books.json", "books.template.json")
            .expect("open store");

        assert_eq!(file.read().expect("read"), None);
        assert!(file_exists(&root.path().join("nested"), "data"));
    }

    #[rstest]
    fn write_atomic_replaces_contents_without_leftovers() {
        let root = tempfile::tempdir().expect("tempdir");
        let file = JsonDocumentFile::open(root.path(), "books.json", "books.template.json")
            .expect("open store");

        file.write_atomic("{\"books\":[1]}").expect("first write");
        file.write_atomic("{\"books\":[]}").expect("second write");

        assert_eq!(
            read_file_to_string(root.path(), "books.json").expect("read back"),
            "{\"books\":[]}"
        );
        let entries: Vec<_> = Dir::open_ambient_dir(root.path(), ambient_authority())
            .and_then(|dir| dir.entries())
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(entries.len(), 1, "temp files left behind: {entries:?}");
    }

    #[rstest]
    fn reads_template_when_present() {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), "users.template.json", b"[]").expect("seed template");
        let file = JsonDocumentFile::open(root.path(), "users.json", "users.template.json")
            .expect("open store");

        assert_eq!(file.read_template().expect("read"), Some("[]".to_owned()));
        assert!(!file_exists(root.path(), "users.json"));
    }
}
