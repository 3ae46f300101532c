//! Local append-only log buffer.
//!
//! The JSON tracing layer appends one line per event through [`LogBuffer`];
//! the shipper uploads a length-bounded prefix and then calls
//! [`LogBuffer::drain_prefix`] to drop exactly those bytes. Both paths take
//! the same lock, so lines appended while an upload is in flight survive
//! into the next cycle.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    /// Append handle. Replaced after every drain.
    file: Mutex<File>,
}

/// Shared handle to the buffer file. Cloning shares the lock.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    inner: Arc<Inner>,
}

impl LogBuffer {
    /// Open (creating if needed) the buffer file in append mode.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            inner: Arc::new(Inner {
                path,
                file: Mutex::new(file),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Current size of the buffer file; an absent file counts as empty.
    pub fn pending_bytes(&self) -> io::Result<u64> {
        match fs::metadata(&self.inner.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Append raw bytes. Used by the tracing writer.
    pub fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = self.lock();
        file.write_all(bytes)
    }

    /// Remove the first `shipped` bytes, keeping everything appended after
    /// them. Returns the number of bytes left in the buffer.
    ///
    /// The surviving tail is staged in a sibling file and renamed over the
    /// buffer. The new append handle is opened on the staging file before
    /// the rename, so any failure leaves both the buffer and the current
    /// handle untouched.
    pub fn drain_prefix(&self, shipped: u64) -> io::Result<u64> {
        // No tracing calls below: the fmt layer writes through this lock.
        let mut file = self.lock();

        let mut source = File::open(&self.inner.path)?;
        let len = source.metadata()?.len();
        let mut tail = Vec::new();
        if len > shipped {
            source.seek(SeekFrom::Start(shipped))?;
            source.read_to_end(&mut tail)?;
        }
        drop(source);

        let staging = self.staging_path();
        let staged = write_staging(&staging, &tail).and_then(|handle| {
            fs::rename(&staging, &self.inner.path)?;
            Ok(handle)
        });
        match staged {
            Ok(handle) => *file = handle,
            Err(e) => {
                let _ = fs::remove_file(&staging);
                return Err(e);
            }
        }
        Ok(tail.len() as u64)
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.inner.path.as_os_str());
        name.push(".drain");
        PathBuf::from(name)
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.inner
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write `bytes` to a fresh file at `path` and return an append handle to it.
fn write_staging(path: &Path, bytes: &[u8]) -> io::Result<File> {
    let mut out = File::create(path)?;
    out.write_all(bytes)?;
    out.sync_all()?;
    open_append(path)
}

/// `io::Write` adapter handed to the tracing fmt layer.
#[derive(Debug)]
pub struct LogBufferWriter {
    buffer: LogBuffer,
}

impl Write for LogBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogBufferWriter {
            buffer: self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        fs::remove_file(buffer.path()).unwrap();
        assert_eq!(buffer.pending_bytes().unwrap(), 0);
    }

    #[test]
    fn drain_keeps_bytes_appended_after_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        buffer.append(b"line-1\nline-2\n").unwrap();
        let shipped = buffer.pending_bytes().unwrap();

        // Arrives while the upload of the first two lines is in flight.
        buffer.append(b"line-3\n").unwrap();

        let remaining = buffer.drain_prefix(shipped).unwrap();
        assert_eq!(remaining, 7);
        assert_eq!(fs::read(buffer.path()).unwrap(), b"line-3\n");

        // The append handle follows the new file.
        buffer.append(b"line-4\n").unwrap();
        assert_eq!(fs::read(buffer.path()).unwrap(), b"line-3\nline-4\n");
    }

    #[test]
    fn draining_everything_leaves_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        buffer.append(b"only line\n").unwrap();
        let remaining = buffer.drain_prefix(10).unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(buffer.pending_bytes().unwrap(), 0);
        assert!(!buffer.staging_path().exists());
    }

    #[test]
    fn failed_drain_keeps_buffer_and_append_handle() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        buffer.append(b"line-1\n").unwrap();
        // A directory in the staging slot makes the staging write fail.
        fs::create_dir(buffer.staging_path()).unwrap();

        assert!(buffer.drain_prefix(7).is_err());

        buffer.append(b"line-2\n").unwrap();
        assert_eq!(fs::read(buffer.path()).unwrap(), b"line-1\nline-2\n");

        fs::remove_dir(buffer.staging_path()).unwrap();
        assert_eq!(buffer.drain_prefix(7).unwrap(), 7);
        buffer.append(b"line-3\n").unwrap();
        assert_eq!(fs::read(buffer.path()).unwrap(), b"line-2\nline-3\n");
    }

    #[test]
    fn writer_appends_through_the_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        let mut writer = buffer.make_writer();
        writer.write_all(b"{\"msg\":\"hi\"}\n").unwrap();
        assert_eq!(buffer.pending_bytes().unwrap(), 13);
    }
}
