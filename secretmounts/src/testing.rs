//! Instrumented capabilities for tests.

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};

use crate::fs::{EntryKind, HostFs, OsFs};
use crate::label::Relabeler;

/// Real filesystem that counts mutations.
#[derive(Default)]
pub(crate) struct CountingFs {
    inner: OsFs,
    writes: Cell<usize>,
    dirs_created: Cell<usize>,
}

impl CountingFs {
    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn dirs_created(&self) -> usize {
        self.dirs_created.get()
    }
}

impl HostFs for CountingFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.inner.stat(path)
    }

    fn is_symlink(&self, path: &Path) -> io::Result<bool> {
        self.inner.is_symlink(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.inner.read_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.inner.read(path)
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.dirs_created.set(self.dirs_created.get() + 1);
        self.inner.create_dir_all(path, mode)
    }

    fn write(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.inner.write(path, data, mode)
    }
}

/// Filesystem operation that [`FaultyFs`] can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FsOp {
    Stat,
    ReadDir,
    Read,
}

/// Real filesystem that fails chosen operations on chosen paths with
/// `PermissionDenied`.
#[derive(Default)]
pub(crate) struct FaultyFs {
    inner: CountingFs,
    denied: Vec<(FsOp, PathBuf)>,
}

impl FaultyFs {
    pub(crate) fn deny(mut self, op: FsOp, path: impl Into<PathBuf>) -> Self {
        self.denied.push((op, path.into()));
        self
    }

    pub(crate) fn writes(&self) -> usize {
        self.inner.writes()
    }

    fn check(&self, op: FsOp, path: &Path) -> io::Result<()> {
        if self
            .denied
            .iter()
            .any(|(denied_op, denied)| *denied_op == op && denied == path)
        {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{:?} denied on {}", op, path.display()),
            ));
        }
        Ok(())
    }
}

impl HostFs for FaultyFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.check(FsOp::Stat, path)?;
        self.inner.stat(path)
    }

    fn is_symlink(&self, path: &Path) -> io::Result<bool> {
        self.inner.is_symlink(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.check(FsOp::ReadDir, path)?;
        self.inner.read_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.check(FsOp::Read, path)?;
        self.inner.read(path)
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.inner.create_dir_all(path, mode)
    }

    fn write(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
        self.inner.write(path, data, mode)
    }
}

/// Relabeler that records every call.
#[derive(Default)]
pub(crate) struct RecordingRelabeler {
    calls: RefCell<Vec<(PathBuf, String, bool)>>,
}

impl RecordingRelabeler {
    pub(crate) fn calls(&self) -> Vec<(PathBuf, String, bool)> {
        self.calls.borrow().clone()
    }
}

impl Relabeler for RecordingRelabeler {
    fn relabel(&self, path: &Path, label: &str, recursive: bool) -> SecretsResult<()> {
        self.calls
            .borrow_mut()
            .push((path.to_path_buf(), label.to_string(), recursive));
        Ok(())
    }
}

/// Relabeler that always fails.
pub(crate) struct FailingRelabeler;

impl Relabeler for FailingRelabeler {
    fn relabel(&self, path: &Path, _label: &str, _recursive: bool) -> SecretsResult<()> {
        Err(SecretsError::Label(format!(
            "labeling unavailable for {}",
            path.display()
        )))
    }
}
