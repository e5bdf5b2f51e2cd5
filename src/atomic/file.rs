use std::fs::{self, File};
use std::io::{Error, ErrorKind, Read, Result, Write};
use std::path::{Path, PathBuf};

const MAX_VERSION_FILES: usize = 10;

pub struct TmpFile {
    file: File,
    path: PathBuf,
}

impl TmpFile {
    pub fn create_in(temp_dir: impl AsRef<Path>) -> Result<Self> {
        let filename: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(10)
            .collect();
        let path = temp_dir.as_ref().join(filename);
        let file = std::fs::File::create(&path)?;
        Ok(Self { file, path })
    }
}

impl std::io::Write for &TmpFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (&self.file).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (&self.file).flush()
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A published version of an [`AtomicFile`]. Version `0` means nothing
/// has been written yet.
#[derive(Clone, Debug)]
pub struct ReadOnlyFile {
    pub version: usize,
    pub path: PathBuf,
}

impl ReadOnlyFile {
    /// Open the underlying file, which can be read from but not written to.
    /// May return `Ok(None)`, which means that no version
    /// of the `AtomicFile` has been created yet.
    pub fn open(&self) -> Result<Option<File>> {
        if self.version != 0 {
            Ok(Some(File::open(&self.path)?))
        } else {
            Ok(None)
        }
    }

    pub fn read_content(&self) -> Result<Vec<u8>> {
        match self.open()? {
            None => Err(Error::new(ErrorKind::NotFound, "File not found")),
            Some(mut file) => {
                let mut buf = vec![];
                file.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// A value stored as a directory of numbered versions.
///
/// Writers never touch a published version: new content goes to a
/// temporary file which is then hard-linked as `<prefix><version + 1>`.
/// Linking fails if another writer got there first, so a reader always
/// sees one complete version.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AtomicFile {
    pub directory: PathBuf,
    pub prefix: String,
}

fn parse_version(filename: Option<&str>) -> Option<usize> {
    let (_, version) = filename?.rsplit_once('.')?;
    version.parse().ok()
}

impl AtomicFile {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let directory = path.into();
        std::fs::create_dir_all(&directory)?;
        let filename = directory
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    "`path` must specify a directory name",
                )
            })?;
        let prefix = format!("{}.", filename);
        Ok(Self { directory, prefix })
    }

    /// Highest version currently published in the directory.
    pub fn latest_version(&self) -> Result<usize> {
        let version = fs::read_dir(&self.directory)?
            .flatten()
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with(&self.prefix))
                    .unwrap_or(false)
            })
            .filter_map(|entry| parse_version(entry.file_name().to_str()))
            .max()
            .unwrap_or(0);
        Ok(version)
    }

    pub fn path(&self, version: usize) -> PathBuf {
        self.directory
            .join(format!("{}{version}", self.prefix))
    }

    pub fn load(&self) -> Result<ReadOnlyFile> {
        let version = self.latest_version()?;
        Ok(ReadOnlyFile {
            version,
            path: self.path(version),
        })
    }

    pub fn make_temp(&self) -> Result<TmpFile> {
        TmpFile::create_in(&self.directory)
    }

    /// Replace the contents of the file with the contents of `new` if the
    /// latest version is the same as `current`.
    ///
    /// # Errors
    /// If `io::ErrorKind::AlreadyExists` is returned, it means that the latest
    /// version was not the same as `current` and the operation must be retried
    /// with a fresher version of the file. Any other I/O error is forwarded as
    /// well.
    pub fn compare_and_swap(
        &self,
        current: &ReadOnlyFile,
        new: TmpFile,
    ) -> Result<()> {
        let new_path = self.path(current.version + 1);
        (new.file).sync_data()?;
        let latest_version = self.latest_version()?;
        if latest_version > current.version {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                "the `current` file is not the latest version",
            ));
        }
        // May return `EEXIST`.
        std::fs::hard_link(&new.path, new_path)?;

        let number_of_removed = self.prune_old_versions(latest_version);
        log::trace!("pruned {} old files", number_of_removed);
        Ok(())
    }

    /// Return the number of files deleted
    fn prune_old_versions(&self, version: usize) -> usize {
        let mut deleted = 0;
        if let Ok(iterator) = fs::read_dir(&self.directory) {
            for entry in iterator.flatten() {
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if !name.starts_with(&self.prefix) {
                    continue;
                }
                if let Some(file_version) = parse_version(Some(name)) {
                    if file_version + MAX_VERSION_FILES - 1 <= version
                        && fs::remove_file(entry.path()).is_ok()
                    {
                        deleted += 1;
                    }
                }
            }
        }
        deleted
    }
}
