mod file;

use std::io::{Result, Write};

pub use file::AtomicFile;

/// Read the latest version, hand it to `operator` and publish what it
/// returns. When another writer published first the whole cycle runs
/// again on the fresher content. `None` from `operator` writes nothing.
pub fn modify<E, F>(
    atomic_file: &AtomicFile,
    mut operator: F,
) -> std::result::Result<(), E>
where
    E: From<std::io::Error>,
    F: FnMut(&[u8]) -> std::result::Result<Option<Vec<u8>>, E>,
{
    loop {
        let latest = atomic_file.load()?;
        let current = if latest.version == 0 {
            vec![]
        } else {
            latest.read_content()?
        };
        let Some(data) = operator(&current)? else {
            return Ok(());
        };
        let tmp = atomic_file.make_temp()?;
        (&tmp).write_all(&data)?;
        (&tmp).flush()?;
        match atomic_file.compare_and_swap(&latest, tmp) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                continue
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Publish `data` as the next version of `atomic_file`,
/// retrying while other writers keep winning the race.
pub fn replace(atomic_file: &AtomicFile, data: &[u8]) -> Result<()> {
    loop {
        let latest = atomic_file.load()?;
        let tmp = atomic_file.make_temp()?;
        (&tmp).write_all(data)?;
        (&tmp).flush()?;
        match atomic_file.compare_and_swap(&latest, tmp) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                continue
            }
            Err(err) => return Err(err),
        }
    }
}
