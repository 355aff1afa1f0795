use crate::history::ExportFile;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Writes an export into `dir`, creating the directory when needed.
/// The file name must be a single path component.
pub fn save_export(dir: &Path, export: &ExportFile) -> io::Result<PathBuf> {
    let mut components = Path::new(&export.filename).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid export file name: {}", export.filename),
        ));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(&export.filename);
    fs::write(&path, &export.data)?;
    Ok(path)
}
