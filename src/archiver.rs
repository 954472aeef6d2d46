use crate::error::Result;
use std::fs::File;
use std::path::Path;
use tar::Builder;
use tracing::debug;

/// Bundle every regular file of `source_dir` into a tar archive at
/// `output_path`, each under its bare filename. Directory enumeration order
/// is filesystem-dependent, so entries are sorted by name to keep archive
/// contents deterministic. Returns the member count.
pub fn archive_dir(source_dir: &Path, output_path: &Path) -> Result<usize> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(source_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut archive = Builder::new(File::create(output_path)?);
    for path in &files {
        if let Some(name) = path.file_name() {
            archive.append_path_with_name(path, name)?;
        }
    }
    archive.finish()?;

    debug!("archived {} files into {:?}", files.len(), output_path);
    Ok(files.len())
}
