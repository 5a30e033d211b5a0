use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::DeskError;

const TMP_SUFFIX: &str = "tmp";

/// Creates `path` and its parents when missing.
pub fn ensure_dir(path: &Path) -> Result<(), DeskError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` to `path` by staging into a sibling temporary file and
/// renaming it into place.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), DeskError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("report.txt");
        write_atomic(&target, "hello").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
        assert!(!dir.path().join("nested").join("report.txt.tmp").exists());
    }
}
