// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::StoreError;

/// Resolve a user-supplied output path. A trailing separator or an existing
/// directory means "put the default file in there".
pub fn resolve_out_path(user_o: &Path, default_filename: &str) -> PathBuf {
    if looks_like_dir_hint(user_o) || user_o.is_dir() {
        user_o.join(default_filename)
    } else {
        user_o.to_path_buf()
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StoreError::NotADirectory { path: dir.to_path_buf() });
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_hint_gets_default_file() {
        let p = resolve_out_path(Path::new("data/"), "runners.csv");
        assert_eq!(p, Path::new("data/").join("runners.csv"));
        let p = resolve_out_path(Path::new("data/zurich.csv"), "runners.csv");
        assert_eq!(p, PathBuf::from("data/zurich.csv"));
    }

    #[test]
    fn refuses_file_as_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_directory(&file),
            Err(StoreError::NotADirectory { .. })
        ));
        ensure_parent(&tmp.path().join("a").join("b.csv")).unwrap();
        assert!(tmp.path().join("a").is_dir());
    }
}
