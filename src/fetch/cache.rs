use anyhow::{Context, Result};
use bytes::Bytes;
use std::fs;
use std::path::Path;

/// Writes the downloaded bytes verbatim, creating parent directories.
pub fn store_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create cache directory: {:?}", parent))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write cache file: {:?}", path))
}

pub fn read_cached(path: &Path) -> Result<Bytes> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read cache file: {:?}", path))?;
    Ok(Bytes::from(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_store_raw_creates_parent_dirs() {
        let dir = env::temp_dir().join("case_spread_map_test_cache_dir");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("raw.csv");

        store_raw(&path, b"\x00\x01binary").unwrap();
        assert_eq!(&read_cached(&path).unwrap()[..], b"\x00\x01binary");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_cached_missing_file() {
        let path = env::temp_dir().join("case_spread_map_test_no_such_cache.csv");
        let _ = fs::remove_file(&path);
        assert!(read_cached(&path).is_err());
    }
}
