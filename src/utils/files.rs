use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory receiving the images of one collection: `{root}/{collection}`
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Ensure the collection directory exists
pub fn ensure_directories(root: &Path, collection: &str) -> io::Result<PathBuf> {
    let dir = collection_dir(root, collection);

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        println!("Created directory: {}", dir.display());
    }

    Ok(dir)
}

/// A destination counts as already fetched only when it holds some bytes
pub fn is_present(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Count the non-empty image files in a collection directory
pub fn count_images(dir: &Path) -> io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let count = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_present(&entry.path()))
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| {
                    matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png")
                })
        })
        .count();

    Ok(count)
}
