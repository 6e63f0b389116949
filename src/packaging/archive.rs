//! Zip archive assembly

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::packaging::{PackagingError, canonical_file_name};
use crate::properties::Properties;

/// A packaged output root, ready for the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Zip every regular file under `root`, keyed by its `/`-separated path
/// relative to `root`.
///
/// Entries are added in sorted path order with a fixed timestamp, so the same
/// tree always yields the same bytes. Directories and symlinks are not stored.
pub fn package_directory(root: &Path) -> Result<Vec<u8>, PackagingError> {
    if !root.is_dir() {
        return Err(PackagingError::MissingRoot(root.to_path_buf()));
    }

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut count = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(root, entry.path())?;
        let content = fs::read(entry.path()).map_err(|e| PackagingError::io(entry.path(), e))?;

        writer.start_file(name, options)?;
        writer
            .write_all(&content)
            .map_err(|e| PackagingError::io(entry.path(), e))?;
        count += 1;
    }

    let bytes = writer.finish()?.into_inner();
    debug!(root = %root.display(), files = count, bytes = bytes.len(), "Packaged output root");
    Ok(bytes)
}

/// Package `root` off the async runtime and name the result
pub async fn package_and_download(
    root: &Path,
    base_name: &str,
    properties: &Properties,
) -> Result<PackagedArchive, PackagingError> {
    let file_name = canonical_file_name(base_name, properties);
    let root: PathBuf = root.to_path_buf();

    let bytes = tokio::task::spawn_blocking(move || package_directory(&root))
        .await
        .map_err(|e| PackagingError::Join(e.to_string()))??;

    Ok(PackagedArchive { file_name, bytes })
}

fn entry_name(root: &Path, path: &Path) -> Result<String, PackagingError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        PackagingError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path outside output root"),
        )
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn unpack(bytes: &[u8]) -> BTreeMap<String, Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            files.insert(file.name().to_string(), content);
        }
        files
    }

    #[test]
    fn test_unpacking_reproduces_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "orders-zuul/pom.xml", b"<project/>");
        write(root, "orders-zuul/.gitignore", b"target/\n");
        write(
            root,
            "orders-zuul/src/main/java/com/orders/zuul/filter/PostFilter.java",
            b"class PostFilter {}",
        );
        fs::create_dir_all(root.join("orders-zuul/empty")).unwrap();

        let files = unpack(&package_directory(root).unwrap());

        let expected: BTreeMap<String, Vec<u8>> = [
            ("orders-zuul/.gitignore", &b"target/\n"[..]),
            ("orders-zuul/pom.xml", b"<project/>"),
            (
                "orders-zuul/src/main/java/com/orders/zuul/filter/PostFilter.java",
                b"class PostFilter {}",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_vec()))
        .collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_identical_trees_give_identical_bytes() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for root in [first.path(), second.path()] {
            write(root, "a/b.txt", b"b");
            write(root, "a/c.txt", b"c");
        }

        assert_eq!(
            package_directory(first.path()).unwrap(),
            package_directory(second.path()).unwrap()
        );
    }

    #[test]
    fn test_empty_root_gives_empty_archive() {
        let temp_dir = TempDir::new().unwrap();
        assert!(unpack(&package_directory(temp_dir.path()).unwrap()).is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = package_directory(&temp_dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PackagingError::MissingRoot(_)));
    }

    #[tokio::test]
    async fn test_package_and_download_names_archive() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "orders-eureka/pom.xml", b"<project/>");
        let props: Properties = [("projectName", "orders")].into_iter().collect();

        let archive = package_and_download(temp_dir.path(), "skeleton", &props)
            .await
            .unwrap();

        assert_eq!(archive.file_name, "orders-skeleton.zip");
        assert_eq!(unpack(&archive.bytes).len(), 1);
    }
}
