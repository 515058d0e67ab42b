use crate::types::ExtractedFile;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write every extracted file under `root`, in sequence order.
///
/// Parent directories are created as needed and existing files are
/// truncated, so a later record with the same path wins. Content is
/// written with surrounding whitespace stripped and a single trailing
/// newline. A failed write aborts the batch at that record; files
/// already written stay on disk.
pub fn write_files(files: &[ExtractedFile], root: &Path) -> Result<usize> {
    fs::create_dir_all(root)
        .with_context(|| format!("Could not create output root {}", root.display()))?;

    let mut written = 0;
    for file in files {
        let full_path = root.join(&file.rel_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create directory {}", parent.display()))?;
        }

        let mut out = File::create(&full_path)
            .with_context(|| format!("Could not open {} for writing", full_path.display()))?;
        out.write_all(file.content.trim().as_bytes())
            .and_then(|_| out.write_all(b"\n"))
            .with_context(|| format!("Could not write {}", full_path.display()))?;

        println!("Extracted: {} ({})", full_path.display(), file.language);
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(path: &str, content: &str) -> ExtractedFile {
        ExtractedFile {
            rel_path: path.to_string(),
            language: "text".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn writes_content_with_single_trailing_newline() {
        let dir = tempdir().unwrap();
        let n = write_files(&[entry("hello.txt", "Hi there")], dir.path()).unwrap();
        assert_eq!(n, 1);
        let on_disk = fs::read_to_string(dir.path().join("hello.txt")).unwrap();
        assert_eq!(on_disk, "Hi there\n");
    }

    #[test]
    fn creates_missing_root_and_parent_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project-root");
        write_files(&[entry("src/app/index.ts", "export {};")], &root).unwrap();
        let on_disk = fs::read_to_string(root.join("src/app/index.ts")).unwrap();
        assert_eq!(on_disk, "export {};\n");
    }

    #[test]
    fn later_record_with_same_path_wins() {
        let dir = tempdir().unwrap();
        let files = [entry("a.txt", "first"), entry("a.txt", "second")];
        let n = write_files(&files, dir.path()).unwrap();
        assert_eq!(n, 2);
        let on_disk = fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(on_disk, "second\n");
    }

    #[test]
    fn rerun_with_same_input_is_idempotent() {
        let dir = tempdir().unwrap();
        let files = [entry("a.txt", "stable")];
        write_files(&files, dir.path()).unwrap();
        write_files(&files, dir.path()).unwrap();
        let on_disk = fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(on_disk, "stable\n");
    }
}
