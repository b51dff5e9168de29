//! In-process directory walkers built on the `ignore` crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::Scanner;
use crate::error::{FuzzyMatchError, Result};

/// Walk behaviour shared by the built-in scanners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Skip entries whose name starts with a dot.
    pub skip_hidden: bool,
    /// Honour `.gitignore`, `.ignore` and git exclude files.
    pub respect_ignore_files: bool,
    /// Maximum depth below the scan root. `None` is unlimited.
    pub max_depth: Option<usize>,
}

/// The last walk of a single root.
///
/// Scanning a different root replaces the entry. Hits hand out a copy of the
/// cached list.
#[derive(Debug, Default)]
struct ScanCache {
    last: Mutex<Option<(PathBuf, Vec<String>)>>,
}

impl ScanCache {
    fn get_or_walk(&self, root: &Path, rescan: bool, options: &WalkOptions) -> Result<Vec<String>> {
        if !rescan {
            if let Some((cached_root, files)) = self.last.lock().as_ref() {
                if cached_root == root {
                    return Ok(files.clone());
                }
            }
        }
        let files = walk_files(root, options)?;
        *self.last.lock() = Some((root.to_path_buf(), files.clone()));
        Ok(files)
    }
}

/// Lists every file below the root, like `find ./`.
#[derive(Debug, Default)]
pub struct WalkScanner {
    options: WalkOptions,
    cache: ScanCache,
}

impl WalkScanner {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            options,
            cache: ScanCache::default(),
        }
    }
}

impl Scanner for WalkScanner {
    fn name(&self) -> &str {
        "walk"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn is_suitable(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn scan(&self, path: &Path, rescan: bool) -> Result<Vec<String>> {
        self.cache.get_or_walk(path, rescan, &self.options)
    }
}

/// Lists the files of a git work tree, skipping ignored and hidden entries.
#[derive(Debug)]
pub struct GitScanner {
    options: WalkOptions,
    cache: ScanCache,
}

impl Default for GitScanner {
    fn default() -> Self {
        Self {
            options: WalkOptions {
                skip_hidden: true,
                respect_ignore_files: true,
                max_depth: None,
            },
            cache: ScanCache::default(),
        }
    }
}

impl Scanner for GitScanner {
    fn name(&self) -> &str {
        "git"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn is_suitable(&self, path: &Path) -> bool {
        path.is_dir() && git_work_tree(path).is_some()
    }

    fn scan(&self, path: &Path, rescan: bool) -> Result<Vec<String>> {
        self.cache.get_or_walk(path, rescan, &self.options)
    }
}

/// Returns the closest ancestor of `path` (inclusive) holding a `.git` entry.
pub fn git_work_tree(path: &Path) -> Option<&Path> {
    path.ancestors().find(|ancestor| ancestor.join(".git").exists())
}

/// Walks `root` and returns its files as `/`-joined paths relative to it.
///
/// Unreadable entries below the root are skipped and logged. A missing root or
/// one that is not a directory is invalid input, and a root that cannot be
/// read fails the walk.
pub fn walk_files(root: &Path, options: &WalkOptions) -> Result<Vec<String>> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(FuzzyMatchError::InvalidInput(format!(
                "scan root does not exist: {}",
                root.display()
            )));
        }
        Err(error) => return Err(error.into()),
    };
    if !metadata.is_dir() {
        return Err(FuzzyMatchError::InvalidInput(format!(
            "scan root is not a directory: {}",
            root.display()
        )));
    }

    let started = Instant::now();
    let walker = WalkBuilder::new(root)
        .hidden(options.skip_hidden)
        .git_ignore(options.respect_ignore_files)
        .git_global(options.respect_ignore_files)
        .git_exclude(options.respect_ignore_files)
        .ignore(options.respect_ignore_files)
        .parents(options.respect_ignore_files)
        .require_git(false)
        .max_depth(options.max_depth)
        .build();

    let mut files = Vec::new();
    let mut errors = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                skip_entry_error(error)?;
                errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(relative_path_string(relative));
    }

    log::debug!(
        "fuzzymatch walk root={} files={} errors={} elapsed_ms={}",
        root.display(),
        files.len(),
        errors,
        started.elapsed().as_millis(),
    );

    Ok(files)
}

/// Fails on errors at the walk root and logs everything deeper.
fn skip_entry_error(error: ignore::Error) -> Result<()> {
    if error.depth() == Some(0) {
        return Err(error.into());
    }
    log::debug!("fuzzymatch walk skipped entry: {}", error);
    Ok(())
}

fn relative_path_string(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn sorted(mut files: Vec<String>) -> Vec<String> {
        files.sort();
        files
    }

    #[test]
    fn walk_lists_files_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a/b/c.rs");
        touch(dir.path(), "top.txt");
        touch(dir.path(), ".hidden/secret");

        let files = walk_files(dir.path(), &WalkOptions::default()).unwrap();
        assert_eq!(
            sorted(files),
            vec![".hidden/secret", "a/b/c.rs", "top.txt"]
        );
    }

    #[test]
    fn walk_respects_depth_and_hidden_options() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a/b/c.rs");
        touch(dir.path(), "top.txt");
        touch(dir.path(), ".hidden");

        let options = WalkOptions {
            skip_hidden: true,
            respect_ignore_files: false,
            max_depth: Some(1),
        };
        let files = walk_files(dir.path(), &options).unwrap();
        assert_eq!(files, vec!["top.txt"]);
    }

    #[test]
    fn walk_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            walk_files(&missing, &WalkOptions::default()),
            Err(FuzzyMatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn walk_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.txt");
        assert!(matches!(
            walk_files(&dir.path().join("plain.txt"), &WalkOptions::default()),
            Err(FuzzyMatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn walk_reports_unreachable_root_as_io() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.txt");
        let below_file = dir.path().join("plain.txt").join("child");
        assert!(matches!(
            walk_files(&below_file, &WalkOptions::default()),
            Err(FuzzyMatchError::Io(_))
        ));
    }

    #[test]
    fn root_errors_fail_the_walk() {
        let denied = || ignore::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let at_root = ignore::Error::WithDepth {
            depth: 0,
            err: Box::new(denied()),
        };
        assert!(matches!(
            skip_entry_error(at_root),
            Err(FuzzyMatchError::Walk(_))
        ));

        let below_root = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(denied()),
        };
        assert!(skip_entry_error(below_root).is_ok());
        assert!(skip_entry_error(denied()).is_ok());
    }

    #[test]
    fn git_scanner_honours_gitignore() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
        touch(dir.path(), "src/lib.rs");
        touch(dir.path(), "target/debug/out");

        let scanner = GitScanner::default();
        assert!(scanner.is_suitable(dir.path()));
        assert!(scanner.is_suitable(&dir.path().join("src")));
        let files = scanner.scan(dir.path(), false).unwrap();
        assert_eq!(files, vec!["src/lib.rs"]);
    }

    #[test]
    fn cached_scan_until_rescan() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "one");

        let scanner = WalkScanner::default();
        assert_eq!(scanner.scan(dir.path(), false).unwrap(), vec!["one"]);

        touch(dir.path(), "two");
        assert_eq!(scanner.scan(dir.path(), false).unwrap(), vec!["one"]);
        assert_eq!(
            sorted(scanner.scan(dir.path(), true).unwrap()),
            vec!["one", "two"]
        );
    }

    #[test]
    fn cache_keeps_only_the_last_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(first.path(), "one");
        touch(second.path(), "other");

        let scanner = WalkScanner::default();
        assert_eq!(scanner.scan(first.path(), false).unwrap(), vec!["one"]);
        assert_eq!(scanner.scan(second.path(), false).unwrap(), vec!["other"]);

        touch(first.path(), "two");
        assert_eq!(
            sorted(scanner.scan(first.path(), false).unwrap()),
            vec!["one", "two"]
        );
    }
}
