//! Candidate discovery.
//!
//! Scanners produce the path list a [`MatchLibrary`](crate::MatchLibrary) is
//! seeded with. The set of scanners is fixed at compile time and registered
//! explicitly; nothing is loaded or executed from configuration.
//!
//! - `walk` - `WalkScanner` (every file) and `GitScanner` (git work trees)

mod walk;

use std::path::Path;

use crate::error::Result;

pub use walk::{git_work_tree, walk_files, GitScanner, WalkOptions, WalkScanner};

/// A source of candidate paths.
pub trait Scanner: Send + Sync {
    fn name(&self) -> &str;

    /// Higher wins when several scanners suit a path. Negative priorities are
    /// never picked automatically.
    fn priority(&self) -> i32;

    fn is_suitable(&self, path: &Path) -> bool;

    /// Lists candidate paths below `path`. A scanner may answer from its
    /// last scan of the same root unless `rescan` is set.
    fn scan(&self, path: &Path, rescan: bool) -> Result<Vec<String>>;
}

/// Explicitly registered scanners.
#[derive(Default)]
pub struct ScannerRegistry {
    scanners: Vec<Box<dyn Scanner>>,
}

impl std::fmt::Debug for ScannerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.scanners.iter().map(|scanner| scanner.name()))
            .finish()
    }
}

impl ScannerRegistry {
    /// The built-in scanners: git work trees first, plain walk as fallback.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(GitScanner::default());
        registry.register(WalkScanner::default());
        registry
    }

    pub fn register(&mut self, scanner: impl Scanner + 'static) {
        self.scanners.push(Box::new(scanner));
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Scanner> {
        self.scanners
            .iter()
            .find(|scanner| scanner.name() == name)
            .map(|scanner| scanner.as_ref())
    }

    /// Picks the highest-priority scanner suitable for `path`.
    ///
    /// Ties go to the scanner registered first.
    pub fn pick(&self, path: &Path) -> Option<&dyn Scanner> {
        let mut best: Option<&dyn Scanner> = None;
        for scanner in &self.scanners {
            if scanner.priority() < 0 || !scanner.is_suitable(path) {
                continue;
            }
            if best.map_or(true, |current| scanner.priority() > current.priority()) {
                best = Some(scanner.as_ref());
            }
        }
        if let Some(scanner) = best {
            log::info!(
                "fuzzymatch scanner picked name={} path={}",
                scanner.name(),
                path.display()
            );
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct FixedScanner {
        name: &'static str,
        priority: i32,
        files: Vec<String>,
    }

    impl Scanner for FixedScanner {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn is_suitable(&self, _path: &Path) -> bool {
            true
        }

        fn scan(&self, _path: &Path, _rescan: bool) -> Result<Vec<String>> {
            Ok(self.files.clone())
        }
    }

    fn fixed(name: &'static str, priority: i32) -> FixedScanner {
        FixedScanner {
            name,
            priority,
            files: vec![name.to_string()],
        }
    }

    #[test]
    fn picks_highest_priority() {
        let mut registry = ScannerRegistry::default();
        registry.register(fixed("low", 1));
        registry.register(fixed("high", 5));
        registry.register(fixed("also-high", 5));

        let picked = registry.pick(Path::new("/")).unwrap();
        assert_eq!(picked.name(), "high");
        assert_eq!(picked.scan(Path::new("/"), false).unwrap(), vec!["high"]);
    }

    #[test]
    fn negative_priority_is_never_picked() {
        let mut registry = ScannerRegistry::default();
        registry.register(fixed("manual", -1));
        assert!(registry.pick(Path::new("/")).is_none());
        assert!(registry.get("manual").is_some());
    }

    #[test]
    fn defaults_prefer_git_inside_a_work_tree() {
        let registry = ScannerRegistry::with_defaults();
        assert_eq!(registry.len(), 2);

        let plain = tempfile::tempdir().unwrap();
        assert_eq!(registry.pick(plain.path()).unwrap().name(), "walk");

        let repo = tempfile::tempdir().unwrap();
        fs::create_dir(repo.path().join(".git")).unwrap();
        assert_eq!(registry.pick(repo.path()).unwrap().name(), "git");
    }

    #[test]
    fn nothing_suits_a_missing_directory() {
        let registry = ScannerRegistry::with_defaults();
        let dir = tempfile::tempdir().unwrap();
        assert!(registry.pick(&dir.path().join("missing")).is_none());
    }
}
