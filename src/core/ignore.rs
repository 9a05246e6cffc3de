//! `.artignore` file parsing and pattern matching.
//!
//! This is the default implementation of the ignore-pattern predicate the
//! core treats as an external collaborator (`shouldIgnore(relpath) -> bool`);
//! the compiled rule set is memoized on the matcher instance, scoped to one
//! repository handle rather than the whole process.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Ignore pattern matcher for filtering working-tree paths.
#[derive(Debug)]
pub struct IgnoreMatcher {
    ignore_set: GlobSet,
    negate_set: GlobSet,
    root: PathBuf,
}

impl IgnoreMatcher {
    /// Create a new ignore matcher for the given repository root, compiling
    /// `.artignore` (if present) once.
    pub fn new(root: &Path) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut negate_builder = GlobSetBuilder::new();

        if let Ok(glob) = Glob::new("**/.art/**") {
            builder.add(glob);
        }
        if let Ok(glob) = Glob::new(".art/**") {
            builder.add(glob);
        }

        let ignore_file = root.join(".artignore");
        if ignore_file.exists() {
            if let Ok(content) = fs::read_to_string(&ignore_file) {
                Self::parse_ignore_file(&content, &mut builder, &mut negate_builder);
            }
        }

        Self {
            ignore_set: builder.build().unwrap_or_else(|_| GlobSet::empty()),
            negate_set: negate_builder.build().unwrap_or_else(|_| GlobSet::empty()),
            root: root.to_path_buf(),
        }
    }

    fn parse_ignore_file(
        content: &str,
        ignore_builder: &mut GlobSetBuilder,
        negate_builder: &mut GlobSetBuilder,
    ) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (pattern, is_negation) = if let Some(stripped) = line.strip_prefix('!') {
                (stripped.trim(), true)
            } else {
                (line, false)
            };

            for glob_pattern in Self::convert_to_glob(pattern) {
                if let Ok(glob) = Glob::new(&glob_pattern) {
                    if is_negation {
                        negate_builder.add(glob);
                    } else {
                        ignore_builder.add(glob);
                    }
                }
            }
        }
    }

    /// Convert a gitignore-style pattern into one or more glob patterns.
    fn convert_to_glob(pattern: &str) -> Vec<String> {
        let mut patterns = Vec::new();
        let pattern = pattern.trim_end_matches('/');

        if pattern.starts_with('/') {
            let p = &pattern[1..];
            patterns.push(p.to_string());
            patterns.push(format!("{p}/**"));
        } else {
            patterns.push(format!("**/{pattern}"));
            patterns.push(pattern.to_string());
            patterns.push(format!("**/{pattern}/**"));
            patterns.push(format!("{pattern}/**"));
        }

        patterns
    }

    /// Check if a path should be ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let ignored = self.ignore_set.is_match(relative);
        if ignored && self.negate_set.is_match(relative) {
            return false;
        }
        ignored
    }

    pub fn is_ignored_str(&self, path: &str) -> bool {
        self.is_ignored(Path::new(path))
    }

    pub fn filter_paths<'a>(&self, paths: impl Iterator<Item = &'a Path>) -> Vec<&'a Path> {
        paths.filter(|p| !self.is_ignored(p)).collect()
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::new(Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_ignore(dir: &Path, content: &str) {
        let ignore_file = dir.join(".artignore");
        let mut file = fs::File::create(&ignore_file).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn always_ignores_metadata_directory() {
        let dir = TempDir::new().unwrap();
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str(".art/art.json"));
        assert!(matcher.is_ignored_str(".art/history/local/main/manifest.json"));
    }

    #[test]
    fn simple_pattern() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(dir.path(), "*.tmp\n*.log");
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("test.tmp"));
        assert!(matcher.is_ignored_str("debug.log"));
        assert!(!matcher.is_ignored_str("test.txt"));
    }

    #[test]
    fn directory_pattern() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(dir.path(), "target/\nnode_modules/");
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("target/debug/test"));
        assert!(matcher.is_ignored_str("node_modules/package/index.js"));
        assert!(!matcher.is_ignored_str("src/target.rs"));
    }

    #[test]
    fn wildcard_patterns() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(dir.path(), "*.o\nbuild/**/*.bin");
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("main.o"));
        assert!(matcher.is_ignored_str("lib/util.o"));
    }

    #[test]
    fn negation_pattern() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(dir.path(), "*.bin\n!important.bin");
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("data.bin"));
        assert!(!matcher.is_ignored_str("important.bin"));
    }

    #[test]
    fn comment_and_empty_lines() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(
            dir.path(),
            "# This is a comment\n\n*.tmp\n   # Another comment\n*.log",
        );
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("test.tmp"));
        assert!(matcher.is_ignored_str("test.log"));
    }

    #[test]
    fn rooted_pattern() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(dir.path(), "/build\n/dist");
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("build/output.bin"));
        assert!(matcher.is_ignored_str("dist/app.js"));
    }

    #[test]
    fn common_patterns() {
        let dir = TempDir::new().unwrap();
        create_test_ignore(
            dir.path(),
            r#"
*.o
*.a
target/

.DS_Store
Thumbs.db

*.tmp
*.swp
*~
"#,
        );
        let matcher = IgnoreMatcher::new(dir.path());

        assert!(matcher.is_ignored_str("main.o"));
        assert!(matcher.is_ignored_str(".DS_Store"));
        assert!(matcher.is_ignored_str("target/debug/a.o"));
        assert!(!matcher.is_ignored_str("src/main.rs"));
    }
}
